//! Interactive terminal viewer
//!
//! Draws a rendered document, scrolls it, and opens links on click or
//! Enter. The document is rendered once; only layout is redone, and only
//! when the width changes.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use mdspan_core::RenderedDocument;
use ratatui::layout::{Constraint, Layout as AreaLayout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::themes::Theme;

mod cache;
pub mod layout;
mod links;
mod terminal;

use cache::LayoutCache;
use layout::Layout;
pub use links::open_url;
use terminal::TerminalGuard;

/// Lines moved per mouse wheel notch
const WHEEL_STEP: usize = 3;

pub struct Viewer {
    document: RenderedDocument,
    content_hash: u64,
    theme: Theme,
    title: String,
    cache: LayoutCache,
    layout: Arc<Layout>,
    /// Inner document area from the last draw, for mouse hit-testing
    content_area: Rect,
    scroll: usize,
    focused_link: Option<usize>,
    should_quit: bool,
}

impl Viewer {
    pub fn new(document: RenderedDocument, source: &str, theme: Theme, title: String) -> Self {
        let mut hasher = DefaultHasher::new();
        source.hash(&mut hasher);

        Self {
            document,
            content_hash: hasher.finish(),
            theme,
            title,
            cache: LayoutCache::new(),
            layout: Arc::new(Layout::default()),
            content_area: Rect::default(),
            scroll: 0,
            focused_link: None,
            should_quit: false,
        }
    }

    /// Run until the user quits. The terminal is restored on return.
    pub fn run(mut self) -> Result<()> {
        let mut guard = TerminalGuard::new()?;
        tracing::info!(title = %self.title, links = self.document.links.len(), "Viewer started");

        while !self.should_quit {
            guard.terminal().draw(|frame| self.draw(frame))?;

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }

        tracing::info!("Viewer closed");
        Ok(())
    }

    fn relayout(&mut self, area: Rect) {
        self.content_area = area;
        let width = area.width as usize;
        if self.cache.check_width(width) {
            tracing::debug!(width, "Width changed, layout cache cleared");
        }
        self.layout = self.cache.get_or_layout(&self.document, self.content_hash, width);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn page_height(&self) -> usize {
        (self.content_area.height as usize).max(1)
    }

    fn max_scroll(&self) -> usize {
        self.layout.lines.len().saturating_sub(self.page_height())
    }

    fn scroll_down(&mut self, lines: usize) {
        self.scroll = (self.scroll + lines).min(self.max_scroll());
    }

    fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_down(self.page_height()),
            KeyCode::PageUp => self.scroll_up(self.page_height()),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.scroll = self.max_scroll(),
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            KeyCode::Enter => {
                if let Some(link) = self.focused_link.and_then(|i| self.document.links.get(i)) {
                    open_url(&link.url);
                }
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_down(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll_up(WHEEL_STEP),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((link, url)) = self.link_at_cell(mouse.column, mouse.row) {
                    self.focused_link = Some(link);
                    open_url(&url);
                }
            }
            _ => {}
        }
    }

    /// Link under a screen cell, as (link index, url)
    fn link_at_cell(&self, column: u16, row: u16) -> Option<(usize, String)> {
        let area = self.content_area;
        if !area.contains((column, row).into()) {
            return None;
        }
        let line = self.scroll + (row - area.y) as usize;
        let col = (column - area.x) as usize;
        self.layout
            .link_at(line, col)
            .map(|l| (l.link, l.url.clone()))
    }

    fn cycle_focus(&mut self, forward: bool) {
        let count = self.document.links.len();
        if count == 0 {
            return;
        }
        let next = match (self.focused_link, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.focused_link = Some(next);

        // Keep the focused link on screen
        if let Some(line) = self.layout.first_line_of(next) {
            if line < self.scroll {
                self.scroll = line;
            } else if line >= self.scroll + self.page_height() {
                self.scroll = (line + 1 - self.page_height()).min(self.max_scroll());
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let [main_area, status_area] =
            AreaLayout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        let title = Line::from(format!(" {} ", self.title))
            .style(Style::default().fg(self.theme.title_color));
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(self.theme.border_color))
            .style(Style::default().bg(self.theme.bg_color));
        let inner = block.inner(main_area);
        frame.render_widget(block, main_area);

        self.relayout(inner);
        let height = self.page_height();
        let visible: Vec<Line<'static>> = self
            .layout
            .lines
            .iter()
            .skip(self.scroll)
            .take(height)
            .cloned()
            .collect();
        frame.render_widget(Paragraph::new(visible), inner);
        self.highlight_focused_link(frame, inner);

        frame.render_widget(self.status_line(), status_area);
    }

    fn highlight_focused_link(&self, frame: &mut Frame, inner: Rect) {
        let Some(focused) = self.focused_link else {
            return;
        };
        let style = Style::default().bg(self.theme.focus_bg_color);
        let visible = self.scroll..self.scroll + self.page_height();

        for span in self.layout.links.iter().filter(|l| l.link == focused) {
            if !visible.contains(&span.line) {
                continue;
            }
            let rect = Rect::new(
                inner.x + span.start_col as u16,
                inner.y + (span.line - self.scroll) as u16,
                (span.end_col - span.start_col) as u16,
                1,
            )
            .intersection(inner);
            frame.buffer_mut().set_style(rect, style);
        }
    }

    fn status_line(&self) -> Paragraph<'static> {
        let total = self.layout.lines.len();
        let position = if total <= self.page_height() {
            "All".to_string()
        } else {
            format!("{}%", (self.scroll * 100) / self.max_scroll().max(1))
        };

        let hint = match self.focused_link.and_then(|i| self.document.links.get(i)) {
            Some(link) => format!(" Enter open {} ", link.url),
            None => " q quit  j/k scroll  Tab links ".to_string(),
        };

        let line = Line::from(vec![
            Span::styled(hint, Style::default().fg(self.theme.title_color)),
            Span::styled(format!(" {} ", position), Style::default().fg(self.theme.dim_color())),
        ]);
        Paragraph::new(line).style(Style::default().bg(self.theme.status_bar_bg_color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::THEME_REGISTRY;
    use mdspan_core::{render_document, RenderConfig};

    fn viewer(source: &str, width: u16, height: u16) -> Viewer {
        let theme = THEME_REGISTRY.get("midnight").unwrap().clone();
        let document = render_document(source, &RenderConfig::default());
        let mut viewer = Viewer::new(document, source, theme, "test".to_string());
        viewer.relayout(Rect::new(1, 1, width, height));
        viewer
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn numbered_lines(n: usize) -> String {
        (0..n).map(|i| format!("line {i}\n\n")).collect()
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut v = viewer(&numbered_lines(10), 40, 5);
        // 10 paragraphs with blank lines between them
        assert_eq!(v.layout.lines.len(), 19);

        v.handle_key(key(KeyCode::Up));
        assert_eq!(v.scroll, 0);
        v.handle_key(key(KeyCode::Char('G')));
        assert_eq!(v.scroll, 14);
        v.handle_key(key(KeyCode::Down));
        assert_eq!(v.scroll, 14);
        v.handle_key(key(KeyCode::PageUp));
        assert_eq!(v.scroll, 9);
        v.handle_key(key(KeyCode::Char('g')));
        assert_eq!(v.scroll, 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut v = viewer("x", 10, 3);
        v.handle_key(key(KeyCode::Char('q')));
        assert!(v.should_quit);

        let mut v = viewer("x", 10, 3);
        v.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(v.should_quit);
    }

    #[test]
    fn test_tab_cycles_and_scrolls_to_link() {
        let source = format!(
            "[first](https://a.example)\n\n{}[second](https://b.example)",
            numbered_lines(10)
        );
        let mut v = viewer(&source, 40, 4);

        v.handle_key(key(KeyCode::Tab));
        assert_eq!(v.focused_link, Some(0));
        assert_eq!(v.scroll, 0);

        v.handle_key(key(KeyCode::Tab));
        assert_eq!(v.focused_link, Some(1));
        let line = v.layout.first_line_of(1).unwrap();
        assert!((v.scroll..v.scroll + 4).contains(&line));

        v.handle_key(key(KeyCode::Tab));
        assert_eq!(v.focused_link, Some(0));
        v.handle_key(key(KeyCode::BackTab));
        assert_eq!(v.focused_link, Some(1));
    }

    #[test]
    fn test_tab_without_links() {
        let mut v = viewer("no links", 20, 3);
        v.handle_key(key(KeyCode::Tab));
        assert_eq!(v.focused_link, None);
    }

    #[test]
    fn test_cell_hit_testing() {
        let v = viewer("see [docs](https://gioui.org)", 40, 3);
        // Content area starts at (1, 1)
        assert_eq!(
            v.link_at_cell(5, 1),
            Some((0, "https://gioui.org".to_string()))
        );
        assert_eq!(v.link_at_cell(2, 1), None);
        assert_eq!(v.link_at_cell(0, 0), None);
        assert_eq!(v.link_at_cell(5, 2), None);
    }

    #[test]
    fn test_wheel_scroll() {
        let mut v = viewer(&numbered_lines(10), 40, 5);
        let wheel = |kind| MouseEvent {
            kind,
            column: 2,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        v.handle_mouse(wheel(MouseEventKind::ScrollDown));
        assert_eq!(v.scroll, WHEEL_STEP);
        v.handle_mouse(wheel(MouseEventKind::ScrollUp));
        assert_eq!(v.scroll, 0);
    }
}
