//! Span layout into terminal lines
//!
//! Wraps rendered spans to a column width and records where each link
//! landed so mouse clicks and focus highlighting can find it again.

use std::collections::HashMap;

use mdspan_core::{FontStyle, RenderedDocument, SpanStyle, Weight};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::themes::to_color;

/// Columns between tab stops
const TAB_WIDTH: usize = 4;

/// Tracks a hyperlink's position in laid out output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    /// Index into the document's link list
    pub link: usize,
    pub url: String,
    /// Line index in laid out output (0-based)
    pub line: usize,
    /// Start column in display width units (0-based)
    pub start_col: usize,
    /// End column in display width units (exclusive)
    pub end_col: usize,
}

/// Laid out document with link tracking
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub lines: Vec<Line<'static>>,
    pub links: Vec<LinkSpan>,
}

impl Layout {
    /// Find the link drawn at a cell
    pub fn link_at(&self, line: usize, col: usize) -> Option<&LinkSpan> {
        self.links
            .iter()
            .find(|l| l.line == line && (l.start_col..l.end_col).contains(&col))
    }

    /// First line a link appears on
    pub fn first_line_of(&self, link: usize) -> Option<usize> {
        self.links.iter().find(|l| l.link == link).map(|l| l.line)
    }
}

/// Terminal style for a span
pub fn span_style(span: &SpanStyle) -> Style {
    let mut style = Style::default().fg(to_color(span.color));
    if let Some(bg) = span.background {
        style = style.bg(to_color(bg));
    }
    if span.font.weight == Weight::Bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if span.font.style == FontStyle::Italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if span.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if span.interactive {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Lay out a document at `width` columns. Width 0 disables wrapping.
pub fn layout(document: &RenderedDocument, width: usize) -> Layout {
    let link_of_span: HashMap<usize, usize> = document
        .links
        .iter()
        .enumerate()
        .flat_map(|(link_idx, link)| link.spans.clone().map(move |s| (s, link_idx)))
        .collect();

    let mut builder = LineBuilder::new(width);
    for (idx, span) in document.spans.iter().enumerate() {
        let style = span_style(span);
        let link = link_of_span.get(&idx).map(|&l| (l, span.url.as_deref().unwrap_or("")));

        for (n, segment) in span.content.split('\n').enumerate() {
            if n > 0 {
                builder.finish_line();
            }
            builder.push_text(idx, segment, style, link);
        }
    }
    builder.finish()
}

struct LineBuilder {
    width: usize,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    /// Source span index of the last span in `current`
    last_source: Option<usize>,
    col: usize,
    links: Vec<LinkSpan>,
}

impl LineBuilder {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            current: Vec::new(),
            last_source: None,
            col: 0,
            links: Vec::new(),
        }
    }

    fn finish_line(&mut self) {
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
        self.last_source = None;
        self.col = 0;
    }

    fn finish(mut self) -> Layout {
        if !self.current.is_empty() {
            self.finish_line();
        }
        Layout {
            lines: self.lines,
            links: self.links,
        }
    }

    fn fits(&self, width: usize) -> bool {
        self.width == 0 || self.col + width <= self.width
    }

    fn push_text(&mut self, source: usize, text: &str, style: Style, link: Option<(usize, &str)>) {
        for piece in split_words(text) {
            let expanded;
            let piece = if piece.contains('\t') {
                expanded = expand_tabs(piece, self.col);
                expanded.as_str()
            } else {
                piece
            };
            let piece_width = piece.width();
            let is_space = piece.starts_with(char::is_whitespace);

            if self.fits(piece_width) {
                self.append(source, piece, piece_width, style, link);
            } else if is_space {
                // Whitespace at a wrap point is dropped
                self.finish_line();
            } else if self.col > 0 && piece_width <= self.width {
                self.finish_line();
                self.append(source, piece, piece_width, style, link);
            } else {
                self.push_chars(source, piece, style, link);
            }
        }
    }

    /// Force-break a word longer than the line
    fn push_chars(&mut self, source: usize, word: &str, style: Style, link: Option<(usize, &str)>) {
        let mut buf = [0u8; 4];
        for c in word.chars() {
            let char_width = c.width().unwrap_or(0);
            if !self.fits(char_width) && self.col > 0 {
                self.finish_line();
            }
            self.append(source, c.encode_utf8(&mut buf), char_width, style, link);
        }
    }

    fn append(
        &mut self,
        source: usize,
        text: &str,
        width: usize,
        style: Style,
        link: Option<(usize, &str)>,
    ) {
        let line = self.lines.len();
        if let Some((link_idx, url)) = link {
            match self.links.last_mut() {
                Some(last)
                    if last.link == link_idx && last.line == line && last.end_col == self.col =>
                {
                    last.end_col += width;
                }
                _ => self.links.push(LinkSpan {
                    link: link_idx,
                    url: url.to_string(),
                    line,
                    start_col: self.col,
                    end_col: self.col + width,
                }),
            }
        }

        match self.current.last_mut() {
            Some(last) if self.last_source == Some(source) => last.content.to_mut().push_str(text),
            _ => self.current.push(Span::styled(text.to_string(), style)),
        }
        self.last_source = Some(source);
        self.col += width;
    }
}

/// Replace tabs with spaces up to the next tab stop, counting from `start_col`
fn expand_tabs(text: &str, start_col: usize) -> String {
    let mut col = start_col;
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\t' {
            let pad = TAB_WIDTH - col % TAB_WIDTH;
            out.push_str(&" ".repeat(pad));
            col += pad;
        } else {
            out.push(c);
            col += c.width().unwrap_or(0);
        }
    }
    out
}

/// Split text into alternating runs of whitespace and non-whitespace
fn split_words(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let space = first.is_whitespace();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != space)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (piece, tail) = rest.split_at(end);
        rest = tail;
        Some(piece)
    })
}
