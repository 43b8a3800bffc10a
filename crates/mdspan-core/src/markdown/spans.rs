//! Element to span flattening
//!
//! Walks parsed elements and emits one flat, ordered list of styled spans.
//! Line structure is carried by `\n` spans; nested blocks (quotes, list
//! items) get their line prefixes emitted at the start of every line.

use crate::style::{FontSpec, FontStyle, Rgba, SpanKind, SpanStyle, Weight, MONOSPACE};

use super::elements::{InlineContent, ListItem, MarkdownElement, TableCell};
use super::RenderConfig;

const QUOTE_PREFIX: &str = "│ ";
const BULLET: &str = "• ";
const CELL_SEPARATOR: &str = " | ";

/// Size multiplier for a heading level
pub fn heading_scale(level: u8) -> f32 {
    match level {
        1 => 2.0,
        2 => 1.6,
        3 => 1.3,
        _ => 1.1,
    }
}

/// Flatten elements into spans
pub fn render_elements(elements: &[MarkdownElement], config: &RenderConfig) -> Vec<SpanStyle> {
    let mut writer = SpanWriter::new(config);
    let base = writer.base_style();
    writer.blocks(elements, &base, true);
    writer.finish()
}

struct SpanWriter<'a> {
    config: &'a RenderConfig,
    spans: Vec<SpanStyle>,
    /// Emitted at the start of every line, outermost first
    prefixes: Vec<String>,
    at_line_start: bool,
}

impl<'a> SpanWriter<'a> {
    fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            spans: Vec::new(),
            prefixes: Vec::new(),
            at_line_start: true,
        }
    }

    fn base_style(&self) -> SpanStyle {
        SpanStyle::new(
            "",
            FontSpec::default(),
            self.config.base_size,
            self.config.palette.foreground,
        )
    }

    fn finish(mut self) -> Vec<SpanStyle> {
        // Drop trailing blank lines
        while self.spans.last().is_some_and(|s| s.content == "\n") {
            self.spans.pop();
        }
        self.spans
    }

    fn push(&mut self, span: SpanStyle) {
        if span.content.is_empty() {
            return;
        }
        if self.at_line_start {
            self.emit_prefixes();
        }
        self.spans.push(span);
    }

    fn emit_prefixes(&mut self) {
        self.at_line_start = false;
        if self.prefixes.is_empty() {
            return;
        }
        let prefix: String = self.prefixes.concat();
        let mut span = self.base_style();
        span.content = prefix;
        span.color = self.config.palette.dim;
        self.spans.push(span);
    }

    fn newline(&mut self) {
        let mut span = self.base_style();
        span.content = "\n".to_string();
        self.spans.push(span);
        self.at_line_start = true;
    }

    fn end_line(&mut self) {
        if !self.at_line_start {
            self.newline();
        }
    }

    /// An empty line between blocks, carrying the current prefixes
    fn blank_line(&mut self) {
        self.end_line();
        if !self.prefixes.is_empty() {
            let trimmed = self.prefixes.concat().trim_end().to_string();
            let mut span = self.base_style();
            span.content = trimmed;
            span.color = self.config.palette.dim;
            self.push_raw(span);
        }
        self.newline();
    }

    fn push_raw(&mut self, span: SpanStyle) {
        if !span.content.is_empty() {
            self.spans.push(span);
        }
    }

    fn blocks(&mut self, elements: &[MarkdownElement], base: &SpanStyle, spaced: bool) {
        for (idx, element) in elements.iter().enumerate() {
            if idx > 0 && spaced {
                self.blank_line();
            }
            self.block(element, base);
            self.end_line();
        }
    }

    fn block(&mut self, element: &MarkdownElement, base: &SpanStyle) {
        match element {
            MarkdownElement::Paragraph(content) => self.inline(content, base),
            MarkdownElement::Heading { level, content } => {
                let mut style = base.clone();
                style.font.weight = Weight::Bold;
                style.size = self.config.base_size * heading_scale(*level);
                self.inline(content, &style);
            }
            MarkdownElement::CodeBlock { lang, code } => self.code_block(lang, code, base),
            MarkdownElement::BlockQuote(children) => {
                let mut style = base.clone();
                style.font.style = FontStyle::Italic;
                self.prefixes.push(QUOTE_PREFIX.to_string());
                self.blocks(children, &style, true);
                self.prefixes.pop();
            }
            MarkdownElement::List { start, items } => self.list(*start, items, base),
            MarkdownElement::Table { headers, rows } => self.table(headers, rows, base),
            MarkdownElement::ThematicBreak => {
                let mut span = base.clone();
                span.content = "─".repeat(self.config.rule_width);
                span.color = self.config.palette.dim;
                self.push(span);
            }
        }
    }

    fn code_block(&mut self, lang: &Option<String>, code: &str, base: &SpanStyle) {
        let mut style = base.clone();
        style.font = FontSpec::monospace();
        style.kind = SpanKind::CodeBlock { lang: lang.clone() };
        style.background = self.code_background();

        let code = code.strip_suffix('\n').unwrap_or(code);
        if self.prefixes.is_empty() {
            style.content = code.to_string();
            self.push(style);
            return;
        }

        // Split so every line gets the surrounding prefixes
        for (idx, line) in code.split('\n').enumerate() {
            if idx > 0 {
                self.newline();
            }
            if self.at_line_start {
                self.emit_prefixes();
            }
            let mut span = style.clone();
            span.content = line.to_string();
            self.push(span);
        }
    }

    fn code_background(&self) -> Option<Rgba> {
        let bg = self.config.palette.code_background;
        (!bg.is_transparent()).then_some(bg)
    }

    fn list(&mut self, start: Option<u64>, items: &[ListItem], base: &SpanStyle) {
        for (idx, item) in items.iter().enumerate() {
            let marker = match (item.checked, start) {
                (Some(true), _) => "[x] ".to_string(),
                (Some(false), _) => "[ ] ".to_string(),
                (None, Some(n)) => format!("{}. ", n + idx as u64),
                (None, None) => BULLET.to_string(),
            };

            self.end_line();
            let mut marker_span = base.clone();
            marker_span.content = marker.clone();
            marker_span.color = self.config.palette.contrast;
            self.push(marker_span);

            // Continuation lines line up under the item text
            self.prefixes.push(" ".repeat(marker.chars().count()));
            self.blocks(&item.content, base, false);
            self.prefixes.pop();
        }
    }

    fn table(&mut self, headers: &[TableCell], rows: &[Vec<TableCell>], base: &SpanStyle) {
        if !headers.is_empty() {
            let mut header_style = base.clone();
            header_style.font.weight = Weight::Bold;
            self.table_row(headers, &header_style);
        }
        for row in rows {
            self.table_row(row, base);
        }
    }

    fn table_row(&mut self, cells: &[TableCell], style: &SpanStyle) {
        self.end_line();
        for (idx, cell) in cells.iter().enumerate() {
            if idx > 0 {
                let mut sep = style.clone();
                sep.content = CELL_SEPARATOR.to_string();
                sep.color = self.config.palette.dim;
                self.push(sep);
            }
            self.inline(&cell.content, style);
        }
    }

    fn inline(&mut self, content: &[InlineContent], base: &SpanStyle) {
        for item in content {
            self.inline_item(item, base);
        }
    }

    fn inline_item(&mut self, item: &InlineContent, base: &SpanStyle) {
        match item {
            InlineContent::Text(text) => {
                let mut span = base.clone();
                span.content = text.clone();
                self.push(span);
            }
            InlineContent::Bold(content) => {
                let mut style = base.clone();
                style.font.weight = Weight::Bold;
                self.inline(content, &style);
            }
            InlineContent::Italic(content) => {
                let mut style = base.clone();
                style.font.style = FontStyle::Italic;
                self.inline(content, &style);
            }
            InlineContent::Strikethrough(content) => {
                let mut style = base.clone();
                style.strikethrough = true;
                self.inline(content, &style);
            }
            InlineContent::Code(code) => {
                let mut span = base.clone();
                span.content = code.clone();
                span.font.typeface = MONOSPACE.to_string();
                span.color = self.config.palette.contrast;
                span.background = self.code_background();
                span.kind = SpanKind::InlineCode;
                self.push(span);
            }
            InlineContent::Link { text, url } => {
                let mut style = base.clone();
                style.color = self.config.palette.link;
                style.interactive = true;
                style.url = Some(url.clone());
                self.inline(text, &style);
            }
            InlineContent::SoftBreak => {
                let mut span = base.clone();
                span.content = " ".to_string();
                self.push(span);
            }
            InlineContent::HardBreak => self.newline(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::parser::parse;

    fn render(text: &str) -> Vec<SpanStyle> {
        render_elements(&parse(text), &RenderConfig::default())
    }

    fn plain(spans: &[SpanStyle]) -> String {
        spans.iter().map(|s| s.content.as_str()).collect()
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        assert_eq!(plain(&render("one\n\ntwo")), "one\n\ntwo");
    }

    #[test]
    fn test_heading_is_bold_and_scaled() {
        let config = RenderConfig::default();
        let spans = render("## Sub");
        assert_eq!(spans[0].content, "Sub");
        assert_eq!(spans[0].font.weight, Weight::Bold);
        assert_eq!(spans[0].size, config.base_size * 1.6);
    }

    #[test]
    fn test_link_span_is_interactive() {
        let config = RenderConfig::default();
        let spans = render("see [docs](https://gioui.org) now");
        let link = spans.iter().find(|s| s.content == "docs").unwrap();
        assert!(link.interactive);
        assert_eq!(link.url.as_deref(), Some("https://gioui.org"));
        assert_eq!(link.color, config.palette.link);
        assert!(spans
            .iter()
            .filter(|s| s.content != "docs")
            .all(|s| !s.interactive));
    }

    #[test]
    fn test_list_markers() {
        assert_eq!(plain(&render("- a\n- b")), "• a\n• b");
        assert_eq!(plain(&render("3. a\n4. b")), "3. a\n4. b");
        assert_eq!(plain(&render("- [x] a\n- [ ] b")), "[x] a\n[ ] b");
    }

    #[test]
    fn test_nested_list_indent() {
        assert_eq!(plain(&render("- a\n  - b\n- c")), "• a\n  • b\n• c");
    }

    #[test]
    fn test_block_quote_prefix() {
        let spans = render("> quoted *text*");
        assert_eq!(plain(&spans), "│ quoted text");
        let quoted = spans.iter().find(|s| s.content == "quoted ").unwrap();
        assert_eq!(quoted.font.style, FontStyle::Italic);
    }

    #[test]
    fn test_code_block_span() {
        let spans = render("```go\nfunc main() {}\n```");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "func main() {}");
        assert_eq!(spans[0].font.typeface, MONOSPACE);
        assert_eq!(
            spans[0].kind,
            SpanKind::CodeBlock {
                lang: Some("go".to_string())
            }
        );
    }

    #[test]
    fn test_code_block_in_quote_gets_prefix_per_line() {
        let spans = render("> ```\n> a\n> b\n> ```");
        assert_eq!(plain(&spans), "│ a\n│ b");
        assert_eq!(spans.iter().filter(|s| s.is_code_block()).count(), 2);
    }

    #[test]
    fn test_inline_code_not_code_block() {
        let spans = render("run `cargo` now");
        let code = spans.iter().find(|s| s.content == "cargo").unwrap();
        assert_eq!(code.kind, SpanKind::InlineCode);
        assert_eq!(code.font.typeface, MONOSPACE);
    }

    #[test]
    fn test_table_layout() {
        assert_eq!(
            plain(&render("| a | b |\n|---|---|\n| 1 | 2 |")),
            "a | b\n1 | 2"
        );
    }

    #[test]
    fn test_rule_width() {
        let config = RenderConfig::default();
        let spans = render("---");
        assert_eq!(spans[0].content.chars().count(), config.rule_width);
    }
}
