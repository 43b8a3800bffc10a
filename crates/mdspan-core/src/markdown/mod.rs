//! Markdown rendering to styled spans
//!
//! `render` turns markdown into a flat span list. `render_document` goes one
//! step further and replaces every code block span with highlighted
//! segments, which is what hosts display.

use crate::highlight::{highlight, Lexicon};
use crate::style::{Palette, SpanStyle};

mod elements;
mod links;
mod parser;
mod spans;

pub use elements::{InlineContent, ListItem, MarkdownElement, TableCell};
pub use links::{collect_links, LinkRef};
pub use parser::parse;
pub use spans::heading_scale;

/// Everything a render pass needs
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub palette: Palette,
    pub lexicon: Lexicon,
    /// Body text size; headings scale from it
    pub base_size: f32,
    /// Character count of a thematic break
    pub rule_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            lexicon: Lexicon::default(),
            base_size: 16.0,
            rule_width: 40,
        }
    }
}

/// Final output of a render pass
#[derive(Debug, Clone, Default)]
pub struct RenderedDocument {
    pub spans: Vec<SpanStyle>,
    pub links: Vec<LinkRef>,
}

/// Render markdown into spans, leaving code blocks as single spans
pub fn render(text: &str, config: &RenderConfig) -> Vec<SpanStyle> {
    spans::render_elements(&parse(text), config)
}

/// Replace code block spans with per-token segments; other spans pass through
pub fn highlight_code_spans(
    spans: Vec<SpanStyle>,
    lexicon: &Lexicon,
    palette: &Palette,
) -> Vec<SpanStyle> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.is_code_block() {
            out.extend(highlight(&span, lexicon, palette));
        } else {
            out.push(span);
        }
    }
    out
}

/// Render markdown with highlighted code blocks and collected links
pub fn render_document(text: &str, config: &RenderConfig) -> RenderedDocument {
    let spans = highlight_code_spans(render(text, config), &config.lexicon, &config.palette);
    let links = collect_links(&spans);
    tracing::debug!(
        spans = spans.len(),
        links = links.len(),
        "Rendered markdown document"
    );
    RenderedDocument { spans, links }
}
