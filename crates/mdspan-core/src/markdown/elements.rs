//! Markdown element types

/// Block-level markdown elements
#[derive(Debug, Clone, PartialEq)]
pub enum MarkdownElement {
    Paragraph(Vec<InlineContent>),
    /// Heading with level (1-6) and content
    Heading {
        level: u8,
        content: Vec<InlineContent>,
    },
    /// Fenced or indented code block; `lang` is the fence info string
    CodeBlock { lang: Option<String>, code: String },
    BlockQuote(Vec<MarkdownElement>),
    List {
        start: Option<u64>,
        items: Vec<ListItem>,
    },
    Table {
        headers: Vec<TableCell>,
        rows: Vec<Vec<TableCell>>,
    },
    ThematicBreak,
}

/// A list item containing block elements
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub content: Vec<MarkdownElement>,
    /// `Some` for task list items
    pub checked: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub content: Vec<InlineContent>,
}

/// Inline markdown content
#[derive(Debug, Clone, PartialEq)]
pub enum InlineContent {
    Text(String),
    Bold(Vec<InlineContent>),
    Italic(Vec<InlineContent>),
    Code(String),
    Link {
        text: Vec<InlineContent>,
        url: String,
    },
    Strikethrough(Vec<InlineContent>),
    /// Soft line break, drawn as a space
    SoftBreak,
    HardBreak,
}
