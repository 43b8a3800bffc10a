//! Markdown parsing using pulldown-cmark

use once_cell::sync::Lazy;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;

use super::elements::{InlineContent, ListItem, MarkdownElement, TableCell};

/// Regex for detecting bare URLs in text
static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s<>\[\]()]+").unwrap());

/// Parse markdown text into structured elements
pub fn parse(text: &str) -> Vec<MarkdownElement> {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

    let events: Vec<_> = Parser::new_ext(text, options).collect();
    let elements = parse_events(&events);
    tracing::debug!(
        events = events.len(),
        elements = elements.len(),
        "Parsed markdown"
    );
    elements
}

fn parse_events(events: &[Event<'_>]) -> Vec<MarkdownElement> {
    let mut elements = Vec::new();
    let mut idx = 0;

    while idx < events.len() {
        match &events[idx] {
            Event::Start(Tag::Paragraph) => {
                let (content, new_idx) =
                    collect_inline(events, idx + 1, Some(&TagEnd::Paragraph));
                if !content.is_empty() {
                    elements.push(MarkdownElement::Paragraph(content));
                }
                idx = new_idx;
            }
            Event::Start(Tag::Heading { level, .. }) => {
                let (content, new_idx) =
                    collect_inline(events, idx + 1, Some(&TagEnd::Heading(*level)));
                elements.push(MarkdownElement::Heading {
                    level: *level as u8,
                    content,
                });
                idx = new_idx;
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_string)
                    }
                    CodeBlockKind::Indented => None,
                };
                let (code, new_idx) = collect_code_block(events, idx + 1);
                elements.push(MarkdownElement::CodeBlock { lang, code });
                idx = new_idx;
            }
            Event::Start(Tag::BlockQuote(_)) => {
                let (nested, new_idx) = parse_block_quote(events, idx + 1);
                elements.push(MarkdownElement::BlockQuote(nested));
                idx = new_idx;
            }
            Event::Start(Tag::List(start)) => {
                let (items, new_idx) = parse_list_items(events, idx + 1);
                elements.push(MarkdownElement::List {
                    start: *start,
                    items,
                });
                idx = new_idx;
            }
            Event::Start(Tag::Table(_)) => {
                let (headers, rows, new_idx) = parse_table(events, idx + 1);
                elements.push(MarkdownElement::Table { headers, rows });
                idx = new_idx;
            }
            Event::Rule => {
                elements.push(MarkdownElement::ThematicBreak);
                idx += 1;
            }
            // Tight list items don't wrap their text in paragraphs
            Event::Text(_)
            | Event::Code(_)
            | Event::SoftBreak
            | Event::HardBreak
            | Event::Start(Tag::Strong)
            | Event::Start(Tag::Emphasis)
            | Event::Start(Tag::Strikethrough)
            | Event::Start(Tag::Link { .. })
            | Event::Start(Tag::Image { .. }) => {
                let (content, new_idx) = collect_inline(events, idx, None);
                if !content.is_empty() {
                    elements.push(MarkdownElement::Paragraph(content));
                }
                // Always make progress, even on a stray end tag
                idx = new_idx.max(idx + 1);
            }
            _ => {
                idx += 1;
            }
        }
    }

    elements
}

/// Collect inline content starting at `start`.
///
/// With an `end` tag, everything up to the matching end is consumed and
/// unknown events are skipped. Without one, collection stops at the first
/// block-level event.
fn collect_inline(
    events: &[Event<'_>],
    start: usize,
    end: Option<&TagEnd>,
) -> (Vec<InlineContent>, usize) {
    let mut content = Vec::new();
    let mut idx = start;
    let mut style_stack: Vec<InlineStyle> = Vec::new();
    let in_link = end == Some(&TagEnd::Link);

    while idx < events.len() {
        match &events[idx] {
            Event::End(tag) if Some(tag) == end => {
                return (content, idx + 1);
            }
            Event::Text(text) if in_link => {
                push_with_styles(
                    &mut content,
                    InlineContent::Text(text.to_string()),
                    &style_stack,
                );
            }
            Event::Text(text) => {
                for inline in autolink_text(text) {
                    push_with_styles(&mut content, inline, &style_stack);
                }
            }
            Event::Code(code) => {
                let inline = InlineContent::Code(code.to_string());
                push_with_styles(&mut content, inline, &style_stack);
            }
            Event::Start(Tag::Strong) => style_stack.push(InlineStyle::Bold),
            Event::Start(Tag::Emphasis) => style_stack.push(InlineStyle::Italic),
            Event::Start(Tag::Strikethrough) => style_stack.push(InlineStyle::Strikethrough),
            Event::End(TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough) => {
                style_stack.pop();
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                let url = dest_url.to_string();
                let (text, new_idx) = collect_inline(events, idx + 1, Some(&TagEnd::Link));
                push_with_styles(&mut content, InlineContent::Link { text, url }, &style_stack);
                idx = new_idx;
                continue;
            }
            Event::Start(Tag::Image { .. }) => {
                // Images show their alt text
                let (alt, new_idx) = collect_inline(events, idx + 1, Some(&TagEnd::Image));
                for inline in alt {
                    push_with_styles(&mut content, inline, &style_stack);
                }
                idx = new_idx;
                continue;
            }
            Event::SoftBreak => content.push(InlineContent::SoftBreak),
            Event::HardBreak => content.push(InlineContent::HardBreak),
            _ if end.is_none() => break,
            _ => {}
        }
        idx += 1;
    }

    (content, idx)
}

#[derive(Clone, Copy)]
enum InlineStyle {
    Bold,
    Italic,
    Strikethrough,
}

fn push_with_styles(content: &mut Vec<InlineContent>, item: InlineContent, styles: &[InlineStyle]) {
    let wrapped = styles.iter().rev().fold(item, |inner, style| match style {
        InlineStyle::Bold => InlineContent::Bold(vec![inner]),
        InlineStyle::Italic => InlineContent::Italic(vec![inner]),
        InlineStyle::Strikethrough => InlineContent::Strikethrough(vec![inner]),
    });
    content.push(wrapped);
}

/// Convert text containing bare URLs into a mix of Text and Link nodes
fn autolink_text(text: &str) -> Vec<InlineContent> {
    let mut result = Vec::new();
    let mut last_end = 0;

    for mat in URL_REGEX.find_iter(text) {
        if mat.start() > last_end {
            result.push(InlineContent::Text(text[last_end..mat.start()].to_string()));
        }

        let url = mat.as_str().to_string();
        result.push(InlineContent::Link {
            text: vec![InlineContent::Text(url.clone())],
            url,
        });

        last_end = mat.end();
    }

    if last_end < text.len() || result.is_empty() {
        result.push(InlineContent::Text(text[last_end..].to_string()));
    }

    result
}

fn collect_code_block(events: &[Event<'_>], start: usize) -> (String, usize) {
    let mut code = String::new();

    for (idx, event) in events.iter().enumerate().skip(start) {
        match event {
            Event::End(TagEnd::CodeBlock) => return (code, idx + 1),
            Event::Text(text) => code.push_str(text),
            _ => {}
        }
    }

    (code, events.len())
}

fn parse_block_quote(events: &[Event<'_>], start: usize) -> (Vec<MarkdownElement>, usize) {
    let mut depth = 1;

    for idx in start..events.len() {
        match &events[idx] {
            Event::Start(Tag::BlockQuote(_)) => depth += 1,
            Event::End(TagEnd::BlockQuote(_)) => {
                depth -= 1;
                if depth == 0 {
                    return (parse_events(&events[start..idx]), idx + 1);
                }
            }
            _ => {}
        }
    }

    (parse_events(&events[start..]), events.len())
}

fn parse_list_items(events: &[Event<'_>], start: usize) -> (Vec<ListItem>, usize) {
    let mut items = Vec::new();
    let mut idx = start;

    while idx < events.len() {
        match &events[idx] {
            Event::End(TagEnd::List(_)) => {
                return (items, idx + 1);
            }
            Event::Start(Tag::Item) => {
                let (item, new_idx) = parse_list_item(events, idx + 1);
                items.push(item);
                idx = new_idx;
            }
            _ => {
                idx += 1;
            }
        }
    }

    (items, idx)
}

fn parse_list_item(events: &[Event<'_>], start: usize) -> (ListItem, usize) {
    let mut nested_events = Vec::new();
    let mut checked = None;
    let mut depth = 0usize;

    for idx in start..events.len() {
        match &events[idx] {
            Event::End(TagEnd::Item) if depth == 0 => {
                let content = parse_events(&nested_events);
                return (ListItem { content, checked }, idx + 1);
            }
            Event::TaskListMarker(is_checked) if depth == 0 => {
                checked = Some(*is_checked);
            }
            event => {
                match event {
                    Event::Start(Tag::Item) => depth += 1,
                    Event::End(TagEnd::Item) => depth -= 1,
                    _ => {}
                }
                nested_events.push(event.clone());
            }
        }
    }

    let content = parse_events(&nested_events);
    (ListItem { content, checked }, events.len())
}

fn parse_table(events: &[Event<'_>], start: usize) -> (Vec<TableCell>, Vec<Vec<TableCell>>, usize) {
    let mut headers = Vec::new();
    let mut rows = Vec::new();
    let mut current_row: Vec<TableCell> = Vec::new();
    let mut idx = start;

    while idx < events.len() {
        match &events[idx] {
            Event::End(TagEnd::Table) => {
                return (headers, rows, idx + 1);
            }
            // Header cells sit directly inside TableHead, without a row
            Event::End(TagEnd::TableHead) => {
                headers = std::mem::take(&mut current_row);
                idx += 1;
            }
            Event::End(TagEnd::TableRow) => {
                rows.push(std::mem::take(&mut current_row));
                idx += 1;
            }
            Event::Start(Tag::TableCell) => {
                let (content, new_idx) = collect_inline(events, idx + 1, Some(&TagEnd::TableCell));
                current_row.push(TableCell { content });
                idx = new_idx;
            }
            _ => {
                idx += 1;
            }
        }
    }

    (headers, rows, idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autolink_detection() {
        let result = autolink_text("Check https://example.com here");
        assert_eq!(result.len(), 3);

        match &result[0] {
            InlineContent::Text(t) => assert_eq!(t, "Check "),
            _ => panic!("Expected Text"),
        }

        match &result[1] {
            InlineContent::Link { url, .. } => assert_eq!(url, "https://example.com"),
            _ => panic!("Expected Link"),
        }

        match &result[2] {
            InlineContent::Text(t) => assert_eq!(t, " here"),
            _ => panic!("Expected Text"),
        }
    }

    #[test]
    fn test_autolink_plain_text_untouched() {
        assert_eq!(
            autolink_text("no links"),
            vec![InlineContent::Text("no links".to_string())]
        );
    }

    #[test]
    fn test_explicit_link_not_autolinked_twice() {
        let elements = parse("[https://gioui.org](https://gioui.org)");
        let MarkdownElement::Paragraph(content) = &elements[0] else {
            panic!("Expected Paragraph, got {:?}", elements);
        };
        assert_eq!(
            content,
            &vec![InlineContent::Link {
                text: vec![InlineContent::Text("https://gioui.org".to_string())],
                url: "https://gioui.org".to_string(),
            }]
        );
    }

    #[test]
    fn test_heading_and_code_block() {
        let elements = parse("# Title\n\n```go\nfunc main() {}\n```\n");
        assert_eq!(elements.len(), 2);
        assert!(matches!(&elements[0], MarkdownElement::Heading { level: 1, .. }));
        assert_eq!(
            elements[1],
            MarkdownElement::CodeBlock {
                lang: Some("go".to_string()),
                code: "func main() {}\n".to_string(),
            }
        );
    }

    #[test]
    fn test_fence_info_keeps_first_word() {
        let elements = parse("```rust ignore\nlet x = 1;\n```\n");
        assert!(matches!(
            &elements[0],
            MarkdownElement::CodeBlock { lang: Some(lang), .. } if lang == "rust"
        ));
    }

    #[test]
    fn test_nested_list_items() {
        let elements = parse("- one\n  - inner\n- two\n");
        let MarkdownElement::List { start, items } = &elements[0] else {
            panic!("Expected List, got {:?}", elements);
        };
        assert_eq!(*start, None);
        assert_eq!(items.len(), 2);
        assert!(items[0]
            .content
            .iter()
            .any(|e| matches!(e, MarkdownElement::List { items, .. } if items.len() == 1)));
    }

    #[test]
    fn test_task_list() {
        let elements = parse("- [x] done\n- [ ] todo\n");
        let MarkdownElement::List { items, .. } = &elements[0] else {
            panic!("Expected List");
        };
        assert_eq!(items[0].checked, Some(true));
        assert_eq!(items[1].checked, Some(false));
    }

    #[test]
    fn test_table_headers_and_rows() {
        let elements = parse("| a | b |\n|---|---|\n| 1 | 2 |\n");
        let MarkdownElement::Table { headers, rows } = &elements[0] else {
            panic!("Expected Table, got {:?}", elements);
        };
        assert_eq!(headers.len(), 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn test_nested_block_quote() {
        let elements = parse("> outer\n>\n> > inner\n");
        let MarkdownElement::BlockQuote(children) = &elements[0] else {
            panic!("Expected BlockQuote");
        };
        assert!(children
            .iter()
            .any(|e| matches!(e, MarkdownElement::BlockQuote(_))));
    }

    #[test]
    fn test_styles_wrap_content() {
        let elements = parse("**bold** and *it*");
        let MarkdownElement::Paragraph(content) = &elements[0] else {
            panic!("Expected Paragraph");
        };
        assert!(matches!(&content[0], InlineContent::Bold(_)));
        assert!(matches!(&content[2], InlineContent::Italic(_)));
    }
}
