//! End-to-end rendering of a document with a Go code block

use mdspan_core::highlight::{tokenize, Lexicon};
use mdspan_core::{render, render_document, Palette, RenderConfig, Rgba, SpanKind};

const SAMPLE: &str = "
# Markdown demo

## Basics
- **bold** and *italic* text
- a [link](https://gioui.org)
- code blocks:

```go
func main() {
    fmt.Println(\"Hello, Gio!\")
}
```

> a quote
";

fn joined(spans: &[mdspan_core::SpanStyle]) -> String {
    spans.iter().map(|s| s.content.as_str()).collect()
}

#[test]
fn test_highlighting_preserves_text() {
    let config = RenderConfig::default();
    let plain = render(SAMPLE, &config);
    let doc = render_document(SAMPLE, &config);
    assert_eq!(joined(&plain), joined(&doc.spans));
    assert!(doc.spans.len() > plain.len());
}

#[test]
fn test_non_code_spans_pass_through() {
    let config = RenderConfig::default();
    let plain = render(SAMPLE, &config);
    let doc = render_document(SAMPLE, &config);

    let before: Vec<_> = plain.iter().filter(|s| !s.is_code_block()).collect();
    let after: Vec<_> = doc.spans.iter().filter(|s| !s.is_code_block()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_code_tokens_colored() {
    let config = RenderConfig::default();
    let palette = &config.palette;
    let doc = render_document(SAMPLE, &config);

    let code: Vec<(&str, Rgba)> = doc
        .spans
        .iter()
        .filter(|s| matches!(&s.kind, SpanKind::CodeBlock { lang } if lang.as_deref() == Some("go")))
        .map(|s| (s.content.as_str(), s.color))
        .collect();

    let color_of = |text: &str| {
        code.iter()
            .find(|(t, _)| *t == text)
            .map(|(_, c)| *c)
            .unwrap_or_else(|| panic!("no token {text:?} in {code:?}"))
    };

    assert_eq!(color_of("func"), palette.contrast);
    assert_eq!(color_of("main"), palette.contrast);
    assert_eq!(color_of("Println"), palette.contrast);
    assert_eq!(color_of("("), palette.symbol);
    assert_eq!(color_of("{"), palette.symbol);
    assert_eq!(color_of("fmt"), palette.foreground);
    assert_eq!(color_of("."), palette.foreground);
    // The comma splits the literal, so neither half is a string
    assert_eq!(color_of("\"Hello"), palette.foreground);
    assert_eq!(color_of("Gio!\""), palette.foreground);
}

#[test]
fn test_links_collected() {
    let doc = render_document(SAMPLE, &RenderConfig::default());
    assert_eq!(doc.links.len(), 1);
    let link = &doc.links[0];
    assert_eq!(link.url, "https://gioui.org");
    assert_eq!(joined(&doc.spans[link.spans.clone()]), "link");
    assert!(doc.spans[link.spans.clone()].iter().all(|s| s.interactive));
}

#[test]
fn test_bare_url_is_link() {
    let doc = render_document("go to https://example.com/x now", &RenderConfig::default());
    assert_eq!(doc.links.len(), 1);
    assert_eq!(doc.links[0].url, "https://example.com/x");
}

#[test]
fn test_empty_document() {
    let doc = render_document("", &RenderConfig::default());
    assert!(doc.spans.is_empty());
    assert!(doc.links.is_empty());
    assert!(tokenize("", &Lexicon::default()).is_empty());
}

#[test]
fn test_custom_lexicon_and_palette() {
    let palette = Palette {
        contrast: Rgba::rgb(1, 1, 1),
        ..Palette::default()
    };
    let config = RenderConfig {
        palette,
        lexicon: Lexicon::new(["let"], " ;\n", ";"),
        ..RenderConfig::default()
    };
    let doc = render_document("```rust\nlet x;\n```", &config);
    let got: Vec<(&str, Rgba)> = doc.spans.iter().map(|s| (s.content.as_str(), s.color)).collect();
    assert_eq!(
        got,
        vec![
            ("let", Rgba::rgb(1, 1, 1)),
            (" ", config.palette.foreground),
            ("x", config.palette.foreground),
            (";", config.palette.symbol),
        ]
    );
}
