//! Link tracking over rendered spans

use std::ops::Range;

use crate::style::SpanStyle;

/// A hyperlink and the run of spans that draw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub url: String,
    /// Indices into the rendered span list
    pub spans: Range<usize>,
}

/// Group consecutive interactive spans sharing a URL into links
pub fn collect_links(spans: &[SpanStyle]) -> Vec<LinkRef> {
    let mut links: Vec<LinkRef> = Vec::new();

    for (idx, span) in spans.iter().enumerate() {
        let Some(url) = span.url.as_ref().filter(|_| span.interactive) else {
            continue;
        };
        match links.last_mut() {
            Some(last) if last.spans.end == idx && &last.url == url => last.spans.end = idx + 1,
            _ => links.push(LinkRef {
                url: url.clone(),
                spans: idx..idx + 1,
            }),
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontSpec, Rgba};

    fn span(text: &str, url: Option<&str>) -> SpanStyle {
        let mut span = SpanStyle::new(text, FontSpec::default(), 16.0, Rgba::rgb(0, 0, 0));
        span.interactive = url.is_some();
        span.url = url.map(str::to_string);
        span
    }

    #[test]
    fn test_groups_adjacent_spans() {
        let spans = vec![
            span("see ", None),
            span("bold ", Some("https://a")),
            span("link", Some("https://a")),
            span(" and ", None),
            span("other", Some("https://b")),
        ];
        assert_eq!(
            collect_links(&spans),
            vec![
                LinkRef {
                    url: "https://a".to_string(),
                    spans: 1..3,
                },
                LinkRef {
                    url: "https://b".to_string(),
                    spans: 4..5,
                },
            ]
        );
    }

    #[test]
    fn test_adjacent_different_urls_split() {
        let spans = vec![span("a", Some("https://a")), span("b", Some("https://b"))];
        assert_eq!(collect_links(&spans).len(), 2);
    }
}
