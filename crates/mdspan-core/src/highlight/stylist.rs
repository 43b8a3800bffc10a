//! Token coloring

use crate::style::{Palette, Rgba, SpanStyle};

use super::classifier::TokenKind;
use super::lexicon::Lexicon;
use super::tokenizer::{tokenize, Token};

/// Pick the palette color for a token kind
pub fn color_for(kind: TokenKind, palette: &Palette) -> Rgba {
    match kind {
        TokenKind::Keyword => palette.contrast,
        TokenKind::Symbol => palette.symbol,
        TokenKind::Str => palette.string,
        TokenKind::Plain => palette.foreground,
    }
}

/// Color each token, inheriting everything else from `base`
pub fn style_tokens(
    tokens: Vec<Token>,
    base: &SpanStyle,
    lexicon: &Lexicon,
    palette: &Palette,
) -> Vec<SpanStyle> {
    tokens
        .into_iter()
        .map(|token| {
            let color = color_for(TokenKind::of(&token, lexicon), palette);
            base.restyled(token.text, color)
        })
        .collect()
}

/// Tokenize a code span and return one colored segment per token
pub fn highlight(span: &SpanStyle, lexicon: &Lexicon, palette: &Palette) -> Vec<SpanStyle> {
    let tokens = tokenize(&span.content, lexicon);
    tracing::trace!(tokens = tokens.len(), "Highlighted code span");
    style_tokens(tokens, span, lexicon, palette)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontSpec, SpanKind, Weight};

    fn code_span(content: &str) -> SpanStyle {
        let mut span = SpanStyle::new(content, FontSpec::monospace(), 16.0, Rgba::rgb(9, 9, 9));
        span.kind = SpanKind::CodeBlock {
            lang: Some("go".to_string()),
        };
        span
    }

    #[test]
    fn test_func_main_colors() {
        let lexicon = Lexicon::new(["func", "main"], " \t\n(){}", "(),;{}");
        let palette = Palette::default();
        let out = highlight(&code_span("func main() {"), &lexicon, &palette);

        let got: Vec<(&str, Rgba)> = out.iter().map(|s| (s.content.as_str(), s.color)).collect();
        assert_eq!(
            got,
            vec![
                ("func", palette.contrast),
                (" ", palette.foreground),
                ("main", palette.contrast),
                ("(", palette.symbol),
                (")", palette.symbol),
                (" ", palette.foreground),
                ("{", palette.symbol),
            ]
        );
    }

    #[test]
    fn test_string_token() {
        let palette = Palette::default();
        let out = highlight(&code_span("\"hello\""), &Lexicon::default(), &palette);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].content, "\"hello\"");
        assert_eq!(out[0].color, palette.string);
    }

    #[test]
    fn test_empty_span() {
        let out = highlight(&code_span(""), &Lexicon::default(), &Palette::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_inherits_base_style() {
        let mut base = code_span("x;");
        base.font.weight = Weight::Bold;
        base.size = 12.5;
        let out = highlight(&base, &Lexicon::default(), &Palette::default());
        assert_eq!(out.len(), 2);
        for seg in &out {
            assert_eq!(seg.font, base.font);
            assert_eq!(seg.size, 12.5);
            assert_eq!(seg.kind, base.kind);
        }
    }
}
