//! Token classification

use std::collections::HashSet;

use super::lexicon::Lexicon;
use super::tokenizer::Token;

/// Exact, case-sensitive keyword match
pub fn is_keyword(word: &str, keywords: &HashSet<String>) -> bool {
    keywords.contains(word)
}

/// What a token is drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Symbol,
    Str,
    Plain,
}

impl TokenKind {
    /// Classify a token. Checks run in precedence order:
    /// keyword, symbol, string, plain.
    pub fn of(token: &Token, lexicon: &Lexicon) -> Self {
        match token {
            Token {
                is_keyword: true, ..
            } => TokenKind::Keyword,
            t if is_symbol(&t.text, lexicon) => TokenKind::Symbol,
            t if is_quoted(&t.text) => TokenKind::Str,
            _ => TokenKind::Plain,
        }
    }
}

fn is_symbol(text: &str, lexicon: &Lexicon) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if lexicon.is_symbol(c))
}

/// A run that opens and closes with `"`. Escapes and inner quotes are ignored.
fn is_quoted(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('"') && text.ends_with('"')
}
