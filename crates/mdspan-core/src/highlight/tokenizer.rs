//! Separator-aware tokenizer
//!
//! Splits code into runs of non-separator characters, emitting every
//! separator as its own one-character token. Nothing is dropped: joining the
//! tokens gives back the input.

use super::classifier::is_keyword;
use super::lexicon::Lexicon;

/// A token and whether it matched the keyword set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub is_keyword: bool,
}

impl Token {
    fn separator(c: char) -> Self {
        Self {
            text: c.to_string(),
            is_keyword: false,
        }
    }
}

/// Split `content` into classified tokens in source order
pub fn tokenize(content: &str, lexicon: &Lexicon) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (idx, c) in content.char_indices() {
        if lexicon.is_separator(c) {
            if let Some(start) = word_start.take() {
                tokens.push(classify(&content[start..idx], lexicon));
            }
            tokens.push(Token::separator(c));
        } else if word_start.is_none() {
            word_start = Some(idx);
        }
    }

    if let Some(start) = word_start {
        tokens.push(classify(&content[start..], lexicon));
    }

    tokens
}

fn classify(word: &str, lexicon: &Lexicon) -> Token {
    Token {
        text: word.to_string(),
        is_keyword: is_keyword(word, lexicon.keywords()),
    }
}
