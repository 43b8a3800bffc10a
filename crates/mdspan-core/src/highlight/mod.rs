//! Code block highlighting
//!
//! A deliberately small highlighter: code is split on a fixed separator set,
//! each token is classified as keyword, symbol, string or plain, and colored
//! from the palette. There is no per-language grammar.

mod classifier;
mod lexicon;
mod stylist;
mod tokenizer;

pub use classifier::{is_keyword, TokenKind};
pub use lexicon::{Lexicon, LexiconSettings};
pub use stylist::{color_for, highlight, style_tokens};
pub use tokenizer::{tokenize, Token};
