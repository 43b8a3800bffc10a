//! Keyword, separator and symbol sets

use std::collections::HashSet;

use serde::Deserialize;

const DEFAULT_KEYWORDS: &[&str] = &["func", "main", "Println"];
const DEFAULT_SEPARATORS: &str = " \t\n().,;{}";
const DEFAULT_SYMBOLS: &str = "(),;{}";

/// The fixed vocabulary a highlight pass works with
///
/// Built once from config and shared read-only across render passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    keywords: HashSet<String>,
    separators: HashSet<char>,
    symbols: HashSet<char>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(
            DEFAULT_KEYWORDS.iter().copied(),
            DEFAULT_SEPARATORS,
            DEFAULT_SYMBOLS,
        )
    }
}

impl Lexicon {
    pub fn new<I, S>(keywords: I, separators: &str, symbols: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            separators: separators.chars().collect(),
            symbols: symbols.chars().collect(),
        }
    }

    pub fn keywords(&self) -> &HashSet<String> {
        &self.keywords
    }

    pub fn is_separator(&self, c: char) -> bool {
        self.separators.contains(&c)
    }

    pub fn is_symbol(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }
}

/// `[highlight]` table of the config file
///
/// Omitted fields keep their built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexiconSettings {
    pub keywords: Option<Vec<String>>,
    pub separators: Option<String>,
    pub symbols: Option<String>,
}

impl From<LexiconSettings> for Lexicon {
    fn from(settings: LexiconSettings) -> Self {
        let keywords = settings
            .keywords
            .unwrap_or_else(|| DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect());
        Lexicon::new(
            keywords,
            settings.separators.as_deref().unwrap_or(DEFAULT_SEPARATORS),
            settings.symbols.as_deref().unwrap_or(DEFAULT_SYMBOLS),
        )
    }
}
