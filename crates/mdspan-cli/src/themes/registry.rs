//! Built-in theme lookup

use std::collections::BTreeMap;

use super::definitions;
use super::Theme;

pub struct ThemeRegistry {
    themes: BTreeMap<String, Theme>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeRegistry {
    pub fn new() -> Self {
        let themes = [definitions::material(), definitions::midnight()]
            .into_iter()
            .map(|theme| (theme.name.clone(), theme))
            .collect();
        Self { themes }
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    /// Themes sorted by name
    pub fn themes(&self) -> impl Iterator<Item = &Theme> {
        self.themes.values()
    }

    /// Theme names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}
