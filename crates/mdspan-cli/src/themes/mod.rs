//! Theme system for the viewer
//!
//! A theme carries the core [`Palette`] used to build spans plus the few
//! chrome colors the terminal viewer draws itself.

use mdspan_core::{Palette, Rgba};
use once_cell::sync::Lazy;
use ratatui::style::Color;

pub mod definitions;
mod registry;

pub use registry::ThemeRegistry;

/// Global theme registry with all built-in themes
pub static THEME_REGISTRY: Lazy<ThemeRegistry> = Lazy::new(ThemeRegistry::new);

/// Name of the theme used when none is configured
pub const DEFAULT_THEME: &str = "midnight";

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub display_name: String,

    // Chrome colors
    pub bg_color: Color,
    pub border_color: Color,
    pub title_color: Color,
    pub status_bar_bg_color: Color,
    /// Background behind the focused link
    pub focus_bg_color: Color,

    /// Span colors handed to the renderer
    pub palette: Palette,
}

impl Theme {
    pub fn dim_color(&self) -> Color {
        to_color(self.palette.dim)
    }
}

/// Map a span color onto a terminal color
///
/// The terminal has no alpha; transparent falls back to the default color.
pub fn to_color(color: Rgba) -> Color {
    if color.is_transparent() {
        Color::Reset
    } else {
        Color::Rgb(color.r, color.g, color.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_color() {
        assert_eq!(to_color(Rgba::rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
        assert_eq!(to_color(Rgba::TRANSPARENT), Color::Reset);
    }

    #[test]
    fn test_default_theme_registered() {
        assert!(THEME_REGISTRY.get(DEFAULT_THEME).is_some());
    }
}
