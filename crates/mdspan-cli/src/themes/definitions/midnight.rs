use super::super::Theme;
use mdspan_core::{Palette, Rgba};
use ratatui::style::Color;

/// Dark theme - the default
pub fn midnight() -> Theme {
    Theme {
        name: "midnight".to_string(),
        display_name: "Midnight".to_string(),
        bg_color: Color::Rgb(24, 24, 37),      // Dark blue-gray background
        border_color: Color::Rgb(88, 91, 112), // Muted purple-gray
        title_color: Color::Rgb(139, 233, 253), // Bright cyan
        status_bar_bg_color: Color::Rgb(44, 44, 57),
        focus_bg_color: Color::Rgb(51, 65, 85), // Dark slate
        palette: Palette {
            foreground: Rgba::rgb(203, 213, 225), // Light gray text
            contrast: Rgba::rgb(189, 147, 249),   // Purple accent
            symbol: Rgba::rgb(0xFF, 0x00, 0x00),
            string: Rgba::rgb(0xFF, 0x69, 0xB4),
            link: Rgba::rgb(139, 233, 253), // Cyan for links
            code_background: Rgba::rgb(30, 30, 45), // Slightly lighter than bg
            dim: Rgba::rgb(148, 163, 184),
        },
    }
}
