use super::super::Theme;
use mdspan_core::{Palette, Rgba};
use ratatui::style::Color;

/// Light theme using the Material baseline palette
pub fn material() -> Theme {
    Theme {
        name: "material".to_string(),
        display_name: "Material Light".to_string(),
        bg_color: Color::Rgb(255, 255, 255),
        border_color: Color::Rgb(189, 189, 189),
        title_color: Color::Rgb(63, 81, 181), // Indigo
        status_bar_bg_color: Color::Rgb(238, 238, 238),
        focus_bg_color: Color::Rgb(197, 202, 233),
        // Same as the core default palette
        palette: Palette {
            code_background: Rgba::rgb(245, 245, 245),
            ..Palette::default()
        },
    }
}
