//! Non-interactive output: write the laid out document as ANSI text

use std::io::Write;

use anyhow::Result;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color as AnsiColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use mdspan_core::RenderedDocument;
use ratatui::style::{Color, Modifier, Style};

use crate::viewer::layout::layout;

/// Write `document` wrapped at `width` columns
pub fn print_document(
    out: &mut impl Write,
    document: &RenderedDocument,
    width: usize,
) -> Result<()> {
    let laid_out = layout(document, width);

    for line in &laid_out.lines {
        for span in &line.spans {
            apply_style(out, span.style)?;
            queue!(out, Print(span.content.as_ref()), SetAttribute(Attribute::Reset), ResetColor)?;
        }
        queue!(out, Print("\n"))?;
    }

    out.flush()?;
    tracing::debug!(lines = laid_out.lines.len(), width, "Printed document");
    Ok(())
}

fn apply_style(out: &mut impl Write, style: Style) -> std::io::Result<()> {
    if let Some(fg) = style.fg.and_then(ansi_color) {
        queue!(out, SetForegroundColor(fg))?;
    }
    if let Some(bg) = style.bg.and_then(ansi_color) {
        queue!(out, SetBackgroundColor(bg))?;
    }

    let attributes = [
        (Modifier::BOLD, Attribute::Bold),
        (Modifier::ITALIC, Attribute::Italic),
        (Modifier::UNDERLINED, Attribute::Underlined),
        (Modifier::CROSSED_OUT, Attribute::CrossedOut),
    ];
    for (modifier, attribute) in attributes {
        if style.add_modifier.contains(modifier) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

/// Only truecolor is produced by themes; anything else uses the default
fn ansi_color(color: Color) -> Option<AnsiColor> {
    match color {
        Color::Rgb(r, g, b) => Some(AnsiColor::Rgb { r, g, b }),
        _ => None,
    }
}
