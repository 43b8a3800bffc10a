//! mdspan - view markdown in the terminal with highlighted code and clickable links

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use mdspan_core::highlight::Lexicon;
use mdspan_core::{render_document, RenderConfig, Settings};

mod logging;
mod print;
mod themes;
mod viewer;

use logging::LogTarget;
use themes::{Theme, DEFAULT_THEME, THEME_REGISTRY};
use viewer::Viewer;

/// Document shown when no file is given
const DEMO: &str = include_str!("../assets/demo.md");

/// Fallback print width when stdout isn't a terminal
const DEFAULT_WIDTH: usize = 80;

#[derive(Parser, Debug)]
#[command(name = "mdspan", version, about = "Markdown viewer with code highlighting")]
struct Args {
    /// Markdown file to show (a built-in demo when omitted)
    file: Option<PathBuf>,

    /// Theme name, overriding the config file
    #[arg(short, long)]
    theme: Option<String>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write styled output to stdout instead of opening the viewer
    #[arg(short, long)]
    print: bool,

    /// Wrap width for --print (defaults to the terminal width)
    #[arg(short, long)]
    width: Option<usize>,

    /// List available themes and exit
    #[arg(long)]
    list_themes: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_themes {
        list_themes(&mut io::stdout().lock())?;
        return Ok(());
    }

    logging::init(if args.print {
        LogTarget::Stderr
    } else {
        LogTarget::File
    })?;

    let settings = load_settings(args.config.as_deref())?;
    let theme = resolve_theme(args.theme.as_deref().or(settings.theme.as_deref()))?;
    let config = render_config(&settings, &theme);

    let (title, source) = match &args.file {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            (path.display().to_string(), source)
        }
        None => ("demo".to_string(), DEMO.to_string()),
    };

    let document = render_document(&source, &config);
    tracing::info!(
        file = %title,
        theme = %theme.name,
        spans = document.spans.len(),
        "Rendered document"
    );

    if args.print {
        let width = args.width.unwrap_or_else(terminal_width);
        print::print_document(&mut io::stdout().lock(), &document, width)
    } else {
        Viewer::new(document, &source, theme, title).run()
    }
}

/// One line per theme: name, display name, then its text and accent colors
fn list_themes(out: &mut impl Write) -> io::Result<()> {
    for theme in THEME_REGISTRY.themes() {
        writeln!(
            out,
            "{:<12} {:<16} {} {}",
            theme.name, theme.display_name, theme.palette.foreground, theme.palette.contrast
        )?;
    }
    Ok(())
}

fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            Ok(Settings::load(path)?)
        }
        None => match Settings::default_path() {
            Some(path) => Ok(Settings::load(&path)?),
            None => Ok(Settings::default()),
        },
    }
}

fn resolve_theme(name: Option<&str>) -> Result<Theme> {
    let name = name.unwrap_or(DEFAULT_THEME);
    match THEME_REGISTRY.get(name) {
        Some(theme) => Ok(theme.clone()),
        None => {
            let known: Vec<&str> = THEME_REGISTRY.names().collect();
            bail!("Unknown theme '{}' (available: {})", name, known.join(", "))
        }
    }
}

fn render_config(settings: &Settings, theme: &Theme) -> RenderConfig {
    let mut palette = theme.palette.clone();
    settings.colors.apply(&mut palette);

    let defaults = RenderConfig::default();
    RenderConfig {
        palette,
        lexicon: Lexicon::from(settings.highlight.clone()),
        base_size: settings.base_size.unwrap_or(defaults.base_size),
        ..defaults
    }
}

fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(DEFAULT_WIDTH)
}
