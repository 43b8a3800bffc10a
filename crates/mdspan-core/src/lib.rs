//! mdspan core: markdown to styled spans, with a small code highlighter
//!
//! The library does no I/O besides reading the config file. Hosts call
//! [`render_document`] and lay out the returned spans however they draw text.

pub mod config;
pub mod highlight;
pub mod markdown;
pub mod style;

pub use config::{ConfigError, Settings};
pub use markdown::{render, render_document, RenderConfig, RenderedDocument};
pub use style::{FontSpec, FontStyle, Palette, Rgba, SpanKind, SpanStyle, Weight};
