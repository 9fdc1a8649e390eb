//! Printable PostScript artwork for instrument dials and equipment front panels.
//!
//! A description is a plain text file with one `Keyword = values` directive per
//! line. [`parse::parse_panel`] turns it into a [`config::PanelConfig`], and
//! [`render::render_panel`] writes the PostScript program.

use pest_derive::Parser;

pub mod config;
pub mod errors;
pub mod log;
pub mod parse;
pub mod render;
pub mod types;

pub use config::{ControlKind, ControlSpec, DialSheet, DialSpec, Limits, PanelConfig, RectangleSpec, TextSpec};
pub use errors::{ConfigReadError, ConfigWarning, ConfigurationError, PaperAdvisory, RenderError};
pub use parse::{Parsed, parse_dial_sheet, parse_panel};
pub use render::{Drawing, render_dial_sheet, render_panel};

#[derive(Parser)]
#[grammar = "panel.pest"]
pub struct PanelParser;

/// Render a panel description to PostScript.
///
/// Warnings are dropped; use [`parse_panel`] directly to inspect them.
pub fn panel(source: &str) -> Result<String, miette::Report> {
    let parsed = parse_panel("<panel>", source, &Limits::default());
    let drawing = render_panel(&parsed.value, "<panel>")?;
    Ok(drawing.postscript)
}

/// Render a single-dial description to PostScript.
pub fn dial(source: &str) -> Result<String, miette::Report> {
    let parsed = parse_dial_sheet("<dial>", source);
    Ok(render_dial_sheet(&parsed.value, "<dial>")?)
}
