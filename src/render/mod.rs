//! PostScript rendering for panels and dial sheets
//!
//! This module is organized into submodules:
//! - `defaults`: Fixed line widths, scales and positions
//! - `emitter`: The width-bounded output stream
//! - `geometry`: Points on circles
//! - `dial`: Dial layout and drawing
//! - `shapes`: Control holes, rectangles, labels and the `Draw` trait
//! - `page`: Paper selection and placement
//! - `prolog`: Header comments and procedure definitions

pub mod defaults;
pub mod dial;
pub mod emitter;
pub mod geometry;
pub mod page;
pub mod prolog;
pub mod shapes;

use glam::dvec2;

use crate::config::{DialSheet, PanelConfig};
use crate::errors::RenderError;
use crate::log::debug;
use crate::types::Color;
use defaults::{PANEL_BORDER, SHEET_CENTER, SHEET_SCALE};
use dial::DialStyle;
use emitter::{CoordStyle, Emitter};
use page::{PageFit, fit_page};
use shapes::{Draw, DrawContext, PanelElement};

/// A rendered panel and the paper it was laid out for.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub postscript: String,
    pub page: PageFit,
}

/// Elements in drawing order: controls, corner rectangles, center
/// rectangles, dials, then labels.
pub fn panel_elements(config: &PanelConfig) -> Vec<PanelElement> {
    let controls = config.controls.iter().cloned().map(PanelElement::from);
    let corners = config
        .rectangles
        .iter()
        .filter(|r| !r.is_centered())
        .copied()
        .map(PanelElement::from);
    let centers = config
        .rectangles
        .iter()
        .filter(|r| r.is_centered())
        .copied()
        .map(PanelElement::from);
    let dials = config.dials.iter().cloned().map(PanelElement::from);
    let labels = config.labels.iter().cloned().map(PanelElement::from);

    controls
        .chain(corners)
        .chain(centers)
        .chain(dials)
        .chain(labels)
        .collect()
}

/// Render a front panel. The configuration is validated before anything is
/// written.
pub fn render_panel(config: &PanelConfig, title: &str) -> Result<Drawing, RenderError> {
    config.validate()?;

    let size = dvec2(config.width, config.height);
    let page = fit_page(size.x, size.y);
    debug!(
        paper = page.paper.name,
        usable_width = page.usable_width,
        usable_height = page.usable_height,
        "fitted page"
    );

    let mut out = Emitter::new(CoordStyle::Fixed);
    prolog::panel_header(&mut out, title, page.paper.name);
    out.emit(&page.transform(size, config.reverse));
    panel_body(&mut out, config);

    let elements = panel_elements(config);
    debug!("drawing {} elements", elements.len());
    let mut cx = DrawContext {
        out: &mut out,
        dial_style: &DialStyle::PANEL,
    };
    for element in &elements {
        element.draw(&mut cx);
    }

    Ok(Drawing {
        postscript: out.finish_page(),
        page,
    })
}

/// Background fill and black border of the panel itself.
fn panel_body(out: &mut Emitter, config: &PanelConfig) {
    out.emit(PANEL_BORDER);
    out.emit_color(config.background);
    out.emit("newpath ");
    panel_outline(out, config.width, config.height);
    out.emit("closepath fill ");

    out.emit_color(Color::BLACK);
    panel_outline(out, config.width, config.height);
    out.emit("S ");
    out.emit("grestore ");
}

fn panel_outline(out: &mut Emitter, width: f64, height: f64) {
    out.emit("0 0 M ");
    out.emit(&format!("{width:.6} 0 L "));
    out.emit(&format!("{width:.6} {height:.6} L "));
    out.emit(&format!("0 {height:.6} L "));
    out.emit("0 0 L ");
}

/// Render a single dial centered on a portrait page.
pub fn render_dial_sheet(sheet: &DialSheet, title: &str) -> Result<String, RenderError> {
    let mut dial = sheet.dial.clone();
    dial.center = SHEET_CENTER;
    if sheet.reverse {
        dial.center.x = -dial.center.x;
    }
    dial.validate()?;

    let mut out = Emitter::new(CoordStyle::Integer);
    prolog::dial_header(&mut out, title);
    let x_scale = if sheet.reverse {
        format!("-{SHEET_SCALE}")
    } else {
        SHEET_SCALE.to_string()
    };
    out.emit(&format!("{x_scale} {SHEET_SCALE} scale "));
    dial.draw(&mut DrawContext {
        out: &mut out,
        dial_style: &DialStyle::SHEET,
    });

    Ok(out.finish_page())
}
