//! Panel elements and how each one draws itself.
//!
//! Every element implements [`Draw`]; [`PanelElement`] dispatches over all of
//! them so the assembler can walk one ordered list.

use enum_dispatch::enum_dispatch;
use glam::dvec2;

use super::defaults;
use super::dial::DialStyle;
use super::emitter::Emitter;
use super::geometry::{compass_point, full_turn};
use crate::config::{ControlSpec, DialSpec, RectangleSpec, TextSpec};
use crate::types::Color;

/// Points in the filled disc of a control hole.
pub const HOLE_FILL_POINTS: usize = 50;

/// Points in the outline of a control hole.
pub const HOLE_OUTLINE_POINTS: usize = 100;

/// Output state shared by all elements on one page.
pub struct DrawContext<'a> {
    pub out: &'a mut Emitter,
    pub dial_style: &'a DialStyle,
}

/// Common behavior for everything placed on a panel
#[enum_dispatch]
pub trait Draw {
    /// Append this element's primitives to the output.
    fn draw(&self, cx: &mut DrawContext<'_>);
}

/// Any element of a panel, in the order it is drawn.
#[enum_dispatch(Draw)]
#[derive(Debug, Clone, PartialEq)]
pub enum PanelElement {
    Control(ControlSpec),
    Rectangle(RectangleSpec),
    Dial(DialSpec),
    Label(TextSpec),
}

impl Draw for ControlSpec {
    fn draw(&self, cx: &mut DrawContext<'_>) {
        let out = &mut *cx.out;
        let r = self.diameter() / 2.0;
        let c = self.center;

        out.emit(defaults::OUTLINE_WIDTH);
        out.emit_polyline(full_turn(HOLE_FILL_POINTS).map(|b| compass_point(c, r, b)));
        out.emit_color(Color::WHITE);
        out.emit("closepath fill ");

        out.emit_polyline(full_turn(HOLE_OUTLINE_POINTS).map(|b| compass_point(c, r, b)));
        out.emit_color(Color::BLACK);
        out.emit("S ");

        out.emit_move(c - dvec2(r, 0.0));
        out.emit_line(c + dvec2(r, 0.0));
        out.emit("S ");
        out.emit_move(c - dvec2(0.0, r));
        out.emit_line(c + dvec2(0.0, r));
        out.emit("S ");
    }
}

impl Draw for RectangleSpec {
    fn draw(&self, cx: &mut DrawContext<'_>) {
        let out = &mut *cx.out;
        let (origin, size) = self.corner_form();

        out.emit(defaults::OUTLINE_WIDTH);
        out.emit_polyline([
            origin,
            origin + dvec2(size.x, 0.0),
            origin + size,
            origin + dvec2(0.0, size.y),
        ]);
        out.emit("closepath S ");
    }
}

impl Draw for TextSpec {
    fn draw(&self, cx: &mut DrawContext<'_>) {
        let out = &mut *cx.out;
        out.emit(&format!("{:.2} ", self.size));
        out.emit(&format!("/{} ", self.font));
        out.emit("F ");
        out.emit_color(self.color);
        out.emit(&format!("{:.2} ", self.at.x));
        out.emit(&format!("{:.2} ", self.at.y));
        out.emit("M ");
        out.emit_string(&format!(" {} ", self.text));
        out.emit("TC ");
    }
}
