//! Circular scales: arc, graduations, numbers and a drilling crosshair.

use glam::{DVec2, dvec2};

use super::emitter::Emitter;
use super::geometry::point_on_circle;
use super::shapes::{Draw, DrawContext};
use crate::config::DialSpec;
use crate::log::debug;
use crate::types::{Angle, Color};

/// Number of points the scale arc is drawn with.
pub const ARC_POINTS: usize = 1000;

/// Angle of the top of a dial.
pub const TOP: Angle = Angle(270.0);

/// Numbers strictly within this angle of [`TOP`] are centered over their tick.
pub const CENTER_BAND: Angle = Angle(10.0);

/// Line widths and sizes that depend on the drawing units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialStyle {
    pub circle_width: &'static str,
    /// Used when the radius exceeds 400
    pub circle_width_heavy: &'static str,
    pub tick_width: &'static str,
    /// Used when minor ticks are longer than 20
    pub tick_width_heavy: &'static str,
    pub crosshair_half_length: f64,
    pub font_size_decimals: usize,
    /// Added to arc and tick points before coordinates are truncated
    pub curve_bias: f64,
}

impl DialStyle {
    /// Millimetres on a front panel.
    pub const PANEL: DialStyle = DialStyle {
        circle_width: "0.339",
        circle_width_heavy: "0.677",
        tick_width: "0.169",
        tick_width_heavy: "0.339",
        crosshair_half_length: 4.0,
        font_size_decimals: 2,
        curve_bias: 0.0,
    };

    /// 1/300 inch on a dial sheet.
    pub const SHEET: DialStyle = DialStyle {
        circle_width: "4",
        circle_width_heavy: "8",
        tick_width: "2",
        tick_width_heavy: "4",
        crosshair_half_length: 50.0,
        font_size_decimals: 0,
        curve_bias: 0.5,
    };

    fn circle_width_for(&self, radius: f64) -> &'static str {
        if radius > 400.0 {
            self.circle_width_heavy
        } else {
            self.circle_width
        }
    }

    fn tick_width_for(&self, minor_length: f64) -> &'static str {
        if minor_length > 20.0 {
            self.tick_width_heavy
        } else {
            self.tick_width
        }
    }
}

/// Upper bounds (exclusive) of the starting value for field widths 1 through 4.
const WIDTH_BOUNDS: [f64; 4] = [9.0, 90.0, 900.0, 9000.0];

/// Lower bounds (exclusive) of the increment for 0 through 6 decimals.
const PRECISION_BOUNDS: [f64; 7] = [0.9, 0.09, 0.009, 0.0009, 0.00009, 0.000009, 0.0000009];

/// Field width and decimals for the numbers on one dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub width: usize,
    pub precision: usize,
}

impl NumberFormat {
    pub fn for_dial(starting_indicator: f64, increment: f64) -> Self {
        let width = 1 + WIDTH_BOUNDS
            .iter()
            .position(|&bound| starting_indicator < bound)
            .unwrap_or(WIDTH_BOUNDS.len());
        let precision = PRECISION_BOUNDS
            .iter()
            .position(|&bound| increment > bound)
            .unwrap_or(PRECISION_BOUNDS.len());
        Self { width, precision }
    }

    pub fn format(&self, value: f64) -> String {
        format!("{value:w$.p$}", w = self.width, p = self.precision)
    }
}

/// Where a number sits relative to the end of its tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Centered over the anchor
    Center,
    /// Ending at the anchor
    Right,
    /// Starting at the anchor
    Left,
}

impl Alignment {
    /// The show procedure defined in the prolog.
    pub fn operator(self) -> &'static str {
        match self {
            Alignment::Center => "TC ",
            Alignment::Right => "TR ",
            Alignment::Left => "T ",
        }
    }
}

/// Compared in degrees so a tick exactly [`CENTER_BAND`] from the top is
/// never centered, on either side.
pub fn annotation_alignment(angle: Angle) -> Alignment {
    if (angle.0 - TOP.0).abs() < CENTER_BAND.0 {
        Alignment::Center
    } else if angle.0 < TOP.0 {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub angle: Angle,
    /// On the circle
    pub inner: DVec2,
    /// End of the tick, and anchor of its number
    pub outer: DVec2,
    /// Present on major ticks
    pub annotation: Option<Annotation>,
}

/// Everything needed to draw one dial, computed up front.
#[derive(Debug, Clone, PartialEq)]
pub struct DialLayout {
    pub arc: Vec<DVec2>,
    pub ticks: Vec<Tick>,
}

impl DialLayout {
    pub fn new(dial: &DialSpec, style: &DialStyle) -> Self {
        let span = dial.span.0;
        let first = 90.0 + (360.0 - span) / 2.0 + dial.start_angle.0;
        let bias = DVec2::splat(style.curve_bias);
        let at = |radius: f64, theta: f64| point_on_circle(dial.center, radius, theta) + bias;

        let arc_steps = (ARC_POINTS - 1) as f64;
        let arc = (0..ARC_POINTS)
            .map(|i| Angle(first + i as f64 * span / arc_steps).radians())
            .map(|theta| at(dial.radius, theta))
            .collect();

        let format = NumberFormat::for_dial(dial.starting_indicator, dial.increment_per_major);
        let steps = (dial.tick_count - 1) as f64;
        let mut ordinal = 0.0;
        let ticks = (0..dial.tick_count)
            .map(|i| {
                let angle = Angle(first + i as f64 * span / steps);
                let theta = angle.radians();
                let major = i % dial.ticks_per_major == 0;
                let length = if major { dial.major_length } else { dial.minor_length };
                let annotation = major.then(|| {
                    let value = dial.starting_indicator + ordinal * dial.increment_per_major;
                    ordinal += 1.0;
                    Annotation {
                        text: format.format(value),
                        alignment: annotation_alignment(angle),
                    }
                });
                Tick {
                    angle,
                    inner: at(dial.radius, theta),
                    outer: at(dial.radius + length, theta),
                    annotation,
                }
            })
            .collect();

        Self { arc, ticks }
    }

    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.ticks.iter().filter_map(|t| t.annotation.as_ref())
    }
}

fn crosshair(out: &mut Emitter, center: DVec2, half_length: f64) {
    out.emit_color(Color::BLACK);
    out.emit_move(center - dvec2(half_length, 0.0));
    out.emit_line(center + dvec2(half_length, 0.0));
    out.emit("S ");
    out.emit_move(center - dvec2(0.0, half_length));
    out.emit_line(center + dvec2(0.0, half_length));
    out.emit("S ");
}

impl Draw for DialSpec {
    fn draw(&self, cx: &mut DrawContext<'_>) {
        let style = cx.dial_style;
        let layout = DialLayout::new(self, style);
        debug!(
            "dial at {}: {} ticks, {} numbers",
            self.center,
            layout.ticks.len(),
            layout.annotations().count()
        );
        let out = &mut *cx.out;

        out.emit(&format!("gsave {} W ", style.circle_width_for(self.radius)));
        out.emit_color(self.circle_color);
        out.emit_polyline(layout.arc.iter().copied());
        out.emit("S grestore ");

        out.emit(&format!("gsave {} W ", style.tick_width_for(self.minor_length)));
        out.emit_color(self.minor_color);
        out.emit(&format!("{:.*} ", style.font_size_decimals, self.font_size));
        out.emit("/Helvetica-Bold ");
        out.emit("F ");

        for tick in &layout.ticks {
            out.emit_move(tick.inner);
            match &tick.annotation {
                None => {
                    out.emit_line(tick.outer);
                    out.emit("S ");
                }
                Some(annotation) => {
                    out.emit_color(self.major_color);
                    out.emit_line(tick.outer);
                    out.emit("S ");
                    out.emit_color(self.text_color);
                    out.emit_move(tick.outer);
                    out.emit_string(&annotation.text);
                    out.emit(annotation.alignment.operator());
                    out.emit_color(self.minor_color);
                }
            }
        }

        crosshair(out, self.center, style.crosshair_half_length);
        out.emit("grestore ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::emitter::CoordStyle;

    fn draw(dial: &DialSpec, style: &DialStyle, coords: CoordStyle) -> String {
        let mut out = Emitter::new(coords);
        dial.draw(&mut DrawContext {
            out: &mut out,
            dial_style: style,
        });
        out.finish()
    }

    #[test]
    fn number_format_widths() {
        let widths: Vec<usize> = [0.0, 8.99, 9.0, 89.0, 90.0, 899.0, 900.0, 8999.0, 9000.0, 1e9]
            .into_iter()
            .map(|start| NumberFormat::for_dial(start, 1.0).width)
            .collect();
        assert_eq!(widths, [1, 1, 2, 2, 3, 3, 4, 4, 5, 5]);
    }

    #[test]
    fn number_format_precision_uses_strict_comparison() {
        let precision = |inc| NumberFormat::for_dial(0.0, inc).precision;
        assert_eq!(precision(1.0), 0);
        assert_eq!(precision(0.9), 1);
        assert_eq!(precision(0.5), 1);
        assert_eq!(precision(0.01), 2);
        assert_eq!(precision(0.001), 3);
        assert_eq!(precision(0.000001), 6);
        assert_eq!(precision(0.0000009), 7);
        assert_eq!(precision(0.0), 7);
    }

    #[test]
    fn numbers_are_padded_to_width() {
        let format = NumberFormat::for_dial(7.0, 0.01);
        assert_eq!(format, NumberFormat { width: 1, precision: 2 });
        assert_eq!(format.format(7.0), "7.00");
        assert_eq!(format.format(7.01), "7.01");

        let format = NumberFormat::for_dial(150.0, 10.0);
        assert_eq!(format.format(5.0), "  5");
    }

    #[test]
    fn alignment_around_the_top() {
        let cases = [
            (0.0, Alignment::Right),
            (180.0, Alignment::Right),
            (259.9, Alignment::Right),
            (260.0, Alignment::Right),
            (260.1, Alignment::Center),
            (270.0, Alignment::Center),
            (279.9, Alignment::Center),
            (280.0, Alignment::Left),
            (280.1, Alignment::Left),
            (360.0, Alignment::Left),
        ];
        for (degrees, expected) in cases {
            assert_eq!(annotation_alignment(Angle(degrees)), expected, "{degrees}");
        }
    }

    #[test]
    fn ticks_on_the_band_edges_are_not_centered() {
        // 20 degrees apart, from 180 to 360
        let dial = DialSpec {
            span: Angle(180.0),
            tick_count: 10,
            ticks_per_major: 1,
            starting_indicator: 0.0,
            increment_per_major: 1.0,
            ..DialSpec::sheet_default()
        };
        let layout = DialLayout::new(&dial, &DialStyle::SHEET);
        assert_eq!(layout.ticks[4].angle, Angle(260.0));
        assert_eq!(layout.ticks[5].angle, Angle(280.0));
        let alignments: Vec<Alignment> = layout.annotations().map(|a| a.alignment).collect();
        assert_eq!(alignments[..4], [Alignment::Right; 4]);
        assert_eq!(alignments[4], Alignment::Right);
        assert_eq!(alignments[5], Alignment::Left);
        assert!(!alignments.contains(&Alignment::Center));
    }

    #[test]
    fn every_tick_is_laid_out_and_every_major_annotated() {
        for tick_count in 2..60 {
            for ticks_per_major in 1..12 {
                let dial = DialSpec {
                    tick_count,
                    ticks_per_major,
                    ..DialSpec::panel_default(DVec2::ZERO)
                };
                let layout = DialLayout::new(&dial, &DialStyle::PANEL);
                let majors = (tick_count + ticks_per_major - 1) / ticks_per_major;
                assert_eq!(layout.ticks.len() as i64, tick_count);
                assert_eq!(
                    layout.annotations().count() as i64,
                    majors,
                    "{tick_count} ticks, {ticks_per_major} per major"
                );
            }
        }
    }

    #[test]
    fn default_layout_has_expected_ticks() {
        let dial = DialSpec::sheet_default();
        let layout = DialLayout::new(&dial, &DialStyle::SHEET);
        assert_eq!(layout.arc.len(), ARC_POINTS);
        assert_eq!(layout.ticks.len(), 81);
        let labels: Vec<&str> = layout.annotations().map(|a| a.text.as_str()).collect();
        assert_eq!(
            labels,
            ["14.00", "14.01", "14.02", "14.03", "14.04", "14.05", "14.06", "14.07", "14.08"]
        );
        let majors: Vec<usize> = layout
            .ticks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.annotation.is_some())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(majors, [0, 10, 20, 30, 40, 50, 60, 70, 80]);
    }

    #[test]
    fn symmetric_dial_centers_the_middle_number() {
        let dial = DialSpec::panel_default(DVec2::ZERO);
        let layout = DialLayout::new(&dial, &DialStyle::PANEL);
        let alignments: Vec<Alignment> = layout.annotations().map(|a| a.alignment).collect();
        assert_eq!(alignments[0], Alignment::Right);
        assert_eq!(alignments[4], Alignment::Center);
        assert_eq!(alignments[8], Alignment::Left);
    }

    #[test]
    fn arc_runs_clockwise_from_lower_left() {
        // 270 degree span starts at 135 degrees
        let dial = DialSpec::panel_default(dvec2(50.0, 50.0));
        let layout = DialLayout::new(&dial, &DialStyle::PANEL);
        let first = layout.arc[0];
        assert!(first.x < 50.0 && first.y < 50.0, "{first}");
        let last = layout.arc[ARC_POINTS - 1];
        assert!(last.x > 50.0 && last.y < 50.0, "{last}");
    }

    #[test]
    fn sheet_points_are_biased_before_truncation() {
        let mut dial = DialSpec::sheet_default();
        dial.center = dvec2(1200.0, 1800.0);
        let layout = DialLayout::new(&dial, &DialStyle::SHEET);
        let tick = &layout.ticks[40];
        // straight up, then biased
        assert!((tick.inner.x - 1200.5).abs() < 1e-9);
        assert!((tick.inner.y - 2100.5).abs() < 1e-9);
    }

    #[test]
    fn two_tick_dial_annotates_the_first() {
        let dial = DialSpec {
            tick_count: 2,
            ticks_per_major: 5,
            ..DialSpec::panel_default(DVec2::ZERO)
        };
        let layout = DialLayout::new(&dial, &DialStyle::PANEL);
        assert_eq!(layout.ticks.len(), 2);
        assert_eq!(layout.annotations().count(), 1);
    }

    #[test]
    fn sheet_dial_prologue() {
        let mut dial = DialSpec::sheet_default();
        dial.center = dvec2(1200.0, 1800.0);
        let ps = draw(&dial, &DialStyle::SHEET, CoordStyle::Integer).replace("\r\n", " ");
        assert!(ps.starts_with("gsave 4 W 0.00 0.00 0.00 C "), "{ps}");
        assert!(ps.contains("S grestore gsave 2 W 0.00 0.00 0.00 C 60 /Helvetica-Bold F "));
        assert!(ps.contains("(14.04) TC "));
        assert!(ps.contains("1150 1800 M 1250 1800 L S "), "{ps}");
        assert!(ps.ends_with("1200 1850 L S grestore "));
    }

    #[test]
    fn heavy_widths_for_large_dials() {
        let dial = DialSpec {
            radius: 500.0,
            minor_length: 30.0,
            ..DialSpec::sheet_default()
        };
        let ps = draw(&dial, &DialStyle::SHEET, CoordStyle::Integer);
        assert!(ps.starts_with("gsave 8 W "));
        assert!(ps.replace("\r\n", " ").contains("gsave 4 W "));
    }

    #[test]
    fn panel_font_size_has_two_decimals() {
        let ps = draw(
            &DialSpec::panel_default(dvec2(40.0, 25.0)),
            &DialStyle::PANEL,
            CoordStyle::Fixed,
        );
        let joined = ps.replace("\r\n", " ");
        assert!(joined.contains("gsave 0.339 W "));
        assert!(joined.contains("1.50 /Helvetica-Bold F "));
        assert!(joined.contains("36.000000 25.000000 M 44.000000 25.000000 L S "));
    }
}
