//! The panel description: dials, control holes, rectangles and labels.
//!
//! Values here are plain data. They are produced by [`crate::parse`] and read by
//! [`crate::render`]; nothing mutates them during rendering.

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, dvec2};

use crate::errors::ConfigurationError;
use crate::types::{Angle, Color, Constraint};

/// Most graduations a single dial may carry.
pub const MAX_TICKS: i64 = 10_000;

/// One circular scale.
#[derive(Debug, Clone, PartialEq)]
pub struct DialSpec {
    pub center: DVec2,
    pub radius: f64,
    /// Total sweep of the scale
    pub span: Angle,
    pub tick_count: i64,
    /// Every n-th tick is a major tick
    pub ticks_per_major: i64,
    pub minor_length: f64,
    pub major_length: f64,
    pub circle_color: Color,
    pub minor_color: Color,
    pub major_color: Color,
    pub text_color: Color,
    pub font_size: f64,
    /// Value printed at the first major tick
    pub starting_indicator: f64,
    /// Value added for each following major tick
    pub increment_per_major: f64,
    /// Rotation of the whole scale away from the symmetric layout
    pub start_angle: Angle,
}

impl DialSpec {
    /// Defaults for a dial placed on a panel (millimetres).
    pub fn panel_default(center: DVec2) -> Self {
        Self {
            center,
            radius: 10.0,
            span: Angle(270.0),
            tick_count: 81,
            ticks_per_major: 10,
            minor_length: 1.0,
            major_length: 4.0,
            circle_color: Color::BLACK,
            minor_color: Color::BLACK,
            major_color: Color::BLACK,
            text_color: Color::BLACK,
            font_size: 1.5,
            starting_indicator: 14.0,
            increment_per_major: 0.01,
            start_angle: Angle(0.0),
        }
    }

    /// Defaults for a dial drawn alone on a sheet (1/300 inch).
    pub fn sheet_default() -> Self {
        Self {
            radius: 300.0,
            minor_length: 20.0,
            major_length: 50.0,
            font_size: 60.0,
            ..Self::panel_default(DVec2::ZERO)
        }
    }

    fn subject(&self) -> String {
        format!("dial at ({}, {})", self.center.x, self.center.y)
    }

    /// Reject values that would divide by zero or produce garbage geometry.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let subject = self.subject();
        let fail = |field: &'static str, value: String, constraint| ConfigurationError {
            subject: subject.clone(),
            field,
            value,
            constraint,
        };

        let reals: [(&'static str, f64, Constraint); 10] = [
            ("Dial", self.center.x, Constraint::Finite),
            ("Dial", self.center.y, Constraint::Finite),
            ("Radius", self.radius, Constraint::Positive),
            ("Span", self.span.0, Constraint::Positive),
            ("SizeTicks", self.minor_length, Constraint::Finite),
            ("SizeBig", self.major_length, Constraint::Finite),
            ("SizeFont", self.font_size, Constraint::Finite),
            ("StartingIndicator", self.starting_indicator, Constraint::Finite),
            ("IncrementPerBigTick", self.increment_per_major, Constraint::Finite),
            ("StartAngle", self.start_angle.0, Constraint::Finite),
        ];
        for (field, value, constraint) in reals {
            constraint
                .check(value)
                .map_err(|violated| fail(field, value.to_string(), violated))?;
        }

        if self.tick_count < 2 {
            return Err(fail("NumTicks", self.tick_count.to_string(), Constraint::AtLeast(2)));
        }
        if self.tick_count > MAX_TICKS {
            return Err(fail(
                "NumTicks",
                self.tick_count.to_string(),
                Constraint::AtMost(MAX_TICKS),
            ));
        }
        if self.ticks_per_major < 1 {
            return Err(fail("BigPer", self.ticks_per_major.to_string(), Constraint::AtLeast(1)));
        }
        Ok(())
    }
}

/// Hardware classes that determine a control hole's diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Large potentiometer
    Large,
    /// 1/4" phone jack
    Phone,
    /// 5 mm LED holder
    Led,
    /// 3.5 mm phone jack
    Small,
    /// 2.5 mm phone jack
    Tiny,
    /// 3 mm LED hole
    Micro,
}

impl ControlKind {
    pub const ALL: [ControlKind; 6] = [
        ControlKind::Large,
        ControlKind::Phone,
        ControlKind::Led,
        ControlKind::Small,
        ControlKind::Tiny,
        ControlKind::Micro,
    ];

    /// Hole diameter in millimetres
    pub fn diameter(self) -> f64 {
        match self {
            ControlKind::Large => 9.35,
            ControlKind::Phone => 8.8,
            ControlKind::Led => 6.0,
            ControlKind::Small => 5.75,
            ControlKind::Tiny => 3.8,
            ControlKind::Micro => 2.6,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ControlKind::Large => "ControlLarge",
            ControlKind::Phone => "ControlPhone",
            ControlKind::Led => "ControlLED",
            ControlKind::Small => "ControlSmall",
            ControlKind::Tiny => "ControlTiny",
            ControlKind::Micro => "ControlMicro",
        }
    }
}

impl FromStr for ControlKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlKind::ALL
            .into_iter()
            .find(|kind| kind.keyword() == s)
            .ok_or(())
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A round hole for a control, jack or indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSpec {
    pub center: DVec2,
    pub kind: ControlKind,
}

impl ControlSpec {
    pub fn diameter(&self) -> f64 {
        self.kind.diameter()
    }
}

/// A rectangle outline, anchored either at its lower-left corner or at its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RectangleSpec {
    Corner { origin: DVec2, size: DVec2 },
    Center { center: DVec2, size: DVec2 },
}

impl RectangleSpec {
    /// Lower-left corner and size.
    pub fn corner_form(&self) -> (DVec2, DVec2) {
        match *self {
            RectangleSpec::Corner { origin, size } => (origin, size),
            RectangleSpec::Center { center, size } => (center - size / 2.0, size),
        }
    }

    pub fn is_centered(&self) -> bool {
        matches!(self, RectangleSpec::Center { .. })
    }
}

/// A static text label, always centered over its anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub at: DVec2,
    pub size: f64,
    pub color: Color,
    /// PostScript font name, without the leading slash
    pub font: String,
    pub text: String,
}

/// Maximum number of each element kind a description may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub dials: usize,
    pub controls: usize,
    /// Corner and center rectangles combined
    pub rectangles: usize,
    pub labels: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            dials: 20,
            controls: 50,
            rectangles: 50,
            labels: 50,
        }
    }
}

/// A complete front panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    /// Mirror the artwork, for printing on the back of transparent film
    pub reverse: bool,
    pub dials: Vec<DialSpec>,
    pub controls: Vec<ControlSpec>,
    pub rectangles: Vec<RectangleSpec>,
    pub labels: Vec<TextSpec>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 193.675,
            height: 53.975,
            background: Color::from_packed(0xdfefff),
            reverse: false,
            dials: Vec::new(),
            controls: Vec::new(),
            rectangles: Vec::new(),
            labels: Vec::new(),
        }
    }
}

impl PanelConfig {
    /// Validate the panel outline and every element.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (field, value) in [("Panel", self.width), ("Panel", self.height)] {
            Constraint::Positive
                .check(value)
                .map_err(|constraint| ConfigurationError {
                    subject: "panel".to_string(),
                    field,
                    value: value.to_string(),
                    constraint,
                })?;
        }
        for dial in &self.dials {
            dial.validate()?;
        }
        for control in &self.controls {
            check_point("control", control.kind.keyword(), control.center)?;
        }
        for rect in &self.rectangles {
            let (origin, size) = rect.corner_form();
            let field = if rect.is_centered() { "CenterRectangle" } else { "Rectangle" };
            check_point("rectangle", field, origin)?;
            check_point("rectangle", field, size)?;
        }
        for label in &self.labels {
            check_point("text", "Text", label.at)?;
            check_point("text", "Text", dvec2(label.size, 0.0))?;
        }
        Ok(())
    }
}

fn check_point(subject: &str, field: &'static str, p: DVec2) -> Result<(), ConfigurationError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError {
            subject: subject.to_string(),
            field,
            value: format!("{} {}", p.x, p.y),
            constraint: Constraint::Finite,
        })
    }
}

/// A single dial printed on its own page.
#[derive(Debug, Clone, PartialEq)]
pub struct DialSheet {
    pub dial: DialSpec,
    pub reverse: bool,
}

impl Default for DialSheet {
    fn default() -> Self {
        Self {
            dial: DialSpec::sheet_default(),
            reverse: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_rectangle_normalizes_to_corner() {
        let rect = RectangleSpec::Center {
            center: dvec2(50.0, 20.0),
            size: dvec2(30.0, 10.0),
        };
        assert_eq!(rect.corner_form(), (dvec2(35.0, 15.0), dvec2(30.0, 10.0)));
    }

    #[test]
    fn control_keywords_round_trip() {
        for kind in ControlKind::ALL {
            assert_eq!(kind.keyword().parse::<ControlKind>(), Ok(kind));
        }
        assert!("ControlHuge".parse::<ControlKind>().is_err());
    }

    #[test]
    fn default_dial_is_valid() {
        assert_eq!(DialSpec::panel_default(dvec2(40.0, 25.0)).validate(), Ok(()));
        assert_eq!(DialSpec::sheet_default().validate(), Ok(()));
    }

    #[test]
    fn single_tick_dial_is_rejected() {
        let dial = DialSpec {
            tick_count: 1,
            ..DialSpec::panel_default(dvec2(40.0, 25.0))
        };
        let err = dial.validate().unwrap_err();
        assert_eq!(err.field, "NumTicks");
        assert_eq!(err.constraint, Constraint::AtLeast(2));
        assert_eq!(
            err.to_string(),
            "dial at (40, 25): invalid NumTicks 1: value must be at least 2"
        );
    }

    #[test]
    fn runaway_tick_count_is_rejected() {
        let dial = DialSpec {
            tick_count: 2_000_000_000,
            ..DialSpec::sheet_default()
        };
        let err = dial.validate().unwrap_err();
        assert_eq!(err.field, "NumTicks");
        assert_eq!(err.constraint, Constraint::AtMost(MAX_TICKS));

        let dial = DialSpec {
            tick_count: MAX_TICKS,
            ..DialSpec::sheet_default()
        };
        assert_eq!(dial.validate(), Ok(()));
    }

    #[test]
    fn zero_major_period_is_rejected() {
        let dial = DialSpec {
            ticks_per_major: 0,
            ..DialSpec::sheet_default()
        };
        assert_eq!(dial.validate().unwrap_err().field, "BigPer");
    }

    #[test]
    fn non_positive_span_and_radius_are_rejected() {
        let dial = DialSpec {
            span: Angle(0.0),
            ..DialSpec::sheet_default()
        };
        assert_eq!(dial.validate().unwrap_err().field, "Span");

        let dial = DialSpec {
            radius: -3.0,
            ..DialSpec::sheet_default()
        };
        let err = dial.validate().unwrap_err();
        assert_eq!(err.field, "Radius");
        assert_eq!(err.constraint, Constraint::Positive);
    }

    #[test]
    fn panel_validation_reaches_dials() {
        let config = PanelConfig {
            dials: vec![DialSpec {
                span: Angle(f64::NAN),
                ..DialSpec::panel_default(dvec2(1.0, 2.0))
            }],
            ..PanelConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "Span");
        assert_eq!(err.constraint, Constraint::Finite);
    }

    #[test]
    fn zero_sized_panel_is_rejected() {
        let config = PanelConfig {
            height: 0.0,
            ..PanelConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().subject, "panel");
    }
}
