//! Line-oriented reader for panel and dial descriptions.
//!
//! Each line is matched against the pest grammar in `panel.pest`. Lines that
//! match nothing are reported as warnings and otherwise ignored, so files written
//! for newer versions still render.

use std::fmt;

use camino::Utf8Path;
use glam::{DVec2, dvec2};
use pest::Parser;
use pest::iterators::Pairs;

use crate::config::{ControlSpec, DialSheet, DialSpec, Limits, PanelConfig, RectangleSpec, TextSpec};
use crate::errors::{ConfigReadError, ConfigWarning, SourceContext};
use crate::log::{debug, info};
use crate::types::{Angle, Color};
use crate::{PanelParser, Rule};

/// A parsed description together with the warnings produced while reading it.
#[derive(Debug)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<ConfigWarning>,
}

/// One recognized line of a description.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Comment,
    Reverse,
    PanelSize(DVec2),
    Background(Color),
    /// Starts a new dial centered here
    Dial(DVec2),
    Control(ControlSpec),
    Rectangle(RectangleSpec),
    /// A label; its string is on the following line
    Text {
        at: DVec2,
        size: f64,
        color: Color,
        font: String,
    },
    Field(DialField),
}

/// A setting applied to the most recent dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialField {
    Radius(f64),
    Span(f64),
    SizeTicks(f64),
    SizeBig(f64),
    StartingIndicator(f64),
    IncrementPerBigTick(f64),
    SizeFont(f64),
    StartAngle(f64),
    NumTicks(i64),
    BigPer(i64),
    ColorCircle(Color),
    ColorTickMarks(Color),
    ColorBigTickMarks(Color),
    ColorText(Color),
}

impl DialField {
    fn from_number(key: &str, value: f64) -> Option<Self> {
        Some(match key {
            "Radius" => DialField::Radius(value),
            "Span" => DialField::Span(value),
            "SizeTicks" => DialField::SizeTicks(value),
            "SizeBig" => DialField::SizeBig(value),
            "StartingIndicator" => DialField::StartingIndicator(value),
            "IncrementPerBigTick" => DialField::IncrementPerBigTick(value),
            "SizeFont" => DialField::SizeFont(value),
            "StartAngle" => DialField::StartAngle(value),
            _ => return None,
        })
    }

    fn from_count(key: &str, value: i64) -> Option<Self> {
        Some(match key {
            "NumTicks" => DialField::NumTicks(value),
            "BigPer" => DialField::BigPer(value),
            _ => return None,
        })
    }

    fn from_color(key: &str, value: Color) -> Option<Self> {
        Some(match key {
            "ColorCircle" => DialField::ColorCircle(value),
            "ColorTickMarks" => DialField::ColorTickMarks(value),
            "ColorBigTickMarks" => DialField::ColorBigTickMarks(value),
            "ColorText" => DialField::ColorText(value),
            _ => return None,
        })
    }

    pub fn apply(self, dial: &mut DialSpec) {
        match self {
            DialField::Radius(v) => dial.radius = v,
            DialField::Span(v) => dial.span = Angle(v),
            DialField::SizeTicks(v) => dial.minor_length = v,
            DialField::SizeBig(v) => dial.major_length = v,
            DialField::StartingIndicator(v) => dial.starting_indicator = v,
            DialField::IncrementPerBigTick(v) => dial.increment_per_major = v,
            DialField::SizeFont(v) => dial.font_size = v,
            DialField::StartAngle(v) => dial.start_angle = Angle(v),
            DialField::NumTicks(n) => dial.tick_count = n,
            DialField::BigPer(n) => dial.ticks_per_major = n,
            DialField::ColorCircle(c) => dial.circle_color = c,
            DialField::ColorTickMarks(c) => dial.minor_color = c,
            DialField::ColorBigTickMarks(c) => dial.major_color = c,
            DialField::ColorText(c) => dial.text_color = c,
        }
    }
}

impl fmt::Display for DialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialField::Radius(v) => write!(f, "radius: {v}"),
            DialField::Span(v) => write!(f, "span: {v}"),
            DialField::SizeTicks(v) => write!(f, "size of small tick marks: {v}"),
            DialField::SizeBig(v) => write!(f, "size of big tick marks: {v}"),
            DialField::StartingIndicator(v) => write!(f, "starting indicator: {v}"),
            DialField::IncrementPerBigTick(v) => write!(f, "increment per big tick mark: {v}"),
            DialField::SizeFont(v) => write!(f, "size of numbers: {v}"),
            DialField::StartAngle(v) => write!(f, "start angle: {v}"),
            DialField::NumTicks(n) => write!(f, "number of tick marks: {n}"),
            DialField::BigPer(n) => write!(f, "small ticks per big: {n}"),
            DialField::ColorCircle(c) => write!(f, "color of circle: {c}"),
            DialField::ColorTickMarks(c) => write!(f, "color of small tick marks: {c}"),
            DialField::ColorBigTickMarks(c) => write!(f, "color of big tick marks: {c}"),
            DialField::ColorText(c) => write!(f, "color of numbers: {c}"),
        }
    }
}

/// Parse a single line (without its terminator). Returns `None` if the line is
/// not a recognized directive.
pub fn parse_directive(text: &str) -> Option<Directive> {
    let line = PanelParser::parse(Rule::line, text).ok()?.next()?;
    let directive = line.into_inner().find(|p| p.as_rule() == Rule::directive)?;
    let pair = directive.into_inner().next()?;
    let rule = pair.as_rule();
    let mut values = pair.into_inner();

    let directive = match rule {
        Rule::comment => Directive::Comment,
        Rule::reverse => Directive::Reverse,
        Rule::panel_size => Directive::PanelSize(point(&mut values)?),
        Rule::background => Directive::Background(color(&mut values)?),
        Rule::dial => Directive::Dial(point(&mut values)?),
        Rule::control => {
            let kind = values.next()?.as_str().parse().ok()?;
            Directive::Control(ControlSpec {
                center: point(&mut values)?,
                kind,
            })
        }
        Rule::rectangle => Directive::Rectangle(RectangleSpec::Corner {
            origin: point(&mut values)?,
            size: point(&mut values)?,
        }),
        Rule::center_rectangle => Directive::Rectangle(RectangleSpec::Center {
            center: point(&mut values)?,
            size: point(&mut values)?,
        }),
        Rule::text => Directive::Text {
            at: point(&mut values)?,
            size: real(&mut values)?,
            color: color(&mut values)?,
            font: values.next()?.as_str().to_string(),
        },
        Rule::dial_number => {
            let key = values.next()?.as_str();
            Directive::Field(DialField::from_number(key, real(&mut values)?)?)
        }
        Rule::dial_count => {
            let key = values.next()?.as_str();
            let count = values.next()?.as_str().parse().ok()?;
            Directive::Field(DialField::from_count(key, count)?)
        }
        Rule::dial_color => {
            let key = values.next()?.as_str();
            Directive::Field(DialField::from_color(key, color(&mut values)?)?)
        }
        _ => return None,
    };
    Some(directive)
}

fn real(values: &mut Pairs<'_, Rule>) -> Option<f64> {
    values.next()?.as_str().parse().ok()
}

fn point(values: &mut Pairs<'_, Rule>) -> Option<DVec2> {
    Some(dvec2(real(values)?, real(values)?))
}

fn color(values: &mut Pairs<'_, Rule>) -> Option<Color> {
    values.next()?.as_str().parse().ok()
}

/// Read a description file. Invalid UTF-8 is replaced rather than rejected.
pub fn read_source(path: &Utf8Path) -> Result<String, ConfigReadError> {
    std::fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| ConfigReadError {
            path: path.to_owned(),
            source,
        })
}

#[derive(Debug, Clone, Copy)]
struct SourceLine<'a> {
    /// 1-based
    number: usize,
    offset: usize,
    text: &'a str,
}

/// Walks the source line by line and collects warnings against it.
struct LineReader<'a> {
    context: SourceContext,
    lines: Vec<SourceLine<'a>>,
    next: usize,
    warnings: Vec<ConfigWarning>,
}

impl<'a> LineReader<'a> {
    fn new(name: &str, source: &'a str) -> Self {
        let mut offset = 0;
        let lines = source
            .split_inclusive('\n')
            .enumerate()
            .map(|(index, raw)| {
                let line = SourceLine {
                    number: index + 1,
                    offset,
                    text: raw.trim_end_matches(['\n', '\r']),
                };
                offset += raw.len();
                line
            })
            .collect();
        Self {
            context: SourceContext::new(name, source),
            lines,
            next: 0,
            warnings: Vec::new(),
        }
    }

    fn next_line(&mut self) -> Option<SourceLine<'a>> {
        let line = self.lines.get(self.next).copied()?;
        self.next += 1;
        Some(line)
    }

    /// The directive on `line`, or `None` for blank and unrecognized lines.
    fn directive(&mut self, line: SourceLine<'a>) -> Option<Directive> {
        if line.text.trim().is_empty() {
            return None;
        }
        let directive = parse_directive(line.text);
        if directive.is_none() {
            self.not_understood(line);
        }
        directive
    }

    /// The raw line following a `Text` directive.
    fn text_payload(&mut self, text_line: SourceLine<'a>) -> String {
        match self.next_line() {
            Some(payload) => payload.text.to_string(),
            None => {
                let warning = ConfigWarning::MissingTextPayload {
                    line: text_line.number,
                    src: self.context.named_source(),
                    span: span(text_line),
                };
                self.warnings.push(warning);
                String::new()
            }
        }
    }

    fn not_understood(&mut self, line: SourceLine<'a>) {
        debug!(line = line.number, text = line.text, "line not understood");
        let warning = ConfigWarning::NotUnderstood {
            line: line.number,
            src: self.context.named_source(),
            span: span(line),
        };
        self.warnings.push(warning);
    }

    fn no_current_dial(&mut self, line: SourceLine<'a>) {
        let warning = ConfigWarning::NoCurrentDial {
            line: line.number,
            src: self.context.named_source(),
            span: span(line),
        };
        self.warnings.push(warning);
    }

    /// Push `item` unless `len` has reached `limit`; warn and drop it otherwise.
    fn push_limited<T>(
        &mut self,
        items: &mut Vec<T>,
        item: T,
        len: usize,
        limit: usize,
        kind: &'static str,
        line: SourceLine<'a>,
    ) -> bool {
        if len < limit {
            items.push(item);
            return true;
        }
        let warning = ConfigWarning::CapacityExceeded {
            kind,
            limit,
            src: self.context.named_source(),
            span: span(line),
        };
        self.warnings.push(warning);
        false
    }

    fn finish<T>(self, value: T) -> Parsed<T> {
        Parsed {
            value,
            warnings: self.warnings,
        }
    }
}

fn span(line: SourceLine<'_>) -> miette::SourceSpan {
    (line.offset, line.text.len()).into()
}

/// Which dial the dial fields currently apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialTarget {
    NotStarted,
    Last,
    /// The last `Dial` line exceeded the limit; its fields are ignored
    Dropped,
}

/// Parse a front panel description.
pub fn parse_panel(name: &str, source: &str, limits: &Limits) -> Parsed<PanelConfig> {
    let mut reader = LineReader::new(name, source);
    let mut config = PanelConfig::default();
    let mut target = DialTarget::NotStarted;

    while let Some(line) = reader.next_line() {
        let Some(directive) = reader.directive(line) else {
            // a malformed `Text` line still owns the line after it
            if line.text.starts_with("Text") {
                if let Some(payload) = reader.next_line() {
                    debug!("skipping label [{}] of line {}", payload.text, line.number);
                }
            }
            continue;
        };
        match directive {
            Directive::Comment => {}
            Directive::Reverse => {
                config.reverse = true;
                info!("reverse: true");
            }
            Directive::PanelSize(size) => {
                config.width = size.x;
                config.height = size.y;
                info!("panel size: {} by {} mm", size.x, size.y);
            }
            Directive::Background(color) => {
                config.background = color;
                info!("panel background color: {}", color);
            }
            Directive::Dial(center) => {
                let len = config.dials.len();
                let dial = DialSpec::panel_default(center);
                let kept =
                    reader.push_limited(&mut config.dials, dial, len, limits.dials, "dials", line);
                target = if kept { DialTarget::Last } else { DialTarget::Dropped };
                if kept {
                    info!("new dial ({}) at {}, {}", len + 1, center.x, center.y);
                }
            }
            Directive::Control(control) => {
                let len = config.controls.len();
                info!("{} at {}, {}", control.kind, control.center.x, control.center.y);
                reader.push_limited(
                    &mut config.controls,
                    control,
                    len,
                    limits.controls,
                    "controls",
                    line,
                );
            }
            Directive::Rectangle(rect) => {
                let len = config.rectangles.len();
                info!("new rectangle ({}): {:?}", len + 1, rect);
                reader.push_limited(
                    &mut config.rectangles,
                    rect,
                    len,
                    limits.rectangles,
                    "rectangles",
                    line,
                );
            }
            Directive::Text {
                at,
                size,
                color,
                font,
            } => {
                let text = reader.text_payload(line);
                info!("text at {} {} size {} face {}: [{}]", at.x, at.y, size, font, text);
                let label = TextSpec {
                    at,
                    size,
                    color,
                    font,
                    text,
                };
                let len = config.labels.len();
                reader.push_limited(&mut config.labels, label, len, limits.labels, "strings", line);
            }
            Directive::Field(field) => match target {
                DialTarget::Last => {
                    if let Some(dial) = config.dials.last_mut() {
                        field.apply(dial);
                        info!("{}", field);
                    }
                }
                DialTarget::NotStarted => reader.no_current_dial(line),
                DialTarget::Dropped => debug!("ignoring {} for dropped dial", field),
            },
        }
    }

    reader.finish(config)
}

/// Parse a single-dial description. Only comments, `Reverse` and dial fields
/// are understood; they apply to one implicit dial.
pub fn parse_dial_sheet(name: &str, source: &str) -> Parsed<DialSheet> {
    let mut reader = LineReader::new(name, source);
    let mut sheet = DialSheet::default();

    while let Some(line) = reader.next_line() {
        let Some(directive) = reader.directive(line) else {
            continue;
        };
        match directive {
            Directive::Comment => {}
            Directive::Reverse => {
                sheet.reverse = true;
                info!("reverse: true");
            }
            Directive::Field(field) => {
                field.apply(&mut sheet.dial);
                info!("{}", field);
            }
            _ => reader.not_understood(line),
        }
    }

    reader.finish(sheet)
}
