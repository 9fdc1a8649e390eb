//! Error types with rich diagnostics using miette
//!
//! Parse warnings carry source spans so the offending line is shown in context.

use camino::Utf8PathBuf;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::Constraint;

/// Source context for diagnostics
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<default>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Read Errors
// ============================================================================

/// The description file could not be read
#[derive(Error, Diagnostic, Debug)]
#[error("cannot open description file {path}")]
#[diagnostic(code(dialpanel::read::open_failed))]
pub struct ConfigReadError {
    pub path: Utf8PathBuf,
    #[source]
    pub source: std::io::Error,
}

// ============================================================================
// Parse Warnings
// ============================================================================

/// Non-fatal problems found while reading a description.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigWarning {
    #[error("line {line} not understood")]
    #[diagnostic(
        code(dialpanel::parse::not_understood),
        severity(Warning),
        help("each line must start with a recognized keyword such as `Dial = x y` or `Radius = r`")
    )]
    NotUnderstood {
        line: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("ignored")]
        span: SourceSpan,
    },

    #[error("dial setting on line {line} appears before any `Dial` line")]
    #[diagnostic(
        code(dialpanel::parse::no_current_dial),
        severity(Warning),
        help("start a dial with `Dial = x y` before setting its fields")
    )]
    NoCurrentDial {
        line: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("no dial to apply this to")]
        span: SourceSpan,
    },

    #[error("maximum of {limit} {kind} exceeded")]
    #[diagnostic(
        code(dialpanel::parse::capacity_exceeded),
        severity(Warning),
        help("the extra element is dropped; raise the limit on the command line if needed")
    )]
    CapacityExceeded {
        kind: &'static str,
        limit: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("dropped")]
        span: SourceSpan,
    },

    #[error("`Text` on line {line} has no string on the following line")]
    #[diagnostic(code(dialpanel::parse::missing_text), severity(Warning))]
    MissingTextPayload {
        line: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("label will be empty")]
        span: SourceSpan,
    },
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// A parsed value is geometrically invalid
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("{subject}: invalid {field} {value}: {constraint}")]
#[diagnostic(code(dialpanel::config::invalid_value))]
pub struct ConfigurationError {
    /// Which element the field belongs to, e.g. `dial at (40, 25)`
    pub subject: String,
    /// The description keyword of the field
    pub field: &'static str,
    pub value: String,
    pub constraint: Constraint,
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur during rendering
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationError),
}

// ============================================================================
// Advisories
// ============================================================================

/// The panel was fitted to paper larger than letter
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("panel needs {paper} paper")]
#[diagnostic(
    code(dialpanel::page::paper_size),
    severity(Advice),
    help("when doing ps2pdf use -sPAPERSIZE={paper}")
)]
pub struct PaperAdvisory {
    pub paper: &'static str,
}
