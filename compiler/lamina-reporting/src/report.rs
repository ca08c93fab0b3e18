//! Lamina compiler diagnostic report data structures.
use std::fmt;

use lamina_source::SourceId;

use crate::{
    error_codes::ErrorCode,
    highlight::{Colour, Modifier, highlight},
};

/// The kind of a [Report].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// An error, which stops the pipeline.
    Error,
    /// An internal error, i.e. a bug in the compiler.
    Internal,
    /// A warning, which does not stop the pipeline.
    Warning,
    /// Purely informational.
    Info,
}

impl ReportKind {
    /// Get the [Colour] of the label associated with the [ReportKind].
    pub fn as_colour(&self) -> Colour {
        match self {
            ReportKind::Error | ReportKind::Internal => Colour::Red,
            ReportKind::Warning => Colour::Yellow,
            ReportKind::Info => Colour::Blue,
        }
    }

    /// Get the label associated with the [ReportKind].
    pub fn message(&self) -> &'static str {
        match self {
            ReportKind::Error => "error",
            ReportKind::Internal => "internal",
            ReportKind::Warning => "warning",
            ReportKind::Info => "info",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", highlight(self.as_colour() | Modifier::Bold, self.message()))
    }
}

/// The kind of a [ReportNote].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportNoteKind {
    Note,
    Help,
}

impl fmt::Display for ReportNoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportNoteKind::Note => write!(f, "note"),
            ReportNoteKind::Help => write!(f, "help"),
        }
    }
}

/// An additional message attached to a [Report].
#[derive(Debug, Clone)]
pub struct ReportNote {
    pub kind: ReportNoteKind,
    pub message: String,
}

impl ReportNote {
    pub fn new(kind: ReportNoteKind, message: impl ToString) -> Self {
        Self { kind, message: message.to_string() }
    }
}

impl fmt::Display for ReportNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {} {}: {}", highlight(Colour::Blue | Modifier::Bold, "="), self.kind, self.message)
    }
}

/// A 1-based line and column within a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

/// Where a [Report] originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLocation {
    pub source: SourceId,
    pub position: Option<LineColumn>,
}

/// A diagnostic that is emitted by the compiler.
#[derive(Debug, Clone)]
pub struct Report {
    /// The general kind of the report.
    pub kind: ReportKind,
    /// A one line summary of the report.
    pub title: String,
    /// An optional associated error code.
    pub error_code: Option<ErrorCode>,
    /// The source that the report concerns, if any.
    pub location: Option<ReportLocation>,
    /// Additional notes.
    pub notes: Vec<ReportNote>,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    pub fn new() -> Self {
        Self {
            kind: ReportKind::Error,
            title: String::new(),
            error_code: None,
            location: None,
            notes: Vec::new(),
        }
    }

    /// Check if the report denotes an error.
    pub fn is_error(&self) -> bool {
        matches!(self.kind, ReportKind::Error | ReportKind::Internal)
    }

    /// Check if the report denotes a warning.
    pub fn is_warning(&self) -> bool {
        self.kind == ReportKind::Warning
    }

    pub fn kind(&mut self, kind: ReportKind) -> &mut Self {
        self.kind = kind;
        self
    }

    pub fn title(&mut self, title: impl ToString) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn code(&mut self, error_code: ErrorCode) -> &mut Self {
        self.error_code = Some(error_code);
        self
    }

    pub fn location(&mut self, location: ReportLocation) -> &mut Self {
        self.location = Some(location);
        self
    }

    /// Attach the [Report] to a source, unless it already has a location.
    pub fn in_source(&mut self, source: SourceId) -> &mut Self {
        if self.location.is_none() {
            self.location = Some(ReportLocation { source, position: None });
        }
        self
    }

    pub fn add_note(&mut self, message: impl ToString) -> &mut Self {
        self.notes.push(ReportNote::new(ReportNoteKind::Note, message));
        self
    }

    pub fn add_help(&mut self, message: impl ToString) -> &mut Self {
        self.notes.push(ReportNote::new(ReportNoteKind::Help, message));
        self
    }

    /// Write the heading of the report, i.e. `error[0010]: title`.
    pub(crate) fn write_heading(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error_code = match self.error_code {
            Some(code) => highlight(self.kind.as_colour() | Modifier::Bold, format!("[{:0>4}]", code.to_num())),
            None => String::new(),
        };

        write!(f, "{}{}: {}", self.kind, error_code, highlight(Modifier::Bold, &self.title))
    }
}

/// Displays the report without any location information, which requires
/// a source map, see [crate::writer::ReportWriter].
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_heading(f)?;

        for note in &self.notes {
            write!(f, "\n{note}")?;
        }

        Ok(())
    }
}
