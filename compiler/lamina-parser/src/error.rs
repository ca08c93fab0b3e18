//! Errors that occur whilst parsing a source.
use lamina_reporting::{
    error_codes::ErrorCode,
    report::{LineColumn, Report, ReportKind, ReportLocation},
};
use lamina_source::SourceId;
use pest::error::{Error as PestError, LineColLocation};
use thiserror::Error;

use crate::grammar::Rule;

pub type ParseResult<T> = Result<T, ParseError>;

/// A failure to parse a source, with the position at which parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {}:{}", position.line, position.column)]
pub struct ParseError {
    pub message: String,
    pub position: LineColumn,
}

impl ParseError {
    /// Convert the error into a [Report] that points into `source`.
    pub fn into_report(self, source: SourceId) -> Report {
        let mut report = Report::new();
        report
            .kind(ReportKind::Error)
            .code(ErrorCode::ParseFailure)
            .title(self.message)
            .location(ReportLocation { source, position: Some(self.position) });

        report
    }
}

impl From<PestError<Rule>> for ParseError {
    fn from(error: PestError<Rule>) -> Self {
        let error = error.renamed_rules(Rule::readable_name);
        let (line, column) = match error.line_col {
            LineColLocation::Pos(position) => position,
            LineColLocation::Span(start, _) => start,
        };

        Self { message: error.variant.message().into_owned(), position: LineColumn { line, column } }
    }
}
