//! A diagnostic reporter for the Lamina compiler.
//!
//! Has a fluent API for creating reports in a declarative way.
use std::fmt;

use crate::report::{Report, ReportKind};

pub type Reports = Vec<Report>;

/// Facilitates the creation of lists of [Report]s in a declarative way.
#[derive(Debug, Default)]
pub struct Reporter {
    reports: Reports,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reporter from existing reports.
    pub fn from_reports(reports: Reports) -> Self {
        Self { reports }
    }

    /// Add a report to the builder.
    pub fn report(&mut self, kind: ReportKind) -> &mut Report {
        let mut report = Report::new();
        report.kind(kind);
        self.reports.push(report);
        // A report was just pushed, so the vector cannot be empty.
        let last = self.reports.len() - 1;
        &mut self.reports[last]
    }

    /// Add an error report to the builder.
    pub fn error(&mut self) -> &mut Report {
        self.report(ReportKind::Error)
    }

    /// Add a warning report to the builder.
    pub fn warning(&mut self) -> &mut Report {
        self.report(ReportKind::Warning)
    }

    /// Add an internal report to the builder.
    pub fn internal(&mut self) -> &mut Report {
        self.report(ReportKind::Internal)
    }

    /// Check if the reporter has any errors.
    pub fn has_errors(&self) -> bool {
        self.reports.iter().any(|report| report.is_error())
    }

    /// Consume the [Reporter], producing a [`Vec<Report>`].
    pub fn into_reports(self) -> Reports {
        self.reports
    }
}

impl fmt::Display for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.reports {
            writeln!(f, "{report}")?;
        }
        Ok(())
    }
}

/// Implemented by diagnostics which can be converted into [Report]s.
pub trait AddToReporter {
    fn add_to_reporter(&self, reporter: &mut Reporter);
}

/// Convert some item into a [Reports] by the means of a [Reporter].
pub fn into_reports(item: &impl AddToReporter) -> Reports {
    let mut reporter = Reporter::new();
    item.add_to_reporter(&mut reporter);
    reporter.into_reports()
}
