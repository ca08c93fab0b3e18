//! Lamina diagnostic report writing utilities.
use std::fmt;

use lamina_source::SourceMap;

use crate::{
    highlight::{Colour, Modifier, highlight},
    report::Report,
    reporter::Reports,
};

/// Displays [Report]s together with the location that they refer to. This
/// needs access to the [SourceMap] in order to name the source.
pub struct ReportWriter<'s> {
    reports: Reports,
    sources: &'s SourceMap,
}

impl<'s> ReportWriter<'s> {
    pub fn new(reports: Reports, sources: &'s SourceMap) -> Self {
        Self { reports, sources }
    }

    pub fn single(report: Report, sources: &'s SourceMap) -> Self {
        Self { reports: vec![report], sources }
    }
}

impl fmt::Display for ReportWriter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.reports {
            report.write_heading(f)?;
            writeln!(f)?;

            if let Some(location) = report.location {
                let arrow = highlight(Colour::Blue | Modifier::Bold, "-->");
                write!(f, "  {arrow} {}", self.sources.path(location.source).display())?;

                if let Some(position) = location.position {
                    write!(f, ":{}:{}", position.line, position.column)?;
                }
                writeln!(f)?;
            }

            for note in &report.notes {
                writeln!(f, "{note}")?;
            }
        }

        Ok(())
    }
}
