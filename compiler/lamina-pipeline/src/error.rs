//! Errors that can occur whilst the pipeline is being set up, i.e. before
//! any stage runs.

use std::{io, path::PathBuf};

use lamina_reporting::report::{Report, ReportKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The requested pipeline configuration expected an entry point.
    #[error("no entry point was specified")]
    MissingEntryPoint,

    /// A resource could not be read from the file system.
    #[error("couldn't read `{}`, {error}", path.display())]
    ResourceAccess {
        /// The item that was being read.
        path: PathBuf,

        /// The specific [io::Error] that occurred.
        error: io::Error,
    },
}

impl From<PipelineError> for Report {
    fn from(value: PipelineError) -> Self {
        let mut report = Report::new();
        report.kind(ReportKind::Error).title(value.to_string());
        report
    }
}
