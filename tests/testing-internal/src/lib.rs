//! Shared definitions between the UI test runner and the
//! `generate_tests!` macro, mostly the per-case configuration that is
//! read from the first line of each case file.
pub mod metadata;

use std::path::PathBuf;

use metadata::TestMetadata;

/// The input to a single generated UI test.
#[derive(Debug, Clone)]
pub struct TestingInput {
    /// The path to the case file.
    pub path: PathBuf,

    /// The name of the case file without the `.l3` extension, used to
    /// locate the expected output files next to it.
    pub filename: String,

    /// Configuration read from the top of the case.
    pub metadata: TestMetadata,
}
