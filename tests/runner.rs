//! Lamina compiler UI test runner, this reads the `cases` directory for
//! `.l3` files.
//!
//! A passing case must not produce any reports. The runner enables
//! `output_stage_results`, so the programs printed by the stages that ran
//! are compared against the recorded `case.stdout`.
//!
//! A failing case must produce at least one error. The reports are rendered,
//! stripped of ANSI codes, and compared against the recorded `case.stderr`.
//!
//! The first line of a case may configure the run, for example:
//! ```ignore
//! ; stage=check, run=fail
//! (l3 () (let ([x 0] [y x]) y))
//! ```
//!
//! This case stops after scope checking and is expected to fail.
#![cfg(test)]

use std::{fs, io, path::Path};

use lamina_driver::CompilerBuilder;
use lamina_pipeline::{interface::CompilerInterface, settings::CompilerSettings};
use lamina_reporting::{reporter::Reports, writer::ReportWriter};
use lamina_testing_internal::{TestingInput, metadata::TestResult};
use lamina_testing_macros::generate_tests;
use lamina_utils::stream::CompilerOutputStream;

use crate::{ANSI_REGEX, REGENERATE_OUTPUT};

/// Compare `contents` with the recorded expectation at `path`, recording it
/// first if it is missing or if the output should be regenerated.
fn compare_with_recorded(path: &Path, contents: &str) -> io::Result<()> {
    if *REGENERATE_OUTPUT || !path.exists() {
        fs::write(path, contents)?;
    }

    let recorded = fs::read_to_string(path)?;
    pretty_assertions::assert_eq!(recorded, contents, "output differs from `{}`", path.display());

    Ok(())
}

/// Replace the directory of the case with `$DIR` so that recorded output
/// does not depend on where the repository lives.
fn normalise_paths(input: &TestingInput, contents: &str) -> String {
    match input.path.parent().and_then(|dir| dir.to_str()) {
        Some(dir) => contents.replace(dir, "$DIR"),
        None => contents.to_string(),
    }
}

/// Verify that a case expected to fail does fail, and that the rendered
/// reports match the recorded `case.stderr`.
fn handle_failure_case(
    input: &TestingInput,
    diagnostics: Reports,
    rendered: impl FnOnce(Reports) -> String,
) -> io::Result<()> {
    assert!(
        diagnostics.iter().any(|report| report.is_error()),
        "compiling {:?} did not fail",
        input.path
    );

    let contents = rendered(diagnostics);
    let contents = ANSI_REGEX.replace_all(&contents, "");
    let contents = normalise_paths(input, &contents);

    let dir = input.path.parent().unwrap();
    compare_with_recorded(&dir.join(format!("{}.stderr", input.filename)), &contents)
}

/// Verify that a case expected to pass produces no reports, and that the
/// printed stage results match the recorded `case.stdout`.
fn handle_pass_case(input: &TestingInput, diagnostics: Reports, output: String) -> io::Result<()> {
    assert!(
        diagnostics.is_empty(),
        "compiling {:?} failed:\n{}",
        input.path,
        diagnostics.iter().map(|report| report.to_string()).collect::<Vec<_>>().join("\n")
    );

    let dir = input.path.parent().unwrap();
    compare_with_recorded(&dir.join(format!("{}.stdout", input.filename)), &output)
}

/// Generic test handler in the event whether a case should pass or fail.
fn handle_test(input: TestingInput) {
    let mut settings = CompilerSettings::new(input.path.clone());
    settings.set_emit_errors(false);
    settings.set_stage(input.metadata.stage);
    settings.output_stage_results = true;

    let output = CompilerOutputStream::owned();
    let error = CompilerOutputStream::owned();
    let (out, err) = (output.clone(), error.clone());

    let mut driver =
        CompilerBuilder::build_with_settings(settings, move || err.clone(), move || out.clone());
    driver.run_on_entry_point();

    let diagnostics = driver.diagnostics().to_vec();
    let sources = driver.workspace().source_map();

    let result = match input.metadata.completion {
        TestResult::Fail => handle_failure_case(&input, diagnostics, |reports| {
            ReportWriter::new(reports, sources).to_string()
        }),
        TestResult::Pass => handle_pass_case(&input, diagnostics, output.collect()),
    };

    if let Err(err) = result {
        panic!("failed to access the recorded output of {:?}: {err}", input.path);
    }

    // emitting is disabled, so nothing reaches the error stream
    assert_eq!(error.collect(), "");
}

generate_tests!("./cases/", r"^.*\.l3$", "ui", handle_test);
