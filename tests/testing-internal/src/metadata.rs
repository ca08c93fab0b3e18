//! Parsing of the configuration comment at the top of a UI test case.

use std::{
    fs,
    io::{self, BufRead, BufReader},
    path::Path,
};

use lamina_pipeline::settings::CompilerStageKind;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

/// Whether the case is expected to compile cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    /// The compiler must report at least one error before reaching the
    /// requested stage.
    Fail,
    /// The compiler must not report any errors.
    Pass,
}

/// Metadata about a specific test case. If the case carries no
/// configuration comment, the default applies: the case should pass
/// and runs the entire pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestMetadata {
    /// The stage that the compiler should stop after.
    pub stage: CompilerStageKind,
    /// How the case should complete.
    pub completion: TestResult,
}

impl Default for TestMetadata {
    fn default() -> Self {
        Self { stage: CompilerStageKind::Full, completion: TestResult::Pass }
    }
}

impl ToTokens for TestResult {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let variant = match self {
            TestResult::Fail => quote!(Fail),
            TestResult::Pass => quote!(Pass),
        };

        tokens.extend(quote!(::lamina_testing_internal::metadata::TestResult::#variant))
    }
}

impl ToTokens for TestMetadata {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let TestMetadata { stage, completion } = *self;

        let stage = match stage {
            CompilerStageKind::Parse => quote!(Parse),
            CompilerStageKind::ScopeCheck => quote!(ScopeCheck),
            CompilerStageKind::EliminateLetrec => quote!(EliminateLetrec),
            CompilerStageKind::Full => quote!(Full),
        };

        tokens.extend(quote! {
            ::lamina_testing_internal::metadata::TestMetadata {
                completion: #completion,
                stage: ::lamina_pipeline::settings::CompilerStageKind::#stage,
            }
        })
    }
}

#[derive(Debug, Default)]
pub struct TestMetadataBuilder {
    /// Stage that the test should run to.
    stage: Option<CompilerStageKind>,

    /// Whether the test is expected to pass or fail.
    completion: Option<TestResult>,
}

impl TestMetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stage(&mut self, stage: CompilerStageKind) -> &mut Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_completion(&mut self, completion: TestResult) -> &mut Self {
        self.completion = Some(completion);
        self
    }

    /// Build the [TestMetadata], using the defaults for any missing
    /// property.
    pub fn build(&self) -> TestMetadata {
        let TestMetadata { stage, completion } = TestMetadata::default();

        TestMetadata {
            completion: self.completion.unwrap_or(completion),
            stage: self.stage.unwrap_or(stage),
        }
    }
}

/// Parse the configuration from a single line of the form
/// `; key=value, key=value`. Lines that are not comments yield the default
/// [TestMetadata], and parsing stops at the first unknown key.
pub fn parse_metadata_line(line: &str) -> TestMetadata {
    let Some(config) = line.trim_start().strip_prefix(';') else {
        return TestMetadata::default();
    };

    let mut builder = TestMetadataBuilder::new();

    // Strip every white-space, leaving `key=value` pairs separated by commas.
    let config: String = config.chars().filter(|c| !c.is_whitespace()).collect();

    for pair in config.split(',').filter(|pair| !pair.is_empty()) {
        let Some((key, value)) = pair.split_once('=') else {
            break;
        };

        match key {
            "run" => {
                let completion = match value {
                    "fail" => TestResult::Fail,
                    _ => TestResult::Pass,
                };

                builder.with_completion(completion);
            }
            "stage" => {
                let stage = match value {
                    "parse" => CompilerStageKind::Parse,
                    "check" => CompilerStageKind::ScopeCheck,
                    "lower" => CompilerStageKind::EliminateLetrec,
                    _ => CompilerStageKind::Full,
                };

                builder.with_stage(stage);
            }
            _ => break,
        }
    }

    builder.build()
}

/// Read the [TestMetadata] from the first line of the case at `path`.
///
/// ```ignore
/// ; run=fail, stage=check
/// (l3 () x)
/// ```
///
/// The above case is expected to fail before the compiler finishes
/// [CompilerStageKind::ScopeCheck].
pub fn parse_test_case_metadata(path: &Path) -> Result<TestMetadata, io::Error> {
    let file = fs::File::open(path)?;
    let mut config = String::new();
    BufReader::new(file).read_line(&mut config)?;

    Ok(parse_metadata_line(&config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_stage_and_completion() {
        let metadata = parse_metadata_line("; stage=check, run=fail\n");
        assert_eq!(
            metadata,
            TestMetadata { stage: CompilerStageKind::ScopeCheck, completion: TestResult::Fail }
        );

        let metadata = parse_metadata_line(";run=pass,stage=lower");
        assert_eq!(metadata.stage, CompilerStageKind::EliminateLetrec);
        assert_eq!(metadata.completion, TestResult::Pass);
    }

    #[test]
    fn defaults_without_configuration() {
        assert_eq!(parse_metadata_line("(l3 () 0)"), TestMetadata::default());
        assert_eq!(parse_metadata_line("; a plain comment"), TestMetadata::default());
    }

    #[test]
    fn stops_at_unknown_keys() {
        let metadata = parse_metadata_line("; run=fail, colour=blue, stage=parse");
        assert_eq!(metadata.completion, TestResult::Fail);
        assert_eq!(metadata.stage, CompilerStageKind::Full);
    }
}
