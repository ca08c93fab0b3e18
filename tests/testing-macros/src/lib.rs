//! Testing utilities for running tests that are stored as resources on the
//! disk. This crate provides the `generate_tests!` macro which reads a
//! directory and generates a test case for every matching case file, named
//! after the file and the directories that contain it.

use std::{
    env, io,
    path::{Path, PathBuf},
};

use convert_case::{Case, Casing};
use lamina_testing_internal::metadata::{TestMetadata, parse_test_case_metadata};
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use regex::Regex;
use syn::{
    Expr,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    token::Comma,
};

/// Parameters of the [`generate_tests!`] proc macro.
#[derive(Debug)]
struct GenerateTestsInput {
    /// The directory holding the cases.
    path: String,
    /// The function that handles each test case.
    func: Expr,
    /// The pattern that case file names must match.
    test_pattern: String,
    /// Prefix of every generated test name.
    test_prefix: String,
}

impl Parse for GenerateTestsInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let parse_str_lit = |expr: &Expr| -> syn::Result<String> {
            let str_lit_err = || syn::Error::new_spanned(expr, "Expecting string literal");

            match expr {
                Expr::Lit(expr_lit) => match &expr_lit.lit {
                    syn::Lit::Str(str) => Ok(str.value()),
                    _ => Err(str_lit_err()),
                },
                _ => Err(str_lit_err()),
            }
        };

        let mut result = Punctuated::<Expr, Comma>::parse_terminated(input)?;
        let args_err = || syn::Error::new(input.span(), "Expecting four arguments to macro");

        let func = result.pop().ok_or_else(args_err)?;
        let test_prefix = result.pop().ok_or_else(args_err)?;
        let test_pattern = result.pop().ok_or_else(args_err)?;
        let path = result.pop().ok_or_else(args_err)?;

        if !result.is_empty() {
            return Err(args_err());
        }

        Ok(GenerateTestsInput {
            path: parse_str_lit(path.value())?,
            test_pattern: parse_str_lit(test_pattern.value())?,
            test_prefix: parse_str_lit(test_prefix.value())?,
            func: func.into_value(),
        })
    }
}

/// A detected case file.
#[derive(Debug, Clone)]
struct TestEntry {
    /// The path of the case.
    path: PathBuf,

    /// The path relative to the case directory in snake case, only used
    /// to name the generated test.
    snake_name: String,

    /// Configuration read from the top of the case.
    metadata: TestMetadata,
}

/// Collect every file below `path` whose name matches `test_pattern`.
fn read_tests_from_dir(
    path: &Path,
    test_pattern: &Regex,
    base_name: Option<&str>,
) -> io::Result<Vec<TestEntry>> {
    let mut entries = vec![];

    for entry in path.read_dir()? {
        let entry = entry?;
        let path = entry.path();

        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        let entry_snake_name = stem.to_case(Case::Snake);
        let snake_name = match base_name {
            Some(base) => format!("{base}_{entry_snake_name}"),
            None => entry_snake_name,
        };

        let entry_metadata = entry.metadata()?;

        if entry_metadata.is_dir() {
            entries.extend(read_tests_from_dir(&path, test_pattern, Some(&snake_name))?);
        } else if entry_metadata.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| test_pattern.is_match(name))
        {
            let metadata = parse_test_case_metadata(&path)?;
            entries.push(TestEntry { path, snake_name, metadata });
        }
    }

    Ok(entries)
}

/// Generate test cases based on a directory structure.
///
/// ```ignore
/// generate_tests!(TEST_DIR, TEST_PATTERN, FN_PREFIX, TEST_FN);
/// ```
///
/// - `TEST_DIR` is a string literal path to the root of the cases, relative
///   to the manifest directory of the invoking crate. Its own name is not
///   part of the generated test names.
///
/// - `TEST_PATTERN` is a string literal regular expression that case file
///   names must match, e.g. `r"^.*\.l3$"`.
///
/// - `FN_PREFIX` is prepended to every generated test name, so that the
///   macro can be used more than once in a single module.
///
/// - `TEST_FN` is the function that every generated test invokes with the
///   [`TestingInput`](lamina_testing_internal::TestingInput) of its case.
///
/// A case at `scoping/unbound_in_let.l3` with the prefix `ui` produces a
/// test named `ui_test_scoping_unbound_in_let`.
#[proc_macro]
pub fn generate_tests(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as GenerateTestsInput);
    let test_func = input.func;

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let message = "`CARGO_MANIFEST_DIR` is not set";
            return syn::Error::new(Span::call_site(), message).to_compile_error().into();
        }
    };

    let test_dir = manifest_dir.join(&input.path);
    let test_pattern = match Regex::new(&input.test_pattern) {
        Ok(pattern) => pattern,
        Err(err) => {
            return syn::Error::new(Span::call_site(), err).to_compile_error().into();
        }
    };

    let mut entries = match test_dir
        .canonicalize()
        .and_then(|dir| read_tests_from_dir(&dir, &test_pattern, None))
    {
        Ok(entries) => entries,
        Err(err) => {
            let message = format!("failed to read cases from `{}`: {err}", test_dir.display());
            return syn::Error::new(Span::call_site(), message).to_compile_error().into();
        }
    };

    entries.sort_by_cached_key(|entry| entry.path.to_owned());

    let paths = entries.iter().map(|entry| entry.path.to_string_lossy().into_owned());
    let filenames = entries.iter().map(|entry| {
        entry.path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default()
    });
    let case_metadata = entries.iter().map(|entry| entry.metadata);

    let test_names = entries
        .iter()
        .map(|entry| format_ident!("{}_test_{}", input.test_prefix, entry.snake_name));

    let output = quote! {
        #(
            #[test]
            fn #test_names() {
                #test_func(::lamina_testing_internal::TestingInput {
                    path: #paths.into(),
                    filename: #filenames.into(),
                    metadata: #case_metadata,
                });
            }
        )*
    };

    output.into()
}
