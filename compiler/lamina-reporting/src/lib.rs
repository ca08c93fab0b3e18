//! Lamina compiler diagnostic reporting.
pub mod error_codes;
pub mod report;
pub mod reporter;
pub mod writer;

pub use lamina_utils::highlight;
