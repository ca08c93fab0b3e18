//! Lamina compiler pipeline interfaces, settings and shared state.
pub mod dump;
pub mod error;
pub mod interface;
pub mod settings;
pub mod workspace;
