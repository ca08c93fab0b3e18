//! Lamina compiler general utilities.

pub mod highlight;
pub mod logging;
pub mod printing;
pub mod scoping;
pub mod stack;
pub mod stream;
pub mod timing;
pub mod tree_writing;

// Re-export commonly used packages
pub use indexmap;
pub use itertools;
// Re-export logging utility
pub use log;
