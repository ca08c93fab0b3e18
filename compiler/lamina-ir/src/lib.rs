//! The Lamina intermediate representations.
//!
//! The compiler lowers programs through a ladder of IR levels, each one
//! strictly smaller than the one above it. This crate defines the two levels
//! that surround recursive binding elimination:
//!
//! - [l3], which has the full set of terms including `letrec`,
//!
//! - [l2], which is identical to [l3] except that it has no recursive binding
//!   construct at all. A lowering into [l2] is therefore statically known to
//!   have removed every recursive binding.
//!
//! Both levels print as the concrete s-expression syntax via [std::fmt::Display]
//! and can be dumped as trees via [lamina_utils::tree_writing::AsTreeNode].
pub mod l2;
pub mod l3;
pub mod ops;
mod printing;

pub use lamina_source::identifier::Identifier;
