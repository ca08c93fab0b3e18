//! Shared helpers for printing IR terms in their concrete syntax.
use std::fmt;

use itertools::Itertools;
use lamina_source::identifier::Identifier;
use lamina_utils::tree_writing::TreeNode;

/// Write a parenthesised, space separated list of binders.
pub(crate) fn write_parameters(f: &mut fmt::Formatter<'_>, params: &[Identifier]) -> fmt::Result {
    write!(f, "({})", params.iter().format(" "))
}

/// Write a binding group in the form `([x e] [y e])`.
pub(crate) fn write_bindings<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    bindings: &[(Identifier, T)],
) -> fmt::Result {
    write!(
        f,
        "({})",
        bindings.iter().format_with(" ", |(name, value), f| f(&format_args!("[{name} {value}]")))
    )
}

/// Create a tree node listing binders, i.e. `parameters: x, y`.
pub(crate) fn binders_node(label: &'static str, binders: &[Identifier]) -> TreeNode {
    if binders.is_empty() {
        TreeNode::leaf(format!("{label}: (none)"))
    } else {
        TreeNode::leaf(format!("{label}: {}", binders.iter().format(", ")))
    }
}
