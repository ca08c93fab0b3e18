//! Printing of labelled trees, used to dump IR terms in a readable form.
use core::fmt;
use std::{borrow::Cow, iter};

/// A node in a tree, with a label and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: Cow<'static, str>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf node with the given label.
    pub fn leaf(label: impl Into<Cow<'static, str>>) -> Self {
        Self { label: label.into(), children: vec![] }
    }

    /// Create a branch node with the given children.
    pub fn branch(label: impl Into<Cow<'static, str>>, children: Vec<TreeNode>) -> Self {
        Self { label: label.into(), children }
    }
}

/// Anything which can be viewed as a [TreeNode].
pub trait AsTreeNode {
    fn as_tree_node(&self) -> TreeNode;
}

/// Configuration for [TreeWriter].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeWriterConfig {
    /// What to left-pad the tree with.
    pub pad: char,
    /// The vertical line drawing character.
    pub vertical_line: char,
    /// The middle intersection drawing character.
    pub middle_intersect: char,
    /// The end intersection drawing character.
    pub end_intersect: char,
    /// What to prefix the children with (first line).
    pub child_prefix: Cow<'static, str>,
}

impl TreeWriterConfig {
    /// Draw trees using Unicode box drawing characters.
    pub fn unicode() -> Self {
        Self {
            pad: ' ',
            vertical_line: '│',
            middle_intersect: '├',
            end_intersect: '└',
            child_prefix: "─".into(),
        }
    }

    /// Draw trees using ASCII characters.
    pub fn ascii() -> Self {
        Self {
            pad: ' ',
            vertical_line: '|',
            middle_intersect: '|',
            end_intersect: '`',
            child_prefix: "-".into(),
        }
    }
}

impl Default for TreeWriterConfig {
    fn default() -> Self {
        Self::unicode()
    }
}

/// Prints a tree through [fmt::Display], using a reference to a [TreeNode].
#[derive(Debug, Clone)]
pub struct TreeWriter<'t, 'cfg> {
    tree: &'t TreeNode,
    pad: String,
    config: Cow<'cfg, TreeWriterConfig>,
}

impl<'t> TreeWriter<'t, '_> {
    /// Create a new [TreeWriter] with the default configuration.
    pub fn new(tree: &'t TreeNode) -> Self {
        Self::new_with_config(tree, TreeWriterConfig::default())
    }

    /// Create a new [TreeWriter] with the given configuration.
    pub fn new_with_config(tree: &'t TreeNode, config: TreeWriterConfig) -> Self {
        Self { tree, pad: String::new(), config: Cow::Owned(config) }
    }

    fn is_last(&self, child_index: usize) -> bool {
        child_index == self.tree.children.len() - 1
    }

    fn next_depth(&self, child: &'t TreeNode, child_index: usize) -> TreeWriter<'t, '_> {
        let vertical_line_or_pad = if self.is_last(child_index) {
            self.config.pad
        } else {
            self.config.vertical_line
        };

        let extra_pad = iter::repeat_n(self.config.pad, self.config.child_prefix.chars().count());
        let pad = self.pad.chars().chain(iter::once(vertical_line_or_pad)).chain(extra_pad).collect();

        TreeWriter { tree: child, pad, config: Cow::Borrowed(self.config.as_ref()) }
    }
}

impl fmt::Display for TreeWriter<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.tree.label)?;

        for (index, child) in self.tree.children.iter().enumerate() {
            let pipe_char = if self.is_last(index) {
                self.config.end_intersect
            } else {
                self.config.middle_intersect
            };

            let child_writer = self.next_depth(child, index);
            write!(f, "{}{}{}{}", self.pad, pipe_char, self.config.child_prefix, child_writer)?;
        }

        Ok(())
    }
}
