//! Emitting IR produced by a stage.
use std::fmt::Display;

use lamina_utils::{
    stream::CompilerOutputStream,
    stream_writeln,
    tree_writing::{AsTreeNode, TreeWriter},
};

use crate::settings::DumpMode;

/// Write `item` to `out` in the format that is specified by `mode`.
pub fn dump_ir(out: &mut CompilerOutputStream, mode: DumpMode, item: &(impl Display + AsTreeNode)) {
    match mode {
        DumpMode::Pretty => stream_writeln!(out, "{item}"),
        DumpMode::Tree => {
            let tree = item.as_tree_node();
            stream_writeln!(out, "{}", TreeWriter::new(&tree))
        }
    }
}
