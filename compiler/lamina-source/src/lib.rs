//! Lamina compiler sources, identifiers and their storage.
pub mod identifier;

use std::path::{Path, PathBuf};

use derive_more::Display;

/// An identifier for a source that has been loaded into a [SourceMap].
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("source#{_0}")]
pub struct SourceId(u32);

impl SourceId {
    /// Get the raw index of the [SourceId].
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// A loaded source file.
#[derive(Debug, Clone)]
pub struct Source {
    /// The path of the source, interactive sources use a placeholder.
    pub path: PathBuf,
    /// The contents of the source.
    pub contents: String,
}

/// Stores all of the sources that the compiler has loaded.
#[derive(Debug, Default)]
pub struct SourceMap {
    sources: Vec<Source>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source to the map.
    pub fn add_source(&mut self, path: impl Into<PathBuf>, contents: String) -> SourceId {
        let id = SourceId(self.sources.len() as u32);
        self.sources.push(Source { path: path.into(), contents });
        id
    }

    /// Get the contents of a source.
    pub fn contents(&self, id: SourceId) -> &str {
        &self.sources[id.0 as usize].contents
    }

    /// Get the path of a source.
    pub fn path(&self, id: SourceId) -> &Path {
        &self.sources[id.0 as usize].path
    }
}
