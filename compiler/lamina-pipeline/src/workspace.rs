//! The [Workspace] holds the sources that the compiler has loaded, and the
//! IR that the stages produce for each of them.
use std::{fs, path::PathBuf};

use indexmap::IndexMap;
use lamina_ir::{l2, l3};
use lamina_source::{SourceId, SourceMap};

use crate::error::PipelineError;

#[derive(Debug, Default)]
pub struct Workspace {
    /// All of the loaded sources.
    pub source_map: SourceMap,

    /// Parsed `l3` programs, one for each parsed source.
    programs: IndexMap<SourceId, l3::Program>,

    /// Lowered `l2` programs, one for each source which went through
    /// recursive binding elimination.
    lowered_programs: IndexMap<SourceId, l2::Program>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a module from the disk and add it to the workspace.
    pub fn add_module(&mut self, path: impl Into<PathBuf>) -> Result<SourceId, PipelineError> {
        let path = path.into();
        let contents = fs::read_to_string(&path)
            .map_err(|error| PipelineError::ResourceAccess { path: path.clone(), error })?;

        Ok(self.source_map.add_source(path, contents))
    }

    /// Add a source which does not originate from the disk.
    pub fn add_interactive_block(&mut self, contents: String) -> SourceId {
        self.source_map.add_source("<interactive>", contents)
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    pub fn set_program(&mut self, source: SourceId, program: l3::Program) {
        self.programs.insert(source, program);
    }

    pub fn program(&self, source: SourceId) -> Option<&l3::Program> {
        self.programs.get(&source)
    }

    pub fn set_lowered_program(&mut self, source: SourceId, program: l2::Program) {
        self.lowered_programs.insert(source, program);
    }

    pub fn lowered_program(&self, source: SourceId) -> Option<&l2::Program> {
        self.lowered_programs.get(&source)
    }
}
