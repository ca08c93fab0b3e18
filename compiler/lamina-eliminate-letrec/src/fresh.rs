//! Fresh names for the cells that recursive bindings are stored in.
use lamina_ir::Identifier;

/// The names that are introduced for one binder of a `letrec` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellNames {
    /// The binder itself.
    pub binder: Identifier,

    /// The cell that holds the value of the binder.
    pub cell: Identifier,

    /// The binder of the store that initialises the cell.
    pub store: Identifier,
}

/// Creates [CellNames] for a single elimination pass.
///
/// The names are synthetic identifiers, which never compare equal to any
/// identifier that was written in a source. Every binder gets its own index,
/// so that the labels stay distinct when printed.
#[derive(Debug, Default)]
pub struct NameGenerator {
    next_index: usize,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell_names(&mut self, binder: Identifier) -> CellNames {
        let index = self.next_index;
        self.next_index += 1;

        CellNames {
            binder,
            cell: Identifier::synthetic(format!("{binder}.cell{index}")),
            store: Identifier::synthetic(format!("{binder}.store{index}")),
        }
    }

    /// The number of binders that names have been created for.
    pub fn count(&self) -> usize {
        self.next_index
    }
}
