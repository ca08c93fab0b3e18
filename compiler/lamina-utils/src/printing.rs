//! Utilities for printing sequences of items in human readable error
//! messages.
use std::fmt;

/// How the items of a [SequenceDisplay] relate to one another.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SequenceJoinKind {
    /// Any one of the items
    Either,
    /// All of the items
    All,
}

impl SequenceJoinKind {
    pub fn as_conjunctive(&self) -> &'static str {
        match self {
            SequenceJoinKind::Either => "or",
            SequenceJoinKind::All => "and",
        }
    }
}

/// Displays a list of items as "`a`, `b` and `c`" (or "either a `a`, `b` or
/// `c`"), so that error messages naming several items read naturally.
pub struct SequenceDisplay<'a, T: 'a> {
    pub items: &'a [T],
    mode: SequenceJoinKind,
}

impl<'a, T: 'a> SequenceDisplay<'a, T> {
    pub fn new(items: &'a [T], mode: SequenceJoinKind) -> Self {
        Self { items, mode }
    }

    /// Create a [SequenceDisplay] with the join mode as
    /// [SequenceJoinKind::Either]
    pub fn either(items: &'a [T]) -> Self {
        Self::new(items, SequenceJoinKind::Either)
    }

    /// Create a [SequenceDisplay] with the join mode as [SequenceJoinKind::All]
    pub fn all(items: &'a [T]) -> Self {
        Self::new(items, SequenceJoinKind::All)
    }
}

impl<'a, T: fmt::Display + 'a> fmt::Display for SequenceDisplay<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.items {
            [] => Ok(()),
            [item] if self.mode == SequenceJoinKind::Either => write!(f, "a `{item}`"),
            [item] => write!(f, "`{item}`"),
            [init @ .., last] => {
                if self.mode == SequenceJoinKind::Either {
                    write!(f, "either a ")?;
                }

                for (index, item) in init.iter().enumerate() {
                    if index == init.len() - 1 {
                        write!(f, "`{item}` {} ", self.mode.as_conjunctive())?;
                    } else {
                        write!(f, "`{item}`, ")?;
                    }
                }

                write!(f, "`{last}`")
            }
        }
    }
}
