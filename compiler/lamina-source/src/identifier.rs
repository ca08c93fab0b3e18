//! Lamina identifier storage utilities and wrappers.
//!
//! Identifiers are interned into a global [IdentifierMap], making them cheap
//! to copy and compare. There are two kinds of identifiers:
//!
//! - *user* identifiers, which are created from a string, and where equal
//!   strings always produce the same [Identifier];
//!
//! - *synthetic* identifiers, which are created by compiler passes that need
//!   a name for something the user never wrote. Synthetic identifiers are
//!   interned in a lookup table of their own, so they are distinct from every
//!   user identifier, including one that happens to be spelled in the same
//!   way as the label.
//!
//! Both tables only grow with the number of distinct labels, so lowering the
//! same program any number of times does not grow the map. Passes that need
//! distinct synthetic names must use distinct labels.
use std::{
    borrow::Cow,
    fmt::{Debug, Display},
    sync::atomic::{AtomicU32, Ordering},
};

use dashmap::DashMap;
use fnv::FnvBuildHasher;
use lazy_static::lazy_static;

/// An interned name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Identifier(u32);

impl Identifier {
    /// Create (or look up) the synthetic identifier labelled with `label`.
    /// The result is never equal to a user identifier.
    pub fn synthetic(label: impl AsRef<str>) -> Self {
        IDENTIFIER_MAP.create_synthetic_ident(label.as_ref())
    }

    /// Check whether this identifier was created via [Identifier::synthetic].
    pub fn is_synthetic(self) -> bool {
        IDENTIFIER_MAP.is_synthetic(self)
    }

    /// Get the textual label of the identifier.
    pub fn label(self) -> &'static str {
        IDENTIFIER_MAP.get_ident(self)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Debug for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Identifier").field(&self.label()).field(&self.0).finish()
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        IDENTIFIER_MAP.create_ident(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        IDENTIFIER_MAP.create_ident(name.as_str())
    }
}

impl From<Identifier> for &str {
    fn from(ident: Identifier) -> Self {
        IDENTIFIER_MAP.get_ident(ident)
    }
}

impl From<Identifier> for String {
    fn from(ident: Identifier) -> Self {
        String::from(IDENTIFIER_MAP.get_ident(ident))
    }
}

impl From<Identifier> for Cow<'static, str> {
    fn from(ident: Identifier) -> Self {
        Cow::from(IDENTIFIER_MAP.get_ident(ident))
    }
}

lazy_static! {
    pub static ref IDENTIFIER_MAP: IdentifierMap = IdentifierMap::new();
}

/// A globally accessible identifier map. It contains the label of every
/// identifier, and reverse maps from strings to user and synthetic
/// identifiers.
#[derive(Debug, Default)]
pub struct IdentifierMap {
    counter: AtomicU32,
    reverse_identifiers: DashMap<&'static str, Identifier, FnvBuildHasher>,
    reverse_synthetic_identifiers: DashMap<&'static str, Identifier, FnvBuildHasher>,
    identifiers: DashMap<Identifier, IdentifierEntry, FnvBuildHasher>,
}

/// The stored information about an [Identifier].
#[derive(Debug, Clone, Copy)]
struct IdentifierEntry {
    label: &'static str,
    synthetic: bool,
}

impl IdentifierMap {
    /// Create a new identifier map instance.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_ident(&self) -> Identifier {
        Identifier(self.counter.fetch_add(1, Ordering::SeqCst))
    }

    /// Look up `ident_str` in `table`, creating an identifier of the given
    /// kind if it is missing.
    fn intern(
        &self,
        table: &DashMap<&'static str, Identifier, FnvBuildHasher>,
        ident_str: &str,
        synthetic: bool,
    ) -> Identifier {
        if let Some(ident) = table.get(ident_str) {
            return *ident;
        }

        // Labels live for the entire session, just as the interning table does.
        let label: &'static str = Box::leak(ident_str.to_owned().into_boxed_str());

        *table.entry(label).or_insert_with(|| {
            let ident = self.next_ident();
            self.identifiers.insert(ident, IdentifierEntry { label, synthetic });
            ident
        })
    }

    /// Create (or look up) the user identifier named `ident_str`.
    pub fn create_ident(&self, ident_str: &str) -> Identifier {
        self.intern(&self.reverse_identifiers, ident_str, false)
    }

    /// Create (or look up) the synthetic identifier labelled `label`.
    pub fn create_synthetic_ident(&self, label: &str) -> Identifier {
        self.intern(&self.reverse_synthetic_identifiers, label, true)
    }

    /// The number of identifiers that have been created.
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Look up the label of an [Identifier].
    pub fn get_ident(&self, ident: Identifier) -> &'static str {
        // Identifiers can only be constructed through this map.
        self.identifiers.get(&ident).map(|entry| entry.label).unwrap_or("<unknown>")
    }

    /// Check whether an [Identifier] is synthetic.
    pub fn is_synthetic(&self, ident: Identifier) -> bool {
        self.identifiers.get(&ident).is_some_and(|entry| entry.synthetic)
    }
}
