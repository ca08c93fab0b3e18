//! A stack of lexical scopes.
//!
//! Each scope is an ordered list of members, where a member is a symbol
//! paired with a value. Lookups walk the scopes from the innermost to the
//! outermost, so a member of an inner scope shadows any member of an outer
//! scope with the same symbol. Leaving a scope restores exactly the view
//! that existed before it was entered, which is what gives sibling
//! sub-terms independent views of the context.
use std::fmt::Debug;

/// A single scope within a [ScopeStack].
#[derive(Debug, Clone)]
pub struct Scope<S, V> {
    members: Vec<(S, V)>,
}

impl<S: PartialEq + Copy, V> Scope<S, V> {
    /// Find the last member that is named `symbol`.
    pub fn get(&self, symbol: S) -> Option<&V> {
        self.members.iter().rev().find(|(member, _)| *member == symbol).map(|(_, value)| value)
    }

    /// The number of members within the scope.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A stack of [Scope]s.
#[derive(Debug, Clone)]
pub struct ScopeStack<S, V> {
    scopes: Vec<Scope<S, V>>,
}

impl<S, V> Default for ScopeStack<S, V> {
    fn default() -> Self {
        Self { scopes: Vec::new() }
    }
}

impl<S: PartialEq + Copy + Debug, V: Debug> ScopeStack<S, V> {
    /// Create an empty [ScopeStack].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [ScopeStack] with a single root scope made of the given
    /// members.
    pub fn with_root(members: impl IntoIterator<Item = (S, V)>) -> Self {
        let mut stack = Self::new();
        stack.add_scope(members);
        stack
    }

    /// Push a new innermost scope.
    pub fn add_scope(&mut self, members: impl IntoIterator<Item = (S, V)>) {
        self.scopes.push(Scope { members: members.into_iter().collect() });
    }

    /// Pop the innermost scope.
    ///
    /// Panics if there is no scope to remove, since that means that scope
    /// entries and exits are unbalanced.
    pub fn remove_scope(&mut self) -> Scope<S, V> {
        self.scopes.pop().expect("attempted to leave a scope that was never entered")
    }

    /// Run `f` with an additional innermost scope made of `members`, which is
    /// removed again once `f` returns.
    pub fn enter<T>(
        &mut self,
        members: impl IntoIterator<Item = (S, V)>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.add_scope(members);
        let result = f(self);
        self.remove_scope();
        result
    }

    /// Find the innermost member named `symbol`.
    pub fn lookup(&self, symbol: S) -> Option<&V> {
        self.scopes.iter().rev().find_map(|scope| scope.get(symbol))
    }

    /// Check whether any scope contains a member named `symbol`.
    pub fn contains(&self, symbol: S) -> bool {
        self.lookup(symbol).is_some()
    }

    /// The number of scopes currently on the stack.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}
