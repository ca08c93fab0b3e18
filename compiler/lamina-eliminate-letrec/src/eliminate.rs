//! Lowering of `l3` terms into `l2` terms, by rewriting every `letrec` into
//! a `let` that goes through explicitly allocated cells.
//!
//! For a group `(letrec ([n1 e1] ... [nk ek]) body)`, the lowered `let`
//! binds, in order:
//!
//! 1. a fresh one cell block for every `ni`,
//! 2. the store of each lowered `ei` into the cell of `ni`,
//! 3. every `ni` to a load from its cell,
//!
//! and then continues with the lowered `body`. Within every `ei` and within
//! `body`, a reference to any `nj` is lowered to `(load nj 0)`. The cell
//! names only appear in the bindings of the lowered `let`. A right-hand side
//! that is evaluated before the binders are loaded observes an unbound or
//! uninitialised value, so recursive references must be deferred, i.e.
//! occur within a function body.
use lamina_ir::{Identifier, l2, l3};
use lamina_utils::{scoping::ScopeStack, stack::ensure_sufficient_stack};

use crate::fresh::{CellNames, NameGenerator};

/// How a name that is in scope is reached in the lowered program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// The name is bound directly to its value.
    Direct,

    /// The name was introduced by an enclosing `letrec` and is loaded
    /// whenever it is referenced.
    Indirect,
}

pub type Context = ScopeStack<Identifier, Binding>;

/// Lowers `l3` terms into `l2` terms.
///
/// The eliminator expects terms that passed scope checking. A reference to a
/// name that is not in the context is passed through unchanged.
#[derive(Debug, Default)]
pub struct LetrecEliminator {
    context: Context,
    names: NameGenerator,
    eliminated_groups: usize,
}

impl LetrecEliminator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an eliminator which starts with `context`.
    pub fn with_context(context: Context) -> Self {
        Self { context, ..Self::default() }
    }

    /// The number of `letrec` groups that have been eliminated so far.
    pub fn eliminated_groups(&self) -> usize {
        self.eliminated_groups
    }

    /// The number of cells that have been introduced so far.
    pub fn introduced_cells(&self) -> usize {
        self.names.count()
    }

    /// Lower a program. The body is lowered without any indirect names, the
    /// parameters are kept as they are.
    pub fn eliminate_program(&mut self, program: &l3::Program) -> l2::Program {
        let outer = std::mem::take(&mut self.context);
        let body = self.eliminate_term(&program.body);
        self.context = outer;

        l2::Program { parameters: program.parameters.clone(), body }
    }

    pub fn eliminate_term(&mut self, term: &l3::Term) -> l2::Term {
        ensure_sufficient_stack(|| match term {
            l3::Term::Let { bindings, body } => {
                let bindings = bindings
                    .iter()
                    .map(|(name, value)| (*name, self.eliminate_term(value)))
                    .collect::<l2::Bindings>();

                let direct = bindings.iter().map(|(name, _)| (*name, Binding::Direct));
                let body = self.in_scope(direct, |this| this.eliminate_term(body));

                l2::Term::Let { bindings, body: Box::new(body) }
            }
            l3::Term::LetRec { bindings, body } => self.eliminate_group(bindings, body),
            l3::Term::Reference { name } => match self.context.lookup(*name) {
                Some(Binding::Indirect) => l2::Term::load(l2::Term::reference(*name), 0),
                Some(Binding::Direct) | None => l2::Term::reference(*name),
            },
            l3::Term::Abstract { parameters, body } => {
                let direct = parameters.iter().map(|name| (*name, Binding::Direct));
                let body = self.in_scope(direct, |this| this.eliminate_term(body));

                l2::Term::Abstract { parameters: parameters.clone(), body: Box::new(body) }
            }
            l3::Term::Apply { target, arguments } => {
                let target = self.eliminate_term(target);
                let arguments = arguments
                    .iter()
                    .map(|argument| self.eliminate_term(argument))
                    .collect::<Vec<_>>();

                l2::Term::apply(target, arguments)
            }
            l3::Term::Immediate { value } => l2::Term::immediate(*value),
            l3::Term::Primitive { operator, left, right } => {
                let left = self.eliminate_term(left);
                let right = self.eliminate_term(right);

                l2::Term::primitive(*operator, left, right)
            }
            l3::Term::Branch { operator, left, right, consequent, otherwise } => {
                let left = self.eliminate_term(left);
                let right = self.eliminate_term(right);
                let consequent = self.eliminate_term(consequent);
                let otherwise = self.eliminate_term(otherwise);

                l2::Term::branch(*operator, left, right, consequent, otherwise)
            }
            l3::Term::Allocate { count } => l2::Term::Allocate { count: *count },
            l3::Term::Load { base, index } => l2::Term::load(self.eliminate_term(base), *index),
            l3::Term::Store { base, index, value } => {
                let base = self.eliminate_term(base);
                let value = self.eliminate_term(value);

                l2::Term::store(base, *index, value)
            }
            l3::Term::Begin { effects, value } => {
                let effects =
                    effects.iter().map(|effect| self.eliminate_term(effect)).collect::<Vec<_>>();
                let value = self.eliminate_term(value);

                l2::Term::begin(effects, value)
            }
        })
    }

    fn eliminate_group(&mut self, bindings: &l3::Bindings, body: &l3::Term) -> l2::Term {
        let cells: Vec<CellNames> =
            bindings.iter().map(|(name, _)| self.names.cell_names(*name)).collect();
        let indirect = cells.iter().map(|names| (names.binder, Binding::Indirect));

        let (stores, body) = self.in_scope(indirect, |this| {
            let stores = bindings
                .iter()
                .zip(&cells)
                .map(|((_, value), names)| {
                    let value = this.eliminate_term(value);
                    (names.store, l2::Term::store(l2::Term::reference(names.cell), 0, value))
                })
                .collect::<Vec<_>>();

            (stores, this.eliminate_term(body))
        });

        self.eliminated_groups += 1;
        log::trace!("eliminated letrec group of {} binder(s)", cells.len());

        let allocations = cells.iter().map(|names| (names.cell, l2::Term::Allocate { count: 1 }));
        let loads = cells
            .iter()
            .map(|names| (names.binder, l2::Term::load(l2::Term::reference(names.cell), 0)));

        l2::Term::Let {
            bindings: allocations.chain(stores).chain(loads).collect(),
            body: Box::new(body),
        }
    }

    /// Run `f` with `members` as the innermost scope.
    fn in_scope<T>(
        &mut self,
        members: impl IntoIterator<Item = (Identifier, Binding)>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.context.add_scope(members);
        let result = f(self);
        self.context.remove_scope();
        result
    }
}

/// Lower a complete program.
pub fn eliminate_letrec_program(program: &l3::Program) -> l2::Program {
    LetrecEliminator::new().eliminate_program(program)
}

/// Lower `term`, where the names in `context` are reached as recorded.
pub fn eliminate_letrec_term(term: &l3::Term, context: Context) -> l2::Term {
    LetrecEliminator::with_context(context).eliminate_term(term)
}
