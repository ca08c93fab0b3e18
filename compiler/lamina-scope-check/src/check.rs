//! The scope checking traversal over `l3` terms.
use itertools::Itertools;
use lamina_ir::{
    Identifier,
    l3::{Bindings, Program, Term},
};
use lamina_utils::{scoping::ScopeStack, stack::ensure_sufficient_stack};

use crate::diagnostics::{BinderOrigin, ScopeError};

pub type ScopeResult<T = ()> = Result<T, ScopeError>;

/// The names that are visible at some point of the traversal, tagged with
/// the construct that bound them.
pub type Context = ScopeStack<Identifier, BinderOrigin>;

/// Check a complete program. The parameters of the program form the
/// outermost scope.
pub fn check_program(program: &Program) -> ScopeResult {
    ensure_distinct(program.parameters.iter().copied(), BinderOrigin::Program)?;

    let mut context = Context::with_root(binders(&program.parameters, BinderOrigin::Program));
    check_term(&program.body, &mut context)
}

/// Check a term which has no free names.
pub fn check(term: &Term) -> ScopeResult {
    check_term(term, &mut Context::new())
}

/// Check `term` under `context`, stopping at the first violation.
///
/// The context is restored to its original state before this returns, even
/// when a violation is found.
pub fn check_term(term: &Term, context: &mut Context) -> ScopeResult {
    ensure_sufficient_stack(|| match term {
        Term::Let { bindings, body } => {
            ensure_distinct(names(bindings), BinderOrigin::Let)?;

            for (_, value) in bindings {
                check_term(value, context)?;
            }

            context.enter(names(bindings).map(|name| (name, BinderOrigin::Let)), |context| {
                check_term(body, context)
            })
        }
        Term::LetRec { bindings, body } => {
            ensure_distinct(names(bindings), BinderOrigin::LetRec)?;
            log::trace!("checking letrec group of {} binder(s)", bindings.len());

            context.enter(names(bindings).map(|name| (name, BinderOrigin::LetRec)), |context| {
                for (_, value) in bindings {
                    check_term(value, context)?;
                }
                check_term(body, context)
            })
        }
        Term::Reference { name } => {
            if context.contains(*name) {
                Ok(())
            } else {
                Err(ScopeError::UnboundIdentifier { name: *name })
            }
        }
        Term::Abstract { parameters, body } => {
            ensure_distinct(parameters.iter().copied(), BinderOrigin::Lambda)?;

            context.enter(binders(parameters, BinderOrigin::Lambda), |context| {
                check_term(body, context)
            })
        }
        Term::Apply { target, arguments } => {
            check_term(target, context)?;
            arguments.iter().try_for_each(|argument| check_term(argument, context))
        }
        Term::Primitive { left, right, .. } => {
            check_term(left, context)?;
            check_term(right, context)
        }
        Term::Branch { left, right, consequent, otherwise, .. } => {
            check_term(left, context)?;
            check_term(right, context)?;
            check_term(consequent, context)?;
            check_term(otherwise, context)
        }
        Term::Load { base, .. } => check_term(base, context),
        Term::Store { base, value, .. } => {
            check_term(base, context)?;
            check_term(value, context)
        }
        Term::Begin { effects, value } => {
            effects.iter().try_for_each(|effect| check_term(effect, context))?;
            check_term(value, context)
        }
        Term::Immediate { .. } | Term::Allocate { .. } => Ok(()),
    })
}

fn names(bindings: &Bindings) -> impl Iterator<Item = Identifier> + '_ {
    bindings.iter().map(|(name, _)| *name)
}

fn binders(
    names: &[Identifier],
    origin: BinderOrigin,
) -> impl Iterator<Item = (Identifier, BinderOrigin)> + '_ {
    names.iter().map(move |name| (*name, origin))
}

/// Ensure that a binder list introduces every name at most once.
fn ensure_distinct(names: impl Iterator<Item = Identifier>, origin: BinderOrigin) -> ScopeResult {
    let repeated: Vec<_> = names.duplicates().collect();

    if repeated.is_empty() {
        Ok(())
    } else {
        Err(ScopeError::DuplicateIdentifier { names: repeated, origin })
    }
}

#[cfg(test)]
mod tests {
    use lamina_ir::ops::{ComparisonOp, PrimitiveOp};
    use pretty_assertions::assert_eq;

    use super::*;

    fn unbound(name: &str) -> ScopeResult {
        Err(ScopeError::UnboundIdentifier { name: name.into() })
    }

    fn duplicate(names: &[&str], origin: BinderOrigin) -> ScopeResult {
        Err(ScopeError::DuplicateIdentifier {
            names: names.iter().map(|name| Identifier::from(*name)).collect(),
            origin,
        })
    }

    fn context(names: &[&str]) -> Context {
        Context::with_root(names.iter().map(|name| (Identifier::from(*name), BinderOrigin::Program)))
    }

    #[test]
    fn let_binds_its_body() {
        let term = Term::let_in(
            [("x", Term::immediate(0)), ("y", Term::immediate(1))],
            Term::reference("x"),
        );

        assert_eq!(check(&term), Ok(()));
    }

    #[test]
    fn let_right_hand_sides_do_not_see_siblings() {
        let term = Term::let_in(
            [("x", Term::immediate(0)), ("y", Term::reference("x"))],
            Term::reference("y"),
        );

        assert_eq!(check(&term), unbound("x"));
    }

    #[test]
    fn let_rejects_duplicate_binders() {
        let term = Term::let_in(
            [("x", Term::immediate(0)), ("x", Term::immediate(1))],
            Term::reference("x"),
        );

        assert_eq!(check(&term), duplicate(&["x"], BinderOrigin::Let));
    }

    #[test]
    fn letrec_allows_forward_references() {
        let term = Term::letrec_in(
            [("y", Term::reference("x")), ("x", Term::immediate(0))],
            Term::reference("x"),
        );

        assert_eq!(check(&term), Ok(()));
    }

    #[test]
    fn letrec_rejects_duplicate_binders() {
        let term = Term::letrec_in(
            [("x", Term::immediate(0)), ("y", Term::immediate(1)), ("x", Term::immediate(2))],
            Term::reference("x"),
        );

        assert_eq!(check(&term), duplicate(&["x"], BinderOrigin::LetRec));
    }

    #[test]
    fn mutually_recursive_functions() {
        // even and odd, referring to each other from inside their bodies
        let parity = |base: i64, other: &str| {
            Term::abstract_over(
                ["n"],
                Term::branch(
                    ComparisonOp::Eq,
                    Term::reference("n"),
                    Term::immediate(0),
                    Term::immediate(base),
                    Term::apply(
                        Term::reference(other),
                        [Term::primitive(PrimitiveOp::Sub, Term::reference("n"), Term::immediate(1))],
                    ),
                ),
            )
        };

        let program = Program::new(
            ["k"],
            Term::letrec_in(
                [("even", parity(1, "odd")), ("odd", parity(0, "even"))],
                Term::apply(Term::reference("even"), [Term::reference("k")]),
            ),
        );

        assert_eq!(check_program(&program), Ok(()));
    }

    #[test]
    fn let_body_sum() {
        let term = Term::let_in(
            [("x", Term::immediate(1)), ("y", Term::reference("z"))],
            Term::primitive(PrimitiveOp::Add, Term::reference("x"), Term::reference("y")),
        );

        assert_eq!(check_term(&term, &mut context(&["z"])), Ok(()));
        assert_eq!(check(&term), unbound("z"));
    }

    #[test]
    fn shadowing_across_scopes_is_allowed() {
        let term = Term::let_in(
            [("x", Term::immediate(0))],
            Term::abstract_over(["x"], Term::let_in([("x", Term::reference("x"))], Term::reference("x"))),
        );

        assert_eq!(check(&term), Ok(()));
    }

    #[test]
    fn program_parameters_may_be_shadowed() {
        let program = Program::new(
            ["x"],
            Term::letrec_in([("x", Term::immediate(1))], Term::reference("x")),
        );

        assert_eq!(check_program(&program), Ok(()));
    }

    #[test]
    fn scopes_are_restored_after_binders() {
        // `x` is only visible within the lambda, not in the sibling argument
        let term = Term::apply(
            Term::abstract_over(["x"], Term::reference("x")),
            [Term::reference("x")],
        );

        let mut context = Context::new();
        assert_eq!(check_term(&term, &mut context), unbound("x"));
        assert_eq!(context.depth(), 0);
    }

    #[test]
    fn references() {
        assert_eq!(check_term(&Term::reference("x"), &mut context(&["x"])), Ok(()));
        assert_eq!(check(&Term::reference("x")), unbound("x"));
    }

    #[test]
    fn abstractions() {
        assert_eq!(check(&Term::abstract_over(["x"], Term::reference("x"))), Ok(()));
        assert_eq!(check(&Term::abstract_over(Vec::<Identifier>::new(), Term::immediate(0))), Ok(()));
        assert_eq!(check(&Term::abstract_over(Vec::<Identifier>::new(), Term::reference("x"))), unbound("x"));
        assert_eq!(
            check(&Term::abstract_over(["x", "x"], Term::reference("x"))),
            duplicate(&["x"], BinderOrigin::Lambda)
        );
    }

    #[test]
    fn applications_check_target_then_arguments() {
        let term = Term::apply(Term::reference("f"), [Term::reference("x")]);

        assert_eq!(check_term(&term, &mut context(&["f", "x"])), Ok(()));
        assert_eq!(check(&term), unbound("f"));
        assert_eq!(check_term(&term, &mut context(&["f"])), unbound("x"));
        assert_eq!(check_term(&term, &mut context(&["x"])), unbound("f"));
    }

    #[test]
    fn primitives_and_branches() {
        let primitive = |left, right| Term::primitive(PrimitiveOp::Mul, left, right);
        let ctx = || context(&["x"]);

        assert_eq!(check(&primitive(Term::immediate(1), Term::immediate(2))), Ok(()));
        assert_eq!(check_term(&primitive(Term::reference("x"), Term::reference("x")), &mut ctx()), Ok(()));
        assert_eq!(check(&primitive(Term::reference("x"), Term::immediate(2))), unbound("x"));
        assert_eq!(check(&primitive(Term::immediate(1), Term::reference("x"))), unbound("x"));

        let branch = |position: usize| {
            let mut parts: Vec<Term> = (0..4).map(|_| Term::immediate(0)).collect();
            parts[position] = Term::reference("y");
            let [left, right, consequent, otherwise]: [Term; 4] = parts.try_into().unwrap();

            Term::branch(ComparisonOp::Lt, left, right, consequent, otherwise)
        };

        for position in 0..4 {
            assert_eq!(check(&branch(position)), unbound("y"));
            assert_eq!(check_term(&branch(position), &mut context(&["y"])), Ok(()));
        }
    }

    #[test]
    fn memory_operations() {
        assert_eq!(check(&Term::Allocate { count: 0 }), Ok(()));
        assert_eq!(check(&Term::Allocate { count: 1 }), Ok(()));

        assert_eq!(check_term(&Term::load(Term::reference("x"), 0), &mut context(&["x"])), Ok(()));
        assert_eq!(check(&Term::load(Term::reference("x"), 0)), unbound("x"));

        let store = Term::store(Term::reference("x"), 0, Term::reference("y"));
        assert_eq!(check_term(&store, &mut context(&["x", "y"])), Ok(()));
        assert_eq!(check_term(&store, &mut context(&["y"])), unbound("x"));
        assert_eq!(check_term(&store, &mut context(&["x"])), unbound("y"));
    }

    #[test]
    fn sequencing() {
        let ctx = || context(&["x"]);

        assert_eq!(check_term(&Term::begin([Term::reference("x")], Term::reference("x")), &mut ctx()), Ok(()));
        assert_eq!(check(&Term::begin([Term::reference("x")], Term::immediate(0))), unbound("x"));
        assert_eq!(check(&Term::begin([Term::immediate(0)], Term::reference("x"))), unbound("x"));
    }

    #[test]
    fn programs() {
        assert_eq!(check_program(&Program::new(["x"], Term::reference("x"))), Ok(()));
        assert_eq!(
            check_program(&Program::new(["x", "x"], Term::immediate(0))),
            duplicate(&["x"], BinderOrigin::Program)
        );
    }

    #[test]
    fn first_violation_wins() {
        // the unbound `a` in the first effect is found before the duplicate
        // binder in the value
        let term = Term::begin(
            [Term::reference("a")],
            Term::let_in([("b", Term::immediate(0)), ("b", Term::immediate(1))], Term::immediate(0)),
        );

        assert_eq!(check(&term), unbound("a"));
    }
}
