//! The `l2` level of the IR: the target of recursive binding elimination.
//!
//! This level is identical to [crate::l3] except that it has no recursive
//! binding construct.
use std::fmt;

use lamina_source::identifier::Identifier;
use lamina_utils::{
    stack::ensure_sufficient_stack,
    tree_writing::{AsTreeNode, TreeNode},
};

use crate::{
    ops::{ComparisonOp, PrimitiveOp},
    printing::{binders_node, write_bindings, write_parameters},
};

/// An ordered binding group, as introduced by `let`.
pub type Bindings = Vec<(Identifier, Term)>;

/// A term of the `l2` level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Simultaneous, non-recursive binding. Each right-hand side only sees
    /// the enclosing scope, whilst the body sees every binder.
    Let { bindings: Bindings, body: Box<Term> },

    Reference { name: Identifier },

    /// A function literal.
    Abstract { parameters: Vec<Identifier>, body: Box<Term> },

    Apply { target: Box<Term>, arguments: Vec<Term> },

    Immediate { value: i64 },

    Primitive { operator: PrimitiveOp, left: Box<Term>, right: Box<Term> },

    /// Compare `left` and `right` and continue with `consequent` if the
    /// comparison holds, `otherwise` if not.
    Branch {
        operator: ComparisonOp,
        left: Box<Term>,
        right: Box<Term>,
        consequent: Box<Term>,
        otherwise: Box<Term>,
    },

    /// A fresh memory block of `count` cells.
    Allocate { count: usize },

    Load { base: Box<Term>, index: usize },

    Store { base: Box<Term>, index: usize, value: Box<Term> },

    /// Evaluate `effects` in order, then `value`.
    Begin { effects: Vec<Term>, value: Box<Term> },
}

impl Term {
    pub fn reference(name: impl Into<Identifier>) -> Self {
        Term::Reference { name: name.into() }
    }

    pub fn immediate(value: i64) -> Self {
        Term::Immediate { value }
    }

    pub fn let_in(bindings: impl IntoIterator<Item = (impl Into<Identifier>, Term)>, body: Term) -> Self {
        Term::Let { bindings: collect_bindings(bindings), body: Box::new(body) }
    }

    pub fn abstract_over(parameters: impl IntoIterator<Item = impl Into<Identifier>>, body: Term) -> Self {
        Term::Abstract {
            parameters: parameters.into_iter().map(Into::into).collect(),
            body: Box::new(body),
        }
    }

    pub fn apply(target: Term, arguments: impl IntoIterator<Item = Term>) -> Self {
        Term::Apply { target: Box::new(target), arguments: arguments.into_iter().collect() }
    }

    pub fn primitive(operator: PrimitiveOp, left: Term, right: Term) -> Self {
        Term::Primitive { operator, left: Box::new(left), right: Box::new(right) }
    }

    pub fn branch(
        operator: ComparisonOp,
        left: Term,
        right: Term,
        consequent: Term,
        otherwise: Term,
    ) -> Self {
        Term::Branch {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            consequent: Box::new(consequent),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn load(base: Term, index: usize) -> Self {
        Term::Load { base: Box::new(base), index }
    }

    pub fn store(base: Term, index: usize, value: Term) -> Self {
        Term::Store { base: Box::new(base), index, value: Box::new(value) }
    }

    pub fn begin(effects: impl IntoIterator<Item = Term>, value: Term) -> Self {
        Term::Begin { effects: effects.into_iter().collect(), value: Box::new(value) }
    }
}

fn collect_bindings(bindings: impl IntoIterator<Item = (impl Into<Identifier>, Term)>) -> Bindings {
    bindings.into_iter().map(|(name, value)| (name.into(), value)).collect()
}

/// The top-level entry of an `l2` program. The parameters are the names
/// which are bound by whoever runs the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub parameters: Vec<Identifier>,
    pub body: Term,
}

impl Program {
    pub fn new(parameters: impl IntoIterator<Item = impl Into<Identifier>>, body: Term) -> Self {
        Self { parameters: parameters.into_iter().map(Into::into).collect(), body }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Term::Let { bindings, body } => {
                write!(f, "(let ")?;
                write_bindings(f, bindings)?;
                write!(f, " {body})")
            }
            Term::Reference { name } => write!(f, "{name}"),
            Term::Abstract { parameters, body } => {
                write!(f, "(lambda ")?;
                write_parameters(f, parameters)?;
                write!(f, " {body})")
            }
            Term::Apply { target, arguments } => {
                write!(f, "({target}")?;
                for argument in arguments {
                    write!(f, " {argument}")?;
                }
                write!(f, ")")
            }
            Term::Immediate { value } => write!(f, "{value}"),
            Term::Primitive { operator, left, right } => write!(f, "({operator} {left} {right})"),
            Term::Branch { operator, left, right, consequent, otherwise } => {
                write!(f, "(if ({operator} {left} {right}) {consequent} {otherwise})")
            }
            Term::Allocate { count } => write!(f, "(allocate {count})"),
            Term::Load { base, index } => write!(f, "(load {base} {index})"),
            Term::Store { base, index, value } => write!(f, "(store {base} {index} {value})"),
            Term::Begin { effects, value } => {
                write!(f, "(begin")?;
                for effect in effects {
                    write!(f, " {effect}")?;
                }
                write!(f, " {value})")
            }
        })
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(l2 ")?;
        write_parameters(f, &self.parameters)?;
        write!(f, " {})", self.body)
    }
}

impl AsTreeNode for Term {
    fn as_tree_node(&self) -> TreeNode {
        ensure_sufficient_stack(|| match self {
            Term::Let { bindings, body } => {
                let bindings = bindings
                    .iter()
                    .map(|(name, value)| TreeNode::branch(name.to_string(), vec![value.as_tree_node()]));

                TreeNode::branch(
                    "let",
                    vec![
                        TreeNode::branch("bindings", bindings.collect()),
                        TreeNode::branch("body", vec![body.as_tree_node()]),
                    ],
                )
            }
            Term::Reference { name } => TreeNode::leaf(format!("ref {name}")),
            Term::Abstract { parameters, body } => TreeNode::branch(
                "lambda",
                vec![
                    binders_node("parameters", parameters),
                    TreeNode::branch("body", vec![body.as_tree_node()]),
                ],
            ),
            Term::Apply { target, arguments } => TreeNode::branch(
                "apply",
                vec![
                    TreeNode::branch("target", vec![target.as_tree_node()]),
                    TreeNode::branch(
                        "arguments",
                        arguments.iter().map(|argument| argument.as_tree_node()).collect(),
                    ),
                ],
            ),
            Term::Immediate { value } => TreeNode::leaf(value.to_string()),
            Term::Primitive { operator, left, right } => TreeNode::branch(
                format!("primitive {operator}"),
                vec![left.as_tree_node(), right.as_tree_node()],
            ),
            Term::Branch { operator, left, right, consequent, otherwise } => TreeNode::branch(
                format!("if {operator}"),
                vec![
                    left.as_tree_node(),
                    right.as_tree_node(),
                    TreeNode::branch("then", vec![consequent.as_tree_node()]),
                    TreeNode::branch("else", vec![otherwise.as_tree_node()]),
                ],
            ),
            Term::Allocate { count } => TreeNode::leaf(format!("allocate {count}")),
            Term::Load { base, index } => {
                TreeNode::branch(format!("load {index}"), vec![base.as_tree_node()])
            }
            Term::Store { base, index, value } => TreeNode::branch(
                format!("store {index}"),
                vec![base.as_tree_node(), value.as_tree_node()],
            ),
            Term::Begin { effects, value } => TreeNode::branch(
                "begin",
                effects.iter().chain(std::iter::once(value.as_ref())).map(|term| term.as_tree_node()).collect(),
            ),
        })
    }
}

impl AsTreeNode for Program {
    fn as_tree_node(&self) -> TreeNode {
        TreeNode::branch(
            "l2",
            vec![
                binders_node("parameters", &self.parameters),
                TreeNode::branch("body", vec![self.body.as_tree_node()]),
            ],
        )
    }
}
