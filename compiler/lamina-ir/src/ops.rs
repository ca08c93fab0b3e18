//! Operators that appear within IR terms.
use derive_more::Display;

/// A strict binary arithmetic operator.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveOp {
    #[display("+")]
    Add,
    #[display("-")]
    Sub,
    #[display("*")]
    Mul,
}

/// A binary comparison operator used by branches.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    #[display("<")]
    Lt,
    #[display("==")]
    Eq,
}
