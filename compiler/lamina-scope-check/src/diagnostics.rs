//! Diagnostics for the scope checker.
use derive_more::Display;
use lamina_ir::Identifier;
use lamina_reporting::{
    error_codes::ErrorCode,
    reporter::{AddToReporter, Reporter},
};
use lamina_utils::printing::SequenceDisplay;
use thiserror::Error;

/// The construct that introduced a binder list.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum BinderOrigin {
    #[display("let")]
    Let,
    #[display("letrec")]
    LetRec,
    #[display("lambda")]
    Lambda,
    #[display("program")]
    Program,
}

/// An error that occurred during scope checking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// A single binder list declares one or more names more than once.
    /// `names` holds each repeated name once, in order of first repetition.
    #[error("{} bound more than once in the same `{origin}` binder list", SequenceDisplay::all(names))]
    DuplicateIdentifier { names: Vec<Identifier>, origin: BinderOrigin },

    /// A reference to a name that no enclosing binder introduces.
    #[error("identifier `{name}` is not bound")]
    UnboundIdentifier { name: Identifier },
}

impl AddToReporter for ScopeError {
    fn add_to_reporter(&self, reporter: &mut Reporter) {
        match self {
            ScopeError::DuplicateIdentifier { names, origin } => {
                let error = reporter.error().code(ErrorCode::DuplicateIdentifier).title(self);

                error.add_note(format!(
                    "the names of a `{origin}` binder list must be pairwise distinct"
                ));
                if *origin != BinderOrigin::Program {
                    error.add_help(format!(
                        "to shadow {}, bind it in a nested scope instead",
                        SequenceDisplay::all(names)
                    ));
                }
            }
            ScopeError::UnboundIdentifier { name } => {
                reporter.error().code(ErrorCode::UnboundIdentifier).title(self).add_note(format!(
                    "`{name}` is neither a program parameter nor introduced by an enclosing binder"
                ));
            }
        }
    }
}
