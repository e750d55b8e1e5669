//! Internal-consistency violations.
//!
//! These are caller contract breaches, not user input problems: a
//! parser that respects the module state machine never triggers one.
//! They are surfaced as `Err` values rather than process aborts so an
//! embedding driver can choose its own failure policy.

use thiserror::Error;

/// A breach of the module state-machine contract by the caller.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Ice {
    /// A second global-module-fragment directive arrived outside the
    /// one tolerated dual-dialect case.
    #[error("re-entered the global module fragment")]
    GlobalFragmentReentered,

    /// A module declaration arrived with more than the optional global
    /// fragment already on the scope stack.
    #[error("module declaration with {depth} module scopes already active")]
    UnexpectedModuleScope {
        /// Scope stack depth at the time of the declaration.
        depth: usize,
    },

    /// A header-module scope was ended for a module other than the one
    /// on top of the stack.
    #[error("left module scope for `{expected}` but `{found}` was active")]
    MismatchedScopePop {
        /// Module the caller claimed to be leaving.
        expected: String,
        /// Module actually on top of the stack, or `"<none>"`.
        found: String,
    },

    /// A header-module scope ended exactly at the end of the main
    /// file; submodules can only end inside included files.
    #[error("module `{module}` ends at the end of the main source file")]
    SubmoduleEndsAtMainFile {
        /// The module being ended.
        module: String,
    },

    /// An export-scope end was given a declaration that is not an
    /// export block.
    #[error("export scope end on a non-export declaration")]
    NotAnExportScope,
}
