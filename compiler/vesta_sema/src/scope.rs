//! Module scope records.

use vesta_ir::{ModuleId, SourceLoc};

use crate::visibility::VisibleModules;

/// One nested level of "currently compiling as part of module M".
///
/// The three scope flavors (global fragment, named module, legacy
/// header module) share this one record; they differ only in which
/// fields are populated, not in behavior.
#[derive(Clone, Debug)]
pub struct ModuleScope {
    /// The module this scope compiles into.
    pub module: ModuleId,
    /// Where the scope was entered.
    pub begin_loc: SourceLoc,
    /// Whether this scope is a named module interface unit, which is
    /// where re-exports are legal.
    pub is_interface: bool,
    /// Visibility set captured when the scope was entered; present
    /// only when scope-local visibility is enabled. Restored verbatim
    /// on exit.
    pub outer_visible: Option<VisibleModules>,
}
