//! Per-compilation module options.
//!
//! An explicit value threaded into [`crate::ModuleSema`] at
//! construction rather than process-global state, so concurrent
//! compilations cannot observe each other's settings.

/// What kind of module, if any, this compilation was asked to produce.
///
/// Read-only input to the module-declaration state machine.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum CompilingMode {
    /// An ordinary translation unit.
    #[default]
    None,
    /// A module interface unit.
    Interface,
    /// A module described by a module map.
    ModuleMap,
    /// A module built directly from a header.
    HeaderModule,
}

impl CompilingMode {
    /// Whether any kind of module output was requested.
    pub fn is_compiling_module(self) -> bool {
        !matches!(self, CompilingMode::None)
    }
}

/// Configuration for module semantic analysis.
#[derive(Clone, Debug, Default)]
pub struct ModuleOptions {
    /// What kind of module output was requested.
    pub compiling: CompilingMode,
    /// Strict named-modules dialect: module declarations must come
    /// first, and same-name imports are diagnosed even outside module
    /// builds.
    pub strict_modules: bool,
    /// Compatibility dialect that flattens import paths into a single
    /// dotted name and tolerates re-entering the global module
    /// fragment when combined with `strict_modules`.
    pub dual_dialect: bool,
    /// Scope-local visibility: leaving a module scope restores the
    /// visibility set captured on entry instead of merging.
    pub local_visibility: bool,
    /// Stamp enclosing declaration contexts with their owning module
    /// as header-module scopes are entered and left.
    pub track_owning_module: bool,
    /// Allow synthesizing imports to recover from missing-visibility
    /// errors.
    pub error_recovery_imports: bool,
    /// This translation unit exists solely to aggregate includes while
    /// building a module from textual headers.
    pub building_module: bool,
    /// Module name forced on the command line; empty when absent.
    /// Updated to the declared name after a module declaration is
    /// accepted.
    pub current_module: String,
}
