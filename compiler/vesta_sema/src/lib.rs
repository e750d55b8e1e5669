//! Module-system semantic analysis for Vesta.
//!
//! This crate is the state machine behind module directives: how a
//! translation unit declares itself as a module, imports other
//! modules, and controls declaration visibility and ownership across
//! module boundaries. Three overlapping models meet here — the global
//! module fragment, named interface/implementation units, and modules
//! built from textually-included headers — and are reconciled into one
//! scope stack, one visibility set, and one ownership story.
//!
//! The parser/driver is the only caller; it feeds directives in source
//! order through [`ModuleSema`]'s `act_on_*` operations. Lexing,
//! module-map resolution, and serialized-module loading are external
//! collaborators behind the [`ModuleLoader`] seam.

mod ice;
mod module;
mod options;
mod registry;
mod scope;
mod sema;
mod visibility;

pub use ice::Ice;
pub use module::{flatten_module_path, Module, ModuleKind, PathSegment};
pub use options::{CompilingMode, ModuleOptions};
pub use registry::{MapLoader, ModuleLoader, ModuleMap, VisibilityRequest};
pub use scope::ModuleScope;
pub use sema::{ModuleDeclKind, ModuleSema};
pub use visibility::{NamespaceVisibilityCache, VisibleModules};
