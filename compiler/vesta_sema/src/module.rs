//! Module records and import paths.
//!
//! Records are owned by the [`crate::ModuleMap`] arena and referenced
//! by [`ModuleId`] handles everywhere else. Parent links form a tree;
//! the registry never creates cycles.

use vesta_ir::{ModuleId, SourceLoc};

/// What flavor of module a record represents.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ModuleKind {
    /// The global module fragment preceding a module declaration.
    GlobalFragment,
    /// A named module defined by an interface unit. Implementation
    /// units attach to a module of this kind rather than getting a
    /// kind of their own.
    InterfaceUnit,
    /// A module built from textually-included headers.
    HeaderModule,
}

/// One module record.
#[derive(Clone, Debug)]
pub struct Module {
    /// Full dotted name, e.g. `"std.io"`.
    pub name: String,
    /// Enclosing module, for submodules of header-module trees.
    pub parent: Option<ModuleId>,
    /// What flavor of module this is.
    pub kind: ModuleKind,
    /// Whether the module's declarations have C linkage, making it
    /// legal to import inside an `extern "C"` block.
    pub is_extern_c: bool,
    /// Where the module was defined, when known.
    pub definition_loc: SourceLoc,
    /// Modules re-exported to this module's importers.
    pub exports: Vec<ModuleId>,
    /// Name of the serialized file backing this module, when it was
    /// loaded from storage rather than parsed.
    pub ast_file: Option<String>,
    /// Global module fragment adopted by this interface unit.
    pub global_fragment: Option<ModuleId>,
}

impl Module {
    /// Last dotted-name component.
    pub fn leaf_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// One written segment of a module path, e.g. the `b` of `import a.b`.
#[derive(Clone, Debug)]
pub struct PathSegment {
    /// Segment text.
    pub name: String,
    /// Where the segment was written.
    pub loc: SourceLoc,
}

impl PathSegment {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, loc: SourceLoc) -> Self {
        PathSegment {
            name: name.into(),
            loc,
        }
    }
}

/// Join path segments into a single dotted module name.
///
/// Dots are ordinary name characters here, not a submodule hierarchy:
/// `a.b` names one module called `"a.b"`.
pub fn flatten_module_path(path: &[PathSegment]) -> String {
    let mut name = String::new();
    for segment in path {
        if !name.is_empty() {
            name.push('.');
        }
        name.push_str(&segment.name);
    }
    name
}
