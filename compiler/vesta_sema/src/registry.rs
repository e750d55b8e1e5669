//! Module registry: the arena of module records and the loading seam.
//!
//! [`ModuleMap`] owns every module record for a build and hands out
//! [`ModuleId`] handles. Loading a module from storage is behind the
//! [`ModuleLoader`] trait; the in-memory [`MapLoader`] resolves purely
//! against the map and is what tests and single-unit drivers use.

use rustc_hash::FxHashMap;
use vesta_ir::{ModuleId, SourceLoc};

use crate::module::{flatten_module_path, Module, ModuleKind, PathSegment};

/// How much of a loaded module should become name-lookup reachable.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VisibilityRequest {
    /// Load without making anything visible.
    Hidden,
    /// Only macros become visible.
    MacrosVisible,
    /// Everything becomes visible.
    AllVisible,
}

/// Arena of module records, indexed by [`ModuleId`].
#[derive(Debug, Default)]
pub struct ModuleMap {
    modules: Vec<Module>,
    by_name: FxHashMap<String, ModuleId>,
}

impl ModuleMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, module: Module) -> ModuleId {
        let id = ModuleId::from_raw(u32::try_from(self.modules.len()).unwrap_or(u32::MAX));
        self.modules.push(module);
        id
    }

    /// Look up a module by full dotted name.
    ///
    /// Global module fragments are anonymous and never found here.
    pub fn find_module(&self, name: &str) -> Option<ModuleId> {
        self.by_name.get(name).copied()
    }

    /// Read a module record.
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    /// Mutate a module record.
    pub fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.modules[id.index()]
    }

    /// Iterate every record in creation order.
    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(i, m)| (ModuleId::from_raw(u32::try_from(i).unwrap_or(u32::MAX)), m))
    }

    /// Create the global module fragment for an interface unit.
    ///
    /// The fragment is anonymous: it is not registered for name lookup.
    pub fn create_global_fragment(&mut self, loc: SourceLoc) -> ModuleId {
        self.push(Module {
            name: "<global>".into(),
            parent: None,
            kind: ModuleKind::GlobalFragment,
            is_extern_c: false,
            definition_loc: loc,
            exports: Vec::new(),
            ast_file: None,
            global_fragment: None,
        })
    }

    /// Create a named module defined by an interface unit, adopting a
    /// pending global fragment if one exists.
    pub fn create_interface_unit(
        &mut self,
        loc: SourceLoc,
        name: impl Into<String>,
        global_fragment: Option<ModuleId>,
    ) -> ModuleId {
        let name = name.into();
        let id = self.push(Module {
            name: name.clone(),
            parent: None,
            kind: ModuleKind::InterfaceUnit,
            is_extern_c: false,
            definition_loc: loc,
            exports: Vec::new(),
            ast_file: None,
            global_fragment,
        });
        self.by_name.insert(name, id);
        id
    }

    /// Create a header module, optionally as a submodule.
    ///
    /// `leaf` is the module's own name; the full dotted name is
    /// derived from the parent chain and registered for lookup.
    pub fn create_header_module(
        &mut self,
        loc: SourceLoc,
        leaf: impl Into<String>,
        parent: Option<ModuleId>,
    ) -> ModuleId {
        let leaf = leaf.into();
        let name = match parent {
            Some(p) => format!("{}.{leaf}", self.module(p).name),
            None => leaf,
        };
        let id = self.push(Module {
            name: name.clone(),
            parent,
            kind: ModuleKind::HeaderModule,
            is_extern_c: false,
            definition_loc: loc,
            exports: Vec::new(),
            ast_file: None,
            global_fragment: None,
        });
        self.by_name.insert(name, id);
        id
    }

    /// Topmost ancestor of a module.
    pub fn top_level(&self, id: ModuleId) -> ModuleId {
        let mut cur = id;
        while let Some(parent) = self.module(cur).parent {
            cur = parent;
        }
        cur
    }

    /// Name of a module's topmost ancestor.
    pub fn top_level_name(&self, id: ModuleId) -> &str {
        &self.module(self.top_level(id)).name
    }

    /// Append to a module's re-export list.
    pub fn add_export(&mut self, id: ModuleId, exported: ModuleId) {
        self.module_mut(id).exports.push(exported);
    }
}

/// Loading seam between the sema core and module storage.
///
/// On-disk deserialization is out of scope here; implementations range
/// from the in-memory [`MapLoader`] to a full serialized-module reader.
pub trait ModuleLoader {
    /// Resolve a module path, loading it from storage if necessary.
    fn load_module(
        &mut self,
        map: &mut ModuleMap,
        loc: SourceLoc,
        path: &[PathSegment],
        visibility: VisibilityRequest,
        is_inclusion: bool,
    ) -> Option<ModuleId>;

    /// Make a module's names reachable, loading any parts of it that
    /// are only partially available.
    fn make_visible(
        &mut self,
        map: &mut ModuleMap,
        module: ModuleId,
        visibility: VisibilityRequest,
        loc: SourceLoc,
    );
}

/// Loader that resolves purely against the in-memory [`ModuleMap`].
#[derive(Debug, Default)]
pub struct MapLoader;

impl ModuleLoader for MapLoader {
    fn load_module(
        &mut self,
        map: &mut ModuleMap,
        _loc: SourceLoc,
        path: &[PathSegment],
        _visibility: VisibilityRequest,
        _is_inclusion: bool,
    ) -> Option<ModuleId> {
        map.find_module(&flatten_module_path(path))
    }

    fn make_visible(
        &mut self,
        _map: &mut ModuleMap,
        _module: ModuleId,
        _visibility: VisibilityRequest,
        _loc: SourceLoc,
    ) {
        // Everything in the map is already fully loaded.
    }
}
