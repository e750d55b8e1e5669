//! Declaration-context arena.
//!
//! Module analysis sees the AST as a tree of lexical declaration
//! contexts: the translation-unit root, linkage-specification blocks,
//! export blocks, and whatever other scopes the parser opened. Each
//! context carries a module ownership tag saying under what condition
//! its declarations become visible outside their owning module.
//!
//! Context kinds are a closed tagged union; consumers match on
//! [`DeclKind`] and walk `parent` links. There is no open-ended
//! dispatch over context types.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::loc::SourceLoc;
use crate::module_id::ModuleId;

/// Per-segment location storage for import paths.
///
/// Two segments cover the overwhelmingly common `import a.b` shape
/// without spilling to the heap.
pub type SegmentLocs = SmallVec<[SourceLoc; 2]>;

/// Handle for a declaration in the [`AstContext`] arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct DeclId(u32);

impl DeclId {
    /// Create from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        DeclId(raw)
    }

    /// Get the raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Language of a linkage-specification block.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Linkage {
    /// `extern "C"`.
    C,
    /// `extern "C++"` (the default language linkage).
    Cxx,
}

/// Under what condition a declaration is visible outside its owning
/// module.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum OwnershipKind {
    /// Not owned by any module.
    #[default]
    Unowned,
    /// Owned, never visible to importers unless exported.
    ModulePrivate,
    /// Owned, always visible.
    Visible,
    /// Owned, visible only when the owning module is imported.
    VisibleWhenImported,
}

/// Payload of an import declaration.
///
/// Created once per import or modular-inclusion action and never
/// mutated afterwards.
#[derive(Clone, Debug)]
pub struct ImportDecl {
    /// The imported module.
    pub module: ModuleId,
    /// Where the import construct begins (the directive location for
    /// synthesized imports).
    pub start_loc: SourceLoc,
    /// One location per written path segment, innermost-first, padded
    /// with `SourceLoc::INVALID` when the import had no written path.
    pub segment_locs: SegmentLocs,
    /// Whether this import was synthesized (textual inclusion, error
    /// recovery) rather than written by the user.
    pub implicit: bool,
    /// Whether the import carried export intent.
    pub exported: bool,
}

/// Payload of an export block.
#[derive(Clone, Debug)]
pub struct ExportDecl {
    /// Location of the `export` keyword.
    pub export_loc: SourceLoc,
    /// Location of the opening brace, when braced.
    pub lbrace_loc: SourceLoc,
    /// Location of the closing brace, once seen.
    pub rbrace_loc: SourceLoc,
}

/// Payload of a module declaration marker.
#[derive(Clone, Debug)]
pub struct ModuleDecl {
    /// The declared (or reused) module.
    pub module: ModuleId,
    /// Location of the module name.
    pub module_loc: SourceLoc,
}

/// Discriminant and payload of one declaration context.
#[derive(Clone, Debug)]
pub enum DeclKind {
    /// The translation-unit root. Exactly one per arena.
    TranslationUnit,
    /// A linkage-specification block.
    LinkageSpec {
        /// Which language linkage the block declares.
        linkage: Linkage,
        /// Location of the `extern` keyword.
        begin_loc: SourceLoc,
    },
    /// An `export { ... }` block.
    Export(ExportDecl),
    /// An import declaration.
    Import(ImportDecl),
    /// A module declaration marker.
    Module(ModuleDecl),
    /// Any other lexical scope (namespace, function body, ...).
    Other {
        /// Location where the scope begins.
        begin_loc: SourceLoc,
    },
}

/// One declaration context.
#[derive(Clone, Debug)]
pub struct Decl {
    /// Discriminant and payload.
    pub kind: DeclKind,
    /// Lexical parent; `None` only for the translation-unit root.
    pub parent: Option<DeclId>,
    /// Module ownership tag.
    pub ownership: OwnershipKind,
    /// Owning module, when owned.
    pub owning_module: Option<ModuleId>,
    children: Vec<DeclId>,
}

/// Arena of declaration contexts plus module-initializer sequencing.
///
/// The arena owns every declaration module analysis creates (imports,
/// export blocks, module markers) and the ownership tags it stamps on
/// enclosing contexts. Initializer sequencing records which imports
/// must be initialized before a module's own initializer runs.
#[derive(Debug, Default)]
pub struct AstContext {
    decls: Vec<Decl>,
    initializers: FxHashMap<ModuleId, Vec<DeclId>>,
}

impl AstContext {
    /// Create an arena holding just the translation-unit root.
    pub fn new() -> Self {
        let mut ctx = AstContext {
            decls: Vec::new(),
            initializers: FxHashMap::default(),
        };
        ctx.decls.push(Decl {
            kind: DeclKind::TranslationUnit,
            parent: None,
            ownership: OwnershipKind::Unowned,
            owning_module: None,
            children: Vec::new(),
        });
        ctx
    }

    /// The translation-unit root.
    pub fn translation_unit(&self) -> DeclId {
        DeclId(0)
    }

    /// Read a declaration.
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.0 as usize]
    }

    /// Mutate a declaration.
    pub fn decl_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.0 as usize]
    }

    /// Append a new declaration under a lexical parent.
    pub fn add_decl(&mut self, parent: DeclId, kind: DeclKind) -> DeclId {
        let id = DeclId(u32::try_from(self.decls.len()).unwrap_or(u32::MAX));
        self.decls.push(Decl {
            kind,
            parent: Some(parent),
            ownership: OwnershipKind::Unowned,
            owning_module: None,
            children: Vec::new(),
        });
        self.decls[parent.0 as usize].children.push(id);
        id
    }

    /// Lexical parent of a declaration.
    pub fn parent(&self, id: DeclId) -> Option<DeclId> {
        self.decl(id).parent
    }

    /// Children added under a declaration, in insertion order.
    pub fn children(&self, id: DeclId) -> &[DeclId] {
        &self.decl(id).children
    }

    /// Whether a declaration lies within an export block (itself
    /// included).
    pub fn is_exported(&self, id: DeclId) -> bool {
        let mut cur = Some(id);
        while let Some(d) = cur {
            if matches!(self.decl(d).kind, DeclKind::Export(_)) {
                return true;
            }
            cur = self.decl(d).parent;
        }
        false
    }

    /// Stamp a declaration's ownership tag and owning module together.
    ///
    /// The two fields are only ever updated in lockstep.
    pub fn set_ownership(
        &mut self,
        id: DeclId,
        ownership: OwnershipKind,
        owning_module: Option<ModuleId>,
    ) {
        let decl = self.decl_mut(id);
        decl.ownership = ownership;
        decl.owning_module = owning_module;
    }

    /// Sequence `import` before `module`'s own initializer.
    pub fn add_module_initializer(&mut self, module: ModuleId, import: DeclId) {
        self.initializers.entry(module).or_default().push(import);
    }

    /// Imports sequenced before a module's initializer, in order.
    pub fn module_initializers(&self, module: ModuleId) -> &[DeclId] {
        self.initializers
            .get(&module)
            .map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(offset: u32) -> SourceLoc {
        SourceLoc::new(crate::FileId::from_raw(0), offset)
    }

    #[test]
    fn arena_starts_with_translation_unit() {
        let ctx = AstContext::new();
        let tu = ctx.translation_unit();
        assert!(matches!(ctx.decl(tu).kind, DeclKind::TranslationUnit));
        assert_eq!(ctx.parent(tu), None);
        assert_eq!(ctx.decl(tu).ownership, OwnershipKind::Unowned);
    }

    #[test]
    fn add_decl_links_parent_and_child() {
        let mut ctx = AstContext::new();
        let tu = ctx.translation_unit();
        let ns = ctx.add_decl(tu, DeclKind::Other { begin_loc: loc(0) });
        assert_eq!(ctx.parent(ns), Some(tu));
        assert_eq!(ctx.children(tu), &[ns]);
    }

    #[test]
    fn is_exported_walks_parents() {
        let mut ctx = AstContext::new();
        let tu = ctx.translation_unit();
        let export = ctx.add_decl(
            tu,
            DeclKind::Export(ExportDecl {
                export_loc: loc(0),
                lbrace_loc: SourceLoc::INVALID,
                rbrace_loc: SourceLoc::INVALID,
            }),
        );
        let inner = ctx.add_decl(export, DeclKind::Other { begin_loc: loc(5) });
        assert!(ctx.is_exported(export));
        assert!(ctx.is_exported(inner));
        assert!(!ctx.is_exported(tu));
    }

    #[test]
    fn ownership_updates_in_lockstep() {
        let mut ctx = AstContext::new();
        let tu = ctx.translation_unit();
        let m = ModuleId::from_raw(1);
        ctx.set_ownership(tu, OwnershipKind::ModulePrivate, Some(m));
        assert_eq!(ctx.decl(tu).ownership, OwnershipKind::ModulePrivate);
        assert_eq!(ctx.decl(tu).owning_module, Some(m));
        ctx.set_ownership(tu, OwnershipKind::Unowned, None);
        assert_eq!(ctx.decl(tu).owning_module, None);
    }

    #[test]
    fn initializer_sequencing_is_ordered() {
        let mut ctx = AstContext::new();
        let tu = ctx.translation_unit();
        let m = ModuleId::from_raw(0);
        let import_a = ctx.add_decl(
            tu,
            DeclKind::Import(ImportDecl {
                module: ModuleId::from_raw(1),
                start_loc: loc(1),
                segment_locs: SegmentLocs::new(),
                implicit: false,
                exported: false,
            }),
        );
        let import_b = ctx.add_decl(
            tu,
            DeclKind::Import(ImportDecl {
                module: ModuleId::from_raw(2),
                start_loc: loc(2),
                segment_locs: SegmentLocs::new(),
                implicit: true,
                exported: false,
            }),
        );
        ctx.add_module_initializer(m, import_a);
        ctx.add_module_initializer(m, import_b);
        assert_eq!(ctx.module_initializers(m), &[import_a, import_b]);
        assert!(ctx.module_initializers(ModuleId::from_raw(9)).is_empty());
    }
}
