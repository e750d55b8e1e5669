//! Module semantic analysis.
//!
//! [`ModuleSema`] is the state machine the parser drives as it sees
//! module directives: global-module-fragment introducers, module
//! declarations, imports, modular inclusions, legacy header-module
//! scopes, and export blocks. It owns the module scope stack, the
//! visibility set, and the ownership tags it stamps on declaration
//! contexts; modules themselves live in the [`ModuleMap`] and loading
//! goes through the [`ModuleLoader`] seam.
//!
//! Error handling follows the compiler-wide split: user problems are
//! diagnostics pushed to the queue with best-effort recovery, caller
//! contract breaches are [`Ice`] results.

use smallvec::smallvec;
use vesta_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use vesta_ir::{
    AstContext, Decl, DeclId, DeclKind, ExportDecl, ImportDecl, Linkage, ModuleDecl, ModuleId,
    OwnershipKind, SegmentLocs, SourceLoc, SourceMap,
};

use crate::ice::Ice;
use crate::module::{flatten_module_path, ModuleKind, PathSegment};
use crate::options::{CompilingMode, ModuleOptions};
use crate::registry::{ModuleLoader, ModuleMap, VisibilityRequest};
use crate::scope::ModuleScope;
use crate::visibility::{NamespaceVisibilityCache, VisibleModules};

/// What kind of unit a module declaration declares.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ModuleDeclKind {
    /// `export module M;` — defines the module's interface.
    Interface,
    /// `module M;` — provides definitions for an existing module.
    Implementation,
}

/// Module-system semantic analysis for one translation unit.
///
/// Strictly sequential: directives are processed in source order and
/// every operation either completes (possibly with diagnostics) or
/// reports an [`Ice`].
pub struct ModuleSema<L> {
    options: ModuleOptions,
    source_map: SourceMap,
    map: ModuleMap,
    loader: L,
    ast: AstContext,
    cur_context: DeclId,
    scopes: Vec<ModuleScope>,
    visible: VisibleModules,
    namespace_cache: NamespaceVisibilityCache,
    diagnostics: DiagnosticQueue,
    /// The one global module fragment this unit may create.
    global_fragment: Option<ModuleId>,
    speculative_depth: u32,
}

impl<L: ModuleLoader> ModuleSema<L> {
    /// Create the analysis state for one translation unit.
    pub fn new(options: ModuleOptions, source_map: SourceMap, loader: L) -> Self {
        let ast = AstContext::new();
        let cur_context = ast.translation_unit();
        ModuleSema {
            options,
            source_map,
            map: ModuleMap::new(),
            loader,
            ast,
            cur_context,
            scopes: Vec::new(),
            visible: VisibleModules::new(),
            namespace_cache: NamespaceVisibilityCache::new(),
            diagnostics: DiagnosticQueue::new(),
            global_fragment: None,
            speculative_depth: 0,
        }
    }

    // === Accessors ===

    /// The configuration this unit was created with.
    pub fn options(&self) -> &ModuleOptions {
        &self.options
    }

    /// The module registry.
    pub fn map(&self) -> &ModuleMap {
        &self.map
    }

    /// Mutable access to the module registry, for drivers that
    /// pre-populate it (header-module trees, loaded interfaces).
    pub fn map_mut(&mut self) -> &mut ModuleMap {
        &mut self.map
    }

    /// The declaration-context arena.
    pub fn ast(&self) -> &AstContext {
        &self.ast
    }

    /// The source map.
    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    /// Mutable access to the source map, for registering included
    /// files as the preprocessor opens them.
    pub fn source_map_mut(&mut self) -> &mut SourceMap {
        &mut self.source_map
    }

    /// The active module scope stack, bottom first.
    pub fn module_scopes(&self) -> &[ModuleScope] {
        &self.scopes
    }

    /// The module currently being compiled into, if any.
    pub fn current_module(&self) -> Option<ModuleId> {
        self.scopes.last().map(|s| s.module)
    }

    /// Whether a module's names are currently reachable.
    pub fn is_module_visible(&self, module: ModuleId) -> bool {
        self.visible.is_visible(module)
    }

    /// Where a module became visible, if it is visible.
    pub fn import_loc_of(&self, module: ModuleId) -> Option<SourceLoc> {
        self.visible.import_loc(module)
    }

    /// The live visibility set.
    pub fn visible_modules(&self) -> &VisibleModules {
        &self.visible
    }

    /// The namespace-visibility memoization used by name lookup.
    pub fn namespace_cache_mut(&mut self) -> &mut NamespaceVisibilityCache {
        &mut self.namespace_cache
    }

    /// Diagnostics emitted so far.
    pub fn diagnostics(&self) -> &DiagnosticQueue {
        &self.diagnostics
    }

    /// Drain emitted diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    // === Lexical declaration contexts ===

    /// The current lexical declaration context.
    pub fn current_decl_context(&self) -> DeclId {
        self.cur_context
    }

    /// Open a new lexical context under the current one.
    pub fn enter_decl_context(&mut self, kind: DeclKind) -> DeclId {
        let id = self.ast.add_decl(self.cur_context, kind);
        self.cur_context = id;
        id
    }

    /// Close the current lexical context.
    pub fn leave_decl_context(&mut self) {
        if let Some(parent) = self.ast.parent(self.cur_context) {
            self.cur_context = parent;
        }
    }

    /// Enter a speculative (deduction) context; implicit error-recovery
    /// imports are suppressed inside.
    pub fn enter_speculative_context(&mut self) {
        self.speculative_depth += 1;
    }

    /// Leave a speculative context.
    pub fn leave_speculative_context(&mut self) {
        self.speculative_depth = self.speculative_depth.saturating_sub(1);
    }

    // === Global module fragment ===

    /// Handle the start-of-global-module-fragment directive.
    ///
    /// Declarations in the fragment have no module linkage, but they
    /// are owned by the fragment for tracking purposes.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn act_on_global_module_fragment(&mut self, module_loc: SourceLoc) -> Result<(), Ice> {
        if let Some(top) = self.scopes.last_mut() {
            if self.map.module(top.module).kind == ModuleKind::GlobalFragment {
                // An explicit introducer after implicitly entering the
                // fragment is tolerated only in the combined dialect.
                if self.options.strict_modules && self.options.dual_dialect {
                    top.begin_loc = module_loc;
                    return Ok(());
                }
                return Err(Ice::GlobalFragmentReentered);
            }
        }
        if self.global_fragment.is_some() {
            return Err(Ice::GlobalFragmentReentered);
        }

        let global = self.map.create_global_fragment(module_loc);
        self.global_fragment = Some(global);
        tracing::debug!(?global, "entered global module fragment");

        self.scopes.push(ModuleScope {
            module: global,
            begin_loc: module_loc,
            is_interface: false,
            outer_visible: None,
        });
        self.visible.set_visible(global, module_loc);

        let tu = self.ast.translation_unit();
        self.ast
            .set_ownership(tu, OwnershipKind::Visible, Some(global));
        Ok(())
    }

    // === Module declarations ===

    /// Handle a module declaration.
    ///
    /// Returns the module declaration marker, or `None` when the
    /// declaration was abandoned (compilation continues either way).
    #[tracing::instrument(level = "debug", skip_all, fields(kind = ?kind))]
    pub fn act_on_module_decl(
        &mut self,
        start_loc: SourceLoc,
        module_loc: SourceLoc,
        kind: ModuleDeclKind,
        path: &[PathSegment],
        is_first_decl: bool,
    ) -> Result<Option<DeclId>, Ice> {
        let mut kind = kind;

        // An implementation unit requires that we are not compiling a
        // module of any kind; an interface unit requires that we are
        // not compiling a module map or header module.
        match self.options.compiling {
            CompilingMode::None => {}
            CompilingMode::Interface => {
                if kind == ModuleDeclKind::Implementation {
                    // Asked for an interface unit but the declaration
                    // reads as an implementation: the `export` is
                    // missing.
                    self.diagnostics.push(
                        Diagnostic::error(ErrorCode::E5008)
                            .with_message(
                                "module interface unit must be declared with `export module`",
                            )
                            .with_label(module_loc, "declared without `export`")
                            .with_fix("add the missing keyword", module_loc, "export "),
                    );
                    kind = ModuleDeclKind::Interface;
                }
            }
            CompilingMode::ModuleMap => {
                self.diagnostics.push(
                    Diagnostic::error(ErrorCode::E5001)
                        .with_message(
                            "module declaration is not permitted while compiling a module map",
                        )
                        .with_label(module_loc, "declared here"),
                );
                return Ok(None);
            }
            CompilingMode::HeaderModule => {
                self.diagnostics.push(
                    Diagnostic::error(ErrorCode::E5002)
                        .with_message(
                            "module declaration is not permitted while compiling a header module",
                        )
                        .with_label(module_loc, "declared here"),
                );
                return Ok(None);
            }
        }

        // Caller contract: at most the global fragment scope precedes
        // a module declaration.
        if self.scopes.len() > 1 {
            return Err(Ice::UnexpectedModuleScope {
                depth: self.scopes.len(),
            });
        }

        // Only one module declaration is permitted per source file.
        if let Some(top) = self.scopes.last() {
            if self.map.module(top.module).kind == ModuleKind::InterfaceUnit {
                let mut diag = Diagnostic::error(ErrorCode::E5003)
                    .with_message("translation unit contains a second module declaration")
                    .with_label(module_loc, "second module declaration");
                if let Some(prev) = self.visible.import_loc(top.module) {
                    diag = diag.with_secondary_label(prev, "previous module declaration was here");
                }
                self.diagnostics.push(diag);
                return Ok(None);
            }
        }

        // The global module fragment we are adopting, if any.
        let adopted_fragment = self
            .scopes
            .last()
            .filter(|top| self.map.module(top.module).kind == ModuleKind::GlobalFragment)
            .map(|top| top.module);

        // In the strict dialect the module declaration must be first
        // unless a global module fragment precedes it.
        if self.options.strict_modules && !is_first_decl && adopted_fragment.is_none() {
            let begin_loc = self.scopes.last().map_or_else(
                || self.source_map.start_of_file(self.source_map.main_file()),
                |top| top.begin_loc,
            );
            let mut diag = Diagnostic::error(ErrorCode::E5007)
                .with_message("module declaration must be the first declaration of the file")
                .with_label(module_loc, "declared here");
            if begin_loc.is_valid() {
                diag = diag
                    .with_secondary_label(begin_loc, "a global module fragment is missing here")
                    .with_fix("add a global module fragment introducer", begin_loc, "module;\n");
            }
            self.diagnostics.push(diag);
        }

        let name = flatten_module_path(path);
        let name_loc = path.first().map_or(module_loc, |segment| segment.loc);

        // A module name forced on the command line must agree.
        if !self.options.current_module.is_empty() && self.options.current_module != name {
            let expected = self.options.current_module.clone();
            self.diagnostics.push(
                Diagnostic::error(ErrorCode::E5006)
                    .with_message(format!(
                        "module name `{name}` does not match `{expected}` given on the command line",
                    ))
                    .with_label(name_loc, "declared here"),
            );
            return Ok(None);
        }
        self.options.current_module = name.clone();

        let module = match kind {
            ModuleDeclKind::Interface => {
                // A definition of this module must not already exist.
                if let Some(existing) = self.map.find_module(&name) {
                    let record = self.map.module(existing);
                    let mut diag = Diagnostic::error(ErrorCode::E5004)
                        .with_message(format!("redefinition of module `{name}`"))
                        .with_label(name_loc, "redefined here");
                    if record.definition_loc.is_valid() {
                        diag = diag.with_secondary_label(
                            record.definition_loc,
                            "previously defined here",
                        );
                    } else if let Some(file) = &record.ast_file {
                        diag = diag
                            .with_note(format!("previous definition was loaded from `{file}`"));
                    }
                    self.diagnostics.push(diag);
                    existing
                } else {
                    let id =
                        self.map
                            .create_interface_unit(module_loc, &name, adopted_fragment);
                    tracing::debug!(module = %name, "created interface unit");
                    id
                }
            }
            ModuleDeclKind::Implementation => {
                let flattened = [PathSegment::new(name.clone(), name_loc)];
                let loaded = self.loader.load_module(
                    &mut self.map,
                    module_loc,
                    &flattened,
                    VisibilityRequest::AllVisible,
                    false,
                );
                match loaded {
                    Some(id) => id,
                    None => {
                        self.diagnostics.push(
                            Diagnostic::error(ErrorCode::E5005)
                                .with_message(format!("module `{name}` is not defined"))
                                .with_label(module_loc, "no interface unit defines this module"),
                        );
                        // Empty placeholder interface for recovery.
                        self.map
                            .create_interface_unit(module_loc, &name, adopted_fragment)
                    }
                }
            }
        };

        let is_interface = kind != ModuleDeclKind::Implementation;
        if adopted_fragment.is_none() {
            let outer_visible = self.options.local_visibility.then(|| self.visible.take());
            self.scopes.push(ModuleScope {
                module,
                begin_loc: start_loc,
                is_interface,
                outer_visible,
            });
        } else if let Some(top) = self.scopes.last_mut() {
            // Switch the global fragment scope over to the named module.
            top.module = module;
            top.begin_loc = start_loc;
            top.is_interface = is_interface;
        }
        self.visible.set_visible(module, module_loc);

        // From now on every declaration has an owning module, but it is
        // module-private unless explicitly exported.
        let tu = self.ast.translation_unit();
        self.ast
            .set_ownership(tu, OwnershipKind::ModulePrivate, Some(module));

        let decl = self.ast.add_decl(
            self.cur_context,
            DeclKind::Module(ModuleDecl { module, module_loc }),
        );
        Ok(Some(decl))
    }

    // === Imports ===

    /// Handle an import directive with an unresolved path.
    ///
    /// Returns `None` when the path does not resolve to a module.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn act_on_module_import(
        &mut self,
        start_loc: SourceLoc,
        export_loc: SourceLoc,
        import_loc: SourceLoc,
        path: &[PathSegment],
    ) -> Option<DeclId> {
        // The compatibility dialect treats dots as name characters:
        // flatten the path into one segment.
        let flattened: Vec<PathSegment>;
        let path = if self.options.dual_dialect && !path.is_empty() {
            let loc = path.first().map_or(import_loc, |segment| segment.loc);
            flattened = vec![PathSegment::new(flatten_module_path(path), loc)];
            &flattened
        } else {
            path
        };

        let module = self.loader.load_module(
            &mut self.map,
            import_loc,
            path,
            VisibilityRequest::AllVisible,
            false,
        )?;
        Some(self.act_on_module_import_resolved(start_loc, export_loc, import_loc, module, path))
    }

    /// Handle an import whose module is already resolved.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn act_on_module_import_resolved(
        &mut self,
        start_loc: SourceLoc,
        export_loc: SourceLoc,
        import_loc: SourceLoc,
        module: ModuleId,
        path: &[PathSegment],
    ) -> DeclId {
        self.visible.set_visible(module, import_loc);

        self.check_module_import_context(module, import_loc, false);

        // Importing the module currently being compiled is an error; in
        // the compatibility dialect a same-name import outside a module
        // build is tolerated.
        if self.map.top_level_name(module) == self.options.current_module
            && (self.options.compiling.is_compiling_module() || !self.options.dual_dialect)
        {
            let name = self.map.module(module).name.clone();
            let current = self.options.current_module.clone();
            let diag = if self.options.compiling.is_compiling_module() {
                Diagnostic::error(ErrorCode::E5012)
                    .with_message(format!("module `{name}` cannot import itself"))
                    .with_label(import_loc, "self-import")
            } else {
                Diagnostic::error(ErrorCode::E5013)
                    .with_message(format!(
                        "cannot import module `{name}` in its own implementation unit `{current}`",
                    ))
                    .with_label(import_loc, "imported here")
            };
            self.diagnostics.push(diag);
        }

        // One location per written path segment, truncated to the
        // resolved module's ancestor chain so the lengths stay
        // consistent.
        let mut segment_locs = SegmentLocs::new();
        let mut chain = Some(module);
        for segment in path {
            let Some(link) = chain else { break };
            chain = self.map.module(link).parent;
            segment_locs.push(segment.loc);
        }
        if path.is_empty() {
            // Header import: pad with placeholder locations instead.
            while let Some(link) = chain {
                segment_locs.push(SourceLoc::INVALID);
                chain = self.map.module(link).parent;
            }
        }

        let exported = export_loc.is_valid() || self.ast.is_exported(self.cur_context);
        let decl = self.ast.add_decl(
            self.cur_context,
            DeclKind::Import(ImportDecl {
                module,
                start_loc,
                segment_locs,
                implicit: false,
                exported,
            }),
        );

        // Sequence initialization of the imported module before that of
        // the current module, if any.
        if let Some(current) = self.current_module() {
            self.ast.add_module_initializer(current, decl);
        }

        // Re-export if requested and legal here.
        let in_interface = self.scopes.last().is_some_and(|top| top.is_interface);
        if in_interface {
            if exported {
                if let Some(current) = self.current_module() {
                    self.map.add_export(current, module);
                }
            }
        } else if export_loc.is_valid() {
            self.diagnostics.push(
                Diagnostic::error(ErrorCode::E5014)
                    .with_message("`export` of an import is only permitted in a module interface")
                    .with_label(export_loc, "`export` used here"),
            );
        }

        decl
    }

    // === Inclusion-triggered visibility ===

    /// Handle a textual inclusion of a modular header.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn act_on_module_include(&mut self, directive_loc: SourceLoc, module: ModuleId) {
        self.check_module_import_context(module, directive_loc, true);
        self.build_module_include(directive_loc, module);
    }

    fn build_module_include(&mut self, directive_loc: SourceLoc, module: ModuleId) {
        // Includes in the aggregation buffer used to build a module
        // from headers are plumbing, not user-visible imports.
        let in_module_includes =
            self.options.building_module && self.source_map.is_in_main_file(directive_loc);

        if !in_module_includes {
            let tu = self.ast.translation_unit();
            let import = self.ast.add_decl(
                tu,
                DeclKind::Import(ImportDecl {
                    module,
                    start_loc: directive_loc,
                    segment_locs: smallvec![directive_loc],
                    implicit: true,
                    exported: false,
                }),
            );
            if let Some(current) = self.current_module() {
                self.ast.add_module_initializer(current, import);
            }
        }

        self.loader.make_visible(
            &mut self.map,
            module,
            VisibilityRequest::AllVisible,
            directive_loc,
        );
        self.visible.set_visible(module, directive_loc);
    }

    // === Legacy header-module scopes ===

    /// Enter the scope of a textually-included header module.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn act_on_module_begin(&mut self, directive_loc: SourceLoc, module: ModuleId) {
        self.check_module_import_context(module, directive_loc, true);

        let outer_visible = self.options.local_visibility.then(|| self.visible.take());
        self.scopes.push(ModuleScope {
            module,
            begin_loc: directive_loc,
            is_interface: false,
            outer_visible,
        });
        self.visible.set_visible(module, directive_loc);
        tracing::debug!(module = %self.map.module(module).name, "entered header module scope");

        // The enclosing contexts are now part of this module.
        if self.options.track_owning_module {
            let ownership = if self.options.local_visibility {
                OwnershipKind::VisibleWhenImported
            } else {
                OwnershipKind::Visible
            };
            let mut dc = Some(self.cur_context);
            while let Some(id) = dc {
                self.ast.set_ownership(id, ownership, Some(module));
                dc = self.ast.parent(id);
            }
        }
    }

    /// Leave the scope of a textually-included header module.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn act_on_module_end(&mut self, eom_loc: SourceLoc, module: ModuleId) -> Result<(), Ice> {
        match self.scopes.last() {
            Some(top) if top.module == module => {}
            top => {
                return Err(Ice::MismatchedScopePop {
                    expected: self.map.module(module).name.clone(),
                    found: top.map_or_else(
                        || "<none>".into(),
                        |scope| self.map.module(scope.module).name.clone(),
                    ),
                });
            }
        }
        let Some(mut scope) = self.scopes.pop() else {
            // Checked non-empty above.
            return Err(Ice::MismatchedScopePop {
                expected: self.map.module(module).name.clone(),
                found: "<none>".into(),
            });
        };

        if self.options.local_visibility {
            self.visible = scope.outer_visible.take().unwrap_or_default();
            // Leaving a module hides namespace names, so memoized
            // visibility answers are out of date.
            self.namespace_cache.clear();
        }
        tracing::debug!(module = %self.map.module(module).name, "left header module scope");

        // Record the inclusion as an implicit import, triggered either
        // by the end-of-module directive or by the end of the included
        // file.
        let directive_loc = match eom_loc.file() {
            Some(file) if eom_loc == self.source_map.end_of_file(file) => {
                if file == self.source_map.main_file() {
                    return Err(Ice::SubmoduleEndsAtMainFile {
                        module: self.map.module(module).name.clone(),
                    });
                }
                self.source_map.include_loc(file)
            }
            _ => eom_loc,
        };
        self.build_module_include(directive_loc, module);

        // Any further declarations belong to whatever module we
        // returned to, possibly none.
        if self.options.track_owning_module {
            let current = self.current_module();
            let mut dc = Some(self.cur_context);
            while let Some(id) = dc {
                let decl = self.ast.decl_mut(id);
                decl.owning_module = current;
                if current.is_none() {
                    decl.ownership = OwnershipKind::Unowned;
                }
                dc = self.ast.parent(id);
            }
        }
        Ok(())
    }

    // === Error recovery ===

    /// Synthesize an import to recover from a missing-visibility error.
    ///
    /// Skipped in speculative contexts, when the recovery feature is
    /// disabled, or when the module is already visible.
    pub fn create_implicit_import_for_recovery(&mut self, loc: SourceLoc, module: ModuleId) {
        if self.speculative_depth > 0
            || !self.options.error_recovery_imports
            || self.visible.is_visible(module)
        {
            return;
        }

        let tu = self.ast.translation_unit();
        self.ast.add_decl(
            tu,
            DeclKind::Import(ImportDecl {
                module,
                start_loc: loc,
                segment_locs: smallvec![loc],
                implicit: true,
                exported: false,
            }),
        );

        self.loader
            .make_visible(&mut self.map, module, VisibilityRequest::AllVisible, loc);
        self.visible.set_visible(module, loc);
    }

    // === Export blocks ===

    /// Handle the start of an export block, including the `{` if one
    /// was written.
    pub fn act_on_export_begin(&mut self, export_loc: SourceLoc, lbrace_loc: SourceLoc) -> DeclId {
        // An export-declaration shall appear in the purview of a module
        // interface.
        let in_interface = self.scopes.last().is_some_and(|top| top.is_interface);
        if !in_interface {
            self.diagnostics.push(
                Diagnostic::error(ErrorCode::E5014)
                    .with_message("`export` is only permitted in a module interface")
                    .with_label(export_loc, "`export` used here"),
            );
        }

        // An export-declaration cannot appear within another one.
        if self.ast.is_exported(self.cur_context) {
            self.diagnostics.push(
                Diagnostic::error(ErrorCode::E5015)
                    .with_message("`export` cannot appear within another `export`")
                    .with_label(export_loc, "nested `export`"),
            );
        }

        let decl = self.ast.add_decl(
            self.cur_context,
            DeclKind::Export(ExportDecl {
                export_loc,
                lbrace_loc,
                rbrace_loc: SourceLoc::INVALID,
            }),
        );
        self.cur_context = decl;
        self.ast
            .set_ownership(decl, OwnershipKind::VisibleWhenImported, self.current_module());
        decl
    }

    /// Complete an export block.
    pub fn act_on_export_end(
        &mut self,
        decl: DeclId,
        rbrace_loc: SourceLoc,
    ) -> Result<DeclId, Ice> {
        let parent = self.ast.parent(decl);
        let DeclKind::Export(export) = &mut self.ast.decl_mut(decl).kind else {
            return Err(Ice::NotAnExportScope);
        };
        if rbrace_loc.is_valid() {
            export.rbrace_loc = rbrace_loc;
        }
        self.cur_context = parent.unwrap_or_else(|| self.ast.translation_unit());
        Ok(decl)
    }

    // === Shared context validation ===

    /// Validate that an import or modular inclusion occurs at
    /// translation-unit scope, unwrapping linkage-specification and
    /// export contexts on the way up.
    fn check_module_import_context(
        &mut self,
        module: ModuleId,
        import_loc: SourceLoc,
        from_inclusion: bool,
    ) {
        let mut extern_c_loc = SourceLoc::INVALID;
        let mut dc = self.cur_context;
        loop {
            match &self.ast.decl(dc).kind {
                DeclKind::LinkageSpec { linkage, begin_loc } => {
                    if *linkage == Linkage::C && !extern_c_loc.is_valid() {
                        extern_c_loc = *begin_loc;
                    }
                }
                DeclKind::Export(_) => {}
                _ => break,
            }
            match self.ast.parent(dc) {
                Some(parent) => dc = parent,
                None => break,
            }
        }

        if !matches!(self.ast.decl(dc).kind, DeclKind::TranslationUnit) {
            let name = self.map.module(module).name.clone();
            // An include of an already-visible module is harmless
            // plumbing; anything else is a hard error.
            let mut diag = if from_inclusion && self.visible.is_visible(module) {
                Diagnostic::warning(ErrorCode::E5010).with_message(format!(
                    "redundant include of module `{name}` appears below translation-unit scope",
                ))
            } else {
                Diagnostic::error(ErrorCode::E5009).with_message(format!(
                    "import of module `{name}` must appear at translation-unit scope",
                ))
            };
            diag = diag.with_label(import_loc, "not at translation-unit scope");
            if let Some(begin) = context_begin_loc(self.ast.decl(dc)) {
                diag = diag.with_secondary_label(begin, "enclosing scope begins here");
            }
            self.diagnostics.push(diag);
        } else if extern_c_loc.is_valid() && !self.map.module(module).is_extern_c {
            let name = self.map.module(module).name.clone();
            self.diagnostics.push(
                Diagnostic::warning(ErrorCode::E5011)
                    .with_message(format!(
                        "import of module `{name}` appears within `extern \"C\"`",
                    ))
                    .with_label(import_loc, "imported here")
                    .with_secondary_label(extern_c_loc, "`extern \"C\"` begins here"),
            );
        }
    }
}

/// Where a declaration context begins, for secondary labels.
fn context_begin_loc(decl: &Decl) -> Option<SourceLoc> {
    match &decl.kind {
        DeclKind::TranslationUnit => None,
        DeclKind::LinkageSpec { begin_loc, .. } | DeclKind::Other { begin_loc } => Some(*begin_loc),
        DeclKind::Export(export) => Some(export.export_loc),
        DeclKind::Import(import) => import.segment_locs.first().copied(),
        DeclKind::Module(module) => Some(module.module_loc),
    }
    .filter(|loc| loc.is_valid())
}
