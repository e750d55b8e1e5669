//! Property-based tests for module visibility and import bookkeeping.
//!
//! These use proptest to drive the scope stack and visibility set with
//! random event sequences and verify:
//! 1. Scope isolation: popping a header-module scope restores exactly
//!    the snapshot taken on entry (plus the implicit include of the
//!    popped module), regardless of what became visible inside.
//! 2. First-wins visibility locations under arbitrary import orders.
//! 3. Per-segment location counts for arbitrary path/ancestry shapes.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use vesta_ir::{DeclKind, FileId, ModuleId, SourceLoc, SourceMap};
use vesta_sema::{
    flatten_module_path, MapLoader, ModuleDeclKind, ModuleOptions, ModuleSema, PathSegment,
    VisibleModules,
};

fn loc(offset: u32) -> SourceLoc {
    SourceLoc::new(FileId::from_raw(0), offset)
}

fn sema_with(options: ModuleOptions) -> ModuleSema<MapLoader> {
    ModuleSema::new(options, SourceMap::new("main.vst", 10_000), MapLoader)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Leaving an isolated scope restores the entry snapshot verbatim;
    /// nothing made visible inside the scope leaks out.
    #[test]
    fn prop_scope_pop_restores_snapshot(
        before in prop::collection::vec(0u32..20, 0..8),
        inside in prop::collection::vec(0u32..20, 0..8),
    ) {
        let mut s = sema_with(ModuleOptions {
            local_visibility: true,
            ..ModuleOptions::default()
        });
        let pool: Vec<ModuleId> = (0..20)
            .map(|i| s.map_mut().create_header_module(loc(i), format!("m{i}"), None))
            .collect();
        let scope_mod = s.map_mut().create_header_module(loc(90), "scope", None);

        for (i, &idx) in before.iter().enumerate() {
            let i = u32::try_from(i).unwrap();
            s.act_on_module_include(loc(100 + i), pool[idx as usize]);
        }
        let mut expected = s.visible_modules().clone();

        s.act_on_module_begin(loc(500), scope_mod);
        for (i, &idx) in inside.iter().enumerate() {
            let i = u32::try_from(i).unwrap();
            s.act_on_module_include(loc(600 + i), pool[idx as usize]);
        }
        prop_assert_eq!(s.act_on_module_end(loc(900), scope_mod), Ok(()));

        // The only addition over the snapshot is the implicit include
        // of the popped module itself.
        expected.set_visible(scope_mod, loc(900));
        prop_assert_eq!(s.visible_modules(), &expected);
    }

    /// Re-importing a module never moves its first-visible location.
    #[test]
    fn prop_first_visibility_location_wins(
        events in prop::collection::vec((0u32..10, 1u32..1000), 1..30),
    ) {
        let mut set = VisibleModules::new();
        let mut expected: Vec<Option<SourceLoc>> = vec![None; 10];
        for &(module, offset) in &events {
            set.set_visible(ModuleId::from_raw(module), loc(offset));
            if expected[module as usize].is_none() {
                expected[module as usize] = Some(loc(offset));
            }
        }
        for (i, first) in expected.iter().enumerate() {
            let module = ModuleId::from_raw(u32::try_from(i).unwrap());
            prop_assert_eq!(set.import_loc(module), *first);
            prop_assert_eq!(set.is_visible(module), first.is_some());
        }
    }

    /// An import records one location per written segment, truncated to
    /// the module's ancestor chain; a pathless import records one
    /// placeholder per ancestor instead.
    #[test]
    fn prop_segment_loc_count(path_len in 0usize..6, depth in 1usize..5) {
        let mut s = sema_with(ModuleOptions::default());
        let mut module = s.map_mut().create_header_module(loc(0), "a0", None);
        for i in 1..depth {
            let i = u32::try_from(i).unwrap();
            module = s
                .map_mut()
                .create_header_module(loc(i), format!("a{i}"), Some(module));
        }
        let path: Vec<PathSegment> = (0..path_len)
            .map(|i| {
                let i = u32::try_from(i).unwrap();
                PathSegment::new(format!("a{i}"), loc(10 + i))
            })
            .collect();

        let decl =
            s.act_on_module_import_resolved(loc(50), SourceLoc::INVALID, loc(52), module, &path);
        let DeclKind::Import(import) = &s.ast().decl(decl).kind else {
            return Err(TestCaseError::fail("expected an import declaration"));
        };
        let expected = if path_len == 0 {
            depth
        } else {
            path_len.min(depth)
        };
        prop_assert_eq!(import.segment_locs.len(), expected);
        if path_len == 0 {
            prop_assert!(import.segment_locs.iter().all(|l| !l.is_valid()));
        } else {
            prop_assert!(import.segment_locs.iter().all(|l| l.is_valid()));
        }
    }

    /// A declared module's registered name is the dot-joined path, and
    /// the name is findable afterwards.
    #[test]
    fn prop_module_decl_registers_flattened_name(
        names in prop::collection::vec("[a-z][a-z0-9]{0,6}", 1..5),
    ) {
        let mut s = sema_with(ModuleOptions::default());
        let path: Vec<PathSegment> = names
            .iter()
            .enumerate()
            .map(|(i, name)| PathSegment::new(name.clone(), loc(u32::try_from(i).unwrap())))
            .collect();
        let decl = s.act_on_module_decl(loc(0), loc(1), ModuleDeclKind::Interface, &path, true);
        prop_assert!(matches!(decl, Ok(Some(_))));

        let joined = names.join(".");
        prop_assert_eq!(&flatten_module_path(&path), &joined);
        prop_assert!(s.map().find_module(&joined).is_some());
        prop_assert_eq!(&s.options().current_module, &joined);
    }
}
