//! The set of currently visible modules.

use rustc_hash::FxHashMap;
use vesta_ir::{ModuleId, SourceLoc};

/// Mapping from visible module to where it first became visible.
///
/// Scope isolation works by whole-set snapshots: entering an isolated
/// scope takes the live set (leaving it empty), and leaving the scope
/// moves the snapshot back verbatim. Nothing is ever merged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibleModules {
    visible: FxHashMap<ModuleId, SourceLoc>,
}

impl VisibleModules {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a module became visible at a location.
    ///
    /// Idempotent: re-setting keeps the first recorded location.
    pub fn set_visible(&mut self, module: ModuleId, loc: SourceLoc) {
        self.visible.entry(module).or_insert(loc);
    }

    /// Whether a module is visible.
    pub fn is_visible(&self, module: ModuleId) -> bool {
        self.visible.contains_key(&module)
    }

    /// Where a module became visible, if it is visible.
    pub fn import_loc(&self, module: ModuleId) -> Option<SourceLoc> {
        self.visible.get(&module).copied()
    }

    /// Number of visible modules.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Whether no module is visible.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Move the live set out, leaving this one empty.
    ///
    /// Used when entering a visibility-isolated scope.
    pub fn take(&mut self) -> VisibleModules {
        std::mem::take(self)
    }
}

/// Memoized namespace-visibility answers for name lookup.
///
/// Leaving a module scope can hide names that lookup already resolved,
/// so the cache must be cleared whenever a module scope is popped.
#[derive(Debug, Default)]
pub struct NamespaceVisibilityCache {
    cache: FxHashMap<String, bool>,
}

impl NamespaceVisibilityCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoized answer for a namespace, if any.
    pub fn lookup(&self, namespace: &str) -> Option<bool> {
        self.cache.get(namespace).copied()
    }

    /// Memoize an answer for a namespace.
    pub fn record(&mut self, namespace: impl Into<String>, visible: bool) {
        self.cache.insert(namespace.into(), visible);
    }

    /// Drop every memoized answer.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Whether the cache holds no answers.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesta_ir::FileId;

    fn loc(offset: u32) -> SourceLoc {
        SourceLoc::new(FileId::from_raw(0), offset)
    }

    #[test]
    fn set_visible_is_idempotent() {
        let mut set = VisibleModules::new();
        let m = ModuleId::from_raw(0);
        set.set_visible(m, loc(10));
        set.set_visible(m, loc(99));
        assert_eq!(set.import_loc(m), Some(loc(10)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn take_leaves_empty() {
        let mut set = VisibleModules::new();
        set.set_visible(ModuleId::from_raw(0), loc(1));
        let snapshot = set.take();
        assert!(set.is_empty());
        assert!(snapshot.is_visible(ModuleId::from_raw(0)));
    }

    #[test]
    fn invisible_module_has_no_loc() {
        let set = VisibleModules::new();
        assert!(!set.is_visible(ModuleId::from_raw(7)));
        assert_eq!(set.import_loc(ModuleId::from_raw(7)), None);
    }

    #[test]
    fn namespace_cache_clears() {
        let mut cache = NamespaceVisibilityCache::new();
        cache.record("std", true);
        assert_eq!(cache.lookup("std"), Some(true));
        cache.clear();
        assert_eq!(cache.lookup("std"), None);
        assert!(cache.is_empty());
    }
}
