//! Module identity handle.

use std::fmt;

/// A 32-bit index into the module registry.
///
/// Modules are compared by index equality; the registry owns the
/// records. The sema core never constructs module records directly,
/// it only threads these handles around.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ModuleId(u32);

impl ModuleId {
    /// Create from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        ModuleId(raw)
    }

    /// Get the raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into a registry-owned slice.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_id_equality() {
        assert_eq!(ModuleId::from_raw(4), ModuleId::from_raw(4));
        assert_ne!(ModuleId::from_raw(4), ModuleId::from_raw(5));
        assert_eq!(ModuleId::from_raw(9).index(), 9);
    }
}
