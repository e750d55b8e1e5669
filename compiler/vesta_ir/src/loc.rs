//! Compact source locations.
//!
//! A `SourceLoc` is a file handle plus a byte offset, 8 bytes total.
//! Locations can be invalid: directives synthesized by the compiler
//! (implicit imports from textual inclusion, padding for dropped path
//! segments) carry `SourceLoc::INVALID`.

use std::fmt;

/// Handle for a file registered in the [`crate::SourceMap`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct FileId(u32);

impl FileId {
    /// Create from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        FileId(raw)
    }

    /// Get the raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// A position in a registered source file.
///
/// Layout: 8 bytes total
/// - file: u32 - raw `FileId`
/// - offset: u32 - byte offset from file start
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(C)]
pub struct SourceLoc {
    file: u32,
    offset: u32,
}

impl SourceLoc {
    /// Sentinel for "no location".
    pub const INVALID: SourceLoc = SourceLoc {
        file: u32::MAX,
        offset: u32::MAX,
    };

    /// Create a location in a file.
    #[inline]
    pub const fn new(file: FileId, offset: u32) -> Self {
        SourceLoc {
            file: file.0,
            offset,
        }
    }

    /// Whether this is a real location (not the sentinel).
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.file != u32::MAX
    }

    /// The containing file.
    ///
    /// Returns `None` for the invalid sentinel.
    #[inline]
    pub const fn file(self) -> Option<FileId> {
        if self.is_valid() {
            Some(FileId(self.file))
        } else {
            None
        }
    }

    /// Byte offset from the start of the containing file.
    #[inline]
    pub const fn offset(self) -> u32 {
        self.offset
    }
}

impl fmt::Debug for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "file{}:{}", self.file, self.offset)
        } else {
            write!(f, "<invalid loc>")
        }
    }
}

// Size assertion to prevent accidental regressions
const _: () = assert!(std::mem::size_of::<SourceLoc>() == 8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_loc_roundtrips() {
        let loc = SourceLoc::new(FileId::from_raw(3), 42);
        assert!(loc.is_valid());
        assert_eq!(loc.file(), Some(FileId::from_raw(3)));
        assert_eq!(loc.offset(), 42);
    }

    #[test]
    fn invalid_sentinel() {
        assert!(!SourceLoc::INVALID.is_valid());
        assert_eq!(SourceLoc::INVALID.file(), None);
    }

    #[test]
    fn loc_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(SourceLoc::new(FileId::from_raw(0), 1));
        set.insert(SourceLoc::new(FileId::from_raw(0), 1)); // duplicate
        set.insert(SourceLoc::new(FileId::from_raw(0), 2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn loc_debug_format() {
        let loc = SourceLoc::new(FileId::from_raw(1), 7);
        assert_eq!(format!("{loc:?}"), "file1:7");
        assert_eq!(format!("{:?}", SourceLoc::INVALID), "<invalid loc>");
    }
}
