//! File-level location queries.
//!
//! Module analysis needs exactly three facts about files: where a file
//! ends, where it was included from, and which file is the main one for
//! the translation unit. Lexing and line/column mapping live elsewhere.

use crate::loc::{FileId, SourceLoc};

/// One registered source file.
#[derive(Clone, Debug)]
pub struct SourceFile {
    /// Path or display name.
    pub name: String,
    /// Length in bytes.
    pub len: u32,
    /// Location of the directive that included this file, or
    /// `SourceLoc::INVALID` for the main file.
    pub include_loc: SourceLoc,
}

/// Registry of the translation unit's files.
///
/// The first registered file is the main file.
#[derive(Clone, Debug)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    /// Create a source map with the main file registered.
    pub fn new(main_name: impl Into<String>, main_len: u32) -> Self {
        SourceMap {
            files: vec![SourceFile {
                name: main_name.into(),
                len: main_len,
                include_loc: SourceLoc::INVALID,
            }],
        }
    }

    /// Register an included file, recording the inclusion site.
    pub fn add_file(
        &mut self,
        name: impl Into<String>,
        len: u32,
        include_loc: SourceLoc,
    ) -> FileId {
        let id = FileId::from_raw(u32::try_from(self.files.len()).unwrap_or(u32::MAX));
        self.files.push(SourceFile {
            name: name.into(),
            len,
            include_loc,
        });
        id
    }

    /// The translation unit's main file.
    pub fn main_file(&self) -> FileId {
        FileId::from_raw(0)
    }

    /// Look up a registered file.
    pub fn file(&self, id: FileId) -> &SourceFile {
        &self.files[id.raw() as usize]
    }

    /// Location of the first byte of a file.
    pub fn start_of_file(&self, id: FileId) -> SourceLoc {
        SourceLoc::new(id, 0)
    }

    /// Location just past the last byte of a file.
    pub fn end_of_file(&self, id: FileId) -> SourceLoc {
        SourceLoc::new(id, self.file(id).len)
    }

    /// Where a file was included from (invalid for the main file).
    pub fn include_loc(&self, id: FileId) -> SourceLoc {
        self.file(id).include_loc
    }

    /// Whether a location lies in the main file.
    pub fn is_in_main_file(&self, loc: SourceLoc) -> bool {
        loc.file() == Some(self.main_file())
    }
}
