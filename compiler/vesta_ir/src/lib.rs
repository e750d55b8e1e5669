//! Source locations and declaration-context IR for the Vesta compiler.
//!
//! This crate holds the pieces of the AST that module semantic analysis
//! needs to see: compact source locations, the source map that answers
//! file-level location queries, module identity handles, and the
//! declaration-context arena with per-declaration module ownership tags.
//!
//! The full expression/statement AST lives elsewhere; module analysis
//! only ever walks lexical declaration contexts.

mod ast;
mod loc;
mod module_id;
mod source_map;

pub use ast::{
    AstContext, Decl, DeclId, DeclKind, ExportDecl, ImportDecl, Linkage, ModuleDecl,
    OwnershipKind, SegmentLocs,
};
pub use loc::{FileId, SourceLoc};
pub use module_id::ModuleId;
pub use source_map::{SourceFile, SourceMap};
