//! Diagnostic system for rich error reporting.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary location (where it went wrong)
//! - Context labels (why it's wrong)
//! - Structured suggestions (how to fix)
//!
//! Diagnostics are a side channel: emitting one never unwinds or stops
//! the emitting phase. Phases push into a [`DiagnosticQueue`] and
//! continue with best-effort recovery.

mod diagnostic;
mod error_code;
mod queue;

pub use diagnostic::{
    Applicability, Diagnostic, Label, Severity, Substitution, Suggestion,
};
pub use error_code::ErrorCode;
pub use queue::DiagnosticQueue;
