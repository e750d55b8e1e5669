//! Collecting queue for diagnostics.
//!
//! Semantic analysis never prints: it pushes diagnostics here and keeps
//! going. The driver drains the queue after each phase and decides how
//! to render and whether to stop.

use crate::Diagnostic;

/// Ordered collection of emitted diagnostics.
#[derive(Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a diagnostic, in source-processing order.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.error_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Number of error-severity diagnostics pushed so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Whether any error-severity diagnostic was pushed.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// All diagnostics pushed so far, in order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drain the queue, resetting counts.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        self.error_count = 0;
        std::mem::take(&mut self.diagnostics)
    }
}
