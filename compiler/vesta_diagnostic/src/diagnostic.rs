use std::fmt;

use vesta_ir::SourceLoc;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// Applicability level for code suggestions.
///
/// Indicates how confident we are that a suggestion is correct, so a
/// fix-applying tool can auto-apply machine-applicable ones.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Applicability {
    /// The suggestion is definitely correct and can be auto-applied.
    MachineApplicable,
    /// The suggestion might be correct but requires human verification.
    MaybeIncorrect,
    /// We don't know how confident the suggestion is.
    #[default]
    Unspecified,
}

/// A text insertion or replacement for a code fix.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Substitution {
    /// Where to insert or replace.
    pub loc: SourceLoc,
    /// The replacement text.
    pub snippet: String,
}

/// A structured suggestion with substitutions and applicability.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Suggestion {
    /// Human-readable message describing the fix.
    pub message: String,
    /// The text substitutions to make.
    pub substitutions: Vec<Substitution>,
    /// How confident we are in this suggestion.
    pub applicability: Applicability,
}

impl Suggestion {
    /// Create a suggestion with a single substitution.
    pub fn new(
        message: impl Into<String>,
        loc: SourceLoc,
        snippet: impl Into<String>,
        applicability: Applicability,
    ) -> Self {
        Suggestion {
            message: message.into(),
            substitutions: vec![Substitution {
                loc,
                snippet: snippet.into(),
            }],
            applicability,
        }
    }

    /// Create a machine-applicable suggestion (safe to auto-apply).
    pub fn machine_applicable(
        message: impl Into<String>,
        loc: SourceLoc,
        snippet: impl Into<String>,
    ) -> Self {
        Self::new(message, loc, snippet, Applicability::MachineApplicable)
    }
}

/// A labeled location with a message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub loc: SourceLoc,
    pub message: String,
    pub is_primary: bool,
}

impl Label {
    /// Create a primary label (the main error location).
    pub fn primary(loc: SourceLoc, message: impl Into<String>) -> Self {
        Label {
            loc,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a secondary label (related context).
    pub fn secondary(loc: SourceLoc, message: impl Into<String>) -> Self {
        Label {
            loc,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A rich diagnostic with all context needed for good error messages.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Severity level.
    pub severity: Severity,
    /// Main error message.
    pub message: String,
    /// Labeled locations showing where the error occurred.
    pub labels: Vec<Label>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
    /// Structured suggestions with locations and applicability.
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, loc: SourceLoc, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(loc, message));
        self
    }

    /// Add a secondary label for context.
    pub fn with_secondary_label(mut self, loc: SourceLoc, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(loc, message));
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a structured suggestion.
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    /// Add a machine-applicable insertion fix.
    pub fn with_fix(
        mut self,
        message: impl Into<String>,
        loc: SourceLoc,
        snippet: impl Into<String>,
    ) -> Self {
        self.suggestions
            .push(Suggestion::machine_applicable(message, loc, snippet));
        self
    }

    /// Get the primary location (first primary label's location).
    pub fn primary_loc(&self) -> Option<SourceLoc> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.loc)
    }

    /// Check if this is an error (vs warning/note).
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {} {:?}: {}", marker, label.loc, label.message)?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        for suggestion in &self.suggestions {
            write!(f, "\n  = help: {}", suggestion.message)?;
        }

        Ok(())
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
    fn diagnostic_builder() {
        let diag = Diagnostic::error(ErrorCode::E5012)
            .with_message("module 'A' imports itself")
            .with_label(loc(10), "imported here")
            .with_note("the import is still recorded");

        assert_eq!(diag.code, ErrorCode::E5012);
        assert!(diag.is_error());
        assert_eq!(diag.labels.len(), 1);
        assert!(diag.labels[0].is_primary);
        assert_eq!(diag.primary_loc(), Some(loc(10)));
        assert_eq!(diag.notes.len(), 1);
    }

    #[test]
    fn warning_is_not_error() {
        let diag = Diagnostic::warning(ErrorCode::E5011).with_message("extern \"C\" mismatch");
        assert!(!diag.is_error());
    }

    #[test]
    fn fix_is_machine_applicable() {
        let diag = Diagnostic::error(ErrorCode::E5007)
            .with_message("module declaration must be the first declaration")
            .with_fix("add a global module fragment introducer", loc(0), "module;\n");

        assert_eq!(diag.suggestions.len(), 1);
        assert_eq!(
            diag.suggestions[0].applicability,
            Applicability::MachineApplicable
        );
        assert_eq!(diag.suggestions[0].substitutions[0].snippet, "module;\n");
    }

    #[test]
    fn display_format() {
        let diag = Diagnostic::error(ErrorCode::E5003)
            .with_message("module redeclared")
            .with_label(loc(5), "second declaration")
            .with_secondary_label(loc(0), "first declaration was here")
            .with_note("only one module declaration is permitted per source file");

        let output = diag.to_string();
        assert!(output.contains("error [E5003]: module redeclared"));
        assert!(output.contains("--> "));
        assert!(output.contains("= note: only one module declaration"));
    }
}
