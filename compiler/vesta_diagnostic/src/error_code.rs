use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E5xxx: Module-system errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Module-system errors (E5xxx)
    /// Module declaration while compiling from a module map
    E5001,
    /// Module declaration while compiling a header module
    E5002,
    /// Second module declaration in one translation unit
    E5003,
    /// Redefinition of an already-defined module
    E5004,
    /// Implementation unit names a module that is not defined
    E5005,
    /// Declared module name disagrees with the command line
    E5006,
    /// Module declaration is not the first declaration
    E5007,
    /// Interface unit declared without `export`
    E5008,
    /// Import not at translation-unit scope
    E5009,
    /// Redundant include of an already-visible module below top level
    E5010,
    /// Import of a non-`extern "C"` module inside `extern "C"` (warning)
    E5011,
    /// Module imports itself
    E5012,
    /// Import of the current module inside an implementation unit
    E5013,
    /// `export` outside a module interface unit
    E5014,
    /// `export` nested inside another `export`
    E5015,

    // Internal compiler errors (E9xxx)
    /// Module scope stack contract violated by the caller
    E9001,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl ErrorCode {
    /// One-line description for `--explain`-style output.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E5001 => "module declaration found while compiling a module map",
            ErrorCode::E5002 => "module declaration found while compiling a header module",
            ErrorCode::E5003 => "translation unit contains a second module declaration",
            ErrorCode::E5004 => "redefinition of a module",
            ErrorCode::E5005 => "implementation unit names an undefined module",
            ErrorCode::E5006 => "module name does not match the name given on the command line",
            ErrorCode::E5007 => "module declaration must be the first declaration",
            ErrorCode::E5008 => "module interface unit declared without `export`",
            ErrorCode::E5009 => "import appears below translation-unit scope",
            ErrorCode::E5010 => "redundant include of a visible module below top level",
            ErrorCode::E5011 => "import of a non-`extern \"C\"` module inside `extern \"C\"`",
            ErrorCode::E5012 => "module imports itself",
            ErrorCode::E5013 => "implementation unit imports its own module",
            ErrorCode::E5014 => "`export` used outside a module interface unit",
            ErrorCode::E5015 => "`export` nested inside another `export`",
            ErrorCode::E9001 => "module scope stack contract violated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_variant_name() {
        assert_eq!(ErrorCode::E5001.to_string(), "E5001");
        assert_eq!(ErrorCode::E9001.to_string(), "E9001");
    }

    #[test]
    fn every_code_has_a_description() {
        assert!(!ErrorCode::E5012.description().is_empty());
    }
}
