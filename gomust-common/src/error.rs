//! Error handling for the must-wrapper generator
//!
//! Every error kind here is terminal: the first one reported aborts the
//! whole run and surfaces at the process boundary as a single message.

use crate::source_loc::SourceLocation;
use thiserror::Error;

/// Main generator error type that encompasses all stages of a run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    #[error("no package found")]
    NoPackageFound,

    #[error("unknown field type at {location}")]
    UnknownFieldType { location: SourceLocation },

    #[error("no return values: function {function} at {location}")]
    NoReturnValues {
        function: String,
        location: SourceLocation,
    },

    #[error("no error returned: function {function} at {location}")]
    NoErrorReturn {
        function: String,
        location: SourceLocation,
    },

    #[error("function not found: {function}")]
    FunctionNotFound { function: String },

    #[error("lexical error at {location}: {message}")]
    Lex {
        location: SourceLocation,
        message: String,
    },

    #[error("parse error at {location}: {message}")]
    Parse {
        location: SourceLocation,
        message: String,
    },

    #[error("io error: {message}")]
    Io { message: String },
}

impl GenError {
    /// Create a lexer error
    pub fn lex(message: String, location: SourceLocation) -> Self {
        GenError::Lex { location, message }
    }

    /// Create a parse error
    pub fn parse(message: String, location: SourceLocation) -> Self {
        GenError::Parse { location, message }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for GenError {
    fn from(err: std::io::Error) -> Self {
        GenError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(format!("{}", GenError::NoPackageFound), "no package found");

        let err = GenError::NoErrorReturn {
            function: "Divide".to_string(),
            location: SourceLocation::new("div.go", 3, 1),
        };
        assert_eq!(
            format!("{}", err),
            "no error returned: function Divide at div.go:3:1"
        );

        let err = GenError::FunctionNotFound {
            function: "Missing".to_string(),
        };
        assert_eq!(format!("{}", err), "function not found: Missing");
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: GenError = io.into();
        assert!(matches!(err, GenError::Io { .. }));
    }

    #[test]
    fn test_lex_and_parse_helpers() {
        let loc = SourceLocation::new("a.go", 1, 2);
        let err = GenError::lex("stray character".to_string(), loc.clone());
        assert_eq!(format!("{}", err), "lexical error at a.go:1:2: stray character");

        let err = GenError::parse("expected declaration".to_string(), loc);
        assert_eq!(
            format!("{}", err),
            "parse error at a.go:1:2: expected declaration"
        );
    }
}
