//! Source location tracking for error reporting
//!
//! Locations point into the scanned Go source files; every token and
//! declaration carries one so errors can name the offending spot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in a source file (line and column are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    /// Create a location with filename
    pub fn new(filename: &str, line: u32, column: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
            column,
        }
    }

    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::new("<unknown>", 0, 0)
    }

    /// Lexical ordering within one file: true if `self` starts strictly
    /// before `other`
    pub fn is_before(&self, other: &SourceLocation) -> bool {
        self.line < other.line || (self.line == other.line && self.column < other.column)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A span in a source file (from start to end location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Create a span from a single location
    pub fn from_location(location: SourceLocation) -> Self {
        Self {
            end: location.clone(),
            start: location,
        }
    }

    /// Create a dummy span for testing
    pub fn dummy() -> Self {
        Self::from_location(SourceLocation::dummy())
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            if self.start.column == self.end.column {
                write!(f, "{}:{}", self.start.filename, self.start.line)
            } else {
                write!(
                    f,
                    "{}:{}:{}-{}",
                    self.start.filename, self.start.line, self.start.column, self.end.column
                )
            }
        } else {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.start.filename, self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location() {
        let loc = SourceLocation::new("main.go", 42, 10);
        assert_eq!(loc.filename, "main.go");
        assert_eq!(loc.line, 42);
        assert_eq!(loc.column, 10);
        assert_eq!(format!("{}", loc), "main.go:42:10");
    }

    #[test]
    fn test_is_before() {
        let a = SourceLocation::new("main.go", 1, 5);
        let b = SourceLocation::new("main.go", 1, 9);
        let c = SourceLocation::new("main.go", 2, 1);

        assert!(a.is_before(&b));
        assert!(b.is_before(&c));
        assert!(!b.is_before(&a));
        assert!(!a.is_before(&a));
    }

    #[test]
    fn test_source_span_same_line() {
        let start = SourceLocation::new("main.go", 1, 5);
        let end = SourceLocation::new("main.go", 1, 10);
        let span = SourceSpan::new(start, end);

        assert_eq!(format!("{}", span), "main.go:1:5-10");
    }

    #[test]
    fn test_source_span_different_lines() {
        let start = SourceLocation::new("main.go", 1, 5);
        let end = SourceLocation::new("main.go", 3, 10);
        let span = SourceSpan::new(start, end);

        assert_eq!(format!("{}", span), "main.go:1:5-3:10");
    }
}
