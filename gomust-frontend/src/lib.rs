//! Go must-wrapper generator - Declaration Frontend
//!
//! This crate provides the parsing half of the package loader:
//! - Lexer: tokenizes Go source, keeping comments and newlines
//! - Parser: builds the declaration AST from tokens
//! - AST: declaration and type-expression definitions
//!
//! The frontend never touches the filesystem; the driver reads files and
//! hands sources in.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{
    Body, Comment, CommentKind, Field, FuncDecl, Package, SourceFile, TypeExpr,
};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{ParseError, Parser};

use gomust_common::GenError;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Parse one Go source file into its declaration AST
    pub fn parse_file(filename: &str, source: &str) -> Result<SourceFile, GenError> {
        let mut lexer = Lexer::new(filename, source);
        let tokens = lexer.tokenize()?;

        let mut parser = Parser::new(filename, tokens);
        parser.parse_file()
    }

    /// Tokenize source code (for debugging)
    pub fn tokenize_source(filename: &str, source: &str) -> Result<Vec<Token>, GenError> {
        let mut lexer = Lexer::new(filename, source);
        lexer.tokenize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_parse_simple_function() {
        let source = r#"
package mathutil

func Divide(a, b int) (int, error) {
    return a / b, nil
}
"#;

        let file = Frontend::parse_file("mathutil.go", source).unwrap();
        assert_eq!(file.package_name, "mathutil");
        assert_eq!(file.funcs.len(), 1);
        assert_eq!(file.funcs[0].name, "Divide");
    }

    #[test]
    fn test_frontend_tokenize() {
        let tokens = Frontend::tokenize_source("x.go", "package x").unwrap();

        // package, x, EOF
        assert_eq!(tokens.len(), 3);
        assert!(matches!(tokens[0].token_type, TokenType::Package));
        assert!(matches!(tokens[1].token_type, TokenType::Ident(_)));
        assert!(matches!(tokens[2].token_type, TokenType::EndOfFile));
    }

    #[test]
    fn test_frontend_reports_locations() {
        let err = Frontend::parse_file("broken.go", "package x\nfunc (").unwrap_err();
        match err {
            GenError::Parse { location, .. } => assert_eq!(location.filename, "broken.go"),
            other => panic!("expected parse error, got {}", other),
        }
    }
}
