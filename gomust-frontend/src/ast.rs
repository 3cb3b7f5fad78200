//! Declaration AST for the scanned Go package
//!
//! Only the shapes the generator consumes are modeled: the package clause,
//! function declarations with their signature parts, and a body record
//! carrying the positions the tag scanner needs. Statements are never
//! represented; a body is a span plus its ordered comments.

use gomust_common::{SourceLocation, SourceSpan};
use serde::{Deserialize, Serialize};

/// One compilation unit: every parsed file agreeing on a package clause.
/// Built by the loader, read-only to everything downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub files: Vec<SourceFile>,
}

/// A single parsed Go source file. Declarations other than functions are
/// skipped by the parser and never appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub filename: String,
    pub package_name: String,
    pub package_span: SourceSpan,
    pub funcs: Vec<FuncDecl>,
}

/// A located function declaration, in document order within its file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    pub span: SourceSpan,
    /// Method receiver; names holds at most one entry
    pub recv: Option<Field>,
    pub type_params: Vec<Field>,
    pub params: Vec<Field>,
    pub results: Vec<Field>,
    /// None for bodiless declarations (assembly stubs)
    pub body: Option<Body>,
}

/// One declaration group (`a, b int`). Empty names means an unnamed
/// parameter or result position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    pub span: SourceSpan,
}

impl Field {
    pub fn named(names: &[&str], ty: TypeExpr) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            ty,
            span: SourceSpan::dummy(),
        }
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
            span: SourceSpan::dummy(),
        }
    }
}

/// What the tag scanner needs from a function body: the brace span, where
/// the first executable token starts (if the body has one), and every
/// comment inside the braces in lexical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub span: SourceSpan,
    pub first_stmt: Option<SourceLocation>,
    pub comments: Vec<Comment>,
}

/// A comment inside a function body, text stored without delimiters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    Line,
    Block,
}

/// Go type expressions, limited to the closed set the generator can
/// reconstruct. Everything else (slices, arrays, maps, channels, function
/// types, struct/interface literals, qualified names) parses into
/// `Unsupported` so scanning stays total; reconstructing an `Unsupported`
/// node is the `UnknownFieldType` failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// Plain identifier: `int`, `error`, `MyType`
    Ident(String),
    /// Pointer to the element type: `*T`
    Pointer(Box<TypeExpr>),
    /// Variadic element: `...T`
    Ellipsis(Box<TypeExpr>),
    /// Constraint element: `~int`
    Unary { op: String, operand: Box<TypeExpr> },
    /// Type union: `int | string`
    Binary {
        op: String,
        left: Box<TypeExpr>,
        right: Box<TypeExpr>,
    },
    /// Single generic instantiation: `List[T]`
    Index {
        base: Box<TypeExpr>,
        index: Box<TypeExpr>,
    },
    /// Multi generic instantiation: `Pair[K, V]`
    IndexList {
        base: Box<TypeExpr>,
        indices: Vec<TypeExpr>,
    },
    /// Any shape outside the closed set; `text` is an approximate rendering
    /// kept for diagnostics
    Unsupported { text: String, span: SourceSpan },
}

impl TypeExpr {
    pub fn ident(name: &str) -> Self {
        TypeExpr::Ident(name.to_string())
    }

    pub fn pointer(elem: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(elem))
    }

    pub fn ellipsis(elem: TypeExpr) -> Self {
        TypeExpr::Ellipsis(Box::new(elem))
    }
}
