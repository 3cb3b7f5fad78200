//! Go declaration parser
//!
//! Recursive descent over the token stream, but only declarations are
//! modeled: the package clause, imports (skipped), `func` declarations
//! (parsed fully), and everything else (skipped by balanced-delimiter
//! scanning). Function bodies are not parsed into statements; they are
//! scanned for the brace span, the first executable token, and the ordered
//! comment list the tag scanner works from.
//!
//! Type expressions outside the closed set the generator can reconstruct
//! are carried as `TypeExpr::Unsupported` so parsing stays total.

use crate::ast::*;
use crate::lexer::{Token, TokenType};
use gomust_common::{GenError, SourceLocation, SourceSpan};
use std::collections::VecDeque;

/// Parse error types specific to the parser
#[derive(Debug, Clone)]
pub enum ParseError {
    UnexpectedToken {
        expected: String,
        found: Token,
    },
    UnexpectedEndOfFile {
        expected: String,
        location: SourceLocation,
    },
    InvalidDeclaration {
        message: String,
        location: SourceLocation,
    },
}

impl From<ParseError> for GenError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnexpectedToken { expected, found } => GenError::parse(
                format!("expected {}, found {}", expected, found.token_type),
                found.span.start,
            ),
            ParseError::UnexpectedEndOfFile { expected, location } => GenError::parse(
                format!("unexpected end of file, expected {}", expected),
                location,
            ),
            ParseError::InvalidDeclaration { message, location } => {
                GenError::parse(message, location)
            }
        }
    }
}

/// One comma-separated element of a field list before name/type resolution
struct RawElement {
    lead: Option<String>,
    ty: TypeExpr,
    span: SourceSpan,
}

/// Go declaration parser
pub struct Parser {
    tokens: VecDeque<Token>,
    filename: String,
}

impl Parser {
    /// Create a new parser. The token stream keeps comments and newlines;
    /// both carry information the declaration grammar needs.
    pub fn new(filename: &str, tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
            filename: filename.to_string(),
        }
    }

    fn is_trivia(token_type: &TokenType) -> bool {
        matches!(
            token_type,
            TokenType::Newline | TokenType::LineComment(_) | TokenType::BlockComment(_)
        )
    }

    /// Peek at current token type without consuming
    fn peek_type(&self) -> Option<&TokenType> {
        self.tokens.front().map(|t| &t.token_type)
    }

    /// Peek at the n-th upcoming non-trivia token type
    fn peek_nth_significant(&self, n: usize) -> Option<&TokenType> {
        self.tokens
            .iter()
            .map(|t| &t.token_type)
            .filter(|t| !Self::is_trivia(t))
            .nth(n)
    }

    /// Get current token and advance
    fn advance(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Advance, turning end-of-stream into a parse error
    fn bump(&mut self, expected: &str) -> Result<Token, ParseError> {
        match self.tokens.pop_front() {
            Some(token) => Ok(token),
            None => Err(ParseError::UnexpectedEndOfFile {
                expected: expected.to_string(),
                location: self.eof_location(),
            }),
        }
    }

    /// Check if current token matches expected type
    fn check(&self, token_type: &TokenType) -> bool {
        match self.tokens.front() {
            Some(token) => {
                std::mem::discriminant(&token.token_type) == std::mem::discriminant(token_type)
            }
            None => false,
        }
    }

    /// Expect and consume a specific token type
    fn expect(&mut self, token_type: TokenType, context: &str) -> Result<Token, ParseError> {
        let token = self.bump(&format!("{} in {}", token_type, context))?;
        if std::mem::discriminant(&token.token_type) == std::mem::discriminant(&token_type) {
            Ok(token)
        } else {
            Err(ParseError::UnexpectedToken {
                expected: format!("{} in {}", token_type, context),
                found: token,
            })
        }
    }

    /// Expect and consume an identifier, returning its text and span
    fn expect_ident(&mut self, context: &str) -> Result<(String, SourceSpan), ParseError> {
        let token = self.bump(&format!("identifier in {}", context))?;
        match token.token_type {
            TokenType::Ident(ref name) => {
                let name = name.clone();
                Ok((name, token.span))
            }
            _ => Err(ParseError::UnexpectedToken {
                expected: format!("identifier in {}", context),
                found: token,
            }),
        }
    }

    /// Skip newlines and comments
    fn skip_trivia(&mut self) {
        while matches!(self.peek_type(), Some(t) if Self::is_trivia(t)) {
            self.advance();
        }
    }

    /// Skip comments only; newlines stay visible because they terminate
    /// results and bodiless declarations
    fn skip_comments(&mut self) {
        while matches!(
            self.peek_type(),
            Some(TokenType::LineComment(_)) | Some(TokenType::BlockComment(_))
        ) {
            self.advance();
        }
    }

    fn eof_location(&self) -> SourceLocation {
        SourceLocation::new(&self.filename, 0, 0)
    }

    /// Get current location for error reporting
    fn current_location(&self) -> SourceLocation {
        match self.tokens.front() {
            Some(token) => token.span.start.clone(),
            None => self.eof_location(),
        }
    }

    /// Parse a complete source file
    pub fn parse_file(&mut self) -> Result<SourceFile, GenError> {
        self.parse_file_inner().map_err(Into::into)
    }

    fn parse_file_inner(&mut self) -> Result<SourceFile, ParseError> {
        self.skip_trivia();
        let package_start = self.current_location();
        self.expect(TokenType::Package, "package clause")?;
        self.skip_comments();
        let (package_name, name_span) = self.expect_ident("package clause")?;
        let package_span = SourceSpan::new(package_start, name_span.end);
        log::trace!("parsing {} (package {})", self.filename, package_name);

        let mut funcs = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek_type() {
                None | Some(TokenType::EndOfFile) => break,
                Some(TokenType::Import) => self.skip_import()?,
                Some(TokenType::Func) => funcs.push(self.parse_func_decl()?),
                Some(TokenType::Type) | Some(TokenType::Var) | Some(TokenType::Const) => {
                    self.skip_declaration()?
                }
                Some(TokenType::Semicolon) => {
                    self.advance();
                }
                Some(_) => {
                    let found = self.bump("declaration")?;
                    return Err(ParseError::UnexpectedToken {
                        expected: "declaration".to_string(),
                        found,
                    });
                }
            }
        }

        Ok(SourceFile {
            filename: self.filename.clone(),
            package_name,
            package_span,
            funcs,
        })
    }

    /// Skip an import declaration, single or parenthesized group
    fn skip_import(&mut self) -> Result<(), ParseError> {
        self.bump("import declaration")?;
        self.skip_comments();
        if self.check(&TokenType::LeftParen) {
            self.advance();
            let mut depth = 1usize;
            while depth > 0 {
                let token = self.bump("')' closing import declaration")?;
                match token.token_type {
                    TokenType::LeftParen => depth += 1,
                    TokenType::RightParen => depth -= 1,
                    TokenType::EndOfFile => {
                        return Err(ParseError::UnexpectedEndOfFile {
                            expected: "')' closing import declaration".to_string(),
                            location: token.span.start,
                        });
                    }
                    _ => {}
                }
            }
        } else {
            loop {
                match self.peek_type() {
                    None | Some(TokenType::EndOfFile) => break,
                    Some(TokenType::Newline) | Some(TokenType::Semicolon) => {
                        self.advance();
                        break;
                    }
                    Some(_) => {
                        self.advance();
                    }
                }
            }
        }
        Ok(())
    }

    /// Skip a type/var/const declaration: consume balanced delimiters until
    /// a newline or semicolon at depth zero
    fn skip_declaration(&mut self) -> Result<(), ParseError> {
        self.bump("declaration")?;
        let mut depth = 0usize;
        loop {
            match self.peek_type() {
                None | Some(TokenType::EndOfFile) => break,
                Some(TokenType::Newline) | Some(TokenType::Semicolon) if depth == 0 => {
                    self.advance();
                    break;
                }
                Some(TokenType::LeftParen)
                | Some(TokenType::LeftBrace)
                | Some(TokenType::LeftBracket) => {
                    depth += 1;
                    self.advance();
                }
                Some(TokenType::RightParen)
                | Some(TokenType::RightBrace)
                | Some(TokenType::RightBracket) => {
                    depth = depth.saturating_sub(1);
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
        Ok(())
    }

    /// Parse one function declaration
    fn parse_func_decl(&mut self) -> Result<FuncDecl, ParseError> {
        let start = self.current_location();
        self.expect(TokenType::Func, "function declaration")?;
        self.skip_trivia();

        let recv = if self.check(&TokenType::LeftParen) {
            Some(self.parse_receiver()?)
        } else {
            None
        };
        self.skip_trivia();

        let (name, _) = self.expect_ident("function declaration")?;
        self.skip_comments();

        let type_params = if self.check(&TokenType::LeftBracket) {
            self.advance();
            let fields = self.parse_field_list(TokenType::RightBracket, "type parameter list")?;
            for field in &fields {
                if field.names.is_empty() {
                    return Err(ParseError::InvalidDeclaration {
                        message: "type parameter missing constraint".to_string(),
                        location: field.span.start.clone(),
                    });
                }
            }
            fields
        } else {
            Vec::new()
        };
        self.skip_comments();

        self.expect(TokenType::LeftParen, "parameter list")?;
        let params = self.parse_field_list(TokenType::RightParen, "parameter list")?;
        let results = self.parse_results()?;

        self.skip_comments();
        let body = if self.check(&TokenType::LeftBrace) {
            Some(self.parse_body()?)
        } else {
            None
        };

        let end = self.current_location();
        log::trace!("parsed func {}", name);
        Ok(FuncDecl {
            name,
            span: SourceSpan::new(start, end),
            recv,
            type_params,
            params,
            results,
            body,
        })
    }

    /// Parse a method receiver. Go receivers are `(name T)`, `(name *T)`,
    /// or the unnamed forms without `name`; a name is present exactly when
    /// an identifier is followed by the start of a receiver type.
    fn parse_receiver(&mut self) -> Result<Field, ParseError> {
        let start = self.current_location();
        self.expect(TokenType::LeftParen, "receiver")?;
        self.skip_trivia();

        let named = matches!(self.peek_nth_significant(0), Some(TokenType::Ident(_)))
            && matches!(
                self.peek_nth_significant(1),
                Some(TokenType::Ident(_)) | Some(TokenType::Star)
            );
        let names = if named {
            vec![self.expect_ident("receiver")?.0]
        } else {
            Vec::new()
        };
        self.skip_trivia();

        let ty = self.parse_type()?;
        self.skip_trivia();
        self.expect(TokenType::RightParen, "receiver")?;
        let end = self.current_location();
        Ok(Field {
            names,
            ty,
            span: SourceSpan::new(start, end),
        })
    }

    /// Parse a parenthesized or bracketed field list up to `close`,
    /// resolving Go's name/type ambiguity: a list is either all named or
    /// all unnamed, and a trailing type distributes over the preceding
    /// lone identifiers (`a, b int`).
    fn parse_field_list(
        &mut self,
        close: TokenType,
        context: &str,
    ) -> Result<Vec<Field>, ParseError> {
        let mut elements: Vec<RawElement> = Vec::new();
        loop {
            self.skip_trivia();
            if self.check(&close) {
                self.advance();
                break;
            }
            if matches!(self.peek_type(), None | Some(TokenType::EndOfFile)) {
                return Err(ParseError::UnexpectedEndOfFile {
                    expected: format!("{} in {}", close, context),
                    location: self.current_location(),
                });
            }

            let start = self.current_location();
            let lead = if self.lead_ident_ahead() {
                let (name, _) = self.expect_ident(context)?;
                self.skip_trivia();
                Some(name)
            } else {
                None
            };
            let ty = self.parse_type()?;
            let end = self.current_location();
            elements.push(RawElement {
                lead,
                ty,
                span: SourceSpan::new(start, end),
            });

            self.skip_trivia();
            if self.check(&TokenType::Comma) {
                self.advance();
                continue;
            }
            if self.check(&close) {
                self.advance();
                break;
            }
            let found = self.bump(context)?;
            return Err(ParseError::UnexpectedToken {
                expected: format!("',' or {} in {}", close, context),
                found,
            });
        }

        self.resolve_fields(elements)
    }

    /// True if the next tokens are `name Type` rather than a bare type
    fn lead_ident_ahead(&self) -> bool {
        if !matches!(self.peek_nth_significant(0), Some(TokenType::Ident(_))) {
            return false;
        }
        match self.peek_nth_significant(1) {
            // `x []T` and `x [3]T` are a name plus an array/slice type; a
            // bare identifier after '[' means the first identifier was a
            // generic type being instantiated. Named constant array sizes
            // in signatures are misread as instantiations.
            Some(TokenType::LeftBracket) => matches!(
                self.peek_nth_significant(2),
                Some(TokenType::RightBracket) | Some(TokenType::Number(_))
            ),
            Some(t) => Self::starts_type_after_name(t),
            None => false,
        }
    }

    fn starts_type_after_name(token_type: &TokenType) -> bool {
        match token_type {
            TokenType::Ident(_)
            | TokenType::Star
            | TokenType::Ellipsis
            | TokenType::Tilde
            | TokenType::Map
            | TokenType::Chan
            | TokenType::Struct
            | TokenType::Interface
            | TokenType::Func
            | TokenType::LeftParen => true,
            TokenType::Operator(op) => op == "<-",
            _ => false,
        }
    }

    /// Resolve raw elements into fields, distributing trailing types over
    /// preceding lone identifiers in named lists
    fn resolve_fields(&self, elements: Vec<RawElement>) -> Result<Vec<Field>, ParseError> {
        let named_mode = elements.iter().any(|e| e.lead.is_some());
        let mut fields = Vec::new();

        if !named_mode {
            for element in elements {
                fields.push(Field {
                    names: Vec::new(),
                    ty: element.ty,
                    span: element.span,
                });
            }
            return Ok(fields);
        }

        let mut pending_names: Vec<String> = Vec::new();
        let mut pending_start: Option<SourceLocation> = None;
        for element in elements {
            match element.lead {
                Some(name) => {
                    let start = pending_start
                        .take()
                        .unwrap_or_else(|| element.span.start.clone());
                    let mut names = std::mem::take(&mut pending_names);
                    names.push(name);
                    fields.push(Field {
                        names,
                        ty: element.ty,
                        span: SourceSpan::new(start, element.span.end),
                    });
                }
                None => match element.ty {
                    TypeExpr::Ident(name) => {
                        if pending_start.is_none() {
                            pending_start = Some(element.span.start);
                        }
                        pending_names.push(name);
                    }
                    _ => {
                        return Err(ParseError::InvalidDeclaration {
                            message: "cannot mix named and unnamed fields".to_string(),
                            location: element.span.start,
                        });
                    }
                },
            }
        }
        if !pending_names.is_empty() {
            return Err(ParseError::InvalidDeclaration {
                message: format!("field names missing a type: {}", pending_names.join(", ")),
                location: pending_start.unwrap_or_else(|| self.eof_location()),
            });
        }

        Ok(fields)
    }

    /// Parse a result list: absent, a single bare type, or parenthesized
    fn parse_results(&mut self) -> Result<Vec<Field>, ParseError> {
        self.skip_comments();
        match self.peek_type() {
            None
            | Some(TokenType::EndOfFile)
            | Some(TokenType::Newline)
            | Some(TokenType::Semicolon)
            | Some(TokenType::LeftBrace) => Ok(Vec::new()),
            Some(TokenType::LeftParen) => {
                self.advance();
                self.parse_field_list(TokenType::RightParen, "result list")
            }
            Some(_) => {
                let start = self.current_location();
                let ty = self.parse_type()?;
                let end = self.current_location();
                Ok(vec![Field {
                    names: Vec::new(),
                    ty,
                    span: SourceSpan::new(start, end),
                }])
            }
        }
    }

    /// Parse a type expression: a union of unary terms
    fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let mut left = self.parse_unary_type()?;
        loop {
            self.skip_comments();
            if self.check(&TokenType::Pipe) {
                self.advance();
                self.skip_trivia();
                let right = self.parse_unary_type()?;
                left = TypeExpr::Binary {
                    op: "|".to_string(),
                    left: Box::new(left),
                    right: Box::new(right),
                };
            } else {
                break;
            }
        }
        Ok(left)
    }

    fn parse_unary_type(&mut self) -> Result<TypeExpr, ParseError> {
        self.skip_comments();
        if self.check(&TokenType::Tilde) {
            self.advance();
            self.skip_comments();
            let operand = self.parse_unary_type()?;
            return Ok(TypeExpr::Unary {
                op: "~".to_string(),
                operand: Box::new(operand),
            });
        }
        self.parse_primary_type()
    }

    fn parse_primary_type(&mut self) -> Result<TypeExpr, ParseError> {
        self.skip_comments();
        match self.peek_type() {
            Some(TokenType::Star) => {
                self.advance();
                let elem = self.parse_unary_type()?;
                Ok(TypeExpr::Pointer(Box::new(elem)))
            }
            Some(TokenType::Ellipsis) => {
                self.advance();
                let elem = self.parse_type()?;
                Ok(TypeExpr::Ellipsis(Box::new(elem)))
            }
            Some(TokenType::Ident(_)) => {
                let (name, span) = self.expect_ident("type")?;
                let start = span.start;
                let mut ty = TypeExpr::Ident(name);
                loop {
                    match self.peek_type() {
                        Some(TokenType::LeftBracket) => {
                            ty = self.parse_index_suffix(ty)?;
                        }
                        Some(TokenType::Dot) => {
                            self.advance();
                            let (selector, selector_span) = self.expect_ident("qualified type")?;
                            let text = format!("{}.{}", type_raw_text(&ty), selector);
                            ty = TypeExpr::Unsupported {
                                text,
                                span: SourceSpan::new(start.clone(), selector_span.end),
                            };
                        }
                        _ => break,
                    }
                }
                Ok(ty)
            }
            Some(t) if Self::starts_unsupported(t) => self.parse_unsupported(),
            Some(_) => {
                let found = self.bump("type")?;
                Err(ParseError::UnexpectedToken {
                    expected: "type".to_string(),
                    found,
                })
            }
            None => Err(ParseError::UnexpectedEndOfFile {
                expected: "type".to_string(),
                location: self.current_location(),
            }),
        }
    }

    /// Parse `[Arg]` or `[Arg1, Arg2, ...]` after a type
    fn parse_index_suffix(&mut self, base: TypeExpr) -> Result<TypeExpr, ParseError> {
        self.expect(TokenType::LeftBracket, "type arguments")?;
        let mut indices = Vec::new();
        loop {
            self.skip_trivia();
            indices.push(self.parse_type()?);
            self.skip_trivia();
            if self.check(&TokenType::Comma) {
                self.advance();
                self.skip_trivia();
                if self.check(&TokenType::RightBracket) {
                    self.advance();
                    break;
                }
                continue;
            }
            self.expect(TokenType::RightBracket, "type arguments")?;
            break;
        }
        if indices.len() == 1 {
            let index = indices.remove(0);
            Ok(TypeExpr::Index {
                base: Box::new(base),
                index: Box::new(index),
            })
        } else {
            Ok(TypeExpr::IndexList {
                base: Box::new(base),
                indices,
            })
        }
    }

    fn starts_unsupported(token_type: &TokenType) -> bool {
        match token_type {
            TokenType::Map
            | TokenType::Chan
            | TokenType::Struct
            | TokenType::Interface
            | TokenType::Func
            | TokenType::LeftBracket
            | TokenType::LeftParen => true,
            TokenType::Operator(op) => op == "<-",
            _ => false,
        }
    }

    /// Consume one type shape outside the closed set as a balanced token
    /// run. The text is approximate and only used for diagnostics. A brace
    /// at depth zero belongs to the type only directly after `struct` or
    /// `interface`; otherwise it opens the function body and ends the run.
    fn parse_unsupported(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.current_location();
        let mut end = start.clone();
        let mut depth = 0usize;
        let mut parts: Vec<String> = Vec::new();
        let mut prev_struct_like = false;

        loop {
            let stop = match self.peek_type() {
                None | Some(TokenType::EndOfFile) => true,
                Some(TokenType::Newline) | Some(TokenType::Semicolon) => {
                    if depth == 0 {
                        true
                    } else {
                        self.advance();
                        continue;
                    }
                }
                Some(TokenType::LineComment(_)) | Some(TokenType::BlockComment(_)) => {
                    self.advance();
                    continue;
                }
                Some(TokenType::Comma) | Some(TokenType::Pipe) => depth == 0,
                Some(TokenType::RightParen)
                | Some(TokenType::RightBracket)
                | Some(TokenType::RightBrace) => depth == 0,
                Some(TokenType::LeftBrace) => depth == 0 && !prev_struct_like,
                Some(_) => false,
            };
            if stop {
                break;
            }

            let token = self.bump("type")?;
            match token.token_type {
                TokenType::LeftParen | TokenType::LeftBracket | TokenType::LeftBrace => depth += 1,
                TokenType::RightParen | TokenType::RightBracket | TokenType::RightBrace => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            prev_struct_like = matches!(
                token.token_type,
                TokenType::Struct | TokenType::Interface
            );
            parts.push(token.token_type.to_string());
            end = token.span.end;
        }

        if parts.is_empty() {
            return Err(ParseError::UnexpectedToken {
                expected: "type".to_string(),
                found: self.bump("type")?,
            });
        }
        Ok(TypeExpr::Unsupported {
            text: parts.join(" "),
            span: SourceSpan::new(start, end),
        })
    }

    /// Scan a function body: balanced braces, first executable token, and
    /// every comment inside the braces in order
    fn parse_body(&mut self) -> Result<Body, ParseError> {
        let lbrace = self.expect(TokenType::LeftBrace, "function body")?;
        let start = lbrace.span.start;
        let mut depth = 1usize;
        let mut first_stmt: Option<SourceLocation> = None;
        let mut comments = Vec::new();
        let end_loc;

        loop {
            let token = self.bump("'}' closing function body")?;
            let Token { token_type, span } = token;
            match token_type {
                TokenType::EndOfFile => {
                    return Err(ParseError::UnexpectedEndOfFile {
                        expected: "'}' closing function body".to_string(),
                        location: span.start,
                    });
                }
                TokenType::LineComment(text) => comments.push(Comment {
                    kind: CommentKind::Line,
                    text,
                    span,
                }),
                TokenType::BlockComment(text) => comments.push(Comment {
                    kind: CommentKind::Block,
                    text,
                    span,
                }),
                TokenType::Newline | TokenType::Semicolon => {}
                TokenType::RightBrace => {
                    depth -= 1;
                    if depth == 0 {
                        end_loc = span.end;
                        break;
                    }
                }
                TokenType::LeftBrace => {
                    if first_stmt.is_none() {
                        first_stmt = Some(span.start.clone());
                    }
                    depth += 1;
                }
                _ => {
                    if first_stmt.is_none() {
                        first_stmt = Some(span.start);
                    }
                }
            }
        }

        Ok(Body {
            span: SourceSpan::new(start, end_loc),
            first_stmt,
            comments,
        })
    }
}

/// Approximate source rendering of a type node, used to build the
/// diagnostic text of `Unsupported` nodes
fn type_raw_text(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Ident(name) => name.clone(),
        TypeExpr::Pointer(elem) => format!("*{}", type_raw_text(elem)),
        TypeExpr::Ellipsis(elem) => format!("...{}", type_raw_text(elem)),
        TypeExpr::Unary { op, operand } => format!("{}{}", op, type_raw_text(operand)),
        TypeExpr::Binary { op, left, right } => {
            format!("{} {} {}", type_raw_text(left), op, type_raw_text(right))
        }
        TypeExpr::Index { base, index } => {
            format!("{}[{}]", type_raw_text(base), type_raw_text(index))
        }
        TypeExpr::IndexList { base, indices } => {
            let args: Vec<String> = indices.iter().map(type_raw_text).collect();
            format!("{}[{}]", type_raw_text(base), args.join(", "))
        }
        TypeExpr::Unsupported { text, .. } => text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use indoc::indoc;

    fn parse(source: &str) -> SourceFile {
        let mut lexer = Lexer::new("test.go", source);
        let tokens = lexer.tokenize().unwrap();
        let mut parser = Parser::new("test.go", tokens);
        parser.parse_file().unwrap()
    }

    fn parse_err(source: &str) -> GenError {
        let mut lexer = Lexer::new("test.go", source);
        let tokens = lexer.tokenize().unwrap();
        let mut parser = Parser::new("test.go", tokens);
        parser.parse_file().unwrap_err()
    }

    #[test]
    fn test_package_clause() {
        let file = parse("package testpkg\n");
        assert_eq!(file.package_name, "testpkg");
        assert!(file.funcs.is_empty());
    }

    #[test]
    fn test_missing_package_clause() {
        let err = parse_err("func f() {}\n");
        assert!(matches!(err, GenError::Parse { .. }));
    }

    #[test]
    fn test_simple_function() {
        let file = parse(indoc! {r#"
            package testpkg

            func Divide(a, b int) (int, error) {
                return a / b, nil
            }
        "#});

        assert_eq!(file.funcs.len(), 1);
        let func = &file.funcs[0];
        assert_eq!(func.name, "Divide");
        assert!(func.recv.is_none());
        assert!(func.type_params.is_empty());

        // Grouped parameters resolve to one field with both names
        assert_eq!(func.params.len(), 1);
        assert_eq!(func.params[0].names, vec!["a", "b"]);
        assert_eq!(func.params[0].ty, TypeExpr::ident("int"));

        assert_eq!(func.results.len(), 2);
        assert!(func.results[0].names.is_empty());
        assert_eq!(func.results[0].ty, TypeExpr::ident("int"));
        assert_eq!(func.results[1].ty, TypeExpr::ident("error"));
    }

    #[test]
    fn test_imports_and_other_decls_skipped() {
        let file = parse(indoc! {r#"
            package testpkg

            import (
                "fmt"
                "strings"
            )

            import "os"

            type Pair struct {
                A int
                B int
            }

            var count = 0

            const (
                x = 1
                y = 2
            )

            func keep() error {
                return nil
            }
        "#});

        assert_eq!(file.funcs.len(), 1);
        assert_eq!(file.funcs[0].name, "keep");
    }

    #[test]
    fn test_named_and_unnamed_receivers() {
        let file = parse(indoc! {r#"
            package testpkg

            func (s *Server) Start() error { return nil }
            func (Server) Tag() (string, error) { return "", nil }
            func (_ Server) Other() error { return nil }
        "#});

        let start = &file.funcs[0];
        let recv = start.recv.as_ref().unwrap();
        assert_eq!(recv.names, vec!["s"]);
        assert_eq!(recv.ty, TypeExpr::pointer(TypeExpr::ident("Server")));

        let tag = &file.funcs[1];
        let recv = tag.recv.as_ref().unwrap();
        assert!(recv.names.is_empty());
        assert_eq!(recv.ty, TypeExpr::ident("Server"));

        let other = &file.funcs[2];
        let recv = other.recv.as_ref().unwrap();
        assert_eq!(recv.names, vec!["_"]);
    }

    #[test]
    fn test_type_parameters() {
        let file = parse(indoc! {r#"
            package testpkg

            func First[T any](items []T) (T, error) { return items[0], nil }
            func Pick[K comparable, V any](m map[K]V, k K) (V, error) { return m[k], nil }
            func Clamp[T int | ~float64](v T) (T, error) { return v, nil }
        "#});

        let first = &file.funcs[0];
        assert_eq!(first.type_params.len(), 1);
        assert_eq!(first.type_params[0].names, vec!["T"]);
        assert_eq!(first.type_params[0].ty, TypeExpr::ident("any"));

        let pick = &file.funcs[1];
        assert_eq!(pick.type_params.len(), 2);
        assert_eq!(pick.type_params[0].names, vec!["K"]);
        assert_eq!(pick.type_params[1].names, vec!["V"]);

        let clamp = &file.funcs[2];
        assert_eq!(
            clamp.type_params[0].ty,
            TypeExpr::Binary {
                op: "|".to_string(),
                left: Box::new(TypeExpr::ident("int")),
                right: Box::new(TypeExpr::Unary {
                    op: "~".to_string(),
                    operand: Box::new(TypeExpr::ident("float64")),
                }),
            }
        );
    }

    #[test]
    fn test_grouped_type_parameters() {
        let file = parse(indoc! {r#"
            package testpkg

            func Zip[T, U any](t T, u U) (T, U, error) { return t, u, nil }
        "#});

        let zip = &file.funcs[0];
        assert_eq!(zip.type_params.len(), 1);
        assert_eq!(zip.type_params[0].names, vec!["T", "U"]);
        assert_eq!(zip.type_params[0].ty, TypeExpr::ident("any"));
    }

    #[test]
    fn test_generic_instantiation_types() {
        let file = parse(indoc! {r#"
            package testpkg

            func Get(l List[int]) (Pair[K, V], error) { return l.p, nil }
        "#});

        let get = &file.funcs[0];
        assert_eq!(
            get.params[0].ty,
            TypeExpr::Index {
                base: Box::new(TypeExpr::ident("List")),
                index: Box::new(TypeExpr::ident("int")),
            }
        );
        assert_eq!(
            get.results[0].ty,
            TypeExpr::IndexList {
                base: Box::new(TypeExpr::ident("Pair")),
                indices: vec![TypeExpr::ident("K"), TypeExpr::ident("V")],
            }
        );
    }

    #[test]
    fn test_variadic_parameter() {
        let file = parse(indoc! {r#"
            package testpkg

            func Sum(nums ...int) (int, error) { return 0, nil }
        "#});

        let sum = &file.funcs[0];
        assert_eq!(sum.params[0].names, vec!["nums"]);
        assert_eq!(sum.params[0].ty, TypeExpr::ellipsis(TypeExpr::ident("int")));
    }

    #[test]
    fn test_unnamed_parameters() {
        let file = parse(indoc! {r#"
            package testpkg

            func ignore(int, string) error { return nil }
        "#});

        let ignore = &file.funcs[0];
        assert_eq!(ignore.params.len(), 2);
        assert!(ignore.params[0].names.is_empty());
        assert_eq!(ignore.params[0].ty, TypeExpr::ident("int"));
        assert_eq!(ignore.params[1].ty, TypeExpr::ident("string"));
        assert_eq!(ignore.results.len(), 1);
    }

    #[test]
    fn test_unsupported_types_carried() {
        let file = parse(indoc! {r#"
            package testpkg

            func load(m map[string]int, w io.Writer, b []byte) error { return nil }
        "#});

        let load = &file.funcs[0];
        assert!(matches!(load.params[0].ty, TypeExpr::Unsupported { .. }));
        assert!(matches!(
            &load.params[1].ty,
            TypeExpr::Unsupported { text, .. } if text == "io.Writer"
        ));
        assert!(matches!(load.params[2].ty, TypeExpr::Unsupported { .. }));
    }

    #[test]
    fn test_struct_literal_type_carried() {
        let file = parse(indoc! {r#"
            package testpkg

            func box(v struct{ X int }) error { return nil }
        "#});

        assert!(matches!(
            file.funcs[0].params[0].ty,
            TypeExpr::Unsupported { .. }
        ));
    }

    #[test]
    fn test_body_positions() {
        let file = parse(indoc! {r#"
            package testpkg

            func tagged() (int, error) {
                //@gen_must
                return 1, nil
            }

            func late() (int, error) {
                x := 1
                //@gen_must
                return x, nil
            }
        "#});

        let tagged = &file.funcs[0];
        let body = tagged.body.as_ref().unwrap();
        assert_eq!(body.comments.len(), 1);
        assert_eq!(body.comments[0].text, "@gen_must");
        let first_stmt = body.first_stmt.as_ref().unwrap();
        assert!(body.comments[0].span.start.is_before(first_stmt));

        let late = &file.funcs[1];
        let body = late.body.as_ref().unwrap();
        let first_stmt = body.first_stmt.as_ref().unwrap();
        assert!(!body.comments[0].span.start.is_before(first_stmt));
    }

    #[test]
    fn test_empty_body() {
        let file = parse(indoc! {r#"
            package testpkg

            func noop() {
                //@gen_must
            }
        "#});

        let body = file.funcs[0].body.as_ref().unwrap();
        assert!(body.first_stmt.is_none());
        assert_eq!(body.comments.len(), 1);
    }

    #[test]
    fn test_nested_braces_in_body() {
        let file = parse(indoc! {r#"
            package testpkg

            func outer() error {
                f := func() string { return "{" }
                _ = f
                return nil
            }

            func after() error { return nil }
        "#});

        assert_eq!(file.funcs.len(), 2);
        assert_eq!(file.funcs[1].name, "after");
    }

    #[test]
    fn test_bodiless_function() {
        let file = parse(indoc! {r#"
            package testpkg

            func asmStub(x int) int

            func real() error { return nil }
        "#});

        assert_eq!(file.funcs.len(), 2);
        assert!(file.funcs[0].body.is_none());
        assert!(file.funcs[1].body.is_some());
    }

    #[test]
    fn test_named_results() {
        let file = parse(indoc! {r#"
            package testpkg

            func open() (f *File, err error) { return nil, nil }
        "#});

        let open = &file.funcs[0];
        assert_eq!(open.results.len(), 2);
        assert_eq!(open.results[0].names, vec!["f"]);
        assert_eq!(open.results[1].names, vec!["err"]);
    }

    #[test]
    fn test_single_bare_result() {
        let file = parse(indoc! {r#"
            package testpkg

            func fail() error { return nil }
        "#});

        let fail = &file.funcs[0];
        assert_eq!(fail.results.len(), 1);
        assert_eq!(fail.results[0].ty, TypeExpr::ident("error"));
    }
}
