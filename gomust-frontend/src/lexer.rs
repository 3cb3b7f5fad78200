//! Go declaration lexer
//!
//! Tokenizes Go source into a stream the declaration parser can walk.
//! Comments and newlines are kept as tokens: the tag scanner needs comment
//! positions, and newlines terminate skipped declarations. Only the
//! keywords that shape declaration structure are distinguished; every other
//! Go keyword lexes as an ordinary identifier because function bodies are
//! scanned for balance, not parsed.

use gomust_common::{GenError, SourceLocation, SourceSpan};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Characters that may form a multi-character operator run. `*`, `|` and
/// `~` are excluded: the type grammar needs them as single tokens.
const OPERATOR_CHARS: &str = "+-/%<>=!&^:";

/// Go token types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenType {
    // Identifiers and literal text (values are never interpreted)
    Ident(String),
    Number(String),
    StringLit(String),
    RuneLit(String),

    // Keywords that affect declaration structure
    Package,
    Import,
    Func,
    Type,
    Var,
    Const,
    Map,
    Chan,
    Struct,
    Interface,

    // Punctuation the declaration grammar consumes directly
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Comma,        // ,
    Semicolon,    // ;
    Dot,          // .
    Star,         // *
    Pipe,         // |
    Tilde,        // ~
    Ellipsis,     // ...

    // Any other operator run, maximal munch (":=", "<-", "&&", ...)
    Operator(String),

    // Trivia kept as tokens
    LineComment(String),
    BlockComment(String),
    Newline,
    EndOfFile,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Ident(s) => write!(f, "{}", s),
            TokenType::Number(s) => write!(f, "{}", s),
            TokenType::StringLit(s) => write!(f, "\"{}\"", s),
            TokenType::RuneLit(s) => write!(f, "'{}'", s),

            TokenType::Package => write!(f, "package"),
            TokenType::Import => write!(f, "import"),
            TokenType::Func => write!(f, "func"),
            TokenType::Type => write!(f, "type"),
            TokenType::Var => write!(f, "var"),
            TokenType::Const => write!(f, "const"),
            TokenType::Map => write!(f, "map"),
            TokenType::Chan => write!(f, "chan"),
            TokenType::Struct => write!(f, "struct"),
            TokenType::Interface => write!(f, "interface"),

            TokenType::LeftParen => write!(f, "("),
            TokenType::RightParen => write!(f, ")"),
            TokenType::LeftBrace => write!(f, "{{"),
            TokenType::RightBrace => write!(f, "}}"),
            TokenType::LeftBracket => write!(f, "["),
            TokenType::RightBracket => write!(f, "]"),
            TokenType::Comma => write!(f, ","),
            TokenType::Semicolon => write!(f, ";"),
            TokenType::Dot => write!(f, "."),
            TokenType::Star => write!(f, "*"),
            TokenType::Pipe => write!(f, "|"),
            TokenType::Tilde => write!(f, "~"),
            TokenType::Ellipsis => write!(f, "..."),

            TokenType::Operator(s) => write!(f, "{}", s),

            TokenType::LineComment(s) => write!(f, "//{}", s),
            TokenType::BlockComment(s) => write!(f, "/*{}*/", s),
            TokenType::Newline => write!(f, "\\n"),
            TokenType::EndOfFile => write!(f, "EOF"),
        }
    }
}

/// A token with location information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, span: SourceSpan) -> Self {
        Self { token_type, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.token_type, self.span.start)
    }
}

/// Go declaration lexer
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
    filename: String,
    keywords: HashMap<String, TokenType>,
}

impl Lexer {
    /// Create a new lexer over one source file
    pub fn new(filename: &str, input: &str) -> Self {
        let mut lexer = Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            filename: filename.to_string(),
            keywords: HashMap::new(),
        };

        lexer.initialize_keywords();
        lexer
    }

    fn initialize_keywords(&mut self) {
        let keywords = [
            ("package", TokenType::Package),
            ("import", TokenType::Import),
            ("func", TokenType::Func),
            ("type", TokenType::Type),
            ("var", TokenType::Var),
            ("const", TokenType::Const),
            ("map", TokenType::Map),
            ("chan", TokenType::Chan),
            ("struct", TokenType::Struct),
            ("interface", TokenType::Interface),
        ];

        for (keyword, token_type) in keywords {
            self.keywords.insert(keyword.to_string(), token_type);
        }
    }

    /// Get current character
    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(ch)
        } else {
            None
        }
    }

    /// Get current location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(&self.filename, self.line, self.column)
    }

    /// Skip whitespace (except newlines, which are tokens)
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() && ch != '\n' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Tokenize an identifier or keyword
    fn tokenize_identifier(&mut self) -> TokenType {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if let Some(keyword_token) = self.keywords.get(&identifier) {
            keyword_token.clone()
        } else {
            TokenType::Ident(identifier)
        }
    }

    /// Tokenize a numeric literal. The text is kept verbatim; the generator
    /// never interprets numbers, it only has to step over them.
    fn tokenize_number(&mut self) -> TokenType {
        let mut number = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                number.push(ch);
                self.advance();
            } else if (ch == '+' || ch == '-')
                && matches!(number.chars().last(), Some('e' | 'E' | 'p' | 'P'))
            {
                // Exponent sign, as in 1e+10
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        TokenType::Number(number)
    }

    /// Tokenize an interpreted string literal. Escape sequences are kept
    /// as written; only the closing quote matters here.
    fn tokenize_string_literal(&mut self) -> Result<TokenType, GenError> {
        self.advance(); // Skip opening quote
        let mut string = String::new();

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(TokenType::StringLit(string));
                }
                '\\' => {
                    string.push(ch);
                    self.advance();
                    if let Some(escaped) = self.current_char() {
                        string.push(escaped);
                        self.advance();
                    }
                }
                '\n' => {
                    return Err(GenError::lex(
                        "unterminated string literal".to_string(),
                        self.current_location(),
                    ));
                }
                _ => {
                    string.push(ch);
                    self.advance();
                }
            }
        }

        Err(GenError::lex(
            "unterminated string literal".to_string(),
            self.current_location(),
        ))
    }

    /// Tokenize a raw string literal (backticks, may span lines)
    fn tokenize_raw_string(&mut self) -> Result<TokenType, GenError> {
        self.advance(); // Skip opening backtick
        let mut string = String::new();

        while let Some(ch) = self.current_char() {
            if ch == '`' {
                self.advance();
                return Ok(TokenType::StringLit(string));
            }
            string.push(ch);
            self.advance();
        }

        Err(GenError::lex(
            "unterminated raw string literal".to_string(),
            self.current_location(),
        ))
    }

    /// Tokenize a rune literal
    fn tokenize_rune_literal(&mut self) -> Result<TokenType, GenError> {
        self.advance(); // Skip opening quote
        let mut rune = String::new();

        while let Some(ch) = self.current_char() {
            match ch {
                '\'' => {
                    self.advance();
                    return Ok(TokenType::RuneLit(rune));
                }
                '\\' => {
                    rune.push(ch);
                    self.advance();
                    if let Some(escaped) = self.current_char() {
                        rune.push(escaped);
                        self.advance();
                    }
                }
                '\n' => {
                    return Err(GenError::lex(
                        "unterminated rune literal".to_string(),
                        self.current_location(),
                    ));
                }
                _ => {
                    rune.push(ch);
                    self.advance();
                }
            }
        }

        Err(GenError::lex(
            "unterminated rune literal".to_string(),
            self.current_location(),
        ))
    }

    /// Tokenize line comment, text without the leading slashes
    fn tokenize_line_comment(&mut self) -> TokenType {
        self.advance(); // Skip first '/'
        self.advance(); // Skip second '/'

        let mut comment = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            comment.push(ch);
            self.advance();
        }

        TokenType::LineComment(comment)
    }

    /// Tokenize block comment, text without the delimiters
    fn tokenize_block_comment(&mut self) -> Result<TokenType, GenError> {
        self.advance(); // Skip '/'
        self.advance(); // Skip '*'

        let mut comment = String::new();
        let mut found_end = false;

        while let Some(ch) = self.current_char() {
            if ch == '*' && self.peek_char(1) == Some('/') {
                self.advance(); // Skip '*'
                self.advance(); // Skip '/'
                found_end = true;
                break;
            }
            comment.push(ch);
            self.advance();
        }

        if !found_end {
            return Err(GenError::lex(
                "unterminated block comment".to_string(),
                self.current_location(),
            ));
        }

        Ok(TokenType::BlockComment(comment))
    }

    /// Tokenize a run of operator characters, maximal munch
    fn tokenize_operator(&mut self) -> TokenType {
        let mut op = String::new();
        while let Some(ch) = self.current_char() {
            if OPERATOR_CHARS.contains(ch) {
                op.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        TokenType::Operator(op)
    }

    /// Get next token
    pub fn next_token(&mut self) -> Result<Token, GenError> {
        self.skip_whitespace();

        let start_location = self.current_location();

        let token_type = match self.current_char() {
            None => TokenType::EndOfFile,

            Some('\n') => {
                self.advance();
                TokenType::Newline
            }

            Some(ch) if ch.is_alphabetic() || ch == '_' => self.tokenize_identifier(),

            Some(ch) if ch.is_ascii_digit() => self.tokenize_number(),

            Some('"') => self.tokenize_string_literal()?,
            Some('`') => self.tokenize_raw_string()?,
            Some('\'') => self.tokenize_rune_literal()?,

            Some('/') => {
                if self.peek_char(1) == Some('/') {
                    self.tokenize_line_comment()
                } else if self.peek_char(1) == Some('*') {
                    self.tokenize_block_comment()?
                } else {
                    self.tokenize_operator()
                }
            }

            Some('.') => {
                if self.peek_char(1) == Some('.') && self.peek_char(2) == Some('.') {
                    self.advance();
                    self.advance();
                    self.advance();
                    TokenType::Ellipsis
                } else {
                    self.advance();
                    TokenType::Dot
                }
            }

            Some('(') => {
                self.advance();
                TokenType::LeftParen
            }
            Some(')') => {
                self.advance();
                TokenType::RightParen
            }
            Some('{') => {
                self.advance();
                TokenType::LeftBrace
            }
            Some('}') => {
                self.advance();
                TokenType::RightBrace
            }
            Some('[') => {
                self.advance();
                TokenType::LeftBracket
            }
            Some(']') => {
                self.advance();
                TokenType::RightBracket
            }
            Some(',') => {
                self.advance();
                TokenType::Comma
            }
            Some(';') => {
                self.advance();
                TokenType::Semicolon
            }
            Some('*') => {
                self.advance();
                TokenType::Star
            }
            Some('|') => {
                self.advance();
                TokenType::Pipe
            }
            Some('~') => {
                self.advance();
                TokenType::Tilde
            }

            Some(ch) if OPERATOR_CHARS.contains(ch) => self.tokenize_operator(),

            Some(ch) => {
                return Err(GenError::lex(
                    format!("unexpected character: {}", ch),
                    self.current_location(),
                ));
            }
        };

        let end_location = self.current_location();
        let span = SourceSpan::new(start_location, end_location);

        Ok(Token::new(token_type, span))
    }

    /// Tokenize entire input into a vector of tokens
    pub fn tokenize(&mut self) -> Result<Vec<Token>, GenError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.token_type, TokenType::EndOfFile);
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new("test.go", input);
        lexer.tokenize().unwrap()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = tokenize("package main func doThing return");

        assert_eq!(tokens.len(), 5); // 4 tokens + EOF
        assert_eq!(tokens[0].token_type, TokenType::Package);
        assert_eq!(tokens[1].token_type, TokenType::Ident("main".to_string()));
        assert_eq!(tokens[2].token_type, TokenType::Func);
        // Keywords that do not shape declarations stay identifiers
        assert_eq!(tokens[3].token_type, TokenType::Ident("return".to_string()));
    }

    #[test]
    fn test_type_punctuation() {
        let tokens = tokenize("*T ...U ~int | string");

        assert_eq!(tokens[0].token_type, TokenType::Star);
        assert_eq!(tokens[1].token_type, TokenType::Ident("T".to_string()));
        assert_eq!(tokens[2].token_type, TokenType::Ellipsis);
        assert_eq!(tokens[3].token_type, TokenType::Ident("U".to_string()));
        assert_eq!(tokens[4].token_type, TokenType::Tilde);
        assert_eq!(tokens[5].token_type, TokenType::Ident("int".to_string()));
        assert_eq!(tokens[6].token_type, TokenType::Pipe);
        assert_eq!(tokens[7].token_type, TokenType::Ident("string".to_string()));
    }

    #[test]
    fn test_operator_munch() {
        let tokens = tokenize(":= <- == && ^=");

        let expected = [":=", "<-", "==", "&&", "^="];
        for (i, op) in expected.iter().enumerate() {
            assert_eq!(tokens[i].token_type, TokenType::Operator(op.to_string()));
        }
    }

    #[test]
    fn test_comments_preserved() {
        let tokens = tokenize("//@gen_must\n/* block */ x");

        assert_eq!(
            tokens[0].token_type,
            TokenType::LineComment("@gen_must".to_string())
        );
        assert_eq!(tokens[1].token_type, TokenType::Newline);
        assert_eq!(
            tokens[2].token_type,
            TokenType::BlockComment(" block ".to_string())
        );
        assert_eq!(tokens[3].token_type, TokenType::Ident("x".to_string()));
    }

    #[test]
    fn test_string_literals() {
        let tokens = tokenize(r#""has a { brace" `raw
multiline {`"#);

        assert_eq!(
            tokens[0].token_type,
            TokenType::StringLit("has a { brace".to_string())
        );
        assert_eq!(
            tokens[1].token_type,
            TokenType::StringLit("raw\nmultiline {".to_string())
        );
    }

    #[test]
    fn test_string_escapes_kept_verbatim() {
        let tokens = tokenize(r#""quote \" inside""#);
        assert_eq!(
            tokens[0].token_type,
            TokenType::StringLit(r#"quote \" inside"#.to_string())
        );
    }

    #[test]
    fn test_rune_literals() {
        let tokens = tokenize(r"'a' '\'' '\n'");

        assert_eq!(tokens[0].token_type, TokenType::RuneLit("a".to_string()));
        assert_eq!(tokens[1].token_type, TokenType::RuneLit(r"\'".to_string()));
        assert_eq!(tokens[2].token_type, TokenType::RuneLit(r"\n".to_string()));
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("42 0xff 1.5e+10");

        assert_eq!(tokens[0].token_type, TokenType::Number("42".to_string()));
        assert_eq!(tokens[1].token_type, TokenType::Number("0xff".to_string()));
        assert_eq!(
            tokens[2].token_type,
            TokenType::Number("1.5e+10".to_string())
        );
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("ab\ncd");

        assert_eq!(tokens[0].span.start.line, 1);
        assert_eq!(tokens[0].span.start.column, 1);
        assert_eq!(tokens[0].span.end.column, 3);
        assert_eq!(tokens[2].span.start.line, 2);
        assert_eq!(tokens[2].span.start.column, 1);
        assert_eq!(tokens[2].span.start.filename, "test.go");
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new("test.go", "\"open\nx");
        let err = lexer.tokenize().unwrap_err();
        assert!(matches!(err, GenError::Lex { .. }));
    }

    #[test]
    fn test_simple_declaration() {
        let tokens = tokenize("func Divide(a, b int) (int, error) {\n}");

        assert_eq!(tokens[0].token_type, TokenType::Func);
        assert_eq!(tokens[1].token_type, TokenType::Ident("Divide".to_string()));
        assert_eq!(tokens[2].token_type, TokenType::LeftParen);
        assert_eq!(tokens[3].token_type, TokenType::Ident("a".to_string()));
        assert_eq!(tokens[4].token_type, TokenType::Comma);
        let last = &tokens[tokens.len() - 1];
        assert_eq!(last.token_type, TokenType::EndOfFile);
    }
}
