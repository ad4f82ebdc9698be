//! Token model consumed by the parser
//!
//! Tokens are produced by an external lexer (see [`crate::lexer`] for the one
//! shipped with this crate) and are only ever read by the parser.

use std::fmt;

use lachs::Span;

/// Where a token or node sits in the source, as `(line, column)` pairs
///
/// Only the coordinates are kept. The source text itself is needed again
/// only when a diagnostic is rendered, see [`Position::to_span`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub start: (usize, usize),
    pub end: (usize, usize),
}

impl Position {
    pub fn new(start: (usize, usize), end: (usize, usize)) -> Self {
        Self { start, end }
    }

    /// Smallest position covering both `self` and `other`
    pub fn merge(&self, other: &Position) -> Position {
        Position {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// A `lachs` span over `source`, for rendering an excerpt
    pub fn to_span(&self, source: &str) -> Span {
        Span {
            start: self.start,
            end: self.end,
            source: source.to_string(),
        }
    }
}

impl From<&Span> for Position {
    fn from(span: &Span) -> Self {
        Self::new(span.start, span.end)
    }
}

/// Every kind of token the Lua grammar knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // keywords
    Nil,
    True,
    False,
    Not,
    And,
    Or,

    // literals
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    String,

    // punctuation
    Semicolon,
    Equals,
    Comma,
    Dot,
    Colon,
    TripleDot,
    OpeningBracket,
    ClosingBracket,
    OpeningSquareBracket,
    ClosingSquareBracket,
    OpeningCurlyBracket,
    ClosingCurlyBracket,

    // operators
    Plus,
    Minus,
    Asterisk,
    Slash,
    DoubleSlash,
    Hat,
    Percent,
    Ampersand,
    Tilda,
    VerticalLine,
    ShiftRight,
    ShiftLeft,
    DoubleDot,
    DoubleEquals,
    TildaEquals,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Sharp,
}

impl TokenKind {
    /// The fixed spelling of this kind, `None` for literals whose text varies
    pub fn text(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Nil => "nil",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Not => "not",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Identifier
            | TokenKind::IntegerLiteral
            | TokenKind::FloatLiteral
            | TokenKind::String => return None,
            TokenKind::Semicolon => ";",
            TokenKind::Equals => "=",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            TokenKind::TripleDot => "...",
            TokenKind::OpeningBracket => "(",
            TokenKind::ClosingBracket => ")",
            TokenKind::OpeningSquareBracket => "[",
            TokenKind::ClosingSquareBracket => "]",
            TokenKind::OpeningCurlyBracket => "{",
            TokenKind::ClosingCurlyBracket => "}",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::DoubleSlash => "//",
            TokenKind::Hat => "^",
            TokenKind::Percent => "%",
            TokenKind::Ampersand => "&",
            TokenKind::Tilda => "~",
            TokenKind::VerticalLine => "|",
            TokenKind::ShiftRight => ">>",
            TokenKind::ShiftLeft => "<<",
            TokenKind::DoubleDot => "..",
            TokenKind::DoubleEquals => "==",
            TokenKind::TildaEquals => "~=",
            TokenKind::Less => "<",
            TokenKind::LessOrEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterOrEqual => ">=",
            TokenKind::Sharp => "#",
        };
        Some(text)
    }

    /// Returns a human-readable description of the token kind
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Identifier => "identifier".to_string(),
            TokenKind::IntegerLiteral => "integer".to_string(),
            TokenKind::FloatLiteral => "float".to_string(),
            TokenKind::String => "string".to_string(),
            other => format!("'{}'", other.text().unwrap_or_default()),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A typed lexeme together with its place in the source
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    /// Token with the canonical spelling of `kind` and no source position
    ///
    /// Handy for building token streams by hand.
    pub fn synthetic(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self::new(kind, lexeme, Position::default())
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier => format!("identifier '{}'", self.lexeme),
            TokenKind::IntegerLiteral => format!("integer '{}'", self.lexeme),
            TokenKind::FloatLiteral => format!("float '{}'", self.lexeme),
            TokenKind::String => format!("string {}", self.lexeme),
            kind => kind.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_hold_coordinates_only() {
        assert_eq!(
            std::mem::size_of::<Position>(),
            4 * std::mem::size_of::<usize>()
        );
    }

    #[test]
    fn merge_covers_both() {
        let left = Position::new((1, 4), (1, 5));
        let right = Position::new((2, 0), (2, 3));
        assert_eq!(left.merge(&right), Position::new((1, 4), (2, 3)));
        assert_eq!(right.merge(&left), Position::new((1, 4), (2, 3)));
    }

    #[test]
    fn synthetic_tokens_have_no_position() {
        let token = Token::synthetic(TokenKind::Comma, ",");
        assert_eq!(token.position, Position::default());
        assert_eq!(token.describe(), "','");
    }
}
