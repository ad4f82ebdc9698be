//! Tokenizer for the Lua subset, built on `lachs`
//!
//! The parser only needs a `Vec<Token>`; this module is one way of getting
//! there from source text. Comments are not tokens, so they are removed with
//! [`strip_comments`] before lexing.

use crate::error::LexError as CrateLexError;
use crate::token::{Position, Token, TokenKind};

#[lachs::token]
pub enum LuaToken {
    #[terminal("nil")]
    Nil,
    #[terminal("true")]
    True,
    #[terminal("false")]
    False,
    #[terminal("not")]
    Not,
    #[terminal("and")]
    And,
    #[terminal("or")]
    Or,
    #[literal("[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    #[literal("[0-9]+\\.[0-9]+([eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+")]
    FloatLiteral,
    #[literal("0[xX][0-9a-fA-F]+|[0-9]+")]
    IntegerLiteral,
    #[literal(r#""([^"\\]|\\.)*"|'([^'\\]|\\.)*'|\[\[([^\]]|\][^\]])*\]\]|\[=\[([^\]]|\][^=]|\]=[^\]])*\]=\]"#)]
    StringLiteral,
    #[terminal(";")]
    Semicolon,
    #[terminal("=")]
    Equals,
    #[terminal(",")]
    Comma,
    #[terminal(".")]
    Dot,
    #[terminal(":")]
    Colon,
    #[terminal("...")]
    TripleDot,
    #[terminal("(")]
    LParen,
    #[terminal(")")]
    RParen,
    #[terminal("[")]
    LBracket,
    #[terminal("]")]
    RBracket,
    #[terminal("{")]
    LBrace,
    #[terminal("}")]
    RBrace,
    #[terminal("+")]
    Plus,
    #[terminal("-")]
    Minus,
    #[terminal("*")]
    Star,
    #[terminal("/")]
    Slash,
    #[terminal("//")]
    DoubleSlash,
    #[terminal("^")]
    Hat,
    #[terminal("%")]
    Percent,
    #[terminal("&")]
    Ampersand,
    #[terminal("~")]
    Tilda,
    #[terminal("|")]
    Pipe,
    #[terminal(">>")]
    ShiftRight,
    #[terminal("<<")]
    ShiftLeft,
    #[terminal("..")]
    DoubleDot,
    #[terminal("==")]
    DoubleEquals,
    #[terminal("~=")]
    NotEquals,
    #[terminal("<")]
    LessThan,
    #[terminal("<=")]
    LessEquals,
    #[terminal(">")]
    GreaterThan,
    #[terminal(">=")]
    GreaterEquals,
    #[terminal("#")]
    Sharp,
}

impl LuaToken {
    pub fn pos(&self) -> Position {
        match self {
            LuaToken::Nil(inner) => Position::from(&inner.position),
            LuaToken::True(inner) => Position::from(&inner.position),
            LuaToken::False(inner) => Position::from(&inner.position),
            LuaToken::Not(inner) => Position::from(&inner.position),
            LuaToken::And(inner) => Position::from(&inner.position),
            LuaToken::Or(inner) => Position::from(&inner.position),
            LuaToken::Identifier(inner) => Position::from(&inner.position),
            LuaToken::FloatLiteral(inner) => Position::from(&inner.position),
            LuaToken::IntegerLiteral(inner) => Position::from(&inner.position),
            LuaToken::StringLiteral(inner) => Position::from(&inner.position),
            LuaToken::Semicolon(inner) => Position::from(&inner.position),
            LuaToken::Equals(inner) => Position::from(&inner.position),
            LuaToken::Comma(inner) => Position::from(&inner.position),
            LuaToken::Dot(inner) => Position::from(&inner.position),
            LuaToken::Colon(inner) => Position::from(&inner.position),
            LuaToken::TripleDot(inner) => Position::from(&inner.position),
            LuaToken::LParen(inner) => Position::from(&inner.position),
            LuaToken::RParen(inner) => Position::from(&inner.position),
            LuaToken::LBracket(inner) => Position::from(&inner.position),
            LuaToken::RBracket(inner) => Position::from(&inner.position),
            LuaToken::LBrace(inner) => Position::from(&inner.position),
            LuaToken::RBrace(inner) => Position::from(&inner.position),
            LuaToken::Plus(inner) => Position::from(&inner.position),
            LuaToken::Minus(inner) => Position::from(&inner.position),
            LuaToken::Star(inner) => Position::from(&inner.position),
            LuaToken::Slash(inner) => Position::from(&inner.position),
            LuaToken::DoubleSlash(inner) => Position::from(&inner.position),
            LuaToken::Hat(inner) => Position::from(&inner.position),
            LuaToken::Percent(inner) => Position::from(&inner.position),
            LuaToken::Ampersand(inner) => Position::from(&inner.position),
            LuaToken::Tilda(inner) => Position::from(&inner.position),
            LuaToken::Pipe(inner) => Position::from(&inner.position),
            LuaToken::ShiftRight(inner) => Position::from(&inner.position),
            LuaToken::ShiftLeft(inner) => Position::from(&inner.position),
            LuaToken::DoubleDot(inner) => Position::from(&inner.position),
            LuaToken::DoubleEquals(inner) => Position::from(&inner.position),
            LuaToken::NotEquals(inner) => Position::from(&inner.position),
            LuaToken::LessThan(inner) => Position::from(&inner.position),
            LuaToken::LessEquals(inner) => Position::from(&inner.position),
            LuaToken::GreaterThan(inner) => Position::from(&inner.position),
            LuaToken::GreaterEquals(inner) => Position::from(&inner.position),
            LuaToken::Sharp(inner) => Position::from(&inner.position),
        }
    }

    /// The parser-facing kind of this token
    pub fn kind(&self) -> TokenKind {
        match self {
            LuaToken::Nil(_) => TokenKind::Nil,
            LuaToken::True(_) => TokenKind::True,
            LuaToken::False(_) => TokenKind::False,
            LuaToken::Not(_) => TokenKind::Not,
            LuaToken::And(_) => TokenKind::And,
            LuaToken::Or(_) => TokenKind::Or,
            LuaToken::Identifier(_) => TokenKind::Identifier,
            LuaToken::FloatLiteral(_) => TokenKind::FloatLiteral,
            LuaToken::IntegerLiteral(_) => TokenKind::IntegerLiteral,
            LuaToken::StringLiteral(_) => TokenKind::String,
            LuaToken::Semicolon(_) => TokenKind::Semicolon,
            LuaToken::Equals(_) => TokenKind::Equals,
            LuaToken::Comma(_) => TokenKind::Comma,
            LuaToken::Dot(_) => TokenKind::Dot,
            LuaToken::Colon(_) => TokenKind::Colon,
            LuaToken::TripleDot(_) => TokenKind::TripleDot,
            LuaToken::LParen(_) => TokenKind::OpeningBracket,
            LuaToken::RParen(_) => TokenKind::ClosingBracket,
            LuaToken::LBracket(_) => TokenKind::OpeningSquareBracket,
            LuaToken::RBracket(_) => TokenKind::ClosingSquareBracket,
            LuaToken::LBrace(_) => TokenKind::OpeningCurlyBracket,
            LuaToken::RBrace(_) => TokenKind::ClosingCurlyBracket,
            LuaToken::Plus(_) => TokenKind::Plus,
            LuaToken::Minus(_) => TokenKind::Minus,
            LuaToken::Star(_) => TokenKind::Asterisk,
            LuaToken::Slash(_) => TokenKind::Slash,
            LuaToken::DoubleSlash(_) => TokenKind::DoubleSlash,
            LuaToken::Hat(_) => TokenKind::Hat,
            LuaToken::Percent(_) => TokenKind::Percent,
            LuaToken::Ampersand(_) => TokenKind::Ampersand,
            LuaToken::Tilda(_) => TokenKind::Tilda,
            LuaToken::Pipe(_) => TokenKind::VerticalLine,
            LuaToken::ShiftRight(_) => TokenKind::ShiftRight,
            LuaToken::ShiftLeft(_) => TokenKind::ShiftLeft,
            LuaToken::DoubleDot(_) => TokenKind::DoubleDot,
            LuaToken::DoubleEquals(_) => TokenKind::DoubleEquals,
            LuaToken::NotEquals(_) => TokenKind::TildaEquals,
            LuaToken::LessThan(_) => TokenKind::Less,
            LuaToken::LessEquals(_) => TokenKind::LessOrEqual,
            LuaToken::GreaterThan(_) => TokenKind::Greater,
            LuaToken::GreaterEquals(_) => TokenKind::GreaterOrEqual,
            LuaToken::Sharp(_) => TokenKind::Sharp,
        }
    }

    /// Converts into the parser's token model
    pub fn into_token(self) -> Token {
        let kind = self.kind();
        let position = self.pos();
        let lexeme = match self {
            LuaToken::Identifier(inner) => inner.value,
            LuaToken::FloatLiteral(inner) => inner.value,
            LuaToken::IntegerLiteral(inner) => inner.value,
            LuaToken::StringLiteral(inner) => inner.value,
            _ => kind.text().unwrap_or_default().to_string(),
        };
        Token::new(kind, lexeme, position)
    }
}

/// Splits `source` into parser tokens
///
/// Comments are stripped first, so callers can hand in raw file contents.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CrateLexError> {
    let source = strip_comments(source);
    let lexed = LuaToken::lex(&source).map_err(|err| CrateLexError::new(err.to_string()))?;
    Ok(lexed.into_iter().map(LuaToken::into_token).collect())
}

/// Removes `-- line` and `--[[ long ]]` comments
///
/// Quoted and long string literals are left alone. Newlines inside long
/// comments are kept so that line numbers in positions still match the
/// original text.
pub fn strip_comments(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                result.push(c);
                while let Some(inner) = chars.next() {
                    result.push(inner);
                    if inner == '\\' {
                        if let Some(escaped) = chars.next() {
                            result.push(escaped);
                        }
                    } else if inner == c || inner == '\n' {
                        break;
                    }
                }
            }
            '[' => {
                result.push(c);
                let mut lookahead = chars.clone();
                let mut level = 0;
                while lookahead.next_if_eq(&'=').is_some() {
                    level += 1;
                }
                if lookahead.peek() == Some(&'[') {
                    result.extend(chars.by_ref().take(level + 1));
                    let close = format!("]{}]", "=".repeat(level));
                    for inner in chars.by_ref() {
                        result.push(inner);
                        if result.ends_with(&close) {
                            break;
                        }
                    }
                }
            }
            '-' if chars.peek() == Some(&'-') => {
                chars.next();
                let mut lookahead = chars.clone();
                if lookahead.next() == Some('[') && lookahead.next() == Some('[') {
                    chars.next();
                    chars.next();
                    let mut previous = '\0';
                    for inner in chars.by_ref() {
                        if inner == '\n' {
                            result.push('\n');
                        }
                        if previous == ']' && inner == ']' {
                            break;
                        }
                        previous = inner;
                    }
                } else {
                    for inner in chars.by_ref() {
                        if inner == '\n' {
                            result.push('\n');
                            break;
                        }
                    }
                }
            }
            _ => result.push(c),
        }
    }

    result
}
