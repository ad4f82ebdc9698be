//! Lua operators: how they are spelled and how tightly they bind

use crate::ast::{BinaryOperator, UnaryOperator};
use crate::parser::{BoxedParser, PrecedenceTable, choice, token};
use crate::token::{Token, TokenKind};

/// Binding power shared by every unary operator
pub const UNARY_PRECEDENCE: u8 = 11;

/// Binary operators by the token that spells them
pub const BINARY_OPERATORS: [(TokenKind, BinaryOperator); 21] = [
    (TokenKind::Or, BinaryOperator::LogicalOr),
    (TokenKind::And, BinaryOperator::LogicalAnd),
    (TokenKind::Less, BinaryOperator::LessThan),
    (TokenKind::Greater, BinaryOperator::GreaterThan),
    (TokenKind::LessOrEqual, BinaryOperator::LessOrEqual),
    (TokenKind::GreaterOrEqual, BinaryOperator::GreaterOrEqual),
    (TokenKind::TildaEquals, BinaryOperator::Inequality),
    (TokenKind::DoubleEquals, BinaryOperator::Equality),
    (TokenKind::VerticalLine, BinaryOperator::BitwiseOr),
    (TokenKind::Tilda, BinaryOperator::BitwiseXor),
    (TokenKind::Ampersand, BinaryOperator::BitwiseAnd),
    (TokenKind::ShiftLeft, BinaryOperator::BitwiseLeftShift),
    (TokenKind::ShiftRight, BinaryOperator::BitwiseRightShift),
    (TokenKind::DoubleDot, BinaryOperator::Concatenation),
    (TokenKind::Plus, BinaryOperator::Addition),
    (TokenKind::Minus, BinaryOperator::Subtraction),
    (TokenKind::Asterisk, BinaryOperator::Multiplication),
    (TokenKind::Slash, BinaryOperator::Division),
    (TokenKind::DoubleSlash, BinaryOperator::IntegerDivision),
    (TokenKind::Percent, BinaryOperator::Modulo),
    (TokenKind::Hat, BinaryOperator::Exponentiation),
];

/// Unary operators by the token that spells them
pub const UNARY_OPERATORS: [(TokenKind, UnaryOperator); 4] = [
    (TokenKind::Minus, UnaryOperator::UnaryMinus),
    (TokenKind::Not, UnaryOperator::Not),
    (TokenKind::Sharp, UnaryOperator::Length),
    (TokenKind::Tilda, UnaryOperator::BitwiseNegation),
];

/// Lua 5.3 operator priorities, loosest first
///
/// ```text
///  1  or
///  2  and
///  3  <  >  <=  >=  ~=  ==
///  4  |
///  5  ~
///  6  &
///  7  <<  >>
///  8  ..            (right)
///  9  +  -
/// 10  *  /  //  %
/// 11  unary not # - ~
/// 12  ^             (right)
/// ```
pub fn precedence_table() -> PrecedenceTable {
    PrecedenceTable::new()
        .left(TokenKind::Or, 1)
        .left(TokenKind::And, 2)
        .left(TokenKind::Less, 3)
        .left(TokenKind::Greater, 3)
        .left(TokenKind::LessOrEqual, 3)
        .left(TokenKind::GreaterOrEqual, 3)
        .left(TokenKind::TildaEquals, 3)
        .left(TokenKind::DoubleEquals, 3)
        .left(TokenKind::VerticalLine, 4)
        .left(TokenKind::Tilda, 5)
        .left(TokenKind::Ampersand, 6)
        .left(TokenKind::ShiftLeft, 7)
        .left(TokenKind::ShiftRight, 7)
        .right(TokenKind::DoubleDot, 8)
        .left(TokenKind::Plus, 9)
        .left(TokenKind::Minus, 9)
        .left(TokenKind::Asterisk, 10)
        .left(TokenKind::Slash, 10)
        .left(TokenKind::DoubleSlash, 10)
        .left(TokenKind::Percent, 10)
        .unary(TokenKind::Minus, UNARY_PRECEDENCE)
        .unary(TokenKind::Not, UNARY_PRECEDENCE)
        .unary(TokenKind::Sharp, UNARY_PRECEDENCE)
        .unary(TokenKind::Tilda, UNARY_PRECEDENCE)
        .right(TokenKind::Hat, 12)
}

pub fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    BINARY_OPERATORS
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map(|(_, operator)| *operator)
}

/// Token spelling `operator`
pub fn binary_token(operator: BinaryOperator) -> TokenKind {
    match operator {
        BinaryOperator::LogicalOr => TokenKind::Or,
        BinaryOperator::LogicalAnd => TokenKind::And,
        BinaryOperator::LessThan => TokenKind::Less,
        BinaryOperator::GreaterThan => TokenKind::Greater,
        BinaryOperator::LessOrEqual => TokenKind::LessOrEqual,
        BinaryOperator::GreaterOrEqual => TokenKind::GreaterOrEqual,
        BinaryOperator::Inequality => TokenKind::TildaEquals,
        BinaryOperator::Equality => TokenKind::DoubleEquals,
        BinaryOperator::BitwiseOr => TokenKind::VerticalLine,
        BinaryOperator::BitwiseXor => TokenKind::Tilda,
        BinaryOperator::BitwiseAnd => TokenKind::Ampersand,
        BinaryOperator::BitwiseLeftShift => TokenKind::ShiftLeft,
        BinaryOperator::BitwiseRightShift => TokenKind::ShiftRight,
        BinaryOperator::Concatenation => TokenKind::DoubleDot,
        BinaryOperator::Addition => TokenKind::Plus,
        BinaryOperator::Subtraction => TokenKind::Minus,
        BinaryOperator::Multiplication => TokenKind::Asterisk,
        BinaryOperator::Division => TokenKind::Slash,
        BinaryOperator::IntegerDivision => TokenKind::DoubleSlash,
        BinaryOperator::Modulo => TokenKind::Percent,
        BinaryOperator::Exponentiation => TokenKind::Hat,
    }
}

pub fn unary_operator(kind: TokenKind) -> Option<UnaryOperator> {
    UNARY_OPERATORS
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map(|(_, operator)| *operator)
}

/// binop ::= '+' | '-' | '*' | ... | 'and' | 'or'
pub fn binop() -> BoxedParser<BinaryOperator> {
    choice(
        BINARY_OPERATORS
            .iter()
            .map(|&(kind, operator)| token(kind) >> move |_| operator)
            .collect(),
    )
    .label("binary operator")
}

/// unop ::= '-' | 'not' | '#' | '~'
///
/// Yields the operator token too; its kind selects the binding power of the
/// operand and its span starts the resulting node.
pub fn unop() -> BoxedParser<(UnaryOperator, Token)> {
    choice(
        UNARY_OPERATORS
            .iter()
            .map(|&(kind, operator)| token(kind) >> move |token| (operator, token))
            .collect(),
    )
}
