//! # Expression AST Nodes
//!
//! Every value-producing construct of the language. Each payload struct keeps
//! the source span it was parsed from.
//!
//! Operators are split into an operator enum ([`UnaryOperator`],
//! [`BinaryOperator`]) and a node holding exactly as many operand slots as
//! the operator takes, so an operator node can never be missing an operand.

use crate::token::Position;

use super::NodeKind;
use super::statement::FieldInitialization;

#[derive(Debug, Clone)]
pub enum Expression {
    Nil(Nil),
    Boolean(Boolean),
    Integer(IntegerNumber),
    Float(FloatNumber),
    String(StringLiteral),
    Identifier(Identifier),
    Unsupported(Unsupported),
    Unary(UnaryOperation),
    Binary(BinaryOperation),
    Indexing(IndexingExpression),
    FunctionCall(FunctionCall),
    MethodCall(MethodCall),
    TableConstructor(TableConstructor),
}

#[derive(Debug, Clone)]
pub struct Nil {
    pub position: Position,
}

/// `true` or `false`
#[derive(Debug, Clone)]
pub struct Boolean {
    pub value: bool,
    pub position: Position,
}

/// Integer literal, kept as written
#[derive(Debug, Clone)]
pub struct IntegerNumber {
    pub value: String,
    pub position: Position,
}

impl IntegerNumber {
    /// Numeric value, if it fits into an `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match self
            .value
            .strip_prefix("0x")
            .or_else(|| self.value.strip_prefix("0X"))
        {
            Some(hex) => i64::from_str_radix(hex, 16).ok(),
            None => self.value.parse().ok(),
        }
    }
}

/// Float literal, kept as written
#[derive(Debug, Clone)]
pub struct FloatNumber {
    pub value: String,
    pub position: Position,
}

impl FloatNumber {
    pub fn as_f64(&self) -> Option<f64> {
        self.value.parse().ok()
    }
}

/// String literal without its quotes; escape sequences are left as written
#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub value: String,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct Identifier {
    pub name: String,
    pub position: Position,
}

/// Stand-in for syntax that is recognized but not supported yet
///
/// The parser reports a diagnostic for it and carries on.
#[derive(Debug, Clone)]
pub struct Unsupported {
    pub construct: String,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
    Length,
    UnaryMinus,
    BitwiseNegation,
}

impl UnaryOperator {
    pub fn kind(&self) -> NodeKind {
        match self {
            UnaryOperator::Not => NodeKind::Not,
            UnaryOperator::Length => NodeKind::Length,
            UnaryOperator::UnaryMinus => NodeKind::UnaryMinus,
            UnaryOperator::BitwiseNegation => NodeKind::BitwiseNegation,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "not",
            UnaryOperator::Length => "#",
            UnaryOperator::UnaryMinus => "-",
            UnaryOperator::BitwiseNegation => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    IntegerDivision,
    Exponentiation,
    Modulo,
    Concatenation,
    Equality,
    Inequality,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseLeftShift,
    BitwiseRightShift,
    LogicalAnd,
    LogicalOr,
}

impl BinaryOperator {
    pub fn kind(&self) -> NodeKind {
        match self {
            BinaryOperator::Addition => NodeKind::Addition,
            BinaryOperator::Subtraction => NodeKind::Subtraction,
            BinaryOperator::Multiplication => NodeKind::Multiplication,
            BinaryOperator::Division => NodeKind::Division,
            BinaryOperator::IntegerDivision => NodeKind::IntegerDivision,
            BinaryOperator::Exponentiation => NodeKind::Exponentiation,
            BinaryOperator::Modulo => NodeKind::Modulo,
            BinaryOperator::Concatenation => NodeKind::Concatenation,
            BinaryOperator::Equality => NodeKind::Equality,
            BinaryOperator::Inequality => NodeKind::Inequality,
            BinaryOperator::LessThan => NodeKind::LessThan,
            BinaryOperator::LessOrEqual => NodeKind::LessOrEqual,
            BinaryOperator::GreaterThan => NodeKind::GreaterThan,
            BinaryOperator::GreaterOrEqual => NodeKind::GreaterOrEqual,
            BinaryOperator::BitwiseAnd => NodeKind::BitwiseAnd,
            BinaryOperator::BitwiseOr => NodeKind::BitwiseOr,
            BinaryOperator::BitwiseXor => NodeKind::BitwiseXor,
            BinaryOperator::BitwiseLeftShift => NodeKind::BitwiseLeftShift,
            BinaryOperator::BitwiseRightShift => NodeKind::BitwiseRightShift,
            BinaryOperator::LogicalAnd => NodeKind::LogicalAnd,
            BinaryOperator::LogicalOr => NodeKind::LogicalOr,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Addition => "+",
            BinaryOperator::Subtraction => "-",
            BinaryOperator::Multiplication => "*",
            BinaryOperator::Division => "/",
            BinaryOperator::IntegerDivision => "//",
            BinaryOperator::Exponentiation => "^",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Concatenation => "..",
            BinaryOperator::Equality => "==",
            BinaryOperator::Inequality => "~=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterOrEqual => ">=",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "~",
            BinaryOperator::BitwiseLeftShift => "<<",
            BinaryOperator::BitwiseRightShift => ">>",
            BinaryOperator::LogicalAnd => "and",
            BinaryOperator::LogicalOr => "or",
        }
    }
}

/// Unary operator applied to its single operand
#[derive(Debug, Clone)]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
    pub position: Position,
}

/// Binary operator applied to its two operands
#[derive(Debug, Clone)]
pub struct BinaryOperation {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub position: Position,
}

/// `table[indexer]`, also `table.name` with a string indexer
#[derive(Debug, Clone)]
pub struct IndexingExpression {
    pub table: Box<Expression>,
    pub indexer: Box<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub position: Position,
}

/// `object:method(arguments)`
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub object: Box<Expression>,
    pub method: Identifier,
    pub arguments: Vec<Expression>,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub struct TableConstructor {
    pub fields: Vec<FieldInitialization>,
    pub position: Position,
}

impl Expression {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::Nil(_) => NodeKind::Nil,
            Expression::Boolean(b) if b.value => NodeKind::True,
            Expression::Boolean(_) => NodeKind::False,
            Expression::Integer(_) => NodeKind::Integer,
            Expression::Float(_) => NodeKind::Float,
            Expression::String(_) => NodeKind::String,
            Expression::Identifier(_) => NodeKind::Identifier,
            Expression::Unsupported(_) => NodeKind::Unsupported,
            Expression::Unary(u) => u.operator.kind(),
            Expression::Binary(b) => b.operator.kind(),
            Expression::Indexing(_) => NodeKind::IndexingExpression,
            Expression::FunctionCall(_) => NodeKind::FunctionCall,
            Expression::MethodCall(_) => NodeKind::MethodCall,
            Expression::TableConstructor(_) => NodeKind::TableConstructor,
        }
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }

    pub fn position(&self) -> &Position {
        match self {
            Expression::Nil(n) => &n.position,
            Expression::Boolean(b) => &b.position,
            Expression::Integer(i) => &i.position,
            Expression::Float(f) => &f.position,
            Expression::String(s) => &s.position,
            Expression::Identifier(i) => &i.position,
            Expression::Unsupported(u) => &u.position,
            Expression::Unary(u) => &u.position,
            Expression::Binary(b) => &b.position,
            Expression::Indexing(i) => &i.position,
            Expression::FunctionCall(f) => &f.position,
            Expression::MethodCall(m) => &m.position,
            Expression::TableConstructor(t) => &t.position,
        }
    }

    /// Whether this expression may appear on the left of `=`
    pub fn is_assignable(&self) -> bool {
        matches!(self, Expression::Identifier(_) | Expression::Indexing(_))
    }

    pub fn is_call(&self) -> bool {
        matches!(self, Expression::FunctionCall(_) | Expression::MethodCall(_))
    }

    /// Direct subexpressions, left to right
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Nil(_)
            | Expression::Boolean(_)
            | Expression::Integer(_)
            | Expression::Float(_)
            | Expression::String(_)
            | Expression::Identifier(_)
            | Expression::Unsupported(_) => vec![],
            Expression::Unary(u) => vec![u.operand.as_ref()],
            Expression::Binary(b) => vec![b.left.as_ref(), b.right.as_ref()],
            Expression::Indexing(i) => vec![i.table.as_ref(), i.indexer.as_ref()],
            Expression::FunctionCall(call) => std::iter::once(call.function.as_ref())
                .chain(call.arguments.iter())
                .collect(),
            Expression::MethodCall(call) => std::iter::once(call.object.as_ref())
                .chain(call.arguments.iter())
                .collect(),
            Expression::TableConstructor(table) => table
                .fields
                .iter()
                .flat_map(|field| field.key.iter().chain(std::iter::once(&field.value)))
                .collect(),
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&IntegerNumber> {
        match self {
            Expression::Integer(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<&FloatNumber> {
        match self {
            Expression::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&StringLiteral> {
        match self {
            Expression::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_unsupported(&self) -> Option<&Unsupported> {
        match self {
            Expression::Unsupported(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_unary(&self) -> Option<&UnaryOperation> {
        match self {
            Expression::Unary(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&BinaryOperation> {
        match self {
            Expression::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_indexing(&self) -> Option<&IndexingExpression> {
        match self {
            Expression::Indexing(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            Expression::FunctionCall(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_method_call(&self) -> Option<&MethodCall> {
        match self {
            Expression::MethodCall(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_table_constructor(&self) -> Option<&TableConstructor> {
        match self {
            Expression::TableConstructor(t) => Some(t),
            _ => None,
        }
    }
}
