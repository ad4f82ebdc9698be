//! # Abstract Syntax Tree
//!
//! The tree produced by [`crate::grammar::LuaGrammar`]. All node types form a
//! closed set; [`NodeKind`] names each of them and every node can report its
//! kind. Typed access goes through `as_*` accessors returning `Option`, so a
//! mismatched "downcast" is an ordinary `None`.
//!
//! ```text
//! Node
//! ├── Block { statements }
//! ├── Assignment { target, value }
//! └── Expression
//!     ├── literals: Nil, Boolean, Integer, Float, String
//!     ├── Identifier, Unsupported
//!     ├── Unary / Binary operations
//!     ├── Indexing, FunctionCall, MethodCall
//!     └── TableConstructor { FieldInitialization* }
//! ```

use std::fmt;

use crate::token::Position;

pub mod expression;
pub mod statement;

pub use expression::*;
pub use statement::*;

/// Kind tag of every node in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Nil,
    True,
    False,
    Integer,
    Float,
    String,
    Identifier,
    Unsupported,

    Not,
    Length,
    UnaryMinus,
    BitwiseNegation,

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

    IndexingExpression,
    FunctionCall,
    MethodCall,
    TableConstructor,
    FieldInitialization,
    Assignment,
    Block,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Something that can stand on its own in a block
#[derive(Debug, Clone)]
pub enum Statement {
    Assignment(Assignment),
    Expression(Expression),
}

impl Statement {
    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Assignment(_) => NodeKind::Assignment,
            Statement::Expression(expression) => expression.kind(),
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            Statement::Assignment(assignment) => &assignment.position,
            Statement::Expression(expression) => expression.position(),
        }
    }

    pub fn as_assignment(&self) -> Option<&Assignment> {
        match self {
            Statement::Assignment(assignment) => Some(assignment),
            Statement::Expression(_) => None,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Statement::Expression(expression) => Some(expression),
            Statement::Assignment(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub position: Position,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        let position = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => first.position().merge(last.position()),
            _ => Position::default(),
        };
        Self {
            statements,
            position,
        }
    }

    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.statements.iter().filter_map(Statement::as_assignment)
    }
}

/// Root of a parsed program
///
/// A program with exactly one statement is represented by that statement
/// itself; everything else becomes a [`Block`].
#[derive(Debug, Clone)]
pub enum Node {
    Block(Block),
    Assignment(Assignment),
    Expression(Expression),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Block(_) => NodeKind::Block,
            Node::Assignment(_) => NodeKind::Assignment,
            Node::Expression(expression) => expression.kind(),
        }
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }

    pub fn position(&self) -> &Position {
        match self {
            Node::Block(block) => &block.position,
            Node::Assignment(assignment) => &assignment.position,
            Node::Expression(expression) => expression.position(),
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Node::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_assignment(&self) -> Option<&Assignment> {
        match self {
            Node::Assignment(assignment) => Some(assignment),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Node::Expression(expression) => Some(expression),
            _ => None,
        }
    }

    /// The top-level statements, however the root is represented
    pub fn statements(&self) -> Vec<Statement> {
        match self {
            Node::Block(block) => block.statements.clone(),
            Node::Assignment(assignment) => vec![Statement::Assignment(assignment.clone())],
            Node::Expression(expression) => vec![Statement::Expression(expression.clone())],
        }
    }

    /// Number of assignment nodes at the top level
    pub fn assignment_count(&self) -> usize {
        match self {
            Node::Block(block) => block.assignments().count(),
            Node::Assignment(_) => 1,
            Node::Expression(_) => 0,
        }
    }
}

impl From<Statement> for Node {
    fn from(statement: Statement) -> Self {
        match statement {
            Statement::Assignment(assignment) => Node::Assignment(assignment),
            Statement::Expression(expression) => Node::Expression(expression),
        }
    }
}
