//! Semantic actions of the Lua grammar
//!
//! Each function turns what a grammar rule matched into AST nodes. Problems
//! that do not stop the parse (unsupported syntax, bad assignment targets) are
//! reported into the diagnostics and the action still returns a value.

use crate::ast::{
    Assignment, BinaryOperation, BinaryOperator, Block, Boolean, Expression, FieldInitialization,
    FloatNumber, FunctionCall, Identifier, IndexingExpression, IntegerNumber, MethodCall, Nil,
    Node, Statement, StringLiteral, TableConstructor, UnaryOperation, UnaryOperator, Unsupported,
};
use crate::diagnostics::Diagnostics;
use crate::token::{Position, Token};

pub const UNSUPPORTED_CONSTRUCT: &str = "This construction is not supported yet";
pub const ASSIGNMENT_ARITY: &str =
    "Number of variables in assignment shall be equal to the number of assigned values";
pub const ASSIGNMENT_TO_CALL: &str = "Assignment to function call is impossible";
pub const ASSIGNMENT_TO_VALUE: &str = "Only variables and table fields can be assigned to";
pub const FIELD_NAME: &str = "Field name must be an identifier";

/// Argument list of a call together with the span it covers
#[derive(Debug, Clone)]
pub struct Arguments {
    pub values: Vec<Expression>,
    pub position: Position,
}

impl Arguments {
    /// `f "text"` and `f {...}` pass exactly one argument
    pub fn single(value: Expression) -> Self {
        let position = *value.position();
        Self {
            values: vec![value],
            position,
        }
    }
}

/// One postfix part of a prefix expression
#[derive(Debug, Clone)]
pub enum Suffix {
    /// `[exp]` or `.name`; `end` is the span of the last token
    Index { indexer: Expression, end: Position },
    Call(Arguments),
    Method { name: Identifier, arguments: Arguments },
}

pub fn nil(token: Token) -> Expression {
    Expression::Nil(Nil {
        position: token.position,
    })
}

pub fn boolean(token: Token, value: bool) -> Expression {
    Expression::Boolean(Boolean {
        value,
        position: token.position,
    })
}

pub fn integer(token: Token) -> Expression {
    Expression::Integer(IntegerNumber {
        value: token.lexeme,
        position: token.position,
    })
}

pub fn float(token: Token) -> Expression {
    Expression::Float(FloatNumber {
        value: token.lexeme,
        position: token.position,
    })
}

pub fn string(token: Token) -> Expression {
    Expression::String(StringLiteral {
        value: unquote(&token.lexeme).to_string(),
        position: token.position,
    })
}

pub fn identifier(token: Token) -> Identifier {
    Identifier {
        name: token.lexeme,
        position: token.position,
    }
}

/// Strips the delimiters of a string literal
///
/// Handles `"..."`, `'...'` and long brackets `[==[...]==]`. Anything else is
/// returned unchanged.
pub fn unquote(lexeme: &str) -> &str {
    for quote in ['"', '\''] {
        if lexeme.len() >= 2 && lexeme.starts_with(quote) && lexeme.ends_with(quote) {
            return &lexeme[1..lexeme.len() - 1];
        }
    }

    let level = lexeme
        .strip_prefix('[')
        .map(|rest| rest.chars().take_while(|c| *c == '=').count());
    if let Some(level) = level {
        let equals = "=".repeat(level);
        let open = format!("[{equals}[");
        let close = format!("]{equals}]");
        if lexeme.len() >= open.len() + close.len()
            && lexeme.starts_with(&open)
            && lexeme.ends_with(&close)
        {
            return &lexeme[open.len()..lexeme.len() - close.len()];
        }
    }

    lexeme
}

/// Placeholder for recognized syntax the parser does not handle yet
pub fn unsupported(token: Token, diagnostics: &mut Diagnostics) -> Expression {
    diagnostics.report(token.position, UNSUPPORTED_CONSTRUCT);
    Expression::Unsupported(Unsupported {
        construct: token.lexeme,
        position: token.position,
    })
}

pub fn unary(operator: UnaryOperator, operator_position: &Position, operand: Expression) -> Expression {
    let position = operator_position.merge(operand.position());
    Expression::Unary(UnaryOperation {
        operator,
        operand: Box::new(operand),
        position,
    })
}

pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
    let position = left.position().merge(right.position());
    Expression::Binary(BinaryOperation {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        position,
    })
}

/// Applies the postfix parts of a prefix expression left to right
///
/// `a.b(1):c(2)` becomes `MethodCall(FunctionCall(Indexing(a, "b"), 1), c, 2)`.
pub fn prefix((base, suffixes): (Expression, Vec<Suffix>)) -> Expression {
    suffixes.into_iter().fold(base, |object, suffix| match suffix {
        Suffix::Index { indexer, end } => {
            let position = object.position().merge(&end);
            Expression::Indexing(IndexingExpression {
                table: Box::new(object),
                indexer: Box::new(indexer),
                position,
            })
        }
        Suffix::Call(arguments) => {
            let position = object.position().merge(&arguments.position);
            Expression::FunctionCall(FunctionCall {
                function: Box::new(object),
                arguments: arguments.values,
                position,
            })
        }
        Suffix::Method { name, arguments } => {
            let position = object.position().merge(&arguments.position);
            Expression::MethodCall(MethodCall {
                object: Box::new(object),
                method: name,
                arguments: arguments.values,
                position,
            })
        }
    })
}

/// `.name` indexes with the string `"name"`
pub fn name_index(name: Token) -> Suffix {
    let end = name.position;
    let indexer = Expression::String(StringLiteral {
        value: name.lexeme,
        position: name.position,
    });
    Suffix::Index { indexer, end }
}

/// `exp` or `name = exp` inside a table constructor
///
/// The left side of `=` was parsed as a full expression; only a plain name is
/// allowed there, and it becomes a string key.
pub fn field(
    (left, value): (Expression, Option<Expression>),
    diagnostics: &mut Diagnostics,
) -> FieldInitialization {
    match (left, value) {
        (value, None) => FieldInitialization::positional(value),
        (Expression::Identifier(name), Some(value)) => {
            let key = Expression::String(StringLiteral {
                value: name.name,
                position: name.position,
            });
            FieldInitialization::keyed(key, value)
        }
        (key, Some(value)) => {
            diagnostics.report(*key.position(), FIELD_NAME);
            FieldInitialization::keyed(key, value)
        }
    }
}

pub fn table((open, fields, close): (Token, Option<Vec<FieldInitialization>>, Token)) -> Expression {
    Expression::TableConstructor(TableConstructor {
        fields: fields.unwrap_or_default(),
        position: open.position.merge(&close.position),
    })
}

/// What one `stat` matched: `;`, a bare expression list, or `targets = values`
pub type StatementParts = Option<(Vec<Expression>, Option<Vec<Expression>>)>;

/// Turns one statement into zero or more block entries
///
/// A bare list of several expressions is kept as a positional table
/// constructor. `a, b = 1, 2` is split into one assignment per pair; when the
/// counts differ nothing is assigned at all.
pub fn statement(parts: StatementParts, diagnostics: &mut Diagnostics) -> Vec<Statement> {
    let Some((targets, values)) = parts else {
        return vec![];
    };

    let Some(values) = values else {
        return match <[Expression; 1]>::try_from(targets) {
            Ok([single]) => vec![Statement::Expression(single)],
            Err(expressions) => vec![Statement::Expression(expression_list(expressions))],
        };
    };

    if targets.len() != values.len() {
        let position = match (targets.first(), values.last()) {
            (Some(first), Some(last)) => first.position().merge(last.position()),
            _ => Position::default(),
        };
        diagnostics.report(position, ASSIGNMENT_ARITY);
        return vec![];
    }

    targets
        .into_iter()
        .zip(values)
        .filter_map(|(target, value)| {
            if target.is_call() {
                diagnostics.report(*target.position(), ASSIGNMENT_TO_CALL);
                return None;
            }
            if !target.is_assignable() {
                diagnostics.report(*target.position(), ASSIGNMENT_TO_VALUE);
                return None;
            }
            let position = target.position().merge(value.position());
            Some(Statement::Assignment(Assignment {
                target,
                value,
                position,
            }))
        })
        .collect()
}

fn expression_list(expressions: Vec<Expression>) -> Expression {
    let position = match (expressions.first(), expressions.last()) {
        (Some(first), Some(last)) => first.position().merge(last.position()),
        _ => Position::default(),
    };
    Expression::TableConstructor(TableConstructor {
        fields: expressions
            .into_iter()
            .map(FieldInitialization::positional)
            .collect(),
        position,
    })
}

/// A chunk with a single statement is that statement; anything else is a
/// block
pub fn block(statements: Vec<Vec<Statement>>) -> Node {
    let mut statements: Vec<Statement> = statements.into_iter().flatten().collect();
    if statements.len() == 1 {
        if let Some(single) = statements.pop() {
            return Node::from(single);
        }
    }
    Node::Block(Block::new(statements))
}
