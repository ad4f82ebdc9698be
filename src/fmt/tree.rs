//! Structural rendering of the AST
//!
//! Every node prints as its kind followed by its children in parentheses.
//! Number literals print as written and names print bare, so a whole tree
//! fits on one line:
//!
//! ```text
//! a = f(1):m "x"
//! Assignment(Identifier(a), MethodCall(FunctionCall(Identifier(f), [1]), m, [String("x")]))
//! ```

use std::fmt::Write;

use crate::ast::{Assignment, Expression, FieldInitialization, Node, Statement};

/// Structural form of a whole parse result
pub fn tree(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

impl Node {
    pub fn tree(&self) -> String {
        tree(self)
    }
}

impl Expression {
    pub fn tree(&self) -> String {
        let mut out = String::new();
        write_expression(self, &mut out);
        out
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Block(block) => {
            out.push_str("Block([");
            for (i, statement) in block.statements.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_statement(statement, out);
            }
            out.push_str("])");
        }
        Node::Assignment(assignment) => write_assignment(assignment, out),
        Node::Expression(expression) => write_expression(expression, out),
    }
}

fn write_statement(statement: &Statement, out: &mut String) {
    match statement {
        Statement::Assignment(assignment) => write_assignment(assignment, out),
        Statement::Expression(expression) => write_expression(expression, out),
    }
}

fn write_assignment(assignment: &Assignment, out: &mut String) {
    out.push_str("Assignment(");
    write_expression(&assignment.target, out);
    out.push_str(", ");
    write_expression(&assignment.value, out);
    out.push(')');
}

fn write_expression(expression: &Expression, out: &mut String) {
    match expression {
        Expression::Nil(_) => out.push_str("Nil"),
        Expression::Boolean(b) => out.push_str(if b.value { "True" } else { "False" }),
        Expression::Integer(i) => out.push_str(&i.value),
        Expression::Float(f) => out.push_str(&f.value),
        Expression::String(s) => {
            let _ = write!(out, "String({:?})", s.value);
        }
        Expression::Identifier(i) => {
            let _ = write!(out, "Identifier({})", i.name);
        }
        Expression::Unsupported(u) => {
            let _ = write!(out, "Unsupported({})", u.construct);
        }
        Expression::Unary(unary) => {
            let _ = write!(out, "{}(", unary.operator.kind());
            write_expression(&unary.operand, out);
            out.push(')');
        }
        Expression::Binary(binary) => {
            let _ = write!(out, "{}(", binary.operator.kind());
            write_expression(&binary.left, out);
            out.push_str(", ");
            write_expression(&binary.right, out);
            out.push(')');
        }
        Expression::Indexing(indexing) => {
            out.push_str("IndexingExpression(");
            write_expression(&indexing.table, out);
            out.push_str(", ");
            write_expression(&indexing.indexer, out);
            out.push(')');
        }
        Expression::FunctionCall(call) => {
            out.push_str("FunctionCall(");
            write_expression(&call.function, out);
            out.push_str(", ");
            write_list(&call.arguments, out);
            out.push(')');
        }
        Expression::MethodCall(call) => {
            out.push_str("MethodCall(");
            write_expression(&call.object, out);
            let _ = write!(out, ", {}, ", call.method.name);
            write_list(&call.arguments, out);
            out.push(')');
        }
        Expression::TableConstructor(table) => {
            out.push_str("TableConstructor([");
            for (i, field) in table.fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_field(field, out);
            }
            out.push_str("])");
        }
    }
}

fn write_field(field: &FieldInitialization, out: &mut String) {
    out.push_str("FieldInitialization(");
    if let Some(key) = &field.key {
        write_expression(key, out);
        out.push_str(", ");
    }
    write_expression(&field.value, out);
    out.push(')');
}

fn write_list(expressions: &[Expression], out: &mut String) {
    out.push('[');
    for (i, expression) in expressions.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_expression(expression, out);
    }
    out.push(']');
}
