//! Pretty printer for Lua source code
//!
//! `Display` for the AST. Parentheses are only written where the precedence
//! table requires them, and statements that would run into each other are
//! separated with `;`.

use std::fmt::{self, Display, Write};
use std::sync::LazyLock;

use crate::ast::{
    Assignment, BinaryOperation, Expression, FieldInitialization, Node, Statement, UnaryOperation,
    UnaryOperator,
};
use crate::grammar::operators::{UNARY_PRECEDENCE, binary_token, precedence_table};
use crate::parser::{Associativity, BinaryBinding, PrecedenceTable};

static PRECEDENCE: LazyLock<PrecedenceTable> = LazyLock::new(precedence_table);

/// Binds tighter than any operator; used for call and index bases
const PREFIX_PRECEDENCE: u8 = u8::MAX;

const RESERVED: [&str; 22] = [
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

struct Formatter {
    buffer: String,
}

impl Formatter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn finish(self) -> String {
        self.buffer
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Block(block) => {
                let mut previous: Option<String> = None;
                for statement in &block.statements {
                    let text = statement.to_string();
                    if let Some(previous) = previous {
                        f.write_str(&previous)?;
                        if continues_previous(&text) {
                            f.write_str(";")?;
                        }
                        f.write_char('\n')?;
                    }
                    previous = Some(text);
                }
                if let Some(last) = previous {
                    f.write_str(&last)?;
                }
                Ok(())
            }
            Node::Assignment(assignment) => write!(f, "{assignment}"),
            Node::Expression(expression) => write!(f, "{expression}"),
        }
    }
}

/// Whether a statement starting with `text` would be read as part of the one
/// before it
fn continues_previous(text: &str) -> bool {
    matches!(
        text.chars().next(),
        Some('(' | '{' | '"' | '\'' | '[' | '-' | '~')
    )
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Assignment(assignment) => write!(f, "{assignment}"),
            Statement::Expression(expression) => write!(f, "{expression}"),
        }
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_expression(self, &mut formatter, 0);
        f.write_str(&formatter.finish())
    }
}

fn format_expression(expr: &Expression, fmt: &mut Formatter, precedence: u8) {
    match expr {
        Expression::Nil(_) => fmt.write_str("nil"),
        Expression::Boolean(b) => fmt.write_str(if b.value { "true" } else { "false" }),
        Expression::Integer(i) => fmt.write_str(&i.value),
        Expression::Float(f) => fmt.write_str(&f.value),
        Expression::String(s) => format_string(&s.value, fmt),
        Expression::Identifier(i) => fmt.write_str(&i.name),
        Expression::Unsupported(u) => fmt.write_str(&u.construct),
        Expression::Unary(unary) => format_unary(unary, fmt, precedence),
        Expression::Binary(binary) => format_binary(binary, fmt, precedence),
        Expression::Indexing(indexing) => {
            format_prefix(&indexing.table, fmt);
            match indexing.indexer.as_string() {
                Some(name) if is_name(&name.value) => {
                    fmt.write_str(".");
                    fmt.write_str(&name.value);
                }
                _ => {
                    fmt.write_str("[");
                    format_expression(&indexing.indexer, fmt, 0);
                    fmt.write_str("]");
                }
            }
        }
        Expression::FunctionCall(call) => {
            format_prefix(&call.function, fmt);
            format_arguments(&call.arguments, fmt);
        }
        Expression::MethodCall(call) => {
            format_prefix(&call.object, fmt);
            fmt.write_str(":");
            fmt.write_str(&call.method.name);
            format_arguments(&call.arguments, fmt);
        }
        Expression::TableConstructor(table) => {
            if table.fields.is_empty() {
                fmt.write_str("{}");
                return;
            }
            fmt.write_str("{");
            for (i, field) in table.fields.iter().enumerate() {
                if i > 0 {
                    fmt.write_str(", ");
                }
                format_field(field, fmt);
            }
            fmt.write_str("}");
        }
    }
}

/// Call and index bases have to be names, calls, index expressions or
/// something in parentheses
fn format_prefix(expr: &Expression, fmt: &mut Formatter) {
    match expr {
        Expression::Identifier(_)
        | Expression::Indexing(_)
        | Expression::FunctionCall(_)
        | Expression::MethodCall(_) => format_expression(expr, fmt, PREFIX_PRECEDENCE),
        _ => {
            fmt.write_str("(");
            format_expression(expr, fmt, 0);
            fmt.write_str(")");
        }
    }
}

fn format_arguments(arguments: &[Expression], fmt: &mut Formatter) {
    fmt.write_str("(");
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            fmt.write_str(", ");
        }
        format_expression(argument, fmt, 0);
    }
    fmt.write_str(")");
}

fn format_field(field: &FieldInitialization, fmt: &mut Formatter) {
    match &field.key {
        None => format_expression(&field.value, fmt, 0),
        Some(key) => {
            match key.as_string() {
                Some(name) if is_name(&name.value) => fmt.write_str(&name.value),
                _ => {
                    fmt.write_str("[");
                    format_expression(key, fmt, 0);
                    fmt.write_str("]");
                }
            }
            fmt.write_str(" = ");
            format_expression(&field.value, fmt, 0);
        }
    }
}

fn format_unary(unary: &UnaryOperation, fmt: &mut Formatter, parent_prec: u8) {
    let needs_parens = UNARY_PRECEDENCE < parent_prec;
    if needs_parens {
        fmt.write_str("(");
    }

    let mut operand = Formatter::new();
    format_expression(&unary.operand, &mut operand, UNARY_PRECEDENCE);
    let operand = operand.finish();

    fmt.write_str(unary.operator.symbol());
    // `- -x` must not turn into a comment
    if unary.operator == UnaryOperator::Not
        || (unary.operator == UnaryOperator::UnaryMinus && operand.starts_with('-'))
    {
        fmt.write_str(" ");
    }
    fmt.write_str(&operand);

    if needs_parens {
        fmt.write_str(")");
    }
}

fn format_binary(binary: &BinaryOperation, fmt: &mut Formatter, parent_prec: u8) {
    let binding = binding(binary);
    let needs_parens = binding.precedence < parent_prec;
    let (left_prec, right_prec) = match binding.associativity {
        Associativity::Left => (binding.precedence, binding.precedence + 1),
        Associativity::Right => (binding.precedence + 1, binding.precedence),
    };

    if needs_parens {
        fmt.write_str("(");
    }
    format_expression(&binary.left, fmt, left_prec);
    let _ = write!(fmt.buffer, " {} ", binary.operator.symbol());
    format_expression(&binary.right, fmt, right_prec);
    if needs_parens {
        fmt.write_str(")");
    }
}

fn binding(binary: &BinaryOperation) -> BinaryBinding {
    PRECEDENCE
        .binary_binding(binary_token(binary.operator))
        .unwrap_or(BinaryBinding {
            precedence: 0,
            associativity: Associativity::Left,
        })
}

/// Quotes when the text is a single line, long brackets otherwise
///
/// Every form chosen here is one the lexer reads back to the same text.
fn format_string(value: &str, fmt: &mut Formatter) {
    let quote = ['"', '\''].into_iter().find(|quote| fits_quotes(value, *quote));
    match (quote, long_bracket_level(value)) {
        (Some(quote), _) if !value.contains('\n') => write_quoted(value, quote, fmt),
        (_, Some(level)) => {
            let equals = "=".repeat(level);
            let _ = write!(fmt.buffer, "[{equals}[{value}]{equals}]");
        }
        // the lexer also takes line breaks inside quotes
        (Some(quote), None) => write_quoted(value, quote, fmt),
        (None, None) => write_quoted(value, '"', fmt),
    }
}

fn write_quoted(value: &str, quote: char, fmt: &mut Formatter) {
    fmt.buffer.push(quote);
    fmt.write_str(value);
    fmt.buffer.push(quote);
}

/// No unescaped `quote` inside and no backslash escaping the closing one
fn fits_quotes(value: &str, quote: char) -> bool {
    let mut escaped = false;
    for c in value.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            c if c == quote => return false,
            _ => {}
        }
    }
    !escaped
}

/// Lowest long bracket level whose closing delimiter cannot show up before
/// the end of `value`
fn long_bracket_level(value: &str) -> Option<usize> {
    if value.ends_with(']') {
        None
    } else if !value.contains("]]") {
        Some(0)
    } else if !value.contains("]=]") && !value.ends_with("]=") {
        Some(1)
    } else {
        None
    }
}

/// Can be written as `.name` or `name = `
fn is_name(text: &str) -> bool {
    let mut chars = text.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED.contains(&text)
}
