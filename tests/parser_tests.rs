use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use qrlua::ast::{Expression, Node, NodeKind};
use qrlua::grammar::{LuaGrammar, ParseOutput};
use qrlua::parse_source;
use qrlua::token::{Position, Token, TokenKind};

fn parse(input: &str) -> ParseOutput {
    let grammar = LuaGrammar::new().expect("grammar builds");
    parse_source(&grammar, input).expect("lexing failed")
}

fn parse_program(input: &str) -> Node {
    let output = parse(input);
    if let Some(error) = output.diagnostics.first() {
        panic!("parsing failed: {error}");
    }
    output.root.expect("parsing failed: no tree")
}

fn tree(input: &str) -> String {
    parse_program(input).tree()
}

fn expression(input: &str) -> Expression {
    match parse_program(input) {
        Node::Expression(expression) => expression,
        other => panic!("expected a single expression, got {}", other.kind()),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(tree("1 + 2 * 3"), "Addition(1, Multiplication(2, 3))");
    assert_eq!(tree("1 * 2 + 3"), "Addition(Multiplication(1, 2), 3)");
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(tree("1 - 2 - 3"), "Subtraction(Subtraction(1, 2), 3)");
}

#[test]
fn exponentiation_is_right_associative() {
    assert_eq!(tree("2 ^ 3 ^ 2"), "Exponentiation(2, Exponentiation(3, 2))");
}

#[test]
fn concatenation_is_right_associative() {
    assert_eq!(
        tree("a .. b .. c"),
        "Concatenation(Identifier(a), Concatenation(Identifier(b), Identifier(c)))"
    );
}

#[test]
fn unary_minus_binds_looser_than_exponentiation() {
    assert_eq!(tree("-2 ^ 2"), "UnaryMinus(Exponentiation(2, 2))");
    assert_eq!(tree("-2 * 3"), "Multiplication(UnaryMinus(2), 3)");
    assert_eq!(tree("2 ^ -3"), "Exponentiation(2, UnaryMinus(3))");
}

#[test]
fn unary_operators() {
    assert_eq!(tree("#t + 1"), "Addition(Length(Identifier(t)), 1)");
    assert_eq!(tree("not a == b"), "Equality(Not(Identifier(a)), Identifier(b))");
    assert_eq!(tree("- - x"), "UnaryMinus(UnaryMinus(Identifier(x)))");
    assert_eq!(
        tree("~a ~ b"),
        "BitwiseXor(BitwiseNegation(Identifier(a)), Identifier(b))"
    );
}

#[test]
fn logical_operators() {
    assert_eq!(
        tree("a or b and c"),
        "LogicalOr(Identifier(a), LogicalAnd(Identifier(b), Identifier(c)))"
    );
    assert_eq!(
        tree("a < b and b <= c"),
        "LogicalAnd(LessThan(Identifier(a), Identifier(b)), LessOrEqual(Identifier(b), Identifier(c)))"
    );
}

#[test]
fn bitwise_operator_levels() {
    assert_eq!(
        tree("a | b ~ c & d"),
        "BitwiseOr(Identifier(a), BitwiseXor(Identifier(b), BitwiseAnd(Identifier(c), Identifier(d))))"
    );
    assert_eq!(tree("1 << 2 + 3"), "BitwiseLeftShift(1, Addition(2, 3))");
    assert_eq!(tree("1 .. 2 >> 3"), "BitwiseRightShift(Concatenation(1, 2), 3)");
}

#[test]
fn comparison_operators() {
    assert_eq!(tree("a ~= b"), "Inequality(Identifier(a), Identifier(b))");
    assert_eq!(tree("a > b"), "GreaterThan(Identifier(a), Identifier(b))");
    assert_eq!(tree("a >= b"), "GreaterOrEqual(Identifier(a), Identifier(b))");
}

#[test]
fn division_family() {
    assert_eq!(
        tree("1 / 2 // 3 % 4"),
        "Modulo(IntegerDivision(Division(1, 2), 3), 4)"
    );
}

#[test]
fn parentheses_override_precedence() {
    assert_eq!(tree("(1 + 2) * 3"), "Multiplication(Addition(1, 2), 3)");
    assert_eq!(tree("((x))"), "Identifier(x)");
}

#[test]
fn literals() {
    assert_eq!(tree("nil"), "Nil");
    assert_eq!(tree("true"), "True");
    assert_eq!(tree("false"), "False");
    assert_eq!(tree("3.5"), "3.5");
    assert_eq!(tree("0xff"), "0xff");

    let number = expression("0x10");
    assert_eq!(number.as_integer().and_then(|i| i.as_i64()), Some(16));
    let number = expression("2.5");
    assert_eq!(number.as_float().and_then(|f| f.as_f64()), Some(2.5));
}

#[test]
fn strings_are_unquoted() {
    assert_eq!(tree("\"abc\""), "String(\"abc\")");
    assert_eq!(tree("'abc'"), "String(\"abc\")");
    assert_eq!(tree("''"), "String(\"\")");

    let text = expression("'it\"s'");
    assert_eq!(text.as_string().unwrap().value, "it\"s");
}

#[test]
fn long_strings_are_unquoted() {
    assert_eq!(tree("x = [[long]]"), "Assignment(Identifier(x), String(\"long\"))");
    let text = expression("[=[one\n]]two]=]");
    assert_eq!(text.as_string().unwrap().value, "one\n]]two");
}

#[test]
fn method_calls_chain_left_to_right() {
    assert_eq!(
        tree("a:b(1):c(2)"),
        "MethodCall(MethodCall(Identifier(a), b, [1]), c, [2])"
    );
}

#[test]
fn field_access_indexes_with_string() {
    assert_eq!(
        tree("a.b.c"),
        "IndexingExpression(IndexingExpression(Identifier(a), String(\"b\")), String(\"c\"))"
    );
    assert_eq!(
        tree("t[1][x]"),
        "IndexingExpression(IndexingExpression(Identifier(t), 1), Identifier(x))"
    );
}

#[test]
fn call_argument_forms() {
    assert_eq!(tree("f()"), "FunctionCall(Identifier(f), [])");
    assert_eq!(tree("f(1, x)"), "FunctionCall(Identifier(f), [1, Identifier(x)])");
    assert_eq!(tree("f \"abc\""), "FunctionCall(Identifier(f), [String(\"abc\")])");
    assert_eq!(
        tree("f{1}"),
        "FunctionCall(Identifier(f), [TableConstructor([FieldInitialization(1)])])"
    );
    assert_eq!(
        tree("f(1)(2)"),
        "FunctionCall(FunctionCall(Identifier(f), [1]), [2])"
    );
    assert_eq!(tree("obj:m 's'"), "MethodCall(Identifier(obj), m, [String(\"s\")])");
}

#[test]
fn parenthesized_prefix() {
    assert_eq!(tree("(\"x\"):rep(3)"), "MethodCall(String(\"x\"), rep, [3])");
    assert_eq!(tree("(f)(1)"), "FunctionCall(Identifier(f), [1])");
}

#[test]
fn mixed_prefix_expression() {
    assert_eq!(
        tree("a.b[c](1):d \"e\".f"),
        "IndexingExpression(MethodCall(FunctionCall(IndexingExpression(IndexingExpression(Identifier(a), String(\"b\")), Identifier(c)), [1]), d, [String(\"e\")]), String(\"f\"))"
    );
}

#[test]
fn calls_in_operands() {
    assert_eq!(
        tree("f(1) + t.x * 2"),
        "Addition(FunctionCall(Identifier(f), [1]), Multiplication(IndexingExpression(Identifier(t), String(\"x\")), 2))"
    );
}

#[test]
fn node_kinds_and_accessors() {
    let call = expression("o:m(1, 2)");
    assert_eq!(call.kind(), NodeKind::MethodCall);
    assert!(call.is_call());
    assert!(!call.is_assignable());

    let method = call.as_method_call().unwrap();
    assert_eq!(method.method.name, "m");
    assert_eq!(method.arguments.len(), 2);
    assert_eq!(method.object.as_identifier().unwrap().name, "o");
    assert!(call.as_function_call().is_none());
}

#[test]
fn positions_cover_the_whole_expression() {
    let grammar = LuaGrammar::new().unwrap();
    let tokens = qrlua::lexer::tokenize("x + f(y)").unwrap();
    let first = tokens[0].position.start;
    let last = tokens[tokens.len() - 1].position.end;

    let root = grammar.parse(tokens).root.unwrap();
    assert_eq!(root.position().start, first);
    assert_eq!(root.position().end, last);
}

#[test]
fn large_inputs_parse_in_linear_time() {
    let lines = 10_000;
    let mut tokens = Vec::with_capacity(lines * 5);
    for line in 0..lines {
        let at = |column: usize| Position::new((line, column), (line, column + 1));
        tokens.push(Token::new(TokenKind::Identifier, "x", at(0)));
        tokens.push(Token::new(TokenKind::Equals, "=", at(2)));
        tokens.push(Token::new(TokenKind::IntegerLiteral, "1", at(4)));
        tokens.push(Token::new(TokenKind::Plus, "+", at(6)));
        tokens.push(Token::new(TokenKind::IntegerLiteral, "2", at(8)));
    }

    let grammar = LuaGrammar::new().unwrap();
    let started = Instant::now();
    let output = grammar.parse(tokens);
    let elapsed = started.elapsed();

    assert!(output.is_clean());
    let root = output.root.unwrap();
    assert_eq!(root.assignment_count(), lines);
    assert_eq!(*root.position(), Position::new((0, 0), (lines - 1, 9)));
    assert!(elapsed < Duration::from_secs(10), "parsing took {elapsed:?}");
}

#[test]
fn long_operator_chains_parse() {
    let terms = vec!["1"; 3000].join(" +\n");
    let output = parse(&format!("x = {terms}"));
    assert!(output.is_clean());
    let assignment = output.root.unwrap();
    let value = &assignment.as_assignment().unwrap().value;
    assert_eq!(value.kind(), NodeKind::Addition);
}
