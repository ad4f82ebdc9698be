use qrlua::config::ParserConfig;
use qrlua::grammar::LuaGrammar;
use qrlua::lexer::tokenize;
use qrlua::parse_source;
use qrlua::token::{Token, TokenKind};

fn grammar() -> LuaGrammar {
    LuaGrammar::new().expect("grammar builds")
}

#[test]
fn dangling_assignment_is_a_syntax_error() {
    let output = parse_source(&grammar(), "a =").unwrap();
    assert!(output.root.is_none());
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(
        output.diagnostics[0].message,
        "unexpected end of input, expected expression"
    );
}

#[test]
fn unclosed_parenthesis() {
    let output = parse_source(&grammar(), "a = (1").unwrap();
    assert!(output.root.is_none());
    assert_eq!(output.diagnostics.len(), 1);
    assert!(output.diagnostics[0].message.contains("')'"));
}

#[test]
fn syntax_error_points_at_the_furthest_token() {
    let tokens = tokenize("x = 1 )").unwrap();
    let offending = tokens[3].position.start;

    let output = grammar().parse(tokens);
    assert!(output.root.is_none());
    assert_eq!(output.diagnostics.len(), 1);

    let error = &output.diagnostics[0];
    assert_eq!(error.position.start, offending);
    assert!(error.message.starts_with("unexpected ')'"));
    assert!(error.message.contains("end of input"));
}

#[test]
fn furthest_failure_wins_over_earlier_ones() {
    let output = parse_source(&grammar(), "x = f(1, 2 + ) y = 3").unwrap();
    assert!(output.root.is_none());
    assert_eq!(output.diagnostics.len(), 1);
    assert!(output.diagnostics[0].message.starts_with("unexpected ')'"));
    assert!(output.diagnostics[0].message.contains("expression"));
}

#[test]
fn binary_operator_without_right_operand() {
    let output = parse_source(&grammar(), "x = 1 +").unwrap();
    assert!(output.root.is_none());
    assert_eq!(output.diagnostics.len(), 1);
}

#[test]
fn semantic_diagnostics_come_before_the_syntax_error() {
    let output = parse_source(&grammar(), "x = ... )").unwrap();
    assert!(output.root.is_none());
    assert_eq!(output.diagnostics.len(), 2);
    assert!(output.diagnostics[0].message.contains("not supported yet"));
    assert!(output.diagnostics[1].message.starts_with("unexpected"));
}

#[test]
fn syntax_errors_can_be_turned_off() {
    let grammar = LuaGrammar::with_config(ParserConfig::default().with_syntax_errors(false)).unwrap();
    let output = parse_source(&grammar, "a = (1").unwrap();
    assert!(output.root.is_none());
    assert!(output.diagnostics.is_empty());
}

#[test]
fn hand_built_tokens_parse() {
    let tokens = vec![
        Token::synthetic(TokenKind::Identifier, "x"),
        Token::synthetic(TokenKind::Equals, "="),
        Token::synthetic(TokenKind::Minus, "-"),
        Token::synthetic(TokenKind::IntegerLiteral, "1"),
    ];
    let output = grammar().parse(tokens);
    assert!(output.is_clean());
    assert_eq!(
        output.root.unwrap().tree(),
        "Assignment(Identifier(x), UnaryMinus(1))"
    );
}

#[test]
fn hand_built_tokens_report_without_positions() {
    let tokens = vec![
        Token::synthetic(TokenKind::Identifier, "x"),
        Token::synthetic(TokenKind::Equals, "="),
    ];
    let output = grammar().parse(tokens);
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(
        output.diagnostics[0].to_string(),
        "unexpected end of input, expected expression"
    );
}

fn nested(depth: usize) -> String {
    format!("x = {}1{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn deep_nesting_within_bound_parses() {
    let output = parse_source(&grammar(), &nested(150)).unwrap();
    assert!(output.is_clean());
    assert_eq!(output.root.unwrap().tree(), "Assignment(Identifier(x), 1)");
}

#[test]
fn nesting_beyond_bound_is_reported_once() {
    let output = parse_source(&grammar(), &nested(1000)).unwrap();
    assert!(output.root.is_none());
    assert_eq!(output.messages(), vec!["Nesting is too deep"]);
}

#[test]
fn nesting_bound_is_configurable() {
    let grammar = LuaGrammar::with_config(ParserConfig::default().with_max_depth(10)).unwrap();

    let output = parse_source(&grammar, &nested(5)).unwrap();
    assert!(output.is_clean());

    let output = parse_source(&grammar, &nested(12)).unwrap();
    assert!(output.root.is_none());
    assert_eq!(output.messages(), vec!["Nesting is too deep"]);
}

#[test]
fn deep_unary_chains_are_bounded() {
    let source = format!("x = {}1", "- ".repeat(500));
    let output = parse_source(&grammar(), &source).unwrap();
    assert!(output.root.is_none());
    assert_eq!(output.messages(), vec!["Nesting is too deep"]);
}

#[test]
fn right_associative_chains_are_not_nesting() {
    let grammar = LuaGrammar::with_config(ParserConfig::default().with_max_depth(10)).unwrap();
    for operator in ["..", "^"] {
        let terms = vec!["a"; 500].join(&format!(" {operator} "));
        let output = parse_source(&grammar, &format!("x = {terms}")).unwrap();
        assert!(output.is_clean(), "{operator}: {:?}", output.messages());
    }
}

#[test]
fn parentheses_inside_chains_still_count() {
    let grammar = LuaGrammar::with_config(ParserConfig::default().with_max_depth(10)).unwrap();
    let source = format!("x = a .. {}b{}", "(".repeat(12), ")".repeat(12));
    let output = parse_source(&grammar, &source).unwrap();
    assert!(output.root.is_none());
    assert_eq!(output.messages(), vec!["Nesting is too deep"]);
}
