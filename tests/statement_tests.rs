use pretty_assertions::assert_eq;
use qrlua::ast::{Node, NodeKind};
use qrlua::grammar::actions::{
    ASSIGNMENT_ARITY, ASSIGNMENT_TO_CALL, ASSIGNMENT_TO_VALUE, FIELD_NAME,
};
use qrlua::grammar::{LuaGrammar, ParseOutput};
use qrlua::parse_source;

fn parse(input: &str) -> ParseOutput {
    let grammar = LuaGrammar::new().expect("grammar builds");
    parse_source(&grammar, input).expect("lexing failed")
}

fn tree(input: &str) -> String {
    let output = parse(input);
    assert!(output.diagnostics.is_empty(), "{:?}", output.messages());
    output.root.expect("no tree").tree()
}

#[test]
fn single_assignment_is_the_root() {
    assert_eq!(tree("x = 1"), "Assignment(Identifier(x), 1)");
}

#[test]
fn multiple_assignment_splits_into_pairs() {
    let output = parse("a, b = 1, 2");
    assert!(output.is_clean());
    let root = output.root.unwrap();
    assert_eq!(root.assignment_count(), 2);
    assert_eq!(
        root.tree(),
        "Block([Assignment(Identifier(a), 1), Assignment(Identifier(b), 2)])"
    );
}

#[test]
fn assignment_to_fields() {
    assert_eq!(
        tree("t.x, t[1] = f(), {}"),
        "Block([Assignment(IndexingExpression(Identifier(t), String(\"x\")), FunctionCall(Identifier(f), [])), Assignment(IndexingExpression(Identifier(t), 1), TableConstructor([]))])"
    );
}

#[test]
fn arity_mismatch_reports_once_and_assigns_nothing() {
    for source in ["a, b = 1", "a = 1, 2", "a, b, c = 1, 2"] {
        let output = parse(source);
        assert_eq!(output.messages(), vec![ASSIGNMENT_ARITY], "{source}");
        let root = output.root.expect("tree is still built");
        assert_eq!(root.assignment_count(), 0, "{source}");
    }
}

#[test]
fn arity_mismatch_does_not_affect_other_statements() {
    let output = parse("x = 1 a, b = 2 y = 3");
    assert_eq!(output.messages(), vec![ASSIGNMENT_ARITY]);
    assert_eq!(
        output.root.unwrap().tree(),
        "Block([Assignment(Identifier(x), 1), Assignment(Identifier(y), 3)])"
    );
}

#[test]
fn assignment_to_call_is_reported() {
    let output = parse("f() = 1");
    assert_eq!(output.messages(), vec![ASSIGNMENT_TO_CALL]);
    assert_eq!(output.root.unwrap().assignment_count(), 0);

    let output = parse("o:m() = 1");
    assert_eq!(output.messages(), vec![ASSIGNMENT_TO_CALL]);
}

#[test]
fn assignment_to_value_is_reported() {
    let output = parse("1 = 2");
    assert_eq!(output.messages(), vec![ASSIGNMENT_TO_VALUE]);

    let output = parse("a + b = 2");
    assert_eq!(output.messages(), vec![ASSIGNMENT_TO_VALUE]);
}

#[test]
fn valid_targets_survive_next_to_invalid_ones() {
    let output = parse("a, f() = 1, 2");
    assert_eq!(output.messages(), vec![ASSIGNMENT_TO_CALL]);
    assert_eq!(
        output.root.unwrap().tree(),
        "Assignment(Identifier(a), 1)"
    );
}

#[test]
fn bare_expression_list_becomes_table_constructor() {
    assert_eq!(
        tree("1, 2, 3"),
        "TableConstructor([FieldInitialization(1), FieldInitialization(2), FieldInitialization(3)])"
    );
}

#[test]
fn single_expression_is_not_wrapped() {
    let output = parse("f(1)");
    assert_eq!(output.root.unwrap().kind(), NodeKind::FunctionCall);
}

#[test]
fn several_statements_form_a_block() {
    let root = parse("x = 1 y = 2; ; z = 3").root.unwrap();
    let block = root.as_block().expect("block");
    assert_eq!(block.statements.len(), 3);
    assert_eq!(root.assignment_count(), 3);
    assert!(block.statements.iter().all(|s| s.kind() == NodeKind::Assignment));
}

#[test]
fn empty_chunks_are_empty_blocks() {
    for source in ["", ";", ";;;", "  \n "] {
        let output = parse(source);
        assert!(output.is_clean(), "{source:?}");
        let root = output.root.unwrap();
        assert!(root.is(NodeKind::Block));
        assert!(root.statements().is_empty());
    }
}

#[test]
fn statements_of_any_root() {
    let root = parse("x = 1").root.unwrap();
    assert_eq!(root.statements().len(), 1);
    assert!(matches!(root, Node::Assignment(_)));
}

#[test]
fn table_constructor_fields() {
    assert_eq!(tree("t = {}"), "Assignment(Identifier(t), TableConstructor([]))");
    assert_eq!(
        tree("t = {1, x = 2, [3] = 4; 5,}"),
        "Assignment(Identifier(t), TableConstructor([FieldInitialization(1), FieldInitialization(String(\"x\"), 2), FieldInitialization(3, 4), FieldInitialization(5)]))"
    );
}

#[test]
fn nested_tables() {
    assert_eq!(
        tree("{{}, {a = {1}}}"),
        "TableConstructor([FieldInitialization(TableConstructor([])), FieldInitialization(TableConstructor([FieldInitialization(String(\"a\"), TableConstructor([FieldInitialization(1)]))]))])"
    );
}

#[test]
fn table_fields_have_typed_keys() {
    let root = parse("t = {1, k = 2}").root.unwrap();
    let assignment = root.as_assignment().unwrap();
    let table = assignment.value.as_table_constructor().unwrap();
    assert!(table.fields[0].is_positional());
    assert!(!table.fields[1].is_positional());
    assert_eq!(
        table.fields[1].key.as_ref().unwrap().as_string().unwrap().value,
        "k"
    );
}

#[test]
fn field_name_must_be_an_identifier() {
    let output = parse("t = {1 = 2}");
    assert_eq!(output.messages(), vec![FIELD_NAME]);
    assert_eq!(
        output.root.unwrap().tree(),
        "Assignment(Identifier(t), TableConstructor([FieldInitialization(1, 2)]))"
    );
}

#[test]
fn varargs_are_unsupported_but_parsed() {
    let output = parse("x = ...");
    assert_eq!(output.diagnostics.len(), 1);
    assert!(output.diagnostics[0].message.contains("not supported yet"));
    let root = output.root.unwrap();
    assert_eq!(root.tree(), "Assignment(Identifier(x), Unsupported(...))");
    let value = &root.as_assignment().unwrap().value;
    assert_eq!(value.as_unsupported().unwrap().construct, "...");
    assert!(value.as_integer().is_none());
}

#[test]
fn every_unsupported_construct_is_reported() {
    let output = parse("f(..., 1, ...)");
    assert_eq!(output.diagnostics.len(), 2);
    assert!(output.root.is_some());
}
