use qrlua::lexer::{LuaToken, tokenize};
use qrlua::token::TokenKind;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn lex_keywords() {
    let tokens = LuaToken::lex("nil true false not and or").unwrap();
    assert_eq!(tokens.len(), 6);
    assert!(matches!(tokens[0], LuaToken::Nil(_)));
    assert!(matches!(tokens[1], LuaToken::True(_)));
    assert!(matches!(tokens[2], LuaToken::False(_)));
    assert!(matches!(tokens[3], LuaToken::Not(_)));
    assert!(matches!(tokens[4], LuaToken::And(_)));
    assert!(matches!(tokens[5], LuaToken::Or(_)));
}

#[test]
fn lex_identifiers() {
    let tokens = LuaToken::lex("foo _bar baz2 order").unwrap();
    assert_eq!(tokens.len(), 4);
    assert!(matches!(&tokens[0], LuaToken::Identifier(i) if i.value == "foo"));
    assert!(matches!(&tokens[1], LuaToken::Identifier(i) if i.value == "_bar"));
    assert!(matches!(&tokens[2], LuaToken::Identifier(i) if i.value == "baz2"));
    assert!(matches!(&tokens[3], LuaToken::Identifier(i) if i.value == "order"));
}

#[test]
fn lex_numbers() {
    let tokens = LuaToken::lex("42 0x1F 3.14 1e10").unwrap();
    assert_eq!(tokens.len(), 4);
    assert!(matches!(&tokens[0], LuaToken::IntegerLiteral(i) if i.value == "42"));
    assert!(matches!(&tokens[1], LuaToken::IntegerLiteral(i) if i.value == "0x1F"));
    assert!(matches!(&tokens[2], LuaToken::FloatLiteral(f) if f.value == "3.14"));
    assert!(matches!(&tokens[3], LuaToken::FloatLiteral(f) if f.value == "1e10"));
}

#[test]
fn lex_string_literals() {
    let tokens = LuaToken::lex(r#""hello" 'world' "say \"hi\"""#).unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(matches!(&tokens[0], LuaToken::StringLiteral(s) if s.value == "\"hello\""));
    assert!(matches!(&tokens[1], LuaToken::StringLiteral(s) if s.value == "'world'"));
    assert!(matches!(&tokens[2], LuaToken::StringLiteral(_)));
}

#[test]
fn lex_long_strings() {
    let tokens = LuaToken::lex("[[long]] [[two\nlines]] [=[a]]b]=]").unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(matches!(&tokens[0], LuaToken::StringLiteral(s) if s.value == "[[long]]"));
    assert!(matches!(&tokens[1], LuaToken::StringLiteral(s) if s.value == "[[two\nlines]]"));
    assert!(matches!(&tokens[2], LuaToken::StringLiteral(s) if s.value == "[=[a]]b]=]"));
}

#[test]
fn long_strings_end_at_the_first_closing_bracket() {
    assert_eq!(
        kinds("x = [[a]] .. [[b]]"),
        vec![
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::String,
            TokenKind::DoubleDot,
            TokenKind::String,
        ]
    );
}

#[test]
fn lex_longest_match() {
    assert_eq!(
        kinds(".. ... . // / == = ~= ~ <= << < >= >> >"),
        vec![
            TokenKind::DoubleDot,
            TokenKind::TripleDot,
            TokenKind::Dot,
            TokenKind::DoubleSlash,
            TokenKind::Slash,
            TokenKind::DoubleEquals,
            TokenKind::Equals,
            TokenKind::TildaEquals,
            TokenKind::Tilda,
            TokenKind::LessOrEqual,
            TokenKind::ShiftLeft,
            TokenKind::Less,
            TokenKind::GreaterOrEqual,
            TokenKind::ShiftRight,
            TokenKind::Greater,
        ]
    );
}

#[test]
fn lex_brackets_and_punctuation() {
    assert_eq!(
        kinds("( ) [ ] { } ; , :"),
        vec![
            TokenKind::OpeningBracket,
            TokenKind::ClosingBracket,
            TokenKind::OpeningSquareBracket,
            TokenKind::ClosingSquareBracket,
            TokenKind::OpeningCurlyBracket,
            TokenKind::ClosingCurlyBracket,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Colon,
        ]
    );
}

#[test]
fn lex_arithmetic_operators() {
    assert_eq!(
        kinds("+ - * ^ % & | #"),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Asterisk,
            TokenKind::Hat,
            TokenKind::Percent,
            TokenKind::Ampersand,
            TokenKind::VerticalLine,
            TokenKind::Sharp,
        ]
    );
}

#[test]
fn concatenation_of_integers_is_not_a_float() {
    assert_eq!(
        kinds("1..2"),
        vec![
            TokenKind::IntegerLiteral,
            TokenKind::DoubleDot,
            TokenKind::IntegerLiteral,
        ]
    );
}

#[test]
fn tokens_keep_their_lexemes() {
    let tokens = tokenize("x = 'a'").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].lexeme, "x");
    assert_eq!(tokens[1].lexeme, "=");
    assert_eq!(tokens[2].lexeme, "'a'");
    assert!(tokens[2].is(TokenKind::String));
}

#[test]
fn describe_tokens() {
    let tokens = tokenize("x 1 )").unwrap();
    assert_eq!(tokens[0].describe(), "identifier 'x'");
    assert_eq!(tokens[1].describe(), "integer '1'");
    assert_eq!(tokens[2].describe(), "')'");
}
