//! # Lua grammar
//!
//! The expression and statement subset of Lua 5.3, written with the
//! combinators from [`crate::parser`]:
//!
//! ```text
//! chunk            ::= block
//! block            ::= {stat}
//! stat             ::= ';' | explist ['=' explist]
//! explist          ::= exp {',' exp}
//! exp              ::= primary {binop primary}
//! primary          ::= 'nil' | 'false' | 'true' | Number | String | '...'
//!                    | prefixexp | tableconstructor | unop exp
//! prefixexp        ::= prefixterm {functioncallpart | varpart}
//! varpart          ::= '[' exp ']' | '.' Name
//! functioncallpart ::= args | ':' Name args
//! prefixterm       ::= Name | '(' exp ')'
//! args             ::= '(' [explist] ')' | tableconstructor | String
//! tableconstructor ::= '{' [fieldlist] '}'
//! fieldlist        ::= field {fieldsep field} [fieldsep]
//! field            ::= '[' exp ']' '=' exp | exp ['=' exp]
//! fieldsep         ::= ',' | ';'
//! ```
//!
//! Binary operators are resolved by precedence climbing, see
//! [`operators::precedence_table`]. A grammar is built once and can then parse
//! any number of token streams, also from several threads at a time.

pub mod actions;
pub mod operators;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::ast::{BinaryOperator, Expression, FieldInitialization, Node, Statement, UnaryOperator};
use crate::config::ParserConfig;
use crate::diagnostics::Error;
use crate::error::GrammarError;
use crate::parser::{
    BoxedParser, ExpressionParser, ParseResult, ParseState, Parser, PrecedenceTable, Rule,
    RuleSet, Rules, end_of_input, many, optional, separated, token,
};
use crate::token::{Token, TokenKind};

use self::actions::{Arguments, StatementParts, Suffix};

/// Result of parsing one token stream
#[derive(Debug)]
pub struct ParseOutput {
    /// The tree, `None` if the input could not be parsed
    pub root: Option<Node>,
    /// Everything reported during the parse, in order
    pub diagnostics: Vec<Error>,
}

impl ParseOutput {
    /// A tree was built and nothing was reported
    pub fn is_clean(&self) -> bool {
        self.root.is_some() && self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .map(|error| error.message.as_str())
            .collect()
    }
}

/// Every rule of the grammar, declared before any of them is defined
struct Declarations {
    stat: Rule<Vec<Statement>>,
    explist: Rule<Vec<Expression>>,
    exp: Rule<Expression>,
    primary: Rule<Expression>,
    prefixexp: Rule<Expression>,
    varpart: Rule<Suffix>,
    functioncallpart: Rule<Suffix>,
    prefixterm: Rule<Expression>,
    args: Rule<Arguments>,
    tableconstructor: Rule<Expression>,
    fieldlist: Rule<Vec<FieldInitialization>>,
    field: Rule<FieldInitialization>,
    fieldsep: Rule<()>,
    binop: Rule<BinaryOperator>,
    unop: Rule<(UnaryOperator, Token)>,
}

impl Declarations {
    fn new(rules: &mut RuleSet) -> Self {
        Self {
            stat: rules.declare("stat"),
            explist: rules.declare("explist"),
            exp: rules.declare("exp"),
            primary: rules.declare("primary"),
            prefixexp: rules.declare("prefixexp"),
            varpart: rules.declare("varpart"),
            functioncallpart: rules.declare("functioncallpart"),
            prefixterm: rules.declare("prefixterm"),
            args: rules.declare("args"),
            tableconstructor: rules.declare("tableconstructor"),
            fieldlist: rules.declare("fieldlist"),
            field: rules.declare("field"),
            fieldsep: rules.declare("fieldsep"),
            binop: rules.declare("binop"),
            unop: rules.declare("unop"),
        }
    }
}

/// A ready-to-use Lua parser
///
/// Immutable once built; every [`LuaGrammar::parse`] call gets its own
/// cursor and diagnostics.
pub struct LuaGrammar {
    chunk: BoxedParser<Node>,
    // owns the rule slots `chunk` refers to
    rules: Rules,
    table: Arc<PrecedenceTable>,
    config: ParserConfig,
}

impl LuaGrammar {
    pub fn new() -> Result<Self, GrammarError> {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Result<Self, GrammarError> {
        let table = Arc::new(operators::precedence_table());
        let mut rules = RuleSet::new();
        let r = Declarations::new(&mut rules);

        let engine = ExpressionParser::new(
            Arc::clone(&table),
            r.primary.parser().label("expression"),
            r.binop.parser(),
            actions::binary,
        );

        // stat ::= ';' | explist ['=' explist]
        let empty = -token(TokenKind::Semicolon) >> |_| StatementParts::None;
        let expressions = (r.explist.parser()
            + optional(token(TokenKind::Equals) * r.explist.parser()))
            >> |(targets, values)| Some((targets, values));
        rules.define(&r.stat, (empty | expressions).action(actions::statement))?;

        // explist ::= exp {',' exp}
        rules.define(
            &r.explist,
            separated(r.exp.parser(), token(TokenKind::Comma)),
        )?;

        rules.define(&r.exp, engine.parser())?;

        // primary
        let unary = {
            let engine = engine.clone();
            let table = Arc::clone(&table);
            let unop = r.unop.parser();
            BoxedParser::new(move |state: &mut ParseState| -> ParseResult<Expression> {
                let start = state.position();
                let (operator, token) = unop.parse(state)?;
                let precedence = table
                    .unary_precedence(token.kind)
                    .unwrap_or(operators::UNARY_PRECEDENCE);
                match engine.parse_at(state, precedence) {
                    Ok(operand) => Ok(actions::unary(operator, &token.position, operand)),
                    Err(err) => {
                        state.restore(start);
                        Err(err)
                    }
                }
            })
        };
        rules.define(
            &r.primary,
            (token(TokenKind::Nil) >> actions::nil)
                | (token(TokenKind::False) >> |t| actions::boolean(t, false))
                | (token(TokenKind::True) >> |t| actions::boolean(t, true))
                | (token(TokenKind::IntegerLiteral) >> actions::integer)
                | (token(TokenKind::FloatLiteral) >> actions::float)
                | (token(TokenKind::String) >> actions::string)
                | token(TokenKind::TripleDot).action(actions::unsupported)
                | r.prefixexp.parser()
                | r.tableconstructor.parser()
                | unary,
        )?;

        // prefixexp ::= prefixterm {functioncallpart | varpart}
        rules.define(
            &r.prefixexp,
            (r.prefixterm.parser() + many(r.functioncallpart.parser() | r.varpart.parser()))
                >> actions::prefix,
        )?;

        // varpart ::= '[' exp ']' | '.' Name
        let bracket_index = (token(TokenKind::OpeningSquareBracket) * r.exp.parser()
            + token(TokenKind::ClosingSquareBracket))
            >> |(indexer, close)| Suffix::Index {
                indexer,
                end: close.position,
            };
        let name_index =
            (token(TokenKind::Dot) * token(TokenKind::Identifier)) >> actions::name_index;
        rules.define(&r.varpart, bracket_index | name_index)?;

        // functioncallpart ::= args | ':' Name args
        let call = r.args.parser() >> Suffix::Call;
        let method = (token(TokenKind::Colon) * token(TokenKind::Identifier) + r.args.parser())
            >> |(name, arguments)| Suffix::Method {
                name: actions::identifier(name),
                arguments,
            };
        rules.define(&r.functioncallpart, call | method)?;

        // prefixterm ::= Name | '(' exp ')'
        let name = token(TokenKind::Identifier) >> |t| Expression::Identifier(actions::identifier(t));
        let parenthesized = token(TokenKind::OpeningBracket) * r.exp.parser()
            - token(TokenKind::ClosingBracket);
        rules.define(&r.prefixterm, name | parenthesized)?;

        // args ::= '(' [explist] ')' | tableconstructor | String
        let list = (token(TokenKind::OpeningBracket)
            + optional(r.explist.parser())
            + token(TokenKind::ClosingBracket))
            >> |((open, values), close)| Arguments {
                values: values.unwrap_or_default(),
                position: open.position.merge(&close.position),
            };
        let table_argument = r.tableconstructor.parser() >> Arguments::single;
        let string_argument =
            token(TokenKind::String) >> |t| Arguments::single(actions::string(t));
        rules.define(&r.args, list | table_argument | string_argument)?;

        // tableconstructor ::= '{' [fieldlist] '}'
        rules.define(
            &r.tableconstructor,
            (token(TokenKind::OpeningCurlyBracket)
                + optional(r.fieldlist.parser())
                + token(TokenKind::ClosingCurlyBracket))
                >> |((open, fields), close)| actions::table((open, fields, close)),
        )?;

        // fieldlist ::= field {fieldsep field} [fieldsep]
        rules.define(
            &r.fieldlist,
            separated(r.field.parser(), r.fieldsep.parser()) - optional(r.fieldsep.parser()),
        )?;

        // field ::= '[' exp ']' '=' exp | exp ['=' exp]
        let bracketed = (token(TokenKind::OpeningSquareBracket) * r.exp.parser()
            - token(TokenKind::ClosingSquareBracket)
            - token(TokenKind::Equals)
            + r.exp.parser())
            >> |(key, value)| FieldInitialization::keyed(key, value);
        let plain = (r.exp.parser() + optional(token(TokenKind::Equals) * r.exp.parser()))
            .action(actions::field);
        rules.define(&r.field, bracketed | plain)?;

        // fieldsep ::= ',' | ';'
        rules.define(
            &r.fieldsep,
            -token(TokenKind::Comma) | -token(TokenKind::Semicolon),
        )?;

        rules.define(&r.binop, operators::binop())?;
        rules.define(&r.unop, operators::unop())?;

        // chunk ::= block
        let chunk = many(r.stat.parser()) >> actions::block;
        let chunk = chunk - end_of_input();

        let rules = rules.finish()?;
        debug!(rules = rules.len(), max_depth = config.max_depth, "grammar built");

        Ok(Self {
            chunk,
            rules,
            table,
            config,
        })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn precedence_table(&self) -> &PrecedenceTable {
        &self.table
    }

    /// Names of all rules, in declaration order
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.names()
    }

    /// Parses one complete token stream
    ///
    /// The input must be consumed entirely. If it cannot be, a single syntax
    /// error is reported at the furthest position any rule reached and no
    /// tree is returned.
    pub fn parse(&self, tokens: Vec<Token>) -> ParseOutput {
        debug!(tokens = tokens.len(), "parse started");
        let mut state = ParseState::with_max_depth(tokens, self.config.max_depth);

        let root = match self.chunk.parse(&mut state) {
            Ok(root) => Some(root),
            Err(err) => {
                if self.config.report_syntax_errors && !state.depth_exceeded() {
                    let syntax = state.furthest_error().cloned().unwrap_or(err);
                    let position = syntax
                        .position
                        .unwrap_or_else(|| state.current_position());
                    let message = syntax.to_string();
                    warn!(%message, "syntax error");
                    state.diagnostics_mut().report(position, message);
                }
                None
            }
        };

        let diagnostics = state.into_diagnostics().into_vec();
        debug!(
            parsed = root.is_some(),
            diagnostics = diagnostics.len(),
            "parse finished"
        );
        ParseOutput { root, diagnostics }
    }
}
