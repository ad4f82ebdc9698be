//! # qrlua - parser combinators and a Lua grammar
//!
//! qrlua turns a stream of Lua tokens into an abstract syntax tree together
//! with a list of diagnostics. It is made of two layers:
//!
//! 1. **Parser framework** (`parser`) - combinators over a token cursor,
//!    forward-declared rules for recursive grammars, and a precedence-climbing
//!    engine for binary operators
//! 2. **Lua grammar** (`grammar`) - the expression and statement subset of Lua
//!    5.3 written with that framework, plus the semantic actions that build
//!    the tree
//!
//! ## Pipeline
//!
//! ```text
//! Source Code (String)
//!     ↓
//! [Lexer] → Token Stream (Vec<token::Token>)
//!     ↓
//! [LuaGrammar] → ParseOutput { root: Option<ast::Node>, diagnostics }
//!     ↓
//! [fmt] → Lua source again, or the structural tree form
//! ```
//!
//! The lexer is a separate collaborator: the grammar only needs tokens with a
//! kind, a lexeme and a span, so tokens from any other source work as well.
//!
//! ## Diagnostics instead of failure
//!
//! Parsing never stops at the first semantic problem. Unsupported syntax such
//! as `...`, assignments to calls and mismatched multiple assignments are
//! reported and parsing carries on. Only input that no rule can consume ends
//! in a missing tree, with a single syntax error at the furthest position any
//! rule reached.
//!
//! ## Example
//!
//! ```no_run
//! use qrlua::{grammar::LuaGrammar, lexer::tokenize};
//!
//! let grammar = LuaGrammar::new().unwrap();
//! let output = grammar.parse(tokenize("a, b = 1, f(2):g 'x'").unwrap());
//! assert!(output.is_clean());
//! println!("{}", output.root.unwrap().tree());
//! ```
//!
//! ## Module Structure
//!
//! - [`token`] - Token kinds and tokens as the parser sees them
//! - [`lexer`] - Tokenization using lachs
//! - [`parser`] - Combinators, rules and the expression engine
//! - [`grammar`] - The Lua grammar and its semantic actions
//! - [`ast`] - Abstract Syntax Tree definitions
//! - [`diagnostics`] - Errors collected during a parse
//! - [`fmt`] - Code formatting and tree rendering
//! - [`config`] - Parser configuration
//! - [`error`] - Errors that abort grammar construction or lexing

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fmt;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod token;

use error::LexError;
use grammar::{LuaGrammar, ParseOutput};

/// Tokenizes `source` and parses it with `grammar`
pub fn parse_source(grammar: &LuaGrammar, source: &str) -> Result<ParseOutput, LexError> {
    let tokens = lexer::tokenize(source)?;
    Ok(grammar.parse(tokens))
}
