//! # Parser framework
//!
//! A small combinator library over a token stream:
//!
//! - [`ParseState`] holds the cursor, the furthest failure and the diagnostics
//! - [`BoxedParser`] is the type-erased parser with the usual combinators
//!   (`+` sequence, `-` keep left, `*` keep right, `|` choice, `>>` map)
//! - [`RuleSet`] declares rules up front so they can refer to each other
//!   before they are defined
//! - [`ExpressionParser`] does precedence climbing driven by a
//!   [`PrecedenceTable`]
//!
//! Nothing in here knows about a concrete language; see [`crate::grammar`].

mod combinators;
mod expression;
mod precedence;
mod rule;
mod state;

pub use combinators::*;
pub use expression::ExpressionParser;
pub use precedence::{Associativity, BinaryBinding, PrecedenceTable};
pub use rule::{Rule, RuleSet, Rules};
pub use state::{ParseError, ParseResult, ParseState, Parser};
