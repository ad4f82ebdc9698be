//! Precedence climbing over a primary parser and a binary operator parser
//!
//! The engine owns every decision about binding strength and associativity.
//! Grammars only describe what a primary term and an operator look like and
//! how to fold two operands into a node.

use std::sync::Arc;

use tracing::trace;

use super::combinators::BoxedParser;
use super::precedence::PrecedenceTable;
use super::state::{ParseResult, ParseState, Parser};

/// Stack space that must be left before recursing further
const RED_ZONE: usize = 100 * 1024;

/// Stack space allocated whenever the red zone is hit
const STACK_PER_RECURSION: usize = 1024 * 1024;

type Combine<E, Op> = Arc<dyn Fn(Op, E, E) -> E + Send + Sync>;

pub struct ExpressionParser<E, Op> {
    table: Arc<PrecedenceTable>,
    primary: BoxedParser<E>,
    binop: BoxedParser<Op>,
    combine: Combine<E, Op>,
}

impl<E, Op> Clone for ExpressionParser<E, Op> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            primary: self.primary.clone(),
            binop: self.binop.clone(),
            combine: Arc::clone(&self.combine),
        }
    }
}

impl<E: 'static, Op: 'static> ExpressionParser<E, Op> {
    pub fn new<F>(
        table: Arc<PrecedenceTable>,
        primary: BoxedParser<E>,
        binop: BoxedParser<Op>,
        combine: F,
    ) -> Self
    where
        F: Fn(Op, E, E) -> E + Send + Sync + 'static,
    {
        Self {
            table,
            primary,
            binop,
            combine: Arc::new(combine),
        }
    }

    pub fn table(&self) -> &PrecedenceTable {
        &self.table
    }

    /// Parses an expression whose operators all bind at least as tightly as
    /// `min_precedence`
    ///
    /// Counts as one level of nesting. Operator chains inside it do not, no
    /// matter how they associate.
    pub fn parse_at(&self, state: &mut ParseState, min_precedence: u8) -> ParseResult<E> {
        state.enter()?;
        let result = self.operand(state, min_precedence);
        state.leave();
        result
    }

    /// Grows the stack when it runs low; right-associative chains recurse once
    /// per operator
    fn operand(&self, state: &mut ParseState, min_precedence: u8) -> ParseResult<E> {
        stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || {
            self.climb(state, min_precedence)
        })
    }

    fn climb(&self, state: &mut ParseState, min_precedence: u8) -> ParseResult<E> {
        let start = state.position();
        let mut left = self.primary.parse(state)?;

        loop {
            let Some(binding) = state
                .peek_kind()
                .and_then(|kind| self.table.binary_binding(kind))
            else {
                break;
            };

            if binding.precedence < min_precedence {
                trace!(
                    precedence = binding.precedence,
                    min_precedence, "operator binds too loosely, stop"
                );
                break;
            }

            let before_operator = state.position();
            let op = match self.binop.parse(state) {
                Ok(op) => op,
                Err(_) => {
                    state.restore(before_operator);
                    break;
                }
            };

            let right = match self.operand(state, binding.right_precedence()) {
                Ok(right) => right,
                Err(err) => {
                    state.restore(start);
                    return Err(err);
                }
            };

            left = (self.combine)(op, left, right);
        }

        Ok(left)
    }

    /// Parser for a whole expression, accepting every operator
    pub fn parser(&self) -> BoxedParser<E> {
        self.parser_at(0)
    }

    /// Parser seeded at `min_precedence`
    ///
    /// Unary operators use this with their own binding power so the operand
    /// takes in exactly the operators that bind tighter than the unary one.
    pub fn parser_at(&self, min_precedence: u8) -> BoxedParser<E> {
        let engine = self.clone();
        BoxedParser::new(move |state: &mut ParseState| engine.parse_at(state, min_precedence))
    }
}
