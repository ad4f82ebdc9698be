use std::ops::{Add, BitOr, Mul, Neg, Shr, Sub};
use std::sync::Arc;

use crate::diagnostics::Diagnostics;
use crate::token::{Token, TokenKind};

use super::state::{ParseError, ParseResult, ParseState, Parser};

type ParserFn<T> = Arc<dyn Fn(&mut ParseState) -> ParseResult<T> + Send + Sync>;

// === Boxed Parser for type erasure ===

/// A type-erased parser that can be cloned cheaply and shared between threads
pub struct BoxedParser<T> {
    parser: ParserFn<T>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Arc::clone(&self.parser),
        }
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + Send + Sync + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Arc::new(move |state| parser.parse(state)),
        }
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        (self.parser)(state)
    }
}

// === Combinators as methods ===

impl<T: 'static> BoxedParser<T> {
    /// Sequence: parse self then other, return (T, U)
    ///
    /// If `other` fails the cursor goes back to where `self` started.
    pub fn seq<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<(T, U)> {
        BoxedParser::new(move |state: &mut ParseState| {
            let start = state.position();
            let a = self.parse(state)?;
            match other.parse(state) {
                Ok(b) => Ok((a, b)),
                Err(err) => {
                    state.restore(start);
                    Err(err)
                }
            }
        })
    }

    /// Keep left: parse self then other, discard other's result
    pub fn skip<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<T> {
        self.seq(other).map(|(a, _)| a)
    }

    /// Keep right: parse self then other, discard self's result
    pub fn skip_left<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<U> {
        self.seq(other).map(|(_, b)| b)
    }

    /// Discard: self must match, its value is dropped
    pub fn discard(self) -> BoxedParser<()> {
        self.map(|_| ())
    }

    /// Map: transform result
    pub fn map<U: 'static, F: Fn(T) -> U + Send + Sync + 'static>(self, f: F) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            Ok(f(a))
        })
    }

    /// Semantic action: transform the result with access to the diagnostics
    ///
    /// Runs only after `self` matched completely. Problems are reported, not
    /// returned, so the action always produces a value.
    pub fn action<U: 'static, F>(self, f: F) -> BoxedParser<U>
    where
        F: Fn(T, &mut Diagnostics) -> U + Send + Sync + 'static,
    {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            Ok(f(a, state.diagnostics_mut()))
        })
    }

    /// Choice: try self, if fails try other
    pub fn or(self, other: BoxedParser<T>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let pos = state.position();
            match self.parse(state) {
                Ok(a) => Ok(a),
                Err(_) => {
                    // Error is already recorded in state by the parser
                    state.restore(pos);
                    other.parse(state)
                }
            }
        })
    }

    /// Add a label to this parser for better error messages
    ///
    /// When the parser fails without getting past its first token, the
    /// expectations it recorded there are replaced by `name`.
    pub fn label(self, name: &'static str) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let start = state.position();
            let keep = state.expected_at(start);
            match self.parse(state) {
                Ok(v) => Ok(v),
                Err(mut err) => {
                    err.expected = vec![name.to_string()];
                    state.relabel(start, keep, err.clone());
                    Err(err)
                }
            }
        })
    }
}

// === Operator Overloading ===

/// `+` for sequence: A + B -> (A, B)
impl<T: 'static, U: 'static> Add<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<(T, U)>;

    fn add(self, rhs: BoxedParser<U>) -> Self::Output {
        self.seq(rhs)
    }
}

/// `-` for keep left: A - B -> A (parse B, discard result)
impl<T: 'static, U: 'static> Sub<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn sub(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip(rhs)
    }
}

/// `*` for keep right: A * B -> B (parse A, discard result)
impl<T: 'static, U: 'static> Mul<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn mul(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip_left(rhs)
    }
}

/// `|` for choice: A | B -> A or B
impl<T: 'static> BitOr<BoxedParser<T>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn bitor(self, rhs: BoxedParser<T>) -> Self::Output {
        self.or(rhs)
    }
}

/// `>>` for map: A >> fn -> B
impl<T: 'static, U: 'static, F: Fn(T) -> U + Send + Sync + 'static> Shr<F> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}

/// unary `-` for discard: -A -> ()
impl<T: 'static> Neg for BoxedParser<T> {
    type Output = BoxedParser<()>;

    fn neg(self) -> Self::Output {
        self.discard()
    }
}

// === Primitive Parsers ===

/// Matches a single token of the given kind
pub fn token(kind: TokenKind) -> BoxedParser<Token> {
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Some(tok) if tok.kind == kind => state
            .advance()
            .ok_or_else(|| ParseError::new("unexpected end of input")),
        Some(tok) => {
            let err = ParseError::new("unexpected")
                .expected(kind.describe())
                .found(tok.describe())
                .at(tok.position);
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input")
                .expected(kind.describe())
                .at(state.current_position());
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Succeeds only when every token has been consumed
pub fn end_of_input() -> BoxedParser<()> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        None => Ok(()),
        Some(tok) => {
            let err = ParseError::new("unexpected")
                .expected("end of input")
                .found(tok.describe())
                .at(tok.position);
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Parse zero or more occurrences
///
/// Stops at the first failure, or at a match that consumed nothing since
/// repeating it could never make progress.
pub fn many<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut results = Vec::new();
        loop {
            let pos = state.position();
            match parser.parse(state) {
                Ok(item) => {
                    results.push(item);
                    if state.position() == pos {
                        break;
                    }
                }
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(results)
    })
}

/// Optional: parse zero or one
pub fn optional<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Option<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        match parser.parse(state) {
            Ok(item) => Ok(Some(item)),
            Err(_) => {
                state.restore(pos);
                Ok(None)
            }
        }
    })
}

/// Ordered choice over any number of parsers
///
/// An empty list never matches.
pub fn choice<T: 'static>(parsers: Vec<BoxedParser<T>>) -> BoxedParser<T> {
    let mut parsers = parsers.into_iter();
    match parsers.next() {
        Some(first) => parsers.fold(first, |acc, next| acc | next),
        None => BoxedParser::new(|state: &mut ParseState| -> ParseResult<T> {
            Err(state.error_here("unexpected"))
        }),
    }
}

/// item {separator item}
pub fn separated<T: 'static, S: 'static>(
    item: BoxedParser<T>,
    separator: BoxedParser<S>,
) -> BoxedParser<Vec<T>> {
    (item.clone() + many(separator * item))
        >> |(first, rest)| {
            let mut items = Vec::with_capacity(rest.len() + 1);
            items.push(first);
            items.extend(rest);
            items
        }
}
