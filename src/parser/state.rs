use std::fmt;

use tracing::trace;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::diagnostics::Diagnostics;
use crate::token::{Position, Token, TokenKind};

/// Why a parser did not match at the current position
///
/// This is ordinary control flow between combinators. It only turns into a
/// reported diagnostic if nothing at the top of the grammar could match.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub expected: Vec<String>,
    pub found: Option<String>,
    pub position: Option<Position>,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            expected: vec![],
            found: None,
            position: None,
        }
    }

    pub fn expected(mut self, what: impl Into<String>) -> Self {
        self.expected.push(what.into());
        self
    }

    pub fn found(mut self, what: impl Into<String>) -> Self {
        self.found = Some(what.into());
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    fn merge_expected(&mut self, other: &ParseError) {
        for expected in &other.expected {
            if !self.expected.contains(expected) {
                self.expected.push(expected.clone());
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(found) = &self.found {
            write!(f, " {found}")?;
        }
        match self.expected.as_slice() {
            [] => Ok(()),
            [single] => write!(f, ", expected {single}"),
            [init @ .., last] => write!(f, ", expected {} or {last}", init.join(", ")),
        }
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// Everything that changes while one token stream is parsed
///
/// The cursor is the index into `tokens`. Besides it, the only mutable state
/// is the diagnostics sink, the furthest failure seen so far and the current
/// expression nesting depth.
pub struct ParseState {
    tokens: Vec<Token>,
    index: usize,
    furthest: Option<(usize, ParseError)>,
    diagnostics: Diagnostics,
    depth: usize,
    max_depth: usize,
    depth_exceeded: bool,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(tokens: Vec<Token>, max_depth: usize) -> Self {
        Self {
            tokens,
            index: 0,
            furthest: None,
            diagnostics: Diagnostics::new(),
            depth: 0,
            max_depth,
            depth_exceeded: false,
        }
    }

    pub fn advance(&mut self) -> Option<Token> {
        if self.has_next() {
            let token = self.tokens[self.index].clone();
            self.index += 1;
            Some(token)
        } else {
            None
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn restore(&mut self, position: usize) {
        self.index = position;
    }

    /// Position of the current token, or of the last one once input is exhausted
    pub fn current_position(&self) -> Position {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|token| token.position)
            .unwrap_or_default()
    }

    /// Failure for "something else was expected here"
    pub fn error_here(&self, msg: impl Into<String>) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::new(msg)
                .found(token.describe())
                .at(token.position),
            None => ParseError::new("unexpected end of input").at(self.current_position()),
        }
    }

    /// Remembers `err` if it happened further into the input than anything
    /// recorded before
    ///
    /// Failures at the same position are merged so the final message lists
    /// every alternative that was tried there.
    pub fn record_error(&mut self, err: ParseError) {
        let current = self.index;
        match &mut self.furthest {
            Some((index, furthest)) if *index == current => furthest.merge_expected(&err),
            Some((index, _)) if *index > current => {}
            _ => self.furthest = Some((current, err)),
        }
    }

    /// Number of expectations recorded at token `index` so far
    pub fn expected_at(&self, index: usize) -> usize {
        match &self.furthest {
            Some((furthest_index, furthest)) if *furthest_index == index => furthest.expected.len(),
            _ => 0,
        }
    }

    /// Replaces the expectations recorded at token `index` after the first
    /// `keep` ones by `label`, unless a failure already got further
    pub fn relabel(&mut self, index: usize, keep: usize, err: ParseError) {
        match &mut self.furthest {
            Some((furthest_index, furthest)) if *furthest_index == index => {
                furthest.expected.truncate(keep);
                furthest.merge_expected(&err);
            }
            Some((furthest_index, _)) if *furthest_index > index => {}
            _ => self.furthest = Some((index, err)),
        }
    }

    pub fn furthest_error(&self) -> Option<&ParseError> {
        self.furthest.as_ref().map(|(_, err)| err)
    }

    /// Token index of the furthest recorded failure
    pub fn furthest_position(&self) -> Option<usize> {
        self.furthest.as_ref().map(|(index, _)| *index)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Enters one level of expression nesting
    ///
    /// Fails once the configured bound is reached. The first time that happens
    /// in a parse a diagnostic is reported; deeper attempts fail silently.
    pub fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= self.max_depth {
            if !self.depth_exceeded {
                self.depth_exceeded = true;
                let span = self.current_position();
                self.diagnostics.report(span, "Nesting is too deep");
            }
            return Err(ParseError::new("nesting is too deep"));
        }
        self.depth += 1;
        trace!(depth = self.depth, index = self.index, "enter expression");
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth_exceeded(&self) -> bool {
        self.depth_exceeded
    }
}

pub trait Parser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T>;
}

impl<T, F: Fn(&mut ParseState) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        self(state)
    }
}
