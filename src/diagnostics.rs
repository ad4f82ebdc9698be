//! Diagnostics collected while parsing
//!
//! Semantic actions report problems here instead of aborting the parse, so a
//! single run can surface every issue in the input. The sink is append-only.

use std::fmt;

use crate::token::Position;
use tracing::debug;

/// A single problem found in the input
#[derive(Debug, Clone)]
pub struct Error {
    pub position: Position,
    pub message: String,
}

impl Error {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl Error {
    /// The message together with an excerpt of `source` around the position
    ///
    /// `source` has to be the text the tokens were lexed from. Errors without
    /// a position render as the bare message.
    pub fn render(&self, source: &str) -> String {
        if source.is_empty() || self.position == Position::default() {
            self.message.clone()
        } else {
            self.position.to_span(source).to_string(&self.message)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

/// Ordered list of errors for one parse
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, position: Position, message: impl Into<String>) {
        let error = Error::new(position, message);
        debug!(
            line = error.position.start.0,
            column = error.position.start.1,
            message = %error.message,
            "diagnostic reported"
        );
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.errors
    }
}
