//! Parser configuration

/// Default bound on nested expressions
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Knobs for a grammar instance
///
/// The configuration is fixed when the grammar is built and applies to every
/// parse run with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// How many expressions may be nested inside each other before the parse
    /// gives up with a diagnostic
    pub max_depth: usize,
    /// Whether a failed parse adds a syntax error at the furthest position
    /// reached
    pub report_syntax_errors: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            report_syntax_errors: true,
        }
    }
}

impl ParserConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_syntax_errors(mut self, report: bool) -> Self {
        self.report_syntax_errors = report;
        self
    }
}
