//! Printing parsed code
//!
//! Two renderings of the same tree:
//!
//! - [`surface`] implements `Display`, producing Lua source that parses back
//!   into the same tree
//! - [`tree`] spells out the node structure, e.g.
//!   `Addition(1, Multiplication(2, 3))`

pub mod surface;
pub mod tree;

pub use tree::tree;
