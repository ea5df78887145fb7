//! Ordered list and multi-way tree containers with deterministic text
//! rendering.
//!
//! Lists render as one line per item with an optional glyph prefix, trees
//! render as branch-art in the style of the `tree` command. Both use
//! [`format::NEW_LINE`] as line terminator on every platform.

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod format;
pub mod sample;
pub mod tree_traits;
pub mod util;

pub use domain::{DomainError, Item, Node, NodeId, OrderedList, Tree};
pub use format::clean;
pub use tree_traits::ToTermTree;
