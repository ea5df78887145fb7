//! Domain layer: the containers and their rendering
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod list;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use list::{Item, OrderedList};
pub use tree::{Node, NodeId, Tree, TreeIterator};
