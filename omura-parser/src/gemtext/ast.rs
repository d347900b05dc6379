//! AST definitions for gemtext
//!
//!     A gemtext document is flat: the root holds a sequence of line-level nodes. The only
//!     nesting is the list, which groups consecutive list items, so the tree is at most three
//!     levels deep (root, list, item).
//!
//!     Every node carries a mandatory `location` that encloses the locations of its children.
//!     Locations come straight from the tokens the node was built from; see [range].
//!
//! Node Kinds
//!
//!     Root, Heading, Link, List, ListItem, Pre, Quote, Text and Break. Each is a struct in
//!     [elements], wrapped by the [Node] sum type. Containers own their children; there are no
//!     parent pointers.

pub mod elements;
pub mod range;
pub mod traits;

pub use elements::{Break, Heading, Link, List, ListItem, Node, Pre, Quote, Root, Text};
pub use range::{Position, Range, SourceLocation};
pub use traits::{AstNode, Visitor};
