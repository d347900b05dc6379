//! Testing utilities for gemtext parser tests
//!
//!     Tests should check whole trees, not single fields: a node that parses with the right
//!     text but lands in the wrong parent, or a stray Break, is exactly the kind of bug a
//!     field check misses. Use [assert_ast](fn@assert_ast) to walk the tree, and the sample
//!     documents in [samples] rather than ad-hoc strings where a realistic page is needed.
//!
//!     ```rust,ignore
//!     use omura_parser::gemtext::testing::{assert_ast, samples};
//!
//!     let root = samples::load("capsule").parse();
//!     assert_ast(&root)
//!         .child_count(9)
//!         .child(0, |c| { c.assert_heading().rank(1).text("Omura capsule"); });
//!     ```

pub mod ast_assertions;
pub mod samples;

pub use ast_assertions::assert_ast;
