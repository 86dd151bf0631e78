//! exprtree: arithmetic expressions to postfix, expression trees and traversals.
//!
//! ```
//! let tree = exprtree::parse_and_build("3+4*2").unwrap();
//! let t = exprtree::compute_traversals(&tree);
//! assert_eq!(t.preorder, ["+", "3", "*", "4", "2"]);
//! assert_eq!(t.inorder, ["3", "+", "4", "*", "2"]);
//! assert_eq!(t.postorder, ["3", "4", "2", "*", "+"]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

use crate::application::services::ExpressionService;
use crate::domain::{DomainResult, ExprTree, Traversals};

/// Parse a raw expression into an expression tree using default settings.
pub fn parse_and_build(raw: &str) -> DomainResult<ExprTree> {
    ExpressionService::default().parse_and_build(raw)
}

/// Preorder, inorder and postorder values of a tree using default settings.
pub fn compute_traversals(tree: &ExprTree) -> Traversals {
    ExpressionService::default().compute_traversals(tree)
}
