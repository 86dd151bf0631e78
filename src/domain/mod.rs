//! Domain layer: tokens, expression trees and the pipeline stages
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod node;
pub mod postfix;
pub mod token;
pub mod traversal;

pub use builder::{build_from_preorder, build_tree, TreeBuilder};
pub use error::{DomainError, DomainResult};
pub use node::{ExprNode, ExprTree};
pub use postfix::to_postfix;
pub use token::{check_balance, has_negative_operand, tokenize, NegativeCheck, Operator, Token};
pub use traversal::{compute_traversals, TraversalStrategy, Traversals};
