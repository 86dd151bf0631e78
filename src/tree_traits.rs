/*
Conversion of expression trees into termtree::Tree for terminal display.

Operators become inner nodes, operands become leaves; the left operand is
listed before the right one.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::{ExprNode, ExprTree};

pub const EMPTY_TREE_LABEL: &str = "(empty)";

pub trait ToTermTree {
    fn to_term_tree(&self) -> Tree<String>;
}

impl ToTermTree for ExprNode {
    fn to_term_tree(&self) -> Tree<String> {
        let leaves: Vec<_> = self
            .children()
            .map(|(left, right)| vec![left.to_term_tree(), right.to_term_tree()])
            .unwrap_or_default();

        Tree::new(self.value()).with_leaves(leaves)
    }
}

impl ToTermTree for ExprTree {
    #[instrument(level = "debug", skip_all)]
    fn to_term_tree(&self) -> Tree<String> {
        match self.root() {
            Some(root) => root.to_term_tree(),
            None => Tree::new(EMPTY_TREE_LABEL.to_string()),
        }
    }
}
