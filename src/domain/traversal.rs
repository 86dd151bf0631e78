//! Depth-first traversals of expression trees.
//!
//! Two strategies produce identical sequences. `Recursive` follows the tree
//! shape directly. `Iterative` uses explicit stacks and has no call-stack
//! depth limit, so very deeply nested input can be parsed, traversed and
//! dropped. Rendering such a tree (`Display`, term tree) still recurses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::node::{ExprNode, ExprTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalStrategy {
    #[default]
    Recursive,
    Iterative,
}

impl FromStr for TraversalStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recursive" => Ok(TraversalStrategy::Recursive),
            "iterative" => Ok(TraversalStrategy::Iterative),
            other => Err(format!(
                "unknown traversal strategy '{other}' (expected recursive|iterative)"
            )),
        }
    }
}

impl fmt::Display for TraversalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalStrategy::Recursive => write!(f, "recursive"),
            TraversalStrategy::Iterative => write!(f, "iterative"),
        }
    }
}

/// The three depth-first orders of one tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Traversals {
    pub preorder: Vec<String>,
    pub inorder: Vec<String>,
    pub postorder: Vec<String>,
}

/// Compute preorder, inorder and postorder value sequences.
///
/// The empty tree gives three empty sequences.
#[instrument(level = "debug", skip_all, fields(strategy = %strategy))]
pub fn compute_traversals(tree: &ExprTree, strategy: TraversalStrategy) -> Traversals {
    let Some(root) = tree.root() else {
        return Traversals::default();
    };
    match strategy {
        TraversalStrategy::Recursive => {
            let mut out = Traversals::default();
            preorder_rec(root, &mut out.preorder);
            inorder_rec(root, &mut out.inorder);
            postorder_rec(root, &mut out.postorder);
            out
        }
        TraversalStrategy::Iterative => Traversals {
            preorder: preorder_iter(root),
            inorder: inorder_iter(root),
            postorder: postorder_iter(root),
        },
    }
}

fn preorder_rec(node: &ExprNode, out: &mut Vec<String>) {
    out.push(node.value());
    if let Some((left, right)) = node.children() {
        preorder_rec(left, out);
        preorder_rec(right, out);
    }
}

fn inorder_rec(node: &ExprNode, out: &mut Vec<String>) {
    match node.children() {
        None => out.push(node.value()),
        Some((left, right)) => {
            inorder_rec(left, out);
            out.push(node.value());
            inorder_rec(right, out);
        }
    }
}

fn postorder_rec(node: &ExprNode, out: &mut Vec<String>) {
    if let Some((left, right)) = node.children() {
        postorder_rec(left, out);
        postorder_rec(right, out);
    }
    out.push(node.value());
}

fn preorder_iter(root: &ExprNode) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        out.push(node.value());
        if let Some((left, right)) = node.children() {
            // right first so left is visited first
            stack.push(right);
            stack.push(left);
        }
    }
    out
}

fn inorder_iter(root: &ExprNode) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack: Vec<&ExprNode> = Vec::new();
    let mut current = Some(root);
    loop {
        while let Some(node) = current {
            stack.push(node);
            current = node.children().map(|(left, _)| left);
        }
        let Some(node) = stack.pop() else {
            break;
        };
        out.push(node.value());
        current = node.children().map(|(_, right)| right);
    }
    out
}

fn postorder_iter(root: &ExprNode) -> Vec<String> {
    // node, right, left reversed
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        out.push(node.value());
        if let Some((left, right)) = node.children() {
            stack.push(left);
            stack.push(right);
        }
    }
    out.reverse();
    out
}
