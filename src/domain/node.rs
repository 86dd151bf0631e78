//! Expression tree nodes.

use std::fmt;

use crate::domain::token::Operator;

/// Node of a binary expression tree.
///
/// A `Binary` node owns both subtrees; there is no sharing between nodes.
/// Dropping, `node_count` and `depth` walk the tree with explicit stacks.
/// `Display`, `Clone` and equality recurse once per level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprNode {
    Leaf {
        value: String,
    },
    Binary {
        operator: Operator,
        left: Box<ExprNode>,
        right: Box<ExprNode>,
    },
}

impl ExprNode {
    pub fn leaf(value: impl Into<String>) -> Self {
        ExprNode::Leaf {
            value: value.into(),
        }
    }

    pub fn binary(operator: Operator, left: ExprNode, right: ExprNode) -> Self {
        ExprNode::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Text shown for this node: the digit run or the operator symbol.
    pub fn value(&self) -> String {
        match self {
            ExprNode::Leaf { value } => value.clone(),
            ExprNode::Binary { operator, .. } => operator.to_string(),
        }
    }

    /// Left and right child, `None` for leaves.
    pub fn children(&self) -> Option<(&ExprNode, &ExprNode)> {
        match self {
            ExprNode::Leaf { .. } => None,
            ExprNode::Binary { left, right, .. } => Some((left.as_ref(), right.as_ref())),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ExprNode::Leaf { .. })
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            if let Some((left, right)) = node.children() {
                stack.push(left);
                stack.push(right);
            }
        }
        count
    }

    /// Number of levels; a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            if let Some((left, right)) = node.children() {
                stack.push((left, level + 1));
                stack.push((right, level + 1));
            }
        }
        deepest
    }

    /// Swap both children out for empty leaves.
    fn detach_children(&mut self) -> Option<(ExprNode, ExprNode)> {
        match self {
            ExprNode::Leaf { .. } => None,
            ExprNode::Binary { left, right, .. } => Some((
                std::mem::replace(left.as_mut(), ExprNode::leaf(String::new())),
                std::mem::replace(right.as_mut(), ExprNode::leaf(String::new())),
            )),
        }
    }
}

impl Drop for ExprNode {
    fn drop(&mut self) {
        let Some((left, right)) = self.detach_children() else {
            return;
        };
        // each popped node has its children moved out before it is freed
        let mut stack = vec![left, right];
        while let Some(mut node) = stack.pop() {
            if let Some((left, right)) = node.detach_children() {
                stack.push(left);
                stack.push(right);
            }
        }
    }
}

/// Fully parenthesized infix form, e.g. `(3 + (4 * 2))`.
impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprNode::Leaf { value } => write!(f, "{value}"),
            ExprNode::Binary {
                operator,
                left,
                right,
            } => write!(f, "({left} {operator} {right})"),
        }
    }
}

/// Result of a pipeline run: a root node or the empty tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExprTree {
    root: Option<ExprNode>,
}

impl ExprTree {
    pub fn new(root: ExprNode) -> Self {
        Self { root: Some(root) }
    }

    pub fn empty() -> Self {
        Self { root: None }
    }

    pub fn root(&self) -> Option<&ExprNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, ExprNode::node_count)
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, ExprNode::depth)
    }
}

impl From<ExprNode> for ExprTree {
    fn from(root: ExprNode) -> Self {
        Self::new(root)
    }
}
