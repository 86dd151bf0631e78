//! Tree builder: constructs expression trees from postfix and preorder sequences.

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{ExprNode, ExprTree};
use crate::domain::token::{Operator, Token};

/// Stack machine that folds a postfix token stream into a tree.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<ExprNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Feed one postfix token.
    pub fn push(&mut self, token: &Token) -> DomainResult<()> {
        match token {
            Token::Number(digits) => self.stack.push(ExprNode::leaf(digits.as_str())),
            Token::Operator(op) => {
                // right operand sits on top
                let right = self.stack.pop().ok_or(DomainError::MalformedExpression)?;
                let left = self.stack.pop().ok_or(DomainError::MalformedExpression)?;
                self.stack.push(ExprNode::binary(*op, left, right));
            }
            Token::LeftParen | Token::RightParen => {
                return Err(DomainError::MalformedExpression);
            }
        }
        Ok(())
    }

    /// Number of subtrees not yet combined.
    pub fn pending(&self) -> usize {
        self.stack.len()
    }

    /// Consume the builder; exactly one node must remain.
    pub fn finish(mut self) -> DomainResult<ExprNode> {
        if self.stack.len() != 1 {
            debug!("finish: {} nodes left on stack", self.stack.len());
            return Err(DomainError::MalformedExpression);
        }
        self.stack.pop().ok_or(DomainError::MalformedExpression)
    }
}

/// Build a tree from a postfix token sequence.
#[instrument(level = "debug", skip(postfix), fields(len = postfix.len()))]
pub fn build_tree(postfix: &[Token]) -> DomainResult<ExprNode> {
    let mut builder = TreeBuilder::new();
    for token in postfix {
        builder.push(token)?;
    }
    builder.finish()
}

/// Rebuild a tree from its preorder value sequence.
///
/// Works on structure alone: an operator symbol takes the next two
/// subtrees, a digit run is a leaf. An empty sequence is the empty tree.
#[instrument(level = "debug", skip(values), fields(len = values.len()))]
pub fn build_from_preorder<S: AsRef<str>>(values: &[S]) -> DomainResult<ExprTree> {
    if values.is_empty() {
        return Ok(ExprTree::empty());
    }

    // Operators still waiting for children, with the left child once known.
    let mut open: Vec<(Operator, Option<ExprNode>)> = Vec::new();
    let mut iter = values.iter().map(|v| v.as_ref());

    while let Some(value) = iter.next() {
        let mut node = match parse_value(value)? {
            Parsed::Op(op) => {
                open.push((op, None));
                continue;
            }
            Parsed::Leaf => ExprNode::leaf(value),
        };

        // Attach the completed subtree, closing operators bottom-up.
        loop {
            match open.pop() {
                None => {
                    return match iter.next() {
                        None => Ok(ExprTree::new(node)),
                        Some(_) => Err(DomainError::MalformedExpression),
                    };
                }
                Some((op, None)) => {
                    open.push((op, Some(node)));
                    break;
                }
                Some((op, Some(left))) => {
                    node = ExprNode::binary(op, left, node);
                }
            }
        }
    }

    // Ran out of values with operators still open.
    Err(DomainError::MalformedExpression)
}

enum Parsed {
    Op(Operator),
    Leaf,
}

fn parse_value(value: &str) -> DomainResult<Parsed> {
    let mut chars = value.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(op) = Operator::from_symbol(c) {
            return Ok(Parsed::Op(op));
        }
    }
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(Parsed::Leaf)
    } else {
        Err(DomainError::EmptyOrInvalidExpression)
    }
}
