//! Expression pipeline service
//!
//! Runs tokenize → postfix → tree → traversals with the policies from
//! [`Settings`].

use tracing::{debug, instrument};

use crate::config::Settings;
use crate::domain::{
    build_tree, compute_traversals, to_postfix, tokenize, DomainError, DomainResult, ExprTree,
    Token, Traversals,
};

/// Every stage of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Tokens in input order
    pub tokens: Vec<Token>,
    /// Tokens in postfix order
    pub postfix: Vec<Token>,
    pub tree: ExprTree,
    pub traversals: Traversals,
}

/// Service for parsing expressions and deriving their trees.
///
/// Holds only configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct ExpressionService {
    settings: Settings,
}

impl ExpressionService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Tokenize and convert to postfix order.
    ///
    /// Input made only of parentheses leaves nothing to build and fails
    /// with [`DomainError::EmptyOrInvalidExpression`].
    pub fn postfix(&self, raw: &str) -> DomainResult<Vec<Token>> {
        self.stages(raw).map(|(_, postfix)| postfix)
    }

    /// Parse a raw expression into a tree.
    #[instrument(level = "debug", skip(self))]
    pub fn parse_and_build(&self, raw: &str) -> DomainResult<ExprTree> {
        let postfix = self.postfix(raw)?;
        let root = build_tree(&postfix)?;
        debug!("parse_and_build: {} nodes", root.node_count());
        Ok(ExprTree::new(root))
    }

    pub fn compute_traversals(&self, tree: &ExprTree) -> Traversals {
        compute_traversals(tree, self.settings.traversal)
    }

    /// Run the whole pipeline, keeping every intermediate result.
    #[instrument(level = "debug", skip(self))]
    pub fn analyze(&self, raw: &str) -> DomainResult<Analysis> {
        let (tokens, postfix) = self.stages(raw)?;
        let tree = ExprTree::new(build_tree(&postfix)?);
        let traversals = self.compute_traversals(&tree);
        Ok(Analysis {
            tokens,
            postfix,
            tree,
            traversals,
        })
    }

    fn stages(&self, raw: &str) -> DomainResult<(Vec<Token>, Vec<Token>)> {
        let tokens = tokenize(raw, self.settings.negative_check)?;
        let postfix = to_postfix(&tokens)?;
        if postfix.is_empty() {
            debug!("stages: no operands or operators in {:?}", raw);
            return Err(DomainError::EmptyOrInvalidExpression);
        }
        Ok((tokens, postfix))
    }
}
