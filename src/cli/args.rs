//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::{NegativeCheck, TraversalStrategy};

/// Parse arithmetic expressions into postfix order, expression trees and traversals
#[derive(Parser, Debug)]
#[command(name = "exprtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file, layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Negative-number scan: literal|unary (overrides config)
    #[arg(long, global = true)]
    pub negative_check: Option<NegativeCheck>,

    /// Traversal implementation: recursive|iterative (overrides config)
    #[arg(long, global = true)]
    pub traversal: Option<TraversalStrategy>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw the expression tree
    Tree {
        /// Expression, or `-` to read one per line from stdin
        #[arg(allow_hyphen_values = true)]
        expr: String,
    },

    /// Print the postfix (RPN) token sequence
    Postfix {
        /// Expression, or `-` to read one per line from stdin
        #[arg(allow_hyphen_values = true)]
        expr: String,
    },

    /// Print preorder, inorder and postorder sequences
    Traverse {
        /// Expression, or `-` to read one per line from stdin
        #[arg(allow_hyphen_values = true)]
        expr: String,
    },

    /// Show every pipeline stage
    Show {
        /// Expression, or `-` to read one per line from stdin
        #[arg(allow_hyphen_values = true)]
        expr: String,
    },

    /// Print effective settings as TOML
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
