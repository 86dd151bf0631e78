//! Tokenizer and input validation.
//!
//! Turns raw text into [`Token`]s. Classification happens once here; later
//! stages match on the enum instead of re-inspecting strings.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Atomic unit of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Digit run, kept verbatim
    Number(String),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl Token {
    pub fn number(digits: impl Into<String>) -> Self {
        Token::Number(digits.into())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Operator(op) => write!(f, "{op}"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}

/// How the negative-number scan decides that a `-` starts a negative operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeCheck {
    /// Any `-` directly followed by a digit. Rejects `5-3` as well.
    Literal,
    /// Only a `-` at the start, after `(`, or after another operator.
    #[default]
    Unary,
}

impl FromStr for NegativeCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "literal" => Ok(NegativeCheck::Literal),
            "unary" => Ok(NegativeCheck::Unary),
            other => Err(format!("unknown negative check '{other}' (expected literal|unary)")),
        }
    }
}

impl fmt::Display for NegativeCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegativeCheck::Literal => write!(f, "literal"),
            NegativeCheck::Unary => write!(f, "unary"),
        }
    }
}

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(r"[0-9]+|[+\-*/()]").expect("valid token regex"))
}

fn negative_regex() -> &'static Regex {
    static NEGATIVE_RE: OnceLock<Regex> = OnceLock::new();
    NEGATIVE_RE.get_or_init(|| Regex::new(r"-[0-9]").expect("valid negative regex"))
}

/// Tokenize and validate a raw expression.
///
/// Order of checks: negative operands, parenthesis balance, then
/// extraction. Characters outside `0-9 + - * / ( )` act as separators.
#[instrument(level = "debug")]
pub fn tokenize(raw: &str, policy: NegativeCheck) -> DomainResult<Vec<Token>> {
    if has_negative_operand(raw, policy) {
        debug!("tokenize: negative operand rejected ({:?})", policy);
        return Err(DomainError::InvalidOperand);
    }
    check_balance(raw)?;

    let tokens: Vec<Token> = token_regex()
        .find_iter(raw)
        .map(|m| classify(m.as_str()))
        .collect();
    trace!("tokenize: {} tokens", tokens.len());

    if tokens.is_empty() {
        return Err(DomainError::EmptyOrInvalidExpression);
    }
    Ok(tokens)
}

fn classify(lexeme: &str) -> Token {
    match lexeme {
        "(" => Token::LeftParen,
        ")" => Token::RightParen,
        _ => lexeme
            .chars()
            .next()
            .and_then(Operator::from_symbol)
            .map(Token::Operator)
            .unwrap_or_else(|| Token::number(lexeme)),
    }
}

/// Textual scan for a `-` that introduces a negative operand.
pub fn has_negative_operand(raw: &str, policy: NegativeCheck) -> bool {
    match policy {
        NegativeCheck::Literal => negative_regex().is_match(raw),
        NegativeCheck::Unary => negative_regex().find_iter(raw).any(|m| {
            // separators are dropped by the tokenizer, so look past them
            let previous = raw[..m.start()].chars().rev().find(|&c| is_token_char(c));
            match previous {
                None => true,
                Some(c) => c == '(' || Operator::from_symbol(c).is_some(),
            }
        }),
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_digit() || c == '(' || c == ')' || Operator::from_symbol(c).is_some()
}

/// Check parenthesis nesting on the raw text.
pub fn check_balance(raw: &str) -> DomainResult<()> {
    let mut depth: usize = 0;
    for c in raw.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(DomainError::UnbalancedParentheses)?;
            }
            _ => {}
        }
    }
    if depth == 0 {
        Ok(())
    } else {
        Err(DomainError::UnbalancedParentheses)
    }
}
