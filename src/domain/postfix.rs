//! Infix to postfix conversion (shunting-yard).

use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::token::{Operator, Token};

/// Entry on the operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Paren,
    Op(Operator),
}

/// Convert an infix token sequence into postfix order.
///
/// Equal precedence pops before pushing, so operators associate left to
/// right. A `)` without a matching `(`, or a `(` left over at the end,
/// fails with [`DomainError::UnbalancedParentheses`] regardless of any
/// earlier validation.
#[instrument(level = "debug", skip(tokens), fields(len = tokens.len()))]
pub fn to_postfix(tokens: &[Token]) -> DomainResult<Vec<Token>> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Pending> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(_) => output.push(token.clone()),
            Token::LeftParen => stack.push(Pending::Paren),
            Token::RightParen => loop {
                match stack.pop() {
                    Some(Pending::Op(op)) => output.push(Token::Operator(op)),
                    Some(Pending::Paren) => break,
                    None => return Err(DomainError::UnbalancedParentheses),
                }
            },
            Token::Operator(current) => {
                while let Some(&Pending::Op(top)) = stack.last() {
                    if top.precedence() < current.precedence() {
                        break;
                    }
                    output.push(Token::Operator(top));
                    stack.pop();
                }
                stack.push(Pending::Op(*current));
            }
        }
        trace!("to_postfix: after {token}: stack depth {}", stack.len());
    }

    while let Some(pending) = stack.pop() {
        match pending {
            Pending::Op(op) => output.push(Token::Operator(op)),
            Pending::Paren => return Err(DomainError::UnbalancedParentheses),
        }
    }

    Ok(output)
}
