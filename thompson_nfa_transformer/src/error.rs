use crate::token::Token;
use std::fmt::{Display, Formatter};

/// Why a pattern could not be turned into an automaton.
///
/// Offsets are byte offsets into the raw pattern. Inserted concatenations
/// report the offset of the token they precede, and the synthetic
/// terminator reports the pattern length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    EmptyExpression,
    UnbalancedParentheses { offset: usize },
    StackUnderflow { operator: Token, offset: usize },
    /// `offset` is where the second leftover operand begins.
    DanglingOperands { count: usize, offset: usize },
    UnsupportedSymbol { symbol: char, offset: usize },
}

impl Display for ConversionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::EmptyExpression => write!(f, "empty expression"),
            ConversionError::UnbalancedParentheses { offset } => {
                write!(f, "unbalanced parentheses at offset {offset}")
            }
            ConversionError::StackUnderflow { operator, offset } => {
                write!(f, "operator '{operator}' at offset {offset} is missing an operand")
            }
            ConversionError::DanglingOperands { count, offset } => {
                write!(
                    f,
                    "{count} operands left without an operator, the second at offset {offset}"
                )
            }
            ConversionError::UnsupportedSymbol { symbol, offset } => {
                write!(f, "unsupported symbol {symbol:?} at offset {offset}")
            }
        }
    }
}

impl std::error::Error for ConversionError {}
