use crate::error::ConversionError;
use crate::token::{Lexeme, Operator, Token};
use derive_getters::Getters;
use either::{Either, Left, Right};
use std::fmt::{Display, Formatter};
use std::iter::once;

/// One entry of the postfix sequence: a literal or an operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Getters)]
pub struct PostfixItem {
    item: Either<char, Operator>,
    offset: usize,
}

impl PostfixItem {
    pub fn literal(c: char, offset: usize) -> Self {
        Self { item: Left(c), offset }
    }

    pub fn operator(operator: Operator, offset: usize) -> Self {
        Self { item: Right(operator), offset }
    }
}

impl Display for PostfixItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.item {
            Left(c) => write!(f, "{c}"),
            Right(operator) => write!(f, "{operator}"),
        }
    }
}

/// Left is an open paren (`None` for the sentinel), right a pending operator.
type Pending = Either<Option<usize>, (Operator, usize)>;

fn push_operator(
    operator: Operator,
    offset: usize,
    stack: &mut Vec<Pending>,
    result: &mut Vec<PostfixItem>,
) {
    while let Some(Right((top, top_offset))) = stack.last().copied() {
        if top.precedence() < operator.precedence() {
            break;
        }
        stack.pop();
        result.push(PostfixItem::operator(top, top_offset));
    }
    stack.push(Right((operator, offset)));
}

fn close_group(
    offset: usize,
    terminator: bool,
    stack: &mut Vec<Pending>,
    result: &mut Vec<PostfixItem>,
) -> Result<(), ConversionError> {
    loop {
        match stack.pop() {
            Some(Right((operator, o))) => result.push(PostfixItem::operator(operator, o)),
            Some(Left(open)) => {
                return match (open, terminator) {
                    (Some(_), false) | (None, true) => Ok(()),
                    // a user `)` reached the sentinel
                    (None, false) => Err(ConversionError::UnbalancedParentheses { offset }),
                    // the terminator reached a user `(`
                    (Some(open_offset), true) => {
                        Err(ConversionError::UnbalancedParentheses { offset: open_offset })
                    }
                };
            }
            None => return Err(ConversionError::UnbalancedParentheses { offset }),
        }
    }
}

/// An operand was due at `at`. A binary operator waiting for its right
/// operand is reported before the lexeme that arrived too early.
fn missing_operand(previous: Option<Lexeme>, at: Lexeme) -> ConversionError {
    match previous {
        Some(p) if matches!(p.token(), Token::Concat | Token::Alternate) => {
            ConversionError::StackUnderflow { operator: *p.token(), offset: *p.offset() }
        }
        _ => ConversionError::StackUnderflow { operator: *at.token(), offset: *at.offset() },
    }
}

/// Rewrites a normalized infix stream into postfix order.
///
/// The stream is wrapped in a sentinel `(` and a synthetic `)` placed after
/// the last lexeme. Parentheses never reach the output. Every operator must
/// find its operands inside its own group, so `(a)(*)` is rejected rather
/// than starring `a`.
pub fn to_postfix(normalized: &[Lexeme]) -> Result<Vec<PostfixItem>, ConversionError> {
    let end = normalized.last().map_or(0, |l| *l.offset() + 1);

    let mut stack: Vec<Pending> = vec![Left(None)];
    let mut result = Vec::with_capacity(normalized.len());
    let mut expect_operand = true;
    let mut previous: Option<Lexeme> = None;

    let stream = normalized
        .iter()
        .map(|l| (*l, false))
        .chain(once((Lexeme::new(Token::Close, end), true)));

    for (lexeme, terminator) in stream {
        let offset = *lexeme.offset();
        match *lexeme.token() {
            Token::Literal(c) => {
                result.push(PostfixItem::literal(c, offset));
                expect_operand = false;
            }
            Token::Open => {
                stack.push(Left(Some(offset)));
                expect_operand = true;
            }
            Token::Close => {
                // a `)` opening the input is a balance problem, left to close_group
                if expect_operand && previous.is_some() {
                    return Err(missing_operand(previous, lexeme));
                }
                close_group(offset, terminator, &mut stack, &mut result)?;
            }
            token => {
                if expect_operand {
                    return Err(missing_operand(None, lexeme));
                }
                if let Some(operator) = token.operator() {
                    push_operator(operator, offset, &mut stack, &mut result);
                    expect_operand = operator.arity() == 2;
                }
            }
        }
        previous = Some(lexeme);
    }

    debug_assert!(stack.is_empty());
    Ok(result)
}
