use crate::error::ConversionError;
use derive_getters::Getters;
use itertools::Itertools;
use nom::branch::alt;
use nom::character::complete::char as cchar;
use nom::character::complete::anychar;
use nom::combinator::{map, value};
use nom::IResult;
use std::fmt::{Display, Formatter};
use thompson_nfa_util::{
    SymbolUniverse, ALTERNATE_MARKER, CLOSE_MARKER, CONCAT_MARKER, OPEN_MARKER,
    STAR_MARKER,
};

type NResult<'a, T> = IResult<&'a str, T>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(char),
    Concat,
    Alternate,
    Star,
    Open,
    Close,
}

impl Token {
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Token::Concat => Some(Operator::Concat),
            Token::Alternate => Some(Operator::Alternate),
            Token::Star => Some(Operator::Star),
            Token::Literal(_) | Token::Open | Token::Close => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Literal(c) => write!(f, "{c}"),
            Token::Concat => write!(f, "{CONCAT_MARKER}"),
            Token::Alternate => write!(f, "{ALTERNATE_MARKER}"),
            Token::Star => write!(f, "{STAR_MARKER}"),
            Token::Open => write!(f, "{OPEN_MARKER}"),
            Token::Close => write!(f, "{CLOSE_MARKER}"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    Alternate,
    Concat,
    Star,
}

impl Operator {
    /// Alternation binds loosest, star tightest. All are left-associative.
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Alternate => 1,
            Operator::Concat => 2,
            Operator::Star => 3,
        }
    }

    pub const fn arity(self) -> usize {
        match self {
            Operator::Alternate | Operator::Concat => 2,
            Operator::Star => 1,
        }
    }

    pub const fn token(self) -> Token {
        match self {
            Operator::Alternate => Token::Alternate,
            Operator::Concat => Token::Concat,
            Operator::Star => Token::Star,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// A token and the byte offset in the raw pattern it came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Getters)]
pub struct Lexeme {
    token: Token,
    offset: usize,
}

impl Lexeme {
    pub fn new(token: Token, offset: usize) -> Self {
        Self { token, offset }
    }
}

impl Display for Lexeme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token)
    }
}

fn next_token(pattern: &str) -> NResult<'_, Token> {
    alt((
        value(Token::Alternate, cchar(ALTERNATE_MARKER)),
        value(Token::Star, cchar(STAR_MARKER)),
        value(Token::Open, cchar(OPEN_MARKER)),
        value(Token::Close, cchar(CLOSE_MARKER)),
        map(anychar, Token::Literal),
    ))(pattern)
}

/// Splits a raw pattern into lexemes, rejecting literals outside `universe`.
pub fn tokenize(
    pattern: &str,
    universe: &SymbolUniverse,
) -> Result<Vec<Lexeme>, ConversionError> {
    let mut lexemes = Vec::with_capacity(pattern.len());

    let mut rm = pattern;
    while let Ok((r, token)) = next_token(rm) {
        let offset = pattern.len() - rm.len();
        rm = r;

        if let Token::Literal(c) = token {
            if !universe.contains(c) {
                return Err(ConversionError::UnsupportedSymbol { symbol: c, offset });
            }
        }

        lexemes.push(Lexeme::new(token, offset));
    }

    Ok(lexemes)
}

/// Renders a token stream back to text, e.g. `a+b` or `ab+`.
pub fn render<T: Display>(items: &[T]) -> String {
    items.iter().join("")
}
