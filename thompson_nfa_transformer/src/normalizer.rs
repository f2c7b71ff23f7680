use crate::config::ConversionConfig;
use crate::error::ConversionError;
use crate::token::{tokenize, Lexeme, Token};

fn needs_concat(left: &Token, right: &Token) -> bool {
    match (left, right) {
        (Token::Literal(_), Token::Literal(_)) => true,
        (Token::Close | Token::Star, Token::Literal(_)) => true,
        (Token::Literal(_) | Token::Star, Token::Open) => true,
        _ => false,
    }
}

/// Makes every implicit concatenation explicit. Existing lexemes keep their
/// order; an inserted `Concat` takes the offset of the lexeme after it.
pub fn insert_concatenation(lexemes: Vec<Lexeme>) -> Vec<Lexeme> {
    let mut normalized = Vec::with_capacity(lexemes.len() * 2);

    let mut iter = lexemes.into_iter().peekable();
    while let Some(lexeme) = iter.next() {
        normalized.push(lexeme);
        if let Some(next) = iter.peek() {
            if needs_concat(lexeme.token(), next.token()) {
                normalized.push(Lexeme::new(Token::Concat, *next.offset()));
            }
        }
    }

    normalized
}

pub fn normalize(pattern: &str, config: &ConversionConfig) -> Result<Vec<Lexeme>, ConversionError> {
    let lexemes = tokenize(pattern, config.universe())?;
    if lexemes.is_empty() {
        return Err(ConversionError::EmptyExpression);
    }
    Ok(insert_concatenation(lexemes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::render;

    fn normalized(pattern: &str) -> String {
        render(&normalize(pattern, &ConversionConfig::default()).unwrap())
    }

    #[test]
    fn literal_followed_by_literal() {
        assert_eq!(normalized("ab"), "a+b");
        assert_eq!(normalized("abc"), "a+b+c");
    }

    #[test]
    fn group_or_star_followed_by_literal() {
        assert_eq!(normalized("(a)b"), "(a)+b");
        assert_eq!(normalized("a*b"), "a*+b");
    }

    #[test]
    fn literal_or_star_followed_by_group() {
        assert_eq!(normalized("a(b)"), "a+(b)");
        assert_eq!(normalized("a*(b)"), "a*+(b)");
    }

    #[test]
    fn no_insertion_around_operators() {
        assert_eq!(normalized("a|b"), "a|b");
        assert_eq!(normalized("(a|b)*"), "(a|b)*");
        assert_eq!(normalized("a**"), "a**");
    }

    #[test]
    fn adjacent_groups_are_left_alone() {
        assert_eq!(normalized("(a)(b)"), "(a)(b)");
    }

    #[test]
    fn unbalanced_input_passes_through() {
        assert_eq!(normalized("(ab"), "(a+b");
        assert_eq!(normalized("a)b"), "a)+b");
    }

    #[test]
    fn length_grows_by_insertions_only() {
        let raw = "ab*(c|d)e";
        let lexemes = normalize(raw, &ConversionConfig::default()).unwrap();
        let inserted = lexemes.iter().filter(|l| *l.token() == Token::Concat).count();
        assert_eq!(lexemes.len(), raw.len() + inserted);
        assert_eq!(render(&lexemes), "a+b*+(c|d)+e");
    }

    #[test]
    fn inserted_concat_takes_following_offset() {
        let lexemes = normalize("ab", &ConversionConfig::default()).unwrap();
        assert_eq!(lexemes[1], Lexeme::new(Token::Concat, 1));
        assert_eq!(*lexemes[2].offset(), 1);
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert_eq!(
            normalize("", &ConversionConfig::default()),
            Err(ConversionError::EmptyExpression)
        );
    }
}
