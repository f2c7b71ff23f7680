use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

pub const ALTERNATE_MARKER: char = '|';
pub const STAR_MARKER: char = '*';
pub const OPEN_MARKER: char = '(';
pub const CLOSE_MARKER: char = ')';
/// Written between operands when concatenation is made explicit.
pub const CONCAT_MARKER: char = '+';
/// How epsilon is rendered. Never accepted as a literal.
pub const EPSILON_MARKER: char = '~';

#[inline(always)]
pub const fn is_operator_char(c: char) -> bool {
    matches!(c, ALTERNATE_MARKER | STAR_MARKER | OPEN_MARKER | CLOSE_MARKER)
}

#[inline(always)]
pub const fn is_reserved(c: char) -> bool {
    is_operator_char(c) || c == CONCAT_MARKER || c == EPSILON_MARKER
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Epsilon,
    Literal(char),
}

impl Symbol {
    pub const fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "{EPSILON_MARKER}"),
            Symbol::Literal(c) => write!(f, "{c}"),
        }
    }
}

/// The characters a pattern may use as literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolUniverse {
    /// Printable ASCII, minus the reserved characters.
    Ascii,
    Restricted(BTreeSet<char>),
}

impl SymbolUniverse {
    pub fn restricted(chars: impl IntoIterator<Item = char>) -> Self {
        SymbolUniverse::Restricted(
            chars
                .into_iter()
                .filter(|c| Self::Ascii.contains(*c))
                .collect(),
        )
    }

    pub fn contains(&self, c: char) -> bool {
        match self {
            SymbolUniverse::Ascii => c.is_ascii_graphic() && !is_reserved(c),
            SymbolUniverse::Restricted(chars) => chars.contains(&c),
        }
    }
}

impl Default for SymbolUniverse {
    fn default() -> Self {
        SymbolUniverse::Ascii
    }
}
