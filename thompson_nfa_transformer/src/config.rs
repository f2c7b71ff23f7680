use derive_getters::Getters;
use thompson_nfa_util::SymbolUniverse;

#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct ConversionConfig {
    universe: SymbolUniverse,
}

impl ConversionConfig {
    pub fn new(universe: SymbolUniverse) -> Self {
        Self { universe }
    }

    /// Only the given characters are accepted as literals. Reserved
    /// characters in `alphabet` are ignored.
    pub fn with_alphabet(alphabet: impl IntoIterator<Item = char>) -> Self {
        Self::new(SymbolUniverse::restricted(alphabet))
    }
}
