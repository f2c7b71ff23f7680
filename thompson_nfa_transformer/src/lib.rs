use derive_getters::Getters;
use log::debug;

mod automata;
mod config;
mod description;
mod engine;
mod error;
mod normalizer;
mod postfix;
mod token;

pub use crate::automata::{Automaton, StateAllocator, StateId};
pub use crate::config::ConversionConfig;
pub use crate::description::{Description, TransitionGroup};
pub use crate::engine::{build, Construction};
pub use crate::error::ConversionError;
pub use crate::normalizer::{insert_concatenation, normalize};
pub use crate::postfix::{to_postfix, PostfixItem};
pub use crate::token::{render, tokenize, Lexeme, Operator, Token};
pub use thompson_nfa_util::{Symbol, SymbolUniverse};

/// Every intermediate form of one pattern.
#[derive(Debug, Getters)]
pub struct Translation {
    normalized: Vec<Lexeme>,
    postfix: Vec<PostfixItem>,
    automaton: Automaton,
}

impl Translation {
    pub fn into_automaton(self) -> Automaton {
        self.automaton
    }
}

pub fn translate(
    regex: &str,
    config: &ConversionConfig,
    allocator: &mut StateAllocator,
) -> Result<Translation, ConversionError> {
    let normalized = normalize(regex, config)?;
    debug!("normalized: {}", render(&normalized));

    let postfix = to_postfix(&normalized)?;
    debug!("postfix: {}", render(&postfix));

    let automaton = build(&postfix, allocator)?;
    debug!("automaton has {} states", automaton.state_count());

    Ok(Translation { normalized, postfix, automaton })
}

/// Converts `regex` with the default config and a fresh allocator.
pub fn to_automaton(regex: &str) -> Result<Automaton, ConversionError> {
    to_automaton_with(regex, &ConversionConfig::default(), &mut StateAllocator::new())
}

/// Converts `regex`, drawing state identifiers from `allocator`. Automata
/// built against one allocator never share an identifier.
pub fn to_automaton_with(
    regex: &str,
    config: &ConversionConfig,
    allocator: &mut StateAllocator,
) -> Result<Automaton, ConversionError> {
    translate(regex, config, allocator).map(Translation::into_automaton)
}
