use crate::automata::StateId;
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use thompson_nfa_util::Symbol;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionGroup {
    pub source: StateId,
    pub symbol: Symbol,
    pub targets: Vec<StateId>,
}

/// What an automaton looks like from the outside, in a stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub states: Vec<StateId>,
    pub start: StateId,
    pub accept: StateId,
    /// Excludes epsilon.
    pub alphabet: Vec<char>,
    pub transitions: Vec<TransitionGroup>,
}

impl Description {
    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

impl Display for TransitionGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {{{}}}", self.source, self.symbol, self.targets.iter().join(" "))
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.state_count())?;
        writeln!(f, "{}", self.states.iter().join(" "))?;
        writeln!(f, "Start state: {}", self.start)?;
        writeln!(f, "Final state: {}", self.accept)?;
        writeln!(f, "Alphabet: {}", self.alphabet.iter().join(" "))?;
        writeln!(f, "Transitions:")?;
        for group in &self.transitions {
            writeln!(f, "{group}")?;
        }

        Ok(())
    }
}
