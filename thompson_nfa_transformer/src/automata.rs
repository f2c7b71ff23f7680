use crate::description::{Description, TransitionGroup};
use derive_getters::Getters;
use indexmap::IndexSet;
use log::trace;
use std::collections::{BTreeSet, HashMap};
use std::iter::once;
use thompson_nfa_util::Symbol;

pub type StateId = usize;

/// Hands out state identifiers for one construction run.
///
/// Every fragment built against the same allocator gets distinct states, so
/// fragments can be merged without renumbering.
#[derive(Debug, Default, Clone)]
pub struct StateAllocator {
    next: StateId,
}

impl StateAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> StateId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The identifier the next `allocate` will return.
    pub fn peek(&self) -> StateId {
        self.next
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

/// An epsilon-NFA fragment with one start and one accept state.
///
/// The accept state never has outgoing transitions until the fragment is
/// combined into a larger one.
#[derive(Debug, Getters)]
pub struct Automaton {
    states: BTreeSet<StateId>,
    /// Literal symbols in insertion order. Epsilon is implied.
    alphabet: IndexSet<char>,
    start: StateId,
    accept: StateId,
    transitions: HashMap<(StateId, Symbol), Vec<StateId>>,
    transition_count: usize,
}

impl Automaton {
    fn with_states(start: StateId, accept: StateId) -> Self {
        Self {
            states: BTreeSet::from([start, accept]),
            alphabet: IndexSet::new(),
            start,
            accept,
            transitions: HashMap::new(),
            transition_count: 0,
        }
    }

    fn add_transition(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        self.transitions.entry((from, symbol)).or_default().push(to);
        self.transition_count += 1;
    }

    fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.add_transition(from, Symbol::Epsilon, to);
    }

    /// Takes over all of `other`'s states, symbols and edges.
    fn absorb(&mut self, other: Automaton) {
        self.states.extend(other.states);
        self.alphabet.extend(other.alphabet);
        for (key, targets) in other.transitions {
            self.transitions.entry(key).or_default().extend(targets);
        }
        self.transition_count += other.transition_count;
    }

    /// `start --symbol--> accept`
    pub fn atomic(symbol: char, allocator: &mut StateAllocator) -> Self {
        let start = allocator.allocate();
        let accept = allocator.allocate();

        let mut fragment = Self::with_states(start, accept);
        fragment.alphabet.insert(symbol);
        fragment.add_transition(start, Symbol::Literal(symbol), accept);

        trace!("atomic {symbol:?}: {start} -> {accept}");
        fragment
    }

    /// Sequencing: runs `self`, then `next`.
    pub fn connect(self, next: Automaton) -> Self {
        let (a_accept, b_start, b_accept) = (self.accept, next.start, next.accept);

        let mut fragment = self;
        fragment.absorb(next);
        fragment.accept = b_accept;
        fragment.add_epsilon(a_accept, b_start);

        trace!("connect: {a_accept} -> {b_start}");
        fragment
    }

    /// Alternation: either `self` or `other`.
    pub fn union(self, other: Automaton, allocator: &mut StateAllocator) -> Self {
        let start = allocator.allocate();
        let accept = allocator.allocate();

        let mut fragment = Self::with_states(start, accept);
        fragment.add_epsilon(start, self.start);
        fragment.add_epsilon(start, other.start);
        fragment.add_epsilon(self.accept, accept);
        fragment.add_epsilon(other.accept, accept);
        fragment.absorb(self);
        fragment.absorb(other);

        trace!("union: new start {start}, new accept {accept}");
        fragment
    }

    /// Zero or more repetitions of `self`.
    pub fn star(self, allocator: &mut StateAllocator) -> Self {
        let start = allocator.allocate();
        let accept = allocator.allocate();

        let mut fragment = Self::with_states(start, accept);
        fragment.add_epsilon(start, self.start);
        fragment.add_epsilon(start, accept);
        fragment.add_epsilon(self.accept, self.start);
        fragment.add_epsilon(self.accept, accept);
        fragment.absorb(self);

        trace!("star: new start {start}, new accept {accept}");
        fragment
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Targets of `(state, symbol)` in insertion order.
    pub fn targets(&self, state: StateId, symbol: Symbol) -> &[StateId] {
        self.transitions
            .get(&(state, symbol))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn epsilon_edge_count(&self) -> usize {
        self.transitions
            .iter()
            .filter(|((_, symbol), _)| symbol.is_epsilon())
            .map(|(_, targets)| targets.len())
            .sum()
    }

    pub fn symbol_edge_count(&self) -> usize {
        self.transition_count - self.epsilon_edge_count()
    }

    /// Epsilon first, then literals in the order they joined the alphabet.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        once(Symbol::Epsilon).chain(self.alphabet.iter().copied().map(Symbol::Literal))
    }

    pub fn describe(&self) -> Description {
        let mut transitions = Vec::new();
        for &source in &self.states {
            for symbol in self.symbols() {
                let targets = self.targets(source, symbol);
                if !targets.is_empty() {
                    transitions.push(TransitionGroup {
                        source,
                        symbol,
                        targets: targets.to_vec(),
                    });
                }
            }
        }

        Description {
            states: self.states.iter().copied().collect(),
            start: self.start,
            accept: self.accept,
            alphabet: self.alphabet.iter().copied().collect(),
            transitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outgoing(fragment: &Automaton, state: StateId) -> usize {
        fragment.symbols().map(|s| fragment.targets(state, s).len()).sum()
    }

    #[test]
    fn allocator_is_monotonic() {
        let mut allocator = StateAllocator::new();
        assert_eq!(allocator.allocate(), 0);
        assert_eq!(allocator.allocate(), 1);
        assert_eq!(allocator.peek(), 2);
        allocator.reset();
        assert_eq!(allocator.allocate(), 0);
    }

    #[test]
    fn atomic_fragment() {
        let mut allocator = StateAllocator::new();
        let a = Automaton::atomic('a', &mut allocator);

        assert_eq!(a.state_count(), 2);
        assert_eq!(*a.transition_count(), 1);
        assert_ne!(a.start(), a.accept());
        assert_eq!(a.targets(*a.start(), Symbol::Literal('a')), &[*a.accept()]);
        assert_eq!(a.epsilon_edge_count(), 0);
        assert_eq!(a.alphabet().iter().copied().collect::<Vec<_>>(), vec!['a']);
    }

    #[test]
    fn connect_links_accept_to_start() {
        let mut allocator = StateAllocator::new();
        let a = Automaton::atomic('a', &mut allocator);
        let b = Automaton::atomic('b', &mut allocator);
        let (a_start, a_accept) = (*a.start(), *a.accept());
        let (b_start, b_accept) = (*b.start(), *b.accept());

        let c = a.connect(b);

        assert_eq!(c.state_count(), 4);
        assert_eq!(*c.start(), a_start);
        assert_eq!(*c.accept(), b_accept);
        assert_eq!(c.epsilon_edge_count(), 1);
        assert_eq!(c.targets(a_accept, Symbol::Epsilon), &[b_start]);
        assert_eq!(allocator.peek(), 4);
    }

    #[test]
    fn union_adds_fresh_start_and_accept() {
        let mut allocator = StateAllocator::new();
        let a = Automaton::atomic('a', &mut allocator);
        let b = Automaton::atomic('b', &mut allocator);
        let (a_start, a_accept) = (*a.start(), *a.accept());
        let (b_start, b_accept) = (*b.start(), *b.accept());
        let operand_states: BTreeSet<_> = a.states().union(b.states()).copied().collect();

        let u = a.union(b, &mut allocator);

        assert_eq!(u.state_count(), 6);
        assert_eq!(u.epsilon_edge_count(), 4);
        assert_eq!(u.symbol_edge_count(), 2);
        assert!(!operand_states.contains(u.start()));
        assert!(!operand_states.contains(u.accept()));
        assert_eq!(u.targets(*u.start(), Symbol::Epsilon), &[a_start, b_start]);
        assert_eq!(u.targets(a_accept, Symbol::Epsilon), &[*u.accept()]);
        assert_eq!(u.targets(b_accept, Symbol::Epsilon), &[*u.accept()]);
        assert_eq!(outgoing(&u, *u.accept()), 0);
    }

    #[test]
    fn star_loops_back_and_skips() {
        let mut allocator = StateAllocator::new();
        let a = Automaton::atomic('a', &mut allocator);
        let (a_start, a_accept) = (*a.start(), *a.accept());

        let s = a.star(&mut allocator);

        assert_eq!(s.state_count(), 4);
        assert_eq!(s.epsilon_edge_count(), 4);
        assert_eq!(s.targets(*s.start(), Symbol::Epsilon), &[a_start, *s.accept()]);
        assert_eq!(s.targets(a_accept, Symbol::Epsilon), &[a_start, *s.accept()]);
        assert_eq!(outgoing(&s, *s.accept()), 0);
    }

    #[test]
    fn alphabet_keeps_insertion_order() {
        let mut allocator = StateAllocator::new();
        let b = Automaton::atomic('b', &mut allocator);
        let a = Automaton::atomic('a', &mut allocator);
        let b2 = Automaton::atomic('b', &mut allocator);

        let c = b.connect(a).union(b2, &mut allocator);

        assert_eq!(c.alphabet().iter().copied().collect::<Vec<_>>(), vec!['b', 'a']);
    }

    #[test]
    fn description_orders_states_and_symbols() {
        let mut allocator = StateAllocator::new();
        let a = Automaton::atomic('a', &mut allocator);
        let b = Automaton::atomic('b', &mut allocator);
        let d = a.union(b, &mut allocator).describe();

        assert_eq!(d.states, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(d.start, 4);
        assert_eq!(d.accept, 5);
        assert_eq!(d.alphabet, vec!['a', 'b']);
        let sources: Vec<_> = d.transitions.iter().map(|g| (g.source, g.symbol)).collect();
        assert_eq!(
            sources,
            vec![
                (0, Symbol::Literal('a')),
                (1, Symbol::Epsilon),
                (2, Symbol::Literal('b')),
                (3, Symbol::Epsilon),
                (4, Symbol::Epsilon),
            ]
        );
        assert_eq!(d.transitions[4].targets, vec![0, 2]);
    }
}
