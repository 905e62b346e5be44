//! Deterministic finite automaton with a partial transition function.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::ExplorerError;

/// Dense index of a state inside an [`Automaton`].
pub type StateId = usize;

/// A single alphabet element.
///
/// Symbols are ordered; that order fixes the enumeration order of the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(char);

impl Symbol {
    pub fn new(c: char) -> Self {
        Self(c)
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A DFA: `(states, alphabet, start, finals, delta)`.
///
/// `delta` is partial. A missing `(state, symbol)` pair rejects. Instances are
/// only created through [`AutomatonBuilder::build`], so every state index and
/// symbol referenced by `start`, `finals` and `delta` is known to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    labels: Vec<String>,
    alphabet: BTreeSet<Symbol>,
    start: StateId,
    finals: BTreeSet<StateId>,
    delta: HashMap<(StateId, Symbol), StateId>,
}

impl Automaton {
    /// Run the automaton over `word` from the start state.
    ///
    /// Returns false as soon as a transition is undefined. The empty word is
    /// accepted iff the start state is final.
    pub fn accepts(&self, word: &[Symbol]) -> bool {
        let mut current = self.start;
        for &symbol in word {
            match self.transition(current, symbol) {
                Some(next) => current = next,
                None => return false,
            }
        }
        self.is_final(current)
    }

    /// [`accepts`](Self::accepts) over the characters of a string.
    pub fn accepts_str(&self, word: &str) -> bool {
        let symbols: Vec<Symbol> = word.chars().map(Symbol::from).collect();
        self.accepts(&symbols)
    }

    /// Get the successor of `state` on `symbol`, if defined.
    pub fn transition(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.delta.get(&(state, symbol)).copied()
    }

    /// Every transition defined for `state`, in alphabet order.
    pub fn transitions_from(&self, state: StateId) -> BTreeMap<Symbol, StateId> {
        self.alphabet
            .iter()
            .filter_map(|&symbol| self.transition(state, symbol).map(|next| (symbol, next)))
            .collect()
    }

    /// All transitions as `(source, symbol, destination)`, ordered by source
    /// state then by symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.states().flat_map(move |state| {
            self.transitions_from(state)
                .into_iter()
                .map(move |(symbol, next)| (state, symbol, next))
        })
    }

    pub fn num_transitions(&self) -> usize {
        self.delta.len()
    }

    /// States in enumeration order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        0..self.labels.len()
    }

    pub fn num_states(&self) -> usize {
        self.labels.len()
    }

    pub fn label(&self, state: StateId) -> Option<&str> {
        self.labels.get(state).map(String::as_str)
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn finals(&self) -> &BTreeSet<StateId> {
        &self.finals
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    /// Insert `(source, symbol) -> destination` unless the pair is already
    /// defined. Returns whether the transition was added.
    pub(crate) fn insert_transition_if_absent(
        &mut self,
        source: StateId,
        symbol: Symbol,
        destination: StateId,
    ) -> Result<bool, ExplorerError> {
        if source >= self.labels.len() || destination >= self.labels.len() {
            return Err(ExplorerError::MalformedAutomaton(format!(
                "transition {source} --{symbol}--> {destination} references a state outside 0..{}",
                self.labels.len()
            )));
        }
        if !self.alphabet.contains(&symbol) {
            return Err(ExplorerError::MalformedAutomaton(format!(
                "symbol '{symbol}' is not part of the alphabet"
            )));
        }
        if self.delta.contains_key(&(source, symbol)) {
            return Ok(false);
        }
        self.delta.insert((source, symbol), destination);
        Ok(true)
    }

    /// Snapshot of the automaton with labels in place of indices, for display
    /// and JSON output.
    pub fn summary(&self) -> AutomatonSummary {
        let name = |state: StateId| self.labels[state].clone();
        AutomatonSummary {
            states: self.labels.clone(),
            alphabet: self.alphabet.iter().map(Symbol::to_string).collect(),
            start: name(self.start),
            finals: self.finals.iter().map(|&s| name(s)).collect(),
            transitions: self
                .transitions()
                .map(|(from, symbol, to)| TransitionSummary {
                    from: name(from),
                    symbol: symbol.to_string(),
                    to: name(to),
                })
                .collect(),
        }
    }
}

/// Label-based view of an [`Automaton`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutomatonSummary {
    pub states: Vec<String>,
    pub alphabet: Vec<String>,
    pub start: String,
    pub finals: Vec<String>,
    pub transitions: Vec<TransitionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionSummary {
    pub from: String,
    pub symbol: String,
    pub to: String,
}

/// Incremental constructor for [`Automaton`]. All invariants are checked in
/// [`build`](Self::build) and [`add_transition`](Self::add_transition).
#[derive(Debug, Default)]
pub struct AutomatonBuilder {
    labels: Vec<String>,
    alphabet: BTreeSet<Symbol>,
    start: Option<StateId>,
    finals: BTreeSet<StateId>,
    delta: HashMap<(StateId, Symbol), StateId>,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self, label: impl Into<String>) -> StateId {
        let id = self.labels.len();
        self.labels.push(label.into());
        id
    }

    pub fn set_start(&mut self, state: StateId) -> &mut Self {
        self.start = Some(state);
        self
    }

    pub fn add_final(&mut self, state: StateId) -> &mut Self {
        self.finals.insert(state);
        self
    }

    /// Add a symbol to the alphabet even if no transition uses it.
    pub fn add_symbol(&mut self, symbol: Symbol) -> &mut Self {
        self.alphabet.insert(symbol);
        self
    }

    /// Add a transition. Redefining a pair with the same target is allowed;
    /// a different target would break determinism and is rejected.
    pub fn add_transition(
        &mut self,
        source: StateId,
        symbol: Symbol,
        destination: StateId,
    ) -> Result<&mut Self, ExplorerError> {
        if let Some(&existing) = self.delta.get(&(source, symbol)) {
            if existing != destination {
                return Err(ExplorerError::MalformedAutomaton(format!(
                    "state {source} already moves to {existing} on '{symbol}', cannot also move to {destination}"
                )));
            }
        }
        self.alphabet.insert(symbol);
        self.delta.insert((source, symbol), destination);
        Ok(self)
    }

    pub fn build(self) -> Result<Automaton, ExplorerError> {
        let num_states = self.labels.len();
        let start = self.start.ok_or_else(|| {
            ExplorerError::MalformedAutomaton("automaton has no start state".into())
        })?;
        if start >= num_states {
            return Err(ExplorerError::MalformedAutomaton(format!(
                "start state {start} is not one of the {num_states} states"
            )));
        }
        if let Some(&bad) = self.finals.iter().find(|&&s| s >= num_states) {
            return Err(ExplorerError::MalformedAutomaton(format!(
                "final state {bad} is not one of the {num_states} states"
            )));
        }
        if let Some((&(source, symbol), &destination)) = self
            .delta
            .iter()
            .find(|&(&(source, _), &destination)| source >= num_states || destination >= num_states)
        {
            return Err(ExplorerError::MalformedAutomaton(format!(
                "transition {source} --{symbol}--> {destination} references a state outside 0..{num_states}"
            )));
        }

        Ok(Automaton {
            labels: self.labels,
            alphabet: self.alphabet,
            start,
            finals: self.finals,
            delta: self.delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::fixtures::a_then_b_or_c;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_follows_transitions() {
        let dfa = a_then_b_or_c();
        assert!(dfa.accepts_str("a"));
        assert!(dfa.accepts_str("ab"));
        assert!(dfa.accepts_str("abcb"));
        assert!(!dfa.accepts_str(""));
        assert!(!dfa.accepts_str("b"));
        assert!(!dfa.accepts_str("ac a"));
    }

    #[test]
    fn empty_word_accepted_iff_start_is_final() {
        let mut b = AutomatonBuilder::new();
        let s = b.add_state("s");
        b.set_start(s).add_final(s);
        let dfa = b.build().unwrap();
        assert!(dfa.accepts(&[]));

        let mut b = AutomatonBuilder::new();
        let s = b.add_state("s");
        b.set_start(s);
        let dfa = b.build().unwrap();
        assert!(!dfa.accepts(&[]));
    }

    #[test]
    fn transitions_from_is_partial() {
        let dfa = a_then_b_or_c();
        let from_start = dfa.transitions_from(0);
        assert_eq!(from_start.len(), 1);
        assert_eq!(from_start.get(&Symbol::new('a')), Some(&1));
        assert_eq!(
            dfa.transitions_from(1).keys().copied().collect::<Vec<_>>(),
            vec![Symbol::new('b'), Symbol::new('c')]
        );
    }

    #[test]
    fn transitions_are_ordered_by_state_then_symbol() {
        let dfa = a_then_b_or_c();
        let all: Vec<_> = dfa.transitions().collect();
        assert_eq!(
            all,
            vec![
                (0, Symbol::new('a'), 1),
                (1, Symbol::new('b'), 1),
                (1, Symbol::new('c'), 1),
            ]
        );
        assert_eq!(dfa.num_transitions(), 3);
    }

    #[test]
    fn builder_rejects_missing_start() {
        let mut b = AutomatonBuilder::new();
        b.add_state("s");
        let err = b.build().unwrap_err();
        assert!(matches!(err, ExplorerError::MalformedAutomaton(_)));
    }

    #[test]
    fn builder_rejects_out_of_range_states() {
        let mut b = AutomatonBuilder::new();
        let s = b.add_state("s");
        b.set_start(s).add_final(7);
        assert!(matches!(b.build(), Err(ExplorerError::MalformedAutomaton(_))));

        let mut b = AutomatonBuilder::new();
        let s = b.add_state("s");
        b.set_start(s);
        b.add_transition(s, 'x'.into(), 3).unwrap();
        assert!(matches!(b.build(), Err(ExplorerError::MalformedAutomaton(_))));
    }

    #[test]
    fn builder_rejects_nondeterminism() {
        let mut b = AutomatonBuilder::new();
        let s = b.add_state("s");
        let t = b.add_state("t");
        b.add_transition(s, 'x'.into(), t).unwrap();
        b.add_transition(s, 'x'.into(), t).unwrap();
        let err = b.add_transition(s, 'x'.into(), s).unwrap_err();
        assert!(matches!(err, ExplorerError::MalformedAutomaton(_)));
    }

    #[test]
    fn insert_if_absent_keeps_existing_target() {
        let mut dfa = a_then_b_or_c();
        assert!(!dfa.insert_transition_if_absent(1, 'b'.into(), 0).unwrap());
        assert_eq!(dfa.transition(1, 'b'.into()), Some(1));
        assert!(dfa.insert_transition_if_absent(1, 'a'.into(), 1).unwrap());
        assert!(dfa.insert_transition_if_absent(1, 'z'.into(), 1).is_err());
        assert!(dfa.insert_transition_if_absent(5, 'a'.into(), 1).is_err());
    }

    #[test]
    fn summary_uses_labels() {
        let summary = a_then_b_or_c().summary();
        assert_eq!(summary.start, "p");
        assert_eq!(summary.finals, vec!["q".to_string()]);
        assert_eq!(summary.alphabet, vec!["a", "b", "c"]);
        assert_eq!(summary.transitions[0].from, "p");
        assert_eq!(summary.transitions[0].to, "q");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["transitions"][2]["symbol"], "c");
    }
}
