//! Subset construction: ε-NFA to partial DFA.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use super::nfa::EpsilonNfa;
use crate::automaton::Symbol;
use crate::error::CompileError;

/// A DFA whose states are sets of NFA states.
///
/// Only non-empty subsets become states, so the transition function is
/// partial: a missing entry stands for the empty subset.
#[derive(Debug, Clone)]
pub struct SubsetDfa {
    pub subsets: Vec<BTreeSet<usize>>,
    pub finals: Vec<bool>,
    pub moves: Vec<BTreeMap<Symbol, usize>>,
    pub alphabet: BTreeSet<Symbol>,
}

impl SubsetDfa {
    pub fn num_states(&self) -> usize {
        self.subsets.len()
    }
}

/// Determinize `nfa`. State 0 is the start state; states are numbered in
/// breadth-first discovery order over the sorted alphabet.
pub fn subset_construction(
    nfa: &EpsilonNfa,
    max_states: usize,
) -> Result<SubsetDfa, CompileError> {
    let mut dfa = SubsetDfa {
        subsets: Vec::new(),
        finals: Vec::new(),
        moves: Vec::new(),
        alphabet: nfa.alphabet().clone(),
    };
    let mut ids: HashMap<BTreeSet<usize>, usize> = HashMap::new();
    let mut worklist: VecDeque<usize> = VecDeque::new();

    let initial = nfa.epsilon_closure(&BTreeSet::from([nfa.start()]));
    let mut intern = |dfa: &mut SubsetDfa,
                      subset: BTreeSet<usize>|
     -> Result<(usize, bool), CompileError> {
        if let Some(&id) = ids.get(&subset) {
            return Ok((id, false));
        }
        if dfa.subsets.len() >= max_states {
            return Err(CompileError::TooComplex(format!(
                "DFA exceeds {max_states} states"
            )));
        }
        let id = dfa.subsets.len();
        dfa.finals.push(subset.contains(&nfa.accept()));
        dfa.moves.push(BTreeMap::new());
        dfa.subsets.push(subset.clone());
        ids.insert(subset, id);
        Ok((id, true))
    };

    let (start, _) = intern(&mut dfa, initial)?;
    worklist.push_back(start);

    while let Some(current) = worklist.pop_front() {
        for &symbol in nfa.alphabet() {
            let next = nfa.move_on_symbol(&dfa.subsets[current], symbol);
            if next.is_empty() {
                continue;
            }
            let (id, fresh) = intern(&mut dfa, next)?;
            if fresh {
                worklist.push_back(id);
            }
            dfa.moves[current].insert(symbol, id);
        }
    }

    Ok(dfa)
}
