//! Minimization of a partial subset DFA by partition refinement.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::subset::SubsetDfa;

/// Drop states that cannot reach a final state, then merge states that no word
/// distinguishes.
///
/// Missing transitions count as moves to an implicit dead state, so two states
/// are only merged when they are defined on exactly the same symbols. The start
/// state is always kept, and stays state 0. Each merged state carries the union
/// of its members' NFA subsets.
pub fn minimize(dfa: &SubsetDfa) -> SubsetDfa {
    let live = co_reachable(dfa);
    let keep: Vec<usize> = (0..dfa.num_states())
        .filter(|&s| s == 0 || live.contains(&s))
        .collect();

    let mut block: HashMap<usize, usize> = keep
        .iter()
        .map(|&s| (s, usize::from(!dfa.finals[s])))
        .collect();
    let mut num_blocks = 0;

    loop {
        let mut signatures: HashMap<(usize, Vec<Option<usize>>), usize> = HashMap::new();
        let mut refined: HashMap<usize, usize> = HashMap::new();
        for &s in &keep {
            let row: Vec<Option<usize>> = dfa
                .alphabet
                .iter()
                .map(|symbol| {
                    dfa.moves[s]
                        .get(symbol)
                        .and_then(|target| block.get(target).copied())
                })
                .collect();
            let next_id = signatures.len();
            let id = *signatures.entry((block[&s], row)).or_insert(next_id);
            refined.insert(s, id);
        }

        let stable = signatures.len() == num_blocks;
        num_blocks = signatures.len();
        block = refined;
        if stable {
            break;
        }
    }

    let mut minimal = SubsetDfa {
        subsets: vec![BTreeSet::new(); num_blocks],
        finals: vec![false; num_blocks],
        moves: vec![BTreeMap::new(); num_blocks],
        alphabet: dfa.alphabet.clone(),
    };
    for &s in &keep {
        let b = block[&s];
        minimal.subsets[b].extend(dfa.subsets[s].iter().copied());
        minimal.finals[b] = dfa.finals[s];
        for (&symbol, target) in &dfa.moves[s] {
            if let Some(&t) = block.get(target) {
                minimal.moves[b].insert(symbol, t);
            }
        }
    }
    minimal
}

/// States from which some final state is reachable.
fn co_reachable(dfa: &SubsetDfa) -> BTreeSet<usize> {
    let mut reverse: HashMap<usize, Vec<usize>> = HashMap::new();
    for (source, row) in dfa.moves.iter().enumerate() {
        for &target in row.values() {
            reverse.entry(target).or_default().push(source);
        }
    }

    let mut live: BTreeSet<usize> = (0..dfa.num_states()).filter(|&s| dfa.finals[s]).collect();
    let mut stack: Vec<usize> = live.iter().copied().collect();
    while let Some(s) = stack.pop() {
        for &pred in reverse.get(&s).map(Vec::as_slice).unwrap_or_default() {
            if live.insert(pred) {
                stack.push(pred);
            }
        }
    }
    live
}
