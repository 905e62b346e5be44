//! Self-loops on final states.
//!
//! Once a run enters a final state `f` on symbol `x`, the augmented automaton
//! may keep reading `x` at `f`. This widens the accepted language: every word
//! accepted before is still accepted, and repeated trailing symbols are added.

use log::debug;

use super::model::Automaton;
use crate::error::ExplorerError;

/// Add `(f, x) -> f` for every transition `(s, x) -> f` into a final state `f`.
///
/// The additions are computed from the table as it was on entry, in a single
/// pass. A pair `(f, x)` that is already defined keeps its target.
pub fn augment(mut automaton: Automaton) -> Result<Automaton, ExplorerError> {
    let loops: Vec<_> = automaton
        .transitions()
        .filter(|&(_, _, destination)| automaton.is_final(destination))
        .map(|(_, symbol, destination)| (destination, symbol))
        .collect();

    let mut added = 0usize;
    let mut conflicts = 0usize;
    for (state, symbol) in loops {
        if automaton.insert_transition_if_absent(state, symbol, state)? {
            added += 1;
        } else if automaton.transition(state, symbol) != Some(state) {
            conflicts += 1;
        }
    }

    debug!(
        "augmented final states with {added} self-loops ({conflicts} pairs already bound elsewhere)"
    );
    Ok(automaton)
}
