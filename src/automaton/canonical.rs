//! Deterministic relabeling of automaton states.

use log::debug;

use super::model::{Automaton, AutomatonBuilder, StateId};
use crate::error::ExplorerError;

/// Name of the `index`-th state: `A`..`Z`, then `AA`, `AB`, … like spreadsheet
/// columns.
pub fn state_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Rebuild `automaton` with its states renamed in enumeration order.
///
/// The result has the same shape and language: the same alphabet, one state per
/// input state, and every transition re-emitted with both endpoints renamed.
/// Calling it again on the same instance yields the same labels.
pub fn canonicalize(automaton: &Automaton) -> Result<Automaton, ExplorerError> {
    let mut builder = AutomatonBuilder::new();
    let mapping: Vec<StateId> = automaton
        .states()
        .enumerate()
        .map(|(index, _)| builder.add_state(state_label(index)))
        .collect();

    let rename = |state: StateId| -> Result<StateId, ExplorerError> {
        mapping.get(state).copied().ok_or_else(|| {
            ExplorerError::MalformedAutomaton(format!(
                "state {state} has no canonical name ({} states known)",
                mapping.len()
            ))
        })
    };

    builder.set_start(rename(automaton.start())?);
    for &state in automaton.finals() {
        builder.add_final(rename(state)?);
    }
    for &symbol in automaton.alphabet() {
        builder.add_symbol(symbol);
    }
    for (source, symbol, destination) in automaton.transitions() {
        builder.add_transition(rename(source)?, symbol, rename(destination)?)?;
    }

    let renamed = builder.build()?;
    debug!(
        "canonicalized {} states and {} transitions",
        renamed.num_states(),
        renamed.num_transitions()
    );
    Ok(renamed)
}
