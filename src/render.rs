//! Graphviz DOT output for an automaton.
//!
//! The start state is filled light green, other final states are light blue
//! double circles and the remaining states are gray. Turning the DOT text into
//! an image is left to Graphviz.

use std::path::Path;

use crate::automaton::{Automaton, StateId};
use crate::error::ExplorerError;

pub fn to_dot(automaton: &Automaton) -> String {
    let mut out = String::from("digraph dfa {\n    rankdir=LR;\n");

    for state in automaton.states() {
        let (shape, color) = if state == automaton.start() {
            ("circle", "lightgreen")
        } else if automaton.is_final(state) {
            ("doublecircle", "lightblue")
        } else {
            ("circle", "gray")
        };
        out.push_str(&format!(
            "    \"{}\" [shape={shape}, style=filled, fillcolor={color}];\n",
            name(automaton, state)
        ));
    }

    for (source, symbol, destination) in automaton.transitions() {
        out.push_str(&format!(
            "    \"{}\" -> \"{}\" [label=\"{}\"];\n",
            name(automaton, source),
            name(automaton, destination),
            escape(&symbol.to_string())
        ));
    }

    out.push_str("}\n");
    out
}

pub fn write_dot(automaton: &Automaton, path: &Path) -> Result<(), ExplorerError> {
    std::fs::write(path, to_dot(automaton))?;
    Ok(())
}

fn name(automaton: &Automaton, state: StateId) -> String {
    escape(automaton.label(state).unwrap_or_default())
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
