//! Regular expression to minimal DFA.
//!
//! The exploration engine only needs something that turns a pattern into an
//! [`Automaton`]; [`DfaCompiler`] is that seam. [`RegexCompiler`] parses with
//! `regex-syntax`, builds a Thompson ε-NFA, determinizes it and minimizes the
//! result. Look-around assertions are refused since the language is matched
//! against whole strings.

mod minimize;
mod nfa;
mod subset;

use log::{debug, info};
use regex_syntax::ParserBuilder;

use crate::automaton::{Automaton, AutomatonBuilder};
use crate::error::{CompileError, ExplorerError};

/// Anything that can produce a deterministic, partial automaton from a
/// pattern.
pub trait DfaCompiler {
    fn compile(&self, pattern: &str) -> Result<Automaton, CompileError>;
}

/// The `regex-syntax` based compiler.
#[derive(Debug, Clone)]
pub struct RegexCompiler {
    /// Largest character class expanded into individual symbols.
    pub max_class_size: usize,
    /// Largest NFA, and largest DFA, built for one pattern.
    pub max_states: usize,
}

impl Default for RegexCompiler {
    fn default() -> Self {
        Self {
            max_class_size: 256,
            max_states: 10_000,
        }
    }
}

impl DfaCompiler for RegexCompiler {
    fn compile(&self, pattern: &str) -> Result<Automaton, CompileError> {
        let hir = ParserBuilder::new().build().parse(pattern)?;
        let nfa = nfa::Thompson::new(self.max_class_size, self.max_states).compile(&hir)?;
        let dfa = subset::subset_construction(&nfa, self.max_states)?;
        let minimal = minimize::minimize(&dfa);
        debug!(
            "{pattern:?}: {} NFA states, {} DFA states, {} after minimization",
            nfa.num_states(),
            dfa.num_states(),
            minimal.num_states()
        );

        let automaton = into_automaton(&minimal)
            .map_err(|err| CompileError::Internal(err.to_string()))?;
        info!(
            "compiled {pattern:?} into {} states over {} symbols",
            automaton.num_states(),
            automaton.alphabet().len()
        );
        Ok(automaton)
    }
}

/// Label each state with the NFA states it stands for, e.g. `{0,3,5}`.
fn into_automaton(dfa: &subset::SubsetDfa) -> Result<Automaton, ExplorerError> {
    let mut builder = AutomatonBuilder::new();
    for subset in &dfa.subsets {
        let members: Vec<String> = subset.iter().map(usize::to_string).collect();
        builder.add_state(format!("{{{}}}", members.join(",")));
    }
    builder.set_start(0);
    for (state, &is_final) in dfa.finals.iter().enumerate() {
        if is_final {
            builder.add_final(state);
        }
    }
    for &symbol in &dfa.alphabet {
        builder.add_symbol(symbol);
    }
    for (source, row) in dfa.moves.iter().enumerate() {
        for (&symbol, &destination) in row {
            builder.add_transition(source, symbol, destination)?;
        }
    }
    builder.build()
}
