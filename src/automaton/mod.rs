mod augment;
mod canonical;
mod model;

#[cfg(test)]
pub(crate) mod fixtures;

pub use augment::augment;
pub use canonical::canonicalize;
pub use model::{Automaton, AutomatonBuilder, StateId, Symbol};
