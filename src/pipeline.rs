use log::{debug, info};

use crate::automaton::{Automaton, augment, canonicalize};
use crate::compile::{DfaCompiler, RegexCompiler};
use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::explore::{Enumeration, Sampler, enumerate_accepted};

/// Entry point used by the presentation layer: compile, post-process, explore.
pub struct Explorer<C = RegexCompiler> {
    compiler: C,
    attempt_limit: u32,
    max_candidates: u64,
    seed: Option<u64>,
}

impl Explorer<RegexCompiler> {
    pub fn from_config(config: &ExplorerConfig) -> Self {
        let compiler = RegexCompiler {
            max_class_size: config.max_class_size,
            max_states: config.max_states,
        };
        Self::new(compiler, config)
    }
}

impl<C: DfaCompiler> Explorer<C> {
    pub fn new(compiler: C, config: &ExplorerConfig) -> Self {
        Self {
            compiler,
            attempt_limit: config.attempt_limit,
            max_candidates: config.max_candidates,
            seed: config.seed,
        }
    }

    /// Compile `pattern`, rename its states `A`, `B`, … and add the final-state
    /// self-loops.
    pub fn build_dfa(&self, pattern: &str) -> Result<Automaton, ExplorerError> {
        let compiled = self.compiler.compile(pattern).inspect_err(|err| {
            info!("could not compile {pattern:?}: {err}");
        })?;
        let renamed = canonicalize(&compiled)?;
        let augmented = augment(renamed)?;
        debug!(
            "{pattern:?} ready: {} states, {} transitions",
            augmented.num_states(),
            augmented.num_transitions()
        );
        Ok(augmented)
    }

    /// `num_samples` independent draws; each slot is `None` when no accepted
    /// string was found within the attempt limit.
    pub fn sample(
        &self,
        automaton: &Automaton,
        num_samples: usize,
        max_length: usize,
    ) -> Vec<Option<String>> {
        let mut sampler = match self.seed {
            Some(seed) => Sampler::seeded(seed, self.attempt_limit),
            None => Sampler::from_entropy(self.attempt_limit),
        };
        sampler.sample_many(automaton, num_samples, max_length)
    }

    pub fn enumerate_accepted(
        &self,
        automaton: &Automaton,
        max_length: usize,
    ) -> Result<Enumeration, ExplorerError> {
        enumerate_accepted(automaton, max_length, self.max_candidates).map(Enumeration::from)
    }
}
