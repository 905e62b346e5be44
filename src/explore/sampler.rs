//! Random accepted strings via bounded random walks.
//!
//! Each step picks uniformly among the symbols defined at the current state,
//! with no weighting by how many accepted words lie behind a symbol. Short
//! paths to a final state are therefore favored over long ones.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::automaton::{Automaton, StateId, Symbol};

/// Default number of walks tried before giving up on one sample.
pub const DEFAULT_ATTEMPT_LIMIT: u32 = 100;

/// Random walker over an automaton.
pub struct Sampler<R = StdRng> {
    rng: R,
    attempt_limit: u32,
}

impl Sampler<StdRng> {
    /// Sampler seeded from the operating system.
    pub fn from_entropy(attempt_limit: u32) -> Self {
        Self::new(StdRng::from_entropy(), attempt_limit)
    }

    /// Sampler that reproduces the same walks for the same seed.
    pub fn seeded(seed: u64, attempt_limit: u32) -> Self {
        Self::new(StdRng::seed_from_u64(seed), attempt_limit)
    }
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R, attempt_limit: u32) -> Self {
        Self { rng, attempt_limit }
    }

    /// Draw one accepted string of at most `max_length` symbols.
    ///
    /// A walk stops successfully the first time it steps into a final state,
    /// so the empty string is never returned. Walks that hit a state without
    /// transitions or run out of steps are dropped. Returns `None` once
    /// `attempt_limit` walks have failed.
    pub fn sample(&mut self, automaton: &Automaton, max_length: usize) -> Option<String> {
        for _ in 0..self.attempt_limit {
            if let Some(word) = self.walk(automaton, max_length) {
                return Some(word);
            }
        }
        debug!(
            "no accepted string within {} attempts of {max_length} steps",
            self.attempt_limit
        );
        None
    }

    /// One result slot per requested sample.
    pub fn sample_many(
        &mut self,
        automaton: &Automaton,
        num_samples: usize,
        max_length: usize,
    ) -> Vec<Option<String>> {
        (0..num_samples)
            .map(|_| self.sample(automaton, max_length))
            .collect()
    }

    fn walk(&mut self, automaton: &Automaton, max_length: usize) -> Option<String> {
        let mut current = automaton.start();
        let mut word = String::new();

        for _ in 0..max_length {
            let choices: Vec<(Symbol, StateId)> =
                automaton.transitions_from(current).into_iter().collect();
            let &(symbol, next) = choices.choose(&mut self.rng)?;
            word.push(symbol.as_char());
            current = next;

            if automaton.is_final(current) {
                return Some(word);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::fixtures::{a_then_b_or_c, random_automaton, stuck_start};
    use crate::automaton::{AutomatonBuilder, augment};
    use quickcheck::QuickCheck;

    #[test]
    fn samples_are_accepted_and_bounded() {
        let dfa = augment(a_then_b_or_c()).unwrap();
        let mut sampler = Sampler::seeded(42, DEFAULT_ATTEMPT_LIMIT);
        for slot in sampler.sample_many(&dfa, 50, 5) {
            let word = slot.expect("a(b|c)* always reaches a final state in one step");
            assert!(dfa.accepts_str(&word));
            assert!(word.chars().count() <= 5);
        }
    }

    #[test]
    fn walk_stops_at_first_final_state() {
        // Only 'a' leaves the start state and lands on a final state.
        let dfa = a_then_b_or_c();
        let mut sampler = Sampler::seeded(1, DEFAULT_ATTEMPT_LIMIT);
        assert_eq!(sampler.sample(&dfa, 10), Some("a".to_string()));
    }

    #[test]
    fn stuck_start_never_yields() {
        let dfa = stuck_start();
        let mut sampler = Sampler::seeded(3, DEFAULT_ATTEMPT_LIMIT);
        let slots = sampler.sample_many(&dfa, 4, 10);
        assert_eq!(slots, vec![None, None, None, None]);
    }

    #[test]
    fn too_short_length_yields_nothing() {
        // Shortest accepted word is "abc".
        let mut b = AutomatonBuilder::new();
        let s0 = b.add_state("s0");
        let s1 = b.add_state("s1");
        let s2 = b.add_state("s2");
        let s3 = b.add_state("s3");
        b.set_start(s0).add_final(s3);
        b.add_transition(s0, 'a'.into(), s1).unwrap();
        b.add_transition(s1, 'b'.into(), s2).unwrap();
        b.add_transition(s2, 'c'.into(), s3).unwrap();
        let dfa = b.build().unwrap();

        let mut sampler = Sampler::seeded(9, 10);
        assert_eq!(sampler.sample(&dfa, 2), None);
        assert_eq!(sampler.sample(&dfa, 3), Some("abc".to_string()));
    }

    #[test]
    fn zero_length_yields_nothing_even_if_start_is_final() {
        let mut b = AutomatonBuilder::new();
        let s = b.add_state("s");
        b.set_start(s).add_final(s);
        b.add_transition(s, 'a'.into(), s).unwrap();
        let dfa = b.build().unwrap();

        let mut sampler = Sampler::seeded(0, DEFAULT_ATTEMPT_LIMIT);
        assert_eq!(sampler.sample(&dfa, 0), None);
        assert_eq!(sampler.sample(&dfa, 1), Some("a".to_string()));
    }

    #[test]
    fn same_seed_same_samples() {
        let dfa = augment(a_then_b_or_c()).unwrap();
        let first = Sampler::seeded(1234, DEFAULT_ATTEMPT_LIMIT).sample_many(&dfa, 10, 6);
        let second = Sampler::seeded(1234, DEFAULT_ATTEMPT_LIMIT).sample_many(&dfa, 10, 6);
        assert_eq!(first, second);
    }

    #[test]
    fn random_automata_samples_are_sound() {
        fn prop(seed: u64, max_length: u8) -> bool {
            let dfa = random_automaton(seed);
            let max_length = usize::from(max_length % 8);
            let mut sampler = Sampler::seeded(seed ^ 0x5eed, 20);
            sampler
                .sample_many(&dfa, 3, max_length)
                .into_iter()
                .flatten()
                .all(|word| {
                    dfa.accepts_str(&word)
                        && !word.is_empty()
                        && word.chars().count() <= max_length
                })
        }
        QuickCheck::new()
            .tests(200)
            .quickcheck(prop as fn(u64, u8) -> bool);
    }
}
