//! Brute-force enumeration of accepted strings.
//!
//! Every sequence over the alphabet is generated and run through
//! [`Automaton::accepts`] on its own; no prefix is ever pruned. Cost grows as
//! `|alphabet|^max_length`, so the candidate count is checked against a ceiling
//! before any work starts.

use log::debug;
use serde::Serialize;

use crate::automaton::{Automaton, Symbol};
use crate::error::ExplorerError;

/// Accepted strings in generation order, with their count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enumeration {
    pub count: usize,
    pub strings: Vec<String>,
}

impl From<Vec<String>> for Enumeration {
    fn from(strings: Vec<String>) -> Self {
        Self {
            count: strings.len(),
            strings,
        }
    }
}

/// Number of sequences of length `1..=max_length` over `alphabet` symbols, or
/// `None` once that number passes `ceiling` (or overflows).
///
/// Alphabets of zero and one symbol are counted in closed form. For larger
/// ones the running total at least doubles per length, so the loop stops
/// within 64 steps.
pub fn candidate_count(alphabet: usize, max_length: usize, ceiling: u64) -> Option<u64> {
    let total = match alphabet {
        0 => 0,
        1 => u64::try_from(max_length).ok()?,
        _ => {
            let alphabet = u64::try_from(alphabet).ok()?;
            let mut total: u64 = 0;
            let mut per_length: u64 = 1;
            for _ in 0..max_length {
                per_length = per_length.checked_mul(alphabet)?;
                total = total.checked_add(per_length)?;
                if total > ceiling {
                    return None;
                }
            }
            total
        }
    };
    (total <= ceiling).then_some(total)
}

/// All accepted strings of length `1..=max_length`.
///
/// Lengths are visited in increasing order; within a length, sequences follow
/// the Cartesian-product order of the alphabet with the last position varying
/// fastest. The empty string is never produced, even when the start state is
/// final.
pub fn enumerate_accepted(
    automaton: &Automaton,
    max_length: usize,
    max_candidates: u64,
) -> Result<Vec<String>, ExplorerError> {
    let alphabet: Vec<Symbol> = automaton.alphabet().iter().copied().collect();

    let too_large = || ExplorerError::EnumerationTooLarge {
        alphabet: alphabet.len(),
        max_length,
        ceiling: max_candidates,
    };
    let candidates =
        candidate_count(alphabet.len(), max_length, max_candidates).ok_or_else(too_large)?;
    debug!(
        "enumerating {candidates} candidates over {} symbols up to length {max_length}",
        alphabet.len()
    );

    let mut accepted = Vec::new();
    if alphabet.is_empty() {
        return Ok(accepted);
    }

    for length in 1..=max_length {
        let mut indices = vec![0usize; length];
        loop {
            let sequence: Vec<Symbol> = indices.iter().map(|&i| alphabet[i]).collect();
            if automaton.accepts(&sequence) {
                accepted.push(sequence.iter().map(|s| s.as_char()).collect());
            }
            if !advance(&mut indices, alphabet.len()) {
                break;
            }
        }
    }

    debug!("{} accepted strings", accepted.len());
    Ok(accepted)
}

/// Step `indices` to the next tuple in odometer order. Returns false after the
/// last tuple.
fn advance(indices: &mut [usize], radix: usize) -> bool {
    for digit in indices.iter_mut().rev() {
        *digit += 1;
        if *digit < radix {
            return true;
        }
        *digit = 0;
    }
    false
}
