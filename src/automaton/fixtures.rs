//! Automata shared by the test modules.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Automaton, AutomatonBuilder, Symbol};

const RANDOM_ALPHABET: [char; 3] = ['a', 'b', 'c'];

/// `a(b|c)*` as a two-state DFA: `p -a-> q`, `q -b-> q`, `q -c-> q`.
pub(crate) fn a_then_b_or_c() -> Automaton {
    let mut b = AutomatonBuilder::new();
    let p = b.add_state("p");
    let q = b.add_state("q");
    b.set_start(p).add_final(q);
    b.add_transition(p, 'a'.into(), q).unwrap();
    b.add_transition(q, 'b'.into(), q).unwrap();
    b.add_transition(q, 'c'.into(), q).unwrap();
    b.build().unwrap()
}

/// A non-final start state with no outgoing transitions, next to a final
/// state that nothing reaches.
pub(crate) fn stuck_start() -> Automaton {
    let mut b = AutomatonBuilder::new();
    let s = b.add_state("s");
    let f = b.add_state("f");
    b.set_start(s).add_final(f);
    b.add_symbol('a'.into()).add_symbol('b'.into());
    b.add_transition(f, 'a'.into(), f).unwrap();
    b.build().unwrap()
}

/// A partial DFA over `{a, b, c}` with up to five states, derived from `seed`.
pub(crate) fn random_automaton(seed: u64) -> Automaton {
    let mut rng = StdRng::seed_from_u64(seed);
    let num_states = rng.gen_range(1..=5);

    let mut b = AutomatonBuilder::new();
    for i in 0..num_states {
        b.add_state(format!("q{i}"));
    }
    b.set_start(rng.gen_range(0..num_states));
    for symbol in RANDOM_ALPHABET {
        b.add_symbol(symbol.into());
    }
    for state in 0..num_states {
        if rng.gen_bool(0.4) {
            b.add_final(state);
        }
        for symbol in RANDOM_ALPHABET {
            if rng.gen_bool(0.6) {
                let target = rng.gen_range(0..num_states);
                b.add_transition(state, symbol.into(), target).unwrap();
            }
        }
    }
    b.build().unwrap()
}

/// Map arbitrary bytes onto `{a, b, c, z}`; `z` is outside every fixture's
/// alphabet.
pub(crate) fn word_from_bytes(bytes: &[u8]) -> Vec<Symbol> {
    bytes
        .iter()
        .take(8)
        .map(|&b| match b % 4 {
            0 => Symbol::new('a'),
            1 => Symbol::new('b'),
            2 => Symbol::new('c'),
            _ => Symbol::new('z'),
        })
        .collect()
}
