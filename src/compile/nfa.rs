//! Thompson construction of an ε-NFA from a `regex-syntax` HIR.

use std::collections::BTreeSet;

use regex_syntax::hir::{Class, Hir, HirKind, Repetition};

use crate::automaton::Symbol;
use crate::error::CompileError;

/// An ε-NFA with a single start and a single accepting state.
///
/// Edges labeled `None` are ε-moves.
#[derive(Debug, Clone)]
pub struct EpsilonNfa {
    edges: Vec<Vec<(Option<Symbol>, usize)>>,
    start: usize,
    accept: usize,
    alphabet: BTreeSet<Symbol>,
}

impl EpsilonNfa {
    pub fn num_states(&self) -> usize {
        self.edges.len()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn accept(&self) -> usize {
        self.accept
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    /// States reachable from `states` through ε-moves alone, `states` included.
    pub fn epsilon_closure(&self, states: &BTreeSet<usize>) -> BTreeSet<usize> {
        let mut closure = states.clone();
        let mut stack: Vec<usize> = states.iter().copied().collect();

        while let Some(s) = stack.pop() {
            for &(label, dest) in &self.edges[s] {
                if label.is_none() && closure.insert(dest) {
                    stack.push(dest);
                }
            }
        }

        closure
    }

    /// ε-closure of the states reached from `states` on `symbol`.
    pub fn move_on_symbol(&self, states: &BTreeSet<usize>, symbol: Symbol) -> BTreeSet<usize> {
        let reached: BTreeSet<usize> = states
            .iter()
            .flat_map(|&s| self.edges[s].iter())
            .filter(|&&(label, _)| label == Some(symbol))
            .map(|&(_, dest)| dest)
            .collect();
        self.epsilon_closure(&reached)
    }
}

/// Entry and exit state of a partially built sub-automaton.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: usize,
    end: usize,
}

/// Compiles HIR nodes into fragments of one growing ε-NFA.
pub struct Thompson {
    edges: Vec<Vec<(Option<Symbol>, usize)>>,
    alphabet: BTreeSet<Symbol>,
    max_class_size: usize,
    max_states: usize,
}

impl Thompson {
    pub fn new(max_class_size: usize, max_states: usize) -> Self {
        Self {
            edges: Vec::new(),
            alphabet: BTreeSet::new(),
            max_class_size,
            max_states,
        }
    }

    pub fn compile(mut self, hir: &Hir) -> Result<EpsilonNfa, CompileError> {
        let fragment = self.compile_hir(hir)?;
        Ok(EpsilonNfa {
            edges: self.edges,
            start: fragment.start,
            accept: fragment.end,
            alphabet: self.alphabet,
        })
    }

    fn compile_hir(&mut self, hir: &Hir) -> Result<Fragment, CompileError> {
        match hir.kind() {
            HirKind::Empty => {
                let s = self.add_state()?;
                Ok(Fragment { start: s, end: s })
            }
            HirKind::Literal(literal) => self.compile_literal(&literal.0),
            HirKind::Class(class) => self.compile_class(class),
            HirKind::Look(look) => Err(CompileError::Unsupported(format!(
                "look-around assertion {look:?}"
            ))),
            HirKind::Repetition(rep) => self.compile_repetition(rep),
            HirKind::Capture(capture) => self.compile_hir(&capture.sub),
            HirKind::Concat(subs) => {
                let start = self.add_state()?;
                let mut current = start;
                for sub in subs {
                    let f = self.compile_hir(sub)?;
                    self.add_epsilon(current, f.start);
                    current = f.end;
                }
                Ok(Fragment { start, end: current })
            }
            HirKind::Alternation(subs) => {
                let start = self.add_state()?;
                let end = self.add_state()?;
                for sub in subs {
                    let f = self.compile_hir(sub)?;
                    self.add_epsilon(start, f.start);
                    self.add_epsilon(f.end, end);
                }
                Ok(Fragment { start, end })
            }
        }
    }

    fn compile_literal(&mut self, bytes: &[u8]) -> Result<Fragment, CompileError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| CompileError::Unsupported("literal that is not valid UTF-8".into()))?;

        let start = self.add_state()?;
        let mut current = start;
        for c in text.chars() {
            let next = self.add_state()?;
            self.add_symbol_edge(current, Symbol::new(c), next);
            current = next;
        }
        Ok(Fragment { start, end: current })
    }

    fn compile_class(&mut self, class: &Class) -> Result<Fragment, CompileError> {
        let symbols: Vec<Symbol> = match class {
            Class::Unicode(unicode) => {
                let size: u64 = unicode
                    .iter()
                    .map(|r| u64::from(r.end() as u32 - r.start() as u32) + 1)
                    .sum();
                self.check_class_size(size)?;
                unicode
                    .iter()
                    .flat_map(|r| r.start()..=r.end())
                    .map(Symbol::new)
                    .collect()
            }
            Class::Bytes(bytes) => {
                let size: u64 = bytes
                    .iter()
                    .map(|r| u64::from(r.end() - r.start()) + 1)
                    .sum();
                self.check_class_size(size)?;
                let mut symbols = Vec::new();
                for byte in bytes.iter().flat_map(|r| r.start()..=r.end()) {
                    if !byte.is_ascii() {
                        return Err(CompileError::Unsupported(format!(
                            "non-ASCII byte \\x{byte:02X} in byte class"
                        )));
                    }
                    symbols.push(Symbol::new(char::from(byte)));
                }
                symbols
            }
        };

        let start = self.add_state()?;
        let end = self.add_state()?;
        for symbol in symbols {
            self.add_symbol_edge(start, symbol, end);
        }
        Ok(Fragment { start, end })
    }

    /// `x{min,max}` becomes `min` mandatory copies followed by either a Kleene
    /// loop (unbounded) or `max - min` optional copies.
    fn compile_repetition(&mut self, rep: &Repetition) -> Result<Fragment, CompileError> {
        let start = self.add_state()?;
        let mut current = start;
        for _ in 0..rep.min {
            let f = self.compile_hir(&rep.sub)?;
            self.add_epsilon(current, f.start);
            current = f.end;
        }

        match rep.max {
            None => {
                let hub = self.add_state()?;
                let f = self.compile_hir(&rep.sub)?;
                self.add_epsilon(current, hub);
                self.add_epsilon(hub, f.start);
                self.add_epsilon(f.end, hub);
                Ok(Fragment { start, end: hub })
            }
            Some(max) => {
                let end = self.add_state()?;
                self.add_epsilon(current, end);
                for _ in rep.min..max {
                    let f = self.compile_hir(&rep.sub)?;
                    self.add_epsilon(current, f.start);
                    current = f.end;
                    self.add_epsilon(current, end);
                }
                Ok(Fragment { start, end })
            }
        }
    }

    fn check_class_size(&self, size: u64) -> Result<(), CompileError> {
        if size > self.max_class_size as u64 {
            return Err(CompileError::TooComplex(format!(
                "character class of {size} symbols exceeds the limit of {}",
                self.max_class_size
            )));
        }
        Ok(())
    }

    fn add_state(&mut self) -> Result<usize, CompileError> {
        if self.edges.len() >= self.max_states {
            return Err(CompileError::TooComplex(format!(
                "NFA exceeds {} states",
                self.max_states
            )));
        }
        self.edges.push(Vec::new());
        Ok(self.edges.len() - 1)
    }

    fn add_epsilon(&mut self, source: usize, destination: usize) {
        self.edges[source].push((None, destination));
    }

    fn add_symbol_edge(&mut self, source: usize, symbol: Symbol, destination: usize) {
        self.alphabet.insert(symbol);
        self.edges[source].push((Some(symbol), destination));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex_syntax::Parser;

    fn nfa(pattern: &str) -> Result<EpsilonNfa, CompileError> {
        let hir = Parser::new().parse(pattern).unwrap();
        Thompson::new(64, 1_000).compile(&hir)
    }

    /// Brute-force acceptance test straight on the ε-NFA.
    fn nfa_accepts(nfa: &EpsilonNfa, word: &str) -> bool {
        let mut current = nfa.epsilon_closure(&BTreeSet::from([nfa.start()]));
        for c in word.chars() {
            current = nfa.move_on_symbol(&current, Symbol::new(c));
        }
        current.contains(&nfa.accept())
    }

    #[test]
    fn literal_and_alternation() {
        let n = nfa("ab|c").unwrap();
        assert!(nfa_accepts(&n, "ab"));
        assert!(nfa_accepts(&n, "c"));
        assert!(!nfa_accepts(&n, "a"));
        assert!(!nfa_accepts(&n, "abc"));
        assert_eq!(
            n.alphabet().iter().map(|s| s.as_char()).collect::<Vec<_>>(),
            vec!['a', 'b', 'c']
        );
    }

    #[test]
    fn star_group() {
        let n = nfa("a(b|c)*").unwrap();
        for word in ["a", "ab", "ac", "abcb"] {
            assert!(nfa_accepts(&n, word), "{word}");
        }
        for word in ["", "b", "ba", "ac a"] {
            assert!(!nfa_accepts(&n, word), "{word}");
        }
    }

    #[test]
    fn counted_repetition() {
        let n = nfa("x{2,3}").unwrap();
        assert!(!nfa_accepts(&n, "x"));
        assert!(nfa_accepts(&n, "xx"));
        assert!(nfa_accepts(&n, "xxx"));
        assert!(!nfa_accepts(&n, "xxxx"));

        let n = nfa("y+").unwrap();
        assert!(!nfa_accepts(&n, ""));
        assert!(nfa_accepts(&n, "yyyy"));

        let n = nfa("z?").unwrap();
        assert!(nfa_accepts(&n, ""));
        assert!(nfa_accepts(&n, "z"));
        assert!(!nfa_accepts(&n, "zz"));
    }

    #[test]
    fn class_expands_to_symbols() {
        let n = nfa("[a-d]").unwrap();
        assert_eq!(n.alphabet().len(), 4);
        assert!(nfa_accepts(&n, "c"));
    }

    #[test]
    fn empty_pattern_accepts_empty_word() {
        let n = nfa("").unwrap();
        assert!(nfa_accepts(&n, ""));
        assert!(n.alphabet().is_empty());
    }

    #[test]
    fn rejects_look_arounds() {
        assert!(matches!(nfa("^a$"), Err(CompileError::Unsupported(_))));
        assert!(matches!(nfa(r"\bword"), Err(CompileError::Unsupported(_))));
    }

    #[test]
    fn rejects_huge_class() {
        assert!(matches!(nfa("."), Err(CompileError::TooComplex(_))));
        assert!(matches!(nfa("[^a]"), Err(CompileError::TooComplex(_))));
    }

    #[test]
    fn state_limit_is_enforced() {
        let hir = Parser::new().parse("(ab){500}").unwrap();
        let result = Thompson::new(64, 100).compile(&hir);
        assert!(matches!(result, Err(CompileError::TooComplex(_))));
    }
}
