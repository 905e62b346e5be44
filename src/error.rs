use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("Failed to generate DFA: {0}")]
    Compile(#[from] CompileError),

    #[error("Malformed automaton: {0}")]
    MalformedAutomaton(String),

    #[error(
        "Enumeration too large: alphabet of {alphabet} symbols up to length {max_length} exceeds the limit of {ceiling} candidates"
    )]
    EnumerationTooLarge {
        alphabet: usize,
        max_length: usize,
        ceiling: u64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons the regex compiler can refuse a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("invalid regular expression: {0}")]
    Syntax(String),

    #[error("unsupported feature: {0}")]
    Unsupported(String),

    #[error("pattern too complex: {0}")]
    TooComplex(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<regex_syntax::Error> for CompileError {
    fn from(err: regex_syntax::Error) -> Self {
        CompileError::Syntax(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_display() {
        let err = CompileError::Unsupported("look-around assertion".into());
        assert_eq!(err.to_string(), "unsupported feature: look-around assertion");
    }

    #[test]
    fn explorer_error_wraps_compile_error() {
        let err: ExplorerError = CompileError::TooComplex("class of 300 symbols".into()).into();
        assert_eq!(
            err.to_string(),
            "Failed to generate DFA: pattern too complex: class of 300 symbols"
        );
    }

    #[test]
    fn syntax_error_from_regex_syntax() {
        let parse_err = regex_syntax::Parser::new().parse("a(b").unwrap_err();
        let err = CompileError::from(parse_err);
        assert!(matches!(err, CompileError::Syntax(_)));
    }

    #[test]
    fn enumeration_too_large_display() {
        let err = ExplorerError::EnumerationTooLarge {
            alphabet: 26,
            max_length: 10,
            ceiling: 1000,
        };
        assert!(err.to_string().contains("26 symbols"));
        assert!(err.to_string().contains("1000 candidates"));
    }
}
