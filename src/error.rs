//! Error types.
//!
//! Configuration problems are fatal at load time; verification problems
//! are fatal to the replay. Search exhaustion is not an error.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while loading or preparing a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A line does not match the expected grammar.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Two processes share a name.
    #[error("line {line}: duplicate process name '{name}'")]
    DuplicateProcess { line: usize, name: String },

    /// A stock is declared twice.
    #[error("line {line}: duplicate stock '{name}'")]
    DuplicateStock { line: usize, name: String },

    /// No `optimize:` line was found.
    #[error("missing optimize section")]
    MissingObjective,

    /// Structural validation failed.
    #[error("invalid configuration: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// The configuration file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A grammar pattern failed to compile.
    #[error("grammar pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors raised while replaying a trace.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The trace names a process the configuration does not declare.
    #[error("cycle {cycle}: unknown process '{process}'")]
    UnknownProcess { cycle: u64, process: String },

    /// A launch needs more than is in stock at that cycle.
    #[error("cycle {cycle}: process '{process}' needs {needed} {item}, only {available} in stock")]
    InsufficientStock {
        cycle: u64,
        process: String,
        item: String,
        needed: i64,
        available: i64,
    },

    /// A trace line goes back in time.
    #[error("line {line}: cycle {cycle} is before previous cycle {previous}")]
    NonMonotonicCycle { line: usize, cycle: u64, previous: u64 },

    /// A trace line looks like a launch but cannot be read.
    #[error("line {line}: {message}")]
    BadLine { line: usize, message: String },

    /// The trace grammar failed to compile.
    #[error("trace pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The configuration itself failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_syntax_message_carries_line() {
        let err = ConfigError::Syntax {
            line: 7,
            message: "expected process".into(),
        };
        assert_eq!(err.to_string(), "line 7: expected process");
    }

    #[test]
    fn test_validation_joins_messages() {
        let err = ConfigError::Validation(vec![
            ValidationError::new(ValidationErrorKind::MissingObjective, "no objective"),
            ValidationError::new(ValidationErrorKind::EmptyName, "empty name"),
        ]);
        assert_eq!(err.to_string(), "invalid configuration: no objective; empty name");
    }

    #[test]
    fn test_unknown_process_message() {
        let err = VerifyError::UnknownProcess {
            cycle: 3,
            process: "unknown_process".into(),
        };
        assert_eq!(err.to_string(), "cycle 3: unknown process 'unknown_process'");
    }
}
