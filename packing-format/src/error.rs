use std::io;

/// The errors that can be encountered while reading instance or solution files.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("failed to read from source: {0}")]
    IoError(#[from] io::Error),

    #[error("the source ended before the {0} was read")]
    MissingLine(&'static str),

    #[error("'{token}' on line {line} is not a valid non-negative integer")]
    InvalidInteger { line: usize, token: String },

    #[error("line {line} should contain {expected}, but it has {found} values")]
    WrongArity {
        line: usize,
        expected: &'static str,
        found: usize,
    },

    #[error("expected {expected} blocks, but found {found}")]
    IncorrectBlockCount { expected: usize, found: usize },
}
