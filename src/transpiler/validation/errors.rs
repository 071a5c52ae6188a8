// src/transpiler/validation/errors.rs
use thiserror::Error;

/// Broad classification used by tooling to report failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Semantic,
    Strictness,
    Io,
}

#[derive(Error, Debug)]
pub enum Cp3Error {
    #[error("{message}")]
    Syntax {
        line: usize,
        column: usize,
        source_line: String,
        message: String,
    },

    #[error("{0}")]
    Semantic(String),

    /// Raised only by the leveled checks: the input would pass at a lower level.
    #[error("{0}")]
    Strictness(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Cp3Error {
    pub fn semantic(message: impl Into<String>) -> Self {
        Cp3Error::Semantic(message.into())
    }

    pub fn strictness(message: impl Into<String>) -> Self {
        Cp3Error::Strictness(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Cp3Error::Syntax { .. } => ErrorKind::Syntax,
            Cp3Error::Semantic(_) => ErrorKind::Semantic,
            Cp3Error::Strictness(_) => ErrorKind::Strictness,
            Cp3Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Strictness errors are a specialization of semantic errors.
    pub fn is_semantic(&self) -> bool {
        matches!(self, Cp3Error::Semantic(_) | Cp3Error::Strictness(_))
    }

    pub fn label(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Syntax => "Syntax error",
            ErrorKind::Semantic => "Semantic error",
            ErrorKind::Strictness => "Strictness error",
            ErrorKind::Io => "I/O error",
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            Cp3Error::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Cp3Error>;
