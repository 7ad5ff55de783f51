use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Where a query error happened and what went wrong.
///
/// `position` is a byte offset into `query`; `line` counts the newlines the
/// scanner skipped before the failure, starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}\nposition: {position}\n{query}\n{}", caret_line(.position))]
pub struct Diagnostic {
    pub message: String,
    pub position: usize,
    pub line: usize,
    pub query: String,
}

/// Failure of a single query evaluation. Both kinds are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query does not match the grammar.
    #[error("Syntax Error: {0}")]
    Syntax(Diagnostic),

    /// The query is well formed but cannot be applied to the values it meets.
    #[error("Value Error: {0}")]
    Value(Diagnostic),
}

impl QueryError {
    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            QueryError::Syntax(d) | QueryError::Value(d) => d,
        }
    }

    pub fn message(&self) -> &str {
        &self.diagnostic().message
    }

    pub fn position(&self) -> usize {
        self.diagnostic().position
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, QueryError::Syntax(_))
    }
}

/// Malformed JSON text handed to the loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Load Error: {message}\nline: {line} position: {column}\n{excerpt}")]
pub struct LoadError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    /// Offending source line prefixed with its number, plus a caret line.
    pub excerpt: String,
}

/// Everything the command-line front end can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed opening file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file {} is empty", .0.display())]
    EmptyFile(PathBuf),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("failed writing result: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code reported by `jple` for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Load(_) => 1,
            Error::Io { .. } | Error::EmptyFile(_) => 2,
            Error::Serialize(_) => 3,
            Error::Query(QueryError::Syntax(_)) => 4,
            Error::Query(QueryError::Value(_)) => 5,
        }
    }
}

// Type alias for results that use `Error` as the error type
pub type Result<T> = std::result::Result<T, Error>;

pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// `^` under the offending character followed by ten `~`, newline terminated.
pub(crate) fn caret_line(padding: &usize) -> CaretLine {
    CaretLine(*padding)
}

pub(crate) struct CaretLine(usize);

impl fmt::Display for CaretLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:width$}^~~~~~~~~~", "", width = self.0)
    }
}
