use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a replacement run
#[derive(Debug, Error)]
pub enum ReplaceError {
    /// Invalid invocation (arity is enforced by clap, this covers the values)
    #[error("usage error: {0}")]
    Usage(String),

    /// Target directory is missing, unreachable or not a directory
    #[error("{}: {reason}", path.display())]
    Path { path: PathBuf, reason: String },

    /// The run's log file could not be created
    #[error("failed to create log file {}: {source}", path.display())]
    LogCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Listing, reading or rewriting an entry failed during the walk
    #[error("{action} {}: {source}", path.display())]
    Traversal {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The directory walker itself reported an error
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Appending to the log file failed
    #[error("failed to write log: {0}")]
    LogWrite(#[source] io::Error),
}

impl ReplaceError {
    pub fn traversal(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ReplaceError::Traversal {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReplaceError>;
