use std::error::Error;
use std::io;

/// An error related to the local triple storage.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StorageError {
    /// Error from the OS I/O layer.
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    Other(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl From<StorageError> for io::Error {
    #[inline]
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Io(error) => error,
            StorageError::Other(error) => Self::other(error),
        }
    }
}

/// An error raised while executing a query against a remote endpoint.
///
/// The error is surfaced unmodified to the caller of the pattern match. Nothing is retried.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RemoteExecutionError {
    /// The request could not be sent or the response could not be received.
    #[error("Failed to query the SPARQL endpoint: {0}")]
    Transport(#[source] Box<dyn Error + Send + Sync + 'static>),
    /// The endpoint answered with a non-success status code.
    #[error("The SPARQL endpoint answered with status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body is not a valid query results document.
    #[error("Invalid query results returned by the SPARQL endpoint: {0}")]
    Results(#[source] Box<dyn Error + Send + Sync + 'static>),
    /// The endpoint returned a boolean where solutions were expected.
    #[error("The SPARQL endpoint returned a boolean result for a SELECT query")]
    UnexpectedBoolean,
}

impl RemoteExecutionError {
    pub fn transport(error: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self::Transport(error.into())
    }

    pub fn results(error: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self::Results(error.into())
    }
}
