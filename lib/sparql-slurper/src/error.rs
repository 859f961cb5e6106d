use sparql_slurper_common::error::{RemoteExecutionError, StorageError};
use sparql_slurper_model::{InvalidTermError, IriParseError};
use std::io;

/// An error raised while matching a pattern against a [SlurpyGraph](crate::SlurpyGraph).
#[derive(Debug, thiserror::Error)]
pub enum SlurpError {
    /// The endpoint URL could not be parsed.
    #[error("Invalid endpoint URL '{url}': {error}")]
    InvalidEndpoint {
        url: String,
        #[source]
        error: url::ParseError,
    },
    /// A binding returned by the endpoint cannot be used as a term.
    #[error(transparent)]
    InvalidTerm(#[from] InvalidTermError),
    /// The query could not be executed.
    #[error(transparent)]
    RemoteExecution(#[from] RemoteExecutionError),
    /// The local storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// An error raised while writing the content of a [SlurpyGraph](crate::SlurpyGraph).
#[derive(Debug, thiserror::Error)]
pub enum SerializerError {
    /// An error raised while writing the content.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A namespace binding is not a valid IRI.
    #[error("Invalid namespace for prefix '{prefix}': {error}")]
    InvalidPrefix {
        prefix: String,
        #[source]
        error: IriParseError,
    },
    /// An error raised while reading the local triples.
    #[error(transparent)]
    Lookup(#[from] SlurpError),
}
