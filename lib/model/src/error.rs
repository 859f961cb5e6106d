use crate::TriplePosition;
use oxiri::IriParseError;
use oxrdf::{LanguageTagParseError, TermParseError};
use thiserror::Error;

/// An error raised while turning a binding returned by an endpoint into an RDF term.
///
/// These errors are fatal for the pattern match that received the binding.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvalidTermError {
    /// The endpoint returned a blank node, but blank node labels are not stable across queries.
    #[error(
        "The endpoint returned the blank node _:{label} while persistent blank nodes are disabled"
    )]
    EphemeralBlankNode { label: String },
    /// A row lacks a binding for a variable of an unbound position.
    #[error("The result row has no binding for ?{0}")]
    MissingBinding(String),
    /// The `type` of a binding is not one of `uri`, `bnode` or `literal`.
    #[error("Unsupported binding type '{0}'")]
    UnsupportedKind(String),
    #[error("Invalid IRI '{iri}': {error}")]
    InvalidIri {
        iri: String,
        #[source]
        error: IriParseError,
    },
    #[error("Invalid language tag '{language}': {error}")]
    InvalidLanguageTag {
        language: String,
        #[source]
        error: LanguageTagParseError,
    },
    /// The term cannot occupy the given position of a triple (e.g. a literal as subject).
    #[error("{term} is not allowed in the {position} position of a triple")]
    WrongPosition {
        term: String,
        position: TriplePosition,
    },
}

/// An error raised while building a [TriplePattern](crate::TriplePattern) from textual terms.
///
/// Patterns built from typed terms cannot be malformed, hence this error only shows up at the
/// boundaries where terms are parsed (e.g. command line arguments).
#[derive(Debug, Error)]
pub enum MalformedPatternError {
    #[error("Invalid term in the {position} position: {error}")]
    Syntax {
        position: TriplePosition,
        #[source]
        error: TermParseError,
    },
    #[error(transparent)]
    Term(#[from] InvalidTermError),
}
