use crate::error::StorageError;
use sparql_slurper_model::{Triple, TriplePattern};

/// The local triple collection that accumulates everything fetched from an endpoint.
///
/// The storage is owned by a single graph and is never shared, hence the `&mut self` receivers.
#[allow(
    clippy::len_without_is_empty,
    reason = "Emptiness is exposed by the graph that owns the storage"
)]
pub trait TripleStorage: Send {
    /// Adds the given triple. Returns `true` if it was not already in the storage.
    fn insert(&mut self, triple: Triple) -> Result<bool, StorageError>;

    /// Returns every stored triple that matches `pattern`.
    fn triples_for_pattern(&self, pattern: &TriplePattern) -> Result<Vec<Triple>, StorageError>;

    /// Returns the number of stored triples.
    fn len(&self) -> usize;
}
