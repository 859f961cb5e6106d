use oxrdf::Graph;
use sparql_slurper_common::error::StorageError;
use sparql_slurper_common::TripleStorage;
use sparql_slurper_model::{Triple, TriplePattern, TripleRef};

/// An in-memory [TripleStorage] backed by an indexed [Graph].
///
/// Lookups use the index of the most selective bound position (subject, then object, then
/// predicate) and filter the remaining positions.
#[derive(Debug, Default, Clone)]
pub struct MemTripleStorage {
    graph: Graph,
}

impl MemTripleStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the underlying graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn candidates<'a>(
        &'a self,
        pattern: &'a TriplePattern,
    ) -> Box<dyn Iterator<Item = TripleRef<'a>> + 'a> {
        if let Some(subject) = &pattern.subject {
            Box::new(self.graph.triples_for_subject(subject))
        } else if let Some(object) = &pattern.object {
            Box::new(self.graph.triples_for_object(object))
        } else if let Some(predicate) = &pattern.predicate {
            Box::new(self.graph.triples_for_predicate(predicate))
        } else {
            Box::new(self.graph.iter())
        }
    }
}

impl TripleStorage for MemTripleStorage {
    fn insert(&mut self, triple: Triple) -> Result<bool, StorageError> {
        Ok(self.graph.insert(&triple))
    }

    fn triples_for_pattern(&self, pattern: &TriplePattern) -> Result<Vec<Triple>, StorageError> {
        Ok(self
            .candidates(pattern)
            .map(TripleRef::into_owned)
            .filter(|triple| pattern.matches(triple))
            .collect())
    }

    fn len(&self) -> usize {
        self.graph.len()
    }
}
