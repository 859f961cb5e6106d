use crate::synthesizer::{render_position, scoped, GraphScope, QuerySynthesizer};
use sparql_slurper_model::{TriplePattern, TriplePosition};

/// Synthesizes plain SPARQL 1.1 queries.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardQuerySynthesizer;

impl QuerySynthesizer for StandardQuerySynthesizer {
    fn build_query(&self, pattern: &TriplePattern, scope: &GraphScope) -> String {
        let [subject, predicate, object] =
            TriplePosition::ALL.map(|position| render_position(pattern, position));
        let body = scoped(&format!("{subject} {predicate} {object}"), scope);
        format!("SELECT ?s ?p ?o {{{body}}}")
    }
}
