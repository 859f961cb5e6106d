//! Turns triple patterns into SELECT queries and maps result rows back to terms.

mod graphdb;
mod standard;

pub use graphdb::{GraphDbQuerySynthesizer, GRAPHDB_ENTITY_ID, SURROGATE_NAMESPACE};
pub use standard::StandardQuerySynthesizer;

use sparql_slurper_model::{
    BlankNodeMode, InvalidTermError, NamedNode, Term, TriplePattern, TriplePosition, WireRow,
};
use std::fmt::Debug;

/// Restricts synthesized queries to named graphs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GraphScope {
    /// Queries match the default graph of the endpoint.
    #[default]
    Unscoped,
    /// Queries match triples in any named graph (`GRAPH ?g { ... }`).
    AnyGraph,
    /// Queries match triples in the given named graph.
    Named(NamedNode),
}

/// The family of endpoints that queries are written for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum QueryDialect {
    /// Plain SPARQL 1.1.
    #[default]
    Standard,
    /// GraphDB, which exposes stable internal identifiers for blank nodes.
    GraphDb,
}

impl QueryDialect {
    /// Creates the synthesizer for this dialect.
    pub fn synthesizer(self) -> Box<dyn QuerySynthesizer> {
        match self {
            QueryDialect::Standard => Box::new(StandardQuerySynthesizer),
            QueryDialect::GraphDb => Box::new(GraphDbQuerySynthesizer),
        }
    }
}

/// Builds the query for a pattern and interprets its result rows.
pub trait QuerySynthesizer: Debug + Send + Sync {
    /// Returns a `SELECT ?s ?p ?o` query for `pattern` within `scope`.
    ///
    /// Bound terms are inserted in their N-Triples encoding. Nothing else is escaped, so patterns
    /// must not be built from untrusted input.
    fn build_query(&self, pattern: &TriplePattern, scope: &GraphScope) -> String;

    /// Returns the term that `row` binds for the unbound `position`.
    fn resolve_term(
        &self,
        row: &WireRow,
        position: TriplePosition,
        blank_node_mode: BlankNodeMode,
    ) -> Result<Term, InvalidTermError> {
        row.binding(position)?.to_term(blank_node_mode)
    }
}

/// Renders a bound position as a term or an unbound one as its variable.
pub(crate) fn render_position(pattern: &TriplePattern, position: TriplePosition) -> String {
    match pattern.term(position) {
        Some(term) => term.to_string(),
        None => variable(position),
    }
}

pub(crate) fn variable(position: TriplePosition) -> String {
    format!("?{}", position.variable())
}

/// Wraps a group graph pattern body into a `GRAPH` block if the scope requires it.
pub(crate) fn scoped(body: &str, scope: &GraphScope) -> String {
    match scope {
        GraphScope::Unscoped => body.to_owned(),
        GraphScope::AnyGraph => format!("GRAPH ?g {{ {body} }}"),
        GraphScope::Named(graph) => format!("GRAPH {graph} {{ {body} }}"),
    }
}
