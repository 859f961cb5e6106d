use crate::synthesizer::{render_position, scoped, variable, GraphScope, QuerySynthesizer};
use sparql_slurper_model::{
    BlankNodeMode, InvalidTermError, NamedNode, Term, TriplePattern, TriplePosition, WireRow,
    WireTermKind,
};

/// The GraphDB predicate that binds a resource to its internal entity identifier.
pub const GRAPHDB_ENTITY_ID: &str = "http://www.ontotext.com/owlim/entity#id";

/// The namespace of the IRIs minted for blank nodes that have a GraphDB entity identifier.
///
/// `urn:sparql-slurper:bnode:1234` stands for the blank node with the entity id `1234`.
pub const SURROGATE_NAMESPACE: &str = "urn:sparql-slurper:bnode:";

/// Synthesizes queries for GraphDB endpoints.
///
/// Besides the triple pattern, queries request the entity identifiers of the subject and the object
/// (`?sid` and `?oid`). Blank nodes returned together with an identifier are replaced by a stable
/// IRI in [SURROGATE_NAMESPACE]; when such an IRI is used in a later pattern, the query selects the
/// resource by its identifier again. The predicate position never carries identifiers.
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphDbQuerySynthesizer;

impl GraphDbQuerySynthesizer {
    /// Mints the surrogate IRI for an entity identifier.
    pub fn surrogate(id: &str) -> Result<NamedNode, InvalidTermError> {
        let iri = format!("{SURROGATE_NAMESPACE}{id}");
        NamedNode::new(iri.as_str()).map_err(|error| InvalidTermError::InvalidIri { iri, error })
    }

    /// Returns the entity identifier of a surrogate IRI.
    pub fn surrogate_id(node: &NamedNode) -> Option<&str> {
        node.as_str()
            .strip_prefix(SURROGATE_NAMESPACE)
            .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
    }

    /// Renders `position` and, if needed, the clause that binds its entity identifier.
    fn render_with_id(pattern: &TriplePattern, position: TriplePosition) -> (String, Option<String>) {
        let var = variable(position);
        match pattern.term(position) {
            None => {
                let clause = format!("{var} <{GRAPHDB_ENTITY_ID}> {var}id .");
                (var, Some(clause))
            }
            Some(Term::NamedNode(node)) => match Self::surrogate_id(&node) {
                Some(id) => {
                    let clause = format!("{var} <{GRAPHDB_ENTITY_ID}> {id} .");
                    (var, Some(clause))
                }
                None => (node.to_string(), None),
            },
            Some(term) => (term.to_string(), None),
        }
    }

    fn id_variable(position: TriplePosition) -> Option<String> {
        match position {
            TriplePosition::Predicate => None,
            TriplePosition::Subject | TriplePosition::Object => {
                Some(format!("{}id", position.variable()))
            }
        }
    }
}

impl QuerySynthesizer for GraphDbQuerySynthesizer {
    fn build_query(&self, pattern: &TriplePattern, scope: &GraphScope) -> String {
        let (subject, subject_id) = Self::render_with_id(pattern, TriplePosition::Subject);
        let predicate = render_position(pattern, TriplePosition::Predicate);
        let (object, object_id) = Self::render_with_id(pattern, TriplePosition::Object);

        let mut body = format!("{subject} {predicate} {object} .");
        for clause in [subject_id, object_id].into_iter().flatten() {
            body.push(' ');
            body.push_str(&clause);
        }
        let body = scoped(&body, scope);
        format!("SELECT ?s ?p ?o ?sid ?oid {{{body}}}")
    }

    fn resolve_term(
        &self,
        row: &WireRow,
        position: TriplePosition,
        blank_node_mode: BlankNodeMode,
    ) -> Result<Term, InvalidTermError> {
        let binding = row.binding(position)?;
        if binding.kind == WireTermKind::Blank {
            let id = Self::id_variable(position).and_then(|variable| row.get(&variable));
            if let Some(id) = id {
                return Self::surrogate(&id.value).map(Term::from);
            }
        }
        binding.to_term(blank_node_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use sparql_slurper_model::{Literal, WireTerm};

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.org/{local}"))
    }

    #[test]
    fn wildcard_requests_both_identifiers() {
        let query =
            GraphDbQuerySynthesizer.build_query(&TriplePattern::wildcard(), &GraphScope::Unscoped);
        assert_snapshot!(query, @"SELECT ?s ?p ?o ?sid ?oid {?s ?p ?o . ?s <http://www.ontotext.com/owlim/entity#id> ?sid . ?o <http://www.ontotext.com/owlim/entity#id> ?oid .}");
    }

    #[test]
    fn bound_subject_only_requests_object_identifier() {
        let pattern = TriplePattern::new(Some(ex("pat4")), Some(ex("birthDate")), None::<Term>);
        let query = GraphDbQuerySynthesizer.build_query(&pattern, &GraphScope::Unscoped);
        assert_snapshot!(query, @"SELECT ?s ?p ?o ?sid ?oid {<http://example.org/pat4> <http://example.org/birthDate> ?o . ?o <http://www.ontotext.com/owlim/entity#id> ?oid .}");
    }

    #[test]
    fn surrogate_subject_is_selected_by_identifier() {
        let surrogate = GraphDbQuerySynthesizer::surrogate("1234").unwrap();
        let pattern = TriplePattern::new(Some(surrogate), Some(ex("value")), None::<Term>);
        let query = GraphDbQuerySynthesizer.build_query(&pattern, &GraphScope::Unscoped);
        assert_snapshot!(query, @"SELECT ?s ?p ?o ?sid ?oid {?s <http://example.org/value> ?o . ?s <http://www.ontotext.com/owlim/entity#id> 1234 . ?o <http://www.ontotext.com/owlim/entity#id> ?oid .}");
    }

    #[test]
    fn scoped_query() {
        let pattern = TriplePattern::new(
            Some(ex("s")),
            Some(ex("p")),
            Some(Literal::from("x")),
        );
        let query = GraphDbQuerySynthesizer.build_query(&pattern, &GraphScope::Named(ex("g")));
        assert_snapshot!(query, @r#"SELECT ?s ?p ?o ?sid ?oid {GRAPH <http://example.org/g> { <http://example.org/s> <http://example.org/p> "x" . }}"#);
    }

    #[test]
    fn surrogate_id_requires_digits() {
        assert_eq!(
            GraphDbQuerySynthesizer::surrogate_id(&NamedNode::new_unchecked(format!(
                "{SURROGATE_NAMESPACE}42"
            ))),
            Some("42")
        );
        assert_eq!(
            GraphDbQuerySynthesizer::surrogate_id(&NamedNode::new_unchecked(format!(
                "{SURROGATE_NAMESPACE}x"
            ))),
            None
        );
        assert_eq!(GraphDbQuerySynthesizer::surrogate_id(&ex("42")), None);
    }

    #[test]
    fn blank_node_with_identifier_becomes_surrogate() {
        let row = WireRow::new()
            .with("o", WireTerm::blank("node1"))
            .with(
                "oid",
                WireTerm::literal("1234")
                    .with_datatype("http://www.w3.org/2001/XMLSchema#long"),
            );
        let term = GraphDbQuerySynthesizer
            .resolve_term(&row, TriplePosition::Object, BlankNodeMode::Reject)
            .unwrap();
        assert_eq!(
            term,
            NamedNode::new_unchecked("urn:sparql-slurper:bnode:1234").into()
        );
    }

    #[test]
    fn blank_node_without_identifier_is_rejected() {
        let row = WireRow::new().with("s", WireTerm::blank("node1"));
        let result =
            GraphDbQuerySynthesizer.resolve_term(&row, TriplePosition::Subject, BlankNodeMode::Reject);
        assert!(matches!(
            result,
            Err(InvalidTermError::EphemeralBlankNode { .. })
        ));
    }

    #[test]
    fn iris_ignore_identifiers() {
        let row = WireRow::new()
            .with("s", WireTerm::iri("http://example.org/s"))
            .with("sid", WireTerm::literal("7"));
        let term = GraphDbQuerySynthesizer
            .resolve_term(&row, TriplePosition::Subject, BlankNodeMode::Reject)
            .unwrap();
        assert_eq!(term, ex("s").into());
    }
}
