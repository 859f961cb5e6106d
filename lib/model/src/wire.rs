use crate::pattern::subject_from_term;
use crate::{BlankNodeMode, InvalidTermError, TriplePosition};
use oxrdf::{BlankNode, Literal, NamedNode, Subject, Term};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The kind of a binding in a query result row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WireTermKind {
    Iri,
    Blank,
    Literal,
}

impl FromStr for WireTermKind {
    type Err = InvalidTermError;

    /// Accepts the `type` spellings of the SPARQL 1.1 Query Results JSON Format.
    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "uri" | "iri" => Ok(Self::Iri),
            "bnode" | "blank" => Ok(Self::Blank),
            "literal" | "typed-literal" => Ok(Self::Literal),
            other => Err(InvalidTermError::UnsupportedKind(other.to_owned())),
        }
    }
}

impl Display for WireTermKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WireTermKind::Iri => "uri",
            WireTermKind::Blank => "bnode",
            WireTermKind::Literal => "literal",
        })
    }
}

/// A single, not yet validated, binding as it is returned by an endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WireTerm {
    pub kind: WireTermKind,
    pub value: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl WireTerm {
    pub fn iri(value: impl Into<String>) -> Self {
        Self {
            kind: WireTermKind::Iri,
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Self {
            kind: WireTermKind::Blank,
            value: label.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: WireTermKind::Literal,
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    #[must_use]
    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Converts the binding into a term.
    ///
    /// Blank nodes are only accepted in [BlankNodeMode::Persistent]. Labels that are not valid
    /// blank node identifiers, like Virtuoso's `nodeID://b10005`, are mapped to a valid one derived
    /// from the label, so the same label always gives the same node.
    pub fn to_term(&self, blank_node_mode: BlankNodeMode) -> Result<Term, InvalidTermError> {
        match self.kind {
            WireTermKind::Iri => named_node(&self.value).map(Term::from),
            WireTermKind::Blank => {
                if !blank_node_mode.is_persistent() {
                    return Err(InvalidTermError::EphemeralBlankNode {
                        label: self.value.clone(),
                    });
                }
                Ok(persistent_blank_node(&self.value).into())
            }
            WireTermKind::Literal => self.to_literal().map(Term::from),
        }
    }

    fn to_literal(&self) -> Result<Literal, InvalidTermError> {
        if let Some(language) = &self.language {
            return Literal::new_language_tagged_literal(self.value.as_str(), language.as_str())
                .map_err(|error| InvalidTermError::InvalidLanguageTag {
                    language: language.clone(),
                    error,
                });
        }
        match &self.datatype {
            Some(datatype) => Ok(Literal::new_typed_literal(
                self.value.as_str(),
                named_node(datatype)?,
            )),
            None => Ok(Literal::new_simple_literal(self.value.as_str())),
        }
    }
}

impl From<&Term> for WireTerm {
    fn from(term: &Term) -> Self {
        match term {
            Term::NamedNode(node) => Self::iri(node.as_str()),
            Term::BlankNode(node) => Self::blank(node.as_str()),
            Term::Literal(literal) => {
                let wire = Self::literal(literal.value());
                if let Some(language) = literal.language() {
                    wire.with_language(language)
                } else {
                    wire.with_datatype(literal.datatype().as_str())
                }
            }
            #[allow(unreachable_patterns, reason = "Only reachable with the rdf-star feature")]
            other => Self::literal(other.to_string()),
        }
    }
}

/// A result row mapping variable names (without `?`) to bindings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WireRow {
    bindings: HashMap<String, WireTerm>,
}

impl WireRow {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, variable: impl Into<String>, term: WireTerm) -> Self {
        self.insert(variable, term);
        self
    }

    pub fn insert(&mut self, variable: impl Into<String>, term: WireTerm) {
        self.bindings.insert(variable.into(), term);
    }

    pub fn get(&self, variable: &str) -> Option<&WireTerm> {
        self.bindings.get(variable)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns the binding of the variable standing for `position`.
    pub fn binding(&self, position: TriplePosition) -> Result<&WireTerm, InvalidTermError> {
        let variable = position.variable();
        self.get(variable)
            .ok_or_else(|| InvalidTermError::MissingBinding(variable.to_owned()))
    }
}

impl FromIterator<(String, WireTerm)> for WireRow {
    fn from_iter<T: IntoIterator<Item = (String, WireTerm)>>(iter: T) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// Checks that a term resolved for `position` can actually occupy it and returns the subject.
pub fn term_to_subject(term: Term) -> Result<Subject, InvalidTermError> {
    subject_from_term(term, TriplePosition::Subject)
}

/// Checks that a term resolved for the predicate position is an IRI.
pub fn term_to_predicate(term: Term) -> Result<NamedNode, InvalidTermError> {
    match term {
        Term::NamedNode(node) => Ok(node),
        other => Err(InvalidTermError::WrongPosition {
            term: other.to_string(),
            position: TriplePosition::Predicate,
        }),
    }
}

fn persistent_blank_node(label: &str) -> BlankNode {
    BlankNode::new(label)
        .unwrap_or_else(|_| BlankNode::new_unchecked(format!("x{}", hex::encode(label))))
}

fn named_node(iri: &str) -> Result<NamedNode, InvalidTermError> {
    NamedNode::new(iri).map_err(|error| InvalidTermError::InvalidIri {
        iri: iri.to_owned(),
        error,
    })
}
