use crate::{InvalidTermError, MalformedPatternError};
use oxrdf::{NamedNode, Subject, Term, Triple};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The three positions of a triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriplePosition {
    Subject,
    Predicate,
    Object,
}

impl TriplePosition {
    pub const ALL: [TriplePosition; 3] = [
        TriplePosition::Subject,
        TriplePosition::Predicate,
        TriplePosition::Object,
    ];

    /// Returns the name of the variable that stands for this position in synthesized queries.
    pub fn variable(self) -> &'static str {
        match self {
            TriplePosition::Subject => "s",
            TriplePosition::Predicate => "p",
            TriplePosition::Object => "o",
        }
    }
}

impl Display for TriplePosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TriplePosition::Subject => "subject",
            TriplePosition::Predicate => "predicate",
            TriplePosition::Object => "object",
        })
    }
}

/// A triple pattern where every position is either bound to a term or a wildcard (`None`).
///
/// The types of the positions guarantee that a pattern can always be turned into a valid query:
/// literals cannot be subjects and predicates are always IRIs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: Option<Subject>,
    pub predicate: Option<NamedNode>,
    pub object: Option<Term>,
}

impl TriplePattern {
    pub fn new(
        subject: Option<impl Into<Subject>>,
        predicate: Option<impl Into<NamedNode>>,
        object: Option<impl Into<Term>>,
    ) -> Self {
        Self {
            subject: subject.map(Into::into),
            predicate: predicate.map(Into::into),
            object: object.map(Into::into),
        }
    }

    /// The pattern `(?s ?p ?o)` that matches every triple.
    pub fn wildcard() -> Self {
        Self::default()
    }

    /// Parses a pattern from N-Triples encoded terms. `None` and `"?"`-prefixed variables are
    /// wildcards.
    pub fn parse(
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
    ) -> Result<Self, MalformedPatternError> {
        let subject = parse_position(subject, TriplePosition::Subject)?
            .map(|term| subject_from_term(term, TriplePosition::Subject))
            .transpose()?;
        let predicate = parse_position(predicate, TriplePosition::Predicate)?
            .map(|term| match term {
                Term::NamedNode(node) => Ok(node),
                other => Err(InvalidTermError::WrongPosition {
                    term: other.to_string(),
                    position: TriplePosition::Predicate,
                }),
            })
            .transpose()?;
        let object = parse_position(object, TriplePosition::Object)?;
        Ok(Self {
            subject,
            predicate,
            object,
        })
    }

    pub fn is_wildcard(&self) -> bool {
        self.subject.is_none() && self.predicate.is_none() && self.object.is_none()
    }

    /// Returns the bound term of `position`, if any.
    pub fn term(&self, position: TriplePosition) -> Option<Term> {
        match position {
            TriplePosition::Subject => self.subject.clone().map(Term::from),
            TriplePosition::Predicate => self.predicate.clone().map(Term::from),
            TriplePosition::Object => self.object.clone(),
        }
    }

    /// Returns whether every bound position of `self` is equal to the same position of `triple`.
    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject.as_ref().map_or(true, |s| *s == triple.subject)
            && self.predicate.as_ref().map_or(true, |p| *p == triple.predicate)
            && self.object.as_ref().map_or(true, |o| *o == triple.object)
    }

    /// Returns whether `self` is structurally covered by `general`.
    ///
    /// Every position of `general` must either be a wildcard or be equal to the same position of
    /// `self`. This does not look at actual data, so `(<s> ?p ?o)` is not covered by the union of
    /// all `(<s> <p_i> ?o)` patterns.
    pub fn is_subsumed_by(&self, general: &TriplePattern) -> bool {
        (general.subject.is_none() || general.subject == self.subject)
            && (general.predicate.is_none() || general.predicate == self.predicate)
            && (general.object.is_none() || general.object == self.object)
    }
}

impl Display for TriplePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("(")?;
        match &self.subject {
            Some(subject) => write!(f, "{subject}")?,
            None => f.write_str("?s")?,
        }
        match &self.predicate {
            Some(predicate) => write!(f, " {predicate}")?,
            None => f.write_str(" ?p")?,
        }
        match &self.object {
            Some(object) => write!(f, " {object}")?,
            None => f.write_str(" ?o")?,
        }
        f.write_str(")")
    }
}

/// Converts a term into a triple subject.
pub(crate) fn subject_from_term(
    term: Term,
    position: TriplePosition,
) -> Result<Subject, InvalidTermError> {
    match term {
        Term::NamedNode(node) => Ok(node.into()),
        Term::BlankNode(node) => Ok(node.into()),
        other => Err(InvalidTermError::WrongPosition {
            term: other.to_string(),
            position,
        }),
    }
}

fn parse_position(
    value: Option<&str>,
    position: TriplePosition,
) -> Result<Option<Term>, MalformedPatternError> {
    let Some(value) = value.map(str::trim) else {
        return Ok(None);
    };
    if value.is_empty() || value.starts_with('?') {
        return Ok(None);
    }
    Term::from_str(value)
        .map(Some)
        .map_err(|error| MalformedPatternError::Syntax { position, error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{Literal, NamedNodeRef};

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.org/{local}"))
    }

    #[test]
    fn wildcard_is_wildcard() {
        assert!(TriplePattern::wildcard().is_wildcard());
        assert!(!TriplePattern::new(Some(ex("s")), None::<NamedNode>, None::<Term>).is_wildcard());
    }

    #[test]
    fn subsumption_is_positional() {
        let specific = TriplePattern::new(Some(ex("s1")), Some(ex("p1")), Some(ex("o1")));
        let by_subject = TriplePattern::new(Some(ex("s1")), None::<NamedNode>, None::<Term>);
        let by_other_subject = TriplePattern::new(Some(ex("s2")), None::<NamedNode>, None::<Term>);

        assert!(specific.is_subsumed_by(&specific));
        assert!(specific.is_subsumed_by(&by_subject));
        assert!(!specific.is_subsumed_by(&by_other_subject));
        assert!(!by_subject.is_subsumed_by(&specific));
    }

    #[test]
    fn literal_objects_compare_with_datatype() {
        let int = TriplePattern::new(
            None::<NamedNode>,
            Some(ex("p")),
            Some(Literal::from(117)),
        );
        let string = TriplePattern::new(
            None::<NamedNode>,
            Some(ex("p")),
            Some(Literal::new_simple_literal("117")),
        );
        assert!(!int.is_subsumed_by(&string));
    }

    #[test]
    fn matches_triple() {
        let triple = Triple::new(ex("s"), ex("p"), Literal::from("Steam"));
        let pattern = TriplePattern::new(
            None::<NamedNode>,
            Some(ex("p")),
            Some(Literal::from("Steam")),
        );
        assert!(pattern.matches(&triple));
        assert!(TriplePattern::wildcard().matches(&triple));
        assert!(!TriplePattern::new(Some(ex("o")), None::<NamedNode>, None::<Term>).matches(&triple));
    }

    #[test]
    fn parse_pattern() {
        let pattern =
            TriplePattern::parse(Some("<http://example.org/s>"), Some("?p"), Some("\"Gas\""))
                .unwrap();
        assert_eq!(pattern.subject, Some(ex("s").into()));
        assert_eq!(pattern.predicate, None);
        assert_eq!(pattern.object, Some(Literal::from("Gas").into()));
    }

    #[test]
    fn parse_rejects_literal_subject() {
        let result = TriplePattern::parse(Some("\"Gas\""), None, None);
        assert!(matches!(
            result,
            Err(MalformedPatternError::Term(InvalidTermError::WrongPosition {
                position: TriplePosition::Subject,
                ..
            }))
        ));
    }

    #[test]
    fn parse_rejects_blank_predicate() {
        let result = TriplePattern::parse(None, Some("_:b1"), None);
        assert!(matches!(result, Err(MalformedPatternError::Term(_))));
    }

    #[test]
    fn parse_rejects_garbage() {
        let result = TriplePattern::parse(None, None, Some("<not closed"));
        assert!(matches!(
            result,
            Err(MalformedPatternError::Syntax {
                position: TriplePosition::Object,
                ..
            })
        ));
    }

    #[test]
    fn display_pattern() {
        let pattern = TriplePattern::new(
            Some(NamedNodeRef::new_unchecked("http://example.org/s").into_owned()),
            None::<NamedNode>,
            Some(Literal::from("Gas")),
        );
        assert_eq!(pattern.to_string(), "(<http://example.org/s> ?p \"Gas\")");
    }
}
