mod blank_node_mode;
mod error;
mod pattern;
mod wire;

pub use blank_node_mode::BlankNodeMode;
pub use error::*;
pub use pattern::{TriplePattern, TriplePosition};
pub use wire::{term_to_predicate, term_to_subject, WireRow, WireTerm, WireTermKind};

// Re-export some oxrdf types.
pub use oxiri::Iri;
pub use oxrdf::vocab;
pub use oxrdf::{
    BlankNode, BlankNodeRef, IriParseError, Literal, LiteralRef, NamedNode, NamedNodeRef,
    NamedOrBlankNode, Subject, SubjectRef, Term, TermParseError, TermRef, Triple, TripleRef,
};
