//! Artifact validators.
//!
//! The syntax validators ([`rdf`], [`rdfxml`], [`jsonld`]) each check one
//! serialization and, when it is well formed, hand back its statements with
//! every IRI expanded. [`vocabulary`] checks those statements against the
//! fixed CCF vocabulary, whatever the format they came from.

pub mod jsonld;
pub mod rdf;
pub mod rdfxml;
pub mod vocabulary;

/// One statement read back from an artifact.
///
/// Terms are rendered as text: IRIs expanded in full, literals by their
/// lexical form, blank nodes as `_:label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Subject IRI or blank node label.
    pub subject: String,
    /// Predicate IRI.
    pub predicate: String,
    /// Object IRI, blank node label, or literal lexical form.
    pub object: String,
}

impl Statement {
    /// Builds a statement from its three rendered terms.
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}
