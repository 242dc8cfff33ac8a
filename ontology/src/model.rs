//! Core RDF data types: IRIs, nodes, literals, and triples.
//!
//! The graph is a plain set of triples over these values. Blank nodes are
//! numbered by the store that mints them, so a [`BlankId`] is only meaningful
//! within the graph that produced it.

use std::fmt;

use crate::vocab::owl;

/// An absolute IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(String);

impl Iri {
    /// Wraps an already-absolute IRI string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the underlying textual representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&Iri> for Iri {
    fn from(value: &Iri) -> Self {
        value.clone()
    }
}

/// Identifier of a blank node, local to one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankId(pub u64);

impl fmt::Display for BlankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// A resource that can appear in subject position: a named IRI or a blank node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Node {
    /// Named resource.
    Iri(Iri),
    /// Anonymous resource (restriction, intersection, list cell, axiom).
    Blank(BlankId),
}

impl Node {
    /// Returns the IRI if this node is named.
    #[must_use]
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Node::Iri(iri) => Some(iri),
            Node::Blank(_) => None,
        }
    }
}

impl From<Iri> for Node {
    fn from(iri: Iri) -> Self {
        Node::Iri(iri)
    }
}

impl From<&Iri> for Node {
    fn from(iri: &Iri) -> Self {
        Node::Iri(iri.clone())
    }
}

impl From<&str> for Node {
    fn from(iri: &str) -> Self {
        Node::Iri(Iri::new(iri))
    }
}

/// A typed literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    /// Lexical form.
    pub lexical: String,
    /// Full IRI of the datatype.
    pub datatype: &'static str,
}

impl Literal {
    /// An `xsd:string` literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            lexical: value.into(),
            datatype: owl::XSD_STRING,
        }
    }

    /// An `xsd:boolean` literal.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Self {
            lexical: value.to_string(),
            datatype: owl::XSD_BOOLEAN,
        }
    }
}

/// The object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Object {
    /// A resource.
    Node(Node),
    /// A literal value.
    Literal(Literal),
}

impl From<Node> for Object {
    fn from(node: Node) -> Self {
        Object::Node(node)
    }
}

impl From<Iri> for Object {
    fn from(iri: Iri) -> Self {
        Object::Node(Node::Iri(iri))
    }
}

impl From<&Iri> for Object {
    fn from(iri: &Iri) -> Self {
        Object::Node(Node::Iri(iri.clone()))
    }
}

impl From<&str> for Object {
    fn from(iri: &str) -> Self {
        Object::Node(Node::from(iri))
    }
}

impl From<Literal> for Object {
    fn from(lit: Literal) -> Self {
        Object::Literal(lit)
    }
}

/// A single RDF statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    /// Subject.
    pub subject: Node,
    /// Predicate IRI.
    pub predicate: Iri,
    /// Object.
    pub object: Object,
}

impl Triple {
    /// Builds a triple from anything convertible to its parts.
    pub fn new(
        subject: impl Into<Node>,
        predicate: impl Into<Iri>,
        object: impl Into<Object>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_datatypes() {
        assert_eq!(Literal::string("x").datatype, owl::XSD_STRING);
        let lit = Literal::boolean(true);
        assert_eq!(lit.lexical, "true");
        assert_eq!(lit.datatype, owl::XSD_BOOLEAN);
    }

    #[test]
    fn blank_ids_render_with_prefix() {
        assert_eq!(BlankId(7).to_string(), "b7");
    }

    #[test]
    fn node_as_iri() {
        let node = Node::from("http://example.org/a");
        assert_eq!(node.as_iri().map(Iri::as_str), Some("http://example.org/a"));
        assert!(Node::Blank(BlankId(0)).as_iri().is_none());
    }
}
