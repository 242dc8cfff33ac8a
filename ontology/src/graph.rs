//! The graph store the mutation engine writes into.
//!
//! [`GraphStore`] is the narrow surface the engine needs: add triples, mint
//! blank nodes, build OWL restriction/intersection/axiom structures, and
//! serialize. [`MemoryGraph`] is the in-memory implementation: an
//! insertion-ordered, de-duplicated triple list.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use crate::error::Result;
use crate::model::{BlankId, Iri, Literal, Node, Object, Triple};
use crate::serializer::{self, Format};
use crate::vocab::owl;

/// Append-only triple store used by the mutation engine.
pub trait GraphStore {
    /// Adds a triple. Returns false if it was already present.
    fn add_triple(&mut self, triple: Triple) -> bool;

    /// Removes every triple with this subject and predicate.
    fn remove_matching(&mut self, subject: &Node, predicate: &Iri);

    /// Returns true if the triple is present.
    fn contains(&self, triple: &Triple) -> bool;

    /// All triples in insertion order.
    fn triples(&self) -> &[Triple];

    /// Mints a fresh blank node.
    fn new_blank_node(&mut self) -> Node;

    /// Returns the `property some filler` restriction node.
    fn existential_restriction(&mut self, property: &str, filler: Node) -> Node;

    /// Returns an anonymous class that is the intersection of `members`.
    fn boolean_intersection(&mut self, members: Vec<Node>) -> Node;

    /// Returns an `owl:Axiom` node reifying `(source, property, target)`.
    fn reified_axiom(&mut self, source: &Iri, property: &str, target: Node) -> Node;

    /// Declares `iri` as an `owl:Class`.
    fn add_class(&mut self, iri: &Iri) {
        self.add_triple(Triple::new(iri, owl::RDF_TYPE, owl::CLASS));
    }

    /// Asserts `iri rdfs:subClassOf target`.
    fn add_subclass_of(&mut self, iri: &Iri, target: impl Into<Node>) {
        self.add_triple(Triple::new(iri, owl::RDFS_SUBCLASS_OF, target.into()));
    }

    /// Adds an annotation triple, keeping any existing values.
    fn add_annotation(&mut self, subject: impl Into<Node>, property: &str, value: impl Into<Object>) {
        self.add_triple(Triple::new(subject, property, value));
    }

    /// Replaces every value of `property` on `subject` with `value`.
    fn set_annotation(&mut self, subject: impl Into<Node>, property: &str, value: impl Into<Object>) {
        let subject = subject.into();
        let property = Iri::new(property);
        self.remove_matching(&subject, &property);
        self.add_triple(Triple::new(subject, property, value));
    }

    /// Writes the graph in `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph cannot be expressed in `format` or the
    /// writer fails.
    fn serialize(&self, format: Format, destination: &mut dyn Write) -> Result<()> {
        let text = serializer::serialize(self.triples(), format)?;
        destination.write_all(text.as_bytes())?;
        Ok(())
    }
}

/// In-memory [`GraphStore`].
///
/// Restrictions, intersections and reified axioms are memoised on their
/// structure, so building the same expression twice yields the same blank
/// node and no new triples. Values are also indexed by `(subject,
/// predicate)`, so lookups and replacing an annotation with its current
/// value never scan the triple list.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    triples: Vec<Triple>,
    index: HashSet<Triple>,
    values: HashMap<(Node, Iri), Vec<Object>>,
    next_blank: u64,
    restrictions: HashMap<(Iri, Node), Node>,
    intersections: HashMap<Vec<Node>, Node>,
    axioms: HashMap<(Iri, Iri, Node), Node>,
}

impl MemoryGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if the graph holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// All objects of `(subject, predicate, ?)`.
    pub fn objects<'a>(
        &'a self,
        subject: &'a Node,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Object> + 'a {
        self.values
            .get(&(subject.clone(), Iri::new(predicate)))
            .into_iter()
            .flatten()
    }

    /// All triples whose predicate is `predicate`.
    pub fn with_predicate<'a>(&'a self, predicate: &'a str) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.predicate.as_str() == predicate)
    }

    /// Returns true if `iri` appears as the subject of any triple.
    #[must_use]
    pub fn has_subject(&self, iri: &str) -> bool {
        self.triples
            .iter()
            .any(|t| t.subject.as_iri().is_some_and(|s| s.as_str() == iri))
    }

    fn list(&mut self, members: &[Node]) -> Node {
        let mut head = Node::from(owl::RDF_NIL);
        for member in members.iter().rev() {
            let cell = self.new_blank_node();
            self.add_triple(Triple::new(cell.clone(), owl::RDF_FIRST, member.clone()));
            self.add_triple(Triple::new(cell.clone(), owl::RDF_REST, head));
            head = cell;
        }
        head
    }
}

impl GraphStore for MemoryGraph {
    fn add_triple(&mut self, triple: Triple) -> bool {
        if self.index.contains(&triple) {
            return false;
        }
        self.index.insert(triple.clone());
        self.values
            .entry((triple.subject.clone(), triple.predicate.clone()))
            .or_default()
            .push(triple.object.clone());
        self.triples.push(triple);
        true
    }

    fn remove_matching(&mut self, subject: &Node, predicate: &Iri) {
        let Some(objects) = self.values.remove(&(subject.clone(), predicate.clone())) else {
            return;
        };
        for object in objects {
            self.index
                .remove(&Triple::new(subject.clone(), predicate, object));
        }
        self.triples
            .retain(|t| !(&t.subject == subject && &t.predicate == predicate));
    }

    fn set_annotation(&mut self, subject: impl Into<Node>, property: &str, value: impl Into<Object>) {
        let subject = subject.into();
        let property = Iri::new(property);
        let value = value.into();
        let key = (subject, property);
        if self.values.get(&key).is_some_and(|v| v.len() == 1 && v[0] == value) {
            return;
        }
        let (subject, property) = key;
        self.remove_matching(&subject, &property);
        self.add_triple(Triple::new(subject, property, value));
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.index.contains(triple)
    }

    fn triples(&self) -> &[Triple] {
        &self.triples
    }

    fn new_blank_node(&mut self) -> Node {
        let id = BlankId(self.next_blank);
        self.next_blank += 1;
        Node::Blank(id)
    }

    fn existential_restriction(&mut self, property: &str, filler: Node) -> Node {
        let key = (Iri::new(property), filler);
        if let Some(node) = self.restrictions.get(&key) {
            return node.clone();
        }
        let node = self.new_blank_node();
        self.add_triple(Triple::new(node.clone(), owl::RDF_TYPE, owl::RESTRICTION));
        self.add_triple(Triple::new(node.clone(), owl::ON_PROPERTY, property));
        self.add_triple(Triple::new(node.clone(), owl::SOME_VALUES_FROM, key.1.clone()));
        self.restrictions.insert(key, node.clone());
        node
    }

    fn boolean_intersection(&mut self, members: Vec<Node>) -> Node {
        if let Some(node) = self.intersections.get(&members) {
            return node.clone();
        }
        let node = self.new_blank_node();
        let list = self.list(&members);
        self.add_triple(Triple::new(node.clone(), owl::RDF_TYPE, owl::CLASS));
        self.add_triple(Triple::new(node.clone(), owl::INTERSECTION_OF, list));
        self.intersections.insert(members, node.clone());
        node
    }

    fn reified_axiom(&mut self, source: &Iri, property: &str, target: Node) -> Node {
        let key = (source.clone(), Iri::new(property), target);
        if let Some(node) = self.axioms.get(&key) {
            return node.clone();
        }
        let node = self.new_blank_node();
        self.add_triple(Triple::new(node.clone(), owl::RDF_TYPE, owl::AXIOM));
        self.add_triple(Triple::new(node.clone(), owl::ANNOTATED_SOURCE, source));
        self.add_triple(Triple::new(node.clone(), owl::ANNOTATED_PROPERTY, property));
        self.add_triple(Triple::new(node.clone(), owl::ANNOTATED_TARGET, key.2.clone()));
        self.axioms.insert(key, node.clone());
        node
    }
}

/// Convenience: a string literal object.
pub(crate) fn text(value: impl Into<String>) -> Object {
    Object::Literal(Literal::string(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "http://example.org/A";
    const P: &str = "http://example.org/p";

    #[test]
    fn duplicate_triples_are_ignored() {
        let mut g = MemoryGraph::new();
        assert!(g.add_triple(Triple::new(A, P, text("x"))));
        assert!(!g.add_triple(Triple::new(A, P, text("x"))));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn set_annotation_replaces_previous_values() {
        let mut g = MemoryGraph::new();
        g.add_annotation(A, P, "http://example.org/B");
        g.add_annotation(A, P, "http://example.org/C");
        g.set_annotation(A, P, "http://example.org/D");
        let subject = Node::from(A);
        let values: Vec<_> = g.objects(&subject, P).collect();
        assert_eq!(values, vec![&Object::from("http://example.org/D")]);
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn set_annotation_keeps_insertion_order_and_index_in_step() {
        let mut g = MemoryGraph::new();
        g.add_annotation(A, P, text("first"));
        g.add_annotation("http://example.org/B", P, text("other"));
        g.set_annotation(A, P, text("second"));
        g.set_annotation(A, P, text("second"));
        assert_eq!(g.len(), 2);
        assert_eq!(g.triples()[0].subject, Node::from("http://example.org/B"));
        assert!(!g.contains(&Triple::new(A, P, text("first"))));
        assert!(g.contains(&Triple::new(A, P, text("second"))));

        // a removed value can be added back
        g.set_annotation(A, P, text("first"));
        assert!(g.contains(&Triple::new(A, P, text("first"))));
        let subject = Node::from(A);
        assert_eq!(g.objects(&subject, P).count(), 1);
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn remove_matching_on_absent_key_is_a_no_op() {
        let mut g = MemoryGraph::new();
        g.add_annotation(A, P, text("x"));
        g.remove_matching(&Node::from("http://example.org/B"), &Iri::new(P));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn restriction_structure() {
        let mut g = MemoryGraph::new();
        let r = g.existential_restriction(P, Node::from(A));
        assert!(g.contains(&Triple::new(r.clone(), owl::RDF_TYPE, owl::RESTRICTION)));
        assert!(g.contains(&Triple::new(r.clone(), owl::ON_PROPERTY, P)));
        assert!(g.contains(&Triple::new(r, owl::SOME_VALUES_FROM, A)));
    }

    #[test]
    fn restrictions_are_memoised() {
        let mut g = MemoryGraph::new();
        let first = g.existential_restriction(P, Node::from(A));
        let len = g.len();
        let second = g.existential_restriction(P, Node::from(A));
        assert_eq!(first, second);
        assert_eq!(g.len(), len);
    }

    #[test]
    fn intersection_builds_rdf_list() {
        let mut g = MemoryGraph::new();
        let members = vec![Node::from(A), Node::from("http://example.org/B")];
        let node = g.boolean_intersection(members);
        let subject = node.clone();
        let list = g
            .objects(&subject, owl::INTERSECTION_OF)
            .next()
            .cloned()
            .and_then(|o| match o {
                Object::Node(n) => Some(n),
                Object::Literal(_) => None,
            });
        let Some(head) = list else {
            panic!("intersection without list");
        };
        let firsts: Vec<_> = g.objects(&head, owl::RDF_FIRST).collect();
        assert_eq!(firsts, vec![&Object::from(A)]);
        assert_eq!(g.with_predicate(owl::RDF_FIRST).count(), 2);
        assert_eq!(g.with_predicate(owl::RDF_REST).count(), 2);
    }

    #[test]
    fn reified_axiom_structure() {
        let mut g = MemoryGraph::new();
        let target = g.new_blank_node();
        let ax = g.reified_axiom(&Iri::new(A), owl::RDFS_SUBCLASS_OF, target.clone());
        assert!(g.contains(&Triple::new(ax.clone(), owl::RDF_TYPE, owl::AXIOM)));
        assert!(g.contains(&Triple::new(ax.clone(), owl::ANNOTATED_SOURCE, A)));
        assert!(g.contains(&Triple::new(ax, owl::ANNOTATED_TARGET, target)));
    }
}
