//! N-Triples serializer.
//!
//! One triple per line, absolute IRIs only. Suitable for streaming, bulk
//! loading, and diff-friendly storage.

use crate::model::{Node, Object, Triple};

/// Serializes triples to an N-Triples string.
#[must_use]
pub fn to_ntriples(triples: &[Triple]) -> String {
    let mut out = String::with_capacity(triples.len() * 128);
    for t in triples {
        out.push_str(&node(&t.subject));
        out.push_str(" <");
        out.push_str(t.predicate.as_str());
        out.push_str("> ");
        out.push_str(&object(&t.object));
        out.push_str(" .\n");
    }
    out
}

fn node(node: &Node) -> String {
    match node {
        Node::Iri(iri) => format!("<{iri}>"),
        Node::Blank(id) => format!("_:{id}"),
    }
}

fn object(object: &Object) -> String {
    match object {
        Object::Node(n) => node(n),
        Object::Literal(lit) => {
            let escaped = lit
                .lexical
                .replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\n', "\\n")
                .replace('\r', "\\r");
            format!("\"{}\"^^<{}>", escaped, lit.datatype)
        }
    }
}
