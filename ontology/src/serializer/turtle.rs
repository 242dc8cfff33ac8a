//! Turtle 1.1 serializer.
//!
//! Produces prefix declarations followed by one statement block per subject,
//! in the order subjects first appeared in the graph.

use crate::model::{Literal, Node, Object, Triple};
use crate::vocab::{owl, PREFIXES};

use super::{by_subject, compact};

/// Serializes triples to a Turtle string.
#[must_use]
pub fn to_turtle(triples: &[Triple]) -> String {
    let mut out = String::with_capacity(64 * 1024);

    for (prefix, ns) in PREFIXES {
        out.push_str(&format!("@prefix {prefix}: <{ns}> .\n"));
    }
    out.push('\n');

    for (subject, statements) in by_subject(triples) {
        out.push_str(&node_to_turtle(subject));
        for (i, t) in statements.iter().enumerate() {
            let sep = if i == 0 { "\n    " } else { " ;\n    " };
            out.push_str(sep);
            if t.predicate.as_str() == owl::RDF_TYPE {
                out.push('a');
            } else {
                out.push_str(&iri_to_turtle(t.predicate.as_str()));
            }
            out.push(' ');
            out.push_str(&object_to_turtle(&t.object));
        }
        out.push_str(" .\n\n");
    }

    out
}

fn iri_to_turtle(iri: &str) -> String {
    match compact(iri) {
        Some((prefix, local)) => format!("{prefix}:{local}"),
        None => format!("<{iri}>"),
    }
}

fn node_to_turtle(node: &Node) -> String {
    match node {
        Node::Iri(iri) => iri_to_turtle(iri.as_str()),
        Node::Blank(id) => format!("_:{id}"),
    }
}

fn object_to_turtle(object: &Object) -> String {
    match object {
        Object::Node(node) => node_to_turtle(node),
        Object::Literal(lit) => literal_to_turtle(lit),
    }
}

fn literal_to_turtle(lit: &Literal) -> String {
    let quoted = turtle_string(&lit.lexical);
    if lit.datatype == owl::XSD_STRING {
        quoted
    } else {
        format!("{quoted}^^{}", iri_to_turtle(lit.datatype))
    }
}

fn turtle_string(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("\"{escaped}\"")
}
