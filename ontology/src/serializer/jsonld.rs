//! JSON-LD 1.1 serializer.
//!
//! Produces a single document with an `@context` of the bound prefixes and a
//! flattened `@graph` array, one node object per subject.

use serde_json::{json, Map, Value};

use crate::model::{Node, Object, Triple};
use crate::vocab::{owl, PREFIXES};

use super::{by_subject, compact};

/// Serializes triples to a JSON-LD `Value`.
///
/// The returned value can be pretty-printed with [`serde_json::to_string_pretty`].
#[must_use]
pub fn to_json_ld(triples: &[Triple]) -> Value {
    let mut ctx = Map::new();
    for (prefix, ns) in PREFIXES {
        ctx.insert((*prefix).to_owned(), json!(ns));
    }

    let mut nodes: Vec<Value> = Vec::new();
    for (subject, statements) in by_subject(triples) {
        let mut node = Map::new();
        node.insert("@id".to_owned(), json!(node_id(subject)));
        for t in statements {
            if t.predicate.as_str() == owl::RDF_TYPE {
                if let Object::Node(n) = &t.object {
                    push(&mut node, "@type", json!(node_id(n)));
                    continue;
                }
            }
            let key = compact_iri(t.predicate.as_str());
            push(&mut node, &key, object_value(&t.object));
        }
        nodes.push(Value::Object(node));
    }

    json!({
        "@context": Value::Object(ctx),
        "@graph": nodes
    })
}

fn push(node: &mut Map<String, Value>, key: &str, value: Value) {
    match node.get_mut(key) {
        Some(Value::Array(values)) => values.push(value),
        _ => {
            node.insert(key.to_owned(), Value::Array(vec![value]));
        }
    }
}

fn compact_iri(iri: &str) -> String {
    match compact(iri) {
        Some((prefix, local)) => format!("{prefix}:{local}"),
        None => iri.to_owned(),
    }
}

fn node_id(node: &Node) -> String {
    match node {
        Node::Iri(iri) => compact_iri(iri.as_str()),
        Node::Blank(id) => format!("_:{id}"),
    }
}

fn object_value(object: &Object) -> Value {
    match object {
        Object::Node(n) => json!({ "@id": node_id(n) }),
        Object::Literal(lit) if lit.datatype == owl::XSD_STRING => json!(lit.lexical),
        Object::Literal(lit) => json!({
            "@value": lit.lexical,
            "@type": compact_iri(lit.datatype)
        }),
    }
}
