//! RDF/XML serializer.
//!
//! Emits one `rdf:Description` per subject. Blank nodes use `rdf:nodeID`, so
//! the output needs no nesting and round-trips through any RDF/XML reader.
//! Predicates must be expressible as XML qualified names; predicates outside
//! the bound prefixes get generated `ns<N>` prefixes.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::{Node, Object, Triple};
use crate::vocab::PREFIXES;

use super::{by_subject, compact};

/// Serializes triples to an RDF/XML document.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if a predicate IRI has no valid XML
/// local name.
pub fn to_rdf_xml(triples: &[Triple]) -> Result<String> {
    let mut extra: BTreeMap<String, String> = BTreeMap::new();
    let mut qnames: BTreeMap<&str, String> = BTreeMap::new();
    for t in triples {
        let iri = t.predicate.as_str();
        if qnames.contains_key(iri) {
            continue;
        }
        let qname = match compact(iri).filter(|(_, local)| is_xml_name(local)) {
            Some((prefix, local)) => format!("{prefix}:{local}"),
            None => {
                let (ns, local) = split_predicate(iri)?;
                let next = format!("ns{}", extra.len());
                let prefix = extra.entry(ns.to_string()).or_insert(next).clone();
                format!("{prefix}:{local}")
            }
        };
        qnames.insert(iri, qname);
    }

    let mut out = String::with_capacity(triples.len() * 160);
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<rdf:RDF");
    for (prefix, ns) in PREFIXES {
        out.push_str(&format!("\n   xmlns:{prefix}=\"{}\"", escape(ns)));
    }
    for (ns, prefix) in &extra {
        out.push_str(&format!("\n   xmlns:{prefix}=\"{}\"", escape(ns)));
    }
    out.push_str(">\n");

    for (subject, statements) in by_subject(triples) {
        match subject {
            Node::Iri(iri) => out.push_str(&format!(
                "  <rdf:Description rdf:about=\"{}\">\n",
                escape(iri.as_str())
            )),
            Node::Blank(id) => {
                out.push_str(&format!("  <rdf:Description rdf:nodeID=\"{id}\">\n"));
            }
        }
        for t in statements {
            let qname = qnames
                .get(t.predicate.as_str())
                .ok_or_else(|| Error::Serialization(format!("no QName for {}", t.predicate)))?;
            match &t.object {
                Object::Node(Node::Iri(iri)) => out.push_str(&format!(
                    "    <{qname} rdf:resource=\"{}\"/>\n",
                    escape(iri.as_str())
                )),
                Object::Node(Node::Blank(id)) => {
                    out.push_str(&format!("    <{qname} rdf:nodeID=\"{id}\"/>\n"));
                }
                Object::Literal(lit) => out.push_str(&format!(
                    "    <{qname} rdf:datatype=\"{}\">{}</{qname}>\n",
                    escape(lit.datatype),
                    escape(&lit.lexical)
                )),
            }
        }
        out.push_str("  </rdf:Description>\n");
    }

    out.push_str("</rdf:RDF>\n");
    Ok(out)
}

fn split_predicate(iri: &str) -> Result<(&str, &str)> {
    let cut = iri
        .rfind(['#', '/'])
        .map(|i| i + 1)
        .ok_or_else(|| Error::Serialization(format!("cannot split predicate {iri}")))?;
    let (ns, local) = iri.split_at(cut);
    if is_xml_name(local) {
        Ok((ns, local))
    } else {
        Err(Error::Serialization(format!(
            "predicate {iri} has no valid XML local name"
        )))
    }
}

fn is_xml_name(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlankId, Literal};
    use crate::vocab::{ccf, owl};

    #[test]
    fn writes_descriptions() {
        let triples = vec![
            Triple::new("http://purl.obolibrary.org/obo/UBERON_0002113", owl::RDF_TYPE, owl::CLASS),
            Triple::new(
                "http://purl.obolibrary.org/obo/UBERON_0002113",
                ccf::PREF_LABEL,
                Literal::string("kidney & <ureter>"),
            ),
            Triple::new(Node::Blank(BlankId(0)), owl::SOME_VALUES_FROM, "http://purl.obolibrary.org/obo/UBERON_0002113"),
        ];
        let xml = to_rdf_xml(&triples).expect("serializable");
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("xmlns:ccf=\"http://purl.org/ccf/\""));
        assert!(xml.contains(
            "<rdf:Description rdf:about=\"http://purl.obolibrary.org/obo/UBERON_0002113\">"
        ));
        assert!(xml.contains("<rdf:type rdf:resource=\"http://www.w3.org/2002/07/owl#Class\"/>"));
        assert!(xml.contains("kidney &amp; &lt;ureter&gt;</ccf:ccf_pref_label>"));
        assert!(xml.contains("<rdf:Description rdf:nodeID=\"b0\">"));
        assert!(xml.trim_end().ends_with("</rdf:RDF>"));
    }

    #[test]
    fn unknown_predicate_namespace_gets_generated_prefix() {
        let triples = vec![Triple::new(
            "http://example.org/a",
            "http://example.org/vocab#rel",
            "http://example.org/b",
        )];
        let xml = to_rdf_xml(&triples).expect("serializable");
        assert!(xml.contains("xmlns:ns0=\"http://example.org/vocab#\""));
        assert!(xml.contains("<ns0:rel rdf:resource=\"http://example.org/b\"/>"));
    }

    #[test]
    fn rejects_predicate_without_local_name() {
        let triples = vec![Triple::new(
            "http://example.org/a",
            "http://example.org/123",
            "http://example.org/b",
        )];
        assert!(matches!(to_rdf_xml(&triples), Err(Error::Serialization(_))));
    }
}
