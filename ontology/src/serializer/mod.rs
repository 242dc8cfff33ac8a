//! Serializers for the CCF Biological Structure Ontology graph.
//!
//! Four serialization formats are supported:
//! - **RDF/XML** ([`rdfxml`]): the default artifact, `ccf-bso.owl`
//! - **Turtle** ([`turtle`]): for RDF tooling and review
//! - **N-Triples** ([`ntriples`]): one triple per line, diff-friendly
//! - **JSON-LD** ([`jsonld`]): for web consumers

pub mod jsonld;
pub mod ntriples;
pub mod rdfxml;
pub mod turtle;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Node, Triple};
use crate::vocab::PREFIXES;

/// Output format of a serialized graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// RDF/XML.
    #[default]
    RdfXml,
    /// Turtle 1.1.
    Turtle,
    /// N-Triples.
    NTriples,
    /// JSON-LD 1.1.
    JsonLd,
}

impl Format {
    /// Every supported format.
    pub const ALL: [Format; 4] = [Format::RdfXml, Format::Turtle, Format::NTriples, Format::JsonLd];

    /// Conventional file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Format::RdfXml => "owl",
            Format::Turtle => "ttl",
            Format::NTriples => "nt",
            Format::JsonLd => "jsonld",
        }
    }

    /// Name accepted on the command line and in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Format::RdfXml => "rdf-xml",
            Format::Turtle => "turtle",
            Format::NTriples => "n-triples",
            Format::JsonLd => "json-ld",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rdf-xml" | "rdfxml" | "xml" | "owl" => Ok(Format::RdfXml),
            "turtle" | "ttl" => Ok(Format::Turtle),
            "n-triples" | "ntriples" | "nt" => Ok(Format::NTriples),
            "json-ld" | "jsonld" => Ok(Format::JsonLd),
            other => Err(Error::Config(format!("unknown output format: {other}"))),
        }
    }
}

/// Serializes `triples` to a string in `format`.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if a predicate cannot be written as an
/// RDF/XML element name, or JSON encoding fails.
pub fn serialize(triples: &[Triple], format: Format) -> Result<String> {
    match format {
        Format::RdfXml => rdfxml::to_rdf_xml(triples),
        Format::Turtle => Ok(turtle::to_turtle(triples)),
        Format::NTriples => Ok(ntriples::to_ntriples(triples)),
        Format::JsonLd => {
            let value = jsonld::to_json_ld(triples);
            serde_json::to_string_pretty(&value).map_err(|e| Error::Serialization(e.to_string()))
        }
    }
}

/// Splits an IRI into a bound prefix and a local name that is safe in
/// Turtle, JSON-LD and XML alike. The longest matching namespace wins.
pub(crate) fn compact(iri: &str) -> Option<(&'static str, &str)> {
    PREFIXES
        .iter()
        .filter(|(_, ns)| iri.starts_with(ns))
        .max_by_key(|(_, ns)| ns.len())
        .and_then(|(prefix, ns)| {
            let local = &iri[ns.len()..];
            is_safe_local(local).then_some((*prefix, local))
        })
}

fn is_safe_local(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Groups triples by subject, preserving first-appearance order.
pub(crate) fn by_subject(triples: &[Triple]) -> Vec<(&Node, Vec<&Triple>)> {
    let mut order: Vec<(&Node, Vec<&Triple>)> = Vec::new();
    let mut slots: std::collections::HashMap<&Node, usize> = std::collections::HashMap::new();
    for triple in triples {
        let slot = *slots.entry(&triple.subject).or_insert_with(|| {
            order.push((&triple.subject, Vec::new()));
            order.len() - 1
        });
        order[slot].1.push(triple);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compacts_known_namespaces() {
        assert_eq!(
            compact("http://purl.obolibrary.org/obo/UBERON_0002113"),
            Some(("obo", "UBERON_0002113"))
        );
        assert_eq!(
            compact("http://purl.org/ccf/ASCTB-TEMP_left-kidney"),
            Some(("ccf", "ASCTB-TEMP_left-kidney"))
        );
        assert_eq!(
            compact("http://purl.org/sig/ont/fma/fma7203"),
            Some(("fma", "fma7203"))
        );
    }

    #[test]
    fn refuses_unsafe_locals() {
        assert_eq!(compact("http://purl.org/ccf/latest/ccf-bso.owl"), None);
        assert_eq!(compact("http://doi.org/10.1/x"), None);
        assert_eq!(compact("http://purl.org/ccf/"), None);
    }

    #[test]
    fn format_names_round_trip() {
        for format in Format::ALL {
            assert_eq!(format.as_str().parse::<Format>().ok(), Some(format));
        }
        assert_eq!("TTL".parse::<Format>().ok(), Some(Format::Turtle));
        assert!("yaml".parse::<Format>().is_err());
    }
}
