//! CCF ontology artifact conformance suite.
//!
//! Reads back a serialized CCF Biological Structure Ontology and checks it
//! against the output contract consumers rely on.
//!
//! # Conformance Scope
//!
//! | Check | Standard |
//! |-------|----------|
//! | Turtle / N-Triples syntax | RDF 1.1, Turtle 1.1 (parsed with `sophia_turtle`) |
//! | RDF/XML structure | RDF 1.1 XML striped syntax (parsed with `quick_xml`) |
//! | JSON-LD structure | JSON-LD 1.1, prefix-only context with flattened `@graph` |
//! | Vocabulary | ontology header, root classes, CCF property declarations |
//! | Provisional terms | every `ASCTB-TEMP` term carries `ccf_is_provisional` |
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = ccf_conformance::run_all(Path::new("ccf-bso.owl"), None)?;
//! assert!(report.all_passed());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod report;
pub mod validators;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ccf_ontology::Format;

pub use report::{ConformanceReport, Severity, TestResult};

/// Reads `artifact` and runs every check for its format.
///
/// When `format` is `None` it is inferred from the file extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its format cannot be
/// inferred. Conformance problems are reported, not returned as errors.
pub fn run_all(artifact: &Path, format: Option<Format>) -> Result<ConformanceReport> {
    let format = match format {
        Some(format) => format,
        None => infer_format(artifact)?,
    };
    let content = std::fs::read_to_string(artifact)
        .with_context(|| format!("Failed to read {}", artifact.display()))?;
    Ok(check(&content, format))
}

/// Runs every check over an in-memory artifact.
///
/// Vocabulary checks only run when the syntax check succeeded.
pub fn check(content: &str, format: Format) -> ConformanceReport {
    let (mut report, statements) = match format {
        Format::Turtle => validators::rdf::validate_turtle(content),
        Format::NTriples => validators::rdf::validate_ntriples(content),
        Format::RdfXml => validators::rdfxml::validate(content),
        Format::JsonLd => validators::jsonld::validate(content),
    };
    if let Some(statements) = statements {
        report.extend(validators::vocabulary::validate(&statements));
    }
    report
}

/// Maps a file extension to a [`Format`].
///
/// # Errors
///
/// Returns an error if the path has no extension or an unknown one.
pub fn infer_format(artifact: &Path) -> Result<Format> {
    let extension = artifact
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| anyhow!("Cannot infer format of {}", artifact.display()))?;
    Format::ALL
        .into_iter()
        .find(|f| f.extension().eq_ignore_ascii_case(extension))
        .or_else(|| match extension.to_ascii_lowercase().as_str() {
            "rdf" | "xml" => Some(Format::RdfXml),
            "json" => Some(Format::JsonLd),
            _ => None,
        })
        .ok_or_else(|| anyhow!("Unknown artifact extension .{extension}; pass --format"))
}
