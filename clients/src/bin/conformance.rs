//! `ccf-conformance`: validates a serialized CCF ontology artifact.
//!
//! Checks syntax for the artifact's format, then the fixed vocabulary:
//! ontology header, root classes, CCF property declarations, and the
//! provisional flag on placeholder terms.
//!
//! **Usage:**
//! ```text
//! ccf-conformance --artifact ccf-bso.owl [--format rdf-xml|turtle|n-triples|json-ld]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use ccf_conformance::{run_all, Severity};
use ccf_ontology::Format;
use clap::Parser;

/// Run the CCF ontology conformance suite.
#[derive(Parser)]
#[command(
    name = "ccf-conformance",
    about = "Validate a CCF ontology artifact against the output contract"
)]
struct Args {
    /// Serialized ontology to check.
    #[arg(long)]
    artifact: PathBuf,

    /// Artifact format; inferred from the extension when omitted.
    #[arg(long)]
    format: Option<Format>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ccf_conformance=info".into()),
        )
        .init();

    let args = Args::parse();
    let report = run_all(&args.artifact, args.format)?;

    println!("CCF Ontology Conformance Report: {}", args.artifact.display());
    println!();
    for result in &report.results {
        println!("[{}] {}: {}", result.severity, result.validator, result.message);
        for detail in &result.details {
            println!("       {detail}");
        }
    }

    let failed = report.failure_count();
    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        report.count(Severity::Pass),
        report.count(Severity::Warning),
        failed
    );

    if failed > 0 {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
