//! `asctb2ccf`: converts ASCT+B reporter rows into the CCF Biological
//! Structure Ontology and writes the artifact.
//!
//! **Usage:**
//! ```text
//! asctb2ccf --input rows.json [--config asctb2ccf.toml] [--organ kidney]
//!           [--ontology-iri IRI] [--format rdf-xml|turtle|n-triples|json-ld]
//!           [--location-links cross-product|last-pair]
//!           [--cell-biomarkers-only] --output ccf-bso.owl
//! ```
//!
//! Rows that fail are reported and skipped; the artifact is written from
//! every row that could be applied.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use ccf_ontology::{load_rows, Driver, EngineConfig, Format, GraphStore, LocationLinks, Mode};
use clap::{Parser, ValueEnum};
use tracing::info;

/// Build the CCF Biological Structure Ontology from ASCT+B rows.
#[derive(Parser)]
#[command(
    name = "asctb2ccf",
    about = "Convert ASCT+B table rows into the CCF Biological Structure Ontology"
)]
struct Args {
    /// ASCT+B reporter JSON export (`{"data": [...]}` or a bare array).
    #[arg(long)]
    input: PathBuf,

    /// TOML engine configuration. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Organ name: selects the seed hierarchy and labels row failures.
    #[arg(long)]
    organ: Option<String>,

    /// IRI of the generated ontology.
    #[arg(long)]
    ontology_iri: Option<String>,

    /// Output format.
    #[arg(long)]
    format: Option<Format>,

    /// Which cell type/structure pairs get a location link.
    #[arg(long, value_enum)]
    location_links: Option<LinkArg>,

    /// Only register terms and characterize cell types by biomarkers.
    #[arg(long)]
    cell_biomarkers_only: bool,

    /// Destination of the serialized ontology.
    #[arg(long)]
    output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum LinkArg {
    CrossProduct,
    LastPair,
}

impl From<LinkArg> for LocationLinks {
    fn from(arg: LinkArg) -> Self {
        match arg {
            LinkArg::CrossProduct => LocationLinks::CrossProduct,
            LinkArg::LastPair => LocationLinks::LastPair,
        }
    }
}

impl Args {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if let Some(organ) = &self.organ {
            config.organ = Some(organ.clone());
        }
        if let Some(iri) = &self.ontology_iri {
            config.ontology_iri = iri.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(links) = self.location_links {
            config.location_links = links.into();
        }
        if self.cell_biomarkers_only {
            config.mode = Mode::CellBiomarkersOnly;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asctb2ccf=info,ccf_ontology=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = args.engine_config()?;
    let format = config.format;
    let organ = config.organ_name().to_string();

    let rows = load_rows(&args.input)
        .with_context(|| format!("Failed to read rows from {}", args.input.display()))?;
    info!(rows = rows.len(), %organ, %format, "converting");

    let mut driver = Driver::new(config).context("Invalid engine configuration")?;
    let report = driver.run(&rows);

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let file = fs::File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    driver
        .ontology()
        .serialize(format, &mut writer)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "{organ}: {} rows, {} applied, {} failed, {} triples",
        report.rows,
        report.applied,
        report.failures.len(),
        driver.ontology().graph().triples().len()
    );
    for failure in &report.failures {
        println!("  skipped: {failure}");
    }
    println!("  Written: {}", args.output.display());
    Ok(())
}
