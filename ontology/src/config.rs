//! Engine configuration.
//!
//! Loaded from TOML; every key is optional. Command-line flags in the client
//! binaries override values read from the file.
//!
//! ```toml
//! ontology_iri = "http://purl.org/ccf/latest/ccf-bso.owl"
//! organ = "kidney"
//! location_links = "cross-product"
//! chain_scope = "run"
//! mode = "full"
//! format = "turtle"
//! provisional_cell_type_markers = ["PCL:"]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::serializer::Format;

/// Default ontology IRI.
pub const DEFAULT_ONTOLOGY_IRI: &str = "http://purl.org/ccf/latest/ccf-bso.owl";

/// Which cell-type/structure pairs receive a `ccf_located_in` link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationLinks {
    /// Every cell type with every anatomical structure of the row.
    #[default]
    CrossProduct,
    /// Only the most specific cell type with the most specific structure.
    LastPair,
}

/// Where partonomy and lineage chains start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainScope {
    /// The chain continues across rows: a row's first term hangs off the
    /// last term chained by the previous row. Only the very first term of
    /// the run hangs off the root.
    #[default]
    Run,
    /// Each row's chain restarts at the root term.
    Row,
}

/// Which passes the batch driver runs per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Registration, chain linking, location linking and characterization.
    #[default]
    Full,
    /// Registration and characterization only; rows without biomarkers fail.
    CellBiomarkersOnly,
}

/// Configuration of one ontology build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// IRI of the generated ontology.
    pub ontology_iri: String,
    /// Organ whose seed hierarchy is loaded; also named in row failures.
    pub organ: Option<String>,
    /// Location linking policy.
    pub location_links: LocationLinks,
    /// Chain anchoring policy.
    pub chain_scope: ChainScope,
    /// Driver mode.
    pub mode: Mode,
    /// Output format.
    pub format: Format,
    /// Identifier infixes that force a cell type provisional.
    pub provisional_cell_type_markers: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ontology_iri: DEFAULT_ONTOLOGY_IRI.to_string(),
            organ: None,
            location_links: LocationLinks::default(),
            chain_scope: ChainScope::default(),
            mode: Mode::default(),
            format: Format::default(),
            provisional_cell_type_markers: vec!["PCL:".to_string()],
        }
    }
}

impl EngineConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML, has unknown keys,
    /// or names an empty ontology IRI.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the ontology IRI is empty or not absolute.
    pub fn validate(&self) -> Result<()> {
        let iri = self.ontology_iri.trim();
        if iri.is_empty() {
            return Err(Error::Config("ontology_iri must not be empty".to_string()));
        }
        if !iri.contains("://") {
            return Err(Error::Config(format!(
                "ontology_iri must be absolute, got {iri:?}"
            )));
        }
        Ok(())
    }

    /// Organ name for messages; `unknown` when none is configured.
    #[must_use]
    pub fn organ_name(&self) -> &str {
        self.organ.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = EngineConfig::from_toml_str("").expect("empty is valid");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.location_links, LocationLinks::CrossProduct);
        assert_eq!(config.chain_scope, ChainScope::Run);
        assert_eq!(config.format, Format::RdfXml);
        assert_eq!(config.organ_name(), "unknown");
    }

    #[test]
    fn reads_every_key() {
        let config = EngineConfig::from_toml_str(
            r#"
            ontology_iri = "http://example.org/bso.owl"
            organ = "kidney"
            location_links = "last-pair"
            chain_scope = "row"
            mode = "cell-biomarkers-only"
            format = "n-triples"
            provisional_cell_type_markers = ["PCL:", "LMHA:"]
            "#,
        )
        .expect("valid config");
        assert_eq!(config.ontology_iri, "http://example.org/bso.owl");
        assert_eq!(config.organ_name(), "kidney");
        assert_eq!(config.location_links, LocationLinks::LastPair);
        assert_eq!(config.chain_scope, ChainScope::Row);
        assert_eq!(config.mode, Mode::CellBiomarkersOnly);
        assert_eq!(config.format, Format::NTriples);
        assert_eq!(config.provisional_cell_type_markers.len(), 2);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            EngineConfig::from_toml_str("colour = \"red\""),
            Err(Error::Toml(_))
        ));
    }

    #[test]
    fn rejects_relative_iri() {
        assert!(matches!(
            EngineConfig::from_toml_str("ontology_iri = \"bso.owl\""),
            Err(Error::Config(_))
        ));
    }
}
