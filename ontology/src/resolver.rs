//! Identifier resolution.
//!
//! Turns the identifier strings found in ASCT+B rows (`UBERON:0002113`,
//! `cl:0000084`, `HGNC:1678`, ...) into absolute IRIs through a fixed
//! prefix substitution table. Terms without a usable identifier get a
//! provisional `ASCTB-TEMP:` identifier derived deterministically from their
//! label, so the same label always lands on the same node without a lookup
//! table.
//!
//! Resolution is pure: nothing is written to the graph here.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::Iri;
use crate::vocab::TermKind;

/// A recognized identifier prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// Uberon multi-species anatomy ontology.
    Uberon,
    /// Foundational Model of Anatomy.
    Fma,
    /// Cell Ontology.
    Cl,
    /// Provisional Cell Ontology.
    Pcl,
    /// Lung Maturation and Health Anatomy.
    Lmha,
    /// HUGO Gene Nomenclature Committee.
    Hgnc,
    /// Placeholder identifiers minted by this tool.
    AsctbTemp,
}

impl Prefix {
    /// Every recognized prefix.
    pub const ALL: [Prefix; 7] = [
        Prefix::Uberon,
        Prefix::Fma,
        Prefix::Cl,
        Prefix::Pcl,
        Prefix::Lmha,
        Prefix::Hgnc,
        Prefix::AsctbTemp,
    ];

    /// Canonical spelling of the prefix (without the colon).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Prefix::Uberon => "UBERON",
            Prefix::Fma => "FMA",
            Prefix::Cl => "CL",
            Prefix::Pcl => "PCL",
            Prefix::Lmha => "LMHA",
            Prefix::Hgnc => "HGNC",
            Prefix::AsctbTemp => "ASCTB-TEMP",
        }
    }

    /// Namespace the local part is appended to.
    #[must_use]
    pub fn namespace(self) -> &'static str {
        match self {
            Prefix::Uberon => "http://purl.obolibrary.org/obo/UBERON_",
            Prefix::Fma => "http://purl.org/sig/ont/fma/fma",
            Prefix::Cl => "http://purl.obolibrary.org/obo/CL_",
            Prefix::Pcl => "http://purl.obolibrary.org/obo/PCL_",
            Prefix::Lmha => "http://purl.obolibrary.org/obo/LMHA_",
            Prefix::Hgnc => "http://purl.bioontology.org/ontology/HGNC/",
            Prefix::AsctbTemp => "http://purl.org/ccf/ASCTB-TEMP_",
        }
    }

    /// Case-insensitive lookup. Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(text: &str) -> Option<Prefix> {
        let text = text.trim();
        Prefix::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(text))
    }
}

/// A prefixed identifier drawn from the recognized prefix set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    prefix: Prefix,
    local: String,
}

impl Identifier {
    /// Builds an identifier from its parts.
    pub fn new(prefix: Prefix, local: impl Into<String>) -> Self {
        Self {
            prefix,
            local: local.into(),
        }
    }

    /// Parses `PREFIX:local`. Returns `None` when the text has no colon, the
    /// prefix is not recognized, or the local part is empty or contains a
    /// character that cannot appear in an IRI (whitespace, `<`, `"`, ...).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Identifier> {
        let (prefix, local) = raw.trim().split_once(':')?;
        let prefix = Prefix::parse(prefix)?;
        let local = local.trim();
        if local.is_empty() || !is_iri_safe(local) {
            return None;
        }
        Some(Identifier::new(prefix, local))
    }

    /// The prefix.
    #[must_use]
    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    /// The local part.
    #[must_use]
    pub fn local(&self) -> &str {
        &self.local
    }

    /// Expands the identifier into its absolute IRI.
    #[must_use]
    pub fn iri(&self) -> Iri {
        Iri::new(format!("{}{}", self.prefix.namespace(), self.local))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix.as_str(), self.local)
    }
}

/// Outcome of resolving one term mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The identifier the IRI was expanded from.
    pub identifier: Identifier,
    /// Absolute IRI of the term.
    pub iri: Iri,
    /// Whether the term has no stable identifier.
    pub provisional: bool,
}

impl Resolved {
    fn stable(identifier: Identifier) -> Self {
        Self {
            iri: identifier.iri(),
            identifier,
            provisional: false,
        }
    }

    fn provisional(identifier: Identifier) -> Self {
        Self {
            iri: identifier.iri(),
            identifier,
            provisional: true,
        }
    }
}

/// Derives the provisional identifier for a label.
///
/// The label is lowercased and trimmed, every run of non-alphanumeric
/// characters becomes a single hyphen, and anything left outside
/// `[a-z0-9-]` is dropped.
///
/// ```
/// use ccf_ontology::resolver::provisional_id;
///
/// assert_eq!(provisional_id(" Left Kidney ").to_string(), "ASCTB-TEMP:left-kidney");
/// ```
#[must_use]
pub fn provisional_id(label: &str) -> Identifier {
    let lowered = label.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_gap = false;
    for c in lowered.chars() {
        if c.is_alphanumeric() {
            if in_gap {
                slug.push('-');
                in_gap = false;
            }
            slug.push(c);
        } else if !in_gap {
            in_gap = true;
        }
    }
    if in_gap {
        slug.push('-');
    }
    slug.retain(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    Identifier::new(Prefix::AsctbTemp, slug)
}

/// Resolves an anatomical-structure mention.
///
/// # Errors
///
/// Returns [`Error::InvalidIdentifier`] if the identifier has a colon but an
/// unrecognized prefix.
pub fn resolve_anatomical(raw: &str, label: &str) -> Result<Resolved> {
    resolve_structural(raw, label, TermKind::AnatomicalStructure)
}

/// Resolves a cell-type mention.
///
/// Identifiers containing any of `provisional_markers` (case-insensitive)
/// are treated as provisional even when they parse.
///
/// # Errors
///
/// Returns [`Error::InvalidIdentifier`] if the identifier has a colon but an
/// unrecognized prefix.
pub fn resolve_cell_type(
    raw: &str,
    label: &str,
    provisional_markers: &[String],
) -> Result<Resolved> {
    let upper = raw.to_uppercase();
    if provisional_markers
        .iter()
        .any(|m| !m.is_empty() && upper.contains(&m.to_uppercase()))
    {
        return Ok(Resolved::provisional(provisional_id(label)));
    }
    resolve_structural(raw, label, TermKind::CellType)
}

/// Resolves a biomarker mention. Never fails: anything that is not
/// `HGNC:<digits>` becomes provisional.
#[must_use]
pub fn resolve_biomarker(raw: &str, label: &str) -> Resolved {
    match Identifier::parse(raw) {
        Some(id) if is_valid_biomarker(raw) => Resolved::stable(id),
        _ => Resolved::provisional(provisional_id(label)),
    }
}

/// Returns true if `raw` is `HGNC:` followed by one or more digits.
#[must_use]
pub fn is_valid_biomarker(raw: &str) -> bool {
    static HGNC: OnceLock<Option<Regex>> = OnceLock::new();
    HGNC.get_or_init(|| Regex::new(r"(?i)^HGNC:\d+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(raw.trim()))
}

/// Rewrites a `doi:` reference into a resolvable `http://doi.org/` IRI.
///
/// Only the first whitespace-delimited token after the prefix is kept, so
/// trailing commentary in the cell is dropped. Returns `None` unless the
/// text starts with `doi:` (any case) and that token is IRI-safe.
#[must_use]
pub fn normalize_doi(text: &str) -> Option<Iri> {
    let text = text.trim();
    let head = text.get(..4)?;
    if !head.eq_ignore_ascii_case("doi:") {
        return None;
    }
    let token = text[4..].split_whitespace().next()?;
    if !is_iri_safe(token) {
        return None;
    }
    Some(Iri::new(format!("{}{}", crate::vocab::ns::DOI, token)))
}

/// Returns true if `text` can be appended to a namespace and still form a
/// valid absolute IRI in every output format.
fn is_iri_safe(text: &str) -> bool {
    text.chars().all(|c| {
        !c.is_whitespace()
            && !c.is_control()
            && !matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
    })
}

fn resolve_structural(raw: &str, label: &str, kind: TermKind) -> Result<Resolved> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.contains(':') {
        return Ok(Resolved::provisional(provisional_id(label)));
    }
    let id = Identifier::parse(trimmed).ok_or_else(|| Error::InvalidIdentifier {
        raw: raw.to_string(),
        kind,
    })?;
    if id.prefix() == Prefix::AsctbTemp {
        Ok(Resolved::provisional(id))
    } else {
        Ok(Resolved::stable(id))
    }
}
