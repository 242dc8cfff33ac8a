//! ASCT+B table rows as delivered by the ASCT+B reporter JSON export.
//!
//! Each row lists, per biological layer, the terms the table author entered:
//! anatomical structures from outermost to innermost, cell types from
//! ancestor to descendant, biomarkers split by kind plus a combined list,
//! and literature references.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// One `{id, name, rdfs_label}` entry of a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TermRecord {
    /// Identifier as entered, e.g. `UBERON:0002113`. May be empty.
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    /// Name given by the table author.
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    /// Label from the reference ontology.
    #[serde(deserialize_with = "nullable")]
    pub rdfs_label: String,
}

impl TermRecord {
    /// Builds a record from its three fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, rdfs_label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rdfs_label: rdfs_label.into(),
        }
    }

    /// The label used for display and provisional identifiers: the author's
    /// name, falling back to the ontology label.
    #[must_use]
    pub fn label(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            self.rdfs_label.trim()
        } else {
            name
        }
    }

    /// Whether the record carries a name or label at all.
    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.label().is_empty()
    }
}

/// A literature reference attached to a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Reference {
    /// Free-form identifier column.
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    /// DOI, usually written `DOI: 10.xxxx/...`.
    pub doi: Option<String>,
    /// Free-text notes.
    #[serde(deserialize_with = "nullable")]
    pub notes: String,
}

/// One ASCT+B table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Row {
    /// Anatomical structures, outermost first.
    pub anatomical_structures: Vec<TermRecord>,
    /// Cell types, ancestor first.
    pub cell_types: Vec<TermRecord>,
    /// All biomarkers regardless of kind.
    pub biomarkers: Vec<TermRecord>,
    /// Gene biomarkers.
    pub biomarkers_gene: Vec<TermRecord>,
    /// Protein biomarkers.
    pub biomarkers_protein: Vec<TermRecord>,
    /// Literature references.
    pub references: Vec<Reference>,
}

impl Row {
    /// The innermost named anatomical structure.
    #[must_use]
    pub fn most_specific_anatomical_structure(&self) -> Option<&TermRecord> {
        most_specific(&self.anatomical_structures)
    }

    /// The most derived named cell type.
    #[must_use]
    pub fn most_specific_cell_type(&self) -> Option<&TermRecord> {
        most_specific(&self.cell_types)
    }

    /// Every biomarker mention across the gene, protein and combined lists.
    pub fn all_biomarkers(&self) -> impl Iterator<Item = &TermRecord> {
        self.biomarkers_gene
            .iter()
            .chain(self.biomarkers_protein.iter())
            .chain(self.biomarkers.iter())
    }
}

/// Returns the last named entry of an ordered term list, or `None` if the
/// list holds no named entry.
#[must_use]
pub fn most_specific(terms: &[TermRecord]) -> Option<&TermRecord> {
    terms.iter().rev().find(|t| t.is_named())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RowDocument {
    Wrapped { data: Vec<Row> },
    Bare(Vec<Row>),
}

/// Parses rows from JSON: either `{"data": [...]}` or a bare array.
///
/// # Errors
///
/// Returns [`crate::Error::Json`] if the text is not a row document.
pub fn parse_rows(json: &str) -> Result<Vec<Row>> {
    let doc: RowDocument = serde_json::from_str(json)?;
    Ok(match doc {
        RowDocument::Wrapped { data } => data,
        RowDocument::Bare(rows) => rows,
    })
}

/// Reads rows from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let text = std::fs::read_to_string(path)?;
    parse_rows(&text)
}

fn nullable<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_prefers_name() {
        let t = TermRecord::new("UBERON:0002113", "Kidney", "kidney");
        assert_eq!(t.label(), "Kidney");
        let t = TermRecord::new("UBERON:0002113", "  ", "kidney");
        assert_eq!(t.label(), "kidney");
        assert!(!TermRecord::new("UBERON:0002113", "", "").is_named());
    }

    #[test]
    fn most_specific_skips_unnamed_tail() {
        let terms = vec![
            TermRecord::new("", "kidney", ""),
            TermRecord::new("", "cortex", ""),
            TermRecord::new("", "", ""),
        ];
        assert_eq!(most_specific(&terms).map(TermRecord::label), Some("cortex"));
        assert!(most_specific(&[]).is_none());
        assert!(most_specific(&[TermRecord::default()]).is_none());
    }

    #[test]
    fn parses_reporter_export() {
        let json = r#"{
            "data": [{
                "anatomical_structures": [
                    {"id": "UBERON:0002113", "name": "kidney", "rdfs_label": "kidney"},
                    {"id": null, "name": "Renal Papilla", "rdfs_label": null}
                ],
                "cell_types": [{"id": "CL:0000084", "name": "T cell", "rdfs_label": "T cell"}],
                "biomarkers": [{"id": "HGNC:1678", "name": "CD4", "rdfs_label": "CD4", "b_type": "gene"}],
                "biomarkers_gene": [{"id": "HGNC:1678", "name": "CD4", "rdfs_label": "CD4"}],
                "references": [{"id": "", "doi": "DOI: 10.1/x", "notes": ""}, {"id": "Smith"}],
                "ftu_types": []
            }]
        }"#;
        let rows = parse_rows(json).expect("valid export");
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.anatomical_structures[1].id, "");
        assert_eq!(row.anatomical_structures[1].label(), "Renal Papilla");
        assert_eq!(row.references[0].doi.as_deref(), Some("DOI: 10.1/x"));
        assert_eq!(row.references[1].doi, None);
        assert!(row.biomarkers_protein.is_empty());
        assert_eq!(row.all_biomarkers().count(), 2);
    }

    #[test]
    fn parses_bare_array() {
        let rows = parse_rows("[{}, {}]").expect("bare array");
        assert_eq!(rows.len(), 2);
        assert!(rows[0].anatomical_structures.is_empty());
    }

    #[test]
    fn rejects_non_row_json() {
        assert!(parse_rows("42").is_err());
    }
}
