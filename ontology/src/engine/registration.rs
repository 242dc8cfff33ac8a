//! Registration passes: one node per named term, with merged annotations.

use crate::error::{Error, Result};
use crate::graph::GraphStore;
use crate::resolver::{resolve_anatomical, resolve_biomarker, resolve_cell_type};
use crate::row::Row;
use crate::vocab::TermKind;

use super::BsOntology;

impl<G: GraphStore> BsOntology<G> {
    /// Registers every named anatomical structure of the row.
    ///
    /// # Errors
    ///
    /// [`Error::MissingAnatomicalStructure`] if the row names none, or
    /// [`Error::InvalidIdentifier`] for an unrecognized prefix. Structures
    /// before the offending one stay registered.
    pub fn register_anatomical_structures(&mut self, row: &Row) -> Result<()> {
        if row.most_specific_anatomical_structure().is_none() {
            return Err(Error::MissingAnatomicalStructure);
        }
        for record in row.anatomical_structures.iter().filter(|r| r.is_named()) {
            let resolved = resolve_anatomical(&record.id, record.label())?;
            self.register_term(&resolved, record, TermKind::AnatomicalStructure);
        }
        Ok(())
    }

    /// Registers every named cell type of the row.
    ///
    /// # Errors
    ///
    /// [`Error::MissingCellType`] if the row names none, or
    /// [`Error::InvalidIdentifier`] for an unrecognized prefix.
    pub fn register_cell_types(&mut self, row: &Row) -> Result<()> {
        if row.most_specific_cell_type().is_none() {
            return Err(Error::MissingCellType);
        }
        for record in row.cell_types.iter().filter(|r| r.is_named()) {
            let resolved = resolve_cell_type(
                &record.id,
                record.label(),
                &self.config.provisional_cell_type_markers,
            )?;
            self.register_term(&resolved, record, TermKind::CellType);
        }
        Ok(())
    }

    /// Registers every named biomarker mentioned in the gene, protein or
    /// combined lists. Invalid identifiers become provisional rather than
    /// failing.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` keeps the pass signature uniform.
    pub fn register_biomarkers(&mut self, row: &Row) -> Result<()> {
        for record in row.all_biomarkers().filter(|r| r.is_named()) {
            let resolved = resolve_biomarker(&record.id, record.label());
            self.register_term(&resolved, record, TermKind::Biomarker);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::config::EngineConfig;
    use crate::graph::{text, GraphStore, MemoryGraph};
    use crate::model::{Literal, Triple};
    use crate::row::{Row, TermRecord};
    use crate::vocab::{ccf, obo, owl};
    use crate::{BsOntology, Error};

    fn engine() -> BsOntology<MemoryGraph> {
        BsOntology::new(EngineConfig::default()).expect("default config")
    }

    fn row(structures: Vec<TermRecord>, cells: Vec<TermRecord>) -> Row {
        Row {
            anatomical_structures: structures,
            cell_types: cells,
            ..Row::default()
        }
    }

    #[test]
    fn stable_structure_annotations() {
        let mut onto = engine();
        let r = row(vec![TermRecord::new("UBERON:0002113", "Kidney", "kidney")], vec![]);
        onto.register_anatomical_structures(&r).expect("valid row");
        let g = onto.graph();
        let kidney = "http://purl.obolibrary.org/obo/UBERON_0002113";
        assert!(g.contains(&Triple::new(kidney, owl::RDF_TYPE, owl::CLASS)));
        assert!(g.contains(&Triple::new(kidney, ccf::PREF_LABEL, text("kidney"))));
        assert!(g.contains(&Triple::new(kidney, ccf::ASCTB_TYPE, text("AS"))));
        assert!(g.contains(&Triple::new(kidney, owl::OBO_IN_OWL_ID, text("UBERON:0002113"))));
        assert!(!g.contains(&Triple::new(
            kidney,
            ccf::IS_PROVISIONAL,
            Literal::boolean(true)
        )));
    }

    #[test]
    fn provisional_structure_annotations() {
        let mut onto = engine();
        let r = row(vec![TermRecord::new("", " Left Kidney ", "")], vec![]);
        onto.register_anatomical_structures(&r).expect("valid row");
        let g = onto.graph();
        let iri = "http://purl.org/ccf/ASCTB-TEMP_left-kidney";
        assert!(g.contains(&Triple::new(iri, owl::RDFS_SUBCLASS_OF, ccf::ANATOMICAL_STRUCTURE)));
        assert!(g.contains(&Triple::new(iri, ccf::IS_PROVISIONAL, Literal::boolean(true))));
        assert!(g.contains(&Triple::new(iri, ccf::PREF_LABEL, text("left kidney"))));
        assert!(g.contains(&Triple::new(
            iri,
            obo::DEFINITION,
            text(crate::vocab::PROVISIONAL_DEFINITION)
        )));
    }

    #[test]
    fn registration_is_idempotent() {
        let mut onto = engine();
        let r = row(
            vec![
                TermRecord::new("UBERON:0002113", "kidney", "kidney"),
                TermRecord::new("", "renal papilla", ""),
            ],
            vec![],
        );
        onto.register_anatomical_structures(&r).expect("valid row");
        let once: HashSet<Triple> = onto.graph().triples().iter().cloned().collect();
        let len = onto.graph().len();
        onto.register_anatomical_structures(&r).expect("valid row");
        let twice: HashSet<Triple> = onto.graph().triples().iter().cloned().collect();
        assert_eq!(once, twice);
        assert_eq!(onto.graph().len(), len);
    }

    #[test]
    fn unnamed_entries_skipped() {
        let mut onto = engine();
        let before = onto.graph().len();
        let r = row(
            vec![
                TermRecord::new("UBERON:0002113", "", ""),
                TermRecord::new("", "cortex", ""),
            ],
            vec![],
        );
        onto.register_anatomical_structures(&r).expect("valid row");
        assert!(!onto
            .graph()
            .has_subject("http://purl.obolibrary.org/obo/UBERON_0002113"));
        assert!(onto.graph().len() > before);
    }

    #[test]
    fn missing_lists_fail() {
        let mut onto = engine();
        let empty = Row::default();
        assert!(matches!(
            onto.register_anatomical_structures(&empty),
            Err(Error::MissingAnatomicalStructure)
        ));
        assert!(matches!(
            onto.register_cell_types(&empty),
            Err(Error::MissingCellType)
        ));
        assert!(onto.register_biomarkers(&empty).is_ok());
    }

    #[test]
    fn invalid_prefix_keeps_earlier_registrations() {
        let mut onto = engine();
        let r = row(
            vec![
                TermRecord::new("UBERON:0002113", "kidney", "kidney"),
                TermRecord::new("MESH:D007668", "bad", ""),
            ],
            vec![],
        );
        let err = onto.register_anatomical_structures(&r).expect_err("bad prefix");
        assert!(matches!(err, Error::InvalidIdentifier { ref raw, .. } if raw == "MESH:D007668"));
        assert!(onto
            .graph()
            .has_subject("http://purl.obolibrary.org/obo/UBERON_0002113"));
    }

    #[test]
    fn cell_type_with_marker_infix_is_provisional() {
        let mut onto = engine();
        let r = row(vec![], vec![TermRecord::new("PCL:0000001", "Ciliated Cell", "")]);
        onto.register_cell_types(&r).expect("valid row");
        let iri = "http://purl.org/ccf/ASCTB-TEMP_ciliated-cell";
        assert!(onto
            .graph()
            .contains(&Triple::new(iri, owl::RDFS_SUBCLASS_OF, ccf::CELL_TYPE)));
        assert!(onto.graph().contains(&Triple::new(iri, ccf::ASCTB_TYPE, text("CT"))));
    }

    #[test]
    fn forced_provisional_cell_type_keeps_source_id() {
        let config = EngineConfig {
            provisional_cell_type_markers: vec!["PCL:".to_string()],
            ..EngineConfig::default()
        };
        let mut onto = BsOntology::new(config).expect("valid config");
        let r = row(vec![], vec![TermRecord::new("PCL:0000123", "ciliated cell", "")]);
        onto.register_cell_types(&r).expect("valid row");
        let iri = "http://purl.org/ccf/ASCTB-TEMP_ciliated-cell";
        let g = onto.graph();
        assert!(g.contains(&Triple::new(iri, owl::OBO_IN_OWL_ID, text("PCL:0000123"))));
        assert!(!g.contains(&Triple::new(
            iri,
            owl::OBO_IN_OWL_ID,
            text("ASCTB-TEMP:ciliated-cell")
        )));
    }

    #[test]
    fn missing_source_id_falls_back_to_resolved() {
        let mut onto = engine();
        let r = row(vec![TermRecord::new("  ", "renal papilla", "")], vec![]);
        onto.register_anatomical_structures(&r).expect("valid row");
        assert!(onto.graph().contains(&Triple::new(
            "http://purl.org/ccf/ASCTB-TEMP_renal-papilla",
            owl::OBO_IN_OWL_ID,
            text("ASCTB-TEMP:renal-papilla")
        )));
    }

    #[test]
    fn identifier_with_whitespace_fails_the_row() {
        let mut onto = engine();
        let r = row(vec![TermRecord::new("UBERON:0002113 kidney", "kidney", "")], vec![]);
        let err = onto.register_anatomical_structures(&r).expect_err("unsafe identifier");
        assert!(matches!(err, Error::InvalidIdentifier { .. }));
        assert!(!onto
            .graph()
            .triples()
            .iter()
            .any(|t| t.subject.as_iri().is_some_and(|i| i.as_str().contains(' '))));
    }

    #[test]
    fn biomarkers_from_all_lists() {
        let mut onto = engine();
        let r = Row {
            biomarkers_gene: vec![TermRecord::new("HGNC:1678", "CD4", "CD4")],
            biomarkers_protein: vec![TermRecord::new("", "CD45RA", "")],
            biomarkers: vec![TermRecord::new("HGNC:1678", "CD4", "CD4")],
            ..Row::default()
        };
        onto.register_biomarkers(&r).expect("never fails");
        let g = onto.graph();
        let cd4 = "http://purl.bioontology.org/ontology/HGNC/1678";
        assert!(g.contains(&Triple::new(cd4, ccf::ASCTB_TYPE, text("BM"))));
        assert!(!g.contains(&Triple::new(cd4, ccf::IS_PROVISIONAL, Literal::boolean(true))));
        let temp = "http://purl.org/ccf/ASCTB-TEMP_cd45ra";
        assert!(g.contains(&Triple::new(temp, owl::RDFS_SUBCLASS_OF, ccf::BIOMARKER)));
        assert!(g.contains(&Triple::new(temp, ccf::IS_PROVISIONAL, Literal::boolean(true))));
    }
}
