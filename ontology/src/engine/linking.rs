//! Chain and location linking passes.
//!
//! Partonomy and lineage links are functional: asserting a new parent for a
//! term replaces the old one, so the last chain to mention a term decides
//! its parent. Location links accumulate.

use crate::config::{ChainScope, LocationLinks};
use crate::error::Result;
use crate::graph::GraphStore;
use crate::model::Iri;
use crate::resolver::{resolve_anatomical, resolve_cell_type};
use crate::row::{most_specific, Row, TermRecord};
use crate::vocab::{ccf, obo};

use super::BsOntology;

impl<G: GraphStore> BsOntology<G> {
    /// Chains the row's anatomical structures with `ccf_part_of`, each to its
    /// predecessor. The first structure of the run hangs off body.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidIdentifier`] for an unrecognized prefix.
    pub fn link_partonomy(&mut self, row: &Row) -> Result<()> {
        let iris = self.structure_iris(&row.anatomical_structures)?;
        let start = match self.config.chain_scope {
            ChainScope::Run => self.chain.structure.clone(),
            ChainScope::Row => None,
        };
        let last = self.chain_terms(&iris, start, obo::BODY, ccf::PART_OF);
        if last.is_some() {
            self.chain.structure = last;
        }
        Ok(())
    }

    /// Chains the row's cell types with `ccf_ct_isa`, each to its
    /// predecessor. The first cell type of the run hangs off cell.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidIdentifier`] for an unrecognized prefix.
    pub fn link_cell_lineage(&mut self, row: &Row) -> Result<()> {
        let iris = self.cell_type_iris(&row.cell_types)?;
        let start = match self.config.chain_scope {
            ChainScope::Run => self.chain.cell_type.clone(),
            ChainScope::Row => None,
        };
        let last = self.chain_terms(&iris, start, obo::CELL, ccf::CT_ISA);
        if last.is_some() {
            self.chain.cell_type = last;
        }
        Ok(())
    }

    /// Links cell types to anatomical structures with `ccf_located_in`.
    ///
    /// Under [`LocationLinks::CrossProduct`] every named cell type is linked
    /// to every named structure of the row; under
    /// [`LocationLinks::LastPair`] only the most specific of each.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidIdentifier`] for an unrecognized prefix.
    pub fn link_cell_location(&mut self, row: &Row) -> Result<()> {
        let (cells, structures) = match self.config.location_links {
            LocationLinks::CrossProduct => (
                self.cell_type_iris(&row.cell_types)?,
                self.structure_iris(&row.anatomical_structures)?,
            ),
            LocationLinks::LastPair => {
                let cell = most_specific(&row.cell_types);
                let structure = most_specific(&row.anatomical_structures);
                match (cell, structure) {
                    (Some(c), Some(s)) => (
                        self.cell_type_iris(std::slice::from_ref(c))?,
                        self.structure_iris(std::slice::from_ref(s))?,
                    ),
                    _ => return Ok(()),
                }
            }
        };
        for cell in &cells {
            for structure in &structures {
                self.graph.add_annotation(cell, ccf::LOCATED_IN, structure);
            }
        }
        Ok(())
    }

    fn structure_iris(&self, records: &[TermRecord]) -> Result<Vec<Iri>> {
        records
            .iter()
            .filter(|r| r.is_named())
            .map(|r| resolve_anatomical(&r.id, r.label()).map(|res| res.iri))
            .collect()
    }

    fn cell_type_iris(&self, records: &[TermRecord]) -> Result<Vec<Iri>> {
        let markers = &self.config.provisional_cell_type_markers;
        records
            .iter()
            .filter(|r| r.is_named())
            .map(|r| resolve_cell_type(&r.id, r.label(), markers).map(|res| res.iri))
            .collect()
    }

    /// Points each term at its predecessor, starting from `start` or `root`.
    /// A term is never made its own parent. Returns the last term chained.
    fn chain_terms(
        &mut self,
        iris: &[Iri],
        start: Option<Iri>,
        root: &str,
        property: &str,
    ) -> Option<Iri> {
        let mut parent = start.unwrap_or_else(|| Iri::new(root));
        let mut last = None;
        for iri in iris {
            if *iri != parent {
                self.graph.set_annotation(iri, property, &parent);
            }
            parent = iri.clone();
            last = Some(iri.clone());
        }
        last
    }
}
