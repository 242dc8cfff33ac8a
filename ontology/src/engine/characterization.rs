//! Characterization of a cell type by its location and biomarker set, with
//! citations reified onto the characterizing axiom.

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::GraphStore;
use crate::model::{Iri, Node, Triple};
use crate::resolver::{
    is_valid_biomarker, normalize_doi, resolve_anatomical, resolve_biomarker, resolve_cell_type,
    Resolved,
};
use crate::row::Row;
use crate::vocab::{ccf, obo, owl};

use super::BsOntology;

/// The row's combined biomarkers that qualify for a marker set: named
/// entries with valid HGNC identifiers, first mention wins. Unnamed entries
/// are never registered, so they are left out here too.
#[must_use]
pub fn characterizing_markers(row: &Row) -> Vec<Resolved> {
    let mut markers: Vec<Resolved> = Vec::new();
    for record in row
        .biomarkers
        .iter()
        .filter(|b| b.is_named() && is_valid_biomarker(&b.id))
    {
        let resolved = resolve_biomarker(&record.id, record.label());
        if !markers.iter().any(|m| m.iri == resolved.iri) {
            markers.push(resolved);
        }
    }
    markers
}

impl<G: GraphStore> BsOntology<G> {
    /// Characterizes the row's most specific cell type.
    ///
    /// Asserts `cell ⊑ located_in some structure` for the most specific
    /// structure. When the row has valid HGNC biomarkers, also asserts
    /// `cell ⊑ has_characterizing_marker_set some (sequence_collection ⊓
    /// has_marker_component some m₁ ⊓ …)` and reifies that axiom with one
    /// `dcterms:references` per `doi:` reference. The intersection itself is
    /// a subclass of `ccf:characterizing_biomarker_set`.
    ///
    /// With `require_biomarkers`, a row whose combined biomarker list is
    /// empty fails before anything is written.
    ///
    /// # Errors
    ///
    /// [`Error::MissingAnatomicalStructure`], [`Error::MissingCellType`],
    /// [`Error::MissingBiomarkerData`], or [`Error::InvalidIdentifier`].
    pub fn characterize_with_biomarkers(&mut self, row: &Row, require_biomarkers: bool) -> Result<()> {
        let structure = row
            .most_specific_anatomical_structure()
            .ok_or(Error::MissingAnatomicalStructure)?;
        let cell = row.most_specific_cell_type().ok_or(Error::MissingCellType)?;
        if require_biomarkers && row.biomarkers.is_empty() {
            return Err(Error::MissingBiomarkerData);
        }

        let structure_iri = resolve_anatomical(&structure.id, structure.label())?.iri;
        let cell_iri = resolve_cell_type(
            &cell.id,
            cell.label(),
            &self.config.provisional_cell_type_markers,
        )?
        .iri;

        let located = self
            .graph
            .existential_restriction(obo::LOCATED_IN, Node::from(&structure_iri));
        self.graph.add_subclass_of(&cell_iri, located);

        let markers = characterizing_markers(row);
        if markers.is_empty() {
            return Ok(());
        }

        let mut members = vec![Node::from(obo::SEQUENCE_COLLECTION)];
        for marker in &markers {
            members.push(
                self.graph
                    .existential_restriction(ccf::HAS_MARKER_COMPONENT, Node::from(&marker.iri)),
            );
            self.graph.add_annotation(&marker.iri, ccf::CHARACTERIZES, &cell_iri);
        }
        let marker_set = self.graph.boolean_intersection(members);
        self.graph.add_triple(Triple::new(
            marker_set.clone(),
            owl::RDFS_SUBCLASS_OF,
            ccf::CHARACTERIZING_BIOMARKER_SET,
        ));
        let characterizing = self
            .graph
            .existential_restriction(obo::HAS_CHARACTERIZING_MARKER_SET, marker_set);
        self.graph.add_subclass_of(&cell_iri, characterizing.clone());

        let citations: Vec<Iri> = row
            .references
            .iter()
            .filter_map(|r| r.doi.as_deref())
            .filter_map(normalize_doi)
            .collect();
        if !citations.is_empty() {
            let axiom = self
                .graph
                .reified_axiom(&cell_iri, owl::RDFS_SUBCLASS_OF, characterizing);
            for doi in citations {
                self.graph
                    .add_annotation(axiom.clone(), owl::DCTERMS_REFERENCES, doi);
            }
        }

        debug!(cell = %cell_iri, markers = markers.len(), "characterized cell type");
        Ok(())
    }
}
