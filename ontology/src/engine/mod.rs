//! The ontology mutation engine.
//!
//! [`BsOntology`] owns the graph and the cross-row chain state. Each row is
//! applied by a fixed sequence of passes, each taking the engine by exclusive
//! reference:
//!
//! 1. [`register_anatomical_structures`](BsOntology::register_anatomical_structures)
//! 2. [`register_cell_types`](BsOntology::register_cell_types)
//! 3. [`register_biomarkers`](BsOntology::register_biomarkers)
//! 4. [`link_partonomy`](BsOntology::link_partonomy)
//! 5. [`link_cell_lineage`](BsOntology::link_cell_lineage)
//! 6. [`link_cell_location`](BsOntology::link_cell_location)
//! 7. [`characterize_with_biomarkers`](BsOntology::characterize_with_biomarkers)
//!
//! Registration must precede linking, and linking must precede
//! characterization. A failing pass leaves the effects of earlier passes of
//! the same row in place.

mod characterization;
mod linking;
mod registration;

use std::io::Write;

use tracing::{debug, warn};

use crate::config::{EngineConfig, Mode};
use crate::error::Result;
use crate::graph::{text, GraphStore, MemoryGraph};
use crate::model::{Iri, Literal};
use crate::resolver::{Identifier, Resolved};
use crate::row::{Row, TermRecord};
use crate::seed;
use crate::serializer::Format;
use crate::vocab::{ccf, obo, owl, TermKind, PROVISIONAL_DEFINITION};

pub use characterization::characterizing_markers;

/// Annotation properties declared in every ontology, with labels.
const ANNOTATION_PROPERTIES: &[(&str, &str)] = &[
    (ccf::PREF_LABEL, "preferred label"),
    (ccf::PART_OF, "part of"),
    (ccf::LOCATED_IN, "located in"),
    (ccf::CHARACTERIZES, "characterizes"),
    (ccf::ASCTB_TYPE, "asctb type"),
    (ccf::CT_ISA, "cell type is a"),
    (ccf::IS_PROVISIONAL, "is provisional"),
    (owl::DCTERMS_REFERENCES, "references"),
    (owl::OBO_IN_OWL_ID, "id"),
    (obo::DEFINITION, "definition"),
];

/// Object properties declared in every ontology, with labels.
const OBJECT_PROPERTIES: &[(&str, &str)] = &[
    (obo::LOCATED_IN, "located in"),
    (obo::HAS_CHARACTERIZING_MARKER_SET, "has characterizing marker set"),
    (ccf::HAS_MARKER_COMPONENT, "has marker component"),
];

/// Fixed root classes: `(iri, label, parent)`.
const ROOT_CLASSES: &[(&str, &str, Option<&str>)] = &[
    (obo::BODY, "body", None),
    (obo::CELL, "cell", None),
    (obo::ANATOMICAL_ENTITY, "anatomical entity", None),
    (ccf::ANATOMICAL_STRUCTURE, "anatomical structure", Some(obo::ANATOMICAL_ENTITY)),
    (ccf::CELL_TYPE, "cell type", Some(obo::CELL)),
    (ccf::BIOMARKER, "biomarker", None),
    (ccf::CHARACTERIZING_BIOMARKER_SET, "characterizing biomarker set", None),
    (obo::SEQUENCE_COLLECTION, "sequence collection", None),
];

/// Last term each chain asserted, carried from row to row.
#[derive(Debug, Default, Clone)]
struct ChainState {
    structure: Option<Iri>,
    cell_type: Option<Iri>,
}

/// The CCF Biological Structure Ontology under construction.
#[derive(Debug)]
pub struct BsOntology<G = MemoryGraph> {
    graph: G,
    config: EngineConfig,
    chain: ChainState,
}

impl BsOntology<MemoryGraph> {
    /// Creates an ontology backed by a fresh [`MemoryGraph`].
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_graph(MemoryGraph::new(), config)
    }
}

impl<G: GraphStore> BsOntology<G> {
    /// Creates an ontology on top of `graph`, writing the ontology header,
    /// the fixed vocabulary, and the seed hierarchy of the configured organ.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn with_graph(graph: G, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut ontology = Self {
            graph,
            config,
            chain: ChainState::default(),
        };
        ontology.declare_vocabulary();
        ontology.load_seed();
        Ok(ontology)
    }

    /// The graph built so far.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Consumes the engine and returns its graph.
    pub fn into_graph(self) -> G {
        self.graph
    }

    /// The configuration in effect.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Applies every pass of the configured mode to one row, in order.
    ///
    /// # Errors
    ///
    /// Returns the first pass error. Effects of passes that ran before it
    /// remain in the graph.
    pub fn mutate(&mut self, row: &Row) -> Result<()> {
        match self.config.mode {
            Mode::Full => {
                self.register_anatomical_structures(row)?;
                self.register_cell_types(row)?;
                self.register_biomarkers(row)?;
                self.link_partonomy(row)?;
                self.link_cell_lineage(row)?;
                self.link_cell_location(row)?;
                self.characterize_with_biomarkers(row, false)
            }
            Mode::CellBiomarkersOnly => {
                self.register_anatomical_structures(row)?;
                self.register_cell_types(row)?;
                self.register_biomarkers(row)?;
                self.characterize_with_biomarkers(row, true)
            }
        }
    }

    /// Writes the graph in `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn serialize(&self, format: Format, destination: &mut dyn Write) -> Result<()> {
        self.graph.serialize(format, destination)
    }

    fn declare_vocabulary(&mut self) {
        let ontology_iri = Iri::new(self.config.ontology_iri.trim());
        self.graph
            .add_annotation(&ontology_iri, owl::RDF_TYPE, owl::ONTOLOGY);

        for (iri, label) in ANNOTATION_PROPERTIES {
            self.graph.add_annotation(*iri, owl::RDF_TYPE, owl::ANNOTATION_PROPERTY);
            self.graph.add_annotation(*iri, owl::RDFS_LABEL, text(*label));
        }
        for (iri, label) in OBJECT_PROPERTIES {
            self.graph.add_annotation(*iri, owl::RDF_TYPE, owl::OBJECT_PROPERTY);
            self.graph.add_annotation(*iri, owl::RDFS_LABEL, text(*label));
        }
        for (iri, label, parent) in ROOT_CLASSES {
            let class = Iri::new(*iri);
            self.graph.add_class(&class);
            self.graph.add_annotation(&class, owl::RDFS_LABEL, text(*label));
            if let Some(parent) = parent {
                self.graph.add_subclass_of(&class, *parent);
            }
        }
    }

    fn load_seed(&mut self) {
        let Some(organ) = self.config.organ.as_deref() else {
            return;
        };
        let Some(seed) = seed::for_organ(organ) else {
            warn!(organ, "no seed hierarchy for organ");
            return;
        };
        for term in seed.terms {
            let Some(id) = Identifier::parse(term.id) else {
                warn!(id = term.id, "skipping unparsable seed identifier");
                continue;
            };
            let resolved = Resolved {
                iri: id.iri(),
                identifier: id,
                provisional: false,
            };
            let record = TermRecord::new(term.id, term.label, term.label);
            self.register_term(&resolved, &record, TermKind::AnatomicalStructure);
            let parent = term
                .parent
                .and_then(Identifier::parse)
                .map_or_else(|| Iri::new(obo::BODY), |p| p.iri());
            self.graph.set_annotation(&resolved.iri, ccf::PART_OF, parent);
        }
        debug!(organ = seed.organ, terms = seed.terms.len(), "loaded seed hierarchy");
    }

    /// Adds a term node and merges its annotations. Re-registering the same
    /// IRI with the same record adds nothing.
    ///
    /// `oboInOwl:id` carries the identifier as the row wrote it; the resolved
    /// identifier is used only when the row gave none.
    fn register_term(&mut self, resolved: &Resolved, record: &TermRecord, kind: TermKind) {
        let iri = &resolved.iri;
        let source_id = match record.id.trim() {
            "" => resolved.identifier.to_string(),
            id => id.to_string(),
        };
        self.graph.add_class(iri);
        self.graph
            .add_annotation(iri, owl::OBO_IN_OWL_ID, text(source_id));
        self.graph
            .add_annotation(iri, ccf::PREF_LABEL, text(record.label().to_lowercase()));
        self.graph.add_annotation(iri, ccf::ASCTB_TYPE, text(kind.tag()));
        if resolved.provisional {
            self.graph.add_subclass_of(iri, kind.root_class());
            self.graph.add_annotation(iri, owl::RDFS_LABEL, text(record.label()));
            self.graph
                .add_annotation(iri, obo::DEFINITION, text(PROVISIONAL_DEFINITION));
            self.graph
                .add_annotation(iri, ccf::IS_PROVISIONAL, Literal::boolean(true));
        }
        debug!(%iri, %kind, provisional = resolved.provisional, "registered term");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Object, Triple};

    #[test]
    fn header_declares_fixed_vocabulary() {
        let onto = BsOntology::new(EngineConfig::default()).expect("default config");
        let g = onto.graph();
        assert!(g.contains(&Triple::new(
            crate::config::DEFAULT_ONTOLOGY_IRI,
            owl::RDF_TYPE,
            owl::ONTOLOGY
        )));
        for root in [obo::BODY, obo::CELL, ccf::ANATOMICAL_STRUCTURE, ccf::CELL_TYPE, ccf::BIOMARKER] {
            assert!(g.contains(&Triple::new(root, owl::RDF_TYPE, owl::CLASS)), "{root}");
        }
        assert!(g.contains(&Triple::new(
            ccf::PART_OF,
            owl::RDF_TYPE,
            owl::ANNOTATION_PROPERTY
        )));
    }

    #[test]
    fn seed_hierarchy_loaded_for_organ() {
        let config = EngineConfig {
            organ: Some("Kidney".to_string()),
            ..EngineConfig::default()
        };
        let onto = BsOntology::new(config).expect("valid config");
        let g = onto.graph();
        let kidney = "http://purl.obolibrary.org/obo/UBERON_0002113";
        let left = Node::from("http://purl.obolibrary.org/obo/UBERON_0004538");
        assert!(g.contains(&Triple::new(kidney, ccf::PART_OF, obo::BODY)));
        let parents: Vec<_> = g.objects(&left, ccf::PART_OF).collect();
        assert_eq!(parents, vec![&Object::from(kidney)]);
        assert!(g.contains(&Triple::new(kidney, ccf::ASCTB_TYPE, text("AS"))));
    }

    #[test]
    fn unknown_organ_has_no_seed() {
        let config = EngineConfig {
            organ: Some("tail".to_string()),
            ..EngineConfig::default()
        };
        let onto = BsOntology::new(config).expect("valid config");
        assert!(onto.graph().with_predicate(ccf::PART_OF).next().is_none());
    }

    #[test]
    fn invalid_config_rejected() {
        let config = EngineConfig {
            ontology_iri: String::new(),
            ..EngineConfig::default()
        };
        assert!(BsOntology::new(config).is_err());
    }
}
