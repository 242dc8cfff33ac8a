//! Fixed vocabulary of the CCF Biological Structure Ontology.
//!
//! Every predicate and root class the engine emits is named here. These IRIs
//! are part of the observable output contract: downstream consumers match on
//! them, so they must not drift between releases.

/// Standard semantic-web namespaces.
pub mod ns {
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// RDF namespace.
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    /// Dublin Core terms namespace.
    pub const DCTERMS: &str = "http://purl.org/dc/terms/";
    /// OBO in OWL namespace.
    pub const OBO_IN_OWL: &str = "http://www.geneontology.org/formats/oboInOwl#";
    /// OBO Foundry PURL namespace.
    pub const OBO: &str = "http://purl.obolibrary.org/obo/";
    /// CCF namespace.
    pub const CCF: &str = "http://purl.org/ccf/";
    /// FMA namespace.
    pub const FMA: &str = "http://purl.org/sig/ont/fma/";
    /// HGNC namespace.
    pub const HGNC: &str = "http://purl.bioontology.org/ontology/HGNC/";
    /// Resolver base for normalized DOI references.
    pub const DOI: &str = "http://doi.org/";
}

/// Prefix bindings used by the Turtle, RDF/XML and JSON-LD writers.
///
/// Order matters for compaction: the longest matching namespace wins, so
/// more specific namespaces are listed first.
pub const PREFIXES: &[(&str, &str)] = &[
    ("owl", ns::OWL),
    ("rdf", ns::RDF),
    ("rdfs", ns::RDFS),
    ("xsd", ns::XSD),
    ("dcterms", ns::DCTERMS),
    ("oboInOwl", ns::OBO_IN_OWL),
    ("fma", ns::FMA),
    ("hgnc", ns::HGNC),
    ("ccf", ns::CCF),
    ("obo", ns::OBO),
];

/// OWL and RDF(S) terms.
pub mod owl {
    /// `owl:Ontology`.
    pub const ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
    /// `owl:Class`.
    pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    /// `owl:Restriction`.
    pub const RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
    /// `owl:Axiom`.
    pub const AXIOM: &str = "http://www.w3.org/2002/07/owl#Axiom";
    /// `owl:ObjectProperty`.
    pub const OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    /// `owl:AnnotationProperty`.
    pub const ANNOTATION_PROPERTY: &str = "http://www.w3.org/2002/07/owl#AnnotationProperty";
    /// `owl:onProperty`.
    pub const ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
    /// `owl:someValuesFrom`.
    pub const SOME_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#someValuesFrom";
    /// `owl:intersectionOf`.
    pub const INTERSECTION_OF: &str = "http://www.w3.org/2002/07/owl#intersectionOf";
    /// `owl:annotatedSource`.
    pub const ANNOTATED_SOURCE: &str = "http://www.w3.org/2002/07/owl#annotatedSource";
    /// `owl:annotatedProperty`.
    pub const ANNOTATED_PROPERTY: &str = "http://www.w3.org/2002/07/owl#annotatedProperty";
    /// `owl:annotatedTarget`.
    pub const ANNOTATED_TARGET: &str = "http://www.w3.org/2002/07/owl#annotatedTarget";
    /// `rdf:type`.
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:first`.
    pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    /// `rdf:rest`.
    pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    /// `rdf:nil`.
    pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    /// `rdfs:label`.
    pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    /// `rdfs:subClassOf`.
    pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    /// `xsd:string`.
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    /// `xsd:boolean`.
    pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    /// `dcterms:references`.
    pub const DCTERMS_REFERENCES: &str = "http://purl.org/dc/terms/references";
    /// `oboInOwl:id`.
    pub const OBO_IN_OWL_ID: &str = "http://www.geneontology.org/formats/oboInOwl#id";
}

/// CCF vocabulary.
pub mod ccf {
    /// Preferred (lowercased) label annotation.
    pub const PREF_LABEL: &str = "http://purl.org/ccf/ccf_pref_label";
    /// Anatomical partonomy annotation.
    pub const PART_OF: &str = "http://purl.org/ccf/ccf_part_of";
    /// Cell-to-structure location annotation.
    pub const LOCATED_IN: &str = "http://purl.org/ccf/ccf_located_in";
    /// Biomarker-to-cell annotation.
    pub const CHARACTERIZES: &str = "http://purl.org/ccf/ccf_characterizes";
    /// Kind tag annotation (`AS`, `CT`, `BM`).
    pub const ASCTB_TYPE: &str = "http://purl.org/ccf/ccf_asctb_type";
    /// Cell lineage annotation.
    pub const CT_ISA: &str = "http://purl.org/ccf/ccf_ct_isa";
    /// Provisional flag annotation.
    pub const IS_PROVISIONAL: &str = "http://purl.org/ccf/ccf_is_provisional";
    /// Member restriction property inside a marker set.
    pub const HAS_MARKER_COMPONENT: &str = "http://purl.org/ccf/has_marker_component";
    /// Root class of registered anatomical structures.
    pub const ANATOMICAL_STRUCTURE: &str = "http://purl.org/ccf/anatomical_structure";
    /// Root class of registered cell types.
    pub const CELL_TYPE: &str = "http://purl.org/ccf/cell_type";
    /// Root class of registered biomarkers.
    pub const BIOMARKER: &str = "http://purl.org/ccf/biomarker";
    /// Class of derived characterizing biomarker sets.
    pub const CHARACTERIZING_BIOMARKER_SET: &str =
        "http://purl.org/ccf/characterizing_biomarker_set";
}

/// OBO Foundry terms.
pub mod obo {
    /// RO `located in`.
    pub const LOCATED_IN: &str = "http://purl.obolibrary.org/obo/RO_0001025";
    /// RO `has characterizing marker set`.
    pub const HAS_CHARACTERIZING_MARKER_SET: &str = "http://purl.obolibrary.org/obo/RO_0015004";
    /// UBERON `body proper`, the partonomy root.
    pub const BODY: &str = "http://purl.obolibrary.org/obo/UBERON_0013702";
    /// UBERON `anatomical entity`.
    pub const ANATOMICAL_ENTITY: &str = "http://purl.obolibrary.org/obo/UBERON_0001062";
    /// CL `cell`, the lineage root.
    pub const CELL: &str = "http://purl.obolibrary.org/obo/CL_0000000";
    /// SO `sequence_collection`.
    pub const SEQUENCE_COLLECTION: &str = "http://purl.obolibrary.org/obo/SO_0001260";
    /// IAO `definition`.
    pub const DEFINITION: &str = "http://purl.obolibrary.org/obo/IAO_0000115";
}

/// Definition attached to every provisional term.
pub const PROVISIONAL_DEFINITION: &str =
    "This term is a provisional placeholder minted from an ASCT+B table label; \
     it has no stable identifier in a reference ontology yet.";

/// The three kinds of term an ASCT+B row mentions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// Anatomical structure.
    AnatomicalStructure,
    /// Cell type.
    CellType,
    /// Biomarker (gene or protein).
    Biomarker,
}

impl TermKind {
    /// Returns the tag written to `ccf_asctb_type`.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            TermKind::AnatomicalStructure => "AS",
            TermKind::CellType => "CT",
            TermKind::Biomarker => "BM",
        }
    }

    /// Returns the root class that provisional terms of this kind fall under.
    #[must_use]
    pub fn root_class(self) -> &'static str {
        match self {
            TermKind::AnatomicalStructure => ccf::ANATOMICAL_STRUCTURE,
            TermKind::CellType => ccf::CELL_TYPE,
            TermKind::Biomarker => ccf::BIOMARKER,
        }
    }
}

impl std::fmt::Display for TermKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TermKind::AnatomicalStructure => "anatomical structure",
            TermKind::CellType => "cell type",
            TermKind::Biomarker => "biomarker",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_names_unique() {
        let mut names = std::collections::HashSet::new();
        for (name, _) in PREFIXES {
            assert!(names.insert(*name), "Duplicate prefix: {name}");
        }
    }

    #[test]
    fn ccf_terms_live_in_ccf_namespace() {
        for iri in [
            ccf::PREF_LABEL,
            ccf::PART_OF,
            ccf::LOCATED_IN,
            ccf::ASCTB_TYPE,
            ccf::CT_ISA,
            ccf::IS_PROVISIONAL,
            ccf::HAS_MARKER_COMPONENT,
            ccf::ANATOMICAL_STRUCTURE,
            ccf::CELL_TYPE,
            ccf::BIOMARKER,
        ] {
            assert!(iri.starts_with(ns::CCF), "{iri} outside CCF namespace");
        }
    }

    #[test]
    fn kind_tags() {
        assert_eq!(TermKind::AnatomicalStructure.tag(), "AS");
        assert_eq!(TermKind::CellType.tag(), "CT");
        assert_eq!(TermKind::Biomarker.tag(), "BM");
    }
}
