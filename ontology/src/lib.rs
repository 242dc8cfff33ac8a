//! CCF Biological Structure Ontology builder.
//!
//! The `ccf-ontology` crate turns ASCT+B table rows (anatomical structures,
//! cell types, biomarkers and references) into an OWL graph: it resolves
//! identifiers to IRIs, mints deterministic provisional identifiers for terms
//! without one, builds partonomy and lineage chains, location links and
//! biomarker characterization axioms, and reifies citations onto those
//! axioms.
//!
//! # Entry Point
//!
//! ```
//! use ccf_ontology::{parse_rows, Driver, EngineConfig, Format};
//!
//! let rows = parse_rows(
//!     r#"{"data": [{
//!         "anatomical_structures": [{"id": "UBERON:0002113", "name": "kidney"}],
//!         "cell_types": [{"id": "CL:0000084", "name": "T cell"}],
//!         "biomarkers": [{"id": "HGNC:1678", "name": "CD4"}]
//!     }]}"#,
//! )?;
//! let mut driver = Driver::new(EngineConfig::default())?;
//! let report = driver.run(&rows);
//! assert!(report.is_clean());
//!
//! let mut turtle = Vec::new();
//! driver.ontology().serialize(Format::Turtle, &mut turtle)?;
//! # Ok::<(), ccf_ontology::Error>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod graph;
pub mod model;
pub mod resolver;
pub mod row;
pub mod seed;
pub mod serializer;
pub mod vocab;

pub use config::{ChainScope, EngineConfig, LocationLinks, Mode};
pub use driver::{Driver, RowFailure, RunReport};
pub use engine::BsOntology;
pub use error::{Error, Result};
pub use graph::{GraphStore, MemoryGraph};
pub use model::{Iri, Literal, Node, Object, Triple};
pub use resolver::{provisional_id, Identifier, Prefix, Resolved};
pub use row::{load_rows, most_specific, parse_rows, Reference, Row, TermRecord};
pub use serializer::Format;
pub use vocab::TermKind;
