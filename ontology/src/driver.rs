//! Batch driver: folds rows through the engine in input order, isolating
//! row failures.

use std::fmt;

use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::engine::BsOntology;
use crate::error::{Error, Result};
use crate::graph::{GraphStore, MemoryGraph};
use crate::row::Row;

/// A row the engine rejected.
#[derive(Debug)]
pub struct RowFailure {
    /// Zero-based position of the row in the input.
    pub index: usize,
    /// Organ (spreadsheet) the row came from.
    pub organ: String,
    /// Cause.
    pub error: Error,
}

impl fmt::Display for RowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, row {}, in <spreadsheet> {}",
            self.error, self.index, self.organ
        )
    }
}

/// Outcome of one [`Driver::run`].
#[derive(Debug, Default)]
pub struct RunReport {
    /// Rows seen.
    pub rows: usize,
    /// Rows whose every pass succeeded.
    pub applied: usize,
    /// Rows that failed, in input order.
    pub failures: Vec<RowFailure>,
}

impl RunReport {
    /// True when no row failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Applies rows to a [`BsOntology`] one at a time, in order.
///
/// A failing row is logged and skipped; passes of that row that ran before
/// the failure keep their effects.
#[derive(Debug)]
pub struct Driver<G = MemoryGraph> {
    ontology: BsOntology<G>,
}

impl Driver<MemoryGraph> {
    /// Creates a driver over a fresh in-memory ontology.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self::from_ontology(BsOntology::new(config)?))
    }
}

impl<G: GraphStore> Driver<G> {
    /// Wraps an existing ontology; its chain state carries into the next run.
    pub fn from_ontology(ontology: BsOntology<G>) -> Self {
        Self { ontology }
    }

    /// Applies every row. Never aborts on a row error.
    pub fn run<'a, I>(&mut self, rows: I) -> RunReport
    where
        I: IntoIterator<Item = &'a Row>,
    {
        let mut report = RunReport::default();
        for (index, row) in rows.into_iter().enumerate() {
            report.rows += 1;
            match self.ontology.mutate(row) {
                Ok(()) => report.applied += 1,
                Err(error) => {
                    let failure = RowFailure {
                        index,
                        organ: self.ontology.config().organ_name().to_string(),
                        error,
                    };
                    warn!(
                        row = failure.index,
                        organ = %failure.organ,
                        error = %failure.error,
                        "{failure}"
                    );
                    report.failures.push(failure);
                }
            }
        }
        info!(
            rows = report.rows,
            applied = report.applied,
            failed = report.failures.len(),
            triples = self.ontology.graph().triples().len(),
            "run complete"
        );
        report
    }

    /// The ontology built so far.
    pub fn ontology(&self) -> &BsOntology<G> {
        &self.ontology
    }

    /// Consumes the driver and returns the ontology.
    pub fn into_ontology(self) -> BsOntology<G> {
        self.ontology
    }
}
