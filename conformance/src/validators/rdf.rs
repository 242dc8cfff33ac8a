//! RDF 1.1 Turtle / N-Triples validator.
//!
//! Parses the artifact with `sophia_turtle`. A parse error is a failure; an
//! artifact with no triples is a failure too.

use sophia_api::source::TripleSource;
use sophia_api::term::Term;
use sophia_api::triple::Triple;

use super::Statement;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "artifact/rdf";

/// Validates a Turtle 1.1 document and returns its statements if it parses.
pub fn validate_turtle(content: &str) -> (ConformanceReport, Option<Vec<Statement>>) {
    finish("Turtle", collect(sophia_turtle::parser::turtle::parse_str(content)))
}

/// Validates an N-Triples document and returns its statements if it parses.
pub fn validate_ntriples(content: &str) -> (ConformanceReport, Option<Vec<Statement>>) {
    finish("N-Triples", collect(sophia_turtle::parser::nt::parse_str(content)))
}

fn collect<S: TripleSource>(mut source: S) -> Result<Vec<Statement>, String> {
    let mut statements = Vec::new();
    source
        .for_each_triple(|t| {
            statements.push(Statement::new(
                term_text(&t.s()),
                term_text(&t.p()),
                term_text(&t.o()),
            ));
        })
        .map_err(|e| format!("{e:?}"))?;
    Ok(statements)
}

fn term_text<T: Term>(term: &T) -> String {
    if let Some(iri) = term.iri() {
        iri.as_str().to_string()
    } else if let Some(id) = term.bnode_id() {
        format!("_:{}", id.as_str())
    } else if let Some(lexical) = term.lexical_form() {
        lexical.to_string()
    } else {
        String::new()
    }
}

fn finish(
    syntax: &str,
    parsed: Result<Vec<Statement>, String>,
) -> (ConformanceReport, Option<Vec<Statement>>) {
    let mut report = ConformanceReport::new();
    match parsed {
        Ok(statements) if statements.is_empty() => {
            report.push(TestResult::fail(
                VALIDATOR,
                format!("{syntax} artifact contains no triples"),
            ));
            (report, None)
        }
        Ok(statements) => {
            report.push(TestResult::pass(
                VALIDATOR,
                format!("{syntax} artifact parses ({} triples)", statements.len()),
            ));
            (report, Some(statements))
        }
        Err(error) => {
            report.push(TestResult::fail_with_details(
                VALIDATOR,
                format!("{syntax} artifact does not parse"),
                vec![error],
            ));
            (report, None)
        }
    }
}
