//! CCF vocabulary validator.
//!
//! Checks the statements of a parsed artifact against the fixed output
//! contract: an ontology header, the root classes, the declared CCF
//! properties, and the provisional flag on every `ASCTB-TEMP` term.

use std::collections::{HashMap, HashSet};

use ccf_ontology::vocab::{ccf, obo, owl};
use ccf_ontology::Prefix;

use super::Statement;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "artifact/vocabulary";

/// Root classes every artifact declares.
const ROOT_CLASSES: &[&str] = &[
    obo::BODY,
    obo::CELL,
    ccf::ANATOMICAL_STRUCTURE,
    ccf::CELL_TYPE,
    ccf::BIOMARKER,
];

/// CCF annotation properties every artifact declares.
const ANNOTATION_PROPERTIES: &[&str] = &[
    ccf::PREF_LABEL,
    ccf::PART_OF,
    ccf::LOCATED_IN,
    ccf::CHARACTERIZES,
    ccf::ASCTB_TYPE,
    ccf::CT_ISA,
    ccf::IS_PROVISIONAL,
];

/// Object properties every artifact declares.
const OBJECT_PROPERTIES: &[&str] = &[
    obo::LOCATED_IN,
    obo::HAS_CHARACTERIZING_MARKER_SET,
    ccf::HAS_MARKER_COMPONENT,
];

/// Runs every vocabulary check over `statements`.
pub fn validate(statements: &[Statement]) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let types = types_by_subject(statements);

    let ontologies: Vec<&str> = types
        .iter()
        .filter(|(_, t)| t.contains(owl::ONTOLOGY))
        .map(|(s, _)| *s)
        .collect();
    match ontologies.as_slice() {
        [iri] => report.push(TestResult::pass(
            VALIDATOR,
            format!("Ontology header present ({iri})"),
        )),
        [] => report.push(TestResult::fail(VALIDATOR, "No owl:Ontology header")),
        _ => report.push(TestResult::fail_with_details(
            VALIDATOR,
            "More than one owl:Ontology header",
            ontologies.iter().map(|s| (*s).to_string()).collect(),
        )),
    }

    check_declared(&mut report, &types, ROOT_CLASSES, owl::CLASS, "root classes");
    check_declared(
        &mut report,
        &types,
        ANNOTATION_PROPERTIES,
        owl::ANNOTATION_PROPERTY,
        "CCF annotation properties",
    );
    check_declared(
        &mut report,
        &types,
        OBJECT_PROPERTIES,
        owl::OBJECT_PROPERTY,
        "object properties",
    );
    check_provisional(&mut report, statements);
    report
}

fn types_by_subject(statements: &[Statement]) -> HashMap<&str, HashSet<&str>> {
    let mut types: HashMap<&str, HashSet<&str>> = HashMap::new();
    for s in statements.iter().filter(|s| s.predicate == owl::RDF_TYPE) {
        types
            .entry(s.subject.as_str())
            .or_default()
            .insert(s.object.as_str());
    }
    types
}

fn check_declared(
    report: &mut ConformanceReport,
    types: &HashMap<&str, HashSet<&str>>,
    expected: &[&str],
    kind: &str,
    what: &str,
) {
    let missing: Vec<String> = expected
        .iter()
        .filter(|iri| !types.get(**iri).is_some_and(|t| t.contains(kind)))
        .map(|iri| (*iri).to_string())
        .collect();
    if missing.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("All {} {what} declared", expected.len()),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            format!("{} {what} not declared", missing.len()),
            missing,
        ));
    }
}

/// Every typed term in the `ASCTB-TEMP` namespace must carry
/// `ccf_is_provisional true`; a stable term carrying it is only a warning.
fn check_provisional(report: &mut ConformanceReport, statements: &[Statement]) {
    let temp_ns = Prefix::AsctbTemp.namespace();
    let mut terms: Vec<&str> = Vec::new();
    let mut flagged: HashSet<&str> = HashSet::new();
    for s in statements {
        if s.predicate == ccf::ASCTB_TYPE && !terms.contains(&s.subject.as_str()) {
            terms.push(s.subject.as_str());
        }
        if s.predicate == ccf::IS_PROVISIONAL && s.object == "true" {
            flagged.insert(s.subject.as_str());
        }
    }

    let (provisional, stable): (Vec<&str>, Vec<&str>) =
        terms.into_iter().partition(|t| t.starts_with(temp_ns));
    let unflagged: Vec<String> = provisional
        .iter()
        .filter(|t| !flagged.contains(**t))
        .map(|t| (*t).to_string())
        .collect();
    if unflagged.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!(
                "{} provisional terms flagged, {} stable terms",
                provisional.len(),
                stable.len()
            ),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            format!("{} provisional terms lack ccf_is_provisional", unflagged.len()),
            unflagged,
        ));
    }

    let misflagged = stable.iter().filter(|t| flagged.contains(**t)).count();
    if misflagged > 0 {
        report.push(TestResult::warn(
            VALIDATOR,
            format!("{misflagged} terms with stable identifiers are flagged provisional"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared() -> Vec<Statement> {
        let mut statements = vec![Statement::new(
            "http://example.org/o.owl",
            owl::RDF_TYPE,
            owl::ONTOLOGY,
        )];
        for iri in ROOT_CLASSES {
            statements.push(Statement::new(*iri, owl::RDF_TYPE, owl::CLASS));
        }
        for iri in ANNOTATION_PROPERTIES {
            statements.push(Statement::new(*iri, owl::RDF_TYPE, owl::ANNOTATION_PROPERTY));
        }
        for iri in OBJECT_PROPERTIES {
            statements.push(Statement::new(*iri, owl::RDF_TYPE, owl::OBJECT_PROPERTY));
        }
        statements
    }

    #[test]
    fn complete_vocabulary_passes() {
        let report = validate(&declared());
        assert!(report.all_passed(), "{report:?}");
    }

    #[test]
    fn missing_root_class_fails() {
        let statements: Vec<_> = declared()
            .into_iter()
            .filter(|s| s.subject != obo::BODY)
            .collect();
        let report = validate(&statements);
        assert_eq!(report.failure_count(), 1);
        let failure = report
            .results
            .iter()
            .find(|r| r.is_failure())
            .expect("one failure");
        assert_eq!(failure.details, vec![obo::BODY.to_string()]);
    }

    #[test]
    fn unflagged_provisional_term_fails() {
        let temp = "http://purl.org/ccf/ASCTB-TEMP_left-kidney";
        let mut statements = declared();
        statements.push(Statement::new(temp, ccf::ASCTB_TYPE, "AS"));
        assert_eq!(validate(&statements).failure_count(), 1);
        statements.push(Statement::new(temp, ccf::IS_PROVISIONAL, "true"));
        assert!(validate(&statements).all_passed());
    }
}
