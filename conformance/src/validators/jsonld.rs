//! JSON-LD 1.1 validator.
//!
//! Accepts the flattened shape the CCF writer emits: a prefix-only
//! `@context` and a `@graph` of node objects. Compact IRIs are expanded
//! through the context; values are arrays of `{"@id"}`, `{"@value"}` or
//! plain strings.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::Statement;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "artifact/jsonld";
const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Validates a JSON-LD document and returns its statements if it is well
/// formed.
pub fn validate(content: &str) -> (ConformanceReport, Option<Vec<Statement>>) {
    let mut report = ConformanceReport::new();
    let value: Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(e) => {
            report.push(TestResult::fail(
                VALIDATOR,
                format!("Artifact is not valid JSON: {e}"),
            ));
            return (report, None);
        }
    };

    let context: HashMap<&str, &str> = match value.get("@context").and_then(Value::as_object) {
        Some(ctx) => ctx
            .iter()
            .filter_map(|(k, v)| Some((k.as_str(), v.as_str()?)))
            .collect(),
        None => {
            report.push(TestResult::fail(VALIDATOR, "Missing @context object"));
            return (report, None);
        }
    };
    let Some(graph) = value.get("@graph").and_then(Value::as_array) else {
        report.push(TestResult::fail(VALIDATOR, "Missing @graph array"));
        return (report, None);
    };

    let mut statements = Vec::new();
    let mut issues = Vec::new();
    for node in graph {
        let Some(node) = node.as_object() else {
            issues.push("@graph entry is not an object".to_string());
            continue;
        };
        if let Err(issue) = read_node(node, &context, &mut statements) {
            issues.push(issue);
        }
    }
    if statements.is_empty() {
        issues.push("No statements found".to_string());
    }

    if issues.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!(
                "JSON-LD artifact is well formed ({} nodes, {} triples)",
                graph.len(),
                statements.len()
            ),
        ));
        (report, Some(statements))
    } else {
        issues.truncate(10);
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "JSON-LD artifact has structural issues",
            issues,
        ));
        (report, None)
    }
}

fn read_node(
    node: &Map<String, Value>,
    context: &HashMap<&str, &str>,
    statements: &mut Vec<Statement>,
) -> Result<(), String> {
    let subject = node
        .get("@id")
        .and_then(Value::as_str)
        .ok_or_else(|| "node object without @id".to_string())?;
    let subject = expand(subject, context)?;
    for (key, values) in node {
        if key == "@id" {
            continue;
        }
        let predicate = if key == "@type" {
            RDF_TYPE.to_string()
        } else {
            expand(key, context)?
        };
        let values = values
            .as_array()
            .ok_or_else(|| format!("{subject}: {key} is not an array"))?;
        for v in values {
            let object = match v {
                Value::String(s) if key == "@type" => expand(s, context)?,
                Value::String(s) => s.clone(),
                Value::Object(o) => match (o.get("@id"), o.get("@value")) {
                    (Some(Value::String(id)), _) => expand(id, context)?,
                    (None, Some(Value::String(lexical))) => lexical.clone(),
                    _ => return Err(format!("{subject}: unreadable value for {key}")),
                },
                _ => return Err(format!("{subject}: unreadable value for {key}")),
            };
            statements.push(Statement::new(subject.clone(), predicate.clone(), object));
        }
    }
    Ok(())
}

/// Expands a compact IRI through the context. Blank node labels and
/// absolute IRIs pass through.
fn expand(term: &str, context: &HashMap<&str, &str>) -> Result<String, String> {
    if term.starts_with("_:") || term.contains("://") {
        return Ok(term.to_string());
    }
    let (prefix, local) = term
        .split_once(':')
        .ok_or_else(|| format!("relative IRI {term:?}"))?;
    let ns = context
        .get(prefix)
        .ok_or_else(|| format!("undefined prefix in {term:?}"))?;
    Ok(format!("{ns}{local}"))
}
