//! RDF/XML validator.
//!
//! Streams the document with `quick_xml` and reads the RDF/XML striped
//! syntax: node elements (`rdf:Description` or typed), property elements
//! carrying `rdf:resource`, `rdf:nodeID`, text, or a nested node element,
//! and property attributes on node elements. `rdf:parseType` and reification
//! by `rdf:ID` are not read; an artifact that uses them fails the structure
//! check.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::Statement;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "artifact/rdf-xml";
const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

enum Frame {
    Root,
    Node(String),
    Property {
        subject: String,
        predicate: String,
        text: String,
        has_object: bool,
    },
}

/// Striped-syntax state machine.
struct RdfXmlReader {
    namespaces: HashMap<String, String>,
    stack: Vec<Frame>,
    statements: Vec<Statement>,
    issues: Vec<String>,
    saw_root: bool,
    next_blank: usize,
}

impl RdfXmlReader {
    fn new() -> Self {
        Self {
            namespaces: HashMap::new(),
            stack: Vec::new(),
            statements: Vec::new(),
            issues: Vec::new(),
            saw_root: false,
            next_blank: 0,
        }
    }

    /// Expands `prefix:local` through the declared namespaces.
    fn expand(&mut self, qname: &str) -> Option<String> {
        let Some((prefix, local)) = qname.split_once(':') else {
            self.issues.push(format!("Unqualified name {qname}"));
            return None;
        };
        match self.namespaces.get(prefix) {
            Some(ns) => Some(format!("{ns}{local}")),
            None => {
                self.issues.push(format!("Unbound prefix {prefix}:"));
                None
            }
        }
    }

    /// Collects the element's attributes, binding any `xmlns:` declarations
    /// first. Returns `(qualified name, value)` pairs of the rest.
    fn attributes(&mut self, e: &BytesStart<'_>) -> Vec<(String, String)> {
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = match attr {
                Ok(attr) => attr,
                Err(err) => {
                    self.issues.push(format!("Malformed attribute: {err}"));
                    continue;
                }
            };
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = match attr.unescape_value() {
                Ok(value) => value.to_string(),
                Err(err) => {
                    self.issues.push(format!("Bad attribute value for {key}: {err}"));
                    continue;
                }
            };
            if let Some(prefix) = key.strip_prefix("xmlns:") {
                self.namespaces.insert(prefix.to_string(), value);
            } else if key != "xmlns" && !key.starts_with("xml:") {
                attributes.push((key, value));
            }
        }
        attributes
    }

    fn handle_start(&mut self, e: &BytesStart<'_>) {
        let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let attributes = self.attributes(e);
        let Some(element) = self.expand(&name) else {
            // keep the stack balanced for the matching end tag
            self.stack.push(Frame::Root);
            return;
        };
        match self.stack.last() {
            None => {
                if element != format!("{RDF_NS}RDF") {
                    self.issues.push(format!("Root element is {name}, not rdf:RDF"));
                }
                self.saw_root = true;
                self.stack.push(Frame::Root);
            }
            Some(Frame::Root) => self.node_element(&element, attributes, None),
            Some(Frame::Property {
                subject, predicate, ..
            }) => {
                let parent = (subject.clone(), predicate.clone());
                self.node_element(&element, attributes, Some(parent));
            }
            Some(Frame::Node(subject)) => {
                let subject = subject.clone();
                self.property_element(subject, element, attributes);
            }
        }
    }

    fn node_element(
        &mut self,
        element: &str,
        attributes: Vec<(String, String)>,
        parent: Option<(String, String)>,
    ) {
        let mut subject = None;
        let mut properties = Vec::new();
        for (key, value) in attributes {
            match key.as_str() {
                "rdf:about" => subject = Some(value),
                "rdf:nodeID" => subject = Some(format!("_:{value}")),
                "rdf:ID" => self.issues.push(format!("rdf:ID is not read ({value})")),
                _ => properties.push((key, value)),
            }
        }
        let subject = subject.unwrap_or_else(|| {
            self.next_blank += 1;
            format!("_:genid{}", self.next_blank)
        });

        if let Some((parent_subject, predicate)) = parent {
            self.statements
                .push(Statement::new(parent_subject, predicate, subject.clone()));
            if let Some(Frame::Property { has_object, .. }) = self.stack.last_mut() {
                *has_object = true;
            }
        }
        if element != format!("{RDF_NS}Description") {
            self.statements.push(Statement::new(
                subject.clone(),
                format!("{RDF_NS}type"),
                element,
            ));
        }
        for (key, value) in properties {
            if let Some(predicate) = self.expand(&key) {
                self.statements
                    .push(Statement::new(subject.clone(), predicate, value));
            }
        }
        self.stack.push(Frame::Node(subject));
    }

    fn property_element(
        &mut self,
        subject: String,
        predicate: String,
        attributes: Vec<(String, String)>,
    ) {
        let mut object = None;
        for (key, value) in attributes {
            match key.as_str() {
                "rdf:resource" => object = Some(value),
                "rdf:nodeID" => object = Some(format!("_:{value}")),
                "rdf:datatype" => {}
                "rdf:parseType" => self
                    .issues
                    .push(format!("rdf:parseType=\"{value}\" is not read")),
                _ => self
                    .issues
                    .push(format!("Unexpected attribute {key} on {predicate}")),
            }
        }
        let has_object = object.is_some();
        if let Some(object) = object {
            self.statements
                .push(Statement::new(subject.clone(), predicate.clone(), object));
        }
        self.stack.push(Frame::Property {
            subject,
            predicate,
            text: String::new(),
            has_object,
        });
    }

    fn handle_text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(Frame::Property { text: buffer, .. }) => buffer.push_str(text),
            _ if text.trim().is_empty() => {}
            _ => self
                .issues
                .push(format!("Stray text outside a property element: {}", text.trim())),
        }
    }

    fn handle_end(&mut self) {
        if let Some(Frame::Property {
            subject,
            predicate,
            text,
            has_object,
        }) = self.stack.pop()
        {
            if has_object {
                if !text.trim().is_empty() {
                    self.issues
                        .push(format!("Property {predicate} of {subject} has both an object and text"));
                }
            } else {
                self.statements.push(Statement::new(subject, predicate, text));
            }
        }
    }
}

/// Validates an RDF/XML document and returns its statements if it is well
/// formed.
pub fn validate(content: &str) -> (ConformanceReport, Option<Vec<Statement>>) {
    let mut report = ConformanceReport::new();
    let mut reader = Reader::from_str(content);
    let mut parser = RdfXmlReader::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => parser.handle_start(e),
            Ok(Event::Empty(ref e)) => {
                parser.handle_start(e);
                parser.handle_end();
            }
            Ok(Event::Text(ref e)) => match e.unescape() {
                Ok(text) => parser.handle_text(&text),
                Err(err) => parser.issues.push(format!("Bad text content: {err}")),
            },
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                parser.handle_text(&text);
            }
            Ok(Event::End(_)) => parser.handle_end(),
            Ok(Event::Eof) => break,
            Err(err) => {
                parser.issues.push(format!("Not well-formed XML: {err}"));
                break;
            }
            _ => {}
        }
    }
    if !parser.saw_root {
        parser.issues.push("Missing rdf:RDF root element".to_string());
    }
    if !parser.stack.is_empty() {
        parser
            .issues
            .push(format!("Document ends with {} unclosed elements", parser.stack.len()));
    }
    if parser.namespaces.get("rdf").map(String::as_str) != Some(RDF_NS) {
        parser
            .issues
            .push("rdf prefix is not bound to the RDF namespace".to_string());
    }
    if parser.statements.is_empty() {
        parser.issues.push("No statements found".to_string());
    }

    let RdfXmlReader {
        statements,
        mut issues,
        ..
    } = parser;
    if issues.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("RDF/XML artifact is well formed ({} triples)", statements.len()),
        ));
        (report, Some(statements))
    } else {
        issues.truncate(10);
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "RDF/XML artifact has structural issues",
            issues,
        ));
        (report, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rdf:RDF
   xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
   xmlns:ccf="http://purl.org/ccf/">
  <rdf:Description rdf:about="http://purl.org/ccf/ASCTB-TEMP_x">
    <rdf:type rdf:resource="http://www.w3.org/2002/07/owl#Class"/>
    <ccf:ccf_pref_label>x &amp; y</ccf:ccf_pref_label>
    <ccf:ccf_part_of rdf:nodeID="b0"/>
  </rdf:Description>
</rdf:RDF>
"#;

    #[test]
    fn reads_flat_descriptions() {
        let (report, statements) = validate(DOC);
        assert!(report.all_passed(), "{report:?}");
        let statements = statements.expect("well formed");
        assert_eq!(statements.len(), 3);
        assert_eq!(statements[0].predicate, format!("{RDF_NS}type"));
        assert_eq!(statements[1].object, "x & y");
        assert_eq!(statements[2].object, "_:b0");
    }

    #[test]
    fn reads_typed_and_nested_nodes() {
        let doc = r#"<rdf:RDF xmlns:owl="http://www.w3.org/2002/07/owl#"
    xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
    xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
    xmlns:ccf="http://purl.org/ccf/">
  <owl:Class ccf:ccf_pref_label="t cell" rdf:about="http://purl.obolibrary.org/obo/CL_0000084">
    <rdfs:subClassOf>
      <owl:Restriction>
        <owl:onProperty rdf:resource="http://purl.obolibrary.org/obo/RO_0001025"/>
      </owl:Restriction>
    </rdfs:subClassOf>
  </owl:Class>
</rdf:RDF>"#;
        let (report, statements) = validate(doc);
        assert!(report.all_passed(), "{report:?}");
        let statements = statements.expect("well formed");
        let t_cell = "http://purl.obolibrary.org/obo/CL_0000084";
        assert!(statements.contains(&Statement::new(
            t_cell,
            format!("{RDF_NS}type"),
            "http://www.w3.org/2002/07/owl#Class"
        )));
        assert!(statements.contains(&Statement::new(
            t_cell,
            "http://purl.org/ccf/ccf_pref_label",
            "t cell"
        )));
        let restriction = statements
            .iter()
            .find(|s| s.subject == t_cell && s.predicate.ends_with("subClassOf"))
            .map(|s| s.object.clone())
            .expect("nested restriction");
        assert!(restriction.starts_with("_:"));
        assert!(statements.contains(&Statement::new(
            restriction.as_str(),
            format!("{RDF_NS}type"),
            "http://www.w3.org/2002/07/owl#Restriction"
        )));
        assert_eq!(statements.len(), 5);
    }

    #[test]
    fn unbalanced_document_fails() {
        let broken = DOC.replace("</rdf:Description>", "");
        let (report, statements) = validate(&broken);
        assert!(!report.all_passed());
        assert!(statements.is_none());
    }

    #[test]
    fn unbound_prefix_fails() {
        let broken = DOC.replace("ccf:ccf_pref_label", "zz:label");
        let (report, statements) = validate(&broken);
        assert_eq!(report.failure_count(), 1);
        assert!(statements.is_none());
    }
}
