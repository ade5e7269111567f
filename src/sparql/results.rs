//! SPARQL query results
//!
//! Parses the SPARQL 1.1 JSON results format and flattens each solution row
//! into a [`TripleRecord`].
//!
//! Normalization is lossy: term kinds, datatypes and language tags are
//! dropped, and only the lexical value of each term survives. Callers that
//! need RDF type fidelity should work with the parsed [`Binding`]s and
//! [`BindingTerm::to_rdf_term`] instead.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{BridgeError, BridgeResult};
use crate::rdf::{BlankNode, Literal, NamedNode, RdfResult, RdfTerm, TypedLiteral};

/// One term of a SPARQL-JSON solution row
///
/// Stores in the wild omit `type` or send non-IRI datatypes, so only `value`
/// is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingTerm {
    /// `uri`, `literal`, `typed-literal` or `bnode`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Lexical value
    pub value: String,
    /// Datatype IRI of a typed literal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    /// Language tag of a plain literal
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl BindingTerm {
    /// Term carrying only a value, as some stores emit
    pub fn from_value(value: impl Into<String>) -> Self {
        Self {
            kind: None,
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    /// Rebuild the typed RDF term; fails when the store sent an invalid IRI,
    /// datatype or language tag
    pub fn to_rdf_term(&self) -> RdfResult<RdfTerm> {
        match self.kind.as_deref() {
            Some("uri") => Ok(RdfTerm::NamedNode(NamedNode::new(&self.value)?)),
            Some("bnode") => Ok(RdfTerm::BlankNode(BlankNode::new(&self.value)?)),
            _ => match (&self.datatype, &self.language) {
                (_, Some(lang)) => Ok(RdfTerm::Literal(Literal::new_language_tagged_literal(
                    self.value.clone(),
                    lang.clone(),
                )?)),
                (Some(datatype), None) => Ok(RdfTerm::TypedLiteral(TypedLiteral::new(
                    self.value.clone(),
                    NamedNode::new(datatype)?,
                ))),
                (None, None) => Ok(RdfTerm::literal(self.value.clone())),
            },
        }
    }
}

/// Query solution (variable bindings)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Binding {
    /// Variable name → term; unbound variables are absent
    pub bindings: HashMap<String, BindingTerm>,
}

impl Binding {
    /// Create an empty solution row
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding
    #[must_use]
    pub fn with(mut self, variable: impl Into<String>, term: BindingTerm) -> Self {
        self.bindings.insert(variable.into(), term);
        self
    }

    /// Get a binding
    pub fn term(&self, variable: &str) -> Option<&BindingTerm> {
        self.bindings.get(variable)
    }

    /// Lexical value of a binding
    pub fn value(&self, variable: &str) -> Option<&str> {
        self.term(variable).map(|t| t.value.as_str())
    }
}

impl From<HashMap<String, BindingTerm>> for Binding {
    fn from(bindings: HashMap<String, BindingTerm>) -> Self {
        Self { bindings }
    }
}

/// Flat record produced once per solution row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
}

impl From<&Binding> for TripleRecord {
    fn from(binding: &Binding) -> Self {
        Self {
            subject: binding.value("subject").map(str::to_string),
            predicate: binding.value("predicate").map(str::to_string),
            object: binding.value("object").map(str::to_string),
        }
    }
}

#[derive(Deserialize)]
struct SparqlJson {
    results: SparqlJsonResults,
}

#[derive(Deserialize)]
struct SparqlJsonResults {
    bindings: Vec<Binding>,
}

/// Parse a SPARQL-JSON results document into its solution rows
pub fn parse_results(body: &str) -> BridgeResult<Vec<Binding>> {
    serde_json::from_str::<SparqlJson>(body)
        .map(|doc| doc.results.bindings)
        .map_err(|e| BridgeError::MalformedResponse(format!("invalid SPARQL-JSON results: {}", e)))
}

/// Flatten solution rows into triple records, preserving row order
pub fn normalize(bindings: &[Binding]) -> Vec<TripleRecord> {
    bindings.iter().map(TripleRecord::from).collect()
}
