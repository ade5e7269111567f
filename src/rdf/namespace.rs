//! RDF namespace and prefix management
//!
//! Prefixes keep their declaration order, which is the order the update
//! builder emits `PREFIX` lines in.

use indexmap::IndexMap;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }

    /// Render as a SPARQL prologue line: `PREFIX ex: <http://ex#>`
    pub fn to_declaration(&self) -> String {
        format!("PREFIX {}: <{}>", self.prefix, self.iri)
    }
}

impl<P: Into<String>, I: Into<String>> From<(P, I)> for Namespace {
    fn from((prefix, iri): (P, I)) -> Self {
        Namespace::new(prefix, iri)
    }
}

/// Ordered prefix registry
#[derive(Debug, Clone, Default)]
pub struct NamespaceManager {
    /// Prefix → IRI mappings, in declaration order
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Create an empty namespace manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a namespace manager with the common RDF/RDFS/OWL prefixes
    pub fn with_common_prefixes() -> Self {
        let mut mgr = Self::new();
        mgr.add_prefix("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
        mgr.add_prefix("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
        mgr.add_prefix("xsd", "http://www.w3.org/2001/XMLSchema#");
        mgr.add_prefix("owl", "http://www.w3.org/2002/07/owl#");
        mgr.add_prefix("foaf", "http://xmlns.com/foaf/0.1/");
        mgr.add_prefix("dc", "http://purl.org/dc/elements/1.1/");
        mgr.add_prefix("dcterms", "http://purl.org/dc/terms/");
        mgr
    }

    /// Add a prefix; redeclaring a prefix keeps its original position
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Compact an IRI using the longest matching namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes
            .iter()
            .filter(|(_, ns)| iri.len() > ns.len() && iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())
            .map(|(prefix, ns)| (prefix, &iri[ns.len()..]))
            .filter(|(_, local)| {
                local
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
            })
            .map(|(prefix, local)| format!("{}:{}", prefix, local))
    }

    /// Get all registered prefixes in declaration order
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }
}
