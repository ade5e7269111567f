//! RDF type definitions
//!
//! Terms are validated with the oxrdf library on construction and rendered in
//! SPARQL syntax on demand. Literal text is escaped through
//! [`crate::sparql::escape`].

use oxrdf::{
    BlankNode as OxBlankNode,
    Literal as OxLiteral,
    NamedNode as OxNamedNode,
};
use std::fmt;
use thiserror::Error;

use crate::sparql::escape::quote_literal;

/// RDF errors
#[derive(Error, Debug)]
pub enum RdfError {
    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Invalid blank node
    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    /// Invalid literal
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// Named node (IRI)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    /// Create a new named node from an absolute IRI string
    pub fn new(iri: &str) -> RdfResult<Self> {
        OxNamedNode::new(iri)
            .map(Self)
            .map_err(|e| RdfError::InvalidIri(format!("{}: {}", iri, e)))
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

/// Blank node (store-local identifier)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlankNode(OxBlankNode);

impl BlankNode {
    /// Create a blank node from an identifier (without the `_:` prefix)
    pub fn new(id: &str) -> RdfResult<Self> {
        OxBlankNode::new(id)
            .map(Self)
            .map_err(|e| RdfError::InvalidBlankNode(format!("{}: {}", id, e)))
    }

    /// Get the blank node identifier
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.as_str())
    }
}

/// Plain literal with an optional language tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    value: String,
    language: Option<String>,
}

impl Literal {
    /// Create a simple literal (plain string)
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
        }
    }

    /// Create a literal with language tag
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> RdfResult<Self> {
        let literal = OxLiteral::new_language_tagged_literal(value, language)
            .map_err(|e| RdfError::InvalidLiteral(e.to_string()))?;
        Ok(Self {
            value: literal.value().to_string(),
            language: literal.language().map(str::to_string),
        })
    }

    /// Get the lexical value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the language tag if present (normalized to lower case)
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.language {
            Some(lang) => write!(f, "{}@{}", quote_literal(&self.value), lang),
            None => f.write_str(&quote_literal(&self.value)),
        }
    }
}

/// Literal paired with a datatype IRI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypedLiteral {
    value: String,
    datatype: NamedNode,
}

impl TypedLiteral {
    /// Create a typed literal
    pub fn new(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self {
            value: value.into(),
            datatype,
        }
    }

    /// Get the lexical value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the datatype
    pub fn datatype(&self) -> &NamedNode {
        &self.datatype
    }
}

impl fmt::Display for TypedLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}^^{}", quote_literal(&self.value), self.datatype)
    }
}

/// RDF term (any RDF value)
///
/// `Display` renders the term in SPARQL syntax, ready to embed in a query or
/// an `INSERT DATA` block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfTerm {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
    /// Plain literal, optionally language tagged
    Literal(Literal),
    /// Typed literal
    TypedLiteral(TypedLiteral),
}

impl RdfTerm {
    /// IRI term; fails on empty or relative IRIs
    pub fn iri(iri: &str) -> RdfResult<Self> {
        NamedNode::new(iri).map(RdfTerm::NamedNode)
    }

    /// Plain literal term
    pub fn literal(value: impl Into<String>) -> Self {
        RdfTerm::Literal(Literal::new_simple_literal(value))
    }

    /// Language-tagged literal term
    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> RdfResult<Self> {
        Literal::new_language_tagged_literal(value, language).map(RdfTerm::Literal)
    }

    /// Typed literal term
    pub fn typed_literal(value: impl Into<String>, datatype: &str) -> RdfResult<Self> {
        Ok(RdfTerm::TypedLiteral(TypedLiteral::new(value, NamedNode::new(datatype)?)))
    }

    /// The lexical value: IRI text, blank node id, or literal text
    pub fn value(&self) -> &str {
        match self {
            RdfTerm::NamedNode(n) => n.as_str(),
            RdfTerm::BlankNode(b) => b.as_str(),
            RdfTerm::Literal(l) => l.value(),
            RdfTerm::TypedLiteral(l) => l.value(),
        }
    }

    /// Check if this is a literal of either kind
    pub fn is_literal(&self) -> bool {
        matches!(self, RdfTerm::Literal(_) | RdfTerm::TypedLiteral(_))
    }
}

impl fmt::Display for RdfTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfTerm::NamedNode(n) => write!(f, "{}", n),
            RdfTerm::BlankNode(b) => write!(f, "{}", b),
            RdfTerm::Literal(l) => write!(f, "{}", l),
            RdfTerm::TypedLiteral(l) => write!(f, "{}", l),
        }
    }
}

impl From<NamedNode> for RdfTerm {
    fn from(node: NamedNode) -> Self {
        RdfTerm::NamedNode(node)
    }
}

impl From<BlankNode> for RdfTerm {
    fn from(node: BlankNode) -> Self {
        RdfTerm::BlankNode(node)
    }
}

impl From<Literal> for RdfTerm {
    fn from(lit: Literal) -> Self {
        RdfTerm::Literal(lit)
    }
}

impl From<TypedLiteral> for RdfTerm {
    fn from(lit: TypedLiteral) -> Self {
        RdfTerm::TypedLiteral(lit)
    }
}
