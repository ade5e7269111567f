//! INSERT DATA construction

use std::fmt;
use std::ops::Deref;

use crate::error::{BridgeError, BridgeResult};
use crate::rdf::{Namespace, RdfTerm};

/// Generated SPARQL update text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateText(String);

impl UpdateText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for UpdateText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UpdateText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UpdateText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UpdateText> for String {
    fn from(text: UpdateText) -> Self {
        text.0
    }
}

/// One position of a triple pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternTerm {
    /// A validated term, rendered with escaping
    Term(RdfTerm),
    /// A SPARQL fragment supplied by the caller (`<http://ex#a>`, `ex:b`,
    /// `"2024-01-01"^^xsd:date`), emitted as is
    Verbatim(String),
}

impl PatternTerm {
    fn render(&self) -> BridgeResult<String> {
        match self {
            PatternTerm::Term(term) => Ok(term.to_string()),
            PatternTerm::Verbatim(fragment) => {
                let fragment = fragment.trim();
                if fragment.is_empty() {
                    return Err(BridgeError::invalid("triple pattern term must not be empty"));
                }
                Ok(fragment.to_string())
            }
        }
    }
}

impl From<RdfTerm> for PatternTerm {
    fn from(term: RdfTerm) -> Self {
        PatternTerm::Term(term)
    }
}

impl From<&str> for PatternTerm {
    fn from(fragment: &str) -> Self {
        PatternTerm::Verbatim(fragment.to_string())
    }
}

impl From<String> for PatternTerm {
    fn from(fragment: String) -> Self {
        PatternTerm::Verbatim(fragment)
    }
}

/// Subject-predicate-object pattern for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: PatternTerm,
    pub predicate: PatternTerm,
    pub object: PatternTerm,
}

impl TriplePattern {
    pub fn new(
        subject: impl Into<PatternTerm>,
        predicate: impl Into<PatternTerm>,
        object: impl Into<PatternTerm>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl<S, P, O> From<(S, P, O)> for TriplePattern
where
    S: Into<PatternTerm>,
    P: Into<PatternTerm>,
    O: Into<PatternTerm>,
{
    fn from((subject, predicate, object): (S, P, O)) -> Self {
        TriplePattern::new(subject, predicate, object)
    }
}

/// Prefixes and triples for one `INSERT DATA` request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertSpec {
    pub prefixes: Vec<Namespace>,
    pub triples: Vec<TriplePattern>,
}

impl InsertSpec {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        self.prefixes.push(Namespace::new(prefix, iri));
        self
    }

    #[must_use]
    pub fn triple(mut self, triple: impl Into<TriplePattern>) -> Self {
        self.triples.push(triple.into());
        self
    }

    /// Produce the update text for this request
    pub fn build(&self) -> BridgeResult<UpdateText> {
        build_insert(&self.prefixes, &self.triples)
    }
}

/// Build `PREFIX` lines followed by an `INSERT DATA` block.
///
/// Consecutive triples with the same subject are joined with `;`, and those
/// that also share the predicate with `,`. Prefix declarations and IRIs inside
/// verbatim fragments are not checked; callers must declare every prefix they
/// reference.
pub fn build_insert(prefixes: &[Namespace], triples: &[TriplePattern]) -> BridgeResult<UpdateText> {
    if triples.is_empty() {
        return Err(BridgeError::invalid("INSERT DATA requires at least one triple"));
    }

    let mut text = String::new();
    for ns in prefixes {
        text.push_str(&ns.to_declaration());
        text.push('\n');
    }
    text.push_str("INSERT DATA {\n");

    let mut previous: Option<(String, String)> = None;
    for triple in triples {
        let subject = triple.subject.render()?;
        let predicate = triple.predicate.render()?;
        let object = triple.object.render()?;

        match &previous {
            Some((s, p)) if *s == subject && *p == predicate => {
                text.push_str(&format!(" ,\n    {}", object));
            }
            Some((s, _)) if *s == subject => {
                text.push_str(&format!(" ;\n    {} {}", predicate, object));
            }
            Some(_) => {
                text.push_str(" .\n");
                text.push_str(&format!("  {} {} {}", subject, predicate, object));
            }
            None => {
                text.push_str(&format!("  {} {} {}", subject, predicate, object));
            }
        }
        previous = Some((subject, predicate));
    }
    text.push_str(" .\n}");

    Ok(UpdateText(text))
}
