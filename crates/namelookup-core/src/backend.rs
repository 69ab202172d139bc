//! Backend contract: the structured request the core submits to the search
//! engine and the raw response it expects back.
//!
//! The core never talks to a concrete engine. It builds a [`SearchRequest`],
//! hands it to an injected [`SearchBackend`], and assembles whatever comes
//! back. `namelookup-solr` provides the production implementation.

use crate::error::BackendError;
use crate::filter::Clause;
use crate::ranking::{FieldWeight, SortKey};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// How the main query expression is interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpression {
    /// A relevance-ranked expression scored over weighted name fields.
    Ranked {
        expression: String,
        query_fields: Vec<FieldWeight>,
        phrase_fields: Vec<FieldWeight>,
        boost: Option<String>,
    },
    /// A plain boolean expression with no field weighting.
    Plain(String),
}

impl QueryExpression {
    pub fn expression(&self) -> &str {
        match self {
            QueryExpression::Ranked { expression, .. } => expression,
            QueryExpression::Plain(expression) => expression,
        }
    }
}

/// Parameters for backend-computed match highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRequest {
    pub fields: Vec<&'static str>,
    pub pre_tag: String,
    pub post_tag: String,
}

/// One structured query against the clique index.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: QueryExpression,
    /// Filter clauses; the backend ANDs them together.
    pub filters: Vec<Clause>,
    pub sort: Vec<SortKey>,
    pub offset: usize,
    pub limit: usize,
    /// Stored fields to return. `score` requests the computed relevance.
    pub fields: Vec<&'static str>,
    pub highlight: Option<HighlightRequest>,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// A stored clique document as returned by the backend.
///
/// Every field is optional on the wire; defaults are applied by the result
/// assembler, not here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDocument {
    /// Backend unique key, used to join highlighting spans.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub curie: Option<String>,
    #[serde(default)]
    pub preferred_name: Option<String>,
    #[serde(default)]
    pub names: Option<Vec<String>>,
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub taxa: Option<Vec<String>>,
    #[serde(default)]
    pub clique_identifier_count: Option<u32>,
    #[serde(default)]
    pub shortest_name_length: Option<u32>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Matched spans for one document, keyed by field name.
pub type FieldSpans = HashMap<String, Vec<String>>;

/// The backend's answer to one [`SearchRequest`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    /// Total matches before pagination.
    pub num_found: u64,
    /// The requested window, in ranked order.
    pub docs: Vec<RawDocument>,
    /// Highlighting keyed by document id. Empty unless requested.
    pub highlighting: HashMap<String, FieldSpans>,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// A search engine able to execute [`SearchRequest`]s.
///
/// Implementations hold their own connection pool and must be safe to share
/// across concurrent lookups.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse, BackendError>;
}
