//! Decoding of Solr `/select` JSON responses.

use namelookup_core::backend::{FieldSpans, RawDocument, SearchResponse};
use namelookup_core::BackendError;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct SelectResponse {
    response: ResultSet,
    #[serde(default)]
    highlighting: HashMap<String, FieldSpans>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    #[serde(rename = "numFound")]
    num_found: u64,
    #[serde(default)]
    docs: Vec<RawDocument>,
}

/// Parse a successful response body.
pub fn decode(body: &[u8]) -> Result<SearchResponse, BackendError> {
    let parsed: SelectResponse =
        serde_json::from_slice(body).map_err(|e| BackendError::Decode(e.to_string()))?;
    Ok(SearchResponse {
        num_found: parsed.response.num_found,
        docs: parsed.response.docs,
        highlighting: parsed.highlighting,
    })
}
