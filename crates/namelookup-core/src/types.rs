//! Core types for namelookup-core.
//!
//! This module defines the records that flow out of the lookup pipeline: the
//! stored [`Clique`], the ranked [`SearchResult`] built from it, and the
//! [`CliqueRecord`] wrapper that the synonym resolver returns for each
//! requested curie.

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

/// Namespace prefix attached to every biolink category on the way out.
pub const BIOLINK_PREFIX: &str = "biolink:";

/// A cluster of synonymous names sharing one canonical identifier.
///
/// Cliques live in the backend index and are read-only from the point of view
/// of this crate. `types` are stored without the `biolink:` namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clique {
    pub curie: String,
    pub preferred_name: String,
    /// All known synonyms, including the preferred name.
    pub names: Vec<String>,
    pub types: Vec<String>,
    pub taxa: Vec<String>,
    pub clique_identifier_count: u32,
    pub shortest_name_length: u32,
}

/// One ranked entity record produced by a lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub curie: String,
    pub label: String,
    pub synonyms: Vec<String>,
    /// Biolink categories, each carrying the `biolink:` prefix.
    pub types: Vec<String>,
    pub taxa: Vec<String>,
    pub score: f64,
    pub clique_identifier_count: u32,
    /// Matched spans; present only when highlighting was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighting: Option<Highlighting>,
}

/// Backend-computed matched spans for one result, merged by field precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlighting {
    pub labels: Vec<String>,
    pub synonyms: Vec<String>,
}

/// The synonym resolver's answer for one requested curie.
///
/// A curie with no index entry maps to an empty record, which serialises as
/// `{}` so callers can tell "not found" apart from "omitted".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliqueRecord(pub Option<Clique>);

impl CliqueRecord {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn found(clique: Clique) -> Self {
        Self(Some(clique))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn clique(&self) -> Option<&Clique> {
        self.0.as_ref()
    }
}

impl Serialize for CliqueRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(clique) => clique.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// Summary of the backing index, as reported by [`LookupService::status`](crate::lookup::LookupService::status).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStatus {
    pub status: &'static str,
    /// Number of cliques in the index.
    pub num_cliques: u64,
}

/// Attach the `biolink:` prefix to a stored category name. Names that already
/// carry it are passed through unchanged.
pub fn with_biolink_prefix(category: &str) -> String {
    if category.starts_with(BIOLINK_PREFIX) {
        category.to_string()
    } else {
        format!("{BIOLINK_PREFIX}{category}")
    }
}

/// Strip an optional `biolink:` prefix from a category name.
pub fn without_biolink_prefix(category: &str) -> &str {
    category.strip_prefix(BIOLINK_PREFIX).unwrap_or(category)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
