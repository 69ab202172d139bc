//! Result assembler: raw backend documents to [`SearchResult`] and
//! [`Clique`] records.
//!
//! Missing fields get their defaults here and nowhere else. Highlighting spans
//! are merged with field precedence: exact-ish spans first, then tokenized
//! spans, dropping empty strings and duplicates while keeping the backend's
//! order within each tier.

use crate::backend::{FieldSpans, RawDocument, SearchResponse};
use crate::ranking::IndexField;
use crate::types::{with_biolink_prefix, Clique, Highlighting, SearchResult};
use std::collections::HashSet;

/// Turn one backend response into ranked results, preserving its order.
///
/// `highlighting` is whether spans were requested; when it is false the
/// attribute is left off every result even if the backend sent spans.
pub fn assemble(response: SearchResponse, highlighting: bool) -> Vec<SearchResult> {
    let SearchResponse { docs, highlighting: spans, .. } = response;
    docs.into_iter()
        .map(|doc| {
            let hl = highlighting.then(|| {
                doc.id
                    .as_deref()
                    .and_then(|id| spans.get(id))
                    .map(merge_highlighting)
                    .unwrap_or_default()
            });
            search_result(doc, hl)
        })
        .collect()
}

fn search_result(doc: RawDocument, highlighting: Option<Highlighting>) -> SearchResult {
    SearchResult {
        curie: doc.curie.unwrap_or_default(),
        label: doc.preferred_name.unwrap_or_default(),
        synonyms: doc.names.unwrap_or_default(),
        types: doc
            .types
            .unwrap_or_default()
            .iter()
            .map(|t| with_biolink_prefix(t))
            .collect(),
        taxa: doc.taxa.unwrap_or_default(),
        score: doc.score.unwrap_or_default(),
        clique_identifier_count: doc.clique_identifier_count.unwrap_or_default(),
        highlighting,
    }
}

/// Convert a stored document to the clique it describes. Documents without a
/// curie cannot be keyed and yield `None`.
pub fn clique(doc: RawDocument) -> Option<Clique> {
    let curie = doc.curie.filter(|c| !c.is_empty())?;
    let names = doc.names.unwrap_or_default();
    let shortest_name_length = doc.shortest_name_length.unwrap_or_else(|| {
        names
            .iter()
            .map(|n| n.chars().count() as u32)
            .min()
            .unwrap_or_default()
    });
    Some(Clique {
        curie,
        preferred_name: doc.preferred_name.unwrap_or_default(),
        names,
        types: doc.types.unwrap_or_default(),
        taxa: doc.taxa.unwrap_or_default(),
        clique_identifier_count: doc.clique_identifier_count.unwrap_or(1),
        shortest_name_length,
    })
}

/// Merge per-field spans into label and synonym lists.
pub fn merge_highlighting(spans: &FieldSpans) -> Highlighting {
    Highlighting {
        labels: merge_tiers(
            spans,
            &[IndexField::PreferredNameExactish, IndexField::PreferredName],
        ),
        synonyms: merge_tiers(spans, &[IndexField::NamesExactish, IndexField::Names]),
    }
}

fn merge_tiers(spans: &FieldSpans, tiers: &[IndexField]) -> Vec<String> {
    let mut seen = HashSet::new();
    tiers
        .iter()
        .filter_map(|field| spans.get(field.as_str()))
        .flatten()
        .filter(|span| !span.is_empty() && seen.insert(span.as_str()))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
