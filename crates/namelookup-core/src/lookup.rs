//! Lookup service: single, bulk and reverse lookups over an injected backend.
//!
//! ```text
//! LookupOptions ──validate──► LookupQuery ──assemble──► SearchRequest
//!                                                           │
//!                                              SearchBackend::search
//!                                                           │
//!                          Vec<SearchResult> ◄──assemble────┘
//! ```
//!
//! Every operation is request-local. The only shared resource is the backend,
//! which owns its own connection pool.

use crate::backend::SearchBackend;
use crate::config::{BulkFailurePolicy, Config, LookupConfig};
use crate::error::{LookupError, Result};
use crate::query::{LookupOptions, LookupQuery, QueryAssembler};
use crate::results;
use crate::types::{CliqueRecord, IndexStatus, SearchResult};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Bulk request / response types
// ---------------------------------------------------------------------------

/// Many independent search strings sharing one set of options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BulkLookupRequest {
    pub strings: Vec<String>,
    #[serde(flatten)]
    pub options: LookupOptions,
}

/// Outcome of one string in a bulk lookup.
///
/// Serialises as the bare result list on success and as `{"error": "..."}`
/// on failure (only produced under [`BulkFailurePolicy::PerKey`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BulkEntry {
    Results(Vec<SearchResult>),
    Failed { error: String },
}

impl BulkEntry {
    pub fn results(&self) -> Option<&[SearchResult]> {
        match self {
            BulkEntry::Results(r) => Some(r),
            BulkEntry::Failed { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Entry point for every lookup operation.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct LookupService {
    backend: Arc<dyn SearchBackend>,
    assembler: QueryAssembler,
    limits: LookupConfig,
}

impl LookupService {
    pub fn new(backend: Arc<dyn SearchBackend>, config: &Config) -> Self {
        Self {
            backend,
            assembler: QueryAssembler::new(config.ranking.clone(), config.highlighting.clone()),
            limits: config.lookup.clone(),
        }
    }

    /// Validate loosely-typed options and bind them to `string`.
    pub fn query(&self, string: impl Into<String>, options: &LookupOptions) -> Result<LookupQuery> {
        LookupQuery::new(string, options, &self.limits)
    }

    /// Ranked, paginated lookup of one search string.
    ///
    /// A blank string returns an empty list without contacting the backend.
    pub async fn lookup(&self, query: &LookupQuery) -> Result<Vec<SearchResult>> {
        let Some(request) = self.assembler.lookup(query) else {
            tracing::debug!(raw = %query.raw_string(), "blank query, skipping backend");
            return Ok(Vec::new());
        };

        let response = self.backend.search(request).await.map_err(|e| {
            tracing::warn!(raw = %query.raw_string(), error = %e, "lookup failed");
            e
        })?;
        tracing::debug!(
            raw = %query.raw_string(),
            num_found = response.num_found,
            returned = response.docs.len(),
            "lookup complete"
        );
        Ok(results::assemble(response, query.highlighting()))
    }

    /// Look up every string concurrently with the same options.
    ///
    /// Results are keyed by the original input string, in input order;
    /// duplicate strings are looked up once. Validation of the shared options
    /// fails the whole batch before anything is spawned. Backend failures are
    /// handled according to `[lookup] bulk_failure_policy`.
    pub async fn bulk_lookup(
        &self,
        request: &BulkLookupRequest,
    ) -> Result<IndexMap<String, BulkEntry>> {
        let options = request.options.validate(&self.limits)?;
        let policy = self.limits.bulk_failure_policy;

        let keys: IndexSet<String> = request.strings.iter().cloned().collect();
        tracing::info!(strings = keys.len(), ?policy, "bulk lookup");

        let handles: Vec<_> = keys
            .iter()
            .map(|key| {
                let service = self.clone();
                let query = options.query(key.clone());
                tokio::spawn(async move { service.lookup(&query).await })
            })
            .collect();

        let joined = futures::future::join_all(handles).await;

        let mut output = IndexMap::with_capacity(keys.len());
        for (key, joined) in keys.into_iter().zip(joined) {
            let outcome = joined.map_err(|e| LookupError::TaskFailed {
                key: key.clone(),
                reason: e.to_string(),
            });
            let entry = match (outcome, policy) {
                (Ok(Ok(results)), _) => BulkEntry::Results(results),
                (Ok(Err(e)) | Err(e), BulkFailurePolicy::Abort) => return Err(e),
                (Ok(Err(e)) | Err(e), BulkFailurePolicy::PerKey) => {
                    tracing::warn!(key = %key, error = %e, "bulk sub-lookup failed");
                    BulkEntry::Failed { error: e.to_string() }
                }
            };
            output.insert(key, entry);
        }
        Ok(output)
    }

    /// Resolve curies to their cliques in one round trip.
    ///
    /// Every distinct requested curie appears in the output, in input order;
    /// curies with no index entry map to an empty record.
    pub async fn reverse_lookup(&self, curies: &[String]) -> Result<IndexMap<String, CliqueRecord>> {
        let mut output: IndexMap<String, CliqueRecord> = curies
            .iter()
            .map(|c| (c.clone(), CliqueRecord::empty()))
            .collect();
        if output.is_empty() {
            return Ok(output);
        }

        let keys: Vec<String> = output.keys().cloned().collect();
        let request = self
            .assembler
            .reverse_lookup(&keys, self.limits.reverse_lookup_limit);
        let response = self.backend.search(request).await.map_err(|e| {
            tracing::warn!(curies = keys.len(), error = %e, "reverse lookup failed");
            e
        })?;

        let mut found = 0usize;
        for doc in response.docs {
            let Some(clique) = results::clique(doc) else {
                continue;
            };
            match output.get_mut(&clique.curie) {
                Some(slot) => {
                    *slot = CliqueRecord::found(clique);
                    found += 1;
                }
                None => tracing::debug!(curie = %clique.curie, "ignoring unrequested curie"),
            }
        }
        tracing::debug!(requested = keys.len(), found, "reverse lookup complete");
        Ok(output)
    }

    /// Report how many cliques the backend holds.
    pub async fn status(&self) -> Result<IndexStatus> {
        let response = self.backend.search(self.assembler.status()).await?;
        Ok(IndexStatus {
            status: "ok",
            num_cliques: response.num_found,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
