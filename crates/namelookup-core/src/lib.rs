//! namelookup-core: query compilation, ranking and result assembly.
//!
//! This crate turns a free-text search string plus structured filters into a
//! weighted query against a clique index, and turns the matched documents back
//! into ranked entity records. It also resolves curies back to their cliques.
//!
//! # Architecture
//!
//! ```text
//! Normalizer ─┐
//!             ├──► QueryAssembler ──► SearchBackend ──► Result assembler
//! Filters ────┤         ▲
//! Ranking ────┘         │
//!                 LookupService (lookup / bulk_lookup / reverse_lookup)
//! ```
//!
//! The backend is injected as a trait object; `namelookup-solr` provides the
//! production implementation.

pub mod backend;
pub mod config;
pub mod error;
pub mod filter;
pub mod lookup;
pub mod normalizer;
pub mod query;
pub mod ranking;
pub mod results;
pub mod types;

pub use backend::{RawDocument, SearchBackend, SearchRequest, SearchResponse};
pub use config::{BulkFailurePolicy, Config};
pub use error::{BackendError, ConfigError, LookupError};
pub use lookup::{BulkEntry, BulkLookupRequest, LookupService};
pub use query::{LookupOptions, LookupQuery};
pub use types::{Clique, CliqueRecord, Highlighting, IndexStatus, SearchResult};
