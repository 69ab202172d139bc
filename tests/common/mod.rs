//! Shared test utilities for namelookup integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod assertions;
pub mod builders;
pub mod fake_solr;
pub mod fixtures;

pub use builders::*;
pub use fake_solr::{edismax_query, FakeSolr, Reply};
pub use fixtures::*;

use namelookup_core::{Config, LookupService};
use namelookup_solr::SolrBackend;
use std::sync::Arc;
use std::time::Duration;

/// A service wired to `solr` through the real HTTP backend.
pub fn service_for(solr: &FakeSolr, config: &Config) -> LookupService {
    let backend = SolrBackend::from_url(&solr.core_url(), Duration::from_secs(5)).unwrap();
    LookupService::new(Arc::new(backend), config)
}

/// Same as [`service_for`] with the built-in configuration.
pub fn default_service(solr: &FakeSolr) -> LookupService {
    service_for(solr, &Config::defaults())
}
