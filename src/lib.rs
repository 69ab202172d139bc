//! namelookup: biomedical name resolution over a Solr clique index.
//!
//! The library half of the binary. Integration tests build routers and
//! services through these functions instead of spawning the process.
//!
//! ```text
//! CLI / HTTP ──► LookupService ──► SolrBackend ──► Solr core
//! ```

pub mod server;

use namelookup_core::{Config, LookupService};
use namelookup_solr::SolrBackend;
use std::sync::Arc;

/// Build a [`LookupService`] backed by the Solr core named in `config`.
pub fn service(config: &Config) -> anyhow::Result<LookupService> {
    let backend = SolrBackend::new(&config.solr)?;
    tracing::debug!(select = %backend.select_uri(), "solr backend ready");
    Ok(LookupService::new(Arc::new(backend), config))
}

/// Install the global `tracing` subscriber. Logs go to stderr so that
/// command output on stdout stays machine-readable.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` with
/// `--debug`.
pub fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .init();
}
