//! namelookup-solr: Solr adapter for the namelookup backend contract.
//!
//! [`SolrBackend`] renders each [`SearchRequest`] into a JSON Request API body,
//! posts it to `<core>/select` over a pooled hyper client, and decodes the
//! response. Connection failures, timeouts and non-success statuses all become
//! [`BackendError`]s, never empty results.

pub mod request;
pub mod response;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{header, Method, Request, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use namelookup_core::backend::{SearchBackend, SearchRequest, SearchResponse};
use namelookup_core::config::SolrConfig;
use namelookup_core::BackendError;
use std::time::Duration;

/// Longest slice of an error body kept in [`BackendError::Status`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum SolrError {
    #[error("invalid Solr URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: hyper::http::uri::InvalidUri,
    },
}

/// A Solr core reachable over HTTP.
#[derive(Clone)]
pub struct SolrBackend {
    client: Client<HttpConnector, Full<Bytes>>,
    select: Uri,
    timeout: Duration,
}

impl SolrBackend {
    pub fn new(config: &SolrConfig) -> Result<Self, SolrError> {
        Self::from_url(&config.core_url(), config.timeout())
    }

    /// Connect to the core at `core_url` (e.g. `http://localhost:8983/solr/name_lookup`).
    pub fn from_url(core_url: &str, timeout: Duration) -> Result<Self, SolrError> {
        let url = format!("{}/select", core_url.trim_end_matches('/'));
        let select = url
            .parse::<Uri>()
            .map_err(|source| SolrError::InvalidUrl { url: url.clone(), source })?;
        let client = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self { client, select, timeout })
    }

    pub fn select_uri(&self) -> &Uri {
        &self.select
    }

    async fn post(&self, body: Vec<u8>) -> Result<(u16, Bytes), BackendError> {
        let req = Request::builder()
            .method(Method::POST)
            .uri(self.select.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        let exchange = async {
            let resp = self
                .client
                .request(req)
                .await
                .map_err(|e| BackendError::Unavailable(e.to_string()))?;
            let status = resp.status().as_u16();
            let bytes = resp
                .into_body()
                .collect()
                .await
                .map_err(|e| BackendError::Unavailable(e.to_string()))?
                .to_bytes();
            Ok::<_, BackendError>((status, bytes))
        };

        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| BackendError::Timeout(self.timeout))?
    }
}

#[async_trait]
impl SearchBackend for SolrBackend {
    async fn search(&self, request: SearchRequest) -> Result<SearchResponse, BackendError> {
        let body = request::render(&request);
        tracing::debug!(uri = %self.select, body = %body, "solr select");

        let payload =
            serde_json::to_vec(&body).map_err(|e| BackendError::Decode(e.to_string()))?;
        let (status, bytes) = self.post(payload).await?;

        if !(200..300).contains(&status) {
            let text = String::from_utf8_lossy(&bytes);
            let body: String = text.chars().take(MAX_ERROR_BODY).collect();
            tracing::warn!(status, body = %body, "solr returned an error status");
            return Err(BackendError::Status { status, body });
        }

        response::decode(&bytes)
    }
}
