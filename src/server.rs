//! HTTP surface: axum routes over a [`LookupService`].
//!
//! | Route | Operation |
//! |-------|-----------|
//! | `GET`/`POST /lookup` | ranked lookup, parameters in the query string |
//! | `POST /bulk-lookup` | bulk lookup, JSON body |
//! | `GET /synonyms` | reverse lookup, `preferred_curies` pipe-separated |
//! | `POST /synonyms` | reverse lookup, JSON `{"preferred_curies": [...]}` |
//! | `POST /reverse_lookup` | reverse lookup, JSON `{"curies": [...]}` |
//! | `GET /status` | index status |

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::Query;
use indexmap::IndexMap;
use namelookup_core::filter::split_pipe;
use namelookup_core::{
    BackendError, BulkEntry, BulkLookupRequest, CliqueRecord, IndexStatus, LookupError,
    LookupOptions, LookupService, SearchResult,
};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(service: LookupService) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/lookup", get(lookup).post(lookup))
        .route("/bulk-lookup", post(bulk_lookup))
        .route("/synonyms", get(synonyms_get).post(synonyms_post))
        .route("/reverse_lookup", post(reverse_lookup))
        .with_state(service)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(service: LookupService, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "namelookup listening");
    axum::serve(listener, router(service)).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A [`LookupError`] rendered as `{"error": "..."}` with a matching status.
#[derive(Debug)]
pub struct ApiError(pub LookupError);

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        ApiError(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LookupError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            LookupError::Backend(BackendError::Unavailable(_) | BackendError::Timeout(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            LookupError::Backend(BackendError::Status { status, .. }) if *status >= 500 => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            LookupError::Backend(BackendError::Status { .. } | BackendError::Decode(_)) => {
                StatusCode::BAD_GATEWAY
            }
            LookupError::TaskFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self.0, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

// ---------------------------------------------------------------------------
// Request shapes
// ---------------------------------------------------------------------------

/// Query-string parameters of `/lookup`.
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub string: String,
    #[serde(default)]
    pub autocomplete: bool,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    /// Biolink types, pipe-separated and/or repeated (`?biolink_type=A&biolink_type=B`).
    #[serde(default)]
    pub biolink_type: Vec<String>,
    pub only_prefixes: Option<String>,
    pub exclude_prefixes: Option<String>,
    pub only_taxa: Option<String>,
    #[serde(default)]
    pub highlighting: bool,
}

impl LookupParams {
    fn into_parts(self) -> (String, LookupOptions) {
        let options = LookupOptions {
            autocomplete: self.autocomplete,
            offset: self.offset,
            limit: self.limit,
            biolink_types: self.biolink_type,
            only_prefixes: self.only_prefixes,
            exclude_prefixes: self.exclude_prefixes,
            only_taxa: self.only_taxa,
            highlighting: self.highlighting,
        };
        (self.string, options)
    }
}

#[derive(Debug, Deserialize)]
pub struct SynonymsParams {
    /// Pipe-separated curies.
    pub preferred_curies: String,
}

#[derive(Debug, Deserialize)]
pub struct SynonymsBody {
    pub preferred_curies: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReverseLookupBody {
    pub curies: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn status(State(service): State<LookupService>) -> ApiResult<IndexStatus> {
    Ok(Json(service.status().await?))
}

async fn lookup(
    State(service): State<LookupService>,
    Query(params): Query<LookupParams>,
) -> ApiResult<Vec<SearchResult>> {
    let (string, options) = params.into_parts();
    let query = service.query(string, &options)?;
    Ok(Json(service.lookup(&query).await?))
}

async fn bulk_lookup(
    State(service): State<LookupService>,
    Json(request): Json<BulkLookupRequest>,
) -> ApiResult<IndexMap<String, BulkEntry>> {
    Ok(Json(service.bulk_lookup(&request).await?))
}

async fn synonyms_get(
    State(service): State<LookupService>,
    Query(params): Query<SynonymsParams>,
) -> ApiResult<IndexMap<String, CliqueRecord>> {
    let curies = split_pipe(&params.preferred_curies);
    Ok(Json(service.reverse_lookup(&curies).await?))
}

async fn synonyms_post(
    State(service): State<LookupService>,
    Json(body): Json<SynonymsBody>,
) -> ApiResult<IndexMap<String, CliqueRecord>> {
    Ok(Json(service.reverse_lookup(&body.preferred_curies).await?))
}

async fn reverse_lookup(
    State(service): State<LookupService>,
    Json(body): Json<ReverseLookupBody>,
) -> ApiResult<IndexMap<String, CliqueRecord>> {
    Ok(Json(service.reverse_lookup(&body.curies).await?))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
