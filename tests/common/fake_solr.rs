//! Fake Solr core for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1 and serves `POST /solr/{core}/select`. Every request body is
//! recorded; the reply is chosen by a responder closure that sees the body,
//! so concurrent bulk lookups can be answered per search string.
//!
//! # Example
//!
//! ```rust,no_run
//! let solr = FakeSolr::start().await.unwrap();
//! solr.reply(Reply::json(select_response(vec![bace1_inhibitor()]))).await;
//!
//! let backend = SolrBackend::from_url(&solr.core_url(), Duration::from_secs(5)).unwrap();
//! // ... run lookups, then:
//! let bodies = solr.requests().await;
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const CORE: &str = "name_lookup";

/// What the fake answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    /// A non-success status with a plain-text body.
    Status(u16, String),
    /// A 200 with a body that is not JSON.
    Garbage(String),
    /// Wait before answering.
    Delayed(Duration, Box<Reply>),
}

impl Reply {
    pub fn json(body: Value) -> Self {
        Reply::Json(body)
    }

    pub fn delayed(self, by: Duration) -> Self {
        Reply::Delayed(by, Box::new(self))
    }
}

type Responder = Arc<dyn Fn(&Value) -> Reply + Send + Sync>;

struct SolrState {
    requests: Vec<Value>,
    responder: Responder,
}

/// Handle to the running fake Solr server.
pub struct FakeSolr {
    addr: SocketAddr,
    state: Arc<Mutex<SolrState>>,
}

impl FakeSolr {
    /// Start on a random port. Until configured, every request gets an empty
    /// result set.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let empty = crate::common::select_response(vec![]);
        let state = Arc::new(Mutex::new(SolrState {
            requests: Vec::new(),
            responder: Arc::new(move |_| Reply::Json(empty.clone())),
        }));

        let app = Router::new()
            .route("/solr/{core}/select", post(select))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Core URL to hand to `SolrBackend::from_url`.
    pub fn core_url(&self) -> String {
        format!("http://{}/solr/{CORE}", self.addr)
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Answer every request with `reply`.
    pub async fn reply(&self, reply: Reply) {
        self.respond_with(move |_| reply.clone()).await;
    }

    /// Answer each request with whatever `f` returns for its body.
    pub async fn respond_with<F>(&self, f: F)
    where
        F: Fn(&Value) -> Reply + Send + Sync + 'static,
    {
        self.state.lock().await.responder = Arc::new(f);
    }

    /// Request bodies received so far, in arrival order.
    pub async fn requests(&self) -> Vec<Value> {
        self.state.lock().await.requests.clone()
    }
}

/// The edismax query string of a recorded ranked request, if it has one.
pub fn edismax_query(body: &Value) -> Option<&str> {
    body.pointer("/query/edismax/query").and_then(Value::as_str)
}

// ---------------------------------------------------------------------------
// Route handler
// ---------------------------------------------------------------------------

async fn select(
    Path(core): Path<String>,
    State(state): State<Arc<Mutex<SolrState>>>,
    Json(body): Json<Value>,
) -> Response {
    if core != CORE {
        return (StatusCode::NOT_FOUND, format!("no such core {core}")).into_response();
    }

    let responder = {
        let mut state = state.lock().await;
        state.requests.push(body.clone());
        state.responder.clone()
    };

    let mut reply = responder(&body);
    while let Reply::Delayed(by, inner) = reply {
        tokio::time::sleep(by).await;
        reply = *inner;
    }

    match reply {
        Reply::Json(v) => Json(v).into_response(),
        Reply::Status(code, text) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, text).into_response()
        }
        Reply::Garbage(text) => (StatusCode::OK, text).into_response(),
        Reply::Delayed(..) => unreachable!(),
    }
}
