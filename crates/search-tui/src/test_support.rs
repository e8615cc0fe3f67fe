//! Local `/search` endpoint for shell tests. Replies are chosen per query.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

pub struct MockReply {
    delay: Duration,
    status: u16,
    body: String,
}

impl MockReply {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            status,
            body: body.to_string(),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Handler = dyn Fn(&str) -> MockReply + Send + Sync;

#[derive(Clone)]
struct MockState {
    hits: Arc<AtomicUsize>,
    handler: Arc<Handler>,
}

pub struct MockSearch {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl MockSearch {
    pub async fn fixed(reply: MockReply) -> Self {
        let MockReply {
            delay,
            status,
            body,
        } = reply;
        Self::start(move |_| MockReply {
            delay,
            status,
            body: body.clone(),
        })
        .await
    }

    pub async fn start(handler: impl Fn(&str) -> MockReply + Send + Sync + 'static) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = MockState {
            hits: hits.clone(),
            handler: Arc::new(handler),
        };
        let app = Router::new()
            .route("/search", post(handle_search))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn handle_search(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, [(&'static str, &'static str); 1], String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let query = body.get("query").and_then(Value::as_str).unwrap_or_default();
    let reply = (state.handler)(query);
    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [("content-type", "application/json")], reply.body)
}

/// A base URL nothing listens on: bind a port, then release it.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
