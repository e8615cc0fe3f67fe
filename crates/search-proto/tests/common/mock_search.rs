#![allow(dead_code)]

//! In-process stand-in for the `/search` endpoint.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

type Responder = dyn Fn(&Value) -> (StatusCode, String) + Send + Sync;

#[derive(Clone)]
struct MockState {
    hits: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<Value>>>,
    delay: Option<Duration>,
    respond: Arc<Responder>,
}

pub struct MockSearchServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl MockSearchServer {
    /// Serve `body` with `status` for every request.
    pub async fn fixed(status: StatusCode, body: &str) -> Self {
        let body = body.to_string();
        Self::start(None, move |_| (status, body.clone())).await
    }

    /// Like `fixed` but sleeps before answering.
    pub async fn slow(delay: Duration, body: &str) -> Self {
        let body = body.to_string();
        Self::start(Some(delay), move |_| (StatusCode::OK, body.clone())).await
    }

    pub async fn start(
        delay: Option<Duration>,
        respond: impl Fn(&Value) -> (StatusCode, String) + Send + Sync + 'static,
    ) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            hits: hits.clone(),
            bodies: bodies.clone(),
            delay,
            respond: Arc::new(respond),
        };

        let app = Router::new()
            .route("/search", post(handle_search))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock search server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
            bodies,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

async fn handle_search(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, [(&'static str, &'static str); 1], String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if let Ok(mut bodies) = state.bodies.lock() {
        bodies.push(body.clone());
    }
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    let (status, text) = (state.respond)(&body);
    (status, [("content-type", "application/json")], text)
}
