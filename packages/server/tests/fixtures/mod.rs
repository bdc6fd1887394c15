//! Test fixtures for integration tests.
//!
//! Starts the relay in-process on an ephemeral port, wired to a fake AI
//! backend that counts the questions it receives.

#![allow(dead_code)]

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{Json, Router, http::StatusCode, routing::post};
use roomrelay_server::{
    AppState, build_router,
    domain::AdminGate,
    infrastructure::{
        ai_responder::HttpAiResponder,
        repository::{InMemoryRoomRepository, InMemorySubscriptionRegistry},
    },
};
use serde_json::Value;
use tokio::net::TcpListener;

/// Canned behaviour of the fake AI backend
#[derive(Debug, Clone, Copy)]
pub struct FakeAi {
    pub status: StatusCode,
    pub body: &'static str,
    pub delay: Duration,
}

impl FakeAi {
    pub fn answering(body: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn failing(status: StatusCode) -> Self {
        Self {
            status,
            body: r#"{"error":"boom"}"#,
            delay: Duration::ZERO,
        }
    }
}

impl Default for FakeAi {
    fn default() -> Self {
        Self::answering(r#"{"answer":{"text":"pong"}}"#)
    }
}

/// In-process relay server for integration tests.
pub struct TestServer {
    addr: String,
    ai_calls: Arc<AtomicUsize>,
    gate: Arc<AdminGate>,
}

impl TestServer {
    /// Start a server whose AI backend answers `{"answer":{"text":"pong"}}`.
    pub async fn start() -> Self {
        Self::start_with_ai(FakeAi::default()).await
    }

    pub async fn start_with_ai(ai: FakeAi) -> Self {
        let (ai_endpoint, ai_calls) = spawn_fake_ai(ai).await;

        let responder = HttpAiResponder::new(ai_endpoint, Duration::from_secs(2))
            .expect("Failed to build AI responder");
        let gate = Arc::new(AdminGate::new(true));
        let state = AppState::new(
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemorySubscriptionRegistry::new()),
            Arc::new(responder),
            gate.clone(),
        );
        let app = build_router(Arc::new(state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("No local address").to_string();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            addr,
            ai_calls,
            gate,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Number of questions the fake AI backend has received
    pub fn ai_calls(&self) -> usize {
        self.ai_calls.load(Ordering::SeqCst)
    }

    pub fn gate(&self) -> &Arc<AdminGate> {
        &self.gate
    }
}

async fn spawn_fake_ai(ai: FakeAi) -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let app = Router::new().route(
        "/prediction",
        post(move |Json(_request): Json<Value>| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(ai.delay).await;
                (ai.status, ai.body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake AI backend");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake AI backend failed");
    });

    (format!("http://{addr}/prediction"), calls)
}
