// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process stand-in for the wallet service.
//!
//! Mirrors the service's routes under `/api`, records every request and lets
//! a test script failures or delays per endpoint.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::{json, Value};

use crate::{api::ApiGateway, config::ClientConfig, session::SessionStore};

pub const MOCK_TOKEN: &str = "session-token-abc";
pub const MOCK_MNEMONIC: &str =
    "abandon ability able about above absent absorb abstract absurd abuse access accident";
pub const MOCK_ADDRESS: &str = "smr1qpzry9x8gf2tvdw0s3jn54khce6mua7lqpzry9x8gf2tvdw0s3jn54khce6";
pub const MOCK_BALANCE_MICROS: i64 = 1_500_000;
pub const MOCK_TXID: &str = "0x6a1f0c";

/// What the mock saw for one request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct MockState {
    seen: Vec<SeenRequest>,
    scripted: HashMap<String, (StatusCode, Value)>,
    delays: HashMap<String, Duration>,
    balance: Value,
}

#[derive(Clone)]
pub struct MockWalletService {
    addr: SocketAddr,
    state: Arc<Mutex<MockState>>,
}

impl MockWalletService {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockState {
            balance: json!(MOCK_BALANCE_MICROS),
            ..MockState::default()
        }));

        let app = Router::new()
            .route("/api/{*endpoint}", any(handle))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock wallet service");
        let addr = listener.local_addr().expect("mock address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock wallet service");
        });

        Self { addr, state }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(format!("http://{}", self.addr).parse().expect("mock url"))
    }

    pub fn gateway(&self, session: SessionStore) -> ApiGateway {
        ApiGateway::new(self.config(), session).expect("gateway")
    }

    /// Answer `path` with `status` and a `{"detail": reason}` body.
    pub fn fail(&self, path: &str, status: StatusCode, reason: &str) {
        self.respond(path, status, json!({ "detail": reason }));
    }

    pub fn respond(&self, path: &str, status: StatusCode, body: Value) {
        self.lock().scripted.insert(path.to_string(), (status, body));
    }

    /// Drop a scripted answer so `path` behaves normally again.
    pub fn restore(&self, path: &str) {
        self.lock().scripted.remove(path);
    }

    pub fn delay(&self, path: &str, delay: Duration) {
        self.lock().delays.insert(path.to_string(), delay);
    }

    pub fn set_balance(&self, available: Value) {
        self.lock().balance = available;
    }

    pub fn calls(&self, path: &str) -> usize {
        self.lock().seen.iter().filter(|r| r.path == path).count()
    }

    pub fn total_calls(&self) -> usize {
        self.lock().seen.len()
    }

    /// Endpoint paths in the order they were called.
    pub fn call_order(&self) -> Vec<String> {
        self.lock().seen.iter().map(|r| r.path.clone()).collect()
    }

    pub fn last_request(&self, path: &str) -> Option<SeenRequest> {
        self.lock().seen.iter().rev().find(|r| r.path == path).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }
}

async fn handle(
    State(state): State<Arc<Mutex<MockState>>>,
    method: Method,
    Path(endpoint): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = format!("/{endpoint}");
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let authorization = header_value(header::AUTHORIZATION);
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let (scripted, delay, balance) = {
        let mut state = state.lock().expect("mock state poisoned");
        state.seen.push(SeenRequest {
            method,
            path: path.clone(),
            authorization: authorization.clone(),
            content_type: header_value(header::CONTENT_TYPE),
            body: body.clone(),
        });
        (
            state.scripted.get(&path).cloned(),
            state.delays.get(&path).copied(),
            state.balance.clone(),
        )
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    if let Some((status, body)) = scripted {
        return (status, Json(body)).into_response();
    }

    let authorized = authorization.as_deref() == Some(format!("Bearer {MOCK_TOKEN}").as_str());
    let unauthorized = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Missing or invalid Authorization header" })),
        )
            .into_response()
    };

    match path.as_str() {
        "/create" => Json(json!({ "mnemonic": MOCK_MNEMONIC })).into_response(),
        "/recover" => Json(json!({ "ok": true })).into_response(),
        "/login" => Json(json!({
            "token": MOCK_TOKEN,
            "account": format!("Account {}", body["account_name"].as_str().unwrap_or_default()),
        }))
        .into_response(),
        "/logout" => Json(json!({ "ok": true })).into_response(),
        "/balance" if authorized => Json(json!({ "available": balance })).into_response(),
        "/address" if authorized => Json(json!({ "address": MOCK_ADDRESS })).into_response(),
        "/send" if authorized => Json(json!({
            "txid": MOCK_TXID,
            "amount": body["amount"].as_i64().unwrap_or_default(),
        }))
        .into_response(),
        "/balance" | "/address" | "/send" => unauthorized(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response(),
    }
}
