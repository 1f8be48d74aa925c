// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Outbound HTTP to the wallet service.
//!
//! Every request gets `Content-Type: application/json` and
//! `Accept: application/json`. `Authorization: Bearer <token>` is attached
//! whenever the session holds a token. The token is read from the
//! [`SessionStore`] at call time, never cached here, so a token written in
//! the middle of a multi-step flow is honored by the very next call.
//!
//! The gateway does not retry and does not interpret status codes: a non-2xx
//! answer comes back as an ordinary [`ApiResponse`] for the caller to inspect.

use std::sync::Arc;

use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{config::ClientConfig, error::ClientError, session::SessionStore};

const JSON_MEDIA_TYPE: &str = "application/json";

/// Raw answer from the service.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Human-readable failure reason.
    ///
    /// The service wraps reasons as `{"detail": "..."}`; when that shape is
    /// present the inner text is returned, otherwise the body as-is.
    pub fn reason(&self) -> String {
        #[derive(serde::Deserialize)]
        struct Detail {
            detail: String,
        }

        match serde_json::from_str::<Detail>(&self.body) {
            Ok(d) => d.detail,
            Err(_) if self.body.trim().is_empty() => self
                .status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
            Err(_) => self.body.clone(),
        }
    }

    pub fn into_remote_error(self) -> ClientError {
        ClientError::Remote {
            status: self.status.as_u16(),
            body: self.reason(),
        }
    }
}

/// HTTP gateway to the wallet service.
#[derive(Clone)]
pub struct ApiGateway {
    http: Client,
    config: Arc<ClientConfig>,
    session: SessionStore,
}

impl ApiGateway {
    /// Build a gateway with its own HTTP client.
    pub fn new(config: ClientConfig, session: SessionStore) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(http, config, session))
    }

    pub fn with_client(http: Client, config: ClientConfig, session: SessionStore) -> Self {
        Self {
            http,
            config: Arc::new(config),
            session,
        }
    }

    /// Issue one request.
    ///
    /// Only a failure to complete the exchange is an `Err`; every HTTP status,
    /// including 4xx and 5xx, is `Ok`.
    pub async fn call<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config.endpoint(path);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE)
            .header(ACCEPT, JSON_MEDIA_TYPE);

        if let Some(token) = self.session.token().await {
            request = request.bearer_auth(token.as_str());
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(%method, path, status = status.as_u16(), "wallet service call");

        Ok(ApiResponse { status, body })
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.call::<()>(Method::GET, path, None).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.call(Method::POST, path, Some(body)).await
    }
}
