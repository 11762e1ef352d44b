//! HTTP transport shared by the registry client and the directory fetcher
//!
//! The pipeline only ever issues plain GETs, so the seam is a single-method
//! trait. [`ReqwestClient`] is the production implementation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Environment variable name for a GitHub token (works with private repos)
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Status and body of a completed request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human-readable status, e.g. `HTTP 404 Not Found`
    pub fn status_line(&self) -> String {
        let reason = reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason());
        match reason {
            Some(reason) => format!("HTTP {} {}", self.status, reason),
            None => format!("HTTP {}", self.status),
        }
    }
}

/// The request never produced a response (DNS, TLS, connection reset...)
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct TransportError {
    pub reason: String,
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self {
            reason: e.to_string(),
        }
    }
}

/// Minimal GET-only HTTP client
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError>;
}

/// reqwest-backed [`HttpClient`]
pub struct ReqwestClient {
    client: reqwest::Client,
    /// Bearer token, only sent to this host
    auth: Option<(String, String)>,
}

impl ReqwestClient {
    /// Create a new client with a custom user agent
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, auth: None })
    }

    /// Create a client that authenticates against `api` when `GITHUB_TOKEN` is set
    pub fn from_env(user_agent: &str, api: &Url) -> Result<Self> {
        let client = Self::new(user_agent)?;
        Ok(match (std::env::var(GITHUB_TOKEN_ENV).ok(), api.host_str()) {
            (Some(token), Some(host)) if !token.is_empty() => client.with_token(host, token),
            _ => client,
        })
    }

    pub fn with_token(mut self, host: impl Into<String>, token: impl Into<String>) -> Self {
        self.auth = Some((host.into(), token.into()));
        self
    }

    /// Build a request with optional auth header
    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url.clone());

        if let Some((host, token)) = &self.auth {
            if url.host_str() == Some(host.as_str()) {
                request = request.header("Authorization", format!("Bearer {}", token));
            }
        }

        request
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        tracing::debug!(%url, "GET");
        let response = self.build_request(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(%url, status, bytes = body.len(), "response");
        Ok(HttpResponse { status, body })
    }
}
