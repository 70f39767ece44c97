//! Backend HTTP client.
//!
//! All real work — search indexing, storage, and AI inference — happens on
//! the backend; this module is the single place that talks to it.
//!
//! # Endpoints
//!
//! | Method | Path | Used by |
//! |--------|------|---------|
//! | `GET`  | `/api/documents` | [`crate::store::DocumentStore`] |
//! | `POST` | `/api/chat` | [`crate::chat::ChatSession`] |
//! | `POST` | `/api/upload` | [`crate::upload`] |
//! | `GET`  | `/` | `dsh ping` health check |
//!
//! # Failure policy
//!
//! Transport failures and non-2xx statuses surface as errors carrying the
//! status and response body. There is no automatic retry anywhere: callers
//! log the error, show a fixed fallback message, and leave their state
//! unchanged. The user re-issues the action if they want another attempt.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::models::Document;

/// HTTP client bound to one backend base URL.
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

/// Response body of `POST /api/chat`.
///
/// `context` is at most one undifferentiated block of retrieved text; the
/// backend does not return a per-source list.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    #[serde(default)]
    pub context: Option<String>,
}

/// Response body of `POST /api/upload`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub message: String,
    /// One-line summary the backend generates while indexing the file.
    #[serde(default)]
    pub summary: Option<String>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Get the backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full document collection.
    pub async fn fetch_documents(&self) -> Result<Vec<Document>> {
        let url = format!("{}/api/documents", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("document listing failed ({}): {}", status, body);
        }

        let docs: Vec<Document> = response
            .json()
            .await
            .context("Invalid document listing from backend")?;

        Ok(docs)
    }

    /// Send one chat query. Exactly one request per call; no retry.
    pub async fn ask(&self, query: &str) -> Result<ChatReply> {
        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await
            .with_context(|| format!("POST {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("chat request failed ({}): {}", status, body);
        }

        let reply: ChatReply = response
            .json()
            .await
            .context("Invalid chat reply from backend")?;

        Ok(reply)
    }

    /// Push one file to the backend indexer as a multipart upload.
    pub async fn upload(&self, path: &Path) -> Result<UploadReply> {
        let url = format!("{}/api/upload", self.base_url);

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_string())
            .ok_or_else(|| anyhow::anyhow!("invalid file name: {}", path.display()))?;

        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let form = reqwest::multipart::Form::new()
            .part("file", reqwest::multipart::Part::bytes(bytes).file_name(file_name));

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("POST {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("upload failed ({}): {}", status, body);
        }

        let reply: UploadReply = response.json().await.unwrap_or(UploadReply {
            message: "Success".to_string(),
            summary: None,
        });

        Ok(reply)
    }

    /// Hit the backend root health endpoint.
    pub async fn ping(&self) -> Result<serde_json::Value> {
        let url = format!("{}/", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("health check failed ({})", status);
        }

        let body = response.json().await.unwrap_or(serde_json::json!({}));
        Ok(body)
    }
}

/// CLI entry point for `dsh ping`.
pub async fn run_ping(config: &crate::config::Config) -> Result<()> {
    let client = BackendClient::new(&config.backend)?;
    let body = client.ping().await?;

    let status = body
        .get("status")
        .and_then(|s| s.as_str())
        .unwrap_or("unknown");
    println!("backend: {}", client.base_url());
    println!("status:  {}", status);

    Ok(())
}
