//! Upload flow.
//!
//! Thin client side of `POST /api/upload`: the backend stores the file,
//! generates a one-line summary, and indexes it. No retrieval logic lives
//! here.

use anyhow::{bail, Result};
use std::path::Path;

use crate::api::BackendClient;
use crate::config::Config;

/// CLI entry point for `dsh upload`.
pub async fn run_upload(config: &Config, path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("not a file: {}", path.display());
    }

    let client = BackendClient::new(&config.backend)?;
    let reply = client.upload(path).await?;

    println!("Uploaded {}.", path.display());
    if let Some(ref summary) = reply.summary {
        println!("summary: {}", summary);
    }
    if !reply.message.is_empty() && reply.message != "Success" {
        println!("backend: {}", reply.message);
    }

    Ok(())
}
