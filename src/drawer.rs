//! Document detail view.
//!
//! The drawer is a two-state machine: `Closed` or `Open` on one document.
//! Opening while open replaces the displayed document; closing is
//! idempotent. Rendering is a pure projection to a text block so the
//! placeholder rules are testable without a terminal.

use anyhow::{bail, Result};

use crate::api::BackendClient;
use crate::config::Config;
use crate::models::Document;
use crate::store::DocumentStore;

/// Shown when a document has no usable summary yet.
pub const SUMMARY_PLACEHOLDER: &str =
    "This document has not been summarized yet. Ask the assistant for an overview.";

/// Shown when a document has no key points recorded.
pub const KEY_POINTS_PLACEHOLDER: &str = "No analysis data recorded for this document.";

/// The detail view state machine.
#[derive(Debug, Default)]
pub enum Drawer {
    #[default]
    Closed,
    Open(Document),
}

impl Drawer {
    pub fn new() -> Self {
        Drawer::Closed
    }

    /// Open on `doc`, replacing whatever was displayed before.
    pub fn open(&mut self, doc: Document) {
        *self = Drawer::Open(doc);
    }

    /// Return to the closed state. Idempotent.
    pub fn close(&mut self) {
        *self = Drawer::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Drawer::Open(_))
    }

    /// Project the current state to a display block; `None` when closed.
    pub fn render(&self, summary_min_chars: usize) -> Option<String> {
        match self {
            Drawer::Closed => None,
            Drawer::Open(doc) => Some(render_document(doc, summary_min_chars)),
        }
    }
}

/// Render one document's detail block.
///
/// The real summary is shown only when it is longer than
/// `summary_min_chars`; anything shorter is treated as not-yet-summarized.
pub fn render_document(doc: &Document, summary_min_chars: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!("[{}] {}\n", doc.doc_type.to_uppercase(), doc.title));
    if let Some(ref vendor) = doc.vendor {
        out.push_str(&format!("vendor: {}\n", vendor));
    }
    if !doc.date.is_empty() {
        out.push_str(&format!("date:   {}\n", doc.date));
    }
    out.push_str(&format!(
        "author: {}\n",
        doc.author.as_deref().unwrap_or("(unknown)")
    ));
    if let Some(ref url) = doc.url {
        out.push_str(&format!("url:    {}\n", url));
    }

    out.push('\n');
    out.push_str("Summary:\n");
    let summary = doc
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| s.chars().count() > summary_min_chars)
        .unwrap_or(SUMMARY_PLACEHOLDER);
    out.push_str(&format!("  {}\n", summary));

    out.push('\n');
    out.push_str("Key points:\n");
    if doc.key_points.is_empty() {
        out.push_str(&format!("  {}\n", KEY_POINTS_PLACEHOLDER));
    } else {
        for point in &doc.key_points {
            out.push_str(&format!("  - {}\n", point));
        }
    }

    out
}

/// CLI entry point for `dsh show` — open the drawer on one document by id.
pub async fn run_show(config: &Config, id: &str) -> Result<()> {
    let client = BackendClient::new(&config.backend)?;
    let mut store = DocumentStore::new();
    store.load(&client).await;

    let doc = match store.find(id) {
        Some(doc) => doc.clone(),
        None => bail!("document not found: {}", id),
    };

    let mut drawer = Drawer::new();
    drawer.open(doc);
    if let Some(block) = drawer.render(config.ui.summary_min_chars) {
        println!("{}", block);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_doc(summary: Option<&str>, key_points: &[&str]) -> Document {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "AWS EKS Security Best Practices",
            "type": "docx",
            "date": "2025-01-05",
            "vendor": "AWS",
            "author": "Security Part",
            "summary": summary,
            "keyPoints": key_points,
        }))
        .unwrap()
    }

    #[test]
    fn test_state_machine_open_close() {
        let mut drawer = Drawer::new();
        assert!(!drawer.is_open());

        drawer.open(make_doc(None, &[]));
        assert!(drawer.is_open());

        drawer.close();
        assert!(!drawer.is_open());
        assert!(drawer.render(20).is_none());

        // close is idempotent
        drawer.close();
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_reopen_replaces_document() {
        let mut drawer = Drawer::new();
        drawer.open(make_doc(Some("first summary, long enough to show"), &[]));
        drawer.open(make_doc(Some("second summary, also long enough"), &[]));

        let block = drawer.render(20).unwrap();
        assert!(block.contains("second summary"));
        assert!(!block.contains("first summary"));
    }

    #[test]
    fn test_short_summary_shows_placeholder() {
        let block = render_document(&make_doc(Some("brief"), &[]), 20);
        assert!(block.contains(SUMMARY_PLACEHOLDER));
        assert!(!block.contains("  brief\n"));
    }

    #[test]
    fn test_long_summary_shown() {
        let summary = "a".repeat(25);
        let block = render_document(&make_doc(Some(&summary), &[]), 20);
        assert!(block.contains(&summary));
        assert!(!block.contains(SUMMARY_PLACEHOLDER));
    }

    #[test]
    fn test_missing_summary_shows_placeholder() {
        let block = render_document(&make_doc(None, &[]), 20);
        assert!(block.contains(SUMMARY_PLACEHOLDER));
    }

    #[test]
    fn test_key_points_listed() {
        let block = render_document(
            &make_doc(None, &["Private endpoint", "Enable IRSA"]),
            20,
        );
        assert!(block.contains("  - Private endpoint"));
        assert!(block.contains("  - Enable IRSA"));
        assert!(!block.contains(KEY_POINTS_PLACEHOLDER));
    }

    #[test]
    fn test_empty_key_points_show_placeholder() {
        let block = render_document(&make_doc(None, &[]), 20);
        assert!(block.contains(KEY_POINTS_PLACEHOLDER));
    }

    #[test]
    fn test_header_and_meta_lines() {
        let block = render_document(&make_doc(None, &[]), 20);
        assert!(block.starts_with("[DOCX] AWS EKS Security Best Practices\n"));
        assert!(block.contains("vendor: AWS"));
        assert!(block.contains("date:   2025-01-05"));
        assert!(block.contains("author: Security Part"));
    }

    #[test]
    fn test_missing_author_degrades() {
        let doc: Document =
            serde_json::from_value(serde_json::json!({"id": 1, "title": "Bare"})).unwrap();
        let block = render_document(&doc, 20);
        assert!(block.contains("author: (unknown)"));
    }
}
