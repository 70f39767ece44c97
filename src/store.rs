//! Document snapshot cache.
//!
//! The store owns the most recently fetched document collection. Each
//! successful fetch replaces the snapshot wholesale — there is no live
//! subscription, no partial merge, and no retry. A failed fetch logs a
//! warning and leaves the previous snapshot (possibly empty) intact, so
//! callers always operate on a coherent view.
//!
//! The snapshot is sorted by `date` descending on replacement; documents
//! with equal or unparseable dates keep their original backend order.

use anyhow::Result;
use chrono::NaiveDate;

use crate::api::BackendClient;
use crate::config::Config;
use crate::models::Document;

/// In-memory cache of the last successful document fetch.
#[derive(Debug, Default)]
pub struct DocumentStore {
    snapshot: Vec<Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the full collection and replace the snapshot on success.
    ///
    /// On failure the previous snapshot is kept and a warning is logged;
    /// the error does not propagate. The user re-issues the action if they
    /// want another attempt.
    pub async fn load(&mut self, client: &BackendClient) {
        match client.fetch_documents().await {
            Ok(docs) => self.replace(docs),
            Err(e) => {
                eprintln!("warning: document fetch failed, keeping cached snapshot: {e:#}");
            }
        }
    }

    /// Replace the snapshot wholesale, sorted by date descending.
    /// Ties keep the incoming order (the sort is stable).
    pub fn replace(&mut self, mut docs: Vec<Document>) {
        docs.sort_by(|a, b| sort_date(b).cmp(&sort_date(a)));
        self.snapshot = docs;
    }

    /// The full current snapshot, newest first.
    pub fn all(&self) -> &[Document] {
        &self.snapshot
    }

    /// At most `n` newest documents; all of them if fewer than `n` exist.
    pub fn latest(&self, n: usize) -> &[Document] {
        &self.snapshot[..n.min(self.snapshot.len())]
    }

    /// Resolve a document by id within the current snapshot.
    pub fn find(&self, id: &str) -> Option<&Document> {
        self.snapshot.iter().find(|doc| doc.id == id)
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

/// Recency key for the snapshot sort. Unparseable dates sink to the bottom.
fn sort_date(doc: &Document) -> NaiveDate {
    let raw = doc.date.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive();
    }
    NaiveDate::MIN
}

/// CLI entry point for `dsh docs` — list the latest documents.
pub async fn run_docs(config: &Config, limit: Option<usize>) -> Result<()> {
    let client = BackendClient::new(&config.backend)?;
    let mut store = DocumentStore::new();
    store.load(&client).await;

    let n = limit.unwrap_or(config.ui.latest_count);
    let docs = store.latest(n);

    if docs.is_empty() {
        println!("No documents.");
        return Ok(());
    }

    println!("Latest {} of {} documents:", docs.len(), store.len());
    println!();
    for (i, doc) in docs.iter().enumerate() {
        print_doc_line(i + 1, doc);
    }

    Ok(())
}

/// One listing entry: type tag, title, vendor, preview line, id.
pub(crate) fn print_doc_line(index: usize, doc: &Document) {
    let vendor = doc.vendor.as_deref().unwrap_or("-");
    println!("{}. [{}] {} / {}", index, doc.doc_type, doc.title, vendor);
    if !doc.date.is_empty() {
        println!("    date: {}", doc.date);
    }
    let preview = doc
        .summary
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("(no preview available)");
    println!("    preview: {}", preview.replace('\n', " "));
    println!("    id: {}", doc.id);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_doc(id: &str, title: &str, date: &str) -> Document {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "date": date,
        }))
        .unwrap()
    }

    #[test]
    fn test_replace_sorts_date_descending() {
        let mut store = DocumentStore::new();
        store.replace(vec![
            make_doc("1", "Oldest", "2024-10-15"),
            make_doc("2", "Newest", "2025-01-05"),
            make_doc("3", "Middle", "2024-12-01"),
        ]);

        let ids: Vec<&str> = store.all().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_replace_ties_keep_original_order() {
        let mut store = DocumentStore::new();
        store.replace(vec![
            make_doc("a", "First", "2025-01-02"),
            make_doc("b", "Second", "2025-01-02"),
            make_doc("c", "Third", "2025-01-02"),
        ]);

        let ids: Vec<&str> = store.all().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unparseable_dates_sink() {
        let mut store = DocumentStore::new();
        store.replace(vec![
            make_doc("1", "No date", ""),
            make_doc("2", "Dated", "2024-01-01"),
        ]);

        assert_eq!(store.all()[0].id, "2");
        assert_eq!(store.all()[1].id, "1");
    }

    #[test]
    fn test_rfc3339_dates_accepted() {
        let mut store = DocumentStore::new();
        store.replace(vec![
            make_doc("1", "Older", "2024-06-01T08:00:00Z"),
            make_doc("2", "Newer", "2024-07-01T08:00:00Z"),
        ]);
        assert_eq!(store.all()[0].id, "2");
    }

    #[test]
    fn test_latest_caps_at_snapshot_size() {
        let mut store = DocumentStore::new();
        store.replace(vec![
            make_doc("1", "One", "2025-01-05"),
            make_doc("2", "Two", "2025-01-02"),
        ]);

        assert_eq!(store.latest(1).len(), 1);
        assert_eq!(store.latest(1)[0].id, "1");
        assert_eq!(store.latest(10).len(), 2);
        assert_eq!(store.latest(0).len(), 0);
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut store = DocumentStore::new();
        store.replace(vec![make_doc("1", "One", "2025-01-05")]);
        store.replace(vec![make_doc("9", "Nine", "2024-01-01")]);

        assert_eq!(store.len(), 1);
        assert!(store.find("1").is_none());
        assert!(store.find("9").is_some());
    }

    #[test]
    fn test_find_by_id() {
        let mut store = DocumentStore::new();
        store.replace(vec![
            make_doc("1", "One", "2025-01-05"),
            make_doc("2", "Two", "2025-01-02"),
        ]);

        assert_eq!(store.find("2").unwrap().title, "Two");
        assert!(store.find("7").is_none());
    }
}
