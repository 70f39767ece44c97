//! Client-side substring search over the cached snapshot.
//!
//! There is no ranking: matches come back in snapshot order, which is
//! date-descending. A zero-match search hands the exact query off to the
//! chat flow by writing the handoff key and printing an escalation hint —
//! the next `dsh chat` submits the same string unchanged.

use anyhow::{bail, Result};

use crate::api::BackendClient;
use crate::config::Config;
use crate::handoff;
use crate::models::Document;
use crate::store::{self, DocumentStore};

/// Return the documents whose title or vendor contains `query` as a
/// case-insensitive substring, in snapshot order.
///
/// Callers must reject empty queries before calling; this function assumes
/// a non-empty trimmed string.
pub fn search<'a>(snapshot: &'a [Document], query: &str) -> Vec<&'a Document> {
    let needle = query.to_lowercase();
    snapshot
        .iter()
        .filter(|doc| {
            doc.title.to_lowercase().contains(&needle)
                || doc
                    .vendor
                    .as_deref()
                    .map(|v| v.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        })
        .collect()
}

/// CLI entry point for `dsh search`.
pub async fn run_search(config: &Config, query: &str) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        bail!("search query must not be empty");
    }

    let client = BackendClient::new(&config.backend)?;
    let mut store = DocumentStore::new();
    store.load(&client).await;

    let hits = search(store.all(), query);

    if hits.is_empty() {
        // Zero matches hand off to the chat flow with the exact query string.
        handoff::store(&config.handoff.path, query)?;
        println!("No documents matched \"{}\".", query);
        println!("The query was queued for the assistant. Run 'dsh chat' to ask it.");
        return Ok(());
    }

    println!("{} match(es) for \"{}\":", hits.len(), query);
    println!();
    for (i, doc) in hits.iter().enumerate() {
        store::print_doc_line(i + 1, doc);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_doc(id: &str, title: &str, vendor: Option<&str>, date: &str) -> Document {
        let mut value = serde_json::json!({
            "id": id,
            "title": title,
            "date": date,
        });
        if let Some(v) = vendor {
            value["vendor"] = serde_json::json!(v);
        }
        serde_json::from_value(value).unwrap()
    }

    fn sample_snapshot() -> Vec<Document> {
        vec![
            make_doc("1", "AWS EKS Guide", Some("AWS"), "2025-01-05"),
            make_doc("2", "VPN Troubleshooting", Some("Internal"), "2025-01-02"),
        ]
    }

    #[test]
    fn test_title_match_case_insensitive() {
        let snapshot = sample_snapshot();
        let hits = search(&snapshot, "aws");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[test]
    fn test_vendor_match() {
        let snapshot = sample_snapshot();
        let hits = search(&snapshot, "internal");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn test_no_match_returns_empty() {
        let snapshot = sample_snapshot();
        let hits = search(&snapshot, "gcp");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_missing_vendor_is_not_a_match() {
        let snapshot = vec![make_doc("1", "Untagged notes", None, "2024-01-01")];
        assert!(search(&snapshot, "aws").is_empty());
        assert_eq!(search(&snapshot, "notes").len(), 1);
    }

    #[test]
    fn test_matches_preserve_snapshot_order() {
        let snapshot = vec![
            make_doc("1", "RedHat OpenShift Install Guide", Some("RedHat"), "2024-12-01"),
            make_doc("2", "OpenShift Upgrade Notes", Some("RedHat"), "2024-11-01"),
            make_doc("3", "Tanzu Operations Guide", Some("VMware"), "2024-10-15"),
        ];
        let hits = search(&snapshot, "openshift");
        let ids: Vec<&str> = hits.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_substring_not_whole_word() {
        let snapshot = vec![make_doc("1", "Kubernetes Hardening", Some("CNCF"), "2024-01-01")];
        assert_eq!(search(&snapshot, "ubern").len(), 1);
    }
}
