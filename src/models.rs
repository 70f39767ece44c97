//! Core data models used throughout docshelf.
//!
//! These types mirror the backend's wire format: the document listing from
//! `GET /api/documents` and the chat exchange types that flow through the
//! chat session.

use serde::{Deserialize, Deserializer, Serialize};

/// A record describing one indexed file, as returned by the backend.
///
/// Only `id` and `title` are reliably present; everything else is optional
/// enrichment that degrades to placeholder text when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Opaque stable identifier, unique within one fetch of the store.
    /// The backend serializes it as either a JSON number or a string.
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub title: String,
    /// Short format tag ("pdf", "docx", ...). Display-only, not validated
    /// against a closed set.
    #[serde(rename = "type", default)]
    pub doc_type: String,
    /// ISO-parseable date string, used for the recency sort.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(rename = "keyPoints", default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Presigned download link, when the backend attaches one.
    #[serde(default)]
    pub url: Option<String>,
}

/// Accept a document id as either a JSON string or a number.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "invalid document id: {}",
            other
        ))),
    }
}

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One exchange entry in the chat transcript. Turns are append-only,
/// insertion-ordered, and never mutated or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// Display-only pointer to the backend context that contributed to an
/// answer. Not guaranteed to resolve to a real [`Document`] id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDoc {
    pub title: String,
    pub vendor: String,
    #[serde(rename = "type")]
    pub doc_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_numeric_id() {
        let doc: Document = serde_json::from_str(
            r#"{"id": 2, "title": "AWS EKS Guide", "type": "docx", "date": "2025-01-05", "vendor": "AWS"}"#,
        )
        .unwrap();
        assert_eq!(doc.id, "2");
        assert_eq!(doc.doc_type, "docx");
        assert_eq!(doc.vendor.as_deref(), Some("AWS"));
    }

    #[test]
    fn test_document_string_id() {
        let doc: Document =
            serde_json::from_str(r#"{"id": "a1b2", "title": "Runbook"}"#).unwrap();
        assert_eq!(doc.id, "a1b2");
    }

    #[test]
    fn test_document_optional_fields_absent() {
        let doc: Document = serde_json::from_str(r#"{"id": 1, "title": "Bare"}"#).unwrap();
        assert!(doc.summary.is_none());
        assert!(doc.key_points.is_empty());
        assert!(doc.author.is_none());
        assert!(doc.vendor.is_none());
        assert!(doc.url.is_none());
        assert_eq!(doc.date, "");
    }

    #[test]
    fn test_document_key_points_rename() {
        let doc: Document = serde_json::from_str(
            r#"{"id": 1, "title": "Guide", "keyPoints": ["one", "two"]}"#,
        )
        .unwrap();
        assert_eq!(doc.key_points, vec!["one", "two"]);
    }

    #[test]
    fn test_document_rejects_object_id() {
        let result: Result<Document, _> =
            serde_json::from_str(r#"{"id": {"nested": true}, "title": "Bad"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_chat_turn_constructors() {
        let user = ChatTurn::user("hello");
        assert_eq!(user.role, ChatRole::User);
        assert_eq!(user.text, "hello");

        let assistant = ChatTurn::assistant("hi there");
        assert_eq!(assistant.role, ChatRole::Assistant);
    }
}
