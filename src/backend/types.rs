//! Wire types exchanged with the backend

use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::constants::{
    CLASSIFICATION_PLACEHOLDER, DERIVED_PREVIEW_CHARS, DRAFT_PLACEHOLDER, HTML_WRAP_WIDTH,
    SUMMARY_PLACEHOLDER,
};

/// Opaque email identifier as issued by the backend.
///
/// The backend may send it as a JSON integer or string; either way it is kept
/// as text and written verbatim into request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailId(String);

impl EmailId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for EmailId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for EmailId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for EmailId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Signed(i64),
            Unsigned(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// An email as listed by the backend. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Email {
    pub id: EmailId,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub body: String,
    // Display-only metadata some backends include
    #[serde(default)]
    pub received_at: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
}

impl Email {
    /// One-line preview: the backend's preview, or the start of the body.
    pub fn display_preview(&self) -> String {
        let preview = self.preview.trim();
        if !preview.is_empty() {
            return preview.to_string();
        }

        let flattened = self.body.split_whitespace().collect::<Vec<_>>().join(" ");
        if flattened.chars().count() <= DERIVED_PREVIEW_CHARS {
            flattened
        } else {
            let cut: String = flattened.chars().take(DERIVED_PREVIEW_CHARS).collect();
            format!("{}...", cut.trim_end())
        }
    }

    /// Body as readable text. HTML bodies are converted to plain text.
    pub fn display_body(&self) -> String {
        if looks_like_html(&self.body) {
            html2text::from_read(self.body.as_bytes(), HTML_WRAP_WIDTH)
                .unwrap_or_else(|_| self.body.clone())
        } else {
            self.body.clone()
        }
    }

    /// Received timestamp formatted for display, if the backend sent one
    pub fn received_display(&self) -> Option<String> {
        let raw = self.received_at.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.format("%Y-%m-%d %H:%M").to_string());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.format("%Y-%m-%d %H:%M").to_string());
        }
        Some(raw.to_string())
    }
}

fn looks_like_html(body: &str) -> bool {
    let head: String = body.trim_start().chars().take(256).collect();
    let head = head.to_ascii_lowercase();
    head.starts_with("<!doctype html")
        || head.starts_with("<html")
        || head.contains("<body")
        || head.contains("<div")
        || head.contains("<p>")
}

/// The three AI operations offered per email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Summarize,
    DraftReply,
    Classify,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [Self::Summarize, Self::DraftReply, Self::Classify];

    /// Last path segment of the endpoint: `/emails/{id}/<segment>`
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::DraftReply => "draft-reply",
            Self::Classify => "classify",
        }
    }

    /// Text stored when the backend answers without a usable result
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Summarize => SUMMARY_PLACEHOLDER,
            Self::DraftReply => DRAFT_PLACEHOLDER,
            Self::Classify => CLASSIFICATION_PLACEHOLDER,
        }
    }

    /// Short name for key hints
    pub fn label(self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::DraftReply => "draft",
            Self::Classify => "classify",
        }
    }

    /// Progress text for the status bar
    pub fn progress_label(self) -> &'static str {
        match self {
            Self::Summarize => "Summarizing",
            Self::DraftReply => "Drafting reply",
            Self::Classify => "Classifying",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// One outstanding action call, tagged with the email it was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionTicket {
    pub kind: ActionKind,
    pub email_id: EmailId,
}

impl ActionTicket {
    pub fn new(kind: ActionKind, email_id: EmailId) -> Self {
        Self { kind, email_id }
    }
}

/// Response body of an action endpoint, reduced to its text field.
pub trait ActionResponse: DeserializeOwned {
    fn into_text(self) -> Option<String>;
}

#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    pub summary: Option<String>,
}

impl ActionResponse for SummaryResponse {
    fn into_text(self) -> Option<String> {
        self.summary
    }
}

/// Draft reply body. Backends that return the whole email record carry the
/// draft in `ai_reply` instead of `draft`.
#[derive(Debug, Deserialize)]
pub struct DraftResponse {
    pub draft: Option<String>,
    pub ai_reply: Option<String>,
}

impl ActionResponse for DraftResponse {
    fn into_text(self) -> Option<String> {
        self.draft.or(self.ai_reply)
    }
}

#[derive(Debug, Deserialize)]
pub struct ClassificationResponse {
    pub classification: Option<String>,
}

impl ActionResponse for ClassificationResponse {
    fn into_text(self) -> Option<String> {
        self.classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_with_body(body: &str) -> Email {
        Email {
            id: EmailId::from(1),
            subject: "Hi".to_string(),
            preview: String::new(),
            sender: "a@b.com".to_string(),
            body: body.to_string(),
            received_at: None,
            priority: None,
            sentiment: None,
        }
    }

    #[test]
    fn test_email_id_accepts_integer_and_string() {
        let from_int: EmailId = serde_json::from_str("42").unwrap();
        let from_str: EmailId = serde_json::from_str("\"msg-42\"").unwrap();
        assert_eq!(from_int.as_str(), "42");
        assert_eq!(from_str.as_str(), "msg-42");
    }

    #[test]
    fn test_email_ignores_unknown_fields() {
        let json = r#"{
            "id": 7,
            "subject": "Quarterly report",
            "preview": "Numbers attached",
            "sender": "cfo@example.com",
            "body": "See attached.",
            "summary": null,
            "classification": "Work",
            "received_at": "2025-09-01T08:15:30.123456",
            "priority": "urgent"
        }"#;

        let email: Email = serde_json::from_str(json).unwrap();
        assert_eq!(email.id, EmailId::from(7));
        assert_eq!(email.subject, "Quarterly report");
        assert_eq!(email.priority.as_deref(), Some("urgent"));
        assert_eq!(email.received_display().as_deref(), Some("2025-09-01 08:15"));
    }

    #[test]
    fn test_missing_preview_is_derived_from_body() {
        let email = email_with_body("Hello   there,\n\nsee you\ttomorrow.");
        assert_eq!(email.display_preview(), "Hello there, see you tomorrow.");

        let long = email_with_body(&"word ".repeat(100));
        let preview = long.display_preview();
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= DERIVED_PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_backend_preview_wins_over_body() {
        let mut email = email_with_body("body text");
        email.preview = "p".to_string();
        assert_eq!(email.display_preview(), "p");
    }

    #[test]
    fn test_html_body_is_converted() {
        let email = email_with_body("<html><body><p>Hello <b>world</b></p></body></html>");
        let text = email.display_body();
        assert!(text.contains("Hello"));
        assert!(!text.contains("<p>"));

        let plain = email_with_body("a < b and c > d");
        assert_eq!(plain.display_body(), "a < b and c > d");
    }

    #[test]
    fn test_action_kind_paths_and_placeholders() {
        assert_eq!(ActionKind::Summarize.path_segment(), "summarize");
        assert_eq!(ActionKind::DraftReply.path_segment(), "draft-reply");
        assert_eq!(ActionKind::Classify.path_segment(), "classify");
        assert_eq!(ActionKind::Summarize.placeholder(), "No summary generated.");
        assert_eq!(ActionKind::DraftReply.placeholder(), "No draft generated.");
        assert_eq!(ActionKind::Classify.placeholder(), "Unclassified");
    }

    #[test]
    fn test_draft_response_falls_back_to_ai_reply() {
        let draft: DraftResponse = serde_json::from_str(r#"{"draft": "Sure."}"#).unwrap();
        assert_eq!(draft.into_text().as_deref(), Some("Sure."));

        let record: DraftResponse =
            serde_json::from_str(r#"{"id": 1, "ai_reply": "Thanks!"}"#).unwrap();
        assert_eq!(record.into_text().as_deref(), Some("Thanks!"));

        let empty: DraftResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.into_text(), None);
    }
}
