//! Tools for the email composer app: `compose_email` and `list_emails`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::mcp::models::{ToolAnnotations, ToolDescriptor};

use super::{parse_args, ToolError, ToolHandler, ToolOutput, ToolResult};

pub const COMPOSE_TOOL_NAME: &str = "compose_email";
pub const LIST_TOOL_NAME: &str = "list_emails";

const MAX_SUBJECT_LEN: usize = 200;
const DEFAULT_LIST_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
enum Tone {
    #[default]
    Neutral,
    Formal,
    Friendly,
}

impl Tone {
    fn opening(self, recipient: &str) -> String {
        let first = recipient.split('@').next().unwrap_or(recipient);
        match self {
            Tone::Neutral => format!("Hi {first},"),
            Tone::Formal => format!("Dear {first},"),
            Tone::Friendly => format!("Hey {first}!"),
        }
    }

    fn closing(self) -> &'static str {
        match self {
            Tone::Neutral => "Best,",
            Tone::Formal => "Kind regards,",
            Tone::Friendly => "Cheers!",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ComposeInput {
    to: String,
    subject: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    tone: Tone,
}

#[derive(Debug, Deserialize)]
struct ListInput {
    #[serde(default)]
    folder: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

/// Mock mailbox entry rendered by the widget.
#[derive(Debug, Clone, Serialize)]
pub struct MockEmail {
    pub id: &'static str,
    pub folder: &'static str,
    pub from: &'static str,
    pub subject: &'static str,
    pub preview: &'static str,
    pub received_at: &'static str,
    pub unread: bool,
}

const MAILBOX: &[MockEmail] = &[
    MockEmail {
        id: "em_001",
        folder: "inbox",
        from: "maria@example.com",
        subject: "Quarterly report draft",
        preview: "Attached is the first pass at the Q3 numbers...",
        received_at: "2024-09-30T09:12:00Z",
        unread: true,
    },
    MockEmail {
        id: "em_002",
        folder: "inbox",
        from: "devops@example.com",
        subject: "Deploy window moved to Thursday",
        preview: "Heads up: the release train leaves 2 days later...",
        received_at: "2024-09-29T17:45:00Z",
        unread: false,
    },
    MockEmail {
        id: "em_003",
        folder: "inbox",
        from: "hr@example.com",
        subject: "Benefits enrollment closes Friday",
        preview: "Reminder that open enrollment ends this week...",
        received_at: "2024-09-28T08:00:00Z",
        unread: true,
    },
    MockEmail {
        id: "em_004",
        folder: "sent",
        from: "me@example.com",
        subject: "Re: Offsite venue options",
        preview: "The lakeside option looks best for the budget...",
        received_at: "2024-09-27T14:20:00Z",
        unread: false,
    },
    MockEmail {
        id: "em_005",
        folder: "archive",
        from: "billing@example.com",
        subject: "Your invoice for August",
        preview: "Invoice #4471 is now available...",
        received_at: "2024-09-01T06:30:00Z",
        unread: false,
    },
];

fn valid_address(address: &str) -> bool {
    let mut parts = address.splitn(2, '@');
    match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        _ => false,
    }
}

pub struct ComposeEmailTool;

#[async_trait]
impl ToolHandler for ComposeEmailTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: COMPOSE_TOOL_NAME.to_string(),
            title: Some("Compose email".to_string()),
            description: "Drafts an email for review in the composer widget. Nothing is sent."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "to": { "type": "string", "format": "email" },
                    "subject": { "type": "string", "maxLength": MAX_SUBJECT_LEN },
                    "body": { "type": "string" },
                    "tone": { "type": "string", "enum": ["neutral", "formal", "friendly"] }
                },
                "required": ["to", "subject"],
                "additionalProperties": false
            }),
            annotations: Some(ToolAnnotations::generative()),
            meta: None,
        }
    }

    async fn call(&self, args: Value) -> ToolResult {
        let input: ComposeInput = parse_args(args)?;

        let to = input.to.trim();
        if !valid_address(to) {
            return Err(ToolError::rejected_with_code(
                format!("Invalid recipient address: {to}"),
                "INVALID_RECIPIENT",
            ));
        }
        let subject = input.subject.trim();
        if subject.is_empty() {
            return Err(ToolError::rejected_with_code("Subject is required", "SUBJECT_REQUIRED"));
        }
        if subject.chars().count() > MAX_SUBJECT_LEN {
            return Err(ToolError::rejected_with_code(
                format!("Subject must be at most {MAX_SUBJECT_LEN} characters"),
                "SUBJECT_TOO_LONG",
            ));
        }

        let body = input.body.as_deref().map(str::trim).unwrap_or_default();
        let text = format!(
            "{}\n\n{}\n\n{}",
            input.tone.opening(to),
            if body.is_empty() { "(write your message here)" } else { body },
            input.tone.closing()
        );
        let draft_id = format!("draft_{}", Uuid::new_v4().simple());

        Ok(ToolOutput::new(
            format!("Draft ready for {to}: \"{subject}\""),
            json!({
                "draftId": draft_id,
                "to": to,
                "subject": subject,
                "body": text,
                "tone": input.tone,
                "status": "draft",
            }),
        ))
    }
}

pub struct ListEmailsTool;

#[async_trait]
impl ToolHandler for ListEmailsTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: LIST_TOOL_NAME.to_string(),
            title: Some("List emails".to_string()),
            description: "Lists messages from the mock mailbox.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "folder": { "type": "string", "enum": ["inbox", "sent", "archive"] },
                    "limit": { "type": "integer", "minimum": 1, "default": DEFAULT_LIST_LIMIT }
                },
                "additionalProperties": false
            }),
            annotations: Some(ToolAnnotations::read_only()),
            meta: None,
        }
    }

    async fn call(&self, args: Value) -> ToolResult {
        let input: ListInput = parse_args(args)?;
        let folder = input.folder.as_deref().unwrap_or("inbox").to_ascii_lowercase();

        if !MAILBOX.iter().any(|e| e.folder == folder) {
            return Err(ToolError::rejected_with_code(
                format!("Unknown folder: {folder}"),
                "UNKNOWN_FOLDER",
            ));
        }

        let limit = input.limit.unwrap_or(DEFAULT_LIST_LIMIT).max(1);
        let emails: Vec<&MockEmail> = MAILBOX
            .iter()
            .filter(|e| e.folder == folder)
            .take(limit)
            .collect();
        let unread = emails.iter().filter(|e| e.unread).count();

        Ok(ToolOutput::new(
            format!("Showing {} emails from {folder}", emails.len()),
            json!({
                "folder": folder,
                "emails": emails,
                "unread": unread,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_validation() {
        assert!(valid_address("a@b.co"));
        assert!(!valid_address("a@b"));
        assert!(!valid_address("@b.co"));
        assert!(!valid_address("plain"));
    }

    #[tokio::test]
    async fn compose_builds_a_draft() {
        let out = ComposeEmailTool
            .call(json!({
                "to": "sam@example.com",
                "subject": "Lunch",
                "body": "Tacos at noon?",
                "tone": "friendly"
            }))
            .await
            .unwrap();
        assert_eq!(out.summary, "Draft ready for sam@example.com: \"Lunch\"");
        assert_eq!(out.structured["status"], "draft");
        assert_eq!(out.structured["tone"], "friendly");
        let body = out.structured["body"].as_str().unwrap();
        assert!(body.starts_with("Hey sam!"));
        assert!(body.contains("Tacos at noon?"));
        assert!(out.structured["draftId"].as_str().unwrap().starts_with("draft_"));
    }

    #[tokio::test]
    async fn compose_rejects_bad_recipient() {
        let err = ComposeEmailTool
            .call(json!({ "to": "nobody", "subject": "x" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Rejected { code: Some(c), .. } if c == "INVALID_RECIPIENT"));
    }

    #[tokio::test]
    async fn list_defaults_to_inbox() {
        let out = ListEmailsTool.call(json!({})).await.unwrap();
        assert_eq!(out.summary, "Showing 3 emails from inbox");
        assert_eq!(out.structured["unread"], 2);
        assert_eq!(out.structured["emails"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn list_honours_limit_and_folder() {
        let out = ListEmailsTool
            .call(json!({ "folder": "inbox", "limit": 1 }))
            .await
            .unwrap();
        assert_eq!(out.structured["emails"][0]["id"], "em_001");

        let err = ListEmailsTool.call(json!({ "folder": "spam" })).await.unwrap_err();
        assert!(matches!(err, ToolError::Rejected { .. }));
    }
}
