//! Tools for the LinkedIn post composer.
//!
//! Only drafting is real. Publishing would need the member's OAuth token and
//! the Posts API; neither is wired up, so `publish_linkedin_post` always
//! answers with a `NOT_IMPLEMENTED` rejection.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::mcp::models::{ToolAnnotations, ToolDescriptor};

use super::{parse_args, ToolError, ToolHandler, ToolOutput, ToolResult};

pub const COMPOSE_TOOL_NAME: &str = "compose_linkedin_post";
pub const PUBLISH_TOOL_NAME: &str = "publish_linkedin_post";

/// LinkedIn's commentary limit.
const MAX_POST_LEN: usize = 3000;
const MAX_HASHTAGS: usize = 10;
const PREVIEW_LEN: usize = 140;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum Visibility {
    #[default]
    Public,
    Connections,
}

#[derive(Debug, Deserialize)]
struct ComposeInput {
    text: String,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default)]
    hashtags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PublishInput {
    draft_id: String,
}

fn normalize_hashtag(tag: &str) -> Option<String> {
    let bare: String = tag
        .trim()
        .trim_start_matches('#')
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    (!bare.is_empty()).then(|| format!("#{bare}"))
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_LEN {
        return text.to_string();
    }
    let cut: String = text.chars().take(PREVIEW_LEN).collect();
    format!("{}…", cut.trim_end())
}

pub struct ComposePostTool;

#[async_trait]
impl ToolHandler for ComposePostTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: COMPOSE_TOOL_NAME.to_string(),
            title: Some("Compose LinkedIn post".to_string()),
            description: "Drafts a LinkedIn post and shows a preview for editing.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string", "maxLength": MAX_POST_LEN },
                    "visibility": { "type": "string", "enum": ["PUBLIC", "CONNECTIONS"] },
                    "hashtags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "maxItems": MAX_HASHTAGS
                    }
                },
                "required": ["text"],
                "additionalProperties": false
            }),
            annotations: Some(ToolAnnotations::generative()),
            meta: None,
        }
    }

    async fn call(&self, args: Value) -> ToolResult {
        let input: ComposeInput = parse_args(args)?;

        let text = input.text.trim();
        if text.is_empty() {
            return Err(ToolError::rejected_with_code("Post text is required", "TEXT_REQUIRED"));
        }

        let mut hashtags: Vec<String> = Vec::new();
        for tag in input.hashtags.iter().filter_map(|t| normalize_hashtag(t)) {
            if !hashtags.contains(&tag) {
                hashtags.push(tag);
            }
        }
        if hashtags.len() > MAX_HASHTAGS {
            return Err(ToolError::rejected_with_code(
                format!("At most {MAX_HASHTAGS} hashtags are allowed"),
                "TOO_MANY_HASHTAGS",
            ));
        }

        let commentary = if hashtags.is_empty() {
            text.to_string()
        } else {
            format!("{text}\n\n{}", hashtags.join(" "))
        };
        let length = commentary.chars().count();
        if length > MAX_POST_LEN {
            return Err(ToolError::rejected_with_code(
                format!("Post is {length} characters; LinkedIn allows {MAX_POST_LEN}"),
                "POST_TOO_LONG",
            ));
        }

        let draft_id = format!("li_{}", Uuid::new_v4().simple());
        Ok(ToolOutput::new(
            format!("LinkedIn draft ready: {}", preview(text)),
            json!({
                "draftId": draft_id,
                "commentary": commentary,
                "hashtags": hashtags,
                "visibility": input.visibility,
                "characterCount": length,
                "status": "draft",
            }),
        ))
    }
}

pub struct PublishPostTool;

#[async_trait]
impl ToolHandler for PublishPostTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: PUBLISH_TOOL_NAME.to_string(),
            title: Some("Publish LinkedIn post".to_string()),
            description: "Publishes a previously composed draft to LinkedIn.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "draft_id": { "type": "string" }
                },
                "required": ["draft_id"],
                "additionalProperties": false
            }),
            annotations: Some(ToolAnnotations {
                read_only_hint: Some(false),
                idempotent_hint: Some(false),
                destructive_hint: Some(false),
                open_world_hint: Some(true),
            }),
            meta: None,
        }
    }

    async fn call(&self, args: Value) -> ToolResult {
        let input: PublishInput = parse_args(args)?;
        Err(ToolError::rejected_with_code(
            format!(
                "Publishing draft {} is not available: LinkedIn sign-in is not configured on this server",
                input.draft_id
            ),
            "NOT_IMPLEMENTED",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashtags_are_cleaned() {
        assert_eq!(normalize_hashtag(" #rust-lang "), Some("#rustlang".into()));
        assert_eq!(normalize_hashtag("##"), None);
    }

    #[test]
    fn long_text_preview_is_truncated() {
        let text = "a".repeat(PREVIEW_LEN + 10);
        let p = preview(&text);
        assert_eq!(p.chars().count(), PREVIEW_LEN + 1);
        assert!(p.ends_with('…'));
    }

    #[tokio::test]
    async fn compose_appends_unique_hashtags() {
        let out = ComposePostTool
            .call(json!({ "text": "Shipped it.", "hashtags": ["rust", "#rust", "axum"] }))
            .await
            .unwrap();
        assert_eq!(out.structured["commentary"], "Shipped it.\n\n#rust #axum");
        assert_eq!(out.structured["visibility"], "PUBLIC");
        assert_eq!(out.summary, "LinkedIn draft ready: Shipped it.");
    }

    #[tokio::test]
    async fn compose_rejects_oversized_posts() {
        let err = ComposePostTool
            .call(json!({ "text": "x".repeat(MAX_POST_LEN + 1) }))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Rejected { code: Some(c), .. } if c == "POST_TOO_LONG"));
    }

    #[tokio::test]
    async fn publish_is_not_implemented() {
        let err = PublishPostTool
            .call(json!({ "draft_id": "li_1" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Rejected { code: Some(c), .. } if c == "NOT_IMPLEMENTED"));
    }
}
