//! `generate_greeting`: personalised greeting card.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::mcp::models::{ToolAnnotations, ToolDescriptor};

use super::{parse_args, ToolError, ToolHandler, ToolOutput, ToolResult};

pub const TOOL_NAME: &str = "generate_greeting";

const MAX_NAME_LEN: usize = 80;

#[derive(Debug, Deserialize)]
struct GreetingInput {
    name: String,
    #[serde(default)]
    language: Option<String>,
}

/// Supported greeting languages
#[derive(Debug, Clone, Copy, PartialEq)]
enum Language {
    English,
    Spanish,
    French,
    German,
}

impl Language {
    fn from_code(code: Option<&str>) -> Result<Self, ToolError> {
        match code.map(str::to_ascii_lowercase).as_deref() {
            None | Some("en") | Some("english") => Ok(Language::English),
            Some("es") | Some("spanish") => Ok(Language::Spanish),
            Some("fr") | Some("french") => Ok(Language::French),
            Some("de") | Some("german") => Ok(Language::German),
            Some(other) => Err(ToolError::rejected_with_code(
                format!("Unsupported language: {other}"),
                "UNSUPPORTED_LANGUAGE",
            )),
        }
    }

    fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
        }
    }

    fn greet(self, name: &str) -> String {
        match self {
            Language::English => format!("Hello, {name}! Welcome aboard."),
            Language::Spanish => format!("¡Hola, {name}! Bienvenido."),
            Language::French => format!("Bonjour, {name} ! Bienvenue."),
            Language::German => format!("Hallo, {name}! Willkommen."),
        }
    }
}

pub struct GreetingTool;

#[async_trait]
impl ToolHandler for GreetingTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: TOOL_NAME.to_string(),
            title: Some("Generate greeting".to_string()),
            description: "Generates a personalised greeting card for the given name.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Who to greet" },
                    "language": {
                        "type": "string",
                        "enum": ["en", "es", "fr", "de"],
                        "default": "en"
                    }
                },
                "required": ["name"],
                "additionalProperties": false
            }),
            annotations: Some(ToolAnnotations::read_only()),
            meta: None,
        }
    }

    async fn call(&self, args: Value) -> ToolResult {
        let input: GreetingInput = parse_args(args)?;

        let name = input.name.trim();
        if name.is_empty() {
            return Err(ToolError::rejected_with_code("Name is required", "NAME_REQUIRED"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(ToolError::rejected_with_code(
                format!("Name must be at most {MAX_NAME_LEN} characters"),
                "NAME_TOO_LONG",
            ));
        }

        let language = Language::from_code(input.language.as_deref())?;
        let greeting = language.greet(name);

        Ok(ToolOutput::new(
            greeting.clone(),
            json!({
                "greeting": greeting,
                "name": name,
                "language": language.code(),
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn greets_in_the_requested_language() {
        let out = GreetingTool
            .call(json!({ "name": "  Ada ", "language": "FR" }))
            .await
            .unwrap();
        assert_eq!(out.summary, "Bonjour, Ada ! Bienvenue.");
        assert_eq!(out.structured["name"], "Ada");
        assert_eq!(out.structured["language"], "fr");
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let err = GreetingTool.call(json!({ "name": "   " })).await.unwrap_err();
        assert_eq!(
            err,
            ToolError::rejected_with_code("Name is required", "NAME_REQUIRED")
        );
    }

    #[tokio::test]
    async fn unknown_language_is_rejected() {
        let err = GreetingTool
            .call(json!({ "name": "Ada", "language": "tlh" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Rejected { code: Some(c), .. } if c == "UNSUPPORTED_LANGUAGE"));
    }
}
