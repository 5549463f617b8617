//! `generate_image`: stand-in for an image generation API.
//!
//! Returns a deterministic placeholder URL derived from the prompt instead of
//! calling a model.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::mcp::models::{ToolAnnotations, ToolDescriptor};

use super::{parse_args, ToolError, ToolHandler, ToolOutput, ToolResult};

pub const TOOL_NAME: &str = "generate_image";

const MIN_PROMPT_LEN: usize = 10;
const MAX_PROMPT_LEN: usize = 1000;
const SIZES: &[&str] = &["256x256", "512x512", "1024x1024"];
const DEFAULT_SIZE: &str = "1024x1024";
const PLACEHOLDER_HOST: &str = "https://placehold.co";

#[derive(Debug, Deserialize)]
struct ImageInput {
    prompt: String,
    #[serde(default)]
    size: Option<String>,
}

/// FNV-1a; only used to give each prompt a stable seed.
fn prompt_seed(prompt: &str) -> u64 {
    prompt.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

pub struct GenerateImageTool;

#[async_trait]
impl ToolHandler for GenerateImageTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: TOOL_NAME.to_string(),
            title: Some("Generate image".to_string()),
            description: "Generates an image from a text prompt.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "prompt": {
                        "type": "string",
                        "minLength": MIN_PROMPT_LEN,
                        "maxLength": MAX_PROMPT_LEN
                    },
                    "size": { "type": "string", "enum": SIZES, "default": DEFAULT_SIZE }
                },
                "required": ["prompt"],
                "additionalProperties": false
            }),
            annotations: Some(ToolAnnotations {
                open_world_hint: Some(true),
                ..ToolAnnotations::generative()
            }),
            meta: None,
        }
    }

    async fn call(&self, args: Value) -> ToolResult {
        let input: ImageInput = parse_args(args)?;

        let prompt = input.prompt.trim();
        let length = prompt.chars().count();
        if length < MIN_PROMPT_LEN {
            return Err(ToolError::rejected_with_code(
                format!("Image prompt too short: use at least {MIN_PROMPT_LEN} characters"),
                "PROMPT_TOO_SHORT",
            ));
        }
        if length > MAX_PROMPT_LEN {
            return Err(ToolError::rejected_with_code(
                format!("Image prompt too long: use at most {MAX_PROMPT_LEN} characters"),
                "PROMPT_TOO_LONG",
            ));
        }

        let size = input.size.as_deref().unwrap_or(DEFAULT_SIZE);
        if !SIZES.contains(&size) {
            return Err(ToolError::rejected_with_code(
                format!("Unsupported size {size}; choose one of {}", SIZES.join(", ")),
                "UNSUPPORTED_SIZE",
            ));
        }

        let seed = prompt_seed(prompt);
        let image_url = format!("{PLACEHOLDER_HOST}/{size}/png?text={seed:016x}");

        Ok(ToolOutput::new(
            format!("Generated image for \"{prompt}\""),
            json!({
                "prompt": prompt,
                "size": size,
                "imageUrl": image_url,
                "seed": format!("{seed:016x}"),
            }),
        ))
    }
}
