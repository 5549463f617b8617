//! `show_testimonials`: customer testimonials carousel.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::mcp::models::{ToolAnnotations, ToolDescriptor};

use super::{parse_args, ToolError, ToolHandler, ToolOutput, ToolResult};

pub const TOOL_NAME: &str = "show_testimonials";

const DEFAULT_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct Testimonial {
    pub author: &'static str,
    pub role: &'static str,
    pub quote: &'static str,
    pub rating: u8,
}

const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        author: "Priya N.",
        role: "Operations Lead",
        quote: "Setup took an afternoon and the team hasn't looked back.",
        rating: 5,
    },
    Testimonial {
        author: "Tomás R.",
        role: "Founder",
        quote: "Support answered every question within the hour.",
        rating: 5,
    },
    Testimonial {
        author: "Jen K.",
        role: "Product Manager",
        quote: "Reporting is clear enough to share straight with leadership.",
        rating: 4,
    },
    Testimonial {
        author: "Ade O.",
        role: "Engineer",
        quote: "The API is predictable, which is all I ask.",
        rating: 4,
    },
    Testimonial {
        author: "Lena M.",
        role: "Designer",
        quote: "Good product; the mobile view still needs polish.",
        rating: 3,
    },
];

#[derive(Debug, Deserialize)]
struct TestimonialsInput {
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    min_rating: Option<u8>,
}

pub struct TestimonialsTool;

#[async_trait]
impl ToolHandler for TestimonialsTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: TOOL_NAME.to_string(),
            title: Some("Show testimonials".to_string()),
            description: "Shows customer testimonials in a carousel.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "limit": { "type": "integer", "minimum": 1, "default": DEFAULT_LIMIT },
                    "min_rating": { "type": "integer", "minimum": 1, "maximum": 5 }
                },
                "additionalProperties": false
            }),
            annotations: Some(ToolAnnotations::read_only()),
            meta: None,
        }
    }

    async fn call(&self, args: Value) -> ToolResult {
        let input: TestimonialsInput = parse_args(args)?;

        let min_rating = input.min_rating.unwrap_or(1);
        if !(1..=5).contains(&min_rating) {
            return Err(ToolError::rejected_with_code(
                "min_rating must be between 1 and 5",
                "INVALID_RATING",
            ));
        }

        let limit = input.limit.unwrap_or(DEFAULT_LIMIT).max(1);
        let selected: Vec<&Testimonial> = TESTIMONIALS
            .iter()
            .filter(|t| t.rating >= min_rating)
            .take(limit)
            .collect();

        Ok(ToolOutput::new(
            format!("Showing {} testimonials", selected.len()),
            json!({ "testimonials": selected }),
        ))
    }
}
