//! `find_places`: searches a fixed table of places in Playa del Carmen.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::mcp::models::{ToolAnnotations, ToolDescriptor};

use super::{parse_args, ToolError, ToolHandler, ToolOutput, ToolResult};

pub const TOOL_NAME: &str = "find_places";

const CITY: &str = "Playa del Carmen";
const DEFAULT_LIMIT: usize = 5;
const MAX_LIMIT: usize = 20;
const CATEGORIES: &[&str] = &["restaurant", "beach", "cafe", "attraction", "bar"];

#[derive(Debug, Clone, Serialize)]
pub struct Place {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub rating: f64,
    pub lat: f64,
    pub lng: f64,
}

const PLACES: &[Place] = &[
    Place {
        id: "pdc_01",
        name: "Playa Mamitas",
        category: "beach",
        description: "Lively beach club stretch with loungers and music.",
        rating: 4.6,
        lat: 20.6321,
        lng: -87.0659,
    },
    Place {
        id: "pdc_02",
        name: "Punta Esmeralda",
        category: "beach",
        description: "Quiet beach with a cenote flowing into the sea.",
        rating: 4.7,
        lat: 20.6428,
        lng: -87.0595,
    },
    Place {
        id: "pdc_03",
        name: "Quinta Avenida",
        category: "attraction",
        description: "Pedestrian avenue lined with shops and restaurants.",
        rating: 4.4,
        lat: 20.6275,
        lng: -87.0732,
    },
    Place {
        id: "pdc_04",
        name: "Parque Fundadores",
        category: "attraction",
        description: "Seafront plaza with the Portal Maya sculpture.",
        rating: 4.5,
        lat: 20.6223,
        lng: -87.0739,
    },
    Place {
        id: "pdc_05",
        name: "El Fogón",
        category: "restaurant",
        description: "Local favourite for tacos al pastor.",
        rating: 4.8,
        lat: 20.6306,
        lng: -87.0770,
    },
    Place {
        id: "pdc_06",
        name: "Axiote Cocina de México",
        category: "restaurant",
        description: "Modern Mexican cooking with regional ingredients.",
        rating: 4.7,
        lat: 20.6290,
        lng: -87.0714,
    },
    Place {
        id: "pdc_07",
        name: "Café Andrade",
        category: "cafe",
        description: "Specialty coffee from Chiapas and Veracruz.",
        rating: 4.6,
        lat: 20.6301,
        lng: -87.0702,
    },
    Place {
        id: "pdc_08",
        name: "Chez Céline",
        category: "cafe",
        description: "French bakery known for breakfast and pastries.",
        rating: 4.5,
        lat: 20.6339,
        lng: -87.0678,
    },
    Place {
        id: "pdc_09",
        name: "La Bodeguita del Medio",
        category: "bar",
        description: "Cuban bar with live music and mojitos.",
        rating: 4.3,
        lat: 20.6284,
        lng: -87.0726,
    },
    Place {
        id: "pdc_10",
        name: "Cenote Jardín del Edén",
        category: "attraction",
        description: "Open cenote for snorkelling, a short drive south.",
        rating: 4.6,
        lat: 20.5415,
        lng: -87.1977,
    },
];

#[derive(Debug, Deserialize)]
struct FindPlacesInput {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

/// Filters and ranks the table: matching category, case-insensitive query in
/// name or description, highest rating first.
fn search(category: Option<&str>, query: Option<&str>, limit: usize) -> Vec<&'static Place> {
    let query = query.map(str::to_lowercase);
    let mut hits: Vec<&Place> = PLACES
        .iter()
        .filter(|p| category.map_or(true, |c| p.category == c))
        .filter(|p| {
            query.as_deref().map_or(true, |q| {
                p.name.to_lowercase().contains(q) || p.description.to_lowercase().contains(q)
            })
        })
        .collect();
    hits.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    hits.truncate(limit);
    hits
}

pub struct FindPlacesTool;

#[async_trait]
impl ToolHandler for FindPlacesTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: TOOL_NAME.to_string(),
            title: Some("Find places".to_string()),
            description: format!("Finds places to visit in {CITY} and shows them on a map."),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": { "type": "string", "enum": CATEGORIES },
                    "query": { "type": "string" },
                    "limit": { "type": "integer", "minimum": 1, "maximum": MAX_LIMIT, "default": DEFAULT_LIMIT }
                },
                "additionalProperties": false
            }),
            annotations: Some(ToolAnnotations::read_only()),
            meta: None,
        }
    }

    async fn call(&self, args: Value) -> ToolResult {
        let input: FindPlacesInput = parse_args(args)?;

        let category = input.category.as_deref().map(str::to_ascii_lowercase);
        if let Some(c) = category.as_deref() {
            if !CATEGORIES.contains(&c) {
                return Err(ToolError::rejected_with_code(
                    format!("Unknown category: {c}"),
                    "UNKNOWN_CATEGORY",
                ));
            }
        }

        let query = input.query.as_deref().map(str::trim).filter(|q| !q.is_empty());
        let limit = input.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let places = search(category.as_deref(), query, limit);

        Ok(ToolOutput::new(
            format!("Found {} places in {CITY}", places.len()),
            json!({
                "city": CITY,
                "category": category,
                "places": places,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_filters_and_ranks() {
        let beaches = search(Some("beach"), None, 10);
        let names: Vec<_> = beaches.iter().map(|p| p.name).collect();
        assert_eq!(names, ["Punta Esmeralda", "Playa Mamitas"]);

        let tacos = search(None, Some("TACOS"), 10);
        assert_eq!(tacos.len(), 1);
        assert_eq!(tacos[0].id, "pdc_05");
    }

    #[tokio::test]
    async fn limit_is_clamped() {
        let out = FindPlacesTool.call(json!({ "limit": 0 })).await.unwrap();
        assert_eq!(out.structured["places"].as_array().unwrap().len(), 1);
        assert_eq!(out.summary, "Found 1 places in Playa del Carmen");
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let err = FindPlacesTool
            .call(json!({ "category": "casino" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Rejected { code: Some(c), .. } if c == "UNKNOWN_CATEGORY"));
    }
}
