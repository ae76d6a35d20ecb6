//! Ollama API types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Body of `POST /api/generate`.
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
}

/// Non-streaming generate response. Only `response` is required.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
    #[serde(default)]
    pub total_duration: Option<u64>,
    #[serde(default)]
    pub eval_count: Option<u64>,
}

/// Structured output the model is asked to produce.
#[derive(Debug, Deserialize)]
pub(crate) struct ModelOutput {
    pub summary: String,
    pub tags: Vec<String>,
}

/// JSON schema passed as `format`: an object with a required summary string
/// and a required array of tag strings.
pub fn summary_format() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": {
                "type": "string",
                "description": "A concise summary of the article"
            },
            "tags": {
                "type": "array",
                "items": {"type": "string"},
                "description": "Relevant tags for the article"
            }
        },
        "required": ["summary", "tags"]
    })
}
