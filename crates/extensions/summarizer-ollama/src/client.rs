//! Ollama summarizer client.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use summarizer_config::OllamaConfig;
use summarizer_protocols::{SummaryError, SummaryResult, Summarizer};

use crate::api::{summary_format, GenerateRequest, GenerateResponse, ModelOutput};
use crate::prompt::compose_prompt;

/// Summarizer backed by Ollama's `/api/generate` endpoint.
pub struct OllamaClient {
    api_url: String,
    model: String,
    options: Map<String, Value>,
    timeout_secs: u64,
    prompt_length_limit: usize,
    prompt_template: String,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig) -> Result<Self, SummaryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SummaryError::Connection(e.to_string()))?;

        let mut options = config.options.clone();
        options
            .entry("num_ctx")
            .or_insert_with(|| Value::from(config.context_length));

        Ok(Self {
            api_url: format!("{}/api/generate", config.url.trim_end_matches('/')),
            model: config.model.clone(),
            options,
            timeout_secs: config.timeout_secs,
            prompt_length_limit: config.prompt_length_limit,
            prompt_template: config.prompt_template.clone(),
            client,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build_request(&self, content: &str) -> GenerateRequest {
        let prompt = compose_prompt(&self.prompt_template, content, self.prompt_length_limit);
        GenerateRequest {
            model: self.model.clone(),
            prompt,
            stream: false,
            options: (!self.options.is_empty()).then(|| self.options.clone()),
            format: Some(summary_format()),
        }
    }

    async fn send_request(&self, request: &GenerateRequest) -> Result<GenerateResponse, SummaryError> {
        let response = self
            .client
            .post(&self.api_url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(SummaryError::Api { status, message: text });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_str(&body)
            .map_err(|e| SummaryError::Format(format!("missing response field: {}", e)))
    }

    fn transport_error(&self, e: reqwest::Error) -> SummaryError {
        if e.is_timeout() {
            SummaryError::Timeout(self.timeout_secs)
        } else {
            SummaryError::Connection(e.to_string())
        }
    }
}

/// Decode the model's JSON text into a trimmed summary and tag list.
pub(crate) fn parse_model_output(raw: &str) -> Result<SummaryResult, SummaryError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| SummaryError::Content(format!("Invalid JSON response: {}", e)))?;

    if value.get("summary").is_none() || value.get("tags").is_none() {
        return Err(SummaryError::Content(
            "Missing required fields in response".to_string(),
        ));
    }

    let output: ModelOutput = serde_json::from_value(value)
        .map_err(|e| SummaryError::Content(format!("Invalid field types in response: {}", e)))?;

    Ok(SummaryResult {
        summary: output.summary.trim().to_string(),
        tags: output.tags.iter().map(|t| t.trim().to_string()).collect(),
    })
}

#[async_trait]
impl Summarizer for OllamaClient {
    async fn generate_summary(&self, content: &str) -> Result<SummaryResult, SummaryError> {
        if content.trim().is_empty() {
            return Err(SummaryError::EmptyContent);
        }

        let request = self.build_request(content);
        debug!(
            "Sending request to Ollama at {} with model {} ({} prompt characters)",
            self.api_url,
            self.model,
            request.prompt.chars().count()
        );

        let response = self.send_request(&request).await.inspect_err(|e| {
            error!("Ollama request failed: {}", e);
        })?;
        if let Some(duration) = response.total_duration {
            debug!("Ollama generation took {}ms", duration / 1_000_000);
        }

        let result = parse_model_output(&response.response).inspect_err(|e| {
            error!("Could not decode model output: {}", e);
        })?;
        info!("Generated summary with {} tags", result.tags.len());
        Ok(result)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
