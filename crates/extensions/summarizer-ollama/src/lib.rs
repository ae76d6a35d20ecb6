//! # Summarizer Ollama
//!
//! [`Summarizer`](summarizer_protocols::Summarizer) backed by a local or
//! remote Ollama server. The model is asked for a JSON object with a summary
//! and a tag list through Ollama's structured output `format` schema.

mod api;
mod client;
mod prompt;

pub use api::{summary_format, GenerateRequest, GenerateResponse};
pub use client::OllamaClient;
pub use prompt::{compose_prompt, TRUNCATION_MARKER};
