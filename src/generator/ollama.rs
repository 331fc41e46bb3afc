// Ollama-backed note generator

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{GenerationError, NoteGenerator};
use crate::models::{GeneratorConfig, Tone};

const SYSTEM_PROMPT: &str = "You are a study assistant. Write concise, well-structured study notes \
in Markdown using headings, bullet points, **bold** key terms and short examples.";

#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    base_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

/// Build the user prompt for a topic in the given teaching style.
pub fn build_prompt(topic: &str, tone: Tone) -> String {
    let style = match tone {
        Tone::Simple => "Explain it simply, as if to a beginner, avoiding jargon.",
        Tone::Detailed => {
            "Be detailed and technical, covering internals, terminology and edge cases."
        }
        Tone::Analogy => "Explain each idea through everyday analogies.",
    };
    format!("Create study notes on the topic \"{}\". {style}", topic.trim())
}

impl OllamaGenerator {
    pub fn new(base_url: String, model: String, request_timeout: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(request_timeout))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            client,
        })
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        Self::new(
            config.ollama_url.clone(),
            config.model.clone(),
            config.request_timeout,
        )
    }

    async fn send(&self, request: &GenerateRequest) -> Result<GenerateResponse, GenerationError> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::Backend(format!("Failed to reach notes service: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Backend(format!(
                "Notes service returned {status}: {text}"
            )));
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| GenerationError::Backend(format!("Failed to parse notes response: {e}")))
    }
}

#[async_trait]
impl NoteGenerator for OllamaGenerator {
    async fn generate(&self, topic: &str, tone: Tone) -> Result<String, GenerationError> {
        if topic.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "Topic must not be empty".to_string(),
            ));
        }

        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: build_prompt(topic, tone),
            system: Some(SYSTEM_PROMPT.to_string()),
            stream: false,
        };

        tracing::debug!(model = %self.model, %tone, "requesting notes from ollama");

        let response = self.send(&request).await.inspect_err(|e| {
            tracing::warn!(error = %e, "ollama generation failed");
        })?;
        tracing::debug!(done = response.done, chars = response.response.len(), "ollama replied");

        if response.response.trim().is_empty() {
            return Err(GenerationError::Backend(
                "Notes service returned an empty response".to_string(),
            ));
        }

        Ok(response.response)
    }
}
