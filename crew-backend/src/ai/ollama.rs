use crate::ai::TextGenerator;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default Ollama model
pub const DEFAULT_MODEL: &str = "llama2";

/// Client for Ollama's `/api/generate` endpoint.
///
/// The endpoint and model are supplied per call, so one client serves every
/// role even when roles point at different servers.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
}

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

impl OllamaClient {
    /// Build a client. `timeout` of `None` means requests never time out.
    pub fn new(timeout: Option<Duration>) -> Result<Self, String> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client })
    }

    fn generate_url(endpoint: &str) -> String {
        format!("{}/api/generate", endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str, model: &str, endpoint: &str) -> Result<String, String> {
        let url = Self::generate_url(endpoint);
        let request = OllamaGenerateRequest {
            model,
            prompt,
            stream: false,
        };

        log::info!(
            "[OLLAMA] Sending request to {} with model {} ({} prompt chars)",
            url,
            model,
            prompt.len()
        );
        log::debug!("[OLLAMA] Prompt:\n{}", prompt);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    format!("Failed to connect to Ollama at {}. Is Ollama running?", endpoint)
                } else if e.is_timeout() {
                    format!("Ollama request to {} timed out", endpoint)
                } else {
                    format!("Ollama API request failed: {}", e)
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read Ollama response: {}", e))?;

        if !status.is_success() {
            if let Ok(error_response) = serde_json::from_str::<OllamaErrorResponse>(&body) {
                return Err(format!("Ollama API error: {}", error_response.error));
            }
            return Err(format!(
                "Ollama API returned error status: {}, body: {}",
                status, body
            ));
        }

        log::debug!("[OLLAMA] Raw response:\n{}", body);

        let parsed: OllamaGenerateResponse = serde_json::from_str(&body)
            .map_err(|e| format!("Failed to parse Ollama response: {} - body: {}", e, body))?;

        log::info!(
            "[OLLAMA] Response - content_len: {}, done: {}",
            parsed.response.len(),
            parsed.done
        );

        Ok(parsed.response)
    }
}
