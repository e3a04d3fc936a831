use reqwest::Client as HttpClient;
use serde::{ Deserialize, Serialize };
use serde_json::Value as JsonValue;
use std::time::Duration;
use log::debug;
use super::GenerationOptions;
use crate::error::AgentError;

const SERVICE: &str = "Ollama";

#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: HttpClient,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerationOptions,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Option<Vec<JsonValue>>,
}

impl OllamaClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Non-streaming completion. `timeout` of `None` waits indefinitely.
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: GenerationOptions,
        timeout: Option<Duration>
    ) -> Result<String, AgentError> {
        let url = format!("{}/api/generate", self.base_url);
        let req = GenerateRequest {
            model,
            prompt,
            stream: false,
            options,
        };
        debug!("POST {} model={} prompt_len={}", url, model, prompt.len());

        let mut builder = self.http.post(&url).json(&req);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let resp = builder.send().await?;
        if !resp.status().is_success() {
            return Err(AgentError::UpstreamStatus { service: SERVICE, status: resp.status() });
        }
        let body: JsonValue = resp.json().await?;
        let data: GenerateResponse = serde_json::from_value(body).map_err(|e| {
            AgentError::MalformedResponse { service: SERVICE, message: e.to_string() }
        })?;
        Ok(data.response)
    }

    /// Lists locally available models. A reply without a `models` array yields an empty list.
    pub async fn list_models(&self, timeout: Duration) -> Result<Vec<JsonValue>, AgentError> {
        let url = format!("{}/api/tags", self.base_url);
        let resp = self.http.get(&url).timeout(timeout).send().await?;
        if !resp.status().is_success() {
            return Err(AgentError::UpstreamStatus { service: SERVICE, status: resp.status() });
        }
        let tags: TagsResponse = resp.json().await?;
        Ok(tags.models.unwrap_or_default())
    }
}
