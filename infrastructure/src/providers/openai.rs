//! OpenAI chat completions gateway

use async_trait::async_trait;
use council_application::ports::llm_gateway::{GatewayError, LlmGateway};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// LLM Gateway backed by the OpenAI HTTP API
pub struct OpenAiGateway {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAiGateway {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: "https://api.openai.com".to_string(),
            model: model.into(),
            temperature: 0.7,
            max_tokens: 4096,
            timeout,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn api_key(&self) -> Result<&str, GatewayError> {
        self.api_key.as_deref().ok_or_else(|| {
            GatewayError::ProviderUnavailable("OpenAI API key is not configured".to_string())
        })
    }

    fn request_body(&self, prompt: &str, system_prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": prompt}
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout(self.timeout.as_secs())
        } else {
            GatewayError::ConnectionError(e.to_string())
        }
    }
}

/// First choice's message text, if any
fn extract_content(response: &Value) -> Option<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    fn name(&self) -> &str {
        "openai"
    }

    async fn ask(&self, prompt: &str, system_prompt: &str) -> Result<String, GatewayError> {
        let api_key = self.api_key()?;
        debug!("POST chat/completions model={}", self.model);

        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .bearer_auth(api_key)
            .json(&self.request_body(prompt, system_prompt))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "OpenAI API error ({}): {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("invalid JSON body: {}", e)))?;

        extract_content(&body).ok_or(GatewayError::EmptyResponse)
    }

    async fn check(&self) -> Result<(), GatewayError> {
        let api_key = self.api_key()?;
        let response = self
            .client
            .get(self.endpoint("models"))
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(GatewayError::ProviderUnavailable(format!(
                "OpenAI API returned {}",
                response.status()
            )))
        }
    }
}
