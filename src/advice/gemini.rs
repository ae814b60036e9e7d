use std::{env, time::Duration};

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

use super::{AdviceError, AdviceProvider};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key_env: String,
}

impl GeminiConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.advice_endpoint.trim_end_matches('/').to_string(),
            model: config.advice_model.clone(),
            api_key_env: config.advice_api_key_env.clone(),
        }
    }

    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Gemini `generateContent` over blocking HTTP.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, AdviceError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AdviceError::Network(err.to_string()))?;
        Ok(Self { config, client })
    }

    fn api_key(&self) -> Result<String, AdviceError> {
        env::var(&self.config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AdviceError::MissingCredential(self.config.api_key_env.clone()))
    }
}

impl AdviceProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn generate(&self, prompt: &str) -> Result<String, AdviceError> {
        let key = self.api_key()?;
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };
        debug!(model = %self.config.model, "requesting advice");
        let response = self
            .client
            .post(self.config.url())
            .query(&[("key", key.as_str())])
            .json(&body)
            .send()
            .map_err(|err| AdviceError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdviceError::RequestFailed(format!("HTTP {status}")));
        }
        let text = response
            .text()
            .map_err(|err| AdviceError::Network(err.to_string()))?;
        extract_text(&text)
    }
}

/// Concatenates the text parts of the first candidate; empty when there are none.
fn extract_text(body: &str) -> Result<String, AdviceError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|err| AdviceError::InvalidResponse(err.to_string()))?;
    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    Ok(text)
}
