use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{Advisor, Analysis, Enrichment, prompts};
use crate::config::AiConfig;
use crate::model::Task;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("GEMINI_API_KEY is not set; skipping AI analysis")]
    MissingCredential,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed reply: {0}")]
    Malformed(String),
}

/// Blocking client for the Gemini `generateContent` endpoint.
pub struct GeminiAdvisor {
    config: AiConfig,
}

impl GeminiAdvisor {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Send one prompt and return the model's text reply.
    fn generate(&self, prompt: &str) -> Result<String, AdvisorError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AdvisorError::MissingCredential)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()?;

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        debug!(model = %self.config.model, "sending enrichment request");
        let response = client
            .post(self.url())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status(status));
        }

        let payload: Value = response.json()?;
        candidate_text(&payload)
            .map(str::to_string)
            .ok_or_else(|| AdvisorError::Malformed("no candidate text".into()))
    }

    /// Send a prompt and decode the JSON object in the reply.
    fn generate_json<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, AdvisorError> {
        let text = self.generate(prompt)?;
        parse_reply(&text)
    }

    fn generate_field(&self, prompt: &str, key: &str) -> Result<String, AdvisorError> {
        let reply: Value = self.generate_json(prompt)?;
        reply
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AdvisorError::Malformed(format!("missing \"{key}\"")))
    }
}

/// Log the failure and degrade to `Unavailable`.
fn settle<T>(what: &str, result: Result<T, AdvisorError>) -> Enrichment<T> {
    match result {
        Ok(v) => Enrichment::Available(v),
        Err(AdvisorError::MissingCredential) => {
            warn!("{}", AdvisorError::MissingCredential);
            Enrichment::Unavailable
        }
        Err(err) => {
            info!("{what} unavailable: {err}");
            Enrichment::Unavailable
        }
    }
}

impl Advisor for GeminiAdvisor {
    fn analyze(
        &self,
        description: &str,
        project: Option<&str>,
        tag: Option<&str>,
    ) -> Enrichment<Analysis> {
        let prompt = prompts::analysis(description, project, tag);
        settle("task analysis", self.generate_json(&prompt))
    }

    fn encourage(&self, task: &Task) -> Enrichment<String> {
        let prompt = prompts::encouragement(task);
        settle("encouragement", self.generate_field(&prompt, "encouragement"))
    }

    fn summarize(&self, tasks: &[Task]) -> Enrichment<String> {
        let prompt = prompts::summary(tasks);
        settle("list summary", self.generate_field(&prompt, "summary"))
    }
}

/// `candidates[0].content.parts[0].text`
fn candidate_text(payload: &Value) -> Option<&str> {
    payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
}

/// Drop a surrounding markdown code fence, with or without a language tag.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn parse_reply<T: DeserializeOwned>(text: &str) -> Result<T, AdvisorError> {
    serde_json::from_str(strip_code_fence(text)).map_err(|e| AdvisorError::Malformed(e.to_string()))
}
