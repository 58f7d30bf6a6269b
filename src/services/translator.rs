use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::model::language::{self, SOURCE_LANG};

pub const MAX_INPUT_CHARS: usize = 1000;
pub const FALLBACK_MESSAGE: &str = "Translation failed. Please try again.";

/// Anything that can turn English text into the target language.
pub trait Translate: Send + Sync {
    fn translate(&self, text: &str, target_code: &str) -> CoreResult<String>;
}

/// Checks applied before any request leaves the process.
pub fn validate_request(text: &str, target_code: &str) -> CoreResult<()> {
    if text.is_empty() {
        return Err(CoreError::InvalidParameter("text is empty".into()));
    }

    let chars = text.chars().count();
    if chars > MAX_INPUT_CHARS {
        return Err(CoreError::InvalidParameter(format!(
            "text has {chars} characters, limit is {MAX_INPUT_CHARS}"
        )));
    }

    if language::find(target_code).is_none() {
        return Err(CoreError::UnknownLanguage(target_code.to_string()));
    }

    Ok(())
}

pub struct RapidApiTranslator {
    client: Client,
    endpoint: String,
    api_key: String,
    api_host: String,
}

impl RapidApiTranslator {
    pub fn new(cfg: &CoreConfig) -> CoreResult<Self> {
        let client = Client::builder().timeout(cfg.timeout).build()?;

        Ok(RapidApiTranslator {
            client,
            endpoint: cfg.endpoint.clone(),
            api_key: cfg.api_key.clone(),
            api_host: cfg.api_host.clone(),
        })
    }
}

impl Translate for RapidApiTranslator {
    fn translate(&self, text: &str, target_code: &str) -> CoreResult<String> {
        validate_request(text, target_code)?;

        if self.api_key.is_empty() {
            return Err(CoreError::Config("translation API key is not set".into()));
        }

        let resp = self
            .client
            .post(&self.endpoint)
            .query(&[("from", SOURCE_LANG), ("to", target_code), ("query", text)])
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .json(&json!({ "translate": "rapidapi" }))
            .send()?;

        let status = resp.status();
        // read as text first so an HTTP error body is not lost when it isn't JSON
        let body = resp.text()?;

        if !status.is_success() {
            return Err(CoreError::Http {
                status: status.as_u16(),
                message: extract_error_message(status, &body),
            });
        }

        parse_translation(&body)
    }
}

/// Pulls the `translation` field out of a response body.
pub fn parse_translation(body: &str) -> CoreResult<String> {
    let v: Value = serde_json::from_str(body)?;

    match v.get("translation").and_then(|t| t.as_str()) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        Some(_) => Err(CoreError::InvalidResponse("empty translation".into())),
        None => Err(CoreError::InvalidResponse("missing translation field".into())),
    }
}

fn extract_error_message(status: StatusCode, body_text: &str) -> String {
    // common shapes: { "error": { "message": "..." } } or { "message": "..." }
    if let Ok(v) = serde_json::from_str::<Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }

    let trimmed = body_text.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
    }

    clip(trimmed, 400)
}

fn clip(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
