//! Client for a spaCy-compatible HTTP annotation service.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{Map, Value};
use url::Url;

use super::{Backend, BackendOptions};
use crate::annotation::{Doc, RawDoc};
use crate::error::{Result, SceneGraphError};

pub const IDENTIFIER: &str = "spacy";
pub const DEFAULT_URL: &str = "http://localhost:8080";
pub const DEFAULT_MODEL: &str = "en_core_web_sm";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Options consumed by the client itself and never sent to the service.
const CLIENT_OPTIONS: [&str; 2] = ["url", "timeout_secs"];

/// HTTP annotation backend
///
/// Posts each sentence to `{url}/annotate` and reads back tokens and noun
/// chunks. The client is blocking: call it from plain threads, never from
/// inside an async runtime (reqwest panics when a blocking client is driven
/// on a runtime thread).
pub struct SpacyBackend {
    client: Client,
    endpoint: Url,
    model: String,
    options: BackendOptions,
}

impl SpacyBackend {
    /// Create a new client from backend options
    ///
    /// # Errors
    ///
    /// Returns `SceneGraphError::Config` if `url` is not an http(s) URL or
    /// `timeout_secs` is not a positive integer.
    pub fn new(options: &BackendOptions) -> Result<Self> {
        let endpoint = annotate_endpoint(options.get("url").unwrap_or(DEFAULT_URL))?;

        let timeout_secs = match options.get("timeout_secs") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|&secs| secs > 0)
                .ok_or_else(|| {
                    SceneGraphError::Config(format!("invalid timeout_secs: {:?}", raw))
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SceneGraphError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            model: options.get("model").unwrap_or(DEFAULT_MODEL).to_string(),
            options: options.clone(),
        })
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Model requested when no per-call override is given
    pub fn model(&self) -> &str {
        &self.model
    }

    /// JSON body for one request: text and model, then forwarded options,
    /// with per-call options taking precedence.
    fn request_body(&self, sentence: &str, options: &BackendOptions) -> Value {
        let mut body = Map::new();
        body.insert("text".to_string(), Value::String(sentence.to_string()));
        body.insert("model".to_string(), Value::String(self.model.clone()));

        for (key, value) in self.options.merged(options).iter() {
            if !CLIENT_OPTIONS.contains(&key) {
                body.insert(key.to_string(), Value::String(value.to_string()));
            }
        }

        Value::Object(body)
    }
}

impl Backend for SpacyBackend {
    fn identifier(&self) -> &str {
        IDENTIFIER
    }

    fn annotate(&self, sentence: &str, options: &BackendOptions) -> Result<Doc> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&self.request_body(sentence, options))
            .send()
            .map_err(|e| SceneGraphError::Annotation(format!("Network error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SceneGraphError::Annotation(format!(
                "Annotation service returned {}: {}",
                status, body
            )));
        }

        let raw: RawDoc = response
            .json()
            .map_err(|e| SceneGraphError::Annotation(format!("Failed to parse response: {}", e)))?;

        Doc::try_from(raw)
    }
}

fn annotate_endpoint(raw: &str) -> Result<Url> {
    let mut base = Url::parse(raw)
        .map_err(|e| SceneGraphError::Config(format!("invalid url {:?}: {}", raw, e)))?;

    if !matches!(base.scheme(), "http" | "https") {
        return Err(SceneGraphError::Config(format!(
            "unsupported url scheme {:?} in {:?}",
            base.scheme(),
            raw
        )));
    }

    // `join` replaces the last segment unless the path ends with a slash.
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join("annotate")
        .map_err(|e| SceneGraphError::Config(format!("invalid url {:?}: {}", raw, e)))
}
