// src/services/coach.rs

//! Text generation used to personalize study reports.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::Config;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Errors from a text generator. Callers treat all of them as "no text".
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("text generation is disabled")]
    Disabled,

    #[error("invalid coach endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("coach request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("coach returned HTTP {0}")]
    Status(u16),
}

/// Opaque prompt-in, text-out generator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, CoachError>;
}

/// Generator used when no endpoint is configured. Always fails.
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, CoachError> {
        Err(CoachError::Disabled)
    }
}

#[derive(Serialize)]
struct CoachRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct CoachResponse {
    text: String,
}

/// Posts `{"prompt": ...}` to a fixed endpoint and reads back `{"text": ...}`.
pub struct HttpGenerator {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpGenerator {
    pub fn new(endpoint: &str) -> Result<Self, CoachError> {
        let endpoint = Url::parse(endpoint)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    fn name(&self) -> &str {
        "http"
    }

    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn generate(&self, prompt: &str) -> Result<String, CoachError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&CoachRequest { prompt })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoachError::Status(status.as_u16()));
        }

        let body: CoachResponse = response.json().await?;
        Ok(body.text)
    }
}

/// Picks the generator for this process from `COACH_URL`.
pub fn from_config(config: &Config) -> Arc<dyn TextGenerator> {
    match config.coach_url.as_deref() {
        Some(url) => match HttpGenerator::new(url) {
            Ok(generator) => {
                tracing::info!("Study report coach: {}", url);
                Arc::new(generator)
            }
            Err(e) => {
                tracing::warn!("Coach disabled, {}", e);
                Arc::new(DisabledGenerator)
            }
        },
        None => Arc::new(DisabledGenerator),
    }
}
