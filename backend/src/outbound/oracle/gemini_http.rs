//! Reqwest-backed interaction oracle.
//!
//! This adapter owns transport details only: prompt construction, request
//! serialisation, HTTP error mapping, and decoding of the first candidate.
//! The API key travels as a query parameter and is never logged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::{GenerateContentRequestDto, GenerateContentResponseDto};
use crate::domain::ports::{InteractionOracle, InteractionOracleError};

/// Default base URL of the generative language API.
pub const DEFAULT_ORACLE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default model queried for interaction answers.
pub const DEFAULT_ORACLE_MODEL: &str = "gemini-1.5-flash";

/// Connection settings for [`GeminiHttpOracle`].
pub struct GeminiOracleConfig {
    /// Scheme and host of the API, optionally with a path prefix.
    pub base_url: Url,
    /// Model name inserted into the request path.
    pub model: String,
    /// API key sent as the `key` query parameter.
    pub api_key: Zeroizing<String>,
    /// Whole-request timeout; `None` keeps the client default.
    pub timeout: Option<Duration>,
}

/// Errors raised while constructing the oracle adapter.
#[derive(Debug, thiserror::Error)]
pub enum GeminiOracleBuildError {
    #[error("oracle base URL cannot carry a path: {0}")]
    InvalidBaseUrl(String),
    #[error("oracle model must not be empty")]
    EmptyModel,
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Oracle adapter that posts one prompt per drug pair.
pub struct GeminiHttpOracle {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
}

impl std::fmt::Debug for GeminiHttpOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiHttpOracle")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl GeminiHttpOracle {
    /// Build an adapter for `{base}/v1/models/{model}:generateContent`.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot be extended with a path,
    /// the model is blank, or the reqwest client cannot be constructed.
    pub fn new(config: GeminiOracleConfig) -> Result<Self, GeminiOracleBuildError> {
        let GeminiOracleConfig {
            base_url,
            model,
            api_key,
            timeout,
        } = config;
        let endpoint = build_endpoint(base_url, &model)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl InteractionOracle for GeminiHttpOracle {
    async fn query(
        &self,
        drug_1: &str,
        drug_2: &str,
    ) -> Result<Option<String>, InteractionOracleError> {
        let prompt = build_prompt(drug_1, drug_2);
        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&GenerateContentRequestDto::single_prompt(&prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_answer(body.as_ref())
    }
}

fn build_endpoint(mut base_url: Url, model: &str) -> Result<Url, GeminiOracleBuildError> {
    let model = model.trim();
    if model.is_empty() {
        return Err(GeminiOracleBuildError::EmptyModel);
    }
    let rendered = base_url.to_string();
    let method = format!("{model}:generateContent");
    base_url
        .path_segments_mut()
        .map_err(|()| GeminiOracleBuildError::InvalidBaseUrl(rendered))?
        .pop_if_empty()
        .extend(["v1", "models", method.as_str()]);
    base_url.set_query(None);
    Ok(base_url)
}

fn build_prompt(drug_1: &str, drug_2: &str) -> String {
    format!("What are the interactions between {drug_1} and {drug_2}?. Respond in 1 line")
}

fn parse_answer(body: &[u8]) -> Result<Option<String>, InteractionOracleError> {
    let decoded: GenerateContentResponseDto = serde_json::from_slice(body).map_err(|error| {
        InteractionOracleError::decode(format!("invalid generateContent payload: {error}"))
    })?;
    Ok(decoded.into_answer())
}

fn map_transport_error(error: reqwest::Error) -> InteractionOracleError {
    // The request URL carries the API key.
    let error = error.without_url();
    if error.is_timeout() {
        InteractionOracleError::timeout(error.to_string())
    } else if error.is_decode() {
        InteractionOracleError::decode(error.to_string())
    } else {
        InteractionOracleError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> InteractionOracleError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            InteractionOracleError::timeout(format!("status {}", status.as_u16()))
        }
        _ => InteractionOracleError::status(status.as_u16(), body_preview(body)),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        preview.push_str("...");
    }
    preview
}
