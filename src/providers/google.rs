use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::TranslationProvider;

/// Path of the single-shot translation endpoint
const TRANSLATE_PATH: &str = "translate_a/single";

/// Client identifier the public endpoint expects
const CLIENT_ID: &str = "gtx";

/// Client for the public Google Translate web endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// Fully resolved translation URL
    translate_url: Url,
    /// HTTP client for making requests
    client: Client,
    /// Request timeout configured on the client
    timeout: Duration,
}

impl GoogleTranslate {
    /// Create a new client for the given base endpoint
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let mut base = endpoint.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        let translate_url = Url::parse(&base)
            .with_context(|| format!("Invalid translation endpoint: {}", endpoint))?
            .join(TRANSLATE_PATH)
            .with_context(|| format!("Invalid translation endpoint: {}", endpoint))?;

        if !matches!(translate_url.scheme(), "http" | "https") {
            return Err(anyhow!("Translation endpoint must use http or https: {}", endpoint));
        }

        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            translate_url,
            client,
            timeout,
        })
    }

    /// The URL requests are sent to
    pub fn translate_url(&self) -> &Url {
        &self.translate_url
    }

    /// Extract the translated text from a response body
    ///
    /// The body is a nested JSON array whose first element lists the
    /// translated segments; each segment starts with its translated text.
    pub fn parse_response(body: &str) -> Result<String, ProviderError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Invalid JSON: {}", e)))?;

        // Empty input comes back as `[null, ...]`
        if value.get(0).is_some_and(Value::is_null) {
            return Ok(String::new());
        }

        let segments = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Missing translation segments".to_string()))?;

        let translated: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if translated.is_empty() && !segments.is_empty() {
            return Err(ProviderError::ParseError(
                "Translation segments contain no text".to_string(),
            ));
        }

        Ok(translated)
    }

    /// Map a non-success HTTP status to a provider error
    fn status_error(status: StatusCode, body: String) -> ProviderError {
        if status == StatusCode::TOO_MANY_REQUESTS {
            ProviderError::RateLimitExceeded(body)
        } else {
            ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            }
        }
    }

    /// Map a transport failure to a provider error
    fn send_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else if e.is_connect() {
            ProviderError::ConnectionError(e.to_string())
        } else {
            ProviderError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslate {
    fn name(&self) -> &str {
        "google"
    }

    async fn list_supported_languages(&self) -> Result<BTreeMap<String, String>, ProviderError> {
        Ok(language_utils::supported_languages())
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        debug!(
            "Requesting translation {} -> {} ({} chars)",
            source_language,
            target_language,
            text.chars().count()
        );

        let response = self
            .client
            .get(self.translate_url.clone())
            .query(&[
                ("client", CLIENT_ID),
                ("sl", source_language),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            error!("Translation API error ({}): {}", status, body);
            return Err(Self::status_error(status, body));
        }

        Self::parse_response(&body)
    }
}
