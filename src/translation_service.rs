/*!
 * Translation service wrapping a provider with timeout and retry handling.
 *
 * Each attempt is bounded by a timeout. Retryable failures (connection
 * problems, timeouts, rate limiting, server errors) are retried with
 * exponential backoff up to `max_retries` extra attempts. Translation
 * requests have no side effects on the provider, so repeating them is safe.
 */

use anyhow::Result;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::app_config::{ProviderConfig, ProviderKind};
use crate::errors::ProviderError;
use crate::providers::google::GoogleTranslate;
use crate::providers::mock::MockProvider;
use crate::providers::TranslationProvider;

/// Retry and timeout policy for provider calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Time allowed for a single attempt
    pub timeout: Duration,
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Base backoff, doubled on each retry
    pub backoff_base: Duration,
}

impl RetryPolicy {
    /// Backoff to wait before retry number `retry` (1-based)
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let shift = retry.saturating_sub(1).min(16);
        self.backoff_base.saturating_mul(1u32 << shift)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&ProviderConfig::default())
    }
}

impl From<&ProviderConfig> for RetryPolicy {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            max_retries: config.retry_count,
            backoff_base: Duration::from_millis(config.retry_backoff_ms),
        }
    }
}

/// Translation service used by the session loop
#[derive(Debug)]
pub struct TranslationService {
    /// The external provider
    provider: Box<dyn TranslationProvider>,
    /// Timeout and retry policy
    policy: RetryPolicy,
}

impl TranslationService {
    /// Create a new service around a provider
    pub fn new(provider: Box<dyn TranslationProvider>, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    /// Create the service for the configured provider
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let policy = RetryPolicy::from(config);
        let provider: Box<dyn TranslationProvider> = match config.provider_type {
            ProviderKind::Google => Box::new(GoogleTranslate::new(&config.endpoint, policy.timeout)?),
            ProviderKind::Mock => Box::new(MockProvider::working()),
        };

        info!(
            "Using {} provider (timeout {:?}, {} retries)",
            provider.name(),
            policy.timeout,
            policy.max_retries
        );
        Ok(Self::new(provider, policy))
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// The active retry policy
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetch the provider's language catalog, bounded by the attempt timeout
    pub async fn supported_languages(&self) -> Result<BTreeMap<String, String>, ProviderError> {
        tokio::time::timeout(self.policy.timeout, self.provider.list_supported_languages())
            .await
            .map_err(|_| ProviderError::Timeout(self.policy.timeout))?
    }

    /// Translate text, retrying transient failures
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let mut attempt: u32 = 0;

        loop {
            let result = tokio::time::timeout(
                self.policy.timeout,
                self.provider.translate(text, source_language, target_language),
            )
            .await
            .unwrap_or(Err(ProviderError::Timeout(self.policy.timeout)));

            match result {
                Ok(translated) => {
                    if attempt > 0 {
                        debug!("Translation succeeded after {} retries", attempt);
                    }
                    return Ok(translated);
                }
                Err(e) if e.is_retryable() && attempt < self.policy.max_retries => {
                    attempt += 1;
                    let backoff = self.policy.backoff_for(attempt);
                    warn!(
                        "{} translation failed: {} - retry {}/{} in {:?}",
                        self.provider.name(),
                        e,
                        attempt,
                        self.policy.max_retries,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
