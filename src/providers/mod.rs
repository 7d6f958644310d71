/*!
 * Provider implementations for translation services.
 *
 * This module contains client implementations for the external services
 * that perform the actual translation:
 * - Google: the public Google Translate web endpoint
 * - Mock: deterministic provider for tests and offline use
 */

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// Translation is an opaque external capability: implementations forward
/// the request and hand back the translated text, nothing more.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Catalog of language codes the provider accepts, mapped to display names
    async fn list_supported_languages(&self) -> Result<BTreeMap<String, String>, ProviderError>;

    /// Translate `text` from `source_language` to `target_language`
    ///
    /// Language codes are passed through unvalidated.
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;
}

pub mod google;
pub mod mock;
