/*!
 * Language utilities for the provider's language catalog.
 *
 * The provider identifies languages mostly by ISO 639-1 codes, with a few
 * legacy or region-qualified codes of its own. Display names come from
 * the ISO 639 tables where a code maps onto one.
 */

use anyhow::{Result, anyhow};
use isolang::Language;
use std::collections::BTreeMap;

/// Codes accepted by the Google Translate endpoint
pub const SUPPORTED_LANGUAGE_CODES: &[&str] = &[
    "af", "sq", "am", "ar", "hy", "az", "eu", "be", "bn", "bs", "bg", "ca", "ceb", "ny",
    "zh-cn", "zh-tw", "co", "hr", "cs", "da", "nl", "en", "eo", "et", "tl", "fi", "fr",
    "fy", "gl", "ka", "de", "el", "gu", "ht", "ha", "haw", "iw", "he", "hi", "hmn", "hu",
    "is", "ig", "id", "ga", "it", "ja", "jw", "kn", "kk", "km", "ko", "ku", "ky", "lo",
    "la", "lv", "lt", "lb", "mk", "mg", "ms", "ml", "mt", "mi", "mr", "mn", "my", "ne",
    "no", "or", "ps", "fa", "pl", "pt", "pa", "ro", "ru", "sm", "gd", "sr", "st", "sn",
    "sd", "si", "sk", "sl", "so", "es", "su", "sw", "sv", "tg", "ta", "te", "th", "tr",
    "uk", "ur", "ug", "uz", "vi", "cy", "xh", "yi", "yo", "zu",
];

/// Names for provider-specific codes that are not plain ISO 639 codes
fn provider_specific_name(code: &str) -> Option<&'static str> {
    match code {
        "zh-cn" => Some("Chinese (Simplified)"),
        "zh-tw" => Some("Chinese (Traditional)"),
        "iw" => Some("Hebrew"),
        "jw" => Some("Javanese"),
        _ => None,
    }
}

/// Normalize a language code to ISO 639-3 (3-letter) format
pub fn normalize_to_part3(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 && Language::from_639_3(&normalized_code).is_some() {
        return Ok(normalized_code);
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    if let Some(name) = provider_specific_name(&code.trim().to_lowercase()) {
        return Ok(name.to_string());
    }

    let normalized = normalize_to_part3(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Build the catalog of supported languages, code to display name
///
/// Codes without a known name are listed under the code itself.
pub fn supported_languages() -> BTreeMap<String, String> {
    SUPPORTED_LANGUAGE_CODES
        .iter()
        .map(|code| {
            let name = get_language_name(code).unwrap_or_else(|_| code.to_string());
            (code.to_string(), name)
        })
        .collect()
}
