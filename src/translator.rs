use crate::language::LanguageTag;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Default Google Cloud Translation v2 endpoint
pub const DEFAULT_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// A remote translation capability.
///
/// Implementations translate a batch of texts and return the results in the
/// same order. Calls may fail transiently; callers are expected to retry.
pub trait Translator: Send + Sync + 'static {
    fn translate(
        &self,
        texts: &[String],
        source: &LanguageTag,
        target: &LanguageTag,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Translate a single text through `translator`.
///
/// A reply without exactly one result counts as a failed call.
pub async fn translate_one<T: Translator>(
    translator: &T,
    text: &str,
    source: &LanguageTag,
    target: &LanguageTag,
) -> Result<String> {
    let mut results = translator
        .translate(&[text.to_string()], source, target)
        .await?;

    if results.len() != 1 {
        bail!(
            "Translation service returned {} results for 1 input",
            results.len()
        );
    }
    Ok(results.remove(0))
}

/// Google Cloud Translation v2 request
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a [String],
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslationList,
}

#[derive(Debug, Deserialize)]
struct TranslationList {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// HTTP client for the Google Cloud Translation v2 REST API.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GoogleTranslator {
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for translation service")?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        texts: &[String],
        source: &LanguageTag,
        target: &LanguageTag,
    ) -> Result<Vec<String>> {
        if self.api_key.is_empty() {
            bail!("TRANSLATE_API_KEY is not set");
        }

        let request = TranslateRequest {
            q: texts,
            source: source.as_str(),
            target: target.as_str(),
            format: "text",
        };

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to translation service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            bail!("Translation API error ({}): {}", status, body);
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .context("Failed to parse translation service response")?;

        let translations: Vec<String> = parsed
            .data
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .collect();

        if translations.len() != texts.len() {
            bail!(
                "Translation service returned {} results for {} inputs",
                translations.len(),
                texts.len()
            );
        }

        Ok(translations)
    }
}
