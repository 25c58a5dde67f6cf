//! Clients for the remote translation service.

use std::time::Duration;

use async_trait::async_trait;
use locport::LocalizationTable;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{config::Settings, languages::Language};

/// Translates a whole table into one language.
///
/// Returns `None` when no usable translation could be obtained; the caller
/// records that as a failure for the file and moves on.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        table: &LocalizationTable,
        language: Language,
        request_id: &str,
    ) -> Option<LocalizationTable>;
}

/// A random 32-character hex id correlating a file with its request.
pub fn request_id() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill(&mut bytes);
    hex::encode(bytes)
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    id: &'a str,
    data: &'a LocalizationTable,
    language: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TranslateResponse {
    Wrapped { translated_data: LocalizationTable },
    Bare(LocalizationTable),
}

impl From<TranslateResponse> for LocalizationTable {
    fn from(response: TranslateResponse) -> Self {
        match response {
            TranslateResponse::Wrapped { translated_data } => translated_data,
            TranslateResponse::Bare(table) => table,
        }
    }
}

/// POSTs `{ id, data, language }` as JSON and accepts either
/// `{ "translated_data": {...} }` or the translated object itself.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: Client,
    endpoint: String,
    attempts: u32,
    retry_delay: Duration,
}

impl HttpTranslator {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        attempts: u32,
        retry_delay: Duration,
    ) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpTranslator {
            client,
            endpoint: endpoint.into(),
            attempts: attempts.max(1),
            retry_delay,
        })
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let endpoint = settings.require_endpoint()?;
        Ok(HttpTranslator::new(
            endpoint,
            settings.timeout,
            settings.retries,
            settings.retry_delay,
        )?)
    }

    async fn send(&self, body: &TranslateRequest<'_>) -> reqwest::Result<LocalizationTable> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<TranslateResponse>().await?.into())
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        table: &LocalizationTable,
        language: Language,
        request_id: &str,
    ) -> Option<LocalizationTable> {
        let body = TranslateRequest {
            id: request_id,
            data: table,
            language: language.name,
        };

        for attempt in 1..=self.attempts {
            debug!(request_id, attempt, attempts = self.attempts, "Translating file");
            match self.send(&body).await {
                Ok(translated) if !translated.is_empty() => return Some(translated),
                Ok(_) => warn!(request_id, attempt, "Translation service returned no entries"),
                Err(e) if e.is_timeout() => warn!(request_id, attempt, "Request timed out"),
                Err(e) => warn!(request_id, attempt, error = %e, "Translation request failed"),
            }

            if attempt < self.attempts {
                debug!(request_id, "Retrying request after {:?}", self.retry_delay);
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        warn!(request_id, language = language.name, "Failed to translate file");
        None
    }
}
