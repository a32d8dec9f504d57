//! Directus REST client.
//!
//! Reads the `languages`, `words` and `settings` collections through the
//! public items API. Responses are wrapped in a `{ "data": ... }` envelope;
//! a missing or `null` `data` is read as an empty result.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;

use luminar_core::error::ContentError;
use luminar_core::model::{ItemId, Language, Word};
use luminar_core::settings::QuizSettings;
use luminar_core::traits::ContentSource;

pub const DEFAULT_BASE_URL: &str = "http://luminar-edu.nl";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const PUBLISHED: &str = "published";

/// Client for a Directus instance.
pub struct DirectusClient {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

impl DirectusClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ContentError> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };
        Url::parse(base)
            .map_err(|e| ContentError::Client(format!("invalid base URL '{base}': {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ContentError::Client(e.to_string()))?;

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn items_url(&self, collection: &str) -> Result<Url, ContentError> {
        Url::parse(&format!("{}/items/{collection}", self.base_url))
            .map_err(|e| ContentError::Client(e.to_string()))
    }

    /// GET an items URL and unwrap the `data` envelope.
    async fn get_data<T: DeserializeOwned>(
        &self,
        collection: &str,
        url: Url,
    ) -> Result<Option<T>, ContentError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ContentError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    ContentError::Network(format!(
                        "Directus not reachable at {}",
                        self.base_url
                    ))
                } else {
                    ContentError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(ContentError::NotFound(collection.to_string()));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Api {
                status,
                message: body,
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ContentError::Decode(format!("{collection}: {e}")))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ContentSource for DirectusClient {
    fn name(&self) -> &str {
        "directus"
    }

    #[instrument(skip(self))]
    async fn fetch_languages(&self) -> Result<Vec<Language>, ContentError> {
        let mut url = self.items_url("languages")?;
        url.query_pairs_mut()
            .append_pair("filter[status][_eq]", PUBLISHED);

        let languages: Option<Vec<Language>> = self.get_data("languages", url).await?;
        Ok(languages.unwrap_or_default())
    }

    #[instrument(skip(self), fields(language = %language_id))]
    async fn fetch_words(
        &self,
        language_id: &ItemId,
        limit: u32,
    ) -> Result<Vec<Word>, ContentError> {
        let mut url = self.items_url("words")?;
        url.query_pairs_mut()
            .append_pair("filter[language][_eq]", &language_id.to_string())
            .append_pair("filter[status][_eq]", PUBLISHED)
            .append_pair("limit", &limit.to_string());

        let words: Option<Vec<Word>> = self.get_data("words", url).await?;
        Ok(words.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn fetch_settings(&self) -> Result<QuizSettings, ContentError> {
        let url = self.items_url("settings")?;
        let data: Option<serde_json::Value> = self.get_data("settings", url).await?;
        QuizSettings::from_json(data.unwrap_or_default())
            .map_err(|e| ContentError::Decode(format!("settings: {e}")))
    }
}
