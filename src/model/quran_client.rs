//! Content API client: cached chapter catalog plus verse lookups

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::config::ApiConfig;
use super::api::{ContentSource, HttpContentSource};
use super::catalog::{CatalogCache, CatalogLoader, ChapterCatalog};
use super::verse::{FetchError, VerseFetcher, VerseRequest, VerseResult};

#[derive(Clone)]
pub struct QuranClient {
    catalog: CatalogCache,
    fetcher: VerseFetcher,
}

impl QuranClient {
    pub fn new(source: Arc<dyn ContentSource>, commentary_edition: &str) -> Self {
        Self {
            catalog: CatalogCache::new(CatalogLoader::new(source.clone())),
            fetcher: VerseFetcher::new(source, commentary_edition),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let source = HttpContentSource::new(&config.base_url, Duration::from_secs(config.timeout_secs))?;
        tracing::debug!(
            base_url = source.base_url(),
            commentary = %config.commentary_edition,
            timeout_secs = config.timeout_secs,
            "Content API client initialized"
        );
        Ok(Self::new(Arc::new(source), &config.commentary_edition))
    }

    /// Cached catalog; empty when the API could not be reached
    pub async fn chapters(&self) -> Arc<ChapterCatalog> {
        self.catalog.get_or_load().await
    }

    pub async fn verse(&self, request: &VerseRequest) -> Result<VerseResult, FetchError> {
        tracing::debug!(
            reference = %request.reference(),
            reciter = %request.reciter_id,
            commentary = self.fetcher.commentary_edition(),
            "Fetching verse"
        );
        self.fetcher.fetch(request).await
    }

    /// Verse lookup for callers that only need "found or not"; the cause is
    /// still logged by the fetcher
    pub async fn verse_opt(&self, request: &VerseRequest) -> Option<VerseResult> {
        self.fetcher
            .fetch_verse_opt(request.chapter_number, request.verse_number, &request.reciter_id)
            .await
    }
}
