//! Chapter catalog: loading the surah list and memoizing it for the process

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Mutex;

use super::api::{decode, ApiError, ContentSource, Envelope};

pub const CATALOG_PATH: &str = "/v1/surah";

/// Verse bound used when the selected chapter cannot be resolved (longest surah)
pub const FALLBACK_VERSE_LIMIT: u16 = 286;

/// One chapter (surah) of the catalog
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Chapter {
    pub number: u16,
    pub name: String,
    #[serde(rename = "englishName", default)]
    pub english_name: String,
    #[serde(rename = "numberOfAyahs")]
    pub verse_count: u16,
}

impl Chapter {
    /// Menu label, unique per chapter
    pub fn label(&self) -> String {
        format!("{}. {} ({})", self.number, self.name, self.verse_count)
    }
}

/// Chapters in catalog order plus the label → number lookup used by menus
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChapterCatalog {
    label_to_number: HashMap<String, u16>,
    chapters: Vec<Chapter>,
}

impl ChapterCatalog {
    pub fn from_chapters(chapters: Vec<Chapter>) -> Self {
        let label_to_number = chapters
            .iter()
            .map(|chapter| (chapter.label(), chapter.number))
            .collect();

        Self {
            label_to_number,
            chapters,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn label_to_number(&self) -> &HashMap<String, u16> {
        &self.label_to_number
    }

    pub fn number_for_label(&self, label: &str) -> Option<u16> {
        self.label_to_number.get(label).copied()
    }

    pub fn get(&self, number: u16) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.number == number)
    }

    pub fn verse_limit(&self, number: u16) -> u16 {
        self.get(number)
            .map(|c| c.verse_count)
            .unwrap_or(FALLBACK_VERSE_LIMIT)
    }
}

/// Loads the catalog from the remote `/v1/surah` endpoint
#[derive(Clone)]
pub struct CatalogLoader {
    source: Arc<dyn ContentSource>,
}

impl CatalogLoader {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    /// Fetch the catalog, keeping the reason when it cannot be built
    pub async fn try_load_chapters(&self) -> Result<ChapterCatalog, ApiError> {
        let reply = self.source.get(CATALOG_PATH).await?;
        if reply.status != 200 {
            return Err(ApiError::Status {
                path: CATALOG_PATH.to_string(),
                status: reply.status,
            });
        }

        let envelope: Envelope<Vec<Chapter>> = decode(CATALOG_PATH, &reply.body)?;
        Ok(ChapterCatalog::from_chapters(envelope.data))
    }

    /// Fetch the catalog; any failure yields an empty catalog
    pub async fn load_chapters(&self) -> ChapterCatalog {
        let result = self.try_load_chapters().await;
        crate::log_api_result!("load_chapters", result);

        match result {
            Ok(catalog) => {
                tracing::info!(chapters = catalog.len(), "Chapter catalog loaded");
                catalog
            }
            Err(_) => ChapterCatalog::default(),
        }
    }
}

/// Process-lifetime memo of the chapter catalog.
///
/// Only a non-empty catalog is kept, so a failed load can be attempted again.
/// Concurrent callers wait on the same lock and never issue a second fetch
/// once a catalog is cached.
#[derive(Clone)]
pub struct CatalogCache {
    loader: CatalogLoader,
    cached: Arc<Mutex<Option<Arc<ChapterCatalog>>>>,
}

impl CatalogCache {
    pub fn new(loader: CatalogLoader) -> Self {
        Self {
            loader,
            cached: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn get_or_load(&self) -> Arc<ChapterCatalog> {
        let mut cached = self.cached.lock().await;
        if let Some(catalog) = cached.as_ref() {
            return catalog.clone();
        }

        let catalog = Arc::new(self.loader.load_chapters().await);
        if !catalog.is_empty() {
            *cached = Some(catalog.clone());
        }
        catalog
    }

    #[cfg(test)]
    pub async fn is_cached(&self) -> bool {
        self.cached.lock().await.is_some()
    }
}
