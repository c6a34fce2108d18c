//! Controller actions: catalog loading, verse fetching, audio playback

use crate::model::CatalogStatus;
use super::AppController;

impl AppController {
    /// Load (or reuse) the chapter catalog and install it in the model
    pub async fn load_catalog(&self) {
        let client = {
            let model = self.model.lock().await;
            model.set_catalog_loading().await;
            model.get_client().await
        };

        let Some(client) = client else {
            tracing::warn!("No content client configured");
            let model = self.model.lock().await;
            model.set_catalog(Default::default()).await;
            return;
        };

        let catalog = client.chapters().await;
        if catalog.is_empty() {
            tracing::error!("Chapter catalog unavailable");
        }

        let model = self.model.lock().await;
        model.set_catalog(catalog).await;
    }

    /// Load the catalog without blocking the render loop
    pub fn spawn_load_catalog(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.load_catalog().await;
        });
    }

    /// Fetch the verse for the current form values and show the outcome.
    ///
    /// Returns `false` without doing anything if a request is already in
    /// flight or the form cannot produce a request.
    pub async fn fetch_selected_verse(&self) -> bool {
        let (client, request) = {
            let model = self.model.lock().await;
            if model.is_content_loading().await || model.catalog_status().await != CatalogStatus::Ready {
                return false;
            }
            let (Some(client), Some(request)) = (model.get_client().await, model.build_request().await) else {
                return false;
            };
            model.set_content_loading(true).await;
            (client, request)
        };

        tracing::info!(
            reference = %request.reference(),
            reciter = %request.reciter_id,
            "Verse requested"
        );
        let result = client.verse(&request).await;

        let model = self.model.lock().await;
        match result {
            Ok(verse) => {
                tracing::info!(reference = %request.reference(), "Verse displayed");
                model.set_verse_result(request, verse).await;
            }
            Err(e) => {
                tracing::error!(reference = %request.reference(), error = %e, "Verse fetch failed");
                model.set_verse_failed(Self::format_error(&e)).await;
            }
        }
        true
    }

    pub fn spawn_fetch_selected_verse(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.fetch_selected_verse().await;
        });
    }

    pub async fn play_current_audio(&self) {
        let model = self.model.lock().await;
        let Some(url) = model.current_audio_url().await else {
            model.set_error("Show a verse first, then press A to listen.".to_string()).await;
            return;
        };

        match self.audio.play(&url) {
            Ok(()) => {
                model
                    .set_status(format!("Playing recitation with {}", self.audio.player()))
                    .await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Audio playback failed");
                model.set_error(format!("Could not start audio player: {}", e)).await;
            }
        }
    }
}
