//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use super::catalog::ChapterCatalog;
use super::content::{ContentState, ContentView};
use super::form::VerseForm;
use super::quran_client::QuranClient;
use super::types::{ActiveField, CatalogStatus, UiState};
use super::verse::{VerseRequest, VerseResult};

/// Seconds an error popup stays up before it is cleared automatically
const ERROR_DISPLAY_SECS: u64 = 5;

/// Main application model containing all state
pub struct AppModel {
    pub client: Option<QuranClient>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            client: None,
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_default_reciter(reciter_id: &str) -> Self {
        let ui_state = UiState {
            form: VerseForm::with_reciter(reciter_id),
            ..UiState::default()
        };
        Self {
            ui_state: Arc::new(Mutex::new(ui_state)),
            ..Self::new()
        }
    }

    pub fn set_client(&mut self, client: QuranClient) {
        self.client = Some(client);
    }

    pub async fn get_client(&self) -> Option<QuranClient> {
        self.client.clone()
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    pub async fn set_catalog_loading(&self) {
        let mut state = self.ui_state.lock().await;
        state.catalog_status = CatalogStatus::Loading;
    }

    /// Install a freshly loaded catalog; an empty one disables the form
    pub async fn set_catalog(&self, catalog: Arc<ChapterCatalog>) {
        let mut state = self.ui_state.lock().await;
        state.catalog_status = if catalog.is_empty() {
            CatalogStatus::Unavailable
        } else {
            CatalogStatus::Ready
        };
        state.form.clamp_to(&catalog);
        state.catalog = catalog;
    }

    pub async fn catalog_status(&self) -> CatalogStatus {
        self.ui_state.lock().await.catalog_status
    }

    // ========================================================================
    // Form
    // ========================================================================

    pub async fn cycle_field_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.form.finish_verse_input();
        state.active_field = state.active_field.next();
    }

    pub async fn cycle_field_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.form.finish_verse_input();
        state.active_field = state.active_field.prev();
    }

    pub async fn set_active_field(&self, field: ActiveField) {
        let mut state = self.ui_state.lock().await;
        state.form.finish_verse_input();
        state.active_field = field;
    }

    pub async fn move_selection_up(&self) {
        let mut state = self.ui_state.lock().await;
        let catalog = state.catalog.clone();
        match state.active_field {
            ActiveField::Reciter => state.form.prev_reciter(),
            ActiveField::Chapter => state.form.prev_chapter(&catalog),
            ActiveField::Verse => state.form.decrement_verse(&catalog),
            ActiveField::Submit => {}
        }
    }

    pub async fn move_selection_down(&self) {
        let mut state = self.ui_state.lock().await;
        let catalog = state.catalog.clone();
        match state.active_field {
            ActiveField::Reciter => state.form.next_reciter(),
            ActiveField::Chapter => state.form.next_chapter(&catalog),
            ActiveField::Verse => state.form.increment_verse(&catalog),
            ActiveField::Submit => {}
        }
    }

    pub async fn jump_chapters(&self, delta: isize) {
        let mut state = self.ui_state.lock().await;
        let catalog = state.catalog.clone();
        state.form.jump_chapters(delta, &catalog);
    }

    pub async fn step_verse(&self, forward: bool) {
        let mut state = self.ui_state.lock().await;
        let catalog = state.catalog.clone();
        if forward {
            state.form.increment_verse(&catalog);
        } else {
            state.form.decrement_verse(&catalog);
        }
    }

    pub async fn type_verse_digit(&self, digit: char) {
        let mut state = self.ui_state.lock().await;
        let catalog = state.catalog.clone();
        state.form.push_digit(digit, &catalog);
    }

    pub async fn backspace_verse(&self) {
        let mut state = self.ui_state.lock().await;
        let catalog = state.catalog.clone();
        state.form.pop_digit(&catalog);
    }

    /// Request for the current form values, already clamped
    pub async fn build_request(&self) -> Option<VerseRequest> {
        let state = self.ui_state.lock().await;
        state.form.request(&state.catalog)
    }

    // ========================================================================
    // Content
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn is_content_loading(&self) -> bool {
        self.content_state.lock().await.is_loading
    }

    pub async fn set_content_loading(&self, loading: bool) {
        let mut state = self.content_state.lock().await;
        state.is_loading = loading;
    }

    pub async fn set_verse_result(&self, request: VerseRequest, result: VerseResult) {
        let mut state = self.content_state.lock().await;
        state.view = ContentView::Verse { request, result };
        state.is_loading = false;
        drop(state);
        self.clear_status().await;
    }

    pub async fn set_verse_failed(&self, message: String) {
        let mut state = self.content_state.lock().await;
        state.view = ContentView::Failed { message };
        state.is_loading = false;
        drop(state);
        self.clear_status().await;
    }

    pub async fn current_audio_url(&self) -> Option<String> {
        self.content_state.lock().await.audio_url().map(str::to_string)
    }

    // ========================================================================
    // Notices & popups
    // ========================================================================

    pub async fn set_status(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.status_message = Some(message);
    }

    pub async fn clear_status(&self) {
        self.ui_state.lock().await.status_message = None;
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > ERROR_DISPLAY_SECS {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::Chapter;

    fn catalog() -> Arc<ChapterCatalog> {
        Arc::new(ChapterCatalog::from_chapters(vec![
            Chapter { number: 1, name: "a".into(), english_name: String::new(), verse_count: 7 },
            Chapter { number: 2, name: "b".into(), english_name: String::new(), verse_count: 286 },
        ]))
    }

    #[tokio::test]
    async fn test_empty_catalog_marks_unavailable() {
        let model = AppModel::new();
        assert_eq!(model.catalog_status().await, CatalogStatus::Loading);

        model.set_catalog(Arc::new(ChapterCatalog::default())).await;
        assert_eq!(model.catalog_status().await, CatalogStatus::Unavailable);
        assert!(model.build_request().await.is_none());
    }

    #[tokio::test]
    async fn test_chapter_navigation_reclamps_verse() {
        let model = AppModel::new();
        model.set_catalog(catalog()).await;

        model.set_active_field(ActiveField::Chapter).await;
        model.move_selection_down().await;
        model.set_active_field(ActiveField::Verse).await;
        for d in ['1', '0', '0'] {
            model.type_verse_digit(d).await;
        }
        assert_eq!(model.build_request().await.unwrap().verse_number, 100);

        model.set_active_field(ActiveField::Chapter).await;
        model.move_selection_up().await;
        let request = model.build_request().await.unwrap();
        assert_eq!(request.chapter_number, 1);
        assert_eq!(request.verse_number, 7);
    }

    #[tokio::test]
    async fn test_default_reciter_is_applied() {
        let model = AppModel::with_default_reciter("ar.minshawi");
        model.set_catalog(catalog()).await;
        assert_eq!(model.build_request().await.unwrap().reciter_id, "ar.minshawi");
    }

    #[tokio::test]
    async fn test_verse_result_exposes_audio_url() {
        let model = AppModel::new();
        assert!(model.current_audio_url().await.is_none());

        model.set_content_loading(true).await;
        model
            .set_verse_result(
                VerseRequest::new(1, 1, "ar.alafasy"),
                VerseResult {
                    text: "t".into(),
                    audio_url: "http://a/1.mp3".into(),
                    commentary: "c".into(),
                    chapter_name: "n".into(),
                    number_in_chapter: 1,
                },
            )
            .await;

        assert!(!model.is_content_loading().await);
        assert_eq!(model.current_audio_url().await.as_deref(), Some("http://a/1.mp3"));

        model.set_verse_failed("failed".into()).await;
        assert!(model.current_audio_url().await.is_none());
    }

    #[tokio::test]
    async fn test_new_outcome_clears_playback_status() {
        let model = AppModel::new();
        model.set_status("Playing recitation with mpv".into()).await;
        model.set_verse_failed("failed".into()).await;
        assert!(model.get_ui_state().await.status_message.is_none());

        model.set_status("Playing recitation with mpv".into()).await;
        model
            .set_verse_result(
                VerseRequest::new(1, 2, "ar.alafasy"),
                VerseResult {
                    text: "t".into(),
                    audio_url: "http://a/2.mp3".into(),
                    commentary: "c".into(),
                    chapter_name: "n".into(),
                    number_in_chapter: 2,
                },
            )
            .await;
        assert!(model.get_ui_state().await.status_message.is_none());
    }

    #[tokio::test]
    async fn test_error_set_and_clear() {
        let model = AppModel::new();
        model.set_error("boom".into()).await;
        assert!(model.has_error().await);
        model.auto_clear_old_errors().await;
        assert!(model.has_error().await);
        model.clear_error().await;
        assert!(!model.has_error().await);
    }
}
