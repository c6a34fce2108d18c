//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveField, CatalogStatus};
use super::AppController;

/// Chapters skipped by PageUp / PageDown
const CHAPTER_PAGE: isize = 10;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return Ok(());
        }

        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        // Without a catalog the form is disabled
        match model.catalog_status().await {
            CatalogStatus::Ready => {}
            CatalogStatus::Loading => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
                    model.set_should_quit(true).await;
                }
                return Ok(());
            }
            CatalogStatus::Unavailable => {
                match key.code {
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        drop(model);
                        self.spawn_load_catalog();
                    }
                    KeyCode::Char('h') | KeyCode::Char('H') => model.show_help_popup().await,
                    KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true).await,
                    _ => {}
                }
                return Ok(());
            }
        }

        let ui_state = model.get_ui_state().await;

        // Verse field: digits edit the number in place
        if ui_state.active_field == ActiveField::Verse {
            match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    model.type_verse_digit(c).await;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    model.backspace_verse().await;
                    return Ok(());
                }
                KeyCode::Left => {
                    model.step_verse(false).await;
                    return Ok(());
                }
                KeyCode::Right => {
                    model.step_verse(true).await;
                    return Ok(());
                }
                _ => {}
            }
        }

        if ui_state.active_field == ActiveField::Chapter {
            match key.code {
                KeyCode::PageDown => {
                    model.jump_chapters(CHAPTER_PAGE).await;
                    return Ok(());
                }
                KeyCode::PageUp => {
                    model.jump_chapters(-CHAPTER_PAGE).await;
                    return Ok(());
                }
                _ => {}
            }
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_field_backward().await;
                } else {
                    model.cycle_field_forward().await;
                }
            }
            KeyCode::BackTab => {
                model.cycle_field_backward().await;
            }
            KeyCode::Up => {
                model.move_selection_up().await;
            }
            KeyCode::Down => {
                model.move_selection_down().await;
            }
            KeyCode::Enter => {
                drop(model);
                self.spawn_fetch_selected_verse();
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                drop(model);
                self.play_current_audio().await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            KeyCode::Esc => {
                model.set_active_field(ActiveField::Chapter).await;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use tokio::sync::Mutex;

    use super::*;
    use crate::audio::AudioLauncher;
    use crate::model::testing::*;
    use crate::model::{AppModel, QuranClient, COMMENTARY_EDITION};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn ready_controller() -> AppController {
        let source = FakeSource::new().with_json("/v1/surah", &catalog_body(114));
        let mut model = AppModel::new();
        model.set_client(QuranClient::new(Arc::new(source), COMMENTARY_EDITION));
        let controller = AppController::new(Arc::new(Mutex::new(model)), AudioLauncher::new("true", vec![]));
        controller.load_catalog().await;
        controller
    }

    async fn request_reference(controller: &AppController) -> String {
        controller
            .model
            .lock()
            .await
            .build_request()
            .await
            .map(|r| r.reference())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_typed_verse_is_clamped_to_chapter() {
        let controller = ready_controller().await;
        controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();
        for c in ['9', '9', '9'] {
            controller.handle_key_event(press(KeyCode::Char(c))).await.unwrap();
        }
        assert_eq!(request_reference(&controller).await, "1:7");
    }

    #[tokio::test]
    async fn test_changing_chapter_reclamps_typed_verse() {
        let controller = ready_controller().await;
        // Al-Baqara, then verse 200
        controller.handle_key_event(press(KeyCode::Down)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();
        for c in ['2', '0', '0'] {
            controller.handle_key_event(press(KeyCode::Char(c))).await.unwrap();
        }
        assert_eq!(request_reference(&controller).await, "2:200");

        controller.handle_key_event(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Up)).await.unwrap();
        assert_eq!(request_reference(&controller).await, "1:7");
    }

    #[tokio::test]
    async fn test_page_down_jumps_chapters() {
        let controller = ready_controller().await;
        controller.handle_key_event(press(KeyCode::PageDown)).await.unwrap();
        assert!(request_reference(&controller).await.starts_with("11:"));
    }

    #[tokio::test]
    async fn test_reciter_field_changes_reciter() {
        let controller = ready_controller().await;
        controller.handle_key_event(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)).await.unwrap();
        controller.handle_key_event(press(KeyCode::Down)).await.unwrap();

        let request = controller.model.lock().await.build_request().await.unwrap();
        assert_eq!(request.reciter_id, "ar.minshawi");
    }

    #[tokio::test]
    async fn test_error_popup_blocks_other_keys() {
        let controller = ready_controller().await;
        controller.model.lock().await.set_error("x".into()).await;

        controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(!controller.model.lock().await.should_quit().await);

        controller.handle_key_event(press(KeyCode::Esc)).await.unwrap();
        assert!(!controller.model.lock().await.has_error().await);

        controller.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(controller.model.lock().await.should_quit().await);
    }

    #[tokio::test]
    async fn test_unavailable_catalog_ignores_form_keys() {
        let mut model = AppModel::new();
        model.set_client(QuranClient::new(Arc::new(FakeSource::new()), COMMENTARY_EDITION));
        let controller = AppController::new(Arc::new(Mutex::new(model)), AudioLauncher::new("true", vec![]));
        controller.load_catalog().await;

        controller.handle_key_event(press(KeyCode::Tab)).await.unwrap();
        let ui = controller.model.lock().await.get_ui_state().await;
        assert_eq!(ui.active_field, ActiveField::Chapter);
        assert_eq!(ui.catalog_status, CatalogStatus::Unavailable);

        controller.handle_key_event(press(KeyCode::Char('h'))).await.unwrap();
        assert!(controller.model.lock().await.is_help_popup_open().await);
    }

    #[tokio::test]
    async fn test_key_release_is_ignored() {
        let controller = ready_controller().await;
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        controller.handle_key_event(key).await.unwrap();
        assert!(!controller.model.lock().await.should_quit().await);
    }
}
