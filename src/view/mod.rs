//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (styles, scrollable lists, popups)
//! - `layout`: Header, selectors, verse row and footer
//! - `content`: Verse / commentary panel
//! - `overlays`: Modal overlays (error, help)

mod utils;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, content_state: &ContentState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(10), // Reciter + chapter selectors
                Constraint::Length(3), // Verse number + submit
                Constraint::Min(0),    // Verse, audio, commentary
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        layout::render_header(frame, chunks[0], ui_state);
        layout::render_selectors(frame, chunks[1], ui_state);
        layout::render_verse_row(frame, chunks[2], ui_state);
        content::render_main_content(frame, chunks[3], ui_state, content_state);
        layout::render_footer(frame, chunks[4], ui_state);

        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::model::{
        ActiveField, CatalogStatus, Chapter, ChapterCatalog, ContentView, VerseForm, VerseRequest,
        VerseResult,
    };

    fn screen(ui_state: &UiState, content_state: &ContentState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|f| AppView::render(f, ui_state, content_state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn ready_state() -> UiState {
        let catalog = ChapterCatalog::from_chapters(vec![Chapter {
            number: 1,
            name: "Al-Fatiha".into(),
            english_name: "The Opening".into(),
            verse_count: 7,
        }]);
        UiState {
            catalog: Arc::new(catalog),
            catalog_status: CatalogStatus::Ready,
            form: VerseForm::default(),
            ..UiState::default()
        }
    }

    #[test]
    fn test_unavailable_catalog_shows_connection_notice() {
        let ui_state = UiState {
            catalog_status: CatalogStatus::Unavailable,
            ..UiState::default()
        };
        let text = screen(&ui_state, &ContentState::default());
        assert!(text.contains("Check your internet connection."));
        assert!(text.contains("No chapters available"));
    }

    #[test]
    fn test_form_lists_reciters_and_chapters() {
        let text = screen(&ready_state(), &ContentState::default());
        assert!(text.contains("Mishary Rashid Alafasy"));
        assert!(text.contains("الشيخ مشاري العفاسي (الكويت)"));
        assert!(text.contains("Shahriar Parhizgar"));
        assert!(text.contains("Al-Fatiha"));
        assert!(text.contains("(1 - 7)"));
        assert!(text.contains("Show & Listen"));
    }

    #[test]
    fn test_verse_result_is_rendered() {
        let content_state = ContentState {
            view: ContentView::Verse {
                request: VerseRequest::new(1, 1, "ar.alafasy"),
                result: VerseResult {
                    text: "Bismillah".into(),
                    audio_url: "https://cdn.example/1.mp3".into(),
                    commentary: "Opening commentary".into(),
                    chapter_name: "Al-Fatiha".into(),
                    number_in_chapter: 1,
                },
            },
            is_loading: false,
        };
        let text = screen(&ready_state(), &content_state);
        assert!(text.contains("Bismillah"));
        assert!(text.contains("https://cdn.example/1.mp3"));
        assert!(text.contains("Opening commentary"));
        assert!(text.contains("A to play"));
    }

    #[test]
    fn test_failed_lookup_and_loading_states() {
        let failed = ContentState {
            view: ContentView::Failed {
                message: "Error fetching data, please try again.".into(),
            },
            is_loading: false,
        };
        assert!(screen(&ready_state(), &failed).contains("please try again"));

        let loading = ContentState {
            is_loading: true,
            ..ContentState::default()
        };
        assert!(screen(&ready_state(), &loading).contains("Loading..."));
    }

    #[test]
    fn test_typed_verse_shows_cursor() {
        let mut ui_state = ready_state();
        ui_state.active_field = ActiveField::Verse;
        ui_state.form.verse_input = "5".into();
        ui_state.form.verse_number = 5;
        assert!(screen(&ui_state, &ContentState::default()).contains("5_"));
    }

    #[test]
    fn test_popups_render() {
        let mut ui_state = ready_state();
        ui_state.show_help_popup = true;
        assert!(screen(&ui_state, &ContentState::default()).contains("Help (H or Esc to close)"));

        let mut ui_state = ready_state();
        ui_state.error_message = Some("Could not start audio player".into());
        assert!(screen(&ui_state, &ContentState::default()).contains("Could not start audio player"));
    }
}
