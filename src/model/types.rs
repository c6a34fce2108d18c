//! Core type definitions for the application

use std::sync::Arc;
use std::time::Instant;

use super::catalog::ChapterCatalog;
use super::form::VerseForm;

/// Which form field currently has focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveField {
    Reciter,
    Chapter,
    Verse,
    Submit,
}

impl ActiveField {
    pub fn next(self) -> Self {
        match self {
            ActiveField::Reciter => ActiveField::Chapter,
            ActiveField::Chapter => ActiveField::Verse,
            ActiveField::Verse => ActiveField::Submit,
            ActiveField::Submit => ActiveField::Reciter,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveField::Reciter => ActiveField::Submit,
            ActiveField::Chapter => ActiveField::Reciter,
            ActiveField::Verse => ActiveField::Chapter,
            ActiveField::Submit => ActiveField::Verse,
        }
    }
}

/// Lifecycle of the chapter catalog as seen by the UI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    Ready,
    Unavailable,
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_field: ActiveField,
    pub form: VerseForm,
    pub catalog: Arc<ChapterCatalog>,
    pub catalog_status: CatalogStatus,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_field: ActiveField::Chapter,
            form: VerseForm::default(),
            catalog: Arc::new(ChapterCatalog::default()),
            catalog_status: CatalogStatus::Loading,
            status_message: None,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cycle_round_trips() {
        let mut field = ActiveField::Reciter;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, ActiveField::Reciter);
        assert_eq!(ActiveField::Reciter.prev(), ActiveField::Submit);
        assert_eq!(ActiveField::Submit.prev().next(), ActiveField::Submit);
    }
}
