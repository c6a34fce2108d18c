//! Content panel state: the fetched verse or the reason nothing is shown

use super::verse::{VerseRequest, VerseResult};

/// Represents the current view in the content area
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ContentView {
    #[default]
    Empty,
    Verse {
        request: VerseRequest,
        result: VerseResult,
    },
    /// Generic notice shown after a failed lookup
    Failed { message: String },
}

/// State for the content area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ContentView,
    pub is_loading: bool,
}

impl ContentState {
    pub fn audio_url(&self) -> Option<&str> {
        match &self.view {
            ContentView::Verse { result, .. } if !result.audio_url.is_empty() => {
                Some(result.audio_url.as_str())
            }
            _ => None,
        }
    }
}
