//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and coordinates between the model and the content API.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `actions`: Catalog loading, verse fetching and audio playback

mod input;
mod actions;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::audio::AudioLauncher;
use crate::model::{AppModel, FetchError};

pub const CATALOG_UNAVAILABLE_MESSAGE: &str = "Check your internet connection.";
pub const VERSE_UNAVAILABLE_MESSAGE: &str = "Error fetching data, please try again.";

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) audio: AudioLauncher,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, audio: AudioLauncher) -> Self {
        Self { model, audio }
    }

    /// Every lookup failure collapses to one generic notice; the cause only
    /// goes to the log
    pub(crate) fn format_error(error: &FetchError) -> String {
        tracing::debug!(lookup = %error.lookup(), error = %error, "Verse lookup failure collapsed");
        VERSE_UNAVAILABLE_MESSAGE.to_string()
    }
}
