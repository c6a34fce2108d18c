//! Model module - Application state, content API access and data types
//!
//! This module contains the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `api`: raw transport to the content API (`ContentSource`)
//! - `catalog`: chapter catalog loading and its process-lifetime cache
//! - `verse`: recitation + commentary lookups for one verse
//! - `reciters`: the fixed reciter list
//! - `form`: selection form with verse-number clamping
//! - `types`: UI enums and state
//! - `content`: content panel state
//! - `quran_client`: client wrapper combining catalog and verse access
//! - `app_model`: main application model with state management methods

mod api;
mod catalog;
mod verse;
pub mod reciters;
mod form;
mod types;
mod content;
mod quran_client;
mod app_model;

pub use api::DEFAULT_BASE_URL;

pub use catalog::ChapterCatalog;

pub use verse::{FetchError, VerseRequest, VerseResult, COMMENTARY_EDITION};

pub use reciters::{DEFAULT_RECITER_ID, RECITERS};

pub use form::clamp_verse;

pub use types::{ActiveField, CatalogStatus, UiState};

pub use content::{ContentState, ContentView};

pub use quran_client::QuranClient;

pub use app_model::AppModel;

#[cfg(test)]
pub(crate) use api::testing;

#[cfg(test)]
pub(crate) use catalog::Chapter;

#[cfg(test)]
pub(crate) use form::VerseForm;
