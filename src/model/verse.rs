//! Verse lookups: recitation (text + audio) and commentary for one ayah

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use super::api::{decode, ApiError, ContentSource, Envelope, ResponseCode, SUCCESS_CODE};

/// Simplified commentary edition (tafsir al-muyassar)
pub const COMMENTARY_EDITION: &str = "ar.muyassar";

/// What the user asked for; bounds are checked by the form before it is built
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerseRequest {
    pub chapter_number: u16,
    pub verse_number: u16,
    pub reciter_id: String,
}

impl VerseRequest {
    pub fn new(chapter_number: u16, verse_number: u16, reciter_id: impl Into<String>) -> Self {
        Self {
            chapter_number,
            verse_number,
            reciter_id: reciter_id.into(),
        }
    }

    /// `chapter:verse` reference used in paths and headings
    pub fn reference(&self) -> String {
        format!("{}:{}", self.chapter_number, self.verse_number)
    }
}

/// Merged outcome of both lookups
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerseResult {
    pub text: String,
    pub audio_url: String,
    pub commentary: String,
    pub chapter_name: String,
    pub number_in_chapter: u16,
}

/// Which of the two lookups failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    Recitation,
    Commentary,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Recitation => write!(f, "recitation"),
            Lookup::Commentary => write!(f, "commentary"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{lookup} lookup failed: {source}")]
    Transport {
        lookup: Lookup,
        #[source]
        source: ApiError,
    },

    #[error("{lookup} lookup returned malformed data: {source}")]
    Malformed {
        lookup: Lookup,
        #[source]
        source: ApiError,
    },

    #[error("{lookup} lookup for edition {edition} returned code {code}")]
    Status {
        lookup: Lookup,
        edition: String,
        code: u16,
    },
}

impl FetchError {
    fn from_api(lookup: Lookup, source: ApiError) -> Self {
        match source {
            ApiError::Malformed { .. } => Self::Malformed { lookup, source },
            _ => Self::Transport { lookup, source },
        }
    }

    pub fn lookup(&self) -> Lookup {
        match self {
            Self::Transport { lookup, .. } | Self::Malformed { lookup, .. } | Self::Status { lookup, .. } => *lookup,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecitationData {
    text: String,
    audio: String,
    #[serde(rename = "numberInSurah", default)]
    number_in_surah: u16,
    surah: SurahRef,
}

#[derive(Debug, Deserialize)]
struct SurahRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CommentaryData {
    text: String,
}

pub fn ayah_path(chapter: u16, verse: u16, edition: &str) -> String {
    format!("/v1/ayah/{}:{}/{}", chapter, verse, edition)
}

/// Issues the two per-verse lookups and merges them
#[derive(Clone)]
pub struct VerseFetcher {
    source: Arc<dyn ContentSource>,
    commentary_edition: String,
}

impl VerseFetcher {
    pub fn new(source: Arc<dyn ContentSource>, commentary_edition: impl Into<String>) -> Self {
        Self {
            source,
            commentary_edition: commentary_edition.into(),
        }
    }

    pub fn commentary_edition(&self) -> &str {
        &self.commentary_edition
    }

    /// Both lookups must report success; the recitation lookup runs first and
    /// a failure there skips the commentary request
    pub async fn fetch_verse(
        &self,
        chapter: u16,
        verse: u16,
        reciter_id: &str,
    ) -> Result<VerseResult, FetchError> {
        let recitation: RecitationData = self
            .lookup(Lookup::Recitation, chapter, verse, reciter_id)
            .await?;
        let commentary: CommentaryData = self
            .lookup(Lookup::Commentary, chapter, verse, &self.commentary_edition)
            .await?;

        Ok(VerseResult {
            text: recitation.text,
            audio_url: recitation.audio,
            commentary: commentary.text,
            chapter_name: recitation.surah.name,
            number_in_chapter: recitation.number_in_surah,
        })
    }

    pub async fn fetch(&self, request: &VerseRequest) -> Result<VerseResult, FetchError> {
        let result = self
            .fetch_verse(request.chapter_number, request.verse_number, &request.reciter_id)
            .await;
        crate::log_api_result!("fetch_verse", result);
        result
    }

    /// Same as [`fetch_verse`](Self::fetch_verse) with every failure collapsed to `None`
    pub async fn fetch_verse_opt(&self, chapter: u16, verse: u16, reciter_id: &str) -> Option<VerseResult> {
        self.fetch(&VerseRequest::new(chapter, verse, reciter_id))
            .await
            .ok()
    }

    async fn lookup<T: DeserializeOwned>(
        &self,
        lookup: Lookup,
        chapter: u16,
        verse: u16,
        edition: &str,
    ) -> Result<T, FetchError> {
        let path = ayah_path(chapter, verse, edition);
        let reply = self
            .source
            .get(&path)
            .await
            .map_err(|e| FetchError::from_api(lookup, e))?;

        // The HTTP status mirrors `code`; only `code` is authoritative
        let code: ResponseCode = decode(&path, &reply.body).map_err(|e| FetchError::from_api(lookup, e))?;
        if code.code != SUCCESS_CODE {
            return Err(FetchError::Status {
                lookup,
                edition: edition.to_string(),
                code: code.code,
            });
        }

        let envelope: Envelope<T> = decode(&path, &reply.body).map_err(|e| FetchError::from_api(lookup, e))?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::api::testing::*;

    const RECITER: &str = "ar.alafasy";

    fn fatiha_source() -> FakeSource {
        FakeSource::new()
            .with_json(
                &ayah_path(1, 1, RECITER),
                &recitation_body(FATIHA_OPENING, FATIHA_AUDIO, "سُورَةُ ٱلْفَاتِحَةِ"),
            )
            .with_json(&ayah_path(1, 1, COMMENTARY_EDITION), &commentary_body(FATIHA_COMMENTARY))
    }

    fn fetcher(source: FakeSource) -> VerseFetcher {
        VerseFetcher::new(Arc::new(source), COMMENTARY_EDITION)
    }

    #[test]
    fn test_ayah_path_format() {
        assert_eq!(ayah_path(2, 255, "ar.husary"), "/v1/ayah/2:255/ar.husary");
        assert_eq!(VerseRequest::new(2, 255, "ar.husary").reference(), "2:255");
    }

    #[tokio::test]
    async fn test_fatiha_opening_verse() {
        let result = fetcher(fatiha_source()).fetch_verse(1, 1, RECITER).await.unwrap();

        assert_eq!(result.text, FATIHA_OPENING);
        assert_eq!(result.audio_url, FATIHA_AUDIO);
        assert_eq!(result.commentary, FATIHA_COMMENTARY);
        assert_eq!(result.chapter_name, "سُورَةُ ٱلْفَاتِحَةِ");
        assert_eq!(result.number_in_chapter, 1);
        assert!(!result.audio_url.is_empty());
        assert!(!result.commentary.is_empty());
    }

    #[tokio::test]
    async fn test_fields_are_copied_verbatim() {
        let text = "  text with  spacing \n";
        let audio = "http://example.invalid/a b.mp3";
        let commentary = "<b>not html-escaped</b>";
        let source = FakeSource::new()
            .with_json(&ayah_path(3, 4, RECITER), &recitation_body(text, audio, "name"))
            .with_json(&ayah_path(3, 4, COMMENTARY_EDITION), &commentary_body(commentary));

        let result = fetcher(source).fetch_verse(3, 4, RECITER).await.unwrap();
        assert_eq!(result.text, text);
        assert_eq!(result.audio_url, audio);
        assert_eq!(result.commentary, commentary);
    }

    #[tokio::test]
    async fn test_sequential_lookups_in_order() {
        let source = Arc::new(fatiha_source());
        let fetcher = VerseFetcher::new(source.clone(), COMMENTARY_EDITION);
        fetcher.fetch_verse(1, 1, RECITER).await.unwrap();

        assert_eq!(
            source.calls(),
            vec![ayah_path(1, 1, RECITER), ayah_path(1, 1, COMMENTARY_EDITION)]
        );
    }

    #[tokio::test]
    async fn test_commentary_failure_discards_recitation() {
        let source = FakeSource::new()
            .with_json(
                &ayah_path(1, 1, RECITER),
                &recitation_body(FATIHA_OPENING, FATIHA_AUDIO, "x"),
            )
            .with_reply(&ayah_path(1, 1, COMMENTARY_EDITION), 404, &not_found_body());

        let fetcher = fetcher(source);
        let err = fetcher.fetch_verse(1, 1, RECITER).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { lookup: Lookup::Commentary, code: 404, .. }
        ));
        assert!(fetcher.fetch_verse_opt(1, 1, RECITER).await.is_none());
    }

    #[tokio::test]
    async fn test_recitation_failure_is_absent_even_if_commentary_ok() {
        let source = FakeSource::new()
            .with_timeout(&ayah_path(1, 1, RECITER))
            .with_json(&ayah_path(1, 1, COMMENTARY_EDITION), &commentary_body(FATIHA_COMMENTARY));

        let fetcher = fetcher(source);
        let err = fetcher.fetch_verse(1, 1, RECITER).await.unwrap_err();
        assert_eq!(err.lookup(), Lookup::Recitation);
        assert!(matches!(err, FetchError::Transport { .. }));
        assert!(fetcher.fetch_verse_opt(1, 1, RECITER).await.is_none());
    }

    #[tokio::test]
    async fn test_success_code_with_http_error_status_still_counts() {
        // Only the body code decides success
        let source = FakeSource::new()
            .with_reply(
                &ayah_path(1, 1, RECITER),
                500,
                &recitation_body(FATIHA_OPENING, FATIHA_AUDIO, "x"),
            )
            .with_json(&ayah_path(1, 1, COMMENTARY_EDITION), &commentary_body("c"));

        assert!(fetcher(source).fetch_verse(1, 1, RECITER).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_audio_field_is_malformed() {
        let body = r#"{"code":200,"data":{"text":"t","surah":{"name":"n"}}}"#;
        let source = FakeSource::new()
            .with_json(&ayah_path(1, 1, RECITER), body)
            .with_json(&ayah_path(1, 1, COMMENTARY_EDITION), &commentary_body("c"));

        let err = fetcher(source).fetch_verse(1, 1, RECITER).await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed { lookup: Lookup::Recitation, .. }));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let source = FakeSource::new().with_json(&ayah_path(1, 1, RECITER), "Service Unavailable");
        let err = fetcher(source).fetch_verse(1, 1, RECITER).await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_custom_commentary_edition_is_used() {
        let source = Arc::new(
            FakeSource::new()
                .with_json(&ayah_path(1, 1, RECITER), &recitation_body("t", "a", "n"))
                .with_json(&ayah_path(1, 1, "en.sahih"), &commentary_body("In the name of Allah")),
        );
        let fetcher = VerseFetcher::new(source.clone(), "en.sahih");
        let result = fetcher.fetch_verse(1, 1, RECITER).await.unwrap();
        assert_eq!(result.commentary, "In the name of Allah");
        assert_eq!(fetcher.commentary_edition(), "en.sahih");
    }
}
