//! Non-interactive subcommands: print the chapter list or one verse

use anyhow::{bail, Result};

use crate::model::{clamp_verse, reciters, ChapterCatalog, QuranClient, VerseRequest, VerseResult};

pub fn format_chapter_list(catalog: &ChapterCatalog) -> String {
    catalog
        .chapters()
        .iter()
        .map(|chapter| {
            if chapter.english_name.is_empty() {
                chapter.label()
            } else {
                format!("{}  {}", chapter.label(), chapter.english_name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_verse(request: &VerseRequest, result: &VerseResult) -> String {
    format!(
        "{} ﴿{}﴾  [{}]\n\n{}\n\n♪ {}\n\nالتفسير الميسر:\n{}",
        result.chapter_name,
        request.reference(),
        request.reciter_id,
        result.text,
        result.audio_url,
        result.commentary,
    )
}

/// Accepts an edition id (`ar.husary`) or either menu label
pub fn resolve_reciter(value: Option<&str>, default_id: &str) -> Result<String> {
    let value = value.unwrap_or(default_id);
    if reciters::position_of(value).is_some() {
        return Ok(value.to_string());
    }
    match reciters::reciter_id(value) {
        Some(id) => Ok(id.to_string()),
        None => bail!(
            "unknown reciter '{}' (known: {})",
            value,
            reciters::known_ids().join(", ")
        ),
    }
}

/// Chapter given as a number, a full menu label (`"1. ... (7)"`) or an
/// English name (`al-faatiha`, case-insensitive)
pub fn resolve_chapter(catalog: &ChapterCatalog, value: &str) -> Option<u16> {
    let value = value.trim();
    if let Ok(number) = value.parse::<u16>() {
        return Some(number);
    }
    if let Some(number) = catalog.number_for_label(value) {
        return Some(number);
    }
    catalog
        .label_to_number()
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(value))
        .map(|(_, number)| *number)
        .or_else(|| {
            catalog
                .chapters()
                .iter()
                .find(|c| c.english_name.eq_ignore_ascii_case(value))
                .map(|c| c.number)
        })
}

/// Resolve chapter and verse against the catalog, clamping the verse number
pub fn build_request(catalog: &ChapterCatalog, chapter: &str, verse: u32, reciter_id: String) -> Result<VerseRequest> {
    if catalog.is_empty() {
        bail!("chapter list unavailable: check your internet connection");
    }
    let Some(chapter) = resolve_chapter(catalog, chapter) else {
        bail!("unknown chapter '{}'", chapter);
    };
    let Some(entry) = catalog.get(chapter) else {
        bail!("no chapter numbered {} (1-{})", chapter, catalog.len());
    };

    let verse_number = clamp_verse(verse, entry.verse_count);
    if u32::from(verse_number) != verse {
        tracing::info!(requested = verse, clamped = verse_number, "Verse number clamped");
    }
    Ok(VerseRequest::new(chapter, verse_number, reciter_id))
}

pub async fn run_chapters(client: &QuranClient) -> Result<()> {
    let catalog = client.chapters().await;
    if catalog.is_empty() {
        bail!("chapter list unavailable: check your internet connection");
    }
    println!("{}", format_chapter_list(&catalog));
    Ok(())
}

pub async fn run_verse(
    client: &QuranClient,
    chapter: &str,
    verse: u32,
    reciter: Option<&str>,
    default_reciter: &str,
) -> Result<()> {
    let reciter_id = resolve_reciter(reciter, default_reciter)?;
    let catalog = client.chapters().await;
    let request = build_request(&catalog, chapter, verse, reciter_id)?;

    match client.verse_opt(&request).await {
        Some(result) => {
            println!("{}", format_verse(&request, &result));
            Ok(())
        }
        None => bail!("error fetching data, please try again"),
    }
}
