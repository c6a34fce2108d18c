//! Selection form state: reciter, chapter and a bounded verse number

use super::catalog::{Chapter, ChapterCatalog};
use super::reciters::{self, Reciter, RECITERS};
use super::verse::VerseRequest;

/// Longest digit sequence accepted for a verse number
const MAX_VERSE_DIGITS: usize = 3;

/// Clamp a typed or stepped verse number into `[1, limit]`
pub fn clamp_verse(value: u32, limit: u16) -> u16 {
    value.clamp(1, u32::from(limit.max(1))) as u16
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerseForm {
    pub reciter_selected: usize,
    pub chapter_selected: usize,
    pub verse_number: u16,
    /// Digits typed since the verse field was last stepped or left
    pub verse_input: String,
}

impl Default for VerseForm {
    fn default() -> Self {
        Self {
            reciter_selected: 0,
            chapter_selected: 0,
            verse_number: 1,
            verse_input: String::new(),
        }
    }
}

impl VerseForm {
    pub fn with_reciter(reciter_id: &str) -> Self {
        Self {
            reciter_selected: reciters::position_of(reciter_id).unwrap_or(0),
            ..Self::default()
        }
    }

    pub fn reciter(&self) -> &'static Reciter {
        &RECITERS[self.reciter_selected.min(RECITERS.len() - 1)]
    }

    pub fn next_reciter(&mut self) {
        if self.reciter_selected < RECITERS.len() - 1 {
            self.reciter_selected += 1;
        }
    }

    pub fn prev_reciter(&mut self) {
        self.reciter_selected = self.reciter_selected.saturating_sub(1);
    }

    pub fn selected_chapter<'a>(&self, catalog: &'a ChapterCatalog) -> Option<&'a Chapter> {
        catalog.chapters().get(self.chapter_selected)
    }

    pub fn verse_limit(&self, catalog: &ChapterCatalog) -> u16 {
        match self.selected_chapter(catalog) {
            Some(chapter) => chapter.verse_count,
            None => catalog.verse_limit(0),
        }
    }

    /// Select a chapter by catalog index and re-clamp the verse number
    pub fn select_chapter(&mut self, index: usize, catalog: &ChapterCatalog) {
        if catalog.is_empty() {
            self.chapter_selected = 0;
            return;
        }
        self.chapter_selected = index.min(catalog.len() - 1);
        self.verse_input.clear();
        self.clamp_to(catalog);
    }

    pub fn next_chapter(&mut self, catalog: &ChapterCatalog) {
        self.select_chapter(self.chapter_selected + 1, catalog);
    }

    pub fn prev_chapter(&mut self, catalog: &ChapterCatalog) {
        self.select_chapter(self.chapter_selected.saturating_sub(1), catalog);
    }

    pub fn jump_chapters(&mut self, delta: isize, catalog: &ChapterCatalog) {
        let index = self.chapter_selected.saturating_add_signed(delta);
        self.select_chapter(index, catalog);
    }

    pub fn set_verse(&mut self, value: u32, catalog: &ChapterCatalog) {
        self.verse_number = clamp_verse(value, self.verse_limit(catalog));
    }

    pub fn increment_verse(&mut self, catalog: &ChapterCatalog) {
        self.verse_input.clear();
        self.set_verse(u32::from(self.verse_number) + 1, catalog);
    }

    pub fn decrement_verse(&mut self, catalog: &ChapterCatalog) {
        self.verse_input.clear();
        self.set_verse(u32::from(self.verse_number).saturating_sub(1), catalog);
    }

    /// Append a typed digit; the resulting number is clamped immediately and
    /// a clamped value starts a fresh buffer for the next digit
    pub fn push_digit(&mut self, digit: char, catalog: &ChapterCatalog) {
        if !digit.is_ascii_digit() {
            return;
        }
        if self.verse_input.len() >= MAX_VERSE_DIGITS {
            self.verse_input.clear();
        }
        self.verse_input.push(digit);

        let typed: u32 = self.verse_input.parse().unwrap_or(1);
        self.set_verse(typed, catalog);
        if u32::from(self.verse_number) != typed {
            self.verse_input.clear();
        }
    }

    pub fn pop_digit(&mut self, catalog: &ChapterCatalog) {
        if self.verse_input.is_empty() {
            self.verse_input = self.verse_number.to_string();
        }
        self.verse_input.pop();

        let typed: u32 = self.verse_input.parse().unwrap_or(1);
        self.set_verse(typed, catalog);
    }

    pub fn finish_verse_input(&mut self) {
        self.verse_input.clear();
    }

    /// Re-apply the bounds of the currently selected chapter
    pub fn clamp_to(&mut self, catalog: &ChapterCatalog) {
        if !catalog.is_empty() && self.chapter_selected >= catalog.len() {
            self.chapter_selected = catalog.len() - 1;
        }
        self.set_verse(u32::from(self.verse_number), catalog);
    }

    /// The request for the current selection; `None` without a catalog
    pub fn request(&self, catalog: &ChapterCatalog) -> Option<VerseRequest> {
        let chapter = self.selected_chapter(catalog)?;
        Some(VerseRequest::new(
            chapter.number,
            clamp_verse(u32::from(self.verse_number), chapter.verse_count),
            self.reciter().id,
        ))
    }
}
