//! Page and reading-time estimates
//!
//! Every chapter opens on a fresh page and fills at least one.

use serde::{Deserialize, Serialize};

use crate::config::PaginationSettings;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterPages {
  pub words: usize,
  pub pages: usize,
  pub start_page: usize,
  pub end_page: usize,
  pub reading_minutes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPagination {
  pub chapters: Vec<ChapterPages>,
  pub front_matter_pages: usize,
  pub total_words: usize,
  pub total_pages: usize,
  pub reading_minutes: usize,
}

/// Pages a chapter of `words` fills
pub fn page_count(words: usize, words_per_page: usize) -> usize {
  words.div_ceil(words_per_page.max(1)).max(1)
}

/// Minutes to read `words`, rounded up
pub fn reading_minutes(words: usize, words_per_minute: usize) -> usize {
  words.div_ceil(words_per_minute.max(1))
}

/// Lay chapters out one after another, each starting on a new page
pub fn paginate(chapter_words: &[usize], settings: &PaginationSettings) -> BookPagination {
  let mut chapters = Vec::with_capacity(chapter_words.len());
  let mut next_page = settings.front_matter_pages + 1;

  for &words in chapter_words {
    let pages = page_count(words, settings.words_per_page);
    chapters.push(ChapterPages {
      words,
      pages,
      start_page: next_page,
      end_page: next_page + pages - 1,
      reading_minutes: reading_minutes(words, settings.words_per_minute),
    });
    next_page += pages;
  }

  let total_words = chapter_words.iter().sum();
  BookPagination {
    total_pages: next_page - 1,
    front_matter_pages: settings.front_matter_pages,
    reading_minutes: reading_minutes(total_words, settings.words_per_minute),
    total_words,
    chapters,
  }
}
