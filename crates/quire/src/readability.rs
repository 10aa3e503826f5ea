//! Readability scoring
//!
//! Maps raw text to four classic readability indices. Scoring is a pure
//! function of its input: no state is kept between calls and every input,
//! including empty or punctuation-free text, yields a finite, clamped result.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::syllables::{count_syllables, is_complex};

const SENTENCE_TERMINATORS: &str = r"[.!?]+";

static SENTENCE_SPLIT: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(SENTENCE_TERMINATORS).expect("sentence pattern is valid"));

/// Upper clamp for the grade-style indices
pub const MAX_GRADE: f64 = 20.0;
/// Upper clamp for Flesch Reading Ease
pub const MAX_EASE: f64 = 100.0;

/// The four readability indices for a piece of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
  /// Estimated US school grade (Flesch-Kincaid), 0..=20
  pub flesch_kincaid: f64,
  /// Ease of reading, higher is easier (Flesch), 0..=100
  pub flesch_reading_ease: f64,
  /// Years of formal education for a first reading (Gunning Fog), 0..=20
  pub gunning_fog: f64,
  /// Grade estimate from letters and sentences (Coleman-Liau), 0..=20
  pub coleman_liau: f64,
}

impl Scores {
  pub fn zero() -> Self {
    Self::default()
  }

  pub fn is_zero(&self) -> bool {
    *self == Self::zero()
  }
}

/// Raw counts the formulas are built from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
  pub sentences: usize,
  pub words: usize,
  pub syllables: usize,
  pub complex_words: usize,
  pub letters: usize,
}

impl TextStats {
  /// Gather counts for a text
  pub fn from_text(text: &str) -> Self {
    if text.trim().is_empty() {
      return Self::default();
    }

    let words = split_words(text);
    let mut stats = Self { sentences: count_sentences(text), words: words.len(), ..Self::default() };

    for word in &words {
      let syllables = count_syllables(word);
      stats.syllables += syllables;
      if is_complex(syllables) {
        stats.complex_words += 1;
      }
      stats.letters += word.chars().count();
    }

    stats
  }

  /// Counts that cannot produce a meaningful ratio
  pub fn is_degenerate(&self) -> bool {
    self.sentences == 0 || self.words == 0
  }

  fn average_sentence_length(&self) -> f64 {
    self.words as f64 / self.sentences as f64
  }

  fn average_syllables_per_word(&self) -> f64 {
    self.syllables as f64 / self.words as f64
  }

  fn complex_word_ratio(&self) -> f64 {
    self.complex_words as f64 / self.words as f64
  }

  fn letters_per_hundred_words(&self) -> f64 {
    self.letters as f64 / self.words as f64 * 100.0
  }

  fn sentences_per_hundred_words(&self) -> f64 {
    self.sentences as f64 / self.words as f64 * 100.0
  }
}

/// Split text into sentence fragments on runs of `.`, `!` and `?`
pub fn split_sentences(text: &str) -> Vec<&str> {
  SENTENCE_SPLIT.split(text).map(str::trim).filter(|fragment| !fragment.is_empty()).collect()
}

/// Count sentences. Text without any terminator has no complete sentence.
pub fn count_sentences(text: &str) -> usize {
  if !SENTENCE_SPLIT.is_match(text) {
    return 0;
  }
  split_sentences(text).len()
}

/// Split text into words on whitespace
pub fn split_words(text: &str) -> Vec<&str> {
  text.split_whitespace().collect()
}

/// Score a text with all four indices
pub fn score(text: &str) -> Scores {
  scores_from_stats(&TextStats::from_text(text))
}

/// Apply the formulas to precomputed counts
pub fn scores_from_stats(stats: &TextStats) -> Scores {
  if stats.is_degenerate() {
    return Scores::zero();
  }

  let avg_sentence_length = stats.average_sentence_length();
  let avg_syllables = stats.average_syllables_per_word();

  let flesch_kincaid = 0.39 * avg_sentence_length + 11.8 * avg_syllables - 15.59;
  let flesch_reading_ease = 206.835 - 1.015 * avg_sentence_length - 84.6 * avg_syllables;
  let gunning_fog = 0.4 * (avg_sentence_length + 100.0 * stats.complex_word_ratio());
  let coleman_liau = 0.0588 * stats.letters_per_hundred_words()
    - 0.296 * stats.sentences_per_hundred_words()
    - 15.8;

  Scores {
    flesch_kincaid: round_tenth(clamp(flesch_kincaid, MAX_GRADE)),
    flesch_reading_ease: round_tenth(clamp(flesch_reading_ease, MAX_EASE)),
    gunning_fog: round_tenth(clamp(gunning_fog, MAX_GRADE)),
    coleman_liau: round_tenth(clamp(coleman_liau, MAX_GRADE)),
  }
}

fn clamp(value: f64, max: f64) -> f64 {
  value.clamp(0.0, max)
}

/// Round to one decimal place, ties away from zero
pub fn round_tenth(value: f64) -> f64 {
  (value * 10.0).round() / 10.0
}
