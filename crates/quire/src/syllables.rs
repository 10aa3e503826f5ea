//! Heuristic syllable estimation
//!
//! A coarse vowel-group counter. It misjudges silent letters and many
//! diphthongs, and that is accepted: the readability formulas were tuned
//! against rough counts like these, not against a pronouncing dictionary.

use regex::Regex;
use std::sync::LazyLock;

/// One trailing suffix that rarely adds a syllable: a consonant other than
/// `l`, a past-tense `ed`, or a consonant followed by a silent `e`.
const SILENT_SUFFIX_PATTERN: &str = r"(?:[^laeiouy]|ed|[^laeiouy]e)$";
const LEADING_Y_PATTERN: &str = r"^y";
const VOWEL_RUN_PATTERN: &str = r"[aeiouy]+";

static SILENT_SUFFIX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(SILENT_SUFFIX_PATTERN).expect("silent suffix pattern is valid"));
static LEADING_Y: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(LEADING_Y_PATTERN).expect("leading y pattern is valid"));
static VOWEL_RUN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(VOWEL_RUN_PATTERN).expect("vowel run pattern is valid"));

/// Estimate the number of syllables in a single word
pub fn count_syllables(word: &str) -> usize {
  let lowered = word.to_lowercase();
  let trimmed = SILENT_SUFFIX.replace(&lowered, "");
  let trimmed = LEADING_Y.replace(&trimmed, "");

  VOWEL_RUN.find_iter(&trimmed).count()
}

/// A word is complex when it carries more than two syllables
pub fn is_complex(syllables: usize) -> bool {
  syllables > 2
}
