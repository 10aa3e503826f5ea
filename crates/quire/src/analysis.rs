//! Manuscript analysis
//!
//! Runs the readability scorer over every chapter of a manuscript, lays the
//! chapters out on pages and flags chapters that break the configured limits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{Config, ReadabilityThresholds};
use crate::directives;
use crate::manuscript::{self, FrontMatter, Manuscript};
use crate::pagination::{paginate, ChapterPages};
use crate::readability::{scores_from_stats, Scores, TextStats};
use crate::{QuireError, Result};

/// The four indices, for labelling and threshold checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
  FleschKincaid,
  FleschReadingEase,
  GunningFog,
  ColemanLiau,
}

impl Metric {
  pub const ALL: [Metric; 4] =
    [Metric::FleschKincaid, Metric::FleschReadingEase, Metric::GunningFog, Metric::ColemanLiau];

  pub fn label(&self) -> &'static str {
    match self {
      Metric::FleschKincaid => "Flesch-Kincaid",
      Metric::FleschReadingEase => "Reading Ease",
      Metric::GunningFog => "Gunning Fog",
      Metric::ColemanLiau => "Coleman-Liau",
    }
  }

  pub fn short_label(&self) -> &'static str {
    match self {
      Metric::FleschKincaid => "fk",
      Metric::FleschReadingEase => "fre",
      Metric::GunningFog => "fog",
      Metric::ColemanLiau => "cli",
    }
  }

  pub fn value(&self, scores: &Scores) -> f64 {
    match self {
      Metric::FleschKincaid => scores.flesch_kincaid,
      Metric::FleschReadingEase => scores.flesch_reading_ease,
      Metric::GunningFog => scores.gunning_fog,
      Metric::ColemanLiau => scores.coleman_liau,
    }
  }

  /// Reading ease improves upwards, the grade indices downwards
  pub fn higher_is_easier(&self) -> bool {
    matches!(self, Metric::FleschReadingEase)
  }

  fn limit(&self, thresholds: &ReadabilityThresholds) -> f64 {
    match self {
      Metric::FleschKincaid => thresholds.max_grade_level,
      Metric::FleschReadingEase => thresholds.min_reading_ease,
      Metric::GunningFog => thresholds.max_fog_index,
      Metric::ColemanLiau => thresholds.max_coleman_liau,
    }
  }
}

impl fmt::Display for Metric {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// A score on the wrong side of its configured limit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Violation {
  pub metric: Metric,
  pub value: f64,
  pub limit: f64,
}

impl fmt::Display for Violation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let relation = if self.metric.higher_is_easier() { "below" } else { "above" };
    write!(f, "{} {:.1} is {} {:.1}", self.metric, self.value, relation, self.limit)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterAnalysis {
  /// 1-based position in reading order
  pub index: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub act: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  pub stats: TextStats,
  pub scores: Scores,
  pub pages: ChapterPages,
  pub ignored: bool,
  pub violations: Vec<Violation>,
}

impl ChapterAnalysis {
  pub fn display_title(&self) -> String {
    self.title.clone().unwrap_or_else(|| format!("Chapter {}", self.index))
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManuscriptAnalysis {
  pub path: PathBuf,
  #[serde(default, skip_serializing_if = "FrontMatter::is_empty")]
  pub front_matter: FrontMatter,
  pub ignored: bool,
  pub chapters: Vec<ChapterAnalysis>,
  pub overall_stats: TextStats,
  pub overall: Scores,
  pub front_matter_pages: usize,
  pub total_words: usize,
  pub total_pages: usize,
  pub reading_minutes: usize,
}

impl ManuscriptAnalysis {
  fn ignored(path: &Path) -> Self {
    Self {
      path: path.to_path_buf(),
      front_matter: FrontMatter::default(),
      ignored: true,
      chapters: Vec::new(),
      overall_stats: TextStats::default(),
      overall: Scores::zero(),
      front_matter_pages: 0,
      total_words: 0,
      total_pages: 0,
      reading_minutes: 0,
    }
  }

  pub fn violation_count(&self) -> usize {
    self.chapters.iter().map(|chapter| chapter.violations.len()).sum()
  }

  pub fn has_violations(&self) -> bool {
    self.violation_count() > 0
  }
}

/// Compare scores with the configured limits. Empty text never violates.
pub fn check_violations(scores: &Scores, thresholds: &ReadabilityThresholds) -> Vec<Violation> {
  if scores.is_zero() {
    return Vec::new();
  }

  Metric::ALL
    .iter()
    .filter_map(|metric| {
      let value = metric.value(scores);
      let limit = metric.limit(thresholds);
      let broken = if metric.higher_is_easier() { value < limit } else { value > limit };
      broken.then_some(Violation { metric: *metric, value, limit })
    })
    .collect()
}

/// Score and paginate every chapter of a manuscript
pub fn analyze_manuscript(path: &Path, manuscript: &Manuscript, config: &Config) -> ManuscriptAnalysis {
  let word_counts: Vec<usize> = manuscript.chapters().map(|chapter| chapter.word_count()).collect();
  let book = paginate(&word_counts, &config.pagination);

  let mut chapters = Vec::with_capacity(word_counts.len());
  let mut scored_bodies = Vec::new();

  let chapter_entries =
    manuscript.acts.iter().flat_map(|act| act.chapters.iter().map(move |chapter| (act, chapter)));

  for (position, ((act, chapter), pages)) in chapter_entries.zip(book.chapters.iter()).enumerate() {
    let ignored = directives::is_ignored_chapter(&chapter.body);
    let (stats, scores, violations) = if ignored {
      (TextStats::default(), Scores::zero(), Vec::new())
    } else {
      let body = directives::strip_chapter_directives(&chapter.body);
      let stats = TextStats::from_text(&body);
      let scores = scores_from_stats(&stats);
      scored_bodies.push(body);
      (stats, scores, check_violations(&scores, &config.thresholds))
    };

    tracing::debug!(
      "chapter {} scored fk={} fre={} fog={} cli={}",
      position + 1,
      scores.flesch_kincaid,
      scores.flesch_reading_ease,
      scores.gunning_fog,
      scores.coleman_liau
    );

    chapters.push(ChapterAnalysis {
      index: position + 1,
      act: act.title.clone(),
      title: chapter.title.clone(),
      stats,
      scores,
      pages: *pages,
      ignored,
      violations,
    });
  }

  let overall_stats = TextStats::from_text(&scored_bodies.join("\n\n"));

  ManuscriptAnalysis {
    path: path.to_path_buf(),
    front_matter: manuscript.front_matter.clone(),
    ignored: false,
    chapters,
    overall: scores_from_stats(&overall_stats),
    overall_stats,
    front_matter_pages: book.front_matter_pages,
    total_words: book.total_words,
    total_pages: book.total_pages,
    reading_minutes: book.reading_minutes,
  }
}

/// Load and analyze a single manuscript file (`-` for standard input)
pub fn analyze_path<P: AsRef<Path>>(path: P, config: &Config) -> Result<ManuscriptAnalysis> {
  let path = path.as_ref();

  match manuscript::load(path, config)? {
    Some(manuscript) => Ok(analyze_manuscript(path, &manuscript, config)),
    None => {
      tracing::info!("{} is marked 'quire ignore file', skipping", path.display());
      Ok(ManuscriptAnalysis::ignored(path))
    }
  }
}

/// Expand the given paths into manuscript files, walking directories
pub fn collect_files(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
  let mut files = Vec::new();

  for path in paths {
    if path == Path::new("-") {
      files.push(path.clone());
      continue;
    }

    if !path.exists() {
      return Err(QuireError::PathNotFound(path.clone()));
    }

    if path.is_file() {
      files.push(path.clone());
    } else if path.is_dir() {
      let mut found: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && config.is_manuscript_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
      found.sort();
      files.extend(found);
    }
  }

  Ok(files)
}
