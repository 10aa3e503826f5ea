//! Quire - manuscript readability scoring
//!
//! Scores chapters and whole books with Flesch-Kincaid, Flesch Reading Ease,
//! Gunning Fog and Coleman-Liau, and works out how many pages each chapter
//! fills.

pub mod analysis;
pub mod chapters;
pub mod config;
pub mod directives;
pub mod manuscript;
pub mod pagination;
pub mod readability;
pub mod report;
pub mod syllables;

use std::path::PathBuf;
use thiserror::Error;

pub use analysis::{analyze_manuscript, analyze_path, ChapterAnalysis, ManuscriptAnalysis};
pub use config::Config;
pub use manuscript::{Act, Chapter, FrontMatter, Manuscript};
pub use readability::{score, Scores, TextStats};

#[derive(Error, Debug)]
pub enum QuireError {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("YAML front matter error: {0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("Path does not exist: {}", .0.display())]
  PathNotFound(PathBuf),

  #[error("Invalid front matter: {0}")]
  InvalidFrontMatter(String),

  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("Invalid heading pattern '{pattern}': {source}")]
  InvalidPattern {
    pattern: String,
    #[source]
    source: regex::Error,
  },
}

pub type Result<T> = std::result::Result<T, QuireError>;
