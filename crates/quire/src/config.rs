//! Configuration management for Quire
//!
//! Handles loading, validating, and saving readability thresholds,
//! pagination settings and chapter heading patterns.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{QuireError, Result};

const LOCAL_CONFIG_PATHS: [&str; 3] = [".quire.json", "quire.json", ".quire/config.json"];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
  /// Readability limits a chapter is checked against
  #[serde(default)]
  pub thresholds: ReadabilityThresholds,
  /// Page and reading-speed figures
  #[serde(default)]
  pub pagination: PaginationSettings,
  /// Regexes for lines that open a new chapter
  #[serde(default = "default_heading_patterns")]
  pub heading_patterns: Vec<String>,
  /// File extensions picked up when walking a directory
  #[serde(default = "default_extensions")]
  pub extensions: Vec<String>,
}

/// Readability limits; a chapter beyond any of them is reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityThresholds {
  /// Highest acceptable Flesch-Kincaid grade
  #[serde(default = "default_max_grade_level")]
  pub max_grade_level: f64,
  /// Lowest acceptable Flesch Reading Ease
  #[serde(default = "default_min_reading_ease")]
  pub min_reading_ease: f64,
  /// Highest acceptable Gunning Fog index
  #[serde(default = "default_max_fog_index")]
  pub max_fog_index: f64,
  /// Highest acceptable Coleman-Liau index
  #[serde(default = "default_max_coleman_liau")]
  pub max_coleman_liau: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationSettings {
  #[serde(default = "default_words_per_page")]
  pub words_per_page: usize,
  #[serde(default = "default_words_per_minute")]
  pub words_per_minute: usize,
  /// Pages taken by title, copyright and dedication before chapter one
  #[serde(default)]
  pub front_matter_pages: usize,
}

// Default value functions
fn default_max_grade_level() -> f64 {
  12.0
}
fn default_min_reading_ease() -> f64 {
  30.0
}
fn default_max_fog_index() -> f64 {
  17.0
}
fn default_max_coleman_liau() -> f64 {
  14.0
}
fn default_words_per_page() -> usize {
  250
}
fn default_words_per_minute() -> usize {
  230
}
fn default_heading_patterns() -> Vec<String> {
  vec![r"^#{1,3}\s+\S".to_string(), r"(?i)^chapter\s+\S+".to_string()]
}
fn default_extensions() -> Vec<String> {
  vec!["txt".to_string(), "md".to_string(), "markdown".to_string(), "json".to_string()]
}

impl Default for ReadabilityThresholds {
  fn default() -> Self {
    Self {
      max_grade_level: default_max_grade_level(),
      min_reading_ease: default_min_reading_ease(),
      max_fog_index: default_max_fog_index(),
      max_coleman_liau: default_max_coleman_liau(),
    }
  }
}

impl Default for PaginationSettings {
  fn default() -> Self {
    Self {
      words_per_page: default_words_per_page(),
      words_per_minute: default_words_per_minute(),
      front_matter_pages: 0,
    }
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      thresholds: ReadabilityThresholds::default(),
      pagination: PaginationSettings::default(),
      heading_patterns: default_heading_patterns(),
      extensions: default_extensions(),
    }
  }
}

impl Config {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      return Err(QuireError::PathNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;

    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
  }

  /// Load configuration from the current directory, the user config
  /// directory, or defaults
  pub fn load() -> Result<Self> {
    for path in LOCAL_CONFIG_PATHS {
      if Path::new(path).exists() {
        return Self::load_from_file(path);
      }
    }

    if let Some(user_path) = user_config_path() {
      if user_path.exists() {
        return Self::load_from_file(user_path);
      }
    }

    tracing::debug!("no config file found, using defaults");
    Ok(Config::default())
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(self)?;
    std::fs::write(path, content)?;
    Ok(())
  }

  /// Reject settings that would make pagination or splitting meaningless
  pub fn validate(&self) -> Result<()> {
    if self.pagination.words_per_page == 0 {
      return Err(QuireError::InvalidConfig("words_per_page must be greater than zero".to_string()));
    }
    if self.pagination.words_per_minute == 0 {
      return Err(QuireError::InvalidConfig(
        "words_per_minute must be greater than zero".to_string(),
      ));
    }
    self.compiled_heading_patterns()?;
    Ok(())
  }

  /// Compile the heading patterns
  pub fn compiled_heading_patterns(&self) -> Result<Vec<Regex>> {
    self
      .heading_patterns
      .iter()
      .map(|pattern| {
        Regex::new(pattern)
          .map_err(|source| QuireError::InvalidPattern { pattern: pattern.clone(), source })
      })
      .collect()
  }

  /// Check whether a file is a manuscript by extension
  pub fn is_manuscript_file(&self, path: &Path) -> bool {
    path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
  }
}

/// Per-user config location, e.g. `~/.config/quire/config.json`
pub fn user_config_path() -> Option<PathBuf> {
  dirs::config_dir().map(|dir| dir.join("quire").join("config.json"))
}
