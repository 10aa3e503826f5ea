//! Manuscript model and loading
//!
//! A manuscript is a book's front matter plus its acts, each holding
//! chapters in reading order. Manuscripts come from structured JSON books or
//! from plain text and Markdown files with optional YAML front matter.
//!
//! A text whose first line is `---` but has no closing `---` line is read as
//! prose, so a leading scene break does not need front matter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::chapters::split_into_acts;
use crate::config::Config;
use crate::directives::{self, Directive};
use crate::{QuireError, Result};

const FRONT_MATTER_DELIMITER: &str = "---";

/// Title page, dedication and other material that precedes chapter one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub subtitle: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub author: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dedication: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub epigraph: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub copyright: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub isbn: Option<String>,
  /// Any other keys the author keeps, e.g. `genre` or `series`
  #[serde(flatten)]
  pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl FrontMatter {
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default)]
  pub body: String,
}

impl Chapter {
  pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
    Self { title: Some(title.into()), body: body.into() }
  }

  /// Words in the body, not counting `quire ignore chapter` lines
  pub fn word_count(&self) -> usize {
    self
      .body
      .lines()
      .filter(|line| directives::parse_directive(line) != Some(Directive::Chapter))
      .flat_map(str::split_whitespace)
      .count()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Act {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default)]
  pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manuscript {
  #[serde(default, skip_serializing_if = "FrontMatter::is_empty")]
  pub front_matter: FrontMatter,
  #[serde(default)]
  pub acts: Vec<Act>,
}

impl Manuscript {
  /// Build a manuscript from text that may open with YAML front matter.
  ///
  /// Returns `Ok(None)` when the text carries a `quire ignore file` directive.
  pub fn from_text(content: &str, config: &Config) -> Result<Option<Self>> {
    let (front_matter, body) = split_front_matter(content)?;

    let Some(body) = directives::preprocess(body) else {
      return Ok(None);
    };

    let patterns = config.compiled_heading_patterns()?;
    Ok(Some(Self { front_matter, acts: split_into_acts(&body, &patterns) }))
  }

  /// Parse a structured JSON book, applying directives to each chapter body.
  ///
  /// Returns `Ok(None)` when any chapter carries a `quire ignore file` directive.
  pub fn from_json(content: &str) -> Result<Option<Self>> {
    let mut manuscript: Self = serde_json::from_str(content)?;

    for chapter in manuscript.acts.iter_mut().flat_map(|act| act.chapters.iter_mut()) {
      match directives::preprocess(&chapter.body) {
        Some(body) => chapter.body = body,
        None => return Ok(None),
      }
    }

    Ok(Some(manuscript))
  }

  /// Chapters across all acts, in reading order
  pub fn chapters(&self) -> impl Iterator<Item = &Chapter> {
    self.acts.iter().flat_map(|act| act.chapters.iter())
  }

  pub fn chapter_count(&self) -> usize {
    self.chapters().count()
  }

  pub fn word_count(&self) -> usize {
    self.chapters().map(Chapter::word_count).sum()
  }
}

/// Separate a leading `---` YAML block from the body
pub fn split_front_matter(content: &str) -> Result<(FrontMatter, &str)> {
  let mut lines = content.split_inclusive('\n');
  let opens_with_delimiter =
    lines.next().is_some_and(|first| first.trim_end() == FRONT_MATTER_DELIMITER);
  if !opens_with_delimiter {
    return Ok((FrontMatter::default(), content));
  }

  let yaml_start = content.find('\n').map_or(content.len(), |pos| pos + 1);
  let mut offset = yaml_start;
  for line in lines {
    if line.trim_end() == FRONT_MATTER_DELIMITER {
      let yaml = &content[yaml_start..offset];
      let body = &content[offset + line.len()..];
      return Ok((parse_front_matter(yaml)?, body));
    }
    offset += line.len();
  }

  tracing::debug!("no closing '---' line, reading the opening delimiter as prose");
  Ok((FrontMatter::default(), content))
}

fn parse_front_matter(yaml: &str) -> Result<FrontMatter> {
  if yaml.trim().is_empty() {
    return Ok(FrontMatter::default());
  }

  let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
  if !value.is_mapping() {
    return Err(QuireError::InvalidFrontMatter("expected 'key: value' pairs".to_string()));
  }
  Ok(serde_yaml::from_value(value)?)
}

/// Load a manuscript file; `-` reads standard input as text.
///
/// Returns `Ok(None)` for files marked `quire ignore file`.
pub fn load<P: AsRef<Path>>(path: P, config: &Config) -> Result<Option<Manuscript>> {
  let path = path.as_ref();

  if path == Path::new("-") {
    let mut content = String::new();
    std::io::stdin().read_to_string(&mut content)?;
    return Manuscript::from_text(&content, config);
  }

  if !path.exists() {
    return Err(QuireError::PathNotFound(path.to_path_buf()));
  }

  let content = std::fs::read_to_string(path)?;
  let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

  tracing::debug!("loading manuscript {} ({} bytes)", path.display(), content.len());

  if is_json {
    Manuscript::from_json(&content)
  } else {
    Manuscript::from_text(&content, config)
  }
}
