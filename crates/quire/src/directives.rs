//! Quire ignore directive processing
//!
//! Authors keep notes, outlines and placeholder text inside their drafts.
//! Directive lines written in any comment style (`<!-- quire ignore start -->`,
//! `% quire ignore line`, `// quire ignore chapter`) keep that material away
//! from the scorer.

use regex::Regex;
use std::sync::LazyLock;

const IGNORE_DIRECTIVE_PATTERN: &str = r"quire\s+ignore\s+(file|chapter|start|end|line)\b";

static IGNORE_DIRECTIVE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(IGNORE_DIRECTIVE_PATTERN).expect("directive pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
  File,
  Chapter,
  Start,
  End,
  Line,
}

impl Directive {
  fn from_keyword(keyword: &str) -> Option<Self> {
    match keyword {
      "file" => Some(Self::File),
      "chapter" => Some(Self::Chapter),
      "start" => Some(Self::Start),
      "end" => Some(Self::End),
      "line" => Some(Self::Line),
      _ => None,
    }
  }
}

/// Find the directive on a line, if any
pub fn parse_directive(line: &str) -> Option<Directive> {
  IGNORE_DIRECTIVE
    .captures(line)
    .and_then(|caps| caps.get(1))
    .and_then(|keyword| Directive::from_keyword(keyword.as_str()))
}

/// Check if lines contain a "quire ignore file" directive
pub fn is_ignored_file(content: &str) -> bool {
  content.lines().any(|line| parse_directive(line) == Some(Directive::File))
}

/// Check if chapter text carries a "quire ignore chapter" directive
pub fn is_ignored_chapter(chapter_body: &str) -> bool {
  chapter_body.lines().any(|line| parse_directive(line) == Some(Directive::Chapter))
}

/// Remove a chapter directive line, leaving the prose
pub fn strip_chapter_directives(chapter_body: &str) -> String {
  chapter_body
    .lines()
    .filter(|line| parse_directive(line) != Some(Directive::Chapter))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Drop ignored regions and directive lines.
///
/// Returns `None` when the whole file is ignored. `chapter` directives are
/// kept in place so the chapter they belong to can be identified after
/// splitting.
pub fn preprocess(content: &str) -> Option<String> {
  if is_ignored_file(content) {
    return None;
  }

  let mut result_lines = Vec::new();
  let mut ignore_depth = 0usize;
  let mut skip_next_line = false;

  for line in content.lines() {
    let directive = parse_directive(line);

    // a skipped line never swallows a region boundary
    if skip_next_line {
      skip_next_line = false;
      if !matches!(directive, Some(Directive::Start | Directive::End)) {
        continue;
      }
    }

    match directive {
      Some(Directive::Start) => ignore_depth += 1,
      Some(Directive::End) => ignore_depth = ignore_depth.saturating_sub(1),
      Some(Directive::Line) if ignore_depth == 0 => skip_next_line = true,
      Some(Directive::Chapter) if ignore_depth == 0 => result_lines.push(line),
      Some(_) => {}
      None if ignore_depth == 0 => result_lines.push(line),
      None => {}
    }
  }

  Some(result_lines.join("\n"))
}
