//! Chapter splitting
//!
//! Splits a flat manuscript into acts and chapters at heading lines.

use regex::Regex;
use std::sync::LazyLock;

use crate::manuscript::{Act, Chapter};

/// A level-one Markdown heading starting with "Act" opens a new act
const ACT_HEADING_PATTERN: &str = r"(?i)^#\s+act\b";

static ACT_HEADING: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(ACT_HEADING_PATTERN).expect("act heading pattern is valid"));

fn is_heading(line: &str, patterns: &[Regex]) -> bool {
  patterns.iter().any(|pattern| pattern.is_match(line))
}

fn is_act_heading(line: &str) -> bool {
  ACT_HEADING.is_match(line)
}

/// Heading text without Markdown markers
pub fn heading_title(line: &str) -> String {
  line.trim().trim_start_matches('#').trim().to_string()
}

fn push_chapter(chapters: &mut Vec<Chapter>, title: Option<String>, lines: &mut Vec<&str>) {
  let body = lines.join("\n").trim().to_string();
  lines.clear();

  // Untitled leading text only counts when it holds prose
  if title.is_none() && body.is_empty() {
    return;
  }
  chapters.push(Chapter { title, body });
}

fn push_act(acts: &mut Vec<Act>, title: Option<String>, chapters: &mut Vec<Chapter>) {
  if title.is_none() && chapters.is_empty() {
    return;
  }
  acts.push(Act { title, chapters: std::mem::take(chapters) });
}

/// Split content into acts of chapters.
///
/// Text before the first heading becomes an untitled chapter when it is
/// not blank; a text with no headings at all is a single untitled chapter.
pub fn split_into_acts(content: &str, heading_patterns: &[Regex]) -> Vec<Act> {
  let mut acts = Vec::new();
  let mut act_title: Option<String> = None;
  let mut chapters = Vec::new();
  let mut chapter_title: Option<String> = None;
  let mut lines: Vec<&str> = Vec::new();

  for line in content.lines() {
    if is_act_heading(line) {
      push_chapter(&mut chapters, chapter_title.take(), &mut lines);
      push_act(&mut acts, act_title.take(), &mut chapters);
      act_title = Some(heading_title(line));
    } else if is_heading(line, heading_patterns) {
      push_chapter(&mut chapters, chapter_title.take(), &mut lines);
      chapter_title = Some(heading_title(line));
    } else {
      lines.push(line);
    }
  }

  push_chapter(&mut chapters, chapter_title.take(), &mut lines);
  push_act(&mut acts, act_title.take(), &mut chapters);

  acts
}

/// Split content into chapters, ignoring act structure
pub fn split_into_chapters(content: &str, heading_patterns: &[Regex]) -> Vec<Chapter> {
  split_into_acts(content, heading_patterns).into_iter().flat_map(|act| act.chapters).collect()
}
