//! Report rendering
//!
//! Turns analyses into a coloured table, compact one-line records, or JSON,
//! plus a terminal bar chart with one bar per metric.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use colored::*;
use serde::Serialize;

use crate::analysis::{ChapterAnalysis, ManuscriptAnalysis, Metric};
use crate::readability::{Scores, MAX_EASE, MAX_GRADE};
use crate::Result;

const TOTAL_WIDTH: usize = 80;
const TITLE_WIDTH: usize = 34;
const DEFAULT_CHART_WIDTH: usize = 40;
const CHART_LABEL_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Pretty,
  Json,
  Compact,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
  pub chart: bool,
  /// Width of the bar area; `None` sizes to the terminal
  pub chart_width: Option<usize>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
  generated_at: DateTime<Utc>,
  violations: usize,
  manuscripts: &'a [ManuscriptAnalysis],
}

/// Render all analyses in the requested format
pub fn render(
  analyses: &[ManuscriptAnalysis],
  format: OutputFormat,
  options: &RenderOptions,
) -> Result<String> {
  match format {
    OutputFormat::Pretty => Ok(render_pretty(analyses, options)),
    OutputFormat::Compact => Ok(render_compact(analyses)),
    OutputFormat::Json => render_json(analyses),
  }
}

pub fn render_json(analyses: &[ManuscriptAnalysis]) -> Result<String> {
  let report = JsonReport {
    generated_at: Utc::now(),
    violations: analyses.iter().map(ManuscriptAnalysis::violation_count).sum(),
    manuscripts: analyses,
  };
  Ok(serde_json::to_string_pretty(&report)?)
}

fn scores_fields(scores: &Scores) -> String {
  Metric::ALL
    .iter()
    .map(|metric| format!("{}={:.1}", metric.short_label(), metric.value(scores)))
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn render_compact(analyses: &[ManuscriptAnalysis]) -> String {
  let mut lines = Vec::new();

  for analysis in analyses {
    let path = analysis.path.display();
    if analysis.ignored {
      lines.push(format!("{path}: ignored"));
      continue;
    }

    for chapter in &analysis.chapters {
      let mut line = format!("{path}:{}:{}", chapter.index, chapter.display_title());
      if chapter.ignored {
        line.push_str(" ignored");
      } else {
        line.push(' ');
        line.push_str(&scores_fields(&chapter.scores));
      }
      for violation in &chapter.violations {
        line.push_str(&format!(" VIOLATION({violation})"));
      }
      lines.push(line);
    }

    lines.push(format!(
      "{path}:total words={} pages={} minutes={} {}",
      analysis.total_words,
      analysis.total_pages,
      analysis.reading_minutes,
      scores_fields(&analysis.overall)
    ));
  }

  lines.join("\n")
}

/// Shorten text to `max_width` characters, marking the cut with "..."
fn truncate(text: &str, max_width: usize) -> String {
  if text.chars().count() <= max_width {
    return text.to_string();
  }
  let kept: String = text.chars().take(max_width.saturating_sub(3)).collect();
  format!("{kept}...")
}

fn score_cell(chapter: &ChapterAnalysis, metric: Metric, width: usize) -> String {
  let value = metric.value(&chapter.scores);
  let cell = format!("{value:>width$.1}");

  if chapter.ignored {
    cell.dimmed().to_string()
  } else if chapter.violations.iter().any(|v| v.metric == metric) {
    cell.red().bold().to_string()
  } else {
    cell.green().to_string()
  }
}

fn render_chapter_row(chapter: &ChapterAnalysis) -> String {
  let title = truncate(&chapter.display_title(), TITLE_WIDTH);
  let dots = ".".repeat(TITLE_WIDTH.saturating_sub(title.chars().count()));
  let pages = format!("{}-{}", chapter.pages.start_page, chapter.pages.end_page);

  let mut row = format!(
    "{:>3} {}{} {:>6} {:>8} {} {} {} {}",
    chapter.index,
    title,
    dots.dimmed(),
    chapter.pages.words,
    pages,
    score_cell(chapter, Metric::FleschKincaid, 5),
    score_cell(chapter, Metric::FleschReadingEase, 6),
    score_cell(chapter, Metric::GunningFog, 5),
    score_cell(chapter, Metric::ColemanLiau, 5),
  );

  if chapter.ignored {
    row = row.dimmed().to_string();
  }
  row
}

fn render_header(analysis: &ManuscriptAnalysis) -> Vec<String> {
  let mut lines = vec![format!("{}", analysis.path.display().to_string().purple().bold())];

  let front = &analysis.front_matter;
  match (&front.title, &front.author) {
    (Some(title), Some(author)) => lines.push(format!("{} by {}", title.italic(), author)),
    (Some(title), None) => lines.push(title.italic().to_string()),
    (None, Some(author)) => lines.push(format!("by {author}")),
    (None, None) => {}
  }

  lines
}

fn render_manuscript(analysis: &ManuscriptAnalysis, options: &RenderOptions) -> String {
  let mut lines = render_header(analysis);

  if analysis.ignored {
    lines.push("(ignored)".dimmed().to_string());
    return lines.join("\n");
  }

  lines.push(format!(
    "{:>3} {:<title_width$} {:>6} {:>8} {:>5} {:>6} {:>5} {:>5}",
    "#",
    "CHAPTER",
    "WORDS",
    "PAGES",
    "FK",
    "FRE",
    "FOG",
    "CLI",
    title_width = TITLE_WIDTH
  ));
  lines.push("=".repeat(TOTAL_WIDTH));

  let mut current_act: Option<&str> = None;
  for chapter in &analysis.chapters {
    if chapter.act.is_some() && chapter.act.as_deref() != current_act {
      current_act = chapter.act.as_deref();
      lines.push(format!("  {}", current_act.unwrap_or_default().bold()));
    }
    lines.push(render_chapter_row(chapter));
    for violation in &chapter.violations {
      lines.push(format!("      {}", violation.to_string().red()));
    }
  }

  lines.push("-".repeat(TOTAL_WIDTH));
  lines.push(format!(
    "{} words, {} pages, about {} min reading time",
    analysis.total_words, analysis.total_pages, analysis.reading_minutes
  ));
  lines.push(format!("overall: {}", scores_fields(&analysis.overall)));

  if options.chart {
    lines.push(String::new());
    let width = options.chart_width.unwrap_or_else(terminal_chart_width);
    lines.push(render_chart(&analysis.overall, width));
  }

  lines.join("\n")
}

pub fn render_pretty(analyses: &[ManuscriptAnalysis], options: &RenderOptions) -> String {
  let mut sections: Vec<String> =
    analyses.iter().map(|analysis| render_manuscript(analysis, options)).collect();

  let violations: usize = analyses.iter().map(ManuscriptAnalysis::violation_count).sum();
  let summary = if violations == 0 {
    "No readability limits exceeded".green().to_string()
  } else {
    format!("{violations} readability limit(s) exceeded").red().bold().to_string()
  };
  sections.push(summary);

  sections.join("\n\n")
}

/// Place a metric on the shared 0-20 chart axis.
///
/// Reading ease runs 0-100, so it is divided by five to share the axis with
/// the grade-style indices.
pub fn chart_value(metric: Metric, scores: &Scores) -> f64 {
  let value = metric.value(scores);
  if metric.higher_is_easier() {
    value * MAX_GRADE / MAX_EASE
  } else {
    value
  }
}

fn bar(axis_value: f64, width: usize) -> String {
  let fraction = (axis_value / MAX_GRADE).clamp(0.0, 1.0);
  let filled = (fraction * width as f64).round() as usize;
  format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// One bar per metric; labels show the raw, unscaled value
pub fn render_chart(scores: &Scores, width: usize) -> String {
  Metric::ALL
    .iter()
    .map(|metric| {
      let bar = bar(chart_value(*metric, scores), width);
      format!(
        "{:<label_width$}{} {:.1}",
        metric.label(),
        bar.cyan(),
        metric.value(scores),
        label_width = CHART_LABEL_WIDTH
      )
    })
    .collect::<Vec<_>>()
    .join("\n")
}

fn terminal_chart_width() -> usize {
  let (_, columns) = console::Term::stdout().size();
  let available = (columns as usize).saturating_sub(CHART_LABEL_WIDTH + 8);
  if available == 0 {
    DEFAULT_CHART_WIDTH
  } else {
    available.min(DEFAULT_CHART_WIDTH)
  }
}
