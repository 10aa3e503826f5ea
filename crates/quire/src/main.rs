use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use quire::analysis::{analyze_path, collect_files};
use quire::config::Config;
use quire::report::{render, OutputFormat, RenderOptions};

const EXIT_VIOLATIONS: i32 = 1;
const EXIT_ERROR: i32 = 2;

/// Quire - manuscript readability scoring
#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Score manuscript chapters for readability and estimate their page counts")]
#[command(version)]
struct Cli {
  /// Manuscript files or directories to analyze ("-" reads stdin)
  #[arg(value_name = "PATH", required = true)]
  paths: Vec<PathBuf>,

  /// Output format
  #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
  format: OutputFormat,

  /// Configuration file path
  #[arg(short, long, env = "QUIRE_CONFIG")]
  config: Option<PathBuf>,

  /// Show a bar chart of the overall scores
  #[arg(long)]
  chart: bool,

  /// Override the configured words per page
  #[arg(long)]
  words_per_page: Option<usize>,

  /// Override the configured maximum Flesch-Kincaid grade
  #[arg(long)]
  max_grade: Option<f64>,

  /// Exit successfully even when readability limits are exceeded
  #[arg(long)]
  no_fail: bool,

  /// Disable coloured output
  #[arg(long)]
  no_color: bool,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

fn init_logging(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if verbose {
      EnvFilter::new("quire=debug,warn")
    } else {
      EnvFilter::new("warn")
    }
  });

  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
}

fn load_config(cli: &Cli) -> Result<Config> {
  let mut config = match &cli.config {
    Some(path) => Config::load_from_file(path)
      .with_context(|| format!("failed to load config {}", path.display()))?,
    None => Config::load().context("failed to load config")?,
  };

  if let Some(words_per_page) = cli.words_per_page {
    config.pagination.words_per_page = words_per_page;
  }
  if let Some(max_grade) = cli.max_grade {
    config.thresholds.max_grade_level = max_grade;
  }

  config.validate().context("invalid settings")?;
  Ok(config)
}

/// Analyze, print, and report whether any limit was exceeded
fn run(cli: &Cli) -> Result<bool> {
  let config = load_config(cli)?;
  let files = collect_files(&cli.paths, &config)?;

  if files.is_empty() {
    tracing::warn!("no manuscript files found");
  }

  let mut analyses = Vec::with_capacity(files.len());
  for file in &files {
    let analysis =
      analyze_path(file, &config).with_context(|| format!("failed to analyze {}", file.display()))?;
    analyses.push(analysis);
  }

  let options = RenderOptions { chart: cli.chart, chart_width: None };
  println!("{}", render(&analyses, cli.format, &options)?);

  Ok(analyses.iter().any(|analysis| analysis.has_violations()))
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  if cli.no_color {
    colored::control::set_override(false);
  }

  match run(&cli) {
    Ok(true) if !cli.no_fail => process::exit(EXIT_VIOLATIONS),
    Ok(_) => {}
    Err(err) => {
      eprintln!("error: {err:#}");
      process::exit(EXIT_ERROR);
    }
  }
}
