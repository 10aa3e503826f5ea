use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;

const EASY_CHAPTER: &str = "The cat sat on the mat. It was happy.";
const HARD_CHAPTER: &str = "Notwithstanding considerable institutional heterogeneity, organizational \
  interdependencies systematically complicate intergovernmental accountability mechanisms.";

/// Helper to create a Command for the `quire` binary with an isolated config.
fn quire_cmd(temp: &assert_fs::TempDir) -> Command {
  let config = temp.child("quire-test-config.json");
  if !config.path().exists() {
    config.write_str("{}").unwrap();
  }

  let mut cmd = Command::cargo_bin("quire").expect("binary exists");
  cmd.current_dir(temp.path());
  cmd.env_remove("RUST_LOG");
  cmd.arg("--no-color").arg("--config").arg(config.path());
  cmd
}

#[test]
fn test_easy_manuscript_passes() {
  let temp = assert_fs::TempDir::new().unwrap();
  let draft = temp.child("draft.md");
  draft.write_str(&format!("---\ntitle: Small Things\n---\n# Morning\n{EASY_CHAPTER}\n")).unwrap();

  quire_cmd(&temp)
    .arg(draft.path())
    .assert()
    .success()
    .stdout(contains("Morning").and(contains("Small Things")).and(contains("No readability limits exceeded")));

  temp.close().unwrap();
}

#[test]
fn test_hard_manuscript_fails_with_violations() {
  let temp = assert_fs::TempDir::new().unwrap();
  let draft = temp.child("draft.md");
  draft.write_str(&format!("# Committee\n{HARD_CHAPTER}\n")).unwrap();

  quire_cmd(&temp)
    .arg(draft.path())
    .assert()
    .code(1)
    .stdout(contains("Flesch-Kincaid 20.0 is above 12.0"));

  quire_cmd(&temp).arg("--no-fail").arg(draft.path()).assert().success();

  temp.close().unwrap();
}

#[test]
fn test_max_grade_override() {
  let temp = assert_fs::TempDir::new().unwrap();
  let draft = temp.child("draft.txt");
  draft
    .write_str("The river ran quietly beneath the old stone bridge while the children watched it.")
    .unwrap();

  quire_cmd(&temp).args(["--max-grade", "0.5", "--format", "compact"]).arg(draft.path()).assert().code(1).stdout(
    contains("VIOLATION(Flesch-Kincaid"),
  );

  temp.close().unwrap();
}

#[test]
fn test_compact_format() {
  let temp = assert_fs::TempDir::new().unwrap();
  let draft = temp.child("draft.md");
  draft.write_str(&format!("# One\n{EASY_CHAPTER}\n# Two\n{EASY_CHAPTER}\n")).unwrap();

  quire_cmd(&temp)
    .args(["--format", "compact"])
    .arg(draft.path())
    .assert()
    .success()
    .stdout(contains(":1:One fk=0.0 fre=100.0 fog=1.8 cli=0.0").and(contains(":2:Two")).and(contains(
      "total words=18 pages=2",
    )));

  temp.close().unwrap();
}

#[test]
fn test_json_format() {
  let temp = assert_fs::TempDir::new().unwrap();
  let book = temp.child("book.json");
  book
    .write_str(&format!(
      r#"{{ "front_matter": {{ "author": "R. Reed" }},
           "acts": [ {{ "title": "Act I", "chapters": [ {{ "title": "Start", "body": "{EASY_CHAPTER}" }} ] }} ] }}"#
    ))
    .unwrap();

  let output = quire_cmd(&temp).args(["--format", "json"]).arg(book.path()).output().unwrap();
  assert!(output.status.success());

  let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let chapter = &value["manuscripts"][0]["chapters"][0];
  assert_eq!(chapter["title"], "Start");
  assert_eq!(chapter["act"], "Act I");
  assert_eq!(chapter["scores"]["flesch_reading_ease"], serde_json::json!(100.0));
  assert_eq!(value["manuscripts"][0]["front_matter"]["author"], "R. Reed");
  assert_eq!(value["violations"], serde_json::json!(0));

  temp.close().unwrap();
}

#[test]
fn test_json_chapter_ignore_region_is_not_scored() {
  let temp = assert_fs::TempDir::new().unwrap();
  let book = temp.child("book.json");
  book
    .write_str(&format!(
      r#"{{ "acts": [ {{ "chapters": [ {{ "title": "Start",
           "body": "{EASY_CHAPTER}\n<!-- quire ignore start -->\n{HARD_CHAPTER}\n<!-- quire ignore end -->" }} ] }} ] }}"#
    ))
    .unwrap();

  quire_cmd(&temp)
    .args(["--format", "compact"])
    .arg(book.path())
    .assert()
    .success()
    .stdout(contains(":1:Start fk=0.0 fre=100.0").and(contains("total words=9")).and(contains("VIOLATION").not()));

  temp.close().unwrap();
}

#[test]
fn test_leading_scene_break_reads_as_prose() {
  let temp = assert_fs::TempDir::new().unwrap();
  let draft = temp.child("draft.txt");
  draft.write_str(&format!("---\n{EASY_CHAPTER}\n")).unwrap();

  quire_cmd(&temp).args(["--format", "compact"]).arg(draft.path()).assert().success().stdout(contains(
    "total words=10",
  ));

  temp.close().unwrap();
}

#[test]
fn test_directory_input_walks_manuscripts() {
  let temp = assert_fs::TempDir::new().unwrap();
  temp.child("book").create_dir_all().unwrap();
  temp.child("book/01-start.md").write_str(&format!("# Start\n{EASY_CHAPTER}")).unwrap();
  temp.child("book/02-end.md").write_str(&format!("# End\n{EASY_CHAPTER}")).unwrap();
  temp.child("book/cover.png").write_str("binary-ish").unwrap();

  quire_cmd(&temp)
    .args(["--format", "compact", "book"])
    .assert()
    .success()
    .stdout(contains("01-start.md:1:Start").and(contains("02-end.md:1:End")).and(contains("cover.png").not()));

  temp.close().unwrap();
}

#[test]
fn test_stdin_input() {
  let temp = assert_fs::TempDir::new().unwrap();

  quire_cmd(&temp)
    .args(["--format", "compact", "-"])
    .write_stdin(EASY_CHAPTER)
    .assert()
    .success()
    .stdout(contains("-:1:Chapter 1 fk=0.0"));

  temp.close().unwrap();
}

#[test]
fn test_ignored_file_is_reported() {
  let temp = assert_fs::TempDir::new().unwrap();
  let notes = temp.child("notes.md");
  notes.write_str(&format!("<!-- quire ignore file -->\n{HARD_CHAPTER}")).unwrap();

  quire_cmd(&temp)
    .args(["--format", "compact"])
    .arg(notes.path())
    .assert()
    .success()
    .stdout(contains("notes.md: ignored"));

  temp.close().unwrap();
}

#[test]
fn test_chart_output() {
  let temp = assert_fs::TempDir::new().unwrap();
  let draft = temp.child("draft.md");
  draft.write_str(EASY_CHAPTER).unwrap();

  quire_cmd(&temp)
    .arg("--chart")
    .arg(draft.path())
    .assert()
    .success()
    .stdout(contains("Reading Ease").and(contains("Coleman-Liau")).and(contains("█")));

  temp.close().unwrap();
}

#[test]
fn test_missing_path_is_an_error() {
  let temp = assert_fs::TempDir::new().unwrap();

  quire_cmd(&temp).arg("missing.md").assert().code(2).stderr(contains("Path does not exist"));

  temp.close().unwrap();
}

#[test]
fn test_invalid_config_is_an_error() {
  let temp = assert_fs::TempDir::new().unwrap();
  temp.child("quire-test-config.json").write_str(r#"{ "pagination": { "words_per_page": 0 } }"#).unwrap();
  let draft = temp.child("draft.md");
  draft.write_str(EASY_CHAPTER).unwrap();

  quire_cmd(&temp).arg(draft.path()).assert().code(2).stderr(contains("words_per_page"));

  temp.close().unwrap();
}

#[test]
fn test_words_per_page_override() {
  let temp = assert_fs::TempDir::new().unwrap();
  let draft = temp.child("draft.md");
  draft.write_str(&format!("# Only\n{}", format!("{EASY_CHAPTER} ").repeat(3))).unwrap();

  quire_cmd(&temp)
    .args(["--format", "compact", "--words-per-page", "10"])
    .arg(draft.path())
    .assert()
    .success()
    .stdout(contains("total words=27 pages=3"));

  temp.close().unwrap();
}

#[test]
fn test_no_paths_is_a_usage_error() {
  let temp = assert_fs::TempDir::new().unwrap();
  quire_cmd(&temp).assert().failure();
  temp.close().unwrap();
}
