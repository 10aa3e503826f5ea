use quire::readability::{score, MAX_EASE, MAX_GRADE};
use quire::{Config, Manuscript, Scores};

const SAMPLES: [&str; 6] = [
  "",
  "word",
  "The cat sat on the mat. It was happy.",
  "Why? Because. Fine!",
  "Notwithstanding considerable institutional heterogeneity, organizational interdependencies \
   systematically complicate intergovernmental accountability mechanisms.",
  "He said: 'go.' She went... and the door closed behind her, softly, forever!",
];

#[test]
fn test_scores_always_within_clamp_ranges() {
  for text in SAMPLES {
    let scores = score(text);
    assert!((0.0..=MAX_GRADE).contains(&scores.flesch_kincaid), "{text:?}");
    assert!((0.0..=MAX_EASE).contains(&scores.flesch_reading_ease), "{text:?}");
    assert!((0.0..=MAX_GRADE).contains(&scores.gunning_fog), "{text:?}");
    assert!((0.0..=MAX_GRADE).contains(&scores.coleman_liau), "{text:?}");
  }
}

#[test]
fn test_degenerate_inputs_score_zero() {
  assert_eq!(score(""), Scores::zero());
  assert_eq!(score("word"), Scores::zero());
}

#[test]
fn test_scoring_is_repeatable_across_threads() {
  let expected: Vec<Scores> = SAMPLES.iter().map(|text| score(text)).collect();

  let handles: Vec<_> = (0..4)
    .map(|_| std::thread::spawn(|| SAMPLES.iter().map(|text| score(text)).collect::<Vec<_>>()))
    .collect();

  for handle in handles {
    assert_eq!(handle.join().unwrap(), expected);
  }
}

#[test]
fn test_manuscript_word_counts_match_scorer() {
  let text = "# One\nThe cat sat on the mat. It was happy.\n# Two\nShort one.";
  let manuscript = Manuscript::from_text(text, &Config::default()).unwrap().unwrap();
  let analysis = quire::analyze_manuscript(std::path::Path::new("inline"), &manuscript, &Config::default());

  assert_eq!(analysis.chapters[0].stats.words, 9);
  assert_eq!(analysis.chapters[1].stats.words, 2);
  assert_eq!(analysis.total_words, 11);
}
