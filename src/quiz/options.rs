//! Answer option assembly shared by vocabulary and sentence questions.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use crate::config::DISTRACTOR_COUNT;

/// One answer option with its romanization (empty for English text)
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Choice {
  pub text: String,
  pub romanization: String,
}

impl Choice {
  pub fn new(text: &str, romanization: &str) -> Self {
    Self {
      text: text.to_string(),
      romanization: romanization.to_string(),
    }
  }

  /// An English option, which never carries romanization
  pub fn plain(text: &str) -> Self {
    Self::new(text, "")
  }
}

/// Collect up to `DISTRACTOR_COUNT` wrong answers in candidate order.
/// Candidates equal to the correct answer or to an already collected value are skipped.
pub(crate) fn collect_distractors<I>(correct: &str, candidates: I) -> Vec<Choice>
where
  I: IntoIterator<Item = Choice>,
{
  let mut seen: HashSet<String> = HashSet::new();
  let mut distractors = Vec::with_capacity(DISTRACTOR_COUNT);

  for candidate in candidates {
    if candidate.text == correct || !seen.insert(candidate.text.clone()) {
      continue;
    }
    distractors.push(candidate);
    if distractors.len() >= DISTRACTOR_COUNT {
      break;
    }
  }

  distractors
}

/// Pad `distractors` with `[label N]` placeholders.
///
/// Stops at `DISTRACTOR_COUNT` or at `pool_size - 1`, whichever is lower, and
/// skips any placeholder text that is already an option.
pub(crate) fn pad_with_placeholders(
  correct: &str,
  distractors: &mut Vec<Choice>,
  label: &str,
  pool_size: usize,
) {
  let target = DISTRACTOR_COUNT.min(pool_size.saturating_sub(1));
  let mut n = distractors.len() + 1;

  while distractors.len() < target {
    let text = format!("[{} {}]", label, n);
    n += 1;
    if text == correct || distractors.iter().any(|d| d.text == text) {
      continue;
    }
    distractors.push(Choice { text, romanization: String::new() });
  }
}

/// Merge the correct answer with its distractors, drop repeated values and shuffle.
///
/// Returns option texts and romanizations permuted identically, so index `i`
/// of both vectors always describes the same option.
pub(crate) fn shuffle_options<R: Rng + ?Sized>(
  correct: Choice,
  distractors: Vec<Choice>,
  rng: &mut R,
) -> (Vec<String>, Vec<String>) {
  let mut seen: HashSet<String> = HashSet::new();
  let mut choices: Vec<Choice> = std::iter::once(correct)
    .chain(distractors)
    .filter(|c| seen.insert(c.text.clone()))
    .collect();

  choices.shuffle(rng);
  choices.into_iter().map(|c| (c.text, c.romanization)).unzip()
}

/// `Some` only for non-blank strings
pub(crate) fn non_empty(s: &str) -> Option<String> {
  if s.trim().is_empty() {
    None
  } else {
    Some(s.to_string())
  }
}
