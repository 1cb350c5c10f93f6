//! Multiple-choice quiz generation from dictionary entries.
//!
//! The generator is pure: it reads a slice of entries, draws from an injected
//! random source and returns freshly built questions. Every selection point
//! (entry sampling, kind, direction, distractor order, option order, final
//! question order) is a uniform draw; nothing is weighted by frequency or
//! recency.
//!
//! Scarcity is handled per question:
//! - vocabulary questions pad missing distractors with placeholders
//! - sentence questions that can't find enough distinct sentences become
//!   vocabulary questions
//!
//! Only a pool smaller than `MIN_QUIZ_ENTRIES` (or a zero count) fails the call.

mod error;
mod options;
mod sentence;
mod vocabulary;

pub use error::QuizError;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::MIN_QUIZ_ENTRIES;
use crate::domain::{DictionaryEntry, QuestionKind, QuizDirection, QuizQuestion};

/// Generate `count` questions using the thread-local RNG.
///
/// `kind` forces every question to one kind; `None` picks per question.
pub fn generate_quiz(
  entries: &[DictionaryEntry],
  count: usize,
  kind: Option<QuestionKind>,
) -> Result<Vec<QuizQuestion>, QuizError> {
  generate_quiz_with(entries, count, kind, &mut rand::rng())
}

/// Generate `count` questions drawing all randomness from `rng`.
///
/// Seeding `rng` makes the output reproducible.
pub fn generate_quiz_with<R: Rng + ?Sized>(
  entries: &[DictionaryEntry],
  count: usize,
  kind: Option<QuestionKind>,
  rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
  if entries.len() < MIN_QUIZ_ENTRIES {
    return Err(QuizError::InsufficientData {
      available: entries.len(),
      required: MIN_QUIZ_ENTRIES,
    });
  }
  if count == 0 {
    return Err(QuizError::InvalidCount);
  }

  let selected = select_entries(entries, count, rng);
  let mut questions = Vec::with_capacity(selected.len());

  for entry in selected {
    let kind = kind.unwrap_or_else(|| pick_kind(rng));
    let direction = pick_direction(rng);

    let question = match kind {
      QuestionKind::Vocabulary => vocabulary::build(entry, entries, direction, rng),
      QuestionKind::Sentence => match sentence::build(entry, entries, direction, rng) {
        Some(q) => q,
        // Fall back to a vocabulary question in the same direction
        None => {
          tracing::debug!(
            "No sentence question for {}, using {} vocabulary",
            entry.id,
            direction.as_str()
          );
          vocabulary::build(entry, entries, direction, rng)
        }
      },
    };
    tracing::trace!("Built {} question {}", question.kind.as_str(), question.id);
    questions.push(question);
  }

  questions.shuffle(rng);
  questions.truncate(count);

  tracing::debug!(
    "Generated {} quiz questions from {} entries",
    questions.len(),
    entries.len()
  );

  Ok(questions)
}

/// Pick the entries to ask about.
///
/// Large pools are sampled without replacement. Pools smaller than `count`
/// are shuffled once and cycled so every entry is used about equally often.
fn select_entries<'a, R: Rng + ?Sized>(
  entries: &'a [DictionaryEntry],
  count: usize,
  rng: &mut R,
) -> Vec<&'a DictionaryEntry> {
  let mut shuffled: Vec<&DictionaryEntry> = entries.iter().collect();
  shuffled.shuffle(rng);

  if shuffled.len() >= count {
    shuffled.truncate(count);
    shuffled
  } else {
    (0..count).map(|i| shuffled[i % shuffled.len()]).collect()
  }
}

fn pick_kind<R: Rng + ?Sized>(rng: &mut R) -> QuestionKind {
  if rng.random_bool(0.5) {
    QuestionKind::Vocabulary
  } else {
    QuestionKind::Sentence
  }
}

fn pick_direction<R: Rng + ?Sized>(rng: &mut R) -> QuizDirection {
  if rng.random_bool(0.5) {
    QuizDirection::TargetToNative
  } else {
    QuizDirection::NativeToTarget
  }
}
