//! Example-sentence translation questions.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::DISTRACTOR_COUNT;
use crate::domain::{DictionaryEntry, ExampleSentence, QuestionKind, QuizDirection, QuizQuestion};

use super::options::{collect_distractors, non_empty, shuffle_options, Choice};

/// Build a sentence question from the entry's first example.
///
/// Returns `None` when the entry has no example or the other entries' first
/// examples don't supply `DISTRACTOR_COUNT` distinct wrong answers. Sentence
/// options are never padded.
pub(crate) fn build<R: Rng + ?Sized>(
  entry: &DictionaryEntry,
  pool: &[DictionaryEntry],
  direction: QuizDirection,
  rng: &mut R,
) -> Option<QuizQuestion> {
  let example = entry.first_example()?;

  let mut candidates: Vec<&ExampleSentence> = pool
    .iter()
    .filter(|c| c.id != entry.id)
    .filter_map(DictionaryEntry::first_example)
    .collect();
  candidates.shuffle(rng);

  let (correct, distractors) = match direction {
    QuizDirection::TargetToNative => (
      Choice::plain(&example.native),
      collect_distractors(&example.native, candidates.iter().map(|e| Choice::plain(&e.native))),
    ),
    QuizDirection::NativeToTarget => (
      Choice::new(&example.target, &example.romanization),
      collect_distractors(
        &example.target,
        candidates.iter().map(|e| Choice::new(&e.target, &e.romanization)),
      ),
    ),
  };

  if distractors.len() < DISTRACTOR_COUNT {
    tracing::debug!(
      "Insufficient sentence distractors for entry {} ({} found)",
      entry.id,
      distractors.len()
    );
    return None;
  }

  let (options, romanizations) = shuffle_options(correct, distractors, rng);
  let id = QuizQuestion::make_id(&entry.id, QuestionKind::Sentence, direction);

  let question = match direction {
    QuizDirection::TargetToNative => QuizQuestion {
      id,
      kind: QuestionKind::Sentence,
      direction,
      prompt_text: example.target.clone(),
      prompt_romanization: non_empty(&example.romanization),
      correct_answer: example.native.clone(),
      correct_answer_romanization: None,
      options,
      options_romanization: None,
    },
    QuizDirection::NativeToTarget => QuizQuestion {
      id,
      kind: QuestionKind::Sentence,
      direction,
      prompt_text: example.native.clone(),
      prompt_romanization: None,
      correct_answer: example.target.clone(),
      correct_answer_romanization: non_empty(&example.romanization),
      options,
      options_romanization: Some(romanizations),
    },
  };

  Some(question)
}
