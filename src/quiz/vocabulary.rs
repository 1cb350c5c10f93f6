//! Single-word questions: Korean word → English gloss, or the reverse.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{DISTRACTOR_COUNT, PLACEHOLDER_GLOSS_LABEL, PLACEHOLDER_WORD_LABEL};
use crate::domain::{DictionaryEntry, QuestionKind, QuizDirection, QuizQuestion};

use super::options::{collect_distractors, non_empty, pad_with_placeholders, shuffle_options, Choice};

/// Build a vocabulary question for `entry`, drawing distractors from the rest of `pool`.
///
/// Always succeeds: when the pool lacks distinct values the options are padded
/// with placeholders.
pub(crate) fn build<R: Rng + ?Sized>(
  entry: &DictionaryEntry,
  pool: &[DictionaryEntry],
  direction: QuizDirection,
  rng: &mut R,
) -> QuizQuestion {
  let mut candidates: Vec<&DictionaryEntry> = pool.iter().filter(|c| c.id != entry.id).collect();
  candidates.shuffle(rng);

  let id = QuizQuestion::make_id(&entry.id, QuestionKind::Vocabulary, direction);

  match direction {
    QuizDirection::TargetToNative => {
      let mut distractors =
        collect_distractors(&entry.gloss, candidates.iter().map(|c| Choice::plain(&c.gloss)));
      if distractors.len() < DISTRACTOR_COUNT {
        tracing::debug!(
          "Insufficient distractors for entry {} ({} found), padding glosses",
          entry.id,
          distractors.len()
        );
        pad_with_placeholders(&entry.gloss, &mut distractors, PLACEHOLDER_GLOSS_LABEL, pool.len());
      }

      let (options, _) = shuffle_options(Choice::plain(&entry.gloss), distractors, rng);

      QuizQuestion {
        id,
        kind: QuestionKind::Vocabulary,
        direction,
        prompt_text: entry.word.clone(),
        prompt_romanization: non_empty(&entry.romanization),
        correct_answer: entry.gloss.clone(),
        correct_answer_romanization: None,
        options,
        options_romanization: None,
      }
    }
    QuizDirection::NativeToTarget => {
      let mut distractors = collect_distractors(
        &entry.word,
        candidates.iter().map(|c| Choice::new(&c.word, &c.romanization)),
      );
      if distractors.len() < DISTRACTOR_COUNT {
        tracing::debug!(
          "Insufficient distractors for entry {} ({} found), padding words",
          entry.id,
          distractors.len()
        );
        pad_with_placeholders(&entry.word, &mut distractors, PLACEHOLDER_WORD_LABEL, pool.len());
      }

      let correct = Choice::new(&entry.word, &entry.romanization);
      let (options, romanizations) = shuffle_options(correct, distractors, rng);

      QuizQuestion {
        id,
        kind: QuestionKind::Vocabulary,
        direction,
        prompt_text: entry.gloss.clone(),
        prompt_romanization: None,
        correct_answer: entry.word.clone(),
        correct_answer_romanization: non_empty(&entry.romanization),
        options,
        options_romanization: Some(romanizations),
      }
    }
  }
}
