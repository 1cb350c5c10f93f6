use thiserror::Error;

/// Reasons a quiz cannot be generated at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
  #[error("need at least {required} dictionary entries to generate a quiz, got {available}")]
  InsufficientData { available: usize, required: usize },

  #[error("question count must be at least 1")]
  InvalidCount,
}
