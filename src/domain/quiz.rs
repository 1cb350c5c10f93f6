use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a question tests: a single word or a whole example sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
  #[serde(alias = "vocab")]
  Vocabulary,
  Sentence,
}

impl QuestionKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Vocabulary => "vocabulary",
      Self::Sentence => "sentence",
    }
  }

  /// Accepts the legacy "vocab" spelling used by older clients
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "vocabulary" | "vocab" => Some(Self::Vocabulary),
      "sentence" => Some(Self::Sentence),
      _ => None,
    }
  }
}

/// Which language is shown and which is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizDirection {
  TargetToNative, // Korean prompt → English options
  NativeToTarget, // English prompt → Korean options
}

impl QuizDirection {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::TargetToNative => "target-to-native",
      Self::NativeToTarget => "native-to-target",
    }
  }

  /// Short tag used in question ids
  fn id_tag(&self) -> &'static str {
    match self {
      Self::TargetToNative => "tn",
      Self::NativeToTarget => "nt",
    }
  }
}

/// A generated multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
  pub id: String,
  pub kind: QuestionKind,
  pub direction: QuizDirection,
  pub prompt_text: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub prompt_romanization: Option<String>,
  pub correct_answer: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub correct_answer_romanization: Option<String>,
  pub options: Vec<String>,
  /// Parallel to `options`; only present when options are Korean text
  #[serde(skip_serializing_if = "Option::is_none")]
  pub options_romanization: Option<Vec<String>>,
}

impl QuizQuestion {
  /// Stable id for an (entry, kind, direction) triple
  pub fn make_id(entry_id: &str, kind: QuestionKind, direction: QuizDirection) -> String {
    match kind {
      QuestionKind::Vocabulary => format!("q-{}-{}", entry_id, direction.id_tag()),
      QuestionKind::Sentence => format!("q-{}-sent-{}", entry_id, direction.id_tag()),
    }
  }
}

/// A completed quiz as stored for progress display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
  pub id: i64,
  pub user_id: String,
  pub quiz_id: String,
  /// Percentage of correct answers (0-100)
  pub score: u8,
  pub completed_at: DateTime<Utc>,
}
