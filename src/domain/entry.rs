use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Grammatical category of a dictionary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
  Noun,
  Verb,
  Adjective,
  Adverb,
  Particle,
  Phrase,
  #[default]
  Unknown,
}

impl PartOfSpeech {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Noun => "noun",
      Self::Verb => "verb",
      Self::Adjective => "adjective",
      Self::Adverb => "adverb",
      Self::Particle => "particle",
      Self::Phrase => "phrase",
      Self::Unknown => "unknown",
    }
  }

  /// Unrecognized tags map to `Unknown` rather than failing the row
  pub fn parse(s: &str) -> Self {
    match s {
      "noun" => Self::Noun,
      "verb" => Self::Verb,
      "adjective" => Self::Adjective,
      "adverb" => Self::Adverb,
      "particle" => Self::Particle,
      "phrase" => Self::Phrase,
      _ => Self::Unknown,
    }
  }
}

/// Example sentence attached to a dictionary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
  /// Korean sentence
  pub target: String,
  /// English translation
  pub native: String,
  pub romanization: String,
}

impl ExampleSentence {
  pub fn new(target: &str, native: &str, romanization: &str) -> Self {
    Self {
      target: target.to_string(),
      native: native.to_string(),
      romanization: romanization.to_string(),
    }
  }
}

/// A dictionary word. The quiz generator only ever reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
  pub id: String,
  /// Korean headword
  pub word: String,
  /// English translation
  pub gloss: String,
  pub romanization: String,
  pub part_of_speech: PartOfSpeech,
  #[serde(default)]
  pub examples: Vec<ExampleSentence>,
  pub created_at: DateTime<Utc>,
}

impl DictionaryEntry {
  pub fn new(id: &str, word: &str, gloss: &str, romanization: &str, part_of_speech: PartOfSpeech) -> Self {
    Self {
      id: id.to_string(),
      word: word.to_string(),
      gloss: gloss.to_string(),
      romanization: romanization.to_string(),
      part_of_speech,
      examples: Vec::new(),
      created_at: Utc::now(),
    }
  }

  pub fn with_example(mut self, example: ExampleSentence) -> Self {
    self.examples.push(example);
    self
  }

  /// First example sentence, used for sentence questions
  pub fn first_example(&self) -> Option<&ExampleSentence> {
    self.examples.first()
  }

  /// Word and gloss must both carry text for the entry to be quizzable
  pub fn is_well_formed(&self) -> bool {
    !self.word.trim().is_empty() && !self.gloss.trim().is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_part_of_speech_roundtrip() {
    for pos in [
      PartOfSpeech::Noun,
      PartOfSpeech::Verb,
      PartOfSpeech::Adjective,
      PartOfSpeech::Adverb,
      PartOfSpeech::Particle,
      PartOfSpeech::Phrase,
      PartOfSpeech::Unknown,
    ] {
      assert_eq!(PartOfSpeech::parse(pos.as_str()), pos);
    }
  }

  #[test]
  fn test_part_of_speech_unrecognized_is_unknown() {
    assert_eq!(PartOfSpeech::parse("interjection"), PartOfSpeech::Unknown);
    assert_eq!(PartOfSpeech::parse(""), PartOfSpeech::Unknown);
  }

  #[test]
  fn test_first_example() {
    let entry = DictionaryEntry::new("1", "먹다", "to eat", "meokda", PartOfSpeech::Verb)
      .with_example(ExampleSentence::new("밥을 먹어요", "I eat rice", "babeul meogeoyo"))
      .with_example(ExampleSentence::new("뭐 먹어요?", "What are you eating?", "mwo meogeoyo?"));

    assert_eq!(entry.first_example().map(|e| e.native.as_str()), Some("I eat rice"));
  }

  #[test]
  fn test_is_well_formed() {
    let ok = DictionaryEntry::new("1", "물", "water", "mul", PartOfSpeech::Noun);
    let no_gloss = DictionaryEntry::new("2", "불", "  ", "bul", PartOfSpeech::Noun);
    let no_word = DictionaryEntry::new("3", "", "fire", "", PartOfSpeech::Noun);

    assert!(ok.is_well_formed());
    assert!(!no_gloss.is_well_formed());
    assert!(!no_word.is_well_formed());
  }

  #[test]
  fn test_entry_json_uses_camel_case() {
    let entry = DictionaryEntry::new("1", "물", "water", "mul", PartOfSpeech::Noun);
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["partOfSpeech"], "noun");
    assert!(json.get("createdAt").is_some());
  }
}
