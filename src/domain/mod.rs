pub mod entry;
pub mod quiz;

pub use entry::{DictionaryEntry, ExampleSentence, PartOfSpeech};
pub use quiz::{QuestionKind, QuizDirection, QuizQuestion, QuizResult};
