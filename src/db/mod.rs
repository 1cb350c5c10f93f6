pub mod dictionary;
pub mod quiz_results;
pub mod schema;

use rusqlite::{Connection, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{DictionaryEntry, ExampleSentence, PartOfSpeech};

// Re-export all public items from submodules
pub use dictionary::*;
pub use quiz_results::*;
pub use schema::run_migrations;

pub type DbPool = Arc<Mutex<Connection>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }
}

/// Error returned when database lock cannot be acquired
#[derive(Debug)]
pub struct DbLockError;

impl std::fmt::Display for DbLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Database unavailable")
  }
}

impl std::error::Error for DbLockError {}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    DbLockError
  })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).log_warn("Failed to create database directory");
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

/// Insert the starter vocabulary into an empty dictionary
pub fn seed_dictionary(conn: &Connection) -> Result<()> {
  if get_entry_count(conn)? > 0 {
    return Ok(());
  }

  let seed = get_starter_vocabulary();
  for (lesson_id, entry) in &seed {
    insert_entry(conn, entry)?;
    add_entry_to_lesson(conn, &entry.id, lesson_id)?;
  }
  tracing::info!("Seeded dictionary with {} starter entries", seed.len());
  Ok(())
}

// Helper to create an entry with an optional example sentence
fn word(
  id: &str,
  word: &str,
  gloss: &str,
  romanization: &str,
  pos: PartOfSpeech,
  example: Option<(&str, &str, &str)>,
) -> DictionaryEntry {
  let entry = DictionaryEntry::new(id, word, gloss, romanization, pos);
  match example {
    Some((target, native, rom)) => entry.with_example(ExampleSentence::new(target, native, rom)),
    None => entry,
  }
}

fn get_starter_vocabulary() -> Vec<(&'static str, DictionaryEntry)> {
  use PartOfSpeech::*;

  vec![
    // Lesson 1.0: greetings and basics
    ("1.0", word("seed-001", "안녕하세요", "hello", "annyeonghaseyo", Phrase,
      Some(("안녕하세요, 선생님", "Hello, teacher", "annyeonghaseyo, seonsaengnim")))),
    ("1.0", word("seed-002", "감사합니다", "thank you", "gamsahamnida", Phrase,
      Some(("도와줘서 감사합니다", "Thank you for helping", "dowajwoseo gamsahamnida")))),
    ("1.0", word("seed-003", "네", "yes", "ne", Unknown, None)),
    ("1.0", word("seed-004", "아니요", "no", "aniyo", Unknown, None)),
    ("1.0", word("seed-005", "사람", "person", "saram", Noun,
      Some(("저 사람은 누구예요?", "Who is that person?", "jeo sarameun nuguyeyo?")))),
    ("1.0", word("seed-006", "이름", "name", "ireum", Noun,
      Some(("이름이 뭐예요?", "What is your name?", "ireumi mwoyeyo?")))),
    // Lesson 2.0: everyday verbs
    ("2.0", word("seed-007", "가다", "to go", "gada", Verb,
      Some(("학교에 가요", "I go to school", "hakgyoe gayo")))),
    ("2.0", word("seed-008", "오다", "to come", "oda", Verb,
      Some(("친구가 와요", "A friend is coming", "chinguga wayo")))),
    ("2.0", word("seed-009", "먹다", "to eat", "meokda", Verb,
      Some(("밥을 먹어요", "I eat rice", "babeul meogeoyo")))),
    ("2.0", word("seed-010", "마시다", "to drink", "masida", Verb,
      Some(("물을 마셔요", "I drink water", "mureul masyeoyo")))),
    ("2.0", word("seed-011", "보다", "to see", "boda", Verb,
      Some(("영화를 봐요", "I watch a movie", "yeonghwareul bwayo")))),
    ("2.0", word("seed-012", "자다", "to sleep", "jada", Verb, None)),
    // Lesson 3.0: descriptions and particles
    ("3.0", word("seed-013", "크다", "to be big", "keuda", Adjective,
      Some(("집이 커요", "The house is big", "jibi keoyo")))),
    ("3.0", word("seed-014", "작다", "to be small", "jakda", Adjective,
      Some(("가방이 작아요", "The bag is small", "gabangi jagayo")))),
    ("3.0", word("seed-015", "빨리", "quickly", "ppalli", Adverb,
      Some(("빨리 와요", "Come quickly", "ppalli wayo")))),
    ("3.0", word("seed-016", "은/는", "topic marker", "eun/neun", Particle, None)),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;
  use std::collections::HashSet;

  #[test]
  fn test_seed_dictionary_once() {
    let env = TestEnv::new().unwrap();
    seed_dictionary(&env.conn).unwrap();
    let first = get_entry_count(&env.conn).unwrap();
    seed_dictionary(&env.conn).unwrap();

    assert_eq!(first, get_starter_vocabulary().len() as i64);
    assert_eq!(get_entry_count(&env.conn).unwrap(), first);
  }

  #[test]
  fn test_starter_vocabulary_is_quizzable() {
    let seed = get_starter_vocabulary();
    assert!(seed.iter().all(|(_, e)| e.is_well_formed()));

    let ids: HashSet<&str> = seed.iter().map(|(_, e)| e.id.as_str()).collect();
    assert_eq!(ids.len(), seed.len());

    // Every lesson can build a quiz on its own
    for lesson in ["1.0", "2.0", "3.0"] {
      let count = seed.iter().filter(|(l, _)| *l == lesson).count();
      assert!(count >= crate::config::MIN_QUIZ_ENTRIES, "lesson {} too small", lesson);
    }
  }

  #[test]
  fn test_seeded_lessons_load() {
    let env = TestEnv::new().unwrap();
    seed_dictionary(&env.conn).unwrap();

    let lesson = get_lesson_entries(&env.conn, "2.0").unwrap();
    assert_eq!(lesson.len(), 6);
    assert!(lesson.iter().any(|e| e.word == "먹다" && e.examples.len() == 1));
  }

  #[test]
  fn test_log_warn() {
    let err: std::result::Result<i32, String> = Err("boom".to_string());
    assert_eq!(err.log_warn("test"), None);

    let ok: std::result::Result<i32, String> = Ok(5);
    assert_eq!(ok.log_warn("test"), Some(5));
  }

  #[test]
  fn test_init_db_creates_parent_dirs() {
    let env = TestEnv::new().unwrap();
    let path = env.path().join("nested").join("data").join("quiz.db");
    let pool = init_db(&path).unwrap();
    assert!(path.exists());

    let conn = try_lock(&pool).unwrap();
    seed_dictionary(&conn).log_warn("seed");
    assert!(get_entry_count(&conn).unwrap() > 0);
  }

  #[test]
  fn test_try_lock() {
    let env = TestEnv::new().unwrap();
    let pool = init_db(&env.db_path()).unwrap();
    let conn = try_lock(&pool).unwrap();
    assert_eq!(get_entry_count(&conn).unwrap(), 0);
  }
}
