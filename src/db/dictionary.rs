//! Dictionary entry source for quizzes.
//!
//! Entries can be drawn from the whole dictionary, from one lesson, or from the
//! words a user has marked as learned. Every loader attaches example sentences
//! in their stored order.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Params, Result, Row};

use crate::domain::{DictionaryEntry, ExampleSentence, PartOfSpeech};

// ==================== Entry Source ====================

/// Which slice of the dictionary a quiz is built from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntrySource {
  /// Whole dictionary
  #[default]
  All,
  /// Words tagged with a lesson id
  Lesson(String),
  /// Words a user has marked as learned
  Learned(String),
}

impl EntrySource {
  /// Resolve request parameters. A lesson id wins over `source=learned`, and
  /// `learned` without a user id falls back to the whole dictionary.
  pub fn from_params(source: Option<&str>, user_id: Option<&str>, lesson_id: Option<&str>) -> Self {
    fn non_blank(s: Option<&str>) -> Option<&str> {
      s.map(str::trim).filter(|s| !s.is_empty())
    }

    if let Some(lesson) = non_blank(lesson_id) {
      return EntrySource::Lesson(lesson.to_string());
    }
    match (source, non_blank(user_id)) {
      (Some("learned"), Some(user)) => EntrySource::Learned(user.to_string()),
      _ => EntrySource::All,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      EntrySource::All => "all",
      EntrySource::Lesson(_) => "lesson",
      EntrySource::Learned(_) => "learned",
    }
  }
}

// ==================== Queries ====================

const ENTRY_COLUMNS: &str = "d.id, d.word, d.gloss, d.romanization, d.part_of_speech, d.created_at";

fn row_to_entry(row: &Row) -> Result<DictionaryEntry> {
  let part_of_speech: String = row.get(4)?;
  let created_at_str: String = row.get(5)?;

  Ok(DictionaryEntry {
    id: row.get(0)?,
    word: row.get(1)?,
    gloss: row.get(2)?,
    romanization: row.get(3)?,
    part_of_speech: PartOfSpeech::parse(&part_of_speech),
    examples: Vec::new(),
    created_at: DateTime::parse_from_rfc3339(&created_at_str)
      .map(|dt| dt.with_timezone(&Utc))
      .unwrap_or_else(|_| Utc::now()),
  })
}

/// Load example sentences for each entry, ordered by position
fn attach_examples(conn: &Connection, entries: &mut [DictionaryEntry]) -> Result<()> {
  let mut stmt = conn.prepare(
    r#"
    SELECT target_text, native_text, romanization
    FROM example_sentences
    WHERE entry_id = ?1
    ORDER BY position ASC
    "#,
  )?;

  for entry in entries.iter_mut() {
    entry.examples = stmt
      .query_map(params![entry.id], |row| {
        Ok(ExampleSentence {
          target: row.get(0)?,
          native: row.get(1)?,
          romanization: row.get(2)?,
        })
      })?
      .collect::<Result<Vec<_>>>()?;
  }

  Ok(())
}

fn query_entries<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<DictionaryEntry>> {
  let mut stmt = conn.prepare(sql)?;
  let mut entries = stmt
    .query_map(params, row_to_entry)?
    .collect::<Result<Vec<_>>>()?;
  attach_examples(conn, &mut entries)?;
  Ok(entries)
}

/// All dictionary entries, alphabetical by word
pub fn get_all_entries(conn: &Connection) -> Result<Vec<DictionaryEntry>> {
  let sql = format!("SELECT {} FROM dictionary d ORDER BY d.word ASC", ENTRY_COLUMNS);
  query_entries(conn, &sql, [])
}

/// Entries tagged with `lesson_id`
pub fn get_lesson_entries(conn: &Connection, lesson_id: &str) -> Result<Vec<DictionaryEntry>> {
  let sql = format!(
    r#"
    SELECT {}
    FROM dictionary d
    JOIN dictionary_lessons l ON l.entry_id = d.id
    WHERE l.lesson_id = ?1
    ORDER BY d.word ASC
    "#,
    ENTRY_COLUMNS
  );
  query_entries(conn, &sql, params![lesson_id])
}

/// Entries `user_id` has marked as learned, oldest first
pub fn get_learned_entries(conn: &Connection, user_id: &str) -> Result<Vec<DictionaryEntry>> {
  let sql = format!(
    r#"
    SELECT {}
    FROM dictionary d
    JOIN learned_words w ON w.word_id = d.id
    WHERE w.user_id = ?1
    ORDER BY w.learned_at ASC
    "#,
    ENTRY_COLUMNS
  );
  query_entries(conn, &sql, params![user_id])
}

pub fn get_entries(conn: &Connection, source: &EntrySource) -> Result<Vec<DictionaryEntry>> {
  match source {
    EntrySource::All => get_all_entries(conn),
    EntrySource::Lesson(lesson_id) => get_lesson_entries(conn, lesson_id),
    EntrySource::Learned(user_id) => get_learned_entries(conn, user_id),
  }
}

pub fn get_entry_count(conn: &Connection) -> Result<i64> {
  conn.query_row("SELECT COUNT(*) FROM dictionary", [], |row| row.get(0))
}

// ==================== Writes ====================

/// Insert an entry together with its example sentences
pub fn insert_entry(conn: &Connection, entry: &DictionaryEntry) -> Result<()> {
  conn.execute(
    r#"
    INSERT INTO dictionary (id, word, gloss, romanization, part_of_speech, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
    params![
      entry.id,
      entry.word,
      entry.gloss,
      entry.romanization,
      entry.part_of_speech.as_str(),
      entry.created_at.to_rfc3339(),
    ],
  )?;

  for (position, example) in entry.examples.iter().enumerate() {
    conn.execute(
      r#"
      INSERT INTO example_sentences (entry_id, position, target_text, native_text, romanization)
      VALUES (?1, ?2, ?3, ?4, ?5)
      "#,
      params![
        entry.id,
        position as i64,
        example.target,
        example.native,
        example.romanization,
      ],
    )?;
  }

  Ok(())
}

pub fn add_entry_to_lesson(conn: &Connection, entry_id: &str, lesson_id: &str) -> Result<()> {
  conn.execute(
    "INSERT OR IGNORE INTO dictionary_lessons (entry_id, lesson_id) VALUES (?1, ?2)",
    params![entry_id, lesson_id],
  )?;
  Ok(())
}

/// Record that a user learned a word (no-op if already recorded)
pub fn mark_word_learned(conn: &Connection, user_id: &str, word_id: &str) -> Result<()> {
  conn.execute(
    "INSERT OR IGNORE INTO learned_words (user_id, word_id, learned_at) VALUES (?1, ?2, ?3)",
    params![user_id, word_id, Utc::now().to_rfc3339()],
  )?;
  Ok(())
}
