//! Stored quiz outcomes.
//!
//! Lesson quizzes use ids of the form `lesson-<lesson id>-<timestamp>`, which
//! lets the completed-lesson list be derived from the results table alone.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result, Row};

use crate::domain::QuizResult;

/// Prefix marking a quiz id as belonging to a lesson
pub const LESSON_QUIZ_PREFIX: &str = "lesson-";

/// Build a lesson quiz id for the given completion time
pub fn lesson_quiz_id(lesson_id: &str, at: DateTime<Utc>) -> String {
  format!("{}{}-{}", LESSON_QUIZ_PREFIX, lesson_id, at.timestamp_millis())
}

/// Extract the lesson id from `lesson-<lesson id>-<timestamp>`
pub fn lesson_id_from_quiz_id(quiz_id: &str) -> Option<&str> {
  let rest = quiz_id.strip_prefix(LESSON_QUIZ_PREFIX)?;
  let (lesson_id, timestamp) = rest.rsplit_once('-')?;
  if lesson_id.is_empty() || timestamp.is_empty() || !timestamp.chars().all(|c| c.is_ascii_digit()) {
    return None;
  }
  Some(lesson_id)
}

fn row_to_result(row: &Row) -> Result<QuizResult> {
  let completed_at_str: String = row.get(4)?;
  let score: i64 = row.get(3)?;

  Ok(QuizResult {
    id: row.get(0)?,
    user_id: row.get(1)?,
    quiz_id: row.get(2)?,
    score: score.clamp(0, 100) as u8,
    completed_at: DateTime::parse_from_rfc3339(&completed_at_str)
      .map(|dt| dt.with_timezone(&Utc))
      .unwrap_or_else(|_| Utc::now()),
  })
}

/// Store a finished quiz and return the saved row
pub fn insert_quiz_result(conn: &Connection, user_id: &str, quiz_id: &str, score: u8) -> Result<QuizResult> {
  let completed_at = Utc::now();
  conn.execute(
    "INSERT INTO quiz_results (user_id, quiz_id, score, completed_at) VALUES (?1, ?2, ?3, ?4)",
    params![user_id, quiz_id, score as i64, completed_at.to_rfc3339()],
  )?;

  Ok(QuizResult {
    id: conn.last_insert_rowid(),
    user_id: user_id.to_string(),
    quiz_id: quiz_id.to_string(),
    score,
    completed_at,
  })
}

/// Most recent results for a user, newest first
pub fn get_recent_results(conn: &Connection, user_id: &str, limit: i64) -> Result<Vec<QuizResult>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, user_id, quiz_id, score, completed_at
    FROM quiz_results
    WHERE user_id = ?1
    ORDER BY completed_at DESC, id DESC
    LIMIT ?2
    "#,
  )?;

  let results = stmt
    .query_map(params![user_id, limit], row_to_result)?
    .collect::<Result<Vec<_>>>()?;

  Ok(results)
}

/// Distinct lesson ids the user has finished a quiz for, in completion order
pub fn get_completed_lesson_quizzes(conn: &Connection, user_id: &str) -> Result<Vec<String>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT quiz_id
    FROM quiz_results
    WHERE user_id = ?1 AND quiz_id LIKE 'lesson-%'
    ORDER BY completed_at ASC, id ASC
    "#,
  )?;

  let quiz_ids = stmt
    .query_map(params![user_id], |row| row.get::<_, String>(0))?
    .collect::<Result<Vec<_>>>()?;

  let mut lesson_ids: Vec<String> = Vec::new();
  for quiz_id in &quiz_ids {
    match lesson_id_from_quiz_id(quiz_id) {
      Some(lesson_id) if !lesson_ids.iter().any(|l| l == lesson_id) => {
        lesson_ids.push(lesson_id.to_string());
      }
      Some(_) => {}
      None => tracing::warn!("Ignoring malformed lesson quiz id: {}", quiz_id),
    }
  }

  Ok(lesson_ids)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;
  use chrono::TimeZone;

  #[test]
  fn test_lesson_quiz_id_roundtrip() {
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let id = lesson_quiz_id("1.0", at);
    assert_eq!(id, format!("lesson-1.0-{}", at.timestamp_millis()));
    assert_eq!(lesson_id_from_quiz_id(&id), Some("1.0"));
  }

  #[test]
  fn test_lesson_id_with_hyphen() {
    assert_eq!(lesson_id_from_quiz_id("lesson-intro-2-1700000000000"), Some("intro-2"));
  }

  #[test]
  fn test_malformed_quiz_ids() {
    assert_eq!(lesson_id_from_quiz_id("quiz-1234"), None);
    assert_eq!(lesson_id_from_quiz_id("lesson-1.0"), None);
    assert_eq!(lesson_id_from_quiz_id("lesson--1700000000000"), None);
    assert_eq!(lesson_id_from_quiz_id("lesson-1.0-abc"), None);
  }

  #[test]
  fn test_insert_and_recent_results() {
    let env = TestEnv::new().unwrap();
    let first = insert_quiz_result(&env.conn, "alice", "all-1", 70).unwrap();
    let second = insert_quiz_result(&env.conn, "alice", "all-2", 90).unwrap();
    insert_quiz_result(&env.conn, "bob", "all-3", 10).unwrap();

    let results = get_recent_results(&env.conn, "alice", 10).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, second.id);
    assert_eq!(results[1].id, first.id);
    assert_eq!(results[0].score, 90);

    let limited = get_recent_results(&env.conn, "alice", 1).unwrap();
    assert_eq!(limited.len(), 1);
  }

  #[test]
  fn test_completed_lesson_quizzes_are_distinct() {
    let env = TestEnv::new().unwrap();
    insert_quiz_result(&env.conn, "alice", "lesson-1.0-1700000000000", 80).unwrap();
    insert_quiz_result(&env.conn, "alice", "lesson-2.0-1700000000001", 60).unwrap();
    insert_quiz_result(&env.conn, "alice", "lesson-1.0-1700000000002", 100).unwrap();
    insert_quiz_result(&env.conn, "alice", "all-1700000000003", 50).unwrap();
    insert_quiz_result(&env.conn, "alice", "lesson-broken", 50).unwrap();
    insert_quiz_result(&env.conn, "bob", "lesson-3.0-1700000000004", 50).unwrap();

    let lessons = get_completed_lesson_quizzes(&env.conn, "alice").unwrap();
    assert_eq!(lessons, vec!["1.0".to_string(), "2.0".to_string()]);
  }
}
