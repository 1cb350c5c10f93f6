use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  conn.execute_batch(
    r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS dictionary (
      id TEXT PRIMARY KEY,
      word TEXT NOT NULL,
      gloss TEXT NOT NULL,
      romanization TEXT NOT NULL DEFAULT '',
      part_of_speech TEXT NOT NULL DEFAULT 'unknown',
      created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS example_sentences (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      entry_id TEXT NOT NULL,
      position INTEGER NOT NULL,
      target_text TEXT NOT NULL,
      native_text TEXT NOT NULL,
      romanization TEXT NOT NULL DEFAULT '',
      FOREIGN KEY (entry_id) REFERENCES dictionary(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS dictionary_lessons (
      entry_id TEXT NOT NULL,
      lesson_id TEXT NOT NULL,
      PRIMARY KEY (entry_id, lesson_id),
      FOREIGN KEY (entry_id) REFERENCES dictionary(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS learned_words (
      user_id TEXT NOT NULL,
      word_id TEXT NOT NULL,
      learned_at TEXT NOT NULL,
      PRIMARY KEY (user_id, word_id),
      FOREIGN KEY (word_id) REFERENCES dictionary(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS quiz_results (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_id TEXT NOT NULL,
      quiz_id TEXT NOT NULL,
      score INTEGER NOT NULL,
      completed_at TEXT NOT NULL
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_dictionary_word ON dictionary(word);
    CREATE INDEX IF NOT EXISTS idx_example_sentences_entry ON example_sentences(entry_id, position);
    CREATE INDEX IF NOT EXISTS idx_dictionary_lessons_lesson ON dictionary_lessons(lesson_id);
    CREATE INDEX IF NOT EXISTS idx_learned_words_user ON learned_words(user_id);
    CREATE INDEX IF NOT EXISTS idx_quiz_results_user ON quiz_results(user_id, completed_at);
    "#,
  )?;

  Ok(())
}
