//! Application configuration constants.
//!
//! This module centralizes the tunable values for the quiz service and the
//! lookup order for the database location.

use serde::Deserialize;
use std::path::PathBuf;

use crate::paths;

// ==================== Database Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

/// Parse the `[database] path` value out of config.toml contents
fn database_path_from_toml(contents: &str) -> Option<String> {
    toml::from_str::<AppConfig>(contents)
        .ok()
        .and_then(|config| config.database)
        .and_then(|db| db.path)
}

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Priority 1: config.toml
    if let Ok(contents) = std::fs::read_to_string("config.toml") {
        if let Some(path) = database_path_from_toml(&contents) {
            tracing::info!("Using database from config.toml: {}", path);
            return PathBuf::from(path);
        }
    }

    // Priority 2: .env DATABASE_PATH
    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    let default = PathBuf::from(paths::db_path());
    tracing::info!("Using default database path: {}", default.display());
    default
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port (overridable with PORT)
pub const SERVER_PORT: u16 = 3000;

/// Port from the PORT env var, falling back to SERVER_PORT
pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(SERVER_PORT)
}

/// Get the full server bind address
pub fn server_bind_addr() -> String {
    format!("{}:{}", SERVER_ADDR, server_port())
}

// ==================== Quiz Configuration ====================

/// Smallest pool a quiz can be built from (one answer + three distractors)
pub const MIN_QUIZ_ENTRIES: usize = 4;

/// Number of wrong answers per question
pub const DISTRACTOR_COUNT: usize = 3;

/// Questions per quiz when the request doesn't say
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Upper bound on questions per request
pub const MAX_QUESTION_COUNT: usize = 50;

/// Placeholder label for padded English options ("[Option 1]")
pub const PLACEHOLDER_GLOSS_LABEL: &str = "Option";

/// Placeholder label for padded Korean options ("[보기 1]")
pub const PLACEHOLDER_WORD_LABEL: &str = "보기";

// ==================== Query Limits ====================

/// Default number of quiz results returned to a client
pub const DEFAULT_RESULTS_LIMIT: i64 = 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_from_toml() {
        let contents = r#"
            [database]
            path = "/var/lib/kr_quiz/quiz.db"
        "#;
        assert_eq!(
            database_path_from_toml(contents).as_deref(),
            Some("/var/lib/kr_quiz/quiz.db")
        );
    }

    #[test]
    fn test_database_path_missing_section() {
        assert_eq!(database_path_from_toml("[server]\nport = 3000\n"), None);
        assert_eq!(database_path_from_toml("not toml at all ="), None);
    }

    #[test]
    fn test_quiz_constants_are_consistent() {
        assert_eq!(MIN_QUIZ_ENTRIES, DISTRACTOR_COUNT + 1);
        assert!(DEFAULT_QUESTION_COUNT <= MAX_QUESTION_COUNT);
    }
}
