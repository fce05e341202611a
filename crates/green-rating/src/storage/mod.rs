pub mod schema;

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::Connection;

use crate::evaluation::{
    EvaluationId, EvaluationRecord, EvaluationRepository, EvaluationResult, RepositoryError,
};

const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors raised while opening the evaluation database.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to open evaluation database at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to prepare evaluation schema: {0}")]
    Schema(#[from] rusqlite::Error),
}

/// SQLite-backed evaluation log. One row per recorded evaluation.
pub struct SqliteEvaluationRepository {
    conn: Mutex<Connection>,
}

impl SqliteEvaluationRepository {
    /// Opens (or creates) the database file. `:memory:` yields a private in-memory store.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::Open {
            path: ":memory:".to_string(),
            source,
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        schema::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl EvaluationRepository for SqliteEvaluationRepository {
    fn append(&self, result: EvaluationResult) -> Result<EvaluationRecord, RepositoryError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| RepositoryError::Unavailable("connection lock poisoned".to_string()))?;

        let (id, created_at): (i64, String) = conn
            .query_row(
                "INSERT INTO evaluations (name, type, area, total_points, rating)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, created_at",
                rusqlite::params![
                    result.project_name,
                    result.project_type,
                    result.area_sqm,
                    result.total_points,
                    result.rating.label(),
                ],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;

        let created_at = parse_timestamp(&created_at)?;
        Ok(result.into_record(EvaluationId(id), created_at))
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    NaiveDateTime::parse_from_str(raw, SQLITE_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|err| RepositoryError::Corrupt(format!("created_at '{raw}': {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::Rating;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_db_path() -> std::path::PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "green_rating_storage_{}_{}.db",
            std::process::id(),
            id
        ));
        let _ = std::fs::remove_file(&path);
        path
    }

    fn result(name: &str, points: u32) -> EvaluationResult {
        EvaluationResult {
            project_name: name.to_string(),
            project_type: "Office".to_string(),
            area_sqm: 1250.5,
            total_points: points,
            rating: Rating::for_points(points),
        }
    }

    #[test]
    fn append_assigns_sequential_ids() {
        let repository = SqliteEvaluationRepository::open_in_memory().expect("db opens");

        let first = repository.append(result("Tower A", 45)).expect("first append");
        let second = repository.append(result("Tower B", 80)).expect("second append");

        assert_eq!(first.id, EvaluationId(1));
        assert_eq!(second.id, EvaluationId(2));
        assert_eq!(second.rating, Rating::Platinum);
        assert_eq!(first.project_name, "Tower A");
    }

    #[test]
    fn append_persists_row_with_rating_label() {
        let path = temp_db_path();
        let repository = SqliteEvaluationRepository::open(&path).expect("db opens");
        let record = repository.append(result("Depot", 30)).expect("append");
        drop(repository);

        let conn = Connection::open(&path).expect("reopen");
        let (name, area, points, rating): (String, f64, i64, String) = conn
            .query_row(
                "SELECT name, area, total_points, rating FROM evaluations WHERE id = ?1",
                [record.id.0],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .expect("row present");

        assert_eq!(name, "Depot");
        assert_eq!(area, 1250.5);
        assert_eq!(points, 30);
        assert_eq!(rating, "Not Certified");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn reopening_keeps_existing_rows() {
        let path = temp_db_path();
        {
            let repository = SqliteEvaluationRepository::open(&path).expect("db opens");
            repository.append(result("Block 1", 50)).expect("append");
        }

        let repository = SqliteEvaluationRepository::open(&path).expect("db reopens");
        let record = repository.append(result("Block 2", 60)).expect("append");

        assert_eq!(record.id, EvaluationId(2));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("2025-10-19 08:30:00").is_ok());
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(RepositoryError::Corrupt(_))
        ));
    }
}
