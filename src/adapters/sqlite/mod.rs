//! SQLite adapter: Implementation of Storage.
//!
//! One `assessments` table. Columns used for filtering and ordering are
//! scalar; the questionnaire, factor list, score and review are stored as
//! JSON text.
//!
//! Timestamps are written as fixed-width RFC 3339 UTC strings with
//! nanoseconds, so text ordering matches time ordering and a reload is exact.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::de::DeserializeOwned;

use crate::domain::{Assessment, DoctorReview, HeadlinePrediction, ReviewStatus};
use crate::ports::{AssessmentPage, Storage};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Database lock poisoned")]
    LockPoisoned,
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

const SELECT_COLUMNS: &str = "id, patient_id, prediction, status, questionnaire, factors, score, review, created_at";

/// SQLite storage adapter.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Create an in-memory SQLite database (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        let storage = Self {
            conn: Mutex::new(conn),
        };
        storage.init_schema()?;
        Ok(storage)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS assessments (
                id TEXT PRIMARY KEY,
                patient_id TEXT NOT NULL,
                prediction INTEGER NOT NULL,
                status TEXT NOT NULL,
                questionnaire TEXT NOT NULL,
                factors TEXT NOT NULL,
                score TEXT NOT NULL,
                review TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_assessments_created
                ON assessments(created_at DESC);

            CREATE INDEX IF NOT EXISTS idx_assessments_patient
                ON assessments(patient_id, created_at DESC);
            ",
        )?;

        Ok(())
    }

    fn timestamp(at: &DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Nanos, true)
    }

    fn json_column<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
        let text: String = row.get(idx)?;
        serde_json::from_str(&text)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }

    /// Map a row selected with [`SELECT_COLUMNS`].
    fn row_to_assessment(row: &Row<'_>) -> rusqlite::Result<Assessment> {
        let prediction: i64 = row.get(2)?;
        let status_str: String = row.get(3)?;
        let status = status_str.parse::<ReviewStatus>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                Type::Text,
                Box::new(StorageError::Serialization(e)),
            )
        })?;

        let review_text: Option<String> = row.get(7)?;
        let review = review_text
            .map(|text| serde_json::from_str::<DoctorReview>(&text))
            .transpose()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Text, Box::new(e)))?;

        let created_at_str: String = row.get(8)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e)))?;

        Ok(Assessment {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            prediction: HeadlinePrediction::new(u8::try_from(prediction).unwrap_or(HeadlinePrediction::MAX)),
            questionnaire: Self::json_column(row, 4)?,
            risk_factors: Self::json_column(row, 5)?,
            health_score: Self::json_column(row, 6)?,
            status,
            review,
            created_at,
        })
    }

    fn query_assessments(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Assessment>, StorageError> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, Self::row_to_assessment)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl Storage for SqliteStorage {
    type Error = StorageError;

    fn save_assessment(&self, assessment: &Assessment) -> Result<(), Self::Error> {
        let questionnaire = serde_json::to_string(&assessment.questionnaire)?;
        let factors = serde_json::to_string(&assessment.risk_factors)?;
        let score = serde_json::to_string(&assessment.health_score)?;
        let review = assessment
            .review
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let conn = self.conn()?;
        conn.execute(
            r"
            INSERT INTO assessments (
                id, patient_id, prediction, status,
                questionnaire, factors, score, review, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                patient_id = excluded.patient_id,
                prediction = excluded.prediction,
                status = excluded.status,
                questionnaire = excluded.questionnaire,
                factors = excluded.factors,
                score = excluded.score,
                review = excluded.review,
                created_at = excluded.created_at
            ",
            params![
                assessment.id,
                assessment.patient_id,
                i64::from(assessment.prediction.score),
                assessment.status.as_str(),
                questionnaire,
                factors,
                score,
                review,
                Self::timestamp(&assessment.created_at),
            ],
        )?;

        tracing::debug!(id = %assessment.id, "Saved assessment");
        Ok(())
    }

    fn load_assessment(&self, id: &str) -> Result<Option<Assessment>, Self::Error> {
        let conn = self.conn()?;
        let sql = format!("SELECT {SELECT_COLUMNS} FROM assessments WHERE id = ?1");
        let found = conn
            .query_row(&sql, params![id], Self::row_to_assessment)
            .optional()?;
        Ok(found)
    }

    fn load_recent_assessments(&self, limit: usize) -> Result<Vec<Assessment>, Self::Error> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM assessments ORDER BY created_at DESC, rowid DESC LIMIT ?1"
        );
        Self::query_assessments(&conn, &sql, params![limit as i64])
    }

    fn load_patient_assessments(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<Assessment>, Self::Error> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM assessments WHERE patient_id = ?1 \
             ORDER BY created_at DESC, rowid DESC LIMIT ?2"
        );
        Self::query_assessments(&conn, &sql, params![patient_id, limit as i64])
    }

    fn load_all_assessments(&self) -> Result<Vec<Assessment>, Self::Error> {
        let conn = self.conn()?;
        let sql = format!("SELECT {SELECT_COLUMNS} FROM assessments ORDER BY created_at DESC, rowid DESC");
        Self::query_assessments(&conn, &sql, [])
    }

    fn load_assessments_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<AssessmentPage, Self::Error> {
        let conn = self.conn()?;

        let total_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM assessments", [], |row| row.get(0))?;

        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM assessments \
             ORDER BY created_at DESC, rowid DESC LIMIT ?1 OFFSET ?2"
        );
        let items = Self::query_assessments(&conn, &sql, params![limit as i64, offset as i64])?;

        Ok(AssessmentPage::new(items, total_count as usize, offset, limit))
    }

    fn count_assessments(&self) -> Result<usize, Self::Error> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM assessments", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn save_review(&self, assessment_id: &str, review: &DoctorReview) -> Result<bool, Self::Error> {
        let review_json = serde_json::to_string(review)?;
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE assessments SET review = ?1, status = ?2 WHERE id = ?3",
            params![review_json, review.status.as_str(), assessment_id],
        )?;

        tracing::debug!(id = %assessment_id, status = %review.status, "Saved review");
        Ok(changed > 0)
    }

    fn delete_assessment(&self, id: &str) -> Result<bool, Self::Error> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM assessments WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    fn clear_all(&self) -> Result<(), Self::Error> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM assessments", [])?;
        tracing::warn!("Cleared all assessments from storage");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        analyze_risk_factors, Answer, HealthQuestionnaire, HealthScore, RiskLevel,
    };
    use chrono::Duration;

    fn assessment(patient: &str, minutes_ago: i64) -> Assessment {
        let q = HealthQuestionnaire {
            smoking: Answer::Yes,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&q);
        let score = HealthScore::from_factors(&factors);
        let mut a = Assessment::new(patient, q, HeadlinePrediction::new(64), factors, score);
        a.created_at = Utc::now() - Duration::minutes(minutes_ago);
        a
    }

    #[test]
    fn test_assessment_crud() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        assert_eq!(storage.count_assessments().expect("Should count"), 0);

        let a = assessment("p-1", 0);
        storage.save_assessment(&a).expect("Should save");
        assert_eq!(storage.count_assessments().expect("Should count"), 1);

        let loaded = storage
            .load_assessment(&a.id)
            .expect("Should load")
            .expect("Should exist");
        assert_eq!(loaded, a);
        assert_eq!(loaded.prediction.score, 64);
        assert_eq!(loaded.status, ReviewStatus::Pending);

        assert!(storage.delete_assessment(&a.id).expect("Should delete"));
        assert!(!storage.delete_assessment(&a.id).expect("Should delete"));
        assert!(storage.load_assessment(&a.id).expect("Should load").is_none());
    }

    #[test]
    fn test_reload_keeps_sub_microsecond_time() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        let mut a = assessment("p-1", 0);
        a.created_at = DateTime::parse_from_rfc3339("2026-03-14T09:26:53.123456789Z")
            .expect("Should parse")
            .with_timezone(&Utc);
        storage.save_assessment(&a).expect("Should save");

        let loaded = storage.load_assessment(&a.id).expect("Should load").expect("Should exist");
        assert_eq!(loaded.created_at, a.created_at);
        assert_eq!(loaded, a);
    }

    #[test]
    fn test_save_is_upsert() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        let mut a = assessment("p-1", 0);
        storage.save_assessment(&a).expect("Should save");

        a.prediction = HeadlinePrediction::new(12);
        storage.save_assessment(&a).expect("Should save");

        assert_eq!(storage.count_assessments().expect("Should count"), 1);
        let loaded = storage.load_assessment(&a.id).expect("Should load").expect("Should exist");
        assert_eq!(loaded.prediction.score, 12);
    }

    #[test]
    fn test_reads_are_newest_first() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        let old = assessment("p-1", 30);
        let mid = assessment("p-2", 20);
        let new = assessment("p-1", 10);
        for a in [&mid, &new, &old] {
            storage.save_assessment(a).expect("Should save");
        }

        let recent = storage.load_recent_assessments(2).expect("Should load");
        let ids: Vec<&str> = recent.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec![new.id.as_str(), mid.id.as_str()]);

        let history = storage.load_patient_assessments("p-1", 10).expect("Should load");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, new.id);
        assert_eq!(history[1].id, old.id);

        assert_eq!(storage.load_all_assessments().expect("Should load").len(), 3);
    }

    #[test]
    fn test_pagination() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        for i in 0..5 {
            storage.save_assessment(&assessment("p-1", i)).expect("Should save");
        }

        let first = storage.load_assessments_paginated(0, 2).expect("Should page");
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.total_count, 5);
        assert!(first.has_more);
        assert_eq!(first.next_offset(), Some(2));
        assert_eq!(first.prev_offset(), None);
        assert_eq!(first.position(), (1, 3));

        let last = storage.load_assessments_paginated(4, 2).expect("Should page");
        assert_eq!(last.items.len(), 1);
        assert!(!last.has_more);
        assert_eq!(last.next_offset(), None);
        assert_eq!(last.prev_offset(), Some(2));
        assert_eq!(last.position(), (3, 3));
    }

    #[test]
    fn test_review_updates_status() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        let a = assessment("p-1", 0);
        storage.save_assessment(&a).expect("Should save");

        let mut review = DoctorReview::new("doc-1", "Dr. Okafor", "Stop smoking", RiskLevel::High);
        review.status = ReviewStatus::NeedsFollowup;
        review.action_items.push("Book cessation clinic".to_string());

        assert!(storage.save_review(&a.id, &review).expect("Should save review"));
        assert!(!storage.save_review("missing", &review).expect("Should run"));

        let loaded = storage.load_assessment(&a.id).expect("Should load").expect("Should exist");
        assert_eq!(loaded.status, ReviewStatus::NeedsFollowup);
        assert_eq!(loaded.review, Some(review));
    }

    #[test]
    fn test_clear_all() {
        let storage = SqliteStorage::in_memory().expect("Should create db");
        storage.save_assessment(&assessment("p-1", 0)).expect("Should save");
        storage.save_assessment(&assessment("p-2", 1)).expect("Should save");

        storage.clear_all().expect("Should clear");
        assert_eq!(storage.count_assessments().expect("Should count"), 0);
    }
}
