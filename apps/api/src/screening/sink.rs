//! Record Sink — append-only persistence for completed candidate records.
//!
//! Carried in `AppState` as `Arc<dyn RecordSink>` so tests substitute an
//! in-memory sink. There is no update and no read path; every completed
//! conversation inserts one independent row.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::candidate::CandidateRecord;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Only produced by the in-memory test sink.
    #[allow(dead_code)]
    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn persist(&self, record: &CandidateRecord) -> Result<(), SinkError>;
}

/// Postgres-backed sink. One `INSERT` per record into `candidates`.
pub struct PgRecordSink {
    pool: PgPool,
}

impl PgRecordSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordSink for PgRecordSink {
    async fn persist(&self, record: &CandidateRecord) -> Result<(), SinkError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO candidates
                (id, full_name, email, phone, years_experience,
                 desired_positions, current_location, tech_stack,
                 questions, answers, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(id)
        .bind(&record.full_name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.years_experience)
        .bind(&record.desired_positions)
        .bind(&record.current_location)
        .bind(&record.tech_stack)
        .bind(&record.questions)
        .bind(&record.answers)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        info!("Persisted candidate record {id} for {}", record.email);
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemorySink;

#[cfg(test)]
mod memory {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{RecordSink, SinkError};
    use crate::models::candidate::CandidateRecord;

    /// In-memory sink for state machine tests. Can be switched into a failing
    /// mode to exercise persistence-failure handling.
    #[derive(Default)]
    pub struct MemorySink {
        records: Mutex<Vec<CandidateRecord>>,
        failing: AtomicBool,
    }

    impl MemorySink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_next_writes(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn records(&self) -> Vec<CandidateRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecordSink for MemorySink {
        async fn persist(&self, record: &CandidateRecord) -> Result<(), SinkError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(SinkError::Unavailable("memory sink set to fail".to_string()));
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }
}
