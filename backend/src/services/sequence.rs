//! Sequence allocation service
//!
//! Hands out globally unique, strictly increasing integers per named
//! counter. The read-increment-return is a single upsert statement so the
//! guarantee holds across concurrent requests and server instances: for N
//! concurrent calls on one name the returned values are exactly
//! `{prev+1 ..= prev+N}`, each returned to one caller.
//!
//! A value handed out here is never returned to the pool; if the caller's
//! insert later fails the number is burned.

use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Counter name used for product serial numbers
pub const PRODUCT_COUNTER: &str = "product";

/// Sequence allocator backed by the `counters` table
#[derive(Clone)]
pub struct SequenceService {
    db: PgPool,
}

impl SequenceService {
    /// Create a new SequenceService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Atomically increment the named counter and return the new value.
    ///
    /// The counter row is created lazily on first use, so the first
    /// allocation for a new name returns 1.
    pub async fn allocate(&self, counter_name: &str) -> AppResult<i64> {
        if counter_name.is_empty() {
            return Err(AppError::ValidationError(
                "Counter name cannot be empty".to_string(),
            ));
        }

        let seq = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO counters (name, seq)
            VALUES ($1, 1)
            ON CONFLICT (name) DO UPDATE SET seq = counters.seq + 1
            RETURNING seq
            "#,
        )
        .bind(counter_name)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::Allocation(e.to_string()))?;

        Ok(seq)
    }
}
