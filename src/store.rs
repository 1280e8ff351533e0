use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::db;
use crate::models::{Contact, NewContact};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Append-only storage for contact submissions.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Persist a submission atomically. Either the whole row is visible
    /// afterwards or nothing is.
    async fn save(&self, contact: &NewContact) -> Result<Contact, StoreError>;

    /// All submissions, newest first.
    async fn list(&self) -> Result<Vec<Contact>, StoreError>;
}

pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn save(&self, contact: &NewContact) -> Result<Contact, StoreError> {
        // Dropping the transaction without commit rolls it back.
        let mut tx = self.pool.begin().await?;
        let saved = db::contacts::create(&mut *tx, contact, Utc::now()).await?;
        tx.commit().await?;
        Ok(saved)
    }

    async fn list(&self) -> Result<Vec<Contact>, StoreError> {
        Ok(db::contacts::list(&self.pool).await?)
    }
}
