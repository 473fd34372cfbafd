use crate::domain::{Pog, PogField, PogFields};
use async_trait::async_trait;
use thiserror::Error;

pub mod sqlite;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    // the store's own unique index fired
    #[error("unique constraint violated on {0}")]
    UniqueViolation(&'static str),

    #[error("no pog with id {0}")]
    NotFound(i64),

    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
}

// a pog repository can be shared between tasks (sqlx::Pool is thread safe)
// generic description of the store, db specific implementation in "sqlite.rs"
#[async_trait]
pub trait PogRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Pog>>;
    async fn find_by_field(&self, field: PogField, value: &str) -> StoreResult<Option<Pog>>;
    async fn find_by_field_excluding_id(
        &self,
        field: PogField,
        value: &str,
        exclude_id: i64,
    ) -> StoreResult<Option<Pog>>;
    async fn find_all(&self) -> StoreResult<Vec<Pog>>;

    // write operations
    async fn create(&self, fields: &PogFields) -> StoreResult<Pog>;
    async fn update(&self, id: i64, fields: &PogFields) -> StoreResult<Pog>;
    async fn delete(&self, id: i64) -> StoreResult<()>;
}
