//! # Storage Traits
//!
//! Storage abstraction the domain layer programs against, so that the
//! generic record service does not know which table a record lives in.

use async_trait::async_trait;

/// Row-level persistence for one kind of record
#[async_trait]
pub trait RecordStorage<T>: Send + Sync {
    /// Store a new record
    async fn store(&self, record: &T) -> sqlx::Result<()>;

    /// Retrieve a record by ID
    async fn get(&self, id: &str) -> sqlx::Result<Option<T>>;

    /// List every record, most recently inserted first
    async fn list(&self) -> sqlx::Result<Vec<T>>;

    /// Overwrite an existing record.
    /// Returns false when no row with the record's ID exists.
    async fn update(&self, record: &T) -> sqlx::Result<bool>;

    /// Delete a record by ID.
    /// Returns true if the record was found and deleted.
    async fn delete(&self, id: &str) -> sqlx::Result<bool>;
}
