//! Generic create/read/update/delete service used by every plain registry
//! (ledger, balance sheet, fleet, trading accounts and the bill registry).

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{generate_id, now_timestamp, Record};
use crate::storage::RecordStorage;

pub struct RecordService<T> {
    kind: &'static str,
    storage: Arc<dyn RecordStorage<T>>,
}

// Manual impl so cloning does not require `T: Clone` through the trait object
impl<T> Clone for RecordService<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<T: Record> RecordService<T> {
    pub fn new(kind: &'static str, storage: Arc<dyn RecordStorage<T>>) -> Self {
        Self { kind, storage }
    }

    /// Human-readable name of the record kind, used in logs and errors
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub async fn create(&self, request: T::Create) -> DomainResult<T> {
        let record = T::from_create(generate_id(), now_timestamp(), request);
        if let Err(e) = record.validate() {
            warn!("Rejected new {}: {}", self.kind, e);
            return Err(e.into());
        }

        self.storage.store(&record).await?;
        info!("Created {} {}", self.kind, record.id());
        Ok(record)
    }

    pub async fn list(&self) -> DomainResult<Vec<T>> {
        Ok(self.storage.list().await?)
    }

    pub async fn get(&self, id: &str) -> DomainResult<T> {
        self.storage
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(self.kind, id))
    }

    pub async fn update(&self, id: &str, update: T::Update) -> DomainResult<T> {
        let mut record = self.get(id).await?;
        record.apply_update(update);
        if let Err(e) = record.validate() {
            warn!("Rejected update of {} {}: {}", self.kind, id, e);
            return Err(e.into());
        }

        if !self.storage.update(&record).await? {
            // Deleted between the read and the write
            return Err(DomainError::not_found(self.kind, id));
        }
        info!("Updated {} {}", self.kind, id);
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        if !self.storage.delete(id).await? {
            return Err(DomainError::not_found(self.kind, id));
        }
        info!("Deleted {} {}", self.kind, id);
        Ok(())
    }
}
