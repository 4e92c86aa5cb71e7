//! Domain behaviour attached to the shared wire types: how each record is
//! built from a create request, patched by an update request and validated.

pub mod balance_sheet;
pub mod bill;
pub mod fleet;
pub mod ledger;
pub mod trading;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use crate::domain::validation::ValidationError;

/// A row the generic record service can create, patch and validate
pub trait Record: Clone + Debug + Serialize + Send + Sync + 'static {
    type Create: Debug + DeserializeOwned + Send + 'static;
    type Update: Debug + DeserializeOwned + Send + 'static;

    fn id(&self) -> &str;

    fn from_create(id: String, created_at: String, request: Self::Create) -> Self;

    /// Merge the fields present in `update`; absent fields stay unchanged
    fn apply_update(&mut self, update: Self::Update);

    fn validate(&self) -> Result<(), ValidationError>;
}

pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
