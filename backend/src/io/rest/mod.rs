//! # REST API Interface Layer
//!
//! HTTP endpoints for the finance tracker, mounted under `/api`.
//!
//! Every handler returns either a JSON body or an [`error::ApiError`], which
//! renders as `{"message", "detail"?}` with the status code chosen from the
//! domain error: 400 for validation failures and malformed input, 404 for
//! unknown ids, 500 for storage failures.
//!
//! Each router carries only the service it needs as state:
//!
//! - **record_apis**: generic CRUD for the plain registries
//! - **bill_apis**: recurring bills, categories and upcoming dues
//! - **payment_apis**: bill payments
//! - **summary_apis**: reporting totals

pub mod bill_apis;
pub mod error;
pub mod payment_apis;
pub mod record_apis;
pub mod summary_apis;

pub use error::{ApiError, ApiResult};
