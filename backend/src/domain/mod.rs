//! # Domain Module
//!
//! Business rules for the finance tracker, independent of HTTP and SQL.
//!
//! ## Module Organization
//!
//! - **models**: how each record is built, patched and validated
//! - **record_service**: generic CRUD used by every plain registry
//! - **bill_service**: recurring bill registry and the upcoming-due schedule
//! - **payment_recorder**: bill payments and their mirrored expenses
//! - **summary_service**: ledger and balance-sheet totals
//!
//! ## Business Rules
//!
//! - Amounts are non-negative decimal strings; dates are `YYYY-MM-DD`
//! - Only payments against payable bills are mirrored into expenses
//! - A payment and its mirrored expense are written together or not at all
//! - Deleting a bill keeps its payment history

pub mod bill_service;
pub mod errors;
pub mod models;
pub mod payment_recorder;
pub mod record_service;
pub mod summary_service;
pub mod validation;

pub use bill_service::{BillService, DEFAULT_UPCOMING_DAYS};
pub use errors::{DomainError, DomainResult};
pub use models::Record;
pub use payment_recorder::PaymentRecorder;
pub use record_service::RecordService;
pub use summary_service::SummaryService;
pub use validation::ValidationError;
