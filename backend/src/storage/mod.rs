//! # Storage Module
//!
//! Handles all data persistence for the finance tracker.
//!
//! A single [`DbConnection`] is constructed at startup and handed to every
//! repository. Repositories map one table each onto the wire types from the
//! `shared` crate; the generic CRUD repositories implement [`RecordStorage`]
//! so the domain layer can treat them uniformly.
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: SQLite through SQLx, schema installed on open
//! - **Referential integrity**: foreign keys enabled on every connection
//! - **Amounts**: stored as the decimal text the client submitted

pub mod connection;
pub mod repositories;
pub mod traits;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::{
    AssetRepository, BillPaymentRepository, BillRepository, InvestmentRepository,
    LedgerRepository, LedgerTable, LiabilityRepository, TradingAccountRepository,
    VehicleRepository,
};
pub use traits::RecordStorage;
