// Repository modules
pub mod asset_repository;
pub mod bill_payment_repository;
pub mod bill_repository;
pub mod investment_repository;
pub mod ledger_repository;
pub mod liability_repository;
pub mod trading_account_repository;
pub mod vehicle_repository;

// Re-export repository types
pub use asset_repository::AssetRepository;
pub use bill_payment_repository::BillPaymentRepository;
pub use bill_repository::BillRepository;
pub use investment_repository::InvestmentRepository;
pub use ledger_repository::{LedgerRepository, LedgerTable};
pub use liability_repository::LiabilityRepository;
pub use trading_account_repository::TradingAccountRepository;
pub use vehicle_repository::VehicleRepository;

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;

/// Decode a text column into one of the shared enums
pub(crate) fn decode_text<T>(row: &SqliteRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.try_get(column)?;
    text.parse::<T>().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
