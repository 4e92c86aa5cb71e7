use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// DbConnection owns the SQLite pool every repository works against
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and install the schema
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        Self::connect_with(options, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Initialize a private in-memory database for a single test
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // One connection so that every query sees the same in-memory database
        Self::connect_with(options, 1).await
    }

    async fn connect_with(options: SqliteConnectOptions, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        for table in ["income", "expenses"] {
            sqlx::query(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id TEXT PRIMARY KEY,
                    date TEXT NOT NULL,
                    amount TEXT NOT NULL,
                    category TEXT NOT NULL,
                    description TEXT,
                    member TEXT,
                    created_at TEXT NOT NULL
                );
                "#
            ))
            .execute(pool)
            .await?;

            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_date ON {table}(date);"
            ))
            .execute(pool)
            .await?;
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS assets (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                value TEXT NOT NULL,
                acquired_date TEXT,
                description TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS liabilities (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                amount TEXT NOT NULL,
                interest_rate TEXT,
                due_date TEXT,
                description TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS investments (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                investment_type TEXT NOT NULL,
                amount_invested TEXT NOT NULL,
                current_value TEXT NOT NULL,
                purchase_date TEXT,
                description TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS rental_vehicles (
                id TEXT PRIMARY KEY,
                vehicle_number TEXT NOT NULL,
                model TEXT NOT NULL,
                driver_name TEXT,
                monthly_rent TEXT NOT NULL,
                status TEXT NOT NULL CHECK (status IN ('active', 'maintenance', 'idle')),
                acquired_date TEXT,
                description TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS trading_accounts (
                id TEXT PRIMARY KEY,
                broker TEXT NOT NULL,
                account_number TEXT NOT NULL,
                currency TEXT NOT NULL,
                deposit TEXT NOT NULL,
                current_balance TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS recurring_bills (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                bill_type TEXT NOT NULL CHECK (bill_type IN ('payable', 'receivable')),
                category TEXT NOT NULL,
                amount TEXT NOT NULL,
                frequency TEXT NOT NULL CHECK (frequency IN ('weekly', 'monthly', 'yearly')),
                next_due_date TEXT,
                member TEXT NOT NULL DEFAULT '',
                is_active INTEGER NOT NULL DEFAULT 1,
                description TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Payments outlive their bill: deleting a bill keeps its history and
        // clears the reference instead of leaving it dangling.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bill_payments (
                id TEXT PRIMARY KEY,
                bill_id TEXT REFERENCES recurring_bills (id) ON DELETE SET NULL,
                date TEXT NOT NULL,
                amount TEXT NOT NULL,
                status TEXT NOT NULL CHECK (status IN ('paid', 'pending', 'overdue')),
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_bill_payments_bill_id
            ON bill_payments(bill_id);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database schema ready");
        Ok(())
    }
}
