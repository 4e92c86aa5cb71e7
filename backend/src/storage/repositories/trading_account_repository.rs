use async_trait::async_trait;
use shared::TradingAccount;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;
use crate::storage::traits::RecordStorage;

/// Repository for forex trading accounts
#[derive(Clone)]
pub struct TradingAccountRepository {
    db: DbConnection,
}

impl TradingAccountRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn account_from_row(row: &SqliteRow) -> sqlx::Result<TradingAccount> {
    Ok(TradingAccount {
        id: row.try_get("id")?,
        broker: row.try_get("broker")?,
        account_number: row.try_get("account_number")?,
        currency: row.try_get("currency")?,
        deposit: row.try_get("deposit")?,
        current_balance: row.try_get("current_balance")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl RecordStorage<TradingAccount> for TradingAccountRepository {
    async fn store(&self, account: &TradingAccount) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO trading_accounts (
                id, broker, account_number, currency, deposit, current_balance, description, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&account.id)
        .bind(&account.broker)
        .bind(&account.account_number)
        .bind(&account.currency)
        .bind(&account.deposit)
        .bind(&account.current_balance)
        .bind(&account.description)
        .bind(&account.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> sqlx::Result<Option<TradingAccount>> {
        let row = sqlx::query(
            r#"
            SELECT id, broker, account_number, currency, deposit, current_balance, description, created_at
            FROM trading_accounts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn list(&self) -> sqlx::Result<Vec<TradingAccount>> {
        let rows = sqlx::query(
            r#"
            SELECT id, broker, account_number, currency, deposit, current_balance, description, created_at
            FROM trading_accounts
            ORDER BY ROWID DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(account_from_row).collect()
    }

    async fn update(&self, account: &TradingAccount) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE trading_accounts
            SET broker = ?, account_number = ?, currency = ?, deposit = ?,
                current_balance = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&account.broker)
        .bind(&account.account_number)
        .bind(&account.currency)
        .bind(&account.deposit)
        .bind(&account.current_balance)
        .bind(&account.description)
        .bind(&account.id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM trading_accounts WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
