use async_trait::async_trait;
use shared::Investment;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;
use crate::storage::traits::RecordStorage;

/// Repository for investment operations
#[derive(Clone)]
pub struct InvestmentRepository {
    db: DbConnection,
}

impl InvestmentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn investment_from_row(row: &SqliteRow) -> sqlx::Result<Investment> {
    Ok(Investment {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        investment_type: row.try_get("investment_type")?,
        amount_invested: row.try_get("amount_invested")?,
        current_value: row.try_get("current_value")?,
        purchase_date: row.try_get("purchase_date")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl RecordStorage<Investment> for InvestmentRepository {
    async fn store(&self, investment: &Investment) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO investments (
                id, name, investment_type, amount_invested, current_value,
                purchase_date, description, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&investment.id)
        .bind(&investment.name)
        .bind(&investment.investment_type)
        .bind(&investment.amount_invested)
        .bind(&investment.current_value)
        .bind(&investment.purchase_date)
        .bind(&investment.description)
        .bind(&investment.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> sqlx::Result<Option<Investment>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, investment_type, amount_invested, current_value,
                   purchase_date, description, created_at
            FROM investments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(investment_from_row).transpose()
    }

    async fn list(&self) -> sqlx::Result<Vec<Investment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, investment_type, amount_invested, current_value,
                   purchase_date, description, created_at
            FROM investments
            ORDER BY ROWID DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(investment_from_row).collect()
    }

    async fn update(&self, investment: &Investment) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE investments
            SET name = ?, investment_type = ?, amount_invested = ?, current_value = ?,
                purchase_date = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&investment.name)
        .bind(&investment.investment_type)
        .bind(&investment.amount_invested)
        .bind(&investment.current_value)
        .bind(&investment.purchase_date)
        .bind(&investment.description)
        .bind(&investment.id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM investments WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
