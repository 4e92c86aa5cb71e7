use async_trait::async_trait;
use shared::Liability;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;
use crate::storage::traits::RecordStorage;

/// Repository for liability operations
#[derive(Clone)]
pub struct LiabilityRepository {
    db: DbConnection,
}

impl LiabilityRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn liability_from_row(row: &SqliteRow) -> sqlx::Result<Liability> {
    Ok(Liability {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        amount: row.try_get("amount")?,
        interest_rate: row.try_get("interest_rate")?,
        due_date: row.try_get("due_date")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl RecordStorage<Liability> for LiabilityRepository {
    async fn store(&self, liability: &Liability) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO liabilities (id, name, category, amount, interest_rate, due_date, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&liability.id)
        .bind(&liability.name)
        .bind(&liability.category)
        .bind(&liability.amount)
        .bind(&liability.interest_rate)
        .bind(&liability.due_date)
        .bind(&liability.description)
        .bind(&liability.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> sqlx::Result<Option<Liability>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, category, amount, interest_rate, due_date, description, created_at
            FROM liabilities
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(liability_from_row).transpose()
    }

    async fn list(&self) -> sqlx::Result<Vec<Liability>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, category, amount, interest_rate, due_date, description, created_at
            FROM liabilities
            ORDER BY ROWID DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(liability_from_row).collect()
    }

    async fn update(&self, liability: &Liability) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE liabilities
            SET name = ?, category = ?, amount = ?, interest_rate = ?, due_date = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&liability.name)
        .bind(&liability.category)
        .bind(&liability.amount)
        .bind(&liability.interest_rate)
        .bind(&liability.due_date)
        .bind(&liability.description)
        .bind(&liability.id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM liabilities WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
