use async_trait::async_trait;
use shared::{BillFrequency, BillType, RecurringBill};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite};

use crate::storage::connection::DbConnection;
use crate::storage::repositories::decode_text;
use crate::storage::traits::RecordStorage;

/// Repository for recurring bill definitions
#[derive(Clone)]
pub struct BillRepository {
    db: DbConnection,
}

impl BillRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Look up a bill through any executor, so the read can share a
    /// transaction with the writes that depend on it
    pub async fn get_with<'e, E>(executor: E, id: &str) -> sqlx::Result<Option<RecurringBill>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query(
            r#"
            SELECT id, name, bill_type, category, amount, frequency, next_due_date,
                   member, is_active, description, created_at
            FROM recurring_bills
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.as_ref().map(bill_from_row).transpose()
    }

    /// List bills of one type, most recently created first
    pub async fn list_by_type(&self, bill_type: BillType) -> sqlx::Result<Vec<RecurringBill>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, bill_type, category, amount, frequency, next_due_date,
                   member, is_active, description, created_at
            FROM recurring_bills
            WHERE bill_type = ?
            ORDER BY ROWID DESC
            "#,
        )
        .bind(bill_type.as_str())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(bill_from_row).collect()
    }

    /// List active bills that have a next due date set
    pub async fn list_active_scheduled(&self) -> sqlx::Result<Vec<RecurringBill>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, bill_type, category, amount, frequency, next_due_date,
                   member, is_active, description, created_at
            FROM recurring_bills
            WHERE is_active = 1 AND next_due_date IS NOT NULL
            ORDER BY next_due_date ASC, name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(bill_from_row).collect()
    }
}

fn bill_from_row(row: &SqliteRow) -> sqlx::Result<RecurringBill> {
    Ok(RecurringBill {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        bill_type: decode_text::<BillType>(row, "bill_type")?,
        category: row.try_get("category")?,
        amount: row.try_get("amount")?,
        frequency: decode_text::<BillFrequency>(row, "frequency")?,
        next_due_date: row.try_get("next_due_date")?,
        member: row.try_get("member")?,
        is_active: row.try_get("is_active")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl RecordStorage<RecurringBill> for BillRepository {
    async fn store(&self, bill: &RecurringBill) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO recurring_bills (
                id, name, bill_type, category, amount, frequency, next_due_date,
                member, is_active, description, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&bill.id)
        .bind(&bill.name)
        .bind(bill.bill_type.as_str())
        .bind(&bill.category)
        .bind(&bill.amount)
        .bind(bill.frequency.as_str())
        .bind(&bill.next_due_date)
        .bind(&bill.member)
        .bind(bill.is_active)
        .bind(&bill.description)
        .bind(&bill.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> sqlx::Result<Option<RecurringBill>> {
        Self::get_with(self.db.pool(), id).await
    }

    async fn list(&self) -> sqlx::Result<Vec<RecurringBill>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, bill_type, category, amount, frequency, next_due_date,
                   member, is_active, description, created_at
            FROM recurring_bills
            ORDER BY ROWID DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(bill_from_row).collect()
    }

    async fn update(&self, bill: &RecurringBill) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE recurring_bills
            SET name = ?, bill_type = ?, category = ?, amount = ?, frequency = ?,
                next_due_date = ?, member = ?, is_active = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&bill.name)
        .bind(bill.bill_type.as_str())
        .bind(&bill.category)
        .bind(&bill.amount)
        .bind(bill.frequency.as_str())
        .bind(&bill.next_due_date)
        .bind(&bill.member)
        .bind(bill.is_active)
        .bind(&bill.description)
        .bind(&bill.id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM recurring_bills WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
