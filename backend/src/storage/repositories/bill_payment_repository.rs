use shared::{BillPayment, PaymentStatus};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite};

use crate::storage::connection::DbConnection;
use crate::storage::repositories::decode_text;

/// Repository for payments recorded against recurring bills.
///
/// Payments are immutable, so there is no update path.
#[derive(Clone)]
pub struct BillPaymentRepository {
    db: DbConnection,
}

impl BillPaymentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a payment through any executor, so callers can take part in a
    /// wider transaction
    pub async fn insert_with<'e, E>(executor: E, payment: &BillPayment) -> sqlx::Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO bill_payments (id, bill_id, date, amount, status, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payment.id)
        .bind(&payment.bill_id)
        .bind(&payment.date)
        .bind(&payment.amount)
        .bind(payment.status.as_str())
        .bind(&payment.notes)
        .bind(&payment.created_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Get a payment by ID
    pub async fn get_payment(&self, id: &str) -> sqlx::Result<Option<BillPayment>> {
        let row = sqlx::query(
            r#"
            SELECT id, bill_id, date, amount, status, notes, created_at
            FROM bill_payments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(payment_from_row).transpose()
    }

    /// List payments, optionally only those recorded against one bill.
    /// Returns newest payment date first.
    pub async fn list_payments(&self, bill_id: Option<&str>) -> sqlx::Result<Vec<BillPayment>> {
        let rows = match bill_id {
            Some(bill_id) => {
                sqlx::query(
                    r#"
                    SELECT id, bill_id, date, amount, status, notes, created_at
                    FROM bill_payments
                    WHERE bill_id = ?
                    ORDER BY date DESC, ROWID DESC
                    "#,
                )
                .bind(bill_id)
                .fetch_all(self.db.pool())
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, bill_id, date, amount, status, notes, created_at
                    FROM bill_payments
                    ORDER BY date DESC, ROWID DESC
                    "#,
                )
                .fetch_all(self.db.pool())
                .await?
            }
        };

        rows.iter().map(payment_from_row).collect()
    }

    /// Delete a payment by ID; the mirrored expense, if any, is left alone
    pub async fn delete_payment(&self, id: &str) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM bill_payments WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all payment rows
    pub async fn count(&self) -> sqlx::Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM bill_payments")
            .fetch_one(self.db.pool())
            .await?;
        row.try_get("count")
    }
}

fn payment_from_row(row: &SqliteRow) -> sqlx::Result<BillPayment> {
    Ok(BillPayment {
        id: row.try_get("id")?,
        bill_id: row.try_get("bill_id")?,
        date: row.try_get("date")?,
        amount: row.try_get("amount")?,
        status: decode_text::<PaymentStatus>(row, "status")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
    })
}
