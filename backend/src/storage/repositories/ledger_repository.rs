use async_trait::async_trait;
use shared::LedgerEntry;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite};

use crate::storage::connection::DbConnection;
use crate::storage::traits::RecordStorage;

const COLUMNS: &str = "id, date, amount, category, description, member, created_at";

/// Which side of the ledger a repository reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerTable {
    Income,
    Expenses,
}

impl LedgerTable {
    fn name(self) -> &'static str {
        match self {
            LedgerTable::Income => "income",
            LedgerTable::Expenses => "expenses",
        }
    }
}

/// Repository for income and expense rows
#[derive(Clone)]
pub struct LedgerRepository {
    db: DbConnection,
    table: LedgerTable,
}

impl LedgerRepository {
    pub fn new(db: DbConnection, table: LedgerTable) -> Self {
        Self { db, table }
    }

    pub fn income(db: DbConnection) -> Self {
        Self::new(db, LedgerTable::Income)
    }

    pub fn expenses(db: DbConnection) -> Self {
        Self::new(db, LedgerTable::Expenses)
    }

    /// Insert an entry through any executor, so callers can take part in a
    /// wider transaction
    pub async fn insert_with<'e, E>(executor: E, table: LedgerTable, entry: &LedgerEntry) -> sqlx::Result<()>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!(
            "INSERT INTO {} ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?)",
            table.name()
        );
        sqlx::query(&sql)
            .bind(&entry.id)
            .bind(&entry.date)
            .bind(&entry.amount)
            .bind(&entry.category)
            .bind(&entry.description)
            .bind(&entry.member)
            .bind(&entry.created_at)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// List entries dated within `month` (`YYYY-MM`), or all entries when `None`
    pub async fn list_for_month(&self, month: Option<&str>) -> sqlx::Result<Vec<LedgerEntry>> {
        let rows = match month {
            Some(month) => {
                let sql = format!(
                    "SELECT {COLUMNS} FROM {} WHERE date LIKE ? ORDER BY ROWID DESC",
                    self.table.name()
                );
                sqlx::query(&sql)
                    .bind(format!("{}-%", month))
                    .fetch_all(self.db.pool())
                    .await?
            }
            None => {
                let sql = format!("SELECT {COLUMNS} FROM {} ORDER BY ROWID DESC", self.table.name());
                sqlx::query(&sql).fetch_all(self.db.pool()).await?
            }
        };

        rows.iter().map(entry_from_row).collect()
    }

    /// Count rows in the table
    pub async fn count(&self) -> sqlx::Result<i64> {
        let sql = format!("SELECT COUNT(*) AS count FROM {}", self.table.name());
        let row = sqlx::query(&sql).fetch_one(self.db.pool()).await?;
        row.try_get("count")
    }
}

fn entry_from_row(row: &SqliteRow) -> sqlx::Result<LedgerEntry> {
    Ok(LedgerEntry {
        id: row.try_get("id")?,
        date: row.try_get("date")?,
        amount: row.try_get("amount")?,
        category: row.try_get("category")?,
        description: row.try_get("description")?,
        member: row.try_get("member")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl RecordStorage<LedgerEntry> for LedgerRepository {
    async fn store(&self, entry: &LedgerEntry) -> sqlx::Result<()> {
        Self::insert_with(self.db.pool(), self.table, entry).await
    }

    async fn get(&self, id: &str) -> sqlx::Result<Option<LedgerEntry>> {
        let sql = format!("SELECT {COLUMNS} FROM {} WHERE id = ?", self.table.name());
        let row = sqlx::query(&sql).bind(id).fetch_optional(self.db.pool()).await?;
        row.as_ref().map(entry_from_row).transpose()
    }

    async fn list(&self) -> sqlx::Result<Vec<LedgerEntry>> {
        self.list_for_month(None).await
    }

    async fn update(&self, entry: &LedgerEntry) -> sqlx::Result<bool> {
        let sql = format!(
            "UPDATE {} SET date = ?, amount = ?, category = ?, description = ?, member = ? WHERE id = ?",
            self.table.name()
        );
        let result = sqlx::query(&sql)
            .bind(&entry.date)
            .bind(&entry.amount)
            .bind(&entry.category)
            .bind(&entry.description)
            .bind(&entry.member)
            .bind(&entry.id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> sqlx::Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", self.table.name());
        let result = sqlx::query(&sql).bind(id).execute(self.db.pool()).await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, date: &str, amount: &str, category: &str) -> LedgerEntry {
        LedgerEntry {
            id: id.to_string(),
            date: date.to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
            description: Some(format!("{} entry", category)),
            member: None,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_income_and_expenses_are_separate_tables() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let income = LedgerRepository::income(db.clone());
        let expenses = LedgerRepository::expenses(db);

        income.store(&entry("i1", "2024-03-01", "5000.00", "Salary")).await.unwrap();

        assert!(income.get("i1").await.unwrap().is_some());
        assert!(expenses.get("i1").await.unwrap().is_none());
        assert_eq!(expenses.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_for_month_filters_by_date_prefix() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let expenses = LedgerRepository::expenses(db);

        expenses.store(&entry("e1", "2024-02-28", "10.00", "Food")).await.unwrap();
        expenses.store(&entry("e2", "2024-03-01", "20.00", "Food")).await.unwrap();
        expenses.store(&entry("e3", "2024-03-31", "30.00", "Fuel")).await.unwrap();

        let march = expenses.list_for_month(Some("2024-03")).await.unwrap();
        let ids: Vec<&str> = march.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e3", "e2"]);

        assert_eq!(expenses.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let income = LedgerRepository::income(db);

        let mut stored = entry("i1", "2024-03-01", "5000.00", "Salary");
        income.store(&stored).await.unwrap();

        stored.amount = "5500.00".to_string();
        stored.member = Some("Ravi".to_string());
        assert!(income.update(&stored).await.unwrap());
        assert_eq!(income.get("i1").await.unwrap(), Some(stored));

        assert!(income.delete("i1").await.unwrap());
        assert!(!income.delete("i1").await.unwrap());
        assert!(income.get("i1").await.unwrap().is_none());
    }
}
