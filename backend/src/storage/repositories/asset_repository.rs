use async_trait::async_trait;
use shared::Asset;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;
use crate::storage::traits::RecordStorage;

/// Repository for asset operations
#[derive(Clone)]
pub struct AssetRepository {
    db: DbConnection,
}

impl AssetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn asset_from_row(row: &SqliteRow) -> sqlx::Result<Asset> {
    Ok(Asset {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        value: row.try_get("value")?,
        acquired_date: row.try_get("acquired_date")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl RecordStorage<Asset> for AssetRepository {
    async fn store(&self, asset: &Asset) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO assets (id, name, category, value, acquired_date, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&asset.id)
        .bind(&asset.name)
        .bind(&asset.category)
        .bind(&asset.value)
        .bind(&asset.acquired_date)
        .bind(&asset.description)
        .bind(&asset.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> sqlx::Result<Option<Asset>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, category, value, acquired_date, description, created_at
            FROM assets
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(asset_from_row).transpose()
    }

    async fn list(&self) -> sqlx::Result<Vec<Asset>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, category, value, acquired_date, description, created_at
            FROM assets
            ORDER BY ROWID DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(asset_from_row).collect()
    }

    async fn update(&self, asset: &Asset) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE assets
            SET name = ?, category = ?, value = ?, acquired_date = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&asset.name)
        .bind(&asset.category)
        .bind(&asset.value)
        .bind(&asset.acquired_date)
        .bind(&asset.description)
        .bind(&asset.id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM assets WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_list_newest_first() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repo = AssetRepository::new(db);

        for (id, name) in [("a1", "Flat"), ("a2", "Laptop")] {
            repo.store(&Asset {
                id: id.to_string(),
                name: name.to_string(),
                category: "Property".to_string(),
                value: "100.00".to_string(),
                acquired_date: None,
                description: None,
                created_at: "2024-01-01T00:00:00+00:00".to_string(),
            })
            .await
            .unwrap();
        }

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Laptop", "Flat"]);
    }
}
