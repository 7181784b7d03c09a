//! One record type in one `(id, data)` table.

use super::{validate_table_prefix, Database};
use crate::persistence::PersistenceError;

#[derive(Clone)]
pub struct SqlStore {
    database: Database,
    table: &'static str,
}

impl SqlStore {
    /// Bind a store to `database`; records live in `<prefix><table>`.
    pub fn new(database: Database, table: &'static str) -> Self {
        Self { database, table }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn table_name(&self, table_prefix: Option<&str>) -> Result<String, PersistenceError> {
        let prefix = table_prefix.unwrap_or_default();
        validate_table_prefix(prefix)?;
        Ok(format!("{}{}", prefix, self.table))
    }

    pub async fn create_table(&self, table_prefix: Option<&str>) -> Result<(), PersistenceError> {
        let table = self.table_name(table_prefix)?;
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {table} (\
             id VARCHAR(36) NOT NULL PRIMARY KEY, \
             data TEXT NOT NULL)"
        );
        sqlx::query(&sql).execute(self.database.pool()).await?;
        tracing::debug!(table = %table, "Ensured table exists");
        Ok(())
    }

    pub async fn exists(&self, table_prefix: Option<&str>, id: &str) -> Result<bool, PersistenceError> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", self.table_name(table_prefix)?);
        let (count,): (i64,) = sqlx::query_as(&sql)
            .bind(id)
            .fetch_one(self.database.pool())
            .await?;
        Ok(count > 0)
    }

    pub async fn ids(&self, table_prefix: Option<&str>) -> Result<Vec<String>, PersistenceError> {
        let sql = format!("SELECT id FROM {} ORDER BY id", self.table_name(table_prefix)?);
        let rows: Vec<(String,)> = sqlx::query_as(&sql)
            .fetch_all(self.database.pool())
            .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    pub async fn load_all(&self, table_prefix: Option<&str>) -> Result<Vec<String>, PersistenceError> {
        let sql = format!("SELECT data FROM {} ORDER BY id", self.table_name(table_prefix)?);
        let rows: Vec<(String,)> = sqlx::query_as(&sql)
            .fetch_all(self.database.pool())
            .await?;
        Ok(rows.into_iter().map(|(data,)| data).collect())
    }

    pub async fn load(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> Result<Option<String>, PersistenceError> {
        let sql = format!("SELECT data FROM {} WHERE id = ?", self.table_name(table_prefix)?);
        let row: Option<(String,)> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.database.pool())
            .await?;
        Ok(row.map(|(data,)| data))
    }

    /// Insert a new row. Fails if the id is already stored.
    pub async fn insert(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> Result<(), PersistenceError> {
        let sql = format!("INSERT INTO {} (id, data) VALUES (?, ?)", self.table_name(table_prefix)?);
        sqlx::query(&sql)
            .bind(id)
            .bind(data)
            .execute(self.database.pool())
            .await?;
        Ok(())
    }

    /// Replace the data of an existing row. Missing ids are left alone.
    pub async fn update(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> Result<(), PersistenceError> {
        let sql = format!("UPDATE {} SET data = ? WHERE id = ?", self.table_name(table_prefix)?);
        sqlx::query(&sql)
            .bind(data)
            .bind(id)
            .execute(self.database.pool())
            .await?;
        Ok(())
    }

    pub async fn delete(&self, table_prefix: Option<&str>, id: &str) -> Result<(), PersistenceError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", self.table_name(table_prefix)?);
        sqlx::query(&sql)
            .bind(id)
            .execute(self.database.pool())
            .await?;
        Ok(())
    }
}
