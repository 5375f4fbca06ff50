//! SQLite 物品存储
//!
//! 单表，主键 ("Name", "UserId")，属性 "Qty"。UserId 上不建索引：
//! scan_by_owner 是全表扫描后过滤，只适合小规模数据。

use std::path::Path;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use super::{validate_table_name, Item, ItemStore};
use crate::core::StorageError;

pub struct SqliteItemStore {
    pool: SqlitePool,
    table: String,
}

impl SqliteItemStore {
    /// 打开（必要时创建）数据库文件并建表
    pub async fn new(db_path: impl AsRef<Path>, table: &str) -> Result<Self, StorageError> {
        validate_table_name(table)?;

        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Backend(format!("create {}: {}", parent.display(), e))
            })?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        let store = Self {
            pool,
            table: table.to_string(),
        };
        store.init_table().await?;

        Ok(store)
    }

    async fn init_table(&self) -> Result<(), StorageError> {
        sqlx::query(&format!(
            r#"CREATE TABLE IF NOT EXISTS "{}" (
                "Name" TEXT NOT NULL,
                "UserId" TEXT NOT NULL,
                "Qty" TEXT NOT NULL,
                PRIMARY KEY ("Name", "UserId")
            )"#,
            self.table
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 关闭连接池
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn row_to_item(row: &SqliteRow) -> Result<Item, StorageError> {
    Ok(Item {
        owner: row.try_get("UserId")?,
        name: row.try_get("Name")?,
        quantity: row.try_get("Qty")?,
    })
}

#[async_trait]
impl ItemStore for SqliteItemStore {
    async fn get(&self, owner: &str, name: &str) -> Result<Option<Item>, StorageError> {
        let sql = format!(
            r#"SELECT "Name", "UserId", "Qty" FROM "{}" WHERE "Name" = ? AND "UserId" = ?"#,
            self.table
        );
        let row = sqlx::query(&sql)
            .bind(name)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_item).transpose()
    }

    async fn put(&self, item: &Item) -> Result<(), StorageError> {
        // ON CONFLICT 原地更新，保留 rowid（扫描顺序不变）
        let sql = format!(
            r#"INSERT INTO "{}" ("Name", "UserId", "Qty") VALUES (?, ?, ?)
               ON CONFLICT ("Name", "UserId") DO UPDATE SET "Qty" = excluded."Qty""#,
            self.table
        );
        sqlx::query(&sql)
            .bind(&item.name)
            .bind(&item.owner)
            .bind(&item.quantity)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, owner: &str, name: &str) -> Result<(), StorageError> {
        let sql = format!(
            r#"DELETE FROM "{}" WHERE "Name" = ? AND "UserId" = ?"#,
            self.table
        );
        sqlx::query(&sql)
            .bind(name)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn scan_by_owner(&self, owner: &str) -> Result<Vec<Item>, StorageError> {
        let sql = format!(
            r#"SELECT "Name", "UserId", "Qty" FROM "{}" WHERE "UserId" = ? ORDER BY rowid"#,
            self.table
        );
        let mut rows = sqlx::query(&sql).bind(owner).fetch(&self.pool);

        let mut items = Vec::new();
        while let Some(row) = rows.try_next().await? {
            items.push(row_to_item(&row)?);
        }

        Ok(items)
    }
}
