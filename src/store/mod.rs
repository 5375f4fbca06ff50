//! 物品存储抽象层
//!
//! 定义统一的物品表接口（主键 = (UserId, Name)），支持内存和 SQLite 两种实现。
//! 所有操作都是单次尝试：无缓存、无重试、无幂等键；存在性检查由调用方先 get 再写。

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{StorageBackend, StorageSection};
use crate::core::StorageError;

pub use memory::InMemoryItemStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteItemStore;

/// 袋子里的一件物品；序列化布局与表记录一致（Name / UserId / Qty）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "UserId")]
    pub owner: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// 语音转写的数量，不保证是数字
    #[serde(rename = "Qty")]
    pub quantity: String,
}

impl Item {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

/// 物品存储接口
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// 按 (owner, name) 点查
    async fn get(&self, owner: &str, name: &str) -> Result<Option<Item>, StorageError>;

    /// 无条件写入（存在则覆盖）
    async fn put(&self, item: &Item) -> Result<(), StorageError>;

    /// 无条件删除（不存在也不报错）
    async fn delete(&self, owner: &str, name: &str) -> Result<(), StorageError>;

    /// 全表扫描并按 owner 过滤，按存储顺序返回
    async fn scan_by_owner(&self, owner: &str) -> Result<Vec<Item>, StorageError>;
}

/// 创建物品存储
///
/// 配置为 sqlite 且启用了 sqlite feature 时打开数据库文件；否则使用内存存储
pub async fn create_item_store(cfg: &StorageSection) -> Result<Arc<dyn ItemStore>, StorageError> {
    match cfg.backend {
        StorageBackend::Sqlite => {
            #[cfg(feature = "sqlite")]
            {
                let path = cfg.db_path();
                let store = SqliteItemStore::new(&path, &cfg.table).await?;
                tracing::info!("Using SQLite item store: {:?} (table {})", path, cfg.table);
                return Ok(Arc::new(store));
            }

            #[cfg(not(feature = "sqlite"))]
            tracing::warn!(
                "SQLite item store requested but sqlite feature not enabled, using memory store"
            );
        }
        StorageBackend::Memory => {}
    }

    tracing::info!("Using in-memory item store");
    Ok(Arc::new(InMemoryItemStore::new()))
}

/// 表名只允许字母、数字、下划线，且不以数字开头（表名会拼进 SQL）
pub fn validate_table_name(table: &str) -> Result<(), StorageError> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidTableName(table.to_string()))
    }
}
