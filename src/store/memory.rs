//! 内存物品存储（测试与无持久化部署用）

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Item, ItemStore};
use crate::core::StorageError;

/// 按插入顺序保存；覆盖写保持原位置
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: RwLock<Vec<Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有用户的物品总数
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn get(&self, owner: &str, name: &str) -> Result<Option<Item>, StorageError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .find(|i| i.owner == owner && i.name == name)
            .cloned())
    }

    async fn put(&self, item: &Item) -> Result<(), StorageError> {
        let mut items = self.items.write().await;
        match items
            .iter_mut()
            .find(|i| i.owner == item.owner && i.name == item.name)
        {
            Some(existing) => *existing = item.clone(),
            None => items.push(item.clone()),
        }
        Ok(())
    }

    async fn delete(&self, owner: &str, name: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().await;
        items.retain(|i| !(i.owner == owner && i.name == name));
        Ok(())
    }

    async fn scan_by_owner(&self, owner: &str) -> Result<Vec<Item>, StorageError> {
        let items = self.items.read().await;
        Ok(items.iter().filter(|i| i.owner == owner).cloned().collect())
    }
}
