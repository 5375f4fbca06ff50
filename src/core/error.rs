//! 技能错误类型与恢复动作
//!
//! 与 RecoveryEngine 配合：根据 SkillError 决定播报错误（Speak）还是直接拒绝请求（Reject）。

use thiserror::Error;

use crate::platform::Directive;

/// 存储层错误（传输失败、限流、表名非法等），每次调用只尝试一次
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),
}

/// 一次技能调用中可能出现的错误
#[derive(Error, Debug)]
pub enum SkillError {
    /// 请求缺少必需字段（如 userId、intent）
    #[error("Invalid request: {0}")]
    Validation(String),

    /// 添加的物品已存在
    #[error("Item already exists: {name}")]
    Conflict { name: String },

    /// 删除的物品不存在
    #[error("Item not found: {name}")]
    NotFound { name: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// 请求声明的技能 ID 与配置不符（或未配置），不返回任何响应
    #[error("Application id mismatch: received {received:?}")]
    ApplicationMismatch { received: Option<String> },

    /// 请求 timestamp 超出容忍窗口或无法解析
    #[error("Stale request: timestamp {timestamp}")]
    StaleRequest { timestamp: String },
}

/// 恢复引擎根据错误类型给出的动作
#[derive(Debug, Clone, PartialEq)]
pub enum RecoveryAction {
    /// 以该指令结束本次调用（终止会话的错误播报）
    Speak(Directive),
    /// 拒绝本次调用，不产生任何指令
    Reject,
}
