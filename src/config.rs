//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `MYBAG__*` 覆盖（双下划线表示嵌套，如 `MYBAG__STORAGE__BACKEND=memory`）。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub skill: SkillSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub server: ServerSection,
}

/// [skill] 段：技能身份与请求时效
#[derive(Debug, Clone, Deserialize)]
pub struct SkillSection {
    /// 平台分配的技能 ID；未配置时拒绝所有请求
    pub application_id: Option<String>,
    /// 请求 timestamp 与当前时间允许的最大偏差（秒），0 表示不校验
    #[serde(default = "default_timestamp_tolerance_secs")]
    pub timestamp_tolerance_secs: u64,
}

impl Default for SkillSection {
    fn default() -> Self {
        Self {
            application_id: None,
            timestamp_tolerance_secs: default_timestamp_tolerance_secs(),
        }
    }
}

fn default_timestamp_tolerance_secs() -> u64 {
    150
}

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    Sqlite,
}

/// [storage] 段：后端、表名、SQLite 文件路径
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSection {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_table")]
    pub table: String,
    /// SQLite 数据库文件，未设置时用 ./data/mybag.db
    pub path: Option<PathBuf>,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            table: default_table(),
            path: None,
        }
    }
}

impl StorageSection {
    pub fn db_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from("data/mybag.db"))
    }
}

fn default_table() -> String {
    "MyBagItems".to_string()
}

/// [server] 段：HTTP 监听地址
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

/// 从 config 目录加载配置，环境变量 MYBAG__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 MYBAG__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("MYBAG")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}
