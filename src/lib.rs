//! MyBag - 语音技能后端：按用户管理购物袋清单
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型与恢复（错误 → 播报 / 拒绝）
//! - **dialog**: 槽位模型与 elicit / confirm 状态机
//! - **observability**: 日志初始化
//! - **platform**: 语音平台请求 / 响应信封
//! - **server**: HTTP Webhook 入口
//! - **skill**: 意图、处理器与分发
//! - **store**: 物品存储（内存 / SQLite）

pub mod config;
pub mod core;
pub mod dialog;
pub mod observability;
pub mod platform;
pub mod server;
pub mod skill;
pub mod store;

pub use skill::Skill;
