//! MyBag 技能服务
//!
//! 入口：初始化日志、加载配置、打开物品存储，启动 HTTP 服务。
//!
//! 环境变量:
//! - MYBAG__SKILL__APPLICATION_ID: 技能 ID（必填，否则拒绝所有请求）
//! - MYBAG__STORAGE__BACKEND: memory / sqlite
//! - MYBAG__SERVER__BIND_ADDR: 监听地址（默认 127.0.0.1:3000）

use std::sync::Arc;

use anyhow::Context;
use mybag::config::load_config;
use mybag::server::create_router;
use mybag::store::create_item_store;
use mybag::{observability, Skill};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init();

    let cfg = load_config(None).context("Failed to load config")?;
    if cfg.skill.application_id.is_none() {
        tracing::warn!("skill.application_id is not configured; every request will be rejected");
    }

    let store = create_item_store(&cfg.storage)
        .await
        .context("Failed to open item store")?;
    let skill = Arc::new(Skill::new(store, &cfg.skill));
    let app = create_router(skill);

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.server.bind_addr))?;
    tracing::info!("MyBag skill listening on http://{}", cfg.server.bind_addr);
    tracing::info!("Skill endpoint: POST http://{}/skill", cfg.server.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
    }
    tracing::info!("Shutting down...");
}
