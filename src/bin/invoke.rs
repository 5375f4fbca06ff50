//! MyBag 本地调用
//!
//! 从文件（或 stdin）读取一个请求信封，走与服务相同的分发逻辑，把响应信封打印到 stdout。
//!
//! 运行方式：
//! ```bash
//! cargo run --bin mybag-invoke -- event.json
//! cat event.json | cargo run --bin mybag-invoke
//! ```

use std::io::Read;

use anyhow::Context;
use mybag::config::load_config;
use mybag::platform::RequestEnvelope;
use mybag::store::create_item_store;
use mybag::Skill;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志写 stderr，stdout 只留响应 JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mybag=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read event file {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read event from stdin")?;
            buf
        }
    };
    let event: RequestEnvelope = serde_json::from_str(&raw).context("Invalid request envelope")?;

    let cfg = load_config(None).context("Failed to load config")?;
    let store = create_item_store(&cfg.storage)
        .await
        .context("Failed to open item store")?;
    let skill = Skill::new(store, &cfg.skill);

    let response = skill.invoke(&event).await.context("Invocation rejected")?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
