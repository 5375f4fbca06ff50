//! HTTP 入口
//!
//! 平台以 POST 投递请求信封，同步返回响应信封。身份 / 时效校验失败时返回 403 且不带响应体。

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::platform::{RequestEnvelope, ResponseEnvelope};
use crate::skill::Skill;

/// 创建技能路由
pub fn create_router(skill: Arc<Skill>) -> Router {
    Router::new()
        .route("/skill", post(invoke_skill))
        .route("/health", get(|| async { "OK" }))
        .with_state(skill)
}

/// POST /skill - 处理一次技能调用
async fn invoke_skill(
    State(skill): State<Arc<Skill>>,
    Json(event): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>, StatusCode> {
    match skill.invoke(&event).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::warn!("Invocation rejected: {}", e);
            Err(StatusCode::FORBIDDEN)
        }
    }
}
