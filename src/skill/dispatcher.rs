//! 请求分发
//!
//! 校验技能身份与请求时效 → 解析意图 → 绑定 userId → 调用处理器 → 错误落成播报。
//! 除身份 / 时效校验失败外，每次调用恰好返回一个指令。

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::SkillSection;
use crate::core::{RecoveryAction, RecoveryEngine, SkillError};
use crate::platform::{Directive, RequestEnvelope, ResponseEnvelope};
use crate::skill::handlers;
use crate::skill::intents::{SkillIntent, SkillRequest};
use crate::store::ItemStore;

/// 技能实例：存储与配置在多次调用间共享
pub struct Skill {
    store: Arc<dyn ItemStore>,
    application_id: Option<String>,
    /// None 表示不校验 timestamp
    timestamp_tolerance: Option<chrono::Duration>,
    recovery: RecoveryEngine,
}

impl Skill {
    pub fn new(store: Arc<dyn ItemStore>, cfg: &SkillSection) -> Self {
        let timestamp_tolerance = (cfg.timestamp_tolerance_secs > 0)
            .then(|| i64::try_from(cfg.timestamp_tolerance_secs).ok())
            .flatten()
            .and_then(chrono::Duration::try_seconds);
        Self {
            store,
            application_id: cfg.application_id.clone(),
            timestamp_tolerance,
            recovery: RecoveryEngine::new(),
        }
    }

    /// 处理一次调用；Err 表示拒绝（不返回任何响应）
    pub async fn invoke(&self, event: &RequestEnvelope) -> Result<ResponseEnvelope, SkillError> {
        self.verify(event)?;

        tracing::info!(
            "Handling {} (request_id={})",
            event.request.request_type,
            event.request.request_id.as_deref().unwrap_or("-")
        );

        let directive = match self.dispatch(event).await {
            Ok(directive) => directive,
            Err(err) => match self.recovery.handle(&err) {
                RecoveryAction::Speak(directive) => directive,
                RecoveryAction::Reject => return Err(err),
            },
        };

        Ok(directive.into_response())
    }

    /// 身份与时效校验（fail-closed）
    fn verify(&self, event: &RequestEnvelope) -> Result<(), SkillError> {
        let received = event.application_id();
        match self.application_id.as_deref() {
            Some(expected) if received == Some(expected) => {}
            Some(_) => {
                tracing::warn!("Rejecting request for application {:?}", received);
                return Err(SkillError::ApplicationMismatch {
                    received: received.map(str::to_string),
                });
            }
            None => {
                tracing::error!("No application id configured -- rejecting request");
                return Err(SkillError::ApplicationMismatch {
                    received: received.map(str::to_string),
                });
            }
        }

        if let (Some(tolerance), Some(timestamp)) =
            (self.timestamp_tolerance, event.request.timestamp.as_deref())
        {
            let fresh = DateTime::parse_from_rfc3339(timestamp)
                .map(|ts| {
                    let skew = Utc::now().signed_duration_since(ts.with_timezone(&Utc));
                    skew.abs() <= tolerance
                })
                .unwrap_or(false);
            if !fresh {
                tracing::warn!("Rejecting stale request: timestamp {}", timestamp);
                return Err(SkillError::StaleRequest {
                    timestamp: timestamp.to_string(),
                });
            }
        }

        Ok(())
    }

    async fn dispatch(&self, event: &RequestEnvelope) -> Result<Directive, SkillError> {
        match SkillRequest::from_request(&event.request)? {
            SkillRequest::Launch => Ok(handlers::launch()),
            SkillRequest::SessionEnded { reason } => {
                tracing::info!("Session ended: {}", reason.as_deref().unwrap_or("unknown"));
                Ok(handlers::session_ended())
            }
            SkillRequest::Unhandled { description } => {
                tracing::error!("problem: unhandled {} ({:?})", description, event.request);
                Ok(handlers::unhandled())
            }
            SkillRequest::Intent { kind, intent } => {
                let owner = if kind.needs_owner() {
                    event.user_id().ok_or_else(|| {
                        SkillError::Validation(format!("{} without userId", kind.name()))
                    })?
                } else {
                    ""
                };
                let store = self.store.as_ref();

                match kind {
                    SkillIntent::AddItem => handlers::add_item(store, owner, &intent).await,
                    SkillIntent::GetAllItems => handlers::get_all_items(store, owner).await,
                    SkillIntent::DeleteItem => handlers::delete_item(store, owner, &intent).await,
                    SkillIntent::Help => Ok(handlers::help()),
                    SkillIntent::Cancel | SkillIntent::Stop => Ok(handlers::goodbye()),
                }
            }
        }
    }
}
