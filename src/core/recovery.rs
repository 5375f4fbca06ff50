//! 错误恢复引擎
//!
//! 根据 SkillError 类型返回 RecoveryAction：除身份校验失败外，每个错误都必须落成一条终止播报，
//! 保证每次调用恰好产生一个指令。

use crate::core::{RecoveryAction, SkillError};
use crate::platform::{escape_ssml, Directive};

pub const VALIDATION_SPEECH: &str = "Sorry, I could not understand that request.";
pub const STORAGE_SPEECH: &str = "Sorry, something went wrong with your bag. Please try again later.";

/// 将错误映射为可执行动作（播报 / 拒绝）
#[derive(Debug, Default)]
pub struct RecoveryEngine;

impl RecoveryEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, err: &SkillError) -> RecoveryAction {
        match err {
            SkillError::Validation(msg) => {
                tracing::warn!("Rejecting malformed request: {}", msg);
                RecoveryAction::Speak(Directive::tell(VALIDATION_SPEECH))
            }
            SkillError::Conflict { name } => RecoveryAction::Speak(Directive::tell(format!(
                "Item {} is already in your bag!",
                escape_ssml(name)
            ))),
            SkillError::NotFound { name } => RecoveryAction::Speak(Directive::tell(format!(
                "Item {} not in your bag",
                escape_ssml(name)
            ))),
            SkillError::Storage(e) => {
                tracing::error!("Storage failure: {}", e);
                RecoveryAction::Speak(Directive::tell(STORAGE_SPEECH))
            }
            SkillError::ApplicationMismatch { .. } | SkillError::StaleRequest { .. } => {
                RecoveryAction::Reject
            }
        }
    }
}
