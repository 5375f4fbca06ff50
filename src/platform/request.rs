//! 语音平台请求信封
//!
//! 只解析技能用到的字段，其余字段忽略。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dialog::{ConfirmationStatus, Slot};

pub const LAUNCH_REQUEST: &str = "LaunchRequest";
pub const INTENT_REQUEST: &str = "IntentRequest";
pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

/// 请求信封顶层
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Option<Context>,
    pub request: Request,
}

impl RequestEnvelope {
    /// 用户 ID：优先 session.user，其次 context.System.user
    pub fn user_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.user.as_ref())
            .or_else(|| {
                self.context
                    .as_ref()
                    .and_then(|c| c.system.as_ref())
                    .and_then(|s| s.user.as_ref())
            })
            .map(|u| u.user_id.as_str())
            .filter(|id| !id.is_empty())
    }

    /// 请求声明的技能 ID：优先 session.application，其次 context.System.application
    pub fn application_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.application.as_ref())
            .or_else(|| {
                self.context
                    .as_ref()
                    .and_then(|c| c.system.as_ref())
                    .and_then(|s| s.application.as_ref())
            })
            .map(|a| a.application_id.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub application: Option<Application>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    #[serde(rename = "System", default)]
    pub system: Option<SystemContext>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemContext {
    #[serde(default)]
    pub application: Option<Application>,
    #[serde(default)]
    pub user: Option<User>,
}

/// request 段：LaunchRequest / IntentRequest / SessionEndedRequest 等
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub request_id: Option<String>,
    /// RFC 3339
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    /// SessionEndedRequest 的结束原因
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
}

/// 意图及其槽位；也用作 Dialog 指令的 updatedIntent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub confirmation_status: ConfirmationStatus,
    #[serde(default)]
    pub slots: BTreeMap<String, Slot>,
}

impl Intent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            confirmation_status: ConfirmationStatus::None,
            slots: BTreeMap::new(),
        }
    }

    /// 返回清空指定槽位后的副本（槽位不存在时补一个空槽位）
    pub fn with_slot_cleared(&self, slot: &str) -> Self {
        let mut updated = self.clone();
        updated
            .slots
            .entry(slot.to_string())
            .or_insert_with(|| Slot::new(slot))
            .clear();
        updated
    }
}
