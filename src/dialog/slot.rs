//! 槽位：一次意图多轮对话中待收集的参数

use serde::{Deserialize, Serialize};

/// 槽位确认状态；请求中缺省时视为 NONE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfirmationStatus {
    #[default]
    None,
    Unconfirmed,
    Confirmed,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub confirmation_status: ConfirmationStatus,
}

impl Slot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_status(mut self, status: ConfirmationStatus) -> Self {
        self.confirmation_status = status;
        self
    }

    /// 去除首尾空白后的值；空串视为未提供
    pub fn filled_value(&self) -> Option<&str> {
        self.value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// 丢弃已有值并重置确认状态（重新询问前调用）
    pub fn clear(&mut self) {
        self.value = None;
        self.confirmation_status = ConfirmationStatus::None;
    }
}
