//! 意图识别：把平台请求映射为封闭的意图枚举
//!
//! 每个意图自带所需槽位声明（顺序即询问顺序）。

use crate::core::SkillError;
use crate::dialog::SlotSpec;
use crate::platform::{Intent, Request, INTENT_REQUEST, LAUNCH_REQUEST, SESSION_ENDED_REQUEST};

pub const ITEM_NAME: &str = "ItemName";
pub const ITEM_QUANTITY: &str = "ItemQuantity";

fn confirm_add_name(value: &str) -> String {
    format!("The name of the item is {}, correct?", value)
}

fn confirm_add_quantity(value: &str) -> String {
    format!("You need {}, right?", value)
}

fn confirm_delete_name(value: &str) -> String {
    format!("You would like to delete the item {}, correct?", value)
}

const ADD_ITEM_SLOTS: &[SlotSpec] = &[
    SlotSpec {
        name: ITEM_NAME,
        ask: "What is the name of the item?",
        ask_again: "What is the name of the item you would like to add?",
        reprompt: "Please tell me the name of the item",
        confirm: confirm_add_name,
    },
    SlotSpec {
        name: ITEM_QUANTITY,
        ask: "How many?",
        ask_again: "How many?",
        reprompt: "Please tell me how many.",
        confirm: confirm_add_quantity,
    },
];

const DELETE_ITEM_SLOTS: &[SlotSpec] = &[SlotSpec {
    name: ITEM_NAME,
    ask: "What is the name of the item you would like to remove?",
    ask_again: "What is the name of the item you would like to delete?",
    reprompt: "Please tell me the name of the item",
    confirm: confirm_delete_name,
}];

/// 技能支持的意图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillIntent {
    AddItem,
    GetAllItems,
    DeleteItem,
    Help,
    Cancel,
    Stop,
}

impl SkillIntent {
    pub const ALL: [SkillIntent; 6] = [
        SkillIntent::AddItem,
        SkillIntent::GetAllItems,
        SkillIntent::DeleteItem,
        SkillIntent::Help,
        SkillIntent::Cancel,
        SkillIntent::Stop,
    ];

    /// 交互模型中的意图名
    pub fn name(&self) -> &'static str {
        match self {
            SkillIntent::AddItem => "AddItemIntent",
            SkillIntent::GetAllItems => "GetAllItemsIntent",
            SkillIntent::DeleteItem => "DeleteItemIntent",
            SkillIntent::Help => "AMAZON.HelpIntent",
            SkillIntent::Cancel => "AMAZON.CancelIntent",
            SkillIntent::Stop => "AMAZON.StopIntent",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.name() == name)
    }

    /// 需要依次收集并确认的槽位
    pub fn required_slots(&self) -> &'static [SlotSpec] {
        match self {
            SkillIntent::AddItem => ADD_ITEM_SLOTS,
            SkillIntent::DeleteItem => DELETE_ITEM_SLOTS,
            SkillIntent::GetAllItems
            | SkillIntent::Help
            | SkillIntent::Cancel
            | SkillIntent::Stop => &[],
        }
    }

    /// 是否读写物品表（需要 userId）
    pub fn needs_owner(&self) -> bool {
        matches!(
            self,
            SkillIntent::AddItem | SkillIntent::GetAllItems | SkillIntent::DeleteItem
        )
    }
}

/// 解析后的请求
#[derive(Debug, Clone, PartialEq)]
pub enum SkillRequest {
    Launch,
    Intent { kind: SkillIntent, intent: Intent },
    SessionEnded { reason: Option<String> },
    /// 未知意图或未知请求类型
    Unhandled { description: String },
}

impl SkillRequest {
    pub fn from_request(request: &Request) -> Result<Self, SkillError> {
        match request.request_type.as_str() {
            LAUNCH_REQUEST => Ok(SkillRequest::Launch),
            SESSION_ENDED_REQUEST => Ok(SkillRequest::SessionEnded {
                reason: request.reason.clone(),
            }),
            INTENT_REQUEST => {
                let intent = request.intent.as_ref().ok_or_else(|| {
                    SkillError::Validation("IntentRequest without intent".to_string())
                })?;
                Ok(match SkillIntent::from_name(&intent.name) {
                    Some(kind) => SkillRequest::Intent {
                        kind,
                        intent: intent.clone(),
                    },
                    None => SkillRequest::Unhandled {
                        description: format!("intent {}", intent.name),
                    },
                })
            }
            other => Ok(SkillRequest::Unhandled {
                description: format!("request type {}", other),
            }),
        }
    }
}
