//! 语音平台响应：指令与响应信封
//!
//! 每次调用恰好产生一个 Directive，再序列化为平台要求的响应信封。

use serde::{Deserialize, Serialize};

use crate::platform::Intent;

/// 发给平台的指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// 开放轮次，等待用户继续说话
    Ask { speech: String, reprompt: String },
    /// 播报后结束会话
    Tell { speech: String },
    /// 请求某个槽位的值
    ElicitSlot {
        slot: String,
        speech: String,
        reprompt: String,
        updated_intent: Option<Intent>,
    },
    /// 请求用户确认某个槽位的值
    ConfirmSlot {
        slot: String,
        speech: String,
        reprompt: String,
        updated_intent: Option<Intent>,
    },
    /// 空响应，仅用于 SessionEndedRequest（平台不允许在此播报）
    End,
}

impl Directive {
    pub fn ask(speech: impl Into<String>, reprompt: impl Into<String>) -> Self {
        Self::Ask {
            speech: speech.into(),
            reprompt: reprompt.into(),
        }
    }

    pub fn tell(speech: impl Into<String>) -> Self {
        Self::Tell {
            speech: speech.into(),
        }
    }

    /// 是否结束会话
    pub fn ends_session(&self) -> bool {
        matches!(self, Self::Tell { .. } | Self::End)
    }

    pub fn into_response(self) -> ResponseEnvelope {
        let body = match self {
            Self::Ask { speech, reprompt } => ResponseBody {
                output_speech: Some(OutputSpeech::ssml(&speech)),
                reprompt: Some(Reprompt::ssml(&reprompt)),
                should_end_session: Some(false),
                directives: Vec::new(),
            },
            Self::Tell { speech } => ResponseBody {
                output_speech: Some(OutputSpeech::ssml(&speech)),
                reprompt: None,
                should_end_session: Some(true),
                directives: Vec::new(),
            },
            Self::ElicitSlot {
                slot,
                speech,
                reprompt,
                updated_intent,
            } => ResponseBody {
                output_speech: Some(OutputSpeech::ssml(&speech)),
                reprompt: Some(Reprompt::ssml(&reprompt)),
                should_end_session: Some(false),
                directives: vec![DialogDirective::ElicitSlot {
                    slot_to_elicit: slot,
                    updated_intent,
                }],
            },
            Self::ConfirmSlot {
                slot,
                speech,
                reprompt,
                updated_intent,
            } => ResponseBody {
                output_speech: Some(OutputSpeech::ssml(&speech)),
                reprompt: Some(Reprompt::ssml(&reprompt)),
                should_end_session: Some(false),
                directives: vec![DialogDirective::ConfirmSlot {
                    slot_to_confirm: slot,
                    updated_intent,
                }],
            },
            Self::End => ResponseBody::default(),
        };

        ResponseEnvelope {
            version: "1.0".to_string(),
            response: body,
        }
    }
}

/// 响应信封顶层
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<DialogDirective>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: String,
    pub ssml: String,
}

impl OutputSpeech {
    /// 包一层 <speak>；text 本身视为 SSML，调用方负责转义用户提供的部分
    pub fn ssml(text: &str) -> Self {
        Self {
            speech_type: "SSML".to_string(),
            ssml: format!("<speak>{}</speak>", text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl Reprompt {
    pub fn ssml(text: &str) -> Self {
        Self {
            output_speech: OutputSpeech::ssml(text),
        }
    }
}

/// Dialog 指令（平台按 type 字段区分）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DialogDirective {
    #[serde(rename = "Dialog.ElicitSlot", rename_all = "camelCase")]
    ElicitSlot {
        slot_to_elicit: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        updated_intent: Option<Intent>,
    },
    #[serde(rename = "Dialog.ConfirmSlot", rename_all = "camelCase")]
    ConfirmSlot {
        slot_to_confirm: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        updated_intent: Option<Intent>,
    },
}
