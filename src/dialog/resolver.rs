//! 槽位解析状态机
//!
//! 按声明顺序逐个检查槽位：缺值 → 询问（Elicit）；有值未确认 → 复述确认（Confirm）；
//! 被否认 → 重新询问；全部 CONFIRMED → Proceed。第一个未满足的槽位决定结果，后面的槽位不看。
//! 纯函数，不持有跨轮状态，所有状态由平台每轮随请求带回。

use std::collections::BTreeMap;

use crate::dialog::{ConfirmationStatus, Slot};
use crate::platform::escape_ssml;

/// 单个槽位的声明：名称与各阶段提示语
#[derive(Clone, Copy)]
pub struct SlotSpec {
    pub name: &'static str,
    /// 首次询问
    pub ask: &'static str,
    /// 确认被否认后重新询问
    pub ask_again: &'static str,
    /// 询问的 reprompt
    pub reprompt: &'static str,
    /// 用（已转义的）槽位值生成是/否确认问句
    pub confirm: fn(&str) -> String,
}

impl std::fmt::Debug for SlotSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotSpec")
            .field("name", &self.name)
            .field("ask", &self.ask)
            .finish_non_exhaustive()
    }
}

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueDirective {
    Elicit {
        slot: &'static str,
        speech: String,
        reprompt: String,
    },
    Confirm {
        slot: &'static str,
        speech: String,
        reprompt: String,
    },
    /// 所有槽位均已确认，携带确认后的值
    Proceed(ResolvedSlots),
}

/// 已确认的槽位值（按槽位名索引，值已去除首尾空白）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSlots(BTreeMap<&'static str, String>);

impl ResolvedSlots {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 计算下一步对话动作
pub fn resolve(specs: &[SlotSpec], slots: &BTreeMap<String, Slot>) -> DialogueDirective {
    let mut resolved = BTreeMap::new();

    for spec in specs {
        let slot = slots.get(spec.name);
        let Some(value) = slot.and_then(Slot::filled_value) else {
            return DialogueDirective::Elicit {
                slot: spec.name,
                speech: spec.ask.to_string(),
                reprompt: spec.reprompt.to_string(),
            };
        };

        let status = slot
            .map(|s| s.confirmation_status)
            .unwrap_or_default();
        match status {
            ConfirmationStatus::Confirmed => {
                resolved.insert(spec.name, value.to_string());
            }
            ConfirmationStatus::Denied => {
                return DialogueDirective::Elicit {
                    slot: spec.name,
                    speech: spec.ask_again.to_string(),
                    reprompt: spec.reprompt.to_string(),
                };
            }
            ConfirmationStatus::None | ConfirmationStatus::Unconfirmed => {
                let question = (spec.confirm)(&escape_ssml(value));
                return DialogueDirective::Confirm {
                    slot: spec.name,
                    speech: question.clone(),
                    reprompt: question,
                };
            }
        }
    }

    DialogueDirective::Proceed(ResolvedSlots(resolved))
}
