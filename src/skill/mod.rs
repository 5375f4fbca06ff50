//! 技能：意图、处理器与分发

pub mod dispatcher;
pub mod handlers;
pub mod intents;

pub use dispatcher::Skill;
pub use intents::{SkillIntent, SkillRequest, ITEM_NAME, ITEM_QUANTITY};
