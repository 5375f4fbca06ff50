//! 多轮对话：槽位模型与 elicit / confirm 解析

pub mod resolver;
pub mod slot;

pub use resolver::{resolve, DialogueDirective, ResolvedSlots, SlotSpec};
pub use slot::{ConfirmationStatus, Slot};
