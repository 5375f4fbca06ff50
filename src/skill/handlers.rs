//! 意图处理器
//!
//! 涉及存储的处理器都遵循：解析槽位 → 存在性检查 → 写入或中止 → 播报。
//! 检查与写入不是原子的：两个并发的添加可能都通过检查，后写者覆盖前者。

use crate::core::SkillError;
use crate::dialog::{resolve, DialogueDirective, ResolvedSlots};
use crate::platform::{escape_ssml, Directive, Intent};
use crate::skill::intents::{SkillIntent, ITEM_NAME, ITEM_QUANTITY};
use crate::store::{Item, ItemStore};

pub const INSTRUCTIONS: &str = "Your bag is open.<break strength=\"medium\" /> \
    The following commands are available: add item, remove item, \
    whats in my bag. What would you like to do?";
pub const GOODBYE: &str = "Goodbye!";
pub const UNHANDLED: &str = "I do not know how to do that!";
pub const EMPTY_BAG: &str = "Your bag is empty!";
const LIST_PAUSE: &str = "<break strength=\"x-strong\" />";

pub fn launch() -> Directive {
    Directive::ask(INSTRUCTIONS, INSTRUCTIONS)
}

pub fn help() -> Directive {
    Directive::ask(INSTRUCTIONS, INSTRUCTIONS)
}

pub fn goodbye() -> Directive {
    Directive::tell(GOODBYE)
}

pub fn unhandled() -> Directive {
    Directive::ask(UNHANDLED, UNHANDLED)
}

pub fn session_ended() -> Directive {
    Directive::End
}

/// 槽位未齐时返回对话指令（Err），齐了返回确认后的值（Ok）
fn resolve_slots(kind: SkillIntent, intent: &Intent) -> Result<ResolvedSlots, Directive> {
    match resolve(kind.required_slots(), &intent.slots) {
        DialogueDirective::Proceed(values) => Ok(values),
        DialogueDirective::Elicit {
            slot,
            speech,
            reprompt,
        } => Err(Directive::ElicitSlot {
            slot: slot.to_string(),
            speech,
            reprompt,
            // 被否认的值不保留
            updated_intent: Some(intent.with_slot_cleared(slot)),
        }),
        DialogueDirective::Confirm {
            slot,
            speech,
            reprompt,
        } => Err(Directive::ConfirmSlot {
            slot: slot.to_string(),
            speech,
            reprompt,
            updated_intent: Some(intent.clone()),
        }),
    }
}

fn required<'a>(values: &'a ResolvedSlots, slot: &str) -> Result<&'a str, SkillError> {
    values
        .get(slot)
        .ok_or_else(|| SkillError::Validation(format!("slot {} not resolved", slot)))
}

/// 添加物品（槽位：ItemName、ItemQuantity）
pub async fn add_item(
    store: &dyn ItemStore,
    owner: &str,
    intent: &Intent,
) -> Result<Directive, SkillError> {
    let values = match resolve_slots(SkillIntent::AddItem, intent) {
        Ok(values) => values,
        Err(directive) => return Ok(directive),
    };
    let name = required(&values, ITEM_NAME)?;
    let quantity = required(&values, ITEM_QUANTITY)?;
    let item = Item::new(owner, name, quantity);

    tracing::info!("Attempting to add item {:?}", item);

    if let Some(existing) = store.get(owner, name).await? {
        tracing::info!("Item already in bag: {:?}", existing);
        return Err(SkillError::Conflict {
            name: name.to_string(),
        });
    }

    store.put(&item).await?;
    tracing::info!("Add item succeeded: {}", name);

    Ok(Directive::tell(format!(
        "Item {} is now in your bag!",
        escape_ssml(name)
    )))
}

/// 列出当前用户的所有物品，按扫描顺序，用停顿分隔
pub async fn get_all_items(store: &dyn ItemStore, owner: &str) -> Result<Directive, SkillError> {
    let items = store.scan_by_owner(owner).await?;
    tracing::info!("Read table succeeded: {} items", items.len());

    if items.is_empty() {
        return Ok(Directive::tell(EMPTY_BAG));
    }

    let mut output = format!("The following items are in your bag: {}", LIST_PAUSE);
    for item in &items {
        output.push_str(&escape_ssml(&item.name));
        output.push_str(LIST_PAUSE);
    }

    tracing::debug!("output {}", output);
    Ok(Directive::tell(output))
}

/// 删除物品（槽位：ItemName）
pub async fn delete_item(
    store: &dyn ItemStore,
    owner: &str,
    intent: &Intent,
) -> Result<Directive, SkillError> {
    let values = match resolve_slots(SkillIntent::DeleteItem, intent) {
        Ok(values) => values,
        Err(directive) => return Ok(directive),
    };
    let name = required(&values, ITEM_NAME)?;

    tracing::info!("Attempting to read item {} for deletion", name);

    if store.get(owner, name).await?.is_none() {
        return Err(SkillError::NotFound {
            name: name.to_string(),
        });
    }

    store.delete(owner, name).await?;
    tracing::info!("Delete item succeeded: {}", name);

    Ok(Directive::tell(format!("Item {} deleted!", escape_ssml(name))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::{ConfirmationStatus, Slot};
    use crate::store::InMemoryItemStore;

    fn intent(kind: SkillIntent, slots: &[Slot]) -> Intent {
        let mut intent = Intent::new(kind.name());
        for slot in slots {
            intent.slots.insert(slot.name.clone(), slot.clone());
        }
        intent
    }

    fn confirmed(name: &str, value: &str) -> Slot {
        Slot::new(name)
            .with_value(value)
            .with_status(ConfirmationStatus::Confirmed)
    }

    #[tokio::test]
    async fn test_add_item_elicits_name_first() {
        let store = InMemoryItemStore::new();
        let directive = add_item(&store, "u1", &intent(SkillIntent::AddItem, &[]))
            .await
            .unwrap();
        match directive {
            Directive::ElicitSlot {
                slot,
                speech,
                reprompt,
                updated_intent,
            } => {
                assert_eq!(slot, ITEM_NAME);
                assert_eq!(speech, "What is the name of the item?");
                assert_eq!(reprompt, "Please tell me the name of the item");
                assert_eq!(updated_intent.unwrap().name, "AddItemIntent");
            }
            other => panic!("Expected ElicitSlot, got {:?}", other),
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_add_item_denied_quantity_clears_value() {
        let store = InMemoryItemStore::new();
        let input = intent(
            SkillIntent::AddItem,
            &[
                confirmed(ITEM_NAME, "milk"),
                Slot::new(ITEM_QUANTITY)
                    .with_value("20")
                    .with_status(ConfirmationStatus::Denied),
            ],
        );
        match add_item(&store, "u1", &input).await.unwrap() {
            Directive::ElicitSlot {
                slot,
                speech,
                updated_intent,
                ..
            } => {
                assert_eq!(slot, ITEM_QUANTITY);
                assert_eq!(speech, "How many?");
                let updated = updated_intent.unwrap();
                assert_eq!(updated.slots[ITEM_QUANTITY], Slot::new(ITEM_QUANTITY));
                assert_eq!(updated.slots[ITEM_NAME], confirmed(ITEM_NAME, "milk"));
            }
            other => panic!("Expected ElicitSlot, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_item_confirms_quantity() {
        let store = InMemoryItemStore::new();
        let input = intent(
            SkillIntent::AddItem,
            &[
                confirmed(ITEM_NAME, "milk"),
                Slot::new(ITEM_QUANTITY).with_value("2"),
            ],
        );
        match add_item(&store, "u1", &input).await.unwrap() {
            Directive::ConfirmSlot {
                slot,
                speech,
                reprompt,
                updated_intent,
            } => {
                assert_eq!(slot, ITEM_QUANTITY);
                assert_eq!(speech, "You need 2, right?");
                assert_eq!(reprompt, speech);
                assert_eq!(updated_intent, Some(input.clone()));
            }
            other => panic!("Expected ConfirmSlot, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_then_conflict() {
        let store = InMemoryItemStore::new();
        let input = intent(
            SkillIntent::AddItem,
            &[confirmed(ITEM_NAME, "milk"), confirmed(ITEM_QUANTITY, "2")],
        );
        assert_eq!(
            add_item(&store, "u1", &input).await.unwrap(),
            Directive::tell("Item milk is now in your bag!")
        );

        let again = intent(
            SkillIntent::AddItem,
            &[confirmed(ITEM_NAME, "milk"), confirmed(ITEM_QUANTITY, "5")],
        );
        let err = add_item(&store, "u1", &again).await.unwrap_err();
        assert!(matches!(err, SkillError::Conflict { ref name } if name == "milk"));
        assert_eq!(
            store.get("u1", "milk").await.unwrap(),
            Some(Item::new("u1", "milk", "2"))
        );
    }

    #[tokio::test]
    async fn test_delete_confirm_prompt() {
        let store = InMemoryItemStore::new();
        let input = intent(SkillIntent::DeleteItem, &[Slot::new(ITEM_NAME).with_value("eggs")]);
        match delete_item(&store, "u1", &input).await.unwrap() {
            Directive::ConfirmSlot { speech, .. } => {
                assert_eq!(speech, "You would like to delete the item eggs, correct?");
            }
            other => panic!("Expected ConfirmSlot, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_missing_then_existing() {
        let store = InMemoryItemStore::new();
        let input = intent(SkillIntent::DeleteItem, &[confirmed(ITEM_NAME, "eggs")]);

        let err = delete_item(&store, "u1", &input).await.unwrap_err();
        assert!(matches!(err, SkillError::NotFound { ref name } if name == "eggs"));

        store.put(&Item::new("u1", "eggs", "6")).await.unwrap();
        assert_eq!(
            delete_item(&store, "u1", &input).await.unwrap(),
            Directive::tell("Item eggs deleted!")
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_all_items() {
        let store = InMemoryItemStore::new();
        assert_eq!(
            get_all_items(&store, "u1").await.unwrap(),
            Directive::tell(EMPTY_BAG)
        );

        store.put(&Item::new("u1", "milk", "2")).await.unwrap();
        store.put(&Item::new("u2", "bread", "1")).await.unwrap();
        store.put(&Item::new("u1", "eggs", "6")).await.unwrap();
        assert_eq!(
            get_all_items(&store, "u1").await.unwrap(),
            Directive::tell(
                "The following items are in your bag: <break strength=\"x-strong\" />\
                 milk<break strength=\"x-strong\" />eggs<break strength=\"x-strong\" />"
            )
        );
    }
}
