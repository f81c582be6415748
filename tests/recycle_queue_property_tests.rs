//! Property-based tests for recycle queue accounting
//!
//! Removed items must never be silently lost: every removal adds exactly
//! one queue entry and every restore or purge consumes exactly one. These
//! tests drive random remove/restore/purge sequences against a draft and
//! check the books always balance.

use proptest::prelude::*;
use requisition_engine::clock::SystemClock;
use requisition_engine::draft::DraftEditor;
use requisition_engine::item::ItemField;
use requisition_engine::queue::RecycleQueue;
use requisition_engine::utils::SessionIds;

/// A step in a random queue workout.
#[derive(Debug, Clone)]
enum Step {
    /// Remove the draft item at (index % len), if the draft has any.
    Remove(usize),
    /// Restore the queue entry at (index % len), if the queue has any.
    Restore(usize),
    /// Purge the queue entry at (index % len), if the queue has any.
    Purge(usize),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..64).prop_map(Step::Remove),
        (0usize..64).prop_map(Step::Restore),
        (0usize..64).prop_map(Step::Purge),
    ]
}

fn editor_with_items(count: usize) -> DraftEditor {
    let mut editor = DraftEditor::new(Box::new(SystemClock), Box::new(SessionIds));
    for index in 0..count {
        let id = editor.add_item();
        editor
            .edit_field(&id, ItemField::Category(format!("Cat{}", index % 4)))
            .unwrap();
        editor
            .edit_field(&id, ItemField::UnitPrice(index as f64))
            .unwrap();
        if index % 3 == 0 {
            editor.edit_field(&id, ItemField::Priority(true)).unwrap();
        }
    }
    editor
}

proptest! {
    /// Property: under any interleaving of removals, restores and purges,
    /// draft items plus queue entries plus purged entries always account
    /// for every line ever created.
    #[test]
    fn prop_no_item_is_silently_lost(
        initial in 1usize..12,
        steps in prop::collection::vec(step_strategy(), 0..40)
    ) {
        let mut editor = editor_with_items(initial);
        let mut queue = RecycleQueue::new();
        let mut purged = 0usize;

        for step in steps {
            match step {
                Step::Remove(index) => {
                    let len = editor.draft().items.len();
                    if len == 0 {
                        continue;
                    }
                    let id = editor.draft().items[index % len].id.clone();
                    let before = queue.len();
                    queue.enqueue(editor.remove_item(&id).unwrap());
                    prop_assert_eq!(queue.len(), before + 1);
                }
                Step::Restore(index) => {
                    let len = queue.len();
                    if len == 0 {
                        continue;
                    }
                    let entry_id = queue.entries()[index % len].id.clone();
                    let before = queue.len();
                    queue.restore(&entry_id, &mut editor).unwrap();
                    prop_assert_eq!(queue.len(), before - 1);
                }
                Step::Purge(index) => {
                    let len = queue.len();
                    if len == 0 {
                        continue;
                    }
                    let entry_id = queue.entries()[index % len].id.clone();
                    queue.purge(&entry_id).unwrap();
                    purged += 1;
                }
            }

            prop_assert_eq!(
                editor.draft().items.len() + queue.len() + purged,
                initial
            );
        }
    }

    /// Property: a remove-then-restore round trip preserves every field of
    /// the item except its id, and the restored item sits in invariant
    /// position.
    #[test]
    fn prop_restore_round_trip_preserves_fields(
        initial in 1usize..10,
        pick in 0usize..10
    ) {
        let mut editor = editor_with_items(initial);
        let mut queue = RecycleQueue::new();

        let pick = pick % initial;
        let original = editor.draft().items[pick].clone();

        let entry = editor.remove_item(&original.id).unwrap();
        prop_assert_eq!(&entry.item, &original);
        let entry_id = entry.id.clone();
        queue.enqueue(entry);

        let new_id = queue.restore(&entry_id, &mut editor).unwrap();
        prop_assert!(queue.is_empty());
        prop_assert_ne!(&new_id, &original.id);

        let restored = editor
            .draft()
            .items
            .iter()
            .find(|item| item.id == new_id)
            .expect("restored item present in draft");

        prop_assert_eq!(&restored.category, &original.category);
        prop_assert_eq!(&restored.name, &original.name);
        prop_assert_eq!(restored.quantity, original.quantity);
        prop_assert_eq!(restored.unit_price, original.unit_price);
        prop_assert_eq!(restored.amount, original.amount);
        prop_assert_eq!(restored.is_manual, original.is_manual);
        prop_assert_eq!(restored.is_priority, original.is_priority);

        // the whole draft still satisfies the ordering invariant
        let mut resorted = editor.draft().items.clone();
        requisition_engine::ordering::sort_items(&mut resorted);
        prop_assert_eq!(&resorted, &editor.draft().items);
    }
}
