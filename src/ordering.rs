//! Ordering and grouping rules for a draft's line items
//!
//! The draft keeps its items arranged so that priority lines come first and
//! each partition reads in case-insensitive category order. Group runs over
//! that arrangement drive the subtotal bands in the rendered requisition.

use crate::item::RequisitionItem;
use std::cmp::Reverse;

/// Group label for priority lines, whatever their category says.
pub const PRIORITY_GROUP: &str = "PRIORITY / SPECIAL";

/// Group label for lines with no usable category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One contiguous run of items sharing a main group, with the band subtotal.
/// `end` is inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRun {
    pub start: usize,
    pub end: usize,
    pub name: String,
    pub subtotal: f64,
}

/// Stable sort establishing the draft ordering invariant: priority items
/// first, then ascending case-insensitive category with uncategorized lines
/// last in each partition. Stability matters: re-sorting after an edit must
/// not reshuffle untouched ties.
pub fn sort_items(items: &mut [RequisitionItem]) {
    items.sort_by_cached_key(|item| {
        (
            Reverse(item.is_priority),
            item.category.is_empty(),
            item.category.to_lowercase(),
        )
    });
}

/// The coarse grouping key used for subtotal bands. Priority trumps the
/// category; otherwise the segment before the first `/` names the group.
/// A leading-slash category has no main segment and lands in
/// [`UNCATEGORIZED`].
pub fn main_group_of(item: &RequisitionItem) -> String {
    if item.is_priority {
        return PRIORITY_GROUP.to_string();
    }
    match item.category.split('/').next() {
        Some(main) if !main.is_empty() => main.to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}

/// Walk a sorted item list once and emit a [`GroupRun`] per contiguous main
/// group. An empty list yields no runs; a single-group list yields one run
/// spanning everything.
pub fn group_runs(items: &[RequisitionItem]) -> Vec<GroupRun> {
    let mut runs: Vec<GroupRun> = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let name = main_group_of(item);
        match runs.last_mut() {
            Some(run) if run.name == name => {
                run.end = index;
                run.subtotal += item.amount;
            }
            _ => runs.push(GroupRun {
                start: index,
                end: index,
                name,
                subtotal: item.amount,
            }),
        }
    }

    runs
}

/// Grand total over all lines, independent of grouping.
pub fn total_amount(items: &[RequisitionItem]) -> f64 {
    items.iter().map(|item| item.amount).sum()
}
