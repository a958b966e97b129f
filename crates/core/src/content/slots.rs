//! Slot table for fixed-layout sections.
//!
//! Some sections render a fixed number of boxes (the about page has four
//! feature boxes). Each box is a slot numbered from 1, and slot `n` is the
//! item whose `display_order` equals `n`. Slots are not stored: the table is
//! rebuilt from the item list every time it is loaded.

use std::collections::BTreeMap;

use uuid::Uuid;

use super::sorting::listing_order;
use super::types::ContentItem;

/// Explicit slot number → item id table for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMap {
    section_id: Uuid,
    slot_count: u32,
    bound: BTreeMap<u32, Uuid>,
    duplicates: Vec<Uuid>,
}

impl SlotMap {
    /// Builds the table from a section's items.
    ///
    /// Items from other sections are ignored. When several items share a
    /// slot's display order, the first in listing order is bound and the
    /// rest are reported by [`SlotMap::duplicates`].
    pub fn build(section_id: Uuid, items: &[ContentItem], slot_count: u32) -> Self {
        let mut candidates: Vec<&ContentItem> = items
            .iter()
            .filter(|item| item.section_id == section_id)
            .collect();
        candidates.sort_by(|a, b| listing_order(*a, *b));

        let mut bound = BTreeMap::new();
        let mut duplicates = Vec::new();
        for item in candidates {
            let Ok(slot) = u32::try_from(item.display_order) else {
                continue;
            };
            if slot == 0 || slot > slot_count {
                continue;
            }
            if bound.contains_key(&slot) {
                duplicates.push(item.id);
            } else {
                bound.insert(slot, item.id);
            }
        }

        Self {
            section_id,
            slot_count,
            bound,
            duplicates,
        }
    }

    pub fn section_id(&self) -> Uuid {
        self.section_id
    }

    pub fn slot_count(&self) -> u32 {
        self.slot_count
    }

    /// Returns true if `slot` is within `1..=slot_count`.
    pub fn contains(&self, slot: u32) -> bool {
        (1..=self.slot_count).contains(&slot)
    }

    /// The item bound to `slot`, or None if the slot has not been created.
    pub fn item_for(&self, slot: u32) -> Option<Uuid> {
        self.bound.get(&slot).copied()
    }

    /// Binds a newly created item to `slot`.
    pub fn bind(&mut self, slot: u32, item_id: Uuid) {
        if self.contains(slot) {
            self.bound.insert(slot, item_id);
        }
    }

    /// The display order a new item for `slot` is created with.
    pub fn display_order_for(slot: u32) -> i32 {
        i32::try_from(slot).unwrap_or(i32::MAX)
    }

    /// Every slot with its bound item, in slot order.
    pub fn slots(&self) -> impl Iterator<Item = (u32, Option<Uuid>)> + '_ {
        (1..=self.slot_count).map(|slot| (slot, self.item_for(slot)))
    }

    /// Items that share a display order with an already bound item.
    pub fn duplicates(&self) -> &[Uuid] {
        &self.duplicates
    }
}
