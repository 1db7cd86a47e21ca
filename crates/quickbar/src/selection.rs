//! Selection store for the action bar.
//!
//! This module provides [`SelectionStore`], the ordered collection of
//! currently selected items. Insertion order is preserved and structurally
//! equal duplicates are rejected on add. Removal is duplicate-tolerant: it
//! clears every structurally equal entry, not just the first.
//!
//! The store emits its [`changed`](SelectionStore::changed) signal with the
//! new length after every effective mutation, so observers (the owning bar,
//! host code) can react without polling.
//!
//! # Example
//!
//! ```
//! use quickbar::{Item, SelectionStore};
//!
//! let mut selection = SelectionStore::new();
//! selection.add(Item::new().with("id", 1));
//! selection.add(Item::new().with("id", 1)); // Duplicate, ignored
//! assert_eq!(selection.len(), 1);
//! ```

use quickbar_core::Signal;
use serde_json::Value;

use crate::item::{Item, is_empty_value, loose_eq};

/// Ordered, deduplicated collection of selected items.
///
/// # Signals
///
/// - [`changed`](Self::changed): Emitted with the new length after every
///   mutation that actually altered the collection
#[derive(Default)]
pub struct SelectionStore {
    /// Selected items in insertion order.
    items: Vec<Item>,

    /// Emitted with the new length after every effective mutation.
    pub changed: Signal<usize>,
}

impl SelectionStore {
    /// Create an empty selection store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item unless a structurally equal one is already present.
    ///
    /// Returns `true` if the item was added.
    pub fn add(&mut self, item: Item) -> bool {
        if self.items.contains(&item) {
            tracing::trace!(target: "quickbar::selection", "duplicate item ignored");
            return false;
        }
        self.items.push(item);
        let len = self.items.len();
        tracing::trace!(target: "quickbar::selection", len, "item added");
        self.changed.emit(len);
        true
    }

    /// Remove every structurally equal copy of `item`.
    ///
    /// Duplicate-tolerant by policy: if multiple equal entries somehow exist,
    /// all of them go. Returns the number of entries removed.
    pub fn remove(&mut self, item: &Item) -> usize {
        let before = self.items.len();
        self.items.retain(|existing| existing != item);
        let removed = before - self.items.len();
        if removed > 0 {
            tracing::trace!(target: "quickbar::selection", removed, len = self.items.len(), "items removed");
            self.changed.emit(self.items.len());
        }
        removed
    }

    /// Replace the entire collection.
    pub fn replace_all(&mut self, items: Vec<Item>) {
        self.items = items;
        let len = self.items.len();
        tracing::trace!(target: "quickbar::selection", len, "selection replaced");
        self.changed.emit(len);
    }

    /// Empty the collection.
    ///
    /// Returns `true` if anything was removed. Visual deselection is the
    /// owning bar's job; the store only manages the records.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        tracing::trace!(target: "quickbar::selection", "selection cleared");
        self.changed.emit(0);
        true
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All selected items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The first selected item, if any.
    pub fn first(&self) -> Option<&Item> {
        self.items.first()
    }

    /// Find the first item whose `key` field loosely equals `value`.
    ///
    /// Defensive no-match rules apply: an empty `key`, an empty `value`, or
    /// an empty stored field never match.
    pub fn find_one(&self, key: &str, value: &Value) -> Option<&Item> {
        self.find_all(key, value).into_iter().next()
    }

    /// Find every item whose `key` field loosely equals `value`.
    ///
    /// Linear scan in insertion order. Same defensive no-match rules as
    /// [`find_one`](Self::find_one).
    pub fn find_all(&self, key: &str, value: &Value) -> Vec<&Item> {
        if key.is_empty() || is_empty_value(value) {
            return Vec::new();
        }
        self.items
            .iter()
            .filter(|item| {
                item.get(key)
                    .is_some_and(|stored| !is_empty_value(stored) && loose_eq(stored, value))
            })
            .collect()
    }
}
