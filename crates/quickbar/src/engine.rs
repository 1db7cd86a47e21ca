//! Selection-driven visibility engine.
//!
//! This module provides [`VisibilityEngine`], which owns the ordered button
//! collection and recomputes, for a given selection, which buttons are
//! eligible for display. The result is a transient [`BarState`]: the ordered
//! render list plus whether the bar should be visible at all.
//!
//! Eligibility is a two-stage gate per button:
//!
//! 1. **Count gate** - the selection size must fall inside the button's
//!    inclusive `min_items`/`max_items` bounds (unset bounds always pass).
//! 2. **Predicate gate** - starting from the full selection, each predicate
//!    in order removes every item whose field loosely matches it; the button
//!    is eligible only if the working set ends up empty. In other words,
//!    every selected item must be claimed by at least one predicate by the
//!    time the whole list has been applied.
//!
//! The predicate gate is cumulative reject-until-empty, not a per-item
//! AND/OR filter. With overlapping predicates this can behave
//! counterintuitively; the behavior is load-bearing for hosts that rely on
//! it, so it must not be "simplified" into a conventional match.
//!
//! # Example
//!
//! ```
//! use quickbar::{ButtonSpec, Item, Predicate, VisibilityEngine};
//!
//! let mut engine = VisibilityEngine::new();
//! engine.add_button(
//!     ButtonSpec::new()
//!         .with_id("archive")
//!         .with_min_items(1)
//!         .with_predicate(Predicate::new("type", "document")),
//! );
//!
//! let selection = vec![Item::new().with("type", "document")];
//! let state = engine.compute(&selection);
//! assert!(state.visible);
//! assert_eq!(state.buttons.len(), 1);
//! ```

use crate::button::ButtonSpec;
use crate::item::{Item, loose_eq};
use serde_json::Value;

/// Derived display state of the bar.
///
/// Computed fresh on every recomputation and owned by nobody across calls:
/// callers use it to drive rendering, then drop it.
#[derive(Debug, Clone)]
pub struct BarState {
    /// Whether the bar should be visible (at least one eligible button).
    pub visible: bool,
    /// Eligible buttons in declaration order.
    pub buttons: Vec<ButtonSpec>,
}

/// Ordered button collection plus the eligibility recomputation.
///
/// Insertion order is display order. Duplicate ids are tolerated; id lookup
/// returns the first match and id removal removes every match (consistent
/// with the selection store's duplicate-tolerant removal).
#[derive(Debug, Default)]
pub struct VisibilityEngine {
    /// Button specs in declaration order.
    buttons: Vec<ButtonSpec>,
}

impl VisibilityEngine {
    /// Create an engine with no buttons.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a button at the end of the collection.
    ///
    /// A missing id is filled in with a generated one.
    pub fn add_button(&mut self, mut spec: ButtonSpec) {
        spec.ensure_id();
        self.buttons.push(spec);
    }

    /// Insert a button before the one currently at `index`.
    ///
    /// `0` places it first; any index at or past the end places it last.
    pub fn insert_button(&mut self, index: usize, mut spec: ButtonSpec) {
        spec.ensure_id();
        let index = index.min(self.buttons.len());
        self.buttons.insert(index, spec);
    }

    /// Append several buttons in order.
    pub fn add_buttons(&mut self, specs: impl IntoIterator<Item = ButtonSpec>) {
        for spec in specs {
            self.add_button(spec);
        }
    }

    /// Replace the button at `index`.
    ///
    /// Out-of-range indices are a no-op. Returns `true` if the replacement
    /// happened.
    pub fn set_button(&mut self, index: usize, mut spec: ButtonSpec) -> bool {
        if index >= self.buttons.len() {
            tracing::debug!(
                target: "quickbar::engine",
                index,
                len = self.buttons.len(),
                "set_button index out of range, ignoring"
            );
            return false;
        }
        spec.ensure_id();
        self.buttons[index] = spec;
        true
    }

    /// Replace the whole collection.
    pub fn set_buttons(&mut self, specs: impl IntoIterator<Item = ButtonSpec>) {
        self.buttons.clear();
        self.add_buttons(specs);
    }

    /// Find the first button with the given id.
    ///
    /// Returns the button's position along with the spec.
    pub fn button(&self, id: &str) -> Option<(usize, &ButtonSpec)> {
        if id.is_empty() {
            return None;
        }
        self.buttons
            .iter()
            .enumerate()
            .find(|(_, spec)| spec.id() == Some(id))
    }

    /// All buttons in declaration order.
    pub fn buttons(&self) -> &[ButtonSpec] {
        &self.buttons
    }

    /// Number of buttons.
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Check whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Remove every button with the given id.
    ///
    /// Returns the number of buttons removed.
    pub fn remove_button(&mut self, id: &str) -> usize {
        let before = self.buttons.len();
        self.buttons.retain(|spec| spec.id() != Some(id));
        before - self.buttons.len()
    }

    /// Empty the button collection.
    pub fn clear_buttons(&mut self) {
        self.buttons.clear();
    }

    /// Recompute the bar state for the given selection.
    ///
    /// Preserves declaration order; the bar is visible iff the render list
    /// is non-empty.
    pub fn compute(&self, selection: &[Item]) -> BarState {
        let buttons: Vec<ButtonSpec> = self
            .buttons
            .iter()
            .filter(|spec| Self::eligible(spec, selection))
            .cloned()
            .collect();
        let visible = !buttons.is_empty();
        tracing::debug!(
            target: "quickbar::engine",
            selected = selection.len(),
            eligible = buttons.len(),
            total = self.buttons.len(),
            visible,
            "recomputed bar state"
        );
        BarState { visible, buttons }
    }

    /// Evaluate both gates for one button.
    fn eligible(spec: &ButtonSpec, selection: &[Item]) -> bool {
        let count = selection.len();
        if spec.min_items().is_some_and(|min| count < min) {
            return false;
        }
        if spec.max_items().is_some_and(|max| count > max) {
            return false;
        }

        let predicates = spec.predicates();
        if predicates.is_empty() {
            return true;
        }

        // Cumulative reject: each predicate removes its matches from the
        // working set, and eligibility requires the set to end up empty.
        // A missing field compares as null, so a null-valued predicate
        // claims items that lack the field entirely.
        let mut rest: Vec<&Item> = selection.iter().collect();
        for predicate in predicates {
            rest.retain(|item| {
                let stored = item.get(&predicate.key).unwrap_or(&Value::Null);
                !loose_eq(stored, &predicate.value)
            });
            if rest.is_empty() {
                break;
            }
        }
        rest.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::button::Predicate;

    fn typed(ty: &str) -> Item {
        Item::new().with("type", ty)
    }

    fn selection_of(types: &[&str]) -> Vec<Item> {
        types.iter().map(|ty| typed(ty)).collect()
    }

    #[test]
    fn test_count_gate_boundaries() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(
            ButtonSpec::new()
                .with_id("b")
                .with_min_items(2)
                .with_max_items(3),
        );

        for (n, expected) in [(1, false), (2, true), (3, true), (4, false)] {
            let selection: Vec<Item> = (0..n).map(|i| Item::new().with("id", i)).collect();
            let state = engine.compute(&selection);
            assert_eq!(state.visible, expected, "N = {n}");
        }
    }

    #[test]
    fn test_unset_bounds_always_pass() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(ButtonSpec::new().with_id("b"));

        assert!(engine.compute(&[]).visible); // Unconditional at N = 0
        assert!(engine.compute(&selection_of(&["a", "b", "c"])).visible);
    }

    #[test]
    fn test_inverted_bounds_never_eligible() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(
            ButtonSpec::new()
                .with_id("b")
                .with_min_items(3)
                .with_max_items(1),
        );

        for n in 0..5 {
            let selection: Vec<Item> = (0..n).map(|i| Item::new().with("id", i)).collect();
            assert!(!engine.compute(&selection).visible, "N = {n}");
        }
    }

    #[test]
    fn test_predicate_rejects_when_remainder_nonempty() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(
            ButtonSpec::new()
                .with_id("b")
                .with_predicate(Predicate::new("type", "a")),
        );

        // {type: b} survives the reject pass, so the button is ineligible
        let state = engine.compute(&selection_of(&["a", "b"]));
        assert!(!state.visible);
        assert!(state.buttons.is_empty());
    }

    #[test]
    fn test_predicate_accepts_when_all_items_rejected() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(
            ButtonSpec::new()
                .with_id("b")
                .with_predicate(Predicate::new("type", "a")),
        );

        let state = engine.compute(&selection_of(&["a", "a"]));
        assert!(state.visible);
        assert_eq!(state.buttons.len(), 1);
    }

    #[test]
    fn test_predicates_accumulate_across_the_list() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(ButtonSpec::new().with_id("b").with_predicates(vec![
            Predicate::new("type", "a"),
            Predicate::new("type", "b"),
        ]));

        // Each item is claimed by one of the predicates, so together they
        // empty the working set
        assert!(engine.compute(&selection_of(&["a", "b", "a"])).visible);
        assert!(!engine.compute(&selection_of(&["a", "b", "c"])).visible);
    }

    #[test]
    fn test_predicate_with_loose_equality() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(
            ButtonSpec::new()
                .with_id("b")
                .with_predicate(Predicate::new("count", 5)),
        );

        // The string "5" loosely matches the number 5
        let selection = vec![Item::new().with("count", "5")];
        assert!(engine.compute(&selection).visible);
    }

    #[test]
    fn test_predicate_missing_field_compares_as_null() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(
            ButtonSpec::new()
                .with_id("b")
                .with_predicate(Predicate::new("flag", Value::Null)),
        );

        // Items without the field are claimed by a null predicate...
        assert!(engine.compute(&selection_of(&["a"])).visible);

        // ...but items carrying any other value survive
        let selection = vec![Item::new().with("flag", 1)];
        assert!(!engine.compute(&selection).visible);
    }

    #[test]
    fn test_predicate_on_empty_selection_is_eligible() {
        // No items means the working set starts (and ends) empty
        let mut engine = VisibilityEngine::new();
        engine.add_button(
            ButtonSpec::new()
                .with_id("b")
                .with_predicate(Predicate::new("type", "a")),
        );
        assert!(engine.compute(&[]).visible);
    }

    #[test]
    fn test_count_gate_runs_before_predicate_gate() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(
            ButtonSpec::new()
                .with_id("b")
                .with_min_items(2)
                .with_predicate(Predicate::new("type", "a")),
        );

        // Predicate would pass, count gate does not
        assert!(!engine.compute(&selection_of(&["a"])).visible);
        assert!(engine.compute(&selection_of(&["a", "a"])).visible);
    }

    #[test]
    fn test_render_list_preserves_declaration_order() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(ButtonSpec::new().with_id("first"));
        engine.add_button(ButtonSpec::new().with_id("second").with_min_items(5));
        engine.add_button(ButtonSpec::new().with_id("third"));

        let state = engine.compute(&[]);
        let ids: Vec<_> = state.buttons.iter().filter_map(|b| b.id()).collect();
        assert_eq!(ids, vec!["first", "third"]);
    }

    #[test]
    fn test_insert_button_at_front_and_past_end() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(ButtonSpec::new().with_id("middle"));
        engine.insert_button(0, ButtonSpec::new().with_id("front"));
        engine.insert_button(99, ButtonSpec::new().with_id("back"));

        let ids: Vec<_> = engine.buttons().iter().filter_map(|b| b.id()).collect();
        assert_eq!(ids, vec!["front", "middle", "back"]);
    }

    #[test]
    fn test_insert_button_at_len_places_last() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(ButtonSpec::new().with_id("a"));
        engine.add_button(ButtonSpec::new().with_id("b"));
        engine.insert_button(2, ButtonSpec::new().with_id("c"));

        let ids: Vec<_> = engine.buttons().iter().filter_map(|b| b.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_set_button_in_and_out_of_range() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(ButtonSpec::new().with_id("old"));

        assert!(engine.set_button(0, ButtonSpec::new().with_id("new")));
        assert!(!engine.set_button(5, ButtonSpec::new().with_id("lost")));

        assert_eq!(engine.len(), 1);
        assert_eq!(engine.buttons()[0].id(), Some("new"));
    }

    #[test]
    fn test_button_lookup_returns_first_match() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(ButtonSpec::new().with_id("dup").with_text("one"));
        engine.add_button(ButtonSpec::new().with_id("dup").with_text("two"));

        let (index, spec) = engine.button("dup").expect("button should exist");
        assert_eq!(index, 0);
        assert_eq!(spec.text(), Some("one"));
        assert!(engine.button("absent").is_none());
        assert!(engine.button("").is_none());
    }

    #[test]
    fn test_remove_button_removes_every_match() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(ButtonSpec::new().with_id("dup"));
        engine.add_button(ButtonSpec::new().with_id("keep"));
        engine.add_button(ButtonSpec::new().with_id("dup"));

        assert_eq!(engine.remove_button("dup"), 2);
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.buttons()[0].id(), Some("keep"));
    }

    #[test]
    fn test_set_buttons_replaces_collection() {
        let mut engine = VisibilityEngine::new();
        engine.add_button(ButtonSpec::new().with_id("old"));

        engine.set_buttons(vec![
            ButtonSpec::new().with_id("a"),
            ButtonSpec::new().with_id("b"),
        ]);

        let ids: Vec<_> = engine.buttons().iter().filter_map(|b| b.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_visible_iff_render_list_nonempty() {
        let mut engine = VisibilityEngine::new();
        assert!(!engine.compute(&[]).visible); // No buttons at all

        engine.add_button(ButtonSpec::new().with_id("b").with_min_items(1));
        assert!(!engine.compute(&[]).visible);
        assert!(engine.compute(&selection_of(&["a"])).visible);
    }
}
