//! Button specifications for the action bar.
//!
//! This module provides [`ButtonSpec`], the declarative description of one
//! action-bar button: its display metadata, its activation callback, and the
//! visibility conditions the engine evaluates against the current selection.
//!
//! A button becomes eligible for display when:
//!
//! - the selection count passes its `min_items`/`max_items` bounds, and
//! - its predicates, applied cumulatively, filter every selected item out
//!   (see `VisibilityEngine` for the exact algorithm).
//!
//! # Example
//!
//! ```
//! use quickbar::{ButtonSpec, Predicate};
//!
//! // "Merge" only makes sense for 2+ documents
//! let merge = ButtonSpec::new()
//!     .with_id("merge")
//!     .with_text("Merge")
//!     .with_icon("icon-merge")
//!     .with_min_items(2)
//!     .with_predicate(Predicate::new("type", "document"))
//!     .with_action(|| println!("merging"));
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Counter backing generated button ids.
static NEXT_BUTTON_ID: AtomicU64 = AtomicU64::new(1);

/// The callback invoked when a rendered button is activated.
///
/// The engine never calls this itself; it is handed to the renderer at render
/// time via `Renderer::attach_action`.
pub type ButtonAction = Arc<dyn Fn() + Send + Sync>;

/// One attribute-match constraint of a button's predicate gate.
///
/// During recomputation, every selected item whose `key` field loosely equals
/// `value` is removed from the working set. An item without the field is
/// compared as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    /// Field key to test on each selected item.
    pub key: String,
    /// Value the field must loosely equal.
    pub value: Value,
}

impl Predicate {
    /// Create a predicate from a key and value.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Declarative definition of one action-bar button.
///
/// Display metadata (`css_class`, `text`, `icon`) is opaque to the engine and
/// passed through to the renderer unchanged. The visibility fields
/// (`min_items`, `max_items`, `predicate`) drive eligibility.
///
/// If `min_items > max_items` the bounds are not rejected; such a button is
/// simply never eligible.
#[derive(Clone, Default)]
pub struct ButtonSpec {
    /// Unique-ish identifier. Generated (`button-N`) when the spec is added
    /// to a bar without one. Duplicates are tolerated.
    id: Option<String>,
    /// Additional CSS classes for the rendered element.
    css_class: Option<String>,
    /// Button label.
    text: Option<String>,
    /// Icon class/name.
    icon: Option<String>,
    /// Activation callback, attached by the renderer.
    action: Option<ButtonAction>,
    /// Minimum selection count (inclusive) for display.
    min_items: Option<usize>,
    /// Maximum selection count (inclusive) for display.
    max_items: Option<usize>,
    /// Ordered attribute-match constraints.
    predicate: Vec<Predicate>,
}

impl ButtonSpec {
    /// Create an empty button spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the button id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set additional CSS classes.
    pub fn with_css_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = Some(css_class.into());
        self
    }

    /// Set the button label.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the icon class/name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the activation callback.
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Set the minimum selection count (inclusive).
    pub fn with_min_items(mut self, min_items: usize) -> Self {
        self.min_items = Some(min_items);
        self
    }

    /// Set the maximum selection count (inclusive).
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Append one predicate constraint.
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate.push(predicate);
        self
    }

    /// Replace the full predicate list.
    pub fn with_predicates(mut self, predicates: Vec<Predicate>) -> Self {
        self.predicate = predicates;
        self
    }

    /// The button id, if set or generated.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Additional CSS classes.
    pub fn css_class(&self) -> Option<&str> {
        self.css_class.as_deref()
    }

    /// Button label.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Icon class/name.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Activation callback.
    pub fn action(&self) -> Option<&ButtonAction> {
        self.action.as_ref()
    }

    /// Minimum selection count bound.
    pub fn min_items(&self) -> Option<usize> {
        self.min_items
    }

    /// Maximum selection count bound.
    pub fn max_items(&self) -> Option<usize> {
        self.max_items
    }

    /// Ordered predicate constraints.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicate
    }

    /// Fill in a generated id if none was supplied.
    pub(crate) fn ensure_id(&mut self) {
        if self.id.is_none() {
            let n = NEXT_BUTTON_ID.fetch_add(1, Ordering::Relaxed);
            self.id = Some(format!("button-{n}"));
        }
    }
}

impl fmt::Debug for ButtonSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonSpec")
            .field("id", &self.id)
            .field("css_class", &self.css_class)
            .field("text", &self.text)
            .field("icon", &self.icon)
            .field("action", &self.action.as_ref().map(|_| "Fn"))
            .field("min_items", &self.min_items)
            .field("max_items", &self.max_items)
            .field("predicate", &self.predicate)
            .finish()
    }
}
