//! Quickbar - a selection-driven floating action bar.
//!
//! When a host application's list or grid has items selected, the bar renders
//! the subset of its configured buttons that apply to the current selection
//! and reveals itself; when nothing applies it conceals itself again. Every
//! selection or button mutation recomputes synchronously.
//!
//! The crate splits into three collaborators plus the widget that wires them:
//!
//! - [`SelectionStore`]: the selected items, deduplicated by structural
//!   equality, with a `changed` signal.
//! - [`VisibilityEngine`]: the button collection and the per-button
//!   eligibility rules (selection-count bounds and field predicates).
//! - [`Renderer`]: the backend seam owning the real elements. The crate
//!   ships [`HeadlessRenderer`], an in-memory backend for tests and
//!   headless hosts.
//! - [`ActionBar`]: the widget tying them together.
//!
//! # Example
//!
//! ```
//! use quickbar::prelude::*;
//!
//! let config = ActionBarConfig::new()
//!     .with_id("bulk-actions")
//!     .with_button(
//!         ButtonSpec::new()
//!             .with_id("merge")
//!             .with_text("Merge")
//!             .with_min_items(2),
//!     );
//! let mut bar = ActionBar::new(HeadlessRenderer::new(), config);
//!
//! bar.add_item(Item::new().with("id", 1));
//! assert!(!bar.bar_state().visible); // merge needs two items
//!
//! bar.add_item(Item::new().with("id", 2));
//! assert!(bar.bar_state().visible);
//! ```

pub mod bar;
pub mod button;
pub mod config;
pub mod engine;
pub mod headless;
pub mod item;
pub mod prelude;
pub mod renderer;
pub mod selection;

pub use bar::ActionBar;
pub use button::{ButtonAction, ButtonSpec, Predicate};
pub use config::{ActionBarConfig, LifecycleHook};
pub use engine::{BarState, VisibilityEngine};
pub use headless::{ButtonElement, ContainerElement, HeadlessRenderer};
pub use item::{Item, loose_eq};
pub use renderer::{
    ButtonHandle, CompletionCallback, ContainerHandle, RenderError, Renderer,
};
pub use selection::SelectionStore;

// Re-export the signal primitives so hosts don't need a direct dependency on
// the core crate.
pub use quickbar_core::{ConnectionGuard, ConnectionId, Signal};
