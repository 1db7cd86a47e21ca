//! Prelude module for Quickbar.
//!
//! Re-exports the types most hosts need for convenient importing:
//!
//! ```ignore
//! use quickbar::prelude::*;
//! ```
//!
//! This provides access to:
//! - The bar widget and its configuration (`ActionBar`, `ActionBarConfig`)
//! - Button definitions (`ButtonSpec`, `Predicate`)
//! - Selection items (`Item`)
//! - The renderer seam and the in-memory backend (`Renderer`,
//!   `HeadlessRenderer`)
//! - Signal primitives (`Signal`, `ConnectionId`)

// ============================================================================
// Widget and Configuration
// ============================================================================

pub use crate::bar::ActionBar;
pub use crate::config::{ActionBarConfig, LifecycleHook};

// ============================================================================
// Buttons and Eligibility
// ============================================================================

pub use crate::button::{ButtonAction, ButtonSpec, Predicate};
pub use crate::engine::{BarState, VisibilityEngine};

// ============================================================================
// Selection
// ============================================================================

pub use crate::item::Item;
pub use crate::selection::SelectionStore;

// ============================================================================
// Rendering
// ============================================================================

pub use crate::headless::HeadlessRenderer;
pub use crate::renderer::{
    ButtonHandle, CompletionCallback, ContainerHandle, RenderError, Renderer,
};

// ============================================================================
// Signals
// ============================================================================

pub use quickbar_core::{ConnectionGuard, ConnectionId, Signal};
