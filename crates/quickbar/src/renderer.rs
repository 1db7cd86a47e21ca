//! Renderer seam for the action bar.
//!
//! The engine and the bar widget are backend-agnostic: every DOM (or DOM-like)
//! side effect goes through the [`Renderer`] trait. A renderer owns the real
//! elements and hands out opaque slotmap handles; the bar holds the container
//! handle it was given instead of re-resolving elements by selector.
//!
//! `show`/`hide` are fire-and-forget: a renderer is free to animate and call
//! the completion callback whenever the transition finishes. The bar never
//! waits on them, so overlapping transitions are the renderer's problem to
//! queue or cancel.
//!
//! For tests and headless hosts, see
//! [`HeadlessRenderer`](crate::HeadlessRenderer).

use slotmap::new_key_type;

use crate::button::{ButtonAction, ButtonSpec};

new_key_type! {
    /// Opaque handle to the bar's root element, issued by the renderer.
    pub struct ContainerHandle;

    /// Opaque handle to one rendered button element.
    pub struct ButtonHandle;
}

/// Callback invoked by the renderer when a show/hide transition completes.
pub type CompletionCallback = Box<dyn FnOnce() + Send>;

/// Result type alias for renderer operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors the renderer seam can report.
///
/// The bar treats all of these as soft failures: they are logged and the
/// current operation is skipped, never propagated to the host.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The host has not provided a mount point yet; rendering is deferred.
    #[error("no mount point available for the bar container")]
    NoMountPoint,

    /// A container handle does not refer to a live element.
    #[error("unknown container handle")]
    UnknownContainer,

    /// A button handle does not refer to a live element.
    #[error("unknown button handle")]
    UnknownButton,

    /// Backend-specific failure.
    #[error("renderer backend error: {0}")]
    Backend(String),
}

/// Backend collaborator that owns the bar's elements.
///
/// Implementations create and mutate real UI elements; the bar drives them
/// through handles only. All methods are fallible so backends can report
/// missing mounts or stale handles, but implementations should prefer
/// recovering over failing where they can (the bar will not retry).
pub trait Renderer {
    /// Create the bar's root element if it does not exist yet, or return the
    /// existing one.
    ///
    /// Fails with [`RenderError::NoMountPoint`] when the host has not
    /// supplied a mount point; the bar defers rendering until one appears.
    fn ensure_container(&mut self, id: &str, css_class: Option<&str>) -> Result<ContainerHandle>;

    /// Remove every child from the container, releasing their handles.
    fn clear_container(&mut self, container: ContainerHandle) -> Result<()>;

    /// Remove the container element entirely.
    fn remove_container(&mut self, container: ContainerHandle) -> Result<()>;

    /// Create a button element from its spec.
    fn render_button(&mut self, spec: &ButtonSpec) -> Result<ButtonHandle>;

    /// Wire a button element's activation to the given callback.
    fn attach_action(&mut self, button: ButtonHandle, action: ButtonAction) -> Result<()>;

    /// Append a rendered button to the container.
    fn append_to_container(&mut self, container: ContainerHandle, button: ButtonHandle)
    -> Result<()>;

    /// Reveal the container, optionally animated.
    ///
    /// `on_complete` runs when the transition finishes.
    fn show(
        &mut self,
        container: ContainerHandle,
        on_complete: Option<CompletionCallback>,
    ) -> Result<()>;

    /// Conceal the container, optionally animated.
    ///
    /// `on_complete` runs when the transition finishes.
    fn hide(
        &mut self,
        container: ContainerHandle,
        on_complete: Option<CompletionCallback>,
    ) -> Result<()>;

    /// Set an attribute/property on the container element (`"id"`,
    /// `"class"`, ...).
    fn set_element_prop(&mut self, container: ContainerHandle, prop: &str, value: &str)
    -> Result<()>;

    /// Visually deselect every selected element in the host view.
    ///
    /// Invoked when the bar's item collection is cleared.
    fn deselect_all(&mut self) -> Result<()>;
}
