//! Action bar configuration.
//!
//! [`ActionBarConfig`] is the explicit construction-time option set for an
//! [`ActionBar`](crate::ActionBar): identity, CSS classes, the initial button
//! collection, and the optional lifecycle hooks. Every field has a defined
//! default, so `ActionBarConfig::new()` is a valid empty configuration.
//!
//! Lifecycle hooks are synchronous: `on_render` runs once when the bar is
//! constructed, `on_show`/`on_hide` run when a reveal/conceal transition
//! completes. They are plain registrations on the bar's lifecycle signals;
//! hosts can connect further slots after construction.

use std::fmt;

use crate::button::ButtonSpec;

/// A synchronous lifecycle hook.
pub type LifecycleHook = Box<dyn Fn() + Send + Sync>;

/// Construction-time options for an [`ActionBar`](crate::ActionBar).
#[derive(Default)]
pub struct ActionBarConfig {
    /// Bar element id. Generated on first render when absent.
    pub id: Option<String>,
    /// Space-joined CSS classes for the bar element.
    pub css_class: Option<String>,
    /// Initial button collection, in display order.
    pub buttons: Vec<ButtonSpec>,
    /// Runs when a reveal transition completes.
    pub on_show: Option<LifecycleHook>,
    /// Runs when a conceal transition completes.
    pub on_hide: Option<LifecycleHook>,
    /// Runs once at construction.
    pub on_render: Option<LifecycleHook>,
}

impl ActionBarConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bar element id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the bar's CSS classes.
    pub fn with_css_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = Some(css_class.into());
        self
    }

    /// Append one initial button.
    pub fn with_button(mut self, spec: ButtonSpec) -> Self {
        self.buttons.push(spec);
        self
    }

    /// Append several initial buttons in order.
    pub fn with_buttons(mut self, specs: impl IntoIterator<Item = ButtonSpec>) -> Self {
        self.buttons.extend(specs);
        self
    }

    /// Register the show-completion hook.
    pub fn with_on_show<F: Fn() + Send + Sync + 'static>(mut self, hook: F) -> Self {
        self.on_show = Some(Box::new(hook));
        self
    }

    /// Register the hide-completion hook.
    pub fn with_on_hide<F: Fn() + Send + Sync + 'static>(mut self, hook: F) -> Self {
        self.on_hide = Some(Box::new(hook));
        self
    }

    /// Register the construction hook.
    pub fn with_on_render<F: Fn() + Send + Sync + 'static>(mut self, hook: F) -> Self {
        self.on_render = Some(Box::new(hook));
        self
    }
}

impl fmt::Debug for ActionBarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionBarConfig")
            .field("id", &self.id)
            .field("css_class", &self.css_class)
            .field("buttons", &self.buttons.len())
            .field("on_show", &self.on_show.as_ref().map(|_| "Fn"))
            .field("on_hide", &self.on_hide.as_ref().map(|_| "Fn"))
            .field("on_render", &self.on_render.as_ref().map(|_| "Fn"))
            .finish()
    }
}
