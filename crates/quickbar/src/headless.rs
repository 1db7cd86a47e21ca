//! In-memory renderer backend.
//!
//! [`HeadlessRenderer`] implements the [`Renderer`] seam against a plain
//! in-memory element tree: no DOM, no animation, completions run
//! immediately. It exists for two audiences:
//!
//! - this crate's own tests, and
//! - host applications that want to unit-test their bar wiring without a UI
//!   backend.
//!
//! It also models the deferred-mount case: a renderer created with
//! [`detached`](HeadlessRenderer::detached) refuses to create the container
//! until [`mount`](HeadlessRenderer::mount) is called, the same way a real
//! backend behaves before its mount point exists.
//!
//! # Example
//!
//! ```
//! use quickbar::{ActionBar, ActionBarConfig, ButtonSpec, HeadlessRenderer, Item};
//!
//! let config = ActionBarConfig::new()
//!     .with_button(ButtonSpec::new().with_id("delete").with_min_items(1));
//! let mut bar = ActionBar::new(HeadlessRenderer::new(), config);
//!
//! bar.add_item(Item::new().with("id", 1));
//! assert!(bar.bar_state().visible);
//! ```

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::button::{ButtonAction, ButtonSpec};
use crate::renderer::{
    ButtonHandle, CompletionCallback, ContainerHandle, RenderError, Renderer, Result,
};

/// In-memory stand-in for the bar's root element.
#[derive(Debug, Default)]
pub struct ContainerElement {
    /// Element id attribute.
    pub id: String,
    /// Space-joined class attribute.
    pub css_class: Option<String>,
    /// Whether the element is currently revealed.
    pub visible: bool,
    /// Child buttons in append order.
    pub children: Vec<ButtonHandle>,
    /// Other attributes set through `set_element_prop`.
    pub props: HashMap<String, String>,
}

/// In-memory stand-in for one rendered button element.
#[derive(Default)]
pub struct ButtonElement {
    /// Button id attribute.
    pub id: Option<String>,
    /// Button label.
    pub text: Option<String>,
    /// Icon class/name.
    pub icon: Option<String>,
    /// Extra CSS classes.
    pub css_class: Option<String>,
    /// Attached activation callback.
    action: Option<ButtonAction>,
}

/// Renderer backend that renders into plain memory.
#[derive(Default)]
pub struct HeadlessRenderer {
    mounted: bool,
    containers: SlotMap<ContainerHandle, ContainerElement>,
    buttons: SlotMap<ButtonHandle, ButtonElement>,
    deselect_count: usize,
}

impl HeadlessRenderer {
    /// Create a renderer with a mount point already available.
    pub fn new() -> Self {
        Self {
            mounted: true,
            ..Self::default()
        }
    }

    /// Create a renderer with no mount point.
    ///
    /// `ensure_container` fails with [`RenderError::NoMountPoint`] until
    /// [`mount`](Self::mount) is called.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Attach the mount point, allowing container creation.
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Look up a container element.
    pub fn container(&self, handle: ContainerHandle) -> Option<&ContainerElement> {
        self.containers.get(handle)
    }

    /// Find a container element by its id attribute.
    pub fn container_by_id(&self, id: &str) -> Option<&ContainerElement> {
        self.containers.values().find(|c| c.id == id)
    }

    /// Look up a button element.
    pub fn button(&self, handle: ButtonHandle) -> Option<&ButtonElement> {
        self.buttons.get(handle)
    }

    /// The button elements appended to a container, in order.
    pub fn buttons_in(&self, container: ContainerHandle) -> Vec<&ButtonElement> {
        self.containers
            .get(container)
            .map(|c| {
                c.children
                    .iter()
                    .filter_map(|&child| self.buttons.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether a container is currently revealed.
    pub fn is_visible(&self, container: ContainerHandle) -> bool {
        self.containers.get(container).is_some_and(|c| c.visible)
    }

    /// How many times `deselect_all` has been invoked.
    pub fn deselect_count(&self) -> usize {
        self.deselect_count
    }

    /// Simulate a click on a rendered button, running its attached action.
    ///
    /// Returns `false` if the button does not exist or has no action.
    pub fn click(&self, button: ButtonHandle) -> bool {
        match self.buttons.get(button).and_then(|b| b.action.as_ref()) {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }
}

impl Renderer for HeadlessRenderer {
    fn ensure_container(&mut self, id: &str, css_class: Option<&str>) -> Result<ContainerHandle> {
        if !self.mounted {
            return Err(RenderError::NoMountPoint);
        }
        if let Some((handle, _)) = self.containers.iter().find(|(_, c)| c.id == id) {
            return Ok(handle);
        }
        let handle = self.containers.insert(ContainerElement {
            id: id.to_owned(),
            css_class: css_class.map(str::to_owned),
            visible: false,
            children: Vec::new(),
            props: HashMap::new(),
        });
        tracing::debug!(target: "quickbar::renderer", id, "container created");
        Ok(handle)
    }

    fn clear_container(&mut self, container: ContainerHandle) -> Result<()> {
        let element = self
            .containers
            .get_mut(container)
            .ok_or(RenderError::UnknownContainer)?;
        for child in element.children.drain(..) {
            self.buttons.remove(child);
        }
        Ok(())
    }

    fn remove_container(&mut self, container: ContainerHandle) -> Result<()> {
        let element = self
            .containers
            .remove(container)
            .ok_or(RenderError::UnknownContainer)?;
        for child in element.children {
            self.buttons.remove(child);
        }
        tracing::debug!(target: "quickbar::renderer", id = element.id, "container removed");
        Ok(())
    }

    fn render_button(&mut self, spec: &ButtonSpec) -> Result<ButtonHandle> {
        Ok(self.buttons.insert(ButtonElement {
            id: spec.id().map(str::to_owned),
            text: spec.text().map(str::to_owned),
            icon: spec.icon().map(str::to_owned),
            css_class: spec.css_class().map(str::to_owned),
            action: None,
        }))
    }

    fn attach_action(&mut self, button: ButtonHandle, action: ButtonAction) -> Result<()> {
        let element = self
            .buttons
            .get_mut(button)
            .ok_or(RenderError::UnknownButton)?;
        element.action = Some(action);
        Ok(())
    }

    fn append_to_container(
        &mut self,
        container: ContainerHandle,
        button: ButtonHandle,
    ) -> Result<()> {
        if !self.buttons.contains_key(button) {
            return Err(RenderError::UnknownButton);
        }
        let element = self
            .containers
            .get_mut(container)
            .ok_or(RenderError::UnknownContainer)?;
        element.children.push(button);
        Ok(())
    }

    fn show(
        &mut self,
        container: ContainerHandle,
        on_complete: Option<CompletionCallback>,
    ) -> Result<()> {
        let element = self
            .containers
            .get_mut(container)
            .ok_or(RenderError::UnknownContainer)?;
        element.visible = true;
        // No animation to wait for; the transition completes at once
        if let Some(callback) = on_complete {
            callback();
        }
        Ok(())
    }

    fn hide(
        &mut self,
        container: ContainerHandle,
        on_complete: Option<CompletionCallback>,
    ) -> Result<()> {
        let element = self
            .containers
            .get_mut(container)
            .ok_or(RenderError::UnknownContainer)?;
        element.visible = false;
        if let Some(callback) = on_complete {
            callback();
        }
        Ok(())
    }

    fn set_element_prop(
        &mut self,
        container: ContainerHandle,
        prop: &str,
        value: &str,
    ) -> Result<()> {
        let element = self
            .containers
            .get_mut(container)
            .ok_or(RenderError::UnknownContainer)?;
        match prop {
            "id" => element.id = value.to_owned(),
            "class" => element.css_class = Some(value.to_owned()),
            _ => {
                element.props.insert(prop.to_owned(), value.to_owned());
            }
        }
        Ok(())
    }

    fn deselect_all(&mut self) -> Result<()> {
        self.deselect_count += 1;
        Ok(())
    }
}
