//! Field registry: discovers inputs, binds them and routes events to handlers.

use std::fmt;

use formdom::event::{BLUR, CLICK, FOCUS, INPUT, INVALID};
use formdom::{
    Display, Document, EventBus, EventName, NodeId, Selector, SubscriptionId, generate_id,
};
use uuid::Uuid;

use crate::binding::{BindingHandle, FieldBinding};
use crate::config::FieldConfig;
use crate::error::FormError;
use crate::event::{FIELD_DISABLE, FIELD_ENABLE, FORM_VALIDATE, FieldEvent};
use crate::host::{FormHost, Listener};

/// Unique identifier for a registry owned by a [`FormHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistryId(Uuid);

impl RegistryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RegistryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a registry finds its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    /// Every node matching a selector, in document order.
    Selector(String),
    /// An explicit ordered list of nodes.
    Nodes(Vec<NodeId>),
}

impl From<&str> for FieldSource {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for FieldSource {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl From<Vec<NodeId>> for FieldSource {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::Nodes(nodes)
    }
}

impl From<&[NodeId]> for FieldSource {
    fn from(nodes: &[NodeId]) -> Self {
        Self::Nodes(nodes.to_vec())
    }
}

/// What a subscription does when its event arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    /// Registry-wide validation of a form (`form:validate`).
    Validate,
    Focus(BindingHandle),
    Blur(BindingHandle),
    Write(BindingHandle),
    Invalid(BindingHandle),
    Enable(BindingHandle),
    Disable(BindingHandle),
    Reset(BindingHandle),
    /// Label click: move focus onto the input.
    FocusInput(BindingHandle),
}

pub(crate) struct Selectors {
    pub(crate) label: Selector,
    pub(crate) reset: Selector,
    pub(crate) container: Selector,
    pub(crate) linked: Selector,
    pub(crate) error_container: Selector,
}

impl Selectors {
    fn new(config: &FieldConfig) -> Self {
        Self {
            label: Selector::tag(&config.label_tag),
            reset: Selector::class(&config.reset_class),
            container: Selector::class(&config.container_class),
            linked: Selector::class(&config.linked_class),
            error_container: Selector::class(&config.error_container_class),
        }
    }
}

/// Owns the bindings for one set of inputs sharing a category.
///
/// Bindings are created once, at construction, and never change identity;
/// their handles stay valid for the registry's lifetime.
pub struct FieldRegistry {
    id: RegistryId,
    category: String,
    pub(crate) config: FieldConfig,
    pub(crate) selectors: Selectors,
    bindings: Vec<FieldBinding>,
    subscriptions: Vec<SubscriptionId>,
}

impl FieldRegistry {
    /// Bind every input the source yields and subscribe the handlers.
    pub(crate) fn new(
        id: RegistryId,
        source: &FieldSource,
        category: impl Into<String>,
        config: FieldConfig,
        dom: &mut Document,
        bus: &mut EventBus<Listener>,
    ) -> Result<Self, FormError> {
        let nodes = match source {
            FieldSource::Selector(selector) => {
                dom.query_selector_all(&Selector::parse(selector)?)
            }
            FieldSource::Nodes(nodes) => nodes.clone(),
        };

        let mut registry = Self {
            id,
            category: category.into(),
            selectors: Selectors::new(&config),
            config,
            bindings: Vec::with_capacity(nodes.len()),
            subscriptions: Vec::new(),
        };

        let sub = bus.subscribe(FORM_VALIDATE, None, registry.listener(FieldAction::Validate));
        registry.subscriptions.push(sub);

        for node in nodes {
            registry.create(node, dom, bus);
        }

        log::debug!(
            "[registry] {} bound {} field(s) for category '{}'",
            registry.id,
            registry.bindings.len(),
            registry.category
        );

        Ok(registry)
    }

    fn listener(&self, action: FieldAction) -> Listener {
        Listener::Field {
            registry: self.id,
            action,
        }
    }

    fn create(&mut self, node: NodeId, dom: &mut Document, bus: &mut EventBus<Listener>) {
        let input = dom.live(Some(node));
        let binding = FieldBinding {
            id: generate_id("field"),
            name: input
                .and_then(|n| dom.get(n))
                .and_then(|n| n.attribute("id"))
                .unwrap_or_default()
                .to_string(),
            input,
            label: input.and_then(|n| dom.previous_sibling(n, &self.selectors.label)),
            reset: input.and_then(|n| dom.next_sibling(n, Some(&self.selectors.reset))),
            container: input.and_then(|n| dom.closest(n, &self.selectors.container)),
            linked: None,
        };
        let linked = self.find_linked_container(&binding, dom);
        let binding = FieldBinding { linked, ..binding };

        // Fields always start with a collapsed label
        if let Some(label) = binding.label.and_then(|l| dom.get_mut(l)) {
            label.remove_class(&self.config.active_label_class);
        }

        let handle = BindingHandle(self.bindings.len());
        let registry = self.id;
        let subscriptions = &mut self.subscriptions;
        let mut subscribe = |name: EventName, scope: Option<NodeId>, action: FieldAction| {
            // Handlers are only wired to peers that exist
            if let Some(scope) = scope {
                let listener = Listener::Field { registry, action };
                subscriptions.push(bus.subscribe(name, Some(scope), listener));
            }
        };

        subscribe(FOCUS, binding.input, FieldAction::Focus(handle));
        subscribe(BLUR, binding.input, FieldAction::Blur(handle));
        subscribe(INVALID, binding.input, FieldAction::Invalid(handle));
        subscribe(INPUT, binding.input, FieldAction::Write(handle));
        subscribe(FIELD_ENABLE, binding.container, FieldAction::Enable(handle));
        subscribe(FIELD_DISABLE, binding.container, FieldAction::Disable(handle));
        subscribe(CLICK, binding.reset, FieldAction::Reset(handle));
        subscribe(CLICK, binding.label, FieldAction::FocusInput(handle));

        log::trace!(
            "[registry] binding {} name='{}' label={:?} reset={:?} container={:?} linked={:?}",
            binding.id,
            binding.name,
            binding.label,
            binding.reset,
            binding.container,
            binding.linked
        );

        self.bindings.push(binding);
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    pub fn binding(&self, handle: BindingHandle) -> Option<&FieldBinding> {
        self.bindings.get(handle.0)
    }

    /// Handles of every binding, in creation order.
    pub fn handles(&self) -> impl Iterator<Item = BindingHandle> + '_ {
        (0..self.bindings.len()).map(BindingHandle)
    }

    /// Handle of the binding with the given field name.
    pub fn handle_by_name(&self, name: &str) -> Option<BindingHandle> {
        self.bindings
            .iter()
            .position(|b| b.name == name)
            .map(BindingHandle)
    }

    pub(crate) fn subscriptions(&self) -> &[SubscriptionId] {
        &self.subscriptions
    }

    /// Live input node of a binding.
    pub(crate) fn input(&self, handle: BindingHandle, dom: &Document) -> Option<NodeId> {
        dom.live(self.binding(handle)?.input)
    }

    pub(crate) fn handle(&self, action: FieldAction, event: &FieldEvent, host: &mut FormHost) {
        match action {
            FieldAction::Validate => self.validate(event, host),
            FieldAction::Focus(h) => self.focus(h, host),
            FieldAction::Blur(h) => self.blur(h, host),
            FieldAction::Write(h) => self.write(h, host),
            FieldAction::Invalid(h) => self.invalid(h, host),
            FieldAction::Enable(h) => self.enable(h, host),
            FieldAction::Disable(h) => self.disable(h, host),
            FieldAction::Reset(h) => self.reset(h, host),
            FieldAction::FocusInput(h) => self.focus_input(h, host),
        }
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// The input gained focus: raise the label.
    pub fn focus(&self, handle: BindingHandle, host: &mut FormHost) {
        let Some(binding) = self.binding(handle) else {
            return;
        };
        let Some(label) = binding.label.and_then(|l| host.dom_mut().get_mut(l)) else {
            return;
        };
        label.add_class(&self.config.active_label_class);
    }

    /// The input lost focus: lower the label unless the field holds a value.
    pub fn blur(&self, handle: BindingHandle, host: &mut FormHost) {
        let Some(binding) = self.binding(handle) else {
            return;
        };
        let Some(input) = self.input(handle, host.dom()) else {
            return;
        };
        let Some(label) = host.dom().live(binding.label) else {
            return;
        };
        if host.dom().value(input).is_some_and(str::is_empty) {
            if let Some(label) = host.dom_mut().get_mut(label) {
                label.remove_class(&self.config.active_label_class);
            }
        }
    }

    /// The value changed while the input has focus.
    pub fn write(&self, handle: BindingHandle, host: &mut FormHost) {
        let Some(input) = self.input(handle, host.dom()) else {
            return;
        };
        if !host.focus_state().is_focused(input) {
            return;
        }

        self.show_hide_reset_button(handle, host);
        self.enable_disable_linked_field(handle, host);
    }

    /// Label click: move focus onto the input.
    pub fn focus_input(&self, handle: BindingHandle, host: &mut FormHost) {
        if let Some(input) = self.input(handle, host.dom()) {
            host.set_focus(input);
        }
    }

    // =========================================================================
    // Enable / disable / reset
    // =========================================================================

    /// Clear the value, then hand focus back to the input.
    pub fn reset(&self, handle: BindingHandle, host: &mut FormHost) {
        let Some(input) = self.input(handle, host.dom()) else {
            return;
        };

        host.dom_mut().set_value(input, "");
        self.show_hide_reset_button(handle, host);
        self.enable_disable_linked_field(handle, host);
        host.set_focus(input);
    }

    /// Show the reset control iff the input holds a value.
    pub fn show_hide_reset_button(&self, handle: BindingHandle, host: &mut FormHost) {
        let Some(binding) = self.binding(handle) else {
            return;
        };
        let Some(input) = self.input(handle, host.dom()) else {
            return;
        };
        let Some(reset) = host.dom().live(binding.reset) else {
            return;
        };

        let display = if host.dom().value(input).is_some_and(str::is_empty) {
            Display::None
        } else {
            Display::Block
        };
        if let Some(reset) = host.dom_mut().get_mut(reset) {
            reset.display = display;
        }
    }

    pub fn enable(&self, handle: BindingHandle, host: &mut FormHost) {
        let Some(input) = self.input(handle, host.dom()) else {
            return;
        };
        if let Some(node) = host.dom_mut().get_mut(input) {
            node.disabled = false;
        }
    }

    /// Clear and disable the input, then propagate down a linked chain.
    pub fn disable(&self, handle: BindingHandle, host: &mut FormHost) {
        let Some(binding) = self.binding(handle) else {
            return;
        };
        let Some(input) = self.input(handle, host.dom()) else {
            return;
        };
        let Some(label) = host.dom().live(binding.label) else {
            return;
        };

        if let Some(node) = host.dom_mut().get_mut(input) {
            node.value.clear();
            node.disabled = true;
        }
        if let Some(label) = host.dom_mut().get_mut(label) {
            label.remove_class(&self.config.active_label_class);
        }

        self.show_hide_reset_button(handle, host);
        self.enable_disable_linked_field(handle, host);
    }
}
