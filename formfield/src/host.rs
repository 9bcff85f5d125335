//! Application root owning the document, event bus, focus and registries.
//!
//! Dispatch is synchronous and depth-first: an event raised by a handler is
//! fully delivered before that handler continues.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use formdom::event::{BLUR, CLICK, FOCUS, INPUT, INVALID};
use formdom::{Document, EventBus, EventName, FocusState, NodeId, SubscriptionId};

use crate::config::FieldConfig;
use crate::error::FormError;
use crate::event::{Detail, FORM_VALIDATE, FieldEvent};
use crate::registry::{FieldAction, FieldRegistry, FieldSource, RegistryId};

/// Callback registered through [`FormHost::add_listener`].
pub type Callback = Rc<dyn Fn(&FieldEvent)>;

/// Receiver of a subscription.
#[derive(Clone)]
pub enum Listener {
    /// A registry handler.
    Field {
        registry: RegistryId,
        action: FieldAction,
    },
    /// An external callback.
    Callback(Callback),
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { registry, action } => f
                .debug_struct("Field")
                .field("registry", registry)
                .field("action", action)
                .finish(),
            Self::Callback(_) => write!(f, "Callback(...)"),
        }
    }
}

/// Owns a document and every registry bound to it.
#[derive(Default)]
pub struct FormHost {
    dom: Document,
    bus: EventBus<Listener>,
    focus: FocusState,
    registries: HashMap<RegistryId, Rc<FieldRegistry>>,
}

impl FormHost {
    pub fn new(dom: Document) -> Self {
        Self {
            dom,
            ..Default::default()
        }
    }

    pub fn dom(&self) -> &Document {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Document {
        &mut self.dom
    }

    pub fn focus_state(&self) -> &FocusState {
        &self.focus
    }

    /// Number of live subscriptions, registry and external.
    pub fn subscription_count(&self) -> usize {
        self.bus.len()
    }

    // =========================================================================
    // Registries
    // =========================================================================

    /// Bind the inputs a source yields, using the default configuration.
    pub fn register(
        &mut self,
        source: impl Into<FieldSource>,
        category: impl Into<String>,
    ) -> Result<RegistryId, FormError> {
        self.register_with(source, category, FieldConfig::default())
    }

    /// Bind the inputs a source yields.
    ///
    /// A source that matches nothing yields an empty registry, not an error.
    pub fn register_with(
        &mut self,
        source: impl Into<FieldSource>,
        category: impl Into<String>,
        config: FieldConfig,
    ) -> Result<RegistryId, FormError> {
        let id = RegistryId::new();
        let registry = FieldRegistry::new(
            id,
            &source.into(),
            category,
            config,
            &mut self.dom,
            &mut self.bus,
        )?;
        self.registries.insert(id, Rc::new(registry));
        Ok(id)
    }

    pub fn registry(&self, id: RegistryId) -> Option<Rc<FieldRegistry>> {
        self.registries.get(&id).cloned()
    }

    /// Drop a registry and every subscription it created.
    /// Returns false if it was not registered.
    pub fn unregister(&mut self, id: RegistryId) -> bool {
        let Some(registry) = self.registries.remove(&id) else {
            return false;
        };
        for sub in registry.subscriptions() {
            self.bus.unsubscribe(*sub);
        }
        log::debug!("[host] unregistered {id}");
        true
    }

    /// Drop every registry and subscription.
    pub fn teardown(&mut self) {
        self.registries.clear();
        self.bus.clear();
    }

    // =========================================================================
    // Event bus
    // =========================================================================

    /// Subscribe a callback. A scoped callback only sees events targeting the
    /// scope node or its descendants.
    pub fn add_listener(
        &mut self,
        name: impl Into<EventName>,
        scope: Option<NodeId>,
        callback: impl Fn(&FieldEvent) + 'static,
    ) -> SubscriptionId {
        self.bus
            .subscribe(name, scope, Listener::Callback(Rc::new(callback)))
    }

    pub fn remove_listener(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Deliver an event to every matching subscriber, in subscription order.
    pub fn dispatch(&mut self, event: FieldEvent) {
        let listeners = self.bus.matching(&self.dom, &event.name, event.target);
        log::trace!(
            "[dispatch] {} target={:?} listeners={}",
            event.name,
            event.target,
            listeners.len()
        );

        for (sub, listener) in listeners {
            // Removed by an earlier handler of this same event
            if !self.bus.is_subscribed(sub) {
                continue;
            }
            match listener {
                Listener::Field { registry, action } => {
                    let Some(registry) = self.registry(registry) else {
                        continue;
                    };
                    registry.handle(action, &event, self);
                }
                Listener::Callback(callback) => callback(&event),
            }
        }
    }

    // =========================================================================
    // Platform behavior
    // =========================================================================

    /// Move focus onto a node, raising `blur` on the previous node and
    /// `focus` on the new one. No-op if the node is missing, disabled or
    /// already focused.
    pub fn set_focus(&mut self, node: NodeId) {
        match self.dom.get(node) {
            Some(control) if !control.disabled => {}
            _ => return,
        }
        let Some(previous) = self.focus.focus(node) else {
            return;
        };
        if let Some(previous) = previous {
            self.dispatch(FieldEvent::new(BLUR, Some(previous)));
        }
        self.dispatch(FieldEvent::new(FOCUS, Some(node)));
    }

    /// Clear focus, raising `blur` on the node that had it.
    pub fn blur(&mut self) {
        if let Some(previous) = self.focus.blur() {
            self.dispatch(FieldEvent::new(BLUR, Some(previous)));
        }
    }

    /// Replace a control's value as user input would, raising `input`.
    ///
    /// Disabled or missing controls ignore input; returns whether it applied.
    pub fn input(&mut self, node: NodeId, value: impl Into<String>) -> bool {
        match self.dom.get_mut(node) {
            Some(control) if !control.disabled => control.value = value.into(),
            _ => return false,
        }
        self.dispatch(FieldEvent::new(INPUT, Some(node)));
        true
    }

    pub fn click(&mut self, node: NodeId) {
        if self.dom.exists(node) {
            self.dispatch(FieldEvent::new(CLICK, Some(node)));
        }
    }

    /// Native validity check: raises `invalid` on the node before returning
    /// `Some(false)`. `None` if the node does not exist.
    pub fn check_validity(&mut self, node: NodeId) -> Option<bool> {
        let validity = self.dom.validity(node)?;
        if validity.valid() {
            return Some(true);
        }
        self.dispatch(FieldEvent::new(INVALID, Some(node)));
        Some(false)
    }

    /// Broadcast `form:validate` for a form.
    pub fn request_validation(&mut self, form: NodeId) {
        self.dispatch(FieldEvent::with_detail(
            FORM_VALIDATE,
            None,
            Detail::Validate { form: Some(form) },
        ));
    }
}
