//! Named events and a scoped subscription table.
//!
//! The bus only decides *who* receives an event; delivering it is up to the
//! owner, which keeps handler state out of the bus and lets delivery recurse.

use std::borrow::Cow;
use std::fmt;

use crate::document::Document;
use crate::node::NodeId;

/// Event name, e.g. `focus` or `form:validate`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventName(Cow<'static, str>);

impl EventName {
    pub const fn new_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for EventName {
    fn from(name: &'static str) -> Self {
        Self::new_static(name)
    }
}

impl From<String> for EventName {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element gained focus.
pub const FOCUS: EventName = EventName::new_static("focus");
/// Element lost focus.
pub const BLUR: EventName = EventName::new_static("blur");
/// Element value changed through user input.
pub const INPUT: EventName = EventName::new_static("input");
/// Element was activated.
pub const CLICK: EventName = EventName::new_static("click");
/// Element failed a validity check.
pub const INVALID: EventName = EventName::new_static("invalid");

/// A dispatched event: name, optional target node and a payload.
///
/// An event without a target is a global broadcast.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<D> {
    pub name: EventName,
    pub target: Option<NodeId>,
    pub detail: D,
}

impl<D: Default> Event<D> {
    pub fn new(name: impl Into<EventName>, target: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            target,
            detail: D::default(),
        }
    }
}

impl<D> Event<D> {
    pub fn with_detail(name: impl Into<EventName>, target: Option<NodeId>, detail: D) -> Self {
        Self {
            name: name.into(),
            target,
            detail,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone)]
struct Subscription<L> {
    id: SubscriptionId,
    name: EventName,
    scope: Option<NodeId>,
    listener: L,
}

/// Subscription table keyed by event name with an optional scope node.
///
/// A scoped subscription receives an event when the event's target is the
/// scope node or one of its descendants. An unscoped subscription receives
/// every event of that name.
#[derive(Debug, Clone)]
pub struct EventBus<L> {
    subscriptions: Vec<Subscription<L>>,
    next_id: u64,
}

impl<L> Default for EventBus<L> {
    fn default() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }
}

impl<L: Clone> EventBus<L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        name: impl Into<EventName>,
        scope: Option<NodeId>,
        listener: L,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            name: name.into(),
            scope,
            listener,
        });
        id
    }

    /// Remove a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.iter().any(|s| s.id == id)
    }

    /// Snapshot of the listeners an event reaches, in subscription order.
    pub fn matching(
        &self,
        doc: &Document,
        name: &EventName,
        target: Option<NodeId>,
    ) -> Vec<(SubscriptionId, L)> {
        self.subscriptions
            .iter()
            .filter(|s| &s.name == name)
            .filter(|s| match (s.scope, target) {
                (None, _) => true,
                (Some(scope), Some(target)) => doc.contains(scope, target),
                (Some(_), None) => false,
            })
            .map(|s| (s.id, s.listener.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Drop every subscription.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }
}
