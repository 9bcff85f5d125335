//! Headless element tree for form widgets: an arena document with stable
//! node ids, compound selectors, native constraint validation, a scoped
//! event bus and focus tracking.

pub mod document;
pub mod event;
pub mod focus;
pub mod id;
pub mod node;
pub mod selector;
pub mod validity;

pub use document::{Ancestors, Document};
pub use event::{Event, EventBus, EventName, SubscriptionId};
pub use focus::FocusState;
pub use id::generate_id;
pub use node::{Display, Element, Node, NodeId};
pub use selector::{Selector, SelectorError};
pub use validity::{Constraints, InputType, ValidityFlag, ValidityState};
