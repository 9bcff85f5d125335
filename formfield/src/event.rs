//! Event names and payloads exchanged between registries and the host.

use std::collections::HashMap;

use formdom::{Event, EventName, NodeId};
use serde::Serialize;

/// Broadcast asking every registry to validate the fields inside a form.
pub const FORM_VALIDATE: EventName = EventName::new_static("form:validate");
/// Result of a registry's validation pass, scoped to the form.
pub const FORM_VALIDATION: EventName = EventName::new_static("form:validation");
/// Request to enable the field(s) inside the target container.
pub const FIELD_ENABLE: EventName = EventName::new_static("field:enable");
/// Request to clear and disable the field(s) inside the target container.
pub const FIELD_DISABLE: EventName = EventName::new_static("field:disable");

/// Event payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Detail {
    #[default]
    None,
    /// Payload of [`FORM_VALIDATE`]. A missing form makes the broadcast a no-op.
    Validate { form: Option<NodeId> },
    /// Payload of [`FORM_VALIDATION`].
    Validation(ValidationOutcome),
}

/// Event type flowing through the [`FormHost`](crate::FormHost).
pub type FieldEvent = Event<Detail>;

/// Outcome of one registry's validation pass.
///
/// `data` only holds every in-scope field when `is_valid` is true: the pass
/// stops at the first invalid field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub category: String,
    pub is_valid: bool,
    pub data: HashMap<String, String>,
}
