//! Interactive behavior for bound form inputs.
//!
//! A [`FieldRegistry`] binds input widgets found in a [`formdom::Document`]
//! to their label, reset control and container, and reacts to events routed
//! through the [`FormHost`]:
//!
//! - the label is "active" while the input is focused or filled
//! - the reset control is visible while the input holds a value
//! - linked pairs enable or disable their second field from the first's value
//! - `form:validate` checks native validity and renders an accessible inline
//!   error for the first invalid field, then emits `form:validation`
//!
//! # Example
//!
//! ```ignore
//! let mut host = FormHost::new(dom);
//! host.register("input.text-field", "contact")?;
//! host.add_listener(FORM_VALIDATION, Some(form), |event| {
//!     if let Detail::Validation(outcome) = &event.detail {
//!         println!("{}", serde_json::to_string(outcome).unwrap());
//!     }
//! });
//! host.request_validation(form);
//! ```

mod binding;
mod cascade;
pub mod config;
mod error;
pub mod event;
mod host;
pub mod prelude;
mod registry;
mod validation;

pub use binding::{BindingHandle, FieldBinding};
pub use config::{ErrorMessages, FieldConfig, format_error_message};
pub use error::FormError;
pub use event::{
    Detail, FIELD_DISABLE, FIELD_ENABLE, FORM_VALIDATE, FORM_VALIDATION, FieldEvent,
    ValidationOutcome,
};
pub use host::{Callback, FormHost, Listener};
pub use registry::{FieldAction, FieldRegistry, FieldSource, RegistryId};
