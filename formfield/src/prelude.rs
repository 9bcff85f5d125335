//! Common imports for hosting form fields.

pub use formdom::event::{BLUR, CLICK, FOCUS, INPUT, INVALID};
pub use formdom::{Display, Document, Element, InputType, NodeId, Selector, ValidityFlag};

pub use crate::{
    BindingHandle, Detail, ErrorMessages, FIELD_DISABLE, FIELD_ENABLE, FORM_VALIDATE,
    FORM_VALIDATION, FieldConfig, FieldEvent, FieldRegistry, FormError, FormHost, RegistryId,
    ValidationOutcome,
};
