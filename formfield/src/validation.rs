//! Form validation and inline, accessible error rendering.

use std::collections::HashMap;

use formdom::{Element, NodeId, generate_id};

use crate::binding::BindingHandle;
use crate::config::format_error_message;
use crate::event::{Detail, FORM_VALIDATION, FieldEvent, ValidationOutcome};
use crate::host::FormHost;
use crate::registry::FieldRegistry;

const ARIA_INVALID: &str = "aria-invalid";
const ARIA_DESCRIBEDBY: &str = "aria-describedby";

impl FieldRegistry {
    /// Validate every binding inside the form named by a `form:validate`
    /// broadcast and emit `form:validation` scoped to that form.
    ///
    /// Stops at the first invalid field; later fields are neither checked
    /// nor included in the data.
    pub fn validate(&self, event: &FieldEvent, host: &mut FormHost) {
        let &Detail::Validate { form: Some(form) } = &event.detail else {
            log::debug!("[validate] ignoring broadcast without a form");
            return;
        };

        let mut is_valid = true;
        let mut data = HashMap::new();
        for handle in self.handles() {
            let Some(binding) = self.binding(handle) else {
                continue;
            };
            let in_form = binding
                .container
                .is_some_and(|container| host.dom().contains(form, container));
            if !in_form {
                continue;
            }

            match self.check_validity(handle, host) {
                Some(false) => {
                    is_valid = false;
                    break;
                }
                Some(true) => {
                    if let Some((name, value)) = self.data(handle, host) {
                        data.insert(name, value);
                    }
                }
                None => {}
            }
        }

        log::debug!(
            "[validate] category='{}' valid={} fields={}",
            self.category(),
            is_valid,
            data.len()
        );

        let outcome = ValidationOutcome {
            category: self.category().to_string(),
            is_valid,
            data,
        };
        host.dispatch(FieldEvent::with_detail(
            FORM_VALIDATION,
            Some(form),
            Detail::Validation(outcome),
        ));
    }

    /// The binding's `(name, value)` pair.
    pub fn data(&self, handle: BindingHandle, host: &FormHost) -> Option<(String, String)> {
        let binding = self.binding(handle)?;
        let input = self.input(handle, host.dom())?;
        let value = host.dom().value(input)?;
        Some((binding.name.clone(), value.to_string()))
    }

    /// Clear any error annotations, then ask the input for its validity.
    ///
    /// Returns `None` when the binding has no input. An invalid input
    /// receives an `invalid` event before this returns.
    pub fn check_validity(&self, handle: BindingHandle, host: &mut FormHost) -> Option<bool> {
        let binding = self.binding(handle)?;
        let input = self.input(handle, host.dom())?;

        if let Some(node) = host.dom_mut().get_mut(input) {
            node.remove_attribute(ARIA_INVALID);
            node.remove_attribute(ARIA_DESCRIBEDBY);
            node.remove_class(&self.config.error_class);
        }
        if let Some(container) = host.dom().live(binding.container) {
            self.remove_error(container, host);
        }

        host.check_validity(input)
    }

    /// Render the error message for an input that reported itself invalid.
    pub fn invalid(&self, handle: BindingHandle, host: &mut FormHost) {
        let Some(binding) = self.binding(handle) else {
            return;
        };
        let Some(input) = self.input(handle, host.dom()) else {
            return;
        };
        let Some(label) = host.dom().live(binding.label) else {
            return;
        };
        let Some(container) = host.dom().live(binding.container) else {
            return;
        };
        let Some(validity) = host.dom().validity(input) else {
            return;
        };

        self.remove_error(container, host);

        let template = self.config.messages.select(&validity);
        let message = format_error_message(template, &host.dom().inner_text(label));
        log::debug!("[invalid] {}: {}", binding.name, message);

        let message_id = generate_id("error");
        let icon = self
            .config
            .error_icon_classes
            .iter()
            .fold(Element::new("i"), |el, class| el.class(class))
            .attr("aria-hidden", "true");
        let text = self
            .config
            .error_text_classes
            .iter()
            .fold(Element::new("p").id(&message_id), |el, class| el.class(class))
            .child(icon)
            .child(Element::span(message).class(&self.config.error_inner_text_class));
        let block = Element::div()
            .class(&self.config.error_container_class)
            .child(text);
        host.dom_mut().mount(container, block);

        if let Some(node) = host.dom_mut().get_mut(input) {
            node.add_class(&self.config.error_class);
            node.set_attribute(ARIA_INVALID, "true");
            node.set_attribute(ARIA_DESCRIBEDBY, message_id);
        }
    }

    /// Remove the inline error block from a container, if any.
    fn remove_error(&self, container: NodeId, host: &mut FormHost) {
        while let Some(error) = host
            .dom()
            .query_selector(container, &self.selectors.error_container)
        {
            host.dom_mut().remove(error);
        }
    }
}
