//! Linked-field cascade: the second container of a linked pair is enabled
//! only while the first field holds a value.

use formdom::{Document, NodeId};

use crate::binding::{BindingHandle, FieldBinding};
use crate::event::{FIELD_DISABLE, FIELD_ENABLE, FieldEvent};
use crate::host::FormHost;
use crate::registry::FieldRegistry;

impl FieldRegistry {
    /// Resolve the container a binding drives, declared once at bind time.
    ///
    /// The container must sit inside a linked-pair wrapper and have a next
    /// sibling distinct from itself.
    pub(crate) fn find_linked_container(
        &self,
        binding: &FieldBinding,
        dom: &Document,
    ) -> Option<NodeId> {
        let container = dom.live(binding.container)?;
        dom.closest(container, &self.selectors.linked)?;
        dom.next_sibling(container, None)
            .filter(|sibling| *sibling != container)
    }

    /// Ask the linked container to enable or disable itself to match this
    /// field's value.
    pub fn enable_disable_linked_field(&self, handle: BindingHandle, host: &mut FormHost) {
        let Some(binding) = self.binding(handle) else {
            return;
        };
        let Some(input) = self.input(handle, host.dom()) else {
            return;
        };
        let Some(linked) = host.dom().live(binding.linked) else {
            return;
        };

        let name = if host.dom().value(input).is_some_and(str::is_empty) {
            FIELD_DISABLE
        } else {
            FIELD_ENABLE
        };
        log::debug!("[cascade] {} -> {} {:?}", binding.name, name, linked);
        host.dispatch(FieldEvent::new(name, Some(linked)));
    }
}
