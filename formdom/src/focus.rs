use crate::node::NodeId;

/// Tracks which node currently has input focus.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<NodeId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused node.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn is_focused(&self, id: NodeId) -> bool {
        self.focused == Some(id)
    }

    /// Programmatically focus a node.
    /// Returns the previously focused node if focus changed, `Some(None)` if
    /// nothing was focused before, and `None` if `id` was already focused.
    pub fn focus(&mut self, id: NodeId) -> Option<Option<NodeId>> {
        if self.focused == Some(id) {
            return None;
        }
        Some(self.focused.replace(id))
    }

    /// Clear focus.
    /// Returns the node that lost focus, if any.
    pub fn blur(&mut self) -> Option<NodeId> {
        self.focused.take()
    }
}
