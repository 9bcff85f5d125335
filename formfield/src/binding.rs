use formdom::NodeId;

/// Stable index of a binding inside its registry (creation order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingHandle(pub(crate) usize);

impl BindingHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One bound input and its cooperating elements.
///
/// Element references are node ids resolved against the live document on
/// every use, so a removed peer simply reads as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) input: Option<NodeId>,
    pub(crate) label: Option<NodeId>,
    pub(crate) reset: Option<NodeId>,
    pub(crate) container: Option<NodeId>,
    /// Sibling container whose enabled state follows this field's value.
    pub(crate) linked: Option<NodeId>,
}

impl FieldBinding {
    /// Generated identifier, unique per process.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Logical field name (the input's `id` attribute), used as the data key.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input(&self) -> Option<NodeId> {
        self.input
    }

    pub fn label(&self) -> Option<NodeId> {
        self.label
    }

    pub fn reset_control(&self) -> Option<NodeId> {
        self.reset
    }

    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    pub fn linked_container(&self) -> Option<NodeId> {
        self.linked
    }
}
