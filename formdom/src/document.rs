use crate::node::{Element, Node, NodeId};
use crate::selector::Selector;
use crate::validity::ValidityState;

/// Arena-backed element tree.
///
/// The document always has a root `body` node. Nodes are addressed by
/// [`NodeId`]; removed nodes leave a tombstone so stale ids resolve to `None`.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let (body, _) = Element::new("body").into_node(None);
        Self {
            nodes: vec![Some(body)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn exists(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Resolve a possibly-dangling reference to a live node.
    pub fn live(&self, id: Option<NodeId>) -> Option<NodeId> {
        id.filter(|id| self.exists(*id))
    }

    /// Mount an element (and its children) as the last child of `parent`.
    ///
    /// Returns `None` if the parent does not exist.
    pub fn mount(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        if !self.exists(parent) {
            return None;
        }
        Some(self.insert(parent, element))
    }

    fn insert(&mut self, parent: NodeId, element: Element) -> NodeId {
        let (node, children) = element.into_node(Some(parent));
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(node));
        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
        }
        for child in children {
            self.insert(id, child);
        }
        id
    }

    /// Remove a node and its whole subtree. Returns false if it did not exist
    /// or is the root.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.exists(id) {
            return false;
        }
        if let Some(parent) = self.get(id).and_then(|n| n.parent) {
            if let Some(p) = self.get_mut(parent) {
                p.children.retain(|c| *c != id);
            }
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current.0).and_then(Option::take) {
                stack.extend(node.children);
            }
        }
        true
    }

    // =========================================================================
    // Structural queries
    // =========================================================================

    /// Ancestors of a node, nearest first (excluding the node itself).
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.get(id).and_then(|n| n.parent),
        }
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.exists(ancestor) || !self.exists(node) {
            return false;
        }
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Nearest inclusive ancestor matching the selector.
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        let node = self.get(id)?;
        if selector.matches(node) {
            return Some(id);
        }
        self.ancestors(id)
            .find(|a| self.get(*a).is_some_and(|n| selector.matches(n)))
    }

    fn siblings(&self, id: NodeId) -> Option<(&[NodeId], usize)> {
        let parent = self.get(self.get(id)?.parent?)?;
        let pos = parent.children.iter().position(|c| *c == id)?;
        Some((&parent.children, pos))
    }

    /// Nearest preceding sibling matching the selector.
    pub fn previous_sibling(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        let (siblings, pos) = self.siblings(id)?;
        siblings[..pos]
            .iter()
            .rev()
            .copied()
            .find(|s| self.get(*s).is_some_and(|n| selector.matches(n)))
    }

    /// Nearest following sibling matching the selector, or the immediate
    /// next sibling when no selector is given.
    pub fn next_sibling(&self, id: NodeId, selector: Option<&Selector>) -> Option<NodeId> {
        let (siblings, pos) = self.siblings(id)?;
        let mut following = siblings[pos + 1..].iter().copied();
        match selector {
            None => following.next(),
            Some(sel) => following.find(|s| self.get(*s).is_some_and(|n| sel.matches(n))),
        }
    }

    /// Descendants of `scope` in document order (excluding `scope`).
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(node) = self.get(scope) else {
            return out;
        };
        let mut stack: Vec<NodeId> = node.children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if let Some(n) = self.get(current) {
                out.push(current);
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    /// First descendant of `scope` matching the selector.
    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|d| self.get(*d).is_some_and(|n| selector.matches(n)))
    }

    /// All nodes in the document matching the selector, in document order.
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|d| self.get(*d).is_some_and(|n| selector.matches(n)))
            .collect()
    }

    /// Find a node by its `id` attribute.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|d| self.get(*d).and_then(|n| n.attribute("id")) == Some(id))
    }

    /// Concatenated text of the node and its descendants, trimmed.
    pub fn inner_text(&self, id: NodeId) -> String {
        let mut text = self.get(id).map(|n| n.text.clone()).unwrap_or_default();
        for d in self.descendants(id) {
            if let Some(n) = self.get(d) {
                text.push_str(&n.text);
            }
        }
        text.trim().to_string()
    }

    // =========================================================================
    // Form control helpers
    // =========================================================================

    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.value.as_str())
    }

    /// Set a control's value. Returns false if the node does not exist.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(node) => {
                node.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Current validity of a control, or `None` if the node does not exist.
    pub fn validity(&self, id: NodeId) -> Option<ValidityState> {
        let node = self.get(id)?;
        Some(ValidityState::evaluate(
            &node.value,
            node.disabled,
            &node.constraints,
        ))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.get(id).is_some_and(|n| n.has_class(class))
    }

    /// Whether the node exists and is not hidden by its inline display.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| !n.is_hidden())
    }
}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get(current).and_then(|n| n.parent);
        Some(current)
    }
}
