use std::collections::HashMap;

use crate::id::generate_id;
use crate::validity::{Constraints, InputType};

/// Stable handle to a node in a [`Document`](crate::Document).
///
/// Slots are never reused: once a node is removed its id stays dangling and
/// every lookup through it yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Inline display override, set through the element's style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Display {
    /// No inline override; the element is visible.
    #[default]
    Unset,
    Block,
    None,
}

/// A node living inside a document.
#[derive(Debug, Clone)]
pub struct Node {
    tag: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,

    pub attributes: HashMap<String, String>,
    /// Class list, insertion ordered, no duplicates.
    pub(crate) classes: Vec<String>,
    /// Own text content (not including descendants).
    pub text: String,

    // Form control state
    pub value: String,
    pub disabled: bool,
    pub constraints: Constraints,

    pub display: Display,
}

impl Node {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. Returns false if it was already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Remove a class. Returns false if it was not present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    /// Whether the inline display hides this node.
    pub fn is_hidden(&self) -> bool {
        self.display == Display::None
    }
}

/// Owned element description, mounted into a document with
/// [`Document::mount`](crate::Document::mount).
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub classes: Vec<String>,
    pub text: String,
    pub value: String,
    pub disabled: bool,
    pub constraints: Constraints,
    pub display: Display,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            text: String::new(),
            value: String::new(),
            disabled: false,
            constraints: Constraints::default(),
            display: Display::Unset,
            children: Vec::new(),
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn form() -> Self {
        Self::new("form")
    }

    pub fn span(text: impl Into<String>) -> Self {
        Self::new("span").text(text)
    }

    pub fn button(text: impl Into<String>) -> Self {
        Self::new("button").text(text)
    }

    /// Create a text input with a generated id.
    pub fn input() -> Self {
        Self::new("input").id(generate_id("input"))
    }

    // Identity and attributes

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    // Form control state

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.constraints.input_type = input_type;
        self.attr("type", input_type.as_str())
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.constraints.pattern = Some(pattern.into());
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.constraints.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.constraints.max_length = Some(max);
        self
    }

    // Tree

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(new_children);
        self
    }

    pub(crate) fn into_node(self, parent: Option<NodeId>) -> (Node, Vec<Element>) {
        let node = Node {
            tag: self.tag,
            parent,
            children: Vec::new(),
            attributes: self.attributes,
            classes: self.classes,
            text: self.text,
            value: self.value,
            disabled: self.disabled,
            constraints: self.constraints,
            display: self.display,
        };
        (node, self.children)
    }
}
