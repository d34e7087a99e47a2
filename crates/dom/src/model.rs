use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::identity::NodeIdentity;

/// Shared handle to a live node. Identity is the handle itself, not any
/// attribute: two nodes with equal attributes are still distinct elements.
pub type NodeRef = Arc<Node>;

/// Upper-cased DOM node name, the one mandatory field of every element.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum NodeName {
    A,
    Input,
    Select,
    TextArea,
    Option,
    Form,
    Button,
    Other(String),
}

impl NodeName {
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "a" => NodeName::A,
            "input" => NodeName::Input,
            "select" => NodeName::Select,
            "textarea" => NodeName::TextArea,
            "option" => NodeName::Option,
            "form" => NodeName::Form,
            "button" => NodeName::Button,
            other => NodeName::Other(other.to_ascii_uppercase()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeName::A => "A",
            NodeName::Input => "INPUT",
            NodeName::Select => "SELECT",
            NodeName::TextArea => "TEXTAREA",
            NodeName::Option => "OPTION",
            NodeName::Form => "FORM",
            NodeName::Button => "BUTTON",
            NodeName::Other(name) => name,
        }
    }

    /// Form controls whose interactions the tracker can observe.
    pub fn is_control(&self) -> bool {
        matches!(self, NodeName::Input | NodeName::Select | NodeName::TextArea)
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single live DOM element. The host page mutates freely, so everything
/// except the node name sits behind a lock and is re-read on every event.
pub struct Node {
    name: NodeName,
    state: RwLock<NodeState>,
}

struct NodeState {
    attributes: Vec<(String, String)>,
    text: String,
    value: Option<String>,
    checked: bool,
    selected: bool,
    parent: Weak<Node>,
    children: Vec<NodeRef>,
}

impl Node {
    pub(crate) fn create(
        name: NodeName,
        attributes: Vec<(String, String)>,
        text: String,
        value: Option<String>,
        checked: bool,
        selected: bool,
    ) -> NodeRef {
        Arc::new(Node {
            name,
            state: RwLock::new(NodeState {
                attributes,
                text,
                value,
                checked,
                selected,
                parent: Weak::new(),
                children: Vec::new(),
            }),
        })
    }

    pub fn node_name(&self) -> &NodeName {
        &self.name
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.state
            .read()
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        let mut state = self.state.write();
        if let Some(entry) = state.attributes.iter_mut().find(|(key, _)| key == name) {
            entry.1 = value.to_string();
        } else {
            state.attributes.push((name.to_string(), value.to_string()));
        }
    }

    pub fn id(&self) -> Option<String> {
        self.attr("id")
    }

    /// Class list in DOM declaration order. Absent attribute yields an
    /// empty list, never a missing one.
    pub fn classes(&self) -> Vec<String> {
        self.attr("class")
            .map(|raw| raw.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn input_type(&self) -> Option<String> {
        match self.name {
            NodeName::Input => self.attr("type").or_else(|| Some("text".to_string())),
            _ => None,
        }
    }

    pub fn text(&self) -> String {
        self.state.read().text.clone()
    }

    pub fn set_text(&self, text: &str) {
        self.state.write().text = text.to_string();
    }

    /// Current live value: the edited content for text inputs and
    /// textareas, the `value` attribute otherwise.
    pub fn value(&self) -> Option<String> {
        let state = self.state.read();
        if let Some(value) = &state.value {
            return Some(value.clone());
        }
        drop(state);
        match self.name {
            NodeName::TextArea => Some(self.text()),
            NodeName::Input | NodeName::Option | NodeName::Button => self.attr("value"),
            _ => None,
        }
    }

    pub fn set_value(&self, value: &str) {
        self.state.write().value = Some(value.to_string());
    }

    pub fn is_checked(&self) -> bool {
        self.state.read().checked
    }

    pub fn set_checked(&self, checked: bool) {
        self.state.write().checked = checked;
    }

    pub fn is_selected(&self) -> bool {
        self.state.read().selected
    }

    pub fn set_selected(&self, selected: bool) {
        self.state.write().selected = selected;
    }

    pub fn parent(self: &NodeRef) -> Option<NodeRef> {
        self.state.read().parent.upgrade()
    }

    pub fn children(&self) -> Vec<NodeRef> {
        self.state.read().children.clone()
    }

    pub fn append_child(self: &NodeRef, child: NodeRef) {
        child.state.write().parent = Arc::downgrade(self);
        self.state.write().children.push(child);
    }

    /// Removes this node from its parent's child list. A later re-append
    /// of a freshly built replacement is a new element identity.
    pub fn detach(self: &NodeRef) {
        if let Some(parent) = self.parent() {
            parent
                .state
                .write()
                .children
                .retain(|sibling| !Arc::ptr_eq(sibling, self));
        }
        self.state.write().parent = Weak::new();
    }

    /// Nearest ancestor-or-self matching the predicate; the delegated
    /// listener's target resolution.
    pub fn closest(self: &NodeRef, pred: impl Fn(&NodeRef) -> bool) -> Option<NodeRef> {
        let mut current = Some(Arc::clone(self));
        while let Some(node) = current {
            if pred(&node) {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }

    /// Nearest enclosing form, if any.
    pub fn form(self: &NodeRef) -> Option<NodeRef> {
        self.parent()?
            .closest(|node| *node.node_name() == NodeName::Form)
    }

    /// True when `other` is this node or one of its descendants.
    pub fn contains(self: &NodeRef, other: &NodeRef) -> bool {
        other
            .closest(|node| Arc::ptr_eq(node, self))
            .is_some()
    }

    /// Depth-first descendants in document order.
    pub fn descendants(self: &NodeRef) -> Vec<NodeRef> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeRef> = self.children();
        stack.reverse();
        while let Some(node) = stack.pop() {
            out.push(Arc::clone(&node));
            let mut children = node.children();
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// Form controls (input, select, textarea) under this node in document
    /// order; the submit payload mirrors exactly this ordering.
    pub fn controls(self: &NodeRef) -> Vec<NodeRef> {
        self.descendants()
            .into_iter()
            .filter(|node| node.node_name().is_control())
            .collect()
    }

    /// Values of the selected options of a select, in option order. For a
    /// single select with no explicit selection the first option wins,
    /// matching host browser behavior.
    pub fn selected_option_values(self: &NodeRef) -> Vec<String> {
        let options: Vec<NodeRef> = self
            .descendants()
            .into_iter()
            .filter(|node| *node.node_name() == NodeName::Option)
            .collect();
        let selected: Vec<String> = options
            .iter()
            .filter(|option| option.is_selected())
            .filter_map(|option| option.value())
            .collect();
        if selected.is_empty() && !self.is_multiple() {
            return options
                .first()
                .and_then(|option| option.value())
                .into_iter()
                .collect();
        }
        selected
    }

    pub fn is_multiple(&self) -> bool {
        self.attr("multiple").is_some()
    }

    /// Selects the option with the given value, clearing others when the
    /// select is single-choice.
    pub fn select_value(self: &NodeRef, value: &str) {
        let multiple = self.is_multiple();
        for option in self.descendants() {
            if *option.node_name() != NodeName::Option {
                continue;
            }
            if option.value().as_deref() == Some(value) {
                option.set_selected(true);
            } else if !multiple {
                option.set_selected(false);
            }
        }
    }

    pub fn identity(self: &NodeRef) -> NodeIdentity {
        NodeIdentity::of(self)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("id", &self.id())
            .finish()
    }
}
