use crate::model::{Node, NodeName, NodeRef};

/// Fluent builder for test trees and host adapters that materialize a page
/// subtree node by node.
pub struct ElementBuilder {
    name: NodeName,
    attributes: Vec<(String, String)>,
    text: String,
    value: Option<String>,
    checked: bool,
    selected: bool,
    children: Vec<NodeRef>,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Self {
        Self {
            name: NodeName::from_tag(tag),
            attributes: Vec::new(),
            text: String::new(),
            value: None,
            checked: false,
            selected: false,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn name(self, name: &str) -> Self {
        self.attr("name", name)
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Live value override; for inputs without one the `value` attribute
    /// still applies.
    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn child(mut self, child: NodeRef) -> Self {
        self.children.push(child);
        self
    }

    pub fn build(self) -> NodeRef {
        let node = Node::create(
            self.name,
            self.attributes,
            self.text,
            self.value,
            self.checked,
            self.selected,
        );
        for child in self.children {
            node.append_child(child);
        }
        node
    }
}
