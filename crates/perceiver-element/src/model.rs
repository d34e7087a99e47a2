use autotrack_dom::NodeName;
use serde::{Deserialize, Serialize};

/// Current value of a form control. Multi-selects carry the ordered list
/// of selected option values; everything else is a single string.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Multi(Vec<String>),
}

impl FieldValue {
    /// Single-string rendition for payloads that carry one value slot:
    /// multi-select values join on a comma, mirroring form serialization.
    pub fn flatten(&self) -> String {
        match self {
            FieldValue::Text(value) => value.clone(),
            FieldValue::Multi(values) => values.join(","),
        }
    }
}

/// Normalized description of a DOM element, derived fresh on every event.
/// Every field except `node_name` is optional; absent classes are an empty
/// list, never a missing field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub node_name: NodeName,
    pub input_type: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub name: Option<String>,
    pub value: Option<FieldValue>,
    pub form_id: Option<String>,
    pub form_classes: Vec<String>,
}

impl ElementDescriptor {
    pub fn new(node_name: NodeName) -> Self {
        Self {
            node_name,
            input_type: None,
            id: None,
            classes: Vec::new(),
            name: None,
            value: None,
            form_id: None,
            form_classes: Vec::new(),
        }
    }
}
