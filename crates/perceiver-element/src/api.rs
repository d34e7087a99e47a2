use autotrack_dom::{NodeName, NodeRef};
use tracing::trace;

use crate::errors::PerceiverError;
use crate::model::{ElementDescriptor, FieldValue};

/// Describes a clickable or form element. Pure against an unmutated node:
/// calling twice without DOM changes yields identical descriptors.
pub fn describe(node: &NodeRef) -> Result<ElementDescriptor, PerceiverError> {
    let node_name = node.node_name().clone();
    if !matches!(
        node_name,
        NodeName::A | NodeName::Input | NodeName::Select | NodeName::TextArea | NodeName::Button
    ) {
        return Err(PerceiverError::UnsupportedNode(node_name.to_string()));
    }

    let mut descriptor = ElementDescriptor::new(node_name.clone());
    descriptor.input_type = node.input_type();
    descriptor.id = node.id();
    descriptor.classes = node.classes();
    descriptor.name = node.attr("name");
    descriptor.value = extract_value(node, &node_name);

    if let Some(form) = node.form() {
        descriptor.form_id = form.id();
        descriptor.form_classes = form.classes();
    }

    trace!(node = %node_name, id = ?descriptor.id, "described element");
    Ok(descriptor)
}

/// Describes a form element itself, for form-level filtering and submit
/// payloads.
pub fn describe_form(form: &NodeRef) -> Result<ElementDescriptor, PerceiverError> {
    if *form.node_name() != NodeName::Form {
        return Err(PerceiverError::NotAForm(form.node_name().to_string()));
    }
    let mut descriptor = ElementDescriptor::new(NodeName::Form);
    descriptor.id = form.id();
    descriptor.classes = form.classes();
    descriptor.name = form.attr("name");
    Ok(descriptor)
}

/// Value extraction policy by node kind. Checkable controls only expose a
/// value while checked; selects reflect the option's value attribute (not
/// its label) at the moment of the call.
fn extract_value(node: &NodeRef, node_name: &NodeName) -> Option<FieldValue> {
    match node_name {
        NodeName::Input => match node.input_type().as_deref() {
            Some("radio") | Some("checkbox") => {
                if node.is_checked() {
                    Some(FieldValue::Text(
                        node.value().unwrap_or_else(|| "on".to_string()),
                    ))
                } else {
                    None
                }
            }
            _ => Some(FieldValue::Text(node.value().unwrap_or_default())),
        },
        NodeName::TextArea => Some(FieldValue::Text(node.value().unwrap_or_default())),
        NodeName::Select => {
            let values = node.selected_option_values();
            if node.is_multiple() {
                Some(FieldValue::Multi(values))
            } else {
                values.into_iter().next().map(FieldValue::Text)
            }
        }
        _ => None,
    }
}
