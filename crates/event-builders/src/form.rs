use perceiver_element::ElementDescriptor;
use serde::Serialize;

use crate::errors::BuildError;
use crate::model::SelfDescribing;
use crate::redact;
use crate::schemas;

#[derive(Debug, Serialize)]
struct FocusFormData {
    #[serde(rename = "formId", skip_serializing_if = "Option::is_none")]
    form_id: Option<String>,
    #[serde(rename = "elementId", skip_serializing_if = "Option::is_none")]
    element_id: Option<String>,
    #[serde(rename = "nodeName")]
    node_name: String,
    #[serde(rename = "elementType", skip_serializing_if = "Option::is_none")]
    element_type: Option<String>,
    #[serde(rename = "elementClasses")]
    element_classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChangeFormData {
    #[serde(rename = "formId", skip_serializing_if = "Option::is_none")]
    form_id: Option<String>,
    #[serde(rename = "elementId", skip_serializing_if = "Option::is_none")]
    element_id: Option<String>,
    #[serde(rename = "nodeName")]
    node_name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    input_type: Option<String>,
    #[serde(rename = "elementClasses")]
    element_classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

#[derive(Debug, Serialize)]
struct SubmitFormData {
    #[serde(rename = "formId", skip_serializing_if = "Option::is_none")]
    form_id: Option<String>,
    #[serde(rename = "formClasses")]
    form_classes: Vec<String>,
    elements: Vec<ElementSummary>,
}

#[derive(Debug, Serialize)]
struct ElementSummary {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(rename = "nodeName")]
    node_name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    input_type: Option<String>,
}

fn require_control(descriptor: &ElementDescriptor) -> Result<(), BuildError> {
    if descriptor.node_name.is_control() {
        Ok(())
    } else {
        Err(BuildError::UnsupportedDescriptor(
            descriptor.node_name.to_string(),
        ))
    }
}

/// Builds a `focus_form` payload from the descriptor taken at focus time,
/// so `value` is the pre-edit content.
pub fn build_focus_form(
    descriptor: &ElementDescriptor,
    mask: bool,
) -> Result<SelfDescribing, BuildError> {
    require_control(descriptor)?;
    let data = FocusFormData {
        form_id: descriptor.form_id.clone(),
        element_id: descriptor.id.clone(),
        node_name: descriptor.node_name.to_string(),
        element_type: descriptor.input_type.clone(),
        element_classes: descriptor.classes.clone(),
        value: redact::field_value(
            descriptor.input_type.as_deref(),
            descriptor.value.as_ref().map(|value| value.flatten()),
            mask,
        ),
    };
    SelfDescribing::new(schemas::FOCUS_FORM, &data)
}

/// Builds a `change_form` payload from the descriptor taken after the
/// change committed. An empty string is a valid, distinct value here.
pub fn build_change_form(
    descriptor: &ElementDescriptor,
    mask: bool,
) -> Result<SelfDescribing, BuildError> {
    require_control(descriptor)?;
    let data = ChangeFormData {
        form_id: descriptor.form_id.clone(),
        element_id: descriptor.id.clone(),
        node_name: descriptor.node_name.to_string(),
        input_type: descriptor.input_type.clone(),
        element_classes: descriptor.classes.clone(),
        value: redact::field_value(
            descriptor.input_type.as_deref(),
            descriptor.value.as_ref().map(|value| value.flatten()),
            mask,
        ),
    };
    SelfDescribing::new(schemas::CHANGE_FORM, &data)
}

/// Builds a `submit_form` payload once, from the form's complete field set
/// at submit time. The element list mirrors DOM order; unchecked
/// radio/checkbox and button-like controls are omitted.
pub fn build_submit_form(
    form: &ElementDescriptor,
    controls: &[ElementDescriptor],
    mask: bool,
) -> Result<SelfDescribing, BuildError> {
    let elements = controls
        .iter()
        .filter(|control| summarizable(control))
        .map(|control| ElementSummary {
            name: control.name.clone().unwrap_or_default(),
            value: redact::field_value(
                control.input_type.as_deref(),
                control.value.as_ref().map(|value| value.flatten()),
                mask,
            ),
            node_name: control.node_name.to_string(),
            input_type: control.input_type.clone(),
        })
        .collect();

    let data = SubmitFormData {
        form_id: form.id.clone(),
        form_classes: form.classes.clone(),
        elements,
    };
    SelfDescribing::new(schemas::SUBMIT_FORM, &data)
}

fn summarizable(control: &ElementDescriptor) -> bool {
    match control.input_type.as_deref() {
        Some("submit") | Some("button") | Some("image") | Some("reset") => false,
        Some("radio") | Some("checkbox") => control.value.is_some(),
        _ => true,
    }
}
