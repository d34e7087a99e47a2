use autotrack_dom::{ElementBuilder, NodeName, NodeRef};

use crate::api::{describe, describe_form};
use crate::model::FieldValue;

fn form_with(child: NodeRef) -> NodeRef {
    ElementBuilder::new("form")
        .id("myForm")
        .class("formy-mcformface")
        .child(child)
        .build()
}

#[test]
fn describe_is_idempotent_on_unmutated_node() {
    let input = ElementBuilder::new("input")
        .id("fname")
        .name("fname")
        .attr("type", "text")
        .class("test")
        .value("John")
        .build();
    let _form = form_with(input.clone());

    let first = describe(&input).unwrap();
    let second = describe(&input).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.node_name, NodeName::Input);
    assert_eq!(first.id.as_deref(), Some("fname"));
    assert_eq!(first.classes, vec!["test"]);
    assert_eq!(first.form_id.as_deref(), Some("myForm"));
    assert_eq!(first.form_classes, vec!["formy-mcformface"]);
    assert_eq!(first.value, Some(FieldValue::Text("John".into())));
}

#[test]
fn text_input_empty_value_is_present_not_absent() {
    let input = ElementBuilder::new("input").attr("type", "text").build();
    let descriptor = describe(&input).unwrap();
    assert_eq!(descriptor.value, Some(FieldValue::Text(String::new())));
}

#[test]
fn unchecked_checkbox_has_no_value() {
    let checkbox = ElementBuilder::new("input")
        .attr("type", "checkbox")
        .name("terms")
        .attr("value", "agree")
        .build();
    assert_eq!(describe(&checkbox).unwrap().value, None);

    checkbox.set_checked(true);
    assert_eq!(
        describe(&checkbox).unwrap().value,
        Some(FieldValue::Text("agree".into()))
    );
}

#[test]
fn radio_value_is_the_value_attribute_when_checked() {
    let radio = ElementBuilder::new("input")
        .attr("type", "radio")
        .name("vehicle")
        .attr("value", "Bike")
        .checked(true)
        .build();
    let descriptor = describe(&radio).unwrap();
    assert_eq!(descriptor.input_type.as_deref(), Some("radio"));
    assert_eq!(descriptor.value, Some(FieldValue::Text("Bike".into())));
}

#[test]
fn select_reflects_current_option_value_not_label() {
    let select = ElementBuilder::new("select")
        .id("cars")
        .name("cars")
        .child(
            ElementBuilder::new("option")
                .attr("value", "volvo")
                .text("Volvo 240")
                .build(),
        )
        .child(
            ElementBuilder::new("option")
                .attr("value", "saab")
                .text("Saab 900")
                .build(),
        )
        .build();

    assert_eq!(
        describe(&select).unwrap().value,
        Some(FieldValue::Text("volvo".into()))
    );
    select.select_value("saab");
    assert_eq!(
        describe(&select).unwrap().value,
        Some(FieldValue::Text("saab".into()))
    );
}

#[test]
fn multi_select_yields_ordered_value_list() {
    let select = ElementBuilder::new("select")
        .attr("multiple", "")
        .child(
            ElementBuilder::new("option")
                .attr("value", "a")
                .selected(true)
                .build(),
        )
        .child(
            ElementBuilder::new("option")
                .attr("value", "b")
                .selected(true)
                .build(),
        )
        .build();
    let descriptor = describe(&select).unwrap();
    assert_eq!(
        descriptor.value,
        Some(FieldValue::Multi(vec!["a".into(), "b".into()]))
    );
    assert_eq!(descriptor.value.unwrap().flatten(), "a,b");
}

#[test]
fn tolerates_missing_id_name_and_form() {
    let textarea = ElementBuilder::new("textarea").text("hello").build();
    let descriptor = describe(&textarea).unwrap();
    assert_eq!(descriptor.id, None);
    assert_eq!(descriptor.name, None);
    assert_eq!(descriptor.form_id, None);
    assert!(descriptor.form_classes.is_empty());
    assert_eq!(descriptor.value, Some(FieldValue::Text("hello".into())));
}

#[test]
fn describe_rejects_non_elements() {
    let div = ElementBuilder::new("div").build();
    assert!(describe(&div).is_err());
}

#[test]
fn describe_form_rejects_non_forms() {
    let input = ElementBuilder::new("input").build();
    assert!(describe_form(&input).is_err());
    let form = ElementBuilder::new("form").id("f").class("a b").build();
    let descriptor = describe_form(&form).unwrap();
    assert_eq!(descriptor.node_name, NodeName::Form);
    assert_eq!(descriptor.classes, vec!["a", "b"]);
}
