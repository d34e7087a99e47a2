use std::sync::Arc;

use crate::{ElementBuilder, NodeName};

fn sample_form() -> crate::NodeRef {
    ElementBuilder::new("form")
        .id("myForm")
        .class("formy-mcformface")
        .child(
            ElementBuilder::new("input")
                .id("fname")
                .name("fname")
                .attr("type", "text")
                .class("test")
                .value("John")
                .build(),
        )
        .child(
            ElementBuilder::new("div")
                .child(
                    ElementBuilder::new("select")
                        .id("cars")
                        .name("cars")
                        .child(ElementBuilder::new("option").attr("value", "volvo").build())
                        .child(ElementBuilder::new("option").attr("value", "saab").build())
                        .build(),
                )
                .build(),
        )
        .build()
}

#[test]
fn closest_resolves_ancestor_or_self() {
    let form = sample_form();
    let select = form.controls()[1].clone();
    let resolved = select
        .closest(|node| *node.node_name() == NodeName::Form)
        .expect("enclosing form");
    assert!(Arc::ptr_eq(&resolved, &form));
}

#[test]
fn controls_preserve_document_order_across_nesting() {
    let form = sample_form();
    let ids: Vec<_> = form.controls().iter().filter_map(|n| n.id()).collect();
    assert_eq!(ids, vec!["fname", "cars"]);
}

#[test]
fn classes_preserve_declaration_order() {
    let node = ElementBuilder::new("a").class("first second third").build();
    assert_eq!(node.classes(), vec!["first", "second", "third"]);
    let bare = ElementBuilder::new("a").build();
    assert!(bare.classes().is_empty());
}

#[test]
fn single_select_defaults_to_first_option() {
    let form = sample_form();
    let select = form.controls()[1].clone();
    assert_eq!(select.selected_option_values(), vec!["volvo"]);
    select.select_value("saab");
    assert_eq!(select.selected_option_values(), vec!["saab"]);
}

#[test]
fn multi_select_collects_only_explicit_selection() {
    let select = ElementBuilder::new("select")
        .attr("multiple", "")
        .child(ElementBuilder::new("option").attr("value", "a").build())
        .child(
            ElementBuilder::new("option")
                .attr("value", "b")
                .selected(true)
                .build(),
        )
        .child(
            ElementBuilder::new("option")
                .attr("value", "c")
                .selected(true)
                .build(),
        )
        .build();
    assert_eq!(select.selected_option_values(), vec!["b", "c"]);
}

#[test]
fn identity_tracks_the_node_not_its_attributes() {
    let form = sample_form();
    let input = form.controls()[0].clone();
    let identity = input.identity();
    input.set_attr("id", "renamed");
    assert!(identity.same_node(&input));

    let replacement = ElementBuilder::new("input").id("fname").build();
    assert!(!identity.same_node(&replacement));
}

#[test]
fn detached_node_identity_reports_dead() {
    let form = sample_form();
    let input = form.controls()[0].clone();
    let identity = input.identity();
    input.detach();
    drop(input);
    assert!(!identity.is_alive());
}

#[test]
fn contains_scopes_to_the_subtree() {
    let form = sample_form();
    let input = form.controls()[0].clone();
    let stranger = ElementBuilder::new("input").build();
    assert!(form.contains(&input));
    assert!(!form.contains(&stranger));
}

#[test]
fn input_type_defaults_to_text() {
    let input = ElementBuilder::new("input").build();
    assert_eq!(input.input_type().as_deref(), Some("text"));
    let radio = ElementBuilder::new("input").attr("type", "radio").build();
    assert_eq!(radio.input_type().as_deref(), Some("radio"));
    let select = ElementBuilder::new("select").build();
    assert_eq!(select.input_type(), None);
}
