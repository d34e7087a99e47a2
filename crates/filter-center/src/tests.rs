use std::env;
use std::sync::{Mutex, OnceLock};

use autotrack_core_types::EventFamily;
use autotrack_dom::NodeName;
use perceiver_element::ElementDescriptor;

use crate::api::{decide, FamilyFilters};
use crate::defaults::default_snapshot;
use crate::loader::load_snapshot;
use crate::model::{FilterConfig, FilterMode, FilterSpec, SelectorPredicate};

fn env_guard() -> &'static Mutex<()> {
    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    GUARD.get_or_init(|| Mutex::new(()))
}

fn descriptor(id: &str) -> ElementDescriptor {
    let mut descriptor = ElementDescriptor::new(NodeName::A);
    descriptor.id = Some(id.to_string());
    descriptor
}

fn field(id: &str, name: &str, class: &str) -> ElementDescriptor {
    let mut descriptor = ElementDescriptor::new(NodeName::Input);
    descriptor.id = Some(id.to_string());
    descriptor.name = Some(name.to_string());
    descriptor.classes = vec![class.to_string()];
    descriptor
}

#[test]
fn unfiltered_always_allows() {
    assert!(decide(&descriptor("anything"), None, &FilterConfig::Unfiltered));
}

#[test]
fn allowlist_denies_by_default() {
    let config = FilterConfig::Allowlist(vec![SelectorPredicate::Id("lname".into())]);
    assert!(decide(&field("lname", "lname", ""), None, &config));
    assert!(!decide(&field("fname", "fname", ""), None, &config));
}

#[test]
fn blocklist_allows_by_default() {
    let config = FilterConfig::Blocklist(vec![SelectorPredicate::Id("link-to-not-track".into())]);
    assert!(!decide(&descriptor("link-to-not-track"), None, &config));
    assert!(decide(&descriptor("link-to-click"), None, &config));
}

#[test]
fn blocked_form_dominates_descendant_fields() {
    let config = FilterConfig::Blocklist(vec![SelectorPredicate::Id("excludedForm".into())]);
    let mut form = ElementDescriptor::new(NodeName::Form);
    form.id = Some("excludedForm".to_string());
    // Field matches nothing on its own; the ancestor form still blocks it.
    assert!(!decide(&field("excluded-fname", "fname", ""), Some(&form), &config));
    assert!(decide(&field("excluded-fname", "fname", ""), None, &config));
}

#[test]
fn allowlisted_form_admits_descendant_fields() {
    let config = FilterConfig::Allowlist(vec![SelectorPredicate::Id("myForm".into())]);
    let mut form = ElementDescriptor::new(NodeName::Form);
    form.id = Some("myForm".to_string());
    assert!(decide(&field("fname", "fname", ""), Some(&form), &config));
    assert!(!decide(&field("fname", "fname", ""), None, &config));
}

#[test]
fn selectors_match_id_class_and_name() {
    let by_class = FilterConfig::Blocklist(vec![SelectorPredicate::Class("no-track".into())]);
    assert!(!decide(&field("x", "y", "no-track"), None, &by_class));

    let by_name = FilterConfig::Allowlist(vec![SelectorPredicate::Name("vehicle".into())]);
    assert!(decide(&field("bike", "vehicle", ""), None, &by_name));
}

#[test]
fn custom_predicate_is_applied_verbatim() {
    let config = FilterConfig::Custom(std::sync::Arc::new(|descriptor: &ElementDescriptor| {
        descriptor.id.as_deref() != Some("link-to-filter")
    }));
    assert!(!decide(&descriptor("link-to-filter"), None, &config));
    assert!(decide(&descriptor("link-to-click"), None, &config));
}

#[test]
fn decide_is_pure_and_repeatable() {
    let config = FilterConfig::Allowlist(vec![SelectorPredicate::Id("a".into())]);
    let element = descriptor("a");
    for _ in 0..3 {
        assert!(decide(&element, None, &config));
    }
}

#[test]
fn selector_parsing_covers_all_forms() {
    assert_eq!(
        SelectorPredicate::parse("#fname").unwrap(),
        SelectorPredicate::Id("fname".into())
    );
    assert_eq!(
        SelectorPredicate::parse(".example").unwrap(),
        SelectorPredicate::Class("example".into())
    );
    assert_eq!(
        SelectorPredicate::parse("vehicle").unwrap(),
        SelectorPredicate::IdOrName("vehicle".into())
    );
    assert!(SelectorPredicate::parse("#").is_err());
    assert!(SelectorPredicate::parse("  ").is_err());
}

#[test]
fn allow_mode_without_selectors_is_a_configuration_error() {
    let spec = FilterSpec {
        mode: FilterMode::Allow,
        selectors: vec![],
    };
    assert!(spec.to_config().is_err());
}

#[test]
fn invalid_family_is_skipped_without_touching_others() {
    let mut snapshot = default_snapshot();
    snapshot.focus_form.mode = FilterMode::Deny; // no selectors: invalid
    snapshot.link_click.mode = FilterMode::Deny;
    snapshot.link_click.selectors = vec!["#link-to-not-track".into()];

    let filters = FamilyFilters::from_snapshot(&snapshot);
    assert!(filters.get(EventFamily::FocusForm).is_none());
    assert!(matches!(
        filters.get(EventFamily::LinkClick),
        Some(FilterConfig::Blocklist(_))
    ));
    assert!(matches!(
        filters.get(EventFamily::SubmitForm),
        Some(FilterConfig::Unfiltered)
    ));
}

#[test]
fn load_snapshot_applies_file_overlay() {
    let _guard = env_guard().lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("tracking.yaml");
    std::fs::write(
        &file_path,
        r##"link_click:
  mode: deny
  selectors: ["#link-to-not-track"]
features:
  dedup_change_events: false
"##,
    )
    .unwrap();

    let snapshot = load_snapshot(Some(&file_path)).unwrap();
    assert_eq!(snapshot.link_click.mode, FilterMode::Deny);
    assert_eq!(snapshot.link_click.selectors, vec!["#link-to-not-track"]);
    assert!(!snapshot.features.dedup_change_events);
    assert!(snapshot.features.mask_sensitive_values);
    assert_eq!(snapshot.focus_form.mode, FilterMode::Unfiltered);
}

#[test]
fn env_overlay_wins_over_file() {
    let _guard = env_guard().lock().unwrap();
    env::set_var("AUTOTRACK_FILTER__FOCUS_FORM__MODE", "allow");
    env::set_var("AUTOTRACK_FILTER__FOCUS_FORM__SELECTORS", "#lname, .test");
    let snapshot = load_snapshot(None).unwrap();
    env::remove_var("AUTOTRACK_FILTER__FOCUS_FORM__MODE");
    env::remove_var("AUTOTRACK_FILTER__FOCUS_FORM__SELECTORS");

    assert_eq!(snapshot.focus_form.mode, FilterMode::Allow);
    assert_eq!(snapshot.focus_form.selectors, vec!["#lname", ".test"]);
}

#[test]
fn env_overlay_rejects_unknown_family() {
    let _guard = env_guard().lock().unwrap();
    env::set_var("AUTOTRACK_FILTER__PAGE_PING__MODE", "deny");
    let result = load_snapshot(None);
    env::remove_var("AUTOTRACK_FILTER__PAGE_PING__MODE");
    assert!(result.is_err());
}
