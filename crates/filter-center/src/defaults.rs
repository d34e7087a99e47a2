use crate::model::{FeatureFlags, FilterSpec, TrackingSnapshot};

/// Built-in configuration: every family unfiltered, dedup and value
/// masking on.
pub fn default_snapshot() -> TrackingSnapshot {
    TrackingSnapshot {
        rev: 1,
        link_click: FilterSpec::default(),
        focus_form: FilterSpec::default(),
        change_form: FilterSpec::default(),
        submit_form: FilterSpec::default(),
        features: FeatureFlags::default(),
    }
}
