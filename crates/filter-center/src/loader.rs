use std::env;
use std::fs;
use std::path::Path;

use autotrack_core_types::EventFamily;
use serde::Deserialize;

use crate::defaults::default_snapshot;
use crate::errors::FilterError;
use crate::model::{FilterSpec, TrackingSnapshot};

const ENV_PREFIX: &str = "AUTOTRACK_FILTER__";

/// Loads the declarative snapshot: built-in defaults, then an optional
/// YAML file, then environment overlays of the form
/// `AUTOTRACK_FILTER__<FAMILY>__MODE` / `__SELECTORS` (comma separated)
/// and `AUTOTRACK_FILTER__FEATURES__<FLAG>`.
pub fn load_snapshot(path: Option<&Path>) -> Result<TrackingSnapshot, FilterError> {
    let mut snapshot = default_snapshot();
    if let Some(path) = path {
        if path.exists() {
            apply_file(&mut snapshot, path)?;
        }
    }
    apply_env(&mut snapshot)?;
    Ok(snapshot)
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotOverlay {
    rev: Option<u64>,
    link_click: Option<FilterSpec>,
    focus_form: Option<FilterSpec>,
    change_form: Option<FilterSpec>,
    submit_form: Option<FilterSpec>,
    features: Option<FeatureOverlay>,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureOverlay {
    dedup_change_events: Option<bool>,
    mask_sensitive_values: Option<bool>,
}

fn apply_file(snapshot: &mut TrackingSnapshot, path: &Path) -> Result<(), FilterError> {
    let content = fs::read_to_string(path).map_err(|err| FilterError::Io(err.to_string()))?;
    let overlay: SnapshotOverlay =
        serde_yaml::from_str(&content).map_err(|err| FilterError::Invalid(err.to_string()))?;

    if let Some(rev) = overlay.rev {
        snapshot.rev = rev;
    }
    for (family, spec) in [
        (EventFamily::LinkClick, overlay.link_click),
        (EventFamily::FocusForm, overlay.focus_form),
        (EventFamily::ChangeForm, overlay.change_form),
        (EventFamily::SubmitForm, overlay.submit_form),
    ] {
        if let Some(spec) = spec {
            *snapshot.family_mut(family) = spec;
        }
    }
    if let Some(features) = overlay.features {
        if let Some(dedup) = features.dedup_change_events {
            snapshot.features.dedup_change_events = dedup;
        }
        if let Some(mask) = features.mask_sensitive_values {
            snapshot.features.mask_sensitive_values = mask;
        }
    }
    Ok(())
}

fn apply_env(snapshot: &mut TrackingSnapshot) -> Result<(), FilterError> {
    for (key, raw) in env::vars() {
        let Some(stripped) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let segments: Vec<String> = stripped
            .split("__")
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.to_ascii_lowercase())
            .collect();
        let [section, field] = segments.as_slice() else {
            continue;
        };

        if section == "features" {
            let flag = raw
                .trim()
                .parse::<bool>()
                .map_err(|_| FilterError::Invalid(format!("{key}: expected bool, got {raw:?}")))?;
            match field.as_str() {
                "dedup_change_events" => snapshot.features.dedup_change_events = flag,
                "mask_sensitive_values" => snapshot.features.mask_sensitive_values = flag,
                other => {
                    return Err(FilterError::Invalid(format!("unknown feature flag {other:?}")))
                }
            }
            continue;
        }

        let Some(family) = family_from_key(section) else {
            return Err(FilterError::Invalid(format!(
                "unknown event family in {key:?}"
            )));
        };
        match field.as_str() {
            "mode" => snapshot.family_mut(family).mode = raw.parse()?,
            "selectors" => {
                snapshot.family_mut(family).selectors = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            other => {
                return Err(FilterError::Invalid(format!(
                    "unknown filter field {other:?} in {key:?}"
                )))
            }
        }
    }
    Ok(())
}

fn family_from_key(section: &str) -> Option<EventFamily> {
    match section {
        "link_click" => Some(EventFamily::LinkClick),
        "focus_form" => Some(EventFamily::FocusForm),
        "change_form" => Some(EventFamily::ChangeForm),
        "submit_form" => Some(EventFamily::SubmitForm),
        _ => None,
    }
}
