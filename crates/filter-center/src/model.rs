use std::fmt;
use std::sync::Arc;

use autotrack_core_types::EventFamily;
use perceiver_element::ElementDescriptor;
use serde::{Deserialize, Serialize};

use crate::errors::FilterError;

/// Arbitrary per-element predicate supplied programmatically at setup.
pub type FilterFn = Arc<dyn Fn(&ElementDescriptor) -> bool + Send + Sync>;

/// One policy mode per event family per page load. A closed variant rather
/// than "pass a list or a function and branch on shape": the call site
/// picks exactly one mode, so a custom predicate can never silently
/// combine with a list.
#[derive(Clone)]
pub enum FilterConfig {
    Unfiltered,
    Allowlist(Vec<SelectorPredicate>),
    Blocklist(Vec<SelectorPredicate>),
    Custom(FilterFn),
}

impl fmt::Debug for FilterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterConfig::Unfiltered => f.write_str("Unfiltered"),
            FilterConfig::Allowlist(preds) => f.debug_tuple("Allowlist").field(preds).finish(),
            FilterConfig::Blocklist(preds) => f.debug_tuple("Blocklist").field(preds).finish(),
            FilterConfig::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Selector matched against a descriptor's identifying attributes.
/// Textual form: `#x` is an id, `.x` a class, bare `x` matches id or name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SelectorPredicate {
    Id(String),
    Class(String),
    Name(String),
    IdOrName(String),
}

impl SelectorPredicate {
    pub fn parse(raw: &str) -> Result<Self, FilterError> {
        let trimmed = raw.trim();
        if let Some(id) = trimmed.strip_prefix('#') {
            if id.is_empty() {
                return Err(FilterError::Invalid(format!("empty id selector: {raw:?}")));
            }
            return Ok(SelectorPredicate::Id(id.to_string()));
        }
        if let Some(class) = trimmed.strip_prefix('.') {
            if class.is_empty() {
                return Err(FilterError::Invalid(format!(
                    "empty class selector: {raw:?}"
                )));
            }
            return Ok(SelectorPredicate::Class(class.to_string()));
        }
        if trimmed.is_empty() {
            return Err(FilterError::Invalid("empty selector".to_string()));
        }
        Ok(SelectorPredicate::IdOrName(trimmed.to_string()))
    }

    pub fn matches(&self, descriptor: &ElementDescriptor) -> bool {
        match self {
            SelectorPredicate::Id(id) => descriptor.id.as_deref() == Some(id),
            SelectorPredicate::Class(class) => descriptor.classes.iter().any(|c| c == class),
            SelectorPredicate::Name(name) => descriptor.name.as_deref() == Some(name),
            SelectorPredicate::IdOrName(key) => {
                descriptor.id.as_deref() == Some(key) || descriptor.name.as_deref() == Some(key)
            }
        }
    }
}

/// Declarative filter mode as it appears in configuration files.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    Unfiltered,
    Allow,
    Deny,
}

impl std::str::FromStr for FilterMode {
    type Err = FilterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "unfiltered" => Ok(FilterMode::Unfiltered),
            "allow" => Ok(FilterMode::Allow),
            "deny" => Ok(FilterMode::Deny),
            other => Err(FilterError::Invalid(format!("unknown filter mode {other:?}"))),
        }
    }
}

/// Per-family filter as declared in configuration. Predicates cannot be
/// expressed here; they are installed programmatically on `FamilyFilters`.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct FilterSpec {
    #[serde(default)]
    pub mode: FilterMode,
    #[serde(default)]
    pub selectors: Vec<String>,
}

impl FilterSpec {
    /// Validates the spec into an executable config. `allow`/`deny`
    /// without selectors is a configuration error: an empty allowlist
    /// would silently deny everything.
    pub fn to_config(&self) -> Result<FilterConfig, FilterError> {
        match self.mode {
            FilterMode::Unfiltered => {
                if !self.selectors.is_empty() {
                    return Err(FilterError::Invalid(
                        "selectors given with mode=unfiltered".to_string(),
                    ));
                }
                Ok(FilterConfig::Unfiltered)
            }
            FilterMode::Allow | FilterMode::Deny => {
                if self.selectors.is_empty() {
                    return Err(FilterError::Invalid(format!(
                        "mode={:?} requires at least one selector",
                        self.mode
                    )));
                }
                let predicates = self
                    .selectors
                    .iter()
                    .map(|raw| SelectorPredicate::parse(raw))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(match self.mode {
                    FilterMode::Allow => FilterConfig::Allowlist(predicates),
                    _ => FilterConfig::Blocklist(predicates),
                })
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(default = "default_true")]
    pub dedup_change_events: bool,
    #[serde(default = "default_true")]
    pub mask_sensitive_values: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            dedup_change_events: true,
            mask_sensitive_values: true,
        }
    }
}

/// Full declarative configuration consumed at instrumentation setup.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct TrackingSnapshot {
    #[serde(default)]
    pub rev: u64,
    #[serde(default)]
    pub link_click: FilterSpec,
    #[serde(default)]
    pub focus_form: FilterSpec,
    #[serde(default)]
    pub change_form: FilterSpec,
    #[serde(default)]
    pub submit_form: FilterSpec,
    #[serde(default)]
    pub features: FeatureFlags,
}

impl TrackingSnapshot {
    pub fn family(&self, family: EventFamily) -> &FilterSpec {
        match family {
            EventFamily::LinkClick => &self.link_click,
            EventFamily::FocusForm => &self.focus_form,
            EventFamily::ChangeForm => &self.change_form,
            EventFamily::SubmitForm => &self.submit_form,
        }
    }

    pub fn family_mut(&mut self, family: EventFamily) -> &mut FilterSpec {
        match family {
            EventFamily::LinkClick => &mut self.link_click,
            EventFamily::FocusForm => &mut self.focus_form,
            EventFamily::ChangeForm => &mut self.change_form,
            EventFamily::SubmitForm => &mut self.submit_form,
        }
    }
}
