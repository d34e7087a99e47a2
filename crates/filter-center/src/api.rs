use autotrack_core_types::EventFamily;
use perceiver_element::ElementDescriptor;
use tracing::warn;

use crate::model::{FilterConfig, SelectorPredicate, TrackingSnapshot};

/// Pure allow/deny decision for one element under one family's config.
///
/// An allowlist makes the default deny; a blocklist makes the default
/// allow. A blocked ancestor form blocks every descendant field even when
/// the field itself matches nothing ("excludedForm" semantics). A custom
/// predicate is applied verbatim to the element descriptor alone.
pub fn decide(
    descriptor: &ElementDescriptor,
    containing_form: Option<&ElementDescriptor>,
    config: &FilterConfig,
) -> bool {
    match config {
        FilterConfig::Unfiltered => true,
        FilterConfig::Custom(predicate) => predicate(descriptor),
        FilterConfig::Allowlist(predicates) => {
            matches_any(descriptor, predicates)
                || containing_form
                    .map(|form| matches_any(form, predicates))
                    .unwrap_or(false)
        }
        FilterConfig::Blocklist(predicates) => {
            !matches_any(descriptor, predicates)
                && !containing_form
                    .map(|form| matches_any(form, predicates))
                    .unwrap_or(false)
        }
    }
}

fn matches_any(descriptor: &ElementDescriptor, predicates: &[SelectorPredicate]) -> bool {
    predicates.iter().any(|pred| pred.matches(descriptor))
}

/// Validated per-family filter slots, bound once at registration time.
///
/// A family whose declared spec fails validation is disabled (`None`):
/// that family's instrumentation is skipped while the others keep working.
#[derive(Debug, Default)]
pub struct FamilyFilters {
    link_click: Option<FilterConfig>,
    focus_form: Option<FilterConfig>,
    change_form: Option<FilterConfig>,
    submit_form: Option<FilterConfig>,
}

impl FamilyFilters {
    /// All families unfiltered, the default page setup.
    pub fn unfiltered() -> Self {
        let mut filters = Self::default();
        for family in EventFamily::ALL {
            filters.set(family, FilterConfig::Unfiltered);
        }
        filters
    }

    /// Validates every family of a declarative snapshot. Invalid families
    /// are skipped with a warning; valid ones are unaffected.
    pub fn from_snapshot(snapshot: &TrackingSnapshot) -> Self {
        let mut filters = Self::default();
        for family in EventFamily::ALL {
            match snapshot.family(family).to_config() {
                Ok(config) => filters.set(family, config),
                Err(err) => {
                    warn!(%family, error = %err, "skipping family with invalid filter config");
                }
            }
        }
        filters
    }

    pub fn set(&mut self, family: EventFamily, config: FilterConfig) {
        *self.slot(family) = Some(config);
    }

    /// Installs a programmatic predicate for one family, overriding any
    /// declarative list for that family.
    pub fn with_custom(
        mut self,
        family: EventFamily,
        predicate: impl Fn(&ElementDescriptor) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.set(family, FilterConfig::Custom(std::sync::Arc::new(predicate)));
        self
    }

    pub fn disable(&mut self, family: EventFamily) {
        *self.slot(family) = None;
    }

    pub fn get(&self, family: EventFamily) -> Option<&FilterConfig> {
        match family {
            EventFamily::LinkClick => self.link_click.as_ref(),
            EventFamily::FocusForm => self.focus_form.as_ref(),
            EventFamily::ChangeForm => self.change_form.as_ref(),
            EventFamily::SubmitForm => self.submit_form.as_ref(),
        }
    }

    fn slot(&mut self, family: EventFamily) -> &mut Option<FilterConfig> {
        match family {
            EventFamily::LinkClick => &mut self.link_click,
            EventFamily::FocusForm => &mut self.focus_form,
            EventFamily::ChangeForm => &mut self.change_form,
            EventFamily::SubmitForm => &mut self.submit_form,
        }
    }
}
