use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, instrument, warn};
use url::Url;

use autotrack_dom::NodeRef;
use autotrack_event_sink::{ContextProvider, EventSink};
use autotrack_filter_center::{FamilyFilters, FeatureFlags};

use crate::dedup::ChangeDedup;
use crate::metrics::RegistrarMetrics;
use crate::model::{DispatchOutcome, DomEvent, RegistrarState};
use crate::runner::{self, RunCtx, Scope};

pub struct RegistrarBuilder {
    filters: FamilyFilters,
    features: FeatureFlags,
    sink: Option<Arc<dyn EventSink>>,
    contexts: Option<Arc<dyn ContextProvider>>,
}

impl RegistrarBuilder {
    pub fn new(filters: FamilyFilters) -> Self {
        Self {
            filters,
            features: FeatureFlags::default(),
            sink: None,
            contexts: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_contexts(mut self, provider: Arc<dyn ContextProvider>) -> Self {
        self.contexts = Some(provider);
        self
    }

    pub fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    pub fn build(self) -> Registrar {
        Registrar {
            filters: self.filters,
            features: self.features,
            sink: self.sink.expect("event sink is required"),
            contexts: self.contexts,
            state: Mutex::new(RegistrarState::Uninitialized),
            scope: Mutex::new(None),
            dedup: Mutex::new(ChangeDedup::new()),
            metrics: RegistrarMetrics,
        }
    }
}

/// Delegated listener bound once at a stable ancestor. Every raw DOM event
/// the host captures funnels through `dispatch`, which resolves the actual
/// element per event, so instrumentation survives DOM mutation without
/// per-element re-binding.
pub struct Registrar {
    filters: FamilyFilters,
    features: FeatureFlags,
    sink: Arc<dyn EventSink>,
    contexts: Option<Arc<dyn ContextProvider>>,
    state: Mutex<RegistrarState>,
    scope: Mutex<Option<Scope>>,
    dedup: Mutex<ChangeDedup>,
    metrics: RegistrarMetrics,
}

impl Registrar {
    pub fn builder(filters: FamilyFilters) -> RegistrarBuilder {
        RegistrarBuilder::new(filters)
    }

    pub fn state(&self) -> RegistrarState {
        *self.state.lock()
    }

    /// Binds the registrar to the observation root. A no-op while already
    /// attached; re-attach after an explicit detach starts a fresh page
    /// session (the dedup map is cleared).
    pub fn attach(&self, root: NodeRef, base: Url) {
        let mut state = self.state.lock();
        if *state == RegistrarState::Attached {
            debug!("attach ignored: already attached");
            return;
        }
        *self.scope.lock() = Some(Scope { root, base });
        self.dedup.lock().clear();
        *state = RegistrarState::Attached;
    }

    /// Explicit teardown for single-page-app navigation.
    pub fn detach(&self) {
        *self.state.lock() = RegistrarState::Detached;
        *self.scope.lock() = None;
        self.dedup.lock().clear();
    }

    /// Processes one raw DOM event. Hard boundary for the host page: this
    /// never panics and never propagates an error; classification or
    /// build failures drop the single event and nothing else.
    #[instrument(skip_all, fields(kind = ?event.kind))]
    pub fn dispatch(&self, event: DomEvent) -> DispatchOutcome {
        if self.state() != RegistrarState::Attached {
            return DispatchOutcome::Skipped;
        }
        let scope = self.scope.lock().clone();
        let Some(scope) = scope else {
            return DispatchOutcome::Skipped;
        };

        let ctx = RunCtx {
            scope: &scope,
            filters: &self.filters,
            features: &self.features,
            sink: self.sink.as_ref(),
            contexts: self.contexts.as_deref(),
            dedup: &self.dedup,
            metrics: &self.metrics,
        };
        match runner::run(ctx, &event) {
            Ok(outcome) => {
                debug!(?outcome, "dispatch complete");
                outcome
            }
            Err(err) => {
                warn!(error = %err, "event dropped");
                self.metrics.record_dropped("run");
                DispatchOutcome::Dropped
            }
        }
    }
}
