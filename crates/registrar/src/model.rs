use autotrack_core_types::EventFamily;
use autotrack_dom::NodeRef;

/// Raw DOM event as delivered by the host's capture phase.
#[derive(Clone, Debug)]
pub struct DomEvent {
    pub kind: DomEventKind,
    pub target: NodeRef,
}

impl DomEvent {
    pub fn new(kind: DomEventKind, target: NodeRef) -> Self {
        Self { kind, target }
    }

    pub fn click(target: NodeRef) -> Self {
        Self::new(DomEventKind::Click, target)
    }

    pub fn focus(target: NodeRef) -> Self {
        Self::new(DomEventKind::Focus, target)
    }

    pub fn change(target: NodeRef) -> Self {
        Self::new(DomEventKind::Change, target)
    }

    pub fn submit(target: NodeRef) -> Self {
        Self::new(DomEventKind::Submit, target)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DomEventKind {
    Click,
    Focus,
    Change,
    Submit,
}

/// Explicit per-event result. The registrar never raises into the host's
/// event dispatch; every path collapses to one of these.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DispatchOutcome {
    /// Approved, built and forwarded to the sink.
    Emitted(EventFamily),
    /// Rejected by the family's filter config.
    Filtered,
    /// Deduplicated: same element identity, same value as last emission.
    Suppressed,
    /// Not observable: detached registrar, disabled family, target outside
    /// the attached scope, or a target no builder applies to.
    Skipped,
    /// Classification or build failed; the single event was dropped.
    Dropped,
}

/// Listener attachment lifecycle. `Attached` is entered once per root;
/// re-entrant attach calls are no-ops. `Detached` is the explicit teardown
/// state for single-page-app navigation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RegistrarState {
    Uninitialized,
    Attached,
    Detached,
}
