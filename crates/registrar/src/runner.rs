use parking_lot::Mutex;
use tracing::trace;
use url::Url;

use autotrack_core_types::{EventFamily, TrackError};
use autotrack_dom::{NodeName, NodeRef};
use autotrack_event_sink::{ContextProvider, EventSink};
use autotrack_filter_center::{decide, FamilyFilters, FeatureFlags};
use event_builders::{
    build_change_form, build_focus_form, build_link_click, build_submit_form, LinkMeta,
    SelfDescribing, TrackedEvent,
};
use perceiver_element::{describe, describe_form, ElementDescriptor};

use crate::dedup::ChangeDedup;
use crate::metrics::RegistrarMetrics;
use crate::model::{DispatchOutcome, DomEvent, DomEventKind};

/// The subtree this registrar observes, bound at attach time.
#[derive(Clone)]
pub(crate) struct Scope {
    pub root: NodeRef,
    pub base: Url,
}

pub(crate) struct RunCtx<'a> {
    pub scope: &'a Scope,
    pub filters: &'a FamilyFilters,
    pub features: &'a FeatureFlags,
    pub sink: &'a dyn EventSink,
    pub contexts: Option<&'a dyn ContextProvider>,
    pub dedup: &'a Mutex<ChangeDedup>,
    pub metrics: &'a RegistrarMetrics,
}

pub(crate) fn run(ctx: RunCtx<'_>, event: &DomEvent) -> Result<DispatchOutcome, TrackError> {
    if !ctx.scope.root.contains(&event.target) {
        trace!("target outside attached scope");
        return Ok(DispatchOutcome::Skipped);
    }
    match event.kind {
        DomEventKind::Click => handle_click(&ctx, event),
        DomEventKind::Focus => handle_focus(&ctx, event),
        DomEventKind::Change => handle_change(&ctx, event),
        DomEventKind::Submit => handle_submit(&ctx, event),
    }
}

fn handle_click(ctx: &RunCtx<'_>, event: &DomEvent) -> Result<DispatchOutcome, TrackError> {
    // Clicks land on whatever descendant was hit; resolve the anchor.
    let Some(anchor) = event.target.closest(|node| *node.node_name() == NodeName::A) else {
        return Ok(DispatchOutcome::Skipped);
    };
    let Some(config) = ctx.filters.get(EventFamily::LinkClick) else {
        return Ok(DispatchOutcome::Skipped);
    };

    let descriptor = describe(&anchor)?;
    if !decide(&descriptor, None, config) {
        ctx.metrics.record_filtered(EventFamily::LinkClick);
        return Ok(DispatchOutcome::Filtered);
    }

    let meta = LinkMeta {
        href: anchor.attr("href"),
        target: anchor.attr("target"),
        content: Some(anchor.text()).filter(|text| !text.is_empty()),
    };
    let payload = build_link_click(&descriptor, &meta, &ctx.scope.base)?;
    Ok(emit(ctx, EventFamily::LinkClick, payload))
}

fn handle_focus(ctx: &RunCtx<'_>, event: &DomEvent) -> Result<DispatchOutcome, TrackError> {
    let Some(config) = ctx.filters.get(EventFamily::FocusForm) else {
        return Ok(DispatchOutcome::Skipped);
    };
    let Some((descriptor, form)) = classify_control(event)? else {
        return Ok(DispatchOutcome::Skipped);
    };
    if !decide(&descriptor, form.as_ref(), config) {
        ctx.metrics.record_filtered(EventFamily::FocusForm);
        return Ok(DispatchOutcome::Filtered);
    }
    let payload = build_focus_form(&descriptor, ctx.features.mask_sensitive_values)?;
    Ok(emit(ctx, EventFamily::FocusForm, payload))
}

fn handle_change(ctx: &RunCtx<'_>, event: &DomEvent) -> Result<DispatchOutcome, TrackError> {
    let Some(config) = ctx.filters.get(EventFamily::ChangeForm) else {
        return Ok(DispatchOutcome::Skipped);
    };
    let Some((descriptor, form)) = classify_control(event)? else {
        return Ok(DispatchOutcome::Skipped);
    };
    if !decide(&descriptor, form.as_ref(), config) {
        ctx.metrics.record_filtered(EventFamily::ChangeForm);
        return Ok(DispatchOutcome::Filtered);
    }

    let payload = build_change_form(&descriptor, ctx.features.mask_sensitive_values)?;

    // Some hosts fire several change events for one logical edit; collapse
    // repeats of the same value on the same live element.
    if ctx.features.dedup_change_events {
        let value = descriptor.value.as_ref().map(|value| value.flatten());
        if !ctx.dedup.lock().should_emit(&event.target, &value) {
            ctx.metrics.record_suppressed();
            return Ok(DispatchOutcome::Suppressed);
        }
    }
    Ok(emit(ctx, EventFamily::ChangeForm, payload))
}

fn handle_submit(ctx: &RunCtx<'_>, event: &DomEvent) -> Result<DispatchOutcome, TrackError> {
    let Some(form) = event
        .target
        .closest(|node| *node.node_name() == NodeName::Form)
    else {
        return Ok(DispatchOutcome::Skipped);
    };
    let Some(config) = ctx.filters.get(EventFamily::SubmitForm) else {
        return Ok(DispatchOutcome::Skipped);
    };

    // A form is atomically tracked or not: the decision uses the form's
    // own descriptor, never per-field filters.
    let form_descriptor = describe_form(&form)?;
    if !decide(&form_descriptor, None, config) {
        ctx.metrics.record_filtered(EventFamily::SubmitForm);
        return Ok(DispatchOutcome::Filtered);
    }

    let controls = form
        .controls()
        .iter()
        .map(describe)
        .collect::<Result<Vec<_>, _>>()?;
    let payload = build_submit_form(
        &form_descriptor,
        &controls,
        ctx.features.mask_sensitive_values,
    )?;
    Ok(emit(ctx, EventFamily::SubmitForm, payload))
}

type ControlClassification = Option<(ElementDescriptor, Option<ElementDescriptor>)>;

fn classify_control(event: &DomEvent) -> Result<ControlClassification, TrackError> {
    if !event.target.node_name().is_control() {
        return Ok(None);
    }
    let descriptor = describe(&event.target)?;
    let form = match event.target.form() {
        Some(form) => Some(describe_form(&form)?),
        None => None,
    };
    Ok(Some((descriptor, form)))
}

fn emit(ctx: &RunCtx<'_>, family: EventFamily, payload: SelfDescribing) -> DispatchOutcome {
    let contexts = ctx
        .contexts
        .map(|provider| provider.current_contexts())
        .unwrap_or_default();
    let event = TrackedEvent::new(family, payload, contexts);
    ctx.sink.track(event);
    ctx.metrics.record_emitted(family);
    DispatchOutcome::Emitted(family)
}
