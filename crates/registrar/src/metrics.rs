use autotrack_core_types::EventFamily;

#[derive(Clone, Debug, Default)]
pub struct RegistrarMetrics;

impl RegistrarMetrics {
    pub fn record_emitted(&self, _family: EventFamily) {}
    pub fn record_filtered(&self, _family: EventFamily) {}
    pub fn record_suppressed(&self) {}
    pub fn record_dropped(&self, _kind: &str) {}
}
