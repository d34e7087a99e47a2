use std::collections::HashMap;

use autotrack_dom::{NodeIdentity, NodeRef};

/// Last-emitted change value per live element identity.
///
/// Keyed by the node reference itself, never a derived string: identity
/// survives id/class mutation but not node replacement. Lifetime is the
/// page session; only the change family consults it. The map is explicit
/// and injectable so tests can seed and clear it deterministically.
#[derive(Default)]
pub struct ChangeDedup {
    last: HashMap<NodeIdentity, Option<String>>,
}

impl ChangeDedup {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the value is novel for this element; records it as the
    /// new last-emitted value. A dead stored identity (the node was
    /// replaced) is treated as never seen.
    pub fn should_emit(&mut self, node: &NodeRef, value: &Option<String>) -> bool {
        let identity = node.identity();
        if let Some((stored, last)) = self.last.get_key_value(&identity) {
            if stored.same_node(node) && last == value {
                return false;
            }
        }
        // Re-insert to refresh the stored weak handle: HashMap keeps the
        // old key on plain insert.
        self.last.remove(&identity);
        self.last.insert(identity, value.clone());
        true
    }

    pub fn clear(&mut self) {
        self.last.clear();
    }

    /// Drops entries whose nodes are gone.
    pub fn sweep(&mut self) {
        self.last.retain(|identity, _| identity.is_alive());
    }

    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}
