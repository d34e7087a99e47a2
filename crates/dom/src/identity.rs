use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use crate::model::{Node, NodeRef};

/// Stable key for a live element: the node reference itself, not any
/// derived attribute. Survives id/class mutation; a replaced node is a new
/// identity. The weak handle lets long-lived maps observe node death
/// instead of keeping detached subtrees alive.
#[derive(Clone)]
pub struct NodeIdentity {
    ptr: usize,
    node: Weak<Node>,
}

impl NodeIdentity {
    pub fn of(node: &NodeRef) -> Self {
        Self {
            ptr: Arc::as_ptr(node) as usize,
            node: Arc::downgrade(node),
        }
    }

    /// True while the underlying node is still alive and is the same
    /// allocation this identity was taken from.
    pub fn is_alive(&self) -> bool {
        self.node
            .upgrade()
            .map(|node| Arc::as_ptr(&node) as usize == self.ptr)
            .unwrap_or(false)
    }

    pub fn same_node(&self, node: &NodeRef) -> bool {
        self.is_alive() && self.ptr == Arc::as_ptr(node) as usize
    }
}

impl PartialEq for NodeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl Eq for NodeIdentity {}

impl Hash for NodeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr.hash(state);
    }
}

impl std::fmt::Debug for NodeIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeIdentity({:#x})", self.ptr)
    }
}
