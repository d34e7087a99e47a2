use autotrack_core_types::{EventFamily, EventId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::BuildError;

/// A self-describing JSON envelope: a versioned schema URI naming the
/// structural contract of `data`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelfDescribing {
    pub schema: String,
    pub data: Value,
}

impl SelfDescribing {
    pub fn new(schema: &str, data: &impl Serialize) -> Result<Self, BuildError> {
        Ok(Self {
            schema: schema.to_string(),
            data: serde_json::to_value(data).map_err(|err| BuildError::Serialize(err.to_string()))?,
        })
    }
}

/// Context attached by the context-provider collaborator. The core carries
/// it verbatim and forwards it at dispatch time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub schema: String,
    pub data: Value,
}

/// A fully-built analytics event, immutable once constructed and handed to
/// the sink by value.
#[derive(Clone, Debug, Serialize)]
pub struct TrackedEvent {
    pub event_id: EventId,
    pub created_at: DateTime<Utc>,
    pub family: EventFamily,
    pub payload: SelfDescribing,
    pub contexts: Vec<ContextEntry>,
}

impl TrackedEvent {
    pub fn new(family: EventFamily, payload: SelfDescribing, contexts: Vec<ContextEntry>) -> Self {
        Self {
            event_id: EventId::new(),
            created_at: Utc::now(),
            family,
            payload,
            contexts,
        }
    }
}
