use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Shared error type for the Autotrack kernel crates.
///
/// Per-crate error enums convert into this at crate boundaries so callers
/// only ever see one error surface.
#[derive(Debug, Error, Clone)]
pub enum TrackError {
    #[error("{message}")]
    Message { message: String },
}

impl TrackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

/// Unique identifier stamped on every tracked event at dispatch time.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four auto-tracked interaction families.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFamily {
    LinkClick,
    FocusForm,
    ChangeForm,
    SubmitForm,
}

impl EventFamily {
    pub const ALL: [EventFamily; 4] = [
        EventFamily::LinkClick,
        EventFamily::FocusForm,
        EventFamily::ChangeForm,
        EventFamily::SubmitForm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventFamily::LinkClick => "link_click",
            EventFamily::FocusForm => "focus_form",
            EventFamily::ChangeForm => "change_form",
            EventFamily::SubmitForm => "submit_form",
        }
    }
}

impl fmt::Display for EventFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_ids_are_unique() {
        assert_ne!(EventId::new(), EventId::new());
    }

    #[test]
    fn family_names_match_wire_contract() {
        assert_eq!(EventFamily::LinkClick.as_str(), "link_click");
        assert_eq!(EventFamily::SubmitForm.to_string(), "submit_form");
    }

    #[test]
    fn family_serializes_snake_case() {
        let json = serde_json::to_string(&EventFamily::FocusForm).unwrap();
        assert_eq!(json, "\"focus_form\"");
    }
}
