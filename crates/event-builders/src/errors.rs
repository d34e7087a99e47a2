use autotrack_core_types::TrackError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("anchor has no href")]
    MissingHref,
    #[error("unresolvable href: {0}")]
    InvalidHref(String),
    #[error("descriptor not usable for this family: {0}")]
    UnsupportedDescriptor(String),
    #[error("payload serialization failed: {0}")]
    Serialize(String),
}

impl From<BuildError> for TrackError {
    fn from(err: BuildError) -> Self {
        TrackError::new(err.to_string())
    }
}
