use autotrack_core_types::TrackError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PerceiverError {
    #[error("node is not a describable element: {0}")]
    UnsupportedNode(String),
    #[error("node is not a form: {0}")]
    NotAForm(String),
    #[error("malformed node: {0}")]
    Malformed(String),
}

impl From<PerceiverError> for TrackError {
    fn from(err: PerceiverError) -> Self {
        TrackError::new(err.to_string())
    }
}
