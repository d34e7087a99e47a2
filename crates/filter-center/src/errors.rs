use autotrack_core_types::TrackError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid filter configuration: {0}")]
    Invalid(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<FilterError> for TrackError {
    fn from(err: FilterError) -> Self {
        TrackError::new(err.to_string())
    }
}
