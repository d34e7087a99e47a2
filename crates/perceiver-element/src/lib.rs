pub mod api;
pub mod errors;
pub mod model;

pub use api::{describe, describe_form};
pub use errors::PerceiverError;
pub use model::{ElementDescriptor, FieldValue};

#[cfg(test)]
mod tests;
