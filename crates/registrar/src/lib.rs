pub mod api;
pub mod dedup;
pub mod model;

mod metrics;
mod runner;

pub use api::{Registrar, RegistrarBuilder};
pub use dedup::ChangeDedup;
pub use model::{DispatchOutcome, DomEvent, DomEventKind, RegistrarState};
