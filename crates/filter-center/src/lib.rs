pub mod api;
pub mod defaults;
pub mod errors;
pub mod loader;
pub mod model;

pub use api::{decide, FamilyFilters};
pub use defaults::default_snapshot;
pub use errors::FilterError;
pub use loader::load_snapshot;
pub use model::{
    FeatureFlags, FilterConfig, FilterMode, FilterSpec, SelectorPredicate, TrackingSnapshot,
};

#[cfg(test)]
mod tests;
