pub mod builder;
pub mod identity;
pub mod model;

pub use builder::ElementBuilder;
pub use identity::NodeIdentity;
pub use model::{Node, NodeName, NodeRef};

#[cfg(test)]
mod tests;
