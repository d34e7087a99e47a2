pub mod errors;
pub mod form;
pub mod link;
pub mod model;
pub mod redact;
pub mod schemas;

pub use errors::BuildError;
pub use form::{build_change_form, build_focus_form, build_submit_form};
pub use link::{build_link_click, LinkMeta};
pub use model::{ContextEntry, SelfDescribing, TrackedEvent};
