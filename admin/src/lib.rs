//! Populate admin selection fields with the records related to a client.

pub mod form;
pub mod loader;
pub mod render;

pub use crm_api::{RelatedList, RelatedRecord, Resource};
pub use form::{Form, OptionSink};
pub use loader::{LoadError, RelatedListLoader};
pub use render::render_options;
