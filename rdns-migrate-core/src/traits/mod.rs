//! Collaborator abstraction trait definition

mod api_transport;
mod source_store;

pub use api_transport::{ApiRequest, ApiTransport, HttpMethod};
pub use source_store::SourceStore;
