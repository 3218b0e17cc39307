//! Notebook backend: a session-authenticated personal notes service.
//!
//! Layout follows ports and adapters: [`domain`] holds the rules and ports,
//! [`inbound`] the HTTP surface, [`outbound`] the storage adapters, and
//! [`server`] the wiring that joins them.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
