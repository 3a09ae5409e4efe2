//! # Vehicle log service mock
//!
//! A gRPC double for the vehicle log ingestion service. Clients tell the mock
//! what to answer for a `(vin, api)` pair through `SetMockConfig`, then
//! exercise success and failure paths of `GetLogSettings`,
//! `GetAttachmentParameters` and the client-streaming `UploadLogMessages`
//! without a live backend.
//!
//! ## Modules
//!
//! - [`registry`]: The shared `(vin, api)` to outcome mapping
//! - [`resolver`]: Turns a lookup into a reply or a structured failure
//! - [`handler`]: The `LogService` implementation
//! - [`server`]: Assembles the tonic routes and serves them with axum
//! - [`config`]: Listen address for the binary
//! - [`proto`]: Wire messages and generated stubs

pub mod config;
pub mod handler;
pub mod proto;
pub mod registry;
pub mod resolver;
pub mod server;

pub use vlog_mock_core::{Code, CodeSpec, ConfigKey, Failure, Outcome};

pub mod prelude {
    //! The most common types for embedding the mock.
    pub use crate::handler::MockLogService;
    pub use crate::registry::OutcomeRegistry;
    pub use crate::resolver::OutcomeResolver;
    pub use crate::server::{router, serve};
    pub use vlog_mock_core::{Code, ConfigKey, Failure, Outcome};
}
