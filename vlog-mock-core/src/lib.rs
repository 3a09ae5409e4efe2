//! Core types for the vehicle log service mock.
//!
//! This crate holds the value types shared by the registry, the resolver and
//! the call handlers in `vlog-mock`:
//!
//! - [`error`]: Status codes, code parsing and the structured [`Failure`] type
//! - [`outcome`]: Configured outcomes and the `(vin, api)` key they are stored under
//!
//! With the `tonic` feature enabled, [`Failure`] converts into `tonic::Status`
//! carrying a `google.rpc.ErrorInfo` detail.

mod error;
mod outcome;

pub use error::*;
pub use outcome::*;
