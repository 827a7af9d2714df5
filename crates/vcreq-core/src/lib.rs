//! # vcreq-core: Foundational Types
//!
//! The leaf of the vcreq dependency graph. Defines the error hierarchy shared
//! by every other crate, the total mapping from those errors to the transport
//! error envelope, and the DID identifier primitives used by the DID options
//! and dispatch layer.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vcreq-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - No I/O. Every function is pure and synchronous.

pub mod envelope;
pub mod error;
pub mod identity;

pub use envelope::{to_envelope, ErrorEnvelope, UNKNOWN_APPLICATION_ERROR, UNKNOWN_SERVER_ERROR};
pub use error::{SerializationError, UnsupportedMethodError, ValidationError, VcreqError};
pub use identity::{Did, DidMethod, DidOperation};
