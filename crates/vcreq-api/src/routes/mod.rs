//! Route modules. Each exposes a `router()` merged by [`crate::app`].

pub mod claims;
pub mod did;
pub mod root;
