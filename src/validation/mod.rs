//! Unified validation framework for request payloads.
//!
//! Payload structs derive `validator::Validate`; the reusable rules live in
//! [`rules`]. Validation runs before any store access.

pub mod rules;

pub use validator::Validate;
