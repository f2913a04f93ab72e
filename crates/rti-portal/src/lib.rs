//! Client-side workflows for the Right to Information application portal:
//! a typed client for the remote RTI API, the observable session store, the
//! multi-section application form state machine (dependent selection
//! cascade, validation, conditional field groups, multipart submission),
//! the captcha-gated login flow, and dashboard counters.
//!
//! All business rules beyond shape checks live behind the remote API; this
//! crate holds the form-state and transport plumbing in front of it.

pub mod api;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

pub use error::AppError;
