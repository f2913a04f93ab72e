//! Typed access to the remote RTI API: the JSON envelope every endpoint
//! shares, the bearer-credential session store, and the HTTP client.

mod client;
mod envelope;
mod session;

pub use client::ApiClient;
pub use envelope::{ApiError, Envelope};
pub use session::{Session, SessionEvent, SessionStore};
