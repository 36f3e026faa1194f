//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and authentication.

pub mod require_session;
pub mod trace;

pub use require_session::RequireSession;
pub use trace::Trace;
