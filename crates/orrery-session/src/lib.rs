//! Federate session lifecycle and run configuration.
//!
//! Ties the frame registry, role configuration, and time management into a
//! single [`FederateSession`] that validates and freezes one federate's run
//! configuration. The session is synchronous and performs no I/O:
//! [`FederateSession::initialize`] returns [`SessionAction`]s describing the
//! publish/subscribe declarations and scheduling requests for the external
//! executive and transport layers to carry out.

pub mod actions;
pub mod error;
pub mod session;

pub use actions::SessionAction;
pub use error::SessionError;
pub use session::{FederateSession, SessionState};
