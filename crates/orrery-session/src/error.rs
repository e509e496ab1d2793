//! Session error types.

use orrery_core::TimeError;
use orrery_frames::{RegistryError, StateError};
use thiserror::Error;

use crate::session::SessionState;

/// Errors from federate session configuration and initialization.
///
/// All variants are fatal configuration errors: they abort the run setup
/// before any transport binding or federation join is attempted, so no
/// partial join can occur. There is no retry at this level.
#[derive(Debug, Error)]
pub enum SessionError {
    /// `initialize()` was called on an already-initialized session, or a
    /// mutator was called after the configuration was frozen.
    #[error("federate session is already initialized")]
    AlreadyInitialized,

    /// An operation was attempted in the wrong lifecycle state.
    #[error("invalid session state: expected {expected}, was {actual}")]
    InvalidState {
        /// The state the operation requires.
        expected: &'static str,
        /// The state the session was in.
        actual: SessionState,
    },

    /// The frame registry has no resolvable root frame.
    #[error("no resolvable root reference frame")]
    MissingRootFrame,

    /// The configured root frame object does not match the registry's
    /// resolved root.
    #[error("root frame object names '{configured}' but the registry root is '{resolved}'")]
    RootFrameMismatch {
        /// Frame named by the root frame object.
        configured: String,
        /// Root resolved from the registry.
        resolved: String,
    },

    /// The same managed object was added twice.
    #[error("duplicate federate object: {name}")]
    DuplicateObject {
        /// Conflicting frame name or packing handle.
        name: String,
    },

    /// The run duration must be positive when set.
    #[error("run duration must be positive: {seconds} s")]
    InvalidRunDuration {
        /// The offending duration.
        seconds: f64,
    },

    /// Frame registry error.
    #[error("frame registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Time-management validation error.
    #[error("time management error: {0}")]
    Time(#[from] TimeError),

    /// A registered frame's initial state failed validation.
    #[error("frame state error: {0}")]
    State(#[from] StateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_errors_convert() {
        let err: SessionError =
            RegistryError::UnknownFrame { name: "FrameA".to_owned() }.into();
        assert_eq!(err.to_string(), "frame registry error: unknown reference frame: FrameA");
    }

    #[test]
    fn invalid_state_names_both_states() {
        let err = SessionError::InvalidState {
            expected: "Initialized",
            actual: SessionState::Unconfigured,
        };
        assert_eq!(err.to_string(), "invalid session state: expected Initialized, was Unconfigured");
    }
}
