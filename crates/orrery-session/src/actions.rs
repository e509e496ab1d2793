//! Actions produced by session initialization.
//!
//! The session performs no I/O itself. `initialize()` returns intents for
//! the external collaborators to execute: binding requests for the
//! transport, a terminate time for the simulation executive, and log lines
//! for whoever is driving.

/// An intent for an external collaborator, produced by `initialize()`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Request a publish binding from the transport collaborator.
    Publish {
        /// Frame whose state this federate sends.
        frame_name: String,
        /// Symbolic data handle for the packed state buffer.
        packing_handle: String,
    },

    /// Request a subscribe binding from the transport collaborator.
    Subscribe {
        /// Frame whose state this federate receives.
        frame_name: String,
        /// Symbolic data handle for the packed state buffer.
        packing_handle: String,
    },

    /// Tell the simulation executive when to terminate the run.
    ///
    /// Emitted only when a run duration is configured; without it the
    /// session runs until externally terminated.
    SetTerminateTime {
        /// Terminate time in seconds from run start.
        seconds: f64,
    },

    /// A log line for the driver.
    Log {
        /// Message text.
        message: String,
    },
}
