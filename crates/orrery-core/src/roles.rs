//! Federate role flags and publish/subscribe resolution.
//!
//! A federate may hold any combination of the execution roles: Master
//! (drives federation mode transitions), Pacing (paces logical time against
//! a real-time reference), and Root Reference Frame Publisher (owns the
//! root frame's state). At most one federate process in a federation may
//! hold Master or Root Reference Frame Publisher at runtime; that is a
//! cross-process guarantee assumed from the federation agreement and is not
//! checkable here.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Execution role flags for one federate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct RoleFlags: u8 {
        /// Master federate: drives federation execution mode transitions.
        const MASTER = 1;
        /// Pacing federate: paces logical time against wall-clock time.
        const PACING = 1 << 1;
        /// Root Reference Frame Publisher: publishes the root frame state.
        const ROOT_FRAME_PUBLISHER = 1 << 2;
    }
}

/// Role configuration for one federate.
///
/// Holds this federate's role flags plus the names of the Master and Pacing
/// federates in the federation (already resolved by the command-line
/// collaborator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleConfig {
    /// This federate's role flags.
    pub flags: RoleFlags,
    /// Name of the federation's Master federate.
    pub master_federate: String,
    /// Name of the federation's Pacing federate.
    pub pacing_federate: String,
}

impl RoleConfig {
    /// Create a role configuration.
    pub fn new(
        flags: RoleFlags,
        master_federate: impl Into<String>,
        pacing_federate: impl Into<String>,
    ) -> Self {
        Self { flags, master_federate: master_federate.into(), pacing_federate: pacing_federate.into() }
    }

    /// True if this federate is the Master.
    pub fn is_master(&self) -> bool {
        self.flags.contains(RoleFlags::MASTER)
    }

    /// True if this federate is the Pacing federate.
    pub fn is_pacing(&self) -> bool {
        self.flags.contains(RoleFlags::PACING)
    }

    /// True if this federate is the Root Reference Frame Publisher.
    pub fn is_root_frame_publisher(&self) -> bool {
        self.flags.contains(RoleFlags::ROOT_FRAME_PUBLISHER)
    }

    /// Decide the discovery direction for one frame.
    ///
    /// The root frame's direction is gated solely by the Root Reference
    /// Frame Publisher flag; every other frame is published iff this
    /// federate was configured as its owner (`owns_frame`, a static
    /// per-frame flag). Pure function of configuration state, no side
    /// effects.
    pub fn is_publisher_for(&self, _frame_name: &str, is_root: bool, owns_frame: bool) -> bool {
        if is_root { self.is_root_frame_publisher() } else { owns_frame }
    }
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self::new(RoleFlags::empty(), "Master", "Pacing")
    }
}
