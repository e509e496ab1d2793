//! Reference frame data model and registry.
//!
//! This crate holds the passive data types of the federate configuration
//! core: kinematic frame states, named reference frame nodes with
//! parent-by-name linkage, and the registry that owns them and enforces the
//! tree invariants.
//!
//! ## Architecture
//!
//! ```text
//! orrery-frames
//!   ├─ FrameState / QuaternionData   (kinematic state vector)
//!   ├─ ReferenceFrame                (named node, parent by name, CBOR packing)
//!   └─ FrameRegistry                 (tree ownership + invariants)
//! ```
//!
//! Nothing here performs I/O. Packed state buffers are opaque payloads for
//! an external transport collaborator; registry errors are fatal
//! configuration errors surfaced to the run-setup caller.

mod frame;
mod registry;
mod state;

pub use frame::{FrameError, PackError, ReferenceFrame};
pub use registry::{FrameRegistry, PathToRoot, RegistryError};
pub use state::{FrameState, QUAT_NORM_TOLERANCE, QuaternionData, StateError};
