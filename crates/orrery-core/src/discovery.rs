//! Publish/subscribe discovery resolution.
//!
//! For every managed frame object the federate either advertises the frame
//! for sending (publish) or declares it wanted (subscribe). The decision is
//! a pure function of the role configuration and the per-frame ownership
//! flag; establishing the binding is the transport collaborator's job, the
//! core only names frame, direction, and data handle.

use orrery_frames::{FrameRegistry, RegistryError};
use serde::{Deserialize, Serialize};

use crate::roles::RoleConfig;

/// Discovery direction for one frame binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingDirection {
    /// This federate advertises and sends the frame's state.
    Publish,
    /// This federate declares the frame wanted and receives its state.
    Subscribe,
}

/// One managed frame object supplied at configuration time.
///
/// `packing_handle` is the symbolic name of the packed-state buffer the
/// transport collaborator binds to; `owned` is the static per-frame
/// ownership flag that decides the direction for non-root frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameObject {
    /// Name of the registered frame this object manages.
    pub frame_name: String,
    /// Symbolic data handle for the transport binding.
    pub packing_handle: String,
    /// Whether this federate owns (publishes) the frame. Ignored for the
    /// root frame, whose direction is gated by the RRFP role.
    pub owned: bool,
}

impl FrameObject {
    /// Create a managed frame object.
    pub fn new(
        frame_name: impl Into<String>,
        packing_handle: impl Into<String>,
        owned: bool,
    ) -> Self {
        Self { frame_name: frame_name.into(), packing_handle: packing_handle.into(), owned }
    }
}

/// A resolved transport binding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBinding {
    /// Frame the binding is for.
    pub frame_name: String,
    /// Symbolic data handle.
    pub packing_handle: String,
    /// Resolved direction.
    pub direction: BindingDirection,
}

/// Resolve the discovery direction of every managed frame object.
///
/// `root_name` is the registry's resolved root; the root frame's direction
/// follows the Root Reference Frame Publisher role alone, every other frame
/// follows its object's `owned` flag.
///
/// # Errors
///
/// Returns [`RegistryError::UnknownFrame`] when an object names a frame
/// that is not registered.
pub fn resolve_bindings(
    roles: &RoleConfig,
    registry: &FrameRegistry,
    root_name: &str,
    objects: &[FrameObject],
) -> Result<Vec<FrameBinding>, RegistryError> {
    objects
        .iter()
        .map(|object| {
            let frame = registry
                .get(&object.frame_name)
                .ok_or_else(|| RegistryError::UnknownFrame { name: object.frame_name.clone() })?;

            let is_root = frame.name() == root_name;
            let direction = if roles.is_publisher_for(frame.name(), is_root, object.owned) {
                BindingDirection::Publish
            } else {
                BindingDirection::Subscribe
            };

            Ok(FrameBinding {
                frame_name: object.frame_name.clone(),
                packing_handle: object.packing_handle.clone(),
                direction,
            })
        })
        .collect()
}
