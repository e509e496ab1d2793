//! Reference frame nodes.
//!
//! A [`ReferenceFrame`] is a named coordinate system with a kinematic state,
//! linked to its parent frame purely by name. The root frame has no parent.
//! Parent references are resolved by the registry, never held as pointers,
//! so a reference cycle cannot be expressed structurally.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::state::{FrameState, StateError};

/// Errors from frame construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Frame names identify nodes in the tree and must not be empty.
    #[error("reference frame name must not be empty")]
    EmptyName,
}

/// Errors from frame state packing.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// CBOR encoding of the frame state failed.
    #[error("frame state encode failed: {0}")]
    Encode(#[from] ciborium::ser::Error<std::io::Error>),

    /// CBOR decoding of a packed frame state failed.
    #[error("frame state decode failed: {0}")]
    Decode(#[from] ciborium::de::Error<std::io::Error>),
}

/// A named reference frame with parent linkage by name.
///
/// The publish flag is derived from role resolution during session
/// initialization; it is `false` until then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFrame {
    /// Unique frame name.
    name: String,
    /// Parent frame name; `None` marks the root frame.
    parent: Option<String>,
    /// Current kinematic state.
    state: FrameState,
    /// Whether this federate publishes the frame (derived from roles).
    publish: bool,
}

impl ReferenceFrame {
    /// Create a frame with a default (identity) state.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::EmptyName`] for an empty name. An empty parent
    /// string is accepted and treated as "no parent" for compatibility with
    /// configuration sources that denote the root with an empty string.
    pub fn new(name: impl Into<String>, parent: Option<&str>) -> Result<Self, FrameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FrameError::EmptyName);
        }
        let parent = parent.filter(|p| !p.is_empty()).map(str::to_owned);
        Ok(Self { name, parent, state: FrameState::default(), publish: false })
    }

    /// Create a frame with an explicit initial state.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::EmptyName`] for an empty name.
    pub fn with_state(
        name: impl Into<String>,
        parent: Option<&str>,
        state: FrameState,
    ) -> Result<Self, FrameError> {
        let mut frame = Self::new(name, parent)?;
        frame.state = state;
        Ok(frame)
    }

    /// Frame name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent frame name, or `None` for the root frame.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// True if this frame has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Current kinematic state.
    pub fn state(&self) -> &FrameState {
        &self.state
    }

    /// Whether this federate publishes the frame.
    pub fn is_publisher(&self) -> bool {
        self.publish
    }

    /// Set the publish direction (role resolution outcome).
    pub fn set_publisher(&mut self, publish: bool) {
        self.publish = publish;
    }

    /// Replace the frame state with a newer one.
    ///
    /// Called by external dynamics during simulation stepping.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::TimeRegression`] when the update's timestamp is
    /// older than the current state, or any validation error from
    /// [`FrameState::validate`].
    pub fn update_state(&mut self, next: FrameState) -> Result<(), StateError> {
        next.validate()?;
        if next.time < self.state.time {
            return Err(StateError::TimeRegression { previous: self.state.time, next: next.time });
        }
        self.state = next;
        Ok(())
    }

    /// Encode the current state into a packed CBOR buffer.
    ///
    /// The buffer is the opaque payload handed to the transport collaborator
    /// under the frame's data handle; this crate never ships it anywhere.
    pub fn pack(&self) -> Result<Bytes, PackError> {
        let mut buf = Vec::new();
        ciborium::ser::into_writer(&self.state, &mut buf)?;
        Ok(Bytes::from(buf))
    }

    /// Decode a packed CBOR buffer back into a frame state.
    pub fn unpack(buf: &[u8]) -> Result<FrameState, PackError> {
        Ok(ciborium::de::from_reader(buf)?)
    }
}
