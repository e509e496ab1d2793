//! Federate role and time-management policy.
//!
//! This crate carries the per-federate configuration that is independent of
//! any particular frame: the execution role flags (Master, Pacing, Root
//! Reference Frame Publisher), the time-management parameters (lookahead,
//! base time units, regulating/constrained), and the pure resolution of
//! publish/subscribe discovery directions over a frame registry.
//!
//! Everything here is passive configuration state; validation failures are
//! synchronous, fatal configuration errors.

mod discovery;
mod roles;
mod time;

pub use discovery::{BindingDirection, FrameBinding, FrameObject, resolve_bindings};
pub use roles::{RoleConfig, RoleFlags};
pub use time::{BaseTimeUnit, TimeCoordinator, TimeError};
