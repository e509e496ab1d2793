//! Kinematic state types for reference frames.
//!
//! A frame's state is the space/time coordinate record exchanged with the
//! federation: position and velocity expressed in the parent frame, an
//! attitude quaternion, an angular velocity vector, and the state timestamp.
//!
//! # Invariants
//!
//! - Attitude quaternions are unit norm within [`QUAT_NORM_TOLERANCE`]
//! - All components are finite (no NaN, no infinities)
//! - Per frame, state timestamps never decrease across updates

use serde::{Deserialize, Serialize};

/// Accepted deviation of an attitude quaternion norm from 1.0.
pub const QUAT_NORM_TOLERANCE: f64 = 1e-9;

/// Errors from kinematic state validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateError {
    /// Attitude quaternion norm is outside the unit tolerance.
    #[error("attitude quaternion is not unit norm: |q| = {norm}")]
    NonUnitAttitude {
        /// The offending quaternion norm.
        norm: f64,
    },

    /// A state component is NaN or infinite.
    #[error("non-finite state component: {field}")]
    NonFiniteComponent {
        /// Name of the offending field.
        field: &'static str,
    },

    /// State timestamp moved backwards within a frame's update history.
    #[error("state time regressed: {previous} -> {next}")]
    TimeRegression {
        /// Timestamp of the previously accepted state.
        previous: f64,
        /// Timestamp of the rejected update.
        next: f64,
    },
}

/// Attitude quaternion with explicit scalar and vector parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuaternionData {
    /// Scalar part.
    pub scalar: f64,
    /// Vector part.
    pub vector: [f64; 3],
}

impl QuaternionData {
    /// The identity rotation.
    pub fn identity() -> Self {
        Self { scalar: 1.0, vector: [0.0; 3] }
    }

    /// Euclidean norm over all four components.
    pub fn norm(&self) -> f64 {
        let [x, y, z] = self.vector;
        (self.scalar * self.scalar + x * x + y * y + z * z).sqrt()
    }

    /// True if the norm is within `tolerance` of 1.0.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.norm() - 1.0).abs() <= tolerance
    }

    /// Scale the quaternion back to unit norm.
    ///
    /// A zero quaternion cannot be normalized and is reset to the identity.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            self.scalar /= norm;
            for component in &mut self.vector {
                *component /= norm;
            }
        } else {
            *self = Self::identity();
        }
    }
}

impl Default for QuaternionData {
    fn default() -> Self {
        Self::identity()
    }
}

/// Space/time coordinate state of a reference frame.
///
/// Position and velocity are expressed in the parent frame. `time` is the
/// scenario timestamp of the state, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameState {
    /// Position in the parent frame, meters.
    pub position: [f64; 3],
    /// Velocity with respect to the parent frame, meters/second.
    pub velocity: [f64; 3],
    /// Attitude quaternion of this frame in the parent frame.
    pub attitude: QuaternionData,
    /// Angular velocity vector, radians/second.
    pub angular_velocity: [f64; 3],
    /// Timestamp of this state, seconds.
    pub time: f64,
}

impl FrameState {
    /// Verify unit attitude and component finiteness.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NonFiniteComponent`] for any NaN or infinite
    /// component, or [`StateError::NonUnitAttitude`] when the attitude norm
    /// falls outside [`QUAT_NORM_TOLERANCE`].
    pub fn validate(&self) -> Result<(), StateError> {
        let vectors: [(&str, &[f64; 3]); 3] = [
            ("position", &self.position),
            ("velocity", &self.velocity),
            ("angular_velocity", &self.angular_velocity),
        ];
        for (field, components) in vectors {
            if components.iter().any(|c| !c.is_finite()) {
                return Err(StateError::NonFiniteComponent { field });
            }
        }
        if !self.attitude.scalar.is_finite() || self.attitude.vector.iter().any(|c| !c.is_finite())
        {
            return Err(StateError::NonFiniteComponent { field: "attitude" });
        }
        if !self.time.is_finite() {
            return Err(StateError::NonFiniteComponent { field: "time" });
        }

        if !self.attitude.is_normalized(QUAT_NORM_TOLERANCE) {
            return Err(StateError::NonUnitAttitude { norm: self.attitude.norm() });
        }

        Ok(())
    }
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            velocity: [0.0; 3],
            attitude: QuaternionData::identity(),
            angular_velocity: [0.0; 3],
            time: 0.0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn identity_quaternion_is_normalized() {
        let quat = QuaternionData::identity();
        assert!((quat.norm() - 1.0).abs() < f64::EPSILON);
        assert!(quat.is_normalized(QUAT_NORM_TOLERANCE));
    }

    #[test]
    fn scaled_quaternion_is_rejected() {
        let quat = QuaternionData { scalar: 2.0, vector: [0.0; 3] };
        assert!(!quat.is_normalized(QUAT_NORM_TOLERANCE));
    }

    #[test]
    fn normalize_restores_unit_norm() {
        let mut quat = QuaternionData { scalar: 3.0, vector: [4.0, 0.0, 0.0] };
        quat.normalize();
        assert!(quat.is_normalized(QUAT_NORM_TOLERANCE));
        assert!((quat.scalar - 0.6).abs() < 1e-12);
    }

    #[test]
    fn normalize_zero_quaternion_yields_identity() {
        let mut quat = QuaternionData { scalar: 0.0, vector: [0.0; 3] };
        quat.normalize();
        assert_eq!(quat, QuaternionData::identity());
    }

    #[test]
    fn default_state_is_valid() {
        assert!(FrameState::default().validate().is_ok());
    }

    #[test]
    fn non_unit_attitude_fails_validation() {
        let state = FrameState {
            attitude: QuaternionData { scalar: 0.5, vector: [0.0; 3] },
            ..FrameState::default()
        };
        assert!(matches!(state.validate(), Err(StateError::NonUnitAttitude { .. })));
    }

    #[test]
    fn nan_position_fails_validation() {
        let state = FrameState { position: [f64::NAN, 0.0, 0.0], ..FrameState::default() };
        assert_eq!(
            state.validate(),
            Err(StateError::NonFiniteComponent { field: "position" })
        );
    }

    #[test]
    fn infinite_time_fails_validation() {
        let state = FrameState { time: f64::INFINITY, ..FrameState::default() };
        assert_eq!(state.validate(), Err(StateError::NonFiniteComponent { field: "time" }));
    }
}
