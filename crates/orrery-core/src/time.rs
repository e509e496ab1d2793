//! Time-management policy: base time units and lookahead validation.
//!
//! Federation logical time is carried as a signed 64-bit count of a base
//! time unit. The unit table steps by decades from seconds down to
//! attoseconds; finer units buy resolution at the cost of representable
//! range (attoseconds cap the logical timeline at about ±9.2 seconds).
//!
//! # Invariants
//!
//! - A regulating federate must declare a positive lookahead
//! - Conversions to base-unit counts saturate at the representable range

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Errors from time-management validation and conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeError {
    /// A regulating federate declared a non-positive (or non-finite)
    /// lookahead.
    #[error("invalid lookahead for a regulating federate: {lookahead} s")]
    InvalidLookahead {
        /// The offending lookahead value, seconds.
        lookahead: f64,
    },

    /// No base time unit was configured.
    #[error("base time units are not set")]
    BaseUnitsUnset,

    /// The executive tic rate must be a positive count per second.
    #[error("invalid executive tic rate: {tic_rate}")]
    InvalidTicRate {
        /// The offending tic rate.
        tic_rate: i64,
    },
}

/// Base time unit for integer logical time counts.
///
/// Discriminants are the wire encoding and order from coarsest to finest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum BaseTimeUnit {
    /// 1 second resolution.
    Seconds = 0,
    /// 100 millisecond resolution.
    HundredMilliseconds = 1,
    /// 10 millisecond resolution.
    TenMilliseconds = 2,
    /// 1 millisecond resolution.
    Milliseconds = 3,
    /// 100 microsecond resolution.
    HundredMicroseconds = 4,
    /// 10 microsecond resolution.
    TenMicroseconds = 5,
    /// 1 microsecond resolution.
    Microseconds = 6,
    /// 100 nanosecond resolution.
    HundredNanoseconds = 7,
    /// 10 nanosecond resolution.
    TenNanoseconds = 8,
    /// 1 nanosecond resolution.
    Nanoseconds = 9,
    /// 100 picosecond resolution.
    HundredPicoseconds = 10,
    /// 10 picosecond resolution.
    TenPicoseconds = 11,
    /// 1 picosecond resolution.
    Picoseconds = 12,
    /// 100 femtosecond resolution.
    HundredFemtoseconds = 13,
    /// 10 femtosecond resolution.
    TenFemtoseconds = 14,
    /// 1 femtosecond resolution.
    Femtoseconds = 15,
    /// 100 attosecond resolution.
    HundredAttoseconds = 16,
    /// 10 attosecond resolution.
    TenAttoseconds = 17,
    /// 1 attosecond resolution.
    Attoseconds = 18,
}

impl BaseTimeUnit {
    /// Base-unit counts per second.
    pub fn multiplier(self) -> i64 {
        match self {
            Self::Seconds => 1,
            Self::HundredMilliseconds => 10,
            Self::TenMilliseconds => 100,
            Self::Milliseconds => 1_000,
            Self::HundredMicroseconds => 10_000,
            Self::TenMicroseconds => 100_000,
            Self::Microseconds => 1_000_000,
            Self::HundredNanoseconds => 10_000_000,
            Self::TenNanoseconds => 100_000_000,
            Self::Nanoseconds => 1_000_000_000,
            Self::HundredPicoseconds => 10_000_000_000,
            Self::TenPicoseconds => 100_000_000_000,
            Self::Picoseconds => 1_000_000_000_000,
            Self::HundredFemtoseconds => 10_000_000_000_000,
            Self::TenFemtoseconds => 100_000_000_000_000,
            Self::Femtoseconds => 1_000_000_000_000_000,
            Self::HundredAttoseconds => 10_000_000_000_000_000,
            Self::TenAttoseconds => 100_000_000_000_000_000,
            Self::Attoseconds => 1_000_000_000_000_000_000,
        }
    }

    /// Human-readable unit name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::HundredMilliseconds => "100-milliseconds",
            Self::TenMilliseconds => "10-milliseconds",
            Self::Milliseconds => "milliseconds",
            Self::HundredMicroseconds => "100-microseconds",
            Self::TenMicroseconds => "10-microseconds",
            Self::Microseconds => "microseconds",
            Self::HundredNanoseconds => "100-nanoseconds",
            Self::TenNanoseconds => "10-nanoseconds",
            Self::Nanoseconds => "nanoseconds",
            Self::HundredPicoseconds => "100-picoseconds",
            Self::TenPicoseconds => "10-picoseconds",
            Self::Picoseconds => "picoseconds",
            Self::HundredFemtoseconds => "100-femtoseconds",
            Self::TenFemtoseconds => "10-femtoseconds",
            Self::Femtoseconds => "femtoseconds",
            Self::HundredAttoseconds => "100-attoseconds",
            Self::TenAttoseconds => "10-attoseconds",
            Self::Attoseconds => "attoseconds",
        }
    }

    /// Largest logical time, in seconds, representable in this unit.
    #[allow(clippy::cast_precision_loss)]
    pub fn max_logical_time_seconds(self) -> f64 {
        i64::MAX as f64 / self.multiplier() as f64
    }
}

impl std::fmt::Display for BaseTimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-management configuration for one federate.
///
/// Holds the lookahead, regulating/constrained flags, and the base time
/// unit used for integer logical time. Validation is pure and idempotent;
/// a bad combination is a configuration error, never a runtime one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeCoordinator {
    /// Lookahead in seconds. Must be positive when regulating.
    pub lookahead_seconds: f64,
    /// Base time unit for integer logical time counts.
    pub base_units: Option<BaseTimeUnit>,
    /// Whether this federate regulates federation time advancement.
    pub regulating: bool,
    /// Whether this federate is constrained by federation time.
    pub constrained: bool,
}

impl TimeCoordinator {
    /// Create a coordinator with the given lookahead and flags.
    pub fn new(
        lookahead_seconds: f64,
        base_units: BaseTimeUnit,
        regulating: bool,
        constrained: bool,
    ) -> Self {
        Self { lookahead_seconds, base_units: Some(base_units), regulating, constrained }
    }

    /// Check the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidLookahead`] when regulating with a
    /// lookahead that is not a positive finite number, and
    /// [`TimeError::BaseUnitsUnset`] when no base unit was configured.
    pub fn validate(&self) -> Result<(), TimeError> {
        if self.regulating && !(self.lookahead_seconds.is_finite() && self.lookahead_seconds > 0.0)
        {
            return Err(TimeError::InvalidLookahead { lookahead: self.lookahead_seconds });
        }
        if self.base_units.is_none() {
            return Err(TimeError::BaseUnitsUnset);
        }
        Ok(())
    }

    fn units(&self) -> Result<BaseTimeUnit, TimeError> {
        self.base_units.ok_or(TimeError::BaseUnitsUnset)
    }

    /// Convert seconds into a base-unit count.
    ///
    /// Splits the value into whole and fractional seconds, rounds the
    /// fractional part at the base resolution, and saturates at the
    /// representable range of the unit.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn to_base_time(&self, seconds: f64) -> Result<i64, TimeError> {
        let units = self.units()?;
        let multiplier = units.multiplier();

        let max_seconds = units.max_logical_time_seconds();
        if seconds > max_seconds {
            return Ok(i64::MAX);
        }
        if seconds < -max_seconds {
            return Ok(-i64::MAX);
        }

        let whole = seconds.trunc();
        let fractional = ((seconds - whole) * multiplier as f64).round() as i64;
        Ok(whole as i64 * multiplier + fractional)
    }

    /// Convert a base-unit count back to seconds.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_seconds(&self, count: i64) -> Result<f64, TimeError> {
        let multiplier = self.units()?.multiplier();
        let whole = (count / multiplier) as f64;
        let fractional = (count % multiplier) as f64 / multiplier as f64;
        Ok(whole + fractional)
    }

    /// True if `seconds` cannot be represented exactly at the base
    /// resolution.
    #[allow(clippy::cast_precision_loss)]
    pub fn exceeds_base_resolution(&self, seconds: f64) -> Result<bool, TimeError> {
        let multiplier = self.units()?.multiplier();
        Ok((seconds * multiplier as f64).fract() != 0.0)
    }

    /// Convert the lookahead into the external executive's native integer
    /// tics.
    ///
    /// The lookahead is first carried to a base-unit count, then scaled by
    /// `tic_rate` (tics per second) with truncation toward zero. The result
    /// is lossy unless the base unit divides the tic rate evenly; callers
    /// needing exactness must pick their base unit accordingly.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidTicRate`] for a non-positive tic rate,
    /// or [`TimeError::BaseUnitsUnset`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn scale_to_native_tics(&self, tic_rate: i64) -> Result<i64, TimeError> {
        if tic_rate <= 0 {
            return Err(TimeError::InvalidTicRate { tic_rate });
        }
        let multiplier = self.units()?.multiplier();
        let base_count = self.to_base_time(self.lookahead_seconds)?;
        // i128 keeps the intermediate product exact; integer division
        // truncates toward zero.
        Ok((i128::from(base_count) * i128::from(tic_rate) / i128::from(multiplier)) as i64)
    }
}

impl Default for TimeCoordinator {
    fn default() -> Self {
        Self { lookahead_seconds: 0.0, base_units: None, regulating: false, constrained: false }
    }
}
