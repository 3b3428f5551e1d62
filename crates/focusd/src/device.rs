//! Device capability seam.
//!
//! The real focus motor sits behind a V4L2 sub-device whose register
//! protocol is outside this daemon; everything above it talks to the motor
//! through [`FocusDevice`]. One handle is acquired at startup and owned by
//! the controller for the process lifetime.

use std::collections::HashMap;

use async_trait::async_trait;
use shared::{
    domain::{Axis, AxisRange, DEFAULT_AXIS_RANGE},
    error::DeviceError,
};
use tracing::debug;

#[async_trait]
pub trait FocusDevice: Send {
    async fn get(&mut self, axis: Axis) -> Result<i64, DeviceError>;
    async fn set(&mut self, axis: Axis, value: i64) -> Result<(), DeviceError>;
    fn range(&self, axis: Axis) -> AxisRange;
}

/// In-memory stand-in for the motor, used when no hardware is attached and
/// throughout the test suite. All axes start at their range minimum.
pub struct SimulatedFocuser {
    positions: HashMap<Axis, i64>,
    range: AxisRange,
}

impl SimulatedFocuser {
    pub fn new() -> Self {
        Self::with_range(DEFAULT_AXIS_RANGE)
    }

    pub fn with_range(range: AxisRange) -> Self {
        Self {
            positions: HashMap::new(),
            range,
        }
    }

    pub fn with_position(mut self, axis: Axis, value: i64) -> Self {
        self.positions.insert(axis, value);
        self
    }
}

impl Default for SimulatedFocuser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FocusDevice for SimulatedFocuser {
    async fn get(&mut self, axis: Axis) -> Result<i64, DeviceError> {
        Ok(*self.positions.entry(axis).or_insert(self.range.min))
    }

    async fn set(&mut self, axis: Axis, value: i64) -> Result<(), DeviceError> {
        if !self.range.contains(value) {
            return Err(DeviceError::OutOfRange {
                value,
                min: self.range.min,
                max: self.range.max,
            });
        }
        debug!(?axis, value, "simulated write");
        self.positions.insert(axis, value);
        Ok(())
    }

    fn range(&self, _axis: Axis) -> AxisRange {
        self.range
    }
}
