use serde::{Deserialize, Serialize};

/// Motor axes exposed by the actuator. The reference hardware drives all of
/// them through the same `get`/`set` capability; `Focus` is the only axis the
/// continuous control targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Focus,
    Zoom,
    Pan,
    Tilt,
}

/// Inclusive valid range for an axis position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: i64,
    pub max: i64,
}

impl AxisRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Range observed on the reference focus motor: positions 0..=1023, step
/// granularity 1.
pub const DEFAULT_AXIS_RANGE: AxisRange = AxisRange::new(0, 1023);
