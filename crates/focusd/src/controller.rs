//! Command application policy.
//!
//! The controller owns the device handle and the actuator state behind it.
//! Every decision re-reads the current position from the device first: on an
//! unordered transport, commands can arrive in any order, and a cached
//! position would make the clamp/no-op decision wrong.

use shared::{
    domain::Axis,
    error::DeviceError,
    protocol::{CommandCode, Message},
};
use tracing::debug;

use crate::device::FocusDevice;

/// Outcome of applying one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A new position was written to the device.
    Wrote { axis: Axis, value: i64 },
    /// The target equalled the current position (or a step was already at
    /// the range boundary); nothing was written.
    NoChange { axis: Axis, value: i64 },
    /// `FocusSample`: the current focus position, read without writing.
    Sampled { value: i64 },
    /// The wire-level exit code: the caller should stop serving.
    ShutdownRequested,
}

enum Action {
    Step(i64),
    Minimum,
    Maximum,
}

pub struct ActuatorController<D> {
    device: D,
    step_size: i64,
}

impl<D: FocusDevice> ActuatorController<D> {
    pub fn new(device: D, step_size: i64) -> Self {
        Self { device, step_size }
    }

    /// Apply one decoded message against the device.
    ///
    /// On any [`DeviceError`] the state is left as it was: the error path
    /// short-circuits before a write is issued, never proceeding with a
    /// previous or undefined position value.
    pub async fn apply(&mut self, message: &Message) -> Result<Applied, DeviceError> {
        match message {
            Message::Command(CommandCode::Exit) => Ok(Applied::ShutdownRequested),
            Message::Command(CommandCode::FocusSample) => {
                let value = self.device.get(Axis::Focus).await?;
                debug!(value, "focus sampled");
                Ok(Applied::Sampled { value })
            }
            Message::Command(code) => {
                let (axis, action) = match code {
                    CommandCode::ZoomIn => (Axis::Zoom, Action::Step(1)),
                    CommandCode::ZoomOut => (Axis::Zoom, Action::Step(-1)),
                    CommandCode::PanLeft => (Axis::Pan, Action::Step(-1)),
                    CommandCode::PanRight => (Axis::Pan, Action::Step(1)),
                    CommandCode::TiltUp => (Axis::Tilt, Action::Step(1)),
                    CommandCode::TiltDown => (Axis::Tilt, Action::Step(-1)),
                    CommandCode::ZoomMax => (Axis::Zoom, Action::Maximum),
                    CommandCode::ZoomReset => (Axis::Zoom, Action::Minimum),
                    // Captured by the dedicated arms above.
                    CommandCode::Exit | CommandCode::FocusSample => unreachable!(),
                };
                let range = self.device.range(axis);
                let current = self.device.get(axis).await?;
                let target = match action {
                    Action::Step(direction) => {
                        range.clamp(current + direction * self.step_size)
                    }
                    Action::Minimum => range.min,
                    Action::Maximum => range.max,
                };
                self.write_if_changed(axis, current, target).await
            }
            Message::FocusTarget(value) => {
                let range = self.device.range(Axis::Focus);
                let current = self.device.get(Axis::Focus).await?;
                let target = range.clamp(i64::from(*value));
                self.write_if_changed(Axis::Focus, current, target).await
            }
        }
    }

    /// Idempotence at the device-write level: equal target is a pure no-op.
    async fn write_if_changed(
        &mut self,
        axis: Axis,
        current: i64,
        target: i64,
    ) -> Result<Applied, DeviceError> {
        if target == current {
            return Ok(Applied::NoChange {
                axis,
                value: current,
            });
        }
        self.device.set(axis, target).await?;
        Ok(Applied::Wrote {
            axis,
            value: target,
        })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
