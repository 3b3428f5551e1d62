//! Actuator daemon: receives command datagrams and drives the focus motor.

use anyhow::Context;
use shared::protocol::Message;
use tracing::{error, info, warn};
use transport::{DatagramReceiver, UdpReceiver};

mod config;
mod controller;
mod device;

use config::load_settings;
use controller::{ActuatorController, Applied};
use device::{FocusDevice, SimulatedFocuser};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();

    // One device handle for the daemon's lifetime. The simulated focuser
    // stands in until a hardware-backed FocusDevice is wired up for
    // settings.device_path.
    info!(device = %settings.device_path, step = settings.step_size, "opening focus device");
    let device = SimulatedFocuser::new();
    let mut controller = ActuatorController::new(device, settings.step_size);

    // Bind failure is the one fatal error; everything past this point keeps
    // the loop alive.
    let receiver = UdpReceiver::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind control endpoint {}", settings.bind_addr))?;
    info!(addr = %settings.bind_addr, "actuator listening");

    serve(&receiver, &mut controller).await;
    info!("actuator stopped");
    Ok(())
}

/// Receive loop: one datagram in, zero or one device write out.
///
/// Malformed datagrams and device failures are reported and skipped; only
/// the wire-level exit code ends the loop.
async fn serve<R, D>(receiver: &R, controller: &mut ActuatorController<D>)
where
    R: DatagramReceiver,
    D: FocusDevice,
{
    loop {
        let (peer, payload) = match receiver.receive(None).await {
            Ok(Some(datagram)) => datagram,
            Ok(None) => continue,
            Err(error) => {
                error!(%error, "receive failed");
                continue;
            }
        };

        let message = match Message::decode(&payload) {
            Ok(message) => message,
            Err(error) => {
                warn!(%error, %peer, "discarding malformed datagram");
                continue;
            }
        };

        match controller.apply(&message).await {
            Ok(Applied::Wrote { axis, value }) => {
                info!(?axis, value, "position updated");
            }
            Ok(Applied::NoChange { axis, value }) => {
                info!(?axis, value, "no change");
            }
            Ok(Applied::Sampled { value }) => {
                info!(focus = value, "focus sampled");
            }
            Ok(Applied::ShutdownRequested) => {
                info!(%peer, "shutdown requested");
                break;
            }
            Err(error) => {
                // State is untouched; one bad command must not take the
                // controller down.
                error!(%error, ?message, "device rejected command");
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
