//! Operator-side dispatch loop: read one input event, translate it through
//! the command alphabet, hand at most one datagram to the transport, refresh
//! the presentation, repeat.
//!
//! Transport failures never escalate out of the loop. A dropped control
//! command is recovered by the operator pressing the key again; crashing the
//! controller over it would be strictly worse.

use anyhow::Result;
use async_trait::async_trait;
use shared::protocol::{help_entries, translate, CommandCode, Key, Message};
use transport::DatagramSender;
use tracing::{debug, info, warn};

/// One unit of operator input: a key press, or an absolute focus target
/// sample from a slider-style control in [0, 1023].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Slider(u16),
}

/// Blocking source of operator input. `Ok(None)` means the source is
/// exhausted (terminal closed, channel dropped) and the loop should end.
#[async_trait]
pub trait InputSource: Send {
    async fn next_event(&mut self) -> Result<Option<InputEvent>>;
}

/// What the presentation layer needs per refresh. Emits nothing back into
/// the loop.
#[derive(Debug, Clone, Copy)]
pub struct StatusFrame<'a> {
    pub last_event: Option<InputEvent>,
    pub help: &'static [(&'static str, &'static str)],
    pub status: &'a str,
}

/// Presentation sink refreshed once per loop iteration.
pub trait Presenter: Send {
    fn refresh(&mut self, frame: &StatusFrame<'_>);
}

/// Presenter for headless use (tools, tests).
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn refresh(&mut self, _frame: &StatusFrame<'_>) {}
}

/// Counters reported when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub events_read: u64,
    pub commands_sent: u64,
    pub sends_failed: u64,
}

pub struct Dispatcher<S, T, P> {
    source: S,
    link: T,
    presenter: P,
    /// Last focus target handed to the transport successfully. Local only:
    /// the loop never round-trips to the actuator to decide whether to send.
    last_focus_sent: Option<u16>,
}

impl<S, T, P> Dispatcher<S, T, P>
where
    S: InputSource,
    T: DatagramSender,
    P: Presenter,
{
    pub fn new(source: S, link: T, presenter: P) -> Self {
        Self {
            source,
            link,
            presenter,
            last_focus_sent: None,
        }
    }

    /// Run until the terminal key is pressed or the input source closes.
    pub async fn run(mut self) -> Result<DispatchSummary> {
        let mut summary = DispatchSummary::default();

        loop {
            let Some(event) = self.source.next_event().await? else {
                info!("input source closed, stopping dispatch");
                break;
            };
            summary.events_read += 1;

            match event {
                InputEvent::Key(key) => match translate(key) {
                    Some(CommandCode::Exit) => {
                        // Terminal code short-circuits before any send.
                        info!("exit requested, stopping dispatch");
                        self.refresh(Some(event), "exiting");
                        break;
                    }
                    Some(code) => {
                        self.dispatch(Message::Command(code), &mut summary).await;
                    }
                    None => {
                        debug!(?key, "unmapped key ignored");
                    }
                },
                InputEvent::Slider(value) => {
                    // Send only on change. The authoritative current-vs-new
                    // comparison and clamping live in the actuator
                    // controller, which owns the device state.
                    if self.last_focus_sent != Some(value) {
                        let sent_before = summary.commands_sent;
                        self.dispatch(Message::FocusTarget(value), &mut summary).await;
                        if summary.commands_sent > sent_before {
                            self.last_focus_sent = Some(value);
                        }
                    }
                }
            }

            self.refresh(Some(event), "Press 'q' to exit");
        }

        Ok(summary)
    }

    async fn dispatch(&mut self, message: Message, summary: &mut DispatchSummary) {
        let payload = message.encode();
        match self.link.send(&payload).await {
            Ok(()) => summary.commands_sent += 1,
            Err(error) => {
                // Best-effort channel: report and move on to the next read.
                warn!(%error, ?message, "command dropped");
                summary.sends_failed += 1;
            }
        }
    }

    fn refresh(&mut self, last_event: Option<InputEvent>, status: &str) {
        self.presenter.refresh(&StatusFrame {
            last_event,
            help: help_entries(),
            status,
        });
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
