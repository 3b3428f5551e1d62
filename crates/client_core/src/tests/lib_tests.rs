use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use transport::TransportError;

use super::*;

struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

#[async_trait]
impl InputSource for ScriptedInput {
    async fn next_event(&mut self) -> Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }
}

/// Records payloads; optionally fails the first N sends.
#[derive(Clone, Default)]
struct RecordingLink {
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
    fail_first: Arc<Mutex<usize>>,
}

impl RecordingLink {
    fn failing_first(n: usize) -> Self {
        let link = Self::default();
        *link.fail_first.lock().expect("lock") = n;
        link
    }

    fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().expect("lock").clone()
    }
}

#[async_trait]
impl DatagramSender for RecordingLink {
    async fn send(&self, payload: &[u8]) -> std::result::Result<(), TransportError> {
        let mut remaining = self.fail_first.lock().expect("lock");
        if *remaining > 0 {
            *remaining -= 1;
            return Err(TransportError::Unreachable(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "scripted failure",
            )));
        }
        self.sent.lock().expect("lock").push(payload.to_vec());
        Ok(())
    }
}

fn key(c: char) -> InputEvent {
    InputEvent::Key(Key::Char(c))
}

#[tokio::test]
async fn recognized_keys_each_produce_one_datagram() {
    let link = RecordingLink::default();
    let dispatcher = Dispatcher::new(
        ScriptedInput::new([key('w'), key('s'), key('q')]),
        link.clone(),
        NullPresenter,
    );

    let summary = dispatcher.run().await.expect("run");
    assert_eq!(link.sent(), vec![b"W".to_vec(), b"S".to_vec()]);
    assert_eq!(summary.commands_sent, 2);
    assert_eq!(summary.events_read, 3);
}

#[tokio::test]
async fn unrecognized_keys_send_nothing() {
    let link = RecordingLink::default();
    let dispatcher = Dispatcher::new(
        ScriptedInput::new([key('z'), key('1'), key('q')]),
        link.clone(),
        NullPresenter,
    );

    let summary = dispatcher.run().await.expect("run");
    assert!(link.sent().is_empty());
    assert_eq!(summary.commands_sent, 0);
}

#[tokio::test]
async fn exit_stops_the_loop_before_any_further_send() {
    let link = RecordingLink::default();
    let dispatcher = Dispatcher::new(
        ScriptedInput::new([key('q'), key('w'), key('w')]),
        link.clone(),
        NullPresenter,
    );

    let summary = dispatcher.run().await.expect("run");
    assert!(link.sent().is_empty());
    // The loop broke on the first event; later ones were never read.
    assert_eq!(summary.events_read, 1);
}

#[tokio::test]
async fn send_failures_do_not_stop_the_loop() {
    let link = RecordingLink::failing_first(1);
    let dispatcher = Dispatcher::new(
        ScriptedInput::new([key('w'), key('s'), key('q')]),
        link.clone(),
        NullPresenter,
    );

    let summary = dispatcher.run().await.expect("run must not escalate");
    assert_eq!(link.sent(), vec![b"S".to_vec()]);
    assert_eq!(summary.sends_failed, 1);
    assert_eq!(summary.commands_sent, 1);
}

#[tokio::test]
async fn repeated_slider_values_are_sent_once() {
    let link = RecordingLink::default();
    let dispatcher = Dispatcher::new(
        ScriptedInput::new([
            InputEvent::Slider(300),
            InputEvent::Slider(300),
            InputEvent::Slider(310),
            key('q'),
        ]),
        link.clone(),
        NullPresenter,
    );

    let summary = dispatcher.run().await.expect("run");
    assert_eq!(
        link.sent(),
        vec![vec![b'F', 0x01, 0x2C], vec![b'F', 0x01, 0x36]]
    );
    assert_eq!(summary.commands_sent, 2);
}

#[tokio::test]
async fn slider_value_is_retried_after_a_failed_send() {
    // A value that never reached the transport must not be deduplicated.
    let link = RecordingLink::failing_first(1);
    let dispatcher = Dispatcher::new(
        ScriptedInput::new([InputEvent::Slider(300), InputEvent::Slider(300), key('q')]),
        link.clone(),
        NullPresenter,
    );

    let summary = dispatcher.run().await.expect("run");
    assert_eq!(link.sent(), vec![vec![b'F', 0x01, 0x2C]]);
    assert_eq!(summary.sends_failed, 1);
    assert_eq!(summary.commands_sent, 1);
}

#[tokio::test]
async fn closed_input_source_ends_the_loop() {
    let link = RecordingLink::default();
    let dispatcher = Dispatcher::new(ScriptedInput::new([key('w')]), link.clone(), NullPresenter);

    let summary = dispatcher.run().await.expect("run");
    assert_eq!(link.sent(), vec![b"W".to_vec()]);
    assert_eq!(summary.events_read, 1);
}
