//! Command alphabet and wire codec shared by the operator side and the
//! actuator daemon.
//!
//! The key-to-command table is defined once here; the console's help screen
//! is rendered from [`help_entries`] so the two can never drift apart.

use crate::error::ProtocolError;

/// Default endpoint the actuator daemon listens on.
pub const DEFAULT_CONTROL_ADDR: &str = "127.0.0.1:8080";

/// Absolute focus targets travel as a command byte plus a u16 value.
pub const FOCUS_TARGET_LEN: usize = 3;

/// The closed set of actions the wire protocol can express.
///
/// Note on pan naming: the reference client sends the `PanLeft` byte (`L`)
/// for the Right arrow key and `PanRight` (`J`) for the Left arrow. The byte
/// values are load-bearing for wire compatibility and are preserved as-is;
/// see DESIGN.md for the inversion note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCode {
    Exit,
    FocusSample,
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    TiltUp,
    TiltDown,
    ZoomMax,
    ZoomReset,
}

impl CommandCode {
    pub const ALL: [CommandCode; 10] = [
        CommandCode::Exit,
        CommandCode::FocusSample,
        CommandCode::ZoomIn,
        CommandCode::ZoomOut,
        CommandCode::PanLeft,
        CommandCode::PanRight,
        CommandCode::TiltUp,
        CommandCode::TiltDown,
        CommandCode::ZoomMax,
        CommandCode::ZoomReset,
    ];

    /// The single ASCII byte this code occupies on the wire.
    pub const fn wire_byte(self) -> u8 {
        match self {
            CommandCode::Exit => b'X',
            CommandCode::FocusSample => b'F',
            CommandCode::ZoomIn => b'W',
            CommandCode::ZoomOut => b'S',
            CommandCode::PanLeft => b'L',
            CommandCode::PanRight => b'J',
            CommandCode::TiltUp => b'I',
            CommandCode::TiltDown => b'K',
            CommandCode::ZoomMax => b'M',
            CommandCode::ZoomReset => b'R',
        }
    }

    pub const fn from_wire_byte(byte: u8) -> Result<Self, ProtocolError> {
        match byte {
            b'X' => Ok(CommandCode::Exit),
            b'F' => Ok(CommandCode::FocusSample),
            b'W' => Ok(CommandCode::ZoomIn),
            b'S' => Ok(CommandCode::ZoomOut),
            b'L' => Ok(CommandCode::PanLeft),
            b'J' => Ok(CommandCode::PanRight),
            b'I' => Ok(CommandCode::TiltUp),
            b'K' => Ok(CommandCode::TiltDown),
            b'M' => Ok(CommandCode::ZoomMax),
            b'R' => Ok(CommandCode::ZoomReset),
            other => Err(ProtocolError::UnknownCommandByte(other)),
        }
    }
}

/// Key identifier produced by the input source. Opaque to everything except
/// [`translate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Up,
    Down,
}

/// Map a raw key to its command code.
///
/// Pure and stateless: the same key always yields the same code, and keys
/// outside the recognized set yield `None`. Letter keys are accepted in
/// either case, matching the reference client. The arrow wiring replicates
/// the reference exactly: Right arrow emits `PanLeft` and Left arrow emits
/// `PanRight`.
pub fn translate(key: Key) -> Option<CommandCode> {
    match key {
        Key::Char(c) => match c.to_ascii_lowercase() {
            'q' | 'x' => Some(CommandCode::Exit),
            'f' => Some(CommandCode::FocusSample),
            'w' => Some(CommandCode::ZoomIn),
            's' => Some(CommandCode::ZoomOut),
            'l' => Some(CommandCode::PanLeft),
            'j' => Some(CommandCode::PanRight),
            'i' => Some(CommandCode::TiltUp),
            'k' => Some(CommandCode::TiltDown),
            'm' => Some(CommandCode::ZoomMax),
            'r' => Some(CommandCode::ZoomReset),
            _ => None,
        },
        Key::Right => Some(CommandCode::PanLeft),
        Key::Left => Some(CommandCode::PanRight),
        Key::Up => Some(CommandCode::TiltUp),
        Key::Down => Some(CommandCode::TiltDown),
    }
}

/// Ordered (label, description) pairs for the operator help screen, derived
/// from the same table [`translate`] implements.
pub fn help_entries() -> &'static [(&'static str, &'static str)] {
    &[
        ("Focus", "'f' key"),
        ("Digital Zoom", "'w'/'s' keys"),
        ("Max Zoom", "'m' key"),
        ("Reset Zoom", "'r' key"),
        ("Move L/R", "Left / Right keys"),
        ("Move Up/Down", "Up / Down keys"),
        ("Focus Target", "'+'/'-' keys"),
        ("Quit", "'q' key"),
    ]
}

/// One datagram's worth of protocol content.
///
/// Discrete commands are a single byte; an absolute focus target carries the
/// `FocusSample` byte followed by the value, big-endian. The two forms are
/// disambiguated by datagram length, which UDP preserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Command(CommandCode),
    FocusTarget(u16),
}

impl Message {
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Message::Command(code) => vec![code.wire_byte()],
            Message::FocusTarget(value) => {
                let mut buf = Vec::with_capacity(FOCUS_TARGET_LEN);
                buf.push(CommandCode::FocusSample.wire_byte());
                buf.extend_from_slice(&value.to_be_bytes());
                buf
            }
        }
    }

    pub fn decode(payload: &[u8]) -> Result<Self, ProtocolError> {
        match payload {
            [byte] => Ok(Message::Command(CommandCode::from_wire_byte(*byte)?)),
            [byte, hi, lo] => {
                // Only the focus byte carries an absolute target today;
                // anything else with a payload is malformed.
                match CommandCode::from_wire_byte(*byte)? {
                    CommandCode::FocusSample => {
                        Ok(Message::FocusTarget(u16::from_be_bytes([*hi, *lo])))
                    }
                    _ => Err(ProtocolError::UnexpectedLength(payload.len())),
                }
            }
            other => Err(ProtocolError::UnexpectedLength(other.len())),
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
