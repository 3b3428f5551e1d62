use thiserror::Error;

/// Failures decoding a received datagram. The message is discarded and the
/// receive loop continues.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unknown command byte 0x{0:02X}")]
    UnknownCommandByte(u8),
    #[error("unexpected message length {0}")]
    UnexpectedLength(usize),
}

/// Failures from the device capability. The controller leaves actuator state
/// unchanged when one of these surfaces; no partial write is applied.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("device unavailable: {0}")]
    Unavailable(String),
    #[error("value {value} outside valid range [{min}, {max}]")]
    OutOfRange { value: i64, min: i64, max: i64 },
    #[error("device communication failure: {0}")]
    CommunicationFailure(String),
}
