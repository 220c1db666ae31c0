use std::io;

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScalingError {
    #[error("Overflow: scaling factor exponent exceeds the max value of u64")]
    OverflowExponent,
    #[error("Overflow: scaled amount exceeds the max value of u64")]
    OverflowScaledAmount,
    #[error("Amount has dust: {dust} below the trimmed precision")]
    AmountHasDust { dust: u64 },
}

/// Failures while decoding or encoding a wire message.
///
/// These are always raised before any state is touched, so callers can treat
/// them as a plain rejection of the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("IncorrectPrefix: expected {expected:02x?}, got {actual:02x?}")]
    IncorrectPrefix { expected: [u8; 4], actual: [u8; 4] },
    #[error("LengthMismatch: field length {declared} does not match its contents")]
    LengthMismatch { declared: usize },
    #[error("TrailingBytes: {0} bytes left after decoding")]
    TrailingBytes(usize),
    #[error("UnexpectedEnd: message ended before all fields were read")]
    UnexpectedEnd,
    #[error("UnorderedInstructions: index {current} follows {previous}")]
    UnorderedInstructions { previous: u8, current: u8 },
    #[error("TooManyInstructions: {0} exceeds 255")]
    TooManyInstructions(usize),
    #[error("PayloadTooLong: {len} exceeds {max} bytes")]
    PayloadTooLong { len: usize, max: usize },
    #[error("InvalidMode: {0}")]
    InvalidMode(u8),
    #[error("UnknownPayload: no payload type with prefix {0:02x?}")]
    UnknownPayload([u8; 4]),
    #[error("Malformed: {0}")]
    Malformed(String),
}

impl From<MessageError> for io::Error {
    fn from(err: MessageError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

impl From<io::Error> for MessageError {
    /// Recovers the [`MessageError`] carried through a `wormhole_io` reader or
    /// writer. Running out of input maps to [`MessageError::UnexpectedEnd`].
    fn from(err: io::Error) -> Self {
        if let Some(inner) = err.get_ref().and_then(|e| e.downcast_ref::<MessageError>()) {
            return inner.clone();
        }
        match err.kind() {
            io::ErrorKind::UnexpectedEof => MessageError::UnexpectedEnd,
            _ => MessageError::Malformed(err.to_string()),
        }
    }
}
