//! Entry points for turning wire bytes into messages and back.
//!
//! The `wormhole_io` traits read from any [`std::io::Read`], which means a
//! reader happily stops in the middle of a buffer. Messages that feed into a
//! digest must have exactly one encoding, so [`decode_exact`] insists that the
//! whole input is consumed.

use std::io;

use wormhole_io::{Readable, Writeable};

use crate::errors::MessageError;

/// Decodes `T` from `bytes`, failing if any byte is left over.
pub fn decode_exact<T: Readable>(bytes: &[u8]) -> Result<T, MessageError> {
    let mut cursor = bytes;
    let value = T::read(&mut cursor)?;
    if !cursor.is_empty() {
        return Err(MessageError::TrailingBytes(cursor.len()));
    }
    Ok(value)
}

/// Encodes `value`. Fails only when a variable length field does not fit its
/// length prefix.
pub fn encode<T: Writeable>(value: &T) -> Result<Vec<u8>, MessageError> {
    let mut buf = Vec::with_capacity(value.written_size());
    value.write(&mut buf)?;
    Ok(buf)
}

/// Reads a `u16` length prefix followed by that many bytes.
pub(crate) fn read_prefixed_bytes<R: io::Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let len: u16 = Readable::read(reader)?;
    let mut buf = vec![0u8; usize::from(len)];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Writes `bytes` behind a big endian `u16` length prefix.
pub(crate) fn write_prefixed_bytes<W: io::Write>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    let len = u16::try_from(bytes.len()).map_err(|_| MessageError::PayloadTooLong {
        len: bytes.len(),
        max: usize::from(u16::MAX),
    })?;
    len.write(writer)?;
    writer.write_all(bytes)
}

/// Reads a `u16` length prefixed field and decodes `T` from exactly that span.
pub(crate) fn read_prefixed<T, R>(
    reader: &mut R,
    read: impl FnOnce(&mut &[u8]) -> io::Result<T>,
) -> io::Result<T>
where
    R: io::Read,
{
    let span = read_prefixed_bytes(reader)?;
    let mut cursor = &span[..];
    let value = read(&mut cursor).map_err(|err| {
        // a declared length shorter than the field shows up as an EOF inside the span
        if err.kind() == io::ErrorKind::UnexpectedEof {
            MessageError::LengthMismatch {
                declared: span.len(),
            }
            .into()
        } else {
            err
        }
    })?;
    if !cursor.is_empty() {
        return Err(MessageError::LengthMismatch {
            declared: span.len(),
        }
        .into());
    }
    Ok(value)
}
