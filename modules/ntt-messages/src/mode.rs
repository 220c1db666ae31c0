use std::io;

#[cfg(feature = "borsh")]
use borsh::{BorshDeserialize, BorshSerialize};

use wormhole_io::{Readable, Writeable};

use crate::errors::MessageError;

/// How a manager takes custody of outbound tokens and releases inbound ones.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Mode {
    /// Tokens are held by the manager's custody account and unlocked on the way in.
    Locking,
    /// Tokens are burned on the way out and minted on the way in.
    Burning,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Burning => write!(f, "Burning"),
            Mode::Locking => write!(f, "Locking"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "locking" => Ok(Mode::Locking),
            "burning" => Ok(Mode::Burning),
            other => Err(MessageError::Malformed(format!("unknown mode {other}"))),
        }
    }
}

impl Readable for Mode {
    const SIZE: Option<usize> = Some(1);

    fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized,
        R: io::Read,
    {
        let b: u8 = u8::read(reader)?;

        match b {
            0 => Ok(Mode::Locking),
            1 => Ok(Mode::Burning),
            other => Err(MessageError::InvalidMode(other).into()),
        }
    }
}

impl Writeable for Mode {
    fn written_size(&self) -> usize {
        1
    }

    fn write<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        match self {
            Mode::Locking => 0u8.write(writer),
            Mode::Burning => 1u8.write(writer),
        }
    }
}
