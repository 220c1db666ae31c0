use std::{fmt, io};

#[cfg(feature = "borsh")]
use borsh::{BorshDeserialize, BorshSerialize};

use wormhole_io::{Readable, Writeable};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct ChainId {
    pub id: u16,
}

impl ChainId {
    pub const fn new(id: u16) -> Self {
        Self { id }
    }

    pub fn to_be_bytes(self) -> [u8; 2] {
        self.id.to_be_bytes()
    }
}

impl From<u16> for ChainId {
    fn from(id: u16) -> Self {
        Self { id }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl Readable for ChainId {
    const SIZE: Option<usize> = u16::SIZE;

    fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized,
        R: io::Read,
    {
        let id = Readable::read(reader)?;

        Ok(Self { id })
    }
}

impl Writeable for ChainId {
    fn written_size(&self) -> usize {
        <u16 as Readable>::SIZE.unwrap_or(2)
    }

    fn write<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        let ChainId { id } = self;
        id.write(writer)
    }
}
