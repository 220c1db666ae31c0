use std::io;

#[cfg(feature = "borsh")]
use borsh::{BorshDeserialize, BorshSerialize};

use wormhole_io::{Readable, TypePrefixedPayload, Writeable};

use crate::{chain_id::ChainId, errors::MessageError, mode::Mode, transceiver::Transceiver};

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct WormholeTransceiver {}

impl Transceiver for WormholeTransceiver {
    const PREFIX: [u8; 4] = [0x99, 0x45, 0xFF, 0x10];
}

impl WormholeTransceiver {
    pub const INFO_PREFIX: [u8; 4] = [0x9c, 0x23, 0xbd, 0x3b];

    pub const PEER_INFO_PREFIX: [u8; 4] = [0x18, 0xfc, 0x67, 0xc2];
}

fn expect_prefix<R: io::Read>(reader: &mut R, expected: [u8; 4]) -> io::Result<()> {
    let actual = <[u8; 4]>::read(reader)?;
    if actual != expected {
        return Err(MessageError::IncorrectPrefix { expected, actual }.into());
    }
    Ok(())
}

// * Transceiver info

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
pub struct WormholeTransceiverInfo {
    pub manager_address: [u8; 32],
    pub manager_mode: Mode,
    pub token_address: [u8; 32],
    pub token_decimals: u8,
}

impl Readable for WormholeTransceiverInfo {
    const SIZE: Option<usize> = Some(4 + 32 + 1 + 32 + 1);

    fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized,
        R: io::Read,
    {
        expect_prefix(reader, WormholeTransceiver::INFO_PREFIX)?;

        let manager_address = <[u8; 32]>::read(reader)?;
        let manager_mode = Mode::read(reader)?;
        let token_address = <[u8; 32]>::read(reader)?;
        let token_decimals = u8::read(reader)?;

        Ok(WormholeTransceiverInfo {
            manager_address,
            manager_mode,
            token_address,
            token_decimals,
        })
    }
}

impl Writeable for WormholeTransceiverInfo {
    fn written_size(&self) -> usize {
        4 + 32 + 1 + 32 + 1
    }

    fn write<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        WormholeTransceiver::INFO_PREFIX.write(writer)?;
        self.manager_address.write(writer)?;
        self.manager_mode.write(writer)?;
        self.token_address.write(writer)?;
        self.token_decimals.write(writer)
    }
}

impl TypePrefixedPayload for WormholeTransceiverInfo {
    const TYPE: Option<u8> = None;
}

// * Transceiver registration

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
pub struct WormholeTransceiverRegistration {
    pub chain_id: ChainId,
    pub transceiver_address: [u8; 32],
}

impl Readable for WormholeTransceiverRegistration {
    const SIZE: Option<usize> = Some(4 + 2 + 32);

    fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized,
        R: io::Read,
    {
        expect_prefix(reader, WormholeTransceiver::PEER_INFO_PREFIX)?;

        let chain_id = ChainId::read(reader)?;
        let transceiver_address = <[u8; 32]>::read(reader)?;

        Ok(WormholeTransceiverRegistration {
            chain_id,
            transceiver_address,
        })
    }
}

impl Writeable for WormholeTransceiverRegistration {
    fn written_size(&self) -> usize {
        4 + 2 + 32
    }

    fn write<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        WormholeTransceiver::PEER_INFO_PREFIX.write(writer)?;
        self.chain_id.write(writer)?;
        self.transceiver_address.write(writer)
    }
}

impl TypePrefixedPayload for WormholeTransceiverRegistration {
    const TYPE: Option<u8> = None;
}

// * Per-transfer instruction

/// The instruction a sender may attach for the Wormhole transceiver: a single
/// flag byte telling it not to request automatic relaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
pub struct WormholeTransceiverInstruction {
    pub should_skip_relayer_send: bool,
}

impl Readable for WormholeTransceiverInstruction {
    const SIZE: Option<usize> = Some(1);

    fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized,
        R: io::Read,
    {
        let should_skip_relayer_send = match u8::read(reader)? {
            0 => false,
            1 => true,
            other => {
                return Err(MessageError::Malformed(format!(
                    "relayer flag must be 0 or 1, got {other}"
                ))
                .into())
            }
        };
        Ok(Self {
            should_skip_relayer_send,
        })
    }
}

impl Writeable for WormholeTransceiverInstruction {
    fn written_size(&self) -> usize {
        1
    }

    fn write<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        u8::from(self.should_skip_relayer_send).write(writer)
    }
}

impl TypePrefixedPayload for WormholeTransceiverInstruction {
    const TYPE: Option<u8> = None;
}
