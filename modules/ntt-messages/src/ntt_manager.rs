use std::io::{self, Read};

#[cfg(feature = "borsh")]
use borsh::{BorshDeserialize, BorshSerialize};

use wormhole_io::{Readable, TypePrefixedPayload, Writeable};

use crate::{
    codec::{read_prefixed, write_prefixed_bytes},
    errors::MessageError,
    ntt::NativeTokenTransfer,
    transceivers::wormhole::{
        WormholeTransceiver, WormholeTransceiverInfo, WormholeTransceiverRegistration,
    },
};

/// The message a manager emits. `id` is unique per source chain (the
/// manager's sequence number), `sender` is the account that initiated it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
pub struct NttManagerMessage<A> {
    pub id: [u8; 32],
    pub sender: [u8; 32],
    pub payload: A,
}

impl<A> NttManagerMessage<A> {
    /// Encodes a sequence number as a message id (big endian, right aligned).
    pub fn id_from_sequence(sequence: u64) -> [u8; 32] {
        let mut id = [0u8; 32];
        id[24..].copy_from_slice(&sequence.to_be_bytes());
        id
    }
}

#[cfg(feature = "hash")]
impl<A: Writeable> NttManagerMessage<A> {
    /// The identifier of this message as seen from `chain_id`, which is the
    /// chain the message originates from. Used as the replay protection key.
    pub fn digest(&self, chain_id: crate::chain_id::ChainId) -> Result<[u8; 32], MessageError> {
        let encoded = crate::codec::encode(self)?;
        Ok(crate::hash::digest(chain_id, &encoded))
    }
}

impl<A: TypePrefixedPayload> TypePrefixedPayload for NttManagerMessage<A> {
    const TYPE: Option<u8> = None;
}

impl<A: Readable> Readable for NttManagerMessage<A> {
    const SIZE: Option<usize> = None;

    fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized,
        R: io::Read,
    {
        let id = Readable::read(reader)?;
        let sender = Readable::read(reader)?;
        let payload = read_prefixed(reader, |span| A::read(span))?;

        Ok(Self {
            id,
            sender,
            payload,
        })
    }
}

impl<A: Writeable> Writeable for NttManagerMessage<A> {
    fn written_size(&self) -> usize {
        self.id.len()
            + self.sender.len()
            + 2 // payload length
            + self.payload.written_size()
    }

    fn write<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        let NttManagerMessage {
            id,
            sender,
            payload,
        } = self;

        id.write(writer)?;
        sender.write(writer)?;
        let mut buf = Vec::with_capacity(payload.written_size());
        payload.write(&mut buf)?;
        write_prefixed_bytes(writer, &buf)
    }
}

/// Every payload a manager message may carry, told apart by its 4-byte prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerPayload {
    Transfer(NativeTokenTransfer),
    TransceiverInfo(WormholeTransceiverInfo),
    TransceiverRegistration(WormholeTransceiverRegistration),
}

impl ManagerPayload {
    pub fn prefix(&self) -> [u8; 4] {
        match self {
            ManagerPayload::Transfer(_) => NativeTokenTransfer::PREFIX,
            ManagerPayload::TransceiverInfo(_) => WormholeTransceiver::INFO_PREFIX,
            ManagerPayload::TransceiverRegistration(_) => WormholeTransceiver::PEER_INFO_PREFIX,
        }
    }

    pub fn as_transfer(&self) -> Option<&NativeTokenTransfer> {
        match self {
            ManagerPayload::Transfer(transfer) => Some(transfer),
            _ => None,
        }
    }
}

impl TypePrefixedPayload for ManagerPayload {
    const TYPE: Option<u8> = None;
}

impl Readable for ManagerPayload {
    const SIZE: Option<usize> = None;

    fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized,
        R: io::Read,
    {
        let prefix: [u8; 4] = Readable::read(reader)?;
        // hand the prefix back to the concrete decoder, which checks it again
        let mut rest = (&prefix[..]).chain(reader);
        match prefix {
            NativeTokenTransfer::PREFIX => Ok(Self::Transfer(Readable::read(&mut rest)?)),
            WormholeTransceiver::INFO_PREFIX => {
                Ok(Self::TransceiverInfo(Readable::read(&mut rest)?))
            }
            WormholeTransceiver::PEER_INFO_PREFIX => {
                Ok(Self::TransceiverRegistration(Readable::read(&mut rest)?))
            }
            other => Err(MessageError::UnknownPayload(other).into()),
        }
    }
}

impl Writeable for ManagerPayload {
    fn written_size(&self) -> usize {
        match self {
            ManagerPayload::Transfer(p) => p.written_size(),
            ManagerPayload::TransceiverInfo(p) => p.written_size(),
            ManagerPayload::TransceiverRegistration(p) => p.written_size(),
        }
    }

    fn write<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        match self {
            ManagerPayload::Transfer(p) => p.write(writer),
            ManagerPayload::TransceiverInfo(p) => p.write(writer),
            ManagerPayload::TransceiverRegistration(p) => p.write(writer),
        }
    }
}
