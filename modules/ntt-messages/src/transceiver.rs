use std::{fmt, io, marker::PhantomData};

use wormhole_io::{Readable, TypePrefixedPayload, Writeable};

use crate::{
    codec::{read_prefixed, read_prefixed_bytes, write_prefixed_bytes},
    errors::MessageError,
    ntt_manager::NttManagerMessage,
};

/// A transport channel. The prefix tags every envelope it carries.
pub trait Transceiver {
    const PREFIX: [u8; 4];
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TransceiverMessageData<A> {
    pub source_ntt_manager: [u8; 32],
    pub recipient_ntt_manager: [u8; 32],
    pub ntt_manager_payload: NttManagerMessage<A>,
}

/// A manager message wrapped for transport over transceiver `E`.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct TransceiverMessage<E: Transceiver, A> {
    _phantom: PhantomData<E>,
    pub message_data: TransceiverMessageData<A>,
    pub transceiver_payload: Vec<u8>,
}

impl<E: Transceiver, A> std::ops::Deref for TransceiverMessage<E, A> {
    type Target = TransceiverMessageData<A>;

    fn deref(&self) -> &Self::Target {
        &self.message_data
    }
}

impl<E: Transceiver, A> std::ops::DerefMut for TransceiverMessage<E, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.message_data
    }
}

impl<E: Transceiver, A> TransceiverMessage<E, A> {
    pub fn new(
        source_ntt_manager: [u8; 32],
        recipient_ntt_manager: [u8; 32],
        ntt_manager_payload: NttManagerMessage<A>,
        transceiver_payload: Vec<u8>,
    ) -> Self {
        Self {
            _phantom: PhantomData,
            message_data: TransceiverMessageData {
                source_ntt_manager,
                recipient_ntt_manager,
                ntt_manager_payload,
            },
            transceiver_payload,
        }
    }

    pub fn into_parts(self) -> (TransceiverMessageData<A>, Vec<u8>) {
        (self.message_data, self.transceiver_payload)
    }
}

impl<E, A> TypePrefixedPayload for TransceiverMessage<E, A>
where
    E: Transceiver + Clone + fmt::Debug,
    A: Readable + Writeable + Clone + fmt::Debug,
{
    const TYPE: Option<u8> = None;
}

impl<E: Transceiver, A: Readable> Readable for TransceiverMessage<E, A> {
    const SIZE: Option<usize> = None;

    fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized,
        R: io::Read,
    {
        let prefix: [u8; 4] = Readable::read(reader)?;
        if prefix != E::PREFIX {
            return Err(MessageError::IncorrectPrefix {
                expected: E::PREFIX,
                actual: prefix,
            }
            .into());
        }

        let source_ntt_manager = Readable::read(reader)?;
        let recipient_ntt_manager = Readable::read(reader)?;
        let ntt_manager_payload = read_prefixed(reader, |span| NttManagerMessage::read(span))?;
        let transceiver_payload = read_prefixed_bytes(reader)?;

        Ok(TransceiverMessage::new(
            source_ntt_manager,
            recipient_ntt_manager,
            ntt_manager_payload,
            transceiver_payload,
        ))
    }
}

impl<E: Transceiver, A: Writeable> Writeable for TransceiverMessage<E, A> {
    fn written_size(&self) -> usize {
        4 // prefix
        + self.source_ntt_manager.len()
        + self.recipient_ntt_manager.len()
        + 2 // manager payload length
        + self.ntt_manager_payload.written_size()
        + 2 // transceiver payload length
        + self.transceiver_payload.len()
    }

    fn write<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        let TransceiverMessage {
            _phantom,
            message_data:
                TransceiverMessageData {
                    source_ntt_manager,
                    recipient_ntt_manager,
                    ntt_manager_payload,
                },
            transceiver_payload,
        } = self;

        E::PREFIX.write(writer)?;
        source_ntt_manager.write(writer)?;
        recipient_ntt_manager.write(writer)?;
        let mut buf = Vec::with_capacity(ntt_manager_payload.written_size());
        ntt_manager_payload.write(&mut buf)?;
        write_prefixed_bytes(writer, &buf)?;
        write_prefixed_bytes(writer, transceiver_payload)
    }
}
