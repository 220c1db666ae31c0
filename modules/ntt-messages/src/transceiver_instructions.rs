//! Per-transceiver instructions attached to a transfer.
//!
//! Layout: `count: u8`, then for every entry `index: u8 | len: u8 | payload`.
//! Entries are sorted by strictly increasing index, so an instruction list has
//! exactly one encoding.

use std::io;

#[cfg(feature = "borsh")]
use borsh::{BorshDeserialize, BorshSerialize};

use wormhole_io::{Readable, TypePrefixedPayload, Writeable};

use crate::errors::MessageError;

pub const MAX_INSTRUCTIONS: usize = u8::MAX as usize;
pub const MAX_INSTRUCTION_PAYLOAD: usize = u8::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
pub struct TransceiverInstruction {
    pub index: u8,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
pub struct TransceiverInstructions(Vec<TransceiverInstruction>);

impl TransceiverInstructions {
    pub fn new(instructions: Vec<TransceiverInstruction>) -> Result<Self, MessageError> {
        if instructions.len() > MAX_INSTRUCTIONS {
            return Err(MessageError::TooManyInstructions(instructions.len()));
        }
        let mut previous: Option<u8> = None;
        for instruction in &instructions {
            if instruction.payload.len() > MAX_INSTRUCTION_PAYLOAD {
                return Err(MessageError::PayloadTooLong {
                    len: instruction.payload.len(),
                    max: MAX_INSTRUCTION_PAYLOAD,
                });
            }
            if let Some(previous) = previous {
                if instruction.index <= previous {
                    return Err(MessageError::UnorderedInstructions {
                        previous,
                        current: instruction.index,
                    });
                }
            }
            previous = Some(instruction.index);
        }
        Ok(Self(instructions))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransceiverInstruction> {
        self.0.iter()
    }

    /// The instruction payload addressed to transceiver `index`, if any.
    pub fn get(&self, index: u8) -> Option<&[u8]> {
        self.0
            .binary_search_by_key(&index, |instruction| instruction.index)
            .ok()
            .map(|position| self.0[position].payload.as_slice())
    }

    pub fn max_index(&self) -> Option<u8> {
        self.0.last().map(|instruction| instruction.index)
    }
}

impl TypePrefixedPayload for TransceiverInstructions {
    const TYPE: Option<u8> = None;
}

impl Readable for TransceiverInstructions {
    const SIZE: Option<usize> = None;

    fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized,
        R: io::Read,
    {
        let count: u8 = Readable::read(reader)?;
        let mut instructions = Vec::with_capacity(count.into());
        for _ in 0..count {
            let index: u8 = Readable::read(reader)?;
            let len: u8 = Readable::read(reader)?;
            let mut payload = vec![0u8; len.into()];
            reader.read_exact(&mut payload)?;
            instructions.push(TransceiverInstruction { index, payload });
        }
        Ok(Self::new(instructions)?)
    }
}

impl Writeable for TransceiverInstructions {
    fn written_size(&self) -> usize {
        1 + self
            .0
            .iter()
            .map(|instruction| 2 + instruction.payload.len())
            .sum::<usize>()
    }

    fn write<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        let count = u8::try_from(self.0.len())
            .map_err(|_| MessageError::TooManyInstructions(self.0.len()))?;
        count.write(writer)?;
        for TransceiverInstruction { index, payload } in &self.0 {
            let len = u8::try_from(payload.len()).map_err(|_| MessageError::PayloadTooLong {
                len: payload.len(),
                max: MAX_INSTRUCTION_PAYLOAD,
            })?;
            index.write(writer)?;
            len.write(writer)?;
            writer.write_all(payload)?;
        }
        Ok(())
    }
}
