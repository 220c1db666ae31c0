#[cfg(feature = "borsh")]
use borsh::{BorshDeserialize, BorshSerialize};

use std::io;

use wormhole_io::{Readable, TypePrefixedPayload, Writeable};

use crate::{chain_id::ChainId, errors::MessageError, trimmed_amount::TrimmedAmount};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
pub struct NativeTokenTransfer {
    pub amount: TrimmedAmount,
    pub source_token: [u8; 32],
    pub to: [u8; 32],
    pub to_chain: ChainId,
}

impl NativeTokenTransfer {
    pub const PREFIX: [u8; 4] = [0x99, 0x4E, 0x54, 0x54];

    pub const WRITTEN_SIZE: usize = 4 + (1 + 8) + 32 + 32 + 2;
}

impl TypePrefixedPayload for NativeTokenTransfer {
    const TYPE: Option<u8> = None;
}

impl Readable for NativeTokenTransfer {
    const SIZE: Option<usize> = Some(Self::WRITTEN_SIZE);

    fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized,
        R: io::Read,
    {
        let prefix: [u8; 4] = Readable::read(reader)?;
        if prefix != Self::PREFIX {
            return Err(MessageError::IncorrectPrefix {
                expected: Self::PREFIX,
                actual: prefix,
            }
            .into());
        }

        let amount = Readable::read(reader)?;
        let source_token = Readable::read(reader)?;
        let to = Readable::read(reader)?;
        let to_chain = Readable::read(reader)?;

        Ok(Self {
            amount,
            source_token,
            to,
            to_chain,
        })
    }
}

impl Writeable for NativeTokenTransfer {
    fn written_size(&self) -> usize {
        Self::WRITTEN_SIZE
    }

    fn write<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        let NativeTokenTransfer {
            amount,
            source_token,
            to,
            to_chain,
        } = self;

        Self::PREFIX.write(writer)?;
        amount.write(writer)?;
        source_token.write(writer)?;
        to.write(writer)?;
        to_chain.write(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::{decode_exact, encode};

    fn transfer() -> NativeTokenTransfer {
        let mut source_token = [0u8; 32];
        source_token[..4].copy_from_slice(&[0xBE, 0xEF, 0xFA, 0xCE]);
        let mut to = [0u8; 32];
        to[..4].copy_from_slice(&[0xFE, 0xEB, 0xCA, 0xFE]);
        NativeTokenTransfer {
            amount: TrimmedAmount::new(1234567, 7),
            source_token,
            to,
            to_chain: ChainId { id: 17 },
        }
    }

    #[test]
    fn test_native_token_transfer_wire_format() {
        let encoded = encode(&transfer()).unwrap();
        assert_eq!(
            hex::encode(&encoded),
            concat!(
                "994e5454",
                "07000000000012d687",
                "beefface00000000000000000000000000000000000000000000000000000000",
                "feebcafe00000000000000000000000000000000000000000000000000000000",
                "0011"
            )
        );
        assert_eq!(encoded.len(), NativeTokenTransfer::WRITTEN_SIZE);
        assert_eq!(decode_exact::<NativeTokenTransfer>(&encoded).unwrap(), transfer());
    }

    #[test]
    fn test_native_token_transfer_bad_prefix() {
        let mut encoded = encode(&transfer()).unwrap();
        encoded[0] = 0x98;
        assert_eq!(
            decode_exact::<NativeTokenTransfer>(&encoded),
            Err(MessageError::IncorrectPrefix {
                expected: NativeTokenTransfer::PREFIX,
                actual: [0x98, 0x4E, 0x54, 0x54],
            })
        );
    }

    #[test]
    fn test_native_token_transfer_truncated() {
        let encoded = encode(&transfer()).unwrap();
        assert_eq!(
            decode_exact::<NativeTokenTransfer>(&encoded[..encoded.len() - 1]),
            Err(MessageError::UnexpectedEnd)
        );
    }
}
