use std::ops::{Deref, DerefMut};

use borsh::{BorshDeserialize, BorshSerialize};
use ntt_messages::{
    chain_id::ChainId, ntt::NativeTokenTransfer, ntt_manager::NttManagerMessage,
    transceiver_instructions::TransceiverInstructions, trimmed_amount::TrimmedAmount,
};

use crate::{
    bitmap::Bitmap,
    error::{NTTError, Result},
};

use super::{rate_limit::RateLimitState, release::ReleaseStatus};

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct OutboxItem {
    pub sequence: u64,
    pub amount: TrimmedAmount,
    pub sender: [u8; 32],
    pub recipient_chain: ChainId,
    pub recipient_ntt_manager: [u8; 32],
    pub recipient_address: [u8; 32],
    pub release_status: ReleaseStatus,
    /// Transceivers that have picked the message up.
    pub released: Bitmap,
    pub transceiver_instructions: TransceiverInstructions,
    pub cancelled: bool,
}

impl OutboxItem {
    /// Marks the message as picked up by `transceiver_index`.
    /// Returns false if the transfer has not cleared the rate limiter yet.
    pub fn try_release(&mut self, transceiver_index: u8) -> Result<bool> {
        if self.cancelled {
            return Err(NTTError::TransferCancelled);
        }

        if !self.release_status.is_released() {
            return Ok(false);
        }

        if self.released.get(transceiver_index)? {
            return Err(NTTError::MessageAlreadySent);
        }

        self.released.set(transceiver_index, true)?;

        Ok(true)
    }

    /// Whether every transceiver in `enabled` has picked the message up.
    pub fn is_fully_released(&self, enabled: Bitmap) -> bool {
        self.release_status.is_released() && self.released.contains_all(enabled)
    }

    pub fn message(&self, source_token: [u8; 32]) -> NttManagerMessage<NativeTokenTransfer> {
        NttManagerMessage {
            id: NttManagerMessage::<NativeTokenTransfer>::id_from_sequence(self.sequence),
            sender: self.sender,
            payload: NativeTokenTransfer {
                amount: self.amount,
                source_token,
                to: self.recipient_address,
                to_chain: self.recipient_chain,
            },
        }
    }
}

/// Global rate limit for all outbound transfers to all chains.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct OutboxRateLimit {
    pub rate_limit: RateLimitState,
}

impl Deref for OutboxRateLimit {
    type Target = RateLimitState;

    fn deref(&self) -> &Self::Target {
        &self.rate_limit
    }
}

impl DerefMut for OutboxRateLimit {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.rate_limit
    }
}
