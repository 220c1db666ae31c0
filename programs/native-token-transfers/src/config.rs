use borsh::{BorshDeserialize, BorshSerialize};
use ntt_messages::{chain_id::ChainId, mode::Mode};
use serde::{Deserialize, Serialize};

use crate::{
    bitmap::Bitmap,
    clock::UnixTimestamp,
    error::{NTTError, Result},
};

/// What to do with the digits of an outbound amount that do not survive
/// trimming.
#[derive(
    BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq,
)]
#[serde(rename_all = "lowercase")]
pub enum DustPolicy {
    /// Refuse the transfer with [`NTTError::AmountHasDust`].
    Reject,
    /// Transfer the dust-free amount and leave the dust with the sender.
    #[default]
    Truncate,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Address of this manager, as peers on other chains know it.
    pub address: [u8; 32],
    /// Owner of the manager.
    pub owner: [u8; 32],
    /// Pending next owner (before claiming ownership).
    pub pending_owner: Option<[u8; 32]>,
    /// Address of the token managed by this manager.
    pub token_address: [u8; 32],
    /// Decimals of the token on this chain.
    pub token_decimals: u8,
    /// Whether outbound tokens are burned or locked.
    pub mode: Mode,
    /// The chain id of the chain this manager runs on.
    pub chain_id: ChainId,
    /// The next transceiver id to use when registering a transceiver.
    pub next_transceiver_id: u8,
    /// The number of transceivers that must attest to a transfer before it is
    /// accepted.
    pub threshold: u8,
    /// Bitmap of enabled transceivers
    pub enabled_transceivers: Bitmap,
    /// Pause the manager. Configuration stays readable and writable.
    pub paused: bool,
    pub dust_policy: DustPolicy,
    /// Seconds a bucket takes to refill from empty, and the queueing delay.
    pub rate_limit_duration: UnixTimestamp,
}

pub trait Pausable {
    fn is_paused(&self) -> bool;

    fn require_not_paused(&self) -> Result<()> {
        if self.is_paused() {
            return Err(NTTError::Paused);
        }
        Ok(())
    }
}

impl Pausable for Config {
    fn is_paused(&self) -> bool {
        self.paused
    }
}

impl Config {
    pub fn require_owner(&self, caller: &[u8; 32]) -> Result<()> {
        if self.owner != *caller {
            return Err(NTTError::InvalidOwner);
        }
        Ok(())
    }

    pub fn enabled_count(&self) -> u8 {
        self.enabled_transceivers.count_ones()
    }
}
