use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use ntt_messages::chain_id::ChainId;

use crate::{
    config::Config,
    error::{NTTError, Result},
    peer::{self, NttManagerPeer},
    queue::{
        inbox::{InboxItem, InboxRateLimit},
        outbox::{OutboxItem, OutboxRateLimit},
    },
    registered_transceiver::RegisteredTransceiver,
    sequence::Sequence,
};

/// Everything a manager persists. Instructions receive it by reference.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct NttManagerState {
    pub config: Config,
    pub sequence: Sequence,
    pub outbox_rate_limit: OutboxRateLimit,
    pub peers: BTreeMap<ChainId, NttManagerPeer>,
    pub inbox_rate_limits: BTreeMap<ChainId, InboxRateLimit>,
    /// Indexed by transceiver id.
    pub transceivers: Vec<RegisteredTransceiver>,
    /// Attestation ledger, keyed by message digest.
    pub inbox: BTreeMap<[u8; 32], InboxItem>,
    /// Outbound transfers, keyed by sequence.
    pub outbox: BTreeMap<u64, OutboxItem>,
}

impl NttManagerState {
    pub fn peer(&self, chain: ChainId) -> Result<&NttManagerPeer> {
        self.peers.get(&chain).ok_or(NTTError::InvalidPeer)
    }

    pub fn validate_inbound(
        &self,
        chain: ChainId,
        claimed_manager: &[u8; 32],
    ) -> Result<&NttManagerPeer> {
        peer::validate_inbound(&self.peers, chain, claimed_manager)
    }

    pub fn inbox_rate_limit(&self, chain: ChainId) -> Result<&InboxRateLimit> {
        self.inbox_rate_limits.get(&chain).ok_or(NTTError::InvalidPeer)
    }

    pub fn transceiver_by_address(&self, address: &[u8; 32]) -> Result<&RegisteredTransceiver> {
        self.transceivers
            .iter()
            .find(|transceiver| transceiver.transceiver_address == *address)
            .ok_or(NTTError::UnregisteredTransceiver)
    }

    /// The id of the transceiver at `address`, if it is registered and enabled.
    pub fn enabled_transceiver_id(&self, address: &[u8; 32]) -> Result<u8> {
        let id = self.transceiver_by_address(address)?.id;
        if !self.config.enabled_transceivers.get(id)? {
            return Err(NTTError::DisabledTransceiver);
        }
        Ok(id)
    }

    pub fn outbox_item(&self, sequence: u64) -> Result<&OutboxItem> {
        self.outbox
            .get(&sequence)
            .ok_or(NTTError::OutboxItemNotFound(sequence))
    }

    pub fn inbox_item(&self, digest: &[u8; 32]) -> Result<&InboxItem> {
        self.inbox.get(digest).ok_or(NTTError::InboxItemNotFound)
    }
}
