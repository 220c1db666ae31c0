use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use ntt_messages::chain_id::ChainId;

use crate::error::{NTTError, Result};

/// A peer manager on another chain, keyed by its chain id.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct NttManagerPeer {
    pub address: [u8; 32],
    pub token_decimals: u8,
}

/// Checks that `claimed_manager` is the registered peer for `chain`.
///
/// The attestation threshold only proves that a message was attested. This
/// check proves it was attested as coming from the registered counterpart,
/// and both are required before a transfer is accepted.
pub fn validate_inbound<'a>(
    peers: &'a BTreeMap<ChainId, NttManagerPeer>,
    chain: ChainId,
    claimed_manager: &[u8; 32],
) -> Result<&'a NttManagerPeer> {
    match peers.get(&chain) {
        Some(peer) if peer.address == *claimed_manager => Ok(peer),
        _ => Err(NTTError::InvalidPeer),
    }
}
