use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use ntt_messages::{chain_id::ChainId, codec::encode};
use thiserror::Error;
use wormhole_io::Writeable;

use crate::{
    error::{NTTError, Result},
    transceivers::accounts::peer::TransceiverPeer,
};

/// The Wormhole transceiver of one manager. Its `address` is the one the
/// manager has it registered under, and the emitter address peers know it by.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct WormholeTransceiverState {
    pub address: [u8; 32],
    pub peers: BTreeMap<ChainId, TransceiverPeer>,
}

impl WormholeTransceiverState {
    pub fn new(address: [u8; 32]) -> Self {
        Self {
            address,
            peers: BTreeMap::new(),
        }
    }

    pub fn peer(&self, chain_id: ChainId) -> Result<&TransceiverPeer> {
        self.peers
            .get(&chain_id)
            .ok_or(NTTError::InvalidTransceiverPeer)
    }
}

/// A message the core bridge has verified the guardian signatures of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostedMessage {
    pub emitter_chain: ChainId,
    pub emitter_address: [u8; 32],
    pub sequence: u64,
    pub payload: Vec<u8>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct PublishError(pub String);

/// The core bridge, as far as the transceiver is concerned.
pub trait WormholePublisher {
    /// Publishes `payload` and returns the sequence the bridge assigned to it.
    fn post_message(
        &mut self,
        payload: Vec<u8>,
        should_skip_relayer_send: bool,
    ) -> std::result::Result<u64, PublishError>;
}

pub fn post_message<P, A>(publisher: &mut P, payload: &A, should_skip_relayer_send: bool) -> Result<u64>
where
    P: WormholePublisher + ?Sized,
    A: Writeable,
{
    let payload = encode(payload)?;
    publisher
        .post_message(payload, should_skip_relayer_send)
        .map_err(|err| NTTError::Transport(err.to_string()))
}
