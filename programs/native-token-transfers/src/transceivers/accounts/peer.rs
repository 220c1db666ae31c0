use borsh::{BorshDeserialize, BorshSerialize};

/// A transceiver peer on another chain, keyed by its chain id.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransceiverPeer {
    pub address: [u8; 32],
}
