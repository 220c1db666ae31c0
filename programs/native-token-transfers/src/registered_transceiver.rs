use borsh::{BorshDeserialize, BorshSerialize};

/// A transceiver known to the manager. Ids are handed out in registration
/// order and index the enabled and vote bitmaps.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RegisteredTransceiver {
    pub id: u8,
    pub transceiver_address: [u8; 32],
}
