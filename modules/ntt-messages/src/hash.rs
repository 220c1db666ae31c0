use sha3::{Digest, Keccak256};

use crate::chain_id::ChainId;

pub fn keccak256(data: impl AsRef<[u8]>) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data.as_ref()));
    out
}

/// `keccak256(chain_id ‖ encoded_message)`, the replay protection key of an
/// encoded manager message originating on `chain_id`.
pub fn digest(chain_id: ChainId, encoded_message: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(chain_id.to_be_bytes());
    hasher.update(encoded_message);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}
