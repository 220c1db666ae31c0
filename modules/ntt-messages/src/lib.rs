//! Wire formats shared by every native token transfer manager and transceiver:
//! trimmed amounts, the transfer payload, the manager and transceiver
//! envelopes, transceiver instructions, and the message digest.

pub mod chain_id;
pub mod codec;
pub mod errors;
#[cfg(feature = "hash")]
pub mod hash;
pub mod mode;
pub mod ntt;
pub mod ntt_manager;
pub mod transceiver;
pub mod transceiver_instructions;
pub mod transceivers;
pub mod trimmed_amount;
