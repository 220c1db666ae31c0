use ntt_messages::chain_id::ChainId;
use tracing::info;

use crate::{
    config::Config,
    error::{NTTError, Result},
    transceivers::{accounts::peer::TransceiverPeer, wormhole::accounts::WormholeTransceiverState},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetTransceiverPeerArgs {
    pub chain_id: ChainId,
    pub address: [u8; 32],
}

/// Registers the Wormhole transceiver on `chain_id` whose messages are
/// accepted. Setting a peer again replaces it.
pub fn set_transceiver_peer(
    transceiver: &mut WormholeTransceiverState,
    config: &Config,
    caller: &[u8; 32],
    args: SetTransceiverPeerArgs,
) -> Result<()> {
    config.require_owner(caller)?;
    if args.chain_id == config.chain_id {
        return Err(NTTError::InvalidChainId);
    }
    if args.address == [0u8; 32] {
        return Err(NTTError::InvalidPeerZeroAddress);
    }

    info!(
        chain_id = %args.chain_id,
        address = %hex::encode(args.address),
        "transceiver peer set"
    );
    transceiver.peers.insert(
        args.chain_id,
        TransceiverPeer {
            address: args.address,
        },
    );
    Ok(())
}
