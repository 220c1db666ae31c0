use ntt_messages::{chain_id::ChainId, transceivers::wormhole::WormholeTransceiverRegistration};

use crate::{
    error::Result,
    transceivers::wormhole::accounts::{post_message, WormholePublisher, WormholeTransceiverState},
};

/// Announces the registered transceiver peer on `chain_id`.
pub fn broadcast_peer<P: WormholePublisher + ?Sized>(
    transceiver: &WormholeTransceiverState,
    chain_id: ChainId,
    publisher: &mut P,
) -> Result<u64> {
    let message = WormholeTransceiverRegistration {
        chain_id,
        transceiver_address: transceiver.peer(chain_id)?.address,
    };

    post_message(publisher, &message, true)
}
