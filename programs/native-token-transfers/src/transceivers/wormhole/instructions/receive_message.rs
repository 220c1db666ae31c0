use ntt_messages::{
    codec::decode_exact, ntt::NativeTokenTransfer, transceiver::TransceiverMessage,
    transceivers::wormhole::WormholeTransceiver,
};
use tracing::warn;

use crate::{
    clock::UnixTimestamp,
    custody::TokenCustody,
    error::{NTTError, Result},
    instructions::{redeem, Context, RedeemArgs, RedeemOutcome},
    state::NttManagerState,
    transceivers::wormhole::accounts::{PostedMessage, WormholeTransceiverState},
};

/// Hands a verified Wormhole message to the manager as this transceiver's
/// attestation.
///
/// The bridge vouches for the bytes. What is checked here is that they were
/// emitted by the registered transceiver peer on the source chain. Replays are
/// handled by the manager, per message digest.
pub fn receive_message<T: TokenCustody + ?Sized>(
    transceiver: &WormholeTransceiverState,
    state: &mut NttManagerState,
    custody: &mut T,
    now: UnixTimestamp,
    vaa: &PostedMessage,
) -> Result<RedeemOutcome> {
    match transceiver.peers.get(&vaa.emitter_chain) {
        Some(peer) if peer.address == vaa.emitter_address => {}
        _ => {
            warn!(
                emitter_chain = %vaa.emitter_chain,
                emitter = %hex::encode(vaa.emitter_address),
                "message from unknown transceiver"
            );
            return Err(NTTError::InvalidTransceiverPeer);
        }
    }

    let message: TransceiverMessage<WormholeTransceiver, NativeTokenTransfer> =
        decode_exact(&vaa.payload)?;
    if message.ntt_manager_payload.payload.to_chain != state.config.chain_id {
        return Err(NTTError::InvalidChainId);
    }

    let (message, _transceiver_payload) = message.into_parts();
    redeem(
        Context {
            state,
            custody,
            caller: transceiver.address,
            now,
        },
        RedeemArgs {
            source_chain: vaa.emitter_chain,
            message,
        },
    )
}
