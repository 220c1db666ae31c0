use ntt_messages::{
    codec::decode_exact, ntt::NativeTokenTransfer, transceiver::TransceiverMessage,
    transceivers::wormhole::{WormholeTransceiver, WormholeTransceiverInstruction},
};
use tracing::info;

use crate::{
    clock::UnixTimestamp,
    custody::TokenCustody,
    error::Result,
    instructions::{self, Context, ReleaseOutboundArgs},
    state::NttManagerState,
    transceivers::wormhole::accounts::{post_message, WormholePublisher, WormholeTransceiverState},
};

/// Picks up an outbound transfer for this transceiver and publishes it.
/// Returns the bridge sequence, or `None` if the transfer is still queued.
///
/// The manager state is only updated once the bridge accepted the message.
pub fn release_outbound<T, P>(
    transceiver: &WormholeTransceiverState,
    state: &mut NttManagerState,
    custody: &mut T,
    publisher: &mut P,
    now: UnixTimestamp,
    args: ReleaseOutboundArgs,
) -> Result<Option<u64>>
where
    T: TokenCustody + ?Sized,
    P: WormholePublisher + ?Sized,
{
    let mut staged = state.clone();
    let Some(release) = instructions::release_outbound(
        Context {
            state: &mut staged,
            custody,
            caller: transceiver.address,
            now,
        },
        args,
    )?
    else {
        *state = staged;
        return Ok(None);
    };

    let instruction = match &release.transceiver_instruction {
        Some(bytes) => decode_exact::<WormholeTransceiverInstruction>(bytes)?,
        None => WormholeTransceiverInstruction::default(),
    };

    let message: TransceiverMessage<WormholeTransceiver, NativeTokenTransfer> =
        TransceiverMessage::new(
            staged.config.address,
            release.recipient_ntt_manager,
            release.message,
            Vec::new(),
        );
    let wormhole_sequence =
        post_message(publisher, &message, instruction.should_skip_relayer_send)?;

    info!(
        sequence = args.sequence,
        wormhole_sequence,
        to_chain = %release.recipient_chain,
        "transfer published"
    );

    *state = staged;
    Ok(Some(wormhole_sequence))
}
