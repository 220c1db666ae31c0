use ntt_messages::{
    chain_id::ChainId, ntt::NativeTokenTransfer, ntt_manager::NttManagerMessage,
};
use tracing::info;

use crate::{
    config::Pausable,
    custody::TokenCustody,
    error::{NTTError, Result},
    queue::release::{Advance, Limiters, ReleaseStatus},
};

use super::Context;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReleaseOutboundArgs {
    pub sequence: u64,
    /// Fail with [`NTTError::CantReleaseYet`] instead of returning `None` when
    /// the transfer stays queued.
    pub revert_on_delay: bool,
}

/// What a transceiver has to send for one outbound transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundRelease {
    pub message: NttManagerMessage<NativeTokenTransfer>,
    pub recipient_chain: ChainId,
    pub recipient_ntt_manager: [u8; 32],
    /// The instruction the sender attached for this transceiver, if any.
    pub transceiver_instruction: Option<Vec<u8>>,
}

/// Hands an outbound transfer to the calling transceiver, which must be
/// registered and enabled. Each transceiver gets a transfer exactly once.
///
/// A queued transfer whose time has come is released first, which consumes
/// outbound capacity at this point. Returns `None` if it stays queued.
pub fn release_outbound<T: TokenCustody + ?Sized>(
    ctx: Context<'_, T>,
    args: ReleaseOutboundArgs,
) -> Result<Option<OutboundRelease>> {
    let state = ctx.state;
    state.config.require_not_paused()?;

    let transceiver_id = state.enabled_transceiver_id(&ctx.caller)?;
    let mut item = state.outbox_item(args.sequence)?.clone();
    if item.cancelled {
        return Err(NTTError::TransferCancelled);
    }

    let mut outbox_rate_limit = state.outbox_rate_limit.clone();
    let mut inbox_rate_limit = state.inbox_rate_limit(item.recipient_chain)?.clone();
    if let ReleaseStatus::Queued(_) = item.release_status {
        let advance = item.release_status.advance(
            item.amount,
            ctx.now,
            Limiters {
                consume: &mut outbox_rate_limit.rate_limit,
                backflow: Some(&mut inbox_rate_limit.rate_limit),
            },
            true,
        )?;
        if let Advance::Queued(release_timestamp) = advance {
            if args.revert_on_delay {
                return Err(NTTError::CantReleaseYet);
            }
            info!(sequence = item.sequence, release_timestamp, "outbound transfer still queued");
            state.outbox.insert(args.sequence, item);
            return Ok(None);
        }
    }

    if !item.try_release(transceiver_id)? {
        return Err(NTTError::CantReleaseYet);
    }

    let release = OutboundRelease {
        message: item.message(state.config.token_address),
        recipient_chain: item.recipient_chain,
        recipient_ntt_manager: item.recipient_ntt_manager,
        transceiver_instruction: item
            .transceiver_instructions
            .get(transceiver_id)
            .map(<[u8]>::to_vec),
    };

    info!(
        sequence = item.sequence,
        transceiver_id,
        fully_released = item.is_fully_released(state.config.enabled_transceivers),
        "outbound transfer released to transceiver"
    );

    state.outbox.insert(args.sequence, item);
    state.outbox_rate_limit = outbox_rate_limit;
    state.inbox_rate_limits.insert(release.recipient_chain, inbox_rate_limit);
    Ok(Some(release))
}
