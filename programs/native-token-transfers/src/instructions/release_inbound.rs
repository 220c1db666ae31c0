use crate::{
    config::Pausable,
    custody::TokenCustody,
    error::{NTTError, Result},
};

use super::{redeem::release_inbox_item, Context, InboundStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReleaseInboundArgs {
    pub digest: [u8; 32],
    /// Fail with [`NTTError::CantReleaseYet`] instead of succeeding when the
    /// transfer stays queued.
    pub revert_on_delay: bool,
}

/// Releases an approved inbound transfer whose queue time has passed. Anyone
/// may call this.
pub fn release_inbound<T: TokenCustody + ?Sized>(
    ctx: Context<'_, T>,
    args: ReleaseInboundArgs,
) -> Result<InboundStatus> {
    let state = ctx.state;
    state.config.require_not_paused()?;

    let mut item = state.inbox_item(&args.digest)?.clone();
    if item.release_status.is_released() {
        return Ok(InboundStatus::AlreadyReleased);
    }
    // votes may meet a threshold lowered after the last attestation
    if !item.try_approve(state.config.threshold, state.config.enabled_transceivers) {
        return Err(NTTError::TransferNotApproved);
    }

    let mut inbox_rate_limit = state.inbox_rate_limit(item.source_chain)?.clone();
    let mut outbox_rate_limit = state.outbox_rate_limit.clone();
    let status: InboundStatus = release_inbox_item(
        &mut item,
        &mut inbox_rate_limit.rate_limit,
        &mut outbox_rate_limit.rate_limit,
        ctx.custody,
        &state.config,
        ctx.now,
    )?
    .into();

    if args.revert_on_delay && matches!(status, InboundStatus::Queued(_)) {
        return Err(NTTError::CantReleaseYet);
    }

    state.inbox_rate_limits.insert(item.source_chain, inbox_rate_limit);
    state.inbox.insert(args.digest, item);
    state.outbox_rate_limit = outbox_rate_limit;
    Ok(status)
}
