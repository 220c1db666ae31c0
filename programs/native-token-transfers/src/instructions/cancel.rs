use tracing::info;

use crate::{
    config::Pausable,
    custody::{credit, TokenCustody},
    error::{NTTError, Result},
    queue::release::ReleaseStatus,
};

use super::Context;

/// Cancels a queued outbound transfer and returns the tokens to its sender.
/// Only the sender may cancel, and only while the transfer is queued.
///
/// Returns the refunded amount in native decimals. The dust kept back at
/// transfer time never left the sender, so the refund is the dust-free amount.
pub fn cancel_outbound<T: TokenCustody + ?Sized>(ctx: Context<'_, T>, sequence: u64) -> Result<u64> {
    let state = ctx.state;
    state.config.require_not_paused()?;

    let mut item = state.outbox_item(sequence)?.clone();
    if item.sender != ctx.caller {
        return Err(NTTError::CancellerNotSender);
    }
    if item.cancelled {
        return Err(NTTError::TransferCancelled);
    }
    if !matches!(item.release_status, ReleaseStatus::Queued(_)) {
        return Err(NTTError::TransferNotQueued);
    }

    let refund = item.amount.untrim(state.config.token_decimals)?;
    credit(ctx.custody, state.config.mode, &item.sender, refund)?;

    item.cancelled = true;
    state.outbox.insert(sequence, item);

    info!(sequence, refund, "outbound transfer cancelled");
    Ok(refund)
}
