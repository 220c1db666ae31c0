use ntt_messages::{
    chain_id::ChainId, codec::decode_exact, errors::ScalingError,
    transceiver_instructions::TransceiverInstructions, trimmed_amount::TrimmedAmount,
};
use tracing::info;

use crate::{
    bitmap::Bitmap,
    config::{DustPolicy, Pausable},
    custody::{debit, TokenCustody},
    error::{NTTError, Result},
    queue::{
        outbox::OutboxItem,
        release::{Advance, Limiters, ReleaseStatus},
    },
};

use super::Context;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferArgs {
    /// In the token's native decimals.
    pub amount: u64,
    pub recipient_chain: ChainId,
    pub recipient_address: [u8; 32],
    /// Queue the transfer instead of failing when the outbound limit is hit.
    pub should_queue: bool,
    /// Encoded [`TransceiverInstructions`]. Empty means no instructions.
    pub transceiver_instructions: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferOutcome {
    pub sequence: u64,
    /// [`Advance::Released`] or [`Advance::Queued`].
    pub status: Advance,
    /// Taken from the sender, in native decimals.
    pub debited: u64,
    /// Left with the sender because the destination cannot represent it.
    pub dust: u64,
    pub trimmed_amount: TrimmedAmount,
}

fn parse_instructions(bytes: &[u8], registered: u8) -> Result<TransceiverInstructions> {
    if bytes.is_empty() {
        return Ok(TransceiverInstructions::empty());
    }
    let instructions: TransceiverInstructions = decode_exact(bytes)?;
    if let Some(index) = instructions.max_index() {
        if index >= registered {
            return Err(NTTError::InvalidInstructionIndex { index });
        }
    }
    Ok(instructions)
}

/// Takes the tokens from `ctx.caller` and records an outbound transfer.
///
/// The transfer either consumes outbound capacity right away, refilling the
/// inbound capacity from the recipient chain by the same amount, or is queued
/// for one rate limit duration when `should_queue` is set. Tokens are taken in
/// both cases.
pub fn transfer<T: TokenCustody + ?Sized>(
    ctx: Context<'_, T>,
    args: TransferArgs,
) -> Result<TransferOutcome> {
    let state = ctx.state;
    state.config.require_not_paused()?;

    let TransferArgs {
        amount,
        recipient_chain,
        recipient_address,
        should_queue,
        transceiver_instructions,
    } = args;

    if amount == 0 {
        return Err(NTTError::ZeroAmount);
    }
    if recipient_address == [0u8; 32] {
        return Err(NTTError::InvalidRecipientAddress);
    }
    if recipient_chain == state.config.chain_id {
        return Err(NTTError::InvalidChainId);
    }

    let peer = state.peer(recipient_chain)?;
    let recipient_ntt_manager = peer.address;
    let peer_decimals = peer.token_decimals;
    let transceiver_instructions =
        parse_instructions(&transceiver_instructions, state.config.next_transceiver_id)?;

    let decimals = state.config.token_decimals;
    let mut debited = amount;
    let trimmed_amount = match state.config.dust_policy {
        DustPolicy::Reject => TrimmedAmount::trim_exact(amount, decimals, peer_decimals)
            .map_err(|err| match err {
                ScalingError::AmountHasDust { dust } => NTTError::AmountHasDust { dust },
                other => other.into(),
            })?,
        DustPolicy::Truncate => TrimmedAmount::remove_dust(&mut debited, decimals, peer_decimals)?,
    };
    if trimmed_amount.is_zero() {
        return Err(NTTError::ZeroAmount);
    }

    let mut outbox_rate_limit = state.outbox_rate_limit.clone();
    let mut inbox_rate_limit = state.inbox_rate_limit(recipient_chain)?.clone();
    let mut release_status = ReleaseStatus::Initiated;
    let status = release_status.advance(
        trimmed_amount,
        ctx.now,
        Limiters {
            consume: &mut outbox_rate_limit.rate_limit,
            backflow: Some(&mut inbox_rate_limit.rate_limit),
        },
        should_queue,
    )?;

    let mut next_sequence = state.sequence.clone();
    let sequence = next_sequence.next()?;

    debit(ctx.custody, state.config.mode, &ctx.caller, debited)?;

    state.sequence = next_sequence;
    state.outbox_rate_limit = outbox_rate_limit;
    state.inbox_rate_limits.insert(recipient_chain, inbox_rate_limit);
    state.outbox.insert(
        sequence,
        OutboxItem {
            sequence,
            amount: trimmed_amount,
            sender: ctx.caller,
            recipient_chain,
            recipient_ntt_manager,
            recipient_address,
            release_status,
            released: Bitmap::new(),
            transceiver_instructions,
            cancelled: false,
        },
    );

    info!(
        sequence,
        to_chain = %recipient_chain,
        amount = trimmed_amount.amount,
        decimals = trimmed_amount.decimals,
        ?status,
        "outbound transfer"
    );

    Ok(TransferOutcome {
        sequence,
        status,
        debited,
        dust: amount - debited,
        trimmed_amount,
    })
}
