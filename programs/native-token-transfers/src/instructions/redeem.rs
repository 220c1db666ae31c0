use ntt_messages::{
    chain_id::ChainId, ntt::NativeTokenTransfer, transceiver::TransceiverMessageData,
};
use tracing::{debug, info};

use crate::{
    clock::UnixTimestamp,
    config::{Config, Pausable},
    custody::{credit, TokenCustody},
    error::{NTTError, Result},
    queue::{
        inbox::InboxItem,
        rate_limit::RateLimitState,
        release::{Advance, Limiters},
    },
};

use super::Context;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedeemArgs {
    pub source_chain: ChainId,
    pub message: TransceiverMessageData<NativeTokenTransfer>,
}

/// Where an inbound transfer stands after an attestation or release attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InboundStatus {
    /// Waiting for more attestations.
    NotApproved,
    /// Tokens were handed to the recipient by this call.
    Released,
    /// Approved, waiting for inbound capacity until the given timestamp.
    Queued(UnixTimestamp),
    /// Tokens were handed out by an earlier call. Nothing happened.
    AlreadyReleased,
}

impl From<Advance> for InboundStatus {
    fn from(advance: Advance) -> Self {
        match advance {
            Advance::Released => InboundStatus::Released,
            Advance::Queued(release_timestamp) => InboundStatus::Queued(release_timestamp),
            Advance::AlreadyReleased => InboundStatus::AlreadyReleased,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedeemOutcome {
    pub digest: [u8; 32],
    /// Attestations recorded so far, enabled or not.
    pub votes: u8,
    pub status: InboundStatus,
}

/// Tries to release an approved inbox item: consumes inbound capacity, refills
/// the outbound capacity, and credits the recipient. Operates on copies that the
/// caller writes back once this returns `Ok`.
pub(crate) fn release_inbox_item<T: TokenCustody + ?Sized>(
    item: &mut InboxItem,
    inbox_rate_limit: &mut RateLimitState,
    outbox_rate_limit: &mut RateLimitState,
    custody: &mut T,
    config: &Config,
    now: UnixTimestamp,
) -> Result<Advance> {
    let advance = item.release_status.advance(
        item.amount,
        now,
        Limiters {
            consume: inbox_rate_limit,
            backflow: Some(outbox_rate_limit),
        },
        true,
    )?;

    if advance == Advance::Released {
        let amount = item.amount.untrim(config.token_decimals)?;
        credit(custody, config.mode, &item.recipient_address, amount)?;
        info!(
            from_chain = %item.source_chain,
            recipient = %hex::encode(item.recipient_address),
            amount,
            "inbound transfer released"
        );
    }
    Ok(advance)
}

/// Records the attestation of the calling transceiver for a transfer message,
/// and releases the transfer once the threshold is met and capacity allows.
///
/// Redeeming a message whose transfer was already released succeeds without
/// doing anything, so delivery can be retried safely.
pub fn redeem<T: TokenCustody + ?Sized>(
    ctx: Context<'_, T>,
    args: RedeemArgs,
) -> Result<RedeemOutcome> {
    let state = ctx.state;
    state.config.require_not_paused()?;

    let transceiver_id = state.enabled_transceiver_id(&ctx.caller)?;

    let RedeemArgs {
        source_chain,
        message,
    } = args;

    state.validate_inbound(source_chain, &message.source_ntt_manager)?;
    if message.recipient_ntt_manager != state.config.address {
        return Err(NTTError::InvalidRecipientNttManager);
    }
    let transfer = &message.ntt_manager_payload.payload;
    if transfer.to_chain != state.config.chain_id {
        return Err(NTTError::InvalidChainId);
    }

    let digest = message.ntt_manager_payload.digest(source_chain)?;

    let mut item = match state.inbox.get(&digest) {
        Some(item) if item.release_status.is_released() => {
            debug!(digest = %hex::encode(digest), "transfer already released");
            return Ok(RedeemOutcome {
                digest,
                votes: item.votes.count_ones(),
                status: InboundStatus::AlreadyReleased,
            });
        }
        Some(item) => item.clone(),
        None => InboxItem::new(source_chain, transfer.amount, transfer.to),
    };

    let votes = item.attest(transceiver_id)?;
    debug!(
        digest = %hex::encode(digest),
        transceiver_id,
        votes,
        threshold = state.config.threshold,
        "attestation recorded"
    );

    if !item.try_approve(state.config.threshold, state.config.enabled_transceivers) {
        state.inbox.insert(digest, item);
        return Ok(RedeemOutcome {
            digest,
            votes,
            status: InboundStatus::NotApproved,
        });
    }

    let mut inbox_rate_limit = state.inbox_rate_limit(source_chain)?.clone();
    let mut outbox_rate_limit = state.outbox_rate_limit.clone();
    let advance = release_inbox_item(
        &mut item,
        &mut inbox_rate_limit.rate_limit,
        &mut outbox_rate_limit.rate_limit,
        ctx.custody,
        &state.config,
        ctx.now,
    )?;

    state.inbox.insert(digest, item);
    state.inbox_rate_limits.insert(source_chain, inbox_rate_limit);
    state.outbox_rate_limit = outbox_rate_limit;

    Ok(RedeemOutcome {
        digest,
        votes,
        status: advance.into(),
    })
}
