use std::io;

use ntt_messages::{chain_id::ChainId, errors::MessageError, trimmed_amount::TrimmedAmount};
use tracing::info;
use wormhole_io::{Readable, Writeable};

use crate::{
    bitmap::Bitmap,
    custody::TokenCustody,
    error::{NTTError, Result},
    peer::NttManagerPeer,
    queue::{inbox::InboxRateLimit, rate_limit::RateLimitState},
    registered_transceiver::RegisteredTransceiver,
};

use super::Context;

// * Transfer ownership

/// Starts a two step ownership transfer. The new owner has to call
/// [`claim_ownership`].
pub fn transfer_ownership<T: ?Sized>(ctx: Context<'_, T>, new_owner: [u8; 32]) -> Result<()> {
    ctx.state.config.require_owner(&ctx.caller)?;
    ctx.state.config.pending_owner = Some(new_owner);
    Ok(())
}

// * Claim ownership

pub fn claim_ownership<T: ?Sized>(ctx: Context<'_, T>) -> Result<()> {
    let config = &mut ctx.state.config;
    if config.pending_owner != Some(ctx.caller) {
        return Err(NTTError::InvalidPendingOwner);
    }
    info!(old = %hex::encode(config.owner), new = %hex::encode(ctx.caller), "ownership claimed");
    config.owner = ctx.caller;
    config.pending_owner = None;
    Ok(())
}

// * Set peers

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetPeerArgs {
    pub chain_id: ChainId,
    pub address: [u8; 32],
    /// Inbound limit from this peer, in the token's native decimals.
    pub limit: u64,
    /// The token decimals on the peer chain.
    pub token_decimals: u8,
}

pub fn set_peer<T: ?Sized>(ctx: Context<'_, T>, args: SetPeerArgs) -> Result<()> {
    let state = ctx.state;
    state.config.require_owner(&ctx.caller)?;

    if args.chain_id == state.config.chain_id {
        return Err(NTTError::InvalidChainId);
    }
    if args.address == [0u8; 32] {
        return Err(NTTError::InvalidPeerZeroAddress);
    }
    if args.token_decimals == 0 {
        return Err(NTTError::InvalidPeerDecimals);
    }

    let decimals = state.config.token_decimals;
    let limit = TrimmedAmount::trim(args.limit, decimals, decimals)?;

    let mut inbox_rate_limit = state
        .inbox_rate_limits
        .get(&args.chain_id)
        .cloned()
        .unwrap_or_else(|| InboxRateLimit {
            rate_limit: RateLimitState::new(limit, ctx.now, state.config.rate_limit_duration),
        });
    inbox_rate_limit.set_limit(limit, ctx.now)?;

    info!(
        chain_id = %args.chain_id,
        address = %hex::encode(args.address),
        token_decimals = args.token_decimals,
        "peer set"
    );

    state.peers.insert(
        args.chain_id,
        NttManagerPeer {
            address: args.address,
            token_decimals: args.token_decimals,
        },
    );
    state.inbox_rate_limits.insert(args.chain_id, inbox_rate_limit);
    Ok(())
}

// * Transceiver registration

/// Registers and enables the transceiver at `address`, returning its id.
/// Registering a known transceiver enables it again under its old id.
pub fn register_transceiver<T: ?Sized>(ctx: Context<'_, T>, address: [u8; 32]) -> Result<u8> {
    let state = ctx.state;
    state.config.require_owner(&ctx.caller)?;

    let id = match state.transceiver_by_address(&address) {
        Ok(registered) => registered.id,
        Err(_) => {
            let id = state.config.next_transceiver_id;
            if id >= Bitmap::BITS {
                return Err(NTTError::TooManyTransceivers);
            }
            state.transceivers.push(RegisteredTransceiver {
                id,
                transceiver_address: address,
            });
            state.config.next_transceiver_id = id + 1;
            id
        }
    };

    state.config.enabled_transceivers.set(id, true)?;
    if state.config.threshold == 0 {
        state.config.threshold = 1;
    }

    info!(id, address = %hex::encode(address), "transceiver registered");
    Ok(id)
}

/// Enables or disables a registered transceiver. Disabling lowers the
/// threshold if it would otherwise exceed the number of enabled transceivers;
/// enabling one restores a zero threshold to 1.
pub fn set_transceiver_enabled<T: ?Sized>(
    ctx: Context<'_, T>,
    id: u8,
    enabled: bool,
) -> Result<()> {
    let config = &mut ctx.state.config;
    config.require_owner(&ctx.caller)?;

    if id >= config.next_transceiver_id {
        return Err(NTTError::UnregisteredTransceiver);
    }
    config.enabled_transceivers.set(id, enabled)?;

    let enabled_count = config.enabled_count();
    if config.threshold > enabled_count {
        config.threshold = enabled_count;
    }
    if enabled && config.threshold == 0 {
        config.threshold = 1;
    }

    info!(id, enabled, threshold = config.threshold, "transceiver toggled");
    Ok(())
}

// * Limits and threshold

pub fn set_threshold<T: ?Sized>(ctx: Context<'_, T>, threshold: u8) -> Result<()> {
    let config = &mut ctx.state.config;
    config.require_owner(&ctx.caller)?;

    if threshold == 0 {
        return Err(NTTError::ZeroThreshold);
    }
    if threshold > config.enabled_count() {
        return Err(NTTError::ThresholdTooHigh);
    }

    config.threshold = threshold;
    Ok(())
}

pub fn set_paused<T: ?Sized>(ctx: Context<'_, T>, paused: bool) -> Result<()> {
    ctx.state.config.require_owner(&ctx.caller)?;
    ctx.state.config.paused = paused;
    info!(paused, "pause flag set");
    Ok(())
}

pub fn set_outbound_limit<T: ?Sized>(ctx: Context<'_, T>, limit: u64) -> Result<()> {
    let state = ctx.state;
    state.config.require_owner(&ctx.caller)?;

    let decimals = state.config.token_decimals;
    let limit = TrimmedAmount::trim(limit, decimals, decimals)?;
    state.outbox_rate_limit.set_limit(limit, ctx.now)
}

pub fn set_inbound_limit<T: ?Sized>(
    ctx: Context<'_, T>,
    chain_id: ChainId,
    limit: u64,
) -> Result<()> {
    let state = ctx.state;
    state.config.require_owner(&ctx.caller)?;

    let decimals = state.config.token_decimals;
    let limit = TrimmedAmount::trim(limit, decimals, decimals)?;
    state
        .inbox_rate_limits
        .get_mut(&chain_id)
        .ok_or(NTTError::InvalidPeer)?
        .set_limit(limit, ctx.now)
}

// * Binary encoding

/// An admin instruction as carried in the call data of a governance message.
/// One discriminant byte followed by the fields, big endian.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminInstruction {
    TransferOwnership { new_owner: [u8; 32] },
    ClaimOwnership,
    SetPaused { paused: bool },
    SetPeer(SetPeerArgs),
    RegisterTransceiver { address: [u8; 32] },
    SetTransceiverEnabled { id: u8, enabled: bool },
    SetThreshold { threshold: u8 },
    SetOutboundLimit { limit: u64 },
    SetInboundLimit { chain_id: ChainId, limit: u64 },
}

impl AdminInstruction {
    fn discriminant(&self) -> u8 {
        match self {
            AdminInstruction::TransferOwnership { .. } => 0,
            AdminInstruction::ClaimOwnership => 1,
            AdminInstruction::SetPaused { .. } => 2,
            AdminInstruction::SetPeer(_) => 3,
            AdminInstruction::RegisterTransceiver { .. } => 4,
            AdminInstruction::SetTransceiverEnabled { .. } => 5,
            AdminInstruction::SetThreshold { .. } => 6,
            AdminInstruction::SetOutboundLimit { .. } => 7,
            AdminInstruction::SetInboundLimit { .. } => 8,
        }
    }
}

fn read_bool<R: io::Read>(reader: &mut R) -> io::Result<bool> {
    match u8::read(reader)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(MessageError::Malformed(format!("expected a bool, got {other}")).into()),
    }
}

impl Readable for AdminInstruction {
    const SIZE: Option<usize> = None;

    fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized,
        R: io::Read,
    {
        let instruction = match u8::read(reader)? {
            0 => AdminInstruction::TransferOwnership {
                new_owner: Readable::read(reader)?,
            },
            1 => AdminInstruction::ClaimOwnership,
            2 => AdminInstruction::SetPaused {
                paused: read_bool(reader)?,
            },
            3 => AdminInstruction::SetPeer(SetPeerArgs {
                chain_id: Readable::read(reader)?,
                address: Readable::read(reader)?,
                limit: Readable::read(reader)?,
                token_decimals: Readable::read(reader)?,
            }),
            4 => AdminInstruction::RegisterTransceiver {
                address: Readable::read(reader)?,
            },
            5 => AdminInstruction::SetTransceiverEnabled {
                id: Readable::read(reader)?,
                enabled: read_bool(reader)?,
            },
            6 => AdminInstruction::SetThreshold {
                threshold: Readable::read(reader)?,
            },
            7 => AdminInstruction::SetOutboundLimit {
                limit: Readable::read(reader)?,
            },
            8 => AdminInstruction::SetInboundLimit {
                chain_id: Readable::read(reader)?,
                limit: Readable::read(reader)?,
            },
            other => {
                return Err(
                    MessageError::Malformed(format!("unknown admin instruction {other}")).into(),
                )
            }
        };
        Ok(instruction)
    }
}

impl Writeable for AdminInstruction {
    fn written_size(&self) -> usize {
        1 + match self {
            AdminInstruction::TransferOwnership { .. } => 32,
            AdminInstruction::ClaimOwnership => 0,
            AdminInstruction::SetPaused { .. } => 1,
            AdminInstruction::SetPeer(_) => 2 + 32 + 8 + 1,
            AdminInstruction::RegisterTransceiver { .. } => 32,
            AdminInstruction::SetTransceiverEnabled { .. } => 2,
            AdminInstruction::SetThreshold { .. } => 1,
            AdminInstruction::SetOutboundLimit { .. } => 8,
            AdminInstruction::SetInboundLimit { .. } => 2 + 8,
        }
    }

    fn write<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        self.discriminant().write(writer)?;
        match self {
            AdminInstruction::TransferOwnership { new_owner } => new_owner.write(writer),
            AdminInstruction::ClaimOwnership => Ok(()),
            AdminInstruction::SetPaused { paused } => u8::from(*paused).write(writer),
            AdminInstruction::SetPeer(SetPeerArgs {
                chain_id,
                address,
                limit,
                token_decimals,
            }) => {
                chain_id.write(writer)?;
                address.write(writer)?;
                limit.write(writer)?;
                token_decimals.write(writer)
            }
            AdminInstruction::RegisterTransceiver { address } => address.write(writer),
            AdminInstruction::SetTransceiverEnabled { id, enabled } => {
                id.write(writer)?;
                u8::from(*enabled).write(writer)
            }
            AdminInstruction::SetThreshold { threshold } => threshold.write(writer),
            AdminInstruction::SetOutboundLimit { limit } => limit.write(writer),
            AdminInstruction::SetInboundLimit { chain_id, limit } => {
                chain_id.write(writer)?;
                limit.write(writer)
            }
        }
    }
}

/// Runs a decoded admin instruction as `ctx.caller`.
pub fn execute<T: TokenCustody + ?Sized>(
    ctx: Context<'_, T>,
    instruction: AdminInstruction,
) -> Result<()> {
    match instruction {
        AdminInstruction::TransferOwnership { new_owner } => transfer_ownership(ctx, new_owner),
        AdminInstruction::ClaimOwnership => claim_ownership(ctx),
        AdminInstruction::SetPaused { paused } => set_paused(ctx, paused),
        AdminInstruction::SetPeer(args) => set_peer(ctx, args),
        AdminInstruction::RegisterTransceiver { address } => {
            register_transceiver(ctx, address).map(|_| ())
        }
        AdminInstruction::SetTransceiverEnabled { id, enabled } => {
            set_transceiver_enabled(ctx, id, enabled)
        }
        AdminInstruction::SetThreshold { threshold } => set_threshold(ctx, threshold),
        AdminInstruction::SetOutboundLimit { limit } => set_outbound_limit(ctx, limit),
        AdminInstruction::SetInboundLimit { chain_id, limit } => {
            set_inbound_limit(ctx, chain_id, limit)
        }
    }
}
