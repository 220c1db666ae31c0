//! Native token transfers: moving one token between chains by locking or
//! burning it on the way out and unlocking or minting it on the way in.
//!
//! [`NttManager`] is the entry point. It owns the persisted
//! [`NttManagerState`], a [`TokenCustody`] for the token and a [`Clock`], and
//! forwards every call to the matching function in [`instructions`] together
//! with the caller and the current time. Transceivers, which carry messages
//! between chains, talk to the manager through [`NttManager::redeem`] and
//! [`NttManager::release_outbound`]. The Wormhole transceiver is in
//! [`transceivers::wormhole`].

pub mod bitmap;
pub mod clock;
pub mod config;
pub mod custody;
pub mod error;
pub mod instructions;
pub mod peer;
pub mod queue;
pub mod registered_transceiver;
pub mod sequence;
pub mod settings;
pub mod state;
pub mod transceivers;

use borsh::BorshDeserialize;
use ntt_messages::{chain_id::ChainId, codec::decode_exact};
use wormhole_governance::Governable;

use crate::{
    clock::Clock,
    custody::TokenCustody,
    error::{NTTError, Result},
    instructions::*,
    settings::{DeploymentSettings, SettingsError},
    state::NttManagerState,
    transceivers::wormhole::{PostedMessage, WormholePublisher, WormholeTransceiverState},
};

pub struct NttManager<C, T> {
    state: NttManagerState,
    clock: C,
    custody: T,
}

impl<C: Clock, T: TokenCustody> NttManager<C, T> {
    pub fn initialize(clock: C, custody: T, owner: [u8; 32], args: InitializeArgs) -> Result<Self> {
        let state = instructions::initialize(&custody, owner, clock.unix_timestamp(), args)?;
        Ok(Self {
            state,
            clock,
            custody,
        })
    }

    /// Initializes a manager and configures it as its owner would.
    pub fn from_settings(
        clock: C,
        custody: T,
        settings: DeploymentSettings,
    ) -> std::result::Result<Self, SettingsError> {
        let DeploymentSettings {
            owner,
            manager,
            transceivers,
            peers,
            threshold,
            paused,
        } = settings;

        let mut ntt = Self::initialize(clock, custody, owner, manager)?;
        for transceiver in transceivers {
            ntt.register_transceiver(owner, transceiver.address)?;
        }
        for peer in peers {
            ntt.set_peer(
                owner,
                SetPeerArgs {
                    chain_id: peer.chain_id,
                    address: peer.address,
                    limit: peer.inbound_limit,
                    token_decimals: peer.token_decimals,
                },
            )?;
        }
        if let Some(threshold) = threshold {
            ntt.set_threshold(owner, threshold)?;
        }
        if paused {
            ntt.set_paused(owner, true)?;
        }
        Ok(ntt)
    }

    /// Picks up a manager from a [`NttManager::snapshot`].
    pub fn restore(clock: C, custody: T, snapshot: &[u8]) -> Result<Self> {
        let state = NttManagerState::try_from_slice(snapshot)
            .map_err(|err| NTTError::Snapshot(err.to_string()))?;
        Ok(Self {
            state,
            clock,
            custody,
        })
    }

    pub fn snapshot(&self) -> Result<Vec<u8>> {
        borsh::to_vec(&self.state).map_err(|err| NTTError::Snapshot(err.to_string()))
    }

    pub fn state(&self) -> &NttManagerState {
        &self.state
    }

    pub fn custody(&self) -> &T {
        &self.custody
    }

    pub fn custody_mut(&mut self) -> &mut T {
        &mut self.custody
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn ctx(&mut self, caller: [u8; 32]) -> Context<'_, T> {
        Context {
            now: self.clock.unix_timestamp(),
            state: &mut self.state,
            custody: &mut self.custody,
            caller,
        }
    }

    // * Transfers

    pub fn transfer(&mut self, sender: [u8; 32], args: TransferArgs) -> Result<TransferOutcome> {
        instructions::transfer(self.ctx(sender), args)
    }

    pub fn redeem(&mut self, transceiver: [u8; 32], args: RedeemArgs) -> Result<RedeemOutcome> {
        instructions::redeem(self.ctx(transceiver), args)
    }

    pub fn release_inbound(
        &mut self,
        caller: [u8; 32],
        args: ReleaseInboundArgs,
    ) -> Result<InboundStatus> {
        instructions::release_inbound(self.ctx(caller), args)
    }

    pub fn release_outbound(
        &mut self,
        transceiver: [u8; 32],
        args: ReleaseOutboundArgs,
    ) -> Result<Option<OutboundRelease>> {
        instructions::release_outbound(self.ctx(transceiver), args)
    }

    pub fn cancel_outbound(&mut self, sender: [u8; 32], sequence: u64) -> Result<u64> {
        instructions::cancel_outbound(self.ctx(sender), sequence)
    }

    // * Admin

    pub fn execute(&mut self, caller: [u8; 32], instruction: AdminInstruction) -> Result<()> {
        instructions::execute(self.ctx(caller), instruction)
    }

    pub fn transfer_ownership(&mut self, owner: [u8; 32], new_owner: [u8; 32]) -> Result<()> {
        instructions::transfer_ownership(self.ctx(owner), new_owner)
    }

    pub fn claim_ownership(&mut self, new_owner: [u8; 32]) -> Result<()> {
        instructions::claim_ownership(self.ctx(new_owner))
    }

    pub fn set_paused(&mut self, owner: [u8; 32], paused: bool) -> Result<()> {
        instructions::set_paused(self.ctx(owner), paused)
    }

    pub fn set_peer(&mut self, owner: [u8; 32], args: SetPeerArgs) -> Result<()> {
        instructions::set_peer(self.ctx(owner), args)
    }

    pub fn register_transceiver(&mut self, owner: [u8; 32], address: [u8; 32]) -> Result<u8> {
        instructions::register_transceiver(self.ctx(owner), address)
    }

    pub fn set_transceiver_enabled(&mut self, owner: [u8; 32], id: u8, enabled: bool) -> Result<()> {
        instructions::set_transceiver_enabled(self.ctx(owner), id, enabled)
    }

    pub fn set_threshold(&mut self, owner: [u8; 32], threshold: u8) -> Result<()> {
        instructions::set_threshold(self.ctx(owner), threshold)
    }

    pub fn set_outbound_limit(&mut self, owner: [u8; 32], limit: u64) -> Result<()> {
        instructions::set_outbound_limit(self.ctx(owner), limit)
    }

    pub fn set_inbound_limit(&mut self, owner: [u8; 32], chain_id: ChainId, limit: u64) -> Result<()> {
        instructions::set_inbound_limit(self.ctx(owner), chain_id, limit)
    }

    // * Wormhole transceiver

    pub fn receive_wormhole_message(
        &mut self,
        transceiver: &WormholeTransceiverState,
        vaa: &PostedMessage,
    ) -> Result<RedeemOutcome> {
        let now = self.clock.unix_timestamp();
        transceivers::wormhole::receive_message(
            transceiver,
            &mut self.state,
            &mut self.custody,
            now,
            vaa,
        )
    }

    pub fn release_wormhole_outbound<P: WormholePublisher + ?Sized>(
        &mut self,
        transceiver: &WormholeTransceiverState,
        publisher: &mut P,
        args: ReleaseOutboundArgs,
    ) -> Result<Option<u64>> {
        let now = self.clock.unix_timestamp();
        transceivers::wormhole::release_outbound(
            transceiver,
            &mut self.state,
            &mut self.custody,
            publisher,
            now,
            args,
        )
    }
}

impl<C: Clock, T: TokenCustody> Governable for NttManager<C, T> {
    type Error = NTTError;

    fn governed_address(&self) -> [u8; 32] {
        self.state.config.address
    }

    /// Runs an encoded [`AdminInstruction`].
    fn invoke(&mut self, caller: [u8; 32], call_data: &[u8]) -> Result<()> {
        let instruction: AdminInstruction = decode_exact(call_data)?;
        self.execute(caller, instruction)
    }
}
