use std::{collections::BTreeSet, fmt, io};

use borsh::{BorshDeserialize, BorshSerialize};
use ntt_messages::{chain_id::ChainId, codec::decode_exact, errors::MessageError, hash::keccak256};
use tracing::{info, warn};
use wormhole_io::{Readable, Writeable};

use crate::error::{GovernanceError, Result};

/// "GeneralPurposeGovernance", left padded to 32 bytes.
pub const MODULE: [u8; 32] = left_pad(b"GeneralPurposeGovernance");

/// Chain of the guardian governance emitter.
pub const GOVERNANCE_CHAIN: ChainId = ChainId { id: 1 };

pub const GOVERNANCE_EMITTER: [u8; 32] = left_pad(&[0x04]);

const fn left_pad(input: &[u8]) -> [u8; 32] {
    let mut output: [u8; 32] = [0; 32];
    let offset = 32 - input.len();

    let mut i = 0;
    while i < input.len() {
        output[offset + i] = input[i];
        i += 1;
    }

    output
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovernanceAction {
    /// Call the governed contract with the message's call data.
    ContractCall = 1,
}

impl TryFrom<u8> for GovernanceAction {
    type Error = GovernanceError;

    fn try_from(action: u8) -> Result<Self> {
        match action {
            1 => Ok(GovernanceAction::ContractCall),
            other => Err(GovernanceError::InvalidAction(other)),
        }
    }
}

/// The payload of a general purpose governance message.
///
/// ```text
/// module              [u8; 32]
/// action              u8
/// chain               u16
/// governance_contract [u8; 32]
/// governed_contract   [u8; 32]
/// call_data_len       u16
/// call_data           [u8; call_data_len]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernanceMessage {
    pub module: [u8; 32],
    /// Kept raw so that an unknown action is reported as such, after the
    /// module check.
    pub action: u8,
    pub chain: ChainId,
    pub governance_contract: [u8; 32],
    pub governed_contract: [u8; 32],
    pub call_data: Vec<u8>,
}

impl Readable for GovernanceMessage {
    const SIZE: Option<usize> = None;

    fn read<R>(reader: &mut R) -> io::Result<Self>
    where
        Self: Sized,
        R: io::Read,
    {
        let module = Readable::read(reader)?;
        let action = Readable::read(reader)?;
        let chain = Readable::read(reader)?;
        let governance_contract = Readable::read(reader)?;
        let governed_contract = Readable::read(reader)?;
        let call_data_len: u16 = Readable::read(reader)?;
        let mut call_data = vec![0u8; usize::from(call_data_len)];
        reader.read_exact(&mut call_data)?;

        Ok(GovernanceMessage {
            module,
            action,
            chain,
            governance_contract,
            governed_contract,
            call_data,
        })
    }
}

impl Writeable for GovernanceMessage {
    fn written_size(&self) -> usize {
        32 + 1 + 2 + 32 + 32 + 2 + self.call_data.len()
    }

    fn write<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        let call_data_len =
            u16::try_from(self.call_data.len()).map_err(|_| MessageError::PayloadTooLong {
                len: self.call_data.len(),
                max: usize::from(u16::MAX),
            })?;

        self.module.write(writer)?;
        self.action.write(writer)?;
        self.chain.write(writer)?;
        self.governance_contract.write(writer)?;
        self.governed_contract.write(writer)?;
        call_data_len.write(writer)?;
        writer.write_all(&self.call_data)
    }
}

/// A governance message as delivered by the bridge, signatures verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernanceVaa {
    pub emitter_chain: ChainId,
    pub emitter_address: [u8; 32],
    pub sequence: u64,
    pub payload: Vec<u8>,
}

impl GovernanceVaa {
    /// The replay protection key: keccak256 over the emitter, the sequence and
    /// the payload.
    pub fn digest(&self) -> [u8; 32] {
        let mut buf = Vec::with_capacity(2 + 32 + 8 + self.payload.len());
        buf.extend_from_slice(&self.emitter_chain.to_be_bytes());
        buf.extend_from_slice(&self.emitter_address);
        buf.extend_from_slice(&self.sequence.to_be_bytes());
        buf.extend_from_slice(&self.payload);
        keccak256(buf)
    }
}

/// A contract that accepts governance instructions.
pub trait Governable {
    type Error: fmt::Display;

    /// The address governance messages name as `governed_contract`.
    fn governed_address(&self) -> [u8; 32];

    /// Runs `call_data` with `caller` as the sender.
    fn invoke(&mut self, caller: [u8; 32], call_data: &[u8]) -> std::result::Result<(), Self::Error>;
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct GovernanceState {
    /// Address of this governance contract, the owner of governed contracts.
    pub address: [u8; 32],
    /// The chain this governance contract runs on.
    pub chain_id: ChainId,
    pub governance_chain: ChainId,
    pub governance_emitter: [u8; 32],
    /// Digests of executed governance messages.
    pub consumed: BTreeSet<[u8; 32]>,
}

impl GovernanceState {
    /// Governance by the guardian emitter.
    pub fn new(address: [u8; 32], chain_id: ChainId) -> Self {
        Self {
            address,
            chain_id,
            governance_chain: GOVERNANCE_CHAIN,
            governance_emitter: GOVERNANCE_EMITTER,
            consumed: BTreeSet::new(),
        }
    }

    pub fn is_consumed(&self, digest: &[u8; 32]) -> bool {
        self.consumed.contains(digest)
    }
}

fn reject(err: GovernanceError) -> GovernanceError {
    warn!(%err, "governance message rejected");
    err
}

/// Validates `vaa` and runs its call data on `governed`.
///
/// The checks run cheapest first, and nothing is written unless all of them
/// pass and the call succeeds. The message is marked as consumed only then, so
/// a call that failed can be submitted again.
pub fn governance<G: Governable + ?Sized>(
    state: &mut GovernanceState,
    governed: &mut G,
    vaa: &GovernanceVaa,
) -> Result<()> {
    let message: GovernanceMessage = decode_exact(&vaa.payload).map_err(|err| reject(err.into()))?;

    if message.module != MODULE {
        return Err(reject(GovernanceError::InvalidModule));
    }
    let action = GovernanceAction::try_from(message.action).map_err(reject)?;
    if message.chain != state.chain_id {
        return Err(reject(GovernanceError::InvalidGovernanceChainId));
    }
    if vaa.emitter_chain != state.governance_chain
        || vaa.emitter_address != state.governance_emitter
    {
        return Err(reject(GovernanceError::InvalidGovernanceContract));
    }
    if message.governance_contract != state.address {
        return Err(reject(GovernanceError::NotRecipientContract));
    }

    let digest = vaa.digest();
    if state.is_consumed(&digest) {
        return Err(reject(GovernanceError::GovernanceActionAlreadyConsumed));
    }
    if message.governed_contract != governed.governed_address() {
        return Err(reject(GovernanceError::InvalidGovernedContract));
    }

    match action {
        GovernanceAction::ContractCall => governed
            .invoke(state.address, &message.call_data)
            .map_err(|err| reject(GovernanceError::Dispatch(err.to_string())))?,
    }

    state.consumed.insert(digest);
    info!(
        sequence = vaa.sequence,
        governed = %hex::encode(message.governed_contract),
        "governance message executed"
    );
    Ok(())
}
