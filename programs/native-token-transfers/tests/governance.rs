use native_token_transfers::instructions::AdminInstruction;
use ntt_messages::{chain_id::ChainId, codec::encode, mode::Mode};
use wormhole_governance::{
    error::GovernanceError, governance, GovernanceMessage, GovernanceState, GovernanceVaa,
    GOVERNANCE_CHAIN, GOVERNANCE_EMITTER, MODULE,
};

use crate::common::setup::{setup, transfer_args, TestData, OWNER, THIS_CHAIN, THIS_MANAGER, USER};

pub mod common;

const GOVERNANCE: [u8; 32] = [0x60; 32];

fn vaa(sequence: u64, instruction: &AdminInstruction) -> GovernanceVaa {
    let message = GovernanceMessage {
        module: MODULE,
        action: 1,
        chain: ChainId { id: THIS_CHAIN },
        governance_contract: GOVERNANCE,
        governed_contract: THIS_MANAGER,
        call_data: encode(instruction).unwrap(),
    };
    GovernanceVaa {
        emitter_chain: GOVERNANCE_CHAIN,
        emitter_address: GOVERNANCE_EMITTER,
        sequence,
        payload: encode(&message).unwrap(),
    }
}

/// Hands the manager over to the governance program.
fn setup_governed(mode: Mode) -> (TestData, GovernanceState) {
    let mut test_data = setup(mode);
    let mut state = GovernanceState::new(GOVERNANCE, ChainId { id: THIS_CHAIN });

    test_data.ntt.transfer_ownership(OWNER, GOVERNANCE).unwrap();
    governance(
        &mut state,
        &mut test_data.ntt,
        &vaa(0, &AdminInstruction::ClaimOwnership),
    )
    .unwrap();
    assert_eq!(test_data.ntt.state().config.owner, GOVERNANCE);

    (test_data, state)
}

#[test]
fn test_governance_pauses() {
    let (mut test_data, mut state) = setup_governed(Mode::Locking);

    let pause = vaa(1, &AdminInstruction::SetPaused { paused: true });
    governance(&mut state, &mut test_data.ntt, &pause).unwrap();
    assert!(test_data.ntt.state().config.paused);
    assert_eq!(
        test_data.ntt.transfer(USER, transfer_args(105, false)),
        Err(native_token_transfers::error::NTTError::Paused)
    );

    // the previous owner no longer has a say
    assert_eq!(
        test_data.ntt.set_paused(OWNER, false),
        Err(native_token_transfers::error::NTTError::InvalidOwner)
    );

    assert_eq!(
        governance(&mut state, &mut test_data.ntt, &pause),
        Err(GovernanceError::GovernanceActionAlreadyConsumed)
    );
}

#[test]
fn test_governance_sets_limits() {
    let (mut test_data, mut state) = setup_governed(Mode::Burning);

    governance(
        &mut state,
        &mut test_data.ntt,
        &vaa(1, &AdminInstruction::SetOutboundLimit { limit: 500 }),
    )
    .unwrap();
    assert_eq!(
        test_data.ntt.state().outbox_rate_limit.rate_limit.limit(),
        ntt_messages::trimmed_amount::TrimmedAmount::new(50, 8)
    );
}

#[test]
fn test_governance_rejects_foreign_emitter() {
    let (mut test_data, mut state) = setup_governed(Mode::Locking);

    let mut forged = vaa(1, &AdminInstruction::SetPaused { paused: true });
    forged.emitter_address = [0x66; 32];
    assert_eq!(
        governance(&mut state, &mut test_data.ntt, &forged),
        Err(GovernanceError::InvalidGovernanceContract)
    );
    assert!(!test_data.ntt.state().config.paused);
}

#[test]
fn test_failed_instruction_is_not_consumed() {
    let (mut test_data, mut state) = setup_governed(Mode::Locking);

    let threshold = vaa(1, &AdminInstruction::SetThreshold { threshold: 2 });
    assert!(matches!(
        governance(&mut state, &mut test_data.ntt, &threshold),
        Err(GovernanceError::Dispatch(_))
    ));
    assert!(!state.is_consumed(&threshold.digest()));

    governance(
        &mut state,
        &mut test_data.ntt,
        &vaa(
            2,
            &AdminInstruction::RegisterTransceiver {
                address: [0xE1; 32],
            },
        ),
    )
    .unwrap();
    governance(&mut state, &mut test_data.ntt, &threshold).unwrap();
    assert_eq!(test_data.ntt.state().config.threshold, 2);
}

#[test]
fn test_governance_without_ownership() {
    let mut test_data = setup(Mode::Locking);
    let mut state = GovernanceState::new(GOVERNANCE, ChainId { id: THIS_CHAIN });

    assert!(matches!(
        governance(
            &mut state,
            &mut test_data.ntt,
            &vaa(0, &AdminInstruction::SetPaused { paused: true }),
        ),
        Err(GovernanceError::Dispatch(_))
    ));
    assert!(!test_data.ntt.state().config.paused);
}
