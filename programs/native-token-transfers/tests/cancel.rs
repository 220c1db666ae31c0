use native_token_transfers::{error::NTTError, instructions::ReleaseOutboundArgs};
use ntt_messages::{mode::Mode, trimmed_amount::TrimmedAmount};

use crate::common::setup::{
    setup, transfer_args, MINT_AMOUNT, OWNER, RATE_LIMIT_DURATION, START, USER,
};

pub mod common;

#[test]
fn test_cancel_queued_transfer_locking() {
    let mut test_data = setup(Mode::Locking);
    // 10_015 leaves 5 as dust, which never leaves the sender
    let outcome = test_data.ntt.transfer(USER, transfer_args(10_015, true)).unwrap();
    assert_eq!(outcome.debited, 10_010);
    assert_eq!(
        test_data.ntt.custody().balance_of(&USER),
        MINT_AMOUNT - 10_010
    );

    let refund = test_data.ntt.cancel_outbound(USER, outcome.sequence).unwrap();
    assert_eq!(refund, 10_010);

    let token = test_data.ntt.custody();
    assert_eq!(token.balance_of(&USER), MINT_AMOUNT);
    assert_eq!(token.custody_balance, MINT_AMOUNT);
    assert!(test_data.ntt.state().outbox_item(0).unwrap().cancelled);

    // the cancelled transfer never goes out, even once it would have matured
    test_data.clock.set(START + RATE_LIMIT_DURATION);
    let release = test_data.ntt.release_wormhole_outbound(
        &test_data.transceiver,
        &mut test_data.publisher,
        ReleaseOutboundArgs {
            sequence: 0,
            revert_on_delay: false,
        },
    );
    assert_eq!(release, Err(NTTError::TransferCancelled));
    assert!(test_data.publisher.posted.is_empty());

    assert_eq!(
        test_data.ntt.cancel_outbound(USER, 0),
        Err(NTTError::TransferCancelled)
    );
}

#[test]
fn test_cancel_queued_transfer_burning() {
    let mut test_data = setup(Mode::Burning);
    let supply = test_data.ntt.custody().total_supply;

    test_data.ntt.transfer(USER, transfer_args(10_010, true)).unwrap();
    assert_eq!(test_data.ntt.custody().total_supply, supply - 10_010);

    test_data.ntt.cancel_outbound(USER, 0).unwrap();
    assert_eq!(test_data.ntt.custody().total_supply, supply);
    assert_eq!(test_data.ntt.custody().balance_of(&USER), MINT_AMOUNT);
}

#[test]
fn test_cancel_leaves_capacity_alone() {
    let mut test_data = setup(Mode::Locking);
    test_data.ntt.transfer(USER, transfer_args(10_010, true)).unwrap();
    test_data.ntt.cancel_outbound(USER, 0).unwrap();

    assert_eq!(
        test_data
            .ntt
            .state()
            .outbox_rate_limit
            .rate_limit
            .capacity_at(START),
        TrimmedAmount::new(1000, 8)
    );
}

#[test]
fn test_only_sender_can_cancel() {
    let mut test_data = setup(Mode::Locking);
    test_data.ntt.transfer(USER, transfer_args(10_010, true)).unwrap();

    assert_eq!(
        test_data.ntt.cancel_outbound(OWNER, 0),
        Err(NTTError::CancellerNotSender)
    );
    assert!(!test_data.ntt.state().outbox_item(0).unwrap().cancelled);
}

#[test]
fn test_cannot_cancel_released_transfer() {
    let mut test_data = setup(Mode::Locking);
    test_data.ntt.transfer(USER, transfer_args(105, false)).unwrap();

    assert_eq!(
        test_data.ntt.cancel_outbound(USER, 0),
        Err(NTTError::TransferNotQueued)
    );
    assert_eq!(
        test_data.ntt.cancel_outbound(USER, 1),
        Err(NTTError::OutboxItemNotFound(1))
    );
}
