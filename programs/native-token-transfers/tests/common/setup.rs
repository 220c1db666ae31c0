use native_token_transfers::{
    clock::ManualClock,
    config::DustPolicy,
    custody::InMemoryToken,
    instructions::{InitializeArgs, SetPeerArgs, TransferArgs},
    transceivers::wormhole::{set_transceiver_peer, PostedMessage, SetTransceiverPeerArgs, WormholeTransceiverState},
    NttManager,
};
use ntt_messages::{
    chain_id::ChainId,
    codec::encode,
    mode::Mode,
    ntt::NativeTokenTransfer,
    ntt_manager::NttManagerMessage,
    transceiver::{TransceiverMessage, TransceiverMessageData},
    transceivers::wormhole::WormholeTransceiver,
    trimmed_amount::TrimmedAmount,
};

use super::publisher::RecordingPublisher;

// the mint amount is more than the limits, so we can test the rate limits
pub const MINT_AMOUNT: u64 = 100000;
pub const OUTBOUND_LIMIT: u64 = 10000;
pub const INBOUND_LIMIT: u64 = 50000;
pub const DECIMALS: u8 = 9;
pub const RATE_LIMIT_DURATION: i64 = 86400;
pub const START: i64 = 1_700_000_000;

pub const OWNER: [u8; 32] = [0x0A; 32];
pub const USER: [u8; 32] = [0xA1; 32];
pub const RECIPIENT: [u8; 32] = [0xB0; 32];
pub const TOKEN: [u8; 32] = [0x70; 32];

pub const THIS_MANAGER: [u8; 32] = [1u8; 32];
pub const THIS_TRANSCEIVER: [u8; 32] = [0xE0; 32];
pub const OTHER_TRANSCEIVER: [u8; 32] = [7u8; 32];
pub const OTHER_MANAGER: [u8; 32] = [9u8; 32];
pub const OTHER_TOKEN: [u8; 32] = [4u8; 32];

pub const THIS_CHAIN: u16 = 1;
pub const OTHER_CHAIN: u16 = 2;

pub struct TestData {
    pub ntt: NttManager<ManualClock, InMemoryToken>,
    pub clock: ManualClock,
    pub transceiver: WormholeTransceiverState,
    pub publisher: RecordingPublisher,
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// A manager on [`THIS_CHAIN`] with one Wormhole transceiver, peered with
/// [`OTHER_MANAGER`] on [`OTHER_CHAIN`]. [`USER`] holds [`MINT_AMOUNT`], and in
/// locking mode so does the custody account.
pub fn setup(mode: Mode) -> TestData {
    init_tracing();

    let clock = ManualClock::new(START);
    let mut token = InMemoryToken::new(TOKEN, DECIMALS);
    token.fund(USER, MINT_AMOUNT).unwrap();
    if mode == Mode::Locking {
        token.custody_balance = MINT_AMOUNT;
    }

    let mut ntt = NttManager::initialize(
        clock.clone(),
        token,
        OWNER,
        InitializeArgs {
            address: THIS_MANAGER,
            chain_id: ChainId { id: THIS_CHAIN },
            mode,
            limit: OUTBOUND_LIMIT,
            rate_limit_duration: RATE_LIMIT_DURATION,
            dust_policy: DustPolicy::Truncate,
        },
    )
    .unwrap();

    ntt.register_transceiver(OWNER, THIS_TRANSCEIVER).unwrap();
    ntt.set_peer(
        OWNER,
        SetPeerArgs {
            chain_id: ChainId { id: OTHER_CHAIN },
            address: OTHER_MANAGER,
            limit: INBOUND_LIMIT,
            token_decimals: DECIMALS,
        },
    )
    .unwrap();

    let mut transceiver = WormholeTransceiverState::new(THIS_TRANSCEIVER);
    set_transceiver_peer(
        &mut transceiver,
        &ntt.state().config,
        &OWNER,
        SetTransceiverPeerArgs {
            chain_id: ChainId { id: OTHER_CHAIN },
            address: OTHER_TRANSCEIVER,
        },
    )
    .unwrap();

    TestData {
        ntt,
        clock,
        transceiver,
        publisher: RecordingPublisher::default(),
    }
}

pub fn transfer_args(amount: u64, should_queue: bool) -> TransferArgs {
    TransferArgs {
        amount,
        recipient_chain: ChainId { id: OTHER_CHAIN },
        recipient_address: RECIPIENT,
        should_queue,
        transceiver_instructions: Vec::new(),
    }
}

/// A transfer sent by [`OTHER_MANAGER`] to `to` on this chain.
pub fn inbound_message(
    sequence: u64,
    amount: TrimmedAmount,
    to: [u8; 32],
) -> TransceiverMessageData<NativeTokenTransfer> {
    TransceiverMessageData {
        source_ntt_manager: OTHER_MANAGER,
        recipient_ntt_manager: THIS_MANAGER,
        ntt_manager_payload: NttManagerMessage {
            id: NttManagerMessage::<NativeTokenTransfer>::id_from_sequence(sequence),
            sender: [3u8; 32],
            payload: NativeTokenTransfer {
                amount,
                source_token: OTHER_TOKEN,
                to,
                to_chain: ChainId { id: THIS_CHAIN },
            },
        },
    }
}

/// `message` as the core bridge delivers it, emitted by [`OTHER_TRANSCEIVER`].
pub fn posted(message: TransceiverMessageData<NativeTokenTransfer>) -> PostedMessage {
    let envelope: TransceiverMessage<WormholeTransceiver, NativeTokenTransfer> =
        TransceiverMessage::new(
            message.source_ntt_manager,
            message.recipient_ntt_manager,
            message.ntt_manager_payload,
            Vec::new(),
        );
    PostedMessage {
        emitter_chain: ChainId { id: OTHER_CHAIN },
        emitter_address: OTHER_TRANSCEIVER,
        sequence: 0,
        payload: encode(&envelope).unwrap(),
    }
}
