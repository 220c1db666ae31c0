use ntt_messages::errors::{MessageError, ScalingError};
use thiserror::Error;

use crate::custody::CustodyError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NTTError {
    #[error("CantReleaseYet")]
    CantReleaseYet,
    #[error("InvalidPendingOwner")]
    InvalidPendingOwner,
    #[error("InvalidChainId")]
    InvalidChainId,
    #[error("InvalidRecipientAddress")]
    InvalidRecipientAddress,
    #[error("InvalidPeer")]
    InvalidPeer,
    #[error("InvalidRecipientNttManager")]
    InvalidRecipientNttManager,
    #[error("TransferNotApproved")]
    TransferNotApproved,
    #[error("TransferCancelled")]
    TransferCancelled,
    #[error("TransferNotQueued")]
    TransferNotQueued,
    #[error("MessageAlreadySent")]
    MessageAlreadySent,
    #[error("TransferExceedsRateLimit")]
    TransferExceedsRateLimit,
    #[error("Paused")]
    Paused,
    #[error("AlreadyAttested")]
    AlreadyAttested,
    #[error("UnregisteredTransceiver")]
    UnregisteredTransceiver,
    #[error("DisabledTransceiver")]
    DisabledTransceiver,
    #[error("InvalidTransceiverPeer")]
    InvalidTransceiverPeer,
    #[error("TooManyTransceivers")]
    TooManyTransceivers,
    #[error("ThresholdTooHigh")]
    ThresholdTooHigh,
    #[error("ZeroThreshold")]
    ZeroThreshold,
    #[error("InvalidOwner")]
    InvalidOwner,
    #[error("InvalidPeerZeroAddress")]
    InvalidPeerZeroAddress,
    #[error("InvalidPeerDecimals")]
    InvalidPeerDecimals,
    #[error("InvalidRateLimitDuration")]
    InvalidRateLimitDuration,
    #[error("ZeroAmount")]
    ZeroAmount,
    #[error("AmountHasDust: {dust} would not be transferred")]
    AmountHasDust { dust: u64 },
    #[error("BitmapIndexOutOfBounds")]
    BitmapIndexOutOfBounds,
    #[error("InvalidInstructionIndex: {index} is not a registered transceiver")]
    InvalidInstructionIndex { index: u8 },
    #[error("OutboxItemNotFound: sequence {0}")]
    OutboxItemNotFound(u64),
    #[error("InboxItemNotFound")]
    InboxItemNotFound,
    #[error("CancellerNotSender")]
    CancellerNotSender,
    #[error("SequenceOverflow")]
    SequenceOverflow,
    #[error("Transport: {0}")]
    Transport(String),
    #[error(transparent)]
    Scaling(#[from] ScalingError),
    #[error(transparent)]
    Message(#[from] MessageError),
    #[error(transparent)]
    Custody(#[from] CustodyError),
    #[error("Snapshot: {0}")]
    Snapshot(String),
}

pub type Result<T> = std::result::Result<T, NTTError>;
