use ntt_messages::errors::MessageError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("InvalidModule")]
    InvalidModule,
    #[error("InvalidAction: {0}")]
    InvalidAction(u8),
    #[error("InvalidGovernanceChainId")]
    InvalidGovernanceChainId,
    #[error("InvalidGovernanceContract")]
    InvalidGovernanceContract,
    #[error("NotRecipientContract")]
    NotRecipientContract,
    #[error("InvalidGovernedContract")]
    InvalidGovernedContract,
    #[error("GovernanceActionAlreadyConsumed")]
    GovernanceActionAlreadyConsumed,
    #[error(transparent)]
    Message(#[from] MessageError),
    #[error("Dispatch: {0}")]
    Dispatch(String),
}

pub type Result<T> = std::result::Result<T, GovernanceError>;
