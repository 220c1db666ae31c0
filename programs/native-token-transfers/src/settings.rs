//! Deployment settings: everything needed to bring up a configured manager
//! from a single JSON document.
//!
//! ```json
//! {
//!   "owner": "0a0a...0a",
//!   "manager": {
//!     "address": "0101...01",
//!     "chain_id": 1,
//!     "mode": "locking",
//!     "limit": 1000000000,
//!     "rate_limit_duration": 86400,
//!     "dust_policy": "reject"
//!   },
//!   "transceivers": [{ "address": "e0e0...e0" }],
//!   "peers": [
//!     { "chain_id": 2, "address": "0202...02", "token_decimals": 18, "inbound_limit": 1000000000 }
//!   ],
//!   "threshold": 1,
//!   "paused": false
//! }
//! ```

use std::{fs, path::Path};

use ntt_messages::chain_id::ChainId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{error::NTTError, instructions::InitializeArgs};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Io: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manager: {0}")]
    Manager(#[from] NTTError),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransceiverSettings {
    #[serde(with = "hex::serde")]
    pub address: [u8; 32],
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PeerSettings {
    pub chain_id: ChainId,
    #[serde(with = "hex::serde")]
    pub address: [u8; 32],
    pub token_decimals: u8,
    /// In the local token's native decimals.
    pub inbound_limit: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DeploymentSettings {
    #[serde(with = "hex::serde")]
    pub owner: [u8; 32],
    pub manager: InitializeArgs,
    /// Registered in order, so the first one gets id 0.
    #[serde(default)]
    pub transceivers: Vec<TransceiverSettings>,
    #[serde(default)]
    pub peers: Vec<PeerSettings>,
    /// Defaults to one once a transceiver is registered.
    #[serde(default)]
    pub threshold: Option<u8>,
    #[serde(default)]
    pub paused: bool,
}

impl DeploymentSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
