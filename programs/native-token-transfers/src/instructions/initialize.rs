use ntt_messages::{chain_id::ChainId, mode::Mode, trimmed_amount::TrimmedAmount};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    bitmap::Bitmap,
    clock::UnixTimestamp,
    config::{Config, DustPolicy},
    custody::TokenCustody,
    error::{NTTError, Result},
    queue::{outbox::OutboxRateLimit, rate_limit::RateLimitState},
    sequence::Sequence,
    state::NttManagerState,
};

fn default_rate_limit_duration() -> UnixTimestamp {
    RateLimitState::RATE_LIMIT_DURATION
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeArgs {
    /// The manager's own address, as registered by peers.
    #[serde(with = "hex::serde")]
    pub address: [u8; 32],
    pub chain_id: ChainId,
    pub mode: Mode,
    /// Outbound limit, in the token's native decimals.
    pub limit: u64,
    #[serde(default = "default_rate_limit_duration")]
    pub rate_limit_duration: UnixTimestamp,
    #[serde(default)]
    pub dust_policy: DustPolicy,
}

pub fn initialize<T: TokenCustody + ?Sized>(
    custody: &T,
    owner: [u8; 32],
    now: UnixTimestamp,
    args: InitializeArgs,
) -> Result<NttManagerState> {
    if args.rate_limit_duration <= 0 {
        return Err(NTTError::InvalidRateLimitDuration);
    }

    let decimals = custody.decimals();
    let limit = TrimmedAmount::trim(args.limit, decimals, decimals)?;

    info!(
        chain_id = %args.chain_id,
        mode = %args.mode,
        decimals,
        "initializing ntt manager"
    );

    Ok(NttManagerState {
        config: Config {
            address: args.address,
            owner,
            pending_owner: None,
            token_address: custody.token_address(),
            token_decimals: decimals,
            mode: args.mode,
            chain_id: args.chain_id,
            next_transceiver_id: 0,
            // nothing gets approved until a transceiver is registered
            threshold: 0,
            enabled_transceivers: Bitmap::new(),
            paused: false,
            dust_policy: args.dust_policy,
            rate_limit_duration: args.rate_limit_duration,
        },
        sequence: Sequence::default(),
        outbox_rate_limit: OutboxRateLimit {
            rate_limit: RateLimitState::new(limit, now, args.rate_limit_duration),
        },
        peers: Default::default(),
        inbox_rate_limits: Default::default(),
        transceivers: Vec::new(),
        inbox: Default::default(),
        outbox: Default::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custody::InMemoryToken;

    #[test]
    fn test_initialize_args_from_json() {
        let args: InitializeArgs = serde_json::from_str(
            r#"{
                "address": "0101010101010101010101010101010101010101010101010101010101010101",
                "chain_id": 1,
                "mode": "burning",
                "limit": 1000000
            }"#,
        )
        .unwrap();
        assert_eq!(args.address, [1; 32]);
        assert_eq!(args.chain_id, ChainId { id: 1 });
        assert_eq!(args.mode, Mode::Burning);
        assert_eq!(args.rate_limit_duration, 86_400);
        assert_eq!(args.dust_policy, DustPolicy::Truncate);
    }

    #[test]
    fn test_initialize_trims_the_limit() {
        let token = InMemoryToken::new([9; 32], 18);
        let state = initialize(
            &token,
            [2; 32],
            50,
            InitializeArgs {
                address: [1; 32],
                chain_id: ChainId { id: 1 },
                mode: Mode::Locking,
                limit: 5_000_000_000_000_000_000,
                rate_limit_duration: 100,
                dust_policy: DustPolicy::Reject,
            },
        )
        .unwrap();
        assert_eq!(
            state.outbox_rate_limit.limit(),
            TrimmedAmount::new(500_000_000, 8)
        );
        assert_eq!(state.config.token_decimals, 18);
        assert_eq!(state.config.threshold, 0);
    }

    #[test]
    fn test_initialize_rejects_zero_duration() {
        let token = InMemoryToken::new([9; 32], 6);
        let args = InitializeArgs {
            address: [1; 32],
            chain_id: ChainId { id: 1 },
            mode: Mode::Locking,
            limit: 1,
            rate_limit_duration: 0,
            dust_policy: DustPolicy::Truncate,
        };
        assert_eq!(
            initialize(&token, [2; 32], 0, args),
            Err(NTTError::InvalidRateLimitDuration)
        );
    }
}
