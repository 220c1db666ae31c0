use ntt_messages::transceivers::wormhole::WormholeTransceiverInfo;

use crate::{
    config::Config,
    error::Result,
    transceivers::wormhole::accounts::{post_message, WormholePublisher},
};

/// Announces the manager this transceiver serves, so peers can check the
/// token and mode on the other side.
pub fn broadcast_id<P: WormholePublisher + ?Sized>(config: &Config, publisher: &mut P) -> Result<u64> {
    let message = WormholeTransceiverInfo {
        manager_address: config.address,
        manager_mode: config.mode,
        token_address: config.token_address,
        token_decimals: config.token_decimals,
    };

    post_message(publisher, &message, true)
}
