use crate::{clock::UnixTimestamp, state::NttManagerState};

pub mod admin;
pub mod cancel;
pub mod initialize;
pub mod redeem;
pub mod release_inbound;
pub mod release_outbound;
pub mod transfer;

pub use admin::*;
pub use cancel::*;
pub use initialize::*;
pub use redeem::*;
pub use release_inbound::*;
pub use release_outbound::*;
pub use transfer::*;

/// What every instruction runs against: the manager state, the token custody,
/// the account that submitted the instruction, and the time it runs at.
///
/// Instructions validate first and write to `state` last, so an instruction
/// that fails leaves `state` as it found it.
pub struct Context<'a, T: ?Sized> {
    pub state: &'a mut NttManagerState,
    pub custody: &'a mut T,
    pub caller: [u8; 32],
    pub now: UnixTimestamp,
}
