pub mod admin;
pub mod broadcast_id;
pub mod broadcast_peer;
pub mod receive_message;
pub mod release_outbound;

pub use admin::*;
pub use broadcast_id::*;
pub use broadcast_peer::*;
pub use receive_message::*;
pub use release_outbound::*;
