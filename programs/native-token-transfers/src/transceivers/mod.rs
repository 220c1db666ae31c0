pub mod accounts;
pub mod wormhole;
