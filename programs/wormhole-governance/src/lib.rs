//! General purpose governance.
//!
//! A governance message is a signed instruction for some contract on some
//! chain. The signatures are the bridge's business: this crate receives
//! messages the bridge already verified, checks that they come from the
//! governance emitter and are meant for this chain and this governance
//! contract, and hands the call data to the governed contract exactly once.
//!
//! A contract opts in by implementing [`Governable`] and making the
//! governance contract's address its owner, so that the call data it receives
//! passes its own access control.

pub mod error;
pub mod instructions;

pub use instructions::*;
