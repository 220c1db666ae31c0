pub mod accounts;
pub mod instructions;

pub use accounts::*;
pub use instructions::*;
