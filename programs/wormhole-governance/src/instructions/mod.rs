pub mod governance;

pub use governance::*;
