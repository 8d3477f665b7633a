//! Security rule chain

mod chain;

pub use chain::{Access, Decision, SecurityChain, SecurityChainBuilder, SecurityRule};
