//! Skill names, triangular levels and the per-character skill ledger

mod ledger;
mod level;
mod normalize;


pub use ledger::*;
pub use level::*;
pub use normalize::*;
