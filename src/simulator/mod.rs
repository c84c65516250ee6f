//! Prior-experience simulation

mod aging;
mod engine;


pub use aging::*;
pub use engine::*;
