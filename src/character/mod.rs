//! Character generation facade
//!
//! Runs every generator in order for one character: attributes, physical
//! and social traits, track selection, prior experience and the skill
//! ledger. Each run is independent; the only shared state is the track
//! repository, which is read-only here.

mod generator;

pub use generator::*;
