//! Dice primitives
//!
//! Every generator in the crate draws its randomness through a [`DiceRoller`],
//! so a seeded roller reproduces the same character roll-for-roll.

mod demon;
mod roll;
mod roller;


pub use demon::*;
pub use roll::*;
pub use roller::*;
