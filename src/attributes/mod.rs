//! Ability scores, modifiers, derived stats and point-buy validation

mod generator;
mod point_buy;
mod scores;

#[cfg(test)]
mod property_tests;

pub use generator::*;
pub use point_buy::*;
pub use scores::*;
