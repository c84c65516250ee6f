//! Configuration: generator settings and the track table

mod generator;
mod track;

pub use generator::*;
pub use track::*;
