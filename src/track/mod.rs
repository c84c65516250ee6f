//! Career tracks: identifiers, acceptance rules, selection and specializations

mod eligibility;
mod id;
mod selection;
mod specialization;

#[cfg(test)]
mod property_tests;

pub use eligibility::*;
pub use id::*;
pub use selection::*;
pub use specialization::*;
