//! Aging thresholds and the cumulative penalties they leave behind

use serde::{Deserialize, Serialize};

use crate::attributes::{Attribute, AttributeMap, AttributeSet};

/// Attribute losses applied once when prior experience reaches a year count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingThreshold {
    pub experience_years: u32,
    /// Per-attribute deltas; CHR is always zero
    pub deltas: AttributeMap<i32>,
}

const fn threshold(
    experience_years: u32,
    str_: i32,
    dex: i32,
    int: i32,
    wis: i32,
    con: i32,
) -> AgingThreshold {
    AgingThreshold {
        experience_years,
        deltas: AttributeMap {
            str_,
            dex,
            int,
            wis,
            con,
            chr: 0,
        },
    }
}

/// Sorted by experience years
pub const AGING_THRESHOLDS: [AgingThreshold; 10] = [
    threshold(19, 0, 0, 0, 0, -1),
    threshold(24, -1, -1, 0, 0, 0),
    threshold(29, -1, 0, 0, 0, -1),
    threshold(34, 0, -1, 0, 0, -1),
    threshold(39, -1, -1, 0, 0, -1),
    threshold(44, -1, -1, -1, 0, -1),
    threshold(49, -2, -1, 0, -1, -2),
    threshold(54, -2, -2, -1, -1, -2),
    threshold(59, -3, -2, -1, -1, -3),
    threshold(64, -3, -3, -2, -2, -3),
];

/// Look up the threshold for an exact experience-year count
pub fn aging_threshold(experience_years: u32) -> Option<&'static AgingThreshold> {
    AGING_THRESHOLDS
        .binary_search_by_key(&experience_years, |t| t.experience_years)
        .ok()
        .map(|index| &AGING_THRESHOLDS[index])
}

/// Penalties accumulated so far. Each threshold is applied at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingEffects {
    pub penalties: AttributeMap<i32>,
    /// Experience-year counts already applied, in order
    pub applied: Vec<u32>,
}

impl AgingEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the threshold for `experience_years`, if there is one and it
    /// has not been applied yet. Returns the deltas applied.
    pub fn apply_threshold(&mut self, experience_years: u32) -> Option<AttributeMap<i32>> {
        let threshold = aging_threshold(experience_years)?;
        if self.applied.contains(&experience_years) {
            return None;
        }

        for attribute in Attribute::ALL {
            *self.penalties.get_mut(attribute) += threshold.deltas.get(attribute);
        }
        self.applied.push(experience_years);

        tracing::trace!(
            experience_years,
            penalties = ?self.penalties,
            "aging threshold applied"
        );
        Some(threshold.deltas)
    }

    #[inline]
    pub fn penalty(&self, attribute: Attribute) -> i32 {
        self.penalties.get(attribute)
    }

    /// Sum of all current penalties (zero or negative)
    pub fn total_penalty(&self) -> i32 {
        self.penalties.sum()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Scores after aging
    pub fn apply_to(&self, scores: &AttributeMap<i32>) -> AttributeMap<i32> {
        AttributeMap::from_fn(|attribute| scores.get(attribute) + self.penalty(attribute))
    }
}

impl AttributeSet {
    /// This set as it reads after aging. Roll provenance is kept.
    pub fn with_aging(&self, aging: &AgingEffects) -> AttributeSet {
        AttributeSet::new(aging.apply_to(self.scores()), self.method(), self.rolls().to_vec())
    }
}
