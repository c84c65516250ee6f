//! Point-buy validation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::{Attribute, AttributeMap, AttributeSet, GenerationMethod};

pub const POINT_BUY_MIN: i32 = 3;
pub const POINT_BUY_MAX: i32 = 18;

/// Why a point-buy allocation was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointBuyError {
    #[error("Missing attribute: {0}")]
    MissingAttribute(Attribute),

    #[error("{attribute} must be between {min} and {max} (got {value})")]
    OutOfRange {
        attribute: Attribute,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("Total points must equal {budget} (got {total})")]
    BudgetMismatch { budget: i32, total: i32 },
}

/// Validate a supplied allocation against a budget.
///
/// Keys are matched case-insensitively; keys that are not attributes are ignored.
pub fn validate_point_buy(
    allocation: &HashMap<String, i32>,
    budget: i32,
) -> Result<AttributeSet, PointBuyError> {
    let mut found: AttributeMap<Option<i32>> = AttributeMap::default();
    for (name, &value) in allocation {
        if let Ok(attribute) = name.parse::<Attribute>() {
            *found.get_mut(attribute) = Some(value);
        }
    }

    let mut scores = AttributeMap::<i32>::default();
    for attribute in Attribute::ALL {
        let value = found
            .get(attribute)
            .ok_or(PointBuyError::MissingAttribute(attribute))?;
        if !(POINT_BUY_MIN..=POINT_BUY_MAX).contains(&value) {
            return Err(PointBuyError::OutOfRange {
                attribute,
                value,
                min: POINT_BUY_MIN,
                max: POINT_BUY_MAX,
            });
        }
        *scores.get_mut(attribute) = value;
    }

    let total = scores.sum();
    if total != budget {
        return Err(PointBuyError::BudgetMismatch { budget, total });
    }

    Ok(AttributeSet::from_scores(scores, GenerationMethod::PointBuy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocation(values: [i32; 6]) -> HashMap<String, i32> {
        Attribute::ALL
            .iter()
            .zip(values)
            .map(|(a, v)| (a.to_string(), v))
            .collect()
    }

    #[test]
    fn test_valid_allocation() {
        let set = validate_point_buy(&allocation([13, 12, 10, 10, 10, 8]), 63).unwrap();
        assert_eq!(set.get(Attribute::Str), 13);
        assert_eq!(set.method(), GenerationMethod::PointBuy);
        assert!(set.rolls().is_empty());
    }

    #[test]
    fn test_missing_attribute() {
        let mut alloc = allocation([13, 12, 10, 10, 10, 8]);
        alloc.remove("WIS");
        let err = validate_point_buy(&alloc, 63).unwrap_err();
        assert_eq!(err, PointBuyError::MissingAttribute(Attribute::Wis));
        assert_eq!(err.to_string(), "Missing attribute: WIS");
    }

    #[test]
    fn test_out_of_range() {
        let err = validate_point_buy(&allocation([19, 12, 10, 10, 10, 2]), 63).unwrap_err();
        assert_eq!(err.to_string(), "STR must be between 3 and 18 (got 19)");
    }

    #[test]
    fn test_budget_mismatch() {
        let err = validate_point_buy(&allocation([10, 10, 10, 10, 10, 10]), 63).unwrap_err();
        assert_eq!(err, PointBuyError::BudgetMismatch { budget: 63, total: 60 });
        assert_eq!(err.to_string(), "Total points must equal 63 (got 60)");
    }

    #[test]
    fn test_lowercase_keys_accepted() {
        let alloc: HashMap<String, i32> = allocation([13, 12, 10, 10, 10, 8])
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        assert!(validate_point_buy(&alloc, 63).is_ok());
    }
}
