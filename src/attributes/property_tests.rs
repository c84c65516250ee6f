//! Property tests for attributes module
//!
//! Property 4: Modifier table is monotonic and linear past 18
//! Property 5: Rolled scores stay within 3..=18
//! Property 6: Derived stats follow their formulas

use proptest::prelude::*;

use crate::attributes::{
    generate_attributes, modifier, Attribute, AttributeSet, DerivedStats, GenerationMethod,
};
use crate::dice::SeededRoller;

fn method_strategy() -> impl Strategy<Value = GenerationMethod> {
    prop_oneof![
        Just(GenerationMethod::ThreeD6),
        Just(GenerationMethod::FourD6DropLowest),
    ]
}

proptest! {
    /// Property 4: modifier never decreases as the score rises
    #[test]
    fn prop_modifier_monotonic(value in -20..60i32) {
        prop_assert!(modifier(value + 1) >= modifier(value));
    }

    /// Property 4.2: above 18 each point adds one
    #[test]
    fn prop_modifier_linear_above_table(value in 18..200i32) {
        prop_assert_eq!(modifier(value + 1) - modifier(value), 1);
    }

    /// Property 5: every rolled score is a legal 3..=18 value matching its kept dice
    #[test]
    fn prop_rolled_scores_in_range(seed in any::<u64>(), method in method_strategy()) {
        let mut roller = SeededRoller::seeded(seed);
        let rolled = generate_attributes(&mut roller, method).unwrap();

        prop_assert_eq!(rolled.attributes.rolls().len(), 6);
        for roll in rolled.attributes.rolls() {
            let score = rolled.attributes.get(roll.attribute);
            prop_assert!((3..=18).contains(&score));
            prop_assert_eq!(score as u32, roll.roll.total);
            prop_assert_eq!(roll.roll.kept.len(), 3);
        }
    }

    /// Property 6: body is fatigue minus WIS, once the d6 difference is removed
    #[test]
    fn prop_derived_formula(seed in any::<u64>(), fatigue in 1..=6u32, body in 1..=6u32) {
        let mut roller = SeededRoller::seeded(seed);
        let rolled = generate_attributes(&mut roller, GenerationMethod::ThreeD6).unwrap();
        let attrs: &AttributeSet = &rolled.attributes;
        let derived = DerivedStats::from_rolls(attrs, fatigue, body);

        prop_assert_eq!(
            derived.fatigue_points - fatigue as i32,
            derived.body_points - body as i32 + attrs.get(Attribute::Wis)
        );
        prop_assert!(derived.body_points >= attrs.get(Attribute::Con) + attrs.physical_best() + 1 - 10);
    }
}
