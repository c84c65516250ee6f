//! Property tests for background module
//!
//! Property 7: Literacy is exactly "3d6 < INT - difficulty"
//! Property 8: Wealth never lands in the Rich band when disallowed
//! Property 9: Physical traits track their demon die

use proptest::prelude::*;

use crate::attributes::Attribute;
use crate::background::{
    generate_physical_traits, generate_social_traits, roll_wealth, Literacy, LocationKind,
    WealthLevel,
};
use crate::dice::SeededRoller;

proptest! {
    /// Property 7: the literacy verdict is a pure comparison
    #[test]
    fn prop_literacy_rule(int_value in 3..=18i32, modifier in 0..=6i32, roll in 3..=18u32) {
        let literacy = Literacy::evaluate(int_value, modifier, roll);
        prop_assert_eq!(literacy.target, int_value - modifier);
        prop_assert_eq!(literacy.literate, (roll as i32) < int_value - modifier);
    }

    /// Property 8: with allow_rich off the result is never Rich and every reroll was Rich-band
    #[test]
    fn prop_wealth_without_rich(seed in any::<u64>()) {
        let mut roller = SeededRoller::seeded(seed);
        let wealth = roll_wealth(&mut roller, false);
        prop_assert_ne!(wealth.level, WealthLevel::Rich);
        prop_assert!(wealth.rerolls.iter().all(|&r| r >= 96));
        prop_assert_eq!(wealth.bonus_roll.is_some(), wealth.level == WealthLevel::Merchant);
    }

    /// Property 8.2: social traits are internally consistent
    #[test]
    fn prop_social_traits_consistent(seed in any::<u64>(), int_value in 3..=18i32) {
        let mut roller = SeededRoller::seeded(seed);
        let social = generate_social_traits(&mut roller, int_value, true).unwrap();

        prop_assert_eq!(social.literacy.modifier, social.location.kind.literacy_modifier());
        prop_assert_eq!(
            social.literacy.int_value,
            int_value + social.location.bonus_for(Attribute::Int)
        );
        match social.location.kind {
            LocationKind::Rural => {
                prop_assert_eq!(social.location.skills.len(), 2);
                prop_assert_ne!(&social.location.skills[0], &social.location.skills[1]);
            }
            LocationKind::Village => prop_assert_eq!(social.location.sub_rolls.len(), 2),
            _ => prop_assert!(social.location.sub_rolls.is_empty()),
        }
        prop_assert!(social.wealth.coins >= social.wealth.level.base_coins());
    }

    /// Property 9: height and weight move with the direction of the demon die
    #[test]
    fn prop_physical_traits_follow_die(seed in any::<u64>(), strength in 3..=18i32) {
        let mut roller = SeededRoller::seeded(seed);
        let traits = generate_physical_traits(&mut roller, strength);

        if traits.height.roll.intensity > 1 {
            prop_assert!(traits.height.inches > 74);
        }
        if traits.height.roll.intensity < -1 {
            prop_assert!(traits.height.inches < 58);
        }
        prop_assert_eq!(traits.weight.strength_bonus, strength / 2);
    }
}
