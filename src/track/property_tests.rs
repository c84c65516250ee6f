//! Property-based tests for track eligibility and selection
//!
//! Property 10: Availability hints never consume randomness and cover every track
//! Property 11: A "guaranteed" threshold track accepts on any roll, an "impossible" one never does
//! Property 12: Automatic selection always lands on an accepted track
//! Property 13: Specializations match their track
//! Property 13.1: A random-eligible pick is always a track that accepted

use proptest::prelude::*;

use super::*;
use crate::attributes::AttributeMap;
use crate::background::{SocialClass, SubClass, WealthLevel};
use crate::config::TrackRepository;
use crate::dice::SeededRoller;

fn arb_social() -> impl Strategy<Value = (SocialClass, SubClass)> {
    prop_oneof![
        Just((SocialClass::Commoner, SubClass::Laborer)),
        Just((SocialClass::Commoner, SubClass::Farmer)),
        Just((SocialClass::Commoner, SubClass::Crafts)),
        Just((SocialClass::Commoner, SubClass::Servant)),
        Just((SocialClass::Merchant, SubClass::Shopkeeper)),
        Just((SocialClass::Merchant, SubClass::MerchantPrince)),
        Just((SocialClass::Nobility, SubClass::Gentry)),
        Just((SocialClass::Nobility, SubClass::Duke)),
    ]
}

fn arb_wealth() -> impl Strategy<Value = WealthLevel> {
    prop_oneof![
        Just(WealthLevel::Subsistence),
        Just(WealthLevel::Moderate),
        Just(WealthLevel::Merchant),
        Just(WealthLevel::Rich),
    ]
}

fn arb_context() -> impl Strategy<Value = TrackContext> {
    (
        prop::array::uniform6(-5i32..=5),
        arb_social(),
        arb_wealth(),
        any::<bool>(),
    )
        .prop_map(|(mods, (social_class, sub_class), wealth, promoted)| {
            let modifiers = AttributeMap {
                str_: mods[0],
                dex: mods[1],
                int: mods[2],
                wis: mods[3],
                con: mods[4],
                chr: mods[5],
            };
            TrackContext::new(modifiers, social_class, sub_class, wealth).with_promoted(promoted)
        })
}

proptest! {
    /// Property 10: Hints are deterministic and complete
    #[test]
    fn prop_availability_is_complete(context in arb_context()) {
        let first = get_track_availability(&context);
        let second = get_track_availability(&context);
        prop_assert_eq!(first.len(), TrackId::ALL.len());
        prop_assert_eq!(first, second);
    }

    /// Property 11: Guaranteed and impossible hints agree with actual rolls
    #[test]
    fn prop_availability_matches_checks(context in arb_context(), seed in any::<u64>()) {
        let hints = get_track_availability(&context);
        let mut roller = SeededRoller::seeded(seed);

        for (track, info) in hints {
            let check = check_acceptance(&mut roller, track, &context).unwrap();
            match info.availability {
                Availability::Guaranteed => prop_assert!(check.accepted, "{} should accept", track),
                Availability::Impossible => prop_assert!(!check.accepted, "{} should reject", track),
                Availability::RollRequired => prop_assert!(check.roll.is_some()),
            }
        }
    }

    /// Property 12: The selected track's deciding check accepted, and every earlier one rejected
    #[test]
    fn prop_auto_selection_accepts(context in arb_context(), seed in any::<u64>()) {
        let mut roller = SeededRoller::seeded(seed);
        let optimal = select_optimal_track(&mut roller, &context).unwrap();

        let (last, earlier) = optimal.checks.split_last().unwrap();
        prop_assert!(last.accepted);
        prop_assert_eq!(last.track.as_str(), optimal.track.as_str());
        prop_assert!(earlier.iter().all(|check| !check.accepted));
    }

    /// Property 13: Only Crafts and Magic carry a specialization
    #[test]
    fn prop_specialization_matches_track(context in arb_context(), seed in any::<u64>()) {
        let repository = TrackRepository::builtin().unwrap();
        let mut roller = SeededRoller::seeded(seed);

        for track in TrackId::ALL {
            let definition = repository.get(track).unwrap();
            let built = build_skill_track(&mut roller, &definition, &context);
            prop_assert_eq!(built.track, track);
            prop_assert!(built.initial_skills.len() >= 2);
            match (&built.specialization, track) {
                (Specialization::Craft(_), TrackId::Crafts) => {}
                (Specialization::Magic(_), TrackId::Magic) => {}
                (Specialization::Plain, other) => {
                    prop_assert!(other != TrackId::Crafts && other != TrackId::Magic)
                }
                (spec, other) => prop_assert!(false, "{:?} on {}", spec, other),
            }
            if track == TrackId::Random {
                prop_assert!(built.survivability_roll.is_some());
                prop_assert!(built.survivability != 5);
            }
        }
    }

    /// Property 13.1: Random-eligible selection only lands on accepted tracks
    #[test]
    fn prop_random_eligible_accepts(context in arb_context(), seed in any::<u64>()) {
        let repository = TrackRepository::builtin().unwrap();
        let mut roller = SeededRoller::seeded(seed);
        let selection =
            create_track(&mut roller, &repository, &TrackRequest::RandomEligible, &context).unwrap();

        prop_assert_eq!(selection.checks.len(), TrackId::ALL.len());
        let accepted = selection.checks.iter().filter(|check| check.accepted).count();
        let pick = selection.pick_roll.unwrap();
        prop_assert!((1..=accepted as u32).contains(&pick));
        prop_assert!(selection.acceptance.accepted);
        let track = selection.track.unwrap();
        prop_assert_eq!(track.track.as_str(), selection.acceptance.track.as_str());
    }
}
