//! `Character` record and the generator that builds it

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::attributes::{
    generate_attributes, validate_point_buy, Attribute, AttributeSet, DerivedStats,
    GenerationMethod, RolledAttributes,
};
use crate::background::{generate_physical_traits, generate_social_traits, PhysicalTraits, SocialTraits};
use crate::config::{GeneratorConfig, TrackRepository};
use crate::dice::{DiceRoller, SeededRoller};
use crate::error::{ChargenError, Result};
use crate::simulator::{simulate_prior_experience, PriorExperience};
use crate::skills::CharacterSkillLedger;
use crate::track::{
    create_track, get_track_availability, AvailabilityInfo, SkillTrack, TrackContext, TrackId,
    TrackRequest, TrackSelection,
};

/// A fully generated character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Scores as generated, before the upbringing bonus and aging
    pub attributes: AttributeSet,
    pub derived: DerivedStats,
    pub physical: PhysicalTraits,
    pub social: SocialTraits,
    pub availability: BTreeMap<TrackId, AvailabilityInfo>,
    /// Outcome for the requested track
    pub selection: TrackSelection,
    /// Set when the requested track refused and Random was taken instead
    pub fallback: Option<TrackSelection>,
    pub track: SkillTrack,
    pub prior_experience: PriorExperience,
    pub skills: CharacterSkillLedger,
    pub alive: bool,
    /// Seed used, when generation was seeded
    pub seed: Option<u64>,
}

impl Character {
    /// Generated scores plus the location bonus; what track checks and
    /// the career simulation see
    pub fn background_attributes(&self) -> AttributeSet {
        self.attributes.with_location(&self.social.location)
    }

    /// Scores after the location bonus and aging from prior experience
    pub fn current_attributes(&self) -> AttributeSet {
        self.background_attributes()
            .with_aging(&self.prior_experience.aging)
    }

    pub fn age(&self) -> u32 {
        self.prior_experience.final_age()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builds characters from a config against a shared track repository
#[derive(Debug, Clone)]
pub struct CharacterGenerator {
    repository: Arc<TrackRepository>,
    config: GeneratorConfig,
}

impl CharacterGenerator {
    pub fn new(repository: Arc<TrackRepository>, config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { repository, config })
    }

    /// Generator over the built-in track table
    pub fn with_builtin_tracks(config: GeneratorConfig) -> Result<Self> {
        Self::new(Arc::new(TrackRepository::builtin()?), config)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn repository(&self) -> &Arc<TrackRepository> {
        &self.repository
    }

    /// Generate with a roller seeded from the config, or from entropy
    pub fn generate_seeded(&self) -> Result<Character> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut roller = SeededRoller::seeded(seed);
        let mut character = self.generate(&mut roller)?;
        character.seed = Some(seed);
        Ok(character)
    }

    /// Generate with rolled attributes
    pub fn generate<R: DiceRoller + ?Sized>(&self, roller: &mut R) -> Result<Character> {
        if self.config.method == GenerationMethod::PointBuy {
            return Err(ChargenError::InvalidConfig(
                "point-buy characters need an allocation; use generate_point_buy".to_string(),
            ));
        }
        let RolledAttributes {
            attributes,
            derived,
        } = generate_attributes(roller, self.config.method)?;
        self.finish(roller, attributes, derived)
    }

    /// Generate from a player's point-buy allocation
    pub fn generate_point_buy<R: DiceRoller + ?Sized>(
        &self,
        roller: &mut R,
        allocation: &HashMap<String, i32>,
    ) -> Result<Character> {
        let attributes = validate_point_buy(allocation, self.config.point_buy_budget)?;
        let derived = DerivedStats::roll(roller, &attributes)?;
        self.finish(roller, attributes, derived)
    }

    /// Generate around attributes the caller already has
    pub fn generate_with_attributes<R: DiceRoller + ?Sized>(
        &self,
        roller: &mut R,
        attributes: AttributeSet,
    ) -> Result<Character> {
        let derived = DerivedStats::roll(roller, &attributes)?;
        self.finish(roller, attributes, derived)
    }

    fn finish<R: DiceRoller + ?Sized>(
        &self,
        roller: &mut R,
        attributes: AttributeSet,
        derived: DerivedStats,
    ) -> Result<Character> {
        let config = &self.config;

        let physical = generate_physical_traits(roller, attributes.get(Attribute::Str));
        let social =
            generate_social_traits(roller, attributes.get(Attribute::Int), config.allow_rich_wealth)?;

        let adjusted = attributes.with_location(&social.location);

        let context = TrackContext::new(
            adjusted.modifiers(),
            social.provenance.social_class,
            social.provenance.sub_class,
            social.wealth.level,
        )
        .with_promoted(config.promoted);
        let availability = get_track_availability(&context);

        let selection = create_track(roller, &self.repository, &config.track, &context)?;
        let (track, fallback) = match &selection.track {
            Some(track) => (track.clone(), None),
            None => {
                tracing::debug!(
                    requested = %String::from(config.track.clone()),
                    reason = %selection.acceptance.reason,
                    "requested track refused, falling back to Random"
                );
                let fallback = create_track(
                    roller,
                    &self.repository,
                    &TrackRequest::from(TrackId::Random),
                    &context,
                )?;
                let track = fallback.track.clone().ok_or_else(|| {
                    ChargenError::InvalidTrackData("Random track refused a character".to_string())
                })?;
                (track, Some(fallback))
            }
        };

        let definition = self.repository.get(track.track)?;
        let prior_experience = simulate_prior_experience(
            roller,
            &track,
            &definition,
            config.years,
            adjusted.modifier(Attribute::Con),
            adjusted.scores(),
            config.allow_aging,
        )?;

        // with no years simulated the starting skills still count
        let career = if prior_experience.years.is_empty() {
            &track.initial_skills
        } else {
            &prior_experience.skills
        };
        let skills = CharacterSkillLedger::from_skills(
            social.location.skills.iter().chain(career),
            config.free_skill_points,
        );

        let alive = !prior_experience.died;
        tracing::info!(
            track = %track.track,
            years = prior_experience.years.len(),
            alive,
            "generated character"
        );

        Ok(Character {
            attributes,
            derived,
            physical,
            social,
            availability,
            selection,
            fallback,
            track,
            prior_experience,
            skills,
            alive,
            seed: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeMap;

    fn generator(config: GeneratorConfig) -> CharacterGenerator {
        CharacterGenerator::with_builtin_tracks(config).unwrap()
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = GeneratorConfig {
            seed: Some(1234),
            ..GeneratorConfig::default()
        };
        let generator = generator(config);
        let first = generator.generate_seeded().unwrap();
        let second = generator.generate_seeded().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.seed, Some(1234));
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn test_generated_character_is_consistent() {
        let generator = generator(GeneratorConfig::default());
        for seed in 0..50 {
            let character = generator.generate(&mut SeededRoller::seeded(seed)).unwrap();
            assert_eq!(character.availability.len(), TrackId::ALL.len());
            assert!(character.selection.is_accepted() || character.fallback.is_some());
            assert_eq!(character.alive, !character.prior_experience.died);
            assert!(character.prior_experience.years.len() <= 4);
            for (_, score) in character.attributes.scores().iter() {
                assert!((3..=18).contains(&score));
            }
        }
    }

    #[test]
    fn test_refused_track_falls_back_to_random() {
        let config = GeneratorConfig {
            track: TrackRequest::from(TrackId::Officer),
            allow_rich_wealth: false,
            ..GeneratorConfig::default()
        };
        let character = generator(config)
            .generate(&mut SeededRoller::seeded(5))
            .unwrap();
        assert!(!character.selection.is_accepted());
        assert_eq!(character.track.track, TrackId::Random);
        assert!(character.fallback.is_some());
    }

    #[test]
    fn test_random_eligible_from_config() {
        let config = GeneratorConfig::from_json_str(r#"{"track": "random-eligible"}"#).unwrap();
        assert_eq!(config.track, TrackRequest::RandomEligible);
        let generator = generator(config);
        for seed in 0..20 {
            let character = generator.generate(&mut SeededRoller::seeded(seed)).unwrap();
            assert!(character.selection.is_accepted());
            assert!(character.fallback.is_none());
            assert!(character.selection.pick_roll.is_some());
            assert_eq!(character.selection.checks.len(), TrackId::ALL.len());
        }
    }

    #[test]
    fn test_unknown_track_falls_back_to_random() {
        let config = GeneratorConfig {
            track: TrackRequest::named("Pirate"),
            ..GeneratorConfig::default()
        };
        let character = generator(config)
            .generate(&mut SeededRoller::seeded(8))
            .unwrap();
        assert_eq!(character.selection.acceptance.reason, "Unknown track: Pirate");
        assert_eq!(character.track.track, TrackId::Random);
    }

    #[test]
    fn test_point_buy_generation() {
        let config = GeneratorConfig {
            method: GenerationMethod::PointBuy,
            years: 0,
            free_skill_points: 3,
            ..GeneratorConfig::default()
        };
        let generator = generator(config);
        let mut roller = SeededRoller::seeded(2);
        assert!(generator.generate(&mut roller).is_err());

        let allocation: HashMap<String, i32> = Attribute::ALL
            .iter()
            .zip([13, 11, 10, 10, 10, 9])
            .map(|(attribute, value)| (attribute.to_string(), value))
            .collect();
        let character = generator.generate_point_buy(&mut roller, &allocation).unwrap();
        assert_eq!(character.attributes.method(), GenerationMethod::PointBuy);
        assert!(character.prior_experience.years.is_empty());
        assert!(character.alive);
        assert_eq!(character.skills.free_points(), 3);
        assert_eq!(
            character.skills.total_xp() as usize,
            3 + character.social.location.skills.len() + character.track.initial_skills.len()
        );

        let mut short = allocation.clone();
        short.remove("WIS");
        let err = generator.generate_point_buy(&mut roller, &short).unwrap_err();
        assert_eq!(err.to_string(), "Point-buy rejected: Missing attribute: WIS");
    }

    #[test]
    fn test_long_career_ages_character() {
        let config = GeneratorConfig {
            years: 40,
            allow_aging: true,
            ..GeneratorConfig::default()
        };
        let generator = generator(config);
        let attributes =
            AttributeSet::from_scores(AttributeMap::from_fn(|_| 18), GenerationMethod::ThreeD6);
        let character = generator
            .generate_with_attributes(&mut SeededRoller::seeded(21), attributes)
            .unwrap();
        let background = character.background_attributes();
        let current = character.current_attributes();
        assert_eq!(current.get(Attribute::Chr), 18);
        assert_eq!(
            current.get(Attribute::Con),
            background.get(Attribute::Con) + character.prior_experience.aging.penalty(Attribute::Con)
        );
        assert_eq!(current.scores(), &character.prior_experience.final_scores);
        assert_eq!(character.age(), 16 + character.prior_experience.years.len() as u32);
    }

    #[test]
    fn test_location_bonus_feeds_tracks_and_literacy() {
        let generator = generator(GeneratorConfig::default());
        for seed in 0..30 {
            let character = generator.generate(&mut SeededRoller::seeded(seed)).unwrap();
            let location = &character.social.location;
            let background = character.background_attributes();
            let bonus = location.bonus_attribute;
            assert_eq!(
                background.get(bonus),
                character.attributes.get(bonus) + location.bonus_value
            );
            assert_eq!(
                character.social.literacy.int_value,
                background.get(Attribute::Int)
            );
            let expected = get_track_availability(&TrackContext::new(
                background.modifiers(),
                character.social.provenance.social_class,
                character.social.provenance.sub_class,
                character.social.wealth.level,
            ));
            assert_eq!(character.availability, expected);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig {
            years: 30,
            ..GeneratorConfig::default()
        };
        assert!(CharacterGenerator::with_builtin_tracks(config).is_err());
    }
}
