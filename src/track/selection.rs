//! Track selection: automatic priority order, named requests, and
//! resolution of a chosen track into a concrete `SkillTrack`

use serde::{Deserialize, Serialize};

use super::{
    check_acceptance, roll_craft, roll_magic_school, spell_skill_name, AcceptanceCheck,
    CraftSpecialization, MagicSpecialization, TrackContext, TrackId, TrackRequest,
};
use crate::background::{SocialClass, SubClass, WealthLevel};
use crate::config::{Survivability, TrackDefinition, TrackRepository};
use crate::dice::{roll_d8_reroll_five, roll_die, DiceRoller};
use crate::error::Result;

/// Bonus starting skill for poor or laboring Worker picks
pub const LABORER_SKILL: &str = "Laborer";

/// Number of leading table entries granted as starting skills
const INITIAL_SKILL_COUNT: usize = 2;

/// Track-specific extras. At most one applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Specialization {
    Plain,
    Craft(CraftSpecialization),
    Magic(MagicSpecialization),
}

/// A track resolved for one character; immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTrack {
    pub track: TrackId,
    pub survivability: i32,
    /// The d8 behind a rolled survivability target
    pub survivability_roll: Option<u32>,
    pub initial_skills: Vec<String>,
    pub specialization: Specialization,
}

impl SkillTrack {
    /// Spell progression for Magic tracks
    pub fn spells(&self) -> Option<&'static [&'static str]> {
        match &self.specialization {
            Specialization::Magic(magic) => Some(magic.school.spells()),
            _ => None,
        }
    }
}

/// Result of `create_track`: the acceptance outcome and, when accepted,
/// the resolved track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSelection {
    pub requested: TrackRequest,
    /// The check that decided the outcome
    pub acceptance: AcceptanceCheck,
    /// Every check made, in order; automatic selection may try several tracks
    pub checks: Vec<AcceptanceCheck>,
    /// Die that picked among the accepted tracks, for random-eligible requests
    #[serde(default)]
    pub pick_roll: Option<u32>,
    pub track: Option<SkillTrack>,
}

impl TrackSelection {
    pub fn is_accepted(&self) -> bool {
        self.track.is_some()
    }
}

/// Track picked by automatic selection, with the checks that led there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimalTrack {
    pub track: TrackId,
    pub checks: Vec<AcceptanceCheck>,
    pub pick_roll: Option<u32>,
}

/// Auto-accepting track that suits the character's upbringing
fn background_track(sub_class: SubClass) -> Option<TrackId> {
    match sub_class {
        SubClass::Crafts => Some(TrackId::Crafts),
        SubClass::Laborer | SubClass::Farmer | SubClass::Servant => Some(TrackId::Worker),
        _ => None,
    }
}

fn merchant_first(context: &TrackContext) -> bool {
    context.social_class == SocialClass::Merchant || context.wealth == WealthLevel::Rich
}

/// Try tracks in priority order and take the first that accepts:
/// Officer, Ranger, Navy, Army, Merchant (merchant-born or rich only),
/// the background track, Merchant, Crafts, Worker, Random.
pub fn select_optimal_track<R: DiceRoller + ?Sized>(
    roller: &mut R,
    context: &TrackContext,
) -> Result<OptimalTrack> {
    let mut order = vec![TrackId::Officer, TrackId::Ranger, TrackId::Navy, TrackId::Army];
    if merchant_first(context) {
        order.push(TrackId::Merchant);
    }
    if let Some(track) = background_track(context.sub_class) {
        order.push(track);
    }
    if !order.contains(&TrackId::Merchant) {
        order.push(TrackId::Merchant);
    }
    order.extend([TrackId::Crafts, TrackId::Worker, TrackId::Random]);

    let mut checks = Vec::new();
    for track in order {
        let check = check_acceptance(roller, track, context)?;
        let accepted = check.accepted;
        checks.push(check);
        if accepted {
            tracing::debug!(track = %track, attempts = checks.len(), "auto-selected track");
            return Ok(OptimalTrack {
                track,
                checks,
                pick_roll: None,
            });
        }
    }

    // Random always accepts, so the loop returns before this
    Ok(OptimalTrack {
        track: TrackId::Random,
        checks,
        pick_roll: None,
    })
}

/// Check every track, then pick uniformly among those that accepted with
/// one die sized to the accepted count
pub fn select_random_eligible_track<R: DiceRoller + ?Sized>(
    roller: &mut R,
    context: &TrackContext,
) -> Result<OptimalTrack> {
    let mut checks = Vec::with_capacity(TrackId::ALL.len());
    let mut eligible = Vec::new();
    for track in TrackId::ALL {
        let check = check_acceptance(roller, track, context)?;
        if check.accepted {
            eligible.push(track);
        }
        checks.push(check);
    }

    // Random always accepts
    if eligible.is_empty() {
        eligible.push(TrackId::Random);
    }

    let pick_roll = roll_die(roller, eligible.len() as u32)?;
    let track = eligible
        .get(pick_roll.saturating_sub(1) as usize)
        .copied()
        .unwrap_or(TrackId::Random);
    tracing::debug!(
        track = %track,
        eligible = eligible.len(),
        roll = pick_roll,
        "picked random eligible track"
    );

    Ok(OptimalTrack {
        track,
        checks,
        pick_roll: Some(pick_roll),
    })
}

/// Resolve survivability, starting skills and specialization for a track
pub fn build_skill_track<R: DiceRoller + ?Sized>(
    roller: &mut R,
    definition: &TrackDefinition,
    context: &TrackContext,
) -> SkillTrack {
    let (survivability, survivability_roll) = match definition.survivability {
        Survivability::Fixed(target) => (target, None),
        Survivability::Rolled => {
            let roll = roll_d8_reroll_five(roller);
            (roll as i32, Some(roll))
        }
    };

    let mut initial_skills: Vec<String> = definition
        .skills
        .iter()
        .take(INITIAL_SKILL_COUNT)
        .cloned()
        .collect();

    let specialization = match definition.id {
        TrackId::Crafts => Specialization::Craft(roll_craft(roller)),
        TrackId::Magic => {
            let magic = roll_magic_school(roller);
            if let Some(first) = magic.school.spells().first() {
                initial_skills.push(spell_skill_name(first));
            }
            Specialization::Magic(magic)
        }
        _ => Specialization::Plain,
    };

    if definition.id == TrackId::Worker
        && (context.wealth == WealthLevel::Subsistence || context.sub_class == SubClass::Laborer)
        && !initial_skills.iter().any(|skill| skill == LABORER_SKILL)
    {
        initial_skills.push(LABORER_SKILL.to_string());
    }

    SkillTrack {
        track: definition.id,
        survivability,
        survivability_roll,
        initial_skills,
        specialization,
    }
}

/// Create a track for a character: by priority, at random among the
/// tracks that accept, or by name.
///
/// Rejections, including unknown names, come back as a `TrackSelection`
/// without a track; errors are reserved for a broken repository.
pub fn create_track<R: DiceRoller + ?Sized>(
    roller: &mut R,
    repository: &TrackRepository,
    request: &TrackRequest,
    context: &TrackContext,
) -> Result<TrackSelection> {
    let (track, checks, pick_roll) = match request {
        TrackRequest::Auto => {
            let optimal = select_optimal_track(roller, context)?;
            (optimal.track, optimal.checks, None)
        }
        TrackRequest::RandomEligible => {
            let picked = select_random_eligible_track(roller, context)?;
            (picked.track, picked.checks, picked.pick_roll)
        }
        TrackRequest::Named(name) => match TrackId::parse(name) {
            Some(track) => (track, vec![check_acceptance(roller, track, context)?], None),
            None => {
                tracing::warn!(requested = %name, "unknown track requested");
                let check = AcceptanceCheck::unknown(name);
                return Ok(TrackSelection {
                    requested: request.clone(),
                    acceptance: check.clone(),
                    checks: vec![check],
                    pick_roll: None,
                    track: None,
                });
            }
        },
    };

    let acceptance = match checks.iter().rev().find(|check| check.track == track.as_str()) {
        Some(check) => check.clone(),
        None => AcceptanceCheck::unknown(track.as_str()),
    };

    let skill_track = if acceptance.accepted {
        let definition = repository.get(track)?;
        Some(build_skill_track(roller, &definition, context))
    } else {
        None
    };

    Ok(TrackSelection {
        requested: request.clone(),
        acceptance,
        checks,
        pick_roll,
        track: skill_track,
    })
}
