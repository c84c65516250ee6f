//! Prior-experience simulation: one year at a time until the years run
//! out or the character dies

use serde::{Deserialize, Serialize};

use super::AgingEffects;
use crate::attributes::AttributeMap;
use crate::config::TrackDefinition;
use crate::dice::{roll_dice, roll_die, DiceRoller};
use crate::error::{ChargenError, Result};
use crate::track::{mastery_description, spell_skill_name, SkillTrack, TrackId, MAX_MASTERY_LEVEL};

/// Age at which prior experience begins
pub const START_AGE: u32 = 16;
/// Year limit without aging
pub const MAX_STANDARD_YEARS: u32 = 18;
/// Year limit when aging is allowed; the last aging threshold
pub const MAX_YEARS_WITH_AGING: u32 = 64;

/// Die rolled for the yearly skill on table-driven tracks
const SKILL_DIE: u32 = 12;

/// One simulated year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearResult {
    /// Years of experience at the end of this year, starting from 1
    pub year: u32,
    pub age: u32,
    pub track: TrackId,
    pub skill: String,
    /// The d12 behind a table skill; spells advance without a roll
    pub skill_roll: Option<u32>,
    /// Mastery reached with this year's spell
    pub mastery: Option<String>,
    pub survival_dice: Vec<u32>,
    pub survival_roll: u32,
    /// Track modifier plus current aging penalties
    pub survival_modifier: i32,
    pub survival_total: i32,
    pub survivability: i32,
    pub survived: bool,
    /// Aging deltas first applied this year
    pub aging: Option<AttributeMap<i32>>,
}

/// Outcome of a prior-experience run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorExperience {
    pub years: Vec<YearResult>,
    pub years_served: u32,
    pub died: bool,
    /// Experience year in which the character died
    pub death_year: Option<u32>,
    /// Starting skills followed by one skill per survived year
    pub skills: Vec<String>,
    pub aging: AgingEffects,
    /// Input scores with aging applied
    pub final_scores: AttributeMap<i32>,
}

impl PriorExperience {
    /// Age when the run ended
    pub fn final_age(&self) -> u32 {
        START_AGE + self.years.len() as u32
    }
}

/// Clamp a requested year count to what the rules allow
pub fn clamp_years(years: u32, allow_aging: bool) -> u32 {
    let limit = if allow_aging {
        MAX_YEARS_WITH_AGING
    } else {
        MAX_STANDARD_YEARS
    };
    years.min(limit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LifeState {
    Alive,
    Dead,
}

/// Year-by-year prior experience for one character.
///
/// `step` simulates a single year; once a year ends in death no further
/// years are produced.
#[derive(Debug, Clone)]
pub struct ExperienceRun<'a> {
    track: &'a SkillTrack,
    definition: &'a TrackDefinition,
    total_modifier: i32,
    scores: AttributeMap<i32>,
    target_years: u32,
    state: LifeState,
    years: Vec<YearResult>,
    skills: Vec<String>,
    aging: AgingEffects,
}

impl<'a> ExperienceRun<'a> {
    pub fn new(
        track: &'a SkillTrack,
        definition: &'a TrackDefinition,
        years: u32,
        total_modifier: i32,
        scores: &AttributeMap<i32>,
        allow_aging: bool,
    ) -> Result<Self> {
        if definition.id != track.track {
            return Err(ChargenError::InvalidTrackData(format!(
                "definition for {} supplied for a {} track",
                definition.id, track.track
            )));
        }
        if definition.skills.is_empty() {
            return Err(ChargenError::InvalidTrackData(format!(
                "track {} has no skills",
                definition.id
            )));
        }

        let target_years = clamp_years(years, allow_aging);
        if target_years != years {
            tracing::debug!(requested = years, clamped = target_years, "clamped experience years");
        }

        Ok(Self {
            track,
            definition,
            total_modifier,
            scores: *scores,
            target_years,
            state: LifeState::Alive,
            years: Vec::with_capacity(target_years as usize),
            skills: Vec::new(),
            aging: AgingEffects::new(),
        })
    }

    pub fn is_alive(&self) -> bool {
        self.state == LifeState::Alive
    }

    pub fn is_finished(&self) -> bool {
        !self.is_alive() || self.years.len() as u32 >= self.target_years
    }

    pub fn years(&self) -> &[YearResult] {
        &self.years
    }

    pub fn aging(&self) -> &AgingEffects {
        &self.aging
    }

    /// Simulate the next year. Returns `None` once the run is over.
    pub fn step<R: DiceRoller + ?Sized>(&mut self, roller: &mut R) -> Result<Option<&YearResult>> {
        if self.is_finished() {
            return Ok(None);
        }

        let year_index = self.years.len() as u32;
        let experience_years = year_index + 1;
        let aging = self.aging.apply_threshold(experience_years);

        let (skill, skill_roll, mastery) = self.roll_skill(roller, year_index)?;

        let survival_dice = roll_dice(roller, 3, 6)?;
        let survival_roll: u32 = survival_dice.iter().sum();
        let survival_modifier = self.total_modifier + self.aging.total_penalty();
        let survival_total = survival_roll as i32 + survival_modifier;
        let survived = survival_total >= self.track.survivability;

        if survived {
            if self.years.is_empty() {
                self.skills.extend(self.track.initial_skills.iter().cloned());
            }
            self.skills.push(skill.clone());
        } else {
            self.state = LifeState::Dead;
            tracing::debug!(
                track = %self.track.track,
                year = experience_years,
                total = survival_total,
                target = self.track.survivability,
                "character died during prior experience"
            );
        }

        self.years.push(YearResult {
            year: experience_years,
            age: START_AGE + experience_years,
            track: self.track.track,
            skill,
            skill_roll,
            mastery,
            survival_dice,
            survival_roll,
            survival_modifier,
            survival_total,
            survivability: self.track.survivability,
            survived,
            aging,
        });
        Ok(self.years.last())
    }

    fn roll_skill<R: DiceRoller + ?Sized>(
        &self,
        roller: &mut R,
        year_index: u32,
    ) -> Result<(String, Option<u32>, Option<String>)> {
        if let Some(spells) = self.track.spells().filter(|spells| !spells.is_empty()) {
            let position = (year_index as usize + 1) % spells.len();
            let level = (position as u32 + 1).min(MAX_MASTERY_LEVEL);
            return Ok((
                spell_skill_name(spells[position]),
                None,
                Some(mastery_description(level).to_string()),
            ));
        }

        let table = &self.definition.skills;
        let roll = roll_die(roller, SKILL_DIE)?;
        let skill = table[(roll as usize - 1) % table.len()].clone();
        Ok((skill, Some(roll), None))
    }

    pub fn finish(self) -> PriorExperience {
        let years_served = self.years.iter().filter(|year| year.survived).count() as u32;
        let death_year = self
            .years
            .iter()
            .find(|year| !year.survived)
            .map(|year| year.year);

        PriorExperience {
            final_scores: self.aging.apply_to(&self.scores),
            years: self.years,
            years_served,
            died: death_year.is_some(),
            death_year,
            skills: self.skills,
            aging: self.aging,
        }
    }
}

/// Run prior experience to completion.
///
/// `years` is clamped to 18, or to 64 when `allow_aging` is set. The
/// survival roll each year is 3d6 + `total_modifier` + current aging
/// penalties against the track's survivability.
pub fn simulate_prior_experience<R: DiceRoller + ?Sized>(
    roller: &mut R,
    track: &SkillTrack,
    definition: &TrackDefinition,
    years: u32,
    total_modifier: i32,
    scores: &AttributeMap<i32>,
    allow_aging: bool,
) -> Result<PriorExperience> {
    let mut run = ExperienceRun::new(track, definition, years, total_modifier, scores, allow_aging)?;
    while run.step(roller)?.is_some() {}
    Ok(run.finish())
}
