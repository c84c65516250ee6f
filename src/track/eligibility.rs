//! Acceptance rules per track, acceptance checks and availability hints

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TrackId;
use crate::attributes::{has_bonus, Attribute, Modifiers};
use crate::background::{SocialClass, SubClass, WealthLevel};
use crate::dice::{roll_dice, DiceRoller};
use crate::error::Result;

/// Everything the acceptance rules look at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackContext {
    pub modifiers: Modifiers,
    pub social_class: SocialClass,
    pub sub_class: SubClass,
    pub wealth: WealthLevel,
    /// Promotion granted outside the engine; opens the Officer track
    pub promoted: bool,
}

impl TrackContext {
    pub fn new(
        modifiers: Modifiers,
        social_class: SocialClass,
        sub_class: SubClass,
        wealth: WealthLevel,
    ) -> Self {
        Self {
            modifiers,
            social_class,
            sub_class,
            wealth,
            promoted: false,
        }
    }

    pub fn with_promoted(mut self, promoted: bool) -> Self {
        self.promoted = promoted;
        self
    }

    fn merchant_tier(&self) -> MerchantTier {
        let above = matches!(
            self.social_class,
            SocialClass::Merchant | SocialClass::Nobility
        ) || matches!(self.wealth, WealthLevel::Merchant | WealthLevel::Rich);

        if above {
            MerchantTier::Established
        } else if self.wealth == WealthLevel::Subsistence {
            MerchantTier::Poor
        } else {
            MerchantTier::WorkingClass
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MerchantTier {
    Poor,
    WorkingClass,
    Established,
}

impl MerchantTier {
    fn target(self) -> i32 {
        match self {
            MerchantTier::Poor => 10,
            MerchantTier::WorkingClass => 8,
            MerchantTier::Established => 6,
        }
    }
}

/// Boolean acceptance conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// (STR or DEX bonus) and (INT or WIS bonus)
    Ranger,
    /// Rich, or promoted
    Officer,
    /// INT or WIS bonus
    Magic,
}

impl Condition {
    fn evaluate(self, context: &TrackContext) -> bool {
        let bonus = |attribute| has_bonus(&context.modifiers, attribute);
        match self {
            Condition::Ranger => {
                (bonus(Attribute::Str) || bonus(Attribute::Dex))
                    && (bonus(Attribute::Int) || bonus(Attribute::Wis))
            }
            Condition::Officer => context.wealth == WealthLevel::Rich || context.promoted,
            Condition::Magic => bonus(Attribute::Int) || bonus(Attribute::Wis),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Condition::Ranger => "Requires a STR or DEX bonus and an INT or WIS bonus",
            Condition::Officer => "Requires a Rich family or a promotion",
            Condition::Magic => "Requires an INT or WIS bonus",
        }
    }
}

/// How a track decides whether to accept a character
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptanceRule {
    Automatic,
    /// 2d6 plus the listed modifiers must reach the target
    Threshold {
        attributes: &'static [Attribute],
        target: i32,
    },
    Condition(Condition),
}

const ARMY_ATTRIBUTES: [Attribute; 2] = [Attribute::Str, Attribute::Dex];
const NAVY_ATTRIBUTES: [Attribute; 3] = [Attribute::Str, Attribute::Dex, Attribute::Int];
const MERCHANT_ATTRIBUTES: [Attribute; 2] = [Attribute::Int, Attribute::Chr];

/// Dice rolled for threshold checks: 2d6
const THRESHOLD_DICE: u32 = 2;
const THRESHOLD_SIDES: u32 = 6;

/// The rule in force for a track, given the character's circumstances
pub fn acceptance_rule(track: TrackId, context: &TrackContext) -> AcceptanceRule {
    match track {
        TrackId::Random | TrackId::Worker | TrackId::Crafts => AcceptanceRule::Automatic,
        TrackId::Army => AcceptanceRule::Threshold {
            attributes: &ARMY_ATTRIBUTES,
            target: 8,
        },
        TrackId::Navy => AcceptanceRule::Threshold {
            attributes: &NAVY_ATTRIBUTES,
            target: 8,
        },
        TrackId::Merchant => AcceptanceRule::Threshold {
            attributes: &MERCHANT_ATTRIBUTES,
            target: context.merchant_tier().target(),
        },
        TrackId::Ranger => AcceptanceRule::Condition(Condition::Ranger),
        TrackId::Officer => AcceptanceRule::Condition(Condition::Officer),
        TrackId::Magic => AcceptanceRule::Condition(Condition::Magic),
    }
}

/// One attribute's contribution to a threshold roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierTerm {
    pub attribute: Attribute,
    pub value: i32,
}

fn modifier_terms(attributes: &[Attribute], modifiers: &Modifiers) -> Vec<ModifierTerm> {
    attributes
        .iter()
        .map(|&attribute| ModifierTerm {
            attribute,
            value: modifiers.get(attribute),
        })
        .collect()
}

/// Outcome of asking a track to accept a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptanceCheck {
    /// The track as requested; may be a name that matched no track
    pub track: String,
    pub accepted: bool,
    /// The 2d6 faces, for threshold tracks
    pub dice: Vec<u32>,
    pub roll: Option<u32>,
    pub target: Option<i32>,
    pub modifiers: Vec<ModifierTerm>,
    /// Roll plus modifiers
    pub total: Option<i32>,
    pub reason: String,
}

impl AcceptanceCheck {
    /// Rejection for a name that matches no track
    pub fn unknown(requested: &str) -> Self {
        Self {
            track: requested.to_string(),
            accepted: false,
            dice: Vec::new(),
            roll: None,
            target: None,
            modifiers: Vec::new(),
            total: None,
            reason: format!("Unknown track: {}", requested),
        }
    }

    pub fn modifier_total(&self) -> i32 {
        self.modifiers.iter().map(|term| term.value).sum()
    }
}

/// Apply a track's rule. Threshold tracks always roll.
pub fn check_acceptance<R: DiceRoller + ?Sized>(
    roller: &mut R,
    track: TrackId,
    context: &TrackContext,
) -> Result<AcceptanceCheck> {
    let check = match acceptance_rule(track, context) {
        AcceptanceRule::Automatic => AcceptanceCheck {
            track: track.to_string(),
            accepted: true,
            dice: Vec::new(),
            roll: None,
            target: None,
            modifiers: Vec::new(),
            total: None,
            reason: "Automatic acceptance".to_string(),
        },
        AcceptanceRule::Threshold { attributes, target } => {
            let dice = roll_dice(roller, THRESHOLD_DICE, THRESHOLD_SIDES)?;
            let roll: u32 = dice.iter().sum();
            let modifiers = modifier_terms(attributes, &context.modifiers);
            let bonus: i32 = modifiers.iter().map(|term| term.value).sum();
            let total = roll as i32 + bonus;
            let accepted = total >= target;
            AcceptanceCheck {
                track: track.to_string(),
                accepted,
                dice,
                roll: Some(roll),
                target: Some(target),
                modifiers,
                total: Some(total),
                reason: format!(
                    "Rolled {} {:+} = {} against {}: {}",
                    roll,
                    bonus,
                    total,
                    target,
                    if accepted { "accepted" } else { "rejected" }
                ),
            }
        }
        AcceptanceRule::Condition(condition) => {
            let accepted = condition.evaluate(context);
            AcceptanceCheck {
                track: track.to_string(),
                accepted,
                dice: Vec::new(),
                roll: None,
                target: None,
                modifiers: Vec::new(),
                total: None,
                reason: format!(
                    "{}: {}",
                    condition.describe(),
                    if accepted { "met" } else { "not met" }
                ),
            }
        }
    };

    tracing::debug!(
        track = %track,
        accepted = check.accepted,
        total = ?check.total,
        target = ?check.target,
        "track acceptance check"
    );
    Ok(check)
}

// ═══════════════════════════════════════════════════════════════════════════
// Availability hints
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    /// Even the best roll falls short, or the condition is unmet
    Impossible,
    /// Even the worst roll succeeds, or the condition is met
    Guaranteed,
    RollRequired,
}

/// UI hint for one track. Advisory only: `create_track` still rolls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityInfo {
    pub track: TrackId,
    pub availability: Availability,
    /// Minimum roll plus modifier meets the target
    pub auto_accept: bool,
    pub target: Option<i32>,
    pub modifier: i32,
    pub min_total: Option<i32>,
    pub max_total: Option<i32>,
    pub description: String,
}

/// Classify every track without rolling
pub fn get_track_availability(context: &TrackContext) -> BTreeMap<TrackId, AvailabilityInfo> {
    let min_roll = THRESHOLD_DICE as i32;
    let max_roll = (THRESHOLD_DICE * THRESHOLD_SIDES) as i32;

    TrackId::ALL
        .into_iter()
        .map(|track| {
            let info = match acceptance_rule(track, context) {
                AcceptanceRule::Automatic => AvailabilityInfo {
                    track,
                    availability: Availability::Guaranteed,
                    auto_accept: true,
                    target: None,
                    modifier: 0,
                    min_total: None,
                    max_total: None,
                    description: "Open to anyone".to_string(),
                },
                AcceptanceRule::Threshold { attributes, target } => {
                    let modifier: i32 = attributes
                        .iter()
                        .map(|&attribute| context.modifiers.get(attribute))
                        .sum();
                    let min_total = min_roll + modifier;
                    let max_total = max_roll + modifier;
                    let availability = if max_total < target {
                        Availability::Impossible
                    } else if min_total >= target {
                        Availability::Guaranteed
                    } else {
                        Availability::RollRequired
                    };
                    let names: Vec<&str> = attributes.iter().map(|a| a.as_str()).collect();
                    AvailabilityInfo {
                        track,
                        availability,
                        auto_accept: min_total >= target,
                        target: Some(target),
                        modifier,
                        min_total: Some(min_total),
                        max_total: Some(max_total),
                        description: format!("2d6 + {} needs {}", names.join(" + "), target),
                    }
                }
                AcceptanceRule::Condition(condition) => {
                    let met = condition.evaluate(context);
                    AvailabilityInfo {
                        track,
                        availability: if met {
                            Availability::Guaranteed
                        } else {
                            Availability::Impossible
                        },
                        auto_accept: met,
                        target: None,
                        modifier: 0,
                        min_total: None,
                        max_total: None,
                        description: condition.describe().to_string(),
                    }
                }
            };
            (track, info)
        })
        .collect()
}
