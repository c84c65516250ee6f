//! Provenance, location, literacy and wealth
//!
//! Each trait is a percentile roll against a band table, with nested rolls
//! where a band needs more detail.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::pick_band;
use crate::attributes::{Attribute, AttributeMap, AttributeSet};
use crate::dice::{roll_d5_reroll_six, roll_percentile, sum_dice, DiceRoller};
use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════
// Provenance
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocialClass {
    Nobility,
    Merchant,
    Commoner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubClass {
    Gentry,
    Knight,
    Baron,
    Count,
    Duke,
    Shopkeeper,
    Trader,
    GuildMerchant,
    MerchantPrince,
    Laborer,
    Farmer,
    Crafts,
    Servant,
}

const CLASS_BANDS: [(u32, SocialClass); 3] = [
    (80, SocialClass::Commoner),
    (95, SocialClass::Merchant),
    (100, SocialClass::Nobility),
];

const NOBILITY_BANDS: [(u32, SubClass); 5] = [
    (40, SubClass::Gentry),
    (70, SubClass::Knight),
    (90, SubClass::Baron),
    (98, SubClass::Count),
    (100, SubClass::Duke),
];

const MERCHANT_BANDS: [(u32, SubClass); 4] = [
    (40, SubClass::Shopkeeper),
    (70, SubClass::Trader),
    (90, SubClass::GuildMerchant),
    (100, SubClass::MerchantPrince),
];

const COMMONER_BANDS: [(u32, SubClass); 4] = [
    (35, SubClass::Laborer),
    (65, SubClass::Farmer),
    (85, SubClass::Crafts),
    (100, SubClass::Servant),
];

/// Craft specializations for commoner craftsfolk, one per ten points of d100
pub const COMMONER_CRAFTS: [&str; 10] = [
    "Blacksmith",
    "Carpenter",
    "Mason",
    "Weaver",
    "Tanner",
    "Potter",
    "Cooper",
    "Jeweler",
    "Brewer",
    "Baker",
];

impl SocialClass {
    pub fn as_str(self) -> &'static str {
        match self {
            SocialClass::Nobility => "Nobility",
            SocialClass::Merchant => "Merchant",
            SocialClass::Commoner => "Commoner",
        }
    }

    fn sub_bands(self) -> &'static [(u32, SubClass)] {
        match self {
            SocialClass::Nobility => &NOBILITY_BANDS,
            SocialClass::Merchant => &MERCHANT_BANDS,
            SocialClass::Commoner => &COMMONER_BANDS,
        }
    }
}

impl fmt::Display for SocialClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SubClass {
    pub fn as_str(self) -> &'static str {
        match self {
            SubClass::Gentry => "Gentry",
            SubClass::Knight => "Knight",
            SubClass::Baron => "Baron",
            SubClass::Count => "Count",
            SubClass::Duke => "Duke",
            SubClass::Shopkeeper => "Shopkeeper",
            SubClass::Trader => "Trader",
            SubClass::GuildMerchant => "Guild Merchant",
            SubClass::MerchantPrince => "Merchant Prince",
            SubClass::Laborer => "Laborer",
            SubClass::Farmer => "Farmer",
            SubClass::Crafts => "Crafts",
            SubClass::Servant => "Servant",
        }
    }
}

impl fmt::Display for SubClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Social origin with the rolls that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub social_class: SocialClass,
    pub class_roll: u32,
    pub sub_class: SubClass,
    pub sub_roll: u32,
    /// Only for commoner craftsfolk
    pub craft: Option<String>,
    pub craft_roll: Option<u32>,
}

pub fn roll_provenance<R: DiceRoller + ?Sized>(roller: &mut R) -> Provenance {
    let class_roll = roll_percentile(roller);
    let social_class = pick_band(class_roll, &CLASS_BANDS);

    let sub_roll = roll_percentile(roller);
    let sub_class = pick_band(sub_roll, social_class.sub_bands());

    let (craft, craft_roll) = if sub_class == SubClass::Crafts {
        let roll = roll_percentile(roller);
        let index = ((roll.saturating_sub(1)) / 10).min(9) as usize;
        (Some(COMMONER_CRAFTS[index].to_string()), Some(roll))
    } else {
        (None, None)
    };

    Provenance {
        social_class,
        class_roll,
        sub_class,
        sub_roll,
        craft,
        craft_roll,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Location
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    City,
    Village,
    Rural,
    Special,
}

impl LocationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LocationKind::City => "City",
            LocationKind::Village => "Village",
            LocationKind::Rural => "Rural",
            LocationKind::Special => "Special",
        }
    }

    /// Difficulty subtracted from INT for the literacy check
    pub fn literacy_modifier(self) -> i32 {
        match self {
            LocationKind::City => 2,
            LocationKind::Village => 4,
            LocationKind::Rural => 6,
            LocationKind::Special => 0,
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const LOCATION_BANDS: [(u32, LocationKind); 4] = [
    (40, LocationKind::City),
    (75, LocationKind::Village),
    (95, LocationKind::Rural),
    (100, LocationKind::Special),
];

pub const VILLAGE_SKILLS: [&str; 6] = [
    "Farming",
    "Animal Handling",
    "Herbalism",
    "Fishing",
    "Woodcraft",
    "Brewing",
];

pub const VILLAGE_BONUS_ATTRIBUTES: [Attribute; 4] =
    [Attribute::Str, Attribute::Dex, Attribute::Con, Attribute::Wis];

pub const RURAL_SURVIVAL_SKILLS: [&str; 5] =
    ["Tracking", "Foraging", "Hunting", "Trapping", "Fire Making"];

/// Where the character grew up and what it gave them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub kind: LocationKind,
    pub roll: u32,
    pub skills: Vec<String>,
    pub bonus_attribute: Attribute,
    pub bonus_value: i32,
    pub literacy_modifier: i32,
    /// Follow-up rolls: the village d6 and d4, or every rural d5 including rerolled duplicates
    pub sub_rolls: Vec<u32>,
}

impl Location {
    /// Bonus this upbringing gives `attribute`
    #[inline]
    pub fn bonus_for(&self, attribute: Attribute) -> i32 {
        if attribute == self.bonus_attribute {
            self.bonus_value
        } else {
            0
        }
    }

    pub fn apply_to(&self, scores: &AttributeMap<i32>) -> AttributeMap<i32> {
        AttributeMap::from_fn(|attribute| scores.get(attribute) + self.bonus_for(attribute))
    }
}

impl AttributeSet {
    /// Scores with the upbringing bonus added
    pub fn with_location(&self, location: &Location) -> AttributeSet {
        AttributeSet::new(location.apply_to(self.scores()), self.method(), self.rolls().to_vec())
    }
}

pub fn roll_location<R: DiceRoller + ?Sized>(roller: &mut R) -> Location {
    let roll = roll_percentile(roller);
    let kind = pick_band(roll, &LOCATION_BANDS);
    let mut sub_rolls = Vec::new();

    let (skills, bonus_attribute) = match kind {
        LocationKind::City => (vec!["Streetwise".to_string()], Attribute::Int),
        LocationKind::Village => {
            let skill_roll = roller.roll(6);
            let bonus_roll = roller.roll(4);
            sub_rolls.extend([skill_roll, bonus_roll]);
            (
                vec![VILLAGE_SKILLS[(skill_roll - 1) as usize].to_string()],
                VILLAGE_BONUS_ATTRIBUTES[(bonus_roll - 1) as usize],
            )
        }
        LocationKind::Rural => {
            let first = roll_d5_reroll_six(roller);
            sub_rolls.push(first);
            let second = loop {
                let next = roll_d5_reroll_six(roller);
                sub_rolls.push(next);
                if next != first {
                    break next;
                }
            };
            (
                vec![
                    RURAL_SURVIVAL_SKILLS[(first - 1) as usize].to_string(),
                    RURAL_SURVIVAL_SKILLS[(second - 1) as usize].to_string(),
                ],
                Attribute::Con,
            )
        }
        LocationKind::Special => (
            vec!["Lore".to_string(), "Etiquette".to_string()],
            Attribute::Wis,
        ),
    };

    Location {
        kind,
        roll,
        skills,
        bonus_attribute,
        bonus_value: 1,
        literacy_modifier: kind.literacy_modifier(),
        sub_rolls,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Literacy
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literacy {
    pub int_value: i32,
    pub modifier: i32,
    /// INT minus modifier; the 3d6 roll must come in under it
    pub target: i32,
    pub roll: u32,
    pub literate: bool,
}

impl Literacy {
    pub fn evaluate(int_value: i32, modifier: i32, roll: u32) -> Self {
        let target = int_value - modifier;
        Self {
            int_value,
            modifier,
            target,
            roll,
            literate: (roll as i32) < target,
        }
    }
}

pub fn check_literacy<R: DiceRoller + ?Sized>(
    roller: &mut R,
    int_value: i32,
    modifier: i32,
) -> Result<Literacy> {
    let roll = sum_dice(roller, 3, 6)?;
    Ok(Literacy::evaluate(int_value, modifier, roll))
}

// ═══════════════════════════════════════════════════════════════════════════
// Wealth
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WealthLevel {
    Subsistence,
    Moderate,
    Merchant,
    Rich,
}

impl WealthLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            WealthLevel::Subsistence => "Subsistence",
            WealthLevel::Moderate => "Moderate",
            WealthLevel::Merchant => "Merchant",
            WealthLevel::Rich => "Rich",
        }
    }

    /// Starting coins, before the merchant bonus roll
    pub fn base_coins(self) -> u32 {
        match self {
            WealthLevel::Subsistence => 10,
            WealthLevel::Moderate => 50,
            WealthLevel::Merchant => 100,
            WealthLevel::Rich => 1000,
        }
    }
}

impl fmt::Display for WealthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First d100 roll in the Rich band
pub const RICH_BAND_START: u32 = 96;

const WEALTH_BANDS: [(u32, WealthLevel); 4] = [
    (30, WealthLevel::Subsistence),
    (80, WealthLevel::Moderate),
    (95, WealthLevel::Merchant),
    (100, WealthLevel::Rich),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wealth {
    pub level: WealthLevel,
    /// The deciding roll
    pub roll: u32,
    /// Rolls discarded because they landed in the Rich band when it was not allowed
    pub rerolls: Vec<u32>,
    pub bonus_roll: Option<u32>,
    pub coins: u32,
}

pub fn roll_wealth<R: DiceRoller + ?Sized>(roller: &mut R, allow_rich: bool) -> Wealth {
    let mut rerolls = Vec::new();
    let mut roll = roll_percentile(roller);
    while !allow_rich && roll >= RICH_BAND_START {
        rerolls.push(roll);
        roll = roll_percentile(roller);
    }

    let level = pick_band(roll, &WEALTH_BANDS);
    let bonus_roll = match level {
        WealthLevel::Merchant => Some(roll_percentile(roller)),
        _ => None,
    };
    let coins = level.base_coins() + bonus_roll.unwrap_or(0);

    Wealth {
        level,
        roll,
        rerolls,
        bonus_roll,
        coins,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Combined
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialTraits {
    pub provenance: Provenance,
    pub location: Location,
    pub literacy: Literacy,
    pub wealth: Wealth,
}

/// Roll provenance, location, literacy and wealth.
///
/// Literacy is checked against the location's difficulty, with INT already
/// carrying the location bonus.
pub fn generate_social_traits<R: DiceRoller + ?Sized>(
    roller: &mut R,
    int_value: i32,
    allow_rich: bool,
) -> Result<SocialTraits> {
    let provenance = roll_provenance(roller);
    let location = roll_location(roller);
    let int_value = int_value + location.bonus_for(Attribute::Int);
    let literacy = check_literacy(roller, int_value, location.literacy_modifier)?;
    let wealth = roll_wealth(roller, allow_rich);

    Ok(SocialTraits {
        provenance,
        location,
        literacy,
        wealth,
    })
}
