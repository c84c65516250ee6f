//! Rolled attribute generation and derived stats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{modifier, Attribute, AttributeMap, Modifiers};
use crate::dice::{drop_lowest, roll_dice, roll_die, DiceRoll, DiceRoller};
use crate::error::{ChargenError, Result};

/// How an attribute set was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationMethod {
    /// Sum of 3d6
    #[serde(rename = "3d6")]
    ThreeD6,
    /// Best three of 4d6
    #[serde(rename = "4d6-drop-lowest")]
    FourD6DropLowest,
    /// Scores supplied by the player against a budget
    #[serde(rename = "point-buy")]
    PointBuy,
}

impl GenerationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationMethod::ThreeD6 => "3d6",
            GenerationMethod::FourD6DropLowest => "4d6-drop-lowest",
            GenerationMethod::PointBuy => "point-buy",
        }
    }
}

impl fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMethod {
    type Err = ChargenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "3d6" => Ok(GenerationMethod::ThreeD6),
            "4d6" | "4d6-drop-lowest" | "4d6_drop_lowest" => Ok(GenerationMethod::FourD6DropLowest),
            "point-buy" | "point_buy" | "pointbuy" => Ok(GenerationMethod::PointBuy),
            other => Err(ChargenError::InvalidConfig(format!(
                "unknown generation method: {}",
                other
            ))),
        }
    }
}

/// The dice behind one attribute score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRoll {
    pub attribute: Attribute,
    pub roll: DiceRoll,
}

/// The six core scores. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    scores: AttributeMap<i32>,
    method: GenerationMethod,
    rolls: Vec<AttributeRoll>,
}

impl AttributeSet {
    pub(crate) fn new(
        scores: AttributeMap<i32>,
        method: GenerationMethod,
        rolls: Vec<AttributeRoll>,
    ) -> Self {
        Self {
            scores,
            method,
            rolls,
        }
    }

    /// Build a set from known scores, e.g. a saved character
    pub fn from_scores(scores: AttributeMap<i32>, method: GenerationMethod) -> Self {
        Self::new(scores, method, Vec::new())
    }

    #[inline]
    pub fn get(&self, attribute: Attribute) -> i32 {
        self.scores.get(attribute)
    }

    /// Look a score up by name; fails for anything outside the six attributes
    pub fn get_named(&self, name: &str) -> Result<i32> {
        self.scores.get_named(name)
    }

    pub fn scores(&self) -> &AttributeMap<i32> {
        &self.scores
    }

    pub fn method(&self) -> GenerationMethod {
        self.method
    }

    /// Roll provenance, in attribute order. Empty for point-buy sets.
    pub fn rolls(&self) -> &[AttributeRoll] {
        &self.rolls
    }

    #[inline]
    pub fn modifier(&self, attribute: Attribute) -> i32 {
        modifier(self.get(attribute))
    }

    pub fn modifiers(&self) -> Modifiers {
        self.scores.map(modifier)
    }

    /// The better of STR and DEX
    #[inline]
    pub fn physical_best(&self) -> i32 {
        self.get(Attribute::Str).max(self.get(Attribute::Dex))
    }
}

/// Fatigue and body points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub fatigue_points: i32,
    pub body_points: i32,
    /// The d6 added to fatigue
    pub fatigue_roll: u32,
    /// The d6 added to body
    pub body_roll: u32,
}

impl DerivedStats {
    /// Compute derived stats with one fresh d6 for each
    pub fn roll<R: DiceRoller + ?Sized>(roller: &mut R, attributes: &AttributeSet) -> Result<Self> {
        let fatigue_roll = roll_die(roller, 6)?;
        let body_roll = roll_die(roller, 6)?;
        Ok(Self::from_rolls(attributes, fatigue_roll, body_roll))
    }

    pub fn from_rolls(attributes: &AttributeSet, fatigue_roll: u32, body_roll: u32) -> Self {
        let con = attributes.get(Attribute::Con);
        let wis = attributes.get(Attribute::Wis);
        let best = attributes.physical_best();
        let mental = attributes.modifier(Attribute::Int) + attributes.modifier(Attribute::Wis);

        Self {
            fatigue_points: con + wis + best + fatigue_roll as i32 + mental,
            body_points: con + best + body_roll as i32 + mental,
            fatigue_roll,
            body_roll,
        }
    }
}

/// Attributes together with the stats derived from them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledAttributes {
    pub attributes: AttributeSet,
    pub derived: DerivedStats,
}

fn roll_score<R: DiceRoller + ?Sized>(roller: &mut R, method: GenerationMethod) -> Result<DiceRoll> {
    match method {
        GenerationMethod::ThreeD6 => Ok(DiceRoll::all_kept(roll_dice(roller, 3, 6)?)),
        GenerationMethod::FourD6DropLowest => drop_lowest(roller, 4, 6, 1),
        GenerationMethod::PointBuy => Err(ChargenError::InvalidConfig(
            "point-buy scores are supplied, not rolled".to_string(),
        )),
    }
}

/// Roll all six attributes in order, then the derived stats
pub fn generate_attributes<R: DiceRoller + ?Sized>(
    roller: &mut R,
    method: GenerationMethod,
) -> Result<RolledAttributes> {
    let mut scores = AttributeMap::<i32>::default();
    let mut rolls = Vec::with_capacity(Attribute::ALL.len());

    for attribute in Attribute::ALL {
        let roll = roll_score(roller, method)?;
        *scores.get_mut(attribute) = roll.total as i32;
        rolls.push(AttributeRoll { attribute, roll });
    }

    let attributes = AttributeSet::new(scores, method, rolls);
    let derived = DerivedStats::roll(roller, &attributes)?;
    tracing::debug!(method = %method, ?scores, "generated attributes");

    Ok(RolledAttributes {
        attributes,
        derived,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;

    #[test]
    fn test_three_d6_keeps_every_die() {
        let faces = [1, 2, 3, 4, 5, 6, 6, 6, 6, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 2];
        let mut roller = ScriptedRoller::new(faces);
        let rolled = generate_attributes(&mut roller, GenerationMethod::ThreeD6).unwrap();
        let attrs = &rolled.attributes;

        assert_eq!(attrs.get(Attribute::Str), 6);
        assert_eq!(attrs.get(Attribute::Dex), 15);
        assert_eq!(attrs.get(Attribute::Int), 18);
        assert_eq!(attrs.get(Attribute::Wis), 3);
        assert_eq!(attrs.get(Attribute::Con), 6);
        assert_eq!(attrs.get(Attribute::Chr), 9);
        assert_eq!(attrs.rolls()[1].roll.kept, vec![4, 5, 6]);
        assert_eq!(attrs.method(), GenerationMethod::ThreeD6);

        // fatigue = CON + WIS + max(STR, DEX) + d6 + mod(INT) + mod(WIS)
        //         = 6 + 3 + 15 + 4 + 5 - 5
        assert_eq!(rolled.derived.fatigue_points, 28);
        // body = CON + max(STR, DEX) + d6 + mod(INT) + mod(WIS) = 6 + 15 + 2 + 0
        assert_eq!(rolled.derived.body_points, 23);
        assert_eq!(roller.remaining(), 0);
    }

    #[test]
    fn test_four_d6_drops_lowest() {
        let mut faces = vec![1, 6, 5, 4];
        faces.extend(std::iter::repeat(3).take(20));
        faces.extend([1, 1]);
        let mut roller = ScriptedRoller::new(faces);
        let rolled = generate_attributes(&mut roller, GenerationMethod::FourD6DropLowest).unwrap();

        assert_eq!(rolled.attributes.get(Attribute::Str), 15);
        assert_eq!(rolled.attributes.rolls()[0].roll.rolls, vec![1, 6, 5, 4]);
        assert_eq!(rolled.attributes.get(Attribute::Chr), 9);
    }

    #[test]
    fn test_point_buy_cannot_be_rolled() {
        let mut roller = ScriptedRoller::default();
        assert!(generate_attributes(&mut roller, GenerationMethod::PointBuy).is_err());
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("3d6".parse::<GenerationMethod>().unwrap(), GenerationMethod::ThreeD6);
        assert_eq!(
            "4d6".parse::<GenerationMethod>().unwrap(),
            GenerationMethod::FourD6DropLowest
        );
        assert!("5d6".parse::<GenerationMethod>().is_err());
    }

    #[test]
    fn test_named_lookup_rejects_unknown() {
        let set = AttributeSet::from_scores(AttributeMap::from_fn(|_| 10), GenerationMethod::ThreeD6);
        assert_eq!(set.get_named("CON").unwrap(), 10);
        assert!(matches!(
            set.get_named("LCK"),
            Err(ChargenError::InvalidAttribute(_))
        ));
    }
}
