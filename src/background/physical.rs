//! Appearance, height and weight, all driven by the demon die

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dice::{roll_demon_die, DemonRoll, DiceRoller};

/// Inches per hand
pub const INCHES_PER_HAND: i32 = 4;

/// Base height in inches for first faces 1..=6
const HEIGHT_BASE: [i32; 6] = [58, 62, 65, 67, 70, 74];
const HEIGHT_STEP: i32 = 2;

/// Base weight in stones for first faces 1..=6
const WEIGHT_BASE: [i32; 6] = [8, 9, 10, 11, 12, 14];
const WEIGHT_STEP: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Appearance {
    Hideous,
    Ugly,
    Unattractive,
    Plain,
    Average,
    Attractive,
    Striking,
    Beautiful,
    Stunning,
}

impl Appearance {
    /// Map a demon die result onto the appearance ladder
    pub fn from_roll(roll: &DemonRoll) -> Self {
        let extra = roll.extra();
        match roll.first() {
            1 => match extra {
                0 => Appearance::Unattractive,
                1 => Appearance::Ugly,
                _ => Appearance::Hideous,
            },
            2 => Appearance::Plain,
            3 | 4 => Appearance::Average,
            5 => Appearance::Attractive,
            _ => match extra {
                0 => Appearance::Striking,
                1 => Appearance::Beautiful,
                _ => Appearance::Stunning,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Appearance::Hideous => "Hideous",
            Appearance::Ugly => "Ugly",
            Appearance::Unattractive => "Unattractive",
            Appearance::Plain => "Plain",
            Appearance::Average => "Average",
            Appearance::Attractive => "Attractive",
            Appearance::Striking => "Striking",
            Appearance::Beautiful => "Beautiful",
            Appearance::Stunning => "Stunning",
        }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base table value adjusted by one step per repeat, downward for ones and upward for sixes
fn exploded_value(roll: &DemonRoll, base: &[i32; 6], step: i32) -> i32 {
    let index = (roll.first() as usize).clamp(1, 6) - 1;
    let extra = roll.extra() as i32;
    let adjust = if roll.intensity < 0 { -extra } else { extra };
    base[index] + adjust * step
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceTrait {
    pub appearance: Appearance,
    pub roll: DemonRoll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Height {
    pub inches: i32,
    pub roll: DemonRoll,
}

impl Height {
    pub fn hands(&self) -> i32 {
        self.inches / INCHES_PER_HAND
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rem = self.inches % INCHES_PER_HAND;
        if rem == 0 {
            write!(f, "{} hands", self.hands())
        } else {
            write!(f, "{} hands {} in", self.hands(), rem)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weight {
    pub stones: i32,
    /// STR / 2, already included in `stones`
    pub strength_bonus: i32,
    pub roll: DemonRoll,
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stone", self.stones)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalTraits {
    pub appearance: AppearanceTrait,
    pub height: Height,
    pub weight: Weight,
}

pub fn roll_appearance<R: DiceRoller + ?Sized>(roller: &mut R) -> AppearanceTrait {
    let roll = roll_demon_die(roller);
    AppearanceTrait {
        appearance: Appearance::from_roll(&roll),
        roll,
    }
}

pub fn roll_height<R: DiceRoller + ?Sized>(roller: &mut R) -> Height {
    let roll = roll_demon_die(roller);
    let inches = exploded_value(&roll, &HEIGHT_BASE, HEIGHT_STEP).max(1);
    Height { inches, roll }
}

pub fn roll_weight<R: DiceRoller + ?Sized>(roller: &mut R, strength: i32) -> Weight {
    let roll = roll_demon_die(roller);
    let strength_bonus = strength / 2;
    let stones = (exploded_value(&roll, &WEIGHT_BASE, WEIGHT_STEP) + strength_bonus).max(1);
    Weight {
        stones,
        strength_bonus,
        roll,
    }
}

/// Roll appearance, height and weight, in that order
pub fn generate_physical_traits<R: DiceRoller + ?Sized>(
    roller: &mut R,
    strength: i32,
) -> PhysicalTraits {
    PhysicalTraits {
        appearance: roll_appearance(roller),
        height: roll_height(roller),
        weight: roll_weight(roller, strength),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;

    #[test]
    fn test_appearance_ladder() {
        let cases: [(&[u32], Appearance); 7] = [
            (&[1, 4], Appearance::Unattractive),
            (&[1, 1, 4], Appearance::Ugly),
            (&[1, 1, 1, 1, 3], Appearance::Hideous),
            (&[2], Appearance::Plain),
            (&[4], Appearance::Average),
            (&[6, 6, 2], Appearance::Beautiful),
            (&[6, 6, 6, 5], Appearance::Stunning),
        ];
        for (faces, want) in cases {
            let mut roller = ScriptedRoller::new(faces.iter().copied());
            assert_eq!(roll_appearance(&mut roller).appearance, want, "faces {:?}", faces);
        }
    }

    #[test]
    fn test_height_explodes_by_step() {
        let mut roller = ScriptedRoller::new([3]);
        assert_eq!(roll_height(&mut roller).inches, 65);

        // three sixes: two extra steps up from 74
        let mut roller = ScriptedRoller::new([6, 6, 6, 1]);
        let height = roll_height(&mut roller);
        assert_eq!(height.inches, 78);
        assert_eq!(height.to_string(), "19 hands 2 in");

        // two ones: one extra step down from 58
        let mut roller = ScriptedRoller::new([1, 1, 2]);
        assert_eq!(roll_height(&mut roller).inches, 56);
    }

    #[test]
    fn test_weight_adds_half_strength() {
        let mut roller = ScriptedRoller::new([5]);
        let weight = roll_weight(&mut roller, 15);
        assert_eq!(weight.strength_bonus, 7);
        assert_eq!(weight.stones, 19);
        assert_eq!(weight.to_string(), "19 stone");

        let mut roller = ScriptedRoller::new([6, 6, 3]);
        assert_eq!(roll_weight(&mut roller, 10).stones, 14 + 1 + 5);
    }

    #[test]
    fn test_generate_rolls_in_order() {
        let mut roller = ScriptedRoller::new([2, 4, 3]);
        let traits = generate_physical_traits(&mut roller, 12);
        assert_eq!(traits.appearance.appearance, Appearance::Plain);
        assert_eq!(traits.height.inches, 67);
        assert_eq!(traits.height.to_string(), "16 hands 3 in");
        assert_eq!(traits.weight.stones, 10 + 6);
    }
}
