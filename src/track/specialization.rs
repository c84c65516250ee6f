//! Track specializations: the craft tree and the schools of magic

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dice::{roll_percentile, DiceRoller};

// ═══════════════════════════════════════════════════════════════════════════
// Crafts
// ═══════════════════════════════════════════════════════════════════════════

struct CraftCategory {
    name: &'static str,
    crafts: [&'static str; 6],
    specialties: [&'static str; 4],
}

const CRAFT_TREE: [CraftCategory; 6] = [
    CraftCategory {
        name: "Metalwork",
        crafts: ["Blacksmith", "Armorer", "Weaponsmith", "Goldsmith", "Tinsmith", "Locksmith"],
        specialties: ["Tools", "Fittings", "Fine Work", "Repairs"],
    },
    CraftCategory {
        name: "Woodwork",
        crafts: ["Carpenter", "Bowyer", "Fletcher", "Cooper", "Wheelwright", "Shipwright"],
        specialties: ["Joinery", "Carving", "Framing", "Repairs"],
    },
    CraftCategory {
        name: "Textiles",
        crafts: ["Weaver", "Tailor", "Dyer", "Fuller", "Ropemaker", "Embroiderer"],
        specialties: ["Wool", "Linen", "Silk", "Finery"],
    },
    CraftCategory {
        name: "Leatherwork",
        crafts: ["Tanner", "Saddler", "Cobbler", "Glover", "Bookbinder", "Furrier"],
        specialties: ["Harness", "Footwear", "Fine Goods", "Repairs"],
    },
    CraftCategory {
        name: "Stone and Clay",
        crafts: ["Mason", "Potter", "Glassblower", "Sculptor", "Bricklayer", "Tiler"],
        specialties: ["Building", "Vessels", "Ornament", "Repairs"],
    },
    CraftCategory {
        name: "Provisions",
        crafts: ["Baker", "Brewer", "Butcher", "Chandler", "Vintner", "Cook"],
        specialties: ["Staples", "Delicacies", "Preserving", "Feasts"],
    },
];

/// A craft picked by walking the d6 / d6 / d4 tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftSpecialization {
    pub category: String,
    pub craft: String,
    pub specialty: String,
    /// Category d6, craft d6, specialty d4
    pub rolls: [u32; 3],
}

impl fmt::Display for CraftSpecialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.craft, self.category, self.specialty)
    }
}

pub fn roll_craft<R: DiceRoller + ?Sized>(roller: &mut R) -> CraftSpecialization {
    let category_roll = roller.roll(6);
    let craft_roll = roller.roll(6);
    let specialty_roll = roller.roll(4);

    let category = &CRAFT_TREE[(category_roll - 1) as usize];
    CraftSpecialization {
        category: category.name.to_string(),
        craft: category.crafts[(craft_roll - 1) as usize].to_string(),
        specialty: category.specialties[(specialty_roll - 1) as usize].to_string(),
        rolls: [category_roll, craft_roll, specialty_roll],
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Magic
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagicSchool {
    Fire,
    Water,
    Air,
    Earth,
    Healing,
    Illusion,
    Divination,
    Enchantment,
    Protection,
    Light,
    Nature,
    Weather,
    Necromancy,
    Summoning,
    Shadow,
    Time,
    Runes,
    Blood,
}

/// Schools reached on d100 rolls up to this value are common
pub const COMMON_SCHOOL_BAND: u32 = 75;

pub const COMMON_SCHOOLS: [MagicSchool; 12] = [
    MagicSchool::Fire,
    MagicSchool::Water,
    MagicSchool::Air,
    MagicSchool::Earth,
    MagicSchool::Healing,
    MagicSchool::Illusion,
    MagicSchool::Divination,
    MagicSchool::Enchantment,
    MagicSchool::Protection,
    MagicSchool::Light,
    MagicSchool::Nature,
    MagicSchool::Weather,
];

pub const LESS_COMMON_SCHOOLS: [MagicSchool; 6] = [
    MagicSchool::Necromancy,
    MagicSchool::Summoning,
    MagicSchool::Shadow,
    MagicSchool::Time,
    MagicSchool::Runes,
    MagicSchool::Blood,
];

impl MagicSchool {
    pub fn as_str(self) -> &'static str {
        match self {
            MagicSchool::Fire => "Fire",
            MagicSchool::Water => "Water",
            MagicSchool::Air => "Air",
            MagicSchool::Earth => "Earth",
            MagicSchool::Healing => "Healing",
            MagicSchool::Illusion => "Illusion",
            MagicSchool::Divination => "Divination",
            MagicSchool::Enchantment => "Enchantment",
            MagicSchool::Protection => "Protection",
            MagicSchool::Light => "Light",
            MagicSchool::Nature => "Nature",
            MagicSchool::Weather => "Weather",
            MagicSchool::Necromancy => "Necromancy",
            MagicSchool::Summoning => "Summoning",
            MagicSchool::Shadow => "Shadow",
            MagicSchool::Time => "Time",
            MagicSchool::Runes => "Runes",
            MagicSchool::Blood => "Blood",
        }
    }

    pub fn is_common(self) -> bool {
        COMMON_SCHOOLS.contains(&self)
    }

    /// The school's spells in the order they are learned
    pub fn spells(self) -> &'static [&'static str] {
        match self {
            MagicSchool::Fire => &["Spark", "Flame Dart", "Fire Shield", "Fireball", "Wall of Fire", "Inferno"],
            MagicSchool::Water => &["Purify Water", "Water Breathing", "Ice Shard", "Tidal Surge", "Freeze", "Maelstrom"],
            MagicSchool::Air => &["Gust", "Feather Fall", "Lightning Bolt", "Wind Wall", "Flight", "Tempest"],
            MagicSchool::Earth => &["Stone Skin", "Tremor", "Earth Spike", "Wall of Stone", "Earthquake", "Petrify"],
            MagicSchool::Healing => &["Cure Wounds", "Cleanse", "Restore Strength", "Regenerate", "Cure Disease", "Resurrection"],
            MagicSchool::Illusion => &["Disguise", "Phantom Sound", "Mirror Image", "Invisibility", "Phantasmal Terror", "Grand Illusion"],
            MagicSchool::Divination => &["Detect Magic", "Read Aura", "Locate Object", "Scry", "True Seeing", "Foresight"],
            MagicSchool::Enchantment => &["Charm", "Sleep", "Command", "Suggestion", "Dominate", "Geas"],
            MagicSchool::Protection => &["Ward", "Shield", "Dispel Magic", "Sanctuary", "Globe of Protection", "Anti-Magic Field"],
            MagicSchool::Light => &["Light/Darkness", "Dazzle", "Sunbeam", "Blinding Flash", "Daylight", "Radiance"],
            MagicSchool::Nature => &["Entangle", "Speak with Animals", "Barkskin", "Call Lightning", "Summon Beasts", "Wrath of Nature"],
            MagicSchool::Weather => &["Fog Cloud", "Rain", "Hail Storm", "Control Winds", "Call Storm", "Control Weather"],
            MagicSchool::Necromancy => &["Chill Touch", "Speak with Dead", "Animate Dead", "Drain Life", "Raise Undead", "Death Word"],
            MagicSchool::Summoning => &["Summon Familiar", "Unseen Servant", "Summon Elemental", "Banish", "Gate", "Bind Demon"],
            MagicSchool::Shadow => &["Shadow Step", "Darkvision/Blindness", "Shadow Bolt", "Shadow Cloak", "Umbral Walk", "Eclipse"],
            MagicSchool::Time => &["Haste/Slow", "Delay", "Rewind", "Time Stop", "Age", "Temporal Loop"],
            MagicSchool::Runes => &["Glyph of Warding", "Rune of Power", "Explosive Runes", "Symbol", "Rune Shield", "Word of Power"],
            MagicSchool::Blood => &["Blood Bond", "Hemorrhage", "Blood Sense", "Life Transfer", "Blood Puppet", "Crimson Rite"],
        }
    }
}

impl fmt::Display for MagicSchool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicSpecialization {
    pub school: MagicSchool,
    /// d100 rarity roll, then the d12 or d6 school roll
    pub rolls: [u32; 2],
}

pub fn roll_magic_school<R: DiceRoller + ?Sized>(roller: &mut R) -> MagicSpecialization {
    let rarity_roll = roll_percentile(roller);
    let (school_roll, school) = if rarity_roll <= COMMON_SCHOOL_BAND {
        let roll = roller.roll(12);
        (roll, COMMON_SCHOOLS[(roll - 1) as usize])
    } else {
        let roll = roller.roll(6);
        (roll, LESS_COMMON_SCHOOLS[(roll - 1) as usize])
    };

    MagicSpecialization {
        school,
        rolls: [rarity_roll, school_roll],
    }
}

/// Ledger/display prefix that marks a skill as a spell
pub const SPELL_PREFIX: &str = "Spell:";

/// Skill name for a spell
pub fn spell_skill_name(spell: &str) -> String {
    format!("{} {}", SPELL_PREFIX, spell)
}

/// Highest level with its own mastery description
pub const MAX_MASTERY_LEVEL: u32 = 6;

/// What a caster can do with a spell at a given level; levels above 6 read as 6
pub fn mastery_description(level: u32) -> &'static str {
    match level.min(MAX_MASTERY_LEVEL) {
        0 | 1 => "Novice: casts with full ritual and focus",
        2 => "Apprentice: casts in half the time",
        3 => "Journeyman: casts without material components",
        4 => "Adept: doubled range and duration",
        5 => "Master: casts silently and unmoving",
        _ => "Archmage: casts at will",
    }
}
