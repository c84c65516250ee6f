//! Attribute names, per-attribute maps and the modifier table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChargenError;

/// The six core attributes, in generation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "STR")]
    Str,
    #[serde(rename = "DEX")]
    Dex,
    #[serde(rename = "INT")]
    Int,
    #[serde(rename = "WIS")]
    Wis,
    #[serde(rename = "CON")]
    Con,
    #[serde(rename = "CHR")]
    Chr,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Str,
        Attribute::Dex,
        Attribute::Int,
        Attribute::Wis,
        Attribute::Con,
        Attribute::Chr,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::Str => "STR",
            Attribute::Dex => "DEX",
            Attribute::Int => "INT",
            Attribute::Wis => "WIS",
            Attribute::Con => "CON",
            Attribute::Chr => "CHR",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = ChargenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STR" => Ok(Attribute::Str),
            "DEX" => Ok(Attribute::Dex),
            "INT" => Ok(Attribute::Int),
            "WIS" => Ok(Attribute::Wis),
            "CON" => Ok(Attribute::Con),
            "CHR" => Ok(Attribute::Chr),
            _ => Err(ChargenError::InvalidAttribute(s.to_string())),
        }
    }
}

/// One value per attribute, addressed by [`Attribute`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeMap<T> {
    #[serde(rename = "STR")]
    pub str_: T,
    #[serde(rename = "DEX")]
    pub dex: T,
    #[serde(rename = "INT")]
    pub int: T,
    #[serde(rename = "WIS")]
    pub wis: T,
    #[serde(rename = "CON")]
    pub con: T,
    #[serde(rename = "CHR")]
    pub chr: T,
}

/// Per-attribute modifiers
pub type Modifiers = AttributeMap<i32>;

impl<T: Copy> AttributeMap<T> {
    pub fn from_fn(mut f: impl FnMut(Attribute) -> T) -> Self {
        Self {
            str_: f(Attribute::Str),
            dex: f(Attribute::Dex),
            int: f(Attribute::Int),
            wis: f(Attribute::Wis),
            con: f(Attribute::Con),
            chr: f(Attribute::Chr),
        }
    }

    #[inline]
    pub fn get(&self, attribute: Attribute) -> T {
        match attribute {
            Attribute::Str => self.str_,
            Attribute::Dex => self.dex,
            Attribute::Int => self.int,
            Attribute::Wis => self.wis,
            Attribute::Con => self.con,
            Attribute::Chr => self.chr,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, attribute: Attribute) -> &mut T {
        match attribute {
            Attribute::Str => &mut self.str_,
            Attribute::Dex => &mut self.dex,
            Attribute::Int => &mut self.int,
            Attribute::Wis => &mut self.wis,
            Attribute::Con => &mut self.con,
            Attribute::Chr => &mut self.chr,
        }
    }

    pub fn map<U: Copy>(&self, mut f: impl FnMut(T) -> U) -> AttributeMap<U> {
        AttributeMap::from_fn(|attribute| f(self.get(attribute)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, T)> + '_ {
        Attribute::ALL.iter().map(move |&a| (a, self.get(a)))
    }
}

impl AttributeMap<i32> {
    /// Look an attribute up by name, as supplied by callers
    pub fn get_named(&self, name: &str) -> crate::error::Result<i32> {
        Ok(self.get(name.parse()?))
    }

    pub fn sum(&self) -> i32 {
        self.iter().map(|(_, v)| v).sum()
    }
}

/// Modifiers for scores 3 through 18
const MODIFIER_TABLE: [i32; 16] = [-5, -4, -3, -2, -1, -1, 0, 0, 0, 0, 1, 1, 2, 3, 4, 5];

/// Attribute modifier for a score.
///
/// Floors at -5 below 3 and grows by one per point above 18.
#[inline]
pub fn modifier(value: i32) -> i32 {
    match value {
        v if v < 3 => -5,
        v if v > 18 => 5 + (v - 18),
        v => MODIFIER_TABLE[(v - 3) as usize],
    }
}

/// Whether an attribute grants a bonus (positive modifier)
#[inline]
pub fn has_bonus(modifiers: &Modifiers, attribute: Attribute) -> bool {
    modifiers.get(attribute) > 0
}
