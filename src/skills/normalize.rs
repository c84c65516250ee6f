//! Skill-name normalization
//!
//! Repeated gains of the same skill arrive with different magnitudes
//! ("Sword +1 to hit", "Sword +2 to hit") and must land on one ledger key.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::track::SPELL_PREFIX;

/// Signed magnitude token: "+1", "-2"
static MAGNITUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]\d+$").expect("magnitude pattern is valid")
});

/// Roman numerals up to 20, or a plain number
static LEVEL_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:x{0,2}(ix|iv|v?i{0,3})|\d+)$")
        .expect("level pattern is valid")
});

fn is_spell(name: &str) -> bool {
    name.get(..SPELL_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(SPELL_PREFIX))
}

fn is_level_token(token: &str) -> bool {
    !token.is_empty() && LEVEL_TOKEN.is_match(token)
}

/// Words of `name` with magnitude tokens removed and trailing level
/// decorations dropped. The first word always survives.
fn significant_words(name: &str) -> Vec<&str> {
    let mut words: Vec<&str> = name
        .split_whitespace()
        .filter(|word| !is_magnitude(word))
        .collect();
    while words.len() > 1 && words.last().is_some_and(|word| is_level_token(word)) {
        words.pop();
    }
    words
}

fn is_magnitude(word: &str) -> bool {
    MAGNITUDE.is_match(word)
}

fn spell_words(name: &str) -> String {
    let rest = name[SPELL_PREFIX.len()..].split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{} {}", SPELL_PREFIX, rest)
}

/// Ledger key for a skill name.
///
/// Lowercases, drops magnitudes and trailing level numbers, keeps the
/// suffix category: "Sword +1 to hit" becomes "sword to hit". Spell
/// entries keep their full text, numbers included.
pub fn normalize_skill_name(name: &str) -> String {
    let name = name.trim();
    if is_spell(name) {
        return spell_words(name).to_lowercase();
    }
    significant_words(name).join(" ").to_lowercase()
}

/// Name shown for a skill: the original text up to its magnitude
/// ("Sword +1 to hit" shows as "Sword"), or the whole cleaned name
pub fn skill_display_name(name: &str) -> String {
    let name = name.trim();
    if is_spell(name) {
        return spell_words(name);
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    if let Some(position) = words.iter().position(|word| is_magnitude(word)) {
        if position > 0 {
            return words[..position].join(" ");
        }
    }
    significant_words(name).join(" ")
}

/// Split a combined spell entry ("Spell: Light/Darkness") into one entry
/// per spell. Anything else comes back unchanged.
pub fn split_skill_entry(name: &str) -> Vec<String> {
    let trimmed = name.trim();
    if !is_spell(trimmed) {
        return vec![trimmed.to_string()];
    }

    trimmed[SPELL_PREFIX.len()..]
        .split('/')
        .map(str::trim)
        .filter(|spell| !spell.is_empty())
        .map(|spell| format!("{} {}", SPELL_PREFIX, spell))
        .collect()
}
