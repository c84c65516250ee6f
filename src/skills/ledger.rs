//! Skill-point ledger: automatic points from experience, allocated points
//! from a free pool, and the levels they add up to

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    level_from_points, normalize_skill_name, skill_display_name, split_skill_entry, to_roman,
};
use crate::track::{mastery_description, SPELL_PREFIX};

/// Points held in one skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPoints {
    /// Display name, original casing
    pub name: String,
    /// Points from prior experience
    pub automatic: u32,
    /// Points moved in from the free pool
    pub allocated: u32,
}

impl SkillPoints {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            automatic: 0,
            allocated: 0,
        }
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.automatic + self.allocated
    }

    pub fn level(&self) -> u32 {
        level_from_points(u64::from(self.total())).0
    }

    /// Points beyond the current level
    pub fn excess(&self) -> u64 {
        level_from_points(u64::from(self.total())).1
    }

    pub fn is_spell(&self) -> bool {
        self.name.starts_with(SPELL_PREFIX)
    }

    /// "Sword II (+1)"; spells above level 1 add their mastery
    pub fn display(&self) -> String {
        let (level, excess) = level_from_points(u64::from(self.total()));
        let mut out = format!("{} {}", self.name, to_roman(level));
        if excess > 0 {
            out.push_str(&format!(" (+{})", excess));
        }
        if self.is_spell() && level > 1 {
            out.push_str(" - ");
            out.push_str(mastery_description(level));
        }
        out
    }
}

/// Ledger key and entry text for a name naming exactly one skill
fn single_entry(name: &str) -> Option<(String, String)> {
    let mut entries = split_skill_entry(name).into_iter();
    let entry = entries.next()?;
    if entries.next().is_some() {
        return None;
    }
    let key = normalize_skill_name(&entry);
    (!key.is_empty()).then_some((key, entry))
}

/// All of a character's skills, keyed by normalized name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSkillLedger {
    skills: BTreeMap<String, SkillPoints>,
    free_points: u32,
}

impl CharacterSkillLedger {
    pub fn new(free_points: u32) -> Self {
        Self {
            skills: BTreeMap::new(),
            free_points,
        }
    }

    /// Ledger with one automatic point per entry of `skills`
    pub fn from_skills<I, S>(skills: I, free_points: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ledger = Self::new(free_points);
        for skill in skills {
            ledger.add_automatic_point(skill.as_ref());
        }
        ledger
    }

    /// Record one point of experience. Combined spell entries give one
    /// point to each spell. Returns the keys credited.
    pub fn add_automatic_point(&mut self, name: &str) -> Vec<String> {
        let mut credited = Vec::new();
        for entry in split_skill_entry(name) {
            let key = normalize_skill_name(&entry);
            if key.is_empty() {
                continue;
            }
            self.skills
                .entry(key.clone())
                .or_insert_with(|| SkillPoints::new(skill_display_name(&entry)))
                .automatic += 1;
            credited.push(key);
        }
        credited
    }

    /// Move one point from the free pool into a skill, creating it if
    /// needed. Returns false when the pool is empty or the name is a
    /// combined spell entry; allocate to each spell separately.
    pub fn allocate_point(&mut self, name: &str) -> bool {
        let Some((key, entry)) = single_entry(name) else {
            return false;
        };
        if self.free_points == 0 {
            return false;
        }
        self.skills
            .entry(key)
            .or_insert_with(|| SkillPoints::new(skill_display_name(&entry)))
            .allocated += 1;
        self.free_points -= 1;
        true
    }

    /// Move one allocated point back to the pool. Returns false when the
    /// skill has nothing allocated.
    pub fn deallocate_point(&mut self, name: &str) -> bool {
        let Some((key, _)) = single_entry(name) else {
            return false;
        };
        let Some(points) = self.skills.get_mut(&key) else {
            return false;
        };
        if points.allocated == 0 {
            return false;
        }
        points.allocated -= 1;
        self.free_points += 1;
        if points.total() == 0 {
            self.skills.remove(&key);
        }
        true
    }

    /// Recount automatic points from a new skill list. Allocations stay on
    /// skills that still exist; the rest return to the pool.
    pub fn rebuild<I, S>(&mut self, skills: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let previous = std::mem::take(&mut self.skills);
        for skill in skills {
            self.add_automatic_point(skill.as_ref());
        }

        for (key, old) in previous {
            if old.allocated == 0 {
                continue;
            }
            match self.skills.get_mut(&key) {
                Some(points) => points.allocated = old.allocated,
                None => self.free_points += old.allocated,
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SkillPoints> {
        self.skills.get(&normalize_skill_name(name))
    }

    pub fn free_points(&self) -> u32 {
        self.free_points
    }

    /// Every point in the ledger, spent or not
    pub fn total_xp(&self) -> u32 {
        self.skills.values().map(SkillPoints::total).sum::<u32>() + self.free_points
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SkillPoints)> {
        self.skills.iter().map(|(key, points)| (key.as_str(), points))
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Display lines in key order, skipping empty skills
    pub fn to_display_list(&self) -> Vec<String> {
        self.skills
            .values()
            .filter(|points| points.total() > 0)
            .map(SkillPoints::display)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_skill_levels_up() {
        let mut ledger = CharacterSkillLedger::new(0);
        for _ in 0..4 {
            ledger.add_automatic_point("Sword +1 to hit");
        }
        let sword = ledger.get("Sword +3 to hit").unwrap();
        assert_eq!(sword.total(), 4);
        assert_eq!(sword.level(), 2);
        assert_eq!(sword.excess(), 1);
        assert_eq!(ledger.iter().next().map(|(key, _)| key), Some("sword to hit"));
        assert_eq!(ledger.to_display_list(), ["Sword II (+1)"]);
    }

    #[test]
    fn test_allocation_bounds() {
        let mut ledger = CharacterSkillLedger::new(1);
        assert!(!ledger.deallocate_point("Riding"));
        assert!(ledger.allocate_point("Riding"));
        assert!(!ledger.allocate_point("Riding"));
        assert_eq!(ledger.free_points(), 0);
        assert_eq!(ledger.get("riding").unwrap().allocated, 1);

        assert!(ledger.deallocate_point("Riding"));
        assert!(!ledger.deallocate_point("Riding"));
        assert_eq!(ledger.free_points(), 1);
        assert!(ledger.get("riding").is_none());
    }

    #[test]
    fn test_deallocate_keeps_automatic_points() {
        let mut ledger = CharacterSkillLedger::from_skills(["Riding"], 2);
        ledger.allocate_point("Riding");
        assert_eq!(ledger.get("Riding").unwrap().total(), 2);
        assert!(ledger.deallocate_point("Riding"));
        assert_eq!(ledger.get("Riding").unwrap().total(), 1);
        assert!(!ledger.deallocate_point("Riding"));
    }

    #[test]
    fn test_combined_spells_split() {
        let mut ledger = CharacterSkillLedger::new(0);
        let keys = ledger.add_automatic_point("Spell: Light/Darkness");
        assert_eq!(keys, ["spell: light", "spell: darkness"]);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get("Spell: Darkness").unwrap().total(), 1);
    }

    #[test]
    fn test_combined_spell_allocation_refused() {
        let mut ledger = CharacterSkillLedger::from_skills(["Spell: Light/Darkness"], 1);
        assert!(!ledger.allocate_point("Spell: Light/Darkness"));
        assert!(!ledger.deallocate_point("Spell: Light/Darkness"));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.free_points(), 1);

        assert!(ledger.allocate_point("Spell: Light"));
        let keys: Vec<&str> = ledger.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["spell: darkness", "spell: light"]);
        assert_eq!(ledger.get("Spell: Light").unwrap().total(), 2);
        assert!(ledger.deallocate_point("Spell: Light"));
        assert_eq!(ledger.free_points(), 1);
    }

    #[test]
    fn test_spell_display_includes_mastery() {
        let ledger = CharacterSkillLedger::from_skills(["Spell: Fireball"; 3], 0);
        assert_eq!(
            ledger.to_display_list(),
            [format!("Spell: Fireball II - {}", mastery_description(2))]
        );

        let single = CharacterSkillLedger::from_skills(["Spell: Spark"], 0);
        assert_eq!(single.to_display_list(), ["Spell: Spark I"]);
    }

    #[test]
    fn test_total_xp_counts_pool() {
        let mut ledger = CharacterSkillLedger::from_skills(["Riding", "Stealth", "Riding"], 3);
        assert_eq!(ledger.total_xp(), 6);
        ledger.allocate_point("Stealth");
        assert_eq!(ledger.total_xp(), 6);
    }

    #[test]
    fn test_rebuild_refunds_orphaned_allocations() {
        let mut ledger = CharacterSkillLedger::from_skills(["Riding", "Stealth"], 3);
        ledger.allocate_point("Riding");
        ledger.allocate_point("Stealth");
        ledger.allocate_point("Stealth");
        assert_eq!(ledger.free_points(), 0);

        ledger.rebuild(["Riding", "Riding"]);
        assert_eq!(ledger.get("Riding").unwrap().automatic, 2);
        assert_eq!(ledger.get("Riding").unwrap().allocated, 1);
        assert!(ledger.get("Stealth").is_none());
        assert_eq!(ledger.free_points(), 2);
        assert_eq!(ledger.total_xp(), 5);
    }

    #[test]
    fn test_magnitude_only_entry_ignored() {
        let mut ledger = CharacterSkillLedger::new(1);
        assert!(ledger.add_automatic_point("+2").is_empty());
        assert!(!ledger.allocate_point("+2"));
        assert!(ledger.is_empty());
    }
}
