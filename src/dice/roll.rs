//! Checked dice rolls: single dice, pools, drop-lowest/highest, percentile

use serde::{Deserialize, Serialize};

use super::DiceRoller;
use crate::error::{ChargenError, Result};

/// A pool roll with provenance: every face in roll order, the faces kept, and their sum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub rolls: Vec<u32>,
    pub kept: Vec<u32>,
    pub total: u32,
}

impl DiceRoll {
    /// A roll where every die counts
    pub fn all_kept(rolls: Vec<u32>) -> Self {
        let total = rolls.iter().sum();
        Self {
            kept: rolls.clone(),
            rolls,
            total,
        }
    }
}

#[inline]
fn check_sides(sides: u32) -> Result<()> {
    if sides < 1 {
        return Err(ChargenError::InvalidDiceSpec(format!(
            "die must have at least 1 side, got {}",
            sides
        )));
    }
    Ok(())
}

/// Roll one die, uniform in `1..=sides`
#[inline]
pub fn roll_die<R: DiceRoller + ?Sized>(roller: &mut R, sides: u32) -> Result<u32> {
    check_sides(sides)?;
    Ok(roller.roll(sides))
}

/// Roll `n` dice independently, preserving roll order
pub fn roll_dice<R: DiceRoller + ?Sized>(roller: &mut R, n: u32, sides: u32) -> Result<Vec<u32>> {
    if n < 1 {
        return Err(ChargenError::InvalidDiceSpec(format!(
            "must roll at least 1 die, got {}",
            n
        )));
    }
    check_sides(sides)?;
    Ok((0..n).map(|_| roller.roll(sides)).collect())
}

/// Roll `n` dice and sum them
pub fn sum_dice<R: DiceRoller + ?Sized>(roller: &mut R, n: u32, sides: u32) -> Result<u32> {
    Ok(roll_dice(roller, n, sides)?.iter().sum())
}

#[derive(Clone, Copy)]
enum DropEnd {
    Lowest,
    Highest,
}

fn roll_and_drop<R: DiceRoller + ?Sized>(
    roller: &mut R,
    n: u32,
    sides: u32,
    k: usize,
    end: DropEnd,
) -> Result<DiceRoll> {
    if k >= n as usize {
        return Err(ChargenError::InvalidDiceSpec(format!(
            "cannot drop {} of {} dice",
            k, n
        )));
    }

    let rolls = roll_dice(roller, n, sides)?;
    let mut sorted = rolls.clone();
    sorted.sort_unstable();

    let kept = match end {
        DropEnd::Lowest => sorted[k..].to_vec(),
        DropEnd::Highest => sorted[..sorted.len() - k].to_vec(),
    };
    let total = kept.iter().sum();

    Ok(DiceRoll { rolls, kept, total })
}

/// Roll `n` dice and discard the `k` lowest
pub fn drop_lowest<R: DiceRoller + ?Sized>(
    roller: &mut R,
    n: u32,
    sides: u32,
    k: usize,
) -> Result<DiceRoll> {
    roll_and_drop(roller, n, sides, k, DropEnd::Lowest)
}

/// Roll `n` dice and discard the `k` highest
pub fn drop_highest<R: DiceRoller + ?Sized>(
    roller: &mut R,
    n: u32,
    sides: u32,
    k: usize,
) -> Result<DiceRoll> {
    roll_and_drop(roller, n, sides, k, DropEnd::Highest)
}

/// Roll d100
#[inline]
pub fn roll_percentile<R: DiceRoller + ?Sized>(roller: &mut R) -> u32 {
    roller.roll(100)
}

/// d6 rerolling sixes, giving a uniform 1-5
pub fn roll_d5_reroll_six<R: DiceRoller + ?Sized>(roller: &mut R) -> u32 {
    loop {
        let face = roller.roll(6);
        if face != 6 {
            return face;
        }
    }
}

/// d8 rerolling fives
pub fn roll_d8_reroll_five<R: DiceRoller + ?Sized>(roller: &mut R) -> u32 {
    loop {
        let face = roller.roll(8);
        if face != 5 {
            return face;
        }
    }
}
