//! The demon die: a d6 that keeps rolling while it repeats a first face of 1 or 6

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::DiceRoller;

/// Result of a demon die roll.
///
/// `rolls` holds the first face and every repeat of it; the non-matching roll
/// that ended the run is not part of the sequence. `intensity` is the negated
/// run length for ones, the run length for sixes, and 0 for faces 2-5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemonRoll {
    pub rolls: SmallVec<[u32; 4]>,
    pub intensity: i32,
}

impl DemonRoll {
    /// The first face rolled; 0 for an empty sequence
    #[inline]
    pub fn first(&self) -> u32 {
        self.rolls.first().copied().unwrap_or(0)
    }

    /// Repeats beyond the first face
    #[inline]
    pub fn extra(&self) -> u32 {
        self.intensity.unsigned_abs().saturating_sub(1)
    }
}

/// Roll the demon die
pub fn roll_demon_die<R: DiceRoller + ?Sized>(roller: &mut R) -> DemonRoll {
    let first = roller.roll(6);
    let mut rolls: SmallVec<[u32; 4]> = smallvec![first];

    if first == 1 || first == 6 {
        loop {
            let next = roller.roll(6);
            if next != first {
                break;
            }
            rolls.push(next);
        }
    }

    let run = rolls.len() as i32;
    let intensity = match first {
        1 => -run,
        6 => run,
        _ => 0,
    };

    DemonRoll { rolls, intensity }
}
