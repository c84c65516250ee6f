//! Physical and social background generation

mod physical;
mod social;

#[cfg(test)]
mod property_tests;

pub use physical::*;
pub use social::*;

/// Pick the value of the first band whose inclusive upper bound covers `roll`.
///
/// Bands are ordered by upper bound; rolls beyond the last band take its value.
pub(crate) fn pick_band<T: Copy>(roll: u32, bands: &[(u32, T)]) -> T {
    let mut picked = bands[0].1;
    for &(upper, value) in bands {
        picked = value;
        if roll <= upper {
            break;
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::pick_band;

    #[test]
    fn test_pick_band_edges() {
        let bands = [(30, 'a'), (80, 'b'), (100, 'c')];
        assert_eq!(pick_band(1, &bands), 'a');
        assert_eq!(pick_band(30, &bands), 'a');
        assert_eq!(pick_band(31, &bands), 'b');
        assert_eq!(pick_band(100, &bands), 'c');
        assert_eq!(pick_band(250, &bands), 'c');
    }
}
