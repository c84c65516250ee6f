//! Triangular skill levels and roman-numeral rendering

#[inline]
const fn triangular(level: u64) -> u128 {
    let level = level as u128;
    level * (level + 1) / 2
}

/// Points needed to reach `level`: 1, 3, 6, 10, ...
///
/// Exact for every `u32` level; the largest value, about 9.2e18, fits in `u64`.
#[inline]
pub const fn points_for_level(level: u32) -> u64 {
    triangular(level as u64) as u64
}

/// Highest level reachable with `points`, and the points left over.
///
/// Levels saturate at `u32::MAX`; past that the remainder lands in the excess.
pub fn level_from_points(points: u64) -> (u32, u64) {
    let target = points as u128;
    let cap = u32::MAX as u64;
    // estimate from the quadratic, then correct for float error
    let estimate = ((8.0 * points as f64 + 1.0).sqrt() - 1.0) / 2.0;
    let mut level = (estimate.max(0.0) as u64).min(cap);
    while level < cap && triangular(level + 1) <= target {
        level += 1;
    }
    while level > 0 && triangular(level) > target {
        level -= 1;
    }
    (level as u32, (target - triangular(level)) as u64)
}

const NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Roman numeral for a level; zero renders as "0"
pub fn to_roman(mut value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut out = String::new();
    for (amount, numeral) in NUMERALS {
        while value >= amount {
            out.push_str(numeral);
            value -= amount;
        }
    }
    out
}
