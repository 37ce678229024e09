//! Experience → level arithmetic.
//!
//! Level `n` starts at `50·n·(n+1)` experience, which inverts to
//! `level(e) = floor((sqrt(2500 + 200·e) − 50) / 100)`.

/// Base term under the square root.
pub const LEVEL_BASE: i64 = 2500;
/// Experience multiplier under the square root.
pub const LEVEL_EXPERIENCE_FACTOR: i64 = 200;
/// Offset subtracted from the root.
pub const LEVEL_OFFSET: f64 = 50.0;
/// Divisor applied after the offset.
pub const LEVEL_DIVISOR: f64 = 100.0;
/// Multiplier of the next-level threshold `50·(lvl+1)·(lvl+2)`.
pub const THRESHOLD_FACTOR: i64 = 50;

/// Minimum accepted experience.
pub const MIN_EXPERIENCE: i64 = 0;
/// Maximum accepted experience.
pub const MAX_EXPERIENCE: i64 = 10_000_000;

/// Level reached with `experience` points.
pub fn level(experience: i64) -> i64 {
    let root = ((LEVEL_BASE + LEVEL_EXPERIENCE_FACTOR * experience) as f64).sqrt();
    ((root - LEVEL_OFFSET) / LEVEL_DIVISOR) as i64
}

/// Experience still missing to leave `level`.
pub fn experience_to_next_level(experience: i64, level: i64) -> i64 {
    THRESHOLD_FACTOR * (level + 1) * (level + 2) - experience
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_formula_pinned() {
        assert_eq!(level(0), 0);
        assert_eq!(experience_to_next_level(0, 0), 100);
        assert_eq!(level(99), 0);
        assert_eq!(level(100), 1);
        assert_eq!(experience_to_next_level(100, 1), 200);
        assert_eq!(level(299), 1);
        assert_eq!(level(300), 2);
        assert_eq!(level(2000), 5);
        assert_eq!(experience_to_next_level(2000, 5), 100);
    }

    #[test]
    fn test_upper_bound() {
        // 50·446·447 = 9_968_100 <= 10M < 50·447·448 = 10_012_800
        assert_eq!(level(MAX_EXPERIENCE), 446);
        assert_eq!(
            experience_to_next_level(MAX_EXPERIENCE, 446),
            10_012_800 - MAX_EXPERIENCE
        );
    }

    #[test]
    fn test_exact_thresholds_land_on_new_level() {
        for n in 0..=446_i64 {
            let threshold = THRESHOLD_FACTOR * n * (n + 1);
            assert_eq!(level(threshold), n, "threshold of level {n}");
            if threshold > 0 {
                assert_eq!(level(threshold - 1), n - 1, "just below level {n}");
            }
        }
    }

    proptest! {
        #[test]
        fn level_is_non_negative(e in MIN_EXPERIENCE..=MAX_EXPERIENCE) {
            let lvl = level(e);
            prop_assert!(lvl >= 0);
            prop_assert!(experience_to_next_level(e, lvl) >= 0);
        }

        #[test]
        fn level_is_monotonic(e in MIN_EXPERIENCE..MAX_EXPERIENCE) {
            prop_assert!(level(e + 1) >= level(e));
        }

        #[test]
        fn remaining_is_positive(e in MIN_EXPERIENCE..=MAX_EXPERIENCE) {
            prop_assert!(experience_to_next_level(e, level(e)) > 0);
        }
    }
}
