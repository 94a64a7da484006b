//! ScoreEngine - pure point/level/badge functions.
//!
//! Levels and badges are derived values: they are recomputed from the stored
//! point total and streak on every profile read and persisted only as a
//! cache, never accepted as input.

use std::collections::BTreeSet;

/// Points awarded per correct quiz answer.
pub const POINTS_PER_QUIZ_ANSWER: u32 = 5;

/// Map accumulated points to a level in `1..=10`. Monotonic non-decreasing.
pub fn level_for(points: u32) -> u32 {
    match points {
        0..=99 => 1,
        100..=249 => 2,
        250..=499 => 3,
        500..=999 => 4,
        1000..=1999 => 5,
        _ => (5 + (points - 2000) / 500).min(10),
    }
}

/// Determine earned badges. Thresholds are independent, not mutually
/// exclusive.
pub fn badges_for(points: u32, level: u32, streak_days: u32) -> BTreeSet<String> {
    let mut badges = BTreeSet::new();
    if points >= 100 {
        badges.insert("First Century".to_string());
    }
    if points >= 500 {
        badges.insert("Word Warrior".to_string());
    }
    if points >= 1000 {
        badges.insert("Scholar Supreme".to_string());
    }
    if level >= 5 {
        badges.insert("Level Master".to_string());
    }
    if streak_days >= 7 {
        badges.insert("Week Warrior".to_string());
    }
    if streak_days >= 30 {
        badges.insert("Monthly Master".to_string());
    }
    badges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(99), 1);
        assert_eq!(level_for(100), 2);
        assert_eq!(level_for(249), 2);
        assert_eq!(level_for(250), 3);
        assert_eq!(level_for(499), 3);
        assert_eq!(level_for(500), 4);
        assert_eq!(level_for(999), 4);
        assert_eq!(level_for(1000), 5);
        assert_eq!(level_for(1999), 5);
        assert_eq!(level_for(2000), 5);
        assert_eq!(level_for(2499), 5);
        assert_eq!(level_for(2500), 6);
        assert_eq!(level_for(4499), 9);
        assert_eq!(level_for(4500), 10);
    }

    #[test]
    fn level_is_monotonic_and_bounded() {
        let mut previous = 0;
        for points in (0..10_000).step_by(7) {
            let level = level_for(points);
            assert!(level >= 1 && level <= 10);
            assert!(level >= previous);
            previous = level;
        }
        assert_eq!(level_for(u32::MAX), 10);
    }

    #[test]
    fn badge_thresholds() {
        assert!(badges_for(0, 1, 0).is_empty());

        let badges = badges_for(100, 2, 0);
        assert!(badges.contains("First Century"));
        assert!(!badges.contains("Word Warrior"));

        let badges = badges_for(1000, 5, 30);
        assert!(badges.contains("First Century"));
        assert!(badges.contains("Word Warrior"));
        assert!(badges.contains("Scholar Supreme"));
        assert!(badges.contains("Level Master"));
        assert!(badges.contains("Week Warrior"));
        assert!(badges.contains("Monthly Master"));
    }

    #[test]
    fn streak_badges_independent_of_points() {
        let badges = badges_for(0, 1, 7);
        assert_eq!(badges.len(), 1);
        assert!(badges.contains("Week Warrior"));
    }

    #[test]
    fn badges_are_pure() {
        assert_eq!(badges_for(600, 4, 10), badges_for(600, 4, 10));
    }
}
