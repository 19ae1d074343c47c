//! Experience accrual and orb drop planning

use serde::{Deserialize, Serialize};

use crate::tuning::{ExperienceCurve, EXP_CURVE};

/// Player level and banked experience toward the next one
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExperienceTracker {
    level: u32,
    exp: u32,
    #[serde(skip, default = "default_curve")]
    curve: &'static ExperienceCurve,
}

fn default_curve() -> &'static ExperienceCurve {
    &EXP_CURVE
}

impl Default for ExperienceTracker {
    fn default() -> Self {
        Self::new(&EXP_CURVE)
    }
}

impl ExperienceTracker {
    pub fn new(curve: &'static ExperienceCurve) -> Self {
        Self { level: 1, exp: 0, curve }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn exp(&self) -> u32 {
        self.exp
    }

    /// Experience still needed to reach the next level
    pub fn remaining(&self) -> u32 {
        self.curve.requirement(self.level).saturating_sub(self.exp)
    }

    /// Banks `amount` and consumes full requirements while they are met, so
    /// one large orb can grant several levels. Returns the number of levels
    /// gained.
    pub fn gain(&mut self, amount: u32) -> u32 {
        self.exp += amount;
        let mut gained = 0;
        loop {
            let needed = self.curve.requirement(self.level);
            if self.exp < needed {
                break;
            }
            self.exp -= needed;
            self.level += 1;
            gained += 1;
        }
        gained
    }
}

/// How a kill's experience value splits into pickup orbs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbPlan {
    pub big: u32,
    pub medium: u32,
    pub small: u32,
}

impl OrbPlan {
    pub const BIG_VALUE: u32 = 10;
    pub const MEDIUM_VALUE: u32 = 5;
    pub const SMALL_VALUE: u32 = 1;

    pub fn total_value(&self) -> u32 {
        self.big * Self::BIG_VALUE + self.medium * Self::MEDIUM_VALUE + self.small
    }
}

/// Every kill splits its value into mediums plus change; boss kills drop
/// `value/10` big orbs on top of that.
pub fn orb_split(exp_drop: u32, is_boss: bool) -> OrbPlan {
    OrbPlan {
        big: if is_boss { exp_drop / OrbPlan::BIG_VALUE } else { 0 },
        medium: exp_drop / OrbPlan::MEDIUM_VALUE,
        small: exp_drop % OrbPlan::MEDIUM_VALUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_orb_can_grant_multiple_levels() {
        // Requirements from level 1: 10, then 15
        let mut tracker = ExperienceTracker::default();
        let gained = tracker.gain(40);
        assert_eq!(gained, 2);
        assert_eq!(tracker.level(), 3);
        assert_eq!(tracker.exp(), 15);
    }

    #[test]
    fn test_exp_stays_below_requirement() {
        let mut tracker = ExperienceTracker::default();
        for amount in [3, 7, 12, 50, 200, 999] {
            tracker.gain(amount);
            assert!(tracker.exp() < EXP_CURVE.requirement(tracker.level()));
        }
    }

    #[test]
    fn test_orb_split_preserves_value_for_normal_kills() {
        for exp in [0, 1, 4, 5, 17, 100] {
            let plan = orb_split(exp, false);
            assert_eq!(plan.total_value(), exp);
            assert_eq!(plan.big, 0);
        }
    }

    #[test]
    fn test_boss_kills_add_big_orbs_on_top() {
        let plan = orb_split(100, true);
        assert_eq!(plan, OrbPlan { big: 10, medium: 20, small: 0 });
        assert_eq!(plan.total_value(), 200);

        let odd = orb_split(57, true);
        assert_eq!(odd, OrbPlan { big: 5, medium: 11, small: 2 });
    }
}
