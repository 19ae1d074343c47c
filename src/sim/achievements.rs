//! Session achievement tracking and permanent reward stacking
//!
//! The tracker folds session counters into lifetime totals, runs every
//! definition's predicate after each state change, unlocks each achievement
//! at most once across the whole save, and keeps the combined reward bundle
//! up to date.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameMode};
use crate::tuning::{AchievementId, AchievementProgress, ACHIEVEMENTS};

/// Counters for the current run only
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStats {
    pub time_secs: f32,
    pub level: u32,
    pub score: u64,
    pub kills: u64,
    pub boss_kills: u64,
    pub orbs: u64,
    pub took_damage: bool,
    pub won: bool,
    pub combo: u32,
    pub max_combo: u32,
    pub unique_weapons: u32,
    pub total_skill_levels: u32,
}

/// Counters that persist across runs in the save file
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeStats {
    pub total_kills: u64,
    pub total_boss_kills: u64,
    pub total_orbs: u64,
    pub total_score: u64,
    pub play_time_secs: f64,
    pub deaths: u64,
    pub highest_level: u32,
    pub highest_combo: u32,
}

impl LifetimeStats {
    /// Folds a finished session in
    pub fn absorb(&mut self, session: &SessionStats, won: bool) {
        self.total_kills += session.kills;
        self.total_boss_kills += session.boss_kills;
        self.total_orbs += session.orbs;
        self.total_score += session.score;
        self.play_time_secs += session.time_secs as f64;
        if !won {
            self.deaths += 1;
        }
        self.highest_level = self.highest_level.max(session.level);
        self.highest_combo = self.highest_combo.max(session.max_combo);
    }
}

/// Combined permanent bonus from every unlocked achievement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardBundle {
    pub exp_mult: f32,
    pub damage_mult: f32,
    pub pickup_range: f32,
    pub speed_bonus: f32,
    pub hp_bonus: u32,
}

impl Default for RewardBundle {
    fn default() -> Self {
        Self {
            exp_mult: 1.0,
            damage_mult: 1.0,
            pickup_range: 0.0,
            speed_bonus: 0.0,
            hp_bonus: 0,
        }
    }
}

impl RewardBundle {
    /// Multipliers compose multiplicatively, flat bonuses sum.
    fn from_unlocked(unlocked: &BTreeSet<AchievementId>) -> Self {
        let mut bundle = Self::default();
        for def in ACHIEVEMENTS.iter().filter(|d| unlocked.contains(&d.id)) {
            bundle.exp_mult *= def.reward.exp_mult;
            bundle.damage_mult *= def.reward.damage_mult;
            bundle.pickup_range += def.reward.pickup_range;
            bundle.speed_bonus += def.reward.speed_bonus;
            bundle.hp_bonus += def.reward.hp_bonus;
        }
        bundle
    }
}

/// Watches one session on top of the lifetime unlock set
pub struct AchievementTracker {
    mode: GameMode,
    session: SessionStats,
    lifetime: LifetimeStats,
    unlocked: BTreeSet<AchievementId>,
    rewards: RewardBundle,
}

impl AchievementTracker {
    pub fn new(mode: GameMode, lifetime: LifetimeStats, unlocked: BTreeSet<AchievementId>) -> Self {
        let rewards = RewardBundle::from_unlocked(&unlocked);
        Self { mode, session: SessionStats::default(), lifetime, unlocked, rewards }
    }

    pub fn session(&self) -> &SessionStats {
        &self.session
    }

    pub fn rewards(&self) -> RewardBundle {
        self.rewards
    }

    pub fn unlocked(&self) -> &BTreeSet<AchievementId> {
        &self.unlocked
    }

    pub fn tick_time(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        self.session.time_secs += dt;
        self.check(events);
    }

    pub fn record_kill(&mut self, is_boss: bool, events: &mut Vec<GameEvent>) {
        self.session.kills += 1;
        if is_boss {
            self.session.boss_kills += 1;
        }
        self.session.combo += 1;
        self.session.max_combo = self.session.max_combo.max(self.session.combo);
        self.check(events);
    }

    pub fn record_orb(&mut self, events: &mut Vec<GameEvent>) {
        self.session.orbs += 1;
        self.check(events);
    }

    pub fn record_damage_taken(&mut self) {
        self.session.took_damage = true;
        self.session.combo = 0;
    }

    pub fn reset_combo(&mut self) {
        self.session.combo = 0;
    }

    pub fn set_level(&mut self, level: u32, events: &mut Vec<GameEvent>) {
        self.session.level = level;
        self.check(events);
    }

    pub fn set_score(&mut self, score: u64, events: &mut Vec<GameEvent>) {
        self.session.score = score;
        self.check(events);
    }

    pub fn set_loadout(&mut self, unique_weapons: u32, total_skill_levels: u32, events: &mut Vec<GameEvent>) {
        self.session.unique_weapons = unique_weapons;
        self.session.total_skill_levels = total_skill_levels;
        self.check(events);
    }

    /// Marks the session over and runs one final check so win-gated
    /// achievements can land. Returns the folded lifetime stats.
    pub fn end_session(&mut self, won: bool, events: &mut Vec<GameEvent>) -> LifetimeStats {
        self.session.won = won;
        self.check(events);
        let mut lifetime = self.lifetime;
        lifetime.absorb(&self.session, won);
        lifetime
    }

    fn progress(&self) -> AchievementProgress {
        AchievementProgress {
            total_kills: self.lifetime.total_kills + self.session.kills,
            total_boss_kills: self.lifetime.total_boss_kills + self.session.boss_kills,
            total_orbs: self.lifetime.total_orbs + self.session.orbs,
            total_score: self.lifetime.total_score + self.session.score,
            time_secs: self.session.time_secs,
            level: self.session.level,
            score: self.session.score,
            kills: self.session.kills,
            took_damage: self.session.took_damage,
            won: self.session.won,
            mode: self.mode,
            max_combo: self.session.max_combo,
            unique_weapons: self.session.unique_weapons,
            total_skill_levels: self.session.total_skill_levels,
        }
    }

    fn check(&mut self, events: &mut Vec<GameEvent>) {
        let progress = self.progress();
        let mut changed = false;
        for def in &ACHIEVEMENTS {
            if self.unlocked.contains(&def.id) || !(def.condition)(&progress) {
                continue;
            }
            self.unlocked.insert(def.id);
            events.push(GameEvent::AchievementUnlocked { id: def.id });
            changed = true;
        }
        if changed {
            self.rewards = RewardBundle::from_unlocked(&self.unlocked);
        }
    }
}
