//! Core session types and the world-facing seam
//!
//! Everything the session needs to persist or hand across the boundary to
//! the presentation layer lives here. The engine never owns entities; it
//! talks to them through [`EnemyWorld`] and reports everything else as
//! [`GameEvent`] values returned from each update.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::skills::UpgradeChoice;
use crate::tuning::{
    AchievementId, BossKind, EnemyKind, EvolvedForm, PassiveEffect, PassiveKind, WeaponKind,
    WeaponStats,
};

/// Which ruleset the session runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Fixed level with a timed boss and a win condition
    Campaign,
    /// Unbounded waves of scaling difficulty
    Endless,
}

/// Visible play area in world units. Spawn positions are chosen just
/// outside its edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Opaque id for an entity the world spawned on our behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle(pub u32);

/// One regular enemy spawn, fully resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub archetype: EnemyKind,
    pub pos: Vec2,
    pub hp_mult: f32,
    pub damage_mult: f32,
}

/// One boss spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossSpawnRequest {
    pub archetype: BossKind,
    pub pos: Vec2,
}

/// Seam to the entity layer. The scheduler asks it what is alive and tells
/// it what to spawn; a `None` from [`spawn_enemy`](EnemyWorld::spawn_enemy)
/// means the world refused (hard cap) and the spawn is dropped without
/// counting against the batch quota.
pub trait EnemyWorld {
    fn alive_enemies(&self) -> usize;
    fn viewport(&self) -> Viewport;
    fn spawn_enemy(&mut self, request: SpawnRequest) -> Option<EntityHandle>;
    fn spawn_boss(&mut self, request: BossSpawnRequest) -> EntityHandle;
}

/// Aggregate player stat block. Passives and achievement rewards write into
/// it; the combat layer reads it every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub max_hp: u32,
    pub hp: u32,
    pub speed: f32,
    pub damage_multiplier: f32,
    pub damage_reduction: f32,
    pub pickup_range: f32,
    pub heal_on_kill: u32,
    pub speed_bonus: f32,
    pub hp_bonus: u32,
    pub cooldown_reduction: f32,
    pub pickup_bonus: f32,
    pub crit_chance: f32,
    pub crit_multiplier: f32,
    pub dodge_chance: f32,
    pub exp_multiplier: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            max_hp: 100,
            hp: 100,
            speed: 200.0,
            damage_multiplier: 1.0,
            damage_reduction: 0.0,
            pickup_range: 60.0,
            heal_on_kill: 0,
            speed_bonus: 0.0,
            hp_bonus: 0,
            cooldown_reduction: 0.0,
            pickup_bonus: 0.0,
            crit_chance: 0.0,
            crit_multiplier: 2.0,
            dodge_chance: 0.0,
            exp_multiplier: 1.0,
        }
    }
}

impl PlayerStats {
    /// Applies one passive level. Effects set their stat absolutely, so
    /// re-applying the same level is a no-op and upgrading overwrites the
    /// previous level instead of stacking.
    pub fn apply_passive(&mut self, effect: &PassiveEffect) {
        match *effect {
            PassiveEffect::DamageMultiplier(m) => self.damage_multiplier = m,
            PassiveEffect::SpeedBonus(b) => self.speed_bonus = b,
            PassiveEffect::DamageReduction(r) => self.damage_reduction = r,
            PassiveEffect::HpBonus(b) => {
                // Grant the delta over the previous bonus as current HP too
                let gained = b.saturating_sub(self.hp_bonus);
                self.hp_bonus = b;
                self.max_hp += gained;
                self.hp = (self.hp + gained).min(self.max_hp);
            }
            PassiveEffect::CooldownReduction(r) => self.cooldown_reduction = r,
            PassiveEffect::PickupBonus(b) => self.pickup_bonus = b,
            PassiveEffect::HealOnKill(h) => self.heal_on_kill = h,
            PassiveEffect::Crit { chance, multiplier } => {
                self.crit_chance = chance;
                self.crit_multiplier = multiplier;
            }
            PassiveEffect::DodgeChance(c) => self.dodge_chance = c,
            PassiveEffect::ExpMultiplier(m) => self.exp_multiplier = m,
        }
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }
}

/// Everything the engine wants the outer layers to react to, in the order
/// it happened within the update.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Player reached `level`; pick one of `choices` via
    /// [`Session::apply_choice`](crate::sim::tick::Session::apply_choice)
    LevelUp { level: u32, choices: Vec<UpgradeChoice> },
    /// A boss is about to spawn after a short cooldown
    BossAlert { boss: BossKind },
    WaveStarted { wave: u32 },
    /// Final batch quota exhausted and the field is clear
    WaveCompleted { wave: u32 },
    /// A weapon's cooldown expired; the combat layer should fire it
    WeaponFired { weapon: WeaponKind, stats: WeaponStats },
    WeaponUpgraded { weapon: WeaponKind, level: u32 },
    WeaponEvolved { from: WeaponKind, into: EvolvedForm },
    PassiveUpgraded { passive: PassiveKind, level: u32 },
    AchievementUnlocked { id: AchievementId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{passive, PASSIVES};

    #[test]
    fn test_apply_passive_is_idempotent() {
        let mut stats = PlayerStats::default();
        for def in &PASSIVES {
            stats.apply_passive(&def.levels[2]);
        }
        let snapshot = stats;
        for def in &PASSIVES {
            stats.apply_passive(&def.levels[2]);
        }
        assert_eq!(stats, snapshot);
    }

    #[test]
    fn test_hp_bonus_upgrade_grants_only_the_delta() {
        let mut stats = PlayerStats::default();
        let vitality = passive(PassiveKind::HpUp);
        stats.apply_passive(&vitality.levels[0]); // +30
        assert_eq!(stats.max_hp, 130);
        assert_eq!(stats.hp, 130);
        stats.hp = 50;
        stats.apply_passive(&vitality.levels[1]); // 65 total, +35 over level 1
        assert_eq!(stats.max_hp, 165);
        assert_eq!(stats.hp, 85);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut stats = PlayerStats::default();
        stats.hp = 95;
        stats.heal(20);
        assert_eq!(stats.hp, 100);
    }
}
