//! Weapon and passive ownership, upgrades, and evolutions
//!
//! The engine owns which skills the player has and at what level. It rolls
//! level-up choice sets, applies picks, ticks weapon cooldowns into
//! [`GameEvent::WeaponFired`] events, and flips evolutions when a maxed
//! weapon's paired passive hits its own max.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, PlayerStats};
use crate::consts::MAX_WEAPONS;
use crate::tuning::{
    passive, weapon, PassiveKind, WeaponDefinition, WeaponKind, WeaponStats, PASSIVES, WEAPONS,
};

/// Number of options offered per level-up
pub const CHOICES_PER_LEVEL: usize = 3;

/// Stable id for any skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillId {
    Weapon(WeaponKind),
    Passive(PassiveKind),
}

/// One option in a level-up choice set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeChoice {
    NewWeapon(WeaponKind),
    UpgradeWeapon { weapon: WeaponKind, to_level: u32 },
    Passive { passive: PassiveKind, to_level: u32 },
}

impl UpgradeChoice {
    pub fn id(&self) -> SkillId {
        match *self {
            UpgradeChoice::NewWeapon(weapon) => SkillId::Weapon(weapon),
            UpgradeChoice::UpgradeWeapon { weapon, .. } => SkillId::Weapon(weapon),
            UpgradeChoice::Passive { passive, .. } => SkillId::Passive(passive),
        }
    }
}

/// One owned weapon with its live cooldown
#[derive(Debug, Clone)]
pub struct WeaponInstance {
    pub definition: &'static WeaponDefinition,
    pub level: u32,
    pub evolved: bool,
    cooldown: f32,
}

impl WeaponInstance {
    fn new(definition: &'static WeaponDefinition) -> Self {
        Self { definition, level: 1, evolved: false, cooldown: 0.0 }
    }

    pub fn kind(&self) -> WeaponKind {
        self.definition.kind
    }

    /// Stats for the current level
    pub fn stats(&self) -> WeaponStats {
        self.definition.levels[(self.level - 1) as usize]
    }

    /// Counts down and fires on expiry. Aura/orbit weapons with a zero
    /// cooldown never fire events; their effect is continuous.
    fn tick(&mut self, dt: f32, cooldown_reduction: f32, events: &mut Vec<GameEvent>) {
        let stats = self.stats();
        if stats.cooldown <= 0.0 {
            return;
        }
        self.cooldown -= dt;
        if self.cooldown <= 0.0 {
            events.push(GameEvent::WeaponFired { weapon: self.kind(), stats });
            self.cooldown = stats.cooldown * (1.0 - cooldown_reduction);
        }
    }
}

/// The player's full loadout
pub struct SkillEngine {
    weapons: Vec<WeaponInstance>,
    passives: BTreeMap<PassiveKind, u32>,
    max_weapons: usize,
}

impl Default for SkillEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillEngine {
    /// Fresh loadout; every run starts with a level-1 Magic Bolt.
    pub fn new() -> Self {
        let mut engine = Self {
            weapons: Vec::new(),
            passives: BTreeMap::new(),
            max_weapons: MAX_WEAPONS,
        };
        engine.weapons.push(WeaponInstance::new(weapon(WeaponKind::MagicBolt)));
        engine
    }

    pub fn weapons(&self) -> &[WeaponInstance] {
        &self.weapons
    }

    pub fn passive_level(&self, kind: PassiveKind) -> u32 {
        self.passives.get(&kind).copied().unwrap_or(0)
    }

    pub fn weapon_level(&self, kind: WeaponKind) -> u32 {
        self.weapons
            .iter()
            .find(|w| w.kind() == kind)
            .map(|w| w.level)
            .unwrap_or(0)
    }

    /// Owned weapon count plus levels across everything
    pub fn total_skill_levels(&self) -> u32 {
        let weapon_levels: u32 = self.weapons.iter().map(|w| w.level).sum();
        let passive_levels: u32 = self.passives.values().sum();
        weapon_levels + passive_levels
    }

    pub fn unique_weapons(&self) -> u32 {
        self.weapons.len() as u32
    }

    /// Ticks every weapon cooldown
    pub fn update(&mut self, dt: f32, player: &PlayerStats, events: &mut Vec<GameEvent>) {
        for instance in &mut self.weapons {
            instance.tick(dt, player.cooldown_reduction, events);
        }
    }

    /// Rolls a level-up choice set: up to [`CHOICES_PER_LEVEL`] distinct
    /// options, favoring whatever is still upgradeable. Never empty while
    /// anything can still grow; pads by repeating when fewer than three
    /// distinct options exist.
    pub fn generate_choices(&self, rng: &mut Pcg32) -> Vec<UpgradeChoice> {
        let mut pool = Vec::new();

        for instance in &self.weapons {
            if !instance.evolved && instance.level < instance.definition.max_level {
                pool.push(UpgradeChoice::UpgradeWeapon {
                    weapon: instance.kind(),
                    to_level: instance.level + 1,
                });
            }
        }
        if self.weapons.len() < self.max_weapons {
            for def in &WEAPONS {
                if self.weapon_level(def.kind) == 0 {
                    pool.push(UpgradeChoice::NewWeapon(def.kind));
                }
            }
        }
        for def in &PASSIVES {
            let level = self.passive_level(def.kind);
            if level < def.max_level {
                pool.push(UpgradeChoice::Passive { passive: def.kind, to_level: level + 1 });
            }
        }

        pool.shuffle(rng);
        pool.truncate(CHOICES_PER_LEVEL);
        // Pad when almost everything is maxed out, repeating passives
        // before weapons
        if !pool.is_empty() && pool.len() < CHOICES_PER_LEVEL {
            let passives: Vec<UpgradeChoice> = pool
                .iter()
                .copied()
                .filter(|c| matches!(c.id(), SkillId::Passive(_)))
                .collect();
            let pad = if passives.is_empty() { pool.clone() } else { passives };
            let mut index = 0;
            while pool.len() < CHOICES_PER_LEVEL {
                pool.push(pad[index % pad.len()]);
                index += 1;
            }
        }
        pool
    }

    /// Adds the weapon at level 1, or raises an owned one by a level. Full
    /// roster and max level are silent no-ops.
    pub fn acquire_or_upgrade_weapon(&mut self, kind: WeaponKind, events: &mut Vec<GameEvent>) {
        match self.weapons.iter_mut().find(|w| w.kind() == kind) {
            Some(instance) => {
                if instance.level < instance.definition.max_level {
                    instance.level += 1;
                    events.push(GameEvent::WeaponUpgraded { weapon: kind, level: instance.level });
                }
            }
            None => {
                if self.weapons.len() < self.max_weapons {
                    self.weapons.push(WeaponInstance::new(weapon(kind)));
                    events.push(GameEvent::WeaponUpgraded { weapon: kind, level: 1 });
                }
            }
        }
        self.check_evolutions(events);
    }

    /// Raises a passive by one level and applies its effect to the player.
    /// Max level is a silent no-op.
    pub fn upgrade_passive(
        &mut self,
        kind: PassiveKind,
        player: &mut PlayerStats,
        events: &mut Vec<GameEvent>,
    ) {
        let def = passive(kind);
        let current = self.passive_level(kind);
        if current >= def.max_level {
            return;
        }
        let level = current + 1;
        self.passives.insert(kind, level);
        player.apply_passive(&def.levels[(level - 1) as usize]);
        events.push(GameEvent::PassiveUpgraded { passive: kind, level });
        self.check_evolutions(events);
    }

    /// Applies one picked choice. Stale choices (the offered level no longer
    /// being the next one, or a full weapon roster) are ignored.
    pub fn apply_choice(
        &mut self,
        choice: UpgradeChoice,
        player: &mut PlayerStats,
        events: &mut Vec<GameEvent>,
    ) {
        match choice {
            UpgradeChoice::NewWeapon(kind) => {
                if self.weapon_level(kind) == 0 {
                    self.acquire_or_upgrade_weapon(kind, events);
                }
            }
            UpgradeChoice::UpgradeWeapon { weapon: kind, to_level } => {
                if to_level == self.weapon_level(kind) + 1 {
                    self.acquire_or_upgrade_weapon(kind, events);
                }
            }
            UpgradeChoice::Passive { passive: kind, to_level } => {
                if to_level == self.passive_level(kind) + 1 {
                    self.upgrade_passive(kind, player, events);
                }
            }
        }
    }

    /// Flips any weapon whose evolution conditions are now met: weapon at
    /// max level and its paired passive at max level. Fires once per
    /// weapon.
    fn check_evolutions(&mut self, events: &mut Vec<GameEvent>) {
        for instance in &mut self.weapons {
            if instance.evolved || instance.level < instance.definition.max_level {
                continue;
            }
            let Some(evolution) = instance.definition.evolution else {
                continue;
            };
            let required = passive(evolution.requires);
            let level = self.passives.get(&evolution.requires).copied().unwrap_or(0);
            if level >= required.max_level {
                instance.evolved = true;
                events.push(GameEvent::WeaponEvolved {
                    from: instance.kind(),
                    into: evolution.into,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use crate::tuning::MAX_SKILL_LEVEL;

    fn max_out_weapon(engine: &mut SkillEngine, kind: WeaponKind, player: &mut PlayerStats) {
        let start = engine.weapon_level(kind).max(1);
        for to_level in (start + 1)..=MAX_SKILL_LEVEL {
            let mut events = Vec::new();
            engine.apply_choice(
                UpgradeChoice::UpgradeWeapon { weapon: kind, to_level },
                player,
                &mut events,
            );
        }
    }

    #[test]
    fn test_starts_with_magic_bolt() {
        let engine = SkillEngine::new();
        assert_eq!(engine.weapon_level(WeaponKind::MagicBolt), 1);
        assert_eq!(engine.unique_weapons(), 1);
    }

    #[test]
    fn test_choices_are_distinct_and_exactly_three() {
        let engine = SkillEngine::new();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            let choices = engine.generate_choices(&mut rng);
            assert_eq!(choices.len(), CHOICES_PER_LEVEL);
            let mut ids: Vec<_> = choices.iter().map(|c| c.id()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), CHOICES_PER_LEVEL);
        }
    }

    #[test]
    fn test_padding_repeats_passives_before_weapons() {
        let mut engine = SkillEngine::new();
        let mut player = PlayerStats::default();
        let mut events = Vec::new();
        // Full roster with five weapons maxed; Magic Bolt stays one short
        for kind in [
            WeaponKind::RotatingAxe,
            WeaponKind::ThrowingKnife,
            WeaponKind::Fireball,
            WeaponKind::Lightning,
            WeaponKind::GarlicAura,
        ] {
            for _ in 0..MAX_SKILL_LEVEL {
                engine.acquire_or_upgrade_weapon(kind, &mut events);
            }
        }
        for _ in 0..(MAX_SKILL_LEVEL - 2) {
            engine.acquire_or_upgrade_weapon(WeaponKind::MagicBolt, &mut events);
        }
        // Every passive maxed except Dodge
        for def in &PASSIVES {
            if def.kind == PassiveKind::Dodge {
                continue;
            }
            for _ in 0..MAX_SKILL_LEVEL {
                engine.upgrade_passive(def.kind, &mut player, &mut events);
            }
        }

        // Exactly two distinct options remain, so the third is a repeat and
        // must be the passive
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..20 {
            let choices = engine.generate_choices(&mut rng);
            assert_eq!(choices.len(), CHOICES_PER_LEVEL);
            let passives = choices
                .iter()
                .filter(|c| matches!(c.id(), SkillId::Passive(_)))
                .count();
            assert_eq!(passives, 2);
        }
    }

    #[test]
    fn test_stale_choice_is_ignored()  {
        let mut engine = SkillEngine::new();
        let mut player = PlayerStats::default();
        let mut events = Vec::new();
        // Level 3 offered while the weapon sits at 1
        engine.apply_choice(
            UpgradeChoice::UpgradeWeapon { weapon: WeaponKind::MagicBolt, to_level: 3 },
            &mut player,
            &mut events,
        );
        assert_eq!(engine.weapon_level(WeaponKind::MagicBolt), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_weapon_cap_blocks_new_weapons() {
        let mut engine = SkillEngine::new();
        let mut player = PlayerStats::default();
        let mut events = Vec::new();
        for def in &WEAPONS {
            engine.apply_choice(UpgradeChoice::NewWeapon(def.kind), &mut player, &mut events);
        }
        assert_eq!(engine.unique_weapons() as usize, MAX_WEAPONS);
    }

    #[test]
    fn test_evolution_fires_exactly_once() {
        let mut engine = SkillEngine::new();
        let mut player = PlayerStats::default();
        max_out_weapon(&mut engine, WeaponKind::MagicBolt, &mut player);

        let mut all_events = Vec::new();
        for to_level in 1..=MAX_SKILL_LEVEL {
            engine.apply_choice(
                UpgradeChoice::Passive { passive: PassiveKind::PowerUp, to_level },
                &mut player,
                &mut all_events,
            );
        }
        let evolutions: Vec<_> = all_events
            .iter()
            .filter(|e| matches!(e, GameEvent::WeaponEvolved { .. }))
            .collect();
        assert_eq!(evolutions.len(), 1);
        assert!(matches!(
            evolutions[0],
            GameEvent::WeaponEvolved { from: WeaponKind::MagicBolt, .. }
        ));

        // Replaying the max passive level changes nothing
        let mut more = Vec::new();
        engine.apply_choice(
            UpgradeChoice::Passive { passive: PassiveKind::PowerUp, to_level: MAX_SKILL_LEVEL },
            &mut player,
            &mut more,
        );
        assert!(more.is_empty());
    }

    #[test]
    fn test_evolved_weapon_leaves_choice_pool() {
        let mut engine = SkillEngine::new();
        let mut player = PlayerStats::default();
        max_out_weapon(&mut engine, WeaponKind::MagicBolt, &mut player);
        let mut events = Vec::new();
        for to_level in 1..=MAX_SKILL_LEVEL {
            engine.apply_choice(
                UpgradeChoice::Passive { passive: PassiveKind::PowerUp, to_level },
                &mut player,
                &mut events,
            );
        }
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            for choice in engine.generate_choices(&mut rng) {
                assert_ne!(choice.id(), SkillId::Weapon(WeaponKind::MagicBolt));
            }
        }
    }

    #[test]
    fn test_cooldown_fires_and_respects_reduction() {
        let mut engine = SkillEngine::new();
        let mut player = PlayerStats::default();
        player.cooldown_reduction = 0.5;
        let mut events = Vec::new();
        // Magic Bolt level 1 cools down in 1.2s, halved to 0.6s
        let dt = 1.0 / 60.0;
        let mut fired_at = Vec::new();
        for tick in 0..120 {
            events.clear();
            engine.update(dt, &player, &mut events);
            if events.iter().any(|e| matches!(e, GameEvent::WeaponFired { .. })) {
                fired_at.push(tick);
            }
        }
        assert!(fired_at.len() >= 3);
        let gap = fired_at[2] - fired_at[1];
        assert!((35..=37).contains(&gap), "gap was {gap}");
    }
}
