//! Weapon and passive skill definitions
//!
//! Each skill has exactly [`MAX_SKILL_LEVEL`] level entries (index =
//! level - 1). Weapons additionally carry a behavior tag the external combat
//! layer dispatches on, and — where an evolved form exists — the passive
//! whose max level unlocks the evolution.

use serde::{Deserialize, Serialize};

/// Levels every skill tops out at
pub const MAX_SKILL_LEVEL: u32 = 5;

/// Weapon skill ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    MagicBolt,
    RotatingAxe,
    ThrowingKnife,
    Fireball,
    Lightning,
    GarlicAura,
    HomingMissile,
    PoisonCloud,
    FrostShard,
}

/// Passive skill ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PassiveKind {
    PowerUp,
    SpeedUp,
    ArmorUp,
    HpUp,
    CooldownUp,
    PickupUp,
    Vampire,
    CriticalHit,
    Dodge,
    ExpBoost,
}

/// Closed set of firing behaviors; the combat collaborator dispatches on the
/// tag, the progression engine never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponBehavior {
    /// Straight projectile at the nearest enemy
    Projectile,
    /// Bodies orbiting the player
    Orbit,
    /// Damage pulse around the player
    Aura,
    /// Arc jumping between enemies
    Chain,
    /// Seeking projectile
    Homing,
    /// Lingering damage field
    Cloud,
    /// Projectile with an area explosion
    Burst,
}

/// Evolved weapon forms (presentation-facing tags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvolvedForm {
    HomingBolt,
    StormAxe,
    BladeStorm,
    Inferno,
    Thunderstorm,
    HolyLight,
}

/// Evolution requirement attached to a weapon definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evolution {
    pub into: EvolvedForm,
    /// Passive that must reach its max level
    pub requires: PassiveKind,
}

/// Per-level weapon stat bundle.
///
/// Heterogeneous per-weapon knobs are mapped onto shared fields: `count`
/// doubles as chain length for [`WeaponBehavior::Chain`], `speed` as angular
/// speed for [`WeaponBehavior::Orbit`], `radius` as orbit radius or area,
/// and `duration` as lingering-field or slow duration. Unused fields are
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage: u32,
    /// Seconds between firings (before cooldown reduction)
    pub cooldown: f32,
    pub count: u32,
    pub speed: f32,
    pub radius: f32,
    pub duration: f32,
}

/// Immutable weapon skill definition
#[derive(Debug, Clone, Copy)]
pub struct WeaponDefinition {
    pub kind: WeaponKind,
    pub name: &'static str,
    pub behavior: WeaponBehavior,
    pub max_level: u32,
    pub levels: [WeaponStats; MAX_SKILL_LEVEL as usize],
    pub evolution: Option<Evolution>,
}

/// One stat delta a passive level applies to the player block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PassiveEffect {
    /// Multiplies all weapon damage
    DamageMultiplier(f32),
    /// Flat movement speed bonus
    SpeedBonus(f32),
    /// Fraction of incoming damage ignored
    DamageReduction(f32),
    /// Flat max-HP bonus
    HpBonus(u32),
    /// Fraction shaved off weapon cooldowns
    CooldownReduction(f32),
    /// Flat pickup-range bonus
    PickupBonus(f32),
    /// HP restored per kill
    HealOnKill(u32),
    /// Chance/multiplier for critical strikes
    Crit { chance: f32, multiplier: f32 },
    /// Chance to ignore a hit entirely
    DodgeChance(f32),
    /// Multiplies collected experience
    ExpMultiplier(f32),
}

/// Immutable passive skill definition
#[derive(Debug, Clone, Copy)]
pub struct PassiveDefinition {
    pub kind: PassiveKind,
    pub name: &'static str,
    pub max_level: u32,
    pub levels: [PassiveEffect; MAX_SKILL_LEVEL as usize],
}

const fn wstats(damage: u32, cooldown: f32, count: u32, speed: f32, radius: f32, duration: f32) -> WeaponStats {
    WeaponStats {
        damage,
        cooldown,
        count,
        speed,
        radius,
        duration,
    }
}

pub const WEAPONS: [WeaponDefinition; 9] = [
    WeaponDefinition {
        kind: WeaponKind::MagicBolt,
        name: "Magic Bolt",
        behavior: WeaponBehavior::Projectile,
        max_level: MAX_SKILL_LEVEL,
        levels: [
            wstats(20, 1.2, 1, 300.0, 0.0, 0.0),
            wstats(26, 1.1, 1, 320.0, 0.0, 0.0),
            wstats(32, 1.0, 2, 340.0, 0.0, 0.0),
            wstats(40, 0.9, 2, 360.0, 0.0, 0.0),
            wstats(50, 0.8, 3, 380.0, 0.0, 0.0),
        ],
        evolution: Some(Evolution {
            into: EvolvedForm::HomingBolt,
            requires: PassiveKind::PowerUp,
        }),
    },
    WeaponDefinition {
        kind: WeaponKind::RotatingAxe,
        name: "Rotating Axe",
        behavior: WeaponBehavior::Orbit,
        max_level: MAX_SKILL_LEVEL,
        levels: [
            wstats(30, 0.0, 1, 120.0, 70.0, 0.0),
            wstats(38, 0.0, 1, 140.0, 75.0, 0.0),
            wstats(48, 0.0, 2, 160.0, 80.0, 0.0),
            wstats(60, 0.0, 2, 180.0, 85.0, 0.0),
            wstats(74, 0.0, 3, 200.0, 90.0, 0.0),
        ],
        evolution: Some(Evolution {
            into: EvolvedForm::StormAxe,
            requires: PassiveKind::CooldownUp,
        }),
    },
    WeaponDefinition {
        kind: WeaponKind::ThrowingKnife,
        name: "Throwing Knife",
        behavior: WeaponBehavior::Projectile,
        max_level: MAX_SKILL_LEVEL,
        levels: [
            wstats(15, 0.9, 1, 450.0, 0.0, 0.0),
            wstats(19, 0.8, 2, 480.0, 0.0, 0.0),
            wstats(24, 0.7, 2, 510.0, 0.0, 0.0),
            wstats(30, 0.6, 3, 540.0, 0.0, 0.0),
            wstats(38, 0.5, 4, 580.0, 0.0, 0.0),
        ],
        evolution: Some(Evolution {
            into: EvolvedForm::BladeStorm,
            requires: PassiveKind::SpeedUp,
        }),
    },
    WeaponDefinition {
        kind: WeaponKind::Fireball,
        name: "Fireball",
        behavior: WeaponBehavior::Burst,
        max_level: MAX_SKILL_LEVEL,
        levels: [
            wstats(40, 2.2, 1, 200.0, 60.0, 0.0),
            wstats(52, 2.0, 1, 210.0, 70.0, 0.0),
            wstats(66, 1.8, 1, 220.0, 82.0, 0.0),
            wstats(84, 1.6, 1, 230.0, 96.0, 0.0),
            wstats(105, 1.4, 1, 240.0, 112.0, 0.0),
        ],
        evolution: Some(Evolution {
            into: EvolvedForm::Inferno,
            requires: PassiveKind::ArmorUp,
        }),
    },
    WeaponDefinition {
        kind: WeaponKind::Lightning,
        name: "Chain Lightning",
        behavior: WeaponBehavior::Chain,
        max_level: MAX_SKILL_LEVEL,
        levels: [
            wstats(28, 1.6, 2, 0.0, 0.0, 0.0),
            wstats(36, 1.5, 3, 0.0, 0.0, 0.0),
            wstats(45, 1.4, 4, 0.0, 0.0, 0.0),
            wstats(56, 1.2, 5, 0.0, 0.0, 0.0),
            wstats(70, 1.0, 6, 0.0, 0.0, 0.0),
        ],
        evolution: Some(Evolution {
            into: EvolvedForm::Thunderstorm,
            requires: PassiveKind::PickupUp,
        }),
    },
    WeaponDefinition {
        kind: WeaponKind::GarlicAura,
        name: "Garlic Aura",
        behavior: WeaponBehavior::Aura,
        max_level: MAX_SKILL_LEVEL,
        levels: [
            wstats(5, 0.6, 1, 0.0, 80.0, 0.0),
            wstats(8, 0.55, 1, 0.0, 95.0, 0.0),
            wstats(12, 0.5, 1, 0.0, 112.0, 0.0),
            wstats(17, 0.45, 1, 0.0, 130.0, 0.0),
            wstats(23, 0.38, 1, 0.0, 150.0, 0.0),
        ],
        evolution: Some(Evolution {
            into: EvolvedForm::HolyLight,
            requires: PassiveKind::HpUp,
        }),
    },
    WeaponDefinition {
        kind: WeaponKind::HomingMissile,
        name: "Homing Missile",
        behavior: WeaponBehavior::Homing,
        max_level: MAX_SKILL_LEVEL,
        levels: [
            wstats(25, 1.8, 1, 180.0, 0.0, 0.0),
            wstats(32, 1.7, 1, 190.0, 0.0, 0.0),
            wstats(40, 1.6, 2, 200.0, 0.0, 0.0),
            wstats(50, 1.5, 2, 210.0, 0.0, 0.0),
            wstats(62, 1.4, 3, 220.0, 0.0, 0.0),
        ],
        evolution: None,
    },
    WeaponDefinition {
        kind: WeaponKind::PoisonCloud,
        name: "Poison Cloud",
        behavior: WeaponBehavior::Cloud,
        max_level: MAX_SKILL_LEVEL,
        levels: [
            wstats(8, 3.0, 1, 0.0, 70.0, 3.0),
            wstats(12, 2.8, 1, 0.0, 80.0, 3.5),
            wstats(17, 2.6, 1, 0.0, 90.0, 4.0),
            wstats(23, 2.4, 1, 0.0, 100.0, 4.5),
            wstats(30, 2.2, 1, 0.0, 110.0, 5.0),
        ],
        evolution: None,
    },
    WeaponDefinition {
        kind: WeaponKind::FrostShard,
        name: "Frost Shard",
        behavior: WeaponBehavior::Projectile,
        max_level: MAX_SKILL_LEVEL,
        levels: [
            wstats(18, 1.5, 1, 0.0, 0.0, 1.5),
            wstats(24, 1.4, 1, 0.0, 0.0, 1.8),
            wstats(31, 1.3, 2, 0.0, 0.0, 2.1),
            wstats(39, 1.2, 2, 0.0, 0.0, 2.4),
            wstats(48, 1.1, 3, 0.0, 0.0, 2.7),
        ],
        evolution: None,
    },
];

pub const PASSIVES: [PassiveDefinition; 10] = [
    PassiveDefinition {
        kind: PassiveKind::PowerUp,
        name: "Power Up",
        max_level: MAX_SKILL_LEVEL,
        levels: [
            PassiveEffect::DamageMultiplier(1.20),
            PassiveEffect::DamageMultiplier(1.44),
            PassiveEffect::DamageMultiplier(1.73),
            PassiveEffect::DamageMultiplier(2.07),
            PassiveEffect::DamageMultiplier(2.49),
        ],
    },
    PassiveDefinition {
        kind: PassiveKind::SpeedUp,
        name: "Speed Up",
        max_level: MAX_SKILL_LEVEL,
        levels: [
            PassiveEffect::SpeedBonus(25.0),
            PassiveEffect::SpeedBonus(50.0),
            PassiveEffect::SpeedBonus(80.0),
            PassiveEffect::SpeedBonus(115.0),
            PassiveEffect::SpeedBonus(155.0),
        ],
    },
    PassiveDefinition {
        kind: PassiveKind::ArmorUp,
        name: "Armor Up",
        max_level: MAX_SKILL_LEVEL,
        levels: [
            PassiveEffect::DamageReduction(0.10),
            PassiveEffect::DamageReduction(0.18),
            PassiveEffect::DamageReduction(0.25),
            PassiveEffect::DamageReduction(0.32),
            PassiveEffect::DamageReduction(0.40),
        ],
    },
    PassiveDefinition {
        kind: PassiveKind::HpUp,
        name: "Vitality",
        max_level: MAX_SKILL_LEVEL,
        levels: [
            PassiveEffect::HpBonus(30),
            PassiveEffect::HpBonus(65),
            PassiveEffect::HpBonus(105),
            PassiveEffect::HpBonus(150),
            PassiveEffect::HpBonus(200),
        ],
    },
    PassiveDefinition {
        kind: PassiveKind::CooldownUp,
        name: "Quick Hands",
        max_level: MAX_SKILL_LEVEL,
        levels: [
            PassiveEffect::CooldownReduction(0.10),
            PassiveEffect::CooldownReduction(0.18),
            PassiveEffect::CooldownReduction(0.25),
            PassiveEffect::CooldownReduction(0.32),
            PassiveEffect::CooldownReduction(0.40),
        ],
    },
    PassiveDefinition {
        kind: PassiveKind::PickupUp,
        name: "Magnet",
        max_level: MAX_SKILL_LEVEL,
        levels: [
            PassiveEffect::PickupBonus(40.0),
            PassiveEffect::PickupBonus(85.0),
            PassiveEffect::PickupBonus(135.0),
            PassiveEffect::PickupBonus(190.0),
            PassiveEffect::PickupBonus(250.0),
        ],
    },
    PassiveDefinition {
        kind: PassiveKind::Vampire,
        name: "Vampire",
        max_level: MAX_SKILL_LEVEL,
        levels: [
            PassiveEffect::HealOnKill(1),
            PassiveEffect::HealOnKill(2),
            PassiveEffect::HealOnKill(3),
            PassiveEffect::HealOnKill(5),
            PassiveEffect::HealOnKill(8),
        ],
    },
    PassiveDefinition {
        kind: PassiveKind::CriticalHit,
        name: "Critical Hit",
        max_level: MAX_SKILL_LEVEL,
        levels: [
            PassiveEffect::Crit { chance: 0.08, multiplier: 2.0 },
            PassiveEffect::Crit { chance: 0.12, multiplier: 2.2 },
            PassiveEffect::Crit { chance: 0.16, multiplier: 2.4 },
            PassiveEffect::Crit { chance: 0.20, multiplier: 2.6 },
            PassiveEffect::Crit { chance: 0.25, multiplier: 3.0 },
        ],
    },
    PassiveDefinition {
        kind: PassiveKind::Dodge,
        name: "Dodge",
        max_level: MAX_SKILL_LEVEL,
        levels: [
            PassiveEffect::DodgeChance(0.08),
            PassiveEffect::DodgeChance(0.12),
            PassiveEffect::DodgeChance(0.16),
            PassiveEffect::DodgeChance(0.20),
            PassiveEffect::DodgeChance(0.25),
        ],
    },
    PassiveDefinition {
        kind: PassiveKind::ExpBoost,
        name: "Scholar",
        max_level: MAX_SKILL_LEVEL,
        levels: [
            PassiveEffect::ExpMultiplier(1.15),
            PassiveEffect::ExpMultiplier(1.30),
            PassiveEffect::ExpMultiplier(1.45),
            PassiveEffect::ExpMultiplier(1.60),
            PassiveEffect::ExpMultiplier(1.80),
        ],
    },
];

/// Total definition for a weapon id.
pub fn weapon(kind: WeaponKind) -> &'static WeaponDefinition {
    WEAPONS
        .iter()
        .find(|w| w.kind == kind)
        .unwrap_or(&WEAPONS[0])
}

/// Total definition for a passive id.
pub fn passive(kind: PassiveKind) -> &'static PassiveDefinition {
    PASSIVES
        .iter()
        .find(|p| p.kind == kind)
        .unwrap_or(&PASSIVES[0])
}
