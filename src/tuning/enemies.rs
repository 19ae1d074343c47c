//! Enemy and boss archetype tables
//!
//! Archetypes are immutable templates; spawned instances copy these values
//! and scale them by the scheduler's difficulty multipliers.

use serde::{Deserialize, Serialize};

/// Regular enemy archetype ids, in endless-mode unlock order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Slime,
    Mushroom,
    Skeleton,
    Ghost,
    FireDemon,
    RockGolem,
    VoidTentacle,
    DesertWorm,
    ChaosBody,
}

/// Boss archetype ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BossKind {
    TreeSpirit,
    ScorpionKing,
    DarkKnight,
    LavaGiant,
    VoidOverlord,
}

/// Optional behavior tag interpreted by the external combat layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialBehavior {
    /// Takes reduced damage and resists knockback
    Armored,
    /// Rendered translucent and phases through obstacles
    Spectral,
}

/// Immutable template for a regular enemy's base stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyArchetype {
    pub kind: EnemyKind,
    pub name: &'static str,
    /// Base hit points before any multiplier
    pub hp: u32,
    /// Movement speed (pixels/sec)
    pub speed: f32,
    /// Contact damage before any multiplier
    pub damage: u32,
    /// Experience dropped on death
    pub exp_drop: u32,
    pub score_value: u32,
    /// Knockback impulse applied when hit
    pub knockback: f32,
    pub special: Option<SpecialBehavior>,
}

/// Boss template; like [`EnemyArchetype`] plus a one-way phase transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossArchetype {
    pub kind: BossKind,
    pub name: &'static str,
    pub hp: u32,
    pub speed: f32,
    pub damage: u32,
    pub exp_drop: u32,
    pub score_value: u32,
    pub knockback: f32,
    /// HP fraction below which the boss enters phase two, once, irreversibly
    pub phase2_threshold: f32,
}

pub const ENEMIES: [EnemyArchetype; 9] = [
    EnemyArchetype {
        kind: EnemyKind::Slime,
        name: "Slime",
        hp: 30,
        speed: 60.0,
        damage: 8,
        exp_drop: 2,
        score_value: 10,
        knockback: 80.0,
        special: None,
    },
    EnemyArchetype {
        kind: EnemyKind::Mushroom,
        name: "Mushroom",
        hp: 55,
        speed: 45.0,
        damage: 14,
        exp_drop: 3,
        score_value: 15,
        knockback: 60.0,
        special: None,
    },
    EnemyArchetype {
        kind: EnemyKind::Skeleton,
        name: "Skeleton",
        hp: 75,
        speed: 80.0,
        damage: 18,
        exp_drop: 4,
        score_value: 20,
        knockback: 100.0,
        special: None,
    },
    EnemyArchetype {
        kind: EnemyKind::Ghost,
        name: "Ghost",
        hp: 65,
        speed: 95.0,
        damage: 16,
        exp_drop: 5,
        score_value: 25,
        knockback: 120.0,
        special: Some(SpecialBehavior::Spectral),
    },
    EnemyArchetype {
        kind: EnemyKind::FireDemon,
        name: "Fire Demon",
        hp: 130,
        speed: 60.0,
        damage: 28,
        exp_drop: 7,
        score_value: 35,
        knockback: 80.0,
        special: None,
    },
    EnemyArchetype {
        kind: EnemyKind::RockGolem,
        name: "Rock Golem",
        hp: 220,
        speed: 38.0,
        damage: 40,
        exp_drop: 10,
        score_value: 50,
        knockback: 40.0,
        special: Some(SpecialBehavior::Armored),
    },
    EnemyArchetype {
        kind: EnemyKind::VoidTentacle,
        name: "Void Tentacle",
        hp: 160,
        speed: 85.0,
        damage: 32,
        exp_drop: 8,
        score_value: 45,
        knockback: 90.0,
        special: None,
    },
    EnemyArchetype {
        kind: EnemyKind::DesertWorm,
        name: "Desert Worm",
        hp: 45,
        speed: 70.0,
        damage: 12,
        exp_drop: 3,
        score_value: 12,
        knockback: 70.0,
        special: None,
    },
    EnemyArchetype {
        kind: EnemyKind::ChaosBody,
        name: "Chaos Body",
        hp: 180,
        speed: 65.0,
        damage: 35,
        exp_drop: 9,
        score_value: 48,
        knockback: 85.0,
        special: None,
    },
];

pub const BOSSES: [BossArchetype; 5] = [
    BossArchetype {
        kind: BossKind::TreeSpirit,
        name: "Tree Spirit",
        hp: 2000,
        speed: 50.0,
        damage: 40,
        exp_drop: 100,
        score_value: 500,
        knockback: 20.0,
        phase2_threshold: 0.5,
    },
    BossArchetype {
        kind: BossKind::ScorpionKing,
        name: "Scorpion King",
        hp: 3500,
        speed: 65.0,
        damage: 55,
        exp_drop: 150,
        score_value: 750,
        knockback: 15.0,
        phase2_threshold: 0.5,
    },
    BossArchetype {
        kind: BossKind::DarkKnight,
        name: "Dark Knight",
        hp: 5000,
        speed: 75.0,
        damage: 65,
        exp_drop: 200,
        score_value: 1000,
        knockback: 10.0,
        phase2_threshold: 0.5,
    },
    BossArchetype {
        kind: BossKind::LavaGiant,
        name: "Lava Giant",
        hp: 7000,
        speed: 48.0,
        damage: 75,
        exp_drop: 250,
        score_value: 1500,
        knockback: 5.0,
        phase2_threshold: 0.5,
    },
    BossArchetype {
        kind: BossKind::VoidOverlord,
        name: "Void Overlord",
        hp: 10000,
        speed: 70.0,
        damage: 85,
        exp_drop: 500,
        score_value: 3000,
        knockback: 5.0,
        phase2_threshold: 0.5,
    },
];

/// Lookup view over the archetype tables.
///
/// The default catalog exposes the full shipped tables; tests and modded
/// configurations may narrow the slices, in which case a configured id that
/// is absent degrades to a logged no-op at the spawn site.
#[derive(Debug, Clone, Copy)]
pub struct ArchetypeCatalog {
    pub enemies: &'static [EnemyArchetype],
    pub bosses: &'static [BossArchetype],
}

impl Default for ArchetypeCatalog {
    fn default() -> Self {
        Self {
            enemies: &ENEMIES,
            bosses: &BOSSES,
        }
    }
}

impl ArchetypeCatalog {
    pub fn enemy(&self, kind: EnemyKind) -> Option<&'static EnemyArchetype> {
        self.enemies.iter().find(|a| a.kind == kind)
    }

    pub fn boss(&self, kind: BossKind) -> Option<&'static BossArchetype> {
        self.bosses.iter().find(|a| a.kind == kind)
    }
}
