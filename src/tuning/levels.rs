//! Campaign level definitions, endless-mode configuration and the
//! experience curve.

use super::enemies::{BossKind, EnemyKind};

/// Wave pacing knobs authored per campaign level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavePacing {
    /// Starting spawn count per wave
    pub base_count: u32,
    /// Additional enemies per wave
    pub count_growth: f32,
    /// Starting spawn interval (seconds)
    pub interval: f32,
    /// Interval floor the pacing never drops below (seconds)
    pub min_interval: f32,
}

/// Completion/star targets for a campaign level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarConditions {
    /// Survive at least this long (seconds)
    pub time: u32,
    /// Finish without taking damage
    pub no_hit: bool,
    /// Kill at least this many enemies
    pub kills: u32,
}

/// One authored campaign stage
#[derive(Debug, Clone, Copy)]
pub struct LevelDefinition {
    pub id: u32,
    pub name: &'static str,
    /// Level length (seconds)
    pub duration: u32,
    /// Boss trigger time; always <= duration
    pub boss_time: u32,
    /// Enemy archetypes this level may spawn
    pub enemies: &'static [EnemyKind],
    pub boss: BossKind,
    pub pacing: WavePacing,
    pub stars: StarConditions,
}

impl LevelDefinition {
    /// A level is well-formed when the boss fires within its duration and it
    /// can spawn at least one archetype.
    pub fn validate(&self) -> bool {
        self.boss_time <= self.duration && !self.enemies.is_empty()
    }
}

pub const LEVELS: [LevelDefinition; 5] = [
    LevelDefinition {
        id: 1,
        name: "Pixel Forest",
        duration: 180,
        boss_time: 150,
        enemies: &[EnemyKind::Slime, EnemyKind::Mushroom],
        boss: BossKind::TreeSpirit,
        pacing: WavePacing {
            base_count: 4,
            count_growth: 0.3,
            interval: 4.0,
            min_interval: 2.0,
        },
        stars: StarConditions {
            time: 120,
            no_hit: false,
            kills: 50,
        },
    },
    LevelDefinition {
        id: 2,
        name: "Desert Ruins",
        duration: 240,
        boss_time: 210,
        enemies: &[EnemyKind::DesertWorm, EnemyKind::Skeleton],
        boss: BossKind::ScorpionKing,
        pacing: WavePacing {
            base_count: 5,
            count_growth: 0.35,
            interval: 3.5,
            min_interval: 1.8,
        },
        stars: StarConditions {
            time: 180,
            no_hit: false,
            kills: 80,
        },
    },
    LevelDefinition {
        id: 3,
        name: "Haunted Castle",
        duration: 240,
        boss_time: 210,
        enemies: &[EnemyKind::Ghost, EnemyKind::Skeleton],
        boss: BossKind::DarkKnight,
        pacing: WavePacing {
            base_count: 5,
            count_growth: 0.4,
            interval: 3.2,
            min_interval: 1.6,
        },
        stars: StarConditions {
            time: 180,
            no_hit: false,
            kills: 100,
        },
    },
    LevelDefinition {
        id: 4,
        name: "Lava Caverns",
        duration: 300,
        boss_time: 270,
        enemies: &[EnemyKind::FireDemon, EnemyKind::RockGolem],
        boss: BossKind::LavaGiant,
        pacing: WavePacing {
            base_count: 6,
            count_growth: 0.45,
            interval: 3.0,
            min_interval: 1.4,
        },
        stars: StarConditions {
            time: 240,
            no_hit: false,
            kills: 130,
        },
    },
    LevelDefinition {
        id: 5,
        name: "Void Domain",
        duration: 300,
        boss_time: 270,
        enemies: &[
            EnemyKind::VoidTentacle,
            EnemyKind::ChaosBody,
            EnemyKind::Ghost,
        ],
        boss: BossKind::VoidOverlord,
        pacing: WavePacing {
            base_count: 7,
            count_growth: 0.5,
            interval: 2.5,
            min_interval: 1.2,
        },
        stars: StarConditions {
            time: 240,
            no_hit: false,
            kills: 160,
        },
    },
];

/// Endless-mode configuration record
#[derive(Debug, Clone, Copy)]
pub struct EndlessConfig {
    /// Ordered unlock list; the first `2 + wave/3` entries are available
    pub enemy_pool: &'static [EnemyKind],
    /// Bosses drawn uniformly on boss waves
    pub boss_pool: &'static [BossKind],
    /// Every n-th wave is an elite wave
    pub elite_every: u32,
    /// Every n-th wave opens with a boss
    pub boss_every: u32,
}

impl EndlessConfig {
    /// Number of unlocked archetypes at the given wave.
    pub fn unlocked_count(&self, wave: u32) -> usize {
        self.enemy_pool.len().min(2 + wave as usize / 3)
    }
}

pub const ENDLESS: EndlessConfig = EndlessConfig {
    enemy_pool: &[
        EnemyKind::Slime,
        EnemyKind::Mushroom,
        EnemyKind::Skeleton,
        EnemyKind::Ghost,
        EnemyKind::FireDemon,
        EnemyKind::RockGolem,
        EnemyKind::VoidTentacle,
        EnemyKind::DesertWorm,
        EnemyKind::ChaosBody,
    ],
    boss_pool: &[
        BossKind::TreeSpirit,
        BossKind::ScorpionKing,
        BossKind::DarkKnight,
        BossKind::LavaGiant,
        BossKind::VoidOverlord,
    ],
    elite_every: 10,
    boss_every: 20,
};

/// Cumulative experience thresholds indexed by player level.
///
/// The cost of advancing from level `l` to `l + 1` is
/// `table[l] - table[l - 1]`; past the table's end every level costs the
/// fallback amount, so the player level itself is uncapped.
#[derive(Debug, Clone, Copy)]
pub struct ExperienceCurve {
    pub table: &'static [u32],
    pub fallback: u32,
}

impl ExperienceCurve {
    /// Experience needed to leave `level` (levels start at 1).
    pub fn requirement(&self, level: u32) -> u32 {
        let level = level.max(1) as usize;
        match (self.table.get(level), self.table.get(level - 1)) {
            (Some(&next), Some(&prev)) => next.saturating_sub(prev),
            _ => self.fallback,
        }
    }

    /// Whether the threshold table is monotonically non-decreasing.
    pub fn is_monotone(&self) -> bool {
        self.table.windows(2).all(|w| w[0] <= w[1])
    }
}

pub const EXP_CURVE: ExperienceCurve = ExperienceCurve {
    table: &[
        0, 10, 25, 45, 70, 100, 135, 175, 220, 270, 325, 390, 465, 550, 645, 750, 865, 990, 1125,
        1270, 1430, 1610, 1810, 2030, 2270, 2530, 2810, 3110, 3430, 3770,
    ],
    fallback: 9999,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_levels_validate() {
        for level in &LEVELS {
            assert!(level.validate(), "level {} malformed", level.id);
        }
    }

    #[test]
    fn test_curve_is_monotone() {
        assert!(EXP_CURVE.is_monotone());
    }

    #[test]
    fn test_requirement_deltas() {
        // Cumulative 0, 10, 25 -> costs 10 then 15
        assert_eq!(EXP_CURVE.requirement(1), 10);
        assert_eq!(EXP_CURVE.requirement(2), 15);
        // Last in-table step, then the fallback takes over
        assert_eq!(EXP_CURVE.requirement(29), 340);
        assert_eq!(EXP_CURVE.requirement(30), 9999);
        assert_eq!(EXP_CURVE.requirement(500), 9999);
    }

    #[test]
    fn test_endless_unlock_prefix_grows() {
        assert_eq!(ENDLESS.unlocked_count(0), 2);
        assert_eq!(ENDLESS.unlocked_count(3), 3);
        assert_eq!(ENDLESS.unlocked_count(12), 6);
        // Saturates at the pool size
        assert_eq!(ENDLESS.unlocked_count(300), ENDLESS.enemy_pool.len());
    }
}
