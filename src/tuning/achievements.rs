//! Achievement definitions and their permanent rewards
//!
//! Conditions are plain predicates over an [`AchievementProgress`] snapshot
//! built by the session each check. Combat, collection and score conditions
//! look at combined lifetime + session totals so long-haul goals carry
//! across runs; survival and special conditions look at the current session
//! only.

use serde::{Deserialize, Serialize};

use crate::sim::state::GameMode;

/// Stable achievement ids; persisted in the save file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    FirstBlood,
    Kill100,
    Kill1000,
    BossHunter,
    Survivor5Min,
    Survivor10Min,
    MaxLevel,
    Untouchable,
    Collector,
    WeaponMaster,
    FullBuild,
    HighScore10k,
    HighScore50k,
    HighScore100k,
    Millionaire,
    SpeedRunner,
    Pacifist,
    ComboMaster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Combat,
    Survival,
    Collection,
    Score,
    Special,
}

/// Permanent bonus granted by an unlocked achievement. Multipliers default
/// to 1.0 and compose multiplicatively; flat bonuses default to zero and
/// sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reward {
    pub exp_mult: f32,
    pub damage_mult: f32,
    pub pickup_range: f32,
    pub speed_bonus: f32,
    pub hp_bonus: u32,
}

impl Reward {
    pub const NONE: Reward = Reward {
        exp_mult: 1.0,
        damage_mult: 1.0,
        pickup_range: 0.0,
        speed_bonus: 0.0,
        hp_bonus: 0,
    };

    const fn exp(mult: f32) -> Reward {
        Reward { exp_mult: mult, ..Reward::NONE }
    }

    const fn damage(mult: f32) -> Reward {
        Reward { damage_mult: mult, ..Reward::NONE }
    }

    const fn pickup(range: f32) -> Reward {
        Reward { pickup_range: range, ..Reward::NONE }
    }

    const fn speed(bonus: f32) -> Reward {
        Reward { speed_bonus: bonus, ..Reward::NONE }
    }

    const fn hp(bonus: u32) -> Reward {
        Reward { hp_bonus: bonus, ..Reward::NONE }
    }
}

impl Default for Reward {
    fn default() -> Self {
        Reward::NONE
    }
}

/// Snapshot the tracker hands each condition. `total_*` fields already fold
/// the current session into the lifetime counters.
#[derive(Debug, Clone, Copy)]
pub struct AchievementProgress {
    pub total_kills: u64,
    pub total_boss_kills: u64,
    pub total_orbs: u64,
    pub total_score: u64,
    pub time_secs: f32,
    pub level: u32,
    pub score: u64,
    pub kills: u64,
    pub took_damage: bool,
    pub won: bool,
    pub mode: GameMode,
    pub max_combo: u32,
    pub unique_weapons: u32,
    pub total_skill_levels: u32,
}

/// Immutable achievement definition
#[derive(Clone, Copy)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub category: Category,
    pub condition: fn(&AchievementProgress) -> bool,
    pub reward: Reward,
}

pub const ACHIEVEMENTS: [AchievementDef; 18] = [
    AchievementDef {
        id: AchievementId::FirstBlood,
        name: "First Blood",
        category: Category::Combat,
        condition: |p| p.total_kills >= 1,
        reward: Reward::exp(1.05),
    },
    AchievementDef {
        id: AchievementId::Kill100,
        name: "Slayer",
        category: Category::Combat,
        condition: |p| p.total_kills >= 100,
        reward: Reward::damage(1.1),
    },
    AchievementDef {
        id: AchievementId::Kill1000,
        name: "Exterminator",
        category: Category::Combat,
        condition: |p| p.total_kills >= 1000,
        reward: Reward::damage(1.2),
    },
    AchievementDef {
        id: AchievementId::BossHunter,
        name: "Boss Hunter",
        category: Category::Combat,
        condition: |p| p.total_boss_kills >= 10,
        reward: Reward::damage(1.15),
    },
    AchievementDef {
        id: AchievementId::Survivor5Min,
        name: "Survivor",
        category: Category::Survival,
        condition: |p| p.time_secs >= 300.0,
        reward: Reward::exp(1.1),
    },
    AchievementDef {
        id: AchievementId::Survivor10Min,
        name: "Die Hard",
        category: Category::Survival,
        condition: |p| p.time_secs >= 600.0,
        reward: Reward::exp(1.15),
    },
    AchievementDef {
        id: AchievementId::MaxLevel,
        name: "Ascended",
        category: Category::Survival,
        condition: |p| p.level >= 30,
        reward: Reward::damage(1.2),
    },
    AchievementDef {
        id: AchievementId::Untouchable,
        name: "Untouchable",
        category: Category::Special,
        condition: |p| !p.took_damage && p.won,
        reward: Reward::exp(1.3),
    },
    AchievementDef {
        id: AchievementId::Collector,
        name: "Collector",
        category: Category::Collection,
        condition: |p| p.total_orbs >= 1000,
        reward: Reward::pickup(20.0),
    },
    AchievementDef {
        id: AchievementId::WeaponMaster,
        name: "Weapon Master",
        category: Category::Collection,
        condition: |p| p.unique_weapons >= 6,
        reward: Reward::damage(1.1),
    },
    AchievementDef {
        id: AchievementId::FullBuild,
        name: "Full Build",
        category: Category::Collection,
        condition: |p| p.total_skill_levels >= 42,
        reward: Reward::damage(1.15),
    },
    AchievementDef {
        id: AchievementId::HighScore10k,
        name: "Point Taken",
        category: Category::Score,
        condition: |p| p.score >= 10_000,
        reward: Reward::exp(1.05),
    },
    AchievementDef {
        id: AchievementId::HighScore50k,
        name: "High Roller",
        category: Category::Score,
        condition: |p| p.score >= 50_000,
        reward: Reward::exp(1.1),
    },
    AchievementDef {
        id: AchievementId::HighScore100k,
        name: "Six Figures",
        category: Category::Score,
        condition: |p| p.score >= 100_000,
        reward: Reward::damage(1.15),
    },
    AchievementDef {
        id: AchievementId::Millionaire,
        name: "Millionaire",
        category: Category::Score,
        condition: |p| p.total_score >= 1_000_000,
        reward: Reward::exp(1.2),
    },
    AchievementDef {
        id: AchievementId::SpeedRunner,
        name: "Speed Runner",
        category: Category::Special,
        condition: |p| p.mode == GameMode::Campaign && p.won && p.time_secs <= 180.0,
        reward: Reward::speed(20.0),
    },
    AchievementDef {
        id: AchievementId::Pacifist,
        name: "Pacifist",
        category: Category::Special,
        condition: |p| p.mode == GameMode::Campaign && p.won && p.kills == 0,
        reward: Reward::hp(50),
    },
    AchievementDef {
        id: AchievementId::ComboMaster,
        name: "Combo Master",
        category: Category::Special,
        condition: |p| p.max_combo >= 10,
        reward: Reward::damage(1.1),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> AchievementProgress {
        AchievementProgress {
            total_kills: 0,
            total_boss_kills: 0,
            total_orbs: 0,
            total_score: 0,
            time_secs: 0.0,
            level: 1,
            score: 0,
            kills: 0,
            took_damage: false,
            won: false,
            mode: GameMode::Endless,
            max_combo: 0,
            unique_weapons: 0,
            total_skill_levels: 0,
        }
    }

    #[test]
    fn test_blank_progress_unlocks_nothing() {
        for def in &ACHIEVEMENTS {
            assert!(!(def.condition)(&blank()), "{:?}", def.id);
        }
    }

    #[test]
    fn test_first_blood_triggers_on_one_kill() {
        let mut p = blank();
        p.total_kills = 1;
        let def = ACHIEVEMENTS
            .iter()
            .find(|d| d.id == AchievementId::FirstBlood)
            .unwrap();
        assert!((def.condition)(&p));
    }

    #[test]
    fn test_campaign_specials_need_a_win() {
        let mut p = blank();
        p.mode = GameMode::Campaign;
        p.time_secs = 100.0;
        for id in [AchievementId::SpeedRunner, AchievementId::Pacifist] {
            let def = ACHIEVEMENTS.iter().find(|d| d.id == id).unwrap();
            assert!(!(def.condition)(&p));
            let mut won = p;
            won.won = true;
            assert!((def.condition)(&won), "{id:?}");
        }
    }
}
