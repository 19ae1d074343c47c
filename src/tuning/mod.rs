//! Data-driven game balance
//!
//! Static tables the simulation reads: enemy and boss archetypes, campaign
//! level definitions, the endless-mode configuration, the experience curve,
//! skill definitions and achievement definitions. Tables are plain consts so
//! the balance can be reviewed (and diffed) in one place; nothing in here is
//! ever mutated at runtime.

pub mod achievements;
pub mod enemies;
pub mod levels;
pub mod skills;

pub use achievements::{
    AchievementDef, AchievementId, AchievementProgress, Category, Reward, ACHIEVEMENTS,
};
pub use enemies::{
    ArchetypeCatalog, BossArchetype, BossKind, EnemyArchetype, EnemyKind, SpecialBehavior, BOSSES,
    ENEMIES,
};
pub use levels::{
    EndlessConfig, ExperienceCurve, LevelDefinition, StarConditions, WavePacing, ENDLESS,
    EXP_CURVE, LEVELS,
};
pub use skills::{
    passive, weapon, Evolution, EvolvedForm, PassiveDefinition, PassiveEffect, PassiveKind,
    WeaponBehavior, WeaponDefinition, WeaponKind, WeaponStats, MAX_SKILL_LEVEL, PASSIVES, WEAPONS,
};
