//! Deterministic progression engine
//!
//! All gameplay decisions live here. This module must be pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, clocks, or platform dependencies
//!
//! The embedding owns entities and physics; it reaches in through
//! [`EnemyWorld`] and reacts to the [`GameEvent`] lists each call returns.

pub mod achievements;
pub mod leveling;
pub mod skills;
pub mod state;
pub mod tick;
pub mod waves;

pub use achievements::{AchievementTracker, LifetimeStats, RewardBundle, SessionStats};
pub use leveling::{orb_split, ExperienceTracker, OrbPlan};
pub use skills::{SkillEngine, SkillId, UpgradeChoice, WeaponInstance, CHOICES_PER_LEVEL};
pub use state::{
    BossSpawnRequest, EnemyWorld, EntityHandle, GameEvent, GameMode, PlayerStats, SpawnRequest,
    Viewport,
};
pub use tick::Session;
pub use waves::{
    batch_damage_multiplier, batch_hp_multiplier, batch_quota, edge_spawn_pos, time_multiplier,
    WaveScheduler,
};
