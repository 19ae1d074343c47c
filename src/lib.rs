//! Survivors Core - wave scheduling and build progression for an arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (wave scheduler, skills, leveling, achievements)
//! - `tuning`: Data-driven game balance
//! - `save`: Persistence shapes handed to the host's save layer
//!
//! The crate owns no rendering, audio, input or storage. The host drives it
//! with one `Session::update` per frame and reacts to the returned events;
//! entity management sits behind the [`sim::EnemyWorld`] trait.

pub mod save;
pub mod sim;
pub mod tuning;

pub use save::{HighScores, SaveData};
pub use sim::state::{EnemyWorld, GameEvent, GameMode, PlayerStats, Viewport};
pub use sim::tick::Session;

/// Game configuration constants
pub mod consts {
    /// Batches per wave
    pub const BATCHES_PER_WAVE: u32 = 3;
    /// Base enemies per batch (grows with wave and batch index)
    pub const ENEMIES_PER_BATCH: u32 = 8;
    /// Delay between individual spawns within a batch (seconds)
    pub const INTER_SPAWN_DELAY: f32 = 0.15;
    /// Cooldown between batches of the same wave (seconds)
    pub const BATCH_COOLDOWN: f32 = 1.5;
    /// Cooldown between waves (seconds)
    pub const WAVE_COOLDOWN: f32 = 3.0;
    /// Regular spawning pauses this long after a campaign boss appears
    pub const BOSS_COOLDOWN_CAMPAIGN: f32 = 3.0;
    /// Longer breather after an endless-mode boss
    pub const BOSS_COOLDOWN_ENDLESS: f32 = 5.0;
    /// Next batch starts once this few enemies remain alive
    pub const SPAWN_THRESHOLD: usize = 5;

    /// Per-batch HP escalation step
    pub const BATCH_HP_STEP: f32 = 0.15;
    /// Per-batch damage escalation step
    pub const BATCH_DAMAGE_STEP: f32 = 0.10;
    /// Time-based difficulty gain per minute of play
    pub const TIME_DIFFICULTY_PER_MIN: f32 = 0.3;

    /// Endless-mode strength multiplier on ordinary waves
    pub const ENDLESS_BASE_MULT: f32 = 1.5;
    /// Endless-mode strength multiplier on elite waves
    pub const ELITE_MULT: f32 = 2.5;

    /// Enemy spawn margin outside the camera viewport (pixels)
    pub const ENEMY_SPAWN_MARGIN: f32 = 60.0;
    /// Boss spawn margin outside the camera viewport (pixels)
    pub const BOSS_SPAWN_MARGIN: f32 = 100.0;

    /// Hard population cap enforced by the entity manager
    pub const MAX_ENEMIES: usize = 250;
    /// Maximum simultaneously owned weapons
    pub const MAX_WEAPONS: usize = 6;

    /// Boss phase-two speed multiplier (applied once, below the HP threshold)
    pub const BOSS_PHASE2_SPEED_MULT: f32 = 1.4;
    /// Boss phase-two damage multiplier
    pub const BOSS_PHASE2_DAMAGE_MULT: f32 = 1.3;
}
