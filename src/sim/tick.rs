//! Session facade tying the subsystems together
//!
//! A [`Session`] owns the scheduler, skill engine, experience tracker, and
//! achievement tracker for one run. The embedding calls [`Session::update`]
//! once per fixed timestep and feeds gameplay facts back in (kills, orbs,
//! damage); everything the engine decides comes back out as ordered
//! [`GameEvent`] lists.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::achievements::{AchievementTracker, RewardBundle};
use super::leveling::ExperienceTracker;
use super::skills::{SkillEngine, UpgradeChoice};
use super::state::{EnemyWorld, GameEvent, GameMode, PlayerStats};
use super::waves::WaveScheduler;
use crate::save::SaveData;
use crate::tuning::LevelDefinition;

/// One full run, campaign or endless
pub struct Session {
    mode: GameMode,
    scheduler: WaveScheduler,
    skills: SkillEngine,
    leveling: ExperienceTracker,
    achievements: AchievementTracker,
    /// Queued level-up choice sets; gameplay holds while any are pending
    pending: VecDeque<Vec<UpgradeChoice>>,
    elapsed: f32,
    score: u64,
    choice_rng: Pcg32,
}

impl Session {
    pub fn campaign(level: &'static LevelDefinition, seed: u64, save: &SaveData) -> Self {
        Self::new(GameMode::Campaign, WaveScheduler::campaign(level, seed), seed, save)
    }

    pub fn endless(seed: u64, save: &SaveData) -> Self {
        Self::new(GameMode::Endless, WaveScheduler::endless(seed), seed, save)
    }

    fn new(mode: GameMode, scheduler: WaveScheduler, seed: u64, save: &SaveData) -> Self {
        Self {
            mode,
            scheduler,
            skills: SkillEngine::new(),
            leveling: ExperienceTracker::default(),
            achievements: AchievementTracker::new(
                mode,
                save.lifetime,
                save.unlocked.clone(),
            ),
            pending: VecDeque::new(),
            elapsed: 0.0,
            score: 0,
            // Distinct stream from the scheduler's so choice rolls never
            // perturb spawn positions
            choice_rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.leveling.level()
    }

    pub fn wave(&self) -> u32 {
        self.scheduler.wave()
    }

    pub fn skills(&self) -> &SkillEngine {
        &self.skills
    }

    /// Permanent achievement bonuses active this session
    pub fn rewards(&self) -> RewardBundle {
        self.achievements.rewards()
    }

    /// The choice set the player must answer before time moves again
    pub fn pending_choices(&self) -> Option<&[UpgradeChoice]> {
        self.pending.front().map(|c| c.as_slice())
    }

    /// Advances one fixed timestep. A pending level-up holds the whole
    /// session: no time, no spawns, no cooldowns.
    pub fn update(
        &mut self,
        dt: f32,
        player: &PlayerStats,
        world: &mut dyn EnemyWorld,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.pending.is_empty() {
            return events;
        }
        self.elapsed += dt;
        self.achievements.tick_time(dt, &mut events);
        self.scheduler.update(dt, self.elapsed, world, &mut events);
        self.skills.update(dt, player, &mut events);
        events
    }

    /// Banks collected orb experience, scaled by achievement and passive
    /// experience multipliers. One large pickup can queue several level-ups;
    /// each gets its own choice set in order.
    pub fn collect_experience(&mut self, amount: u32, player: &PlayerStats) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.achievements.record_orb(&mut events);
        let scaled = (amount as f32
            * self.achievements.rewards().exp_mult
            * player.exp_multiplier)
            .round() as u32;
        let start_level = self.leveling.level();
        let gained = self.leveling.gain(scaled);
        for step in 1..=gained {
            let choices = self.skills.generate_choices(&mut self.choice_rng);
            events.push(GameEvent::LevelUp {
                level: start_level + step,
                choices: choices.clone(),
            });
            self.pending.push_back(choices);
        }
        if gained > 0 {
            self.achievements.set_level(self.leveling.level(), &mut events);
        }
        events
    }

    /// Answers the oldest pending level-up
    pub fn apply_choice(&mut self, choice: UpgradeChoice, player: &mut PlayerStats) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.pending.pop_front().is_none() {
            return events;
        }
        self.skills.apply_choice(choice, player, &mut events);
        self.achievements.set_loadout(
            self.skills.unique_weapons(),
            self.skills.total_skill_levels(),
            &mut events,
        );
        events
    }

    /// Records a confirmed kill: score, combo, and on-kill healing.
    pub fn record_kill(
        &mut self,
        is_boss: bool,
        score_value: u64,
        player: &mut PlayerStats,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.score += score_value;
        self.achievements.record_kill(is_boss, &mut events);
        self.achievements.set_score(self.score, &mut events);
        if player.heal_on_kill > 0 {
            player.heal(player.heal_on_kill);
        }
        events
    }

    pub fn record_player_damage(&mut self) {
        self.achievements.record_damage_taken();
    }

    pub fn reset_combo(&mut self) {
        self.achievements.reset_combo();
    }

    /// Ends the run: final achievement check, lifetime fold, leaderboard
    /// entry. `timestamp` is Unix milliseconds from the embedding's clock.
    pub fn finish(&mut self, won: bool, timestamp: f64, save: &mut SaveData) -> Vec<GameEvent> {
        let mut events = Vec::new();
        save.lifetime = self.achievements.end_session(won, &mut events);
        save.unlocked = self.achievements.unlocked().clone();
        save.high_scores.add_score(self.score, self.scheduler.wave(), timestamp);
        events
    }
}
