//! Wave scheduling and difficulty scaling
//!
//! The scheduler is a self-driving state machine: it spawns a batch, waits
//! for the field to thin out, cools down, spawns the next. Waves are groups
//! of [`BATCHES_PER_WAVE`](crate::consts::BATCHES_PER_WAVE) batches with
//! growing quotas and stat multipliers. Bosses preempt normal spawning with
//! an alert countdown.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::state::{BossSpawnRequest, EnemyWorld, GameEvent, SpawnRequest, Viewport};
use crate::consts::*;
use crate::tuning::{ArchetypeCatalog, EndlessConfig, LevelDefinition, ENDLESS};

/// Enemies a batch is entitled to spawn
pub fn batch_quota(wave: u32, batch: u32) -> u32 {
    ENEMIES_PER_BATCH + wave / 2 + 2 * batch
}

/// HP scaling from wave/batch progression alone
pub fn batch_hp_multiplier(wave: u32, batch: u32) -> f32 {
    1.0 + (wave * 3 + batch) as f32 * BATCH_HP_STEP
}

/// Damage scaling from wave/batch progression alone
pub fn batch_damage_multiplier(wave: u32, batch: u32) -> f32 {
    1.0 + (wave * 3 + batch) as f32 * BATCH_DAMAGE_STEP
}

/// Slow extra ramp from raw session time
pub fn time_multiplier(elapsed: f32) -> f32 {
    1.0 + elapsed / 60.0 * TIME_DIFFICULTY_PER_MIN
}

/// Random position just outside one edge of the viewport
pub fn edge_spawn_pos(viewport: Viewport, margin: f32, rng: &mut Pcg32) -> Vec2 {
    let t = rng.random_range(0.0..1.0);
    match rng.random_range(0..4u8) {
        0 => Vec2::new(viewport.x + viewport.width * t, viewport.y - margin),
        1 => Vec2::new(
            viewport.x + viewport.width * t,
            viewport.y + viewport.height + margin,
        ),
        2 => Vec2::new(viewport.x - margin, viewport.y + viewport.height * t),
        _ => Vec2::new(
            viewport.x + viewport.width + margin,
            viewport.y + viewport.height * t,
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// Feeding the current batch to the world, one enemy per timer expiry
    Spawning,
    /// Batch quota exhausted, waiting for the field to thin out
    AwaitingClear,
    /// Rest between batches or waves
    Cooldown { remaining: f32 },
}

#[derive(Debug, Clone, Copy)]
enum Source {
    Campaign(&'static LevelDefinition),
    Endless(&'static EndlessConfig),
}

/// Drives enemy and boss spawning for one session
pub struct WaveScheduler {
    source: Source,
    catalog: ArchetypeCatalog,
    rng: Pcg32,
    phase: Phase,
    wave: u32,
    batch: u32,
    spawned_in_batch: u32,
    spawn_timer: f32,
    /// Regular spawning stays suppressed while this is positive
    boss_suppress: f32,
    /// Campaign: the single boss fired. Endless: this wave's boss fired.
    boss_handled: bool,
}

impl WaveScheduler {
    pub fn campaign(level: &'static LevelDefinition, seed: u64) -> Self {
        Self::with_catalog(Source::Campaign(level), seed, ArchetypeCatalog::default())
    }

    pub fn endless(seed: u64) -> Self {
        Self::with_catalog(Source::Endless(&ENDLESS), seed, ArchetypeCatalog::default())
    }

    pub fn campaign_with_catalog(
        level: &'static LevelDefinition,
        seed: u64,
        catalog: ArchetypeCatalog,
    ) -> Self {
        Self::with_catalog(Source::Campaign(level), seed, catalog)
    }

    pub fn endless_with_catalog(seed: u64, catalog: ArchetypeCatalog) -> Self {
        Self::with_catalog(Source::Endless(&ENDLESS), seed, catalog)
    }

    fn with_catalog(source: Source, seed: u64, catalog: ArchetypeCatalog) -> Self {
        Self {
            source,
            catalog,
            rng: Pcg32::seed_from_u64(seed),
            // Zero-length cooldown so the first update opens wave 0
            phase: Phase::Cooldown { remaining: 0.0 },
            wave: 0,
            batch: 0,
            spawned_in_batch: 0,
            spawn_timer: 0.0,
            boss_suppress: 0.0,
            boss_handled: false,
        }
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn batch(&self) -> u32 {
        self.batch
    }

    /// Advances the scheduler by one tick. A due boss spawns at once, and
    /// normal spawning stays suppressed for a fixed cooldown afterwards.
    pub fn update(
        &mut self,
        dt: f32,
        elapsed: f32,
        world: &mut dyn EnemyWorld,
        events: &mut Vec<GameEvent>,
    ) {
        if self.tick_boss(dt, elapsed, world, events) {
            return;
        }

        match self.phase {
            Phase::Cooldown { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = Phase::Cooldown { remaining };
                } else {
                    if self.batch == 0 {
                        events.push(GameEvent::WaveStarted { wave: self.wave });
                    }
                    self.spawned_in_batch = 0;
                    self.spawn_timer = 0.0;
                    self.phase = Phase::Spawning;
                }
            }
            Phase::Spawning => {
                self.spawn_timer -= dt;
                if self.spawn_timer <= 0.0 {
                    self.try_spawn(elapsed, world);
                    self.spawn_timer = INTER_SPAWN_DELAY;
                }
                if self.spawned_in_batch >= batch_quota(self.wave, self.batch) {
                    self.phase = Phase::AwaitingClear;
                }
            }
            Phase::AwaitingClear => {
                let alive = world.alive_enemies();
                let last_batch = self.batch + 1 >= BATCHES_PER_WAVE;
                if last_batch {
                    // A wave only completes on a fully cleared field
                    if alive == 0 {
                        events.push(GameEvent::WaveCompleted { wave: self.wave });
                        self.wave += 1;
                        self.batch = 0;
                        if matches!(self.source, Source::Endless(_)) {
                            self.boss_handled = false;
                        }
                        self.phase = Phase::Cooldown { remaining: WAVE_COOLDOWN };
                    }
                } else if alive <= SPAWN_THRESHOLD {
                    self.batch += 1;
                    self.phase = Phase::Cooldown { remaining: BATCH_COOLDOWN };
                }
            }
        }
    }

    /// Returns true when a boss consumed this tick.
    fn tick_boss(
        &mut self,
        dt: f32,
        elapsed: f32,
        world: &mut dyn EnemyWorld,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.boss_suppress > 0.0 {
            self.boss_suppress -= dt;
            return true;
        }

        let due = match self.source {
            Source::Campaign(level) => {
                (!self.boss_handled && elapsed >= level.boss_time as f32).then_some(level.boss)
            }
            Source::Endless(config) => {
                let boss_wave = self.wave > 0 && self.wave % config.boss_every == 0;
                if boss_wave && !self.boss_handled {
                    let index = self.rng.random_range(0..config.boss_pool.len());
                    Some(config.boss_pool[index])
                } else {
                    None
                }
            }
        };
        let Some(boss) = due else {
            return false;
        };

        self.boss_handled = true;
        if self.catalog.boss(boss).is_none() {
            log::warn!("boss archetype {boss:?} missing from catalog, skipping spawn");
            return false;
        }
        events.push(GameEvent::BossAlert { boss });
        let pos = edge_spawn_pos(world.viewport(), BOSS_SPAWN_MARGIN, &mut self.rng);
        world.spawn_boss(BossSpawnRequest { archetype: boss, pos });
        self.boss_suppress = match self.source {
            Source::Campaign(_) => BOSS_COOLDOWN_CAMPAIGN,
            Source::Endless(_) => BOSS_COOLDOWN_ENDLESS,
        };
        true
    }

    /// Resolves one spawn attempt. A world refusal (hard cap) or an unknown
    /// archetype does not count against the quota.
    fn try_spawn(&mut self, elapsed: f32, world: &mut dyn EnemyWorld) {
        let (kind, source_mult) = match self.source {
            Source::Campaign(level) => {
                let index = self.rng.random_range(0..level.enemies.len());
                (level.enemies[index], 1.0)
            }
            Source::Endless(config) => {
                let unlocked = config.unlocked_count(self.wave);
                let index = self.rng.random_range(0..unlocked);
                let elite = self.wave > 0 && self.wave % config.elite_every == 0;
                let mult = if elite { ELITE_MULT } else { ENDLESS_BASE_MULT };
                (config.enemy_pool[index], mult)
            }
        };

        if self.catalog.enemy(kind).is_none() {
            log::warn!("enemy archetype {kind:?} missing from catalog, skipping spawn");
            return;
        }

        let time_mult = time_multiplier(elapsed);
        let request = SpawnRequest {
            archetype: kind,
            pos: edge_spawn_pos(world.viewport(), ENEMY_SPAWN_MARGIN, &mut self.rng),
            hp_mult: batch_hp_multiplier(self.wave, self.batch) * time_mult * source_mult,
            damage_mult: batch_damage_multiplier(self.wave, self.batch) * time_mult * source_mult,
        };
        if world.spawn_enemy(request).is_some() {
            self.spawned_in_batch += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EntityHandle;
    use crate::tuning::{EnemyKind, LEVELS};
    use proptest::prelude::*;

    /// Minimal world that records spawns and lets tests steer the alive
    /// count and cap.
    struct TestWorld {
        alive: usize,
        cap: usize,
        spawned: Vec<SpawnRequest>,
        bosses: Vec<BossSpawnRequest>,
        next_handle: u32,
    }

    impl TestWorld {
        fn new() -> Self {
            Self {
                alive: 0,
                cap: MAX_ENEMIES,
                spawned: Vec::new(),
                bosses: Vec::new(),
                next_handle: 0,
            }
        }
    }

    impl EnemyWorld for TestWorld {
        fn alive_enemies(&self) -> usize {
            self.alive
        }

        fn viewport(&self) -> Viewport {
            Viewport::new(0.0, 0.0, 800.0, 600.0)
        }

        fn spawn_enemy(&mut self, request: SpawnRequest) -> Option<EntityHandle> {
            if self.alive >= self.cap {
                return None;
            }
            self.alive += 1;
            self.spawned.push(request);
            self.next_handle += 1;
            Some(EntityHandle(self.next_handle))
        }

        fn spawn_boss(&mut self, request: BossSpawnRequest) -> EntityHandle {
            self.bosses.push(request);
            self.next_handle += 1;
            EntityHandle(self.next_handle)
        }
    }

    const DT: f32 = 1.0 / 60.0;

    fn run(scheduler: &mut WaveScheduler, world: &mut TestWorld, ticks: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut elapsed = 0.0;
        for _ in 0..ticks {
            elapsed += DT;
            scheduler.update(DT, elapsed, world, &mut events);
        }
        events
    }

    #[test]
    fn test_batch_quota_formula() {
        assert_eq!(batch_quota(0, 0), 8);
        assert_eq!(batch_quota(0, 2), 12);
        assert_eq!(batch_quota(4, 1), 12);
        assert_eq!(batch_quota(10, 2), 17);
    }

    #[test]
    fn test_batch_multipliers() {
        assert!((batch_hp_multiplier(0, 0) - 1.0).abs() < 1e-6);
        // Wave 5 batch 0: 1 + 15 * 0.15
        assert!((batch_hp_multiplier(5, 0) - 3.25).abs() < 1e-6);
        assert!((batch_damage_multiplier(5, 0) - 2.5).abs() < 1e-6);
        // One minute in: +30%
        assert!((time_multiplier(60.0) - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_first_batch_spawns_full_quota() {
        let mut scheduler = WaveScheduler::endless(7);
        let mut world = TestWorld::new();
        let events = run(&mut scheduler, &mut world, 600);
        assert!(events.contains(&GameEvent::WaveStarted { wave: 0 }));
        assert_eq!(world.spawned.len(), 8);
        // Quota filled, now waiting for the field to thin out
        let more = run(&mut scheduler, &mut world, 600);
        assert!(more.is_empty());
        assert_eq!(world.spawned.len(), 8);
    }

    #[test]
    fn test_cap_refusal_does_not_consume_quota() {
        let mut scheduler = WaveScheduler::endless(7);
        let mut world = TestWorld::new();
        world.cap = 3;
        run(&mut scheduler, &mut world, 600);
        assert_eq!(world.spawned.len(), 3);
        // Freeing room lets the batch finish its full quota
        world.cap = MAX_ENEMIES;
        run(&mut scheduler, &mut world, 600);
        assert_eq!(world.spawned.len(), 8);
    }

    #[test]
    fn test_wave_advances_after_clear() {
        let mut scheduler = WaveScheduler::endless(7);
        let mut world = TestWorld::new();
        let mut events = Vec::new();
        let mut elapsed = 0.0;
        let mut ticks = 0;
        while !events.contains(&GameEvent::WaveCompleted { wave: 0 }) {
            elapsed += DT;
            scheduler.update(DT, elapsed, &mut world, &mut events);
            // Kill everything as it appears
            world.alive = 0;
            ticks += 1;
            assert!(ticks < 100_000, "wave never completed");
        }
        let spawned: u32 = (0..3).map(|b| batch_quota(0, b)).sum();
        assert_eq!(world.spawned.len() as u32, spawned);
        let more = run(&mut scheduler, &mut world, 600);
        assert!(more.contains(&GameEvent::WaveStarted { wave: 1 }));
    }

    #[test]
    fn test_last_batch_requires_empty_field() {
        let mut scheduler = WaveScheduler::endless(7);
        let mut world = TestWorld::new();
        let mut events = Vec::new();
        let mut elapsed = 0.0;
        for _ in 0..100_000 {
            elapsed += DT;
            scheduler.update(DT, elapsed, &mut world, &mut events);
            // Leave a straggler alive forever
            world.alive = world.alive.min(1);
        }
        assert!(!events.iter().any(|e| matches!(e, GameEvent::WaveCompleted { .. })));
    }

    #[test]
    fn test_boss_spawns_on_its_due_tick() {
        let level = &LEVELS[0];
        let mut scheduler = WaveScheduler::campaign(level, 7);
        let mut world = TestWorld::new();
        let mut events = Vec::new();
        // Single tick past boss_time: alert and spawn land together
        scheduler.update(DT, level.boss_time as f32 + 0.1, &mut world, &mut events);
        assert_eq!(events, vec![GameEvent::BossAlert { boss: level.boss }]);
        assert_eq!(world.bosses.len(), 1);
        assert_eq!(world.bosses[0].archetype, level.boss);
    }

    #[test]
    fn test_boss_suppresses_regular_spawns_then_resumes() {
        let level = &LEVELS[0];
        let mut scheduler = WaveScheduler::campaign(level, 7);
        let mut world = TestWorld::new();
        let mut events = Vec::new();
        scheduler.update(DT, level.boss_time as f32 + 0.1, &mut world, &mut events);
        let before = world.spawned.len();
        // Most of the post-spawn cooldown passes with no regular spawns
        for _ in 0..150 {
            scheduler.update(DT, level.boss_time as f32 + 1.0, &mut world, &mut events);
        }
        assert_eq!(world.spawned.len(), before);
        // Spawning resumes once the cooldown runs out; the boss fired once
        for _ in 0..600 {
            scheduler.update(DT, level.boss_time as f32 + 10.0, &mut world, &mut events);
        }
        assert!(world.spawned.len() > before);
        assert_eq!(world.bosses.len(), 1);
    }

    #[test]
    fn test_missing_boss_archetype_is_skipped_once() {
        let level = &LEVELS[0];
        let catalog = ArchetypeCatalog {
            bosses: &[],
            ..ArchetypeCatalog::default()
        };
        let mut scheduler = WaveScheduler::campaign_with_catalog(level, 7, catalog);
        let mut world = TestWorld::new();
        let mut events = Vec::new();
        for _ in 0..600 {
            scheduler.update(DT, level.boss_time as f32 + 1.0, &mut world, &mut events);
        }
        assert!(world.bosses.is_empty());
        assert!(!events.iter().any(|e| matches!(e, GameEvent::BossAlert { .. })));
    }

    #[test]
    fn test_campaign_spawns_only_level_enemies() {
        let level = &LEVELS[0];
        let mut scheduler = WaveScheduler::campaign(level, 7);
        let mut world = TestWorld::new();
        run(&mut scheduler, &mut world, 600);
        assert!(!world.spawned.is_empty());
        for request in &world.spawned {
            assert!(level.enemies.contains(&request.archetype));
        }
    }

    #[test]
    fn test_endless_wave_zero_uses_two_archetypes() {
        let mut scheduler = WaveScheduler::endless(7);
        let mut world = TestWorld::new();
        run(&mut scheduler, &mut world, 600);
        for request in &world.spawned {
            assert!(matches!(
                request.archetype,
                EnemyKind::Slime | EnemyKind::Mushroom
            ));
        }
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = WaveScheduler::endless(42);
        let mut b = WaveScheduler::endless(42);
        let mut world_a = TestWorld::new();
        let mut world_b = TestWorld::new();
        run(&mut a, &mut world_a, 600);
        run(&mut b, &mut world_b, 600);
        assert_eq!(world_a.spawned, world_b.spawned);
    }

    proptest! {
        #[test]
        fn prop_quota_monotone_in_wave_and_batch(wave in 0u32..500, batch in 0u32..3) {
            prop_assert!(batch_quota(wave + 1, batch) >= batch_quota(wave, batch));
            prop_assert!(batch_quota(wave, batch + 1) > batch_quota(wave, batch));
        }

        #[test]
        fn prop_spawn_pos_outside_viewport(seed in 0u64..1000) {
            let viewport = Viewport::new(0.0, 0.0, 800.0, 600.0);
            let mut rng = Pcg32::seed_from_u64(seed);
            let pos = edge_spawn_pos(viewport, ENEMY_SPAWN_MARGIN, &mut rng);
            let inside = pos.x > viewport.x
                && pos.x < viewport.x + viewport.width
                && pos.y > viewport.y
                && pos.y < viewport.y + viewport.height;
            prop_assert!(!inside);
        }
    }
}
