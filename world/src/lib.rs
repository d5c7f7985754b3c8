#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Hero Defence.
//!
//! The world is the single owner of mutable game state. Adapters drive it
//! exclusively through [`apply`] and observe it through the [`query`] module
//! and the events pushed into the caller's buffer.

mod heroes;
mod scheduler;

use std::time::Duration;

use hero_defence_catalog::Catalog;
use hero_defence_core::{
    Ability, Affliction, AttackVisual, CellCoord, CellPoint, Command, DamageText, Economy, Enemy,
    EnemyId, EnemyTypeId, Event, HeroClass, HeroId, HitOutcome, PlacementError, RandomSource,
    SeededRandom, SkillSlot, StatusKind, WaveStartError, DEFAULT_GRID_SIZE,
};
use hero_defence_system_combat::{CombatContext, CombatResolver};
use hero_defence_system_movement::Movement;
use hero_defence_system_progression::{self as progression, Progression};
use hero_defence_system_status_effects::StatusProcessor;
use hero_defence_system_waves::{self as waves, WaveState};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use heroes::HeroRoster;
use scheduler::{Firing, Phase, TickScheduler};

const DEFAULT_SEED: u64 = 0x5eed_1e55_d3fe_4ce0;
const DEFAULT_STARTING_GOLD: u32 = 150;
const DEFAULT_STARTING_LIVES: u32 = 20;
const DEFAULT_TICK_INTERVAL_MS: u64 = 50;

const DAMAGE_TEXT_DURATION: Duration = Duration::from_millis(1500);
const MISS_TEXT_DURATION: Duration = Duration::from_millis(1000);

const fn visual_duration(class: HeroClass) -> Duration {
    match class {
        HeroClass::Archer => Duration::from_millis(300),
        HeroClass::Warrior => Duration::from_millis(200),
        HeroClass::Mage => Duration::from_millis(400),
    }
}

/// Parameters fixed for the lifetime of a world.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed of the random source.
    pub seed: u64,
    /// Gold available at the start and after a reset.
    pub starting_gold: u32,
    /// Lives available at the start and after a reset.
    pub starting_lives: u32,
    /// Side length of the square battlefield.
    pub grid_size: u32,
    /// Period of the combat tick in milliseconds.
    pub combat_interval_ms: u64,
    /// Period of the field tick in milliseconds.
    pub field_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            starting_gold: DEFAULT_STARTING_GOLD,
            starting_lives: DEFAULT_STARTING_LIVES,
            grid_size: DEFAULT_GRID_SIZE,
            combat_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            field_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Default configuration using the provided seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Period of the combat tick.
    #[must_use]
    pub const fn combat_interval(&self) -> Duration {
        Duration::from_millis(self.combat_interval_ms)
    }

    /// Period of the field tick.
    #[must_use]
    pub const fn field_interval(&self) -> Duration {
        Duration::from_millis(self.field_interval_ms)
    }
}

/// Represents the authoritative Hero Defence world state.
#[derive(Debug)]
pub struct World {
    config: Config,
    catalog: Catalog,
    economy: Economy,
    heroes: HeroRoster,
    enemies: Vec<Enemy>,
    wave: WaveState,
    clock: Duration,
    playing: bool,
    game_speed: f32,
    game_over: bool,
    selected: Option<HeroId>,
    attack_visuals: Vec<AttackVisual>,
    damage_texts: Vec<DamageText>,
    rng: Box<dyn RandomSource>,
    next_enemy_id: u32,
    scheduler: TickScheduler,
    status: StatusProcessor,
    movement: Movement,
    combat: CombatResolver,
    progression: Progression,
    firings: Vec<Firing>,
    commands: Vec<Command>,
}

impl World {
    /// Creates a world using the built-in catalog.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_catalog(config, Catalog::standard())
    }

    /// Creates a world using the provided catalog and a seeded random source.
    #[must_use]
    pub fn with_catalog(config: Config, catalog: Catalog) -> Self {
        let rng = Box::new(SeededRandom::new(config.seed));
        Self::with_random(config, catalog, rng)
    }

    /// Creates a world drawing every roll from `rng`.
    #[must_use]
    pub fn with_random(config: Config, catalog: Catalog, rng: Box<dyn RandomSource>) -> Self {
        Self {
            config,
            catalog,
            economy: Economy::new(config.starting_gold, config.starting_lives),
            heroes: HeroRoster::new(),
            enemies: Vec::new(),
            wave: WaveState::new(),
            clock: Duration::ZERO,
            playing: false,
            game_speed: 1.0,
            game_over: false,
            selected: None,
            attack_visuals: Vec::new(),
            damage_texts: Vec::new(),
            rng,
            next_enemy_id: 1,
            scheduler: TickScheduler::new(config.field_interval(), config.combat_interval()),
            status: StatusProcessor::new(),
            movement: Movement::new(),
            combat: CombatResolver::new(),
            progression: Progression::new(),
            firings: Vec::new(),
            commands: Vec::new(),
        }
    }

    fn reset(&mut self) {
        self.economy = Economy::new(self.config.starting_gold, self.config.starting_lives);
        self.heroes = HeroRoster::new();
        self.enemies.clear();
        self.wave = WaveState::new();
        self.clock = Duration::ZERO;
        self.playing = false;
        self.game_speed = 1.0;
        self.game_over = false;
        self.selected = None;
        self.attack_visuals.clear();
        self.damage_texts.clear();
        self.rng.reseed(self.config.seed);
        self.next_enemy_id = 1;
        self.scheduler =
            TickScheduler::new(self.config.field_interval(), self.config.combat_interval());
    }

    fn place_hero(&mut self, class: HeroClass, cell: CellCoord, out_events: &mut Vec<Event>) {
        let validated = progression::validate_placement(
            &self.catalog,
            self.heroes.as_slice(),
            &self.economy,
            class,
            cell,
            self.config.grid_size,
        );
        let cost = match validated {
            Ok(cost) if self.economy.try_spend(cost) => cost,
            Ok(_) => {
                out_events.push(Event::HeroPlacementRejected {
                    class,
                    cell,
                    reason: PlacementError::InsufficientGold,
                });
                return;
            }
            Err(reason) => {
                out_events.push(Event::HeroPlacementRejected {
                    class,
                    cell,
                    reason,
                });
                return;
            }
        };

        let stats = self.catalog.hero(class).stats;
        let hero = self.heroes.insert(class, cell, stats);
        debug!(hero = hero.get(), class = class.key(), cost, "hero placed");
        out_events.push(Event::HeroPlaced {
            hero,
            class,
            cell,
            cost,
        });
    }

    fn sell_hero(&mut self, hero: HeroId, out_events: &mut Vec<Event>) {
        let Some(sold) = self.heroes.remove(hero) else {
            out_events.push(Event::UnknownHero { hero });
            return;
        };
        let refund = progression::sell_value(&sold, &self.catalog);
        self.economy.earn(refund);
        debug!(hero = hero.get(), refund, "hero sold");
        out_events.push(Event::HeroSold { hero, refund });

        if self.selected == Some(hero) {
            self.selected = None;
            out_events.push(Event::HeroSelected { hero: None });
        }
    }

    fn upgrade_skill(&mut self, hero: HeroId, slot: SkillSlot, out_events: &mut Vec<Event>) {
        let Some(record) = self.heroes.get_mut(hero) else {
            out_events.push(Event::UnknownHero { hero });
            return;
        };
        match progression::upgrade_skill(record, &mut self.economy, &self.catalog, slot) {
            Ok(level) => out_events.push(Event::SkillUpgraded { hero, slot, level }),
            Err(reason) => out_events.push(Event::SkillUpgradeRejected { hero, slot, reason }),
        }
    }

    fn wave_start_blocker(&self) -> Option<WaveStartError> {
        if self.game_over {
            Some(WaveStartError::GameOver)
        } else if self.wave.in_progress() {
            Some(WaveStartError::WaveInProgress)
        } else if !self.enemies.is_empty() {
            Some(WaveStartError::EnemiesRemaining)
        } else {
            None
        }
    }

    fn start_wave(&mut self, out_events: &mut Vec<Event>) {
        let number = self.wave.number();
        let orders = waves::compose_wave(&self.catalog, number, self.rng.as_mut());
        let queued = orders.len();
        self.wave.start(orders, self.clock);
        out_events.push(Event::WaveStarted {
            wave: number,
            queued,
        });
        if !self.playing {
            self.playing = true;
            out_events.push(Event::PlayToggled { playing: true });
        }
    }

    fn toggle_play(&mut self, out_events: &mut Vec<Event>) {
        if self.game_over {
            return;
        }
        if self.playing {
            self.playing = false;
            out_events.push(Event::PlayToggled { playing: false });
            return;
        }
        if self.wave_start_blocker().is_none() {
            self.start_wave(out_events);
        } else {
            self.playing = true;
            out_events.push(Event::PlayToggled { playing: true });
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if !self.playing || self.game_over {
            return;
        }
        out_events.push(Event::TimeAdvanced { dt });

        let start = self.clock;
        let mut firings = std::mem::take(&mut self.firings);
        self.scheduler.advance(dt, &mut firings);
        for firing in &firings {
            if !self.playing || self.game_over {
                break;
            }
            self.clock = start.saturating_add(firing.offset);
            match firing.phase {
                Phase::Field => self.field_tick(out_events),
                Phase::Combat => self.combat_tick(out_events),
            }
        }
        self.firings = firings;

        if self.playing && !self.game_over {
            self.clock = start.saturating_add(dt);
        }
    }

    fn field_tick(&mut self, out_events: &mut Vec<Event>) {
        let mut queue = std::mem::take(&mut self.commands);
        let now = self.clock;
        self.status.handle(&self.enemies, now, &mut queue);
        self.apply_queued(&mut queue, out_events);
        self.enemies.retain(Enemy::is_alive);

        self.spawn_due_enemy(out_events);

        let elapsed = Duration::try_from_secs_f64(
            self.config.field_interval().as_secs_f64() * f64::from(self.game_speed),
        )
        .unwrap_or(Duration::ZERO);
        self.movement.handle(&self.enemies, elapsed, &mut queue);
        self.apply_queued(&mut queue, out_events);
        self.commands = queue;

        if self.economy.is_defeated() {
            self.end_game(out_events);
            return;
        }
        if let Some((wave, bonus)) = self.wave.complete_if_cleared(self.enemies.len()) {
            self.economy.earn(bonus);
            self.playing = false;
            out_events.push(Event::WaveCompleted { wave, bonus });
        }
    }

    fn combat_tick(&mut self, out_events: &mut Vec<Event>) {
        let mut queue = std::mem::take(&mut self.commands);
        let ctx = CombatContext {
            catalog: &self.catalog,
            grid_size: self.config.grid_size,
            now: self.clock,
        };
        let heroes = self.heroes.as_slice();
        let enemies = &self.enemies;
        let rng = self.rng.as_mut();
        self.combat.handle(&ctx, heroes, enemies, rng, &mut queue);
        self.apply_queued(&mut queue, out_events);
        self.enemies.retain(Enemy::is_alive);

        let heroes = self.heroes.as_slice();
        self.progression.handle(heroes, &mut queue);
        self.apply_queued(&mut queue, out_events);
        self.commands = queue;

        let now = self.clock;
        self.attack_visuals.retain(|visual| !visual.is_expired(now));
        self.damage_texts.retain(|text| !text.is_expired(now));
    }

    fn apply_queued(&mut self, queue: &mut Vec<Command>, out_events: &mut Vec<Event>) {
        for command in queue.drain(..) {
            apply(self, command, out_events);
        }
    }

    fn spawn_due_enemy(&mut self, out_events: &mut Vec<Event>) {
        let Some(order) = self.wave.tick(self.clock, self.game_speed) else {
            return;
        };
        let id = EnemyId::new(self.next_enemy_id);
        match waves::spawn_enemy(&self.catalog, &order, id) {
            Ok(enemy) => {
                self.next_enemy_id = self.next_enemy_id.saturating_add(1);
                if let Some(cell) = enemy.cell() {
                    out_events.push(Event::EnemySpawned {
                        enemy: id,
                        kind: enemy.kind.clone(),
                        cell,
                    });
                }
                self.enemies.push(enemy);
            }
            Err(reason) => {
                warn!(enemy = %order.enemy, %reason, "skipping queued spawn");
                out_events.push(Event::EnemySpawnSkipped {
                    kind: order.enemy,
                    reason,
                });
            }
        }
    }

    fn end_game(&mut self, out_events: &mut Vec<Event>) {
        self.game_over = true;
        self.playing = false;
        self.enemies.clear();
        self.attack_visuals.clear();
        self.damage_texts.clear();
        let wave = self.wave.number();
        info!(wave, "game over");
        out_events.push(Event::GameOver { wave });
    }

    /// Index of the enemy when it is still alive.
    fn living_enemy(&self, enemy: EnemyId) -> Option<usize> {
        self.enemies
            .iter()
            .position(|entry| entry.id == enemy && entry.is_alive())
    }

    fn step_enemy(&mut self, enemy: EnemyId, position: CellPoint, segment: usize) {
        if let Some(index) = self.living_enemy(enemy) {
            let walker = &mut self.enemies[index];
            walker.position = position;
            walker.segment = segment;
        }
    }

    fn escape_enemy(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let Some(index) = self.living_enemy(enemy) else {
            return;
        };
        let _ = self.enemies.remove(index);
        let lives_remaining = self.economy.lose_life();
        out_events.push(Event::EnemyEscaped {
            enemy,
            lives_remaining,
        });
    }

    fn trigger_cooldown(&mut self, hero: HeroId, ability: Ability) {
        let now = self.clock;
        if let Some(record) = self.heroes.get_mut(hero) {
            match ability {
                Ability::Attack => record.last_attack_at = Some(now),
                Ability::Blizzard => record.last_blizzard_at = Some(now),
            }
        }
    }

    fn strike_enemy(
        &mut self,
        hero: HeroId,
        enemy: EnemyId,
        damage: u32,
        critical: bool,
        out_events: &mut Vec<Event>,
    ) {
        let Some(index) = self.living_enemy(enemy) else {
            return;
        };
        let Some(attacker) = self.heroes.get_mut(hero) else {
            return;
        };
        let target = &mut self.enemies[index];
        let remaining = target.take_damage(damage);
        self.economy.earn(1);
        attacker.experience = attacker.experience.saturating_add(1);

        out_events.push(Event::AttackResolved {
            hero,
            enemy,
            outcome: HitOutcome::Hit { damage, critical },
        });
        self.attack_visuals.push(AttackVisual {
            hero,
            class: attacker.class,
            from: attacker.cell.to_point(),
            to: target.position,
            issued_at: self.clock,
            duration: visual_duration(attacker.class),
        });
        self.damage_texts.push(DamageText {
            enemy,
            amount: damage,
            position: target.position,
            critical,
            missed: false,
            issued_at: self.clock,
            duration: DAMAGE_TEXT_DURATION,
        });
        if remaining > 0 {
            return;
        }

        let kind = target.kind.clone();
        let (gold, experience) = kill_reward(&self.catalog, &kind, enemy);
        self.economy.earn(gold);
        attacker.experience = attacker.experience.saturating_add(experience);
        out_events.push(Event::EnemyDefeated {
            enemy,
            kind,
            by: Some(hero),
            gold,
            experience,
        });
    }

    fn miss_enemy(&mut self, hero: HeroId, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let Some(index) = self.living_enemy(enemy) else {
            return;
        };
        if self.heroes.get(hero).is_none() {
            return;
        }
        out_events.push(Event::AttackResolved {
            hero,
            enemy,
            outcome: HitOutcome::Miss,
        });
        self.damage_texts.push(DamageText {
            enemy,
            amount: 0,
            position: self.enemies[index].position,
            critical: false,
            missed: true,
            issued_at: self.clock,
            duration: MISS_TEXT_DURATION,
        });
    }

    fn afflict_enemy(
        &mut self,
        enemy: EnemyId,
        affliction: Affliction,
        out_events: &mut Vec<Event>,
    ) {
        let Some(index) = self.living_enemy(enemy) else {
            return;
        };
        self.enemies[index].effects.afflict(affliction, self.clock);
        out_events.push(Event::StatusApplied {
            enemy,
            kind: affliction.kind(),
        });
    }

    fn burn_enemy(
        &mut self,
        enemy: EnemyId,
        damage: u32,
        ticks_applied: u32,
        out_events: &mut Vec<Event>,
    ) {
        let Some(index) = self.living_enemy(enemy) else {
            return;
        };
        let target = &mut self.enemies[index];
        let Some(burning) = target.effects.burning.as_mut() else {
            return;
        };
        burning.ticks_applied = ticks_applied;
        let source = burning.source;
        let remaining = target.take_damage(damage);
        out_events.push(Event::BurnDamaged { enemy, damage });
        if remaining > 0 {
            return;
        }

        let kind = target.kind.clone();
        let (gold, experience) = kill_reward(&self.catalog, &kind, enemy);
        self.economy.earn(gold);
        let by = source
            .and_then(|source| self.heroes.get_mut(source))
            .map(|hero| {
                hero.experience = hero.experience.saturating_add(experience);
                hero.id
            });
        out_events.push(Event::EnemyDefeated {
            enemy,
            kind,
            by,
            gold,
            experience,
        });
    }

    fn expire_status(&mut self, enemy: EnemyId, kind: StatusKind, out_events: &mut Vec<Event>) {
        let Some(index) = self.living_enemy(enemy) else {
            return;
        };
        if self.enemies[index].effects.clear(kind) {
            out_events.push(Event::StatusExpired { enemy, kind });
        }
    }

    fn level_up_hero(&mut self, hero: HeroId, out_events: &mut Vec<Event>) {
        let Some(record) = self.heroes.get_mut(hero) else {
            return;
        };
        if progression::level_up(record) {
            debug!(hero = hero.get(), level = record.level, "hero leveled up");
            out_events.push(Event::HeroLeveledUp {
                hero,
                level: record.level,
            });
        }
    }
}

/// Gold and experience paid for killing an enemy of `kind`.
fn kill_reward(catalog: &Catalog, kind: &EnemyTypeId, enemy: EnemyId) -> (u32, u32) {
    match catalog.enemy(kind) {
        Ok(archetype) => (archetype.gold_reward, archetype.experience_reward()),
        Err(error) => {
            warn!(enemy = enemy.get(), %error, "defeated enemy has no archetype; no bonus");
            (0, 0)
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Every player command is either applied in full or rejected with an event
/// that names the reason; rejected commands leave the state untouched. The
/// commands queued by the systems during a tick are applied through the same
/// entry point and are ignored when they name a hero or enemy that is gone.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::PlaceHero { class, cell } => world.place_hero(class, cell, out_events),
        Command::SellHero { hero } => world.sell_hero(hero, out_events),
        Command::SelectHero { hero } => {
            if world.heroes.get(hero).is_none() {
                out_events.push(Event::UnknownHero { hero });
                return;
            }
            world.selected = if world.selected == Some(hero) {
                None
            } else {
                Some(hero)
            };
            out_events.push(Event::HeroSelected {
                hero: world.selected,
            });
        }
        Command::ToggleTargetingMode { hero } => match world.heroes.get_mut(hero) {
            Some(record) => {
                record.targeting = record.targeting.toggled();
                out_events.push(Event::TargetingModeChanged {
                    hero,
                    mode: record.targeting,
                });
            }
            None => out_events.push(Event::UnknownHero { hero }),
        },
        Command::UpgradeSkill { hero, slot } => world.upgrade_skill(hero, slot, out_events),
        Command::StartNextWave => match world.wave_start_blocker() {
            Some(reason) => out_events.push(Event::WaveStartRejected { reason }),
            None => world.start_wave(out_events),
        },
        Command::TogglePlay => world.toggle_play(out_events),
        Command::SetGameSpeed { multiplier } => {
            if !multiplier.is_finite() || multiplier <= 0.0 {
                debug!(multiplier, "ignoring invalid game speed");
                return;
            }
            world.game_speed = multiplier;
            out_events.push(Event::GameSpeedChanged { multiplier });
        }
        Command::Reset => {
            world.reset();
            out_events.push(Event::SimulationReset);
        }
        Command::StepEnemy {
            enemy,
            position,
            segment,
        } => world.step_enemy(enemy, position, segment),
        Command::EscapeEnemy { enemy } => world.escape_enemy(enemy, out_events),
        Command::TriggerCooldown { hero, ability } => world.trigger_cooldown(hero, ability),
        Command::StrikeEnemy {
            hero,
            enemy,
            damage,
            critical,
        } => world.strike_enemy(hero, enemy, damage, critical, out_events),
        Command::MissEnemy { hero, enemy } => world.miss_enemy(hero, enemy, out_events),
        Command::AfflictEnemy { enemy, affliction } => {
            world.afflict_enemy(enemy, affliction, out_events);
        }
        Command::BurnEnemy {
            enemy,
            damage,
            ticks_applied,
        } => world.burn_enemy(enemy, damage, ticks_applied, out_events),
        Command::ExpireStatus { enemy, kind } => world.expire_status(enemy, kind, out_events),
        Command::LevelUpHero { hero } => world.level_up_hero(hero, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::collections::BTreeSet;

    use super::World;
    use hero_defence_catalog::Catalog;
    use hero_defence_core::{
        AttackKind, CellCoord, Economy, Enemy, GameSnapshot, Hero, HeroClass, HeroId,
    };
    use hero_defence_system_combat::{effective_attack, effective_stats, EffectiveStats};
    use hero_defence_system_geometry as geometry;
    use hero_defence_system_progression as progression;

    /// Captures everything a renderer needs for one frame.
    #[must_use]
    pub fn snapshot(world: &World) -> GameSnapshot {
        GameSnapshot {
            gold: world.economy.gold(),
            lives: world.economy.lives(),
            wave: world.wave.number(),
            playing: world.playing,
            game_speed: world.game_speed,
            game_over: world.game_over,
            clock: world.clock,
            selected_hero: world.selected,
            heroes: world.heroes.as_slice().to_vec(),
            enemies: world.enemies.clone(),
            attack_visuals: world.attack_visuals.clone(),
            damage_texts: world.damage_texts.clone(),
            wave_in_progress: world.wave.in_progress(),
            remaining_enemies: world.wave.remaining(world.enemies.len()),
        }
    }

    /// Gold and lives of the player.
    #[must_use]
    pub fn economy(world: &World) -> Economy {
        world.economy
    }

    /// Static tables the world runs on.
    #[must_use]
    pub fn catalog(world: &World) -> &Catalog {
        &world.catalog
    }

    /// Every placed hero ordered by identifier.
    #[must_use]
    pub fn heroes(world: &World) -> &[Hero] {
        world.heroes.as_slice()
    }

    /// Every enemy on the field in spawn order.
    #[must_use]
    pub fn enemies(world: &World) -> &[Enemy] {
        &world.enemies
    }

    /// Looks up a placed hero.
    #[must_use]
    pub fn hero(world: &World, hero: HeroId) -> Option<&Hero> {
        world.heroes.get(hero)
    }

    /// Statistics of a placed hero once its skills are applied.
    #[must_use]
    pub fn hero_stats(world: &World, hero: HeroId) -> Option<EffectiveStats> {
        world.heroes.get(hero).map(effective_stats)
    }

    /// Gold the player would receive for selling the hero.
    #[must_use]
    pub fn sell_value(world: &World, hero: HeroId) -> Option<u32> {
        world
            .heroes
            .get(hero)
            .map(|record| progression::sell_value(record, &world.catalog))
    }

    /// Cells a fresh hero of `class` placed on `cell` would cover.
    #[must_use]
    pub fn range_preview(world: &World, class: HeroClass, cell: CellCoord) -> BTreeSet<CellCoord> {
        let attack = world.catalog.hero(class).attack;
        geometry::valid_range_tiles(cell, &attack, world.config.grid_size)
    }

    /// Cells covered by a placed hero, including skill range bonuses.
    #[must_use]
    pub fn hero_range(world: &World, hero: HeroId) -> Option<BTreeSet<CellCoord>> {
        let record = world.heroes.get(hero)?;
        let attack = effective_attack(record, &world.catalog.hero(record.class).attack);
        Some(geometry::valid_range_tiles(
            record.cell,
            &attack,
            world.config.grid_size,
        ))
    }

    /// Cells a blast of a `class` hero centered on `center` would cover.
    ///
    /// Returns `None` for classes whose attack strikes single targets.
    #[must_use]
    pub fn area_preview(
        world: &World,
        class: HeroClass,
        center: CellCoord,
    ) -> Option<BTreeSet<CellCoord>> {
        let attack = world.catalog.hero(class).attack;
        let radius = match attack.kind {
            AttackKind::Area => attack.aoe_radius?,
            AttackKind::Single => return None,
        };
        Some(geometry::area_tiles(center, radius, world.config.grid_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(Config::with_seed(11))
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: Config = toml::from_str("seed = 9\nstarting_gold = 500").expect("config");
        assert_eq!(config.seed, 9);
        assert_eq!(config.starting_gold, 500);
        assert_eq!(config.starting_lives, 20);
        assert_eq!(config.grid_size, 11);
        assert_eq!(config.field_interval(), Duration::from_millis(50));
    }

    #[test]
    fn ticks_are_ignored_while_paused() {
        let mut world = world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(1),
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(world.clock, Duration::ZERO);
    }

    #[test]
    fn toggle_play_starts_the_first_wave() {
        let mut world = world();
        let mut events = Vec::new();
        apply(&mut world, Command::TogglePlay, &mut events);

        assert_eq!(
            events,
            vec![
                Event::WaveStarted { wave: 1, queued: 5 },
                Event::PlayToggled { playing: true },
            ]
        );
        assert!(world.playing);
        assert!(world.wave.in_progress());

        events.clear();
        apply(&mut world, Command::TogglePlay, &mut events);
        assert_eq!(events, vec![Event::PlayToggled { playing: false }]);
        assert!(world.wave.in_progress());
    }

    #[test]
    fn start_rejected_while_wave_runs() {
        let mut world = world();
        let mut events = Vec::new();
        apply(&mut world, Command::StartNextWave, &mut events);
        events.clear();
        apply(&mut world, Command::StartNextWave, &mut events);
        assert_eq!(
            events,
            vec![Event::WaveStartRejected {
                reason: WaveStartError::WaveInProgress,
            }]
        );
    }

    #[test]
    fn invalid_game_speed_is_ignored() {
        let mut world = world();
        let mut events = Vec::new();
        for multiplier in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            apply(&mut world, Command::SetGameSpeed { multiplier }, &mut events);
        }
        assert!(events.is_empty());
        apply(&mut world, Command::SetGameSpeed { multiplier: 2.0 }, &mut events);
        assert_eq!(events, vec![Event::GameSpeedChanged { multiplier: 2.0 }]);
        assert_eq!(world.game_speed, 2.0);
    }

    #[test]
    fn first_spawn_arrives_after_the_spawn_delay() {
        let mut world = world();
        let mut events = Vec::new();
        apply(&mut world, Command::StartNextWave, &mut events);

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(1_450),
            },
            &mut events,
        );
        assert!(world.enemies.is_empty());
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(50),
            },
            &mut events,
        );
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.wave.queued(), 4);
    }

    fn with_hero(class: HeroClass, cell: CellCoord) -> (World, HeroId) {
        let mut world = world();
        let mut events = Vec::new();
        apply(&mut world, Command::PlaceHero { class, cell }, &mut events);
        (world, HeroId::new(1))
    }

    fn add_enemy(world: &mut World, kind: &str, health: u32) -> EnemyId {
        let id = EnemyId::new(world.next_enemy_id);
        world.next_enemy_id += 1;
        let path = world.catalog.path(0).expect("standard path").clone();
        let enemy = Enemy::spawn(id, kind.into(), health, 0.6, 0, path).expect("path");
        world.enemies.push(enemy);
        id
    }

    #[test]
    fn lethal_strike_pays_hit_and_kill_rewards() {
        let (mut world, hero) = with_hero(HeroClass::Archer, CellCoord::new(0, 2));
        let enemy = add_enemy(&mut world, "goblin", 50);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::StrikeEnemy {
                hero,
                enemy,
                damage: 60,
                critical: false,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::AttackResolved {
                    hero,
                    enemy,
                    outcome: HitOutcome::Hit {
                        damage: 60,
                        critical: false,
                    },
                },
                Event::EnemyDefeated {
                    enemy,
                    kind: "goblin".into(),
                    by: Some(hero),
                    gold: 5,
                    experience: 5,
                },
            ]
        );
        assert_eq!(world.economy.gold(), 106);
        assert_eq!(world.heroes.get(hero).map(|record| record.experience), Some(6));
        assert_eq!(world.attack_visuals.len(), 1);
        assert_eq!(world.attack_visuals[0].duration, Duration::from_millis(300));
        assert_eq!(world.damage_texts[0].duration, DAMAGE_TEXT_DURATION);
    }

    #[test]
    fn kill_of_unknown_type_grants_only_the_hit_reward() {
        let (mut world, hero) = with_hero(HeroClass::Archer, CellCoord::new(0, 2));
        let enemy = add_enemy(&mut world, "ogre", 10);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::StrikeEnemy {
                hero,
                enemy,
                damage: 100,
                critical: false,
            },
            &mut events,
        );

        assert!(events.contains(&Event::EnemyDefeated {
            enemy,
            kind: "ogre".into(),
            by: Some(hero),
            gold: 0,
            experience: 0,
        }));
        assert_eq!(world.economy.gold(), 101);
        assert_eq!(world.heroes.get(hero).map(|record| record.experience), Some(1));
    }

    #[test]
    fn miss_shows_a_marker_and_pays_nothing() {
        let (mut world, hero) = with_hero(HeroClass::Warrior, CellCoord::new(0, 2));
        let enemy = add_enemy(&mut world, "goblin", 50);
        let mut events = Vec::new();
        apply(&mut world, Command::MissEnemy { hero, enemy }, &mut events);

        assert_eq!(
            events,
            vec![Event::AttackResolved {
                hero,
                enemy,
                outcome: HitOutcome::Miss,
            }]
        );
        assert_eq!(world.economy.gold(), 75);
        assert!(world.attack_visuals.is_empty());
        assert!(world.damage_texts[0].missed);
        assert_eq!(world.damage_texts[0].duration, MISS_TEXT_DURATION);
    }

    #[test]
    fn fatal_burn_credits_its_source_hero() {
        let (mut world, hero) = with_hero(HeroClass::Mage, CellCoord::new(0, 2));
        let enemy = add_enemy(&mut world, "goblin", 3);
        world.enemies[0].effects.afflict(
            Affliction::Burning {
                damage_per_second: 4,
                duration: Duration::from_secs(3),
                source: Some(hero),
            },
            Duration::ZERO,
        );
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::BurnEnemy {
                enemy,
                damage: 4,
                ticks_applied: 1,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::BurnDamaged { enemy, damage: 4 },
                Event::EnemyDefeated {
                    enemy,
                    kind: "goblin".into(),
                    by: Some(hero),
                    gold: 5,
                    experience: 5,
                },
            ]
        );
        assert_eq!(world.economy.gold(), 55);
        assert_eq!(world.heroes.get(hero).map(|record| record.experience), Some(5));
    }

    #[test]
    fn queued_commands_for_departed_enemies_are_ignored() {
        let (mut world, hero) = with_hero(HeroClass::Archer, CellCoord::new(0, 2));
        let before = query::snapshot(&world);
        let gone = EnemyId::new(99);
        let mut events = Vec::new();
        for command in [
            Command::StrikeEnemy {
                hero,
                enemy: gone,
                damage: 10,
                critical: true,
            },
            Command::MissEnemy { hero, enemy: gone },
            Command::EscapeEnemy { enemy: gone },
            Command::ExpireStatus {
                enemy: gone,
                kind: StatusKind::Slowed,
            },
        ] {
            apply(&mut world, command, &mut events);
        }
        assert!(events.is_empty());
        assert_eq!(query::snapshot(&world), before);
    }

    #[test]
    fn area_preview_covers_only_the_mage_blast() {
        let world = world();
        let center = CellCoord::new(5, 5);
        let blast = query::area_preview(&world, HeroClass::Mage, center).expect("mage blast");
        assert_eq!(blast.len(), 13);
        assert!(blast.contains(&CellCoord::new(5, 3)));
        assert!(!blast.contains(&CellCoord::new(6, 7)));
        assert_eq!(query::area_preview(&world, HeroClass::Archer, center), None);
        assert_eq!(query::area_preview(&world, HeroClass::Warrior, center), None);
    }

    #[test]
    fn hero_range_grows_with_magic_shield() {
        let (mut world, hero) = with_hero(HeroClass::Mage, CellCoord::new(8, 4));
        let fresh = query::range_preview(&world, HeroClass::Mage, CellCoord::new(8, 4));
        assert_eq!(query::hero_range(&world, hero), Some(fresh.clone()));
        assert_eq!(fresh.len(), 8);

        if let Some(mage) = world.heroes.get_mut(hero) {
            let _ = mage.skills.raise(SkillSlot::Special2);
        }
        let widened = query::hero_range(&world, hero).expect("placed hero");
        assert_eq!(widened.len(), 24);
        assert!(widened.is_superset(&fresh));
        assert!(widened.contains(&CellCoord::new(10, 2)));
        assert_eq!(query::hero_range(&world, HeroId::new(9)), None);
    }
}
