#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave orchestration: composing spawn queues, pacing spawns, and detecting
//! wave completion.

use std::{collections::VecDeque, time::Duration};

use hero_defence_catalog::{Catalog, RosterBand};
use hero_defence_core::{Enemy, EnemyId, EnemyTypeId, LookupError, RandomSource};
use tracing::{info, warn};

/// Delay between two consecutive spawns at normal speed.
pub const SPAWN_DELAY: Duration = Duration::from_millis(1500);

const GENERATED_BASE_SIZE: u32 = 8;
const GENERATED_MAX_SIZE: u32 = 20;
const COMPLETION_BASE_BONUS: u32 = 25;
const COMPLETION_BONUS_PER_WAVE: u32 = 3;

/// Single queued spawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnOrder {
    /// Archetype to spawn.
    pub enemy: EnemyTypeId,
    /// Path the enemy walks.
    pub path_index: usize,
}

/// Number of enemies in a generated wave.
#[must_use]
pub fn wave_size(wave: u32) -> u32 {
    GENERATED_BASE_SIZE
        .saturating_add(wave)
        .min(GENERATED_MAX_SIZE)
}

/// Gold awarded once a wave is cleared.
#[must_use]
pub const fn completion_bonus(wave: u32) -> u32 {
    COMPLETION_BASE_BONUS.saturating_add(COMPLETION_BONUS_PER_WAVE.saturating_mul(wave))
}

/// Builds the spawn queue of a wave.
///
/// Predefined compositions are used verbatim, including entries the catalog
/// cannot resolve; those are dropped when their turn to spawn comes. Later
/// waves draw [`wave_size`] enemies from the roster band covering the wave.
/// Paths are assigned round-robin.
pub fn compose_wave(catalog: &Catalog, wave: u32, rng: &mut dyn RandomSource) -> Vec<SpawnOrder> {
    let enemies: Vec<EnemyTypeId> = match catalog.wave(wave) {
        Some(predefined) => predefined.to_vec(),
        None => match catalog.roster_for(wave) {
            Some(band) => (0..wave_size(wave))
                .filter_map(|_| pick_weighted(band, rng))
                .collect(),
            None => {
                warn!(wave, "no roster band available; wave is empty");
                Vec::new()
            }
        },
    };

    let paths = catalog.path_count().max(1);
    enemies
        .into_iter()
        .enumerate()
        .map(|(index, enemy)| SpawnOrder {
            enemy,
            path_index: index % paths,
        })
        .collect()
}

fn pick_weighted(band: &RosterBand, rng: &mut dyn RandomSource) -> Option<EnemyTypeId> {
    let total = band.total_weight();
    if total <= 0.0 {
        return None;
    }
    let mut roll = rng.next_unit() * total;
    for entry in &band.weights {
        if roll < entry.weight {
            return Some(entry.enemy.clone());
        }
        roll -= entry.weight;
    }
    band.weights.last().map(|entry| entry.enemy.clone())
}

/// Instantiates the enemy described by a spawn order at its path's first cell.
pub fn spawn_enemy(
    catalog: &Catalog,
    order: &SpawnOrder,
    id: EnemyId,
) -> Result<Enemy, LookupError> {
    let archetype = catalog.enemy(&order.enemy)?;
    let path = catalog.path(order.path_index)?;
    Enemy::spawn(
        id,
        archetype.id.clone(),
        archetype.health,
        archetype.speed,
        order.path_index,
        path.clone(),
    )
    .ok_or(LookupError::UnknownPath(order.path_index))
}

/// Progress of the current wave.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveState {
    number: u32,
    queue: VecDeque<SpawnOrder>,
    spawn_delay: Duration,
    next_spawn: Duration,
    in_progress: bool,
}

impl Default for WaveState {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveState {
    /// State before the first wave.
    #[must_use]
    pub fn new() -> Self {
        Self {
            number: 1,
            queue: VecDeque::new(),
            spawn_delay: SPAWN_DELAY,
            next_spawn: Duration::ZERO,
            in_progress: false,
        }
    }

    /// Number of the current wave, or of the next one between waves.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Whether the wave is being spawned or fought.
    #[must_use]
    pub const fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Spawn orders still waiting.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Deadline of the next spawn; zero once the queue is drained.
    #[must_use]
    pub const fn next_spawn(&self) -> Duration {
        self.next_spawn
    }

    /// Enemies left to deal with: queued orders plus `alive` field enemies.
    #[must_use]
    pub fn remaining(&self, alive: usize) -> usize {
        self.queue.len() + alive
    }

    /// Begins the current wave with the provided queue.
    ///
    /// The first enemy appears one full spawn delay after `now`.
    pub fn start(&mut self, orders: Vec<SpawnOrder>, now: Duration) {
        self.queue = orders.into();
        self.next_spawn = now.saturating_add(self.spawn_delay);
        self.in_progress = true;
        info!(wave = self.number, queued = self.queue.len(), "wave started");
    }

    /// Releases the head of the queue once its deadline passed.
    ///
    /// At most one order is released per call. The following deadline is the
    /// spawn delay divided by the game speed.
    pub fn tick(&mut self, now: Duration, game_speed: f32) -> Option<SpawnOrder> {
        if self.queue.is_empty() || now < self.next_spawn {
            return None;
        }
        let order = self.queue.pop_front()?;
        self.next_spawn = if self.queue.is_empty() {
            Duration::ZERO
        } else {
            let delay = Duration::try_from_secs_f64(
                self.spawn_delay.as_secs_f64() / f64::from(game_speed),
            )
            .unwrap_or(self.spawn_delay);
            now.saturating_add(delay)
        };
        Some(order)
    }

    /// Closes the wave when nothing is queued and no enemy is alive.
    ///
    /// Returns the completed wave number and its bonus. The wave counter
    /// moves on to the next wave.
    pub fn complete_if_cleared(&mut self, alive: usize) -> Option<(u32, u32)> {
        if !self.in_progress || !self.queue.is_empty() || alive > 0 {
            return None;
        }
        let completed = self.number;
        let bonus = completion_bonus(completed);
        self.number = self.number.saturating_add(1);
        self.in_progress = false;
        self.next_spawn = Duration::ZERO;
        info!(wave = completed, bonus, "wave completed");
        Some((completed, bonus))
    }
}
