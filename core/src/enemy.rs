//! Dynamic enemy records and enemy classification.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{CellCoord, CellPoint, EnemyId, StatusEffects};

/// Catalog key naming an enemy archetype.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyTypeId(String);

impl EnemyTypeId {
    /// Creates a new enemy type key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrowed form of the key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EnemyTypeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for EnemyTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strength class of an enemy, fixing its experience payout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// Fodder.
    D,
    /// Regular.
    C,
    /// Elite.
    B,
    /// Champion.
    A,
    /// Boss.
    S,
}

impl Tier {
    /// Experience granted to the hero that kills an enemy of this tier.
    #[must_use]
    pub const fn experience_reward(self) -> u32 {
        match self {
            Self::D => 5,
            Self::C => 10,
            Self::B => 20,
            Self::A => 35,
            Self::S => 50,
        }
    }
}

/// Snapping tolerance, in cells, of path progress calculations.
const SEGMENT_EPSILON: f32 = 0.01;

/// An enemy walking its path.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Identifier allocated by the world.
    pub id: EnemyId,
    /// Archetype of the enemy.
    pub kind: EnemyTypeId,
    /// Index of the path variant the enemy follows.
    pub path_index: usize,
    /// Cells of the followed path, shared between enemies.
    pub path: Arc<[CellCoord]>,
    /// Continuous position of the enemy.
    pub position: CellPoint,
    /// Index of the path cell most recently reached.
    pub segment: usize,
    /// Current health.
    pub health: u32,
    /// Health on spawn.
    pub max_health: u32,
    /// Speed in cells per second before status effects.
    pub base_speed: f32,
    /// Active status effects.
    pub effects: StatusEffects,
}

impl Enemy {
    /// Creates an enemy standing on the first cell of `path`.
    ///
    /// Returns `None` when the path has no cells.
    #[must_use]
    pub fn spawn(
        id: EnemyId,
        kind: EnemyTypeId,
        health: u32,
        base_speed: f32,
        path_index: usize,
        path: Arc<[CellCoord]>,
    ) -> Option<Self> {
        let start = path.first().copied()?;
        Some(Self {
            id,
            kind,
            path_index,
            position: start.to_point(),
            path,
            segment: 0,
            health,
            max_health: health,
            base_speed,
            effects: StatusEffects::default(),
        })
    }

    /// Reports whether the enemy still has health left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Removes health, saturating at zero, and returns the remainder.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.health = self.health.saturating_sub(damage);
        self.health
    }

    /// Cell the enemy currently stands in.
    #[must_use]
    pub fn cell(&self) -> Option<CellCoord> {
        self.position.cell()
    }

    /// Continuous progress along the path: the reached segment index plus the
    /// fraction of the following segment already travelled.
    #[must_use]
    pub fn progress(&self) -> f32 {
        let base = self.segment as f32;
        let (Some(start), Some(next)) =
            (self.path.get(self.segment), self.path.get(self.segment + 1))
        else {
            return base;
        };
        let length = start.to_point().distance(next.to_point());
        if length < SEGMENT_EPSILON {
            return base;
        }
        let travelled = self.position.distance(start.to_point());
        base + (travelled / length).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_path() -> Arc<[CellCoord]> {
        Arc::from(vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(2, 0),
        ])
    }

    #[test]
    fn spawn_places_enemy_on_first_cell() {
        let enemy = Enemy::spawn(
            EnemyId::new(1),
            EnemyTypeId::from("goblin"),
            50,
            0.8,
            0,
            straight_path(),
        )
        .expect("non-empty path");
        assert_eq!(enemy.cell(), Some(CellCoord::new(0, 0)));
        assert_eq!(enemy.health, 50);
        assert_eq!(enemy.max_health, 50);
        assert!(enemy.effects.is_empty());
    }

    #[test]
    fn spawn_rejects_empty_path() {
        let empty: Arc<[CellCoord]> = Arc::from(Vec::new());
        assert!(Enemy::spawn(EnemyId::new(1), "goblin".into(), 50, 0.8, 0, empty).is_none());
    }

    #[test]
    fn progress_includes_partial_segment() {
        let mut enemy =
            Enemy::spawn(EnemyId::new(1), "goblin".into(), 50, 0.8, 0, straight_path())
                .expect("non-empty path");
        enemy.segment = 1;
        enemy.position = CellPoint::new(1.25, 0.0);
        assert!((enemy.progress() - 1.25).abs() < 1e-5);
    }

    #[test]
    fn damage_saturates_at_zero() {
        let mut enemy = Enemy::spawn(EnemyId::new(1), "goblin".into(), 50, 0.8, 0, straight_path())
            .expect("non-empty path");
        assert_eq!(enemy.take_damage(26), 24);
        assert!(enemy.is_alive());
        assert_eq!(enemy.take_damage(100), 0);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn tiers_map_to_fixed_experience() {
        assert_eq!(Tier::D.experience_reward(), 5);
        assert_eq!(Tier::C.experience_reward(), 10);
        assert_eq!(Tier::B.experience_reward(), 20);
        assert_eq!(Tier::A.experience_reward(), 35);
    }
}
