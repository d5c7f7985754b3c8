//! Dynamic hero records.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CellCoord, HeroClass, HeroId, SkillLevels};

/// Combat statistics of a hero before skill modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeroStats {
    /// Damage dealt by a regular strike.
    pub damage: u32,
    /// Attacks per second.
    pub attack_speed: f32,
    /// Hit chance in percent.
    pub accuracy: f32,
    /// Critical chance in percent.
    pub critical_chance: f32,
}

/// Order in which a hero prioritises in-range enemies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetingMode {
    /// Prefer the enemies that progressed the least along their path.
    #[default]
    First,
    /// Prefer the enemies that progressed the most along their path.
    Last,
}

impl TargetingMode {
    /// The opposite mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::First => Self::Last,
            Self::Last => Self::First,
        }
    }
}

/// A hero placed on the battlefield.
#[derive(Clone, Debug, PartialEq)]
pub struct Hero {
    /// Identifier allocated by the world.
    pub id: HeroId,
    /// Class of the hero.
    pub class: HeroClass,
    /// Cell occupied by the hero.
    pub cell: CellCoord,
    /// Current level, starting at 1.
    pub level: u32,
    /// Experience accumulated toward the next level.
    pub experience: u32,
    /// Unspent skill points.
    pub skill_points: u32,
    /// Statistics after automatic level growth.
    pub stats: HeroStats,
    /// Levels purchased in the skill tree.
    pub skills: SkillLevels,
    /// Target priority.
    pub targeting: TargetingMode,
    /// Simulation time of the last regular attack.
    pub last_attack_at: Option<Duration>,
    /// Simulation time of the last blizzard cast.
    pub last_blizzard_at: Option<Duration>,
}

impl Hero {
    /// Creates a level one hero with the provided starting statistics.
    #[must_use]
    pub fn new(id: HeroId, class: HeroClass, cell: CellCoord, stats: HeroStats) -> Self {
        Self {
            id,
            class,
            cell,
            level: 1,
            experience: 0,
            skill_points: 0,
            stats,
            skills: SkillLevels::default(),
            targeting: TargetingMode::First,
            last_attack_at: None,
            last_blizzard_at: None,
        }
    }
}
