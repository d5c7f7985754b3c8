#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Static entity tables consumed by the Hero Defence engine.
//!
//! The catalog owns every immutable definition the simulation reads: hero
//! archetypes, skill definitions, enemy archetypes, wave compositions, the
//! weighted roster used for generated waves, and the enemy paths. The
//! built-in tables are available through [`Catalog::standard`]; TOML
//! documents can override individual entries through
//! [`Catalog::from_toml_str`] or [`Catalog::load`].

mod document;
mod standard;

use std::{
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use hero_defence_core::{
    AttackConfig, CellCoord, EnemyTypeId, HeroClass, HeroStats, LookupError, SkillKind,
    SkillSlot, Tier,
};
use serde::{Deserialize, Serialize};

/// Immutable definition of a hero class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeroArchetype {
    /// Class described by the archetype.
    pub class: HeroClass,
    /// Display name.
    pub name: String,
    /// Gold price of a placement.
    pub cost: u32,
    /// Statistics of a freshly placed hero.
    pub stats: HeroStats,
    /// Attack footprint before skill modifiers.
    pub attack: AttackConfig,
}

/// Purchase rules of a single skill.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDefinition {
    /// Skill described by the definition.
    pub kind: SkillKind,
    /// Display name.
    pub name: String,
    /// Skill points charged per level.
    #[serde(default = "default_point_cost")]
    pub point_cost: u32,
    /// Gold charged per level.
    pub gold_cost: u32,
    /// Highest level the skill can reach.
    pub max_level: u32,
}

fn default_point_cost() -> u32 {
    1
}

/// Immutable definition of an enemy type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    /// Key referenced by waves and rosters.
    pub id: EnemyTypeId,
    /// Display name.
    pub name: String,
    /// Health on spawn.
    pub health: u32,
    /// Movement speed in cells per second.
    pub speed: f32,
    /// Gold granted when killed.
    pub gold_reward: u32,
    /// Strength class fixing the experience reward.
    pub tier: Tier,
}

impl EnemyArchetype {
    /// Experience granted to the hero credited with the kill.
    #[must_use]
    pub const fn experience_reward(&self) -> u32 {
        self.tier.experience_reward()
    }
}

/// Relative likelihood of an enemy type inside a roster band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterWeight {
    /// Enemy type.
    pub enemy: EnemyTypeId,
    /// Non-negative weight.
    pub weight: f32,
}

/// Weighted enemy pool used to generate waves past the predefined ones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterBand {
    /// Last wave number the band applies to; `None` covers every later wave.
    #[serde(default)]
    pub up_to: Option<u32>,
    /// Candidates and their weights.
    pub weights: Vec<RosterWeight>,
}

impl RosterBand {
    /// Sum of all weights in the band.
    #[must_use]
    pub fn total_weight(&self) -> f32 {
        self.weights.iter().map(|entry| entry.weight).sum()
    }

    fn covers(&self, wave: u32) -> bool {
        self.up_to.map_or(true, |limit| wave <= limit)
    }
}

/// Failures raised while building or loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog at {}", .path.display())]
    Read {
        /// Location that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The catalog document is not valid TOML for the expected layout.
    #[error("failed to parse catalog document")]
    Parse(#[from] toml::de::Error),
    /// A roster or table referenced data the catalog does not hold.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// The catalog holds no enemy path.
    #[error("catalog defines no enemy path")]
    NoPaths,
    /// A path holds no cells.
    #[error("path {0} holds no cells")]
    EmptyPath(usize),
    /// A hero archetype carries unusable values.
    #[error("hero archetype `{}` is invalid: {reason}", .class.key())]
    InvalidHero {
        /// Offending class.
        class: HeroClass,
        /// Description of the problem.
        reason: &'static str,
    },
    /// An enemy archetype carries unusable values.
    #[error("enemy archetype `{id}` is invalid: {reason}")]
    InvalidEnemy {
        /// Offending enemy type.
        id: EnemyTypeId,
        /// Description of the problem.
        reason: &'static str,
    },
    /// A skill definition carries unusable values.
    #[error("skill {kind:?} is invalid: {reason}")]
    InvalidSkill {
        /// Offending skill.
        kind: SkillKind,
        /// Description of the problem.
        reason: &'static str,
    },
    /// Wave overrides skip a wave number.
    #[error("wave {0} does not follow the previous wave")]
    WaveGap(u32),
    /// The roster cannot produce enemies.
    #[error("roster band {index} is invalid: {reason}")]
    InvalidRoster {
        /// Position of the band in the roster.
        index: usize,
        /// Description of the problem.
        reason: &'static str,
    },
}

/// Immutable tables read by every system.
#[derive(Clone, Debug)]
pub struct Catalog {
    heroes: [HeroArchetype; 3],
    skills: BTreeMap<SkillKind, SkillDefinition>,
    enemies: BTreeMap<EnemyTypeId, EnemyArchetype>,
    paths: Vec<Arc<[CellCoord]>>,
    path_cells: BTreeSet<CellCoord>,
    waves: Vec<Vec<EnemyTypeId>>,
    roster: Vec<RosterBand>,
}

impl Catalog {
    /// Built-in tables.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_parts(
            standard::heroes(),
            standard::skills(),
            standard::enemies(),
            standard::paths(),
            standard::waves(),
            standard::roster(),
        )
    }

    /// Parses a TOML document and applies it on top of the built-in tables.
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let document: document::CatalogDocument = toml::from_str(contents)?;
        document.apply(Self::standard())
    }

    /// Reads a TOML document from disk; see [`Catalog::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Replaces the archetype of the hero's class.
    #[must_use]
    pub fn with_hero(mut self, archetype: HeroArchetype) -> Self {
        let index = archetype.class.index();
        self.heroes[index] = archetype;
        self
    }

    /// Inserts or replaces an enemy archetype.
    #[must_use]
    pub fn with_enemy(mut self, archetype: EnemyArchetype) -> Self {
        let _ = self.enemies.insert(archetype.id.clone(), archetype);
        self
    }

    /// Replaces the predefined wave compositions, wave 1 first.
    #[must_use]
    pub fn with_waves(mut self, waves: Vec<Vec<EnemyTypeId>>) -> Self {
        self.waves = waves;
        self
    }

    /// Checks the internal consistency of the tables.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for archetype in &self.heroes {
            validate_hero(archetype)?;
        }
        for archetype in self.enemies.values() {
            if archetype.health == 0 {
                return Err(CatalogError::InvalidEnemy {
                    id: archetype.id.clone(),
                    reason: "health must be positive",
                });
            }
            if !archetype.speed.is_finite() || archetype.speed < 0.0 {
                return Err(CatalogError::InvalidEnemy {
                    id: archetype.id.clone(),
                    reason: "speed must be finite and non-negative",
                });
            }
        }
        for definition in self.skills.values() {
            if definition.max_level == 0 {
                return Err(CatalogError::InvalidSkill {
                    kind: definition.kind,
                    reason: "maximum level must be positive",
                });
            }
        }
        if self.paths.is_empty() {
            return Err(CatalogError::NoPaths);
        }
        if let Some(index) = self.paths.iter().position(|path| path.is_empty()) {
            return Err(CatalogError::EmptyPath(index));
        }
        if self.roster.is_empty() {
            return Err(CatalogError::InvalidRoster {
                index: 0,
                reason: "roster holds no band",
            });
        }
        for (index, band) in self.roster.iter().enumerate() {
            if band
                .weights
                .iter()
                .any(|entry| !entry.weight.is_finite() || entry.weight < 0.0)
            {
                return Err(CatalogError::InvalidRoster {
                    index,
                    reason: "weights must be finite and non-negative",
                });
            }
            if band.total_weight() <= 0.0 {
                return Err(CatalogError::InvalidRoster {
                    index,
                    reason: "weights must sum to a positive value",
                });
            }
            for entry in &band.weights {
                let _ = self.enemy(&entry.enemy)?;
            }
        }
        Ok(())
    }

    /// Archetype of the provided class.
    #[must_use]
    pub fn hero(&self, class: HeroClass) -> &HeroArchetype {
        &self.heroes[class.index()]
    }

    /// Purchase rules of the skill, if the catalog defines it.
    #[must_use]
    pub fn skill(&self, kind: SkillKind) -> Option<&SkillDefinition> {
        self.skills.get(&kind)
    }

    /// Purchase rules of the skill stored in `slot` for `class`.
    #[must_use]
    pub fn skill_for(&self, class: HeroClass, slot: SkillSlot) -> Option<&SkillDefinition> {
        self.skill(SkillKind::for_slot(class, slot))
    }

    /// Archetype registered under the identifier.
    pub fn enemy(&self, id: &EnemyTypeId) -> Result<&EnemyArchetype, LookupError> {
        self.enemies
            .get(id)
            .ok_or_else(|| LookupError::UnknownEnemy(id.clone()))
    }

    /// Path stored at the index.
    pub fn path(&self, index: usize) -> Result<&Arc<[CellCoord]>, LookupError> {
        self.paths.get(index).ok_or(LookupError::UnknownPath(index))
    }

    /// Number of available paths.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Reports whether any path runs through the cell.
    #[must_use]
    pub fn is_path_cell(&self, cell: CellCoord) -> bool {
        self.path_cells.contains(&cell)
    }

    /// Predefined composition of the wave, if one exists.
    #[must_use]
    pub fn wave(&self, number: u32) -> Option<&[EnemyTypeId]> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.waves.get(index).map(Vec::as_slice)
    }

    /// Number of predefined waves.
    #[must_use]
    pub fn predefined_waves(&self) -> usize {
        self.waves.len()
    }

    /// Roster band consulted when generating the wave.
    ///
    /// Falls back to the last band when no band covers the wave.
    #[must_use]
    pub fn roster_for(&self, wave: u32) -> Option<&RosterBand> {
        self.roster
            .iter()
            .find(|band| band.covers(wave))
            .or_else(|| self.roster.last())
    }

    fn from_parts(
        heroes: [HeroArchetype; 3],
        skills: Vec<SkillDefinition>,
        enemies: Vec<EnemyArchetype>,
        paths: Vec<Vec<CellCoord>>,
        waves: Vec<Vec<EnemyTypeId>>,
        roster: Vec<RosterBand>,
    ) -> Self {
        let mut catalog = Self {
            heroes,
            skills: skills
                .into_iter()
                .map(|definition| (definition.kind, definition))
                .collect(),
            enemies: enemies
                .into_iter()
                .map(|archetype| (archetype.id.clone(), archetype))
                .collect(),
            paths: Vec::new(),
            path_cells: BTreeSet::new(),
            waves,
            roster,
        };
        catalog.set_paths(paths);
        catalog
    }

    fn set_paths(&mut self, paths: Vec<Vec<CellCoord>>) {
        self.path_cells = paths.iter().flatten().copied().collect();
        self.paths = paths.into_iter().map(Arc::from).collect();
    }
}

fn validate_hero(archetype: &HeroArchetype) -> Result<(), CatalogError> {
    let invalid = |reason| CatalogError::InvalidHero {
        class: archetype.class,
        reason,
    };
    let stats = archetype.stats;
    if !stats.attack_speed.is_finite() || stats.attack_speed <= 0.0 {
        return Err(invalid("attack speed must be finite and positive"));
    }
    if !stats.accuracy.is_finite() || !stats.critical_chance.is_finite() {
        return Err(invalid("accuracy and critical chance must be finite"));
    }
    if archetype.attack.min_range > archetype.attack.max_range {
        return Err(invalid("minimum range exceeds maximum range"));
    }
    if archetype.attack.max_targets == 0 {
        return Err(invalid("an attack needs at least one target"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tables_are_consistent() {
        let catalog = Catalog::standard();
        catalog.validate().expect("standard catalog validates");
        assert_eq!(catalog.hero(HeroClass::Archer).cost, 50);
        assert_eq!(catalog.hero(HeroClass::Warrior).cost, 75);
        assert_eq!(catalog.hero(HeroClass::Mage).cost, 100);
        assert_eq!(catalog.predefined_waves(), 10);
        assert_eq!(catalog.path_count(), 1);
    }

    #[test]
    fn every_slot_has_a_definition_for_every_class() {
        let catalog = Catalog::standard();
        for class in HeroClass::ALL {
            for slot in SkillSlot::ALL {
                let definition = catalog.skill_for(class, slot).expect("defined");
                assert_eq!(definition.point_cost, 1);
            }
        }
        let blizzard = catalog.skill(SkillKind::Blizzard).expect("defined");
        assert_eq!((blizzard.max_level, blizzard.gold_cost), (1, 1000));
    }

    #[test]
    fn ogre_is_referenced_but_not_defined() {
        let catalog = Catalog::standard();
        let ogre = EnemyTypeId::from("ogre");
        assert!(catalog.wave(6).expect("wave 6").contains(&ogre));
        assert_eq!(
            catalog.enemy(&ogre),
            Err(LookupError::UnknownEnemy(ogre.clone()))
        );
    }

    #[test]
    fn path_cells_are_indexed() {
        let catalog = Catalog::standard();
        assert!(catalog.is_path_cell(CellCoord::new(0, 5)));
        assert!(catalog.is_path_cell(CellCoord::new(6, 6)));
        assert!(!catalog.is_path_cell(CellCoord::new(0, 0)));
        assert_eq!(catalog.path(3), Err(LookupError::UnknownPath(3)));
    }

    #[test]
    fn roster_bands_follow_wave_number() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.roster_for(1).and_then(|band| band.up_to), Some(2));
        assert_eq!(catalog.roster_for(3).and_then(|band| band.up_to), Some(5));
        assert_eq!(catalog.roster_for(11).and_then(|band| band.up_to), None);
        assert_eq!(catalog.roster_for(400).map(|band| band.weights.len()), Some(5));
    }

    #[test]
    fn wave_zero_has_no_composition() {
        assert!(Catalog::standard().wave(0).is_none());
        assert!(Catalog::standard().wave(11).is_none());
    }
}
