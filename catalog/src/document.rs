//! TOML layout of catalog override documents.
//!
//! Keyed tables (heroes, skills, enemies, waves) merge entry by entry into
//! the built-in tables. Paths and the roster replace the built-in list when
//! present.

use hero_defence_core::{CellCoord, EnemyTypeId};
use serde::Deserialize;

use crate::{Catalog, CatalogError, EnemyArchetype, HeroArchetype, RosterBand, SkillDefinition};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CatalogDocument {
    heroes: Vec<HeroArchetype>,
    skills: Vec<SkillDefinition>,
    enemies: Vec<EnemyArchetype>,
    paths: Option<Vec<PathDocument>>,
    waves: Vec<WaveDocument>,
    roster: Option<Vec<RosterBand>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PathDocument {
    cells: Vec<[u32; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WaveDocument {
    number: u32,
    enemies: Vec<EnemyTypeId>,
}

impl CatalogDocument {
    pub(crate) fn apply(self, mut catalog: Catalog) -> Result<Catalog, CatalogError> {
        for archetype in self.heroes {
            catalog = catalog.with_hero(archetype);
        }
        for definition in self.skills {
            let _ = catalog.skills.insert(definition.kind, definition);
        }
        for archetype in self.enemies {
            catalog = catalog.with_enemy(archetype);
        }
        if let Some(paths) = self.paths {
            catalog.set_paths(
                paths
                    .into_iter()
                    .map(|path| {
                        path.cells
                            .into_iter()
                            .map(|[column, row]| CellCoord::new(column, row))
                            .collect()
                    })
                    .collect(),
            );
        }

        let mut waves = self.waves;
        waves.sort_by_key(|wave| wave.number);
        for wave in waves {
            let Some(index) = wave.number.checked_sub(1).map(|index| index as usize) else {
                return Err(CatalogError::WaveGap(wave.number));
            };
            match index.cmp(&catalog.waves.len()) {
                std::cmp::Ordering::Less => catalog.waves[index] = wave.enemies,
                std::cmp::Ordering::Equal => catalog.waves.push(wave.enemies),
                std::cmp::Ordering::Greater => return Err(CatalogError::WaveGap(wave.number)),
            }
        }

        if let Some(roster) = self.roster {
            catalog.roster = roster;
        }

        catalog.validate()?;
        Ok(catalog)
    }
}
