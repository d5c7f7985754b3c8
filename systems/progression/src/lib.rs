#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Hero progression: experience thresholds, level growth, skill purchases,
//! and the placement and sell rules of the hero economy.

use hero_defence_catalog::Catalog;
use hero_defence_core::{
    CellCoord, Command, Economy, Hero, HeroClass, PlacementError, SkillSlot, SkillUpgradeError,
    MAX_HERO_LEVEL,
};
use tracing::debug;

/// Experience required per level to reach the next one.
pub const EXPERIENCE_PER_LEVEL: u32 = 100;

const MAX_GROWN_ACCURACY: f32 = 95.0;
const MAX_GROWN_CRITICAL_CHANCE: f32 = 50.0;

/// Share of the invested gold refunded on sale, as a fraction.
const SELL_NUMERATOR: u64 = 2;
const SELL_DENOMINATOR: u64 = 5;

/// Experience the hero needs for its next level.
#[must_use]
pub const fn experience_required(hero: &Hero) -> u32 {
    hero.level.saturating_mul(EXPERIENCE_PER_LEVEL)
}

/// Reports whether the hero holds enough experience and is below the cap.
#[must_use]
pub const fn can_level_up(hero: &Hero) -> bool {
    hero.experience >= experience_required(hero) && hero.level < MAX_HERO_LEVEL
}

/// Raises the hero by one level when eligible, returning whether it did.
///
/// The requirement is consumed and the remainder carries over. Each level
/// grants a skill point and grows the base statistics.
pub fn level_up(hero: &mut Hero) -> bool {
    if !can_level_up(hero) {
        return false;
    }
    hero.experience -= experience_required(hero);
    hero.level += 1;
    hero.skill_points += 1;

    let stats = &mut hero.stats;
    stats.damage = stats.damage.saturating_add(stats.damage * 15 / 100);
    stats.attack_speed *= 1.1;
    stats.accuracy = (stats.accuracy + 3.0).min(MAX_GROWN_ACCURACY);
    stats.critical_chance = (stats.critical_chance + 2.0).min(MAX_GROWN_CRITICAL_CHANCE);
    true
}

/// Buys one level of the skill held in `slot`, returning the level reached.
///
/// Nothing changes when the purchase is rejected.
pub fn upgrade_skill(
    hero: &mut Hero,
    economy: &mut Economy,
    catalog: &Catalog,
    slot: SkillSlot,
) -> Result<u32, SkillUpgradeError> {
    let definition = catalog
        .skill_for(hero.class, slot)
        .ok_or(SkillUpgradeError::UnknownSkill)?;

    if hero.skill_points < definition.point_cost {
        return Err(SkillUpgradeError::InsufficientSkillPoints);
    }
    if !economy.can_afford(definition.gold_cost) {
        return Err(SkillUpgradeError::InsufficientGold);
    }
    if hero.skills.level(slot) >= definition.max_level {
        return Err(SkillUpgradeError::MaxLevel);
    }
    if hero.skills.special_lock_engaged(slot) {
        return Err(SkillUpgradeError::SpecialSkillLocked);
    }
    if !economy.try_spend(definition.gold_cost) {
        return Err(SkillUpgradeError::InsufficientGold);
    }

    hero.skill_points -= definition.point_cost;
    Ok(hero.skills.raise(slot))
}

/// Gold refunded when the hero is sold.
///
/// Two fifths of the purchase price plus the gold spent on every skill
/// level, rounded down. Skills without a catalog definition count as free.
#[must_use]
pub fn sell_value(hero: &Hero, catalog: &Catalog) -> u32 {
    let invested = hero
        .skills
        .iter()
        .filter_map(|(slot, level)| {
            catalog
                .skill_for(hero.class, slot)
                .map(|definition| u64::from(definition.gold_cost) * u64::from(level))
        })
        .sum::<u64>()
        + u64::from(catalog.hero(hero.class).cost);
    u32::try_from(invested * SELL_NUMERATOR / SELL_DENOMINATOR).unwrap_or(u32::MAX)
}

/// Checks whether a hero of `class` may be bought for `cell`.
///
/// Returns the price on success. Checks run in a fixed order: bounds, path
/// cells, occupancy, then gold.
pub fn validate_placement(
    catalog: &Catalog,
    heroes: &[Hero],
    economy: &Economy,
    class: HeroClass,
    cell: CellCoord,
    grid_size: u32,
) -> Result<u32, PlacementError> {
    if !cell.within(grid_size) {
        return Err(PlacementError::OutOfBounds);
    }
    if catalog.is_path_cell(cell) {
        return Err(PlacementError::PathCell);
    }
    if heroes.iter().any(|hero| hero.cell == cell) {
        return Err(PlacementError::Occupied);
    }
    let cost = catalog.hero(class).cost;
    if !economy.can_afford(cost) {
        return Err(PlacementError::InsufficientGold);
    }
    Ok(cost)
}

/// Level-up pass run after every combat tick.
#[derive(Debug, Default)]
pub struct Progression;

impl Progression {
    /// Creates a new progression system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Queues one level-up per level every hero's experience pays for.
    pub fn handle(&mut self, heroes: &[Hero], out: &mut Vec<Command>) {
        for hero in heroes.iter().filter(|hero| can_level_up(hero)) {
            let mut grown = hero.clone();
            while level_up(&mut grown) {
                out.push(Command::LevelUpHero { hero: hero.id });
            }
            debug!(
                hero = hero.id.get(),
                from = hero.level,
                to = grown.level,
                "hero ready to level up"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_defence_core::{HeroId, HeroStats};

    fn warrior() -> Hero {
        Hero::new(
            HeroId::new(3),
            HeroClass::Warrior,
            CellCoord::new(1, 1),
            HeroStats {
                damage: 8,
                attack_speed: 2.0,
                accuracy: 85.0,
                critical_chance: 20.0,
            },
        )
    }

    #[test]
    fn threshold_scales_with_level() {
        let mut hero = warrior();
        hero.experience = 99;
        assert!(!can_level_up(&hero));
        hero.experience = 100;
        assert!(can_level_up(&hero));
        hero.level = 2;
        assert!(!can_level_up(&hero));
    }

    #[test]
    fn growth_floors_damage_and_caps_rates() {
        let mut hero = warrior();
        hero.experience = 130;
        assert!(level_up(&mut hero));

        assert_eq!(hero.level, 2);
        assert_eq!(hero.experience, 30);
        assert_eq!(hero.skill_points, 1);
        assert_eq!(hero.stats.damage, 9);
        assert!((hero.stats.attack_speed - 2.2).abs() < 1e-5);
        assert_eq!(hero.stats.accuracy, 88.0);
        assert_eq!(hero.stats.critical_chance, 22.0);

        hero.stats.accuracy = 94.0;
        hero.stats.critical_chance = 49.5;
        hero.experience = 200;
        assert!(level_up(&mut hero));
        assert_eq!(hero.stats.accuracy, 95.0);
        assert_eq!(hero.stats.critical_chance, 50.0);
    }

    #[test]
    fn level_cap_stops_growth() {
        let mut hero = warrior();
        hero.level = MAX_HERO_LEVEL;
        hero.experience = 5_000;
        let before = hero.clone();
        assert!(!level_up(&mut hero));
        assert_eq!(hero, before);
    }

    #[test]
    fn handle_queues_one_command_per_level() {
        let mut heroes = vec![warrior()];
        heroes[0].experience = 300;
        let mut out = Vec::new();
        Progression::new().handle(&heroes, &mut out);

        let level_up = Command::LevelUpHero {
            hero: HeroId::new(3),
        };
        assert_eq!(out, vec![level_up.clone(), level_up]);
        assert_eq!(heroes[0].level, 1);
        assert_eq!(heroes[0].experience, 300);
    }
}
