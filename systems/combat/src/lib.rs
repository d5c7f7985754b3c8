#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns ready heroes into strike commands on the combat tick.
//!
//! The resolver only reads hero and enemy records; everything it decides is
//! queued as [`Command`] values for the world to apply in order. Every random
//! decision is drawn from the injected [`RandomSource`] in a fixed order per
//! strike: the hit roll, then the critical roll, then the status-effect rolls
//! of a surviving target. Health is tracked across the whole pass, so a second
//! pass of a double strike and every later hero skip enemies already killed.

mod stats;

use std::time::Duration;

use hero_defence_catalog::Catalog;
use hero_defence_core::{
    Ability, Affliction, AttackConfig, Command, Enemy, EnemyId, Hero, HeroClass, RandomSource,
    SkillKind, SkillSlot, TargetingMode,
};
use hero_defence_system_geometry as geometry;

pub use stats::{effective_attack, effective_stats, EffectiveStats};

const CRITICAL_NUMERATOR: u64 = 3;
const CRITICAL_DENOMINATOR: u64 = 2;

const FIRE_ARROW_DAMAGE: u32 = 4;
const FIRE_ARROW_DURATION: Duration = Duration::from_secs(4);
const BASE_SLOW_PERCENT: u32 = 20;
const SLOW_DURATION: Duration = Duration::from_secs(2);
const BASE_STUN_CHANCE: u32 = 20;
const STUN_DURATION: Duration = Duration::from_secs(1);
const MAGE_BURN_DAMAGE: u32 = 2;
const MAGE_BURN_SECONDS: u64 = 3;

const BLIZZARD_COOLDOWN: Duration = Duration::from_secs(3);
const BLIZZARD_TARGETS: usize = 4;
const BLIZZARD_STRIKES: usize = 2;
const BLIZZARD_DAMAGE: u32 = 5;
const FREEZE_CHANCE: f32 = 35.0;
const FREEZE_DURATION: Duration = Duration::from_millis(1500);

/// Immutable inputs of a combat pass.
#[derive(Clone, Copy, Debug)]
pub struct CombatContext<'a> {
    /// Static tables providing the base attack footprints.
    pub catalog: &'a Catalog,
    /// Side length of the battlefield.
    pub grid_size: u32,
    /// Simulation time of the pass.
    pub now: Duration,
}

/// Combat system reusing its scratch buffers between passes.
#[derive(Debug, Default)]
pub struct CombatResolver {
    targets: Vec<usize>,
    health: Vec<u32>,
}

impl CombatResolver {
    /// Creates a new resolver with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the commands of every hero whose attack or blizzard is ready.
    ///
    /// Heroes act in slice order. A hero without targets queues nothing and
    /// keeps its cooldown untouched.
    pub fn handle(
        &mut self,
        ctx: &CombatContext<'_>,
        heroes: &[Hero],
        enemies: &[Enemy],
        rng: &mut dyn RandomSource,
        out: &mut Vec<Command>,
    ) {
        self.health.clear();
        self.health.extend(enemies.iter().map(|enemy| enemy.health));

        for hero in heroes {
            let base = ctx.catalog.hero(hero.class).attack;
            let attack = effective_attack(hero, &base);
            self.regular_attack(ctx, hero, &attack, enemies, rng, out);
            if hero.class == HeroClass::Mage && hero.skills.level(SkillSlot::Special3) > 0 {
                self.blizzard(ctx, hero, &attack, enemies, rng, out);
            }
        }
    }

    fn regular_attack(
        &mut self,
        ctx: &CombatContext<'_>,
        hero: &Hero,
        attack: &AttackConfig,
        enemies: &[Enemy],
        rng: &mut dyn RandomSource,
        out: &mut Vec<Command>,
    ) {
        let stats = effective_stats(hero);
        if !is_ready(hero.last_attack_at, stats.cooldown(), ctx.now) {
            return;
        }
        let limit = usize::try_from(attack.max_targets).unwrap_or(usize::MAX);
        self.select_targets(hero, attack, enemies, ctx.grid_size, limit);
        if self.targets.is_empty() {
            return;
        }
        out.push(Command::TriggerCooldown {
            hero: hero.id,
            ability: Ability::Attack,
        });

        let passes = if hero.class == HeroClass::Warrior && rolls_whirlwind(hero, rng) {
            2
        } else {
            1
        };
        for _ in 0..passes {
            for &index in &self.targets {
                let health = &mut self.health[index];
                if *health == 0 {
                    continue;
                }
                strike(hero, &stats, &enemies[index], health, rng, out);
            }
        }
    }

    fn blizzard(
        &mut self,
        ctx: &CombatContext<'_>,
        hero: &Hero,
        attack: &AttackConfig,
        enemies: &[Enemy],
        rng: &mut dyn RandomSource,
        out: &mut Vec<Command>,
    ) {
        if !is_ready(hero.last_blizzard_at, BLIZZARD_COOLDOWN, ctx.now) {
            return;
        }
        self.select_targets(hero, attack, enemies, ctx.grid_size, BLIZZARD_TARGETS);
        if self.targets.is_empty() {
            return;
        }
        out.push(Command::TriggerCooldown {
            hero: hero.id,
            ability: Ability::Blizzard,
        });

        let accuracy = effective_stats(hero).accuracy;
        for _ in 0..BLIZZARD_STRIKES {
            for &index in &self.targets {
                let health = &mut self.health[index];
                if *health == 0 {
                    continue;
                }
                let enemy = enemies[index].id;
                if !rng.chance(accuracy) {
                    out.push(Command::MissEnemy {
                        hero: hero.id,
                        enemy,
                    });
                    continue;
                }
                out.push(Command::StrikeEnemy {
                    hero: hero.id,
                    enemy,
                    damage: BLIZZARD_DAMAGE,
                    critical: false,
                });
                *health = health.saturating_sub(BLIZZARD_DAMAGE);
                if *health > 0 && rng.chance(FREEZE_CHANCE) {
                    out.push(Command::AfflictEnemy {
                        enemy,
                        affliction: Affliction::Frozen {
                            duration: FREEZE_DURATION,
                        },
                    });
                }
            }
        }
    }

    /// Collects the indices of living in-range enemies the hero attacks.
    ///
    /// Enemies whose position floors into the footprint are ordered by path
    /// progress, ascending for [`TargetingMode::First`] and descending for
    /// [`TargetingMode::Last`], then truncated to `limit`.
    fn select_targets(
        &mut self,
        hero: &Hero,
        attack: &AttackConfig,
        enemies: &[Enemy],
        grid_size: u32,
        limit: usize,
    ) {
        let health = &self.health;
        self.targets.clear();
        self.targets
            .extend(enemies.iter().enumerate().filter_map(|(index, enemy)| {
                let reachable =
                    geometry::contains_point(hero.cell, attack, enemy.position, grid_size);
                (health[index] > 0 && reachable).then_some(index)
            }));
        self.targets.sort_by(|&left, &right| {
            let ordering = enemies[left]
                .progress()
                .total_cmp(&enemies[right].progress());
            match hero.targeting {
                TargetingMode::First => ordering,
                TargetingMode::Last => ordering.reverse(),
            }
        });
        self.targets.truncate(limit);
    }
}

fn is_ready(last: Option<Duration>, cooldown: Duration, now: Duration) -> bool {
    last.map_or(true, |at| now.saturating_sub(at) >= cooldown)
}

fn rolls_whirlwind(hero: &Hero, rng: &mut dyn RandomSource) -> bool {
    let level = hero.skills.level(SkillSlot::Special1);
    level > 0 && rng.chance(SkillKind::Whirlwind.effect(level))
}

fn is_wounded(health: u32, max_health: u32) -> bool {
    u64::from(health) * 2 < u64::from(max_health)
}

/// Rolls one strike, lowering the tracked `health` when it lands.
fn strike(
    hero: &Hero,
    stats: &EffectiveStats,
    enemy: &Enemy,
    health: &mut u32,
    rng: &mut dyn RandomSource,
    out: &mut Vec<Command>,
) {
    if !rng.chance(stats.accuracy) {
        out.push(Command::MissEnemy {
            hero: hero.id,
            enemy: enemy.id,
        });
        return;
    }
    let critical = rng.chance(stats.critical_chance);

    let mut damage = u64::from(stats.damage);
    let devastation = hero.skills.level(SkillSlot::Special2);
    if hero.class == HeroClass::Warrior
        && devastation > 0
        && is_wounded(*health, enemy.max_health)
    {
        let bonus = u64::from(SkillKind::Devastation.magnitude(devastation));
        damage = damage * (100 + bonus) / 100;
    }
    if critical {
        damage = damage * CRITICAL_NUMERATOR / CRITICAL_DENOMINATOR;
    }
    let damage = u32::try_from(damage).unwrap_or(u32::MAX);

    out.push(Command::StrikeEnemy {
        hero: hero.id,
        enemy: enemy.id,
        damage,
        critical,
    });
    *health = health.saturating_sub(damage);
    if *health > 0 {
        apply_class_effects(hero, enemy.id, rng, out);
    }
}

/// Queues the on-hit effects of the hero's class against a surviving enemy.
///
/// Every class carries a base effect: archers slow, warriors may stun, and
/// mages set the target on fire. Class skills strengthen the base effect or
/// add a second one.
fn apply_class_effects(
    hero: &Hero,
    enemy: EnemyId,
    rng: &mut dyn RandomSource,
    out: &mut Vec<Command>,
) {
    let mut afflict = |affliction| out.push(Command::AfflictEnemy { enemy, affliction });
    let skills = &hero.skills;
    match hero.class {
        HeroClass::Archer => {
            let fire_arrow = skills.level(SkillSlot::Special3);
            if fire_arrow > 0 && rng.chance(SkillKind::FireArrow.effect(fire_arrow)) {
                afflict(Affliction::Burning {
                    damage_per_second: FIRE_ARROW_DAMAGE,
                    duration: FIRE_ARROW_DURATION,
                    source: Some(hero.id),
                });
            }
            let piercing = SkillKind::PiercingShot.magnitude(skills.level(SkillSlot::Special2));
            afflict(Affliction::Slowed {
                percent: (BASE_SLOW_PERCENT + piercing) as f32,
                duration: SLOW_DURATION,
            });
        }
        HeroClass::Warrior => {
            let shield_bash = SkillKind::ShieldBash.magnitude(skills.level(SkillSlot::Special3));
            if rng.chance((BASE_STUN_CHANCE + shield_bash) as f32) {
                afflict(Affliction::Stunned {
                    duration: STUN_DURATION,
                });
            }
        }
        HeroClass::Mage => {
            let pyromancer = SkillKind::Pyromancer.magnitude(skills.level(SkillSlot::Special1));
            afflict(Affliction::Burning {
                damage_per_second: MAGE_BURN_DAMAGE + pyromancer,
                duration: Duration::from_secs(MAGE_BURN_SECONDS + u64::from(pyromancer)),
                source: Some(hero.id),
            });
        }
    }
}
