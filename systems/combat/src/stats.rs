//! Skill-modified hero statistics and attack footprints.

use std::time::Duration;

use hero_defence_core::{AttackConfig, Hero, HeroClass, SkillKind, SkillSlot};

const MAX_ACCURACY: f32 = 95.0;
const MAX_CRITICAL_CHANCE: f32 = 75.0;
const MULTI_SHOT_TARGET_CAP: u32 = 4;

/// Hero statistics once the common skills are applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveStats {
    /// Damage of a regular strike.
    pub damage: u32,
    /// Attacks per second.
    pub attack_speed: f32,
    /// Hit chance in percent, capped at 95.
    pub accuracy: f32,
    /// Critical chance in percent, capped at 75.
    pub critical_chance: f32,
}

impl EffectiveStats {
    /// Minimum time between two regular attacks.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        if self.attack_speed <= 0.0 {
            return Duration::MAX;
        }
        Duration::try_from_secs_f64(1.0 / f64::from(self.attack_speed)).unwrap_or(Duration::MAX)
    }
}

/// Applies the damage, speed, accuracy, and critical boosts of the hero.
#[must_use]
pub fn effective_stats(hero: &Hero) -> EffectiveStats {
    let level = |slot| hero.skills.level(slot);
    let damage_bonus = SkillKind::DamageBoost.magnitude(level(SkillSlot::DamageBoost));
    let damage = u64::from(hero.stats.damage) * (100 + u64::from(damage_bonus)) / 100;

    EffectiveStats {
        damage: u32::try_from(damage).unwrap_or(u32::MAX),
        attack_speed: hero.stats.attack_speed
            * (1.0 + SkillKind::SpeedBoost.effect(level(SkillSlot::SpeedBoost)) / 100.0),
        accuracy: (hero.stats.accuracy
            + SkillKind::AccuracyBoost.effect(level(SkillSlot::AccuracyBoost)))
        .min(MAX_ACCURACY),
        critical_chance: (hero.stats.critical_chance
            + SkillKind::CriticalBoost.effect(level(SkillSlot::CriticalBoost)))
        .min(MAX_CRITICAL_CHANCE),
    }
}

/// Footprint of the hero once class skills reshape it.
///
/// Magic shield widens a mage's maximum range; multi shot raises an
/// archer's target cap to one plus its level, never above four.
#[must_use]
pub fn effective_attack(hero: &Hero, base: &AttackConfig) -> AttackConfig {
    let mut attack = *base;
    match hero.class {
        HeroClass::Mage => {
            let magic_shield = hero.skills.level(SkillSlot::Special2);
            attack.max_range += SkillKind::MagicShield.magnitude(magic_shield);
        }
        HeroClass::Archer => {
            let multi_shot = hero.skills.level(SkillSlot::Special1);
            if multi_shot > 0 {
                attack.max_targets =
                    (1 + SkillKind::MultiShot.magnitude(multi_shot)).min(MULTI_SHOT_TARGET_CAP);
            }
        }
        HeroClass::Warrior => {}
    }
    attack
}
