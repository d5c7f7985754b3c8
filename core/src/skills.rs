//! Skill slots, skill kinds, and the per-hero skill level record.

use serde::{Deserialize, Serialize};

use crate::HeroClass;

/// Slots of a hero's skill tree.
///
/// The four common slots are shared by every class. The three special slots
/// resolve to class-specific [`SkillKind`] values through
/// [`SkillKind::for_slot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillSlot {
    /// Percentage damage bonus.
    DamageBoost,
    /// Percentage attack speed bonus.
    SpeedBoost,
    /// Flat accuracy bonus.
    AccuracyBoost,
    /// Flat critical chance bonus.
    CriticalBoost,
    /// First class-specific skill.
    Special1,
    /// Second class-specific skill.
    Special2,
    /// Third class-specific skill.
    Special3,
}

impl SkillSlot {
    /// Every slot in tree order.
    pub const ALL: [SkillSlot; 7] = [
        SkillSlot::DamageBoost,
        SkillSlot::SpeedBoost,
        SkillSlot::AccuracyBoost,
        SkillSlot::CriticalBoost,
        SkillSlot::Special1,
        SkillSlot::Special2,
        SkillSlot::Special3,
    ];

    /// The three class-specific slots.
    pub const SPECIALS: [SkillSlot; 3] =
        [SkillSlot::Special1, SkillSlot::Special2, SkillSlot::Special3];

    /// Reports whether the slot holds a class-specific skill.
    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(self, Self::Special1 | Self::Special2 | Self::Special3)
    }

    const fn index(self) -> usize {
        match self {
            Self::DamageBoost => 0,
            Self::SpeedBoost => 1,
            Self::AccuracyBoost => 2,
            Self::CriticalBoost => 3,
            Self::Special1 => 4,
            Self::Special2 => 5,
            Self::Special3 => 6,
        }
    }
}

/// Closed set of skills known to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    /// +10% damage per level.
    DamageBoost,
    /// +15% attack speed per level.
    SpeedBoost,
    /// +15 accuracy per level.
    AccuracyBoost,
    /// +8 critical chance per level.
    CriticalBoost,
    /// Archer: +1 target per level.
    MultiShot,
    /// Archer: hits slow by 10% per level.
    PiercingShot,
    /// Archer: 15% burn chance per level.
    FireArrow,
    /// Warrior: 10% double strike chance per level.
    Whirlwind,
    /// Warrior: +25% damage per level against wounded targets.
    Devastation,
    /// Warrior: +15% stun chance.
    ShieldBash,
    /// Mage: +1 burn damage and +1s burn duration per level.
    Pyromancer,
    /// Mage: +1 maximum range per level.
    MagicShield,
    /// Mage: periodic freezing storm.
    Blizzard,
}

impl SkillKind {
    /// Resolves the skill stored in a slot for the provided class.
    #[must_use]
    pub const fn for_slot(class: HeroClass, slot: SkillSlot) -> Self {
        match (slot, class) {
            (SkillSlot::DamageBoost, _) => Self::DamageBoost,
            (SkillSlot::SpeedBoost, _) => Self::SpeedBoost,
            (SkillSlot::AccuracyBoost, _) => Self::AccuracyBoost,
            (SkillSlot::CriticalBoost, _) => Self::CriticalBoost,
            (SkillSlot::Special1, HeroClass::Archer) => Self::MultiShot,
            (SkillSlot::Special2, HeroClass::Archer) => Self::PiercingShot,
            (SkillSlot::Special3, HeroClass::Archer) => Self::FireArrow,
            (SkillSlot::Special1, HeroClass::Warrior) => Self::Whirlwind,
            (SkillSlot::Special2, HeroClass::Warrior) => Self::Devastation,
            (SkillSlot::Special3, HeroClass::Warrior) => Self::ShieldBash,
            (SkillSlot::Special1, HeroClass::Mage) => Self::Pyromancer,
            (SkillSlot::Special2, HeroClass::Mage) => Self::MagicShield,
            (SkillSlot::Special3, HeroClass::Mage) => Self::Blizzard,
        }
    }

    /// Magnitude of the skill at the provided level.
    ///
    /// Percentages are whole percent values, target and range bonuses are
    /// counts.
    #[must_use]
    pub const fn magnitude(self, level: u32) -> u32 {
        match self {
            Self::DamageBoost => level.saturating_mul(10),
            Self::SpeedBoost => level.saturating_mul(15),
            Self::AccuracyBoost => level.saturating_mul(15),
            Self::CriticalBoost => level.saturating_mul(8),
            Self::MultiShot => level,
            Self::PiercingShot => level.saturating_mul(10),
            Self::FireArrow => level.saturating_mul(15),
            Self::Whirlwind => level.saturating_mul(10),
            Self::Devastation => level.saturating_mul(25),
            Self::ShieldBash => {
                if level > 0 {
                    15
                } else {
                    0
                }
            }
            Self::Pyromancer => level,
            Self::MagicShield => level,
            Self::Blizzard => level,
        }
    }

    /// [`SkillKind::magnitude`] as a float, for percentage rolls.
    #[must_use]
    pub fn effect(self, level: u32) -> f32 {
        self.magnitude(level) as f32
    }
}

/// Levels reached by each slot of a hero's skill tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLevels {
    levels: [u32; 7],
}

impl SkillLevels {
    /// Level of the provided slot.
    #[must_use]
    pub const fn level(&self, slot: SkillSlot) -> u32 {
        self.levels[slot.index()]
    }

    /// Raises the slot by one level and returns the new level.
    ///
    /// Callers are responsible for enforcing maximum levels and the special
    /// skill lock before calling this.
    pub fn raise(&mut self, slot: SkillSlot) -> u32 {
        let level = &mut self.levels[slot.index()];
        *level = level.saturating_add(1);
        *level
    }

    /// Number of special slots raised above level zero.
    #[must_use]
    pub fn raised_specials(&self) -> usize {
        SkillSlot::SPECIALS
            .into_iter()
            .filter(|slot| self.level(*slot) > 0)
            .count()
    }

    /// Reports whether raising `slot` would break the two-of-three special
    /// skill limit.
    ///
    /// Specials that already have a level keep leveling even once two are
    /// raised.
    #[must_use]
    pub fn special_lock_engaged(&self, slot: SkillSlot) -> bool {
        slot.is_special() && self.level(slot) == 0 && self.raised_specials() >= 2
    }

    /// Iterator over every slot paired with its level.
    pub fn iter(&self) -> impl Iterator<Item = (SkillSlot, u32)> + '_ {
        SkillSlot::ALL
            .into_iter()
            .map(move |slot| (slot, self.level(slot)))
    }
}
