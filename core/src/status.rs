//! Status-effect record carried by every enemy.
//!
//! Each kind owns one optional slot. Applying an effect of a kind that is
//! already present overwrites its magnitude, duration, and start time; kinds
//! never interact with each other.

use std::time::Duration;

use crate::HeroId;

const BURN_TICK: Duration = Duration::from_secs(1);

/// Kinds of status effect an enemy can suffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusKind {
    /// Periodic damage once per second.
    Burning,
    /// Percentage movement speed reduction.
    Slowed,
    /// Movement halted by a shield bash.
    Stunned,
    /// Movement halted by a blizzard.
    Frozen,
}

/// Damage over time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Burning {
    /// Damage dealt at every whole second boundary.
    pub damage_per_second: u32,
    /// Total lifetime of the effect.
    pub duration: Duration,
    /// Simulation time the effect was applied.
    pub started_at: Duration,
    /// Number of second boundaries already dealt.
    pub ticks_applied: u32,
    /// Hero credited when the burn kills.
    pub source: Option<HeroId>,
}

impl Burning {
    /// Second boundaries that elapsed since the effect started, capped by the
    /// effect duration.
    #[must_use]
    pub fn ticks_due(&self, now: Duration) -> u32 {
        let elapsed = now.saturating_sub(self.started_at).min(self.duration);
        u32::try_from(elapsed.as_millis() / BURN_TICK.as_millis()).unwrap_or(u32::MAX)
    }

    /// Reports whether the effect outlived its duration at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Duration) -> bool {
        now.saturating_sub(self.started_at) >= self.duration
    }
}

/// Movement speed reduction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slowed {
    /// Reduction in percent of the base speed.
    pub percent: f32,
    /// Total lifetime of the effect.
    pub duration: Duration,
    /// Simulation time the effect was applied.
    pub started_at: Duration,
}

impl Slowed {
    /// Reports whether the effect outlived its duration at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Duration) -> bool {
        now.saturating_sub(self.started_at) >= self.duration
    }
}

/// Movement halt shared by stuns and freezes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Immobilized {
    /// Total lifetime of the effect.
    pub duration: Duration,
    /// Simulation time the effect was applied.
    pub started_at: Duration,
}

impl Immobilized {
    /// Reports whether the effect outlived its duration at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Duration) -> bool {
        now.saturating_sub(self.started_at) >= self.duration
    }
}

/// Status effect requested by a strike, stamped with its start time on
/// application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Affliction {
    /// Damage over time credited to `source`.
    Burning {
        /// Damage dealt at every whole second boundary.
        damage_per_second: u32,
        /// Total lifetime of the effect.
        duration: Duration,
        /// Hero credited when the burn kills.
        source: Option<HeroId>,
    },
    /// Movement speed reduction.
    Slowed {
        /// Reduction in percent of the base speed.
        percent: f32,
        /// Total lifetime of the effect.
        duration: Duration,
    },
    /// Shield bash stun.
    Stunned {
        /// Total lifetime of the effect.
        duration: Duration,
    },
    /// Blizzard freeze.
    Frozen {
        /// Total lifetime of the effect.
        duration: Duration,
    },
}

impl Affliction {
    /// Kind of status slot the affliction occupies.
    #[must_use]
    pub const fn kind(&self) -> StatusKind {
        match self {
            Self::Burning { .. } => StatusKind::Burning,
            Self::Slowed { .. } => StatusKind::Slowed,
            Self::Stunned { .. } => StatusKind::Stunned,
            Self::Frozen { .. } => StatusKind::Frozen,
        }
    }
}

/// Optional slot per status kind.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatusEffects {
    /// Active burn.
    pub burning: Option<Burning>,
    /// Active slow.
    pub slowed: Option<Slowed>,
    /// Active stun.
    pub stunned: Option<Immobilized>,
    /// Active freeze.
    pub frozen: Option<Immobilized>,
}

impl StatusEffects {
    /// Sets the enemy on fire, replacing any previous burn.
    pub fn apply_burning(
        &mut self,
        damage_per_second: u32,
        duration: Duration,
        now: Duration,
        source: Option<HeroId>,
    ) {
        self.burning = Some(Burning {
            damage_per_second,
            duration,
            started_at: now,
            ticks_applied: 0,
            source,
        });
    }

    /// Slows the enemy, replacing any previous slow.
    pub fn apply_slow(&mut self, percent: f32, duration: Duration, now: Duration) {
        self.slowed = Some(Slowed {
            percent,
            duration,
            started_at: now,
        });
    }

    /// Stuns the enemy, replacing any previous stun.
    pub fn apply_stun(&mut self, duration: Duration, now: Duration) {
        self.stunned = Some(Immobilized {
            duration,
            started_at: now,
        });
    }

    /// Freezes the enemy, replacing any previous freeze.
    pub fn apply_freeze(&mut self, duration: Duration, now: Duration) {
        self.frozen = Some(Immobilized {
            duration,
            started_at: now,
        });
    }

    /// Reports whether a stun or freeze is active.
    #[must_use]
    pub const fn is_immobilized(&self) -> bool {
        self.stunned.is_some() || self.frozen.is_some()
    }

    /// Active slow in percent, or zero.
    #[must_use]
    pub fn slow_percent(&self) -> f32 {
        self.slowed.map_or(0.0, |slow| slow.percent)
    }

    /// Applies an affliction at `now`, replacing the effect of the same kind.
    pub fn afflict(&mut self, affliction: Affliction, now: Duration) {
        match affliction {
            Affliction::Burning {
                damage_per_second,
                duration,
                source,
            } => self.apply_burning(damage_per_second, duration, now, source),
            Affliction::Slowed { percent, duration } => self.apply_slow(percent, duration, now),
            Affliction::Stunned { duration } => self.apply_stun(duration, now),
            Affliction::Frozen { duration } => self.apply_freeze(duration, now),
        }
    }

    /// Removes the effect of the kind, returning whether one was active.
    pub fn clear(&mut self, kind: StatusKind) -> bool {
        match kind {
            StatusKind::Burning => self.burning.take().is_some(),
            StatusKind::Slowed => self.slowed.take().is_some(),
            StatusKind::Stunned => self.stunned.take().is_some(),
            StatusKind::Frozen => self.frozen.take().is_some(),
        }
    }

    /// Reports whether no effect is active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.burning.is_none()
            && self.slowed.is_none()
            && self.stunned.is_none()
            && self.frozen.is_none()
    }
}
