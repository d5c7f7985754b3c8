//! Fixed-interval scheduling of the field and combat ticks.

use std::time::Duration;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Periodic phase run by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Phase {
    /// Status effects, spawning, movement, and wave bookkeeping.
    Field,
    /// Hero attacks and progression.
    Combat,
}

/// Phase due at an offset inside the advanced delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Firing {
    pub(crate) offset: Duration,
    pub(crate) phase: Phase,
}

#[derive(Debug)]
struct Cadence {
    interval: Duration,
    elapsed: Duration,
}

impl Cadence {
    fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            elapsed: Duration::ZERO,
        }
    }

    fn firings(&mut self, dt: Duration, phase: Phase, out: &mut Vec<Firing>) {
        let mut offset = self.interval - self.elapsed;
        while offset <= dt {
            out.push(Firing { offset, phase });
            offset += self.interval;
        }
        let carried = self.elapsed + dt;
        self.elapsed = Duration::from_nanos(
            (carried.as_nanos() % self.interval.as_nanos()) as u64,
        );
    }
}

/// Accumulates simulated time and reports which phases fall due.
#[derive(Debug)]
pub(crate) struct TickScheduler {
    field: Cadence,
    combat: Cadence,
}

impl TickScheduler {
    pub(crate) fn new(field_interval: Duration, combat_interval: Duration) -> Self {
        Self {
            field: Cadence::new(field_interval),
            combat: Cadence::new(combat_interval),
        }
    }

    /// Fills `out` with the phases due within `dt`, ordered by offset.
    ///
    /// Phases falling due at the same instant run field first. The phases
    /// never overlap; each one runs to completion before the next.
    pub(crate) fn advance(&mut self, dt: Duration, out: &mut Vec<Firing>) {
        out.clear();
        self.field.firings(dt, Phase::Field, out);
        self.combat.firings(dt, Phase::Combat, out);
        out.sort_by_key(|firing| (firing.offset, firing.phase));
    }
}
