#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that ages enemy status effects and queues burning damage.
//!
//! Burning damage is counted from the number of whole seconds elapsed since
//! the burn started, so the outcome does not depend on how often the
//! processor runs. A burn lasting `n` seconds deals exactly `n` ticks.

use std::time::Duration;

use hero_defence_core::{Command, Enemy, StatusKind};

/// Status-effect processor driven by the field tick.
#[derive(Debug, Default)]
pub struct StatusProcessor;

impl StatusProcessor {
    /// Creates a new processor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Queues due burning damage and the removal of expired effects.
    ///
    /// An enemy the queued burn kills has nothing else queued; the world
    /// credits the kill when it applies the burn.
    pub fn handle(&mut self, enemies: &[Enemy], now: Duration, out: &mut Vec<Command>) {
        for enemy in enemies.iter().filter(|enemy| enemy.is_alive()) {
            if burn(enemy, now, out) {
                continue;
            }
            expire(enemy, now, out);
        }
    }
}

/// Queues outstanding burn ticks; returns `true` when they are fatal.
fn burn(enemy: &Enemy, now: Duration, out: &mut Vec<Command>) -> bool {
    let Some(burning) = enemy.effects.burning else {
        return false;
    };
    let due = burning.ticks_due(now);
    if due <= burning.ticks_applied {
        return false;
    }
    let damage = burning
        .damage_per_second
        .saturating_mul(due - burning.ticks_applied);
    out.push(Command::BurnEnemy {
        enemy: enemy.id,
        damage,
        ticks_applied: due,
    });
    damage >= enemy.health
}

fn expire(enemy: &Enemy, now: Duration, out: &mut Vec<Command>) {
    let effects = &enemy.effects;
    let expired = [
        (
            StatusKind::Burning,
            effects.burning.is_some_and(|effect| effect.is_expired(now)),
        ),
        (
            StatusKind::Slowed,
            effects.slowed.is_some_and(|effect| effect.is_expired(now)),
        ),
        (
            StatusKind::Stunned,
            effects.stunned.is_some_and(|effect| effect.is_expired(now)),
        ),
        (
            StatusKind::Frozen,
            effects.frozen.is_some_and(|effect| effect.is_expired(now)),
        ),
    ];
    for (kind, _) in expired.into_iter().filter(|(_, expired)| *expired) {
        out.push(Command::ExpireStatus {
            enemy: enemy.id,
            kind,
        });
    }
}
