#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that walks enemies along their fixed paths.

use std::time::Duration;

use hero_defence_core::{CellPoint, Command, Enemy};

/// Distance below which an enemy snaps onto the next path cell.
pub const SNAP_TOLERANCE: f32 = 0.05;

/// Segments shorter than this are skipped instantly.
const DEGENERATE_SEGMENT: f32 = 0.01;

/// Result of advancing a single enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementStep {
    /// Position after the step.
    pub position: CellPoint,
    /// Index of the path cell most recently reached.
    pub segment: usize,
    /// Whether the enemy stands on the last path cell.
    pub reached_end: bool,
}

/// Speed of the enemy in cells per second once slows are applied.
///
/// Stuns and freezes are not folded in here; [`advance`] checks them.
#[must_use]
pub fn effective_speed(enemy: &Enemy) -> f32 {
    let factor = (1.0 - enemy.effects.slow_percent() / 100.0).max(0.0);
    enemy.base_speed * factor
}

/// Advances the enemy toward the next cell of its path.
///
/// Immobilized enemies stay in place. The enemy snaps exactly onto the next
/// cell when it lands within [`SNAP_TOLERANCE`] of it or would overshoot it,
/// advancing by at most one segment per step.
#[must_use]
pub fn advance(enemy: &Enemy, elapsed: Duration, speed: f32) -> MovementStep {
    let unchanged = MovementStep {
        position: enemy.position,
        segment: enemy.segment,
        reached_end: false,
    };
    if enemy.effects.is_immobilized() {
        return unchanged;
    }

    let last = enemy.path.len().saturating_sub(1);
    let (Some(start), Some(next)) = (
        enemy.path.get(enemy.segment).copied(),
        enemy.path.get(enemy.segment + 1).copied(),
    ) else {
        return MovementStep {
            reached_end: true,
            ..unchanged
        };
    };
    let (start, next) = (start.to_point(), next.to_point());
    let snapped = MovementStep {
        position: next,
        segment: enemy.segment + 1,
        reached_end: enemy.segment + 1 >= last,
    };

    let length = start.distance(next);
    if length < DEGENERATE_SEGMENT {
        return snapped;
    }

    let travel = speed.max(0.0) * elapsed.as_secs_f32();
    let column = enemy.position.column() + (next.column() - start.column()) / length * travel;
    let row = enemy.position.row() + (next.row() - start.row()) / length * travel;
    let moved = CellPoint::new(column, row);

    if moved.distance(next) < SNAP_TOLERANCE || moved.distance(start) >= length {
        return snapped;
    }

    MovementStep {
        position: moved,
        ..unchanged
    }
}

/// Movement system driven by the field tick.
#[derive(Debug, Default)]
pub struct Movement;

impl Movement {
    /// Creates a new movement system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Queues the steps of every living enemy over `elapsed` simulated time.
    ///
    /// Enemies that stand still queue nothing. Enemies that reached the end
    /// of their path queue an escape after their final step.
    pub fn handle(&mut self, enemies: &[Enemy], elapsed: Duration, out: &mut Vec<Command>) {
        for enemy in enemies.iter().filter(|enemy| enemy.is_alive()) {
            let step = advance(enemy, elapsed, effective_speed(enemy));
            if step.position != enemy.position || step.segment != enemy.segment {
                out.push(Command::StepEnemy {
                    enemy: enemy.id,
                    position: step.position,
                    segment: step.segment,
                });
            }
            if step.reached_end {
                out.push(Command::EscapeEnemy { enemy: enemy.id });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use hero_defence_core::{CellCoord, EnemyId};

    fn walker(speed: f32) -> Enemy {
        let path: Arc<[CellCoord]> = Arc::from(vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(1, 1),
        ]);
        Enemy::spawn(EnemyId::new(1), "goblin".into(), 50, speed, 0, path).expect("path")
    }

    #[test]
    fn slow_scales_base_speed() {
        let mut enemy = walker(0.8);
        enemy
            .effects
            .apply_slow(25.0, Duration::from_secs(2), Duration::ZERO);
        assert!((effective_speed(&enemy) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn partial_step_stays_on_segment() {
        let enemy = walker(1.0);
        let step = advance(&enemy, Duration::from_millis(500), 1.0);
        assert_eq!(step.segment, 0);
        assert!(!step.reached_end);
        assert!((step.position.column() - 0.5).abs() < 1e-6);
        assert_eq!(step.position.row(), 0.0);
    }

    #[test]
    fn degenerate_segment_is_skipped() {
        let path: Arc<[CellCoord]> = Arc::from(vec![
            CellCoord::new(2, 2),
            CellCoord::new(2, 2),
            CellCoord::new(3, 2),
        ]);
        let enemy = Enemy::spawn(EnemyId::new(1), "goblin".into(), 50, 1.0, 0, path).expect("path");
        let step = advance(&enemy, Duration::ZERO, 1.0);
        assert_eq!(step.segment, 1);
        assert!(!step.reached_end);
    }
}
