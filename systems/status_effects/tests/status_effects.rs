use std::{sync::Arc, time::Duration};

use hero_defence_core::{CellCoord, Command, Enemy, EnemyId, HeroId, StatusKind};
use hero_defence_system_status_effects::StatusProcessor;

const STEP: Duration = Duration::from_millis(50);

fn enemy_with_health(health: u32) -> Enemy {
    let path: Arc<[CellCoord]> = Arc::from(vec![
        CellCoord::new(0, 5),
        CellCoord::new(1, 5),
        CellCoord::new(2, 5),
    ]);
    Enemy::spawn(EnemyId::new(7), "orc".into(), health, 0.6, 0, path).expect("path")
}

/// Applies the queued commands the way the world does for a single enemy.
fn apply(enemy: &mut Enemy, commands: &[Command]) {
    for command in commands {
        match *command {
            Command::BurnEnemy {
                damage,
                ticks_applied,
                ..
            } => {
                if let Some(burning) = enemy.effects.burning.as_mut() {
                    burning.ticks_applied = ticks_applied;
                }
                let _ = enemy.take_damage(damage);
            }
            Command::ExpireStatus { kind, .. } => {
                let _ = enemy.effects.clear(kind);
            }
            _ => panic!("unexpected command {command:?}"),
        }
    }
}

/// Runs the processor every 50ms from `from` through `until`.
fn run(enemy: &mut Enemy, from: Duration, until: Duration) -> Vec<Command> {
    let mut processor = StatusProcessor::new();
    let mut queued = Vec::new();
    let mut now = from;
    while now <= until {
        let mut out = Vec::new();
        processor.handle(std::slice::from_ref(enemy), now, &mut out);
        apply(enemy, &out);
        queued.extend(out);
        now += STEP;
    }
    queued
}

fn burn_damage(commands: &[Command]) -> Vec<u32> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::BurnEnemy { damage, .. } => Some(*damage),
            _ => None,
        })
        .collect()
}

#[test]
fn three_second_burn_deals_exactly_three_ticks() {
    let mut enemy = enemy_with_health(100);
    enemy
        .effects
        .apply_burning(2, Duration::from_secs(3), Duration::from_millis(100), None);

    let queued = run(&mut enemy, Duration::from_millis(100), Duration::from_secs(10));

    assert_eq!(burn_damage(&queued), vec![2, 2, 2]);
    assert_eq!(enemy.health, 94);
    assert!(enemy.effects.burning.is_none());
    assert!(queued.contains(&Command::ExpireStatus {
        enemy: EnemyId::new(7),
        kind: StatusKind::Burning,
    }));
}

#[test]
fn effects_expire_once_their_duration_elapsed() {
    let mut enemy = enemy_with_health(100);
    let applied = Duration::from_secs(1);
    enemy
        .effects
        .apply_slow(30.0, Duration::from_secs(2), applied);
    enemy.effects.apply_stun(Duration::from_secs(1), applied);

    let mut processor = StatusProcessor::new();
    let mut queued = Vec::new();
    for now in [
        Duration::from_millis(1950),
        Duration::from_secs(2),
        Duration::from_secs(3),
    ] {
        let mut out = Vec::new();
        processor.handle(std::slice::from_ref(&enemy), now, &mut out);
        apply(&mut enemy, &out);
        queued.extend(out);
    }

    assert!(enemy.effects.is_empty());
    assert_eq!(
        queued,
        vec![
            Command::ExpireStatus {
                enemy: EnemyId::new(7),
                kind: StatusKind::Stunned,
            },
            Command::ExpireStatus {
                enemy: EnemyId::new(7),
                kind: StatusKind::Slowed,
            },
        ]
    );
}

#[test]
fn fatal_burn_stops_further_processing() {
    let mut enemy = enemy_with_health(5);
    enemy.effects.apply_burning(
        4,
        Duration::from_secs(4),
        Duration::ZERO,
        Some(HeroId::new(3)),
    );

    let queued = run(&mut enemy, Duration::ZERO, Duration::from_secs(4));

    assert_eq!(burn_damage(&queued), vec![4, 4]);
    assert_eq!(enemy.health, 0);
    assert_eq!(
        enemy.effects.burning.and_then(|burning| burning.source),
        Some(HeroId::new(3))
    );
}

#[test]
fn reapplied_burn_restarts_its_tick_count() {
    let mut enemy = enemy_with_health(100);
    enemy
        .effects
        .apply_burning(4, Duration::from_secs(4), Duration::ZERO, None);
    let _ = run(&mut enemy, Duration::ZERO, Duration::from_millis(2000));
    assert_eq!(enemy.health, 92);

    enemy
        .effects
        .apply_burning(4, Duration::from_secs(4), Duration::from_millis(2000), None);
    let queued = run(
        &mut enemy,
        Duration::from_millis(2050),
        Duration::from_secs(10),
    );
    assert_eq!(burn_damage(&queued).iter().sum::<u32>(), 16);
    assert_eq!(enemy.health, 76);
}
