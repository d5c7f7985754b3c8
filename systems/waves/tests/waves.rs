use hero_defence_catalog::Catalog;
use hero_defence_core::{EnemyId, EnemyTypeId, LookupError, ScriptedRandom, SeededRandom};
use hero_defence_system_waves::{compose_wave, spawn_enemy, wave_size, SpawnOrder};

#[test]
fn predefined_waves_are_used_verbatim() {
    let catalog = Catalog::standard();
    let mut rng = ScriptedRandom::always(0.5);

    let first = compose_wave(&catalog, 1, &mut rng);
    assert_eq!(first.len(), 5);
    assert!(first
        .iter()
        .all(|order| order.enemy.as_str() == "goblin" && order.path_index == 0));

    let sixth = compose_wave(&catalog, 6, &mut rng);
    assert_eq!(sixth.len(), 10);
    assert_eq!(sixth[6].enemy, EnemyTypeId::from("ogre"));
    assert_eq!(rng.consumed(), 0);
}

#[test]
fn generated_waves_follow_the_roster_band() {
    let catalog = Catalog::standard();
    // Band past wave ten: orc .15, troll .2, demon .2, skeleton .2, dragon .25.
    let mut rng = ScriptedRandom::new(vec![0.0, 0.2, 0.5, 0.7, 0.99]);

    let wave = compose_wave(&catalog, 11, &mut rng);
    assert_eq!(wave.len(), wave_size(11) as usize);
    let kinds: Vec<&str> = wave
        .iter()
        .take(5)
        .map(|order| order.enemy.as_str())
        .collect();
    assert_eq!(kinds, ["orc", "troll", "demon", "skeleton", "dragon"]);
    assert_eq!(rng.consumed(), 19);
}

#[test]
fn generation_is_deterministic_for_a_seed() {
    let catalog = Catalog::standard();
    let first = compose_wave(&catalog, 14, &mut SeededRandom::new(7));
    let second = compose_wave(&catalog, 14, &mut SeededRandom::new(7));
    assert_eq!(first, second);
    assert_eq!(first.len(), 20);
}

#[test]
fn spawned_enemy_starts_on_the_first_path_cell() {
    let catalog = Catalog::standard();
    let order = SpawnOrder {
        enemy: "troll".into(),
        path_index: 0,
    };
    let enemy = spawn_enemy(&catalog, &order, EnemyId::new(9)).expect("troll spawns");
    assert_eq!(enemy.health, 200);
    assert_eq!(enemy.max_health, 200);
    assert_eq!(enemy.segment, 0);
    assert_eq!(enemy.cell().map(|cell| (cell.column(), cell.row())), Some((0, 5)));
}

#[test]
fn unknown_spawn_data_is_reported() {
    let catalog = Catalog::standard();
    let ogre = SpawnOrder {
        enemy: "ogre".into(),
        path_index: 0,
    };
    assert_eq!(
        spawn_enemy(&catalog, &ogre, EnemyId::new(1)).map(|enemy| enemy.id),
        Err(LookupError::UnknownEnemy("ogre".into()))
    );

    let stray = SpawnOrder {
        enemy: "goblin".into(),
        path_index: 3,
    };
    assert_eq!(
        spawn_enemy(&catalog, &stray, EnemyId::new(2)).map(|enemy| enemy.id),
        Err(LookupError::UnknownPath(3))
    );
}
