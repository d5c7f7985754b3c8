//! Built-in tables shipped with the engine.

use hero_defence_core::{
    AttackConfig, AttackKind, AttackShape, CellCoord, EnemyTypeId, HeroClass, HeroStats,
    SkillKind, Tier,
};

use crate::{EnemyArchetype, HeroArchetype, RosterBand, RosterWeight, SkillDefinition};

pub(crate) fn heroes() -> [HeroArchetype; 3] {
    [
        HeroArchetype {
            class: HeroClass::Archer,
            name: "Archer".to_owned(),
            cost: 50,
            stats: HeroStats {
                damage: 5,
                attack_speed: 3.0,
                accuracy: 70.0,
                critical_chance: 35.0,
            },
            attack: AttackConfig {
                kind: AttackKind::Single,
                shape: AttackShape::Diamond,
                min_range: 3,
                max_range: 3,
                max_targets: 1,
                aoe_radius: None,
            },
        },
        HeroArchetype {
            class: HeroClass::Warrior,
            name: "Warrior".to_owned(),
            cost: 75,
            stats: HeroStats {
                damage: 8,
                attack_speed: 2.0,
                accuracy: 85.0,
                critical_chance: 20.0,
            },
            attack: AttackConfig {
                kind: AttackKind::Single,
                shape: AttackShape::Line,
                min_range: 1,
                max_range: 1,
                max_targets: 2,
                aoe_radius: None,
            },
        },
        HeroArchetype {
            class: HeroClass::Mage,
            name: "Mage".to_owned(),
            cost: 100,
            stats: HeroStats {
                damage: 12,
                attack_speed: 0.8,
                accuracy: 60.0,
                critical_chance: 5.0,
            },
            attack: AttackConfig {
                kind: AttackKind::Area,
                shape: AttackShape::Square,
                min_range: 1,
                max_range: 1,
                max_targets: 3,
                aoe_radius: Some(2),
            },
        },
    ]
}

fn skill(kind: SkillKind, name: &str, max_level: u32, gold_cost: u32) -> SkillDefinition {
    SkillDefinition {
        kind,
        name: name.to_owned(),
        point_cost: 1,
        gold_cost,
        max_level,
    }
}

pub(crate) fn skills() -> Vec<SkillDefinition> {
    vec![
        skill(SkillKind::DamageBoost, "Strength", 5, 20),
        skill(SkillKind::SpeedBoost, "Celerity", 5, 20),
        skill(SkillKind::AccuracyBoost, "Precision", 3, 50),
        skill(SkillKind::CriticalBoost, "Critical", 3, 50),
        skill(SkillKind::MultiShot, "Multi Shot", 3, 250),
        skill(SkillKind::PiercingShot, "Piercing Shot", 3, 250),
        skill(SkillKind::FireArrow, "Fire Arrow", 2, 500),
        skill(SkillKind::Whirlwind, "Whirlwind", 3, 250),
        skill(SkillKind::Devastation, "Devastation", 2, 500),
        skill(SkillKind::ShieldBash, "Shield Bash", 1, 1000),
        skill(SkillKind::Pyromancer, "Pyromancer", 3, 250),
        skill(SkillKind::MagicShield, "Magic Shield", 2, 500),
        skill(SkillKind::Blizzard, "Blizzard", 1, 1000),
    ]
}

fn enemy(id: &str, name: &str, health: u32, speed: f32, gold: u32, tier: Tier) -> EnemyArchetype {
    EnemyArchetype {
        id: EnemyTypeId::from(id),
        name: name.to_owned(),
        health,
        speed,
        gold_reward: gold,
        tier,
    }
}

pub(crate) fn enemies() -> Vec<EnemyArchetype> {
    vec![
        enemy("goblin", "Goblin", 50, 0.8, 5, Tier::D),
        enemy("skeleton", "Skeleton", 75, 0.7, 8, Tier::D),
        enemy("orc", "Orc", 100, 0.6, 10, Tier::C),
        enemy("troll", "Troll", 200, 0.4, 20, Tier::B),
        enemy("demon", "Demon", 150, 0.9, 15, Tier::B),
        enemy("dragon", "Dragon", 300, 0.5, 30, Tier::A),
    ]
}

const MAIN_PATH: [(u32, u32); 20] = [
    (0, 5),
    (1, 5),
    (2, 5),
    (3, 5),
    (3, 4),
    (3, 3),
    (3, 2),
    (4, 2),
    (5, 2),
    (6, 2),
    (6, 3),
    (6, 4),
    (6, 5),
    (6, 6),
    (6, 7),
    (6, 8),
    (7, 8),
    (8, 8),
    (9, 8),
    (10, 8),
];

pub(crate) fn paths() -> Vec<Vec<CellCoord>> {
    vec![MAIN_PATH
        .iter()
        .map(|&(column, row)| CellCoord::new(column, row))
        .collect()]
}

// "ogre" has no archetype; those entries are dropped when spawned.
const WAVES: [&[&str]; 10] = [
    &["goblin", "goblin", "goblin", "goblin", "goblin"],
    &["goblin", "goblin", "orc", "goblin", "goblin", "orc"],
    &["goblin", "orc", "goblin", "orc", "goblin", "orc", "goblin"],
    &["orc", "orc", "goblin", "orc", "troll", "orc", "goblin", "orc"],
    &["orc", "troll", "orc", "orc", "troll", "orc", "troll", "orc", "orc"],
    &[
        "troll", "orc", "troll", "troll", "orc", "troll", "ogre", "troll", "orc", "troll",
    ],
    &[
        "troll", "troll", "ogre", "troll", "ogre", "troll", "ogre", "troll", "troll", "ogre",
    ],
    &[
        "ogre", "troll", "ogre", "ogre", "troll", "ogre", "ogre", "troll", "ogre", "ogre", "troll",
    ],
    &[
        "ogre", "ogre", "ogre", "demon", "ogre", "ogre", "demon", "ogre", "ogre", "ogre", "demon",
    ],
    &[
        "demon", "ogre", "demon", "demon", "ogre", "demon", "dragon", "demon", "ogre", "demon",
        "demon", "dragon",
    ],
];

pub(crate) fn waves() -> Vec<Vec<EnemyTypeId>> {
    WAVES
        .iter()
        .map(|wave| wave.iter().map(|&id| EnemyTypeId::from(id)).collect())
        .collect()
}

fn band(up_to: Option<u32>, weights: &[(&str, f32)]) -> RosterBand {
    RosterBand {
        up_to,
        weights: weights
            .iter()
            .map(|&(enemy, weight)| RosterWeight {
                enemy: EnemyTypeId::from(enemy),
                weight,
            })
            .collect(),
    }
}

pub(crate) fn roster() -> Vec<RosterBand> {
    vec![
        band(Some(2), &[("goblin", 0.8), ("skeleton", 0.2)]),
        band(Some(5), &[("goblin", 0.4), ("skeleton", 0.3), ("orc", 0.3)]),
        band(
            Some(10),
            &[("orc", 0.3), ("skeleton", 0.3), ("troll", 0.2), ("demon", 0.2)],
        ),
        band(
            None,
            &[
                ("orc", 0.15),
                ("troll", 0.2),
                ("demon", 0.2),
                ("skeleton", 0.2),
                ("dragon", 0.25),
            ],
        ),
    ]
}
