use hero_defence_core::{AttackConfig, AttackKind, AttackShape, CellCoord, DEFAULT_GRID_SIZE};
use hero_defence_system_geometry::{area_tiles, contains, valid_range_tiles};

fn footprint(shape: AttackShape, min_range: u32, max_range: u32) -> AttackConfig {
    AttackConfig {
        kind: AttackKind::Single,
        shape,
        min_range,
        max_range,
        max_targets: 1,
        aoe_radius: None,
    }
}

const CENTER: CellCoord = CellCoord::new(5, 5);

#[test]
fn archer_diamond_is_a_ring_at_exact_distance() {
    let archer = footprint(AttackShape::Diamond, 3, 3);
    let tiles = valid_range_tiles(CENTER, &archer, DEFAULT_GRID_SIZE);
    assert_eq!(tiles.len(), 12);
    assert!(tiles.iter().all(|c| c.manhattan_distance(CENTER) == 3));
    assert!(tiles.contains(&CellCoord::new(5, 2)));
    assert!(tiles.contains(&CellCoord::new(6, 7)));
    assert!(!tiles.contains(&CellCoord::new(5, 4)));
}

#[test]
fn warrior_line_reaches_orthogonal_neighbours() {
    let tiles = valid_range_tiles(CENTER, &footprint(AttackShape::Line, 1, 1), DEFAULT_GRID_SIZE);
    let expected = [
        CellCoord::new(4, 5),
        CellCoord::new(5, 4),
        CellCoord::new(5, 6),
        CellCoord::new(6, 5),
    ];
    assert_eq!(tiles.into_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn mage_square_includes_diagonals() {
    let tiles = valid_range_tiles(CENTER, &footprint(AttackShape::Square, 1, 1), DEFAULT_GRID_SIZE);
    assert_eq!(tiles.len(), 8);
    assert!(tiles.contains(&CellCoord::new(4, 4)));
    assert!(tiles.contains(&CellCoord::new(6, 6)));
}

#[test]
fn square_band_excludes_inner_ring() {
    let tiles = valid_range_tiles(CENTER, &footprint(AttackShape::Square, 2, 2), DEFAULT_GRID_SIZE);
    assert_eq!(tiles.len(), 16);
    assert!(!tiles.contains(&CellCoord::new(6, 6)));
    assert!(tiles.contains(&CellCoord::new(7, 7)));
}

#[test]
fn cross_keeps_diagonals_only() {
    let tiles = valid_range_tiles(CENTER, &footprint(AttackShape::Cross, 1, 4), DEFAULT_GRID_SIZE);
    assert_eq!(tiles.len(), 8);
    assert!(tiles.contains(&CellCoord::new(3, 3)));
    assert!(tiles.contains(&CellCoord::new(7, 3)));
    assert!(!tiles.contains(&CellCoord::new(5, 4)));
}

#[test]
fn plus_keeps_row_and_column() {
    let tiles = valid_range_tiles(CENTER, &footprint(AttackShape::Plus, 1, 2), DEFAULT_GRID_SIZE);
    assert_eq!(tiles.len(), 8);
    assert!(tiles.iter().all(|c| c.column() == 5 || c.row() == 5));
}

#[test]
fn footprint_is_clipped_by_grid_edges() {
    let corner = CellCoord::new(0, 0);
    let archer = footprint(AttackShape::Diamond, 3, 3);
    let tiles = valid_range_tiles(corner, &archer, DEFAULT_GRID_SIZE);
    assert_eq!(tiles.len(), 4);
}

#[test]
fn range_predicate_matches_tile_set() {
    let config = footprint(AttackShape::Diamond, 1, 2);
    let tiles = valid_range_tiles(CENTER, &config, DEFAULT_GRID_SIZE);
    for column in 0..DEFAULT_GRID_SIZE {
        for row in 0..DEFAULT_GRID_SIZE {
            let cell = CellCoord::new(column, row);
            assert_eq!(
                contains(CENTER, &config, cell, DEFAULT_GRID_SIZE),
                tiles.contains(&cell)
            );
        }
    }
}

#[test]
fn area_footprint_includes_center() {
    let tiles = area_tiles(CENTER, 2, DEFAULT_GRID_SIZE);
    assert_eq!(tiles.len(), 13);
    assert!(tiles.contains(&CENTER));
    assert_eq!(area_tiles(CellCoord::new(0, 0), 0, DEFAULT_GRID_SIZE).len(), 1);
}
