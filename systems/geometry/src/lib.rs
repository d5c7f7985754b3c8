#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure range calculations mapping attack footprints onto grid cells.
//!
//! Every shape is evaluated against the Manhattan and Chebyshev distances
//! between the hero's cell and a candidate cell. The hero's own cell never
//! belongs to its range.

use std::collections::BTreeSet;

use hero_defence_core::{AttackConfig, AttackShape, CellCoord, CellPoint};

/// Reports whether `cell` lies inside the attack footprint anchored at
/// `origin` on a square grid of `grid_size` cells.
#[must_use]
pub fn contains(origin: CellCoord, config: &AttackConfig, cell: CellCoord, grid_size: u32) -> bool {
    if cell == origin || !cell.within(grid_size) {
        return false;
    }

    let dx = cell.column().abs_diff(origin.column());
    let dy = cell.row().abs_diff(origin.row());
    let manhattan = dx + dy;
    let band = config.min_range..=config.max_range;

    match config.shape {
        AttackShape::Diamond => band.contains(&manhattan),
        AttackShape::Square => band.contains(&dx.max(dy)),
        AttackShape::Cross => dx == dy && dx > 0 && band.contains(&manhattan),
        AttackShape::Plus => (dx == 0 || dy == 0) && band.contains(&manhattan),
        AttackShape::Line => {
            ((dx == 0 && dy > 0) || (dy == 0 && dx > 0)) && band.contains(&manhattan)
        }
    }
}

/// Reports whether a continuous position falls inside the footprint.
///
/// The position is floored to the cell it belongs to first.
#[must_use]
pub fn contains_point(
    origin: CellCoord,
    config: &AttackConfig,
    point: CellPoint,
    grid_size: u32,
) -> bool {
    point
        .cell()
        .is_some_and(|cell| contains(origin, config, cell, grid_size))
}

/// Every grid cell covered by the footprint anchored at `origin`.
#[must_use]
pub fn valid_range_tiles(
    origin: CellCoord,
    config: &AttackConfig,
    grid_size: u32,
) -> BTreeSet<CellCoord> {
    grid_cells(grid_size)
        .filter(|&cell| contains(origin, config, cell, grid_size))
        .collect()
}

/// Cells within Manhattan `radius` of `center`, the center included.
#[must_use]
pub fn area_tiles(center: CellCoord, radius: u32, grid_size: u32) -> BTreeSet<CellCoord> {
    grid_cells(grid_size)
        .filter(|&cell| cell.manhattan_distance(center) <= radius)
        .collect()
}

fn grid_cells(grid_size: u32) -> impl Iterator<Item = CellCoord> {
    (0..grid_size)
        .flat_map(move |column| (0..grid_size).map(move |row| CellCoord::new(column, row)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_defence_core::AttackKind;

    fn config(shape: AttackShape, min_range: u32, max_range: u32) -> AttackConfig {
        AttackConfig {
            kind: AttackKind::Single,
            shape,
            min_range,
            max_range,
            max_targets: 1,
            aoe_radius: None,
        }
    }

    #[test]
    fn origin_is_never_in_range() {
        let origin = CellCoord::new(5, 5);
        for shape in [
            AttackShape::Diamond,
            AttackShape::Square,
            AttackShape::Cross,
            AttackShape::Plus,
            AttackShape::Line,
        ] {
            assert!(!contains(origin, &config(shape, 0, 3), origin, 11));
        }
    }

    #[test]
    fn cells_outside_the_grid_are_rejected() {
        let origin = CellCoord::new(10, 10);
        let config = config(AttackShape::Square, 1, 1);
        assert!(!contains(origin, &config, CellCoord::new(11, 10), 11));
        assert!(contains(origin, &config, CellCoord::new(9, 10), 11));
    }

    #[test]
    fn points_floor_into_cells() {
        let origin = CellCoord::new(5, 5);
        let config = config(AttackShape::Line, 1, 1);
        assert!(contains_point(origin, &config, CellPoint::new(6.9, 5.2), 11));
        assert!(!contains_point(origin, &config, CellPoint::new(6.9, 6.0), 11));
        assert!(!contains_point(origin, &config, CellPoint::new(-0.5, 5.0), 11));
    }
}
