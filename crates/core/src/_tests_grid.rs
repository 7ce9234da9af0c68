#![cfg(test)]

use super::grid::Grid3;

#[test]
fn pos_matches_packed_layout() {
    let grid = Grid3::new(4, 3, 2);
    assert_eq!(grid.pos(0, 0, 0), 0);
    assert_eq!(grid.pos(0, 0, 1), 1);
    assert_eq!(grid.pos(0, 1, 0), 2);
    assert_eq!(grid.pos(1, 0, 0), 6);
    assert_eq!(grid.pos(3, 2, 1), 23);
}

#[test]
fn len_is_product_of_extents() {
    assert_eq!(Grid3::new(4, 3, 2).len(), 24);
    assert_eq!(Grid3::new(16, 16, 1).len(), 256);
    assert!(!Grid3::new(1, 1, 1).is_empty());
}

#[test]
fn positions_cover_grid_without_collision() {
    let grid = Grid3::new(3, 4, 5);
    let mut seen = vec![false; grid.len()];
    for ix in 0..grid.nx {
        for iy in 0..grid.ny {
            for iz in 0..grid.nz {
                let pos = grid.pos(ix, iy, iz);
                assert!(!seen[pos], "position {pos} visited twice");
                seen[pos] = true;
            }
        }
    }
    assert!(seen.iter().all(|&v| v));
}
