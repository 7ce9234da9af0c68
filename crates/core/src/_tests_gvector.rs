#![cfg(test)]

use super::error::SdosError;
use super::grid::Grid3;
use super::gvector::{fold_index, GBox};

#[test]
fn fold_index_keeps_nonpositive_negated() {
    assert_eq!(fold_index(0, 8), 0);
    assert_eq!(fold_index(-1, 8), 1);
    assert_eq!(fold_index(-3, 8), 3);
}

#[test]
fn fold_index_wraps_positive_from_the_top() {
    assert_eq!(fold_index(1, 8), 7);
    assert_eq!(fold_index(4, 8), 4);
    assert_eq!(fold_index(2, 4), 2);
}

#[test]
fn triples_stay_inside_the_grid() {
    let grid = Grid3::new(4, 4, 4);
    let g_box = GBox::new([-1, -1, -1], [2, 2, 2]);
    let triples = g_box.storage_triples(grid).unwrap();
    assert_eq!(triples.len(), 64);
    assert_eq!(triples.len(), g_box.len());
    for [ix, iy, iz] in triples {
        assert!(ix < grid.nx && iy < grid.ny && iz < grid.nz);
    }
}

#[test]
fn enumeration_is_lexicographic_and_deterministic() {
    let grid = Grid3::new(4, 4, 4);
    let g_box = GBox::new([-1, 0, 0], [0, 1, 1]);
    let triples = g_box.storage_triples(grid).unwrap();
    // (i1, i2, i3) ascending: i3 fastest, i1 slowest.
    let expected = [
        [1, 0, 0],
        [1, 0, 3],
        [1, 3, 0],
        [1, 3, 3],
        [0, 0, 0],
        [0, 0, 3],
        [0, 3, 0],
        [0, 3, 3],
    ];
    assert_eq!(triples, expected);
    assert_eq!(triples, g_box.storage_triples(grid).unwrap());
}

#[test]
fn degenerate_axis_yields_single_point() {
    let grid = Grid3::new(1, 1, 1);
    let g_box = GBox::new([0, 0, 0], [0, 0, 0]);
    let triples = g_box.storage_triples(grid).unwrap();
    assert_eq!(triples, vec![[0, 0, 0]]);
}

#[test]
fn degenerate_rule_needs_unit_extent() {
    // min == max == 0 is not enough when the axis has room for more.
    let grid = Grid3::new(4, 4, 2);
    assert!(GBox::new([0, 0, 0], [0, 0, 0]).validate(grid).is_ok());
    let grid = Grid3::new(4, 4, 4);
    let err = GBox::new([0, 0, -2], [0, 0, 0]).validate(grid).unwrap_err();
    assert!(matches!(
        err,
        SdosError::GBoxOutOfBounds { axis: 3, min: -2, .. }
    ));
}

#[test]
fn lower_bound_at_negative_half_extent_is_rejected() {
    let grid = Grid3::new(4, 4, 4);
    let err = GBox::new([-2, 0, 0], [0, 0, 0]).validate(grid).unwrap_err();
    assert!(matches!(
        err,
        SdosError::GBoxOutOfBounds {
            axis: 1,
            min: -2,
            extent: 4,
            ..
        }
    ));
}

#[test]
fn upper_bound_past_half_extent_is_rejected() {
    let grid = Grid3::new(4, 4, 4);
    let err = GBox::new([0, 0, 0], [0, 3, 0]).validate(grid).unwrap_err();
    assert!(matches!(err, SdosError::GBoxOutOfBounds { axis: 2, max: 3, .. }));
}

#[test]
fn decreasing_range_is_rejected() {
    let grid = Grid3::new(4, 4, 4);
    let err = GBox::new([1, 0, 0], [0, 0, 0]).validate(grid).unwrap_err();
    assert!(matches!(err, SdosError::GBoxDecreasing { axis: 1, .. }));
}

#[test]
fn span_reports_all_three_axes() {
    let g_box = GBox::new([-1, -2, 0], [1, 2, 3]);
    assert_eq!(g_box.span(), [-1, 1, -2, 2, 0, 3]);
}
