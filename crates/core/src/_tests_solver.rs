#![cfg(test)]

use num_complex::Complex64;

use super::error::SdosError;
use super::grid::Grid3;
use super::solver::{BlockWindow, ModeSolver, PlanewaveModes, NUM_POLARIZATIONS};

fn ramp_coefficients(grid: Grid3, n_bands: usize) -> Vec<Complex64> {
    let len = grid.len() * NUM_POLARIZATIONS * n_bands;
    (0..len)
        .map(|i| Complex64::new(i as f64, -(i as f64) * 0.5))
        .collect()
}

#[test]
fn new_rejects_wrong_coefficient_length() {
    let grid = Grid3::new(2, 2, 2);
    let err = PlanewaveModes::with_unit_transfer(grid, 2, vec![Complex64::ZERO; 7], 3).unwrap_err();
    assert!(matches!(
        err,
        SdosError::ShapeMismatch {
            what: "mode coefficient array",
            ..
        }
    ));
}

#[test]
fn new_rejects_wrong_transfer_length() {
    let grid = Grid3::new(2, 2, 2);
    let coeffs = ramp_coefficients(grid, 3);
    let err = PlanewaveModes::new(grid, 2, coeffs, vec![Complex64::ONE; 3], 3).unwrap_err();
    assert!(matches!(
        err,
        SdosError::ShapeMismatch {
            what: "transfer diagonal",
            ..
        }
    ));
}

#[test]
fn reconstruct_applies_transfer_to_the_band_window() {
    let grid = Grid3::new(2, 1, 1);
    let n_bands = 4;
    let coeffs = ramp_coefficients(grid, n_bands);
    let transfer: Vec<Complex64> = (0..grid.len() * NUM_POLARIZATIONS)
        .map(|i| Complex64::new(0.0, (i + 1) as f64))
        .collect();
    let mut solver = PlanewaveModes::new(grid, 2, coeffs.clone(), transfer.clone(), n_bands).unwrap();
    solver.reconstruct_block(1, 2).unwrap();
    let block = solver.block_modes();
    let full = solver.full_modes();
    for pos in 0..grid.len() {
        for c in 0..NUM_POLARIZATIONS {
            for j in 0..2 {
                let expected = transfer[pos * NUM_POLARIZATIONS + c] * full.at(pos, c, 1 + j);
                let got = block.at(pos, c, j);
                assert!((got - expected).norm() < 1e-12);
            }
        }
    }
}

#[test]
fn reconstruct_rejects_window_past_stored_bands() {
    let grid = Grid3::new(2, 1, 1);
    let coeffs = ramp_coefficients(grid, 3);
    let mut solver = PlanewaveModes::with_unit_transfer(grid, 2, coeffs, 3).unwrap();
    let err = solver.reconstruct_block(2, 2).unwrap_err();
    assert!(matches!(err, SdosError::BlockReconstruct { band_offset: 2, .. }));
}

#[test]
fn reconstruct_rejects_count_beyond_block_width() {
    let grid = Grid3::new(2, 1, 1);
    let coeffs = ramp_coefficients(grid, 4);
    let mut solver = PlanewaveModes::with_unit_transfer(grid, 2, coeffs, 4).unwrap();
    let err = solver.reconstruct_block(0, 3).unwrap_err();
    assert!(matches!(err, SdosError::BlockReconstruct { band_offset: 0, .. }));
}

#[test]
fn block_window_restores_capacity_on_drop() {
    let grid = Grid3::new(2, 1, 1);
    let coeffs = ramp_coefficients(grid, 5);
    let mut solver = PlanewaveModes::with_unit_transfer(grid, 4, coeffs, 5).unwrap();
    {
        let mut window = BlockWindow::new(&mut solver);
        window.shrink(1);
        assert_eq!(window.block_bands(), 1);
        assert_eq!(window.active_bands(), 1);
    }
    assert_eq!(solver.block_bands(), 4);
    assert_eq!(solver.active_bands(), 4);
}

#[test]
fn block_window_restores_on_unwind() {
    let grid = Grid3::new(2, 1, 1);
    let coeffs = ramp_coefficients(grid, 5);
    let mut solver = PlanewaveModes::with_unit_transfer(grid, 4, coeffs, 5).unwrap();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut window = BlockWindow::new(&mut solver);
        window.shrink(2);
        panic!("mid-window failure");
    }));
    assert!(result.is_err());
    assert_eq!(solver.block_bands(), 4);
    assert_eq!(solver.active_bands(), 4);
}
