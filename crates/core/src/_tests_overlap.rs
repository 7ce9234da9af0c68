#![cfg(test)]

use num_complex::Complex64;

use super::error::SdosError;
use super::grid::Grid3;
use super::gvector::GBox;
use super::overlap::compute_overlap;
use super::solver::{EvecView, ModeSolver, PlanewaveModes, NUM_POLARIZATIONS};

/// Deterministic pseudo-random coefficients (64-bit LCG).
fn scrambled_coefficients(len: usize) -> Vec<Complex64> {
    let mut state = 0x2545f4914f6cdd1du64;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64 - 0.5
    };
    (0..len).map(|_| Complex64::new(next(), next())).collect()
}

fn test_solver(grid: Grid3, block_capacity: usize, n_bands: usize) -> PlanewaveModes {
    let coeffs = scrambled_coefficients(grid.len() * NUM_POLARIZATIONS * n_bands);
    PlanewaveModes::with_unit_transfer(grid, block_capacity, coeffs, n_bands).unwrap()
}

#[test]
fn unit_transfer_overlap_is_polarization_norm() {
    let grid = Grid3::new(2, 2, 2);
    let n_bands = 3;
    let mut solver = test_solver(grid, 2, n_bands);
    let g_box = GBox::new([0, 0, 0], [1, 1, 1]);
    let triples = g_box.storage_triples(grid).unwrap();
    let bth = compute_overlap(&mut solver, &g_box, 0, n_bands).unwrap();

    let full = solver.full_modes();
    for (n, &[ix, iy, iz]) in triples.iter().enumerate() {
        let pos = grid.pos(ix, iy, iz);
        for b in 0..n_bands {
            let mut expected = 0.0;
            for c in 0..NUM_POLARIZATIONS {
                expected += full.at(pos, c, b).norm_sqr();
            }
            let got = bth[n * n_bands + b];
            assert!((got.re - expected).abs() < 1e-12);
            assert!(got.im.abs() < 1e-12);
        }
    }
}

#[test]
fn overlap_is_independent_of_block_capacity() {
    let grid = Grid3::new(2, 2, 2);
    let n_bands = 5;
    let coeffs = scrambled_coefficients(grid.len() * NUM_POLARIZATIONS * n_bands);
    let g_box = GBox::new([0, -1, 0], [1, 1, 1]);

    let mut reference = None;
    for capacity in [1, 2, 3, 5] {
        let mut solver =
            PlanewaveModes::with_unit_transfer(grid, capacity, coeffs.clone(), n_bands).unwrap();
        let bth = compute_overlap(&mut solver, &g_box, 0, n_bands).unwrap();
        match &reference {
            None => reference = Some(bth),
            Some(expected) => assert_eq!(&bth, expected, "capacity {capacity} changed BtH"),
        }
    }
}

#[test]
fn partial_band_window_matches_full_run() {
    let grid = Grid3::new(2, 2, 2);
    let n_bands = 6;
    let coeffs = scrambled_coefficients(grid.len() * NUM_POLARIZATIONS * n_bands);
    let g_box = GBox::new([0, 0, 0], [1, 0, 0]);

    let mut solver = PlanewaveModes::with_unit_transfer(grid, 4, coeffs, n_bands).unwrap();
    let all = compute_overlap(&mut solver, &g_box, 0, n_bands).unwrap();
    let window = compute_overlap(&mut solver, &g_box, 2, 3).unwrap();

    let n_g = g_box.len();
    for n in 0..n_g {
        for b in 0..3 {
            assert_eq!(window[n * 3 + b], all[n * n_bands + 2 + b]);
        }
    }
}

#[test]
fn solver_sizing_is_restored_after_partial_final_chunk() {
    let grid = Grid3::new(2, 2, 2);
    let mut solver = test_solver(grid, 4, 6);
    let g_box = GBox::new([0, 0, 0], [0, 0, 0]);
    // 6 bands over capacity 4: final chunk shrinks the window to 2.
    compute_overlap(&mut solver, &g_box, 0, 6).unwrap();
    assert_eq!(solver.block_bands(), 4);
    assert_eq!(solver.active_bands(), 4);
}

#[test]
fn band_window_past_available_bands_is_rejected() {
    let grid = Grid3::new(2, 2, 2);
    let mut solver = test_solver(grid, 2, 4);
    let g_box = GBox::new([0, 0, 0], [0, 0, 0]);
    let err = compute_overlap(&mut solver, &g_box, 2, 3).unwrap_err();
    assert!(matches!(
        err,
        SdosError::BandWindowOutOfRange {
            band_min: 2,
            n_bands: 3,
            available: 4,
        }
    ));
}

#[test]
fn invalid_g_box_is_rejected_before_any_reconstruction() {
    let grid = Grid3::new(4, 4, 4);
    let mut solver = test_solver(grid, 2, 2);
    let g_box = GBox::new([-2, 0, 0], [0, 0, 0]);
    let err = compute_overlap(&mut solver, &g_box, 0, 2).unwrap_err();
    assert!(matches!(err, SdosError::GBoxOutOfBounds { axis: 1, .. }));
}

/// Collaborator whose reconstruction always fails, for exercising the
/// restore-on-error path.
struct FailingSolver {
    grid: Grid3,
    capacity: usize,
    active: usize,
    block: usize,
    n_bands: usize,
    data: Vec<Complex64>,
}

impl FailingSolver {
    fn new(grid: Grid3, capacity: usize, n_bands: usize) -> Self {
        Self {
            grid,
            capacity,
            active: capacity,
            block: capacity,
            n_bands,
            data: vec![Complex64::ZERO; grid.len() * NUM_POLARIZATIONS * n_bands],
        }
    }
}

impl ModeSolver for FailingSolver {
    fn grid(&self) -> Grid3 {
        self.grid
    }

    fn num_bands(&self) -> usize {
        self.n_bands
    }

    fn block_capacity(&self) -> usize {
        self.capacity
    }

    fn block_bands(&self) -> usize {
        self.block
    }

    fn active_bands(&self) -> usize {
        self.active
    }

    fn set_active_bands(&mut self, bands: usize) {
        self.active = bands;
    }

    fn resize_block(&mut self, bands: usize) {
        self.block = bands;
    }

    fn reconstruct_block(&mut self, band_offset: usize, _band_count: usize)
        -> Result<(), SdosError> {
        Err(SdosError::BlockReconstruct {
            band_offset,
            detail: "collaborator unavailable".to_string(),
        })
    }

    fn full_modes(&self) -> EvecView<'_> {
        EvecView::new(&self.data, self.n_bands)
    }

    fn block_modes(&self) -> EvecView<'_> {
        EvecView::new(&self.data, self.n_bands)
    }
}

#[test]
fn solver_sizing_is_restored_when_reconstruction_fails() {
    let grid = Grid3::new(2, 2, 2);
    let mut solver = FailingSolver::new(grid, 4, 8);
    let g_box = GBox::new([0, 0, 0], [0, 0, 0]);
    // 3 bands under capacity 4: the window shrinks before the first
    // reconstruct call, which then fails.
    let err = compute_overlap(&mut solver, &g_box, 0, 3).unwrap_err();
    assert!(matches!(err, SdosError::BlockReconstruct { .. }));
    assert_eq!(solver.block_bands(), 4);
    assert_eq!(solver.active_bands(), 4);
}
