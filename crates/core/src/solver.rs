//! Eigensolver collaborator interface.
//!
//! The band data lives in two places: the fully-computed coefficient set B
//! (every band, immutable here), and a bounded working block H that the
//! solver reconstructs on demand from its compressed basis, one window of
//! consecutive bands at a time. Both use the packed layout
//! `data[(pos * 2 + pol) * bands + band]` with `pos` the linear storage
//! position from [`Grid3::pos`] and `pol` the transverse polarization
//! component.

use std::ops::{Deref, DerefMut};

use num_complex::Complex64;

use crate::error::SdosError;
use crate::grid::Grid3;

/// Dimension of the transverse polarization subspace.
pub const NUM_POLARIZATIONS: usize = 2;

/// Read-only view of a packed eigenvector array.
#[derive(Debug, Clone, Copy)]
pub struct EvecView<'a> {
    data: &'a [Complex64],
    bands: usize,
}

impl<'a> EvecView<'a> {
    pub fn new(data: &'a [Complex64], bands: usize) -> Self {
        Self { data, bands }
    }

    #[inline]
    pub fn at(&self, pos: usize, pol: usize, band: usize) -> Complex64 {
        self.data[(pos * NUM_POLARIZATIONS + pol) * self.bands + band]
    }

    pub fn bands(&self) -> usize {
        self.bands
    }
}

/// Interface to the iterative eigensolver holding the band data.
///
/// The block sizing (`set_active_bands` / `resize_block`) is shared
/// mutable state; callers that shrink it must restore it before returning
/// control. Use [`BlockWindow`] for that.
pub trait ModeSolver {
    fn grid(&self) -> Grid3;

    /// Total number of bands available in the full set B.
    fn num_bands(&self) -> usize;

    /// Allocated band capacity of the working block.
    fn block_capacity(&self) -> usize;

    /// Current band width of the working block.
    fn block_bands(&self) -> usize;

    /// Current working band count of the solver.
    fn active_bands(&self) -> usize;

    fn set_active_bands(&mut self, bands: usize);

    fn resize_block(&mut self, bands: usize);

    /// Materialize `band_count` consecutive bands starting at
    /// `band_offset` into the working block.
    fn reconstruct_block(&mut self, band_offset: usize, band_count: usize)
        -> Result<(), SdosError>;

    fn full_modes(&self) -> EvecView<'_>;

    fn block_modes(&self) -> EvecView<'_>;
}

/// Scoped shrink of the solver's working band window.
///
/// Restores the allocated capacity on drop, so the solver's sizing is
/// back to its entry state on every exit path, early returns included.
pub struct BlockWindow<'a, S: ModeSolver + ?Sized> {
    solver: &'a mut S,
    restore_to: usize,
}

impl<'a, S: ModeSolver + ?Sized> BlockWindow<'a, S> {
    pub fn new(solver: &'a mut S) -> Self {
        let restore_to = solver.block_capacity();
        Self { solver, restore_to }
    }

    pub fn shrink(&mut self, bands: usize) {
        self.solver.set_active_bands(bands);
        self.solver.resize_block(bands);
    }
}

impl<S: ModeSolver + ?Sized> Deref for BlockWindow<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.solver
    }
}

impl<S: ModeSolver + ?Sized> DerefMut for BlockWindow<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.solver
    }
}

impl<S: ModeSolver + ?Sized> Drop for BlockWindow<'_, S> {
    fn drop(&mut self) {
        self.solver.resize_block(self.restore_to);
        self.solver.set_active_bands(self.restore_to);
    }
}

/// In-memory mode set with a diagonal reconstruction operator.
///
/// Reconstruction applies a per-(position, polarization) transfer factor
/// to the stored coefficients; in the plane-wave basis the field operator
/// is diagonal per G-component, so this is the shape a serialized solver
/// state takes.
#[derive(Debug, Clone)]
pub struct PlanewaveModes {
    grid: Grid3,
    num_bands: usize,
    block_capacity: usize,
    active_bands: usize,
    block_bands: usize,
    coefficients: Vec<Complex64>,
    transfer: Vec<Complex64>,
    block: Vec<Complex64>,
}

impl PlanewaveModes {
    pub fn new(
        grid: Grid3,
        block_capacity: usize,
        coefficients: Vec<Complex64>,
        transfer: Vec<Complex64>,
        num_bands: usize,
    ) -> Result<Self, SdosError> {
        let components = grid.len() * NUM_POLARIZATIONS;
        if coefficients.len() != components * num_bands {
            return Err(SdosError::ShapeMismatch {
                what: "mode coefficient array",
                expected: components * num_bands,
                got: coefficients.len(),
            });
        }
        if transfer.len() != components {
            return Err(SdosError::ShapeMismatch {
                what: "transfer diagonal",
                expected: components,
                got: transfer.len(),
            });
        }
        let block_capacity = block_capacity.clamp(1, num_bands.max(1));
        Ok(Self {
            grid,
            num_bands,
            block_capacity,
            active_bands: block_capacity,
            block_bands: block_capacity,
            coefficients,
            transfer,
            block: vec![Complex64::ZERO; components * block_capacity],
        })
    }

    /// Unit transfer factors; reconstruction then reproduces B itself.
    pub fn with_unit_transfer(
        grid: Grid3,
        block_capacity: usize,
        coefficients: Vec<Complex64>,
        num_bands: usize,
    ) -> Result<Self, SdosError> {
        let transfer = vec![Complex64::ONE; grid.len() * NUM_POLARIZATIONS];
        Self::new(grid, block_capacity, coefficients, transfer, num_bands)
    }
}

impl ModeSolver for PlanewaveModes {
    fn grid(&self) -> Grid3 {
        self.grid
    }

    fn num_bands(&self) -> usize {
        self.num_bands
    }

    fn block_capacity(&self) -> usize {
        self.block_capacity
    }

    fn block_bands(&self) -> usize {
        self.block_bands
    }

    fn active_bands(&self) -> usize {
        self.active_bands
    }

    fn set_active_bands(&mut self, bands: usize) {
        self.active_bands = bands;
    }

    fn resize_block(&mut self, bands: usize) {
        assert!(
            bands <= self.block_capacity,
            "block resize beyond allocated capacity"
        );
        self.block_bands = bands;
        let components = self.grid.len() * NUM_POLARIZATIONS;
        self.block.resize(components * bands, Complex64::ZERO);
    }

    fn reconstruct_block(
        &mut self,
        band_offset: usize,
        band_count: usize,
    ) -> Result<(), SdosError> {
        if band_count > self.block_bands {
            return Err(SdosError::BlockReconstruct {
                band_offset,
                detail: format!(
                    "requested {band_count} bands into a {}-band block",
                    self.block_bands
                ),
            });
        }
        if band_offset + band_count > self.num_bands {
            return Err(SdosError::BlockReconstruct {
                band_offset,
                detail: format!(
                    "band window {band_offset}+{band_count} exceeds the {} stored bands",
                    self.num_bands
                ),
            });
        }
        let components = self.grid.len() * NUM_POLARIZATIONS;
        let p = self.block_bands;
        for comp in 0..components {
            let t = self.transfer[comp];
            let src = comp * self.num_bands + band_offset;
            let dst = comp * p;
            for j in 0..band_count {
                self.block[dst + j] = t * self.coefficients[src + j];
            }
        }
        Ok(())
    }

    fn full_modes(&self) -> EvecView<'_> {
        EvecView::new(&self.coefficients, self.num_bands)
    }

    fn block_modes(&self) -> EvecView<'_> {
        EvecView::new(&self.block, self.block_bands)
    }
}
