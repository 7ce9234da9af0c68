//! Reciprocal-lattice index bookkeeping.
//!
//! G-vectors are addressed by integer triples (i1, i2, i3) with
//! `G = i1*b1 + i2*b2 + i3*b3`. The eigenvector arrays store only the
//! folded spectrum per axis: a lattice index `i <= 0` lives at array
//! position `-i`, a positive index at `N - i` (N = sampling extent).
//! [`fold_index`] implements that rule in isolation; [`GBox`] validates a
//! requested axis-aligned box against the grid and enumerates its folded
//! storage triples in lexicographic (i1, i2, i3) order, which is the
//! canonical row order of every downstream array.

use serde::{Deserialize, Serialize};

use crate::error::SdosError;
use crate::grid::Grid3;

/// Folded storage index of lattice index `i` on an axis of extent `n`.
#[inline]
pub fn fold_index(i: i32, n: usize) -> usize {
    if i <= 0 {
        (-i) as usize
    } else {
        n - i as usize
    }
}

/// Inclusive axis-aligned box of G-vector indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GBox {
    pub min: [i32; 3],
    pub max: [i32; 3],
}

impl GBox {
    pub fn new(min: [i32; 3], max: [i32; 3]) -> Self {
        Self { min, max }
    }

    /// Number of G-vectors in the box.
    pub fn len(&self) -> usize {
        (0..3)
            .map(|axis| (self.max[axis] - self.min[axis] + 1) as usize)
            .product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bounds as `[i1_min, i1_max, i2_min, i2_max, i3_min, i3_max]`.
    pub fn span(&self) -> [i32; 6] {
        [
            self.min[0], self.max[0], self.min[1], self.max[1], self.min[2], self.max[2],
        ]
    }

    /// Check the box against the sampling grid.
    ///
    /// Each axis of extent N must satisfy `min > -N/2 && max <= N/2`
    /// (truncating division), or be the degenerate single point
    /// `min == max == N-1 == 0` of an axis with no variation.
    pub fn validate(&self, grid: Grid3) -> Result<(), SdosError> {
        let extents = [grid.nx, grid.ny, grid.nz];
        for axis in 0..3 {
            let (min, max) = (self.min[axis], self.max[axis]);
            if min > max {
                return Err(SdosError::GBoxDecreasing {
                    axis: axis + 1,
                    min,
                    max,
                });
            }
            let n = extents[axis] as i32;
            let half = n / 2;
            let in_range = min > -half && max <= half;
            let degenerate = min == max && max == n - 1 && n - 1 == 0;
            if !(in_range || degenerate) {
                return Err(SdosError::GBoxOutOfBounds {
                    axis: axis + 1,
                    min,
                    max,
                    extent: extents[axis],
                });
            }
        }
        Ok(())
    }

    /// Folded storage triples for every G-vector in the box, in
    /// lexicographic (i1, i2, i3) enumeration order.
    pub fn storage_triples(&self, grid: Grid3) -> Result<Vec<[usize; 3]>, SdosError> {
        self.validate(grid)?;
        let mut triples = Vec::with_capacity(self.len());
        for i1 in self.min[0]..=self.max[0] {
            let ix = fold_index(i1, grid.nx);
            for i2 in self.min[1]..=self.max[1] {
                let iy = fold_index(i2, grid.ny);
                for i3 in self.min[2]..=self.max[2] {
                    triples.push([ix, iy, fold_index(i3, grid.nz)]);
                }
            }
        }
        Ok(triples)
    }
}
