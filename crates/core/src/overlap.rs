//! Overlap between the full mode set and reconstructed band blocks.

use log::debug;
use num_complex::Complex64;

use crate::error::SdosError;
use crate::gvector::GBox;
use crate::solver::{BlockWindow, ModeSolver, NUM_POLARIZATIONS};

/// Compute the overlap matrix BtH for the requested G-box and band range.
///
/// Entry `BtH[n * n_bands + (b - band_min)]` is the polarization trace
/// `sum_c conj(B[pos_n, c, b]) * H[pos_n, c, b - chunk_offset]`, with
/// `pos_n` the folded storage position of the n-th requested G-vector.
/// Bands are processed in consecutive chunks no larger than the solver's
/// block capacity; the chunk partition does not affect the result. The
/// solver's block sizing is restored before returning, on error paths
/// included.
pub fn compute_overlap<S: ModeSolver + ?Sized>(
    solver: &mut S,
    g_box: &GBox,
    band_min: usize,
    n_bands: usize,
) -> Result<Vec<Complex64>, SdosError> {
    let grid = solver.grid();
    let available = solver.num_bands();
    if band_min + n_bands > available {
        return Err(SdosError::BandWindowOutOfRange {
            band_min,
            n_bands,
            available,
        });
    }

    let triples = g_box.storage_triples(grid)?;
    let positions: Vec<usize> = triples
        .iter()
        .map(|&[ix, iy, iz]| grid.pos(ix, iy, iz))
        .collect();
    let n_g = positions.len();

    debug!(
        "overlap request: i1 {}..={}, i2 {}..={}, i3 {}..={} on {}x{}x{} grid; nG={} (of {}), bands {}..{}",
        g_box.min[0],
        g_box.max[0],
        g_box.min[1],
        g_box.max[1],
        g_box.min[2],
        g_box.max[2],
        grid.nx,
        grid.ny,
        grid.nz,
        n_g,
        grid.len(),
        band_min,
        band_min + n_bands
    );

    let mut bth = vec![Complex64::ZERO; n_g * n_bands];
    let final_band = band_min + n_bands;

    // The working block may not have room for the whole range at once;
    // walk it in capacity-sized chunks, shrinking the window for the
    // final partial chunk. The guard restores the original sizing.
    let mut window = BlockWindow::new(solver);
    let capacity = window.block_capacity();
    let mut ib = band_min;
    while ib < final_band {
        let chunk = capacity.min(final_band - ib);
        if chunk < capacity {
            window.shrink(chunk);
        }
        window.reconstruct_block(ib, chunk)?;

        let full = window.full_modes();
        let block = window.block_modes();
        for (n, &pos) in positions.iter().enumerate() {
            for ibb in ib..ib + chunk {
                let mut polsum = Complex64::ZERO;
                for c in 0..NUM_POLARIZATIONS {
                    polsum += full.at(pos, c, ibb).conj() * block.at(pos, c, ibb - ib);
                }
                bth[n * n_bands + (ibb - band_min)] = polsum;
            }
        }
        ib += chunk;
    }

    Ok(bth)
}
