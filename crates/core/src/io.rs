//! Job configuration and mode-data file formats.
//!
//! Jobs load from TOML:
//!
//! ```toml
//! modes = "modes.k0.json"
//! eta = 0.005
//! save_prefix = "run1"
//!
//! [freq]
//! min = 0.0
//! max = 1.2
//! num = 241
//!
//! [bands]
//! first = 0
//! count = 8
//!
//! [gbox]
//! min = [-2, -2, 0]
//! max = [2, 2, 0]
//! ```
//!
//! Mode data loads from a JSON document written by the band solver: grid
//! extents, lattice, k-point, the eigenfrequency table, the reconstruction
//! transfer diagonal, and the packed coefficient array.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::SdosError;
use crate::grid::Grid3;
use crate::gvector::GBox;
use crate::lattice::{KPoint, Lattice3};
use crate::sdos::SdosJob;
use crate::solver::PlanewaveModes;

// ============================================================================
// Job configuration (TOML)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdosConfig {
    /// Path to the mode-data JSON file.
    pub modes: PathBuf,
    pub freq: FreqRangeConfig,
    pub eta: f64,
    pub bands: BandRangeConfig,
    pub gbox: GBoxConfig,
    #[serde(default)]
    pub save_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreqRangeConfig {
    pub min: f64,
    pub max: f64,
    pub num: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandRangeConfig {
    /// First band of the window (zero-based).
    #[serde(default)]
    pub first: usize,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GBoxConfig {
    pub min: [i32; 3],
    pub max: [i32; 3],
}

impl SdosConfig {
    pub fn job(&self) -> SdosJob {
        SdosJob {
            freq_min: self.freq.min,
            freq_max: self.freq.max,
            freq_num: self.freq.num,
            eta: self.eta,
            band_min: self.bands.first,
            n_bands: self.bands.count,
            g_box: GBox::new(self.gbox.min, self.gbox.max),
            save_prefix: self.save_prefix.clone(),
        }
    }
}

// ============================================================================
// Mode data (JSON)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModesFile {
    pub grid: Grid3,
    pub lattice: Lattice3,
    pub kpoint: KPoint,
    pub block_capacity: usize,
    /// Eigenfrequency per band, ascending, global band numbering.
    pub frequencies: Vec<f64>,
    /// Per-(position, polarization) reconstruction factor.
    pub transfer: Vec<Complex64>,
    /// Packed coefficients, `(pos * 2 + pol) * n_bands + band`.
    pub coefficients: Vec<Complex64>,
}

impl ModesFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SdosError> {
        let file = File::open(path.as_ref())?;
        let modes = serde_json::from_reader(BufReader::new(file))?;
        Ok(modes)
    }

    /// Split into the solver collaborator and the read-only extras.
    pub fn into_parts(self) -> Result<(PlanewaveModes, Vec<f64>, Lattice3, KPoint), SdosError> {
        let num_bands = self.frequencies.len();
        let solver = PlanewaveModes::new(
            self.grid,
            self.block_capacity,
            self.coefficients,
            self.transfer,
            num_bands,
        )?;
        Ok((solver, self.frequencies, self.lattice, self.kpoint))
    }
}
