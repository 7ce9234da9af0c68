//! Spectral density of states from band overlaps.
//!
//! For each swept frequency ω and requested G-vector, the local spectral
//! density is a pole sum over the selected bands,
//!
//! ```text
//! sdos(ω, G) = (2 Vol / π) ω  Σ_b  Im[ BtH(G, b) / ((ω_b² − ω²) − iη) ]
//! ```
//!
//! with η a positive broadening that keeps the poles off the real axis.
//! A frequency landing exactly on a band eigenfrequency is a resonance
//! peak, not an error; the result stays finite for η > 0.

use std::f64::consts::PI;
use std::path::PathBuf;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::SdosError;
use crate::gvector::GBox;
use crate::lattice::{KPoint, Lattice3};
use crate::overlap::compute_overlap;
use crate::solver::ModeSolver;
use crate::storage::{spectrum_filename, DatasetSink, JsonContainer};

/// Uniform frequency sweep with cached squared samples.
#[derive(Debug, Clone)]
pub struct FreqSweep {
    freqs: Vec<f64>,
    freqs2: Vec<f64>,
}

impl FreqSweep {
    pub fn new(freq_min: f64, freq_max: f64, freq_num: usize) -> Result<Self, SdosError> {
        if freq_num < 2 {
            return Err(SdosError::FreqCountTooSmall(freq_num));
        }
        let step = (freq_max - freq_min) / (freq_num - 1) as f64;
        let freqs: Vec<f64> = (0..freq_num).map(|i| freq_min + step * i as f64).collect();
        let freqs2 = freqs.iter().map(|f| f * f).collect();
        Ok(Self { freqs, freqs2 })
    }

    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.freqs
    }

    pub fn squared(&self) -> &[f64] {
        &self.freqs2
    }
}

/// One spectral-density request.
#[derive(Debug, Clone)]
pub struct SdosJob {
    pub freq_min: f64,
    pub freq_max: f64,
    pub freq_num: usize,
    pub eta: f64,
    pub band_min: usize,
    pub n_bands: usize,
    pub g_box: GBox,
    pub save_prefix: String,
}

/// Computed spectrum plus the metadata written alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdosSpectrum {
    /// Row-major (frequency, G-vector), `freq_num * n_g` values.
    pub sdos: Vec<f64>,
    pub freq_num: usize,
    pub n_g: usize,
    /// `[freq_min, freq_max, freq_num]`.
    pub freq_span: [f64; 3],
    /// `[i1_min, i1_max, i2_min, i2_max, i3_min, i3_max]`.
    pub g_span: [f64; 6],
}

/// Evaluate the pole sum for every (frequency, G-vector) pair.
pub fn compute_spectrum<S: ModeSolver + ?Sized>(
    solver: &mut S,
    eigenfreqs: &[f64],
    volume: f64,
    job: &SdosJob,
) -> Result<SdosSpectrum, SdosError> {
    if job.eta <= 0.0 {
        return Err(SdosError::NonPositiveEta(job.eta));
    }
    let sweep = FreqSweep::new(job.freq_min, job.freq_max, job.freq_num)?;

    let available = eigenfreqs.len().min(solver.num_bands());
    if job.band_min + job.n_bands > available {
        return Err(SdosError::BandWindowOutOfRange {
            band_min: job.band_min,
            n_bands: job.n_bands,
            available,
        });
    }

    // Squared eigenfrequencies for the requested band window.
    let freqs2: Vec<f64> = eigenfreqs[job.band_min..job.band_min + job.n_bands]
        .iter()
        .map(|w| w * w)
        .collect();

    let bth = compute_overlap(solver, &job.g_box, job.band_min, job.n_bands)?;

    let n_g = job.g_box.len();
    let n_bands = job.n_bands;
    let npref = 2.0 * volume / PI;
    let mut sdos = vec![0.0f64; sweep.len() * n_g];
    for (i, (&f, &f2)) in sweep.samples().iter().zip(sweep.squared()).enumerate() {
        let fpref = npref * f;
        for n in 0..n_g {
            let row = &bth[n * n_bands..(n + 1) * n_bands];
            let mut acc = 0.0;
            for (b, &overlap) in row.iter().enumerate() {
                let denom = Complex64::new(freqs2[b] - f2, -job.eta);
                acc += (overlap / denom).im;
            }
            sdos[i * n_g + n] = acc * fpref;
        }
    }

    let span = job.g_box.span();
    Ok(SdosSpectrum {
        sdos,
        freq_num: sweep.len(),
        n_g,
        freq_span: [job.freq_min, job.freq_max, job.freq_num as f64],
        g_span: span.map(f64::from),
    })
}

/// Write the spectrum and its metadata as four real datasets.
pub fn write_spectrum(
    spectrum: &SdosSpectrum,
    kpoint: &KPoint,
    sink: &mut dyn DatasetSink,
) -> Result<(), SdosError> {
    sink.write_real(
        "sdos",
        "local spectral density, row-major (freq, G)",
        &[spectrum.freq_num * spectrum.n_g],
        &spectrum.sdos,
    )?;
    sink.write_real(
        "freqspan",
        "freq_min, freq_max, freq_num",
        &[3],
        &spectrum.freq_span,
    )?;
    sink.write_real(
        "iGspan",
        "i1_min, i1_max, i2_min, i2_max, i3_min, i3_max",
        &[6],
        &spectrum.g_span,
    )?;
    sink.write_real("kpoint", "current wavevector", &[3], &kpoint.wavevector)?;
    Ok(())
}

/// Compute the spectrum and persist it under
/// `{prefix}-sdos.k{index}[.{parity}].json`.
pub fn run<S: ModeSolver + ?Sized>(
    solver: &mut S,
    eigenfreqs: &[f64],
    lattice: &Lattice3,
    kpoint: &KPoint,
    job: &SdosJob,
) -> Result<PathBuf, SdosError> {
    let spectrum = compute_spectrum(solver, eigenfreqs, lattice.volume(), job)?;
    let name = spectrum_filename(&job.save_prefix, kpoint.index, kpoint.parity);
    let mut container = JsonContainer::create(PathBuf::from(format!("{name}.json")))?;
    write_spectrum(&spectrum, kpoint, &mut container)?;
    container.close()
}
