#![cfg(test)]

use std::f64::consts::PI;

use num_complex::Complex64;

use super::error::SdosError;
use super::grid::Grid3;
use super::gvector::GBox;
use super::lattice::KPoint;
use super::parity::Parity;
use super::sdos::{compute_spectrum, write_spectrum, FreqSweep, SdosJob, SdosSpectrum};
use super::solver::{PlanewaveModes, NUM_POLARIZATIONS};
use super::storage::DatasetSink;

fn job(freq_min: f64, freq_max: f64, freq_num: usize, eta: f64, n_bands: usize) -> SdosJob {
    SdosJob {
        freq_min,
        freq_max,
        freq_num,
        eta,
        band_min: 0,
        n_bands,
        g_box: GBox::new([0, 0, 0], [0, 0, 0]),
        save_prefix: String::new(),
    }
}

/// One band, all weight in polarization 0 of G = (0, 0, 0).
fn single_mode_solver(grid: Grid3) -> PlanewaveModes {
    let mut coeffs = vec![Complex64::ZERO; grid.len() * NUM_POLARIZATIONS];
    coeffs[0] = Complex64::ONE;
    PlanewaveModes::with_unit_transfer(grid, 1, coeffs, 1).unwrap()
}

#[test]
fn sweep_is_uniform_and_inclusive() {
    let sweep = FreqSweep::new(0.5, 1.5, 3).unwrap();
    assert_eq!(sweep.samples(), &[0.5, 1.0, 1.5]);
    assert_eq!(sweep.squared(), &[0.25, 1.0, 2.25]);
    assert_eq!(sweep.len(), 3);
}

#[test]
fn sweep_needs_two_samples() {
    let err = FreqSweep::new(0.0, 1.0, 1).unwrap_err();
    assert!(matches!(err, SdosError::FreqCountTooSmall(1)));
}

#[test]
fn single_band_resonance_matches_analytic_pole_sum() {
    let grid = Grid3::new(4, 4, 4);
    let mut solver = single_mode_solver(grid);
    let eta = 0.01;
    let volume = 1.0;
    let spectrum =
        compute_spectrum(&mut solver, &[1.0], volume, &job(0.5, 1.5, 3, eta, 1)).unwrap();

    assert_eq!(spectrum.freq_num, 3);
    assert_eq!(spectrum.n_g, 1);
    // BtH = 1, so sdos(f) = (2 Vol / pi) f * eta / ((1 - f^2)^2 + eta^2).
    for (i, &f) in [0.5_f64, 1.0, 1.5].iter().enumerate() {
        let denom: f64 = (1.0 - f * f).powi(2) + eta * eta;
        let expected = 2.0 * volume / PI * f * eta / denom;
        assert!(
            (spectrum.sdos[i] - expected).abs() < 1e-12,
            "sdos({f}) = {}, expected {expected}",
            spectrum.sdos[i]
        );
    }
    // Pronounced peak at resonance.
    assert!(spectrum.sdos[1] > 1e3 * spectrum.sdos[0]);
    assert!(spectrum.sdos[1] > 1e3 * spectrum.sdos[2]);
}

#[test]
fn spectrum_is_finite_and_decays_off_resonance() {
    let grid = Grid3::new(4, 4, 4);
    let mut solver = single_mode_solver(grid);
    let spectrum =
        compute_spectrum(&mut solver, &[1.0], 1.0, &job(10.0, 200.0, 20, 0.01, 1)).unwrap();
    assert!(spectrum.sdos.iter().all(|v| v.is_finite()));
    // Pole sum decays as the sweep leaves the band.
    assert!(spectrum.sdos[0].abs() > spectrum.sdos[19].abs());
    assert!(spectrum.sdos[19].abs() < 1e-6);
}

#[test]
fn nonpositive_eta_is_rejected() {
    let grid = Grid3::new(4, 4, 4);
    let mut solver = single_mode_solver(grid);
    let err = compute_spectrum(&mut solver, &[1.0], 1.0, &job(0.0, 1.0, 2, 0.0, 1)).unwrap_err();
    assert!(matches!(err, SdosError::NonPositiveEta(_)));
    let err = compute_spectrum(&mut solver, &[1.0], 1.0, &job(0.0, 1.0, 2, -0.5, 1)).unwrap_err();
    assert!(matches!(err, SdosError::NonPositiveEta(_)));
}

#[test]
fn band_window_one_past_available_is_rejected() {
    let grid = Grid3::new(2, 2, 2);
    let n_bands = 3;
    let coeffs = vec![Complex64::ZERO; grid.len() * NUM_POLARIZATIONS * n_bands];
    let mut solver = PlanewaveModes::with_unit_transfer(grid, 2, coeffs, n_bands).unwrap();
    let err = compute_spectrum(
        &mut solver,
        &[0.3, 0.5, 0.7],
        1.0,
        &job(0.0, 1.0, 2, 0.01, n_bands + 1),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SdosError::BandWindowOutOfRange {
            band_min: 0,
            n_bands: 4,
            available: 3,
        }
    ));
}

#[test]
fn volume_scales_the_prefactor_linearly() {
    let grid = Grid3::new(4, 4, 4);
    let mut solver = single_mode_solver(grid);
    let base = compute_spectrum(&mut solver, &[1.0], 1.0, &job(0.5, 1.5, 3, 0.01, 1)).unwrap();
    let doubled = compute_spectrum(&mut solver, &[1.0], 2.0, &job(0.5, 1.5, 3, 0.01, 1)).unwrap();
    for (a, b) in base.sdos.iter().zip(&doubled.sdos) {
        assert!((2.0 * a - b).abs() < 1e-12);
    }
}

#[derive(Default)]
struct RecordingSink {
    records: Vec<(String, String, Vec<usize>, Vec<f64>)>,
}

impl DatasetSink for RecordingSink {
    fn write_real(
        &mut self,
        name: &str,
        description: &str,
        dims: &[usize],
        data: &[f64],
    ) -> Result<(), SdosError> {
        self.records.push((
            name.to_string(),
            description.to_string(),
            dims.to_vec(),
            data.to_vec(),
        ));
        Ok(())
    }
}

#[test]
fn exactly_four_datasets_are_written_with_metadata() {
    let spectrum = SdosSpectrum {
        sdos: vec![0.25; 6],
        freq_num: 3,
        n_g: 2,
        freq_span: [0.0, 1.0, 3.0],
        g_span: [-1.0, 0.0, -1.0, 0.0, 0.0, 0.0],
    };
    let kpoint = KPoint {
        index: 4,
        wavevector: [0.5, 0.0, 0.0],
        parity: Parity::None,
    };
    let mut sink = RecordingSink::default();
    write_spectrum(&spectrum, &kpoint, &mut sink).unwrap();

    let names: Vec<&str> = sink.records.iter().map(|r| r.0.as_str()).collect();
    assert_eq!(names, ["sdos", "freqspan", "iGspan", "kpoint"]);

    let (_, _, dims, data) = &sink.records[0];
    assert_eq!(dims, &[6]);
    assert_eq!(data.len(), 6);

    let (_, description, dims, data) = &sink.records[2];
    assert_eq!(description, "i1_min, i1_max, i2_min, i2_max, i3_min, i3_max");
    assert_eq!(dims, &[6]);
    assert_eq!(data, &[-1.0, 0.0, -1.0, 0.0, 0.0, 0.0]);

    let (_, _, dims, data) = &sink.records[3];
    assert_eq!(dims, &[3]);
    assert_eq!(data, &[0.5, 0.0, 0.0]);
}

#[test]
fn g_span_metadata_carries_the_third_axis() {
    let grid = Grid3::new(4, 4, 2);
    let n_bands = 1;
    let coeffs = vec![Complex64::ONE; grid.len() * NUM_POLARIZATIONS * n_bands];
    let mut solver = PlanewaveModes::with_unit_transfer(grid, 1, coeffs, n_bands).unwrap();
    let mut request = job(0.0, 1.0, 2, 0.01, 1);
    request.g_box = GBox::new([-1, 0, 0], [1, 1, 1]);
    let spectrum = compute_spectrum(&mut solver, &[1.0], 1.0, &request).unwrap();
    assert_eq!(spectrum.g_span, [-1.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
    assert_eq!(spectrum.n_g, 12);
}
