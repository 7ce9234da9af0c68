#![cfg(test)]

use num_complex::Complex64;

use super::error::SdosError;
use super::grid::Grid3;
use super::io::{ModesFile, SdosConfig};
use super::lattice::{KPoint, Lattice3};
use super::parity::Parity;
use super::solver::{ModeSolver, NUM_POLARIZATIONS};

const CONFIG: &str = r#"
modes = "modes.k0.json"
eta = 0.005
save_prefix = "run1"

[freq]
min = 0.0
max = 1.2
num = 241

[bands]
first = 2
count = 8

[gbox]
min = [-2, -2, 0]
max = [2, 2, 0]
"#;

#[test]
fn config_parses_and_maps_to_a_job() {
    let config: SdosConfig = toml::from_str(CONFIG).unwrap();
    let job = config.job();
    assert_eq!(job.freq_num, 241);
    assert!((job.eta - 0.005).abs() < 1e-15);
    assert_eq!(job.band_min, 2);
    assert_eq!(job.n_bands, 8);
    assert_eq!(job.g_box.min, [-2, -2, 0]);
    assert_eq!(job.g_box.max, [2, 2, 0]);
    assert_eq!(job.save_prefix, "run1");
    assert_eq!(job.g_box.len(), 25);
}

#[test]
fn band_first_and_prefix_default_when_omitted() {
    let config: SdosConfig = toml::from_str(
        r#"
modes = "modes.json"
eta = 0.01

[freq]
min = 0.0
max = 1.0
num = 11

[bands]
count = 4

[gbox]
min = [0, 0, 0]
max = [1, 1, 0]
"#,
    )
    .unwrap();
    assert_eq!(config.bands.first, 0);
    assert!(config.save_prefix.is_empty());
}

fn sample_modes(grid: Grid3, n_bands: usize) -> ModesFile {
    let components = grid.len() * NUM_POLARIZATIONS;
    ModesFile {
        grid,
        lattice: Lattice3::cubic(1.0),
        kpoint: KPoint {
            index: 0,
            wavevector: [0.0, 0.0, 0.0],
            parity: Parity::Tm,
        },
        block_capacity: 2,
        frequencies: (0..n_bands).map(|b| 0.1 * (b + 1) as f64).collect(),
        transfer: vec![Complex64::ONE; components],
        coefficients: vec![Complex64::new(0.5, -0.5); components * n_bands],
    }
}

#[test]
fn modes_file_round_trips_through_json() {
    let modes = sample_modes(Grid3::new(2, 2, 1), 3);
    let text = serde_json::to_string(&modes).unwrap();
    let back: ModesFile = serde_json::from_str(&text).unwrap();
    assert_eq!(back.grid, modes.grid);
    assert_eq!(back.frequencies, modes.frequencies);
    assert_eq!(back.coefficients.len(), modes.coefficients.len());
    assert_eq!(back.kpoint.parity, Parity::Tm);
}

#[test]
fn into_parts_builds_a_working_solver() {
    let modes = sample_modes(Grid3::new(2, 2, 1), 3);
    let (solver, frequencies, lattice, kpoint) = modes.into_parts().unwrap();
    assert_eq!(solver.num_bands(), 3);
    assert_eq!(solver.block_capacity(), 2);
    assert_eq!(frequencies.len(), 3);
    assert!((lattice.volume() - 1.0).abs() < 1e-12);
    assert_eq!(kpoint.index, 0);
}

#[test]
fn into_parts_rejects_truncated_coefficients() {
    let mut modes = sample_modes(Grid3::new(2, 2, 1), 3);
    modes.coefficients.pop();
    let err = modes.into_parts().unwrap_err();
    assert!(matches!(
        err,
        SdosError::ShapeMismatch {
            what: "mode coefficient array",
            ..
        }
    ));
}
