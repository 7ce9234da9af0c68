use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex64;
use sdos3d_core::grid::Grid3;
use sdos3d_core::gvector::GBox;
use sdos3d_core::sdos::{compute_spectrum, SdosJob};
use sdos3d_core::solver::{PlanewaveModes, NUM_POLARIZATIONS};

struct SweepScenario {
    name: &'static str,
    grid: Grid3,
    n_bands: usize,
    g_box: GBox,
    freq_num: usize,
}

const SCENARIOS: [SweepScenario; 2] = [
    SweepScenario {
        name: "8x8x8_16bands",
        grid: Grid3 {
            nx: 8,
            ny: 8,
            nz: 8,
        },
        n_bands: 16,
        g_box: GBox {
            min: [-2, -2, -2],
            max: [2, 2, 2],
        },
        freq_num: 201,
    },
    SweepScenario {
        name: "16x16x1_8bands",
        grid: Grid3 {
            nx: 16,
            ny: 16,
            nz: 1,
        },
        n_bands: 8,
        g_box: GBox {
            min: [-4, -4, 0],
            max: [4, 4, 0],
        },
        freq_num: 401,
    },
];

fn coefficients(grid: Grid3, n_bands: usize) -> Vec<Complex64> {
    let len = grid.len() * NUM_POLARIZATIONS * n_bands;
    (0..len)
        .map(|i| {
            let phase = i as f64 * 0.73;
            Complex64::new(phase.cos(), phase.sin()) / (1.0 + i as f64).sqrt()
        })
        .collect()
}

fn bench_polesum(c: &mut Criterion) {
    let mut group = c.benchmark_group("polesum");
    for scenario in &SCENARIOS {
        let coeffs = coefficients(scenario.grid, scenario.n_bands);
        let mut solver =
            PlanewaveModes::with_unit_transfer(scenario.grid, 4, coeffs, scenario.n_bands)
                .expect("bench solver");
        let eigenfreqs: Vec<f64> = (0..scenario.n_bands)
            .map(|b| 0.1 + 0.05 * b as f64)
            .collect();
        let job = SdosJob {
            freq_min: 0.0,
            freq_max: 1.0,
            freq_num: scenario.freq_num,
            eta: 0.005,
            band_min: 0,
            n_bands: scenario.n_bands,
            g_box: scenario.g_box,
            save_prefix: String::new(),
        };
        group.bench_function(BenchmarkId::from_parameter(scenario.name), |bencher| {
            bencher.iter(|| {
                let spectrum =
                    compute_spectrum(&mut solver, &eigenfreqs, 1.0, black_box(&job)).unwrap();
                black_box(spectrum.sdos.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_polesum);
criterion_main!(benches);
