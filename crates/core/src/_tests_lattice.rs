#![cfg(test)]

use std::f64::consts::PI;

use super::lattice::Lattice3;

#[test]
fn cubic_volume() {
    assert!((Lattice3::cubic(2.0).volume() - 8.0).abs() < 1e-12);
    assert!((Lattice3::orthorhombic(1.0, 2.0, 3.0).volume() - 6.0).abs() < 1e-12);
}

#[test]
fn volume_is_orientation_independent() {
    let left_handed = Lattice3::oblique([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
    assert!((left_handed.volume() - 1.0).abs() < 1e-12);
}

#[test]
fn reciprocal_is_dual_basis() {
    let lattice = Lattice3::oblique([1.0, 0.0, 0.0], [0.5, 0.8, 0.0], [0.1, 0.2, 1.3]);
    let recip = lattice.reciprocal();
    let direct = [lattice.a1, lattice.a2, lattice.a3];
    let dual = [recip.b1, recip.b2, recip.b3];
    for (i, a) in direct.iter().enumerate() {
        for (j, b) in dual.iter().enumerate() {
            let dot = a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
            let expected = if i == j { 2.0 * PI } else { 0.0 };
            assert!(
                (dot - expected).abs() < 1e-10,
                "a{} . b{} = {dot}, expected {expected}",
                i + 1,
                j + 1
            );
        }
    }
}

#[test]
#[should_panic(expected = "linearly dependent")]
fn reciprocal_rejects_degenerate_cell() {
    let lattice = Lattice3::oblique([1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
    let _ = lattice.reciprocal();
}
