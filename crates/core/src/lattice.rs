//! Lattice primitives and k-point context.

use serde::{Deserialize, Serialize};

use crate::parity::Parity;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lattice3 {
    pub a1: [f64; 3],
    pub a2: [f64; 3],
    pub a3: [f64; 3],
}

impl Lattice3 {
    pub fn cubic(a: f64) -> Self {
        Self {
            a1: [a, 0.0, 0.0],
            a2: [0.0, a, 0.0],
            a3: [0.0, 0.0, a],
        }
    }

    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Self {
        Self {
            a1: [a, 0.0, 0.0],
            a2: [0.0, b, 0.0],
            a3: [0.0, 0.0, c],
        }
    }

    pub fn oblique(a1: [f64; 3], a2: [f64; 3], a3: [f64; 3]) -> Self {
        Self { a1, a2, a3 }
    }

    /// Unit-cell volume |a1 · (a2 × a3)|.
    pub fn volume(&self) -> f64 {
        self.determinant().abs()
    }

    pub fn reciprocal(&self) -> ReciprocalLattice3 {
        let det = self.determinant();
        assert!(
            det.abs() > f64::EPSILON,
            "primitive vectors are linearly dependent"
        );
        let inv = 2.0 * std::f64::consts::PI / det;
        ReciprocalLattice3 {
            b1: scale(cross(self.a2, self.a3), inv),
            b2: scale(cross(self.a3, self.a1), inv),
            b3: scale(cross(self.a1, self.a2), inv),
        }
    }

    fn determinant(&self) -> f64 {
        dot(self.a1, cross(self.a2, self.a3))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReciprocalLattice3 {
    pub b1: [f64; 3],
    pub b2: [f64; 3],
    pub b3: [f64; 3],
}

/// The wavevector the band data was solved at, plus output-naming context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KPoint {
    pub index: usize,
    pub wavevector: [f64; 3],
    #[serde(default)]
    pub parity: Parity,
}

fn cross(u: [f64; 3], v: [f64; 3]) -> [f64; 3] {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

fn dot(u: [f64; 3], v: [f64; 3]) -> f64 {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}

fn scale(v: [f64; 3], s: f64) -> [f64; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}
